use shared::{AttendanceConfig, CheckInPhase};
use yew::prelude::*;

use super::code_input::CodeInput;
use crate::hooks::use_check_in::use_check_in;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct CheckInPanelProps {
    pub api_client: ApiClient,
    pub config: AttendanceConfig,
    #[prop_or_default]
    pub on_checked_in: Callback<()>,
}

#[function_component(CheckInPanel)]
pub fn check_in_panel(props: &CheckInPanelProps) -> Html {
    let check_in = use_check_in(&props.api_client, &props.config, props.on_checked_in.clone());
    let state = &check_in.state;
    let input = state.input();

    let on_submit_click = {
        let submit = check_in.actions.submit.clone();
        Callback::from(move |_: MouseEvent| submit.emit(()))
    };

    let status = match state.phase() {
        CheckInPhase::Succeeded => html! {
            <div class="success-message">{"Checked in!"}</div>
        },
        _ => match state.error() {
            Some(error) => html! { <div class="error-message">{error}</div> },
            None => html! {},
        },
    };

    html! {
        <section class="check-in-panel">
            <h2>{"Check In"}</h2>
            <p class="hint">{"Enter the 6-digit code shown by the organizer."}</p>
            <CodeInput
                cells={input.cell_values()}
                focus={input.focus()}
                disabled={!state.is_editable()}
                on_digit={check_in.actions.type_digit.clone()}
                on_backspace={check_in.actions.backspace.clone()}
                on_paste={check_in.actions.paste.clone()}
                on_focus={check_in.actions.focus.clone()}
                on_submit={check_in.actions.submit.clone()}
            />
            {status}
            <button
                class="btn btn-primary"
                disabled={!state.can_submit()}
                onclick={on_submit_click}
            >
                {if state.phase() == CheckInPhase::Submitting { "Checking in..." } else { "Check in" }}
            </button>
        </section>
    }
}
