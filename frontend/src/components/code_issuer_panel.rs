use shared::{AttendanceConfig, CycleOutcome, IssuerPhase, Round};
use yew::prelude::*;

use super::confirm_modal::ConfirmModal;
use crate::hooks::use_code_issuer::use_code_issuer;
use crate::services::api::ApiClient;
use crate::services::date_utils;

#[derive(Properties, PartialEq)]
pub struct CodeIssuerPanelProps {
    pub api_client: ApiClient,
    pub config: AttendanceConfig,
    /// Reports whether a code is counting down, so the page can guard navigation
    #[prop_or_default]
    pub on_guard_change: Callback<bool>,
}

#[function_component(CodeIssuerPanel)]
pub fn code_issuer_panel(props: &CodeIssuerPanelProps) -> Html {
    let issuer = use_code_issuer(&props.api_client, &props.config);
    let state = &issuer.state;
    let counting = state.is_counting();

    {
        let on_guard_change = props.on_guard_change.clone();
        use_effect_with(counting, move |&counting| {
            on_guard_change.emit(counting);
            || ()
        });
    }

    let round_buttons = Round::ALL.iter().map(|&round| {
        let select_round = issuer.actions.select_round.clone();
        let selected = state.selected_round() == Some(round);
        let class = classes!("round-option", selected.then_some("selected"));
        html! {
            <button
                {class}
                disabled={!state.can_select_round()}
                onclick={Callback::from(move |_: MouseEvent| select_round.emit(round))}
            >
                {round.label()}
            </button>
        }
    });

    let on_generate = {
        let generate = issuer.actions.generate.clone();
        Callback::from(move |_: MouseEvent| generate.emit(()))
    };

    let on_end = {
        let request_end = issuer.actions.request_end.clone();
        Callback::from(move |_: MouseEvent| request_end.emit(()))
    };

    let code_display = match state.active_code() {
        Some(active) => html! {
            <div class="active-code">
                <div class="code-round">{active.round.label()}</div>
                <div class="code-digits">
                    {for active.digits().into_iter().map(|digit| html! {
                        <span class="code-digit">{digit.to_string()}</span>
                    })}
                </div>
                <div class={classes!("countdown", (active.countdown.remaining() <= 10).then_some("ending"))}>
                    {active.countdown.display()}
                </div>
                <div class="code-expiry">
                    {format!("Valid until {}", date_utils::format_time_of_day(active.expires_at))}
                </div>
                <button
                    class="btn btn-danger"
                    disabled={!state.can_end()}
                    onclick={on_end}
                >
                    {if state.phase() == IssuerPhase::Invalidating { "Ending..." } else { "End attendance" }}
                </button>
            </div>
        },
        None => html! {
            <div class="code-controls">
                <div class="round-options">{for round_buttons}</div>
                <button
                    class="btn btn-primary"
                    disabled={state.phase() != IssuerPhase::Idle}
                    onclick={on_generate}
                >
                    {if state.phase() == IssuerPhase::Generating { "Generating..." } else { "Generate code" }}
                </button>
                {match state.last_outcome() {
                    Some(CycleOutcome::Expired) => html! {
                        <div class="notice">{"The code expired."}</div>
                    },
                    Some(CycleOutcome::Invalidated) => html! {
                        <div class="notice">{"Attendance ended."}</div>
                    },
                    None => html! {},
                }}
            </div>
        },
    };

    html! {
        <section class="code-issuer-panel">
            <h2>{"Attendance Code"}</h2>
            {if let Some(error) = state.error() {
                let dismiss = issuer.actions.dismiss_error.clone();
                html! {
                    <div class="error-message">
                        {error}
                        <button class="dismiss" onclick={Callback::from(move |_: MouseEvent| dismiss.emit(()))}>
                            {"×"}
                        </button>
                    </div>
                }
            } else {
                html! {}
            }}
            {code_display}
            <ConfirmModal
                is_open={state.is_confirming_end() || state.phase() == IssuerPhase::Invalidating}
                title="End attendance?"
                message="Members will no longer be able to check in with this code."
                confirm_label="End"
                busy={state.phase() == IssuerPhase::Invalidating}
                on_confirm={issuer.actions.confirm_end.clone()}
                on_cancel={issuer.actions.cancel_end.clone()}
            />
        </section>
    }
}
