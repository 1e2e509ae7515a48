use shared::{round_status_label, Round};
use yew::prelude::*;

use crate::hooks::use_member_attendance::TodayState;

#[derive(Properties, PartialEq)]
pub struct TodayStatusProps {
    pub today: TodayState,
}

#[function_component(TodayStatus)]
pub fn today_status(props: &TodayStatusProps) -> Html {
    let body = match (&props.today.attendance, &props.today.error) {
        (Some(attendance), _) => {
            let final_status = attendance.final_status();
            html! {
                <>
                    <ul class="round-statuses">
                        {for Round::ALL.iter().map(|&round| html! {
                            <li>
                                <span class="round-label">{round.label()}</span>
                                <span class="round-status">
                                    {round_status_label(attendance.round_status(round))}
                                </span>
                            </li>
                        })}
                    </ul>
                    <div class={classes!("final-status", final_status.css_class())}>
                        {final_status.label()}
                    </div>
                </>
            }
        }
        (None, Some(error)) => html! { <div class="error-message">{error}</div> },
        (None, None) => html! { <div class="loading">{"Loading..."}</div> },
    };

    html! {
        <section class="today-status">
            <h2>{"Today"}</h2>
            {body}
        </section>
    }
}
