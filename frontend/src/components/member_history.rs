use shared::round_status_label;
use yew::prelude::*;

use crate::hooks::use_member_attendance::HistoryState;
use crate::services::date_utils;

#[derive(Properties, PartialEq)]
pub struct MemberHistoryProps {
    pub history: HistoryState,
}

#[function_component(MemberHistory)]
pub fn member_history(props: &MemberHistoryProps) -> Html {
    let history = &props.history;

    let body = if history.loading && history.periods.is_empty() {
        html! { <div class="loading">{"Loading history..."}</div> }
    } else if let Some(error) = &history.error {
        html! { <div class="error-message">{error}</div> }
    } else if history.periods.is_empty() {
        html! { <div class="empty">{"No attendance recorded yet."}</div> }
    } else {
        html! {
            <>
            {for history.periods.iter().map(|period| {
                let summary = &period.summary;
                html! {
                    <div class="history-period">
                        <h3>{&period.period_name}</h3>
                        <div class="period-summary">
                            <span>{format!("Rate {:.1}%", summary.attendance_rate)}</span>
                            <span>{format!("Present {}", summary.present_days)}</span>
                            <span>{format!("Late {}", summary.late_days)}</span>
                            <span>{format!("Early leave {}", summary.early_leave_days)}</span>
                            <span>{format!("Absent {}", summary.absent_days)}</span>
                            <span>{format!("of {} days", summary.total_exercise_days)}</span>
                        </div>
                        <table class="attendance-table">
                            <thead>
                                <tr>
                                    <th>{"Date"}</th>
                                    <th>{"Round 1"}</th>
                                    <th>{"Round 2"}</th>
                                    <th>{"Status"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for period.records.iter().map(|record| {
                                    let final_status = record.final_status();
                                    html! {
                                        <tr>
                                            <td class="date">{date_utils::format_date_for_display(record.date)}</td>
                                            <td>{round_status_label(record.round1_status)}</td>
                                            <td>{round_status_label(record.round2_status)}</td>
                                            <td class={final_status.css_class()}>{final_status.label()}</td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                }
            })}
            </>
        }
    };

    html! {
        <section class="member-history">
            <h2>{"My Attendance"}</h2>
            {body}
        </section>
    }
}
