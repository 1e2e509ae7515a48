use shared::PeriodMemberAttendanceSummary;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PeriodSummaryTableProps {
    /// Already sorted by attendance rate
    pub rows: Vec<PeriodMemberAttendanceSummary>,
    pub loading: bool,
    pub period_selected: bool,
}

#[function_component(PeriodSummaryTable)]
pub fn period_summary_table(props: &PeriodSummaryTableProps) -> Html {
    if !props.period_selected {
        return html! { <div class="empty">{"Select a membership period."}</div> };
    }
    if props.loading {
        return html! { <div class="loading">{"Loading summaries..."}</div> };
    }
    if props.rows.is_empty() {
        return html! { <div class="empty">{"No attendance in this period."}</div> };
    }

    html! {
        <div class="table-container">
            <table class="attendance-table">
                <thead>
                    <tr>
                        <th>{"Member"}</th>
                        <th>{"Days"}</th>
                        <th>{"Present"}</th>
                        <th>{"Late"}</th>
                        <th>{"Early leave"}</th>
                        <th>{"Absent"}</th>
                        <th>{"Rate"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for props.rows.iter().map(|row| html! {
                        <tr key={row.member_id.to_string()}>
                            <td class="member-name">{&row.member_name}</td>
                            <td>{row.total_exercise_days}</td>
                            <td>{row.present_days}</td>
                            <td>{row.late_days}</td>
                            <td>{row.early_leave_days}</td>
                            <td>{row.absent_days}</td>
                            <td class="rate">{format!("{:.1}%", row.attendance_rate)}</td>
                        </tr>
                    })}
                </tbody>
            </table>
        </div>
    }
}
