use shared::{round_status_label, DailyAttendanceStatus, MemberId, Round, RoundStatus};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

const PRESENT: &str = "PRESENT";
const ABSENT: &str = "ABSENT";

fn parse_status(value: &str) -> Option<RoundStatus> {
    match value {
        PRESENT => Some(RoundStatus::Present),
        ABSENT => Some(RoundStatus::Absent),
        _ => None,
    }
}

#[derive(Properties, PartialEq)]
pub struct DailyStatusTableProps {
    pub rows: Vec<DailyAttendanceStatus>,
    pub loading: bool,
    /// Selects are disabled while a change is staged or being saved
    pub locked: bool,
    pub on_change: Callback<(MemberId, Round, RoundStatus)>,
}

#[function_component(DailyStatusTable)]
pub fn daily_status_table(props: &DailyStatusTableProps) -> Html {
    if props.loading {
        return html! { <div class="loading">{"Loading attendance..."}</div> };
    }
    if props.rows.is_empty() {
        return html! { <div class="empty">{"No members recorded for this date."}</div> };
    }

    let round_select = |row: &DailyAttendanceStatus, round: Round| {
        let current = row.round_status(round);
        let member_id = row.member_id;
        let on_change = props.on_change.clone();
        let onchange = Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(status) = parse_status(&select.value()) {
                on_change.emit((member_id, round, status));
            }
        });

        // Rebuilt when the lock lifts so a cancelled choice snaps back
        html! {
            <select
                key={format!("{}-{}-{}", member_id, round.number(), props.locked)}
                class="status-select"
                disabled={props.locked}
                {onchange}
            >
                {if current.map_or(true, |status| !status.is_settable()) {
                    html! { <option value="" selected=true disabled=true>{round_status_label(current)}</option> }
                } else {
                    html! {}
                }}
                <option value={PRESENT} selected={current == Some(RoundStatus::Present)}>
                    {RoundStatus::Present.label()}
                </option>
                <option value={ABSENT} selected={current == Some(RoundStatus::Absent)}>
                    {RoundStatus::Absent.label()}
                </option>
            </select>
        }
    };

    html! {
        <div class="table-container">
            <table class="attendance-table">
                <thead>
                    <tr>
                        <th>{"Member"}</th>
                        <th>{Round::First.label()}</th>
                        <th>{Round::Second.label()}</th>
                        <th>{"Status"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for props.rows.iter().map(|row| {
                        let final_status = row.final_status();
                        html! {
                            <tr key={row.member_id.to_string()}>
                                <td class="member-name">{&row.member_name}</td>
                                <td>{round_select(row, Round::First)}</td>
                                <td>{round_select(row, Round::Second)}</td>
                                <td class={final_status.css_class()}>{final_status.label()}</td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_parse_status() {
        assert_eq!(parse_status("PRESENT"), Some(RoundStatus::Present));
        assert_eq!(parse_status("ABSENT"), Some(RoundStatus::Absent));
        assert_eq!(parse_status(""), None);
        assert_eq!(parse_status("LATE"), None);
    }
}
