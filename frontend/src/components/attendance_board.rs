use shared::{PeriodId, ViewMode};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::confirm_modal::ConfirmModal;
use super::daily_status_table::DailyStatusTable;
use super::period_summary_table::PeriodSummaryTable;
use crate::hooks::use_attendance_board::use_attendance_board;
use crate::services::api::ApiClient;
use crate::services::date_utils;

#[derive(Properties, PartialEq)]
pub struct AttendanceBoardProps {
    pub api_client: ApiClient,
}

#[function_component(AttendanceBoard)]
pub fn attendance_board(props: &AttendanceBoardProps) -> Html {
    let board = use_attendance_board(&props.api_client);
    let state = &board.state;
    let actions = &board.actions;

    // Remember the last date so switching back from the period view lands on it
    let last_date = use_state(date_utils::today);
    {
        let last_date = last_date.clone();
        use_effect_with(state.selected_date(), move |selected| {
            if let Some(date) = *selected {
                last_date.set(date);
            }
            || ()
        });
    }

    let by_date = matches!(state.mode(), ViewMode::ByDate(_));
    // View selection stays put until a saved change has been written
    let saving = state.is_saving();

    let show_by_date = {
        let select_date = actions.select_date.clone();
        let date = *last_date;
        Callback::from(move |_: MouseEvent| {
            if !by_date {
                select_date.emit(date);
            }
        })
    };

    let show_by_period = {
        let select_period = actions.select_period.clone();
        Callback::from(move |_: MouseEvent| {
            if by_date {
                select_period.emit(None);
            }
        })
    };

    let on_date_change = {
        let select_date = actions.select_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(date) = date_utils::parse_date_input(&input.value()) {
                select_date.emit(date);
            }
        })
    };

    let on_period_change = {
        let select_period = actions.select_period.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            select_period.emit(select.value().parse::<PeriodId>().ok());
        })
    };

    let selector = match state.mode() {
        ViewMode::ByDate(date) => html! {
            <div class="board-selector">
                <label for="board-date">{"Date"}</label>
                <input
                    id="board-date"
                    type="date"
                    value={date_utils::date_input_value(date)}
                    disabled={saving}
                    onchange={on_date_change}
                />
                <span class="date-display">{date_utils::format_date_for_display(date)}</span>
            </div>
        },
        ViewMode::ByPeriod(selected) => html! {
            <div class="board-selector">
                <label for="board-period">{"Period"}</label>
                <select id="board-period" disabled={saving} onchange={on_period_change}>
                    <option value="" selected={selected.is_none()}>{"Choose a period"}</option>
                    {for board.periods.iter().map(|period| html! {
                        <option
                            value={period.id.to_string()}
                            selected={selected == Some(period.id)}
                        >
                            {&period.name}
                        </option>
                    })}
                </select>
            </div>
        },
    };

    let table = match state.mode() {
        ViewMode::ByDate(_) => html! {
            <DailyStatusTable
                rows={state.daily().to_vec()}
                loading={state.is_loading()}
                locked={state.pending().is_some() || state.is_saving()}
                on_change={actions.stage_change.clone()}
            />
        },
        ViewMode::ByPeriod(selected) => html! {
            <PeriodSummaryTable
                rows={state.period().to_vec()}
                loading={state.is_loading()}
                period_selected={selected.is_some()}
            />
        },
    };

    let (confirm_title, confirm_message) = state
        .pending()
        .map(|pending| (format!("Change status of {}?", pending.member_name), pending.describe()))
        .unwrap_or_default();

    html! {
        <section class="attendance-board">
            <div class="board-header">
                <h2>{"Attendance"}</h2>
                <div class="view-toggle">
                    <button class={classes!("btn", by_date.then_some("active"))} disabled={saving} onclick={show_by_date}>
                        {"By date"}
                    </button>
                    <button class={classes!("btn", (!by_date).then_some("active"))} disabled={saving} onclick={show_by_period}>
                        {"By period"}
                    </button>
                </div>
            </div>
            {selector}
            {if let Some(error) = state.error() {
                html! { <div class="error-message">{error}</div> }
            } else {
                html! {}
            }}
            {if state.is_saving() {
                html! { <div class="saving">{"Saving..."}</div> }
            } else {
                html! {}
            }}
            {table}
            <ConfirmModal
                is_open={state.pending().is_some()}
                title={confirm_title}
                message={confirm_message}
                confirm_label="Save"
                on_confirm={actions.confirm_change.clone()}
                on_cancel={actions.cancel_change.clone()}
            />
        </section>
    }
}
