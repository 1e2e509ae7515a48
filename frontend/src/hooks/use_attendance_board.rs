use std::rc::Rc;

use chrono::NaiveDate;
use shared::{
    DailyAttendanceStatus, MemberId, MembershipPeriod, PeriodId,
    PeriodMemberAttendanceSummary, PeriodQuery, Round, RoundStatus, StatusBoard, ViewMode,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::logging::Logger;

const COMPONENT: &str = "attendance-board";

pub enum BoardAction {
    SelectDate(NaiveDate),
    SelectPeriod(Option<PeriodId>),
    DailyLoaded(NaiveDate, Vec<DailyAttendanceStatus>),
    PeriodLoaded(PeriodId, Vec<PeriodMemberAttendanceSummary>),
    LoadFailed(ViewMode, String),
    Stage(MemberId, Round, RoundStatus),
    CancelChange,
    ConfirmChange,
    ChangeSaved(ViewMode),
    ChangeFailed(String),
}

#[derive(Clone, PartialEq)]
pub struct BoardStore(StatusBoard);

impl Reducible for BoardStore {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut board = self.0.clone();

        match action {
            BoardAction::SelectDate(date) => board.select_date(date),
            BoardAction::SelectPeriod(period_id) => {
                board.select_period(period_id);
            }
            BoardAction::DailyLoaded(date, rows) => {
                if !board.apply_daily(date, rows) {
                    Logger::debug_with_component(COMPONENT, &format!("Dropped stale rows for {}", date));
                }
            }
            BoardAction::PeriodLoaded(period_id, rows) => {
                if !board.apply_period(period_id, rows) {
                    Logger::debug_with_component(
                        COMPONENT,
                        &format!("Dropped stale summaries for period {}", period_id),
                    );
                }
            }
            BoardAction::LoadFailed(view, message) => {
                if !board.fail_load(view, message) {
                    Logger::debug_with_component(COMPONENT, &format!("Dropped stale failure for {:?}", view));
                }
            }
            BoardAction::Stage(member_id, round, status) => {
                if let Err(e) = board.stage_change(member_id, round, status) {
                    Logger::debug_with_component(COMPONENT, &format!("Change not staged: {}", e));
                }
            }
            BoardAction::CancelChange => board.cancel_change(),
            BoardAction::ConfirmChange => {
                if let Err(e) = board.confirm_change() {
                    Logger::debug_with_component(COMPONENT, &format!("Confirm rejected: {}", e));
                }
            }
            BoardAction::ChangeSaved(confirmed) => {
                if board.complete_change(confirmed).is_none() {
                    Logger::debug_with_component(COMPONENT, "View changed while saving, no refetch");
                }
            }
            BoardAction::ChangeFailed(message) => board.fail_change(message),
        }

        Rc::new(Self(board))
    }
}

pub struct UseAttendanceBoardResult {
    pub state: StatusBoard,
    pub periods: Rc<Vec<MembershipPeriod>>,
    pub actions: UseAttendanceBoardActions,
}

#[derive(Clone, PartialEq)]
pub struct UseAttendanceBoardActions {
    pub select_date: Callback<NaiveDate>,
    pub select_period: Callback<Option<PeriodId>>,
    pub stage_change: Callback<(MemberId, Round, RoundStatus)>,
    pub cancel_change: Callback<()>,
    pub confirm_change: Callback<()>,
}

/// Fetch whatever `mode` shows and feed the result back into the board.
fn load_view(api_client: &ApiClient, dispatcher: UseReducerDispatcher<BoardStore>, mode: ViewMode) {
    let api_client = api_client.clone();

    match mode {
        ViewMode::ByDate(date) => spawn_local(async move {
            match api_client.attendance_by_date(date).await {
                Ok(rows) => dispatcher.dispatch(BoardAction::DailyLoaded(date, rows)),
                Err(e) => {
                    Logger::warn_with_component(COMPONENT, &format!("Load for {} failed: {}", date, e));
                    dispatcher.dispatch(BoardAction::LoadFailed(mode, e.user_message()));
                }
            }
        }),
        ViewMode::ByPeriod(Some(period_id)) => spawn_local(async move {
            match api_client.period_attendance(period_id).await {
                Ok(rows) => dispatcher.dispatch(BoardAction::PeriodLoaded(period_id, rows)),
                Err(e) => {
                    Logger::warn_with_component(
                        COMPONENT,
                        &format!("Load for period {} failed: {}", period_id, e),
                    );
                    dispatcher.dispatch(BoardAction::LoadFailed(mode, e.user_message()));
                }
            }
        }),
        ViewMode::ByPeriod(None) => {}
    }
}

/// Admin status board: daily rows or period summaries, plus confirmed
/// corrections of single round statuses.
#[hook]
pub fn use_attendance_board(api_client: &ApiClient) -> UseAttendanceBoardResult {
    let store = use_reducer(|| BoardStore(StatusBoard::new(date_utils::today())));
    let periods = use_state(|| Rc::new(Vec::<MembershipPeriod>::new()));

    // Initial daily view and the period list
    {
        let api_client = api_client.clone();
        let store = store.clone();
        let periods = periods.clone();

        use_effect_with((), move |_| {
            let today = date_utils::today();
            store.dispatch(BoardAction::SelectDate(today));
            load_view(&api_client, store.dispatcher(), ViewMode::ByDate(today));

            spawn_local(async move {
                match api_client.periods().await {
                    Ok(list) => periods.set(Rc::new(list)),
                    Err(e) => {
                        Logger::warn_with_component(COMPONENT, &format!("Period list failed: {}", e));
                    }
                }
            });

            || ()
        });
    }

    let select_date = {
        let store = store.clone();
        let api_client = api_client.clone();

        Callback::from(move |date: NaiveDate| {
            store.dispatch(BoardAction::SelectDate(date));
            load_view(&api_client, store.dispatcher(), ViewMode::ByDate(date));
        })
    };

    let select_period = {
        let store = store.clone();
        let api_client = api_client.clone();

        Callback::from(move |period_id: Option<PeriodId>| {
            let query = store.0.clone().select_period(period_id);
            store.dispatch(BoardAction::SelectPeriod(period_id));
            if let PeriodQuery::Fetch(id) = query {
                load_view(&api_client, store.dispatcher(), ViewMode::ByPeriod(Some(id)));
            }
        })
    };

    let stage_change = {
        let dispatcher = store.dispatcher();
        Callback::from(move |(member_id, round, status): (MemberId, Round, RoundStatus)| {
            dispatcher.dispatch(BoardAction::Stage(member_id, round, status))
        })
    };

    let cancel_change = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(BoardAction::CancelChange))
    };

    let confirm_change = {
        let store = store.clone();
        let api_client = api_client.clone();

        Callback::from(move |_| {
            // The reducer performs the same checks; this copy only decides
            // whether a request goes out.
            let mut preview = store.0.clone();
            let request = preview.confirm_change();
            let mode = preview.mode();
            store.dispatch(BoardAction::ConfirmChange);
            let Ok(request) = request else {
                return;
            };

            let api_client = api_client.clone();
            let dispatcher = store.dispatcher();

            spawn_local(async move {
                match api_client.update_status(&request).await {
                    Ok(()) => {
                        Logger::info_with_component(
                            COMPONENT,
                            &format!(
                                "Member {} {} on {} set to {}",
                                request.member_id,
                                request.round,
                                request.date,
                                request.status.label()
                            ),
                        );
                        dispatcher.dispatch(BoardAction::ChangeSaved(mode));
                        // Dropped as stale by the board if another view is selected by now
                        load_view(&api_client, dispatcher, mode);
                    }
                    Err(e) => {
                        Logger::warn_with_component(COMPONENT, &format!("Status update failed: {}", e));
                        dispatcher.dispatch(BoardAction::ChangeFailed(e.user_message()));
                    }
                }
            });
        })
    };

    UseAttendanceBoardResult {
        state: store.0.clone(),
        periods: (*periods).clone(),
        actions: UseAttendanceBoardActions {
            select_date,
            select_period,
            stage_change,
            cancel_change,
            confirm_change,
        },
    }
}
