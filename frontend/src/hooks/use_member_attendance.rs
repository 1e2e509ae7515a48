use shared::{PeriodAttendanceHistory, TodayAttendance};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const COMPONENT: &str = "member-attendance";

#[derive(Clone, PartialEq, Default)]
pub struct TodayState {
    pub attendance: Option<TodayAttendance>,
    pub error: Option<String>,
}

#[derive(Clone, PartialEq, Default)]
pub struct HistoryState {
    pub periods: Vec<PeriodAttendanceHistory>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseMemberAttendanceResult {
    pub today: TodayState,
    pub history: HistoryState,
    pub refresh_today: Callback<()>,
    pub refresh_history: Callback<()>,
}

/// Today's round statuses and the period history of the signed-in member.
#[hook]
pub fn use_member_attendance(api_client: &ApiClient) -> UseMemberAttendanceResult {
    let today = use_state(TodayState::default);
    let history = use_state(HistoryState::default);

    let refresh_today = {
        let today = today.clone();
        let api_client = api_client.clone();

        Callback::from(move |_| {
            let today = today.clone();
            let api_client = api_client.clone();

            spawn_local(async move {
                match api_client.today_attendance().await {
                    Ok(attendance) => today.set(TodayState {
                        attendance: Some(attendance),
                        error: None,
                    }),
                    Err(e) => {
                        Logger::warn_with_component(COMPONENT, &format!("Today's status failed: {}", e));
                        today.set(TodayState {
                            attendance: None,
                            error: Some(e.user_message()),
                        });
                    }
                }
            });
        })
    };

    let refresh_history = {
        let history = history.clone();
        let api_client = api_client.clone();

        Callback::from(move |_| {
            let history = history.clone();
            let api_client = api_client.clone();
            let previous = history.periods.clone();

            history.set(HistoryState {
                periods: previous.clone(),
                loading: true,
                error: None,
            });

            spawn_local(async move {
                match api_client.my_attendance().await {
                    Ok(periods) => history.set(HistoryState {
                        periods,
                        loading: false,
                        error: None,
                    }),
                    Err(e) => {
                        Logger::warn_with_component(COMPONENT, &format!("History failed: {}", e));
                        history.set(HistoryState {
                            periods: previous,
                            loading: false,
                            error: Some(e.user_message()),
                        });
                    }
                }
            });
        })
    };

    // Fetch both on mount
    {
        let refresh_today = refresh_today.clone();
        let refresh_history = refresh_history.clone();
        use_effect_with((), move |_| {
            refresh_today.emit(());
            refresh_history.emit(());
            || ()
        });
    }

    UseMemberAttendanceResult {
        today: (*today).clone(),
        history: (*history).clone(),
        refresh_today,
        refresh_history,
    }
}
