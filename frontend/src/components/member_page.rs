use shared::AttendanceConfig;
use yew::prelude::*;

use super::check_in_panel::CheckInPanel;
use super::member_history::MemberHistory;
use super::today_status::TodayStatus;
use crate::hooks::use_member_attendance::use_member_attendance;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct MemberPageProps {
    pub api_client: ApiClient,
    pub config: AttendanceConfig,
}

#[function_component(MemberPage)]
pub fn member_page(props: &MemberPageProps) -> Html {
    let attendance = use_member_attendance(&props.api_client);

    // A check-in changes today's rounds and may add a day to the history
    let on_checked_in = {
        let refresh_today = attendance.refresh_today.clone();
        let refresh_history = attendance.refresh_history.clone();
        Callback::from(move |_| {
            refresh_today.emit(());
            refresh_history.emit(());
        })
    };

    html! {
        <main class="member-page">
            <CheckInPanel
                api_client={props.api_client.clone()}
                config={props.config.clone()}
                {on_checked_in}
            />
            <TodayStatus today={attendance.today.clone()} />
            <MemberHistory history={attendance.history.clone()} />
        </main>
    }
}
