use shared::AttendanceConfig;
use yew::prelude::*;

use super::attendance_board::AttendanceBoard;
use super::code_issuer_panel::CodeIssuerPanel;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct AdminPageProps {
    pub api_client: ApiClient,
    pub config: AttendanceConfig,
    pub on_guard_change: Callback<bool>,
}

#[function_component(AdminPage)]
pub fn admin_page(props: &AdminPageProps) -> Html {
    html! {
        <main class="admin-page">
            <CodeIssuerPanel
                api_client={props.api_client.clone()}
                config={props.config.clone()}
                on_guard_change={props.on_guard_change.clone()}
            />
            <AttendanceBoard api_client={props.api_client.clone()} />
        </main>
    }
}
