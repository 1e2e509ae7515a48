use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::admin_page::AdminPage;
use components::confirm_modal::ConfirmModal;
use components::header::Header;
use components::member_page::MemberPage;
use components::sign_in::SignIn;
use services::api::ApiClient;
use services::auth::{AuthSession, Identity};
use services::config::ClientConfig;
use services::logging::Logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    SignIn,
    CheckIn,
    Admin,
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| ClientConfig::default());
    let session = use_memo((), {
        let config = config.clone();
        move |_| AuthSession::new(&config)
    });

    let identity = use_state(|| session.identity());
    let page = use_state(|| {
        if session.is_signed_in() {
            Page::CheckIn
        } else {
            Page::SignIn
        }
    });
    // Set while an attendance code is counting down on the admin page
    let guard_active = use_state(|| false);
    let pending_page = use_state(|| Option::<Page>::None);

    use_effect_with((), {
        let config = config.clone();
        move |_| {
            Logger::info_with_component(
                "app",
                &format!(
                    "Starting against {} (log level {})",
                    config.api_base_url, config.log_level
                ),
            );
            || ()
        }
    });

    let api_client = use_memo((), {
        let config = config.clone();
        let session = session.clone();
        let identity = identity.clone();
        let page = page.clone();
        let guard_active = guard_active.clone();
        let pending_page = pending_page.clone();

        move |_| {
            let on_unauthorized = Callback::from(move |_| {
                identity.set(None);
                guard_active.set(false);
                pending_page.set(None);
                page.set(Page::SignIn);
            });
            ApiClient::new(&config, (*session).clone(), on_unauthorized)
        }
    });

    let go_to = {
        let session = session.clone();
        let identity = identity.clone();
        let page = page.clone();
        let guard_active = guard_active.clone();

        Callback::from(move |target: Page| {
            if target == Page::SignIn {
                session.clear();
                identity.set(None);
            }
            if target != Page::Admin {
                guard_active.set(false);
            }
            page.set(target);
        })
    };

    // Leaving the admin page drops any displayed code, so ask first
    let navigate = {
        let go_to = go_to.clone();
        let pending_page = pending_page.clone();
        let current = *page;
        let guarded = *guard_active;

        Callback::from(move |target: Page| {
            if target == current {
                return;
            }
            if current == Page::Admin && guarded {
                pending_page.set(Some(target));
            } else {
                go_to.emit(target);
            }
        })
    };

    let on_sign_out = {
        let navigate = navigate.clone();
        Callback::from(move |_| navigate.emit(Page::SignIn))
    };

    let on_signed_in = {
        let identity = identity.clone();
        let page = page.clone();
        Callback::from(move |signed_in: Identity| {
            identity.set(Some(signed_in));
            page.set(Page::CheckIn);
        })
    };

    let on_guard_change = {
        let guard_active = guard_active.clone();
        Callback::from(move |active: bool| guard_active.set(active))
    };

    let confirm_leave = {
        let go_to = go_to.clone();
        let pending_page = pending_page.clone();
        Callback::from(move |_| {
            if let Some(target) = *pending_page {
                pending_page.set(None);
                go_to.emit(target);
            }
        })
    };

    let cancel_leave = {
        let pending_page = pending_page.clone();
        Callback::from(move |_| pending_page.set(None))
    };

    let attendance = config.attendance.clone();
    let content = match *page {
        Page::SignIn => html! {
            <SignIn session={(*session).clone()} {on_signed_in} />
        },
        Page::CheckIn => html! {
            <MemberPage api_client={(*api_client).clone()} config={attendance} />
        },
        Page::Admin => html! {
            <AdminPage
                api_client={(*api_client).clone()}
                config={attendance}
                {on_guard_change}
            />
        },
    };

    html! {
        <>
            <Header
                page={*page}
                identity={(*identity).clone()}
                on_navigate={navigate}
                {on_sign_out}
            />
            <div class="container">
                {content}
            </div>
            <ConfirmModal
                is_open={pending_page.is_some()}
                title="Leave attendance?"
                message="The code on screen will be discarded. Members can still use it until it expires."
                confirm_label="Leave"
                on_confirm={confirm_leave}
                on_cancel={cancel_leave}
            />
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
