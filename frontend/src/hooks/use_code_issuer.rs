use std::rc::Rc;

use chrono::{DateTime, Utc};
use shared::{AttendanceConfig, CodeIssuer, GeneratedCode, Round};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_leave_guard::use_leave_guard;
use super::use_timer::use_interval;
use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::logging::Logger;

const COMPONENT: &str = "code-issuer";

pub enum IssuerAction {
    SelectRound(Round),
    BeginGenerate,
    Generated(GeneratedCode, DateTime<Utc>),
    GenerateFailed(String),
    Tick,
    RequestEnd,
    CancelEnd,
    BeginInvalidate,
    Invalidated,
    InvalidateFailed(String),
    ClearError,
}

#[derive(Clone, PartialEq, Default)]
pub struct IssuerStore(CodeIssuer);

impl Reducible for IssuerStore {
    type Action = IssuerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut issuer = self.0.clone();

        match action {
            IssuerAction::SelectRound(round) => {
                if let Err(e) = issuer.select_round(round) {
                    Logger::debug_with_component(COMPONENT, &format!("Round change ignored: {}", e));
                }
            }
            IssuerAction::BeginGenerate => {
                if let Err(e) = issuer.begin_generate() {
                    Logger::debug_with_component(COMPONENT, &format!("Generate rejected: {}", e));
                }
            }
            IssuerAction::Generated(code, issued_at) => {
                if issuer.complete_generate(code, issued_at) {
                    if let Some(active) = issuer.active_code() {
                        Logger::info_with_component(
                            COMPONENT,
                            &format!("{} code active until {}", active.round, active.expires_at),
                        );
                    }
                }
            }
            IssuerAction::GenerateFailed(message) => issuer.fail_generate(message),
            IssuerAction::Tick => {
                if issuer.tick() == Some(0) {
                    Logger::info_with_component(COMPONENT, "Countdown reached zero, code dropped locally");
                }
            }
            IssuerAction::RequestEnd => {
                if let Err(e) = issuer.request_end() {
                    Logger::debug_with_component(COMPONENT, &format!("End request ignored: {}", e));
                }
            }
            IssuerAction::CancelEnd => issuer.cancel_end(),
            IssuerAction::BeginInvalidate => {
                if let Err(e) = issuer.begin_invalidate() {
                    Logger::debug_with_component(COMPONENT, &format!("Invalidate rejected: {}", e));
                }
            }
            IssuerAction::Invalidated => {
                issuer.complete_invalidate();
                Logger::info_with_component(COMPONENT, "Attendance code ended");
            }
            IssuerAction::InvalidateFailed(message) => issuer.fail_invalidate(message),
            IssuerAction::ClearError => issuer.clear_error(),
        }

        Rc::new(Self(issuer))
    }
}

pub struct UseCodeIssuerResult {
    pub state: CodeIssuer,
    pub actions: UseCodeIssuerActions,
}

#[derive(Clone, PartialEq)]
pub struct UseCodeIssuerActions {
    pub select_round: Callback<Round>,
    pub generate: Callback<()>,
    pub request_end: Callback<()>,
    pub cancel_end: Callback<()>,
    pub confirm_end: Callback<()>,
    pub dismiss_error: Callback<()>,
}

/// Admin code generation: generate, count down, end.
#[hook]
pub fn use_code_issuer(api_client: &ApiClient, config: &AttendanceConfig) -> UseCodeIssuerResult {
    let store = use_reducer(IssuerStore::default);

    let tick = {
        let dispatcher = store.dispatcher();
        use_callback((), move |_, _| dispatcher.dispatch(IssuerAction::Tick))
    };
    use_interval(tick, config.tick_interval_ms, store.0.is_counting(), store.0.cycle());
    use_leave_guard(store.0.is_counting());

    let select_round = {
        let dispatcher = store.dispatcher();
        Callback::from(move |round: Round| dispatcher.dispatch(IssuerAction::SelectRound(round)))
    };

    let generate = {
        let store = store.clone();
        let api_client = api_client.clone();
        let fallback = config.generate_fallback_message.clone();

        Callback::from(move |_| {
            let request = store.0.generate_request();
            store.dispatch(IssuerAction::BeginGenerate);
            let Ok(round) = request else {
                return;
            };

            let api_client = api_client.clone();
            let dispatcher = store.dispatcher();
            let fallback = fallback.clone();

            spawn_local(async move {
                match api_client.generate_code(round).await {
                    Ok(code) => {
                        dispatcher.dispatch(IssuerAction::Generated(code, date_utils::now_utc()));
                    }
                    Err(e) => {
                        Logger::warn_with_component(COMPONENT, &format!("Generate failed: {}", e));
                        dispatcher.dispatch(IssuerAction::GenerateFailed(e.user_message_or(&fallback)));
                    }
                }
            });
        })
    };

    let request_end = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(IssuerAction::RequestEnd))
    };

    let cancel_end = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(IssuerAction::CancelEnd))
    };

    let confirm_end = {
        let store = store.clone();
        let api_client = api_client.clone();

        Callback::from(move |_| {
            let allowed = store.0.can_end();
            store.dispatch(IssuerAction::BeginInvalidate);
            if !allowed {
                return;
            }

            let api_client = api_client.clone();
            let dispatcher = store.dispatcher();

            spawn_local(async move {
                match api_client.invalidate_code().await {
                    Ok(()) => dispatcher.dispatch(IssuerAction::Invalidated),
                    Err(e) => {
                        Logger::warn_with_component(COMPONENT, &format!("Invalidate failed: {}", e));
                        dispatcher.dispatch(IssuerAction::InvalidateFailed(e.user_message()));
                    }
                }
            });
        })
    };

    let dismiss_error = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_| dispatcher.dispatch(IssuerAction::ClearError))
    };

    UseCodeIssuerResult {
        state: store.0.clone(),
        actions: UseCodeIssuerActions {
            select_round,
            generate,
            request_end,
            cancel_end,
            confirm_end,
            dismiss_error,
        },
    }
}
