use std::rc::Rc;

use shared::{AttendanceConfig, CheckIn, CheckInPhase};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_timer::use_timeout;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const COMPONENT: &str = "check-in";

pub enum CheckInAction {
    TypeDigit(usize, char),
    Backspace(usize),
    Paste(usize, String),
    Focus(usize),
    BeginSubmit,
    Succeeded,
    Failed(String),
    FinishSuccess,
}

#[derive(Clone, PartialEq, Default)]
pub struct CheckInStore(CheckIn);

impl Reducible for CheckInStore {
    type Action = CheckInAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut check_in = self.0.clone();

        match action {
            CheckInAction::TypeDigit(index, ch) => {
                check_in.type_digit(index, ch);
            }
            CheckInAction::Backspace(index) => check_in.backspace(index),
            CheckInAction::Paste(index, text) => {
                check_in.paste(index, &text);
            }
            CheckInAction::Focus(index) => check_in.set_focus(index),
            CheckInAction::BeginSubmit => {
                if let Err(e) = check_in.begin_submit() {
                    Logger::debug_with_component(COMPONENT, &format!("Submit rejected: {}", e));
                }
            }
            CheckInAction::Succeeded => check_in.complete_submit(),
            CheckInAction::Failed(message) => check_in.fail_submit(message),
            CheckInAction::FinishSuccess => check_in.finish_success(),
        }

        Rc::new(Self(check_in))
    }
}

pub struct UseCheckInResult {
    pub state: CheckIn,
    pub actions: UseCheckInActions,
}

#[derive(Clone, PartialEq)]
pub struct UseCheckInActions {
    pub type_digit: Callback<(usize, char)>,
    pub backspace: Callback<usize>,
    pub paste: Callback<(usize, String)>,
    pub focus: Callback<usize>,
    pub submit: Callback<()>,
}

/// Member check-in: six-cell code entry, submission and the success pause.
///
/// `on_checked_in` fires once per accepted code so the caller can refresh
/// today's status.
#[hook]
pub fn use_check_in(
    api_client: &ApiClient,
    config: &AttendanceConfig,
    on_checked_in: Callback<()>,
) -> UseCheckInResult {
    let store = use_reducer(CheckInStore::default);

    let finish_success = {
        let dispatcher = store.dispatcher();
        use_callback((), move |_, _| dispatcher.dispatch(CheckInAction::FinishSuccess))
    };
    use_timeout(
        finish_success,
        config.success_pause_ms,
        store.0.phase() == CheckInPhase::Succeeded,
    );

    let type_digit = {
        let dispatcher = store.dispatcher();
        Callback::from(move |(index, ch): (usize, char)| {
            dispatcher.dispatch(CheckInAction::TypeDigit(index, ch))
        })
    };

    let backspace = {
        let dispatcher = store.dispatcher();
        Callback::from(move |index: usize| dispatcher.dispatch(CheckInAction::Backspace(index)))
    };

    let paste = {
        let dispatcher = store.dispatcher();
        Callback::from(move |(index, text): (usize, String)| {
            dispatcher.dispatch(CheckInAction::Paste(index, text))
        })
    };

    let focus = {
        let dispatcher = store.dispatcher();
        Callback::from(move |index: usize| dispatcher.dispatch(CheckInAction::Focus(index)))
    };

    let submit = {
        let store = store.clone();
        let api_client = api_client.clone();
        let fallback = config.check_in_fallback_message.clone();

        Callback::from(move |_| {
            let submission = store.0.submission();
            store.dispatch(CheckInAction::BeginSubmit);
            let Ok(code) = submission else {
                return;
            };

            let api_client = api_client.clone();
            let dispatcher = store.dispatcher();
            let fallback = fallback.clone();
            let on_checked_in = on_checked_in.clone();

            spawn_local(async move {
                match api_client.check_in(&code).await {
                    Ok(()) => {
                        Logger::info_with_component(COMPONENT, "Check-in accepted");
                        dispatcher.dispatch(CheckInAction::Succeeded);
                        on_checked_in.emit(());
                    }
                    Err(e) => {
                        Logger::warn_with_component(COMPONENT, &format!("Check-in failed: {}", e));
                        dispatcher.dispatch(CheckInAction::Failed(e.user_message_or(&fallback)));
                    }
                }
            });
        })
    };

    UseCheckInResult {
        state: store.0.clone(),
        actions: UseCheckInActions {
            type_digit,
            backspace,
            paste,
            focus,
            submit,
        },
    }
}
