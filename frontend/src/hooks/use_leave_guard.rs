use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::BeforeUnloadEvent;
use yew::prelude::*;

use crate::services::logging::Logger;

const LEAVE_WARNING: &str = "Attendance is still open. Leave this page?";

/// Ask the browser to confirm before unloading the page while `active`.
///
/// Leaving does not end anything on the server, so the warning only stops an
/// accidental close. The listener is removed as soon as `active` turns false
/// or the component unmounts.
#[hook]
pub fn use_leave_guard(active: bool) {
    use_effect_with(active, |&active| {
        let listener = if active {
            web_sys::window().map(|window| {
                Logger::debug_with_component("leave-guard", "Attaching beforeunload guard");
                EventListener::new_with_options(
                    &window,
                    "beforeunload",
                    EventListenerOptions::enable_prevent_default(),
                    |event| {
                        event.prevent_default();
                        if let Some(event) = event.dyn_ref::<BeforeUnloadEvent>() {
                            event.set_return_value(LEAVE_WARNING);
                        }
                    },
                )
            })
        } else {
            None
        };

        move || drop(listener)
    });
}
