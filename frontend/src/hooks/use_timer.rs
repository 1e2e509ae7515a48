use gloo::timers::callback::{Interval, Timeout};
use yew::prelude::*;

use crate::services::logging::Logger;

/// Run `callback` every `interval_ms` while `active` is true.
///
/// The interval belongs to the effect: it is dropped, and so cancelled, when
/// `active` turns false, when `key` changes, or when the component unmounts.
/// `callback` is captured when the interval starts, so it should not depend
/// on render-time state (a reducer dispatcher is the usual choice).
#[hook]
pub fn use_interval(callback: Callback<()>, interval_ms: u32, active: bool, key: u64) {
    use_effect_with((active, interval_ms, key), move |&(active, interval_ms, key)| {
        let interval = active.then(|| {
            Logger::debug_with_component(
                "interval-hook",
                &format!("Starting {}ms interval (key {})", interval_ms, key),
            );
            Interval::new(interval_ms, move || callback.emit(()))
        });

        move || {
            if let Some(interval) = interval {
                drop(interval);
                Logger::debug_with_component("interval-hook", &format!("Interval {} cancelled", key));
            }
        }
    });
}

/// Run `callback` once, `delay_ms` after `active` becomes true. Cancelled if
/// `active` turns false first or the component unmounts.
#[hook]
pub fn use_timeout(callback: Callback<()>, delay_ms: u32, active: bool) {
    use_effect_with((active, delay_ms), move |&(active, delay_ms)| {
        let timeout = active.then(|| Timeout::new(delay_ms, move || callback.emit(())));

        move || {
            drop(timeout);
        }
    });
}
