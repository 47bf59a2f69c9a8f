use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::{Interval, Timeout};
use yew::prelude::*;

use crate::services::logging::Logger;

/// Configuration for periodic refresh behavior
#[derive(Clone, PartialEq)]
pub struct PeriodicRefreshConfig {
    pub interval_ms: u32,
    pub initial_delay_ms: Option<u32>,
}

impl Default for PeriodicRefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: 300_000,   // 5 minutes
            initial_delay_ms: None, // No initial delay
        }
    }
}

/// Result from the periodic refresh hook
pub struct UsePeriodicRefreshResult {
    pub is_running: bool,
}

/// Hook that emits `refresh_fn` every `interval_ms` while `pause_when` is false.
///
/// The timer is restarted only when the config or pause flag changes; the
/// latest `refresh_fn` is always the one called, so callers may pass a fresh
/// callback every render. Timers are dropped on unmount.
#[hook]
pub fn use_periodic_refresh(
    config: PeriodicRefreshConfig,
    refresh_fn: Callback<()>,
    pause_when: bool,
) -> UsePeriodicRefreshResult {
    let is_running = use_state(|| false);
    let latest_refresh = use_mut_ref(|| refresh_fn.clone());
    *latest_refresh.borrow_mut() = refresh_fn;

    {
        let is_running = is_running.clone();
        use_effect_with((config, pause_when), move |(config, is_paused)| {
            let interval: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
            let mut delay: Option<Timeout> = None;

            if *is_paused || config.interval_ms == 0 {
                is_running.set(false);
            } else {
                Logger::debug_with_component(
                    "periodic-refresh-hook",
                    &format!("starting refresh timer every {}ms", config.interval_ms),
                );
                is_running.set(true);

                let start_interval = {
                    let interval = interval.clone();
                    let latest_refresh = latest_refresh.clone();
                    let interval_ms = config.interval_ms;
                    move || {
                        let handle = Interval::new(interval_ms, move || {
                            let refresh = latest_refresh.borrow().clone();
                            refresh.emit(());
                        });
                        *interval.borrow_mut() = Some(handle);
                    }
                };

                match config.initial_delay_ms {
                    Some(initial_delay) => delay = Some(Timeout::new(initial_delay, start_interval)),
                    None => start_interval(),
                }
            }

            move || {
                drop(delay);
                interval.borrow_mut().take();
            }
        });
    }

    UsePeriodicRefreshResult {
        is_running: *is_running,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_config_default() {
        let config = PeriodicRefreshConfig::default();
        assert_eq!(config.interval_ms, 300_000);
        assert_eq!(config.initial_delay_ms, None);
    }

    #[wasm_bindgen_test]
    fn test_config_staggered() {
        let config = PeriodicRefreshConfig {
            initial_delay_ms: Some(15000),
            ..PeriodicRefreshConfig::default()
        };
        assert_eq!(config.initial_delay_ms, Some(15000));
    }
}
