use std::future::Future;
use std::rc::Rc;

use shared::fetch_state::{FetchState, RequestTracker};
use shared::ApiError;
use wasm_bindgen_futures::spawn_local;
use web_sys::{AbortController, AbortSignal};
use yew::prelude::*;

use crate::hooks::use_periodic_refresh::{use_periodic_refresh, PeriodicRefreshConfig};
use crate::services::logging::Logger;

pub struct UsePollingFetchResult<T> {
    pub state: FetchState<T>,
    pub retry: Callback<()>,
}

/// Fetch `key` on mount, whenever `key` changes, every `interval_ms`
/// (0 disables the timer) and on `retry`.
///
/// Each load takes a ticket from a [`RequestTracker`] and aborts the request
/// it replaces, so a slow response for an old key never lands. Timer reloads
/// are silent: the last data stays on screen and a failed background refresh
/// only logs.
#[hook]
pub fn use_polling_fetch<K, T, F, Fut>(
    component: &'static str,
    key: K,
    interval_ms: u32,
    is_empty: fn(&T) -> bool,
    fetcher: F,
) -> UsePollingFetchResult<T>
where
    K: PartialEq + Clone + 'static,
    T: Clone + 'static,
    F: Fn(K, Option<AbortSignal>) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let state = use_state(FetchState::<T>::default);
    let has_data = use_mut_ref(|| false);
    let tracker = use_memo((), |_| RequestTracker::new());
    let controller = use_mut_ref(|| None::<AbortController>);
    let latest_key = use_mut_ref(|| key.clone());
    let latest_fetcher = use_mut_ref(|| None::<Rc<F>>);

    *latest_key.borrow_mut() = key.clone();
    *latest_fetcher.borrow_mut() = Some(Rc::new(fetcher));

    // `true` = foreground load with skeleton, `false` = silent refresh
    let load = {
        let state = state.clone();
        let has_data = has_data.clone();
        let tracker = tracker.clone();
        let controller = controller.clone();
        let latest_key = latest_key.clone();
        let latest_fetcher = latest_fetcher.clone();
        Callback::from(move |foreground: bool| {
            let Some(fetcher) = latest_fetcher.borrow().clone() else {
                return;
            };

            let ticket = tracker.begin();
            if let Some(previous) = controller.borrow_mut().take() {
                previous.abort();
            }
            let next = AbortController::new().ok();
            let signal = next.as_ref().map(|c| c.signal());
            *controller.borrow_mut() = next;

            if foreground || !*has_data.borrow() {
                *has_data.borrow_mut() = false;
                state.set(FetchState::Loading);
            }

            let future = (*fetcher)(latest_key.borrow().clone(), signal);
            let state = state.clone();
            let has_data = has_data.clone();
            let tracker = tracker.clone();
            spawn_local(async move {
                let result = future.await;
                if matches!(&result, Err(e) if e.is_aborted()) {
                    return;
                }
                let applied = tracker.complete(ticket, || {
                    if let Err(e) = &result {
                        if !foreground && *has_data.borrow() {
                            Logger::warn_with_component(component, &format!("background refresh failed: {}", e));
                            return;
                        }
                    }
                    let next = FetchState::from_result(result, is_empty);
                    *has_data.borrow_mut() = next.data().is_some();
                    state.set(next);
                });
                if !applied {
                    Logger::debug_with_component(component, "dropped superseded response");
                }
            });
        })
    };

    {
        let load = load.clone();
        let tracker = tracker.clone();
        let controller = controller.clone();
        use_effect_with(key, move |_| {
            load.emit(true);
            move || {
                tracker.cancel_all();
                if let Some(active) = controller.borrow_mut().take() {
                    active.abort();
                }
            }
        });
    }

    let refresh = {
        let load = load.clone();
        Callback::from(move |_: ()| load.emit(false))
    };
    use_periodic_refresh(
        PeriodicRefreshConfig {
            interval_ms,
            initial_delay_ms: None,
        },
        refresh,
        interval_ms == 0,
    );

    let retry = Callback::from(move |_: ()| load.emit(true));

    UsePollingFetchResult {
        state: (*state).clone(),
        retry,
    }
}
