use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use shared::call_feed::CallFeed;
use shared::fetch_state::RequestTracker;
use shared::reconnect::ReconnectPolicy;
use shared::{CallEvent, CallRecord};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, EventSource, MessageEvent};
use yew::prelude::*;

use crate::hooks::use_business_data::use_dashboard;
use crate::hooks::use_periodic_refresh::{use_periodic_refresh, PeriodicRefreshConfig};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const COMPONENT: &str = "call-stream";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreamStatus {
    Connecting,
    Live,
    Reconnecting { attempt: u32, delay_ms: u32 },
    /// Gave up after the configured attempts; polling carries the feed.
    Offline,
}

impl StreamStatus {
    pub fn is_live(&self) -> bool {
        matches!(self, StreamStatus::Live)
    }

    pub fn label(&self) -> String {
        match self {
            StreamStatus::Connecting => "Connecting…".to_string(),
            StreamStatus::Live => "Live".to_string(),
            StreamStatus::Reconnecting { delay_ms, .. } => {
                format!("Reconnecting in {}s", (delay_ms + 999) / 1000)
            }
            StreamStatus::Offline => "Offline (polling)".to_string(),
        }
    }
}

pub struct UseCallStreamResult {
    pub calls: Vec<CallRecord>,
    pub active: Vec<CallRecord>,
    pub status: StreamStatus,
    pub reconnect: Callback<()>,
}

#[derive(Default)]
struct StreamInner {
    source: Option<EventSource>,
    on_open: Option<Closure<dyn FnMut(Event)>>,
    on_message: Option<Closure<dyn FnMut(MessageEvent)>>,
    on_error: Option<Closure<dyn FnMut(Event)>>,
    attempt: u32,
    // Invalidates scheduled reconnects on unmount or manual reconnect
    schedule: RequestTracker,
}

impl StreamInner {
    fn close(&mut self) {
        if let Some(source) = self.source.take() {
            source.close();
        }
    }
}

#[derive(Clone)]
struct StreamHandles {
    url: String,
    policy: ReconnectPolicy,
    inner: Rc<RefCell<StreamInner>>,
    feed: Rc<RefCell<CallFeed>>,
    status: UseStateHandle<StreamStatus>,
    redraw: UseForceUpdateHandle,
}

fn connect(handles: StreamHandles) {
    let source = match EventSource::new(&handles.url) {
        Ok(source) => source,
        Err(_) => {
            Logger::error_with_component(COMPONENT, "could not open call stream");
            schedule_reconnect(handles);
            return;
        }
    };
    handles.status.set(StreamStatus::Connecting);

    let on_open = {
        let handles = handles.clone();
        Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            handles.inner.borrow_mut().attempt = 0;
            handles.status.set(StreamStatus::Live);
            Logger::info_with_component(COMPONENT, "call stream connected");
        })
    };

    let on_message = {
        let handles = handles.clone();
        Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            let Some(text) = event.data().as_string() else {
                return;
            };
            match serde_json::from_str::<CallEvent>(&text) {
                Ok(call_event) => {
                    if handles.feed.borrow_mut().apply_event(call_event) {
                        handles.redraw.force_update();
                    }
                }
                Err(e) => Logger::warn_with_component(COMPONENT, &format!("ignoring bad event: {}", e)),
            }
        })
    };

    // Only closes the source; the closures stay alive until the next connect
    // replaces them, since this one is running.
    let on_error = {
        let handles = handles.clone();
        Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            handles.inner.borrow_mut().close();
            schedule_reconnect(handles.clone());
        })
    };

    source.set_onopen(Some(on_open.as_ref().unchecked_ref()));
    source.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
    source.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    let mut inner = handles.inner.borrow_mut();
    inner.close();
    inner.source = Some(source);
    inner.on_open = Some(on_open);
    inner.on_message = Some(on_message);
    inner.on_error = Some(on_error);
}

fn schedule_reconnect(handles: StreamHandles) {
    let (attempt, ticket) = {
        let mut inner = handles.inner.borrow_mut();
        inner.attempt += 1;
        (inner.attempt, inner.schedule.begin())
    };

    if !handles.policy.should_retry(attempt) {
        Logger::warn_with_component(COMPONENT, "giving up on call stream, polling only");
        handles.status.set(StreamStatus::Offline);
        return;
    }

    let delay_ms = handles.policy.delay_for(attempt);
    Logger::warn_with_component(
        COMPONENT,
        &format!("call stream dropped, retry {} in {}ms", attempt, delay_ms),
    );
    handles.status.set(StreamStatus::Reconnecting { attempt, delay_ms });

    spawn_local(async move {
        TimeoutFuture::new(delay_ms).await;
        let still_wanted = handles.inner.borrow().schedule.is_current(ticket);
        if still_wanted {
            connect(handles);
        }
    });
}

fn poll_recent(api: ApiClient, feed: Rc<RefCell<CallFeed>>, redraw: UseForceUpdateHandle) {
    spawn_local(async move {
        match api.get_recent_calls(None).await {
            Ok(calls) => {
                if feed.borrow_mut().apply_snapshot(calls) {
                    redraw.force_update();
                }
            }
            Err(e) => Logger::warn_with_component(COMPONENT, &format!("recent calls poll failed: {}", e)),
        }
    });
}

/// Live call feed. The event stream is primary; `/calls/recent` is polled
/// once on mount and then only while the stream is down. Both sources merge
/// through [`CallFeed`], so overlap never duplicates a call.
#[hook]
pub fn use_call_stream() -> UseCallStreamResult {
    let ctx = use_dashboard();
    let feed = use_mut_ref(|| CallFeed::new(ctx.config.call_feed_limit));
    let inner = use_mut_ref(StreamInner::default);
    let status = use_state(|| StreamStatus::Connecting);
    let redraw = use_force_update();

    let handles = StreamHandles {
        url: ctx.api.call_stream_url(),
        policy: ctx.config.reconnect.clone(),
        inner: inner.clone(),
        feed: feed.clone(),
        status: status.clone(),
        redraw: redraw.clone(),
    };

    {
        let handles = handles.clone();
        let api = ctx.api.clone();
        use_effect_with((handles.url.clone(), handles.policy.clone()), move |_| {
            poll_recent(api, handles.feed.clone(), handles.redraw.clone());
            {
                let mut inner = handles.inner.borrow_mut();
                inner.attempt = 0;
                inner.schedule.begin();
            }
            let inner = handles.inner.clone();
            connect(handles);
            move || {
                let mut inner = inner.borrow_mut();
                inner.schedule.cancel_all();
                inner.close();
                inner.on_open = None;
                inner.on_message = None;
                inner.on_error = None;
            }
        });
    }

    let poll = {
        let api = ctx.api.clone();
        let feed = feed.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| poll_recent(api.clone(), feed.clone(), redraw.clone()))
    };
    use_periodic_refresh(
        PeriodicRefreshConfig {
            interval_ms: ctx.config.call_poll_ms,
            initial_delay_ms: None,
        },
        poll,
        status.is_live(),
    );

    let reconnect = Callback::from(move |_: ()| {
        {
            let mut inner = handles.inner.borrow_mut();
            inner.attempt = 0;
            inner.schedule.begin();
        }
        Logger::info_with_component(COMPONENT, "manual reconnect");
        connect(handles.clone());
    });

    let feed = feed.borrow();
    UseCallStreamResult {
        calls: feed.calls(),
        active: feed.active(),
        status: *status,
        reconnect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_status_labels() {
        assert_eq!(StreamStatus::Live.label(), "Live");
        assert_eq!(
            StreamStatus::Reconnecting { attempt: 2, delay_ms: 10_000 }.label(),
            "Reconnecting in 10s"
        );
        assert!(!StreamStatus::Offline.is_live());
    }
}
