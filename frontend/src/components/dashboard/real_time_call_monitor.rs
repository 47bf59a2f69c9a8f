use shared::{BadgeVariant, CallRecord};
use yew::prelude::*;

use crate::components::ui::{Badge, Button, ButtonSize, ButtonVariant, Card, EmptyState};
use crate::hooks::use_call_stream::{use_call_stream, StreamStatus};
use crate::services::date_utils::{format_duration, format_relative, now_ms};

fn status_badge(status: StreamStatus) -> BadgeVariant {
    match status {
        StreamStatus::Live => BadgeVariant::Success,
        StreamStatus::Connecting => BadgeVariant::Info,
        StreamStatus::Reconnecting { .. } => BadgeVariant::Warning,
        StreamStatus::Offline => BadgeVariant::Danger,
    }
}

fn call_row(call: &CallRecord, now: f64) -> Html {
    html! {
        <li class={classes!("call-row", call.status.is_active().then_some("active"))} key={call.id.clone()}>
            <div class="call-main">
                <span class="call-name">{call.display_name()}</span>
                <Badge variant={call.status.badge_variant()} label={call.status.label()} />
            </div>
            <div class="call-meta">
                <span>{format_relative(&call.started_at, now)}</span>
                if call.duration_secs > 0 {
                    <span>{format_duration(call.duration_secs)}</span>
                }
            </div>
            if let Some(summary) = &call.summary {
                <p class="call-summary">{summary}</p>
            }
        </li>
    }
}

/// Live feed of calls handled by the AI receptionist.
#[function_component(RealTimeCallMonitor)]
pub fn real_time_call_monitor() -> Html {
    let stream = use_call_stream();
    let now = now_ms();

    let reconnect = {
        let reconnect = stream.reconnect.clone();
        Callback::from(move |_: MouseEvent| reconnect.emit(()))
    };

    let actions = html! {
        <div class="stream-status">
            <Badge variant={status_badge(stream.status)} label={stream.status.label()} />
            if matches!(stream.status, StreamStatus::Offline) {
                <Button variant={ButtonVariant::Ghost} size={ButtonSize::Small} onclick={reconnect}>
                    {"Reconnect"}
                </Button>
            }
        </div>
    };

    html! {
        <Card title="Live calls" class={classes!("real-time-call-monitor")} {actions}>
            if !stream.active.is_empty() {
                <div class="active-calls">
                    <h4>{format!("{} on the line", stream.active.len())}</h4>
                    <ul class="call-list">
                        {for stream.active.iter().map(|c| call_row(c, now))}
                    </ul>
                </div>
            }
            if stream.calls.is_empty() {
                <EmptyState message="No calls yet. Calls appear here the moment your AI receptionist picks up." />
            } else {
                <ul class="call-list recent-calls">
                    {for stream.calls.iter().filter(|c| !c.status.is_active()).map(|c| call_row(c, now))}
                </ul>
            }
        </Card>
    }
}
