use shared::{format_currency, DashboardAnalytics, Timeframe};
use yew::prelude::*;

use super::TrendChart;
use crate::components::ui::feedback::{render_fetch_state, EmptyCopy};
use crate::components::ui::{Card, Progress, SkeletonVariant};
use crate::hooks::use_business_data::use_dashboard;
use crate::hooks::use_polling_fetch::use_polling_fetch;
use crate::services::date_utils::{format_change, format_duration, format_percent};

#[derive(Properties, PartialEq)]
pub struct RealAnalyticsProps {
    pub timeframe: Timeframe,
}

fn change_badge(change: Option<f64>) -> Html {
    match change {
        Some(change) => html! {
            <span class={classes!("kpi-change", if change >= 0.0 { "up" } else { "down" })}>
                {format_change(change)}
            </span>
        },
        None => html! {},
    }
}

/// KPI cards and the daily trend for the selected timeframe.
#[function_component(RealAnalytics)]
pub fn real_analytics(props: &RealAnalyticsProps) -> Html {
    let ctx = use_dashboard();
    let api = ctx.api.clone();
    let analytics = use_polling_fetch(
        "real-analytics",
        props.timeframe,
        ctx.config.analytics_refresh_ms,
        DashboardAnalytics::is_empty,
        move |timeframe: Timeframe, signal| {
            let api = api.clone();
            async move { api.get_analytics(timeframe, signal.as_ref()).await }
        },
    );

    let body = render_fetch_state(
        &analytics.state,
        SkeletonVariant::Card,
        &analytics.retry,
        EmptyCopy::message("No calls yet for this timeframe. Once your AI receptionist answers calls, metrics appear here."),
        |data| {
            let calls = &data.calls;
            let appointments = &data.appointments;
            let revenue = &data.revenue;
            html! {
                <>
                    <div class="kpi-grid">
                        <div class="kpi-card">
                            <span class="kpi-label">{"Calls"}</span>
                            <span class="kpi-value">{calls.total_calls}</span>
                            {change_badge(calls.change_vs_previous())}
                            <span class="kpi-sub">{format!("avg {}", format_duration(calls.avg_duration_secs.round() as u32))}</span>
                        </div>
                        <div class="kpi-card">
                            <span class="kpi-label">{"Answer rate"}</span>
                            <span class="kpi-value">{format_percent(calls.answer_rate())}</span>
                            <Progress value={calls.answer_rate()} />
                            <span class="kpi-sub">{format!("{} missed", calls.missed_calls)}</span>
                        </div>
                        <div class="kpi-card">
                            <span class="kpi-label">{"Appointments"}</span>
                            <span class="kpi-value">{appointments.booked}</span>
                            <span class="kpi-sub">
                                {format!("{} booking rate", format_percent(appointments.booking_rate(calls)))}
                            </span>
                        </div>
                        <div class="kpi-card">
                            <span class="kpi-label">{"Revenue"}</span>
                            <span class="kpi-value">{format_currency(revenue.total)}</span>
                            {change_badge(revenue.change_vs_previous())}
                            <span class="kpi-sub">{format!("{} projected", format_currency(revenue.projected))}</span>
                        </div>
                    </div>
                    <TrendChart points={data.daily.clone()} />
                </>
            }
        },
    );

    html! {
        <Card title={format!("Performance · {}", props.timeframe.label())} class={classes!("real-analytics")}>
            {body}
        </Card>
    }
}
