use shared::{format_currency, progress_percent, AdvancedAnalytics as AdvancedAnalyticsData, Timeframe};
use yew::prelude::*;

use crate::components::ui::feedback::{render_fetch_state, EmptyCopy};
use crate::components::ui::{Card, Progress, SkeletonVariant};
use crate::hooks::use_business_data::use_dashboard;
use crate::hooks::use_polling_fetch::use_polling_fetch;
use crate::services::date_utils::format_percent;

#[derive(Properties, PartialEq)]
pub struct AdvancedAnalyticsProps {
    pub timeframe: Timeframe,
}

#[function_component(AdvancedAnalytics)]
pub fn advanced_analytics(props: &AdvancedAnalyticsProps) -> Html {
    let ctx = use_dashboard();
    let api = ctx.api.clone();
    let analytics = use_polling_fetch(
        "advanced-analytics",
        props.timeframe,
        ctx.config.analytics_refresh_ms,
        AdvancedAnalyticsData::is_empty,
        move |timeframe: Timeframe, signal| {
            let api = api.clone();
            async move { api.get_advanced_analytics(timeframe, signal.as_ref()).await }
        },
    );

    let body = render_fetch_state(
        &analytics.state,
        SkeletonVariant::Card,
        &analytics.retry,
        EmptyCopy::message("Not enough call history for deeper insights yet."),
        |data| {
            let busiest = data.hourly_calls.iter().map(|b| b.calls).max().unwrap_or(0) as f64;
            html! {
                <div class="advanced-analytics-grid">
                    <div class="insight-block">
                        <h4>{"Call volume by hour"}</h4>
                        if let Some(peak) = data.peak_hour() {
                            <p class="insight-highlight">
                                {format!("Busiest at {} ({} calls)", ctx.theme.format_hour(peak.hour), peak.calls)}
                            </p>
                        }
                        <div class="hour-bars">
                            {for data.hourly_calls.iter().map(|bucket| html! {
                                <div
                                    class="hour-bar"
                                    key={bucket.hour}
                                    title={format!("{}: {} calls", ctx.theme.format_hour(bucket.hour), bucket.calls)}
                                >
                                    <div
                                        class="hour-bar-fill"
                                        style={format!("height: {:.1}%", progress_percent(bucket.calls as f64, busiest))}
                                    ></div>
                                </div>
                            })}
                        </div>
                    </div>

                    <div class="insight-block">
                        <h4>{"Services"}</h4>
                        <table class="service-breakdown">
                            <thead>
                                <tr><th>{"Service"}</th><th>{"Jobs"}</th><th>{"Revenue"}</th></tr>
                            </thead>
                            <tbody>
                                {for data.services.iter().map(|s| html! {
                                    <tr key={s.service_type.clone()}>
                                        <td>
                                            <span class="service-dot" style={format!("background: {}", ctx.theme.service_color(&s.service_type))}></span>
                                            {&s.service_type}
                                        </td>
                                        <td>{s.appointments}</td>
                                        <td>{format_currency(s.revenue)}</td>
                                    </tr>
                                })}
                            </tbody>
                        </table>
                    </div>

                    <div class="insight-block">
                        <h4>{"Conversion funnel"}</h4>
                        {for data.funnel_rates().into_iter().map(|(label, rate)| html! {
                            <div class="funnel-stage" key={label.clone()}>
                                <Progress value={rate} label={format!("{} · {}", label, format_percent(rate))} />
                            </div>
                        })}
                    </div>
                </div>
            }
        },
    );

    html! {
        <Card title="Insights" class={classes!("advanced-analytics")}>
            {body}
        </Card>
    }
}
