use shared::{BadgeVariant, BenchmarkRating, BenchmarkReport, Timeframe};
use yew::prelude::*;

use crate::components::ui::feedback::{render_fetch_state, EmptyCopy};
use crate::components::ui::{Badge, Card, Progress, SkeletonVariant};
use crate::hooks::use_business_data::use_dashboard;
use crate::hooks::use_polling_fetch::use_polling_fetch;

#[derive(Properties, PartialEq)]
pub struct PerformanceBenchmarkingProps {
    pub timeframe: Timeframe,
}

fn rating_badge(rating: BenchmarkRating) -> (BadgeVariant, &'static str) {
    match rating {
        BenchmarkRating::Above => (BadgeVariant::Success, "Above average"),
        BenchmarkRating::AtPar => (BadgeVariant::Info, "On par"),
        BenchmarkRating::Below => (BadgeVariant::Warning, "Below average"),
    }
}

fn is_report_empty(report: &BenchmarkReport) -> bool {
    report.metrics.is_empty()
}

#[function_component(PerformanceBenchmarking)]
pub fn performance_benchmarking(props: &PerformanceBenchmarkingProps) -> Html {
    let ctx = use_dashboard();
    let api = ctx.api.clone();
    let report = use_polling_fetch(
        "benchmarks",
        props.timeframe,
        ctx.config.analytics_refresh_ms,
        is_report_empty,
        move |timeframe: Timeframe, signal| {
            let api = api.clone();
            async move { api.get_benchmarks(timeframe, signal.as_ref()).await }
        },
    );

    let body = render_fetch_state(
        &report.state,
        SkeletonVariant::Text,
        &report.retry,
        EmptyCopy::message("Benchmarks appear once there is a full week of call data."),
        |data| {
            html! {
                <>
                    <p class="benchmark-industry">{format!("Compared with {} businesses", data.industry)}</p>
                    <ul class="benchmark-list">
                        {for data.metrics.iter().map(|metric| {
                            let (variant, label) = rating_badge(metric.rating());
                            html! {
                                <li class="benchmark-row" key={metric.name.clone()}>
                                    <div class="benchmark-header">
                                        <span class="benchmark-name">{&metric.name}</span>
                                        <Badge {variant} {label} />
                                    </div>
                                    <div class="benchmark-values">
                                        <span>{format!("You: {:.1}", metric.value)}</span>
                                        <span>{format!("Industry: {:.1}", metric.industry_average)}</span>
                                    </div>
                                    <Progress
                                        value={metric.percentile as f64}
                                        label={format!("{}th percentile", metric.percentile)}
                                    />
                                </li>
                            }
                        })}
                    </ul>
                </>
            }
        },
    );

    html! {
        <Card title="Benchmarks" class={classes!("performance-benchmarking")}>
            {body}
        </Card>
    }
}
