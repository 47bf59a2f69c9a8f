use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::DailyPoint;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::services::logging::Logger;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendMetric {
    Calls,
    Appointments,
    Revenue,
}

impl TrendMetric {
    const ALL: [TrendMetric; 3] = [TrendMetric::Calls, TrendMetric::Appointments, TrendMetric::Revenue];

    fn label(&self) -> &'static str {
        match self {
            TrendMetric::Calls => "Calls",
            TrendMetric::Appointments => "Bookings",
            TrendMetric::Revenue => "Revenue",
        }
    }

    fn value(&self, point: &DailyPoint) -> f64 {
        match self {
            TrendMetric::Calls => point.calls as f64,
            TrendMetric::Appointments => point.appointments as f64,
            TrendMetric::Revenue => point.revenue,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct TrendChartProps {
    pub points: Vec<DailyPoint>,
}

pub enum Msg {
    SetMetric(TrendMetric),
}

/// Daily series drawn onto a canvas with plotters.
pub struct TrendChart {
    canvas_ref: NodeRef,
    metric: TrendMetric,
}

impl Component for TrendChart {
    type Message = Msg;
    type Properties = TrendChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
            metric: TrendMetric::Calls,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetMetric(metric) => {
                let changed = metric != self.metric;
                self.metric = metric;
                changed
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if let Err(e) = self.draw(&ctx.props().points) {
            Logger::warn_with_component("trend-chart", &e);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="trend-chart">
                <div class="chart-header">
                    <h4 class="chart-title">{"Daily trend"}</h4>
                    <div class="chart-range-selector">
                        {for TrendMetric::ALL.iter().map(|metric| {
                            let metric = *metric;
                            html! {
                                <button
                                    type="button"
                                    class={classes!("range-button", (metric == self.metric).then_some("active"))}
                                    onclick={link.callback(move |_| Msg::SetMetric(metric))}
                                >
                                    {metric.label()}
                                </button>
                            }
                        })}
                    </div>
                </div>
                if ctx.props().points.is_empty() {
                    <div class="chart-empty"><p>{"No daily data for this timeframe"}</p></div>
                } else {
                    <canvas ref={self.canvas_ref.clone()} class="trend-chart-canvas" width="720" height="260"></canvas>
                }
            </div>
        }
    }
}

impl TrendChart {
    fn draw(&self, points: &[DailyPoint]) -> Result<(), String> {
        if points.is_empty() {
            return Ok(());
        }
        let Some(canvas) = self.canvas_ref.cast::<HtmlCanvasElement>() else {
            return Ok(());
        };
        let backend = CanvasBackend::with_canvas_object(canvas).ok_or("canvas has no 2d context")?;
        let root = backend.into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let mut sorted = points.to_vec();
        sorted.sort_by_key(|p| p.date);
        let values: Vec<f64> = sorted.iter().map(|p| self.metric.value(p)).collect();
        let max_value = values.iter().cloned().fold(0.0_f64, f64::max).max(1.0);
        let last_index = (sorted.len() - 1).max(1) as i32;

        let metric = self.metric;
        let mut chart = ChartBuilder::on(&root)
            .margin(12)
            .x_label_area_size(32)
            .y_label_area_size(56)
            .build_cartesian_2d(0..last_index, 0.0..max_value * 1.1)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .x_labels(6)
            .y_labels(6)
            .x_label_formatter(&|i| {
                sorted
                    .get(*i as usize)
                    .map(|p| p.date.format("%m/%d").to_string())
                    .unwrap_or_default()
            })
            .y_label_formatter(&|v| match metric {
                TrendMetric::Revenue => format!("${:.0}", v),
                _ => format!("{:.0}", v),
            })
            .label_style(("sans-serif", 12, &RGBColor(100, 116, 139)))
            .axis_style(RGBColor(226, 232, 240))
            .bold_line_style(RGBColor(241, 245, 249))
            .light_line_style(RGBColor(248, 250, 252))
            .draw()
            .map_err(|e| e.to_string())?;

        let line_color = RGBColor(37, 99, 235);
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, v)| (i as i32, *v)),
                line_color.stroke_width(3),
            ))
            .map_err(|e| e.to_string())?;
        chart
            .draw_series(
                values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| Circle::new((i as i32, *v), 3, line_color.filled())),
            )
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())
    }
}
