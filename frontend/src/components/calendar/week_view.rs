use shared::calendar::{range_for, CalendarView, WeekGrid};
use yew::prelude::*;

use super::{empty_range_copy, render_empty_range, AppointmentChip, CalendarViewProps};
use crate::components::ui::feedback::render_fetch_state;
use crate::components::ui::SkeletonVariant;
use crate::hooks::use_appointments::use_appointments;
use crate::hooks::use_business_data::use_dashboard;
use crate::services::date_utils::today;

#[function_component(WeekView)]
pub fn week_view(props: &CalendarViewProps) -> Html {
    let ctx = use_dashboard();
    let hours = ctx.config.week_hours;
    let range = range_for(CalendarView::Week, props.date);
    let appointments = use_appointments(CalendarView::Week, range);
    let now = today();

    render_fetch_state(
        &appointments.state,
        SkeletonVariant::Grid,
        &appointments.retry,
        empty_range_copy(props),
        |list| {
            let grid = WeekGrid::build(props.date, list, hours);
            if grid.is_empty() {
                return render_empty_range(props);
            }
            html! {
                <div class="week-view time-grid">
                    <div class="time-grid-header">
                        <div class="hour-label"></div>
                        {for grid.days.iter().map(|day| {
                            let day = *day;
                            let on_select = props.on_select_date.clone();
                            html! {
                                <button
                                    type="button"
                                    class={classes!("day-column-header", (day == now).then_some("today"))}
                                    onclick={Callback::from(move |_: MouseEvent| on_select.emit(day))}
                                >
                                    {day.format("%a %-d").to_string()}
                                </button>
                            }
                        })}
                    </div>
                    {for grid.hours.hours().map(|hour| html! {
                        <div class="time-grid-row" key={hour}>
                            <div class="hour-label">{ctx.theme.format_hour(hour)}</div>
                            {for (0..grid.days.len()).map(|day_index| html! {
                                <div class="time-slot">
                                    {for grid.cell(day_index, hour).iter().map(|a| html! {
                                        <AppointmentChip key={a.id.clone()} appointment={a.clone()} theme={ctx.theme.clone()} />
                                    })}
                                </div>
                            })}
                        </div>
                    })}
                </div>
            }
        },
    )
}
