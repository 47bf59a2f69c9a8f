use shared::calendar::{range_for, CalendarView, DayGrid};
use shared::format_currency;
use yew::prelude::*;

use super::{empty_range_copy, render_empty_range, AppointmentChip, CalendarViewProps};
use crate::components::ui::feedback::render_fetch_state;
use crate::components::ui::SkeletonVariant;
use crate::hooks::use_appointments::use_appointments;
use crate::hooks::use_business_data::use_dashboard;

#[function_component(DayView)]
pub fn day_view(props: &CalendarViewProps) -> Html {
    let ctx = use_dashboard();
    let hours = ctx.config.day_hours;
    let range = range_for(CalendarView::Day, props.date);
    let appointments = use_appointments(CalendarView::Day, range);

    render_fetch_state(
        &appointments.state,
        SkeletonVariant::Text,
        &appointments.retry,
        empty_range_copy(props),
        |list| {
            let grid = DayGrid::build(props.date, list, hours);
            if grid.is_empty() {
                return render_empty_range(props);
            }
            html! {
                <div class="day-view time-grid">
                    <div class="day-summary">
                        <span>{format!("{} appointments", grid.appointment_count())}</span>
                        <span>{format!("Est. {}", format_currency(grid.estimated_total()))}</span>
                    </div>
                    {for grid.hours.hours().map(|hour| html! {
                        <div class="time-grid-row" key={hour}>
                            <div class="hour-label">{ctx.theme.format_hour(hour)}</div>
                            <div class="time-slot">
                                {for grid.slot(hour).iter().map(|a| html! {
                                    <AppointmentChip key={a.id.clone()} appointment={a.clone()} theme={ctx.theme.clone()} />
                                })}
                            </div>
                        </div>
                    })}
                </div>
            }
        },
    )
}
