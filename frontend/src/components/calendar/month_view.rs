use chrono::NaiveDate;
use shared::calendar::{range_for, CalendarView, MonthGrid};
use yew::prelude::*;

use super::{empty_range_copy, AppointmentChip, CalendarViewProps};
use crate::components::ui::feedback::render_fetch_state;
use crate::components::ui::SkeletonVariant;
use crate::hooks::use_appointments::use_appointments;
use crate::hooks::use_business_data::use_dashboard;
use crate::services::date_utils::today;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MAX_CHIPS_PER_CELL: usize = 3;

#[function_component(MonthView)]
pub fn month_view(props: &CalendarViewProps) -> Html {
    let ctx = use_dashboard();
    let range = range_for(CalendarView::Month, props.date);
    let appointments = use_appointments(CalendarView::Month, range);

    let body = render_fetch_state(
        &appointments.state,
        SkeletonVariant::Grid,
        &appointments.retry,
        empty_range_copy(props),
        |list| {
            let grid = MonthGrid::build(props.date, list, today());
            html! {
                <div class="calendar-grid month-grid">
                    {for grid.cells.iter().map(|cell| {
                        let date: NaiveDate = cell.date;
                        let on_select = props.on_select_date.clone();
                        let onclick = Callback::from(move |_: MouseEvent| on_select.emit(date));
                        let overflow = cell.appointments.len().saturating_sub(MAX_CHIPS_PER_CELL);
                        html! {
                            <div
                                key={date.to_string()}
                                class={classes!(
                                    "calendar-day",
                                    (!cell.in_month).then_some("outside-month"),
                                    cell.is_today.then_some("today"),
                                )}
                                {onclick}
                            >
                                <div class="day-header">
                                    <span class="day-number">{date.format("%-d").to_string()}</span>
                                </div>
                                <div class="day-appointments">
                                    {for cell.appointments.iter().take(MAX_CHIPS_PER_CELL).map(|a| html! {
                                        <AppointmentChip
                                            key={a.id.clone()}
                                            appointment={a.clone()}
                                            theme={ctx.theme.clone()}
                                            compact={true}
                                        />
                                    })}
                                    if overflow > 0 {
                                        <span class="more-appointments">{format!("+{} more", overflow)}</span>
                                    }
                                </div>
                            </div>
                        }
                    })}
                </div>
            }
        },
    );

    html! {
        <div class="month-view">
            <div class="calendar-weekdays">
                {for WEEKDAYS.iter().map(|d| html! { <div class="weekday">{*d}</div> })}
            </div>
            {body}
        </div>
    }
}
