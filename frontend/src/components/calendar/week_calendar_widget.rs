use chrono::NaiveDate;
use shared::calendar::{range_for, CalendarView};
use shared::fetch_state::FetchState;
use yew::prelude::*;

use super::AppointmentChip;
use crate::components::ui::feedback::{render_fetch_state, EmptyCopy};
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Card, SkeletonVariant};
use crate::hooks::use_appointments::use_appointments;
use crate::hooks::use_business_data::use_dashboard;
use crate::services::date_utils::today;

#[derive(Properties, PartialEq)]
pub struct WeekCalendarWidgetProps {
    #[prop_or_default]
    pub selected: Option<NaiveDate>,
    pub on_select_date: Callback<NaiveDate>,
    pub on_open_calendar: Callback<()>,
}

/// This week at a glance on the dashboard home.
#[function_component(WeekCalendarWidget)]
pub fn week_calendar_widget(props: &WeekCalendarWidgetProps) -> Html {
    let ctx = use_dashboard();
    let now = today();
    let range = range_for(CalendarView::Week, now);
    let appointments = use_appointments(CalendarView::Week, range);

    let open_calendar = {
        let on_open = props.on_open_calendar.clone();
        Callback::from(move |_: MouseEvent| on_open.emit(()))
    };

    let total = match &appointments.state {
        FetchState::Populated(list) => list.len(),
        _ => 0,
    };

    let body = render_fetch_state(
        &appointments.state,
        SkeletonVariant::Grid,
        &appointments.retry,
        EmptyCopy {
            message: "Nothing booked this week. New bookings from calls show up here.",
            action_label: Some("Open calendar"),
            on_action: props.on_open_calendar.clone(),
        },
        |list| {
            html! {
                <div class="week-strip">
                    {for range.days().map(|day| {
                        let on_select = props.on_select_date.clone();
                        let day_appointments: Vec<_> = list.iter().filter(|a| a.start_date() == day).collect();
                        html! {
                            <div
                                key={day.to_string()}
                                class={classes!(
                                    "week-strip-day",
                                    (day == now).then_some("today"),
                                    (props.selected == Some(day)).then_some("selected"),
                                )}
                                onclick={Callback::from(move |_: MouseEvent| on_select.emit(day))}
                            >
                                <div class="week-strip-date">
                                    <span class="weekday">{day.format("%a").to_string()}</span>
                                    <span class="day-number">{day.format("%-d").to_string()}</span>
                                </div>
                                <div class="week-strip-count">{day_appointments.len()}</div>
                                {for day_appointments.iter().take(2).map(|a| html! {
                                    <AppointmentChip key={a.id.clone()} appointment={(*a).clone()} theme={ctx.theme.clone()} compact={true} />
                                })}
                            </div>
                        }
                    })}
                </div>
            }
        },
    );

    html! {
        <Card
            title={format!("This week · {} appointments", total)}
            class={classes!("week-calendar-widget")}
            actions={html! {
                <Button variant={ButtonVariant::Secondary} size={ButtonSize::Small} onclick={open_calendar}>
                    {"Full calendar"}
                </Button>
            }}
        >
            {body}
        </Card>
    }
}
