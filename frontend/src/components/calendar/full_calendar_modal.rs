use chrono::NaiveDate;
use shared::calendar::CalendarView;
use yew::prelude::*;

use super::{AgendaView, CalendarViewProps, DayView, MonthView, WeekView};
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Modal};
use crate::hooks::use_calendar::use_calendar;
use crate::services::date_utils::today;

#[derive(Properties, PartialEq)]
pub struct FullCalendarModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub initial_view: CalendarView,
}

/// Calendar with Month/Week/Day/Agenda views. Exactly one view is mounted at
/// a time and it loads its own range.
#[function_component(FullCalendarModal)]
pub fn full_calendar_modal(props: &FullCalendarModalProps) -> Html {
    let calendar = use_calendar(props.initial_view);
    let state = calendar.state.clone();
    let actions = calendar.actions.clone();

    let on_select_date = {
        let actions = actions.clone();
        Callback::from(move |date: NaiveDate| {
            actions.set_date.emit(date);
            actions.set_view.emit(CalendarView::Day);
        })
    };

    let on_empty_action = {
        let set_date = actions.set_date.clone();
        Callback::from(move |_: ()| set_date.emit(today()))
    };

    let view_props = CalendarViewProps {
        date: state.current_date,
        on_select_date,
        on_empty_action,
    };

    let body = match state.view {
        CalendarView::Month => html! { <MonthView key="month" ..view_props /> },
        CalendarView::Week => html! { <WeekView key="week" ..view_props /> },
        CalendarView::Day => html! { <DayView key="day" ..view_props /> },
        CalendarView::Agenda => html! { <AgendaView key="agenda" ..view_props /> },
    };

    html! {
        <Modal is_open={props.is_open} on_close={props.on_close.clone()} wide={true}>
            <div class="full-calendar">
                <div class="calendar-toolbar">
                    <div class="calendar-nav">
                        <Button variant={ButtonVariant::Ghost} size={ButtonSize::Small} onclick={actions.prev.clone()}>{"‹"}</Button>
                        <Button variant={ButtonVariant::Secondary} size={ButtonSize::Small} onclick={actions.today.clone()}>{"Today"}</Button>
                        <Button variant={ButtonVariant::Ghost} size={ButtonSize::Small} onclick={actions.next.clone()}>{"›"}</Button>
                    </div>
                    <h2 class="calendar-title">{&state.title}</h2>
                    <div class="view-switcher" role="tablist">
                        {for CalendarView::ALL.iter().map(|view| {
                            let view = *view;
                            let set_view = actions.set_view.clone();
                            html! {
                                <Button
                                    variant={ButtonVariant::Ghost}
                                    size={ButtonSize::Small}
                                    active={view == state.view}
                                    onclick={Callback::from(move |_: MouseEvent| set_view.emit(view))}
                                >
                                    {view.label()}
                                </Button>
                            }
                        })}
                    </div>
                </div>
                {body}
            </div>
        </Modal>
    }
}
