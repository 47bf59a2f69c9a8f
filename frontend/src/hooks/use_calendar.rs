use chrono::NaiveDate;
use shared::calendar::{navigate, range_for, title, CalendarView, DateRange, NavAction};
use yew::prelude::*;

use crate::services::date_utils::today;

#[derive(Clone, PartialEq)]
pub struct CalendarState {
    pub current_date: NaiveDate,
    pub view: CalendarView,
    pub range: DateRange,
    pub title: String,
}

pub struct UseCalendarResult {
    pub state: CalendarState,
    pub actions: UseCalendarActions,
}

#[derive(Clone)]
pub struct UseCalendarActions {
    pub prev: Callback<MouseEvent>,
    pub next: Callback<MouseEvent>,
    pub today: Callback<MouseEvent>,
    pub set_view: Callback<CalendarView>,
    pub set_date: Callback<NaiveDate>,
}

/// Owns the calendar's date and view. Switching view keeps the date, so
/// going Month -> Day lands on the day the user was looking at.
#[hook]
pub fn use_calendar(initial_view: CalendarView) -> UseCalendarResult {
    let current_date = use_state(today);
    let view = use_state(|| initial_view);

    let step = {
        let current_date = current_date.clone();
        let view = view.clone();
        move |action: NavAction| {
            let current_date = current_date.clone();
            let view = view.clone();
            Callback::from(move |_: MouseEvent| {
                current_date.set(navigate(*view, *current_date, action, today()));
            })
        }
    };

    let set_view = {
        let view = view.clone();
        Callback::from(move |next: CalendarView| view.set(next))
    };

    let set_date = {
        let current_date = current_date.clone();
        Callback::from(move |date: NaiveDate| current_date.set(date))
    };

    let state = CalendarState {
        current_date: *current_date,
        view: *view,
        range: range_for(*view, *current_date),
        title: title(*view, *current_date),
    };

    let actions = UseCalendarActions {
        prev: step(NavAction::Prev),
        next: step(NavAction::Next),
        today: step(NavAction::Today),
        set_view,
        set_date,
    };

    UseCalendarResult { state, actions }
}
