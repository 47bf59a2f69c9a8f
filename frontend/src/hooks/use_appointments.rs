use shared::calendar::{CalendarView, DateRange};
use shared::fetch_state::FetchState;
use shared::Appointment;
use yew::prelude::*;

use crate::hooks::use_business_data::use_dashboard;
use crate::hooks::use_polling_fetch::use_polling_fetch;

pub struct UseAppointmentsResult {
    pub state: FetchState<Vec<Appointment>>,
    pub retry: Callback<()>,
}

/// Appointments of one calendar view and range, refreshed on the calendar
/// interval. A new view or range supersedes the request in flight.
#[hook]
pub fn use_appointments(view: CalendarView, range: DateRange) -> UseAppointmentsResult {
    let ctx = use_dashboard();
    let api = ctx.api.clone();

    let result = use_polling_fetch(
        "appointments",
        (view, range),
        ctx.config.calendar_refresh_ms,
        Vec::<Appointment>::is_empty,
        move |(view, range): (CalendarView, DateRange), signal| {
            let api = api.clone();
            async move { api.get_appointments(view, range, signal.as_ref()).await }
        },
    );

    UseAppointmentsResult {
        state: result.state,
        retry: result.retry,
    }
}
