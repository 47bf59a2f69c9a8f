//! Date-range math and display structures for the four calendar views.
//!
//! Every view fetches a flat appointment list for its own range and reshapes
//! it here: a 42-cell month grid, a 7-column hourly week grid, a single-column
//! hourly day grid, or a date-grouped agenda list.

use chrono::{Datelike, Duration, Months, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::Appointment;

pub const MONTH_GRID_CELLS: usize = 42;
pub const AGENDA_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarView {
    #[default]
    Month,
    Week,
    Day,
    Agenda,
}

impl CalendarView {
    pub const ALL: [CalendarView; 4] = [
        CalendarView::Month,
        CalendarView::Week,
        CalendarView::Day,
        CalendarView::Agenda,
    ];

    /// Path segment of the view-specific calendar endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarView::Month => "month",
            CalendarView::Week => "week",
            CalendarView::Day => "day",
            CalendarView::Agenda => "agenda",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CalendarView::Month => "Month",
            CalendarView::Week => "Week",
            CalendarView::Day => "Day",
            CalendarView::Agenda => "Agenda",
        }
    }
}

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    pub fn single(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.num_days()).map(move |offset| start + Duration::days(offset))
    }

    /// `start=YYYY-MM-DD&end=YYYY-MM-DD`
    pub fn to_query(&self) -> String {
        format!(
            "start={}&end={}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .map(|next| next - Duration::days(1))
        .unwrap_or(first)
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// The date range a view fetches for the given anchor date.
pub fn range_for(view: CalendarView, date: NaiveDate) -> DateRange {
    match view {
        CalendarView::Month => DateRange::new(first_of_month(date), last_of_month(date)),
        CalendarView::Week => {
            let start = week_start(date);
            DateRange::new(start, start + Duration::days(6))
        }
        CalendarView::Day => DateRange::single(date),
        CalendarView::Agenda => DateRange::new(date, date + Duration::days(AGENDA_WINDOW_DAYS - 1)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Prev,
    Next,
    Today,
}

/// New anchor date after a prev/next/today click.
///
/// Month steps keep the day of month where possible and clamp to the last day
/// otherwise (Jan 31 -> Feb 28).
pub fn navigate(view: CalendarView, date: NaiveDate, action: NavAction, today: NaiveDate) -> NaiveDate {
    let forward = match action {
        NavAction::Today => return today,
        NavAction::Next => true,
        NavAction::Prev => false,
    };
    match view {
        CalendarView::Month => {
            let stepped = if forward {
                date.checked_add_months(Months::new(1))
            } else {
                date.checked_sub_months(Months::new(1))
            };
            stepped.unwrap_or(date)
        }
        CalendarView::Week => shift(date, 7, forward),
        CalendarView::Day => shift(date, 1, forward),
        CalendarView::Agenda => shift(date, AGENDA_WINDOW_DAYS, forward),
    }
}

fn shift(date: NaiveDate, days: i64, forward: bool) -> NaiveDate {
    if forward {
        date + Duration::days(days)
    } else {
        date - Duration::days(days)
    }
}

/// Header text for the calendar toolbar.
pub fn title(view: CalendarView, date: NaiveDate) -> String {
    match view {
        CalendarView::Month => date.format("%B %Y").to_string(),
        CalendarView::Week => {
            let range = range_for(view, date);
            span_title(range)
        }
        CalendarView::Day => date.format("%A, %B %-d, %Y").to_string(),
        CalendarView::Agenda => {
            let range = range_for(view, date);
            format!("Agenda · {}", span_title(range))
        }
    }
}

fn span_title(range: DateRange) -> String {
    if range.start.year() == range.end.year() {
        format!(
            "{} – {}",
            range.start.format("%b %-d"),
            range.end.format("%b %-d, %Y")
        )
    } else {
        format!(
            "{} – {}",
            range.start.format("%b %-d, %Y"),
            range.end.format("%b %-d, %Y")
        )
    }
}

/// Visible hour rows of a time grid, `start_hour..end_hour`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl SlotHours {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        let start_hour = start_hour.min(23);
        let end_hour = end_hour.clamp(start_hour + 1, 24);
        Self { start_hour, end_hour }
    }

    pub fn full_day() -> Self {
        Self::new(0, 24)
    }

    pub fn hours(&self) -> std::ops::Range<u32> {
        self.start_hour..self.end_hour
    }

    pub fn row_count(&self) -> usize {
        (self.end_hour - self.start_hour) as usize
    }

    /// Row for an hour; hours outside the window clamp to the first/last row.
    pub fn row_for(&self, hour: u32) -> usize {
        let clamped = hour.clamp(self.start_hour, self.end_hour - 1);
        (clamped - self.start_hour) as usize
    }
}

impl Default for SlotHours {
    fn default() -> Self {
        Self::new(7, 20)
    }
}

fn sorted(appointments: &[Appointment]) -> Vec<Appointment> {
    let mut list = appointments.to_vec();
    list.sort_by(|a, b| {
        a.local_start()
            .cmp(&b.local_start())
            .then_with(|| a.id.cmp(&b.id))
    });
    list
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<MonthCell>,
}

impl MonthGrid {
    /// Six Sunday-aligned weeks covering the month that contains `anchor`.
    pub fn build(anchor: NaiveDate, appointments: &[Appointment], today: NaiveDate) -> Self {
        let first = first_of_month(anchor);
        let grid_start = week_start(first);
        let appointments = sorted(appointments);

        let cells = (0..MONTH_GRID_CELLS as i64)
            .map(|offset| {
                let date = grid_start + Duration::days(offset);
                MonthCell {
                    date,
                    in_month: date.month() == first.month() && date.year() == first.year(),
                    is_today: date == today,
                    appointments: appointments
                        .iter()
                        .filter(|a| a.start_date() == date)
                        .cloned()
                        .collect(),
                }
            })
            .collect();

        Self {
            year: first.year(),
            month: first.month(),
            cells,
        }
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[MonthCell]> {
        self.cells.chunks(7)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&MonthCell> {
        self.cells.iter().find(|c| c.date == date)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid {
    pub days: Vec<NaiveDate>,
    pub hours: SlotHours,
    /// `rows[hour_row][day_index]`
    pub rows: Vec<Vec<Vec<Appointment>>>,
}

impl WeekGrid {
    pub fn build(anchor: NaiveDate, appointments: &[Appointment], hours: SlotHours) -> Self {
        let start = week_start(anchor);
        let days: Vec<NaiveDate> = (0..7).map(|d| start + Duration::days(d)).collect();
        let mut rows = vec![vec![Vec::new(); 7]; hours.row_count()];

        for appointment in sorted(appointments) {
            let local = appointment.local_start();
            if let Some(day_index) = days.iter().position(|d| *d == local.date()) {
                let row = hours.row_for(local.hour());
                rows[row][day_index].push(appointment);
            }
        }

        Self { days, hours, rows }
    }

    pub fn cell(&self, day_index: usize, hour: u32) -> &[Appointment] {
        let row = self.hours.row_for(hour);
        self.rows
            .get(row)
            .and_then(|r| r.get(day_index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn appointment_count(&self) -> usize {
        self.rows.iter().flatten().map(Vec::len).sum()
    }

    /// True when no row fell inside the week, even if the server sent some.
    pub fn is_empty(&self) -> bool {
        self.appointment_count() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayGrid {
    pub date: NaiveDate,
    pub hours: SlotHours,
    pub rows: Vec<Vec<Appointment>>,
}

impl DayGrid {
    pub fn build(date: NaiveDate, appointments: &[Appointment], hours: SlotHours) -> Self {
        let mut rows = vec![Vec::new(); hours.row_count()];
        for appointment in sorted(appointments) {
            let local = appointment.local_start();
            if local.date() == date {
                rows[hours.row_for(local.hour())].push(appointment);
            }
        }
        Self { date, hours, rows }
    }

    pub fn slot(&self, hour: u32) -> &[Appointment] {
        self.rows
            .get(self.hours.row_for(hour))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn appointment_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.appointment_count() == 0
    }

    /// Sum of estimated values for the day, for the sidebar summary.
    pub fn estimated_total(&self) -> f64 {
        self.rows
            .iter()
            .flatten()
            .filter_map(|a| a.estimated_value)
            .sum()
    }
}

/// Appointments whose offset-local start falls on `date`, by start time.
pub fn appointments_on(date: NaiveDate, appointments: &[Appointment]) -> Vec<Appointment> {
    sorted(appointments)
        .into_iter()
        .filter(|a| a.start_date() == date)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgendaGroup {
    pub date: NaiveDate,
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgendaList {
    pub range: DateRange,
    pub groups: Vec<AgendaGroup>,
}

impl AgendaList {
    /// Dates with at least one appointment, ascending.
    pub fn build(range: DateRange, appointments: &[Appointment]) -> Self {
        let mut groups: Vec<AgendaGroup> = Vec::new();
        for appointment in sorted(appointments) {
            let date = appointment.start_date();
            if !range.contains(date) {
                continue;
            }
            match groups.last_mut() {
                Some(group) if group.date == date => group.appointments.push(appointment),
                _ => groups.push(AgendaGroup {
                    date,
                    appointments: vec![appointment],
                }),
            }
        }
        Self { range, groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppointmentStatus;
    use chrono::DateTime;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn apt(id: &str, start: &str, end: &str) -> Appointment {
        Appointment {
            id: id.to_string(),
            customer_name: format!("Customer {}", id),
            service_type: "HVAC".to_string(),
            start_time: DateTime::parse_from_rfc3339(start).unwrap(),
            end_time: DateTime::parse_from_rfc3339(end).unwrap(),
            status: AppointmentStatus::Scheduled,
            estimated_value: Some(100.0),
            customer_phone: None,
            notes: None,
        }
    }

    fn fixture() -> Vec<Appointment> {
        vec![
            apt("b", "2026-10-14T14:15:00-04:00", "2026-10-14T15:00:00-04:00"),
            apt("a", "2026-10-14T09:00:00-04:00", "2026-10-14T10:00:00-04:00"),
            apt("c", "2026-10-17T06:30:00-04:00", "2026-10-17T07:30:00-04:00"),
            apt("d", "2026-11-02T10:00:00-05:00", "2026-11-02T11:00:00-05:00"),
        ]
    }

    #[test]
    fn test_ranges_per_view() {
        let saturday = d(2026, 10, 17);
        assert_eq!(range_for(CalendarView::Month, saturday), DateRange::new(d(2026, 10, 1), d(2026, 10, 31)));
        assert_eq!(range_for(CalendarView::Week, saturday), DateRange::new(d(2026, 10, 11), d(2026, 10, 17)));
        assert_eq!(range_for(CalendarView::Day, saturday), DateRange::single(saturday));
        let agenda = range_for(CalendarView::Agenda, saturday);
        assert_eq!(agenda.num_days(), 30);
        assert_eq!(agenda.end, d(2026, 11, 15));
        assert_eq!(range_for(CalendarView::Month, d(2028, 2, 10)).end, d(2028, 2, 29));
    }

    #[test]
    fn test_week_start_on_sunday_is_same_day() {
        assert_eq!(week_start(d(2026, 10, 11)), d(2026, 10, 11));
        assert_eq!(week_start(d(2026, 10, 12)), d(2026, 10, 11));
    }

    #[test]
    fn test_navigation() {
        let today = d(2026, 10, 17);
        assert_eq!(navigate(CalendarView::Month, d(2026, 1, 31), NavAction::Next, today), d(2026, 2, 28));
        assert_eq!(navigate(CalendarView::Month, d(2026, 1, 15), NavAction::Prev, today), d(2025, 12, 15));
        assert_eq!(navigate(CalendarView::Week, today, NavAction::Next, today), d(2026, 10, 24));
        assert_eq!(navigate(CalendarView::Day, today, NavAction::Prev, today), d(2026, 10, 16));
        assert_eq!(navigate(CalendarView::Agenda, today, NavAction::Next, today), d(2026, 11, 16));
        assert_eq!(navigate(CalendarView::Day, d(2020, 1, 1), NavAction::Today, today), today);
    }

    #[test]
    fn test_titles() {
        let date = d(2026, 10, 17);
        assert_eq!(title(CalendarView::Month, date), "October 2026");
        assert_eq!(title(CalendarView::Week, date), "Oct 11 – Oct 17, 2026");
        assert_eq!(title(CalendarView::Day, date), "Saturday, October 17, 2026");
        assert_eq!(title(CalendarView::Week, d(2026, 12, 31)), "Dec 27, 2026 – Jan 2, 2027");
    }

    #[test]
    fn test_month_grid_places_appointments_by_date() {
        let today = d(2026, 10, 17);
        let grid = MonthGrid::build(today, &fixture(), today);
        assert_eq!(grid.cells.len(), MONTH_GRID_CELLS);
        assert_eq!(grid.cells[0].date, d(2026, 9, 27));
        assert!(!grid.cells[0].in_month);
        assert_eq!(grid.weeks().count(), 6);

        let wed = grid.cell(d(2026, 10, 14)).unwrap();
        let ids: Vec<&str> = wed.appointments.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let sat = grid.cell(today).unwrap();
        assert!(sat.is_today);
        assert_eq!(sat.appointments.len(), 1);

        // Nov 2 is a trailing cell of the October grid
        let trailing = grid.cell(d(2026, 11, 2)).unwrap();
        assert!(!trailing.in_month);
        assert_eq!(trailing.appointments[0].id, "d");
    }

    #[test]
    fn test_week_grid_places_by_day_and_hour() {
        let grid = WeekGrid::build(d(2026, 10, 15), &fixture(), SlotHours::new(7, 20));
        assert_eq!(grid.days.len(), 7);
        assert_eq!(grid.rows.len(), 13);
        // Wednesday is column 3
        assert_eq!(grid.cell(3, 9)[0].id, "a");
        assert_eq!(grid.cell(3, 14)[0].id, "b");
        // 06:30 clamps to the first visible row
        assert_eq!(grid.cell(6, 7)[0].id, "c");
        // November appointment is outside the week
        assert_eq!(grid.appointment_count(), 3);
    }

    #[test]
    fn test_day_grid_uses_wall_clock_hours() {
        let grid = DayGrid::build(d(2026, 10, 14), &fixture(), SlotHours::full_day());
        assert_eq!(grid.rows.len(), 24);
        assert_eq!(grid.slot(9)[0].id, "a");
        assert_eq!(grid.slot(14)[0].id, "b");
        assert!(grid.slot(10).is_empty());
        assert_eq!(grid.appointment_count(), 2);
        assert_eq!(grid.estimated_total(), 200.0);
    }

    #[test]
    fn test_agenda_groups_by_date() {
        let range = range_for(CalendarView::Agenda, d(2026, 10, 14));
        let list = AgendaList::build(range, &fixture());
        let dates: Vec<NaiveDate> = list.groups.iter().map(|g| g.date).collect();
        assert_eq!(dates, vec![d(2026, 10, 14), d(2026, 10, 17), d(2026, 11, 2)]);
        assert_eq!(list.groups[0].appointments[0].id, "a");

        let later = AgendaList::build(range_for(CalendarView::Agenda, d(2026, 12, 1)), &fixture());
        assert!(later.is_empty());
    }

    #[test]
    fn test_overlapping_appointments_both_render() {
        let overlapping = vec![
            apt("x", "2026-10-14T09:00:00-04:00", "2026-10-14T10:00:00-04:00"),
            apt("y", "2026-10-14T09:30:00-04:00", "2026-10-14T10:30:00-04:00"),
        ];
        let grid = DayGrid::build(d(2026, 10, 14), &overlapping, SlotHours::full_day());
        assert_eq!(grid.slot(9).len(), 2);
    }

    #[test]
    fn test_rows_from_neighbouring_days_leave_grids_empty() {
        let late = vec![apt("x", "2026-10-16T23:30:00-07:00", "2026-10-17T00:30:00-07:00")];
        let saturday = d(2026, 10, 17);

        assert!(DayGrid::build(saturday, &late, SlotHours::full_day()).is_empty());
        assert!(appointments_on(saturday, &late).is_empty());
        assert!(!DayGrid::build(d(2026, 10, 16), &late, SlotHours::full_day()).is_empty());

        let next_week = vec![apt("y", "2026-10-18T09:00:00-04:00", "2026-10-18T10:00:00-04:00")];
        assert!(WeekGrid::build(saturday, &next_week, SlotHours::default()).is_empty());
        assert!(!WeekGrid::build(saturday, &fixture(), SlotHours::default()).is_empty());
    }

    #[test]
    fn test_appointments_on_sorts_by_start() {
        let list = appointments_on(d(2026, 10, 14), &fixture());
        let ids: Vec<&str> = list.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_slot_hours_normalizes() {
        let hours = SlotHours::new(22, 5);
        assert_eq!(hours.start_hour, 22);
        assert_eq!(hours.end_hour, 23);
        assert_eq!(hours.row_for(3), 0);
        assert_eq!(SlotHours::default().row_for(23), 12);
    }

    #[test]
    fn test_range_query() {
        let range = DateRange::new(d(2026, 10, 17), d(2026, 10, 11));
        assert_eq!(range.to_query(), "start=2026-10-11&end=2026-10-17");
        assert_eq!(range.days().count(), 7);
    }
}
