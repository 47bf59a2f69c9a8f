pub mod agenda_view;
pub mod appointment_chip;
pub mod day_details_sidebar;
pub mod day_view;
pub mod full_calendar_modal;
pub mod month_view;
pub mod week_calendar_widget;
pub mod week_view;

use chrono::NaiveDate;
use yew::prelude::*;

pub use agenda_view::AgendaView;
pub use appointment_chip::AppointmentChip;
pub use day_details_sidebar::DayDetailsSidebar;
pub use day_view::DayView;
pub use full_calendar_modal::FullCalendarModal;
pub use month_view::MonthView;
pub use week_calendar_widget::WeekCalendarWidget;
pub use week_view::WeekView;

use crate::components::ui::feedback::EmptyCopy;
use crate::components::ui::EmptyState;

/// Props shared by the four calendar views.
#[derive(Properties, PartialEq, Clone)]
pub struct CalendarViewProps {
    /// Anchor date; each view derives its own range from it
    pub date: NaiveDate,
    #[prop_or_default]
    pub on_select_date: Callback<NaiveDate>,
    #[prop_or_default]
    pub on_empty_action: Callback<()>,
}

pub(crate) fn empty_range_copy(props: &CalendarViewProps) -> EmptyCopy {
    EmptyCopy {
        message: "No appointments booked in this period yet.",
        action_label: Some("Jump to today"),
        on_action: props.on_empty_action.clone(),
    }
}

/// Empty-state call-to-action for a populated response whose rows all fall
/// outside the view's dates.
pub(crate) fn render_empty_range(props: &CalendarViewProps) -> Html {
    let copy = empty_range_copy(props);
    html! {
        <EmptyState
            message={copy.message}
            action_label={copy.action_label.map(AttrValue::Static)}
            on_action={copy.on_action}
        />
    }
}
