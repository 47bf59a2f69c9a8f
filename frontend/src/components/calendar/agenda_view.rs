use shared::calendar::{range_for, AgendaList, CalendarView};
use yew::prelude::*;

use super::{empty_range_copy, render_empty_range, AppointmentChip, CalendarViewProps};
use crate::components::ui::feedback::render_fetch_state;
use crate::components::ui::SkeletonVariant;
use crate::hooks::use_appointments::use_appointments;
use crate::hooks::use_business_data::use_dashboard;

#[function_component(AgendaView)]
pub fn agenda_view(props: &CalendarViewProps) -> Html {
    let ctx = use_dashboard();
    let range = range_for(CalendarView::Agenda, props.date);
    let appointments = use_appointments(CalendarView::Agenda, range);

    render_fetch_state(
        &appointments.state,
        SkeletonVariant::Text,
        &appointments.retry,
        empty_range_copy(props),
        |list| {
            let agenda = AgendaList::build(range, list);
            // The server may return only out-of-range rows
            if agenda.is_empty() {
                return render_empty_range(props);
            }
            html! {
                <div class="agenda-view">
                    {for agenda.groups.iter().map(|group| {
                        let date = group.date;
                        let on_select = props.on_select_date.clone();
                        html! {
                            <div class="agenda-group" key={date.to_string()}>
                                <button
                                    type="button"
                                    class="agenda-date"
                                    onclick={Callback::from(move |_: MouseEvent| on_select.emit(date))}
                                >
                                    {ctx.theme.format_date(date)}
                                </button>
                                <div class="agenda-items">
                                    {for group.appointments.iter().map(|a| html! {
                                        <AppointmentChip key={a.id.clone()} appointment={a.clone()} theme={ctx.theme.clone()} />
                                    })}
                                </div>
                            </div>
                        }
                    })}
                </div>
            }
        },
    )
}
