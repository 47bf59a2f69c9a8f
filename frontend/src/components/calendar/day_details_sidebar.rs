use chrono::NaiveDate;
use shared::calendar::{appointments_on, range_for, CalendarView};
use shared::format_currency;
use yew::prelude::*;

use crate::components::ui::feedback::{render_fetch_state, EmptyCopy};
use crate::components::ui::{Badge, EmptyState, SkeletonVariant};
use crate::hooks::use_appointments::use_appointments;
use crate::hooks::use_business_data::use_dashboard;

#[derive(Properties, PartialEq)]
pub struct DayDetailsSidebarProps {
    pub date: NaiveDate,
    pub on_close: Callback<()>,
}

#[function_component(DayDetailsSidebar)]
pub fn day_details_sidebar(props: &DayDetailsSidebarProps) -> Html {
    let ctx = use_dashboard();
    let appointments = use_appointments(CalendarView::Day, range_for(CalendarView::Day, props.date));

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let body = render_fetch_state(
        &appointments.state,
        SkeletonVariant::Text,
        &appointments.retry,
        EmptyCopy::message("No appointments on this day."),
        |list| {
            let list = appointments_on(props.date, list);
            if list.is_empty() {
                return html! { <EmptyState message="No appointments on this day." /> };
            }
            html! {
                <ul class="day-details-list">
                    {for list.iter().map(|a| html! {
                        <li class="day-details-item" key={a.id.clone()}>
                            <div class="item-header">
                                <span class="item-time">{ctx.theme.format_span(a)}</span>
                                <Badge variant={a.status.badge_variant()} label={a.status.label()} />
                            </div>
                            <div class="item-customer">{&a.customer_name}</div>
                            <div
                                class="item-service"
                                style={format!("color: {}", ctx.theme.service_color(&a.service_type))}
                            >
                                {&a.service_type}
                            </div>
                            if let Some(phone) = &a.customer_phone {
                                <a class="item-phone" href={format!("tel:{}", phone)}>{phone}</a>
                            }
                            if let Some(value) = a.estimated_value {
                                <div class="item-value">{format_currency(value)}</div>
                            }
                            if let Some(notes) = &a.notes {
                                <p class="item-notes">{notes}</p>
                            }
                        </li>
                    })}
                </ul>
            }
        },
    );

    html! {
        <aside class="day-details-sidebar">
            <div class="sidebar-header">
                <h3>{ctx.theme.format_date(props.date)}</h3>
                <button type="button" class="modal-close" aria-label="Close" onclick={on_close}>{"×"}</button>
            </div>
            {body}
        </aside>
    }
}
