use std::rc::Rc;

use shared::{format_currency, Appointment, BusinessTheme};
use yew::prelude::*;

use crate::components::ui::Badge;

#[derive(Properties, PartialEq)]
pub struct AppointmentChipProps {
    pub appointment: Appointment,
    pub theme: Rc<BusinessTheme>,
    /// Month cells only have room for time and name
    #[prop_or_default]
    pub compact: bool,
}

#[function_component(AppointmentChip)]
pub fn appointment_chip(props: &AppointmentChipProps) -> Html {
    let appointment = &props.appointment;
    let theme = &props.theme;
    let color = theme.service_color(&appointment.service_type).to_string();
    let start = theme.format_time(appointment.local_start());

    let tooltip = format!(
        "{}\n{}\n{}{}",
        appointment.customer_name,
        appointment.service_type,
        theme.format_span(appointment),
        appointment
            .estimated_value
            .map(|v| format!("\n{}", format_currency(v)))
            .unwrap_or_default()
    );

    html! {
        <div
            class={classes!("appointment-chip", props.compact.then_some("compact"))}
            style={format!("border-left-color: {}", color)}
            title={tooltip}
            data-status={appointment.status.label()}
        >
            <span class="chip-time">{start}</span>
            <span class="chip-name">{&appointment.customer_name}</span>
            if !props.compact {
                <span class="chip-service">{&appointment.service_type}</span>
                <Badge variant={appointment.status.badge_variant()} label={appointment.status.label()} />
            }
        </div>
    }
}
