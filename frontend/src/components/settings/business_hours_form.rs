use shared::settings::describe;
use shared::{day_name, BusinessHours};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::{render_save_status, SaveStatus};
use crate::components::ui::feedback::{render_fetch_state, EmptyCopy};
use crate::components::ui::{Button, Card, SkeletonVariant};
use crate::hooks::use_business_data::use_dashboard;
use crate::hooks::use_polling_fetch::use_polling_fetch;

#[function_component(BusinessHoursForm)]
pub fn business_hours_form() -> Html {
    let ctx = use_dashboard();
    let api = ctx.api.clone();
    let loaded = use_polling_fetch("business-hours", (), 0, |_: &BusinessHours| false, move |_, _| {
        let api = api.clone();
        async move { api.get_business_hours().await }
    });

    let body = render_fetch_state(
        &loaded.state,
        SkeletonVariant::Text,
        &loaded.retry,
        EmptyCopy::message(""),
        |hours| html! { <HoursEditor initial={hours.clone()} /> },
    );

    html! {
        <Card title="Business hours" class={classes!("settings-hours")}>{body}</Card>
    }
}

#[derive(Properties, PartialEq)]
struct HoursEditorProps {
    initial: BusinessHours,
}

#[derive(Clone, Copy)]
enum DayEdit {
    Open,
    OpenTime,
    CloseTime,
}

#[function_component(HoursEditor)]
fn hours_editor(props: &HoursEditorProps) -> Html {
    let ctx = use_dashboard();
    let hours = use_state(|| props.initial.clone());
    let status = use_state(SaveStatus::default);

    let edit = {
        let hours = hours.clone();
        move |index: usize, what: DayEdit| {
            let hours = hours.clone();
            Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let mut next = (*hours).clone();
                if let Some(day) = next.days.get_mut(index) {
                    match what {
                        DayEdit::Open => day.open = input.checked(),
                        DayEdit::OpenTime => day.open_time = input.value(),
                        DayEdit::CloseTime => day.close_time = input.value(),
                    }
                }
                hours.set(next);
            })
        }
    };

    let on_forwarding = {
        let hours = hours.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*hours).clone();
            next.after_hours_forwarding = input.checked();
            hours.set(next);
        })
    };

    let onsubmit = {
        let api = ctx.api.clone();
        let hours = hours.clone();
        let status = status.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Err(errors) = hours.validate() {
                status.set(SaveStatus::Failed(describe(&errors)));
                return;
            }
            status.set(SaveStatus::Saving);
            let api = api.clone();
            let body = (*hours).clone();
            let status = status.clone();
            spawn_local(async move {
                status.set(SaveStatus::from_result(api.update_business_hours(&body).await));
            });
        })
    };

    html! {
        <form class="settings-form hours-form" {onsubmit}>
            <table class="hours-table">
                <tbody>
                    {for hours.days.iter().enumerate().map(|(index, day)| html! {
                        <tr key={day.day_of_week}>
                            <th>{day_name(day.day_of_week)}</th>
                            <td>
                                <label class="form-checkbox">
                                    <input type="checkbox" checked={day.open} onchange={edit(index, DayEdit::Open)} />
                                    {if day.open { "Open" } else { "Closed" }}
                                </label>
                            </td>
                            <td>
                                <input type="time" value={day.open_time.clone()} disabled={!day.open}
                                    onchange={edit(index, DayEdit::OpenTime)} />
                            </td>
                            <td>
                                <input type="time" value={day.close_time.clone()} disabled={!day.open}
                                    onchange={edit(index, DayEdit::CloseTime)} />
                            </td>
                        </tr>
                    })}
                </tbody>
            </table>
            <label class="form-checkbox">
                <input type="checkbox" checked={hours.after_hours_forwarding} onchange={on_forwarding} />
                {"Forward calls outside business hours"}
            </label>
            {render_save_status(&status)}
            <Button button_type="submit" loading={status.is_saving()}>{"Save hours"}</Button>
        </form>
    }
}
