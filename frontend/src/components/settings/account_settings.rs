use shared::settings::describe;
use shared::AccountSettings;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::{render_save_status, SaveStatus};
use crate::components::ui::feedback::{render_fetch_state, EmptyCopy};
use crate::components::ui::{Button, Card, SkeletonVariant};
use crate::hooks::use_business_data::use_dashboard;
use crate::hooks::use_polling_fetch::use_polling_fetch;

#[function_component(AccountSettingsForm)]
pub fn account_settings_form() -> Html {
    let ctx = use_dashboard();
    let api = ctx.api.clone();
    let loaded = use_polling_fetch("account-settings", (), 0, |_: &AccountSettings| false, move |_, _| {
        let api = api.clone();
        async move { api.get_account_settings().await }
    });

    let body = render_fetch_state(
        &loaded.state,
        SkeletonVariant::Text,
        &loaded.retry,
        EmptyCopy::message(""),
        |settings| html! { <AccountSettingsEditor initial={settings.clone()} /> },
    );

    html! {
        <Card title="Account" class={classes!("settings-account")}>{body}</Card>
    }
}

#[derive(Properties, PartialEq)]
struct EditorProps {
    initial: AccountSettings,
}

#[function_component(AccountSettingsEditor)]
fn account_settings_editor(props: &EditorProps) -> Html {
    let ctx = use_dashboard();
    let settings = use_state(|| props.initial.clone());
    let status = use_state(SaveStatus::default);

    let field = |label: &'static str, input_type: &'static str, value: &str, apply: fn(&mut AccountSettings, String)| {
        let settings = settings.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*settings).clone();
            apply(&mut next, input.value());
            settings.set(next);
        });
        html! {
            <label class="form-field">
                <span class="form-label">{label}</span>
                <input type={input_type} value={value.to_string()} {oninput} />
            </label>
        }
    };

    let onsubmit = {
        let api = ctx.api.clone();
        let settings = settings.clone();
        let status = status.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Err(errors) = settings.validate() {
                status.set(SaveStatus::Failed(describe(&errors)));
                return;
            }
            status.set(SaveStatus::Saving);
            let api = api.clone();
            let body = (*settings).clone();
            let status = status.clone();
            spawn_local(async move {
                status.set(SaveStatus::from_result(api.update_account_settings(&body).await));
            });
        })
    };

    html! {
        <form class="settings-form" {onsubmit}>
            {field("Business name", "text", &settings.business_name, |s, v| s.business_name = v)}
            {field("Owner name", "text", &settings.owner_name, |s, v| s.owner_name = v)}
            {field("Email", "email", &settings.email, |s, v| s.email = v)}
            {field("Phone", "tel", &settings.phone, |s, v| s.phone = v)}
            {field("Address", "text", &settings.address, |s, v| s.address = v)}
            {field("Website", "url", &settings.website, |s, v| s.website = v)}
            {field("Time zone", "text", &settings.timezone, |s, v| s.timezone = v)}
            {render_save_status(&status)}
            <Button button_type="submit" loading={status.is_saving()}>{"Save changes"}</Button>
        </form>
    }
}
