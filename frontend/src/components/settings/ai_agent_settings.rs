use shared::settings::{describe, MAX_CALL_MINUTES, MAX_GREETING_LENGTH};
use shared::{AgentTone, AiAgentSettings, AGENT_VOICES};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::{render_save_status, SaveStatus};
use crate::components::ui::feedback::{render_fetch_state, EmptyCopy};
use crate::components::ui::{Button, Card, SkeletonVariant};
use crate::hooks::use_business_data::use_dashboard;
use crate::hooks::use_polling_fetch::use_polling_fetch;

#[function_component(AiAgentSettingsForm)]
pub fn ai_agent_settings_form() -> Html {
    let ctx = use_dashboard();
    let api = ctx.api.clone();
    let loaded = use_polling_fetch("ai-agent-settings", (), 0, |_: &AiAgentSettings| false, move |_, _| {
        let api = api.clone();
        async move { api.get_ai_agent_settings().await }
    });

    let body = render_fetch_state(
        &loaded.state,
        SkeletonVariant::Text,
        &loaded.retry,
        EmptyCopy::message(""),
        |settings| html! { <AgentEditor initial={settings.clone()} /> },
    );

    html! {
        <Card title="AI receptionist" class={classes!("settings-agent")}>{body}</Card>
    }
}

#[derive(Properties, PartialEq)]
struct AgentEditorProps {
    initial: AiAgentSettings,
}

#[function_component(AgentEditor)]
fn agent_editor(props: &AgentEditorProps) -> Html {
    let ctx = use_dashboard();
    let settings = use_state(|| props.initial.clone());
    let status = use_state(SaveStatus::default);

    let update = {
        let settings = settings.clone();
        move |apply: Box<dyn Fn(&mut AiAgentSettings)>| {
            let mut next = (*settings).clone();
            apply(&mut next);
            settings.set(next);
        }
    };

    let on_enabled = {
        let update = update.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let checked = input.checked();
            update(Box::new(move |s: &mut AiAgentSettings| s.enabled = checked));
        })
    };

    let on_greeting = {
        let update = update.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let value = input.value();
            update(Box::new(move |s: &mut AiAgentSettings| s.greeting_message = value.clone()));
        })
    };

    let on_after_hours = {
        let update = update.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let value = input.value();
            update(Box::new(move |s: &mut AiAgentSettings| s.after_hours_message = value.clone()));
        })
    };

    let on_tone = {
        let update = update.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let tone = AgentTone::from_str_lossy(&select.value());
            update(Box::new(move |s: &mut AiAgentSettings| s.tone = tone));
        })
    };

    let on_voice = {
        let update = update.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let voice = select.value();
            update(Box::new(move |s: &mut AiAgentSettings| s.voice = voice.clone()));
        })
    };

    let on_minutes = {
        let update = update.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            // Unparseable input fails range validation on save
            let minutes = input.value().trim().parse::<u32>().unwrap_or(0);
            update(Box::new(move |s: &mut AiAgentSettings| s.max_call_duration_minutes = minutes));
        })
    };

    let on_transfer = {
        let update = update.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            update(Box::new(move |s: &mut AiAgentSettings| {
                s.transfer_number = Some(value.clone()).filter(|v| !v.trim().is_empty())
            }));
        })
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
                status.set(SaveStatus::from_result(api.update_ai_agent_settings(&body).await));
            });
        })
    };

    let greeting_len = settings.greeting_message.chars().count();

    html! {
        <form class="settings-form agent-form" {onsubmit}>
            <label class="form-checkbox">
                <input type="checkbox" checked={settings.enabled} onchange={on_enabled} />
                {"Answer calls with the AI receptionist"}
            </label>
            <label class="form-field">
                <span class="form-label">{"Greeting"}</span>
                <textarea rows="3" value={settings.greeting_message.clone()} oninput={on_greeting}></textarea>
                <small class={classes!("form-hint", (greeting_len > MAX_GREETING_LENGTH).then_some("over-limit"))}>
                    {format!("{}/{}", greeting_len, MAX_GREETING_LENGTH)}
                </small>
            </label>
            <label class="form-field">
                <span class="form-label">{"Tone"}</span>
                <select onchange={on_tone}>
                    {for AgentTone::ALL.iter().map(|tone| html! {
                        <option value={tone.as_str()} selected={*tone == settings.tone}>{tone.as_str()}</option>
                    })}
                </select>
            </label>
            <label class="form-field">
                <span class="form-label">{"Voice"}</span>
                <select onchange={on_voice}>
                    {for AGENT_VOICES.iter().map(|voice| html! {
                        <option value={*voice} selected={*voice == settings.voice}>{*voice}</option>
                    })}
                </select>
            </label>
            <label class="form-field">
                <span class="form-label">{"After-hours message"}</span>
                <textarea rows="3" value={settings.after_hours_message.clone()} oninput={on_after_hours}></textarea>
            </label>
            <label class="form-field">
                <span class="form-label">{"Max call length (minutes)"}</span>
                <input type="number" min="1" max={MAX_CALL_MINUTES.to_string()}
                    value={settings.max_call_duration_minutes.to_string()} onchange={on_minutes} />
            </label>
            <label class="form-field">
                <span class="form-label">{"Transfer urgent calls to"}</span>
                <input type="tel" value={settings.transfer_number.clone().unwrap_or_default()} oninput={on_transfer} />
            </label>
            {render_save_status(&status)}
            <Button button_type="submit" loading={status.is_saving()}>{"Save settings"}</Button>
        </form>
    }
}
