use std::rc::Rc;

use shared::onboarding::{
    OnboardingStep, OnboardingWizard as WizardState, WizardField, BUSINESS_TYPES, CALENDAR_PROVIDERS, PLANS,
};
use shared::OnboardingStepResponse;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::ui::{Button, ButtonVariant, Card, ErrorBanner, Progress};
use crate::hooks::use_business_data::use_dashboard;
use crate::services::logging::Logger;

pub enum WizardAction {
    SetField(WizardField, String),
    SetSkipCalendar(bool),
    Saving,
    Saved(OnboardingStepResponse),
    Completed,
    Failed(String),
    Back,
    GoTo(OnboardingStep),
}

#[derive(Clone, PartialEq, Default)]
pub struct WizardModel {
    pub wizard: WizardState,
    pub saving: bool,
    pub checkout_url: Option<String>,
    pub completed: bool,
}

impl Reducible for WizardModel {
    type Action = WizardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            WizardAction::SetField(field, value) => next.wizard.set_field(field, value),
            WizardAction::SetSkipCalendar(skip) => next.wizard.calendar.skip = skip,
            WizardAction::Saving => {
                next.saving = true;
                next.wizard.error = None;
            }
            WizardAction::Saved(response) => {
                // The last step stays busy until /complete answers
                next.saving = next.wizard.is_last_step();
                if let Some(number) = response.phone_number {
                    next.wizard.provisioned_number = Some(number);
                }
                if let Some(url) = response.checkout_url {
                    next.checkout_url = Some(url);
                }
                next.wizard.advance_after_save();
            }
            WizardAction::Completed => {
                next.saving = false;
                next.completed = true;
            }
            WizardAction::Failed(message) => {
                next.saving = false;
                next.wizard.record_failure(message);
            }
            WizardAction::Back => next.wizard.back(),
            WizardAction::GoTo(step) => {
                next.wizard.go_to(step);
            }
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub struct OnboardingWizardProps {
    #[prop_or_default]
    pub on_complete: Callback<()>,
}

fn text_field(
    dispatch: &UseReducerDispatcher<WizardModel>,
    label: &'static str,
    field: WizardField,
    value: &str,
    input_type: &'static str,
) -> Html {
    let dispatch = dispatch.clone();
    let oninput = Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        dispatch.dispatch(WizardAction::SetField(field, input.value()));
    });
    html! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <input type={input_type} value={value.to_string()} {oninput} />
        </label>
    }
}

fn textarea_field(
    dispatch: &UseReducerDispatcher<WizardModel>,
    label: &'static str,
    hint: &'static str,
    field: WizardField,
    value: &str,
) -> Html {
    let dispatch = dispatch.clone();
    let oninput = Callback::from(move |e: InputEvent| {
        let input: HtmlTextAreaElement = e.target_unchecked_into();
        dispatch.dispatch(WizardAction::SetField(field, input.value()));
    });
    html! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <textarea rows="4" value={value.to_string()} placeholder={hint} {oninput}></textarea>
            <small class="form-hint">{hint}</small>
        </label>
    }
}

fn select_field(
    dispatch: &UseReducerDispatcher<WizardModel>,
    label: &'static str,
    field: WizardField,
    value: &str,
    options: &[&'static str],
) -> Html {
    let dispatch = dispatch.clone();
    let onchange = Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        dispatch.dispatch(WizardAction::SetField(field, select.value()));
    });
    html! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <select {onchange}>
                <option value="" selected={value.is_empty()} disabled={true}>{"Choose…"}</option>
                {for options.iter().map(|option| html! {
                    <option value={*option} selected={*option == value}>{*option}</option>
                })}
            </select>
        </label>
    }
}

fn step_form(model: &WizardModel, dispatch: &UseReducerDispatcher<WizardModel>) -> Html {
    let wizard = &model.wizard;
    match wizard.step {
        OnboardingStep::Business => html! {
            <>
                {text_field(dispatch, "Business name", WizardField::BusinessName, &wizard.business.business_name, "text")}
                {select_field(dispatch, "Business type", WizardField::BusinessType, &wizard.business.business_type, &BUSINESS_TYPES)}
                {text_field(dispatch, "Owner name", WizardField::OwnerName, &wizard.business.owner_name, "text")}
                {text_field(dispatch, "Business phone", WizardField::Phone, &wizard.business.phone, "tel")}
                {text_field(dispatch, "Email", WizardField::Email, &wizard.business.email, "email")}
                {text_field(dispatch, "Address", WizardField::Address, &wizard.business.address, "text")}
            </>
        },
        OnboardingStep::Services => html! {
            <>
                {textarea_field(dispatch, "Services you offer", "One per line or comma separated", WizardField::Services, &wizard.services.services_text)}
                {textarea_field(dispatch, "Service areas", "Cities or ZIP codes you cover", WizardField::ServiceAreas, &wizard.services.service_areas_text)}
            </>
        },
        OnboardingStep::Calendar => {
            let on_skip = {
                let dispatch = dispatch.clone();
                Callback::from(move |e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    dispatch.dispatch(WizardAction::SetSkipCalendar(input.checked()));
                })
            };
            html! {
                <>
                    if !wizard.calendar.skip {
                        {select_field(dispatch, "Calendar provider", WizardField::CalendarProvider, &wizard.calendar.provider, &CALENDAR_PROVIDERS)}
                    }
                    <label class="form-checkbox">
                        <input type="checkbox" checked={wizard.calendar.skip} onchange={on_skip} />
                        {"Skip for now, I'll connect a calendar later"}
                    </label>
                </>
            }
        }
        OnboardingStep::Phone => html! {
            <>
                {text_field(dispatch, "Preferred area code", WizardField::AreaCode, &wizard.phone.area_code, "text")}
                {text_field(dispatch, "Forward calls to (optional)", WizardField::ForwardTo, &wizard.phone.forward_to, "tel")}
                if let Some(number) = &wizard.provisioned_number {
                    <p class="form-success">{format!("Your CloudGreet number: {}", number)}</p>
                }
            </>
        },
        OnboardingStep::Billing => html! {
            {select_field(dispatch, "Plan", WizardField::Plan, &wizard.billing.plan, &PLANS)}
        },
    }
}

/// Five-step setup. Each step saves on its own; a failed save keeps the
/// wizard on that step with the server's message.
#[function_component(OnboardingWizard)]
pub fn onboarding_wizard(props: &OnboardingWizardProps) -> Html {
    let ctx = use_dashboard();
    let model = use_reducer(WizardModel::default);
    let dispatch = model.dispatcher();

    let on_next = {
        let api = ctx.api.clone();
        let model = model.clone();
        Callback::from(move |_: MouseEvent| {
            if model.saving {
                return;
            }
            let step = model.wizard.step;
            let payload = match model.wizard.current_payload() {
                Ok(payload) => payload,
                Err(message) => {
                    model.dispatch(WizardAction::Failed(message));
                    return;
                }
            };
            model.dispatch(WizardAction::Saving);

            let api = api.clone();
            let dispatch = model.dispatcher();
            spawn_local(async move {
                let saved = match api.save_onboarding_step(step, &payload).await {
                    Ok(response) => {
                        dispatch.dispatch(WizardAction::Saved(response));
                        true
                    }
                    Err(e) => {
                        Logger::warn_with_component("onboarding", &format!("{:?} step failed: {}", step, e));
                        dispatch.dispatch(WizardAction::Failed(e.to_string()));
                        false
                    }
                };
                if saved && step.next().is_none() {
                    match api.complete_onboarding().await {
                        Ok(_) => {
                            Logger::info_with_component("onboarding", "onboarding complete");
                            dispatch.dispatch(WizardAction::Completed);
                        }
                        Err(e) => dispatch.dispatch(WizardAction::Failed(e.to_string())),
                    }
                }
            });
        })
    };

    let go_to_dashboard = {
        let on_complete = props.on_complete.clone();
        Callback::from(move |_: MouseEvent| on_complete.emit(()))
    };

    let on_back = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.dispatch(WizardAction::Back))
    };

    if model.completed {
        return html! {
            <Card class={classes!("onboarding-complete")}>
                <h2>{"You're all set!"}</h2>
                if let Some(number) = &model.wizard.provisioned_number {
                    <p>{format!("Calls to {} are now answered by your AI receptionist.", number)}</p>
                }
                <div class="wizard-actions">
                    if let Some(url) = &model.checkout_url {
                        <a class="btn btn-primary" href={url.clone()}>{"Finish billing setup"}</a>
                    }
                    <Button variant={ButtonVariant::Secondary} onclick={go_to_dashboard}>
                        {"Go to dashboard"}
                    </Button>
                </div>
            </Card>
        };
    }

    let wizard = &model.wizard;
    html! {
        <Card title="Set up CloudGreet" class={classes!("onboarding-wizard")}>
            <Progress value={wizard.progress_percent()} label={format!("Step {} of {}", wizard.step.index() + 1, OnboardingStep::ALL.len())} />
            <ol class="wizard-steps">
                {for OnboardingStep::ALL.iter().map(|step| {
                    let step = *step;
                    let dispatch = dispatch.clone();
                    html! {
                        <li
                            class={classes!(
                                "wizard-step",
                                (step == wizard.step).then_some("current"),
                                wizard.completed.contains(&step).then_some("done"),
                            )}
                            onclick={Callback::from(move |_: MouseEvent| dispatch.dispatch(WizardAction::GoTo(step)))}
                        >
                            {step.title()}
                        </li>
                    }
                })}
            </ol>
            <h3 class="wizard-step-title">{wizard.step.title()}</h3>
            if let Some(error) = &wizard.error {
                <ErrorBanner message={error.clone()} />
            }
            <div class="wizard-form">
                {step_form(&model, &dispatch)}
            </div>
            <div class="wizard-actions">
                <Button variant={ButtonVariant::Secondary} disabled={wizard.step.prev().is_none() || model.saving} onclick={on_back}>
                    {"Back"}
                </Button>
                <Button loading={model.saving} onclick={on_next}>
                    {if wizard.is_last_step() { "Finish" } else { "Save & continue" }}
                </Button>
            </div>
        </Card>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_failed_save_keeps_step() {
        let model = Rc::new(WizardModel::default());
        let model = model.reduce(WizardAction::Saving);
        let model = model.reduce(WizardAction::Saved(OnboardingStepResponse {
            message: None,
            phone_number: None,
            checkout_url: None,
        }));
        assert_eq!(model.wizard.step, OnboardingStep::Services);

        let model = model.reduce(WizardAction::Failed("Server error 500: boom".to_string()));
        assert!(!model.saving);
        assert_eq!(model.wizard.step, OnboardingStep::Services);
        assert!(model.wizard.completed.contains(&OnboardingStep::Business));
    }

    fn saved(checkout_url: Option<&str>) -> WizardAction {
        WizardAction::Saved(OnboardingStepResponse {
            message: None,
            phone_number: None,
            checkout_url: checkout_url.map(str::to_string),
        })
    }

    #[wasm_bindgen_test]
    fn test_billing_save_stays_busy_until_completed() {
        let mut start = WizardModel::default();
        start.wizard.step = OnboardingStep::Billing;
        let model = Rc::new(start).reduce(WizardAction::Saving);
        let model = model.reduce(saved(Some("https://pay.example/session")));
        assert!(model.saving);
        assert!(!model.completed);

        let model = model.reduce(WizardAction::Completed);
        assert!(!model.saving);
        assert!(model.completed);
        assert_eq!(model.checkout_url.as_deref(), Some("https://pay.example/session"));
    }

    #[wasm_bindgen_test]
    fn test_failed_completion_releases_finish_button() {
        let mut start = WizardModel::default();
        start.wizard.step = OnboardingStep::Billing;
        let model = Rc::new(start).reduce(WizardAction::Saving).reduce(saved(None));
        assert!(model.saving);

        let model = model.reduce(WizardAction::Failed("Network error: offline".to_string()));
        assert!(!model.saving);
        assert!(!model.completed);
        assert_eq!(model.wizard.error.as_deref(), Some("Network error: offline"));
    }

    #[wasm_bindgen_test]
    fn test_phone_step_records_number() {
        let mut start = WizardModel::default();
        start.wizard.step = OnboardingStep::Phone;
        let model = Rc::new(start).reduce(WizardAction::Saved(OnboardingStepResponse {
            message: None,
            phone_number: Some("(512) 555-0100".to_string()),
            checkout_url: None,
        }));
        assert_eq!(model.wizard.provisioned_number.as_deref(), Some("(512) 555-0100"));
        assert_eq!(model.wizard.step, OnboardingStep::Billing);
    }
}
