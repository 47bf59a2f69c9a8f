//! State of the five-step onboarding wizard.
//!
//! Each step is saved on its own request. A failed save keeps the wizard on
//! that step with the error message; steps already saved stay saved.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::settings::{describe, is_valid_email, normalize_phone};
use crate::{
    BillingStepRequest, BusinessStepRequest, CalendarStepRequest, PhoneStepRequest,
    ServicesStepRequest, ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Business,
    Services,
    Calendar,
    Phone,
    Billing,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 5] = [
        OnboardingStep::Business,
        OnboardingStep::Services,
        OnboardingStep::Calendar,
        OnboardingStep::Phone,
        OnboardingStep::Billing,
    ];

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            OnboardingStep::Business => "/api/onboarding/business",
            OnboardingStep::Services => "/api/onboarding/services",
            OnboardingStep::Calendar => "/api/onboarding/calendar",
            OnboardingStep::Phone => "/api/onboarding/phone",
            OnboardingStep::Billing => "/api/onboarding/billing",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            OnboardingStep::Business => "Business details",
            OnboardingStep::Services => "Services",
            OnboardingStep::Calendar => "Connect calendar",
            OnboardingStep::Phone => "Phone number",
            OnboardingStep::Billing => "Billing",
        }
    }
}

pub const COMPLETE_ENDPOINT: &str = "/api/onboarding/complete";

pub const BUSINESS_TYPES: [&str; 6] = ["HVAC", "Painting", "Roofing", "Plumbing", "Electrical", "Other"];
pub const CALENDAR_PROVIDERS: [&str; 2] = ["google", "outlook"];
pub const PLANS: [&str; 2] = ["starter", "pro"];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BusinessForm {
    pub business_name: String,
    pub business_type: String,
    pub owner_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl BusinessForm {
    pub fn to_request(&self) -> Result<BusinessStepRequest, Vec<ValidationError>> {
        let mut errors = Vec::new();
        if self.business_name.trim().is_empty() {
            errors.push(ValidationError::Required("Business name"));
        }
        if !BUSINESS_TYPES.contains(&self.business_type.as_str()) {
            errors.push(ValidationError::Required("Business type"));
        }
        if self.owner_name.trim().is_empty() {
            errors.push(ValidationError::Required("Owner name"));
        }
        let phone = normalize_phone(&self.phone);
        if phone.is_none() {
            errors.push(ValidationError::InvalidPhone);
        }
        if !is_valid_email(&self.email) {
            errors.push(ValidationError::InvalidEmail);
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(BusinessStepRequest {
            business_name: self.business_name.trim().to_string(),
            business_type: self.business_type.clone(),
            owner_name: self.owner_name.trim().to_string(),
            phone: phone.unwrap_or_default(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
        })
    }
}

/// Free-text services step: one entry per line or comma.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServicesForm {
    pub services_text: String,
    pub service_areas_text: String,
}

impl ServicesForm {
    /// Never fails; blank fields submit empty arrays.
    pub fn to_request(&self) -> ServicesStepRequest {
        ServicesStepRequest {
            services: split_list(&self.services_text),
            service_areas: split_list(&self.service_areas_text),
        }
    }
}

/// Split comma/newline separated text, trimming and dropping blanks and duplicates.
pub fn split_list(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    text.split(|c: char| c == ',' || c == '\n' || c == ';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.to_lowercase()))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalendarForm {
    pub provider: String,
    pub skip: bool,
}

impl CalendarForm {
    pub fn to_request(&self) -> Result<CalendarStepRequest, Vec<ValidationError>> {
        if !self.skip && !CALENDAR_PROVIDERS.contains(&self.provider.as_str()) {
            return Err(vec![ValidationError::Required("Calendar provider")]);
        }
        Ok(CalendarStepRequest {
            provider: if self.skip { String::new() } else { self.provider.clone() },
            skip: self.skip,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhoneForm {
    pub area_code: String,
    pub forward_to: String,
}

impl PhoneForm {
    pub fn to_request(&self) -> Result<PhoneStepRequest, Vec<ValidationError>> {
        let area_code = self.area_code.trim();
        if area_code.len() != 3 || !area_code.chars().all(|c| c.is_ascii_digit()) {
            return Err(vec![ValidationError::Required("Three-digit area code")]);
        }
        let forward_to = if self.forward_to.trim().is_empty() {
            None
        } else {
            Some(normalize_phone(&self.forward_to).ok_or_else(|| vec![ValidationError::InvalidPhone])?)
        };
        Ok(PhoneStepRequest {
            area_code: area_code.to_string(),
            forward_to,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BillingForm {
    pub plan: String,
}

impl Default for BillingForm {
    fn default() -> Self {
        Self {
            plan: PLANS[0].to_string(),
        }
    }
}

impl BillingForm {
    pub fn to_request(&self) -> Result<BillingStepRequest, Vec<ValidationError>> {
        if !PLANS.contains(&self.plan.as_str()) {
            return Err(vec![ValidationError::UnknownOption(self.plan.clone())]);
        }
        Ok(BillingStepRequest {
            plan: self.plan.clone(),
        })
    }
}

/// Wizard progress. Form data lives alongside so going back keeps input.
#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingWizard {
    pub step: OnboardingStep,
    pub completed: BTreeSet<OnboardingStep>,
    pub business: BusinessForm,
    pub services: ServicesForm,
    pub calendar: CalendarForm,
    pub phone: PhoneForm,
    pub billing: BillingForm,
    pub provisioned_number: Option<String>,
    pub error: Option<String>,
    pub finished: bool,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self {
            step: OnboardingStep::Business,
            completed: BTreeSet::new(),
            business: BusinessForm::default(),
            services: ServicesForm::default(),
            calendar: CalendarForm::default(),
            phone: PhoneForm::default(),
            billing: BillingForm::default(),
            provisioned_number: None,
            error: None,
            finished: false,
        }
    }
}

impl OnboardingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialized body for the current step, or the validation message.
    pub fn current_payload(&self) -> Result<serde_json::Value, String> {
        let value = match self.step {
            OnboardingStep::Business => self.business.to_request().map(|r| serde_json::to_value(r)),
            OnboardingStep::Services => Ok(serde_json::to_value(self.services.to_request())),
            OnboardingStep::Calendar => self.calendar.to_request().map(|r| serde_json::to_value(r)),
            OnboardingStep::Phone => self.phone.to_request().map(|r| serde_json::to_value(r)),
            OnboardingStep::Billing => self.billing.to_request().map(|r| serde_json::to_value(r)),
        };
        value
            .map_err(|errors| describe(&errors))?
            .map_err(|e| e.to_string())
    }

    /// The current step was saved; mark it and move on.
    pub fn advance_after_save(&mut self) {
        self.completed.insert(self.step);
        self.error = None;
        match self.step.next() {
            Some(next) => self.step = next,
            None => self.finished = true,
        }
    }

    /// A save failed: stay on the step, keep earlier steps as they are.
    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn back(&mut self) {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
            self.error = None;
        }
    }

    /// Jump to a step that was already saved, or the first unsaved one.
    pub fn go_to(&mut self, step: OnboardingStep) -> bool {
        let reachable = self.completed.contains(&step) || Some(step) == self.first_incomplete();
        if reachable {
            self.step = step;
            self.error = None;
        }
        reachable
    }

    pub fn first_incomplete(&self) -> Option<OnboardingStep> {
        OnboardingStep::ALL
            .into_iter()
            .find(|s| !self.completed.contains(s))
    }

    /// 0..=100 for the progress bar.
    pub fn progress_percent(&self) -> f64 {
        crate::progress_percent(self.completed.len() as f64, OnboardingStep::ALL.len() as f64)
    }

    pub fn is_last_step(&self) -> bool {
        self.step.next().is_none()
    }
}

/// One editable input of the wizard, for reducer-style updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardField {
    BusinessName,
    BusinessType,
    OwnerName,
    Phone,
    Email,
    Address,
    Services,
    ServiceAreas,
    CalendarProvider,
    AreaCode,
    ForwardTo,
    Plan,
}

impl OnboardingWizard {
    pub fn set_field(&mut self, field: WizardField, value: String) {
        let slot = match field {
            WizardField::BusinessName => &mut self.business.business_name,
            WizardField::BusinessType => &mut self.business.business_type,
            WizardField::OwnerName => &mut self.business.owner_name,
            WizardField::Phone => &mut self.business.phone,
            WizardField::Email => &mut self.business.email,
            WizardField::Address => &mut self.business.address,
            WizardField::Services => &mut self.services.services_text,
            WizardField::ServiceAreas => &mut self.services.service_areas_text,
            WizardField::CalendarProvider => &mut self.calendar.provider,
            WizardField::AreaCode => &mut self.phone.area_code,
            WizardField::ForwardTo => &mut self.phone.forward_to,
            WizardField::Plan => &mut self.billing.plan,
        };
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(OnboardingStep::Business.next(), Some(OnboardingStep::Services));
        assert_eq!(OnboardingStep::Billing.next(), None);
        assert_eq!(OnboardingStep::Business.prev(), None);
        assert_eq!(OnboardingStep::Phone.prev(), Some(OnboardingStep::Calendar));
        assert_eq!(OnboardingStep::Calendar.index(), 2);
    }

    #[test]
    fn test_empty_services_submit_empty_arrays() {
        let request = ServicesForm::default().to_request();
        assert!(request.services.is_empty());
        assert!(request.service_areas.is_empty());

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"services": [], "service_areas": []}));

        let blank = ServicesForm {
            services_text: " ,\n , ".to_string(),
            service_areas_text: "\n".to_string(),
        };
        assert!(blank.to_request().services.is_empty());
    }

    #[test]
    fn test_split_list_trims_and_dedupes() {
        assert_eq!(
            split_list("AC repair, Furnace install\nac repair;  Duct cleaning "),
            vec!["AC repair", "Furnace install", "Duct cleaning"]
        );
    }

    #[test]
    fn test_business_form_validation() {
        let mut form = BusinessForm::default();
        let errors = form.to_request().unwrap_err();
        assert_eq!(errors.len(), 5);

        form = BusinessForm {
            business_name: " Peak Roofing ".to_string(),
            business_type: "Roofing".to_string(),
            owner_name: "Lee".to_string(),
            phone: "555.010.3000".to_string(),
            email: "lee@peak.example".to_string(),
            address: String::new(),
        };
        let request = form.to_request().unwrap();
        assert_eq!(request.business_name, "Peak Roofing");
        assert_eq!(request.phone, "5550103000");
    }

    #[test]
    fn test_calendar_and_phone_forms() {
        assert!(CalendarForm::default().to_request().is_err());
        let skipped = CalendarForm { provider: String::new(), skip: true }.to_request().unwrap();
        assert!(skipped.skip);

        assert!(PhoneForm { area_code: "51".to_string(), forward_to: String::new() }.to_request().is_err());
        let phone = PhoneForm { area_code: "512".to_string(), forward_to: String::new() }
            .to_request()
            .unwrap();
        assert_eq!(phone.forward_to, None);
        assert!(PhoneForm { area_code: "512".to_string(), forward_to: "123".to_string() }
            .to_request()
            .is_err());
    }

    #[test]
    fn test_failure_keeps_step_and_earlier_progress() {
        let mut wizard = OnboardingWizard::new();
        wizard.advance_after_save();
        assert_eq!(wizard.step, OnboardingStep::Services);

        wizard.record_failure("Server error 500: boom");
        assert_eq!(wizard.step, OnboardingStep::Services);
        assert!(wizard.completed.contains(&OnboardingStep::Business));
        assert_eq!(wizard.error.as_deref(), Some("Server error 500: boom"));

        wizard.advance_after_save();
        assert_eq!(wizard.error, None);
        assert_eq!(wizard.progress_percent(), 40.0);
    }

    #[test]
    fn test_wizard_finishes_after_billing() {
        let mut wizard = OnboardingWizard::new();
        for _ in 0..5 {
            wizard.advance_after_save();
        }
        assert!(wizard.finished);
        assert_eq!(wizard.step, OnboardingStep::Billing);
        assert_eq!(wizard.first_incomplete(), None);
        assert_eq!(wizard.progress_percent(), 100.0);
    }

    #[test]
    fn test_go_to_only_reachable_steps() {
        let mut wizard = OnboardingWizard::new();
        assert!(!wizard.go_to(OnboardingStep::Phone));
        wizard.advance_after_save();
        assert!(wizard.go_to(OnboardingStep::Business));
        assert!(wizard.go_to(OnboardingStep::Services));
        wizard.back();
        assert_eq!(wizard.step, OnboardingStep::Business);
    }

    #[test]
    fn test_current_payload_for_services_step() {
        let mut wizard = OnboardingWizard::new();
        assert!(wizard.current_payload().is_err());
        wizard.step = OnboardingStep::Services;
        let payload = wizard.current_payload().unwrap();
        assert_eq!(payload["services"], serde_json::json!([]));
    }

    #[test]
    fn test_set_field_updates_matching_form() {
        let mut wizard = OnboardingWizard::new();
        wizard.set_field(WizardField::BusinessType, "HVAC".to_string());
        wizard.set_field(WizardField::AreaCode, "512".to_string());
        wizard.set_field(WizardField::Plan, "pro".to_string());
        assert_eq!(wizard.business.business_type, "HVAC");
        assert_eq!(wizard.phone.area_code, "512");
        assert_eq!(wizard.billing.plan, "pro");
    }
}
