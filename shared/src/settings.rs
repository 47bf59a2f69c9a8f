//! Local validation for the settings screens and onboarding forms.
//!
//! The server stays authoritative; these checks only catch obvious mistakes
//! before a round trip.

use chrono::NaiveTime;

use crate::{day_name, AccountSettings, AiAgentSettings, BusinessHours, ValidationError, AGENT_VOICES};

pub const MAX_GREETING_LENGTH: usize = 500;
pub const MAX_AFTER_HOURS_LENGTH: usize = 500;
pub const MAX_CALL_MINUTES: u32 = 60;

pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Strip formatting from a North American phone number.
/// Returns the 10 national digits, or `None` when it isn't one.
pub fn normalize_phone(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => Some(digits),
        11 if digits.starts_with('1') => Some(digits[1..].to_string()),
        _ => None,
    }
}

pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

fn required(value: &str, field: &'static str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Required(field));
    }
}

fn finish(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

impl AccountSettings {
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        required(&self.business_name, "Business name", &mut errors);
        required(&self.owner_name, "Owner name", &mut errors);
        if !is_valid_email(&self.email) {
            errors.push(ValidationError::InvalidEmail);
        }
        if normalize_phone(&self.phone).is_none() {
            errors.push(ValidationError::InvalidPhone);
        }
        if self.business_name.chars().count() > 120 {
            errors.push(ValidationError::TooLong {
                field: "Business name",
                max: 120,
            });
        }
        finish(errors)
    }
}

impl BusinessHours {
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        for day in self.days.iter().filter(|d| d.open) {
            let name = day_name(day.day_of_week).to_string();
            let open = parse_hhmm(&day.open_time);
            let close = parse_hhmm(&day.close_time);
            match (open, close) {
                (Some(open), Some(close)) if close <= open => {
                    errors.push(ValidationError::CloseBeforeOpen(name));
                }
                (Some(_), Some(_)) => {}
                (None, _) => errors.push(ValidationError::InvalidTime(format!("{} opening time", name))),
                (_, None) => errors.push(ValidationError::InvalidTime(format!("{} closing time", name))),
            }
        }
        finish(errors)
    }
}

impl AiAgentSettings {
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        required(&self.greeting_message, "Greeting message", &mut errors);
        if self.greeting_message.chars().count() > MAX_GREETING_LENGTH {
            errors.push(ValidationError::TooLong {
                field: "Greeting message",
                max: MAX_GREETING_LENGTH,
            });
        }
        if self.after_hours_message.chars().count() > MAX_AFTER_HOURS_LENGTH {
            errors.push(ValidationError::TooLong {
                field: "After-hours message",
                max: MAX_AFTER_HOURS_LENGTH,
            });
        }
        if !AGENT_VOICES.contains(&self.voice.as_str()) {
            errors.push(ValidationError::UnknownOption(self.voice.clone()));
        }
        if !(1..=MAX_CALL_MINUTES).contains(&self.max_call_duration_minutes) {
            errors.push(ValidationError::OutOfRange {
                field: "Max call duration",
                min: 1,
                max: MAX_CALL_MINUTES,
            });
        }
        if let Some(number) = self.transfer_number.as_deref().filter(|n| !n.trim().is_empty()) {
            if normalize_phone(number).is_none() {
                errors.push(ValidationError::InvalidPhone);
            }
        }
        finish(errors)
    }
}

/// Join validation errors for an inline banner.
pub fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(". ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DayHours;

    fn account() -> AccountSettings {
        AccountSettings {
            business_name: "Cool Air HVAC".to_string(),
            owner_name: "Sam Patel".to_string(),
            email: "sam@coolair.example".to_string(),
            phone: "(555) 010-2000".to_string(),
            address: String::new(),
            website: String::new(),
            timezone: "America/Chicago".to_string(),
        }
    }

    #[test]
    fn test_email_and_phone_helpers() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a b@c.co"));
        assert_eq!(normalize_phone("+1 (555) 010-2000"), Some("5550102000".to_string()));
        assert_eq!(normalize_phone("555-0102"), None);
    }

    #[test]
    fn test_account_validation() {
        assert!(account().validate().is_ok());

        let mut bad = account();
        bad.business_name = "  ".to_string();
        bad.email = "nope".to_string();
        let errors = bad.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::Required("Business name"), ValidationError::InvalidEmail]
        );
    }

    #[test]
    fn test_business_hours_validation() {
        let mut hours = BusinessHours::default();
        assert!(hours.validate().is_ok());

        hours.days[1] = DayHours {
            day_of_week: 1,
            open: true,
            open_time: "18:00".to_string(),
            close_time: "09:00".to_string(),
        };
        hours.days[2].close_time = "5pm".to_string();
        // Closed days are not checked
        hours.days[0].open_time = "garbage".to_string();

        let errors = hours.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].to_string(), "Monday: closing time must be after opening time");
        assert_eq!(errors[1].to_string(), "Tuesday closing time must be a time in HH:MM format");
    }

    #[test]
    fn test_agent_settings_validation() {
        assert!(AiAgentSettings::default().validate().is_ok());

        let settings = AiAgentSettings {
            greeting_message: "x".repeat(501),
            voice: "robot".to_string(),
            max_call_duration_minutes: 0,
            transfer_number: Some("12".to_string()),
            ..AiAgentSettings::default()
        };
        let errors = settings.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(describe(&errors).contains("Max call duration must be between 1 and 60"));
    }

    #[test]
    fn test_blank_transfer_number_is_allowed() {
        let settings = AiAgentSettings {
            transfer_number: Some("   ".to_string()),
            ..AiAgentSettings::default()
        };
        assert!(settings.validate().is_ok());
    }
}
