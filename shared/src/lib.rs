use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod cache;
pub mod calendar;
pub mod call_feed;
pub mod config;
pub mod error;
pub mod fetch_state;
pub mod onboarding;
pub mod reconnect;
pub mod settings;

pub use error::{ApiError, ValidationError};

/// A scheduled customer visit as returned by the calendar endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Server-assigned, opaque
    pub id: String,
    pub customer_name: String,
    pub service_type: String,
    /// ISO-8601 with offset; the offset-local wall clock decides grid placement
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub estimated_value: Option<f64>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Appointment {
    /// Wall-clock start as the business sees it.
    pub fn local_start(&self) -> NaiveDateTime {
        self.start_time.naive_local()
    }

    pub fn local_end(&self) -> NaiveDateTime {
        self.end_time.naive_local()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.local_start().date()
    }

    /// Length in minutes; a malformed span (end before start) reads as zero.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes().max(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::NoShow => "No show",
        }
    }

    /// Status only ever selects a badge color.
    pub fn badge_variant(&self) -> BadgeVariant {
        match self {
            AppointmentStatus::Scheduled => BadgeVariant::Info,
            AppointmentStatus::Confirmed => BadgeVariant::Success,
            AppointmentStatus::Completed => BadgeVariant::Neutral,
            AppointmentStatus::Cancelled => BadgeVariant::Danger,
            AppointmentStatus::NoShow => BadgeVariant::Warning,
        }
    }
}

/// Color family for badges and pills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

impl BadgeVariant {
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeVariant::Neutral => "badge badge-neutral",
            BadgeVariant::Info => "badge badge-info",
            BadgeVariant::Success => "badge badge-success",
            BadgeVariant::Warning => "badge badge-warning",
            BadgeVariant::Danger => "badge badge-danger",
        }
    }
}

/// Response shape shared by every dashboard endpoint: `{ success, data | error }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            let message = self
                .error
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Request was not successful".to_string());
            return Err(ApiError::Business(message));
        }
        self.data.ok_or(ApiError::MissingData)
    }
}

impl<T: DeserializeOwned> ApiEnvelope<T> {
    /// Map a finished HTTP exchange onto the envelope contract.
    ///
    /// Non-2xx answers become [`ApiError::Http`], preferring the envelope's
    /// `error` text over the raw body.
    pub fn from_http(status: u16, ok: bool, body: &str) -> Result<T, ApiError> {
        if !ok {
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
                .ok()
                .and_then(|env| env.error)
                .unwrap_or_else(|| body.to_string());
            return Err(ApiError::http(status, &message));
        }

        serde_json::from_str::<ApiEnvelope<T>>(body)
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .into_result()
    }
}

/// Payload of the calendar endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub appointments: Vec<Appointment>,
}

/// Business theme/data provider payload shared by every calendar view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessTheme {
    pub business_name: String,
    pub primary_color: String,
    /// service_type (lowercased) -> CSS color
    #[serde(default)]
    pub service_colors: BTreeMap<String, String>,
    #[serde(default)]
    pub time_format: TimeFormat,
}

impl Default for BusinessTheme {
    fn default() -> Self {
        Self {
            business_name: "Your Business".to_string(),
            primary_color: "#2563eb".to_string(),
            service_colors: BTreeMap::new(),
            time_format: TimeFormat::default(),
        }
    }
}

impl BusinessTheme {
    /// Color for a service chip; unknown services fall back to the primary color.
    pub fn service_color(&self, service_type: &str) -> &str {
        self.service_colors
            .get(&service_type.trim().to_lowercase())
            .map(String::as_str)
            .unwrap_or(&self.primary_color)
    }

    pub fn format_time(&self, time: NaiveDateTime) -> String {
        match self.time_format {
            TimeFormat::TwelveHour => time.format("%-I:%M %p").to_string(),
            TimeFormat::TwentyFourHour => time.format("%H:%M").to_string(),
        }
    }

    pub fn format_hour(&self, hour: u32) -> String {
        match self.time_format {
            TimeFormat::TwelveHour => {
                let suffix = if hour < 12 { "AM" } else { "PM" };
                let display = match hour % 12 {
                    0 => 12,
                    h => h,
                };
                format!("{} {}", display, suffix)
            }
            TimeFormat::TwentyFourHour => format!("{:02}:00", hour),
        }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format("%a, %b %-d").to_string()
    }

    pub fn format_span(&self, appointment: &Appointment) -> String {
        format!(
            "{} – {}",
            self.format_time(appointment.local_start()),
            self.format_time(appointment.local_end())
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

/// Format a currency amount the way every widget shows it.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let mut grouped = String::new();
    let digits = dollars.to_string();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        cents % 100
    )
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "7d")]
    #[default]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::Today,
        Timeframe::Week,
        Timeframe::Month,
        Timeframe::Quarter,
        Timeframe::Year,
    ];

    /// Query parameter value
    pub fn as_param(&self) -> &'static str {
        match self {
            Timeframe::Today => "today",
            Timeframe::Week => "7d",
            Timeframe::Month => "30d",
            Timeframe::Quarter => "90d",
            Timeframe::Year => "1y",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Today => "Today",
            Timeframe::Week => "Last 7 days",
            Timeframe::Month => "Last 30 days",
            Timeframe::Quarter => "Last 90 days",
            Timeframe::Year => "Last year",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_param() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CallMetrics {
    pub total_calls: u32,
    pub answered_calls: u32,
    pub missed_calls: u32,
    pub avg_duration_secs: f64,
    #[serde(default)]
    pub previous_total_calls: Option<u32>,
}

impl CallMetrics {
    /// Share of calls answered, 0..=100. No calls reads as 0.
    pub fn answer_rate(&self) -> f64 {
        percentage(self.answered_calls as f64, self.total_calls as f64)
    }

    pub fn change_vs_previous(&self) -> Option<f64> {
        self.previous_total_calls
            .and_then(|prev| percent_change(prev as f64, self.total_calls as f64))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppointmentMetrics {
    pub booked: u32,
    pub completed: u32,
    pub cancelled: u32,
    pub no_shows: u32,
}

impl AppointmentMetrics {
    /// Booked appointments per answered call, 0..=100.
    pub fn booking_rate(&self, calls: &CallMetrics) -> f64 {
        percentage(self.booked as f64, calls.answered_calls as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RevenueMetrics {
    pub total: f64,
    pub projected: f64,
    #[serde(default)]
    pub previous_total: Option<f64>,
}

impl RevenueMetrics {
    pub fn change_vs_previous(&self) -> Option<f64> {
        self.previous_total
            .and_then(|prev| percent_change(prev, self.total))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub calls: u32,
    pub appointments: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardAnalytics {
    pub timeframe: Timeframe,
    pub calls: CallMetrics,
    pub appointments: AppointmentMetrics,
    pub revenue: RevenueMetrics,
    #[serde(default)]
    pub daily: Vec<DailyPoint>,
}

impl DashboardAnalytics {
    pub fn is_empty(&self) -> bool {
        self.calls.total_calls == 0 && self.appointments.booked == 0 && self.daily.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourBucket {
    pub hour: u32,
    pub calls: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBreakdown {
    pub service_type: String,
    pub appointments: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub label: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedAnalytics {
    pub timeframe: Timeframe,
    #[serde(default)]
    pub hourly_calls: Vec<HourBucket>,
    #[serde(default)]
    pub services: Vec<ServiceBreakdown>,
    #[serde(default)]
    pub funnel: Vec<FunnelStage>,
}

impl AdvancedAnalytics {
    pub fn is_empty(&self) -> bool {
        self.hourly_calls.is_empty() && self.services.is_empty() && self.funnel.is_empty()
    }

    /// Busiest hour; ties go to the earliest hour.
    pub fn peak_hour(&self) -> Option<&HourBucket> {
        self.hourly_calls
            .iter()
            .filter(|b| b.calls > 0)
            .fold(None, |best: Option<&HourBucket>, b| match best {
                Some(cur) if cur.calls >= b.calls => Some(cur),
                _ => Some(b),
            })
    }

    /// Conversion of each funnel stage relative to the first stage.
    pub fn funnel_rates(&self) -> Vec<(String, f64)> {
        let top = self.funnel.first().map(|s| s.count as f64).unwrap_or(0.0);
        self.funnel
            .iter()
            .map(|s| (s.label.clone(), percentage(s.count as f64, top)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetric {
    pub name: String,
    pub value: f64,
    pub industry_average: f64,
    pub percentile: u8,
    /// Lower is better (e.g. missed-call rate)
    #[serde(default)]
    pub lower_is_better: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkRating {
    Above,
    AtPar,
    Below,
}

impl BenchmarkMetric {
    /// Within 5% of the industry average counts as par.
    pub fn rating(&self) -> BenchmarkRating {
        if self.industry_average == 0.0 {
            return BenchmarkRating::AtPar;
        }
        let delta = (self.value - self.industry_average) / self.industry_average.abs();
        let delta = if self.lower_is_better { -delta } else { delta };
        if delta > 0.05 {
            BenchmarkRating::Above
        } else if delta < -0.05 {
            BenchmarkRating::Below
        } else {
            BenchmarkRating::AtPar
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub timeframe: Timeframe,
    pub industry: String,
    pub metrics: Vec<BenchmarkMetric>,
}

/// `part / whole` as a percentage; a zero whole reads as 0.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        0.0
    } else {
        (part / whole) * 100.0
    }
}

/// Filled share of a progress bar, clamped to 0..=100.
pub fn progress_percent(value: f64, max: f64) -> f64 {
    if !value.is_finite() || !max.is_finite() || max <= 0.0 {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

/// Relative change from `previous` to `current`; undefined when previous is zero.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous.abs() * 100.0)
    }
}

// ---------------------------------------------------------------------------
// Calls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Ringing,
    InProgress,
    Completed,
    Missed,
    Voicemail,
}

impl CallStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, CallStatus::Ringing | CallStatus::InProgress)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CallStatus::Ringing => "Ringing",
            CallStatus::InProgress => "In progress",
            CallStatus::Completed => "Completed",
            CallStatus::Missed => "Missed",
            CallStatus::Voicemail => "Voicemail",
        }
    }

    pub fn badge_variant(&self) -> BadgeVariant {
        match self {
            CallStatus::Ringing => BadgeVariant::Warning,
            CallStatus::InProgress => BadgeVariant::Info,
            CallStatus::Completed => BadgeVariant::Success,
            CallStatus::Missed => BadgeVariant::Danger,
            CallStatus::Voicemail => BadgeVariant::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: String,
    pub caller_number: String,
    #[serde(default)]
    pub caller_name: Option<String>,
    pub status: CallStatus,
    pub started_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub duration_secs: u32,
    #[serde(default)]
    pub summary: Option<String>,
}

impl CallRecord {
    pub fn display_name(&self) -> &str {
        self.caller_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.caller_number)
    }
}

/// One message from the call stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallEvent {
    CallUpdated { call: CallRecord },
    Heartbeat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentCallsResponse {
    pub calls: Vec<CallRecord>,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccountSettings {
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub website: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    /// 0 = Sunday … 6 = Saturday
    pub day_of_week: u8,
    pub open: bool,
    /// "HH:MM"
    pub open_time: String,
    pub close_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub days: Vec<DayHours>,
    #[serde(default)]
    pub after_hours_forwarding: bool,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            days: (0..7u8)
                .map(|d| DayHours {
                    day_of_week: d,
                    open: (1..=5).contains(&d),
                    open_time: "09:00".to_string(),
                    close_time: "17:00".to_string(),
                })
                .collect(),
            after_hours_forwarding: false,
        }
    }
}

pub fn day_name(day_of_week: u8) -> &'static str {
    match day_of_week {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Invalid",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentTone {
    #[default]
    Professional,
    Friendly,
    Casual,
}

impl AgentTone {
    pub const ALL: [AgentTone; 3] = [AgentTone::Professional, AgentTone::Friendly, AgentTone::Casual];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentTone::Professional => "professional",
            AgentTone::Friendly => "friendly",
            AgentTone::Casual => "casual",
        }
    }

    pub fn from_str_lossy(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == value)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAgentSettings {
    pub enabled: bool,
    pub greeting_message: String,
    pub tone: AgentTone,
    pub voice: String,
    #[serde(default)]
    pub after_hours_message: String,
    pub max_call_duration_minutes: u32,
    #[serde(default)]
    pub transfer_number: Option<String>,
}

impl Default for AiAgentSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            greeting_message: "Thanks for calling! How can I help you today?".to_string(),
            tone: AgentTone::Professional,
            voice: "alloy".to_string(),
            after_hours_message: String::new(),
            max_call_duration_minutes: 10,
            transfer_number: None,
        }
    }
}

pub const AGENT_VOICES: [&str; 4] = ["alloy", "echo", "nova", "shimmer"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Onboarding step payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessStepRequest {
    pub business_name: String,
    pub business_type: String,
    pub owner_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicesStepRequest {
    pub services: Vec<String>,
    pub service_areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarStepRequest {
    pub provider: String,
    pub skip: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneStepRequest {
    pub area_code: String,
    #[serde(default)]
    pub forward_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingStepRequest {
    pub plan: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingStepResponse {
    #[serde(default)]
    pub message: Option<String>,
    /// Provisioned number, returned by the phone step
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Checkout redirect, returned by the billing step
    #[serde(default)]
    pub checkout_url: Option<String>,
}

/// Client log record sent to the remote sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRequest {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "apt_1",
            "customer_name": "Dana Ruiz",
            "service_type": "HVAC Repair",
            "start_time": "2026-10-17T09:30:00-04:00",
            "end_time": "2026-10-17T11:00:00-04:00",
            "status": "no_show",
            "estimated_value": 250.0
        }"#
    }

    #[test]
    fn test_appointment_deserializes_with_wall_clock() {
        let apt: Appointment = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(apt.status, AppointmentStatus::NoShow);
        assert_eq!(apt.start_date(), NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        assert_eq!(apt.local_start().format("%H:%M").to_string(), "09:30");
        assert_eq!(apt.duration_minutes(), 90);
        assert_eq!(apt.customer_phone, None);
    }

    #[test]
    fn test_status_badges() {
        assert_eq!(AppointmentStatus::Confirmed.badge_variant(), BadgeVariant::Success);
        assert_eq!(AppointmentStatus::Cancelled.badge_variant(), BadgeVariant::Danger);
        assert_eq!(AppointmentStatus::NoShow.label(), "No show");
    }

    #[test]
    fn test_envelope_success_and_failure() {
        let ok: ApiEnvelope<u32> = serde_json::from_str(r#"{"success":true,"data":7}"#).unwrap();
        assert_eq!(ok.into_result().unwrap(), 7);

        let failed: ApiEnvelope<u32> =
            serde_json::from_str(r#"{"success":false,"error":"Business not found"}"#).unwrap();
        assert_eq!(
            failed.into_result(),
            Err(ApiError::Business("Business not found".to_string()))
        );

        let blank: ApiEnvelope<u32> = serde_json::from_str(r#"{"success":false,"error":"  "}"#).unwrap();
        assert!(matches!(blank.into_result(), Err(ApiError::Business(m)) if m == "Request was not successful"));

        let missing: ApiEnvelope<u32> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(missing.into_result(), Err(ApiError::MissingData));
    }

    #[test]
    fn test_http_error_uses_envelope_message() {
        let result = ApiEnvelope::<u32>::from_http(404, false, r#"{"success":false,"error":"Business not found"}"#);
        assert_eq!(
            result,
            Err(ApiError::Http { status: 404, message: "Business not found".to_string() })
        );
    }

    #[test]
    fn test_http_error_falls_back_to_plain_body() {
        let result = ApiEnvelope::<u32>::from_http(502, false, "Bad Gateway\n");
        assert_eq!(result, Err(ApiError::Http { status: 502, message: "Bad Gateway".to_string() }));

        let blank = ApiEnvelope::<u32>::from_http(500, false, "");
        assert_eq!(blank, Err(ApiError::Http { status: 500, message: "Unknown error".to_string() }));
    }

    #[test]
    fn test_http_ok_with_business_failure() {
        let result = ApiEnvelope::<u32>::from_http(200, true, r#"{"success":false,"error":"Invalid timeframe"}"#);
        assert_eq!(result, Err(ApiError::Business("Invalid timeframe".to_string())));
    }

    #[test]
    fn test_http_ok_with_unparseable_body() {
        let result = ApiEnvelope::<u32>::from_http(200, true, "<html>maintenance</html>");
        assert!(matches!(result, Err(ApiError::Parse(_))));

        let fine = ApiEnvelope::<u32>::from_http(200, true, r#"{"success":true,"data":3}"#);
        assert_eq!(fine, Ok(3));
    }

    #[test]
    fn test_theme_service_color_fallback() {
        let mut theme = BusinessTheme::default();
        theme
            .service_colors
            .insert("painting".to_string(), "#f59e0b".to_string());
        assert_eq!(theme.service_color("Painting "), "#f59e0b");
        assert_eq!(theme.service_color("Roofing"), "#2563eb");
    }

    #[test]
    fn test_theme_hour_formats() {
        let mut theme = BusinessTheme::default();
        assert_eq!(theme.format_hour(0), "12 AM");
        assert_eq!(theme.format_hour(13), "1 PM");
        theme.time_format = TimeFormat::TwentyFourHour;
        assert_eq!(theme.format_hour(7), "07:00");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-42.5), "-$42.50");
    }

    #[test]
    fn test_progress_percent_clamps() {
        assert_eq!(progress_percent(3.0, 4.0), 75.0);
        assert_eq!(progress_percent(9.0, 4.0), 100.0);
        assert_eq!(progress_percent(-1.0, 4.0), 0.0);
        assert_eq!(progress_percent(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_call_metrics_rates() {
        let calls = CallMetrics {
            total_calls: 40,
            answered_calls: 30,
            missed_calls: 10,
            avg_duration_secs: 95.0,
            previous_total_calls: Some(32),
        };
        assert_eq!(calls.answer_rate(), 75.0);
        assert_eq!(calls.change_vs_previous(), Some(25.0));
        assert_eq!(CallMetrics::default().answer_rate(), 0.0);
        assert_eq!(CallMetrics::default().change_vs_previous(), None);
    }

    #[test]
    fn test_timeframe_params() {
        let tf: Timeframe = serde_json::from_str("\"30d\"").unwrap();
        assert_eq!(tf, Timeframe::Month);
        assert_eq!(Timeframe::from_param("1y"), Some(Timeframe::Year));
        assert_eq!(Timeframe::from_param("2y"), None);
    }

    #[test]
    fn test_peak_hour_and_funnel() {
        let analytics = AdvancedAnalytics {
            timeframe: Timeframe::Week,
            hourly_calls: vec![
                HourBucket { hour: 9, calls: 4 },
                HourBucket { hour: 10, calls: 7 },
                HourBucket { hour: 14, calls: 7 },
            ],
            services: vec![],
            funnel: vec![
                FunnelStage { label: "Calls".to_string(), count: 200 },
                FunnelStage { label: "Qualified".to_string(), count: 50 },
            ],
        };
        assert_eq!(analytics.peak_hour().map(|b| b.hour), Some(10));
        assert_eq!(analytics.funnel_rates()[1].1, 25.0);
    }

    #[test]
    fn test_benchmark_rating() {
        let mut metric = BenchmarkMetric {
            name: "Answer rate".to_string(),
            value: 90.0,
            industry_average: 80.0,
            percentile: 72,
            lower_is_better: false,
        };
        assert_eq!(metric.rating(), BenchmarkRating::Above);
        metric.lower_is_better = true;
        assert_eq!(metric.rating(), BenchmarkRating::Below);
        metric.value = 81.0;
        assert_eq!(metric.rating(), BenchmarkRating::AtPar);
    }

    #[test]
    fn test_call_event_tagging() {
        let json = r#"{"type":"call_updated","call":{
            "id":"c1","caller_number":"+15551234567","status":"in_progress",
            "started_at":"2026-10-17T10:00:00Z","updated_at":"2026-10-17T10:01:00Z"}}"#;
        let event: CallEvent = serde_json::from_str(json).unwrap();
        match event {
            CallEvent::CallUpdated { call } => {
                assert_eq!(call.display_name(), "+15551234567");
                assert!(call.status.is_active());
            }
            CallEvent::Heartbeat => panic!("expected call update"),
        }
        let hb: CallEvent = serde_json::from_str(r#"{"type":"heartbeat"}"#).unwrap();
        assert_eq!(hb, CallEvent::Heartbeat);
    }

    #[test]
    fn test_default_business_hours_weekdays_open() {
        let hours = BusinessHours::default();
        assert_eq!(hours.days.len(), 7);
        assert!(!hours.days[0].open);
        assert!(hours.days[3].open);
        assert_eq!(day_name(6), "Saturday");
    }
}
