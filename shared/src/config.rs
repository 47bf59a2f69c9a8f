use serde::{Deserialize, Serialize};

use crate::calendar::SlotHours;
use crate::reconnect::ReconnectPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Runtime settings for the dashboard. Every field has a default, so a
/// partial JSON document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix for every endpoint; empty means same origin.
    pub api_base_url: String,
    pub business_id: Option<String>,
    pub cache_ttl_ms: u32,
    pub analytics_refresh_ms: u32,
    pub calendar_refresh_ms: u32,
    pub call_poll_ms: u32,
    pub call_feed_limit: usize,
    pub reconnect: ReconnectPolicy,
    pub week_hours: SlotHours,
    pub day_hours: SlotHours,
    pub log_level: LogLevel,
    /// Also post log lines to `/api/logs`
    pub remote_logging: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            business_id: None,
            cache_ttl_ms: 30_000,
            analytics_refresh_ms: 300_000,
            calendar_refresh_ms: 60_000,
            call_poll_ms: 5_000,
            call_feed_limit: 50,
            reconnect: ReconnectPolicy::default(),
            week_hours: SlotHours::default(),
            day_hours: SlotHours::full_day(),
            log_level: LogLevel::Info,
            remote_logging: false,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        config.normalize();
        Ok(config)
    }

    /// Apply string overrides (compile-time env in the browser build).
    /// Unparseable values are ignored.
    pub fn with_overrides(
        mut self,
        api_base_url: Option<&str>,
        business_id: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        if let Some(base) = api_base_url {
            self.api_base_url = base.to_string();
        }
        if let Some(id) = business_id.filter(|id| !id.trim().is_empty()) {
            self.business_id = Some(id.trim().to_string());
        }
        if let Some(level) = log_level.and_then(LogLevel::parse) {
            self.log_level = level;
        }
        self.normalize();
        self
    }

    fn normalize(&mut self) {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        self.week_hours = SlotHours::new(self.week_hours.start_hour, self.week_hours.end_hour);
        self.day_hours = SlotHours::new(self.day_hours.start_hour, self.day_hours.end_hour);
        self.call_feed_limit = self.call_feed_limit.max(1);
    }

    /// Absolute URL for an `/api/...` path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DashboardConfig::from_json(
            r#"{"api_base_url": "https://app.cloudgreet.example/", "week_hours": {"start_hour": 6, "end_hour": 30}}"#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://app.cloudgreet.example");
        assert_eq!(config.week_hours, SlotHours::new(6, 24));
        assert_eq!(config.cache_ttl_ms, 30_000);
        assert_eq!(config.reconnect, ReconnectPolicy::default());
        assert_eq!(config.url("/api/business/hours"), "https://app.cloudgreet.example/api/business/hours");
    }

    #[test]
    fn test_overrides() {
        let config = DashboardConfig::default().with_overrides(None, Some(" biz_42 "), Some("WARN"));
        assert_eq!(config.business_id.as_deref(), Some("biz_42"));
        assert_eq!(config.log_level, LogLevel::Warn);

        let unchanged = DashboardConfig::default().with_overrides(None, Some(""), Some("loud"));
        assert_eq!(unchanged, DashboardConfig::default());
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
    }
}
