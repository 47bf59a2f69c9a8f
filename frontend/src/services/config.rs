use shared::config::DashboardConfig;

use crate::services::logging::Logger;

/// Dashboard configuration for this build.
///
/// `CLOUDGREET_CONFIG` may hold a partial JSON document over the defaults;
/// `CLOUDGREET_API_BASE`, `CLOUDGREET_BUSINESS_ID` and `CLOUDGREET_LOG_LEVEL`
/// set at compile time override single fields on top of it.
pub fn load_config() -> DashboardConfig {
    build_config(
        option_env!("CLOUDGREET_CONFIG"),
        option_env!("CLOUDGREET_API_BASE"),
        option_env!("CLOUDGREET_BUSINESS_ID"),
        option_env!("CLOUDGREET_LOG_LEVEL"),
    )
}

fn build_config(
    json: Option<&str>,
    api_base_url: Option<&str>,
    business_id: Option<&str>,
    log_level: Option<&str>,
) -> DashboardConfig {
    let base = match json.filter(|json| !json.trim().is_empty()) {
        Some(json) => DashboardConfig::from_json(json).unwrap_or_else(|e| {
            Logger::warn_with_component("config", &format!("ignoring CLOUDGREET_CONFIG: {}", e));
            DashboardConfig::default()
        }),
        None => DashboardConfig::default(),
    };
    base.with_overrides(api_base_url, business_id, log_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_loaded_config_is_normalized() {
        let config = load_config();
        assert!(!config.api_base_url.ends_with('/'));
        assert!(config.week_hours.end_hour <= 24);
    }

    #[wasm_bindgen_test]
    fn test_json_config_then_env_overrides() {
        let config = build_config(
            Some(r#"{"api_base_url": "https://json.example/", "call_poll_ms": 10000}"#),
            Some("https://env.example"),
            None,
            Some("debug"),
        );
        assert_eq!(config.api_base_url, "https://env.example");
        assert_eq!(config.call_poll_ms, 10_000);
        assert_eq!(config.log_level, shared::config::LogLevel::Debug);
    }

    #[wasm_bindgen_test]
    fn test_bad_json_config_falls_back_to_defaults() {
        let config = build_config(Some("{not json"), None, None, None);
        assert_eq!(config, DashboardConfig::default());
    }
}
