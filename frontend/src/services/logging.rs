use std::cell::RefCell;

use gloo::net::http::Request;
use shared::config::{DashboardConfig, LogLevel};
use shared::LogRequest;
use wasm_bindgen_futures::spawn_local;

struct LoggerState {
    min_level: LogLevel,
    remote_endpoint: Option<String>,
}

thread_local! {
    static LOGGER: RefCell<LoggerState> = RefCell::new(LoggerState {
        min_level: LogLevel::Info,
        remote_endpoint: None,
    });
}

pub struct Logger;

impl Logger {
    /// Apply the configured level and remote sink. Call once at startup.
    pub fn init(config: &DashboardConfig) {
        LOGGER.with(|state| {
            let mut state = state.borrow_mut();
            state.min_level = config.log_level;
            state.remote_endpoint = config
                .remote_logging
                .then(|| config.url("/api/logs"));
        });
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, message, component);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, message, component);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, message, component);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, message, component);
    }

    pub fn enabled(level: LogLevel) -> bool {
        LOGGER.with(|state| level >= state.borrow().min_level)
    }

    fn log(level: LogLevel, message: &str, component: &str) {
        if !Self::enabled(level) {
            return;
        }

        let line = format!("[{}] {}", component, message);
        match level {
            LogLevel::Debug => gloo::console::debug!(line),
            LogLevel::Info => gloo::console::info!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            LogLevel::Error => gloo::console::error!(line),
        }

        let endpoint = LOGGER.with(|state| state.borrow().remote_endpoint.clone());
        if let Some(endpoint) = endpoint {
            let request = LogRequest {
                level: level.as_str().to_string(),
                message: message.to_string(),
                component: Some(component.to_string()),
            };

            // Fire and forget; a failed log post must never surface in the UI
            spawn_local(async move {
                if let Ok(builder) = Request::post(&endpoint).json(&request) {
                    let _ = builder.send().await;
                }
            });
        }
    }
}
