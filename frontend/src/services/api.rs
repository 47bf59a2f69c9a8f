use std::cell::RefCell;
use std::rc::Rc;

use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::cache::TtlCache;
use shared::calendar::{CalendarView, DateRange};
use shared::config::DashboardConfig;
use shared::onboarding::{OnboardingStep, COMPLETE_ENDPOINT};
use shared::{
    AccountSettings, AdvancedAnalytics, AiAgentSettings, ApiEnvelope, ApiError, Appointment,
    BenchmarkReport, BusinessHours, BusinessTheme, CalendarResponse, CallRecord,
    DashboardAnalytics, OnboardingStepResponse, RecentCallsResponse, SaveResponse, Timeframe,
};
use uuid::Uuid;
use web_sys::AbortSignal;

use crate::services::date_utils::now_ms;
use crate::services::logging::Logger;

const COMPONENT: &str = "api-client";

/// API client for the dashboard endpoints.
///
/// Every response is the `{ success, data | error }` envelope. GET responses
/// can be served from a short TTL cache keyed by the request URL; writes drop
/// the cached entries they affect.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    business_id: Option<String>,
    auth_token: Option<String>,
    cache: Rc<RefCell<TtlCache<String>>>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
            && self.business_id == other.business_id
            && self.auth_token == other.auth_token
            && Rc::ptr_eq(&self.cache, &other.cache)
    }
}

impl ApiClient {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            business_id: config.business_id.clone(),
            auth_token: None,
            cache: Rc::new(RefCell::new(TtlCache::new(config.cache_ttl_ms as f64))),
        }
    }

    /// Attach a bearer token to every request
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Append `businessId` when the dashboard is scoped to one tenant.
    fn scoped(&self, path: &str) -> String {
        match &self.business_id {
            Some(id) => {
                let sep = if path.contains('?') { '&' } else { '?' };
                format!("{}{}businessId={}", path, sep, id)
            }
            None => path.to_string(),
        }
    }

    fn decorate(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder
            .header("Accept", "application/json")
            .header("X-Request-Id", &Uuid::new_v4().to_string());
        match &self.auth_token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<(T, String), ApiError> {
        let status = response.status();
        let ok = response.ok();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        ApiEnvelope::<T>::from_http(status, ok, &body).map(|data| (data, body))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        use_cache: bool,
        signal: Option<&AbortSignal>,
    ) -> Result<T, ApiError> {
        let url = self.url(&self.scoped(path));

        if use_cache {
            let cached = self.cache.borrow().get(&url, now_ms());
            if let Some(body) = cached {
                // Only successful bodies are cached
                if let Ok(data) = ApiEnvelope::<T>::from_http(200, true, &body) {
                    Logger::debug_with_component(COMPONENT, &format!("cache hit {}", url));
                    return Ok(data);
                }
            }
        }

        let request = self.decorate(Request::get(&url)).abort_signal(signal);
        let response = match request.send().await {
            Ok(response) => response,
            Err(_) if signal.map(|s| s.aborted()).unwrap_or(false) => return Err(ApiError::Aborted),
            Err(e) => {
                Logger::warn_with_component(COMPONENT, &format!("GET {} failed: {}", url, e));
                return Err(ApiError::Network(e.to_string()));
            }
        };

        let result = Self::read_envelope::<T>(response).await;
        match result {
            Ok((data, body)) => {
                if use_cache {
                    self.cache.borrow_mut().insert(url, body, now_ms());
                }
                Ok(data)
            }
            Err(_) if signal.map(|s| s.aborted()).unwrap_or(false) => Err(ApiError::Aborted),
            Err(e) => {
                Logger::warn_with_component(COMPONENT, &format!("GET {}: {}", url, e));
                Err(e)
            }
        }
    }

    async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(&self.scoped(path));
        let builder = match method {
            "PUT" => Request::put(&url),
            _ => Request::post(&url),
        };
        let request = self
            .decorate(builder)
            .json(body)
            .map_err(|e| ApiError::Parse(format!("Failed to serialize request: {}", e)))?;

        let response = request.send().await.map_err(|e| {
            Logger::warn_with_component(COMPONENT, &format!("{} {} failed: {}", method, url, e));
            ApiError::Network(e.to_string())
        })?;

        Self::read_envelope::<T>(response).await.map(|(data, _)| data)
    }

    fn invalidate(&self, path: &str) {
        let url = self.url(path);
        self.cache.borrow_mut().invalidate_prefix(&url);
    }

    /// Appointments for one calendar view and range.
    pub async fn get_appointments(
        &self,
        view: CalendarView,
        range: DateRange,
        signal: Option<&AbortSignal>,
    ) -> Result<Vec<Appointment>, ApiError> {
        let path = format!("/api/dashboard/calendar/{}?{}", view.as_str(), range.to_query());
        self.get::<CalendarResponse>(&path, false, signal)
            .await
            .map(|r| r.appointments)
    }

    pub async fn get_business_theme(&self) -> Result<BusinessTheme, ApiError> {
        self.get("/api/business/theme", true, None).await
    }

    pub async fn get_analytics(
        &self,
        timeframe: Timeframe,
        signal: Option<&AbortSignal>,
    ) -> Result<DashboardAnalytics, ApiError> {
        let path = format!("/api/dashboard/analytics?timeframe={}", timeframe.as_param());
        self.get(&path, true, signal).await
    }

    pub async fn get_advanced_analytics(
        &self,
        timeframe: Timeframe,
        signal: Option<&AbortSignal>,
    ) -> Result<AdvancedAnalytics, ApiError> {
        let path = format!("/api/dashboard/advanced-analytics?timeframe={}", timeframe.as_param());
        self.get(&path, true, signal).await
    }

    pub async fn get_benchmarks(
        &self,
        timeframe: Timeframe,
        signal: Option<&AbortSignal>,
    ) -> Result<BenchmarkReport, ApiError> {
        let path = format!("/api/dashboard/benchmarks?timeframe={}", timeframe.as_param());
        self.get(&path, true, signal).await
    }

    pub async fn get_recent_calls(&self, signal: Option<&AbortSignal>) -> Result<Vec<CallRecord>, ApiError> {
        self.get::<RecentCallsResponse>("/api/dashboard/calls/recent", false, signal)
            .await
            .map(|r| r.calls)
    }

    /// Server-sent event stream of call updates
    pub fn call_stream_url(&self) -> String {
        self.url(&self.scoped("/api/dashboard/calls/stream"))
    }

    pub async fn get_account_settings(&self) -> Result<AccountSettings, ApiError> {
        self.get("/api/business/profile", true, None).await
    }

    pub async fn update_account_settings(&self, settings: &AccountSettings) -> Result<SaveResponse, ApiError> {
        let result = self.send("PUT", "/api/business/profile", settings).await;
        self.invalidate("/api/business/");
        result
    }

    pub async fn get_business_hours(&self) -> Result<BusinessHours, ApiError> {
        self.get("/api/business/hours", true, None).await
    }

    pub async fn update_business_hours(&self, hours: &BusinessHours) -> Result<SaveResponse, ApiError> {
        let result = self.send("PUT", "/api/business/hours", hours).await;
        self.invalidate("/api/business/hours");
        result
    }

    pub async fn get_ai_agent_settings(&self) -> Result<AiAgentSettings, ApiError> {
        self.get("/api/ai-agent/settings", true, None).await
    }

    pub async fn update_ai_agent_settings(&self, settings: &AiAgentSettings) -> Result<SaveResponse, ApiError> {
        let result = self.send("POST", "/api/ai-agent/update-settings", settings).await;
        self.invalidate("/api/ai-agent/");
        result
    }

    pub async fn save_onboarding_step(
        &self,
        step: OnboardingStep,
        payload: &serde_json::Value,
    ) -> Result<OnboardingStepResponse, ApiError> {
        Logger::info_with_component(COMPONENT, &format!("saving onboarding step {:?}", step));
        self.send("POST", step.endpoint(), payload).await
    }

    pub async fn complete_onboarding(&self) -> Result<OnboardingStepResponse, ApiError> {
        self.send("POST", COMPLETE_ENDPOINT, &serde_json::json!({})).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn client(business_id: Option<&str>) -> ApiClient {
        let config = DashboardConfig {
            api_base_url: "https://api.example".to_string(),
            business_id: business_id.map(str::to_string),
            ..DashboardConfig::default()
        };
        ApiClient::from_config(&config)
    }

    #[wasm_bindgen_test]
    fn test_scoped_urls() {
        let api = client(Some("biz_1"));
        assert_eq!(api.scoped("/api/business/hours"), "/api/business/hours?businessId=biz_1");
        assert_eq!(
            api.scoped("/api/dashboard/analytics?timeframe=7d"),
            "/api/dashboard/analytics?timeframe=7d&businessId=biz_1"
        );
        assert_eq!(client(None).scoped("/api/x"), "/api/x");
        assert_eq!(api.call_stream_url(), "https://api.example/api/dashboard/calls/stream?businessId=biz_1");
    }

    #[wasm_bindgen_test]
    fn test_clients_compare_by_shared_cache() {
        let api = client(None);
        assert!(api == api.clone());
        assert!(api != client(None));
        assert!(api.clone().with_auth_token("t") != api);
    }
}
