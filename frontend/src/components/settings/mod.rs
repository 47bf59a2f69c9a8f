pub mod account_settings;
pub mod ai_agent_settings;
pub mod business_hours_form;

pub use account_settings::AccountSettingsForm;
pub use ai_agent_settings::AiAgentSettingsForm;
pub use business_hours_form::BusinessHoursForm;

use shared::{ApiError, SaveResponse};
use yew::prelude::*;

use crate::components::ui::ErrorBanner;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved(String),
    Failed(String),
}

impl SaveStatus {
    pub fn is_saving(&self) -> bool {
        matches!(self, SaveStatus::Saving)
    }

    pub fn from_result(result: Result<SaveResponse, ApiError>) -> Self {
        match result {
            Ok(response) => SaveStatus::Saved(response.message.unwrap_or_else(|| "Saved".to_string())),
            Err(e) => SaveStatus::Failed(e.to_string()),
        }
    }
}

pub(crate) fn render_save_status(status: &SaveStatus) -> Html {
    match status {
        SaveStatus::Saved(message) => html! { <p class="form-success" role="status">{message}</p> },
        SaveStatus::Failed(message) => html! { <ErrorBanner message={message.clone()} /> },
        SaveStatus::Idle | SaveStatus::Saving => html! {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_save_status_from_result() {
        assert_eq!(
            SaveStatus::from_result(Ok(SaveResponse { message: None })),
            SaveStatus::Saved("Saved".to_string())
        );
        assert_eq!(
            SaveStatus::from_result(Err(ApiError::Business("Invalid timezone".to_string()))),
            SaveStatus::Failed(ApiError::Business("Invalid timezone".to_string()).to_string())
        );
    }
}
