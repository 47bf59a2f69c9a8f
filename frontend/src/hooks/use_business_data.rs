use std::rc::Rc;

use shared::config::DashboardConfig;
use shared::BusinessTheme;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// Everything a dashboard component needs from its surroundings.
#[derive(Clone, PartialEq)]
pub struct DashboardContext {
    pub config: Rc<DashboardConfig>,
    pub api: ApiClient,
    pub theme: Rc<BusinessTheme>,
}

#[derive(Properties, PartialEq)]
pub struct BusinessDataProviderProps {
    pub config: Rc<DashboardConfig>,
    pub api: ApiClient,
    #[prop_or_default]
    pub children: Html,
}

/// Loads the business theme once and provides it with the config and API
/// client. Children render immediately with the default theme; a failed
/// theme load keeps the default.
#[function_component(BusinessDataProvider)]
pub fn business_data_provider(props: &BusinessDataProviderProps) -> Html {
    let theme = use_state(|| Rc::new(BusinessTheme::default()));

    {
        let theme = theme.clone();
        use_effect_with(props.api.clone(), move |api| {
            let api = api.clone();
            spawn_local(async move {
                match api.get_business_theme().await {
                    Ok(loaded) => {
                        Logger::debug_with_component(
                            "business-data",
                            &format!("loaded theme for {}", loaded.business_name),
                        );
                        theme.set(Rc::new(loaded));
                    }
                    Err(e) => Logger::warn_with_component(
                        "business-data",
                        &format!("using default theme: {}", e),
                    ),
                }
            });
            || ()
        });
    }

    let context = DashboardContext {
        config: props.config.clone(),
        api: props.api.clone(),
        theme: (*theme).clone(),
    };

    html! {
        <ContextProvider<DashboardContext> context={context}>
            { props.children.clone() }
        </ContextProvider<DashboardContext>>
    }
}

/// The surrounding [`DashboardContext`]. Outside a provider this falls back
/// to defaults so components stay renderable in isolation.
#[hook]
pub fn use_dashboard() -> DashboardContext {
    let fallback = use_memo((), |_| {
        let config = DashboardConfig::default();
        DashboardContext {
            api: ApiClient::from_config(&config),
            config: Rc::new(config),
            theme: Rc::new(BusinessTheme::default()),
        }
    });
    use_context::<DashboardContext>().unwrap_or_else(|| (*fallback).clone())
}
