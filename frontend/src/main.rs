use std::rc::Rc;

use chrono::NaiveDate;
use shared::Timeframe;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::calendar::{DayDetailsSidebar, FullCalendarModal, WeekCalendarWidget};
use components::dashboard::{
    AdvancedAnalytics, PerformanceBenchmarking, RealAnalytics, RealTimeCallMonitor, TimeframeSelector,
};
use components::header::{Header, Page};
use components::onboarding::OnboardingWizard;
use components::settings::{AccountSettingsForm, AiAgentSettingsForm, BusinessHoursForm};
use hooks::use_business_data::BusinessDataProvider;
use services::api::ApiClient;
use services::config::load_config;
use services::logging::Logger;

#[function_component(DashboardPage)]
fn dashboard_page() -> Html {
    let timeframe = use_state(Timeframe::default);
    let calendar_open = use_state(|| false);
    let selected_day = use_state(|| Option::<NaiveDate>::None);

    let on_timeframe = {
        let timeframe = timeframe.clone();
        Callback::from(move |next: Timeframe| timeframe.set(next))
    };

    let open_calendar = {
        let calendar_open = calendar_open.clone();
        Callback::from(move |_: ()| calendar_open.set(true))
    };

    let close_calendar = {
        let calendar_open = calendar_open.clone();
        Callback::from(move |_: ()| calendar_open.set(false))
    };

    let select_day = {
        let selected_day = selected_day.clone();
        Callback::from(move |date: NaiveDate| selected_day.set(Some(date)))
    };

    let close_day = {
        let selected_day = selected_day.clone();
        Callback::from(move |_: ()| selected_day.set(None))
    };

    html! {
        <main class="dashboard container">
            <div class="dashboard-toolbar">
                <TimeframeSelector value={*timeframe} on_change={on_timeframe} />
            </div>
            <RealAnalytics timeframe={*timeframe} />
            <div class="dashboard-row">
                <WeekCalendarWidget
                    selected={*selected_day}
                    on_select_date={select_day}
                    on_open_calendar={open_calendar}
                />
                if let Some(date) = *selected_day {
                    <DayDetailsSidebar key={date.to_string()} {date} on_close={close_day} />
                }
            </div>
            <div class="dashboard-row">
                <RealTimeCallMonitor />
                <PerformanceBenchmarking timeframe={*timeframe} />
            </div>
            <AdvancedAnalytics timeframe={*timeframe} />
            if *calendar_open {
                <FullCalendarModal is_open={true} on_close={close_calendar} />
            }
        </main>
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| {
        let config = load_config();
        Logger::init(&config);
        Logger::info_with_component("app", &format!("dashboard starting against '{}'", config.api_base_url));
        config
    });
    let api = use_memo((), {
        let config = config.clone();
        move |_| ApiClient::from_config(&config)
    });
    let page = use_state(|| Page::Dashboard);

    let on_navigate = {
        let page = page.clone();
        Callback::from(move |next: Page| page.set(next))
    };

    let on_onboarding_complete = {
        let page = page.clone();
        Callback::from(move |_: ()| page.set(Page::Dashboard))
    };

    let content = match *page {
        Page::Dashboard => html! { <DashboardPage /> },
        Page::Onboarding => html! {
            <main class="container">
                <OnboardingWizard on_complete={on_onboarding_complete} />
            </main>
        },
        Page::Settings => html! {
            <main class="container settings-page">
                <AccountSettingsForm />
                <BusinessHoursForm />
                <AiAgentSettingsForm />
            </main>
        },
    };

    html! {
        <BusinessDataProvider config={Rc::clone(&config)} api={(*api).clone()}>
            <Header page={*page} {on_navigate} />
            {content}
        </BusinessDataProvider>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
