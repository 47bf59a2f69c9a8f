use yew::prelude::*;

use crate::hooks::use_business_data::use_dashboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Onboarding,
    Settings,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Dashboard, Page::Onboarding, Page::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Onboarding => "Setup",
            Page::Settings => "Settings",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub page: Page,
    pub on_navigate: Callback<Page>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let ctx = use_dashboard();

    html! {
        <header class="header" style={format!("--brand: {}", ctx.theme.primary_color)}>
            <div class="container">
                <h1>{&ctx.theme.business_name}</h1>
                <nav class="header-nav">
                    {for Page::ALL.iter().map(|page| {
                        let page = *page;
                        let on_navigate = props.on_navigate.clone();
                        html! {
                            <button
                                type="button"
                                class={classes!("nav-tab", (page == props.page).then_some("active"))}
                                onclick={Callback::from(move |_: MouseEvent| on_navigate.emit(page))}
                            >
                                {page.label()}
                            </button>
                        }
                    })}
                </nav>
            </div>
        </header>
    }
}
