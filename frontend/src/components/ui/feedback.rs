use shared::fetch_state::FetchState;
use yew::prelude::*;

use super::button::{Button, ButtonSize, ButtonVariant};
use super::loading_skeleton::{LoadingSkeleton, SkeletonVariant};

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    html! {
        <div class="error-banner" role="alert">
            <span class="error-message">{ &props.message }</span>
            {for props.on_retry.as_ref().map(|retry| {
                let retry = retry.clone();
                html! {
                    <Button variant={ButtonVariant::Secondary} size={ButtonSize::Small}
                        onclick={Callback::from(move |_: MouseEvent| retry.emit(()))}>
                        {"Retry"}
                    </Button>
                }
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub action_label: Option<AttrValue>,
    #[prop_or_default]
    pub on_action: Callback<()>,
}

#[function_component(EmptyState)]
pub fn empty_state(props: &EmptyStateProps) -> Html {
    let on_action = props.on_action.clone();
    html! {
        <div class="empty-state">
            <p>{ &props.message }</p>
            {for props.action_label.as_ref().map(|label| html! {
                <Button onclick={Callback::from(move |_: MouseEvent| on_action.emit(()))}>
                    { label }
                </Button>
            })}
        </div>
    }
}

/// How an empty result is presented.
#[derive(Clone, PartialEq)]
pub struct EmptyCopy {
    pub message: &'static str,
    pub action_label: Option<&'static str>,
    pub on_action: Callback<()>,
}

impl EmptyCopy {
    pub fn message(message: &'static str) -> Self {
        Self {
            message,
            action_label: None,
            on_action: Callback::noop(),
        }
    }
}

/// Skeleton, error banner with retry, empty call-to-action, or `populated`.
pub fn render_fetch_state<T>(
    state: &FetchState<T>,
    skeleton: SkeletonVariant,
    retry: &Callback<()>,
    empty: EmptyCopy,
    populated: impl FnOnce(&T) -> Html,
) -> Html {
    match state {
        FetchState::Loading => html! { <LoadingSkeleton variant={skeleton} lines={4} /> },
        FetchState::Error(message) => html! {
            <ErrorBanner message={message.clone()} on_retry={Some(retry.clone())} />
        },
        FetchState::Empty => html! {
            <EmptyState
                message={empty.message}
                action_label={empty.action_label.map(AttrValue::Static)}
                on_action={empty.on_action}
            />
        },
        FetchState::Populated(data) => populated(data),
    }
}
