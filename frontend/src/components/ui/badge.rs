use shared::BadgeVariant;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BadgeProps {
    #[prop_or(BadgeVariant::Neutral)]
    pub variant: BadgeVariant,
    pub label: AttrValue,
}

#[function_component(Badge)]
pub fn badge(props: &BadgeProps) -> Html {
    html! {
        <span class={props.variant.css_class()}>{ &props.label }</span>
    }
}
