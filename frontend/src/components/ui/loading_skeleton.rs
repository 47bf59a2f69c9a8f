use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SkeletonVariant {
    #[default]
    Text,
    Card,
    Grid,
}

#[derive(Properties, PartialEq)]
pub struct LoadingSkeletonProps {
    #[prop_or(3)]
    pub lines: usize,
    #[prop_or_default]
    pub variant: SkeletonVariant,
}

#[function_component(LoadingSkeleton)]
pub fn loading_skeleton(props: &LoadingSkeletonProps) -> Html {
    let (class, item_class) = match props.variant {
        SkeletonVariant::Text => ("skeleton skeleton-text", "skeleton-line"),
        SkeletonVariant::Card => ("skeleton skeleton-cards", "skeleton-card"),
        SkeletonVariant::Grid => ("skeleton skeleton-grid", "skeleton-cell"),
    };

    html! {
        <div class={class} aria-busy="true">
            {for (0..props.lines.max(1)).map(|i| html! {
                <div key={i} class={item_class}></div>
            })}
        </div>
    }
}
