use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CardProps {
    #[prop_or_default]
    pub title: Option<AttrValue>,
    #[prop_or_default]
    pub actions: Html,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Card)]
pub fn card(props: &CardProps) -> Html {
    html! {
        <section class={classes!("card", props.class.clone())}>
            if let Some(title) = &props.title {
                <div class="card-header">
                    <h3 class="card-title">{title}</h3>
                    <div class="card-actions">{ props.actions.clone() }</div>
                </div>
            }
            <div class="card-body">
                { props.children.clone() }
            </div>
        </section>
    }
}
