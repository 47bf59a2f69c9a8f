use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub title: Option<AttrValue>,
    #[prop_or_default]
    pub wide: bool,
    #[prop_or_default]
    pub children: Html,
}

/// Clicking the backdrop closes; clicks inside the dialog don't bubble out.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    if !props.is_open {
        return html! {};
    }

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div
                class={classes!("modal", props.wide.then_some("modal-wide"))}
                role="dialog"
                onclick={on_modal_click}
            >
                <div class="modal-header">
                    {for props.title.as_ref().map(|title| html! { <h3 class="modal-title">{title}</h3> })}
                    <button type="button" class="modal-close" aria-label="Close" onclick={on_close_click}>
                        {"×"}
                    </button>
                </div>
                <div class="modal-body">
                    { props.children.clone() }
                </div>
            </div>
        </div>
    }
}
