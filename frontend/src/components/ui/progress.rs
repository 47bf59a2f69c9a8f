use shared::progress_percent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProgressProps {
    pub value: f64,
    #[prop_or(100.0)]
    pub max: f64,
    #[prop_or_default]
    pub label: Option<AttrValue>,
}

#[function_component(Progress)]
pub fn progress(props: &ProgressProps) -> Html {
    let percent = progress_percent(props.value, props.max);

    html! {
        <div class="progress">
            {for props.label.as_ref().map(|label| html! {
                <div class="progress-label">
                    <span>{label}</span>
                    <span>{format!("{:.0}%", percent)}</span>
                </div>
            })}
            <div
                class="progress-track"
                role="progressbar"
                aria-valuenow={format!("{:.0}", percent)}
                aria-valuemin="0"
                aria-valuemax="100"
            >
                <div class="progress-fill" style={format!("width: {:.1}%", percent)}></div>
            </div>
        </div>
    }
}
