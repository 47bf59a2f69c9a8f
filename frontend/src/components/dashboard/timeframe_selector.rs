use shared::Timeframe;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TimeframeSelectorProps {
    pub value: Timeframe,
    pub on_change: Callback<Timeframe>,
}

#[function_component(TimeframeSelector)]
pub fn timeframe_selector(props: &TimeframeSelectorProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(timeframe) = Timeframe::from_param(&select.value()) {
                on_change.emit(timeframe);
            }
        })
    };

    html! {
        <label class="timeframe-selector">
            <span class="sr-only">{"Timeframe"}</span>
            <select {onchange}>
                {for Timeframe::ALL.iter().map(|t| html! {
                    <option value={t.as_param()} selected={*t == props.value}>{t.label()}</option>
                })}
            </select>
        </label>
    }
}
