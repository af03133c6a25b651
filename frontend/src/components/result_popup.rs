use yew::prelude::*;
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct ResultPopupProps {
    pub message: AttrValue,
    pub on_close: Callback<()>,
}

/// Modal announcing the outcome. Clicking the dimmed backdrop closes it too.
#[function_component(ResultPopup)]
pub fn result_popup(props: &ResultPopupProps) -> Html {
    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            // Only clicks that land on the backdrop itself
            if e.target() == e.current_target() {
                on_close.emit(());
            }
        })
    };

    let on_button = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class={styles::BACKDROP} onclick={on_backdrop} role="dialog" aria-modal="true">
            <div class={styles::MODAL}>
                <button class={styles::MODAL_CLOSE} onclick={on_button.clone()} aria-label="Fechar">
                    {"✕"}
                </button>
                <p class={styles::POPUP_MESSAGE}>{props.message.clone()}</p>
                <button class={styles::BUTTON_PRIMARY} onclick={on_button}>
                    {"Fechar"}
                </button>
            </div>
        </div>
    }
}
