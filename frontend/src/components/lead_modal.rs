use web_sys::{HtmlInputElement, InputEvent, SubmitEvent};
use yew::prelude::*;

use crate::hooks::validation::{use_lead_validation, LeadRequirements};
use crate::styles;

#[derive(Properties, PartialEq)]
pub struct LeadModalProps {
    /// Fired with `(name, phone)` as typed; validation happens upstream too.
    pub on_submit: Callback<(String, String)>,
    pub on_close: Callback<()>,
    /// Fired with the phone when the field loses focus.
    #[prop_or_default]
    pub on_phone_blur: Callback<String>,
    #[prop_or_default]
    pub pending: bool,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub notice: Option<AttrValue>,
}

#[function_component(LeadModal)]
pub fn lead_modal(props: &LeadModalProps) -> Html {
    let name = use_state(String::new);
    let phone = use_state(String::new);
    let (validation, validate) = use_lead_validation();

    let on_name_input = {
        let name = name.clone();
        let phone = phone.clone();
        let validate = validate.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            validate.emit((input.value(), (*phone).clone()));
            name.set(input.value());
        })
    };

    let on_phone_input = {
        let name = name.clone();
        let phone = phone.clone();
        let validate = validate.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            validate.emit(((*name).clone(), input.value()));
            phone.set(input.value());
        })
    };

    let on_phone_blur = {
        let on_phone_blur = props.on_phone_blur.clone();
        Callback::from(move |e: FocusEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_phone_blur.emit(input.value());
        })
    };

    let onsubmit = {
        let name = name.clone();
        let phone = phone.clone();
        let on_submit = props.on_submit.clone();
        let pending = props.pending;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if pending {
                return;
            }
            on_submit.emit(((*name).clone(), (*phone).clone()));
        })
    };

    let on_backdrop = {
        let on_close = props.on_close.clone();
        let pending = props.pending;
        Callback::from(move |e: MouseEvent| {
            if !pending && e.target() == e.current_target() {
                on_close.emit(());
            }
        })
    };

    let on_close_button = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class={styles::BACKDROP} onclick={on_backdrop} role="dialog" aria-modal="true">
            <div class={styles::MODAL}>
                <button type="button" class={styles::MODAL_CLOSE} onclick={on_close_button} disabled={props.pending} aria-label="Fechar">
                    {"✕"}
                </button>
                <h2 class="text-xl font-bold text-gray-900">{"Cadastre-se para girar"}</h2>
                <form class={styles::FORM} {onsubmit}>
                    <div>
                        <label for="lead-name" class={styles::TEXT_LABEL}>{"Nome"}</label>
                        <input
                            id="lead-name"
                            type="text"
                            autocomplete="name"
                            class={styles::INPUT}
                            value={(*name).clone()}
                            oninput={on_name_input}
                            disabled={props.pending}
                        />
                    </div>
                    <div>
                        <label for="lead-phone" class={styles::TEXT_LABEL}>{"Telefone"}</label>
                        <input
                            id="lead-phone"
                            type="tel"
                            autocomplete="tel"
                            placeholder="(11) 98765-4321"
                            class={if props.error.is_some() { styles::INPUT_ERROR } else { styles::INPUT }}
                            value={(*phone).clone()}
                            oninput={on_phone_input}
                            onblur={on_phone_blur}
                            disabled={props.pending}
                        />
                        <LeadRequirements validation={(*validation).clone()} />
                    </div>

                    if let Some(notice) = &props.notice {
                        <div class={styles::ALERT_WARNING}>{notice.clone()}</div>
                    }
                    if let Some(error) = &props.error {
                        <div class={styles::ALERT_ERROR}>{error.clone()}</div>
                    }

                    <button type="submit" class={styles::BUTTON_PRIMARY} disabled={props.pending}>
                        if props.pending {
                            <svg class={styles::LOADING_SPINNER} xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
                                <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
                                <path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z"></path>
                            </svg>
                            {"Enviando..."}
                        } else {
                            {"Girar a roleta"}
                        }
                    </button>
                </form>
            </div>
        </div>
    }
}
