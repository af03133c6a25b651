use shared::participation::{normalize_phone, MAX_NAME_LENGTH, MIN_PHONE_DIGITS};
use yew::prelude::*;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeadValidationState {
    pub has_name: bool,
    pub name_fits: bool,
    pub has_phone_digits: bool,
}

impl LeadValidationState {
    pub fn check(name: &str, phone: &str) -> Self {
        let name = name.trim();
        Self {
            has_name: !name.is_empty(),
            name_fits: name.chars().count() <= MAX_NAME_LENGTH,
            has_phone_digits: normalize_phone(phone).len() >= MIN_PHONE_DIGITS,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.has_name && self.name_fits && self.has_phone_digits
    }
}

#[hook]
pub fn use_lead_validation() -> (UseStateHandle<LeadValidationState>, Callback<(String, String)>) {
    let validation = use_state_eq(LeadValidationState::default);

    let validate = {
        let validation = validation.clone();
        Callback::from(move |(name, phone): (String, String)| {
            validation.set(LeadValidationState::check(&name, &phone));
        })
    };

    (validation, validate)
}

pub fn validation_style(valid: bool) -> &'static str {
    if valid {
        "flex items-center text-xs text-green-600"
    } else {
        "flex items-center text-xs text-gray-500"
    }
}

pub fn validation_icon(valid: bool) -> &'static str {
    if valid {
        "✓"
    } else {
        "•"
    }
}

#[derive(Properties, PartialEq)]
pub struct ValidationProps<T: PartialEq> {
    pub validation: T,
}

#[function_component(LeadRequirements)]
pub fn lead_requirements(props: &ValidationProps<LeadValidationState>) -> Html {
    let validation = &props.validation;
    html! {
        <div class="mt-2 space-y-1">
            <div class={validation_style(validation.has_name && validation.name_fits)}>
                <span class="mr-2">{validation_icon(validation.has_name && validation.name_fits)}</span>
                {"Nome preenchido"}
            </div>
            <div class={validation_style(validation.has_phone_digits)}>
                <span class="mr-2">{validation_icon(validation.has_phone_digits)}</span>
                {format!("Telefone com pelo menos {} dígitos", MIN_PHONE_DIGITS)}
            </div>
        </div>
    }
}
