use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidationError;

pub const MIN_PHONE_DIGITS: usize = 10;
pub const MAX_NAME_LENGTH: usize = 120;

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());

// === API Types ===

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RegisterLeadRequest {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct RegisterLeadResponse {
    pub inserted: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ParticipationStatusResponse {
    pub participated: bool,
}

/// Strips everything but ASCII digits.
pub fn normalize_phone(phone: &str) -> String {
    NON_DIGIT.replace_all(phone, "").into_owned()
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::new("missing_name"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::new("name_too_long"));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if normalize_phone(phone).len() < MIN_PHONE_DIGITS {
        return Err(ValidationError::new("phone_too_short"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum LeadError {
    MissingName,
    NameTooLong,
    PhoneTooShort,
}

impl fmt::Display for LeadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Informe seu nome."),
            Self::NameTooLong => write!(f, "Nome muito longo."),
            Self::PhoneTooShort => write!(f, "Informe um telefone válido com DDD."),
        }
    }
}

impl std::error::Error for LeadError {}

impl From<ValidationError> for LeadError {
    fn from(err: ValidationError) -> Self {
        match err.code.as_ref() {
            "name_too_long" => Self::NameTooLong,
            "phone_too_short" => Self::PhoneTooShort,
            _ => Self::MissingName,
        }
    }
}

/// A validated registration: trimmed name, digits-only phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    name: String,
    phone: String,
}

impl Lead {
    pub fn parse(name: &str, phone: &str) -> Result<Self, LeadError> {
        validate_name(name)?;
        validate_phone(phone)?;
        Ok(Self {
            name: name.trim().to_string(),
            phone: normalize_phone(phone),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn to_request(&self) -> RegisterLeadRequest {
        RegisterLeadRequest {
            name: self.name.clone(),
            phone: self.phone.clone(),
        }
    }
}

impl TryFrom<&RegisterLeadRequest> for Lead {
    type Error = LeadError;

    fn try_from(req: &RegisterLeadRequest) -> Result<Self, Self::Error> {
        Lead::parse(&req.name, &req.phone)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateError {
    Network(String),
    Server(u16),
    InvalidResponse(String),
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(e) => write!(f, "Network error: {}", e),
            Self::Server(status) => write!(f, "Participation service returned {}", status),
            Self::InvalidResponse(e) => write!(f, "Invalid response from participation service: {}", e),
        }
    }
}

impl std::error::Error for GateError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    /// False when the phone had already been registered.
    pub inserted: bool,
}

/// Remote one-spin-per-phone service.
#[allow(async_fn_in_trait)]
pub trait ParticipationGate {
    /// Idempotent; `inserted == false` means this phone already played.
    async fn register(&self, lead: &Lead) -> Result<Registration, GateError>;

    async fn has_participated(&self, phone: &str) -> Result<bool, GateError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DenyReason {
    Invalid(LeadError),
    AlreadyParticipated,
    /// Transient failure; the visitor may try again.
    Unavailable(String),
    /// The registration dialog was closed before the answer arrived.
    Cancelled,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(e) => write!(f, "{}", e),
            Self::AlreadyParticipated => write!(f, "Este telefone já participou."),
            Self::Unavailable(_) => write!(f, "Não foi possível registrar agora. Tente novamente."),
            Self::Cancelled => write!(f, "Cadastro cancelado."),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Allowed(Lead),
    Denied(DenyReason),
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }
}

/// Validates the form and registers the lead; no remote call is made for invalid input.
pub async fn admit<G: ParticipationGate>(gate: &G, name: &str, phone: &str) -> GateDecision {
    let lead = match Lead::parse(name, phone) {
        Ok(lead) => lead,
        Err(e) => return GateDecision::Denied(DenyReason::Invalid(e)),
    };
    match gate.register(&lead).await {
        Ok(Registration { inserted: true }) => {
            log::info!("Lead registered, spin allowed");
            GateDecision::Allowed(lead)
        }
        Ok(Registration { inserted: false }) => GateDecision::Denied(DenyReason::AlreadyParticipated),
        Err(e) => {
            log::warn!("Participation service failed: {}", e);
            GateDecision::Denied(DenyReason::Unavailable(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::HashSet;

    #[derive(Default)]
    struct MemoryGate {
        phones: RefCell<HashSet<String>>,
        calls: RefCell<u32>,
        offline: bool,
    }

    impl ParticipationGate for MemoryGate {
        async fn register(&self, lead: &Lead) -> Result<Registration, GateError> {
            *self.calls.borrow_mut() += 1;
            if self.offline {
                return Err(GateError::Network("offline".into()));
            }
            let inserted = self.phones.borrow_mut().insert(lead.phone().to_string());
            Ok(Registration { inserted })
        }

        async fn has_participated(&self, phone: &str) -> Result<bool, GateError> {
            Ok(self.phones.borrow().contains(&normalize_phone(phone)))
        }
    }

    #[test]
    fn phone_is_reduced_to_digits() {
        assert_eq!(normalize_phone("(11) 98765-4321"), "11987654321");
        assert!(validate_phone("(11) 9876-543").is_err());
        assert!(validate_phone("11 98765 4321").is_ok());
    }

    #[test]
    fn invalid_form_never_reaches_the_gate() {
        let gate = MemoryGate::default();
        let decision = block_on(admit(&gate, "  ", "11987654321"));
        assert_eq!(decision, GateDecision::Denied(DenyReason::Invalid(LeadError::MissingName)));
        let decision = block_on(admit(&gate, "Ana", "1234"));
        assert_eq!(decision, GateDecision::Denied(DenyReason::Invalid(LeadError::PhoneTooShort)));
        assert_eq!(*gate.calls.borrow(), 0);
    }

    #[test]
    fn second_registration_is_denied() {
        let gate = MemoryGate::default();
        let first = block_on(admit(&gate, "Ana", "(11) 98765-4321"));
        assert!(first.is_allowed());
        let second = block_on(admit(&gate, "Ana Maria", "11987654321"));
        assert_eq!(second, GateDecision::Denied(DenyReason::AlreadyParticipated));
        assert!(block_on(gate.has_participated("11 98765-4321")).unwrap());
    }

    #[test]
    fn service_failure_is_distinct_from_already_participated() {
        let gate = MemoryGate { offline: true, ..Default::default() };
        match block_on(admit(&gate, "Ana", "11987654321")) {
            GateDecision::Denied(DenyReason::Unavailable(msg)) => assert!(msg.contains("offline")),
            other => panic!("unexpected decision {:?}", other),
        }
    }
}
