use gloo_net::http::Request;
use shared::participation::{
    normalize_phone, GateError, Lead, ParticipationGate, ParticipationStatusResponse, Registration,
    RegisterLeadResponse,
};

use crate::config::get_api_base_url;

/// Talks to the lead service over HTTP.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpParticipationGate {
    base_url: String,
}

impl HttpParticipationGate {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }
}

impl Default for HttpParticipationGate {
    fn default() -> Self {
        Self::new(get_api_base_url())
    }
}

impl ParticipationGate for HttpParticipationGate {
    async fn register(&self, lead: &Lead) -> Result<Registration, GateError> {
        let response = Request::post(&format!("{}/api/leads/register", self.base_url))
            .json(&lead.to_request())
            .map_err(|e| GateError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| GateError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(GateError::Server(response.status()));
        }

        let body = response
            .json::<RegisterLeadResponse>()
            .await
            .map_err(|e| GateError::InvalidResponse(e.to_string()))?;
        Ok(Registration { inserted: body.inserted })
    }

    async fn has_participated(&self, phone: &str) -> Result<bool, GateError> {
        let response = Request::get(&format!(
            "{}/api/leads/status/{}",
            self.base_url,
            normalize_phone(phone)
        ))
        .send()
        .await
        .map_err(|e| GateError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(GateError::Server(response.status()));
        }

        response
            .json::<ParticipationStatusResponse>()
            .await
            .map(|status| status.participated)
            .map_err(|e| GateError::InvalidResponse(e.to_string()))
    }
}
