use axum::{
    debug_handler,
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use shared::participation::{
    normalize_phone, validate_phone, Lead, LeadError, ParticipationStatusResponse, RegisterLeadRequest,
    RegisterLeadResponse,
};
use tracing::debug;

use crate::error::Error;
use crate::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_lead))
        .route("/status/:phone", get(participation_status))
}

/// Registers a lead. `inserted: false` tells the wheel this phone already spun.
#[debug_handler]
async fn register_lead(
    State(state): State<AppState>,
    Json(request): Json<RegisterLeadRequest>,
) -> Result<Json<RegisterLeadResponse>, Error> {
    let lead = Lead::try_from(&request)?;
    let inserted = state.leads.register(&lead).await?;
    Ok(Json(RegisterLeadResponse { inserted }))
}

#[debug_handler]
async fn participation_status(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<ParticipationStatusResponse>, Error> {
    validate_phone(&phone).map_err(LeadError::from)?;
    let phone = normalize_phone(&phone);
    let participated = state.leads.has_participated(&phone).await?;
    debug!("Status lookup: participated={}", participated);
    Ok(Json(ParticipationStatusResponse { participated }))
}
