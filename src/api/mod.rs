//! HTTP API for the storefront
//!
//! Two endpoints, thin over the library:
//!
//! - `POST /api/company/resolve` - registry lookup for checkout enrichment
//! - `POST /api/lead` - lead submission
//!
//! Status mapping lives here, not in the core: invalid input is 400, a
//! registry miss is 404, a registry failure is 502. Lead submission
//! reports success for every structurally valid request; CRM failures are
//! absorbed by the pipeline's fallback path.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::lead::{LeadPipeline, LeadRequest};
use crate::registry::{NormalizedCompany, RegistryClient, Resolution, TaxId};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    /// Raw user input; digits are extracted before validation
    pub inn: String,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub company: NormalizedCompany,
}

#[derive(Debug, Serialize)]
pub struct LeadAccepted {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

// ============================================================================
// State & Router
// ============================================================================

#[derive(Clone)]
pub struct ApiState {
    pub registry: Arc<RegistryClient>,
    pub pipeline: Arc<LeadPipeline>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/company/resolve", post(resolve_company))
        .route("/api/lead", post(submit_lead))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/company/resolve
async fn resolve_company(
    State(state): State<ApiState>,
    Json(request): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, (StatusCode, Json<ApiError>)> {
    let tax_id = TaxId::parse(&request.inn)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ApiError { error: e.to_string() })))?;

    match state.registry.resolve(&tax_id).await {
        Ok(Resolution::Found(company)) => Ok(Json(ResolveResponse { company })),
        Ok(Resolution::NotFound) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: "no registry record for this tax identifier".to_string(),
            }),
        )),
        Err(e) => {
            log_lookup_failure(&tax_id, &e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ApiError {
                    error: "registry lookup failed".to_string(),
                }),
            ))
        }
    }
}

/// POST /api/lead
async fn submit_lead(
    State(state): State<ApiState>,
    Json(lead): Json<LeadRequest>,
) -> Result<Json<LeadAccepted>, (StatusCode, Json<ApiError>)> {
    match state.pipeline.submit(&lead).await {
        // The end user always sees success for a valid lead; Delivered
        // vs. Recorded is an operational distinction.
        Ok(_outcome) => Ok(Json(LeadAccepted { ok: true })),
        Err(crate::error::SubmitError::Validation(e)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError { error: e.to_string() }),
        )),
        Err(e) => {
            tracing::error!(error = %e, "lead could not be delivered or recorded");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError {
                    error: "lead processing failed".to_string(),
                }),
            ))
        }
    }
}

fn log_lookup_failure(tax_id: &TaxId, error: &RegistryError) {
    match error {
        RegistryError::Upstream { status, body } => {
            tracing::warn!(inn = %tax_id, status, body = %body, "registry lookup failed upstream");
        }
        other => {
            tracing::warn!(inn = %tax_id, error = %other, "registry lookup failed");
        }
    }
}
