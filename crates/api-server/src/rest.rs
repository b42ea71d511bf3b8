//! REST API handlers for campaign creation, regeneration and reporting.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hyperlocal_core::types::{
    AnalyticsReport, ApiEnvelope, CampaignRequest, CampaignResponse, CampaignStatusReport,
};
use hyperlocal_core::validation;
use hyperlocal_core::HyperlocalError;
use hyperlocal_generator::{CampaignBackend, CampaignStore, ChannelOutputs};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn CampaignBackend>,
    pub store: CampaignStore,
    pub node_id: String,
    pub offer_max_chars: usize,
    pub start_time: Instant,
}

/// Body of `POST /v1/campaigns/:id/regenerate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateBody {
    #[serde(default)]
    pub previous_output: String,
    #[serde(default)]
    pub feedback: String,
    /// Overrides the request stored with the campaign.
    #[serde(default)]
    pub context: Option<CampaignRequest>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Error responses carry their own status code.
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    fn new(status: StatusCode, error: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error: error.to_string(),
                message: message.into(),
            },
        }
    }
}

impl From<HyperlocalError> for ApiError {
    fn from(e: HyperlocalError) -> Self {
        match e {
            HyperlocalError::Validation(v) => {
                ApiError::new(StatusCode::BAD_REQUEST, "invalid_campaign_request", v.to_string())
            }
            HyperlocalError::CampaignNotFound(id) => ApiError::new(
                StatusCode::NOT_FOUND,
                "campaign_not_found",
                format!("campaign {id} not found"),
            ),
            HyperlocalError::CampaignMismatch { .. } => {
                ApiError::new(StatusCode::CONFLICT, "campaign_mismatch", e.to_string())
            }
            other => {
                error!(error = %other, "campaign backend failure");
                metrics::counter!("api.errors").increment(1);
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "generation_failed",
                    "Internal processing error",
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// POST /v1/campaigns: Create a campaign from form input.
pub async fn handle_create_campaign(
    State(state): State<AppState>,
    Json(request): Json<CampaignRequest>,
) -> Result<Json<CampaignResponse>, ApiError> {
    if let Err(e) = validation::validate_request(&request, state.offer_max_chars) {
        warn!(error = %e, "campaign request validation failed");
        metrics::counter!("api.validation_errors").increment(1);
        return Err(HyperlocalError::from(e).into());
    }

    let response = state.backend.submit_campaign(&request).await?;
    metrics::counter!(
        "campaigns.created",
        "category" => request.product_category.code()
    )
    .increment(1);
    Ok(Json(response))
}

/// POST /v1/campaigns/:id/regenerate: Rewrite ad content using feedback.
pub async fn handle_regenerate(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
    Json(body): Json<RegenerateBody>,
) -> Result<Json<CampaignResponse>, ApiError> {
    let stored = state
        .store
        .get(&campaign_id)
        .ok_or_else(|| HyperlocalError::CampaignNotFound(campaign_id.clone()))?;
    let context = match body.context {
        Some(context) => {
            if let Err(e) = validation::validate_request(&context, state.offer_max_chars) {
                warn!(campaign_id = %campaign_id, error = %e, "regenerate context validation failed");
                metrics::counter!("api.validation_errors").increment(1);
                return Err(HyperlocalError::from(e).into());
            }
            context
        }
        None => stored.request,
    };

    let response = state
        .backend
        .regenerate_campaign(
            &campaign_id,
            &body.previous_output,
            &body.feedback,
            &context,
            &stored.response,
        )
        .await?;
    metrics::counter!("campaigns.regenerated").increment(1);
    Ok(Json(response))
}

/// GET /v1/campaigns/:id: Latest stored response for a campaign.
pub async fn handle_get_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<CampaignResponse>, ApiError> {
    let stored = state
        .store
        .get(&campaign_id)
        .ok_or(HyperlocalError::CampaignNotFound(campaign_id))?;
    Ok(Json(stored.response))
}

/// GET /v1/campaigns/:id/outputs: Poster, Instagram, WhatsApp and voice views.
pub async fn handle_outputs(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<ChannelOutputs>, ApiError> {
    let stored = state
        .store
        .get(&campaign_id)
        .ok_or(HyperlocalError::CampaignNotFound(campaign_id))?;
    Ok(Json(ChannelOutputs::from_response(
        &stored.response,
        &stored.request,
    )))
}

/// GET /v1/campaigns/:id/status: Mock delivery status.
pub async fn handle_status(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<ApiEnvelope<CampaignStatusReport>>, ApiError> {
    Ok(Json(state.backend.campaign_status(&campaign_id).await?))
}

/// GET /v1/campaigns/:id/analytics: Mock 30-day analytics.
pub async fn handle_analytics(
    State(state): State<AppState>,
    Path(campaign_id): Path<String>,
) -> Result<Json<ApiEnvelope<AnalyticsReport>>, ApiError> {
    Ok(Json(state.backend.campaign_analytics(&campaign_id).await?))
}

/// GET /health: Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        campaigns: state.store.len(),
    })
}

/// GET /ready: Readiness probe.
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /live: Liveness probe.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
    pub campaigns: usize,
}
