use axum::{extract::State, Json};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::recommend::models::{RecommendationRequest, RecommendationResponse};
use crate::state::AppState;

/// POST /recommendations/jobs
///
/// Ranks the request's job postings for the given worker profile. Internal
/// ranking failures never surface here — the engine degrades to its
/// fallback matcher and still answers.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        worker = %request.worker_profile.id,
        jobs = request.job_postings.len(),
        "processing recommendation request"
    );

    let response = state.engine.recommend(&request)?;

    info!(
        %request_id,
        ranked = response.ranked_job_ids.len(),
        method = ?response.method,
        "recommendation complete"
    );
    Ok(Json(response))
}
