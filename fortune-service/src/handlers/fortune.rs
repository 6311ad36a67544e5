use crate::models::{FortuneRequest, FortuneResponse};
use crate::services::metrics;
use crate::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// `POST /api/fortune`
///
/// Any model failure becomes a 500 with `{error, details}`.
pub async fn create_fortune(
    State(state): State<AppState>,
    Json(req): Json<FortuneRequest>,
) -> Result<Json<FortuneResponse>, AppError> {
    tracing::info!(
        fortune_type = %req.fortune_type,
        gender = req.gender.as_str(),
        has_question = req.custom_question().is_some(),
        "Fortune requested"
    );

    match state.fortune.generate(&req).await {
        Ok(fortune) => {
            metrics::record_fortune_request("success");
            Ok(Json(FortuneResponse { fortune }))
        }
        Err(e) => {
            metrics::record_fortune_request("error");
            Err(AppError::GenerationFailed(e.to_string()))
        }
    }
}
