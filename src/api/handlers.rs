use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{debug, info, warn};

use crate::engine::BirthQuery;

use super::AppState;
use super::models::{AnalyzeRequest, AnalyzeResponse, ErrorResponse, HealthResponse};

fn bad_request(error: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!("rejected analyze body: {}", rejection.body_text());
        bad_request(rejection.body_text())
    })?;

    let query = BirthQuery::from(payload);
    info!(
        "analyze {} {} at {}, {} ({})",
        query.date,
        query.time,
        query.latitude,
        query.longitude,
        query.mode.as_str()
    );

    let analysis = state.engine.analyze(&query).await.map_err(|e| {
        warn!("chart failed: {e}");
        bad_request(e.to_string())
    })?;

    debug!("roast: {}", analysis.roast_message);
    info!("analyze done with {}", analysis.engine);
    Ok(Json(AnalyzeResponse::from(analysis)))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "route not found".to_string(),
        }),
    )
        .into_response()
}
