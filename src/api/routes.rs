//! Route handlers

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{Method, StatusCode, header},
    routing::{delete, get},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::{MonthlySummary, Spending, SpendingDraft, SpendingId};

use super::{ApiError, ApiResult, AppState};

/// Build the application router.
pub fn create_router(state: AppState, enable_cors: bool) -> Router {
    let mut router = Router::new()
        .route("/spending", get(list_spending).post(create_spending))
        .route("/spending/", get(list_spending).post(create_spending))
        .route("/spending/:id", delete(delete_spending))
        .route("/summary/monthly", get(monthly_summary))
        .route("/ping", get(ping))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    router
}

/// POST /spending/ - Record a new entry
async fn create_spending(
    State(state): State<AppState>,
    payload: Result<Json<SpendingDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Spending>)> {
    let Json(draft) = payload?;
    let spending = state.service.create_from_draft(&draft).await?;
    Ok((StatusCode::CREATED, Json(spending)))
}

/// GET /spending/ - All entries, oldest first
async fn list_spending(State(state): State<AppState>) -> ApiResult<Json<Vec<Spending>>> {
    Ok(Json(state.service.list_spending().await?))
}

/// DELETE /spending/:id - Remove one entry
async fn delete_spending(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<String> {
    let id = parse_id(&raw_id)?;
    state.service.delete_spending(id).await?;
    Ok(format!("Deleted spending {}", id))
}

/// GET /summary/monthly - Totals per calendar month
async fn monthly_summary(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<MonthlySummary>>> {
    Ok(Json(state.service.monthly_summary().await?))
}

/// GET /ping - Liveness probe
async fn ping(State(state): State<AppState>) -> String {
    format!("pong from {}", state.instance_name)
}

fn parse_id(raw: &str) -> Result<SpendingId, ApiError> {
    match raw.parse::<SpendingId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::BadRequest(format!("Invalid spending id: {}", raw))),
    }
}
