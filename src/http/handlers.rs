//! Endpoint handlers.

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::catalog::Category;
use crate::http::response::ApiResponse;
use crate::http::server::AppState;
use crate::reports::custom::FieldErrors;
use crate::reports::{self, ReportRequest};

/// GET /api/health — unauthenticated liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "service": "Economic Data API",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
        "authentication": "Bearer token (JWT)",
    }))
}

/// GET /api/economic-indicators
pub async fn economic_indicators(State(state): State<AppState>) -> ApiResponse {
    category(&state, Category::EconomicIndicator).await
}

/// GET /api/interest-rates
pub async fn interest_rates(State(state): State<AppState>) -> ApiResponse {
    category(&state, Category::InterestRate).await
}

/// GET /api/market-indicators
pub async fn market_indicators(State(state): State<AppState>) -> ApiResponse {
    category(&state, Category::MarketIndicator).await
}

async fn category(state: &AppState, category: Category) -> ApiResponse {
    let report = reports::category_report(&state.client, &state.cache, category).await;
    ApiResponse::ok(category.success_message(), report)
}

/// GET /api/custom-report/available-indicators
pub async fn available_indicators() -> ApiResponse {
    ApiResponse::ok(
        "Available indicators retrieved successfully",
        reports::available_indicators(),
    )
}

/// POST /api/custom-report
///
/// The body is extracted as a Result so malformed JSON surfaces as a
/// 422 validation envelope rather than axum's default 400.
pub async fn generate_custom_report(
    State(state): State<AppState>,
    body: Result<Json<ReportRequest>, JsonRejection>,
) -> ApiResponse {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected unparseable report request body");
            let mut errors = FieldErrors::new();
            errors.insert(
                "request".to_string(),
                vec!["The request body must be valid JSON.".to_string()],
            );
            return ApiResponse::validation_error(errors);
        }
    };

    match reports::validate_request(&request) {
        Ok(validated) => {
            let report = reports::custom_report(&state.client, &validated).await;
            ApiResponse::ok("Custom report generated successfully", report)
        }
        Err(errors) => ApiResponse::validation_error(errors),
    }
}

/// Fallback for unmatched paths.
pub async fn not_found() -> ApiResponse {
    ApiResponse::not_found()
}
