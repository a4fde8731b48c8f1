//! HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    Form,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::calculator::DoseCalculator;
use crate::core::report::{self, ReportRow};
use crate::domain::model::DispenseRequest;
use crate::utils::error::{DoseError, ErrorCategory};
use crate::web::template::{render_page, Outcome};
use crate::config::AppConfig;

pub struct AppState {
    pub config: AppConfig,
    pub calculator: DoseCalculator,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let calculator = DoseCalculator::new(config.window_minutes());
        Self { config, calculator }
    }
}

pub type SharedState = Arc<AppState>;

/// JSON error body for the API routes.
pub struct ApiError(pub DoseError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.category() {
            ErrorCategory::Input => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCategory::Configuration | ErrorCategory::System => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = json!({
            "error": {
                "kind": self.0.kind(),
                "message": self.0.user_friendly_message(),
            }
        });
        (status, Json(body)).into_response()
    }
}

impl From<DoseError> for ApiError {
    fn from(err: DoseError) -> Self {
        Self(err)
    }
}

/// 健康檢查
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn index(State(state): State<SharedState>) -> Html<String> {
    Html(render_page(&state.config.default_request(), &Outcome::Empty))
}

pub async fn calculate_form(
    State(state): State<SharedState>,
    Form(request): Form<DispenseRequest>,
) -> Html<String> {
    let outcome = match state.calculator.evaluate_request(&request) {
        Ok(results) => {
            info!(nuclide = %request.nuclide, target = %request.target_time, "form calculation");
            Outcome::Report {
                volume_main: report::headline_volume(&results).unwrap_or_default(),
                text: report::render_text(&results),
            }
        }
        Err(e) => {
            warn!("form calculation rejected: {}", e);
            Outcome::Error(e.user_friendly_message())
        }
    };

    Html(render_page(&request, &outcome))
}

pub async fn calculate_api(
    State(state): State<SharedState>,
    payload: std::result::Result<Json<DispenseRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("api request body rejected: {}", rejection.body_text());
        DoseError::InvalidRequestBody {
            message: rejection.body_text(),
        }
    })?;
    let results = state.calculator.evaluate_request(&request).inspect_err(|e| {
        warn!("api calculation rejected: {}", e);
    })?;
    let rows: Vec<ReportRow<'_>> = results.iter().map(ReportRow::from).collect();

    Ok(Json(json!({
        "nuclide": request.nuclide,
        "volume_main_ml": report::headline_volume(&results),
        "results": rows,
    })))
}
