use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::catalog::{CatalogQuery, CompanionService, ProgramSource};
use super::domain::SortKey;
use super::eligibility::pack::{ExportDispatcher, ExportError, PackExportRequest};

/// Router builder exposing the catalog read endpoints and the pack export.
pub fn program_router<S, D>(service: Arc<CompanionService<S, D>>) -> Router
where
    S: ProgramSource + 'static,
    D: ExportDispatcher + 'static,
{
    Router::new()
        .route("/api/programs/enhanced", get(enhanced_handler::<S, D>))
        .route(
            "/api/programs/deadlines-soon",
            get(deadlines_soon_handler::<S, D>),
        )
        .route("/api/programs/stats", get(stats_handler::<S, D>))
        .route(
            "/api/programs/high-priority",
            get(high_priority_handler::<S, D>),
        )
        .route("/api/v1/pack/export", post(export_handler::<S, D>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BrowseParams {
    search: Option<String>,
    country: Option<String>,
    sort: Option<SortKey>,
}

impl BrowseParams {
    fn is_untouched(&self) -> bool {
        self.search.is_none() && self.country.is_none() && self.sort.is_none()
    }

    fn into_query(self) -> CatalogQuery {
        CatalogQuery {
            search: self.search.unwrap_or_default(),
            country: self.country,
            sort: self.sort.unwrap_or_default(),
        }
    }
}

/// Without query parameters this passes the upstream payload through
/// untouched; any parameter engages the filter/sort pipeline.
pub(crate) async fn enhanced_handler<S, D>(
    State(service): State<Arc<CompanionService<S, D>>>,
    Query(params): Query<BrowseParams>,
) -> Response
where
    S: ProgramSource + 'static,
    D: ExportDispatcher + 'static,
{
    let now = Utc::now();
    if params.is_untouched() {
        return axum::Json(service.programs(now)).into_response();
    }

    let query = params.into_query();
    axum::Json(service.browse(&query, now)).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DeadlineParams {
    days: Option<u32>,
}

pub(crate) async fn deadlines_soon_handler<S, D>(
    State(service): State<Arc<CompanionService<S, D>>>,
    Query(params): Query<DeadlineParams>,
) -> Response
where
    S: ProgramSource + 'static,
    D: ExportDispatcher + 'static,
{
    let days = params.days.unwrap_or(30);
    axum::Json(service.deadlines_soon(days, Utc::now())).into_response()
}

pub(crate) async fn stats_handler<S, D>(
    State(service): State<Arc<CompanionService<S, D>>>,
) -> Response
where
    S: ProgramSource + 'static,
    D: ExportDispatcher + 'static,
{
    axum::Json(service.stats(Utc::now())).into_response()
}

pub(crate) async fn high_priority_handler<S, D>(
    State(service): State<Arc<CompanionService<S, D>>>,
) -> Response
where
    S: ProgramSource + 'static,
    D: ExportDispatcher + 'static,
{
    axum::Json(service.high_priority(Utc::now())).into_response()
}

pub(crate) async fn export_handler<S, D>(
    State(service): State<Arc<CompanionService<S, D>>>,
    axum::Json(request): axum::Json<PackExportRequest>,
) -> Response
where
    S: ProgramSource + 'static,
    D: ExportDispatcher + 'static,
{
    match service.export(request) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(error @ ExportError::InvalidContact { .. }) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
