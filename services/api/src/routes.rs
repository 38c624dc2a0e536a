use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use subsidy_companion::programs::catalog::{CompanionService, ProgramSource};
use subsidy_companion::programs::eligibility::{
    assemble_pack, evaluate, EligibilityAnswers, EligibilityView, ExportDispatcher, SubmissionPack,
};
use subsidy_companion::programs::practices::PracticeCatalog;
use subsidy_companion::programs::program_router;

#[derive(Debug, Deserialize)]
pub(crate) struct EligibilityCheckRequest {
    #[serde(flatten)]
    pub(crate) answers: EligibilityAnswers,
    #[serde(default)]
    pub(crate) include_pack: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct EligibilityCheckResponse {
    pub(crate) answers_complete: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) missing: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) result: Option<EligibilityView>,
    pub(crate) plan_actions_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) pack: Option<SubmissionPack>,
}

pub(crate) fn with_companion_routes<S, D>(service: Arc<CompanionService<S, D>>) -> axum::Router
where
    S: ProgramSource + 'static,
    D: ExportDispatcher + 'static,
{
    program_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/eligibility/check",
            axum::routing::post(eligibility_check_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Screening never fails, so the endpoint always answers 200. Incomplete
/// answers come back with the missing labels instead of a result.
pub(crate) async fn eligibility_check_endpoint(
    Json(payload): Json<EligibilityCheckRequest>,
) -> Json<EligibilityCheckResponse> {
    let EligibilityCheckRequest {
        answers,
        include_pack,
    } = payload;

    let missing = answers.missing();
    let evaluation = evaluate(&answers);
    let pack = match (&evaluation, include_pack) {
        (Some(result), true) => Some(assemble_pack(&answers, result, &PracticeCatalog::standard())),
        _ => None,
    };

    Json(EligibilityCheckResponse {
        answers_complete: missing.is_empty(),
        missing,
        plan_actions_enabled: answers.plan_actions_enabled(),
        result: evaluation.map(|result| result.to_view()),
        pack,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core_answers(location: &str) -> EligibilityAnswers {
        EligibilityAnswers {
            operation: "Row crops".to_string(),
            scale: "320 acres".to_string(),
            location: location.to_string(),
            practice: "cover crops".to_string(),
            ..EligibilityAnswers::default()
        }
    }

    #[tokio::test]
    async fn eligibility_check_reports_missing_answers() {
        let request = EligibilityCheckRequest {
            answers: EligibilityAnswers::default(),
            include_pack: true,
        };

        let Json(body) = eligibility_check_endpoint(Json(request)).await;

        assert!(!body.answers_complete);
        assert_eq!(
            body.missing,
            vec!["Operation type", "Operation scale", "Location", "Planned practice"]
        );
        assert!(body.result.is_none());
        assert!(body.pack.is_none());
    }

    #[tokio::test]
    async fn eligibility_check_returns_result_and_pack() {
        let request = EligibilityCheckRequest {
            answers: core_answers("us-iowa"),
            include_pack: true,
        };

        let Json(body) = eligibility_check_endpoint(Json(request)).await;

        assert!(body.answers_complete);
        let result = body.result.expect("screen result");
        assert_eq!(
            result.program,
            "Environmental Quality Incentives Program (EQIP)"
        );
        assert_eq!(result.next_date, "November 15, 2024");
        assert_eq!(result.eligible_label, "Likely");
        let pack = body.pack.expect("pack assembled");
        assert_eq!(pack.practice_name, "Cover Crops");
        assert!(!body.plan_actions_enabled);
    }

    #[tokio::test]
    async fn eligibility_check_omits_pack_unless_requested() {
        let request = EligibilityCheckRequest {
            answers: core_answers("canada-alberta"),
            include_pack: false,
        };

        let Json(body) = eligibility_check_endpoint(Json(request)).await;

        let result = body.result.expect("screen result");
        assert_eq!(
            result.program,
            "Canadian Agricultural Partnership (CAP) - AgriInvest"
        );
        assert!(body.pack.is_none());
    }
}
