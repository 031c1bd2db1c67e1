// ============================================================
// Layer 1 — Web Presentation Layer
// ============================================================
// The intake form served over HTTP with axum.
//
//   GET  /            → empty form
//   POST /predict     → form submit, page re-rendered with the
//                       result (or the reason it was rejected)
//   POST /api/predict → same workflow, JSON in and out
//   GET  /health      → liveness
//
// Handlers only translate between HTTP and the RiskAssessor
// trait. The model is loaded before the listener is bound, so
// a server that is up always has a valid artifact.

pub mod form;

use std::{collections::BTreeMap, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;
use serde_json::json;

use crate::domain::error::RiskError;
use crate::domain::prediction::{PredictionResult, RiskLabel};
use crate::domain::raw::{RawAttributeSet, RawValue};
use crate::domain::traits::RiskAssessor;
use form::{render_page, Banner};

#[derive(Clone)]
pub struct AppState {
    pub assessor: Arc<dyn RiskAssessor>,
}

/// All routes, sharing one assessor. Built separately from `serve`
/// so tests can drive it without a socket.
pub fn router(assessor: Arc<dyn RiskAssessor>) -> Router {
    Router::new()
        .route("/", get(show_form))
        .route("/predict", post(submit_form))
        .route("/api/predict", post(predict_json))
        .route("/health", get(|| async { "ok" }))
        .with_state(AppState { assessor })
}

pub async fn serve(bind: &str, assessor: Arc<dyn RiskAssessor>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Cannot listen on '{bind}'"))?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(assessor))
        .await
        .context("HTTP server stopped unexpectedly")
}

/// HTTP status for each failure kind. Bad input is the caller's
/// problem; anything else means the deployment is broken.
fn status_for(err: &RiskError) -> StatusCode {
    match err {
        RiskError::InvalidInput { .. }   => StatusCode::UNPROCESSABLE_ENTITY,
        RiskError::SchemaMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        RiskError::Inference { .. }      => StatusCode::INTERNAL_SERVER_ERROR,
        RiskError::ArtifactLoad { .. }   => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn kind_of(err: &RiskError) -> &'static str {
    match err {
        RiskError::InvalidInput { .. }   => "invalid_input",
        RiskError::SchemaMismatch { .. } => "schema_mismatch",
        RiskError::Inference { .. }      => "inference",
        RiskError::ArtifactLoad { .. }   => "artifact_load",
    }
}

async fn show_form() -> Html<String> {
    Html(render_page(&RawAttributeSet::new(), None))
}

async fn submit_form(
    State(state): State<AppState>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> Response {
    let raw: RawAttributeSet = fields
        .into_iter()
        .map(|(k, v)| (k, RawValue::Text(v)))
        .collect();

    match state.assessor.assess(&raw) {
        Ok(result) => Html(render_page(&raw, Some(&Banner::Result(result)))).into_response(),
        Err(err) => {
            let status = status_for(&err);
            let message = if err.is_user_error() {
                err.to_string()
            } else {
                "The service cannot score this submission right now.".to_string()
            };
            (status, Html(render_page(&raw, Some(&Banner::Error(message))))).into_response()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiPrediction {
    pub label:       RiskLabel,
    pub at_risk:     bool,
    pub probability: f64,
    pub confidence:  f64,
    pub message:     String,
}

impl From<PredictionResult> for ApiPrediction {
    fn from(r: PredictionResult) -> Self {
        Self {
            label:       r.label,
            at_risk:     r.at_risk(),
            probability: r.probability,
            confidence:  r.confidence(),
            message:     r.message(),
        }
    }
}

/// A body that is not a JSON object of attribute values never
/// reaches the assessor, but still answers in the API's error shape.
fn rejected_body(rejection: JsonRejection) -> Response {
    let message = rejection.body_text();
    tracing::warn!("Rejected request body: {message}");
    let body = json!({ "error": "invalid_input", "message": message });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
}

async fn predict_json(
    State(state): State<AppState>,
    payload: Result<Json<RawAttributeSet>, JsonRejection>,
) -> Response {
    let raw = match payload {
        Ok(Json(raw)) => raw,
        Err(rejection) => return rejected_body(rejection),
    };
    match state.assessor.assess(&raw) {
        Ok(result) => Json(ApiPrediction::from(result)).into_response(),
        Err(err) => {
            let body = json!({ "error": kind_of(&err), "message": err.to_string() });
            (status_for(&err), Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attributes::{keys, PatientAttributes};
    use crate::domain::error::RiskResult;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    /// Validates like the real thing, then says "at risk" for smokers.
    struct SmokerRule;

    impl RiskAssessor for SmokerRule {
        fn assess(&self, raw: &RawAttributeSet) -> RiskResult<PredictionResult> {
            let attrs = PatientAttributes::try_from(raw)?;
            let p = if attrs.smoking.indicator() == 1.0 { 0.8 } else { 0.3 };
            Ok(PredictionResult::from_probability(p))
        }
    }

    /// Stands in for a model packaged against the wrong columns.
    struct Broken;

    impl RiskAssessor for Broken {
        fn assess(&self, _: &RawAttributeSet) -> RiskResult<PredictionResult> {
            Err(RiskError::SchemaMismatch { expected: 37, actual: 36, detail: "test".into() })
        }
    }

    fn app() -> Router {
        router(Arc::new(SmokerRule))
    }

    fn form_body(overrides: &[(&str, &str)]) -> String {
        let mut pairs: BTreeMap<String, String> = BTreeMap::new();
        let defaults = serde_json::to_value(RawAttributeSet::from(&PatientAttributes::default())).unwrap();
        for (k, v) in defaults.as_object().unwrap() {
            let text = match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            pairs.insert(k.clone(), text);
        }
        for (k, v) in overrides {
            pairs.insert(k.to_string(), v.to_string());
        }
        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v.replace(' ', "+").replace(',', "%2C").replace('/', "%2F")))
            .collect::<Vec<_>>()
            .join("&")
    }

    async fn body_text(resp: Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_form(body: String) -> Request<Body> {
        Request::post("/predict")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_form() {
        let resp = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("Patient Information"));
    }

    #[tokio::test]
    async fn test_form_submit_renders_result() {
        let resp = app()
            .oneshot(post_form(form_body(&[(keys::SMOKING, "yes"), (keys::GEN_HEALTH, "very good")])))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let page = body_text(resp).await;
        assert!(page.contains("Patient is AT RISK of heart disease. Confidence: 0.80"));
        assert!(page.contains("<option value=\"very good\" selected>"));
    }

    #[tokio::test]
    async fn test_form_submit_with_bad_value_is_422() {
        let resp = app()
            .oneshot(post_form(form_body(&[(keys::SMOKING, "maybe")])))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(resp).await.contains("smoking"));
    }

    #[tokio::test]
    async fn test_json_api() {
        let raw = RawAttributeSet::from(&PatientAttributes::default());
        let req = Request::post("/api/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&raw).unwrap()))
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let v: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(v["label"], "not_at_risk");
        assert_eq!(v["at_risk"], false);
        assert!((v["confidence"].as_f64().unwrap() - 0.7).abs() < 1e-9);
    }

    fn post_json(body: String) -> Request<Body> {
        Request::post("/api/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_boolean_value_is_invalid_input() {
        let mut body = serde_json::to_value(RawAttributeSet::from(&PatientAttributes::default())).unwrap();
        body[keys::SMOKING] = serde_json::Value::Bool(true);
        let resp = app().oneshot(post_json(body.to_string())).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let v: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(v["error"], "invalid_input");
        assert!(v["message"].as_str().unwrap().contains("smoking"));
    }

    #[tokio::test]
    async fn test_malformed_json_body_keeps_error_shape() {
        for body in ["[1, 2]", "{\"bmi\": "] {
            let resp = app().oneshot(post_json(body.to_string())).await.unwrap();
            assert!(resp.status().is_client_error(), "{body}");
            let v: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
            assert_eq!(v["error"], "invalid_input");
        }
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_500_and_hides_detail() {
        let resp = router(Arc::new(Broken))
            .oneshot(post_form(form_body(&[])))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body_text(resp).await.contains("schema mismatch"));
    }

    #[tokio::test]
    async fn test_health() {
        let resp = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_text(resp).await, "ok");
    }
}
