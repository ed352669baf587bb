use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use fridgeflow_core::{Plan, PlanError, PlanRequest, Planner};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        if err.is_client_error() {
            Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            }
        } else {
            tracing::error!("plan request failed: {err}");
            Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("LLM error: {err}"),
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "detail": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(planner: Planner) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/plan", post(make_plan))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(planner)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(planner: Planner, bind: &str, port: u16) -> Result<()> {
    let app = build_router(planner);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("fridgeflow serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("fridgeflow serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn make_plan(
    State(planner): State<Planner>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<Plan>, AppError> {
    let Json(request) = payload?;
    let plan = planner.plan(&request).await?;
    Ok(Json(plan))
}

async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = include_str!("../static/index.html");

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::test_util::lock_env;
    use fridgeflow_core::delegated::ClientFactory;
    use fridgeflow_core::{
        CompletionClient, CompletionRequest, DelegatedPlanner, LlmSettings, PlanError, Planner,
    };

    // -----------------------------------------------------------------------
    // Fixtures
    // -----------------------------------------------------------------------

    /// Completion client returning a fixed reply.
    struct FixedReply(&'static str);

    #[async_trait]
    impl CompletionClient for FixedReply {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, PlanError> {
            Ok(self.0.to_string())
        }
    }

    fn planner(key_env: &str, reply: &'static str) -> Planner {
        let factory: ClientFactory = Arc::new(
            move |_settings: &LlmSettings,
                  _key: String|
                  -> Result<Box<dyn CompletionClient>, PlanError> {
                Ok(Box::new(FixedReply(reply)))
            },
        );
        let settings = LlmSettings {
            api_key_env: key_env.to_string(),
            ..LlmSettings::default()
        };
        Planner::new(DelegatedPlanner::with_factory(settings, factory))
    }

    // -----------------------------------------------------------------------
    // HTTP helpers
    // -----------------------------------------------------------------------

    async fn post_plan(planner: Planner, body: serde_json::Value) -> axum::response::Response {
        let app = super::build_router(planner);
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/plan")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn get(planner: Planner, uri: &str) -> axum::response::Response {
        let app = super::build_router(planner);
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1_048_576)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_index_returns_html() {
        let resp = get(planner("FRIDGEFLOW_SRV_KEY_INDEX", "{}"), "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get("content-type")
            .expect("should have content-type header")
            .to_str()
            .unwrap();
        assert!(
            content_type.contains("text/html"),
            "content-type should contain text/html, got: {content_type}"
        );
        let bytes = axum::body::to_bytes(resp.into_body(), 1_048_576)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("/api/plan"));
        assert!(html.contains("start-timeline-btn"));
        assert!(html.contains("behind-btn"));
        assert!(html.contains("reset-btn"));
    }

    #[tokio::test]
    async fn test_healthz() {
        let resp = get(planner("FRIDGEFLOW_SRV_KEY_HEALTH", "{}"), "/healthz").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_heuristic_plan() {
        let resp = post_plan(
            planner("FRIDGEFLOW_SRV_KEY_HEURISTIC", "{}"),
            serde_json::json!({
                "ingredients": "2 eggs, spinach, tortillas",
                "time_limit_min": 20,
                "mode": "heuristic"
            }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["dish"], "Quick Egg Wraps");
        let steps = json["steps"].as_array().expect("steps should be an array");
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[5]["start_offset_sec"], 1140);
        assert!(json["substitutions"].is_array());
    }

    #[tokio::test]
    async fn test_defaults_apply_when_fields_omitted() {
        let resp = post_plan(
            planner("FRIDGEFLOW_SRV_KEY_DEFAULTS", "{}"),
            serde_json::json!({ "ingredients": "" }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["dish"], "Simple Weeknight Skillet");
        assert_eq!(json["steps"][5]["start_offset_sec"], 30 * 60 - 60);
    }

    #[tokio::test]
    async fn test_delegated_without_key_is_bad_request() {
        let _env = lock_env();
        let resp = post_plan(
            planner("FRIDGEFLOW_SRV_KEY_NEVER_SET", "{}"),
            serde_json::json!({ "ingredients": "egg", "mode": "llm" }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        let detail = json["detail"].as_str().expect("should have detail");
        assert!(
            detail.contains("FRIDGEFLOW_SRV_KEY_NEVER_SET"),
            "unexpected detail: {detail}"
        );
    }

    #[tokio::test]
    async fn test_delegated_invalid_reply_is_server_error() {
        let _env = lock_env();
        let key = "FRIDGEFLOW_SRV_KEY_INVALID";
        unsafe { std::env::set_var(key, "sk-test") };
        let resp = post_plan(
            planner(key, r#"{"dish":"X"}"#),
            serde_json::json!({ "ingredients": "egg", "mode": "delegated" }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(resp).await;
        assert!(json["detail"].as_str().unwrap().starts_with("LLM error:"));
    }

    #[tokio::test]
    async fn test_delegated_plan_passes_through() {
        let _env = lock_env();
        let key = "FRIDGEFLOW_SRV_KEY_OK";
        unsafe { std::env::set_var(key, "sk-test") };
        let resp = post_plan(
            planner(key, r#"{"dish":"X","steps":[]}"#),
            serde_json::json!({ "ingredients": "egg", "mode": "delegated" }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(
            json,
            serde_json::json!({"dish": "X", "steps": [], "substitutions": []})
        );
    }

    #[tokio::test]
    async fn test_unknown_mode_is_rejected() {
        let resp = post_plan(
            planner("FRIDGEFLOW_SRV_KEY_MODE", "{}"),
            serde_json::json!({ "ingredients": "egg", "mode": "psychic" }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(resp).await;
        let detail = json["detail"].as_str().expect("should have detail");
        assert!(detail.contains("psychic"), "unexpected detail: {detail}");
    }

    #[tokio::test]
    async fn test_missing_ingredients_is_json_error() {
        let resp = post_plan(
            planner("FRIDGEFLOW_SRV_KEY_MISSING_FIELD", "{}"),
            serde_json::json!({ "time_limit_min": 20 }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(resp).await;
        assert!(json["detail"].as_str().unwrap().contains("ingredients"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let app = super::build_router(planner("FRIDGEFLOW_SRV_KEY_MALFORMED", "{}"));
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/plan")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(json["detail"].is_string());
    }
}
