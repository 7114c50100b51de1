mod config;
mod error;
mod rate_limit;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::body::{Body, Bytes};
use axum::extract::rejection::BytesRejection;
use axum::extract::{ConnectInfo, DefaultBodyLimit, Json, Query, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use panel_agents::ShopAssistant;
use panel_core::{AgentInput, AgentOutput, Language};
use panel_observability::{AppMetrics, MetricsSnapshot};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use crate::config::ApiConfig;
pub use crate::error::ApiError;
pub use crate::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct ApiState {
    pub agent: Arc<ShopAssistant>,
    pub metrics: Arc<AppMetrics>,
    pub limiter: RateLimiter,
    pub trust_forwarded_for: bool,
}

impl ApiState {
    pub fn new(config: &ApiConfig) -> Self {
        let metrics = AppMetrics::shared();
        Self {
            agent: Arc::new(ShopAssistant::new(metrics.clone())),
            metrics,
            limiter: RateLimiter::new(config.rate_limit_window, config.rate_limit_max),
            trust_forwarded_for: config.trust_forwarded_for,
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: MetricsSnapshot,
}

#[derive(Debug, Deserialize)]
struct WelcomeQuery {
    language: Option<String>,
}

pub fn build_app(config: &ApiConfig) -> Router {
    build_router(ApiState::new(config), config)
}

pub fn build_router(state: ApiState, config: &ApiConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/chat/welcome", get(welcome))
        .layer(build_cors_layer(&config.allowed_origins))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}

pub async fn serve(config: ApiConfig) -> Result<()> {
    let app = build_app(&config);
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(
        bind = %config.bind,
        origins = config.allowed_origins.len(),
        "panel shop assistant api started"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

// The body is read and parsed by hand so that any bad payload, including an
// oversized one or a missing content type, surfaces as the generic server error.
async fn chat(
    State(state): State<ApiState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AgentOutput>, ApiError> {
    let result = async {
        let input: AgentInput = serde_json::from_slice(&body?)?;
        let output = state.agent.handle_chat(input).await?;
        Ok::<_, ApiError>(output)
    }
    .await;

    match result {
        Ok(output) => Ok(Json(output)),
        Err(error) => {
            state.metrics.inc_error();
            Err(error)
        }
    }
}

async fn welcome(
    State(state): State<ApiState>,
    Query(query): Query<WelcomeQuery>,
) -> impl IntoResponse {
    let language = Language::from_optional_str(query.language.as_deref()).unwrap_or_default();
    (StatusCode::OK, Json(state.agent.welcome(language)))
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();
    let origins = if origins.is_empty() {
        vec![HeaderValue::from_static("http://localhost:3000")]
    } else {
        origins
    };

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn rate_limit_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let client = client_key(&request, state.trust_forwarded_for);
    if !state.limiter.check(&client) {
        tracing::warn!(client = %client, "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "error": "rate_limited",
                "message": "rate limit exceeded for this IP"
            })),
        )
            .into_response();
    }

    next.run(request).await
}

fn client_key(request: &Request<Body>, trust_forwarded_for: bool) -> String {
    let forwarded = trust_forwarded_for
        .then(|| request.headers().get("x-forwarded-for"))
        .flatten()
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if let Some(forwarded) = forwarded {
        return forwarded.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(peer)| peer.ip().to_string())
        .unwrap_or_else(|| "local".to_string())
}

async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        header::HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );

    response
}
