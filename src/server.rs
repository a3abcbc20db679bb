use axum::{
    Json, Router,
    body::Bytes,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::info;

use crate::AppState;
use crate::config::AppConfig;
use crate::llm::ChatCompletionsClient;
use crate::responder::{EMPTY_MESSAGE_REPLY, Reply, Responder, knowledge::KnowledgeBase};
use crate::ui;
use crate::widget::ChatRequest;

/// Path the page's widget posts to.
pub const CHAT_PATH: &str = "/chat";

/// Assemble shared state from configuration.
pub fn build_state(config: Arc<AppConfig>) -> AppState {
    let llm = config.llm.settings().map(|settings| {
        info!(
            name: "llm.config.loaded",
            base_url = %settings.base_url,
            model = %settings.model,
            "LLM fallback enabled"
        );
        ChatCompletionsClient::new(settings)
    });
    if llm.is_none() {
        info!("No LLM API key configured, LLM fallback disabled");
    }

    AppState {
        responder: Arc::new(Responder::new(KnowledgeBase::default(), llm)),
        config,
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let timeout_duration = Duration::from_secs(state.config.server.request_timeout_secs);
    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        .route("/", get(index_handler))
        .route(CHAT_PATH, post(chat_handler))
        .route("/health", get(health_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match tokio::time::timeout(timeout_duration, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(build_state(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - Chat page.
async fn index_handler() -> Html<String> {
    Html(ui::index_page(CHAT_PATH))
}

/// GET /health - Liveness probe.
async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// POST /chat - Answer one message.
///
/// A missing or unparseable body counts as an empty message.
async fn chat_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<Reply>) {
    let req: ChatRequest = serde_json::from_slice(&body).unwrap_or_default();
    let message = req.message.trim();
    let request_id = uuid::Uuid::new_v4().to_string();

    if message.is_empty() {
        tracing::debug!(request_id = %request_id, "Rejected empty chat message");
        return (
            StatusCode::BAD_REQUEST,
            Json(Reply::new(EMPTY_MESSAGE_REPLY, false)),
        );
    }

    tracing::info!(
        request_id = %request_id,
        message_length = message.len(),
        "Received chat request"
    );

    let (reply, source) = state.responder.respond(message).await;

    tracing::info!(
        request_id = %request_id,
        source = source.as_str(),
        crisis = reply.crisis,
        answer_length = reply.answer.len(),
        "Chat reply sent"
    );

    (StatusCode::OK, Json(reply))
}
