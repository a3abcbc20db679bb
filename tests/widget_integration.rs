use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Bytes,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use mindbuddy::config::{AppConfig, LlmConfig, ServerConfig, WidgetConfig};
use mindbuddy::responder::crisis::SAFE_REPLY;
use mindbuddy::server::{build_router, build_state};
use mindbuddy::widget::{
    CONNECTION_ERROR_TEXT, ChatView, ChatWidget, EventLoop, HttpTransport, Key, KeyEvent, Message,
    TranscriptView,
};
use serde_json::{Value, json};

/// Request body and content type seen by the mock endpoint.
type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/chat")
}

async fn spawn_mock(status: StatusCode, body: &'static str) -> (String, Seen) {
    let seen: Seen = Arc::default();
    let recorded = seen.clone();
    let app = Router::new().route(
        "/chat",
        post(move |headers: HeaderMap, req: Bytes| {
            let recorded = recorded.clone();
            async move {
                let content_type = headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                let body_json = serde_json::from_slice(&req).unwrap_or(Value::Null);
                recorded.lock().unwrap().push((content_type, body_json));
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        }),
    );
    (serve(app).await, seen)
}

fn widget_for(endpoint: &str) -> ChatWidget<TranscriptView> {
    let transport = HttpTransport::new(endpoint).unwrap();
    ChatWidget::new(TranscriptView::new(), Arc::new(transport))
}

async fn say(widget: &mut ChatWidget<TranscriptView>, text: &str) {
    widget.view_mut().set_input(text);
    widget.submit().await;
}

#[tokio::test]
async fn test_reply_renders_after_user_message() {
    let (endpoint, seen) =
        spawn_mock(StatusCode::OK, r#"{"answer":"Great to hear!","crisis":false}"#).await;
    let mut widget = widget_for(&endpoint);

    say(&mut widget, "I feel great").await;

    assert_eq!(
        widget.view().transcript().as_slice(),
        &[
            Message::user("I feel great"),
            Message::bot("Great to hear!", false)
        ]
    );
    assert!(widget.view().typing().is_empty());
    assert_eq!(widget.view().input_value(), "");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0.as_deref(), Some("application/json"));
    assert_eq!(seen[0].1, json!({ "message": "I feel great" }));
}

#[tokio::test]
async fn test_flagged_reply() {
    let (endpoint, _) = spawn_mock(
        StatusCode::OK,
        r#"{"answer":"Please reach out to someone now.","crisis":true}"#,
    )
    .await;
    let mut widget = widget_for(&endpoint);

    say(&mut widget, "I can't go on").await;

    assert_eq!(
        widget.view().transcript().last(),
        Some(&Message::bot("Please reach out to someone now.", true))
    );
}

#[tokio::test]
async fn test_server_error_shows_connection_text() {
    let (endpoint, _) = spawn_mock(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#).await;
    let mut widget = widget_for(&endpoint);

    say(&mut widget, "hello").await;

    assert_eq!(
        widget.view().transcript().as_slice(),
        &[
            Message::user("hello"),
            Message::bot(CONNECTION_ERROR_TEXT, false)
        ]
    );
}

#[tokio::test]
async fn test_non_json_reply_shows_connection_text() {
    let (endpoint, _) = spawn_mock(StatusCode::OK, "<html>maintenance</html>").await;
    let mut widget = widget_for(&endpoint);

    say(&mut widget, "hello").await;

    assert_eq!(
        widget.view().transcript().last(),
        Some(&Message::bot(CONNECTION_ERROR_TEXT, false))
    );
    assert!(widget.view().typing().is_empty());
}

#[tokio::test]
async fn test_unreachable_endpoint_shows_connection_text() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut widget = widget_for(&format!("http://{addr}/chat"));

    say(&mut widget, "anyone there?").await;

    assert_eq!(
        widget.view().transcript().as_slice(),
        &[
            Message::user("anyone there?"),
            Message::bot(CONNECTION_ERROR_TEXT, false)
        ]
    );
}

#[tokio::test]
async fn test_event_loop_against_reply_service() {
    let config = AppConfig {
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
            static_dir: "static".to_string(),
            request_timeout_secs: 5,
        },
        widget: WidgetConfig {
            endpoint: String::new(),
            one_pending: false,
        },
        llm: LlmConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            model: "test-model".to_string(),
            api_key: None,
            max_tokens: 300,
            temperature: 0.7,
        },
    };
    let endpoint = serve(build_router(build_state(Arc::new(config)))).await;

    let event_loop = EventLoop::new(widget_for(&endpoint));
    let tx = event_loop.sender();
    tx.input("I want to die");
    tx.key(KeyEvent::plain(Key::Enter));
    tx.shutdown();

    let widget = event_loop.run().await;
    assert_eq!(
        widget.view().transcript().as_slice(),
        &[
            Message::user("I want to die"),
            Message::bot(SAFE_REPLY, true)
        ]
    );
}
