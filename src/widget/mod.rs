//! Chat widget: transcript rendering and one request per submission.
//!
//! # Architecture
//!
//! - [`ChatWidget`]: submission logic over an injected view and transport
//! - [`view`]: the host surface ([`ChatView`]) plus an in-memory rendition
//! - [`transport`]: the outbound JSON request ([`ChatTransport`])
//! - [`keys`]: Enter-to-send binding
//! - [`event_loop`]: single-task dispatcher that owns the widget
//!
//! A submission runs `Idle → AwaitingReply → Idle`. [`ChatWidget::begin_submit`]
//! performs everything up to the request and returns a [`PendingTurn`];
//! [`ChatWidget::finish_submit`] renders the outcome. Every turn that begins
//! ends with exactly one bot message.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mindbuddy::widget::{ChatView, ChatWidget, HttpTransport, TranscriptView};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Arc::new(HttpTransport::new("http://127.0.0.1:5000/chat")?);
//! let mut widget = ChatWidget::new(TranscriptView::new(), transport);
//! widget.view_mut().set_input("hello");
//! widget.submit().await;
//! # Ok(())
//! # }
//! ```

pub mod event_loop;
pub mod keys;
pub mod message;
pub mod transport;
pub mod view;

use std::sync::Arc;

pub use event_loop::{EventLoop, EventSender, WidgetEvent};
pub use keys::{Key, KeyAction, KeyEvent, Modifiers};
pub use message::{Message, Role, Transcript};
pub use transport::{
    CONNECTION_ERROR_TEXT, ChatReply, ChatRequest, ChatTransport, HttpTransport, TransportError,
    send_isolated,
};
pub use view::{ChatView, PlaceholderId, TranscriptView};

/// Whether a new submission may start while another is awaiting its reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPolicy {
    /// Every submission proceeds; replies render in arrival order.
    #[default]
    Overlapping,
    /// Submissions are refused until the pending reply has rendered.
    OnePending,
}

/// Identifier of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnId(pub u64);

/// A submission whose reply has not been rendered yet.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingTurn {
    id: TurnId,
    text: String,
    placeholder: PlaceholderId,
}

impl PendingTurn {
    #[must_use]
    pub fn id(&self) -> TurnId {
        self.id
    }

    /// Trimmed text that was submitted.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn placeholder(&self) -> PlaceholderId {
        self.placeholder
    }
}

/// Result of dispatching a key press to the widget.
#[derive(Debug)]
pub struct KeyOutcome {
    /// The host must suppress the key's default action.
    pub prevent_default: bool,
    /// Set when the key started a submission.
    pub turn: Option<PendingTurn>,
}

/// Chat widget bound to one view and one transport.
#[derive(Debug)]
pub struct ChatWidget<V> {
    view: V,
    transport: Arc<dyn ChatTransport>,
    policy: SubmitPolicy,
    pending: usize,
    next_turn: u64,
}

impl<V: ChatView> ChatWidget<V> {
    pub fn new(view: V, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            view,
            transport,
            policy: SubmitPolicy::default(),
            pending: 0,
            next_turn: 0,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SubmitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Shared handle to the transport, for issuing a pending turn's request.
    pub fn transport(&self) -> Arc<dyn ChatTransport> {
        Arc::clone(&self.transport)
    }

    /// Number of submissions awaiting a reply.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Start a submission from the current input value.
    ///
    /// Appends the user message, clears the input and shows a typing
    /// placeholder. Returns `None` without touching the view when the
    /// trimmed input is empty, or when [`SubmitPolicy::OnePending`] is in
    /// effect and a reply is outstanding.
    pub fn begin_submit(&mut self) -> Option<PendingTurn> {
        let raw = self.view.input_value();
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        if self.policy == SubmitPolicy::OnePending && self.pending > 0 {
            tracing::debug!(pending = self.pending, "Submission refused, reply pending");
            return None;
        }

        let text = text.to_string();
        self.view.append_message(&Message::user(text.clone()));
        self.view.clear_input();
        let placeholder = self.view.show_typing();

        let id = TurnId(self.next_turn);
        self.next_turn += 1;
        self.pending += 1;

        tracing::debug!(turn = id.0, length = text.len(), "Submission started");

        Some(PendingTurn {
            id,
            text,
            placeholder,
        })
    }

    /// Render the outcome of a pending turn.
    pub fn finish_submit(&mut self, turn: PendingTurn, result: Result<ChatReply, TransportError>) {
        self.view.remove_typing(turn.placeholder);
        self.pending = self.pending.saturating_sub(1);

        let message = match result {
            Ok(reply) => {
                let flagged = reply.is_flagged();
                tracing::debug!(turn = turn.id.0, flagged, "Reply received");
                Message::bot(reply.answer, flagged)
            }
            Err(e) => {
                tracing::warn!(turn = turn.id.0, error = %e, "Chat request failed");
                Message::bot(CONNECTION_ERROR_TEXT, false)
            }
        };
        self.view.append_message(&message);
    }

    /// Submit the current input and render the reply in one step.
    pub async fn submit(&mut self) {
        let Some(turn) = self.begin_submit() else {
            return;
        };
        let result = send_isolated(self.transport(), turn.text().to_string()).await;
        self.finish_submit(turn, result);
    }

    /// Apply the Enter binding to a key press.
    pub fn on_key(&mut self, event: KeyEvent) -> KeyOutcome {
        let action = keys::action_for(event);
        let turn = match action {
            KeyAction::Submit => self.begin_submit(),
            KeyAction::Ignore => None,
        };
        KeyOutcome {
            prevent_default: action.prevents_default(),
            turn,
        }
    }
}
