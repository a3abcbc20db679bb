//! Single-task dispatcher that owns a [`ChatWidget`].
//!
//! The view is only ever touched from [`EventLoop::run`]. Host input arrives
//! as [`WidgetEvent`]s through an [`EventSender`]; each submission's request
//! runs on its own spawned task and reports back on a completion channel
//! private to the loop.

use tokio::sync::mpsc;

use super::{
    ChatReply, ChatView, ChatWidget, KeyEvent, PendingTurn, TransportError, send_isolated,
};

/// Input to the event loop.
#[derive(Debug)]
pub enum WidgetEvent {
    /// The host changed the input field value.
    Input(String),
    /// The host saw a key press in the input field.
    Key(KeyEvent),
    /// Stop once no reply is outstanding.
    Shutdown,
}

/// Cloneable handle for feeding events into a running loop.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<WidgetEvent>,
}

impl EventSender {
    /// Queue an event. Returns `false` if the loop has already exited.
    pub fn send(&self, event: WidgetEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn input(&self, value: impl Into<String>) -> bool {
        self.send(WidgetEvent::Input(value.into()))
    }

    pub fn key(&self, event: KeyEvent) -> bool {
        self.send(WidgetEvent::Key(event))
    }

    pub fn shutdown(&self) -> bool {
        self.send(WidgetEvent::Shutdown)
    }
}

/// Outcome of one request task.
type Completion = (PendingTurn, Result<ChatReply, TransportError>);

/// Event loop around one widget.
#[derive(Debug)]
pub struct EventLoop<V> {
    widget: ChatWidget<V>,
    tx: mpsc::UnboundedSender<WidgetEvent>,
    rx: mpsc::UnboundedReceiver<WidgetEvent>,
}

impl<V: ChatView> EventLoop<V> {
    pub fn new(widget: ChatWidget<V>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { widget, tx, rx }
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    /// Process events until every pending reply has rendered and either
    /// [`WidgetEvent::Shutdown`] was seen or all senders were dropped, then
    /// hand the widget back.
    pub async fn run(self) -> ChatWidget<V> {
        let Self {
            mut widget,
            tx,
            mut rx,
        } = self;
        // Only host senders keep the event channel open from here on.
        drop(tx);

        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
        let mut shutting_down = false;
        let mut events_open = true;

        loop {
            if (shutting_down || !events_open) && widget.pending() == 0 {
                break;
            }

            tokio::select! {
                event = rx.recv(), if events_open => match event {
                    Some(WidgetEvent::Input(value)) => widget.view_mut().set_input(&value),
                    Some(WidgetEvent::Key(key)) => {
                        if let Some(turn) = widget.on_key(key).turn {
                            dispatch(&widget, turn, done_tx.clone());
                        }
                    }
                    Some(WidgetEvent::Shutdown) => {
                        tracing::debug!(pending = widget.pending(), "Shutdown requested");
                        shutting_down = true;
                    }
                    None => {
                        tracing::debug!(pending = widget.pending(), "All event senders dropped");
                        events_open = false;
                    }
                },
                Some((turn, result)) = done_rx.recv() => widget.finish_submit(turn, result),
            }
        }

        widget
    }
}

fn dispatch<V: ChatView>(
    widget: &ChatWidget<V>,
    turn: PendingTurn,
    done: mpsc::UnboundedSender<Completion>,
) {
    let transport = widget.transport();
    tokio::spawn(async move {
        let result = send_isolated(transport, turn.text().to_string()).await;
        // The loop holds the receiver until every pending turn has finished.
        let _ = done.send((turn, result));
    });
}
