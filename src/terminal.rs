//! Line-oriented terminal host for the chat widget.
//!
//! Each line read from the input becomes the field value followed by an
//! unmodified Enter press. Rendering goes to any [`Write`] sink.

use std::io::{IsTerminal, Write};
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::config::AppConfig;
use crate::ui::page::TYPING_TEXT;
use crate::widget::{
    ChatView, ChatWidget, EventLoop, EventSender, HttpTransport, Key, KeyEvent, Message,
    PlaceholderId, Role, Transcript,
};

/// One printed line for a message.
#[must_use]
pub fn format_message(message: &Message) -> String {
    let marker = if message.flagged() { " [!]" } else { "" };
    format!("{}{marker}: {}", message.role().label(), message.text())
}

/// Clears the current line and returns the cursor to its start.
const ERASE_LINE: &str = "\r\x1b[2K";

/// [`ChatView`] that prints to a writer.
///
/// The typing marker is printed without a line break. When it is still the
/// last thing on screen at removal and `erase_typing` is set, it is erased;
/// otherwise a printed line cannot be taken back and the marker stays.
#[derive(Debug)]
pub struct TerminalView<W> {
    out: W,
    erase_typing: bool,
    input: String,
    transcript: Transcript,
    typing: Vec<PlaceholderId>,
    /// Marker printed last and not yet followed by a line break.
    open_typing: Option<PlaceholderId>,
    next_placeholder: u64,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, erase_typing: bool) -> Self {
        Self {
            out,
            erase_typing,
            input: String::new(),
            transcript: Transcript::new(),
            typing: Vec::new(),
            open_typing: None,
            next_placeholder: 0,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
        {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }

    fn print_line(&mut self, line: &str) {
        if self.open_typing.take().is_some() {
            self.write("\n");
        }
        self.write(&format!("{line}\n"));
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn set_input(&mut self, value: &str) {
        self.input = value.to_string();
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn append_message(&mut self, message: &Message) {
        if message.role() == Role::Bot {
            self.print_line(&format_message(message));
        } else {
            // The user's own line is already on screen, ended by their Enter.
            self.open_typing = None;
        }
        self.transcript.push(message.clone());
    }

    fn show_typing(&mut self) -> PlaceholderId {
        let id = PlaceholderId(self.next_placeholder);
        self.next_placeholder += 1;
        self.typing.push(id);

        if self.open_typing.take().is_some() {
            self.write("\n");
        }
        if self.erase_typing {
            self.write(TYPING_TEXT);
            self.open_typing = Some(id);
        } else {
            self.write(&format!("{TYPING_TEXT}\n"));
        }
        id
    }

    fn remove_typing(&mut self, id: PlaceholderId) {
        self.typing.retain(|p| *p != id);
        if self.open_typing == Some(id) {
            self.open_typing = None;
            self.write(ERASE_LINE);
        }
    }
}

/// Forward every line of `reader` to the loop as typed text plus Enter, then
/// request shutdown at end of input.
pub async fn feed_lines<R>(reader: R, tx: EventSender) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if !(tx.input(line) && tx.key(KeyEvent::plain(Key::Enter))) {
            break;
        }
    }
    tx.shutdown();
    Ok(())
}

/// Run an interactive session on stdin/stdout against the configured endpoint.
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let transport = HttpTransport::new(&config.widget.endpoint)?;
    tracing::info!(endpoint = %transport.endpoint(), "Starting terminal chat");

    let stdout = std::io::stdout();
    let erase_typing = stdout.is_terminal();
    let widget = ChatWidget::new(TerminalView::new(stdout, erase_typing), Arc::new(transport))
        .with_policy(config.widget.submit_policy());
    let event_loop = EventLoop::new(widget);
    let tx = event_loop.sender();

    println!("MindBuddy: type a message and press Enter. Ctrl-D to quit.");

    let reader = tokio::spawn(async move {
        if let Err(e) = feed_lines(BufReader::new(tokio::io::stdin()), tx.clone()).await {
            tracing::error!(error = %e, "Failed to read from stdin");
            tx.shutdown();
        }
    });

    event_loop.run().await;
    reader.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{ChatReply, ChatTransport, TransportError};

    #[derive(Debug)]
    struct Canned;

    #[async_trait::async_trait]
    impl ChatTransport for Canned {
        async fn send(&self, message: &str) -> Result<ChatReply, TransportError> {
            if message == "help" {
                Ok(ChatReply::new("please call 988", Some(true)))
            } else {
                Err(TransportError::Status { status: 500 })
            }
        }
    }

    #[test]
    fn test_format_message() {
        assert_eq!(format_message(&Message::user("hi")), "You: hi");
        assert_eq!(
            format_message(&Message::bot("hello", false)),
            "MindBuddy: hello"
        );
        assert_eq!(
            format_message(&Message::bot("call 988", true)),
            "MindBuddy [!]: call 988"
        );
    }

    #[tokio::test]
    async fn test_lines_drive_the_widget() {
        let widget = ChatWidget::new(TerminalView::new(Vec::new(), false), Arc::new(Canned));
        let event_loop = EventLoop::new(widget);
        let tx = event_loop.sender();

        let input: &[u8] = b"help\n   \nanything\n";
        feed_lines(input, tx).await.unwrap();

        let view = event_loop.run().await.into_view();
        assert_eq!(view.transcript().len(), 4);

        let printed = String::from_utf8(view.into_inner()).unwrap();
        assert!(printed.contains("MindBuddy [!]: please call 988"));
        assert!(printed.contains(&format!(
            "MindBuddy: {}",
            crate::widget::CONNECTION_ERROR_TEXT
        )));
        assert_eq!(printed.matches(TYPING_TEXT).count(), 2);
    }

    fn printed(view: TerminalView<Vec<u8>>) -> String {
        String::from_utf8(view.into_inner()).unwrap()
    }

    #[test]
    fn test_typing_marker_is_erased_before_reply() {
        let mut view = TerminalView::new(Vec::new(), true);

        let id = view.show_typing();
        view.remove_typing(id);
        view.append_message(&Message::bot("hello", false));

        assert_eq!(
            printed(view),
            format!("{TYPING_TEXT}{ERASE_LINE}MindBuddy: hello\n")
        );
    }

    #[test]
    fn test_typing_marker_not_last_is_kept() {
        let mut view = TerminalView::new(Vec::new(), true);

        let first = view.show_typing();
        view.append_message(&Message::user("second"));
        let second = view.show_typing();
        view.remove_typing(first);
        view.append_message(&Message::bot("reply one", false));
        view.remove_typing(second);
        view.append_message(&Message::bot("reply two", false));

        // The user's echoed line sits between the two markers on a real screen.
        assert_eq!(
            printed(view),
            format!("{TYPING_TEXT}{TYPING_TEXT}\nMindBuddy: reply one\nMindBuddy: reply two\n")
        );
    }
}
