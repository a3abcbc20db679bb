//! The surface a [`ChatWidget`](super::ChatWidget) renders into.
//!
//! A view stands for the two host elements the widget needs: a scrollable
//! message container and a text input. The widget never looks these up on
//! its own; the host hands a view to the widget's constructor.

use super::message::{Message, Transcript};

/// Handle for one typing placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceholderId(pub u64);

/// Host rendering surface.
pub trait ChatView {
    /// Current raw value of the input field.
    fn input_value(&self) -> String;

    /// Replace the input field value, as the user typing would.
    fn set_input(&mut self, value: &str);

    fn clear_input(&mut self);

    /// Append a message node to the container.
    fn append_message(&mut self, message: &Message);

    /// Append a typing placeholder and return its handle.
    fn show_typing(&mut self) -> PlaceholderId;

    /// Remove a typing placeholder. Unknown handles are ignored.
    fn remove_typing(&mut self, id: PlaceholderId);
}

/// In-memory view that records what was rendered.
#[derive(Debug, Default)]
pub struct TranscriptView {
    input: String,
    transcript: Transcript,
    typing: Vec<PlaceholderId>,
    next_placeholder: u64,
}

impl TranscriptView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Placeholders currently on screen, oldest first.
    #[must_use]
    pub fn typing(&self) -> &[PlaceholderId] {
        &self.typing
    }
}

impl ChatView for TranscriptView {
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
        self.transcript.push(message.clone());
    }

    fn show_typing(&mut self) -> PlaceholderId {
        let id = PlaceholderId(self.next_placeholder);
        self.next_placeholder += 1;
        self.typing.push(id);
        id
    }

    fn remove_typing(&mut self, id: PlaceholderId) {
        self.typing.retain(|p| *p != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_distinct() {
        let mut view = TranscriptView::new();
        let a = view.show_typing();
        let b = view.show_typing();
        assert_ne!(a, b);

        view.remove_typing(a);
        assert_eq!(view.typing(), &[b]);

        view.remove_typing(a);
        assert_eq!(view.typing(), &[b]);
    }

    #[test]
    fn test_input_round_trip() {
        let mut view = TranscriptView::new();
        view.set_input("  hello ");
        assert_eq!(view.input_value(), "  hello ");
        view.clear_input();
        assert_eq!(view.input_value(), "");
    }
}
