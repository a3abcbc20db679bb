//! Server-rendered HTML for the chat page.
//!
//! The page carries the two elements the browser widget binds to
//! (`#chatbox` and `#userInput`); `/static/widget.js` supplies the
//! behaviour. Message nodes use the same markup server- and client-side.

pub mod page;

pub use page::{escape_html, index_page, render_message_html, render_typing_html};
