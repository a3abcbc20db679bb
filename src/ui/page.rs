//! Page shell and message markup.

use crate::widget::Message;

/// Text of the typing placeholder node.
pub const TYPING_TEXT: &str = "MindBuddy is typing...";

/// Greeting rendered into an empty transcript.
pub const WELCOME_TEXT: &str = "Hi, I'm MindBuddy. How are you feeling today?";

/// Escape text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Paragraph node for one message.
#[must_use]
pub fn render_message_html(message: &Message) -> String {
    let role = message.role();
    let crisis = if message.flagged() { " crisis" } else { "" };
    format!(
        r#"<p class="msg {}{crisis}"><strong>{}:</strong> {}</p>"#,
        role.css_class(),
        role.label(),
        escape_html(message.text()),
    )
}

/// Paragraph node for the typing placeholder.
#[must_use]
pub fn render_typing_html() -> String {
    format!(r#"<p class="msg typing">{TYPING_TEXT}</p>"#)
}

/// Full chat page. `endpoint` is where the browser widget posts messages.
#[must_use]
pub fn index_page(endpoint: &str) -> String {
    let welcome = render_message_html(&Message::bot(WELCOME_TEXT, false));
    let typing = render_typing_html();
    let content = format!(
        r#"
    <section class="chat-shell">
        <div id="chatbox" class="chatbox" aria-live="polite" aria-label="Chat messages">
            {welcome}
        </div>
        <div class="input-area">
            <textarea
                id="userInput"
                placeholder="Type your message..."
                rows="1"
                data-endpoint="{endpoint}"
            ></textarea>
        </div>
        <p class="hint">Press Enter to send, Shift+Enter for new line</p>
        <template id="typing-template">{typing}</template>
    </section>
    "#,
        endpoint = escape_html(endpoint),
    );
    html_shell("Chat", &content)
}

fn html_shell(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Mental wellbeing chat companion">
    <title>{title} - MindBuddy</title>
    <link rel="stylesheet" href="/static/app.css">
    <script defer src="/static/widget.js"></script>
</head>
<body>
    <header class="app-header">
        <span class="brand">MindBuddy</span>
    </header>
    <main id="app">
        {content}
    </main>
    <footer class="app-footer">
        <p>MindBuddy is not a substitute for professional care. In an emergency, contact your local emergency services.</p>
    </footer>
</body>
</html>"#
    )
}
