//! Crisis phrase detection.

use std::sync::LazyLock;

use regex::Regex;

/// Reply sent whenever a message matches a crisis pattern.
pub const SAFE_REPLY: &str = "I'm really sorry you're feeling this way. If you are in immediate danger or \
thinking about harming yourself, please contact your local emergency services right now. \
If you can, consider contacting a crisis hotline — for example, in the United States call or text 988, \
or find local resources at https://www.opencounseling.com/suicide-hotlines. \
You don't have to go through this alone; reach out to someone you trust or a professional.";

static CRISIS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let patterns = [
        r"(?i)\bsuicid(e|al)\b",
        r"(?i)\bkill myself\b",
        r"(?i)\bwant to die\b",
        r"(?i)\bharm myself\b",
        r"(?i)\bend my life\b",
        r"(?i)\bself[- ]harm\b",
        r"(?i)\bpanic attack\b",
        r"(?i)\bI can't go on\b",
    ];

    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!(pattern = %p, error = %e, "Failed to compile crisis pattern");
                None
            }
        })
        .collect()
});

/// Whether the message contains any crisis phrase.
pub fn is_crisis(text: &str) -> bool {
    CRISIS_PATTERNS.iter().any(|re| re.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_phrases() {
        assert!(is_crisis("I want to die"));
        assert!(is_crisis("feeling SUICIDAL tonight"));
        assert!(is_crisis("thinking about self harm"));
        assert!(is_crisis("thinking about self-harm"));
        assert!(is_crisis("i can't go on like this"));
        assert!(is_crisis("I had a panic attack at work"));
    }

    #[test]
    fn test_word_boundaries() {
        assert!(!is_crisis("the suicidesquad movie"));
        assert!(!is_crisis("I'm feeling anxious"));
        assert!(!is_crisis(""));
    }
}
