//! Reply selection for the chat service.
//!
//! A message is answered by the first source that produces something:
//!
//! 1. [`crisis`]: fixed safe reply, flagged as a crisis
//! 2. [`knowledge`]: best keyword-scored topic
//! 3. the optional LLM fallback
//! 4. a canned general answer
//!
//! Only the crisis source sets the `crisis` flag.

pub mod crisis;
pub mod knowledge;

use serde::Serialize;

use crate::llm::{ChatCompletionsClient, SYSTEM_PROMPT};
use knowledge::KnowledgeBase;

/// Answer used when nothing else matched.
pub const FALLBACK_REPLY: &str = "Thanks for sharing — I hear you. While I might not have specific advice for this topic, \
here are some universally helpful strategies: \n\n\
1) 🫁 **Breathe**: Take slow, deep breaths for one minute.\n\
2) 🧘 **Ground yourself**: Name five things you can see around you.\n\
3) 🚶 **Move**: Try a short walk or a change of scene.\n\
4) 💬 **Talk**: Reach out to someone you trust.\n\
5) 👨‍⚕️ **Get professional help**: A therapist or counselor can provide real support.\n\n\
Feel free to ask me about anxiety, stress, sleep, relationships, depression, or any other mental health topic!";

/// Answer returned for a blank message.
pub const EMPTY_MESSAGE_REPLY: &str = "Please provide a message.";

/// Which source produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Crisis,
    Knowledge,
    Llm,
    Fallback,
}

impl ReplySource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crisis => "crisis",
            Self::Knowledge => "knowledge",
            Self::Llm => "llm",
            Self::Fallback => "fallback",
        }
    }
}

/// Wire body of a chat reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub answer: String,
    pub crisis: bool,
}

impl Reply {
    #[must_use]
    pub fn new(answer: impl Into<String>, crisis: bool) -> Self {
        Self {
            answer: answer.into(),
            crisis,
        }
    }
}

/// Chooses a reply for each incoming message.
#[derive(Debug, Default)]
pub struct Responder {
    knowledge: KnowledgeBase,
    llm: Option<ChatCompletionsClient>,
}

impl Responder {
    #[must_use]
    pub fn new(knowledge: KnowledgeBase, llm: Option<ChatCompletionsClient>) -> Self {
        Self { knowledge, llm }
    }

    /// Pick a reply for an already trimmed, non-empty message.
    pub async fn respond(&self, message: &str) -> (Reply, ReplySource) {
        if crisis::is_crisis(message) {
            return (Reply::new(crisis::SAFE_REPLY, true), ReplySource::Crisis);
        }

        if let Some(topic) = self.knowledge.best_match(message) {
            return (Reply::new(topic.answer(), false), ReplySource::Knowledge);
        }

        if let Some(llm) = &self.llm {
            match llm.complete_single(SYSTEM_PROMPT, message).await {
                Ok(answer) => return (Reply::new(answer, false), ReplySource::Llm),
                Err(e) => {
                    tracing::warn!(error = %e, "LLM fallback failed, using canned reply");
                }
            }
        }

        (Reply::new(FALLBACK_REPLY, false), ReplySource::Fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmSettings, Provider};

    #[tokio::test]
    async fn test_crisis_takes_priority_over_knowledge() {
        let responder = Responder::default();
        // "anxious" would match the anxiety topic on its own.
        let (reply, source) = responder.respond("I'm anxious and want to die").await;
        assert_eq!(source, ReplySource::Crisis);
        assert!(reply.crisis);
        assert_eq!(reply.answer, crisis::SAFE_REPLY);
    }

    #[tokio::test]
    async fn test_knowledge_reply_is_not_flagged() {
        let responder = Responder::default();
        let (reply, source) = responder.respond("so much stress lately").await;
        assert_eq!(source, ReplySource::Knowledge);
        assert!(!reply.crisis);
        assert!(reply.answer.starts_with("Stress and overwhelm are tough."));
        assert!(reply.answer.ends_with(knowledge::PROFESSIONAL_SUPPORT_FOOTER));
    }

    #[tokio::test]
    async fn test_fallback_without_llm() {
        let responder = Responder::default();
        let (reply, source) = responder.respond("I feel great").await;
        assert_eq!(source, ReplySource::Fallback);
        assert_eq!(reply, Reply::new(FALLBACK_REPLY, false));
    }

    #[tokio::test]
    async fn test_unreachable_llm_falls_through() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let settings = LlmSettings {
            base_url: format!("http://{addr}"),
            provider: Provider::Generic,
            ..LlmSettings::openai("key", "model")
        };
        let responder = Responder::new(
            KnowledgeBase::default(),
            Some(ChatCompletionsClient::new(settings)),
        );

        let (reply, source) = responder.respond("I feel great").await;
        assert_eq!(source, ReplySource::Fallback);
        assert!(!reply.crisis);
    }
}
