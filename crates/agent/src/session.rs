//! Chat session — one conversation with the triage assistant.

use std::sync::Arc;
use medtriage_core::message::{Conversation, Message};
use tracing::info;

use crate::pipeline::TriageAgent;
use crate::prefilter::{OffTopicFilter, REFUSAL};
use crate::present::{present, render_markdown};

/// Sent after every triage reply.
pub const FOLLOW_UP: &str = "Do you have any more questions about your health?";

/// Owns the transcript and routes each user turn through the pre-filter
/// and the pipeline.
pub struct ChatSession {
    agent: Arc<TriageAgent>,
    filter: OffTopicFilter,
    transcript: Conversation,
}

impl ChatSession {
    pub fn new(agent: Arc<TriageAgent>, filter: OffTopicFilter) -> Self {
        Self {
            agent,
            filter,
            transcript: Conversation::new(),
        }
    }

    /// Handle one user turn and return the assistant replies, in order.
    pub async fn handle(&mut self, input: &str) -> Vec<String> {
        self.transcript.push(Message::user(input));

        if let Some(keyword) = self.filter.matched_keyword(input) {
            info!(keyword, "Query refused as off-topic");
            return vec![self.reply(REFUSAL.to_string())];
        }

        let result = self.agent.run(input).await;
        let rendered = render_markdown(&present(&result));

        vec![self.reply(rendered), self.reply(FOLLOW_UP.to_string())]
    }

    pub fn transcript(&self) -> &Conversation {
        &self.transcript
    }

    fn reply(&mut self, content: String) -> String {
        self.transcript.push(Message::assistant(content.clone()));
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{SELF_CARE_JSON, SequentialMockProvider};
    use medtriage_core::message::Role;

    fn session_with(provider: Arc<SequentialMockProvider>) -> ChatSession {
        let agent = Arc::new(TriageAgent::new(provider, "phi3"));
        ChatSession::new(agent, OffTopicFilter::default())
    }

    #[tokio::test]
    async fn health_query_gets_reply_and_follow_up() {
        let provider = Arc::new(SequentialMockProvider::single_text(SELF_CARE_JSON));
        let mut session = session_with(provider.clone());

        let replies = session.handle("I have a runny nose").await;

        assert_eq!(replies.len(), 2);
        assert!(replies[0].starts_with("**Summary:** Likely a common cold."));
        assert!(replies[0].contains("**Triage Recommendation:** Self-Care"));
        assert_eq!(replies[1], FOLLOW_UP);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn off_topic_query_is_refused_without_calling_provider() {
        let provider = Arc::new(SequentialMockProvider::new(vec![]));
        let mut session = session_with(provider.clone());

        let replies = session.handle("Write a python script").await;

        assert_eq!(replies, vec![REFUSAL.to_string()]);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn transcript_records_every_message() {
        let provider = Arc::new(SequentialMockProvider::single_text(SELF_CARE_JSON));
        let mut session = session_with(provider);

        session.handle("recommend a movie").await;
        session.handle("sneezing a lot").await;

        let roles: Vec<Role> = session
            .transcript()
            .messages
            .iter()
            .map(|m| m.role.clone())
            .collect();
        assert_eq!(
            roles,
            vec![
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::Assistant
            ]
        );
        assert_eq!(session.transcript().last().map(|m| m.content.as_str()), Some(FOLLOW_UP));
    }
}
