use crate::ai::provider::{ChatBackend, ChatMessage, TextSink};
use crate::ai::AIError;

/// An interactive conversation: every question is sent with the full
/// history, and answers are appended so follow-ups keep their context.
pub struct ChatSession<B: ChatBackend> {
    backend: B,
    history: Vec<ChatMessage>,
}

impl<B: ChatBackend> ChatSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            history: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Send `question` with the history so far. A failed request, an
    /// upstream error frame or an empty answer leaves the history as it was.
    pub async fn ask(&mut self, question: &str) -> Result<String, AIError> {
        self.ask_with(question, &mut |_: &str| {}).await
    }

    /// [`ChatSession::ask`], streaming the answer through `on_text`
    pub async fn ask_with(
        &mut self,
        question: &str,
        on_text: &mut TextSink<'_>,
    ) -> Result<String, AIError> {
        self.history.push(ChatMessage::user_text(question));
        tracing::debug!(
            "Sending {} messages to {}",
            self.history.len(),
            self.backend.name()
        );

        match self.backend.send_streaming(&self.history, on_text).await {
            Ok(answer) => {
                self.history.push(ChatMessage::assistant_text(answer.clone()));
                Ok(answer)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::Role;
    use crate::ai::stream::StreamDecoder;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Echoes the number of messages it was sent
    struct CountingBackend {
        seen: Mutex<Vec<usize>>,
        fail: bool,
    }

    impl CountingBackend {
        fn new(fail: bool) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl ChatBackend for CountingBackend {
        fn name(&self) -> &str {
            "counting"
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn send(&self, messages: &[ChatMessage]) -> Result<String, AIError> {
            self.seen.lock().unwrap().push(messages.len());
            if self.fail {
                return Err(AIError::InvalidResponse("offline".to_string()));
            }
            Ok(format!("{} messages", messages.len()))
        }
    }

    /// Replays a canned response body through the stream decoder
    struct ReplayBackend {
        bodies: Mutex<Vec<&'static str>>,
    }

    impl ReplayBackend {
        fn new(bodies: &[&'static str]) -> Self {
            Self {
                bodies: Mutex::new(bodies.iter().rev().copied().collect()),
            }
        }
    }

    #[async_trait]
    impl ChatBackend for ReplayBackend {
        fn name(&self) -> &str {
            "replay"
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn send(&self, _messages: &[ChatMessage]) -> Result<String, AIError> {
            let body = self.bodies.lock().unwrap().pop().unwrap_or_default();
            let mut decoder = StreamDecoder::new();
            decoder.push(body.as_bytes());
            decoder.finish().into_answer()
        }
    }

    #[tokio::test]
    async fn test_history_grows_with_each_turn() {
        let mut session = ChatSession::new(CountingBackend::new(false));

        assert_eq!(session.ask("What is a diode?").await.unwrap(), "1 messages");
        assert_eq!(session.ask("And a zener?").await.unwrap(), "3 messages");

        let roles: Vec<Role> = session.history().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(session.history()[2].text(), "And a zener?");
        assert_eq!(*session.backend().seen.lock().unwrap(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_failed_turn_is_rolled_back() {
        let mut session = ChatSession::new(CountingBackend::new(true));
        assert!(session.ask("hello").await.is_err());
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_error_frame_is_not_kept_as_an_answer() {
        let mut session = ChatSession::new(ReplayBackend::new(&[
            concat!(
                "data: {\"type\":\"text-delta\",\"textDelta\":\"Half an\"}\n",
                "data: {\"type\":\"error\",\"errorText\":\"Overloaded\"}\n",
            ),
            "data: [DONE]\n",
            "0:\"A diode conducts one way.\"\n",
        ]));

        let err = session.ask("What is a diode?").await.unwrap_err();
        assert!(matches!(err, AIError::Upstream(ref m) if m == "Overloaded"));
        assert!(session.history().is_empty());

        let err = session.ask("What is a diode?").await.unwrap_err();
        assert!(matches!(err, AIError::EmptyResponse));
        assert!(session.history().is_empty());

        let answer = session.ask("What is a diode?").await.unwrap();
        assert_eq!(answer, "A diode conducts one way.");
        let roles: Vec<Role> = session.history().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
    }

    #[tokio::test]
    async fn test_ask_with_streams_answer() {
        let mut session = ChatSession::new(CountingBackend::new(false));
        let mut streamed = String::new();
        let answer = session
            .ask_with("hi", &mut |text: &str| streamed.push_str(text))
            .await
            .unwrap();
        assert_eq!(streamed, answer);
    }

    #[tokio::test]
    async fn test_clear() {
        let mut session = ChatSession::new(CountingBackend::new(false));
        session.ask("hello").await.unwrap();
        session.clear();
        assert!(session.history().is_empty());
    }
}
