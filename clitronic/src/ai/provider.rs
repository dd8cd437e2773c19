//! Chat Backend Trait
//!
//! Message types for the chat endpoint and the common interface the
//! command handlers talk to, so they can run against the HTTP client or a
//! stand-in.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

use crate::ai::AIError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One part of a message, tagged by `type` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessagePart {
    Text {
        text: String,
    },
    File {
        /// `data:` URL carrying the base64 payload
        url: String,
        #[serde(rename = "mediaType")]
        media_type: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub parts: Vec<MessagePart>,
}

impl ChatMessage {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![MessagePart::Text { text: text.into() }])
    }

    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, vec![MessagePart::Text { text: text.into() }])
    }

    /// User message with an image attached ahead of the prompt text
    pub fn user_image(image: &[u8], media_type: &str, prompt: impl Into<String>) -> Self {
        let url = format!("data:{};base64,{}", media_type, BASE64.encode(image));
        Self::new(
            Role::User,
            vec![
                MessagePart::File {
                    url,
                    media_type: media_type.to_string(),
                },
                MessagePart::Text {
                    text: prompt.into(),
                },
            ],
        )
    }

    fn new(role: Role, parts: Vec<MessagePart>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            parts,
        }
    }

    /// Concatenated text parts
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                MessagePart::Text { text } => Some(text.as_str()),
                MessagePart::File { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Image media type from a file extension; JPEG when unknown
pub fn media_type_for_extension(extension: Option<&str>) -> &'static str {
    match extension.map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// Receives answer text as it streams in
pub type TextSink<'a> = dyn for<'s> FnMut(&'s str) + Send + 'a;

/// Common trait for anything that can answer a conversation
#[async_trait]
pub trait ChatBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the backend is configured well enough to try a request
    async fn is_available(&self) -> bool;

    /// Send the conversation and return the answer text. An upstream error
    /// frame is `AIError::Upstream`; a stream without text is
    /// `AIError::EmptyResponse`.
    async fn send(&self, messages: &[ChatMessage]) -> Result<String, AIError>;

    /// Like [`ChatBackend::send`], handing text to `on_text` as it arrives.
    /// Backends that cannot stream deliver the whole answer at once.
    async fn send_streaming(
        &self,
        messages: &[ChatMessage],
        on_text: &mut TextSink<'_>,
    ) -> Result<String, AIError> {
        let answer = self.send(messages).await?;
        on_text(&answer);
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_message_wire_shape() {
        let message = ChatMessage::user_text("What resistor for a 5V LED?");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "user");
        assert_eq!(value["parts"][0]["type"], "text");
        assert_eq!(value["parts"][0]["text"], "What resistor for a 5V LED?");
        assert!(!message.id.is_empty());
    }

    #[test]
    fn test_image_message_wire_shape() {
        let message = ChatMessage::user_image(b"\x89PNG", "image/png", "Identify this");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["parts"][0]["type"], "file");
        assert_eq!(value["parts"][0]["mediaType"], "image/png");
        assert_eq!(value["parts"][0]["url"], "data:image/png;base64,iVBORw==");
        assert_eq!(message.text(), "Identify this");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = ChatMessage::user_text("a");
        let b = ChatMessage::user_text("a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_media_type_for_extension() {
        assert_eq!(media_type_for_extension(Some("PNG")), "image/png");
        assert_eq!(media_type_for_extension(Some("webp")), "image/webp");
        assert_eq!(media_type_for_extension(Some("jpg")), "image/jpeg");
        assert_eq!(media_type_for_extension(None), "image/jpeg");
    }
}
