//! Model-facing surface
//!
//! Everything that talks to, or is called by, the language model: the
//! streaming chat client, the response stream decoder, the tool
//! definitions the model invokes, and the prompt text the terminal sends.

pub mod client;
pub mod prompts;
pub mod provider;
pub mod session;
pub mod stream;
pub mod tools;

use thiserror::Error;

pub use client::ChatClient;
pub use provider::{
    media_type_for_extension, ChatBackend, ChatMessage, MessagePart, Role, TextSink,
};
pub use session::ChatSession;
pub use stream::{decode, decode_with, DecodedStream, StreamDecoder};
pub use tools::{ToolDefinition, ToolError, ToolRegistry};

#[derive(Error, Debug)]
pub enum AIError {
    #[error("API request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error(
        "ANTHROPIC_API_KEY environment variable is not set. \
         Get an API key from https://console.anthropic.com/ and run: \
         export ANTHROPIC_API_KEY=your_key_here"
    )]
    MissingApiKey,
    #[error("Chat server error: {0}")]
    Upstream(String),
    #[error("No response received")]
    EmptyResponse,
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
