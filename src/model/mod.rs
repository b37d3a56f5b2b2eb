//! Everything that talks to the remote vision-language model.
//!
//! The rest of the application only sees [ModelClient]: a request made of a system instruction,
//! a user turn and a token budget goes in, opaque text or a [ModelError] comes out.
//! [describe] and [summarize] build the two requests the application makes.

pub mod describe;
pub mod openai;
pub mod profile;
pub mod prompts;
pub mod summarize;

use async_trait::async_trait;

use crate::capture::encode::EncodedImage;

/// One piece of the user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    Image(EncodedImage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub system: String,
    pub user: Vec<ContentPart>,
    pub max_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Model returned no text")]
    EmptyResponse,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<String, ModelError>;
}
