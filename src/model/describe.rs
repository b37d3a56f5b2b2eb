use std::sync::Arc;

use tracing::{debug, error};

use crate::capture::encode::EncodedImage;

use super::{prompts::DESCRIBE_INSTRUCTION, ChatRequest, ContentPart, ModelClient, ModelError};

/// Turns a screenshot into a one-line activity description.
pub struct ScreenDescriber {
    client: Arc<dyn ModelClient>,
    system_prompt: &'static str,
    max_tokens: u32,
}

impl ScreenDescriber {
    pub fn new(
        client: Arc<dyn ModelClient>,
        system_prompt: &'static str,
        max_tokens: u32,
    ) -> Self {
        Self {
            client,
            system_prompt,
            max_tokens,
        }
    }

    /// Failures are logged here, callers only decide whether to skip the cycle.
    pub async fn describe(&self, image: EncodedImage) -> Result<String, ModelError> {
        let request = ChatRequest {
            system: self.system_prompt.to_string(),
            user: vec![
                ContentPart::Text(DESCRIBE_INSTRUCTION.to_string()),
                ContentPart::Image(image),
            ],
            max_tokens: self.max_tokens,
        };

        let text = self
            .client
            .complete(request)
            .await
            .inspect_err(|e| error!("Description request failed: {e}"))?;

        let description = single_line(&text).ok_or_else(|| {
            error!("Model answered with whitespace only");
            ModelError::EmptyResponse
        })?;
        debug!("Received description of {} chars", description.len());
        Ok(description)
    }
}

/// A log line holds exactly one record, so line breaks inside an answer are folded.
fn single_line(text: &str) -> Option<String> {
    let joined = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!joined.is_empty()).then_some(joined)
}
