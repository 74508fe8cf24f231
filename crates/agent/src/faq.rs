use std::sync::Arc;

use stellar_core::domain::faq::{FaqRequest, FaqResponse};
use thiserror::Error;
use tracing::debug;

use crate::llm::{LlmError, OutputSchema, TextGenerator};
use crate::prompts::{PromptError, PromptLibrary};

#[derive(Debug, Error)]
pub enum FaqError {
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Generator(#[from] LlmError),
    #[error("collaborator output has no `response` string")]
    MissingResponse,
}

/// Answers visitor questions from the fixed knowledge snippet. There is no
/// local fallback: collaborator failures propagate to the caller.
#[derive(Clone)]
pub struct FaqService {
    generator: Arc<dyn TextGenerator>,
    prompts: Arc<PromptLibrary>,
}

impl FaqService {
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: Arc<PromptLibrary>) -> Self {
        Self { generator, prompts }
    }

    pub async fn answer(&self, request: &FaqRequest) -> Result<FaqResponse, FaqError> {
        let prompt = self.prompts.render_faq(&request.query)?;
        let output = self.generator.generate(&prompt, &OutputSchema::faq_answer()).await?;

        let response = output
            .get("response")
            .and_then(|value| value.as_str())
            .ok_or(FaqError::MissingResponse)?
            .to_string();

        debug!(
            event_name = "faq.answer.generated",
            generator = self.generator.name(),
            response_chars = response.len(),
            "faq answer generated"
        );
        Ok(FaqResponse { response })
    }
}
