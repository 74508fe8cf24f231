use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use stellar_core::domain::estimate::{EstimationRequest, EstimationResult};
use stellar_core::errors::DomainError;
use stellar_core::roi::FallbackModel;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm::{LlmError, OutputSchema, TextGenerator};
use crate::prompts::{PromptError, PromptLibrary};

/// Which path produced an estimate. Callers that only need the numbers use
/// [`Estimate::into_result`]; both branches carry the same result shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Estimate {
    Delegated(EstimationResult),
    Fallback { result: EstimationResult, reason: String },
}

impl Estimate {
    pub fn into_result(self) -> EstimationResult {
        match self {
            Self::Delegated(result) | Self::Fallback { result, .. } => result,
        }
    }

    pub fn result(&self) -> &EstimationResult {
        match self {
            Self::Delegated(result) | Self::Fallback { result, .. } => result,
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            Self::Delegated(_) => "delegated",
            Self::Fallback { .. } => "fallback",
        }
    }
}

#[derive(Debug, Error)]
enum DelegationError {
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Generator(#[from] LlmError),
    #[error("collaborator output has the wrong shape: {0}")]
    Output(#[from] serde_json::Error),
    #[error(transparent)]
    Invariant(#[from] DomainError),
    #[error("collaborator panicked: {0}")]
    Panicked(String),
}

/// Delegates ROI estimates to the text-generation collaborator and absorbs
/// every failure into the deterministic fallback model.
#[derive(Clone)]
pub struct RoiEstimator {
    generator: Arc<dyn TextGenerator>,
    prompts: Arc<PromptLibrary>,
    model: FallbackModel,
}

impl RoiEstimator {
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: Arc<PromptLibrary>) -> Self {
        Self { generator, prompts, model: FallbackModel::default() }
    }

    pub fn with_model(mut self, model: FallbackModel) -> Self {
        self.model = model;
        self
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    pub async fn estimate(&self, request: &EstimationRequest) -> EstimationResult {
        self.estimate_with_source(request).await.into_result()
    }

    pub async fn estimate_with_source(&self, request: &EstimationRequest) -> Estimate {
        let delegated = AssertUnwindSafe(self.delegate(request))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(DelegationError::Panicked(panic_message(payload.as_ref()))));

        match delegated {
            Ok(result) => {
                info!(
                    event_name = "roi.estimate.delegated",
                    generator = self.generator.name(),
                    estimated_savings = result.estimated_savings,
                    "collaborator produced ROI estimate"
                );
                Estimate::Delegated(result)
            }
            Err(error) => {
                let reason = error.to_string();
                warn!(
                    event_name = "roi.estimate.fallback",
                    generator = self.generator.name(),
                    condition = request.current_paint_condition.as_str(),
                    reason = %reason,
                    "collaborator estimate unavailable; using deterministic fallback"
                );
                Estimate::Fallback { result: self.model.estimate(request), reason }
            }
        }
    }

    async fn delegate(&self, request: &EstimationRequest) -> Result<EstimationResult, DelegationError> {
        let prompt = self.prompts.render_roi(request)?;
        let output = self.generator.generate(&prompt, &OutputSchema::roi_estimate()).await?;
        let result: EstimationResult = serde_json::from_value(output)?;
        result.conforms()?;
        Ok(result)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}
