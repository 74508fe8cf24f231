//! Text-generation side of the service.
//!
//! The collaborator is an opaque text-completion backend reached through the
//! [`llm::TextGenerator`] trait. Two services sit on top of it:
//!
//! - [`estimator::RoiEstimator`] delegates ROI estimates and falls back to the
//!   deterministic model in `stellar_core::roi` on any collaborator failure.
//! - [`faq::FaqService`] answers free-text questions with no local fallback.
//!
//! Prompt templates are embedded at compile time and registered once in
//! [`prompts::PromptLibrary`].

pub mod estimator;
pub mod faq;
pub mod llm;
pub mod prompts;

pub use estimator::{Estimate, RoiEstimator};
pub use faq::{FaqError, FaqService};
pub use llm::{build_generator, DisabledGenerator, HttpTextGenerator, LlmError, OutputSchema, TextGenerator};
pub use prompts::{PromptError, PromptLibrary};
