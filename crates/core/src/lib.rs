pub mod config;
pub mod domain;
pub mod engagement;
pub mod errors;
pub mod knowledge;
pub mod roi;
pub mod validation;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LlmConfig, LlmProvider, LoadOptions};
pub use domain::estimate::{CostPoint, EstimationRequest, EstimationResult, PaintCondition};
pub use domain::faq::{FaqEntry, FaqRequest, FaqResponse};
pub use domain::lead::{Lead, LeadReceipt, LeadRequest};
pub use engagement::SessionState;
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use roi::{fallback_estimate, CostAssumptions, FallbackModel, RoiBreakdown};
pub use validation::{FieldError, RoiForm, Validate, ValidationErrors};
