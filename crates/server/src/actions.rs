//! Boundary operations called by the HTTP handlers. Every outcome, including
//! a panic inside a component, is returned as an [`ActionResponse`].

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use stellar_agent::{FaqService, RoiEstimator};
use stellar_core::domain::estimate::{EstimationRequest, EstimationResult};
use stellar_core::domain::faq::{FaqRequest, FaqResponse};
use stellar_core::domain::lead::{LeadReceipt, LeadRequest};
use stellar_core::errors::ApplicationError;
use stellar_core::validation::Validate;
use tracing::{error, info};

pub const ROI_FAILURE_MESSAGE: &str = "Failed to estimate ROI. Please try again.";
pub const CHAT_FAILURE_MESSAGE: &str = "Failed to get a response. Please try again.";
pub const LEAD_FAILURE_MESSAGE: &str = "Failed to send audit request. Please try again.";

/// `{"success": true, "data": ...}` or `{"success": false, "error": "..."}`.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionResponse<T> {
    Success(T),
    Failure(String),
}

impl<T> ActionResponse<T> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl<T: Serialize> Serialize for ActionResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ActionResponse", 2)?;
        match self {
            Self::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Failure(message) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", message)?;
            }
        }
        state.end()
    }
}

/// Converts a failure into the envelope. Client errors are logged at info,
/// everything else at error.
pub fn reject<T>(
    operation: &'static str,
    failure: ApplicationError,
    correlation_id: &str,
    fixed_message: &str,
) -> ActionResponse<T> {
    let interface = failure.into_interface(correlation_id);
    if interface.is_client_error() {
        info!(
            event_name = "action.rejected",
            operation,
            correlation_id = interface.correlation_id(),
            error = %interface,
            "request rejected"
        );
    } else {
        error!(
            event_name = "action.failed",
            operation,
            correlation_id = interface.correlation_id(),
            error = %interface,
            "request failed"
        );
    }
    ActionResponse::failure(interface.user_message(fixed_message))
}

pub async fn submit_roi_request(
    estimator: &RoiEstimator,
    request: EstimationRequest,
    correlation_id: &str,
) -> ActionResponse<EstimationResult> {
    let request = match request.validate() {
        Ok(request) => request,
        Err(errors) => return reject("roi", errors.into(), correlation_id, ROI_FAILURE_MESSAGE),
    };

    match AssertUnwindSafe(estimator.estimate_with_source(&request)).catch_unwind().await {
        Ok(estimate) => {
            info!(
                event_name = "action.roi.completed",
                correlation_id,
                source = estimate.source(),
                estimated_savings = estimate.result().estimated_savings,
                "roi request completed"
            );
            ActionResponse::Success(estimate.into_result())
        }
        Err(payload) => reject(
            "roi",
            ApplicationError::Panicked(panic_message(payload.as_ref())),
            correlation_id,
            ROI_FAILURE_MESSAGE,
        ),
    }
}

pub async fn submit_chat_message(
    faq: &FaqService,
    request: FaqRequest,
    correlation_id: &str,
) -> ActionResponse<FaqResponse> {
    let request = match request.validate() {
        Ok(request) => request,
        Err(errors) => return reject("chat", errors.into(), correlation_id, CHAT_FAILURE_MESSAGE),
    };

    match AssertUnwindSafe(faq.answer(&request)).catch_unwind().await {
        Ok(Ok(response)) => {
            info!(event_name = "action.chat.completed", correlation_id, "chat message answered");
            ActionResponse::Success(response)
        }
        Ok(Err(failure)) => reject(
            "chat",
            ApplicationError::Integration(failure.to_string()),
            correlation_id,
            CHAT_FAILURE_MESSAGE,
        ),
        Err(payload) => reject(
            "chat",
            ApplicationError::Panicked(panic_message(payload.as_ref())),
            correlation_id,
            CHAT_FAILURE_MESSAGE,
        ),
    }
}

/// Validates a free-audit request. Leads are logged, not stored.
pub fn submit_lead(request: LeadRequest, correlation_id: &str) -> ActionResponse<LeadReceipt> {
    match request.validate() {
        Ok(lead) => {
            info!(
                event_name = "action.lead.received",
                correlation_id,
                lead_name = %lead.name,
                lot_size = %lead.lot_size,
                "audit request received"
            );
            ActionResponse::Success(LeadReceipt::received())
        }
        Err(errors) => reject("lead", errors.into(), correlation_id, LEAD_FAILURE_MESSAGE),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use stellar_agent::{
        DisabledGenerator, FaqService, LlmError, OutputSchema, PromptLibrary, RoiEstimator,
        TextGenerator,
    };
    use stellar_core::domain::estimate::{EstimationRequest, PaintCondition};
    use stellar_core::domain::faq::FaqRequest;
    use stellar_core::domain::lead::LeadRequest;
    use stellar_core::errors::ApplicationError;
    use stellar_core::validation::FieldError;

    use super::{
        reject, submit_chat_message, submit_lead, submit_roi_request, ActionResponse,
        CHAT_FAILURE_MESSAGE, ROI_FAILURE_MESSAGE,
    };

    struct PanickingGenerator;

    #[async_trait]
    impl TextGenerator for PanickingGenerator {
        async fn generate(&self, _prompt: &str, _schema: &OutputSchema) -> Result<Value, LlmError> {
            panic!("collaborator adapter bug");
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, _prompt: &str, _schema: &OutputSchema) -> Result<Value, LlmError> {
            Ok(json!({ "response": "We serve Houston and Dallas." }))
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    fn prompts() -> Arc<PromptLibrary> {
        Arc::new(PromptLibrary::new().expect("prompts"))
    }

    fn scenario() -> EstimationRequest {
        EstimationRequest {
            lot_size_acres: Decimal::ONE,
            current_paint_condition: PaintCondition::Poor,
            number_of_spaces: 50,
            repaint_frequency_years: 1,
        }
    }

    #[test]
    fn envelope_serializes_success_and_failure_shapes() {
        let success: ActionResponse<u32> = ActionResponse::Success(7);
        let failure: ActionResponse<u32> = ActionResponse::failure("nope");

        assert_eq!(serde_json::to_value(&success).expect("json"), json!({ "success": true, "data": 7 }));
        assert_eq!(
            serde_json::to_value(&failure).expect("json"),
            json!({ "success": false, "error": "nope" })
        );
    }

    #[tokio::test]
    async fn roi_request_with_disabled_collaborator_succeeds_via_fallback() {
        let estimator = RoiEstimator::new(Arc::new(DisabledGenerator), prompts());

        let response = submit_roi_request(&estimator, scenario(), "req-roi").await;
        match response {
            ActionResponse::Success(result) => assert_eq!(result.estimated_savings, 6000.0),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn roi_request_with_panicking_collaborator_still_returns_estimate() {
        let estimator = RoiEstimator::new(Arc::new(PanickingGenerator), prompts());

        let response = submit_roi_request(&estimator, scenario(), "req-panic").await;
        match response {
            ActionResponse::Success(result) => {
                assert_eq!(result.estimated_savings, 6000.0);
                assert_eq!(result.chart_data.len(), 6);
            }
            other => panic!("expected fallback estimate, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn roi_request_with_oversized_lot_is_rejected_with_field_message() {
        let estimator = RoiEstimator::new(Arc::new(DisabledGenerator), prompts());
        let mut request = scenario();
        request.lot_size_acres = Decimal::from_scientific("1e25").expect("decimal");

        let response = submit_roi_request(&estimator, request, "req-huge").await;
        assert_eq!(response, ActionResponse::failure("Lot size must be at most 10,000 acres."));
        assert_ne!(response, ActionResponse::failure(ROI_FAILURE_MESSAGE));
    }

    #[test]
    fn reject_passes_field_messages_and_hides_internal_detail() {
        let invalid: ActionResponse<()> = reject(
            "roi",
            ApplicationError::Validation(
                vec![FieldError::new("numberOfSpaces", "Must have at least 1 space.")].into(),
            ),
            "req-reject",
            ROI_FAILURE_MESSAGE,
        );
        assert_eq!(invalid, ActionResponse::failure("Must have at least 1 space."));

        let panicked: ActionResponse<()> = reject(
            "chat",
            ApplicationError::Panicked("index out of bounds".to_string()),
            "req-reject",
            CHAT_FAILURE_MESSAGE,
        );
        assert_eq!(panicked, ActionResponse::failure(CHAT_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn roi_request_with_zero_frequency_is_rejected_before_estimation() {
        let estimator = RoiEstimator::new(Arc::new(DisabledGenerator), prompts());
        let mut request = scenario();
        request.repaint_frequency_years = 0;

        let response = submit_roi_request(&estimator, request, "req-invalid").await;
        assert_eq!(
            response,
            ActionResponse::failure("Repaint frequency must be at least 1 year.")
        );
    }

    #[tokio::test]
    async fn chat_failure_uses_fixed_message() {
        let faq = FaqService::new(Arc::new(DisabledGenerator), prompts());

        let response = submit_chat_message(
            &faq,
            FaqRequest { query: "Do you offer financing?".to_string() },
            "req-chat",
        )
        .await;
        assert_eq!(response, ActionResponse::failure(CHAT_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn chat_panic_is_converted_to_failure() {
        let faq = FaqService::new(Arc::new(PanickingGenerator), prompts());

        let response =
            submit_chat_message(&faq, FaqRequest { query: "Hello?".to_string() }, "req-chat").await;
        assert_eq!(response, ActionResponse::failure(CHAT_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn chat_success_wraps_response() {
        let faq = FaqService::new(Arc::new(EchoGenerator), prompts());

        let response = submit_chat_message(
            &faq,
            FaqRequest { query: "Where do you work?".to_string() },
            "req-chat",
        )
        .await;
        let json = serde_json::to_value(&response).expect("json");
        assert_eq!(
            json,
            json!({ "success": true, "data": { "response": "We serve Houston and Dallas." } })
        );
    }

    #[test]
    fn lead_submission_returns_receipt_or_field_messages() {
        let accepted = submit_lead(
            LeadRequest {
                name: "Dana Reyes".to_string(),
                email: "dana@example.com".to_string(),
                lot_size: "3 acres".to_string(),
            },
            "req-lead",
        );
        assert!(accepted.is_success());

        let rejected = submit_lead(LeadRequest::default(), "req-lead");
        assert_eq!(
            rejected,
            ActionResponse::failure(
                "Name must be at least 2 characters. Please enter a valid email. Please enter your lot size."
            )
        );
    }
}
