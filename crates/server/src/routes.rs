use std::path::Path;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use stellar_agent::{FaqService, RoiEstimator};
use stellar_core::domain::estimate::EstimationResult;
use stellar_core::domain::faq::{FaqEntry, FaqRequest, FaqResponse};
use stellar_core::domain::lead::{LeadReceipt, LeadRequest};
use stellar_core::engagement::{exit_intent, scroll_banner_visible, SessionState};
use stellar_core::errors::ApplicationError;
use stellar_core::knowledge::{CHAT_GREETING, FAQ_ENTRIES};
use stellar_core::validation::{RoiForm, Validate};
use tower_http::services::ServeDir;
use uuid::Uuid;

use crate::actions::{
    self, reject, ActionResponse, CHAT_FAILURE_MESSAGE, LEAD_FAILURE_MESSAGE, ROI_FAILURE_MESSAGE,
};
use crate::health::{self, HealthState};

#[derive(Clone)]
pub struct AppState {
    pub estimator: RoiEstimator,
    pub faq: FaqService,
    pub health: HealthState,
}

#[derive(Clone, Debug, Serialize)]
pub struct FaqPage {
    pub greeting: &'static str,
    pub entries: Vec<FaqEntry>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitIntentRequest {
    #[serde(default)]
    pub session: SessionState,
    pub pointer_y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitIntentResponse {
    pub show: bool,
    pub session: SessionState,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollBannerRequest {
    pub scroll_y: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ScrollBannerResponse {
    pub show: bool,
}

pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/api/roi", post(submit_roi))
        .route("/api/chat", post(submit_chat))
        .route("/api/leads", post(submit_lead))
        .route("/api/faq", get(faq_page))
        .route("/api/engagement/exit-intent", post(exit_intent_check))
        .route("/api/engagement/scroll-banner", post(scroll_banner_check))
        .with_state(state.clone())
        .merge(health::router(state.health));

    match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    }
}

fn correlation_id() -> String {
    Uuid::new_v4().to_string()
}

fn decode_failure(rejection: &JsonRejection) -> ApplicationError {
    ApplicationError::Decode(rejection.body_text())
}

async fn submit_roi(
    State(state): State<AppState>,
    form: Result<Json<RoiForm>, JsonRejection>,
) -> Json<ActionResponse<EstimationResult>> {
    let correlation_id = correlation_id();
    let Json(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            return Json(reject(
                "roi",
                decode_failure(&rejection),
                &correlation_id,
                ROI_FAILURE_MESSAGE,
            ))
        }
    };

    match form.validate() {
        Ok(request) => {
            Json(actions::submit_roi_request(&state.estimator, request, &correlation_id).await)
        }
        Err(errors) => Json(reject("roi", errors.into(), &correlation_id, ROI_FAILURE_MESSAGE)),
    }
}

async fn submit_chat(
    State(state): State<AppState>,
    request: Result<Json<FaqRequest>, JsonRejection>,
) -> Json<ActionResponse<FaqResponse>> {
    let correlation_id = correlation_id();
    match request {
        Ok(Json(request)) => {
            Json(actions::submit_chat_message(&state.faq, request, &correlation_id).await)
        }
        Err(rejection) => Json(reject(
            "chat",
            decode_failure(&rejection),
            &correlation_id,
            CHAT_FAILURE_MESSAGE,
        )),
    }
}

async fn submit_lead(
    request: Result<Json<LeadRequest>, JsonRejection>,
) -> Json<ActionResponse<LeadReceipt>> {
    let correlation_id = correlation_id();
    match request {
        Ok(Json(request)) => Json(actions::submit_lead(request, &correlation_id)),
        Err(rejection) => Json(reject(
            "lead",
            decode_failure(&rejection),
            &correlation_id,
            LEAD_FAILURE_MESSAGE,
        )),
    }
}

async fn faq_page() -> Json<FaqPage> {
    Json(FaqPage { greeting: CHAT_GREETING, entries: FAQ_ENTRIES.to_vec() })
}

async fn exit_intent_check(Json(request): Json<ExitIntentRequest>) -> Json<ExitIntentResponse> {
    let mut session = request.session;
    let show = exit_intent(&mut session, request.pointer_y);
    Json(ExitIntentResponse { show, session })
}

async fn scroll_banner_check(Json(request): Json<ScrollBannerRequest>) -> Json<ScrollBannerResponse> {
    Json(ScrollBannerResponse {
        show: scroll_banner_visible(
            request.scroll_y,
            request.document_height,
            request.viewport_height,
        ),
    })
}
