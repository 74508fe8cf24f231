use serde::Serialize;
use stellar_core::domain::estimate::{EstimationRequest, COMPARISON_YEARS};
use stellar_core::knowledge::{COMPANY_NAME, KEY_BENEFITS, PROMPT_FAQ, SERVICE_DESCRIPTION};
use tera::{Context, Tera};
use thiserror::Error;

pub const ROI_ESTIMATOR_TEMPLATE: &str = "roi_estimator";
pub const FAQ_CHATBOT_TEMPLATE: &str = "faq_chatbot";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("failed to register prompt template `{name}`: {source}")]
    Register { name: &'static str, source: tera::Error },
    #[error("failed to render prompt template `{name}`: {source}")]
    Render { name: &'static str, source: tera::Error },
}

#[derive(Serialize)]
struct PromptFaq<'a> {
    question: &'a str,
    answer: &'a str,
}

/// Plain-text prompt templates, registered once and shared by every service.
#[derive(Clone, Debug)]
pub struct PromptLibrary {
    tera: Tera,
}

impl PromptLibrary {
    pub fn new() -> Result<Self, PromptError> {
        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());

        tera.add_raw_template(
            ROI_ESTIMATOR_TEMPLATE,
            include_str!("../../../templates/prompts/roi_estimator.tera"),
        )
        .map_err(|source| PromptError::Register { name: ROI_ESTIMATOR_TEMPLATE, source })?;
        tera.add_raw_template(
            FAQ_CHATBOT_TEMPLATE,
            include_str!("../../../templates/prompts/faq_chatbot.tera"),
        )
        .map_err(|source| PromptError::Register { name: FAQ_CHATBOT_TEMPLATE, source })?;

        Ok(Self { tera })
    }

    pub fn render_roi(&self, request: &EstimationRequest) -> Result<String, PromptError> {
        let mut context = Context::new();
        context.insert("company_name", COMPANY_NAME);
        context.insert("lot_size_acres", &request.lot_size_acres.normalize().to_string());
        context.insert("current_paint_condition", request.current_paint_condition.as_str());
        context.insert("number_of_spaces", &request.number_of_spaces);
        context.insert("repaint_frequency_years", &request.repaint_frequency_years);
        context.insert("comparison_years", &COMPARISON_YEARS);

        self.render(ROI_ESTIMATOR_TEMPLATE, &context)
    }

    pub fn render_faq(&self, query: &str) -> Result<String, PromptError> {
        let faq: Vec<PromptFaq<'_>> = PROMPT_FAQ
            .iter()
            .map(|(question, answer)| PromptFaq { question, answer })
            .collect();

        let mut context = Context::new();
        context.insert("company_name", COMPANY_NAME);
        context.insert("service_description", SERVICE_DESCRIPTION);
        context.insert("key_benefits", &KEY_BENEFITS);
        context.insert("faq", &faq);
        context.insert("query", query);

        self.render(FAQ_CHATBOT_TEMPLATE, &context)
    }

    fn render(&self, name: &'static str, context: &Context) -> Result<String, PromptError> {
        self.tera.render(name, context).map_err(|source| PromptError::Render { name, source })
    }
}
