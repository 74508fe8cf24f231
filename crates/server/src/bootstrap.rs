use std::sync::Arc;

use stellar_agent::{build_generator, FaqService, LlmError, PromptError, PromptLibrary, RoiEstimator};
use stellar_core::config::AppConfig;
use thiserror::Error;
use tracing::info;

use crate::health::HealthState;
use crate::routes::AppState;

pub struct Application {
    pub config: AppConfig,
    pub estimator: RoiEstimator,
    pub faq: FaqService,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("text-generation client setup failed: {0}")]
    Generator(#[source] LlmError),
    #[error("prompt templates failed to load: {0}")]
    Prompts(#[source] PromptError),
}

impl Application {
    pub fn state(&self) -> AppState {
        AppState {
            estimator: self.estimator.clone(),
            faq: self.faq.clone(),
            health: HealthState {
                generator_name: self.estimator.generator_name().to_string(),
                llm_enabled: self.config.llm.enabled,
            },
        }
    }
}

pub fn bootstrap(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let prompts = Arc::new(PromptLibrary::new().map_err(BootstrapError::Prompts)?);
    let generator = build_generator(&config.llm).map_err(BootstrapError::Generator)?;
    info!(
        event_name = "system.bootstrap.generator_ready",
        correlation_id = "bootstrap",
        generator = generator.name(),
        llm_enabled = config.llm.enabled,
        "text-generation collaborator configured"
    );

    Ok(Application {
        estimator: RoiEstimator::new(generator.clone(), prompts.clone()),
        faq: FaqService::new(generator, prompts),
        config,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use stellar_core::config::AppConfig;
    use stellar_core::domain::estimate::{EstimationRequest, PaintCondition};

    use crate::bootstrap::bootstrap;

    #[test]
    fn enabled_collaborator_is_named_by_provider_and_model() {
        let app = bootstrap(AppConfig::default()).expect("bootstrap should succeed");

        let state = app.state();
        assert!(state.health.llm_enabled);
        assert_eq!(state.health.generator_name, "ollama:llama3.1");
    }

    #[tokio::test]
    async fn disabled_collaborator_still_serves_roi_estimates() {
        let mut config = AppConfig::default();
        config.llm.enabled = false;

        let app = bootstrap(config).expect("bootstrap should succeed");
        let result = app
            .estimator
            .estimate(&EstimationRequest {
                lot_size_acres: Decimal::ONE,
                current_paint_condition: PaintCondition::Poor,
                number_of_spaces: 50,
                repaint_frequency_years: 1,
            })
            .await;

        assert_eq!(result.estimated_savings, 6000.0);
        let state = app.state();
        assert!(!state.health.llm_enabled);
        assert_eq!(state.health.generator_name, "disabled");
    }
}
