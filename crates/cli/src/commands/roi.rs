use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use stellar_agent::{build_generator, Estimate, PromptLibrary, RoiEstimator};
use stellar_core::config::{AppConfig, LoadOptions};
use stellar_core::domain::estimate::EstimationResult;
use stellar_core::roi::fallback_estimate;
use stellar_core::validation::{RoiForm, Validate};

use super::{current_thread_runtime, CommandResult, EXIT_CONFIG, EXIT_INPUT, EXIT_RUNTIME};

const COMMAND: &str = "roi";

#[derive(Clone, Debug, Default)]
pub struct RoiArgs {
    pub lot_size_acres: String,
    pub condition: String,
    pub spaces: String,
    pub frequency: String,
    pub offline: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoiReport {
    source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_reason: Option<String>,
    #[serde(flatten)]
    result: EstimationResult,
}

pub fn run(args: RoiArgs) -> CommandResult {
    let form = RoiForm {
        lot_size_acres: Value::String(args.lot_size_acres),
        current_paint_condition: args.condition,
        number_of_spaces: Value::String(args.spaces),
        repaint_frequency_years: Value::String(args.frequency),
    };
    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => {
            return CommandResult::failure(COMMAND, "invalid_input", errors.to_string(), EXIT_INPUT)
        }
    };

    if args.offline {
        let report = RoiReport {
            source: "fallback",
            fallback_reason: Some("offline mode".to_string()),
            result: fallback_estimate(&request),
        };
        return CommandResult::document(COMMAND, &report);
    }

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                COMMAND,
                "config_validation",
                error.to_string(),
                EXIT_CONFIG,
            )
        }
    };

    let estimator = match build_estimator(&config) {
        Ok(estimator) => estimator,
        Err(message) => {
            return CommandResult::failure(COMMAND, "runtime_setup", message, EXIT_RUNTIME)
        }
    };
    let runtime = match current_thread_runtime() {
        Ok(runtime) => runtime,
        Err(message) => {
            return CommandResult::failure(COMMAND, "runtime_setup", message, EXIT_RUNTIME)
        }
    };

    let report = match runtime.block_on(estimator.estimate_with_source(&request)) {
        Estimate::Delegated(result) => {
            RoiReport { source: "delegated", fallback_reason: None, result }
        }
        Estimate::Fallback { result, reason } => {
            RoiReport { source: "fallback", fallback_reason: Some(reason), result }
        }
    };
    CommandResult::document(COMMAND, &report)
}

fn build_estimator(config: &AppConfig) -> Result<RoiEstimator, String> {
    let prompts = PromptLibrary::new().map_err(|error| error.to_string())?;
    let generator = build_generator(&config.llm).map_err(|error| error.to_string())?;
    Ok(RoiEstimator::new(generator, Arc::new(prompts)))
}
