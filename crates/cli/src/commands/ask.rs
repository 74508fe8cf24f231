use std::sync::Arc;

use stellar_agent::{build_generator, FaqService, PromptLibrary};
use stellar_core::config::{AppConfig, LoadOptions};
use stellar_core::domain::faq::FaqRequest;
use stellar_core::validation::Validate;

use super::{current_thread_runtime, CommandResult, EXIT_CONFIG, EXIT_INPUT, EXIT_RUNTIME};

const COMMAND: &str = "ask";

pub fn run(question: &str) -> CommandResult {
    let request = match (FaqRequest { query: question.to_string() }).validate() {
        Ok(request) => request,
        Err(errors) => {
            return CommandResult::failure(COMMAND, "invalid_input", errors.to_string(), EXIT_INPUT)
        }
    };

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

    let service = match build_service(&config) {
        Ok(service) => service,
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

    match runtime.block_on(service.answer(&request)) {
        Ok(answer) => CommandResult::success(COMMAND, answer.response),
        Err(error) => CommandResult::failure(
            COMMAND,
            "collaborator_unavailable",
            format!("Failed to get a response. Please try again. ({error})"),
            EXIT_RUNTIME,
        ),
    }
}

fn build_service(config: &AppConfig) -> Result<FaqService, String> {
    let prompts = PromptLibrary::new().map_err(|error| error.to_string())?;
    let generator = build_generator(&config.llm).map_err(|error| error.to_string())?;
    Ok(FaqService::new(generator, Arc::new(prompts)))
}
