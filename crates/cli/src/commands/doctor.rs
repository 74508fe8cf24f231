use std::time::Duration;

use rust_decimal::Decimal;
use serde::Serialize;
use stellar_agent::{build_generator, PromptLibrary};
use stellar_core::config::{AppConfig, LoadOptions};
use stellar_core::domain::estimate::{EstimationRequest, PaintCondition};
use stellar_core::roi::fallback_estimate;

use super::{current_thread_runtime, CommandResult, EXIT_RUNTIME};

const REACHABILITY_TIMEOUT_SECS: u64 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { EXIT_RUNTIME };

    if json_output {
        let output = serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
        return CommandResult { exit_code, output };
    }

    CommandResult { exit_code, output: render_human(&report) }
}

fn build_report() -> DoctorReport {
    let mut checks = vec![check_prompt_templates(), check_fallback_model()];

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.insert(
                0,
                DoctorCheck {
                    name: "config_validation",
                    status: CheckStatus::Pass,
                    details: "configuration loaded and validated".to_string(),
                },
            );
            checks.push(check_collaborator(&config));
        }
        Err(error) => {
            checks.insert(
                0,
                DoctorCheck {
                    name: "config_validation",
                    status: CheckStatus::Fail,
                    details: error.to_string(),
                },
            );
            checks.push(DoctorCheck {
                name: "collaborator_reachability",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status != CheckStatus::Fail);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_prompt_templates() -> DoctorCheck {
    match PromptLibrary::new() {
        Ok(_) => DoctorCheck {
            name: "prompt_templates",
            status: CheckStatus::Pass,
            details: "roi_estimator and faq_chatbot templates registered".to_string(),
        },
        Err(error) => {
            DoctorCheck { name: "prompt_templates", status: CheckStatus::Fail, details: error.to_string() }
        }
    }
}

fn check_fallback_model() -> DoctorCheck {
    let result = fallback_estimate(&sample_request());
    match result.conforms() {
        Ok(()) => DoctorCheck {
            name: "fallback_model",
            status: CheckStatus::Pass,
            details: format!(
                "sample lot estimate produced {} points, savings {}",
                result.chart_data.len(),
                result.estimated_savings
            ),
        },
        Err(error) => {
            DoctorCheck { name: "fallback_model", status: CheckStatus::Fail, details: error.to_string() }
        }
    }
}

fn sample_request() -> EstimationRequest {
    EstimationRequest {
        lot_size_acres: Decimal::ONE,
        current_paint_condition: PaintCondition::Poor,
        number_of_spaces: 50,
        repaint_frequency_years: 1,
    }
}

fn check_collaborator(config: &AppConfig) -> DoctorCheck {
    const NAME: &str = "collaborator_reachability";

    if !config.llm.enabled {
        return DoctorCheck {
            name: NAME,
            status: CheckStatus::Skipped,
            details: "llm.enabled = false; roi uses the deterministic model and chat is unavailable"
                .to_string(),
        };
    }

    let generator = match build_generator(&config.llm) {
        Ok(generator) => generator,
        Err(error) => {
            return DoctorCheck { name: NAME, status: CheckStatus::Fail, details: error.to_string() }
        }
    };

    let runtime = match current_thread_runtime() {
        Ok(runtime) => runtime,
        Err(details) => return DoctorCheck { name: NAME, status: CheckStatus::Fail, details },
    };

    let base_url = config.llm.effective_base_url();
    let reachability = runtime.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REACHABILITY_TIMEOUT_SECS))
            .build()
            .map_err(|error| format!("failed to create HTTP client: {error}"))?;
        client
            .get(&base_url)
            .send()
            .await
            .map(|response| response.status())
            .map_err(|error| format!("cannot reach `{base_url}`: {error}"))
    });

    // Any HTTP status proves the endpoint is listening; auth is checked on first use.
    match reachability {
        Ok(status) => DoctorCheck {
            name: NAME,
            status: CheckStatus::Pass,
            details: format!("{} reachable (HTTP {})", generator.name(), status.as_u16()),
        },
        Err(details) => DoctorCheck { name: NAME, status: CheckStatus::Fail, details },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
