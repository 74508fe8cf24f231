use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use stellar_core::config::{LlmConfig, LlmProvider};
use stellar_core::domain::estimate::COMPARISON_YEARS;
use thiserror::Error;
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_MAX_TOKENS: u32 = 1024;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("text generation is disabled in configuration")]
    Disabled,
    #[error("http error: {0}")]
    Http(String),
    #[error("request timed out after {0} seconds")]
    Timeout(u64),
    #[error("collaborator returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid JSON from collaborator: {0}")]
    InvalidJson(String),
    #[error("collaborator returned an empty response")]
    EmptyResponse,
    #[error("output does not match schema `{schema}`: {detail}")]
    SchemaMismatch { schema: String, detail: String },
}

/// Structured output contract sent alongside every prompt.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputSchema {
    pub name: &'static str,
    pub json_schema: Value,
}

impl OutputSchema {
    pub fn roi_estimate() -> Self {
        Self {
            name: "roi_estimate",
            json_schema: json!({
                "type": "object",
                "properties": {
                    "estimatedSavings": {
                        "type": "number",
                        "description": "The estimated cost savings over three years by using TBL paint."
                    },
                    "roiExplanation": {
                        "type": "string",
                        "description": "A detailed explanation of how the ROI was calculated, including assumptions."
                    },
                    "chartData": {
                        "type": "array",
                        "minItems": COMPARISON_YEARS,
                        "maxItems": COMPARISON_YEARS,
                        "items": {
                            "type": "object",
                            "properties": {
                                "year": { "type": "integer" },
                                "standardPaintCost": { "type": "number" },
                                "tblPaintCost": { "type": "number" }
                            },
                            "required": ["year", "standardPaintCost", "tblPaintCost"]
                        }
                    }
                },
                "required": ["estimatedSavings", "roiExplanation", "chartData"]
            }),
        }
    }

    pub fn faq_answer() -> Self {
        Self {
            name: "faq_answer",
            json_schema: json!({
                "type": "object",
                "properties": {
                    "response": {
                        "type": "string",
                        "description": "The chatbot response to the user query."
                    }
                },
                "required": ["response"]
            }),
        }
    }

    /// Top-level shape check: an object carrying every required field.
    /// Field types are left to the caller's deserialization.
    pub fn check(&self, value: &Value) -> Result<(), LlmError> {
        let Some(object) = value.as_object() else {
            return Err(self.mismatch("expected a JSON object"));
        };

        let required = self
            .json_schema
            .get("required")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for field in required.iter().filter_map(Value::as_str) {
            if !object.contains_key(field) {
                return Err(self.mismatch(format!("missing required field `{field}`")));
            }
        }

        Ok(())
    }

    fn mismatch(&self, detail: impl Into<String>) -> LlmError {
        LlmError::SchemaMismatch { schema: self.name.to_string(), detail: detail.into() }
    }
}

/// The external text-generation collaborator: a rendered prompt plus an
/// output schema in, a conforming JSON object or an error out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, schema: &OutputSchema) -> Result<Value, LlmError>;

    fn name(&self) -> &str;
}

/// Stand-in used when `llm.enabled = false`.
#[derive(Clone, Debug, Default)]
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    async fn generate(&self, _prompt: &str, _schema: &OutputSchema) -> Result<Value, LlmError> {
        Err(LlmError::Disabled)
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

pub struct HttpTextGenerator {
    provider: LlmProvider,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
    timeout_secs: u64,
    name: String,
    client: reqwest::Client,
}

impl HttpTextGenerator {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| LlmError::Http(format!("failed to create HTTP client: {error}")))?;

        Ok(Self {
            provider: config.provider,
            base_url: config.effective_base_url(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
            name: format!("{}:{}", config.provider.as_str(), config.model),
            client,
        })
    }

    async fn call_ollama(&self, prompt: &str, schema: &OutputSchema) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "format": schema.json_schema,
        });

        let payload = self.send(self.client.post(url).json(&body)).await?;
        payload
            .get("response")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(LlmError::EmptyResponse)
    }

    async fn call_openai(&self, prompt: &str, schema: &OutputSchema) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "response_format": {
                "type": "json_schema",
                "json_schema": { "name": schema.name, "schema": schema.json_schema }
            },
        });

        let mut request = self.client.post(url).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        let payload = self.send(request).await?;
        payload
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(LlmError::EmptyResponse)
    }

    async fn call_anthropic(
        &self,
        prompt: &str,
        schema: &OutputSchema,
    ) -> Result<String, LlmError> {
        let url = format!("{}/v1/messages", self.base_url);
        let content = format!(
            "{prompt}\n\nRespond only with a JSON object matching this JSON schema:\n{}",
            schema.json_schema
        );
        let body = json!({
            "model": self.model,
            "max_tokens": ANTHROPIC_MAX_TOKENS,
            "messages": [{ "role": "user", "content": content }],
        });

        let mut request =
            self.client.post(url).header("anthropic-version", ANTHROPIC_VERSION).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key.expose_secret());
        }

        let payload = self.send(request).await?;
        payload
            .get("content")
            .and_then(Value::as_array)
            .and_then(|blocks| {
                blocks.iter().find_map(|block| {
                    (block.get("type").and_then(Value::as_str) == Some("text"))
                        .then(|| block.get("text").and_then(Value::as_str))
                        .flatten()
                })
            })
            .map(str::to_string)
            .ok_or(LlmError::EmptyResponse)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, LlmError> {
        let response = request.send().await.map_err(|error| self.transport_error(error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status: status.as_u16(), body });
        }

        response.json::<Value>().await.map_err(|error| {
            if error.is_timeout() {
                LlmError::Timeout(self.timeout_secs)
            } else {
                LlmError::InvalidJson(format!("failed to parse response envelope: {error}"))
            }
        })
    }

    fn transport_error(&self, error: reqwest::Error) -> LlmError {
        if error.is_timeout() {
            LlmError::Timeout(self.timeout_secs)
        } else if error.is_connect() {
            LlmError::Http(format!("cannot connect to {}: {error}", self.base_url))
        } else {
            LlmError::Http(format!("request failed: {error}"))
        }
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str, schema: &OutputSchema) -> Result<Value, LlmError> {
        debug!(
            event_name = "llm.generate.request",
            generator = %self.name,
            schema = schema.name,
            prompt_chars = prompt.len(),
            "sending prompt to text-generation collaborator"
        );

        let text = match self.provider {
            LlmProvider::Ollama => self.call_ollama(prompt, schema).await?,
            LlmProvider::OpenAi => self.call_openai(prompt, schema).await?,
            LlmProvider::Anthropic => self.call_anthropic(prompt, schema).await?,
        };

        let value = parse_json_text(&text)?;
        schema.check(&value)?;
        Ok(value)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub fn build_generator(config: &LlmConfig) -> Result<Arc<dyn TextGenerator>, LlmError> {
    if !config.enabled {
        return Ok(Arc::new(DisabledGenerator));
    }
    Ok(Arc::new(HttpTextGenerator::new(config)?))
}

/// Parses model output as JSON, tolerating a surrounding ```json fence.
pub fn parse_json_text(text: &str) -> Result<Value, LlmError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    let unfenced = match trimmed.strip_prefix("```") {
        Some(rest) => {
            let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or_default();
            body.trim_end().strip_suffix("```").unwrap_or(body).trim()
        }
        None => trimmed,
    };

    serde_json::from_str(unfenced)
        .map_err(|error| LlmError::InvalidJson(format!("model output is not valid JSON: {error}")))
}
