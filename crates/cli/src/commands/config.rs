use std::env;
use std::fs;
use std::path::Path;

use secrecy::ExposeSecret;
use stellar_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

struct Field {
    key: &'static str,
    env_key: &'static str,
    value: String,
}

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for field in fields(&config) {
        let source = field_source(
            field.key,
            field.env_key,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(format!("- {} = {} (source: {source})", field.key, field.value));
    }

    lines.join("\n")
}

fn fields(config: &AppConfig) -> Vec<Field> {
    let llm = &config.llm;
    let server = &config.server;
    let api_key = llm
        .api_key
        .as_ref()
        .map(|key| redact_token(key.expose_secret()))
        .unwrap_or_else(|| "<unset>".to_string());
    let static_dir = server
        .static_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| "<unset>".to_string());

    vec![
        Field { key: "llm.enabled", env_key: "STELLAR_LLM_ENABLED", value: llm.enabled.to_string() },
        Field {
            key: "llm.provider",
            env_key: "STELLAR_LLM_PROVIDER",
            value: llm.provider.as_str().to_string(),
        },
        Field { key: "llm.model", env_key: "STELLAR_LLM_MODEL", value: llm.model.clone() },
        Field {
            key: "llm.base_url",
            env_key: "STELLAR_LLM_BASE_URL",
            value: llm.effective_base_url(),
        },
        Field { key: "llm.api_key", env_key: "STELLAR_LLM_API_KEY", value: api_key },
        Field {
            key: "llm.timeout_secs",
            env_key: "STELLAR_LLM_TIMEOUT_SECS",
            value: llm.timeout_secs.to_string(),
        },
        Field {
            key: "server.bind_address",
            env_key: "STELLAR_SERVER_BIND_ADDRESS",
            value: server.bind_address.clone(),
        },
        Field { key: "server.port", env_key: "STELLAR_SERVER_PORT", value: server.port.to_string() },
        Field { key: "server.static_dir", env_key: "STELLAR_SERVER_STATIC_DIR", value: static_dir },
        Field {
            key: "server.graceful_shutdown_secs",
            env_key: "STELLAR_SERVER_GRACEFUL_SHUTDOWN_SECS",
            value: server.graceful_shutdown_secs.to_string(),
        },
        Field {
            key: "logging.level",
            env_key: "STELLAR_LOGGING_LEVEL",
            value: config.logging.level.clone(),
        },
        Field {
            key: "logging.format",
            env_key: "STELLAR_LOGGING_FORMAT",
            value: format!("{:?}", config.logging.format).to_ascii_lowercase(),
        },
    ]
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: &str,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if env::var_os(env_key).is_some() {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn redact_token(token: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    if let Some((prefix, _)) = trimmed.split_once('-') {
        return format!("{prefix}-***");
    }

    "<redacted>".to_string()
}

#[cfg(test)]
mod tests {
    use super::{contains_path, redact_token};

    #[test]
    fn redaction_keeps_only_key_prefix() {
        assert_eq!(redact_token("sk-live-abcdef"), "sk-***");
        assert_eq!(redact_token("opaque"), "<redacted>");
        assert_eq!(redact_token("  "), "<empty>");
    }

    #[test]
    fn nested_key_lookup_walks_tables() {
        let doc: toml::Value = "[llm]\nmodel = \"llama3.1\"\n".parse().expect("toml");
        assert!(contains_path(&doc, "llm.model"));
        assert!(!contains_path(&doc, "llm.api_key"));
        assert!(!contains_path(&doc, "server.port"));
    }
}
