use serde::Serialize;
use serde_json::Value;

use sitechat_config::LlmProviderConfig;

use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
	pub role: &'static str,
	pub content: String,
}
impl ChatMessage {
	pub fn system(content: impl Into<String>) -> Self {
		Self { role: "system", content: content.into() }
	}

	pub fn user(content: impl Into<String>) -> Self {
		Self { role: "user", content: content.into() }
	}
}

/// Sends a chat completion request and returns the first choice's text.
pub async fn complete(cfg: &LlmProviderConfig, messages: &[ChatMessage]) -> Result<String> {
	let api_key = crate::require_key(cfg.api_key.as_deref(), "LLM")?;
	let client = crate::client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"max_tokens": cfg.max_tokens,
		"messages": messages,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;
	let content = parse_completion(&json)?;

	tracing::debug!(model = %cfg.model, chars = content.len(), "LLM completion received.");

	Ok(content)
}

fn parse_completion(json: &Value) -> Result<String> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Completion response is missing message content.".to_string(),
		})?;
	let content = content.trim();

	if content.is_empty() {
		return Err(Error::InvalidResponse {
			message: "Completion response content is empty.".to_string(),
		});
	}

	Ok(content.to_string())
}
