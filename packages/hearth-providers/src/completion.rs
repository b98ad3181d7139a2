use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// Sends one instruction/input exchange to an OpenAI-compatible chat-completion endpoint and
/// returns the reply text. A reply without text content comes back as an empty string.
pub async fn complete(
	cfg: &hearth_config::LlmProviderConfig,
	instruction: &str,
	input: &str,
) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = build_request_body(cfg, instruction, input);
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_completion_response(json)
}

fn build_request_body(
	cfg: &hearth_config::LlmProviderConfig,
	instruction: &str,
	input: &str,
) -> Value {
	serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": [
			{ "role": "system", "content": instruction },
			{ "role": "user", "content": input },
		],
	})
}

fn parse_completion_response(json: Value) -> Result<String> {
	let choice = json
		.get("choices")
		.and_then(|v| v.as_array())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Completion response is missing choices array.".to_string(),
		})?
		.first();
	let content = choice
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.unwrap_or_default();

	Ok(content.to_string())
}

#[cfg(test)]
mod tests {
	use serde_json::Map;

	use super::*;

	fn provider() -> hearth_config::LlmProviderConfig {
		hearth_config::LlmProviderConfig {
			provider_id: "test".to_string(),
			api_base: "http://127.0.0.1:1".to_string(),
			api_key: "test-key".to_string(),
			path: "/chat/completions".to_string(),
			model: "test-model".to_string(),
			temperature: 0.2,
			timeout_ms: 1_000,
			default_headers: Map::new(),
		}
	}

	#[test]
	fn request_carries_instruction_then_input() {
		let body = build_request_body(&provider(), "Extract filters.", "villa in Damac Hills");

		assert_eq!(body["model"], "test-model");
		assert_eq!(body["messages"][0]["role"], "system");
		assert_eq!(body["messages"][0]["content"], "Extract filters.");
		assert_eq!(body["messages"][1]["role"], "user");
		assert_eq!(body["messages"][1]["content"], "villa in Damac Hills");
	}

	#[test]
	fn parses_first_choice_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "role": "assistant", "content": "{\"bedrooms\": 3}" } },
				{ "message": { "role": "assistant", "content": "ignored" } }
			]
		});

		assert_eq!(parse_completion_response(json).expect("parse failed"), "{\"bedrooms\": 3}");
	}

	#[test]
	fn missing_content_is_empty_text() {
		let json = serde_json::json!({ "choices": [ { "message": { "content": null } } ] });

		assert_eq!(parse_completion_response(json).expect("parse failed"), "");

		let json = serde_json::json!({ "choices": [] });

		assert_eq!(parse_completion_response(json).expect("parse failed"), "");
	}

	#[test]
	fn missing_choices_is_an_error() {
		let json = serde_json::json!({ "error": { "message": "quota exceeded" } });

		assert!(matches!(parse_completion_response(json), Err(Error::InvalidResponse { .. })));
	}
}
