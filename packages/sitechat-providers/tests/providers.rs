use reqwest::header::{AUTHORIZATION, HeaderName};
use serde_json::{Map, Value};

use sitechat_providers::{Error, embedding, llm};
use sitechat_testkit::{unreachable_embedding, unreachable_llm};

#[test]
fn builds_bearer_auth_header() {
	let headers =
		sitechat_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn adds_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("x-tenant".to_string(), Value::from("gaotech"));

	let headers =
		sitechat_providers::auth_headers("secret", &defaults).expect("Failed to build headers.");

	let value = headers.get(HeaderName::from_static("x-tenant")).expect("Missing header.");

	assert_eq!(value, "gaotech");
}

#[test]
fn rejects_non_string_default_header() {
	let mut defaults = Map::new();

	defaults.insert("x-retries".to_string(), Value::from(3));

	assert!(matches!(
		sitechat_providers::auth_headers("secret", &defaults),
		Err(Error::InvalidConfig { .. })
	));
}

#[tokio::test]
async fn completion_without_key_is_a_config_error() {
	let cfg = unreachable_llm(None);
	let result = llm::complete(&cfg, &[llm::ChatMessage::user("Hello")]).await;

	assert!(matches!(result, Err(Error::InvalidConfig { .. })));
}

#[tokio::test]
async fn completion_against_closed_port_fails() {
	let cfg = unreachable_llm(Some("key"));
	let result = llm::complete(&cfg, &[llm::ChatMessage::user("Hello")]).await;

	assert!(matches!(result, Err(Error::Reqwest(_))));
}

#[tokio::test]
async fn embedding_no_texts_skips_request() {
	let cfg = unreachable_embedding(None);
	let embeddings = embedding::embed(&cfg, &[]).await.expect("Empty input must not fail.");

	assert!(embeddings.is_empty());
}

#[tokio::test]
async fn embedding_against_closed_port_fails() {
	let cfg = unreachable_embedding(Some("key"));

	assert!(embedding::embed(&cfg, &["smart sensors".to_string()]).await.is_err());
}
