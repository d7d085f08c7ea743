use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
	pub answer: String,
	pub sources: Vec<SourceRef>,
	/// `template-based` or the name of the model that wrote `answer`.
	pub model: String,
	#[serde(with = "crate::time_serde")]
	pub timestamp: OffsetDateTime,
	pub context_chunk_count: usize,
	pub status: ResponseStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef {
	pub title: String,
	pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
	Success,
	Error,
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	#[test]
	fn serializes_timestamp_as_rfc3339() {
		let response = ChatResponse {
			answer: "Hello.".to_string(),
			sources: vec![SourceRef {
				title: "Home".to_string(),
				url: "https://example.com".to_string(),
			}],
			model: "template-based".to_string(),
			timestamp: datetime!(2026-01-02 03:04:05 UTC),
			context_chunk_count: 1,
			status: ResponseStatus::Success,
		};
		let json = serde_json::to_value(&response).expect("serialize failed");

		assert_eq!(json["timestamp"], "2026-01-02T03:04:05Z");
		assert_eq!(json["status"], "success");
		assert_eq!(json["sources"][0]["url"], "https://example.com");

		let parsed: ChatResponse = serde_json::from_value(json).expect("parse failed");

		assert_eq!(parsed, response);
	}
}
