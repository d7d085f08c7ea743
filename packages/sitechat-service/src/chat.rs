use std::time::Duration;

use sitechat_domain::{ChatResponse, SearchResult};

use crate::{AnswerPolicy, ChatService, compose, prompt};

impl ChatService {
	/// Answers `query` from the live index.
	///
	/// Always returns a response. When the LLM is enabled and retrieval found context, its
	/// completion replaces the template answer; any provider failure or timeout keeps the
	/// template answer.
	pub async fn chat(&self, query: &str) -> ChatResponse {
		let results = self.search(query, None).await;
		let policy = AnswerPolicy::from(&self.cfg.answer);
		let mut response = compose::compose_with(query, &results, &policy);

		if results.is_empty() {
			return response;
		}
		if let Some(answer) = self.generate(query, &results).await {
			response.answer = answer;
			response.model = self.model_name().to_string();
			response.sources = compose::sources(&results, policy.max_sources);
		}

		response
	}

	async fn generate(&self, query: &str, results: &[SearchResult]) -> Option<String> {
		let cfg = self.llm()?;
		let messages = prompt::build_messages(query, results);
		let completion = tokio::time::timeout(
			Duration::from_millis(cfg.timeout_ms),
			self.providers.answer.complete(cfg, &messages),
		)
		.await;

		match completion {
			Ok(Ok(answer)) => Some(answer),
			Ok(Err(err)) => {
				tracing::warn!(
					error = %err,
					model = %cfg.model,
					"LLM call failed. Using template."
				);

				None
			},
			Err(_) => {
				tracing::warn!(
					model = %cfg.model,
					timeout_ms = cfg.timeout_ms,
					"LLM call timed out. Using template."
				);

				None
			},
		}
	}
}
