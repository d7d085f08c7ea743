use std::time::Duration;

use sitechat_config::SIMILARITY_COSINE;
use sitechat_domain::SearchResult;
use sitechat_index::{Cosine, Jaccard, Query, Similarity};

use crate::ChatService;

impl ChatService {
	/// Ranks the live index against `query`, returning at most `top_k` results (the configured
	/// default when `None`).
	///
	/// With cosine ranking configured, the query is embedded first. A missing embedding provider,
	/// an index without embeddings, or a failed embedding call falls back to Jaccard.
	pub async fn search(&self, query: &str, top_k: Option<usize>) -> Vec<SearchResult> {
		let top_k = top_k.unwrap_or(self.cfg.search.top_k as usize);
		let snapshot = self.snapshot();
		let parsed = Query::from_text(query);

		if parsed.tokens.is_empty() || snapshot.index.is_empty() {
			return Vec::new();
		}

		let (query, similarity) =
			self.prepare(query, parsed, snapshot.index.has_embeddings()).await;

		snapshot.index.search_with(&query, top_k, similarity)
	}

	async fn prepare(
		&self,
		text: &str,
		query: Query,
		index_has_embeddings: bool,
	) -> (Query, &'static dyn Similarity) {
		if self.cfg.search.similarity != SIMILARITY_COSINE {
			return (query, &Jaccard);
		}
		if !index_has_embeddings {
			tracing::warn!("Index has no embeddings. Falling back to Jaccard similarity.");

			return (query, &Jaccard);
		}

		let Some(cfg) = self.embedding() else {
			tracing::warn!("No embedding provider is enabled. Falling back to Jaccard similarity.");

			return (query, &Jaccard);
		};
		let text = vec![text.to_string()];
		let embedded = tokio::time::timeout(
			Duration::from_millis(cfg.timeout_ms),
			self.providers.embedding.embed(cfg, &text),
		)
		.await;

		match embedded {
			Ok(Ok(mut vectors)) if vectors.len() == 1 => {
				let vector = vectors.remove(0);

				(query.with_embedding(vector), &Cosine)
			},
			Ok(Ok(vectors)) => {
				tracing::warn!(
					vectors = vectors.len(),
					"Query embedding has an unexpected shape. Falling back to Jaccard similarity."
				);

				(query, &Jaccard)
			},
			Ok(Err(err)) => {
				tracing::warn!(
					error = %err,
					"Query embedding failed. Falling back to Jaccard similarity."
				);

				(query, &Jaccard)
			},
			Err(_) => {
				tracing::warn!("Query embedding timed out. Falling back to Jaccard similarity.");

				(query, &Jaccard)
			},
		}
	}
}
