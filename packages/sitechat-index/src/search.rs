use sitechat_domain::SearchResult;

use crate::{Jaccard, LexicalIndex, Query, Similarity};

impl LexicalIndex {
	/// Ranks passages against `query` by counted Jaccard similarity.
	pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchResult> {
		self.search_with(&Query::from_text(query), top_k, &Jaccard)
	}

	/// Ranks passages with an arbitrary similarity.
	///
	/// Results are ordered by descending score with ties kept in index order. Passages scoring
	/// zero are never returned, and a query without tokens returns nothing.
	pub fn search_with(
		&self,
		query: &Query,
		top_k: usize,
		similarity: &dyn Similarity,
	) -> Vec<SearchResult> {
		if top_k == 0 || self.is_empty() || query.tokens.is_empty() {
			return Vec::new();
		}

		let mut scored: Vec<(usize, f32)> = self
			.entries()
			.filter_map(|entry| {
				let score = similarity.score(query, &entry);

				(score.is_finite() && score > 0.0).then_some((entry.position, score.min(1.0)))
			})
			.collect();

		// `sort_by` is stable, which keeps equal scores in index order.
		scored.sort_by(|a, b| b.1.total_cmp(&a.1));
		scored.truncate(top_k);

		tracing::debug!(
			similarity = similarity.name(),
			candidates = self.len(),
			returned = scored.len(),
			"Search ranked passages."
		);

		scored
			.into_iter()
			.map(|(position, similarity)| SearchResult {
				passage: self.passages[position].clone(),
				similarity,
			})
			.collect()
	}
}
