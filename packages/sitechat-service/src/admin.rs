use std::time::Duration;

use serde::{Deserialize, Serialize};

use sitechat_config::SIMILARITY_COSINE;
use sitechat_domain::Passage;
use sitechat_index::{IndexSource, LexicalIndex, store};

use crate::{ChatService, Error, IndexSnapshot, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloadReport {
	pub index_source: IndexSource,
	pub passage_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexReport {
	pub passage_count: usize,
	pub embedded: bool,
}

impl ChatService {
	/// Replaces the live index with one built from `passages`. Nothing is written to disk.
	pub fn build(&self, passages: Vec<Passage>) {
		let index = LexicalIndex::build(passages);

		tracing::info!(passages = index.len(), "Index built.");

		self.publish(IndexSnapshot { index, source: IndexSource::Built });
	}

	/// Loads the persisted index and publishes it.
	///
	/// Returns `true` when the passages came from the index directory and `false` when the
	/// built-in passages are served instead. Recomputed features are written back so the next
	/// load reads them directly.
	pub fn load(&self) -> bool {
		let paths = self.paths();
		let loaded = store::load(&paths);

		if loaded.source == IndexSource::Rebuilt
			&& let Err(err) = store::save(&loaded.index, &paths)
		{
			tracing::warn!(error = %err, "Failed to persist rebuilt features.");
		}

		let persisted = loaded.source.is_persisted();

		tracing::info!(
			source = loaded.source.as_str(),
			passages = loaded.index.len(),
			"Index published."
		);

		self.publish(IndexSnapshot { index: loaded.index, source: loaded.source });

		persisted
	}

	pub fn reload(&self) -> ReloadReport {
		self.load();

		let snapshot = self.snapshot();

		ReloadReport { index_source: snapshot.source, passage_count: snapshot.index.len() }
	}

	/// Persists the live index to the configured directory.
	pub fn save(&self) -> Result<()> {
		let snapshot = self.snapshot();

		store::save(&snapshot.index, &self.paths())?;

		Ok(())
	}

	/// Builds, embeds when cosine ranking is configured, publishes and saves a fresh index.
	pub async fn index_passages(&self, passages: Vec<Passage>) -> Result<IndexReport> {
		let mut index = LexicalIndex::build(passages);
		let mut embedded = false;

		if self.cfg.search.similarity == SIMILARITY_COSINE && !index.is_empty() {
			let cfg = self.embedding().ok_or_else(|| Error::InvalidRequest {
				message: "Cosine similarity requires an enabled embedding provider.".to_string(),
			})?;
			let texts: Vec<String> =
				index.passages().iter().map(|passage| passage.text.clone()).collect();
			let embeddings = tokio::time::timeout(
				Duration::from_millis(cfg.timeout_ms),
				self.providers.embedding.embed(cfg, &texts),
			)
			.await
			.map_err(|_| Error::Provider {
				message: "Embedding request timed out.".to_string(),
			})??;

			index = index.with_embeddings(embeddings)?;
			embedded = true;
		}

		let passage_count = index.len();

		store::save(&index, &self.paths())?;
		self.publish(IndexSnapshot { index, source: IndexSource::Built });

		tracing::info!(passages = passage_count, embedded, "Index written.");

		Ok(IndexReport { passage_count, embedded })
	}
}
