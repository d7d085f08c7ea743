pub mod admin;
pub mod chat;
pub mod compose;
pub mod prompt;
pub mod search;

mod error;

pub use admin::{IndexReport, ReloadReport};
pub use compose::{AnswerPolicy, NO_INFORMATION_ANSWER, TEMPLATE_MODEL, compose, compose_with};
pub use error::{Error, Result};

use std::{
	future::Future,
	pin::Pin,
	sync::{Arc, PoisonError, RwLock},
};

use sitechat_config::{Config, EmbeddingProviderConfig, LlmProviderConfig};
use sitechat_index::{IndexPaths, IndexSource, LexicalIndex};
use sitechat_providers::{embedding, llm, llm::ChatMessage};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub const CONVERSATION_STARTERS: [&str; 4] = [
	"What is GaoTech and what do you do?",
	"What IoT solutions do you offer for buildings?",
	"What career opportunities are available?",
	"How can I contact GaoTech?",
];

pub trait AnswerProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [ChatMessage],
	) -> BoxFuture<'a, Result<String>>;
}

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub answer: Arc<dyn AnswerProvider>,
	pub embedding: Arc<dyn EmbeddingProvider>,
}
impl Providers {
	pub fn new(answer: Arc<dyn AnswerProvider>, embedding: Arc<dyn EmbeddingProvider>) -> Self {
		Self { answer, embedding }
	}
}
impl Default for Providers {
	fn default() -> Self {
		Self { answer: Arc::new(DefaultProviders), embedding: Arc::new(DefaultProviders) }
	}
}

/// The index currently being served and where it came from.
#[derive(Debug)]
pub struct IndexSnapshot {
	pub index: LexicalIndex,
	pub source: IndexSource,
}

/// The retrieval core of one serving process.
///
/// The live index sits behind a pointer swap: readers clone the [`Arc`] and search without
/// holding the lock, and rebuilds publish a fresh snapshot in one write.
pub struct ChatService {
	pub cfg: Config,
	pub providers: Providers,
	live: RwLock<Arc<IndexSnapshot>>,
}
impl ChatService {
	/// Starts with an empty index. Call [`ChatService::load`] or [`ChatService::build`] before
	/// serving.
	pub fn new(cfg: Config, providers: Providers) -> Self {
		let empty = IndexSnapshot { index: LexicalIndex::default(), source: IndexSource::Built };

		Self { cfg, providers, live: RwLock::new(Arc::new(empty)) }
	}

	/// Creates the service and loads the persisted index.
	pub fn open(cfg: Config, providers: Providers) -> Self {
		let service = Self::new(cfg, providers);

		service.load();

		service
	}

	pub fn paths(&self) -> IndexPaths {
		IndexPaths::new(&self.cfg.index.dir)
	}

	pub fn snapshot(&self) -> Arc<IndexSnapshot> {
		self.live.read().unwrap_or_else(PoisonError::into_inner).clone()
	}

	pub fn index_source(&self) -> IndexSource {
		self.snapshot().source
	}

	pub fn passage_count(&self) -> usize {
		self.snapshot().index.len()
	}

	/// The model named in responses when the LLM path succeeds, otherwise the template marker.
	pub fn model_name(&self) -> &str {
		match self.llm() {
			Some(cfg) => &cfg.model,
			None => TEMPLATE_MODEL,
		}
	}

	pub fn starters(&self) -> &'static [&'static str] {
		&CONVERSATION_STARTERS
	}

	pub(crate) fn publish(&self, snapshot: IndexSnapshot) {
		let snapshot = Arc::new(snapshot);

		*self.live.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
	}

	pub(crate) fn llm(&self) -> Option<&LlmProviderConfig> {
		self.cfg.providers.llm.as_ref().filter(|cfg| cfg.is_enabled())
	}

	pub(crate) fn embedding(&self) -> Option<&EmbeddingProviderConfig> {
		self.cfg.providers.embedding.as_ref().filter(|cfg| cfg.is_enabled())
	}
}

struct DefaultProviders;
impl AnswerProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [ChatMessage],
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move { Ok(llm::complete(cfg, messages).await?) })
	}
}
impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Ok(embedding::embed(cfg, texts).await?) })
	}
}
