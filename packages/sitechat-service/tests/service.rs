use std::{
	fs,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};

use sitechat_chunking::{ChunkingConfig, chunk_pages};
use sitechat_config::{Config, EmbeddingProviderConfig, LlmProviderConfig};
use sitechat_domain::{Passage, ResponseStatus};
use sitechat_index::IndexSource;
use sitechat_providers::llm::ChatMessage;
use sitechat_service::{
	AnswerPolicy, AnswerProvider, BoxFuture, ChatService, EmbeddingProvider, Error,
	NO_INFORMATION_ANSWER, Providers, Result, TEMPLATE_MODEL, compose, compose_with,
};
use sitechat_testkit::{
	TestIndexDir, sample_pages, test_config, unreachable_embedding, unreachable_llm,
};

struct SpyAnswer {
	calls: Arc<AtomicUsize>,
}
impl SpyAnswer {
	fn new() -> Self {
		Self { calls: Arc::new(AtomicUsize::new(0)) }
	}

	fn count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl AnswerProvider for SpyAnswer {
	fn complete<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		messages: &'a [ChatMessage],
	) -> BoxFuture<'a, Result<String>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let has_context = messages.iter().any(|message| message.content.contains("Source: "));

		Box::pin(async move {
			if has_context {
				Ok("Generated answer.".to_string())
			} else {
				Err(Error::Provider { message: "Prompt carried no context.".to_string() })
			}
		})
	}
}

struct FailingAnswer;
impl AnswerProvider for FailingAnswer {
	fn complete<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_messages: &'a [ChatMessage],
	) -> BoxFuture<'a, Result<String>> {
		let err = Error::Provider { message: "Upstream returned 500.".to_string() };

		Box::pin(async move { Err(err) })
	}
}

struct SlowAnswer;
impl AnswerProvider for SlowAnswer {
	fn complete<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_messages: &'a [ChatMessage],
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move {
			tokio::time::sleep(Duration::from_secs(5)).await;

			Ok("Too late.".to_string())
		})
	}
}

/// Two keyword axes plus a constant, enough to make cosine ranking predictable.
struct KeywordEmbedding;
impl EmbeddingProvider for KeywordEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		let vectors = texts
			.iter()
			.map(|text| {
				let text = text.to_lowercase();
				let axis = |word: &str| if text.contains(word) { 1.0 } else { 0.0 };

				vec![axis("sensor"), axis("contact"), 0.1]
			})
			.collect();

		Box::pin(async move { Ok(vectors) })
	}
}

struct FailingEmbedding;
impl EmbeddingProvider for FailingEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		_texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Err(Error::Provider { message: "Embedding failed.".to_string() }) })
	}
}

fn passages() -> Vec<Passage> {
	chunk_pages(&sample_pages(), &ChunkingConfig::default())
}

fn providers(answer: Arc<dyn AnswerProvider>) -> Providers {
	Providers::new(answer, Arc::new(KeywordEmbedding))
}

fn llm_config(dir: &TestIndexDir, timeout_ms: u64) -> Config {
	let mut cfg = test_config(dir.path());
	let mut llm = unreachable_llm(Some("test-key"));

	llm.timeout_ms = timeout_ms;
	cfg.providers.llm = Some(llm);

	cfg
}

fn cosine_config(dir: &TestIndexDir) -> Config {
	let mut cfg = test_config(dir.path());

	cfg.search.similarity = "cosine".to_string();
	cfg.providers.embedding = Some(unreachable_embedding(Some("test-key")));

	cfg
}

#[tokio::test]
async fn chat_without_llm_uses_template() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let service = ChatService::new(test_config(dir.path()), providers(Arc::new(FailingAnswer)));

	service.build(passages());

	let response = service.chat("Do you sell smart sensors?").await;

	assert_eq!(response.model, TEMPLATE_MODEL);
	assert_eq!(response.status, ResponseStatus::Success);
	assert!(response.answer.starts_with("GaoTech offers smart sensors for buildings."));
	assert_eq!(response.sources[0].url, "https://gaotech.com/iot-solutions");
	assert!(response.sources.len() <= 2);
	assert!(response.context_chunk_count > 0);
}

#[tokio::test]
async fn template_applies_prefix_and_suffix() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let service = ChatService::new(test_config(dir.path()), providers(Arc::new(FailingAnswer)));

	service.build(passages());

	let response = service.chat("How much does energy management cost?").await;

	assert!(response.answer.starts_with("Here's how it works: Energy management reduces"));
	assert!(response.answer.ends_with("ROI through energy savings and operational efficiency."));
	assert_eq!(response.sources[0].url, "https://gaotech.com/energy");
}

#[tokio::test]
async fn chat_uses_llm_answer_when_enabled() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let spy = Arc::new(SpyAnswer::new());
	let service = ChatService::new(llm_config(&dir, 1_000), providers(spy.clone()));

	service.build(passages());

	let response = service.chat("smart sensors").await;

	assert_eq!(response.answer, "Generated answer.");
	assert_eq!(response.model, "test-model");
	assert_eq!(response.sources[0].url, "https://gaotech.com/iot-solutions");
	assert_eq!(spy.count(), 1);
}

#[tokio::test]
async fn llm_answer_cites_leading_results() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let spy = Arc::new(SpyAnswer::new());
	let service = ChatService::new(llm_config(&dir, 1_000), providers(spy.clone()));

	service.build(passages());

	let query = "gaotech energy sensors contact";
	let results = service.search(query, None).await;
	let response = service.chat(query).await;

	assert_eq!(spy.count(), 1);
	assert_eq!(response.model, "test-model");
	assert_eq!(response.sources, compose::sources(&results, 2));
	assert!(response.sources.iter().all(|source| {
		results.iter().take(2).any(|result| result.passage.source.url == source.url)
	}));
}

#[tokio::test]
async fn llm_failure_falls_back_to_template() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let service = ChatService::new(llm_config(&dir, 1_000), providers(Arc::new(FailingAnswer)));

	service.build(passages());

	let query = "smart sensors";
	let results = service.search(query, None).await;
	let expected = compose_with(query, &results, &AnswerPolicy::default());
	let response = service.chat(query).await;

	assert_eq!(response.answer, expected.answer);
	assert_eq!(response.sources, expected.sources);
	assert_eq!(response.model, TEMPLATE_MODEL);
	assert_eq!(response.status, ResponseStatus::Success);
}

#[tokio::test]
async fn llm_timeout_falls_back_to_template() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let service = ChatService::new(llm_config(&dir, 50), providers(Arc::new(SlowAnswer)));

	service.build(passages());

	let response = service.chat("smart sensors").await;

	assert_eq!(response.model, TEMPLATE_MODEL);
	assert!(response.answer.contains("smart sensors"));
}

#[tokio::test]
async fn no_results_skip_the_llm() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let spy = Arc::new(SpyAnswer::new());
	let service = ChatService::new(llm_config(&dir, 1_000), providers(spy.clone()));

	service.build(passages());

	for query in ["zebra xylophone", "", "   ", "a an"] {
		let response = service.chat(query).await;

		assert_eq!(response.answer, NO_INFORMATION_ANSWER);
		assert!(response.sources.is_empty());
		assert_eq!(response.context_chunk_count, 0);
	}

	assert_eq!(spy.count(), 0);
}

#[tokio::test]
async fn search_honors_top_k() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let service = ChatService::new(test_config(dir.path()), providers(Arc::new(FailingAnswer)));

	service.build(passages());

	let results = service.search("gaotech energy sensors contact", Some(2)).await;

	assert!(!results.is_empty());
	assert!(results.len() <= 2);
	assert!(results.windows(2).all(|pair| pair[0].similarity >= pair[1].similarity));
	assert!(service.search("gaotech", Some(0)).await.is_empty());
}

#[test]
fn load_without_index_serves_defaults() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let mut cfg = test_config(dir.path());

	cfg.index.dir = dir.child("missing");

	let service = ChatService::new(cfg, providers(Arc::new(FailingAnswer)));

	assert!(!service.load());
	assert_eq!(service.index_source(), IndexSource::Defaults);
	assert_eq!(service.passage_count(), 7);
}

#[tokio::test]
async fn indexed_passages_reload_as_persisted() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let service = ChatService::new(test_config(dir.path()), providers(Arc::new(FailingAnswer)));
	let report = service.index_passages(passages()).await.expect("Failed to index passages.");

	assert!(!report.embedded);
	assert_eq!(service.index_source(), IndexSource::Built);

	let reopened =
		ChatService::open(test_config(dir.path()), providers(Arc::new(FailingAnswer)));

	assert_eq!(reopened.index_source(), IndexSource::Persisted);
	assert_eq!(reopened.passage_count(), report.passage_count);

	let reload = reopened.reload();

	assert_eq!(reload.index_source, IndexSource::Persisted);
	assert_eq!(reload.passage_count, report.passage_count);
}

#[test]
fn rebuilt_features_are_written_back() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let service = ChatService::new(test_config(dir.path()), providers(Arc::new(FailingAnswer)));

	service.build(passages());
	service.save().expect("Failed to save index.");
	fs::write(service.paths().features(), b"{}").expect("Failed to corrupt features.");

	assert!(service.load());
	assert_eq!(service.index_source(), IndexSource::Rebuilt);
	assert!(service.load());
	assert_eq!(service.index_source(), IndexSource::Persisted);
}

#[test]
fn rebuild_does_not_disturb_held_snapshot() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let service = ChatService::new(test_config(dir.path()), providers(Arc::new(FailingAnswer)));

	service.build(passages());

	let held = service.snapshot();
	let count = held.index.len();

	service.build(Vec::new());

	assert_eq!(held.index.len(), count);
	assert_eq!(service.passage_count(), 0);
}

#[tokio::test]
async fn cosine_search_uses_embeddings() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let service = ChatService::new(cosine_config(&dir), providers(Arc::new(FailingAnswer)));
	let report = service.index_passages(passages()).await.expect("Failed to index passages.");

	assert!(report.embedded);

	let results = service.search("Which sensors do you sell?", None).await;

	assert_eq!(results[0].passage.source.url, "https://gaotech.com/iot-solutions");
	assert!(results.iter().all(|result| result.similarity > 0.0));
}

#[tokio::test]
async fn cosine_falls_back_to_jaccard_when_query_embedding_fails() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let indexer = ChatService::new(cosine_config(&dir), providers(Arc::new(FailingAnswer)));

	indexer.index_passages(passages()).await.expect("Failed to index passages.");

	let service = ChatService::open(
		cosine_config(&dir),
		Providers::new(Arc::new(FailingAnswer), Arc::new(FailingEmbedding)),
	);
	let results = service.search("smart sensors", None).await;

	assert_eq!(service.index_source(), IndexSource::Persisted);
	assert_eq!(results[0].passage.source.url, "https://gaotech.com/iot-solutions");
}

#[tokio::test]
async fn cosine_indexing_requires_embedding_provider() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let mut cfg = cosine_config(&dir);

	cfg.providers.embedding = None;

	let service = ChatService::new(cfg, providers(Arc::new(FailingAnswer)));

	assert!(matches!(
		service.index_passages(passages()).await,
		Err(Error::InvalidRequest { .. })
	));
}

#[test]
fn exposes_conversation_starters() {
	let dir = TestIndexDir::new().expect("Failed to create test dir.");
	let service = ChatService::new(test_config(dir.path()), providers(Arc::new(FailingAnswer)));

	assert_eq!(service.starters().len(), 4);
	assert!(service.starters().iter().all(|starter| starter.ends_with('?')));
	assert_eq!(service.model_name(), TEMPLATE_MODEL);
}
