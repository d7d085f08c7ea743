use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

pub const SIMILARITY_JACCARD: &str = "jaccard";
pub const SIMILARITY_COSINE: &str = "cosine";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub index: Index,
	#[serde(default)]
	pub chunking: Chunking,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub answer: Answer,
	#[serde(default)]
	pub providers: Providers,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Index {
	/// Directory holding `passages.json` and `features.json`.
	pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chunking {
	#[serde(default = "default_target_words")]
	pub target_words: u32,
	#[serde(default = "default_overlap_words")]
	pub overlap_words: u32,
	/// Headings are only indexed when their combined word count exceeds this.
	#[serde(default = "default_min_heading_words")]
	pub min_heading_words: u32,
}
impl Default for Chunking {
	fn default() -> Self {
		Self {
			target_words: default_target_words(),
			overlap_words: default_overlap_words(),
			min_heading_words: default_min_heading_words(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	#[serde(default = "default_top_k")]
	pub top_k: u32,
	/// One of `jaccard` or `cosine`.
	#[serde(default = "default_similarity")]
	pub similarity: String,
}
impl Default for Search {
	fn default() -> Self {
		Self { top_k: default_top_k(), similarity: default_similarity() }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Answer {
	#[serde(default = "default_max_sources")]
	pub max_sources: u32,
	#[serde(default = "default_max_body_results")]
	pub max_body_results: u32,
}
impl Default for Answer {
	fn default() -> Self {
		Self { max_sources: default_max_sources(), max_body_results: default_max_body_results() }
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Providers {
	pub llm: Option<LlmProviderConfig>,
	pub embedding: Option<EmbeddingProviderConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub api_base: String,
	pub path: String,
	pub model: String,
	/// Inline key. Takes precedence over `api_key_env`.
	pub api_key: Option<String>,
	/// Name of an environment variable holding the key.
	pub api_key_env: Option<String>,
	#[serde(default = "default_temperature")]
	pub temperature: f32,
	#[serde(default = "default_max_tokens")]
	pub max_tokens: u32,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}
impl LlmProviderConfig {
	pub fn is_enabled(&self) -> bool {
		self.api_key.is_some()
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub api_base: String,
	pub path: String,
	pub model: String,
	pub api_key: Option<String>,
	pub api_key_env: Option<String>,
	pub dimensions: Option<u32>,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}
impl EmbeddingProviderConfig {
	pub fn is_enabled(&self) -> bool {
		self.api_key.is_some()
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_target_words() -> u32 {
	400
}

fn default_overlap_words() -> u32 {
	50
}

fn default_min_heading_words() -> u32 {
	10
}

fn default_top_k() -> u32 {
	5
}

fn default_similarity() -> String {
	SIMILARITY_JACCARD.to_string()
}

fn default_max_sources() -> u32 {
	2
}

fn default_max_body_results() -> u32 {
	2
}

fn default_temperature() -> f32 {
	0.7
}

fn default_max_tokens() -> u32 {
	500
}

fn default_timeout_ms() -> u64 {
	15_000
}
