mod error;

pub use error::{Error, Result};

use std::{
	env, fs,
	path::{Path, PathBuf},
};

use serde_json::Map;
use uuid::Uuid;

use sitechat_config::{
	Answer, Chunking, Config, EmbeddingProviderConfig, Index, LlmProviderConfig, Providers,
	Search, Service,
};
use sitechat_domain::{PageContent, ScrapedPage};

/// A scratch directory under the OS temp dir, removed on drop.
pub struct TestIndexDir {
	path: PathBuf,
}
impl TestIndexDir {
	pub fn new() -> Result<Self> {
		let path = env::temp_dir().join(format!("sitechat_test_{}", Uuid::new_v4().simple()));

		fs::create_dir_all(&path)?;

		Ok(Self { path })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// A path inside the directory that does not exist yet.
	pub fn child(&self, name: &str) -> PathBuf {
		self.path.join(name)
	}

	pub fn write_pages(&self, pages: &[ScrapedPage]) -> Result<PathBuf> {
		let path = self.child("scraped_content.json");

		fs::write(&path, serde_json::to_vec_pretty(pages)?)?;

		Ok(path)
	}

	/// Writes a minimal config file whose index directory is `index_dir`.
	pub fn write_config(&self, index_dir: &Path) -> Result<PathBuf> {
		let path = self.child("sitechat.toml");
		let raw = format!(
			"[service]\nhttp_bind = \"127.0.0.1:0\"\nadmin_bind = \"127.0.0.1:0\"\n\n\
			[index]\ndir = {}\n",
			serde_json::to_string(&index_dir.display().to_string())?
		);

		fs::write(&path, raw)?;

		Ok(path)
	}
}
impl Drop for TestIndexDir {
	fn drop(&mut self) {
		if let Err(err) = fs::remove_dir_all(&self.path) {
			eprintln!("Failed to remove test directory {}: {err}.", self.path.display());
		}
	}
}

/// Three scraped pages and one failed fetch, shaped like the scraper's output.
pub fn sample_pages() -> Vec<ScrapedPage> {
	vec![
		ScrapedPage::success(
			"https://gaotech.com/iot-solutions",
			PageContent {
				title: "IoT Solutions".to_string(),
				description: "Connected sensors for commercial buildings.".to_string(),
				content: "GaoTech offers smart sensors for buildings. Our sensors track temperature, humidity and occupancy in real time. Facility teams see every reading on one dashboard.".to_string(),
				headings: vec!["IoT Solutions".to_string(), "Sensors".to_string()],
			},
		),
		ScrapedPage::success(
			"https://gaotech.com/energy",
			PageContent {
				title: "Energy Management".to_string(),
				description: "Lower operating costs.".to_string(),
				content: "Energy management reduces operating cost by up to thirty percent. Automated controls shift load away from peak pricing windows.".to_string(),
				headings: vec![
					"Energy management for offices, warehouses and retail".to_string(),
					"Peak demand control with automated load shifting".to_string(),
				],
			},
		),
		ScrapedPage::success(
			"https://gaotech.com/contact",
			PageContent {
				title: "Contact".to_string(),
				description: "Talk to our team.".to_string(),
				content: "Contact GaoTech for a consultation. Our engineers reply within one business day.".to_string(),
				headings: vec!["Contact".to_string()],
			},
		),
		ScrapedPage::failed("https://gaotech.com/careers", "502 Bad Gateway"),
	]
}

/// A valid config rooted at `index_dir`, with no providers configured.
pub fn test_config(index_dir: &Path) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		index: Index { dir: index_dir.to_path_buf() },
		chunking: Chunking { target_words: 400, overlap_words: 50, min_heading_words: 10 },
		search: Search { top_k: 5, similarity: "jaccard".to_string() },
		answer: Answer { max_sources: 2, max_body_results: 2 },
		providers: Providers { llm: None, embedding: None },
	}
}

/// An LLM provider pointing at an address nothing listens on.
pub fn unreachable_llm(api_key: Option<&str>) -> LlmProviderConfig {
	LlmProviderConfig {
		api_base: "http://127.0.0.1:1".to_string(),
		path: "/v1/chat/completions".to_string(),
		model: "test-model".to_string(),
		api_key: api_key.map(str::to_string),
		api_key_env: None,
		temperature: 0.0,
		max_tokens: 64,
		timeout_ms: 500,
		default_headers: Map::new(),
	}
}

pub fn unreachable_embedding(api_key: Option<&str>) -> EmbeddingProviderConfig {
	EmbeddingProviderConfig {
		api_base: "http://127.0.0.1:1".to_string(),
		path: "/v1/embeddings".to_string(),
		model: "test-embedding".to_string(),
		api_key: api_key.map(str::to_string),
		api_key_env: None,
		dimensions: None,
		timeout_ms: 500,
		default_headers: Map::new(),
	}
}
