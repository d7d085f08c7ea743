//! Offline step that turns scraped pages into a persisted index.

use std::{
	fs,
	path::{Path, PathBuf},
};

use clap::Parser;
use color_eyre::eyre::{self, WrapErr};

use sitechat_chunking::{ChunkStats, ChunkingConfig};
use sitechat_config::Config;
use sitechat_domain::ScrapedPage;
use sitechat_service::{ChatService, IndexReport, Providers};

#[derive(Debug, Parser)]
#[command(
	version = sitechat_cli::VERSION,
	rename_all = "kebab",
	styles = sitechat_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// JSON array of scraped pages.
	#[arg(long, short = 'p', value_name = "FILE")]
	pub pages: PathBuf,
}

#[derive(Debug)]
pub struct IndexSummary {
	pub pages: usize,
	pub stats: ChunkStats,
	pub report: IndexReport,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = sitechat_config::load(&args.config)?;

	sitechat_cli::init_tracing(&config.service.log_level);

	let pages = read_pages(&args.pages)?;
	let service = ChatService::new(config, Providers::default());
	let summary = index_pages(&service, &pages).await?;

	tracing::info!(
		dir = %service.paths().dir().display(),
		pages = summary.pages,
		passages = summary.report.passage_count,
		embedded = summary.report.embedded,
		"Indexing finished."
	);

	Ok(())
}

pub fn read_pages(path: &Path) -> color_eyre::Result<Vec<ScrapedPage>> {
	let raw = fs::read(path)
		.wrap_err_with(|| format!("Failed to read pages file {}.", path.display()))?;
	let pages: Vec<ScrapedPage> = serde_json::from_slice(&raw)
		.wrap_err_with(|| format!("Pages file {} is not a JSON array of pages.", path.display()))?;

	Ok(pages)
}

pub fn chunking_config(config: &Config) -> ChunkingConfig {
	ChunkingConfig {
		target_words: config.chunking.target_words as usize,
		overlap_words: config.chunking.overlap_words as usize,
		min_heading_words: config.chunking.min_heading_words as usize,
	}
}

/// Chunks `pages`, then builds, publishes and saves the index on `service`.
pub async fn index_pages(
	service: &ChatService,
	pages: &[ScrapedPage],
) -> color_eyre::Result<IndexSummary> {
	let usable = pages.iter().filter(|page| page.usable_content().is_some()).count();

	if usable == 0 {
		return Err(eyre::eyre!("No successfully scraped pages to index."));
	}

	let passages = sitechat_chunking::chunk_pages(pages, &chunking_config(&service.cfg));
	let stats = sitechat_chunking::stats(&passages);

	tracing::info!(
		pages = usable,
		skipped = pages.len() - usable,
		passages = stats.passages,
		min_words = stats.min_words,
		max_words = stats.max_words,
		mean_words = stats.mean_words,
		"Pages chunked."
	);

	let report = service.index_passages(passages).await?;

	Ok(IndexSummary { pages: usable, stats, report })
}
