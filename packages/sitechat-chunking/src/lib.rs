use unicode_segmentation::UnicodeSegmentation;

use sitechat_domain::{ContentType, Passage, PassageSource, ScrapedPage, count_words};

const KEPT_PUNCTUATION: &str = ".,!?;:()-'\"“”‘’";

#[derive(Clone, Debug)]
pub struct ChunkingConfig {
	pub target_words: usize,
	pub overlap_words: usize,
	pub min_heading_words: usize,
}
impl Default for ChunkingConfig {
	fn default() -> Self {
		Self { target_words: 400, overlap_words: 50, min_heading_words: 10 }
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkStats {
	pub passages: usize,
	pub min_words: usize,
	pub max_words: usize,
	pub mean_words: f32,
}

/// Collapses whitespace and blanks out characters that carry no prose.
pub fn clean_text(text: &str) -> String {
	let mut stripped = String::with_capacity(text.len());

	for ch in text.chars() {
		if ch.is_alphanumeric() || ch == '_' || KEPT_PUNCTUATION.contains(ch) {
			stripped.push(ch);
		} else {
			stripped.push(' ');
		}
	}

	stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn split_sentences(text: &str) -> Vec<&str> {
	text.split_sentence_bounds().map(str::trim).filter(|sentence| !sentence.is_empty()).collect()
}

/// Splits `text` into passage texts of at most `target_words` words.
///
/// Sentences are never split, so a single sentence longer than the target becomes a passage on
/// its own. The result always has at least one element, even for empty input.
pub fn split_text(text: &str, cfg: &ChunkingConfig) -> Vec<String> {
	let cleaned = clean_text(text);
	let sentences = split_sentences(&cleaned);

	if sentences.is_empty() {
		return vec![cleaned];
	}

	let mut chunks = Vec::new();
	let mut current: Vec<&str> = Vec::new();
	let mut current_words = 0_usize;

	for sentence in sentences {
		let words = count_words(sentence);

		if current_words + words > cfg.target_words && !current.is_empty() {
			chunks.push(current.join(" "));

			let overlap = overlap_tail(&current, words, cfg);

			current_words = overlap.iter().map(|sentence| count_words(sentence)).sum();
			current = overlap;
		}

		current.push(sentence);

		current_words += words;
	}

	if !current.is_empty() {
		chunks.push(current.join(" "));
	}

	chunks
}

/// Chunks one page's body and, when substantial, its headings.
///
/// Pages that were not scraped successfully yield nothing.
pub fn chunk_page(page: &ScrapedPage, cfg: &ChunkingConfig) -> Vec<Passage> {
	let Some(content) = page.usable_content() else { return Vec::new() };
	let source = PassageSource {
		url: page.url.clone(),
		title: content.title.clone(),
		description: content.description.clone(),
		headings: content.headings.clone(),
		content_type: ContentType::Content,
	};
	let mut passages: Vec<Passage> = split_text(&content.content, cfg)
		.into_iter()
		.enumerate()
		.map(|(chunk_id, text)| Passage::new(text, source.clone(), chunk_id))
		.collect();
	let headings_text = content.headings.join(" ");

	if count_words(&headings_text) > cfg.min_heading_words {
		let heading_source = PassageSource { content_type: ContentType::Headings, ..source };

		passages.extend(
			split_text(&headings_text, cfg)
				.into_iter()
				.enumerate()
				.map(|(chunk_id, text)| Passage::new(text, heading_source.clone(), chunk_id)),
		);
	}

	passages
}

pub fn chunk_pages(pages: &[ScrapedPage], cfg: &ChunkingConfig) -> Vec<Passage> {
	let mut passages = Vec::new();

	for page in pages {
		if page.usable_content().is_none() {
			tracing::debug!(url = %page.url, "Skipping page that was not scraped successfully.");

			continue;
		}

		passages.extend(chunk_page(page, cfg));
	}

	for (global_chunk_id, passage) in passages.iter_mut().enumerate() {
		passage.global_chunk_id = global_chunk_id;
	}

	passages
}

pub fn stats(passages: &[Passage]) -> ChunkStats {
	let Some(min_words) = passages.iter().map(|passage| passage.word_count).min() else {
		return ChunkStats::default();
	};
	let max_words = passages.iter().map(|passage| passage.word_count).max().unwrap_or(min_words);
	let total: usize = passages.iter().map(|passage| passage.word_count).sum();

	ChunkStats {
		passages: passages.len(),
		min_words,
		max_words,
		mean_words: total as f32 / passages.len() as f32,
	}
}

// Walks back from the end of `current`, keeping whole sentences while they fit both the overlap
// budget and the room left next to the incoming sentence.
fn overlap_tail<'a>(current: &[&'a str], next_words: usize, cfg: &ChunkingConfig) -> Vec<&'a str> {
	if cfg.overlap_words == 0 || current.len() < 2 {
		return Vec::new();
	}

	let budget = cfg.overlap_words.min(cfg.target_words.saturating_sub(next_words));
	let mut start = current.len();
	let mut words = 0_usize;

	while start > 0 {
		let sentence_words = count_words(current[start - 1]);

		if words + sentence_words > budget {
			break;
		}

		words += sentence_words;
		start -= 1;
	}

	current[start..].to_vec()
}
