use serde::{Deserialize, Serialize};

/// A bounded excerpt of one page's text together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPassage")]
pub struct Passage {
	pub text: String,
	pub word_count: usize,
	pub source: PassageSource,
	/// Position within the page, restarting at zero for each content type.
	pub chunk_id: usize,
	/// Position within the whole corpus.
	pub global_chunk_id: usize,
}
impl Passage {
	pub fn new(text: String, source: PassageSource, chunk_id: usize) -> Self {
		let word_count = count_words(&text);

		Self { text, word_count, source, chunk_id, global_chunk_id: 0 }
	}
}
impl From<RawPassage> for Passage {
	fn from(raw: RawPassage) -> Self {
		let word_count = raw.word_count.unwrap_or_else(|| count_words(&raw.text));

		Self {
			text: raw.text,
			word_count,
			source: raw.source,
			chunk_id: raw.chunk_id,
			global_chunk_id: raw.global_chunk_id,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageSource {
	pub url: String,
	pub title: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub headings: Vec<String>,
	#[serde(default, skip_serializing_if = "ContentType::is_body")]
	pub content_type: ContentType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
	#[default]
	Content,
	Headings,
}
impl ContentType {
	pub fn is_body(&self) -> bool {
		matches!(self, Self::Content)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
	#[serde(flatten)]
	pub passage: Passage,
	/// Score in `[0, 1]`. Never zero for a returned result.
	pub similarity: f32,
}

/// Older passage files key the text as `content` and may omit `word_count` and the ids.
#[derive(Deserialize)]
struct RawPassage {
	#[serde(alias = "content")]
	text: String,
	word_count: Option<usize>,
	source: PassageSource,
	#[serde(default)]
	chunk_id: usize,
	#[serde(default)]
	global_chunk_id: usize,
}

pub fn count_words(text: &str) -> usize {
	text.split_whitespace().count()
}
