use crate::{IndexEntry, TokenBag};

/// Query-side features handed to a [`Similarity`].
#[derive(Clone, Debug, Default)]
pub struct Query {
	pub tokens: TokenBag,
	pub embedding: Option<Vec<f32>>,
}
impl Query {
	pub fn from_text(text: &str) -> Self {
		Self { tokens: TokenBag::from_text(text), embedding: None }
	}

	pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
		self.embedding = Some(embedding);

		self
	}
}

/// Scores one indexed passage against a query.
///
/// Implementations return a value in `[0, 1]`; zero means "unrelated" and the ranker drops it.
pub trait Similarity
where
	Self: Send + Sync,
{
	fn name(&self) -> &'static str;

	fn score(&self, query: &Query, entry: &IndexEntry<'_>) -> f32;
}

/// Counted Jaccard overlap between token multisets.
#[derive(Clone, Copy, Debug, Default)]
pub struct Jaccard;
impl Similarity for Jaccard {
	fn name(&self) -> &'static str {
		"jaccard"
	}

	fn score(&self, query: &Query, entry: &IndexEntry<'_>) -> f32 {
		jaccard(&query.tokens, entry.tokens)
	}
}

/// Cosine between the query embedding and the passage embedding, clamped to `[0, 1]`.
///
/// Scores zero when either side has no embedding, so it never surfaces passages indexed without
/// vectors.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cosine;
impl Similarity for Cosine {
	fn name(&self) -> &'static str {
		"cosine"
	}

	fn score(&self, query: &Query, entry: &IndexEntry<'_>) -> f32 {
		match (query.embedding.as_deref(), entry.embedding) {
			(Some(query), Some(passage)) => cosine(query, passage).clamp(0.0, 1.0),
			_ => 0.0,
		}
	}
}

pub fn jaccard(query: &TokenBag, passage: &TokenBag) -> f32 {
	let union = query.union(passage);

	if union == 0 {
		return 0.0;
	}

	query.intersection(passage) as f32 / union as f32
}

/// Jaccard similarity of two token lists, counting repeats.
pub fn calculate_similarity(a: &[String], b: &[String]) -> f32 {
	let a = TokenBag::from_tokens(a.iter().cloned());
	let b = TokenBag::from_tokens(b.iter().cloned());

	jaccard(&a, &b)
}

pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
	if a.len() != b.len() || a.is_empty() {
		return 0.0;
	}

	let mut dot = 0.0_f32;
	let mut norm_a = 0.0_f32;
	let mut norm_b = 0.0_f32;

	for (x, y) in a.iter().zip(b) {
		dot += x * y;
		norm_a += x * x;
		norm_b += y * y;
	}

	if norm_a <= 0.0 || norm_b <= 0.0 {
		return 0.0;
	}

	let score = dot / (norm_a.sqrt() * norm_b.sqrt());

	if score.is_finite() { score } else { 0.0 }
}
