use sitechat_domain::Passage;

use crate::{Error, Result, TokenBag};

/// Passages plus their derived features, aligned by position.
///
/// Position is the identity of a passage inside the index. The index is never mutated after it
/// is built; a rebuild produces a new value.
#[derive(Clone, Debug, Default)]
pub struct LexicalIndex {
	pub(crate) passages: Vec<Passage>,
	pub(crate) token_bags: Vec<TokenBag>,
	pub(crate) embeddings: Option<Vec<Vec<f32>>>,
}
impl LexicalIndex {
	pub fn build(passages: Vec<Passage>) -> Self {
		let token_bags =
			passages.iter().map(|passage| TokenBag::from_text(&passage.text)).collect();

		Self { passages, token_bags, embeddings: None }
	}

	/// Attaches one embedding per passage, in passage order.
	pub fn with_embeddings(mut self, embeddings: Vec<Vec<f32>>) -> Result<Self> {
		if embeddings.len() != self.passages.len() {
			return Err(Error::EmbeddingMismatch {
				passages: self.passages.len(),
				embeddings: embeddings.len(),
			});
		}

		self.embeddings = Some(embeddings);

		Ok(self)
	}

	pub fn len(&self) -> usize {
		self.passages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.passages.is_empty()
	}

	pub fn passages(&self) -> &[Passage] {
		&self.passages
	}

	pub fn has_embeddings(&self) -> bool {
		self.embeddings.is_some()
	}

	pub fn entry(&self, position: usize) -> Option<IndexEntry<'_>> {
		let passage = self.passages.get(position)?;
		let tokens = self.token_bags.get(position)?;
		let embedding = self
			.embeddings
			.as_ref()
			.and_then(|embeddings| embeddings.get(position))
			.map(Vec::as_slice);

		Some(IndexEntry { position, passage, tokens, embedding })
	}

	pub fn entries(&self) -> impl Iterator<Item = IndexEntry<'_>> {
		(0..self.len()).filter_map(|position| self.entry(position))
	}
}

#[derive(Clone, Copy, Debug)]
pub struct IndexEntry<'a> {
	pub position: usize,
	pub passage: &'a Passage,
	pub tokens: &'a TokenBag,
	pub embedding: Option<&'a [f32]>,
}
