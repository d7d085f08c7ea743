use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tokens of this many bytes or fewer are dropped.
pub const MAX_DROPPED_TOKEN_LEN: usize = 2;

/// Lower-cases `text`, blanks everything outside `[a-z0-9]` and whitespace, and keeps the
/// remaining tokens longer than two characters, in order and with repeats.
pub fn tokenize(text: &str) -> Vec<String> {
	let mut normalized = String::with_capacity(text.len());

	for ch in text.chars() {
		let lower = ch.to_ascii_lowercase();

		if lower.is_ascii_lowercase() || lower.is_ascii_digit() {
			normalized.push(lower);
		} else {
			normalized.push(' ');
		}
	}

	normalized
		.split_whitespace()
		.filter(|token| token.len() > MAX_DROPPED_TOKEN_LEN)
		.map(str::to_string)
		.collect()
}

/// A token multiset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct TokenBag {
	counts: BTreeMap<String, u32>,
	total: u32,
}
impl TokenBag {
	pub fn from_text(text: &str) -> Self {
		Self::from_tokens(tokenize(text))
	}

	pub fn from_tokens<I>(tokens: I) -> Self
	where
		I: IntoIterator<Item = String>,
	{
		let mut counts = BTreeMap::new();

		for token in tokens {
			*counts.entry(token).or_insert(0_u32) += 1;
		}

		counts.into()
	}

	pub fn is_empty(&self) -> bool {
		self.total == 0
	}

	/// Number of tokens, counting repeats.
	pub fn total(&self) -> u32 {
		self.total
	}

	pub fn distinct(&self) -> usize {
		self.counts.len()
	}

	pub fn count(&self, token: &str) -> u32 {
		self.counts.get(token).copied().unwrap_or(0)
	}

	/// `Σ min(self[t], other[t])` over shared tokens.
	pub fn intersection(&self, other: &Self) -> u32 {
		let (small, large) =
			if self.distinct() <= other.distinct() { (self, other) } else { (other, self) };

		small.counts.iter().map(|(token, count)| (*count).min(large.count(token))).sum()
	}

	/// `Σ max(self[t], other[t])` over the union of tokens.
	pub fn union(&self, other: &Self) -> u32 {
		self.total + other.total - self.intersection(other)
	}
}
impl From<BTreeMap<String, u32>> for TokenBag {
	fn from(mut counts: BTreeMap<String, u32>) -> Self {
		counts.retain(|_, count| *count > 0);

		let total = counts.values().sum();

		Self { counts, total }
	}
}
impl From<TokenBag> for BTreeMap<String, u32> {
	fn from(bag: TokenBag) -> Self {
		bag.counts
	}
}
