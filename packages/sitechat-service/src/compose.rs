//! Template answers built directly from ranked passages.

use std::collections::HashSet;

use time::OffsetDateTime;

use sitechat_config::Answer;
use sitechat_domain::{ChatResponse, ResponseStatus, SearchResult, SourceRef};

pub const TEMPLATE_MODEL: &str = "template-based";
pub const NO_INFORMATION_ANSWER: &str = "I don't have specific information about that topic in my \
	knowledge base. Please visit our website for more details or contact our team directly.";

const HOW_PREFIX: &str = "Here's how it works: ";
const ROI_SUFFIX: &str = "Our solutions are designed to provide excellent ROI through energy \
	savings and operational efficiency.";
const CONTACT_SUFFIX: &str =
	"You can reach out to our team for a personalized consultation and quote.";
const CAREERS_SUFFIX: &str =
	"Open positions and internships are listed on our careers page, and we welcome applications.";

/// How many results feed the answer body and the source list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerPolicy {
	pub max_sources: usize,
	pub max_body_results: usize,
}
impl Default for AnswerPolicy {
	fn default() -> Self {
		Self { max_sources: 2, max_body_results: 2 }
	}
}
impl From<&Answer> for AnswerPolicy {
	fn from(cfg: &Answer) -> Self {
		Self {
			max_sources: cfg.max_sources as usize,
			max_body_results: cfg.max_body_results as usize,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Suffix {
	Roi,
	Contact,
	Careers,
}
impl Suffix {
	fn text(self) -> &'static str {
		match self {
			Self::Roi => ROI_SUFFIX,
			Self::Contact => CONTACT_SUFFIX,
			Self::Careers => CAREERS_SUFFIX,
		}
	}
}

pub fn compose(query: &str, results: &[SearchResult]) -> ChatResponse {
	compose_with(query, results, &AnswerPolicy::default())
}

pub fn compose_with(query: &str, results: &[SearchResult], policy: &AnswerPolicy) -> ChatResponse {
	let used = body_results(results, policy.max_body_results);
	let answer = if used.is_empty() {
		NO_INFORMATION_ANSWER.to_string()
	} else {
		template_answer(query, &used)
	};

	ChatResponse {
		answer,
		sources: dedup_sources(used.into_iter().take(policy.max_sources)),
		model: TEMPLATE_MODEL.to_string(),
		timestamp: OffsetDateTime::now_utc(),
		context_chunk_count: results.len(),
		status: ResponseStatus::Success,
	}
}

/// Sources of the first `max_sources` results, deduplicated by URL in result order.
pub fn sources(results: &[SearchResult], max_sources: usize) -> Vec<SourceRef> {
	dedup_sources(results.iter().take(max_sources))
}

fn dedup_sources<'a>(results: impl IntoIterator<Item = &'a SearchResult>) -> Vec<SourceRef> {
	let mut seen = HashSet::new();

	results
		.into_iter()
		.filter(|result| seen.insert(result.passage.source.url.as_str()))
		.map(|result| SourceRef {
			title: result.passage.source.title.clone(),
			url: result.passage.source.url.clone(),
		})
		.collect()
}

fn template_answer(query: &str, used: &[&SearchResult]) -> String {
	let words = query_words(query);
	let mut answer = String::new();

	if words.first().is_some_and(|word| word == "how") {
		answer.push_str(HOW_PREFIX);
	}

	let parts: Vec<&str> = used
		.iter()
		.map(|result| result.passage.text.trim())
		.filter(|part| !part.is_empty())
		.collect();

	answer.push_str(&parts.join(" "));

	if let Some(suffix) = suffix_for(&words) {
		answer.push(' ');
		answer.push_str(suffix.text());
	}

	answer
}

/// The top result, followed by the runner-up when it scores at least half as well.
fn body_results(results: &[SearchResult], max_body_results: usize) -> Vec<&SearchResult> {
	let Some(top) = results.first() else {
		return Vec::new();
	};
	let mut used = vec![top];

	if max_body_results >= 2
		&& let Some(second) = results.get(1)
		&& second.similarity >= top.similarity / 2.0
	{
		used.push(second);
	}

	used
}

fn suffix_for(words: &[String]) -> Option<Suffix> {
	let any = |matches: fn(&str) -> bool| words.iter().any(|word| matches(word));

	if any(|word| word.contains("cost") || word.contains("price") || word.starts_with("pricing")) {
		return Some(Suffix::Roi);
	}
	if any(|word| word.starts_with("contact") || word == "reach") {
		return Some(Suffix::Contact);
	}
	if any(|word| word.starts_with("career") || word.starts_with("job")) {
		return Some(Suffix::Careers);
	}

	None
}

fn query_words(query: &str) -> Vec<String> {
	query
		.split(|c: char| !c.is_alphanumeric())
		.filter(|word| !word.is_empty())
		.map(str::to_lowercase)
		.collect()
}

#[cfg(test)]
mod tests {
	use sitechat_domain::{Passage, PassageSource};

	use super::*;

	fn result(title: &str, text: &str, similarity: f32) -> SearchResult {
		SearchResult {
			passage: Passage::new(
				text.to_string(),
				PassageSource {
					url: format!("https://gaotech.com/{}", title.to_lowercase()),
					title: title.to_string(),
					..Default::default()
				},
				0,
			),
			similarity,
		}
	}

	#[test]
	fn empty_results_return_fallback() {
		let response = compose("anything at all", &[]);

		assert_eq!(response.answer, NO_INFORMATION_ANSWER);
		assert!(response.sources.is_empty());
		assert_eq!(response.model, TEMPLATE_MODEL);
		assert_eq!(response.context_chunk_count, 0);
		assert_eq!(response.status, ResponseStatus::Success);
	}

	#[test]
	fn second_result_joins_body_when_close() {
		let results = [result("Sensors", "Smart sensors.", 0.4), result("Energy", "Savings.", 0.2)];

		assert_eq!(compose("sensors", &results).answer, "Smart sensors. Savings.");
	}

	#[test]
	fn weak_second_result_is_left_out() {
		let results =
			[result("Sensors", "Smart sensors.", 0.4), result("Energy", "Savings.", 0.19)];

		assert_eq!(compose("sensors", &results).answer, "Smart sensors.");
	}

	#[test]
	fn body_limit_of_one_uses_top_result_only() {
		let results = [result("Sensors", "Smart sensors.", 0.4), result("Energy", "Savings.", 0.4)];
		let policy = AnswerPolicy { max_sources: 2, max_body_results: 1 };

		assert_eq!(compose_with("sensors", &results, &policy).answer, "Smart sensors.");
	}

	#[test]
	fn how_prefix_and_cost_suffix_both_apply() {
		let results = [result("Energy", "Energy management cuts costs.", 0.5)];
		let answer = compose("How much does it cost?", &results).answer;

		assert_eq!(answer, format!("{HOW_PREFIX}Energy management cuts costs. {ROI_SUFFIX}"));
	}

	#[test]
	fn cost_takes_precedence_over_contact() {
		let results = [result("Contact", "Call us.", 0.5)];
		let answer = compose("contact sales about pricing", &results).answer;

		assert!(answer.ends_with(ROI_SUFFIX));
		assert!(!answer.contains(CONTACT_SUFFIX));
	}

	#[test]
	fn contact_and_career_suffixes() {
		let results = [result("Contact", "Call us.", 0.5)];

		assert!(compose("How can I reach you", &results).answer.ends_with(CONTACT_SUFFIX));
		assert!(compose("Any jobs open?", &results).answer.ends_with(CAREERS_SUFFIX));
		assert_eq!(compose("Tell me about sensors", &results).answer, "Call us.");
	}

	#[test]
	fn how_only_matches_leading_word() {
		let results = [result("About", "We build.", 0.5)];

		assert_eq!(compose("show me sensors", &results).answer, "We build.");
		assert_eq!(compose("tell me how", &results).answer, "We build.");
	}

	#[test]
	fn sources_come_from_body_passages_only() {
		let results = [
			result("Sensors", "A.", 0.9),
			result("Sensors", "B.", 0.8),
			result("Energy", "C.", 0.7),
			result("Contact", "D.", 0.6),
		];
		let response = compose("sensors", &results);
		let urls: Vec<&str> = response.sources.iter().map(|source| source.url.as_str()).collect();

		assert_eq!(response.answer, "A. B.");
		assert_eq!(urls, vec!["https://gaotech.com/sensors"]);
		assert_eq!(response.context_chunk_count, 4);
	}

	#[test]
	fn dropped_runner_up_is_not_a_source() {
		let results =
			[result("Sensors", "Smart sensors.", 0.9), result("Energy", "Savings.", 0.1)];
		let response = compose("sensors", &results);
		let urls: Vec<&str> = response.sources.iter().map(|source| source.url.as_str()).collect();

		assert_eq!(response.answer, "Smart sensors.");
		assert_eq!(urls, vec!["https://gaotech.com/sensors"]);
	}

	#[test]
	fn source_limit_caps_body_sources() {
		let results = [result("Sensors", "A.", 0.9), result("Energy", "B.", 0.8)];
		let policy = AnswerPolicy { max_sources: 1, max_body_results: 2 };
		let response = compose_with("sensors", &results, &policy);

		assert_eq!(response.answer, "A. B.");
		assert_eq!(response.sources.len(), 1);
		assert_eq!(response.sources[0].url, "https://gaotech.com/sensors");
	}

	#[test]
	fn generated_answer_sources_use_leading_results() {
		let results = [
			result("Sensors", "A.", 0.9),
			result("Sensors", "B.", 0.8),
			result("Energy", "C.", 0.1),
		];
		let urls: Vec<String> = sources(&results, 2).into_iter().map(|source| source.url).collect();

		assert_eq!(urls, vec!["https://gaotech.com/sensors".to_string()]);
	}
}
