use serde::{Deserialize, Serialize};

/// One record of the scraper's output file.
///
/// Only `url`, `status` and `content` are read. Other scraper fields such as `links` and
/// `scraped_at` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedPage {
	pub url: String,
	pub status: PageStatus,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub content: Option<PageContent>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}
impl ScrapedPage {
	pub fn success(url: impl Into<String>, content: PageContent) -> Self {
		Self { url: url.into(), status: PageStatus::Success, content: Some(content), error: None }
	}

	pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			status: PageStatus::Error,
			content: None,
			error: Some(error.into()),
		}
	}

	/// The page content, when the page was scraped successfully.
	pub fn usable_content(&self) -> Option<&PageContent> {
		match self.status {
			PageStatus::Success => self.content.as_ref(),
			PageStatus::Error => None,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
	Success,
	Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub content: String,
	#[serde(default)]
	pub headings: Vec<String>,
}
