pub mod page;
pub mod passage;
pub mod response;
pub mod time_serde;

pub use page::{PageContent, PageStatus, ScrapedPage};
pub use passage::{ContentType, Passage, PassageSource, SearchResult, count_words};
pub use response::{ChatResponse, ResponseStatus, SourceRef};
