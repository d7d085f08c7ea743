use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to access index file at {path:?}.")]
	Io { path: PathBuf, source: std::io::Error },
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("Embedding count {embeddings} does not match passage count {passages}.")]
	EmbeddingMismatch { passages: usize, embeddings: usize },
	#[error("{message}")]
	StaleFeatures { message: String },
}
