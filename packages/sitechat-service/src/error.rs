pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Index error: {message}")]
	Index { message: String },
}
impl From<sitechat_providers::Error> for Error {
	fn from(err: sitechat_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<sitechat_index::Error> for Error {
	fn from(err: sitechat_index::Error) -> Self {
		Self::Index { message: err.to_string() }
	}
}
