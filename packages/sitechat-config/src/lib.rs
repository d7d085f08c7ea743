mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Answer, Chunking, Config, EmbeddingProviderConfig, Index, LlmProviderConfig, Providers,
	SIMILARITY_COSINE, SIMILARITY_JACCARD, Search, Service,
};

use std::{env, fs, net::SocketAddr, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg, |name| env::var(name).ok());

	validate(&cfg)?;

	Ok(cfg)
}

/// Resolves provider keys and drops blank optional strings.
///
/// `lookup_env` is consulted only for providers that carry `api_key_env` and no inline key.
pub fn normalize<F>(cfg: &mut Config, lookup_env: F)
where
	F: Fn(&str) -> Option<String>,
{
	if let Some(llm) = cfg.providers.llm.as_mut() {
		llm.api_key = resolve_api_key(llm.api_key.take(), llm.api_key_env.as_deref(), &lookup_env);
	}
	if let Some(embedding) = cfg.providers.embedding.as_mut() {
		embedding.api_key = resolve_api_key(
			embedding.api_key.take(),
			embedding.api_key_env.as_deref(),
			&lookup_env,
		);
	}

	cfg.search.similarity = cfg.search.similarity.trim().to_ascii_lowercase();
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (field, value) in [
		("service.http_bind", &cfg.service.http_bind),
		("service.admin_bind", &cfg.service.admin_bind),
	] {
		if value.parse::<SocketAddr>().is_err() {
			return Err(Error::InvalidAddress { field, value: value.clone() });
		}
	}

	if cfg.index.dir.as_os_str().is_empty() {
		return Err(Error::Validation { message: "index.dir must be non-empty.".to_string() });
	}
	if cfg.chunking.target_words == 0 {
		return Err(Error::Validation {
			message: "chunking.target_words must be greater than zero.".to_string(),
		});
	}
	if cfg.chunking.overlap_words >= cfg.chunking.target_words {
		return Err(Error::Validation {
			message: "chunking.overlap_words must be less than chunking.target_words.".to_string(),
		});
	}
	if cfg.search.top_k == 0 {
		return Err(Error::Validation {
			message: "search.top_k must be greater than zero.".to_string(),
		});
	}

	match cfg.search.similarity.as_str() {
		SIMILARITY_JACCARD => {},
		SIMILARITY_COSINE =>
			if cfg.providers.embedding.is_none() {
				return Err(Error::Validation {
					message: "search.similarity = cosine requires [providers.embedding]."
						.to_string(),
				});
			},
		_ => {
			return Err(Error::Validation {
				message: "search.similarity must be one of jaccard or cosine.".to_string(),
			});
		},
	}

	if !(1..=5).contains(&cfg.answer.max_sources) {
		return Err(Error::Validation {
			message: "answer.max_sources must be in the range 1-5.".to_string(),
		});
	}
	if !(1..=2).contains(&cfg.answer.max_body_results) {
		return Err(Error::Validation {
			message: "answer.max_body_results must be in the range 1-2.".to_string(),
		});
	}

	if let Some(llm) = cfg.providers.llm.as_ref() {
		if llm.timeout_ms == 0 {
			return Err(Error::Validation {
				message: "providers.llm.timeout_ms must be greater than zero.".to_string(),
			});
		}
		if !llm.temperature.is_finite() || !(0.0..=2.0).contains(&llm.temperature) {
			return Err(Error::Validation {
				message: "providers.llm.temperature must be a finite number in the range 0.0-2.0."
					.to_string(),
			});
		}
		if llm.max_tokens == 0 {
			return Err(Error::Validation {
				message: "providers.llm.max_tokens must be greater than zero.".to_string(),
			});
		}
	}
	if let Some(embedding) = cfg.providers.embedding.as_ref() {
		if embedding.timeout_ms == 0 {
			return Err(Error::Validation {
				message: "providers.embedding.timeout_ms must be greater than zero.".to_string(),
			});
		}
		if embedding.dimensions == Some(0) {
			return Err(Error::Validation {
				message: "providers.embedding.dimensions must be greater than zero.".to_string(),
			});
		}
	}

	Ok(())
}

fn resolve_api_key<F>(
	inline: Option<String>,
	env_name: Option<&str>,
	lookup_env: &F,
) -> Option<String>
where
	F: Fn(&str) -> Option<String>,
{
	let non_blank = |value: String| {
		let trimmed = value.trim();

		if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
	};

	if let Some(key) = inline.and_then(non_blank) {
		return Some(key);
	}

	env_name.map(str::trim).filter(|name| !name.is_empty()).and_then(lookup_env).and_then(non_blank)
}
