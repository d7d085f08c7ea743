//! On-disk layout of an index: a passage collection and a derived feature file.
//!
//! The feature file records the BLAKE3 digest of the passage file it was derived from. Loading
//! never fails: a missing or unreadable passage file falls back to the built-in passages, and an
//! unusable feature file is rebuilt from the passages.

use std::{
	fs, io,
	path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sitechat_domain::Passage;

use crate::{Error, LexicalIndex, Result, TokenBag, defaults};

pub const PASSAGES_FILE: &str = "passages.json";
pub const FEATURES_FILE: &str = "features.json";
pub const FEATURES_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexPaths {
	dir: PathBuf,
}
impl IndexPaths {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	pub fn passages(&self) -> PathBuf {
		self.dir.join(PASSAGES_FILE)
	}

	pub fn features(&self) -> PathBuf {
		self.dir.join(FEATURES_FILE)
	}
}

/// Where a loaded index came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexSource {
	/// Passages and features were both read from disk.
	Persisted,
	/// Passages were read from disk; features were recomputed.
	Rebuilt,
	/// Nothing usable was on disk; the built-in passages are served.
	Defaults,
	/// Built in memory from freshly chunked passages.
	Built,
}
impl IndexSource {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Persisted => "persisted",
			Self::Rebuilt => "rebuilt",
			Self::Defaults => "defaults",
			Self::Built => "built",
		}
	}

	/// Whether the passages were read from the index directory.
	pub fn is_persisted(&self) -> bool {
		matches!(self, Self::Persisted | Self::Rebuilt)
	}
}

#[derive(Debug)]
pub struct Loaded {
	pub index: LexicalIndex,
	pub source: IndexSource,
}

#[derive(Serialize, Deserialize)]
struct FeatureFile {
	version: u32,
	passages_digest: String,
	token_bags: Vec<TokenBag>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	embeddings: Option<Vec<Vec<f32>>>,
}

pub fn save(index: &LexicalIndex, paths: &IndexPaths) -> Result<()> {
	fs::create_dir_all(paths.dir())
		.map_err(|err| Error::Io { path: paths.dir().to_path_buf(), source: err })?;

	let passages = serde_json::to_vec_pretty(&index.passages)?;
	let features = FeatureFile {
		version: FEATURES_VERSION,
		passages_digest: digest(&passages),
		token_bags: index.token_bags.clone(),
		embeddings: index.embeddings.clone(),
	};
	let features = serde_json::to_vec(&features)?;

	// Passages first: a crash in between leaves a digest mismatch, which load repairs.
	write_atomic(&paths.passages(), &passages)?;
	write_atomic(&paths.features(), &features)?;

	tracing::info!(dir = %paths.dir().display(), passages = index.len(), "Index saved.");

	Ok(())
}

pub fn load(paths: &IndexPaths) -> Loaded {
	let passages_path = paths.passages();
	let raw = match fs::read(&passages_path) {
		Ok(raw) => raw,
		Err(err) if err.kind() == io::ErrorKind::NotFound => {
			tracing::warn!(
				path = %passages_path.display(),
				"Passage file not found. Serving built-in passages."
			);

			return defaults_loaded();
		},
		Err(err) => {
			tracing::warn!(
				path = %passages_path.display(),
				error = %err,
				"Passage file is unreadable. Serving built-in passages."
			);

			return defaults_loaded();
		},
	};
	let passages: Vec<Passage> = match serde_json::from_slice(&raw) {
		Ok(passages) => passages,
		Err(err) => {
			tracing::warn!(
				path = %passages_path.display(),
				error = %err,
				"Passage file is malformed. Serving built-in passages."
			);

			return defaults_loaded();
		},
	};

	if passages.is_empty() {
		tracing::warn!(
			path = %passages_path.display(),
			"Passage file is empty. Serving built-in passages."
		);

		return defaults_loaded();
	}

	match read_features(paths, &raw, passages.len()) {
		Ok(features) => {
			tracing::info!(passages = passages.len(), "Index loaded.");

			Loaded {
				index: LexicalIndex {
					passages,
					token_bags: features.token_bags,
					embeddings: features.embeddings,
				},
				source: IndexSource::Persisted,
			}
		},
		Err(err) => {
			tracing::warn!(
				error = %err,
				"Feature file is unusable. Rebuilding token bags from passages."
			);

			Loaded { index: LexicalIndex::build(passages), source: IndexSource::Rebuilt }
		},
	}
}

fn read_features(
	paths: &IndexPaths,
	passages_raw: &[u8],
	passages: usize,
) -> Result<FeatureFile> {
	let path = paths.features();
	let raw = fs::read(&path).map_err(|err| Error::Io { path, source: err })?;
	let features: FeatureFile = serde_json::from_slice(&raw)?;

	if features.version != FEATURES_VERSION {
		return Err(Error::StaleFeatures {
			message: format!(
				"Feature file version {} is not supported; expected {FEATURES_VERSION}.",
				features.version
			),
		});
	}
	if features.passages_digest != digest(passages_raw) {
		return Err(Error::StaleFeatures {
			message: "Feature file was derived from a different passage file.".to_string(),
		});
	}
	if features.token_bags.len() != passages {
		return Err(Error::StaleFeatures {
			message: format!(
				"Feature file has {} token bags for {passages} passages.",
				features.token_bags.len()
			),
		});
	}
	if let Some(embeddings) = features.embeddings.as_ref()
		&& embeddings.len() != passages
	{
		return Err(Error::EmbeddingMismatch { passages, embeddings: embeddings.len() });
	}

	Ok(features)
}

fn defaults_loaded() -> Loaded {
	Loaded {
		index: LexicalIndex::build(defaults::default_passages()),
		source: IndexSource::Defaults,
	}
}

fn digest(bytes: &[u8]) -> String {
	blake3::hash(bytes).to_hex().to_string()
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
	let mut tmp = path.as_os_str().to_owned();

	tmp.push(format!(".{}.tmp", Uuid::new_v4().simple()));

	let tmp = PathBuf::from(tmp);

	fs::write(&tmp, bytes).map_err(|err| Error::Io { path: tmp.clone(), source: err })?;

	if let Err(err) = fs::rename(&tmp, path) {
		let _ = fs::remove_file(&tmp);

		return Err(Error::Io { path: path.to_path_buf(), source: err });
	}

	Ok(())
}
