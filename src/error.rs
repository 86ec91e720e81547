use thiserror::Error;

/// Failures while reading a concept snapshot.
#[derive(Debug, Error)]
pub enum DataError {
	#[error("invalid concept snapshot: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("duplicate concept id: {0}")]
	DuplicateId(String),
	#[error("concept has an empty id (name: {0:?})")]
	EmptyId(String),
	#[error("concept id {0:?} uses a reserved cluster prefix")]
	ReservedId(String),
}

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
	#[error("zoom threshold must be finite and positive, got {0}")]
	InvalidThreshold(f64),
	#[error("decade threshold {decade} must be below year threshold {year}")]
	ThresholdOrder { decade: f64, year: f64 },
}
