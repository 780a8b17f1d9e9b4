//! Error types for loading dependency graphs.

use thiserror::Error;

/// Errors raised while turning JSON input into a graph.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The input is not valid JSON.
	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// The top-level value is not a JSON object.
	#[error("expected a JSON object mapping names to dependency lists")]
	NotAnObject,

	/// One entry has neither the list nor the rich-entry shape.
	#[error("invalid entry for {key:?}: {source}")]
	InvalidEntry {
		/// The offending object key.
		key: String,
		/// Why the entry was rejected.
		source: serde_json::Error,
	},
}

/// Result alias for graph loading.
pub type Result<T> = std::result::Result<T, LoadError>;
