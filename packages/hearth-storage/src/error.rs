#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Failed to read catalog file at {path:?}.")]
	Io { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to decode catalog file at {path:?}.")]
	Decode { path: std::path::PathBuf, source: serde_json::Error },
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
}
