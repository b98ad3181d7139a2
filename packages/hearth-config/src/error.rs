use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read config file at {}: {source}", path.display())]
	ReadConfig { path: PathBuf, source: std::io::Error },
	/// Carries the TOML diagnostic so a bad key or value is named in the startup error.
	#[error("Failed to parse config file at {}: {source}", path.display())]
	ParseConfig { path: PathBuf, source: toml::de::Error },
	#[error("{message}")]
	Validation { message: String },
}
