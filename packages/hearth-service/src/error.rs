pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Catalog error: {message}")]
	Catalog { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
}
impl From<hearth_storage::Error> for Error {
	fn from(err: hearth_storage::Error) -> Self {
		Self::Catalog { message: err.to_string() }
	}
}

impl From<hearth_providers::Error> for Error {
	fn from(err: hearth_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
