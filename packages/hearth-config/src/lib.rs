mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Assistant, Config, LlmProviderConfig, Postgres, Providers, Search, Service, Storage};

use std::{fs, net::SocketAddr, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.parse::<SocketAddr>().is_err() {
		return Err(Error::Validation {
			message: "service.http_bind must be a socket address.".to_string(),
		});
	}
	if !matches!(cfg.service.environment.as_str(), "production" | "development") {
		return Err(Error::Validation {
			message: "service.environment must be one of production or development.".to_string(),
		});
	}

	match cfg.storage.backend.as_str() {
		"postgres" => {
			let Some(postgres) = cfg.storage.postgres.as_ref() else {
				return Err(Error::Validation {
					message: "storage.postgres is required when storage.backend is postgres."
						.to_string(),
				});
			};

			if postgres.dsn.trim().is_empty() {
				return Err(Error::Validation {
					message: "storage.postgres.dsn must be non-empty.".to_string(),
				});
			}
			if postgres.pool_max_conns == 0 {
				return Err(Error::Validation {
					message: "storage.postgres.pool_max_conns must be greater than zero."
						.to_string(),
				});
			}
		},
		"file" =>
			if cfg.storage.catalog_file.is_none() {
				return Err(Error::Validation {
					message: "storage.catalog_file is required when storage.backend is file."
						.to_string(),
				});
			},
		_ => {
			return Err(Error::Validation {
				message: "storage.backend must be one of postgres or file.".to_string(),
			});
		},
	}

	for (label, provider) in [
		("llm_extractor", &cfg.providers.llm_extractor),
		("llm_responder", &cfg.providers.llm_responder),
	] {
		if provider.api_key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
		if provider.api_base.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_base must be non-empty."),
			});
		}
		if provider.timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("Provider {label} timeout_ms must be greater than zero."),
			});
		}
		if !provider.temperature.is_finite() || provider.temperature < 0.0 {
			return Err(Error::Validation {
				message: format!(
					"Provider {label} temperature must be a finite number zero or greater."
				),
			});
		}
		if provider.default_headers.values().any(|value| !value.is_string()) {
			return Err(Error::Validation {
				message: format!("Provider {label} default_headers values must be strings."),
			});
		}
	}

	for (label, value) in [
		("search.result_cap", cfg.search.result_cap),
		("search.display_cap", cfg.search.display_cap),
		("search.digest_size", cfg.search.digest_size),
		("search.digest_amenities", cfg.search.digest_amenities),
	] {
		if value == 0 {
			return Err(Error::Validation { message: format!("{label} must be greater than zero.") });
		}
	}

	if cfg.search.display_cap > cfg.search.result_cap {
		return Err(Error::Validation {
			message: "search.display_cap must not exceed search.result_cap.".to_string(),
		});
	}
	if cfg.search.digest_size > cfg.search.result_cap {
		return Err(Error::Validation {
			message: "search.digest_size must not exceed search.result_cap.".to_string(),
		});
	}
	if cfg.search.completion_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.completion_timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("assistant.persona", &cfg.assistant.persona),
		("assistant.site", &cfg.assistant.site),
		("assistant.market", &cfg.assistant.market),
		("assistant.currency", &cfg.assistant.currency),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg
		.storage
		.catalog_file
		.as_deref()
		.map(|path| path.as_os_str().is_empty())
		.unwrap_or(false)
	{
		cfg.storage.catalog_file = None;
	}

	cfg.service.environment = cfg.service.environment.trim().to_ascii_lowercase();
	cfg.storage.backend = cfg.storage.backend.trim().to_ascii_lowercase();
}
