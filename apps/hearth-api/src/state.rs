use std::sync::Arc;

use color_eyre::eyre;

use hearth_service::{HearthService, PropertyCatalog};
use hearth_storage::{db::Db, memory::MemoryCatalog};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<HearthService>,
}
impl AppState {
	pub async fn new(config: hearth_config::Config) -> color_eyre::Result<Self> {
		let catalog: Arc<dyn PropertyCatalog> = match config.storage.backend.as_str() {
			"postgres" => {
				let postgres = config
					.storage
					.postgres
					.as_ref()
					.ok_or_else(|| eyre::eyre!("storage.postgres is required."))?;
				let db = Db::connect(postgres).await?;

				db.ensure_schema().await?;

				Arc::new(db)
			},
			"file" => {
				let path = config
					.storage
					.catalog_file
					.as_ref()
					.ok_or_else(|| eyre::eyre!("storage.catalog_file is required."))?;

				Arc::new(MemoryCatalog::from_path(path)?)
			},
			other => return Err(eyre::eyre!("Unsupported storage backend {other:?}.")),
		};

		tracing::info!(backend = %config.storage.backend, "Property catalog ready.");

		Ok(Self::from_service(HearthService::new(config, catalog)))
	}

	pub fn from_service(service: HearthService) -> Self {
		Self { service: Arc::new(service) }
	}
}
