//! Scratch Postgres catalogs for integration tests.
//!
//! Every [`TestDatabase`] is a fresh database created next to the one `HEARTH_PG_DSN` names and
//! dropped afterwards. The catalog helpers apply the real schema and insert listings through the
//! storage layer.

pub mod fixtures;

mod error;

pub use error::{Error, Result};

use std::{env, future::Future, mem, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::runtime::Builder;
use uuid::Uuid;

use hearth_config::Postgres;
use hearth_domain::property::PropertyRecord;
use hearth_storage::{db::Db, properties};

const DSN_VAR: &str = "HEARTH_PG_DSN";
const MAINTENANCE_DATABASES: [&str; 2] = ["postgres", "template1"];
const POOL_MAX_CONNS: u32 = 2;

pub struct TestDatabase {
	name: String,
	dsn: String,
	maintenance: PgConnectOptions,
	dropped: bool,
}
impl TestDatabase {
	pub async fn new(base_dsn: &str) -> Result<Self> {
		let base = PgConnectOptions::from_str(base_dsn)
			.map_err(|err| Error::Message(format!("{DSN_VAR} is not a Postgres DSN: {err}.")))?;
		let (maintenance, mut conn) = open_maintenance(&base).await?;
		let name = format!("hearth_test_{}", Uuid::new_v4().simple());

		conn.execute(format!(r#"CREATE DATABASE "{name}""#).as_str())
			.await
			.map_err(|err| Error::Message(format!("Failed to create {name}: {err}.")))?;

		let dsn = base.database(&name).to_url_lossy().to_string();

		Ok(Self { name, dsn, maintenance, dropped: false })
	}

	/// Storage settings pointing at this database.
	pub fn postgres_config(&self) -> Postgres {
		Postgres { dsn: self.dsn.clone(), pool_max_conns: POOL_MAX_CONNS }
	}

	/// Connects and applies the catalog schema. The catalog starts empty.
	pub async fn catalog(&self) -> Result<Db> {
		let db = Db::connect(&self.postgres_config()).await?;

		db.ensure_schema().await?;

		Ok(db)
	}

	pub async fn catalog_with(&self, records: &[PropertyRecord]) -> Result<Db> {
		let db = self.catalog().await?;

		for record in records {
			properties::insert_property(&db, record).await?;
		}

		Ok(db)
	}

	/// A catalog holding [`fixtures::sample_properties`].
	pub async fn seeded_catalog(&self) -> Result<Db> {
		self.catalog_with(&fixtures::sample_properties()).await
	}

	pub async fn cleanup(mut self) -> Result<()> {
		self.drop_database().await
	}

	async fn drop_database(&mut self) -> Result<()> {
		if self.dropped {
			return Ok(());
		}

		drop_database(&self.name, &self.maintenance).await?;

		self.dropped = true;

		Ok(())
	}
}
impl Drop for TestDatabase {
	// Drop cannot await, so the database is removed from a short-lived runtime on its own thread.
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let name = mem::take(&mut self.name);
		let maintenance = self.maintenance.clone();
		let worker = thread::spawn(move || -> Result<()> {
			let runtime = Builder::new_current_thread()
				.enable_all()
				.build()
				.map_err(|err| Error::Message(format!("Failed to start cleanup runtime: {err}.")))?;

			runtime.block_on(drop_database(&name, &maintenance))
		});

		match worker.join() {
			Ok(Ok(())) => {},
			Ok(Err(err)) => eprintln!("Scratch database was left behind: {err}"),
			Err(_) => eprintln!("Scratch database cleanup thread panicked."),
		}
	}
}

/// `HEARTH_PG_DSN`, when set to something non-blank.
pub fn env_dsn() -> Option<String> {
	env::var(DSN_VAR).ok().filter(|dsn| !dsn.trim().is_empty())
}

/// Runs `f` against a freshly seeded catalog, then drops the database whether or not `f` failed.
pub async fn with_seeded_catalog<F, Fut, T>(base_dsn: &str, f: F) -> Result<T>
where
	F: FnOnce(Db) -> Fut,
	Fut: Future<Output = Result<T>>,
{
	let mut test_db = TestDatabase::new(base_dsn).await?;
	let result = match test_db.seeded_catalog().await {
		Ok(db) => f(db).await,
		Err(err) => Err(err),
	};
	let cleanup = test_db.drop_database().await;

	match (result, cleanup) {
		(Ok(value), Ok(())) => Ok(value),
		(Ok(_), Err(err)) => Err(err),
		(Err(err), cleanup) => {
			if let Err(cleanup_err) = cleanup {
				eprintln!("Scratch database cleanup also failed: {cleanup_err}");
			}

			Err(err)
		},
	}
}

async fn open_maintenance(base: &PgConnectOptions) -> Result<(PgConnectOptions, PgConnection)> {
	let mut failures = Vec::new();

	for database in MAINTENANCE_DATABASES {
		let options = base.clone().database(database);

		match PgConnection::connect_with(&options).await {
			Ok(conn) => return Ok((options, conn)),
			Err(err) => failures.push(format!("{database}: {err}")),
		}
	}

	Err(Error::Message(format!(
		"No maintenance database accepted a connection ({}).",
		failures.join("; ")
	)))
}

async fn drop_database(name: &str, maintenance: &PgConnectOptions) -> Result<()> {
	let mut conn = PgConnection::connect_with(maintenance).await?;

	// Pools handed out by `catalog` may still hold sessions.
	sqlx::query(
		"\
SELECT pg_terminate_backend(pid)
FROM pg_stat_activity
WHERE datname = $1 AND pid <> pg_backend_pid()",
	)
	.bind(name)
	.execute(&mut conn)
	.await?;

	conn.execute(format!(r#"DROP DATABASE IF EXISTS "{name}""#).as_str())
		.await
		.map_err(|err| Error::Message(format!("Failed to drop {name}: {err}.")))?;

	Ok(())
}
