use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::Config;
use crate::storage::Storage;

pub type DbPool = Pool<SqliteConnectionManager>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub storage: Storage,
    pub config: Config,
    /// Shared client for the Riot API; carries the configured request timeout.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.riot.timeout_secs))
            .build()?;

        Ok(Self {
            storage: Storage::new(db.clone()),
            db,
            config,
            http,
        })
    }
}
