use sqlx::SqlitePool;

use crate::campaign::db::{self as campaign_db, CampaignStore};
use crate::error::Error;

pub trait Database: Send + Sync {
    fn campaigns(&self) -> &dyn CampaignStore;
}

#[derive(Debug, Clone)]
pub struct SqliteCampaignStore {
    pub(crate) pool: SqlitePool,
}

#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    campaigns: SqliteCampaignStore,
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Creates any missing tables and indexes. Safe to call on a database
    /// that is already set up.
    #[tracing::instrument(skip(pool))]
    pub async fn initialize(pool: SqlitePool) -> Result<SqliteDatabase, Error> {
        campaign_db::initialize(&pool).await?;

        Ok(SqliteDatabase {
            campaigns: SqliteCampaignStore { pool: pool.clone() },
            pool,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl Database for SqliteDatabase {
    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }
}
