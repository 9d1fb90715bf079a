use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::database::SqliteCampaignStore;
use crate::error::Error;

use super::{Campaign, CampaignId, NewCampaign};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS campaigns (
        campaign_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        due_date TEXT,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS ix_campaigns_name ON campaigns (name)",
    "CREATE INDEX IF NOT EXISTS ix_campaigns_due_date ON campaigns (due_date)",
    "CREATE INDEX IF NOT EXISTS ix_campaigns_created_at ON campaigns (created_at)",
];

const COLUMNS: &str = "campaign_id, name, due_date, created_at";

pub async fn initialize(pool: &SqlitePool) -> Result<(), Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

#[async_trait]
pub trait CampaignStore: Send + Sync {
    async fn insert_campaign(&self, campaign: &NewCampaign) -> Result<Campaign, Error>;

    /// Inserts all campaigns or none of them.
    async fn insert_campaigns(&self, campaigns: &[NewCampaign]) -> Result<Vec<Campaign>, Error>;

    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error>;

    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error>;

    /// Overwrites the name and due date, returning `None` if there is no such
    /// campaign.
    async fn update_campaign(
        &self,
        campaign_id: CampaignId,
        name: &str,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Campaign>, Error>;

    /// Returns whether a campaign was removed.
    async fn delete_campaign_by_id(&self, campaign_id: CampaignId) -> Result<bool, Error>;

    async fn has_campaigns(&self) -> Result<bool, Error>;
}

#[async_trait]
impl CampaignStore for SqliteCampaignStore {
    #[tracing::instrument(skip(self))]
    async fn insert_campaign(&self, campaign: &NewCampaign) -> Result<Campaign, Error> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            "INSERT INTO campaigns (name, due_date, created_at) VALUES (?, ?, ?) RETURNING {}",
            COLUMNS
        ))
        .bind(&campaign.name)
        .bind(campaign.due_date)
        .bind(campaign.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn insert_campaigns(&self, campaigns: &[NewCampaign]) -> Result<Vec<Campaign>, Error> {
        let query = format!(
            "INSERT INTO campaigns (name, due_date, created_at) VALUES (?, ?, ?) RETURNING {}",
            COLUMNS
        );

        // dropping the transaction without committing rolls it back
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(campaigns.len());
        for campaign in campaigns {
            let campaign = sqlx::query_as::<_, Campaign>(&query)
                .bind(&campaign.name)
                .bind(campaign.due_date)
                .bind(campaign.created_at)
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(campaign);
        }
        tx.commit().await?;

        Ok(inserted)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error> {
        let campaigns = sqlx::query_as::<_, Campaign>(&format!(
            "SELECT {} FROM campaigns ORDER BY campaign_id",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(campaigns)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            "SELECT {} FROM campaigns WHERE campaign_id = ?",
            COLUMNS
        ))
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn update_campaign(
        &self,
        campaign_id: CampaignId,
        name: &str,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Campaign>, Error> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            "UPDATE campaigns SET name = ?, due_date = ? WHERE campaign_id = ? RETURNING {}",
            COLUMNS
        ))
        .bind(name)
        .bind(due_date)
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_campaign_by_id(&self, campaign_id: CampaignId) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM campaigns WHERE campaign_id = ?")
            .bind(campaign_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn has_campaigns(&self) -> Result<bool, Error> {
        let (exists,): (i64,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM campaigns)")
            .fetch_one(&self.pool)
            .await?;

        Ok(exists != 0)
    }
}
