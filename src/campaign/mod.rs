use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod db;
pub mod endpoints;
pub mod manager;
pub use endpoints::*;

/// Store-assigned row id. Ids only grow and are never handed out twice, even
/// after the row they named has been deleted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct CampaignId(i64);

impl From<i64> for CampaignId {
    fn from(id: i64) -> CampaignId {
        CampaignId(id)
    }
}

impl From<CampaignId> for i64 {
    fn from(id: CampaignId) -> i64 {
        id.0
    }
}

impl Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Campaign {
    #[sqlx(rename = "campaign_id")]
    pub id: CampaignId,
    pub name: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A campaign that has not been persisted yet, so it has no id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCampaign {
    pub name: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
