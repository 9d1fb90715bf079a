use chrono::Utc;
use tracing::info;

use crate::campaign::NewCampaign;
use crate::database::Database;
use crate::error::Error;

pub const SEED_CAMPAIGN_NAMES: [&str; 2] = ["Summer Launch", "Black Friday"];

/// Inserts the seed campaigns if there are no campaigns at all. Returns
/// whether anything was inserted.
pub async fn seed(db: &dyn Database) -> Result<bool, Error> {
    if db.campaigns().has_campaigns().await? {
        info!("campaigns already present, skipping seed");
        return Ok(false);
    }

    let now = Utc::now();
    let campaigns: Vec<NewCampaign> = SEED_CAMPAIGN_NAMES
        .iter()
        .map(|name| NewCampaign {
            name: name.to_string(),
            due_date: Some(now),
            created_at: now,
        })
        .collect();

    let inserted = db.campaigns().insert_campaigns(&campaigns).await?;
    info!("seeded {} campaigns", inserted.len());

    Ok(true)
}
