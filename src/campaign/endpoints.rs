use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, put, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::utils::deserialize_optional_timestamp;

use super::{manager, Campaign, CampaignId};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCampaignBody {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub due_date: Option<DateTime<Utc>>,
}

/// Full replacement of the mutable fields, not a patch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateCampaignBody {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignBody {
    pub campaign_id: CampaignId,
    pub name: String,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl CampaignBody {
    pub fn render(campaign: Campaign) -> CampaignBody {
        CampaignBody {
            campaign_id: campaign.id,
            name: campaign.name,
            due_date: campaign.due_date,
            created_at: campaign.created_at,
        }
    }
}

#[get("/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn get_campaigns(
    db: Data<Box<dyn Database>>,
) -> Result<Json<Envelope<Vec<CampaignBody>>>, Error> {
    let campaigns = manager::get_campaigns(&***db).await?;

    let body = campaigns.into_iter().map(CampaignBody::render).collect();

    Ok(Json(Envelope::new(body)))
}

#[get("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
) -> Result<Json<Envelope<CampaignBody>>, Error> {
    let campaign_id = params.into_inner();

    let campaign = manager::get_campaign_by_id(&***db, campaign_id).await?;

    Ok(Json(Envelope::new(CampaignBody::render(campaign))))
}

#[post("/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn create_campaign(
    db: Data<Box<dyn Database>>,
    body: Json<CreateCampaignBody>,
) -> Result<HttpResponse, Error> {
    let body = body.into_inner();

    let campaign = manager::create_campaign(&***db, body.name, body.due_date).await?;

    Ok(HttpResponse::Created().json(Envelope::new(CampaignBody::render(campaign))))
}

#[put("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn update_campaign(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
    body: Json<UpdateCampaignBody>,
) -> Result<Json<Envelope<CampaignBody>>, Error> {
    let campaign_id = params.into_inner();
    let body = body.into_inner();

    let campaign =
        manager::update_campaign(&***db, campaign_id, body.name, body.due_date).await?;

    Ok(Json(Envelope::new(CampaignBody::render(campaign))))
}

#[delete("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn delete_campaign_by_id(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
) -> Result<HttpResponse, Error> {
    let campaign_id = params.into_inner();

    manager::delete_campaign_by_id(&***db, campaign_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
