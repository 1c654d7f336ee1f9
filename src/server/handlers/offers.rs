use axum::extract::{Extension, Json, Path, Query};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::auth::OfferClaims;
use crate::entities::OfferLink;
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct CreateLinkParams {
    ttl_seconds: Option<i64>,
}

#[derive(Serialize, Deserialize)]
pub struct ViewParams {
    t: String,
}

pub async fn create_link(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
    Json(params): Json<CreateLinkParams>,
) -> Result<Json<OfferLink>, Error> {
    let link = api.create_offer_link(id, params.ttl_seconds).await?;

    Ok(link.into())
}

pub async fn view(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
    Query(params): Query<ViewParams>,
) -> Result<Json<OfferClaims>, Error> {
    let claims = api.view_offer(id, params.t).await?;

    Ok(claims.into())
}
