use axum::extract::{Extension, Json};

use crate::api::DynAPI;
use crate::entities::{QuoteBreakdown, QuoteRequest};
use crate::error::Error;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteBreakdown>, Error> {
    let breakdown = api.create_quote(request).await?;

    Ok(breakdown.into())
}
