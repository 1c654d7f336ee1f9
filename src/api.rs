use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::OfferClaims;
use crate::entities::{OfferLink, QuoteBreakdown, QuoteRequest};
use crate::error::Error;

#[async_trait]
pub trait QuoteAPI {
    async fn create_quote(&self, request: QuoteRequest) -> Result<QuoteBreakdown, Error>;
}

#[async_trait]
pub trait OfferAPI {
    async fn create_offer_link(
        &self,
        offer_id: String,
        ttl_seconds: Option<i64>,
    ) -> Result<OfferLink, Error>;

    async fn view_offer(&self, offer_id: String, token: String) -> Result<OfferClaims, Error>;
}

pub trait API: QuoteAPI + OfferAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
