use super::Engine;

use async_trait::async_trait;

use crate::api::OfferAPI;
use crate::auth::OfferClaims;
use crate::entities::OfferLink;
use crate::error::{unauthorized_error, Error};

#[async_trait]
impl OfferAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_offer_link(
        &self,
        offer_id: String,
        ttl_seconds: Option<i64>,
    ) -> Result<OfferLink, Error> {
        let token = self.tokens.sign(&offer_id, ttl_seconds)?;

        Ok(OfferLink::new(offer_id, token))
    }

    #[tracing::instrument(skip(self, token))]
    async fn view_offer(&self, offer_id: String, token: String) -> Result<OfferClaims, Error> {
        let claims = self.tokens.verify(&token)?;

        // a token only grants access to the offer it was minted for
        if claims.offer_id != offer_id {
            return Err(unauthorized_error());
        }

        Ok(claims)
    }
}

#[test]
fn offer_link_round_trip_test() {
    use tokio_test::block_on;

    let engine = super::test_engine();

    let link = block_on(engine.create_offer_link("offer-17".into(), None)).unwrap();
    assert_eq!(link.offer_id, "offer-17");
    assert_eq!(link.path, format!("/offert/offer-17?t={}", link.token));

    let claims = block_on(engine.view_offer("offer-17".into(), link.token)).unwrap();
    assert_eq!(claims.offer_id, "offer-17");
}

#[test]
fn view_offer_id_mismatch_test() {
    use tokio_test::block_on;

    let engine = super::test_engine();

    let link = block_on(engine.create_offer_link("offer-17".into(), None)).unwrap();

    let err = block_on(engine.view_offer("offer-18".into(), link.token)).unwrap_err();
    assert_eq!(err.code, unauthorized_error().code);
}
