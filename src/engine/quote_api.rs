use super::Engine;

use async_trait::async_trait;

use crate::api::QuoteAPI;
use crate::entities::{QuoteBreakdown, QuoteRequest};
use crate::error::{invalid_input_error, Error};

#[async_trait]
impl QuoteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_quote(&self, request: QuoteRequest) -> Result<QuoteBreakdown, Error> {
        // one leg for a one-way trip, two for a round trip
        if request.legs.is_empty() || request.legs.len() > 2 {
            return Err(invalid_input_error());
        }

        Ok(self.rates.calc_quote(&request))
    }
}

#[test]
fn create_quote_leg_count_test() {
    use crate::entities::Leg;
    use tokio_test::block_on;

    let engine = super::test_engine();

    let leg = Leg {
        is_domestic: true,
        km: 10.0,
        hours_day: 0.0,
        hours_evening: 0.0,
        hours_weekend: 0.0,
        discount: 0.0,
    };

    let request = QuoteRequest {
        service_fee: 0.0,
        legs: vec![],
    };
    assert!(block_on(engine.create_quote(request)).is_err());

    let request = QuoteRequest {
        service_fee: 0.0,
        legs: vec![leg.clone()],
    };
    assert!(block_on(engine.create_quote(request)).is_ok());

    let request = QuoteRequest {
        service_fee: 0.0,
        legs: vec![leg.clone(), leg.clone()],
    };
    assert!(block_on(engine.create_quote(request)).is_ok());

    let request = QuoteRequest {
        service_fee: 0.0,
        legs: vec![leg.clone(), leg.clone(), leg],
    };
    assert!(block_on(engine.create_quote(request)).is_err());
}

#[test]
fn create_quote_prices_legs_test() {
    use crate::entities::Leg;
    use tokio_test::block_on;

    let engine = super::test_engine();

    let request = QuoteRequest {
        service_fee: 0.0,
        legs: vec![Leg {
            is_domestic: true,
            km: 100.0,
            hours_day: 2.0,
            hours_evening: 0.0,
            hours_weekend: 0.0,
            discount: 0.0,
        }],
    };

    let breakdown = block_on(engine.create_quote(request)).unwrap();

    assert_eq!(breakdown.legs[0].subtotal_ex_vat, 1590.0);
    assert_eq!(breakdown.legs[0].total, 1685.4);
}
