mod offer_api;
mod quote_api;

use crate::api::API;
use crate::auth::OfferTokenService;
use crate::config::Config;
use crate::pricing::RateTable;

pub struct Engine {
    rates: RateTable,
    tokens: OfferTokenService,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        Self {
            rates: config.rates,
            tokens: OfferTokenService::new(config.offer_link_secret),
        }
    }
}

impl API for Engine {}

#[cfg(test)]
pub(crate) fn test_engine() -> Engine {
    Engine::new(Config {
        rates: RateTable::default(),
        offer_link_secret: "test-signing-secret".into(),
        port: 3000,
    })
}
