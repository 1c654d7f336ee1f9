use std::env;

use crate::error::Error;
use crate::pricing::RateTable;

const DEV_SECRET: &str = "omnibus-dev-offer-link-secret";

/// Process-wide configuration, read from the environment once at startup and
/// handed to the engine. Nothing below this layer touches the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub rates: RateTable,
    pub offer_link_secret: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        let defaults = RateTable::default();

        let rates = RateTable {
            per_km: env_f64("PRICE_PER_KM", defaults.per_km),
            per_hour_day: env_f64("PRICE_PER_HOUR_DAY", defaults.per_hour_day),
            per_hour_evening: env_f64("PRICE_PER_HOUR_EVENING", defaults.per_hour_evening),
            per_hour_weekend: env_f64("PRICE_PER_HOUR_WEEKEND", defaults.per_hour_weekend),
            vat_domestic: env_f64("VAT_DOMESTIC", defaults.vat_domestic),
            vat_foreign: env_f64("VAT_FOREIGN", defaults.vat_foreign),
        };

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        Ok(Self {
            rates,
            offer_link_secret: offer_link_secret()?,
            port,
        })
    }
}

fn env_f64(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

// debug builds fall back to a fixed development secret; release builds refuse
// to start without OFFER_LINK_SECRET
fn offer_link_secret() -> Result<String, Error> {
    if let Ok(secret) = env::var("OFFER_LINK_SECRET") {
        if !secret.is_empty() {
            return Ok(secret);
        }
    }

    #[cfg(debug_assertions)]
    {
        tracing::warn!(
            "OFFER_LINK_SECRET is not set, using the development secret; offer links signed with it are not safe for production"
        );

        Ok(DEV_SECRET.into())
    }

    #[cfg(not(debug_assertions))]
    {
        Err(env::VarError::NotPresent.into())
    }
}
