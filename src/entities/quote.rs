use serde::{Deserialize, Serialize};

/// One directional segment of a charter trip, as entered in the quote form.
/// Numeric fields default to 0 when absent so a half-filled form still
/// prices; negative values are clamped by the pricing engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Leg {
    pub is_domestic: bool,
    #[serde(default)]
    pub km: f64,
    #[serde(default)]
    pub hours_day: f64,
    #[serde(default)]
    pub hours_evening: f64,
    #[serde(default)]
    pub hours_weekend: f64,
    #[serde(default)]
    pub discount: f64,
}

/// A full quote request: one leg for a one-way trip, two for a round trip.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub service_fee: f64,
    pub legs: Vec<Leg>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LegPrice {
    pub subtotal_ex_vat: f64,
    pub vat: f64,
    pub total: f64,
}

/// Priced breakdown, one `LegPrice` per input leg in input order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    pub legs: Vec<LegPrice>,
    pub service_fee_ex_vat: f64,
    pub service_fee_vat: f64,
    pub service_fee_total: f64,
    pub grand_ex_vat: f64,
    pub grand_vat: f64,
    pub grand_total: f64,
}
