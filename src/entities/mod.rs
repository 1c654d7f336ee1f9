mod offer;
mod quote;

pub use offer::OfferLink;
pub use quote::{Leg, LegPrice, QuoteBreakdown, QuoteRequest};
