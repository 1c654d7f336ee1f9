mod token;

pub use token::{OfferClaims, OfferTokenService};
