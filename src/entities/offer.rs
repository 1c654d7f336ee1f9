use serde::{Deserialize, Serialize};

/// A public link to one offer. `path` is the relative URL the mailer embeds
/// in the offer email.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OfferLink {
    pub offer_id: String,
    pub token: String,
    pub path: String,
}

impl OfferLink {
    pub fn new(offer_id: String, token: String) -> Self {
        let path = format!("/offert/{}?t={}", offer_id, token);

        Self {
            offer_id,
            token,
            path,
        }
    }
}
