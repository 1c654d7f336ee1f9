use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{
    expired_token_error, invalid_input_error, invalid_signature_error, malformed_token_error,
    unexpected_error, Error,
};

type HmacSha256 = Hmac<Sha256>;

const DEFAULT_TTL_SECONDS: i64 = 30 * 24 * 3600;
const MIN_TTL_SECONDS: i64 = 60;

#[derive(Serialize)]
struct Header {
    alg: &'static str,
    typ: &'static str,
    aud: &'static str,
}

const HEADER: Header = Header {
    alg: "HS256",
    typ: "token",
    aud: "offer-view",
};

/// Claims embedded in an offer link token. The token is self-contained:
/// validity is a function of the signature and these timestamps alone.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OfferClaims {
    pub offer_id: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies the bearer tokens that let an emailed offer link be
/// opened without a login. Tokens are `header.payload.signature`, each
/// segment base64url without padding, signed with HMAC-SHA256.
pub struct OfferTokenService {
    secret: Vec<u8>,
}

impl OfferTokenService {
    pub fn new(secret: String) -> Self {
        Self {
            secret: secret.into_bytes(),
        }
    }

    pub fn sign(&self, offer_id: &str, ttl_seconds: Option<i64>) -> Result<String, Error> {
        self.sign_at(offer_id, ttl_seconds, Utc::now().timestamp())
    }

    pub fn sign_at(
        &self,
        offer_id: &str,
        ttl_seconds: Option<i64>,
        now: i64,
    ) -> Result<String, Error> {
        if offer_id.is_empty() {
            return Err(invalid_input_error());
        }

        let ttl = ttl_seconds.unwrap_or(DEFAULT_TTL_SECONDS).max(MIN_TTL_SECONDS);

        let claims = OfferClaims {
            offer_id: offer_id.into(),
            iat: now,
            exp: now + ttl,
        };

        let header = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&HEADER)?);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let signature = URL_SAFE_NO_PAD.encode(self.mac(&header, &payload)?);

        Ok(format!("{}.{}.{}", header, payload, signature))
    }

    pub fn verify(&self, token: &str) -> Result<OfferClaims, Error> {
        self.verify_at(token, Utc::now().timestamp())
    }

    pub fn verify_at(&self, token: &str, now: i64) -> Result<OfferClaims, Error> {
        let mut segments = token.split('.');

        let (header, payload, signature) =
            match (segments.next(), segments.next(), segments.next(), segments.next()) {
                (Some(h), Some(p), Some(s), None)
                    if !h.is_empty() && !p.is_empty() && !s.is_empty() =>
                {
                    (h, p, s)
                }
                _ => return Err(malformed_token_error()),
            };

        let payload_bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| malformed_token_error())?;
        let claims: OfferClaims =
            serde_json::from_slice(&payload_bytes).map_err(|_| malformed_token_error())?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| malformed_token_error())?;

        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| unexpected_error())?;
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());

        // verify_slice compares in constant time
        mac.verify_slice(&signature)
            .map_err(|_| invalid_signature_error())?;

        if claims.exp <= now {
            return Err(expired_token_error());
        }

        Ok(claims)
    }

    fn mac(&self, header: &str, payload: &str) -> Result<Vec<u8>, Error> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| unexpected_error())?;
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(payload.as_bytes());

        Ok(mac.finalize().into_bytes().to_vec())
    }
}

#[cfg(test)]
fn test_service() -> OfferTokenService {
    OfferTokenService::new("test-signing-secret".into())
}

#[test]
fn sign_and_verify_round_trip_test() {
    let service = test_service();

    let token = service.sign("abc", None).unwrap();
    let claims = service.verify(&token).unwrap();

    assert_eq!(claims.offer_id, "abc");
    assert_eq!(claims.exp - claims.iat, DEFAULT_TTL_SECONDS);
}

#[test]
fn expired_token_denied_test() {
    let service = test_service();
    let issued = 1_700_000_000;

    let token = service.sign_at("abc", Some(60), issued).unwrap();

    assert!(service.verify_at(&token, issued + 59).is_ok());

    // exp is inclusive of the deny side: exp <= now is expired
    let err = service.verify_at(&token, issued + 60).unwrap_err();
    assert_eq!(err.code, expired_token_error().code);

    let err = service.verify_at(&token, issued + 61).unwrap_err();
    assert_eq!(err.code, expired_token_error().code);
}

#[test]
fn ttl_clamped_to_minimum_test() {
    let service = test_service();
    let issued = 1_700_000_000;

    let token = service.sign_at("abc", Some(1), issued).unwrap();
    let claims = service.verify_at(&token, issued).unwrap();
    assert_eq!(claims.exp - claims.iat, MIN_TTL_SECONDS);

    let token = service.sign_at("abc", Some(-30), issued).unwrap();
    let claims = service.verify_at(&token, issued).unwrap();
    assert_eq!(claims.exp - claims.iat, MIN_TTL_SECONDS);
}

#[test]
fn empty_offer_id_rejected_test() {
    let service = test_service();

    let err = service.sign("", None).unwrap_err();
    assert_eq!(err.code, invalid_input_error().code);
}

#[test]
fn tampered_signature_denied_test() {
    let service = test_service();
    let issued = 1_700_000_000;

    let token = service.sign_at("abc", Some(3600), issued).unwrap();
    let dot = token.rfind('.').unwrap();

    let mut tampered = String::from(&token[..dot + 1]);
    let signature = &token[dot + 1..];
    let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
    tampered.push(flipped);
    tampered.push_str(&signature[1..]);

    assert_ne!(tampered, token);

    let err = service.verify_at(&tampered, issued).unwrap_err();
    assert_eq!(err.code, invalid_signature_error().code);
}

#[test]
fn spliced_payload_denied_test() {
    let service = test_service();
    let issued = 1_700_000_000;

    let token_a = service.sign_at("abc", Some(3600), issued).unwrap();
    let token_b = service.sign_at("xyz", Some(3600), issued).unwrap();

    let a: Vec<&str> = token_a.split('.').collect();
    let b: Vec<&str> = token_b.split('.').collect();

    // token_b's payload under token_a's signature
    let spliced = format!("{}.{}.{}", a[0], b[1], a[2]);

    let err = service.verify_at(&spliced, issued).unwrap_err();
    assert_eq!(err.code, invalid_signature_error().code);
}

#[test]
fn wrong_secret_denied_test() {
    let issued = 1_700_000_000;

    let token = test_service().sign_at("abc", Some(3600), issued).unwrap();

    let other = OfferTokenService::new("another-signing-secret".into());
    let err = other.verify_at(&token, issued).unwrap_err();
    assert_eq!(err.code, invalid_signature_error().code);
}

#[test]
fn malformed_token_denied_test() {
    let service = test_service();
    let now = 1_700_000_000;

    for token in [
        "",
        "abc",
        "a.b",
        "a.b.c.d",
        "..",
        "a..c",
        ".b.c",
        "a.!!!.c",
        "a.aGVsbG8.c",
    ] {
        let err = service.verify_at(token, now).unwrap_err();
        assert_eq!(err.code, malformed_token_error().code, "token: {:?}", token);
    }
}
