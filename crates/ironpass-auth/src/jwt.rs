//! Session token signing and verification.
//!
//! Tokens are HS256 JWTs carrying [`Claims`]. Validity depends only on the
//! signature and on `now < exp`; tokens are never revoked. Changing
//! `JWT_SECRET` invalidates every outstanding token at once.

use chrono::Utc;
use ironpass_config::JwtConfig;
use ironpass_models::Role;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

use crate::claims::Claims;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature or a structure that does not decode into [`Claims`].
    #[error("token is malformed or has been tampered with")]
    Malformed,
    #[error("token has expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Encoding(String),
}

/// Signs and verifies session tokens with the process-wide secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenCodec {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl_secs: config.token_ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    pub fn issue(&self, subject: Uuid, role: Role) -> Result<String, TokenError> {
        self.issue_at(subject, role, Utc::now().timestamp())
    }

    /// Issues a token as if the current time were `now` (unix seconds).
    pub fn issue_at(&self, subject: Uuid, role: Role, now: i64) -> Result<String, TokenError> {
        let exp = now
            .checked_add(self.ttl_secs)
            .ok_or_else(|| TokenError::Encoding("token expiry overflows".to_string()))?;
        let claims = Claims {
            sub: Some(subject.to_string()),
            role,
            iat: now,
            exp,
        };
        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    pub fn verify(&self, raw: &str) -> Result<Claims, TokenError> {
        self.verify_at(raw, Utc::now().timestamp())
    }

    /// Verifies `raw` against the clock value `now` (unix seconds).
    ///
    /// The signature is checked first, so an expired forgery is reported as
    /// [`TokenError::Malformed`].
    pub fn verify_at(&self, raw: &str, now: i64) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // expiry is checked below against the supplied clock
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::new();

        let claims = decode::<Claims>(raw, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Malformed)?;

        if now >= claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironpass_config::jwt::DEFAULT_TOKEN_TTL_SECS;

    const ISSUED_AT: i64 = 1_700_000_000;

    fn get_test_codec() -> TokenCodec {
        TokenCodec::new(&JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        })
    }

    /// Flips the lowest bit of the first base64url character of the signature.
    fn flip_signature_bit(token: &str) -> String {
        const ALPHABET: &[u8] =
            b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
        let sig_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.as_bytes().to_vec();
        let idx = ALPHABET.iter().position(|c| *c == bytes[sig_start]).unwrap();
        bytes[sig_start] = ALPHABET[idx ^ 1];
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_issue_then_verify_returns_claims() {
        let codec = get_test_codec();
        let user_id = Uuid::new_v4();

        let token = codec.issue_at(user_id, Role::Admin, ISSUED_AT).unwrap();
        let claims = codec.verify_at(&token, ISSUED_AT + 60).unwrap();

        assert_eq!(claims.subject_id(), Some(user_id));
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.iat, ISSUED_AT);
        assert_eq!(claims.exp, ISSUED_AT + 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_verify_with_real_clock() {
        let codec = get_test_codec();
        let user_id = Uuid::new_v4();

        let token = codec.issue(user_id, Role::Regular).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.subject_id(), Some(user_id));
        assert_eq!(claims.role, Role::Regular);
    }

    #[test]
    fn test_single_bit_flip_is_malformed() {
        let codec = get_test_codec();
        let token = codec
            .issue_at(Uuid::new_v4(), Role::Regular, ISSUED_AT)
            .unwrap();

        let tampered = flip_signature_bit(&token);
        assert_ne!(tampered, token);
        assert_eq!(
            codec.verify_at(&tampered, ISSUED_AT + 1),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = get_test_codec();
        assert_eq!(codec.verify("invalid-token"), Err(TokenError::Malformed));
        assert_eq!(codec.verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_expired_after_seven_days() {
        let codec = get_test_codec();
        let token = codec
            .issue_at(Uuid::new_v4(), Role::Regular, ISSUED_AT)
            .unwrap();
        let week = 7 * 24 * 60 * 60;

        assert!(codec.verify_at(&token, ISSUED_AT + week - 1).is_ok());
        assert_eq!(
            codec.verify_at(&token, ISSUED_AT + week),
            Err(TokenError::Expired)
        );
        assert_eq!(
            codec.verify_at(&token, ISSUED_AT + 30 * 24 * 60 * 60),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_wrong_secret_is_malformed() {
        let codec = get_test_codec();
        let other = TokenCodec::new(&JwtConfig {
            secret: "a-rotated-secret-that-differs-from-the-first".to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        });

        let token = codec
            .issue_at(Uuid::new_v4(), Role::Regular, ISSUED_AT)
            .unwrap();
        assert_eq!(
            other.verify_at(&token, ISSUED_AT + 1),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_expiry_overflow_is_an_encoding_error() {
        let codec = TokenCodec::new(&JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            token_ttl_secs: i64::MAX,
        });

        let result = codec.issue_at(Uuid::new_v4(), Role::Regular, ISSUED_AT);
        assert!(matches!(result, Err(TokenError::Encoding(_))));
    }

    #[test]
    fn test_token_without_subject_still_verifies() {
        let codec = get_test_codec();
        let claims = Claims {
            sub: None,
            role: Role::Regular,
            iat: ISSUED_AT,
            exp: ISSUED_AT + 100,
        };

        let token = codec.sign(&claims).unwrap();
        let decoded = codec.verify_at(&token, ISSUED_AT + 1).unwrap();

        assert!(decoded.sub.is_none());
        assert!(decoded.subject_id().is_none());
    }
}
