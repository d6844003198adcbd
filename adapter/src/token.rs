use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use kernel::model::id::UserId;
use serde::{Deserialize, Serialize};
use shared::{
    config::AuthConfig,
    error::{AppError, AppResult},
};
use uuid::Uuid;

#[derive(Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies the signed session tokens held client-side. The
/// signing key is derived once from the startup configuration; verification
/// is a pure cryptographic check with no storage behind it, so a token
/// cannot be revoked before its expiry.
pub struct SessionTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: i64,
}

impl SessionTokenCodec {
    pub fn new(cfg: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(cfg.token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(cfg.token_secret.as_bytes()),
            ttl: cfg.token_ttl,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl
    }

    pub fn issue(&self, user_id: UserId) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::ConversionEntityError(anyhow::Error::from(e)))
    }

    /// Fails on a bad signature, a malformed token, or an expired claim.
    /// Expiry is absolute; there is no refresh or rotation.
    pub fn verify(&self, token: &str) -> AppResult<UserId> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::UnauthenticatedError)?;
        let raw = Uuid::parse_str(&data.claims.sub).map_err(|_| AppError::UnauthenticatedError)?;
        Ok(UserId::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(secret: &str, ttl: i64) -> SessionTokenCodec {
        SessionTokenCodec::new(&AuthConfig {
            token_secret: secret.into(),
            token_ttl: ttl,
        })
    }

    #[test]
    fn an_issued_token_verifies_to_the_same_user() -> anyhow::Result<()> {
        let codec = codec("test-secret", 86400);
        let user_id = UserId::new();

        let token = codec.issue(user_id)?;
        assert_eq!(codec.verify(&token)?, user_id);
        Ok(())
    }

    #[test]
    fn an_expired_token_is_rejected() -> anyhow::Result<()> {
        let codec = codec("test-secret", -3600);
        let token = codec.issue(UserId::new())?;

        assert!(matches!(
            codec.verify(&token),
            Err(AppError::UnauthenticatedError)
        ));
        Ok(())
    }

    #[test]
    fn a_token_signed_with_another_secret_is_rejected() -> anyhow::Result<()> {
        let signer = codec("one-secret", 86400);
        let verifier = codec("another-secret", 86400);
        let token = signer.issue(UserId::new())?;

        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::UnauthenticatedError)
        ));
        Ok(())
    }

    #[test]
    fn a_malformed_token_is_rejected() {
        let codec = codec("test-secret", 86400);

        assert!(matches!(
            codec.verify("not-a-token"),
            Err(AppError::UnauthenticatedError)
        ));
    }
}
