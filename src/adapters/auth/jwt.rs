//! HS256 JWT implementation of the `TokenCodec` port.
//!
//! Signature and issuer are validated here. Expiry is left to the token
//! service, which compares `exp` against its injected clock.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::AuthError;
use crate::ports::{TokenClaims, TokenCodec};

/// Symmetric-key JWT codec.
pub struct HmacJwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl HmacJwtCodec {
    pub fn new(secret: &SecretString, issuer: impl Into<String>) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            issuer: issuer.into(),
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }
}

impl TokenCodec for HmacJwtCodec {
    fn encode(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            AuthError::service_unavailable(format!("token signing failed: {}", e))
        })
    }

    fn decode(&self, token: &str) -> Result<TokenClaims, AuthError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation())
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Invalid issuer in token");
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::warn!("Invalid token signature");
                    }
                    _ => {
                        tracing::debug!("Token decoding failed: {}", e);
                    }
                }
                AuthError::InvalidToken
            })
    }
}

impl std::fmt::Debug for HmacJwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacJwtCodec")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}
