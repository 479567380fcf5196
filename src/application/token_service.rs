//! Token service: issues and verifies access tokens for principals.
//!
//! Every issued token carries the baseline `user` role in addition to the
//! principal's own roles. Expiry is judged against the injected clock, and
//! a token is still valid at exactly its `exp` second.

use async_trait::async_trait;
use chrono::Duration;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::foundation::{AuthError, Principal, Role, Timestamp, UserId, ValidationError};
use crate::ports::{Clock, SessionValidator, TokenClaims, TokenCodec};

/// Positive token lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenWindow(Duration);

impl TokenWindow {
    /// # Errors
    ///
    /// - `NotPositive` if `minutes <= 0`
    /// - `InvalidFormat` if `minutes` does not fit a duration
    pub fn from_minutes(minutes: i64) -> Result<Self, ValidationError> {
        if minutes <= 0 {
            return Err(ValidationError::not_positive(
                "token_expiration_minutes",
                minutes,
            ));
        }
        Duration::try_minutes(minutes)
            .map(Self)
            .ok_or_else(|| ValidationError::invalid_format("token_expiration_minutes", "too large"))
    }

    /// # Errors
    ///
    /// - `NotPositive` if `secs <= 0`
    /// - `InvalidFormat` if `secs` does not fit a duration
    pub fn from_secs(secs: i64) -> Result<Self, ValidationError> {
        if secs <= 0 {
            return Err(ValidationError::not_positive("token_window_secs", secs));
        }
        Duration::try_seconds(secs)
            .map(Self)
            .ok_or_else(|| ValidationError::invalid_format("token_window_secs", "too large"))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }

    pub fn as_secs(&self) -> i64 {
        self.0.num_seconds()
    }
}

/// A freshly signed token with its validity bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

/// Issues and verifies access tokens.
pub struct TokenService {
    codec: Arc<dyn TokenCodec>,
    clock: Arc<dyn Clock>,
    issuer: String,
    window: TokenWindow,
}

impl TokenService {
    pub fn new(
        codec: Arc<dyn TokenCodec>,
        clock: Arc<dyn Clock>,
        issuer: impl Into<String>,
        window: TokenWindow,
    ) -> Self {
        Self {
            codec,
            clock,
            issuer: issuer.into(),
            window,
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn window(&self) -> TokenWindow {
        self.window
    }

    /// Issue a token for `principal` at the clock's current time.
    pub fn issue(&self, principal: &Principal) -> Result<IssuedToken, AuthError> {
        self.issue_at(principal, self.clock.now())
    }

    /// Issue a token for `principal` as of `now`.
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable` if the expiry falls outside the representable range
    /// - codec failures
    pub fn issue_at(&self, principal: &Principal, now: Timestamp) -> Result<IssuedToken, AuthError> {
        let expires_at = now
            .checked_plus(self.window.as_duration())
            .ok_or_else(|| AuthError::service_unavailable("token expiry out of range"))?;

        let mut roles: BTreeSet<Role> = principal.roles.clone();
        roles.insert(Role::User);

        let claims = TokenClaims {
            sub: principal.id.to_string(),
            iss: self.issuer.clone(),
            roles: roles.iter().map(|r| r.as_str().to_string()).collect(),
            iat: now.as_unix_secs(),
            exp: expires_at.as_unix_secs(),
            email: principal.email.clone(),
            name: principal.display_name.clone(),
        };

        let token = self.codec.encode(&claims)?;
        tracing::debug!(user_id = %principal.id, exp = claims.exp, "Issued access token");

        Ok(IssuedToken {
            token,
            issued_at: now,
            expires_at,
        })
    }

    /// Verify a token at the clock's current time.
    pub fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        self.verify_at(token, self.clock.now())
    }

    /// Verify a token as of `now`.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` for a bad signature, a foreign issuer, or
    ///   malformed claims
    /// - `TokenExpired` if `now` is past the token's expiry
    pub fn verify_at(&self, token: &str, now: Timestamp) -> Result<Principal, AuthError> {
        let claims = self.codec.decode(token)?;

        if claims.iss != self.issuer {
            tracing::warn!(
                "Issuer mismatch: expected '{}', got '{}'",
                self.issuer,
                claims.iss
            );
            return Err(AuthError::InvalidToken);
        }

        let user_id: UserId = claims.sub.parse().map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;

        let roles = claims
            .roles
            .iter()
            .map(|r| r.parse::<Role>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(|e| {
                tracing::warn!("Invalid role in token: {}", e);
                AuthError::InvalidToken
            })?;

        if claims.exp < claims.iat {
            tracing::warn!("Token expires before it was issued");
            return Err(AuthError::InvalidToken);
        }

        if now.as_unix_secs() > claims.exp {
            tracing::debug!("Token expired");
            return Err(AuthError::TokenExpired);
        }

        let mut principal = Principal::new(user_id, roles);
        principal.email = claims.email;
        principal.display_name = claims.name;
        Ok(principal)
    }
}

#[async_trait]
impl SessionValidator for TokenService {
    async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        self.verify(token)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .field("window_secs", &self.window.as_secs())
            .finish_non_exhaustive()
    }
}
