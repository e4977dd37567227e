use common::RedactedSecret;

use std::fmt;
use std::time::{Duration, SystemTime};

use serde::Deserialize;

/// Tokens are considered expired this long before their actual expiry.
const EXPIRY_SKEW: Duration = Duration::from_secs(10);

/// Upper bound on a token lifetime; larger `expires_in` values are clamped.
pub const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Body returned by `auth/token`.
#[derive(Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
    /// Lifetime in seconds, relative to when the response was received.
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub creation_date: String,
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("refresh_token", &"[REDACTED]")
            .field("creation_date", &self.creation_date)
            .finish()
    }
}

impl Token {
    /// Converts to an [`AccessToken`] expiring `expires_in` seconds from now.
    pub fn to_access_token(&self) -> AccessToken {
        self.to_access_token_at(SystemTime::now())
    }

    pub fn to_access_token_at(&self, now: SystemTime) -> AccessToken {
        let offset = Duration::from_secs(self.expires_in.unsigned_abs()).min(MAX_TOKEN_LIFETIME);
        let expiry = if self.expires_in >= 0 {
            now.checked_add(offset).unwrap_or(now)
        } else {
            now.checked_sub(offset).unwrap_or(SystemTime::UNIX_EPOCH)
        };

        AccessToken {
            access_token: RedactedSecret::new(self.access_token.as_str()),
            refresh_token: (!self.refresh_token.is_empty())
                .then(|| RedactedSecret::new(self.refresh_token.as_str())),
            expiry,
        }
    }
}

/// Transport-level credential: bearer value plus absolute expiry.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub access_token: RedactedSecret,
    pub refresh_token: Option<RedactedSecret>,
    pub expiry: SystemTime,
}

impl AccessToken {
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(SystemTime::now())
    }

    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        now.checked_add(EXPIRY_SKEW)
            .is_none_or(|skewed| skewed >= self.expiry)
    }
}
