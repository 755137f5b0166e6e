//! Admin API key parsing and request token minting.
//!
//! Ghost Admin API keys have the form `{id}:{secret}` where the secret is
//! hex encoded. Each request carries a short-lived HS256 token whose `kid`
//! header is the key id.

use std::fmt;
use std::str::FromStr;

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Audience expected by the Admin API
pub const TOKEN_AUDIENCE: &str = "/admin/";

/// Token lifetime in seconds (Ghost rejects anything above five minutes)
pub const TOKEN_TTL_SECS: i64 = 5 * 60;

/// Claims carried by an Admin API token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iat: i64,
    pub exp: i64,
    pub aud: String,
}

/// A parsed Admin API key.
#[derive(Clone)]
pub struct AdminApiKey {
    id: String,
    secret: Vec<u8>,
}

impl AdminApiKey {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Mint a token valid from `issued_at` (unix seconds).
    pub fn token_at(&self, issued_at: i64) -> Result<String> {
        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(self.id.clone());

        let claims = TokenClaims {
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
            aud: TOKEN_AUDIENCE.to_string(),
        };

        let token = jsonwebtoken::encode(&header, &claims, &EncodingKey::from_secret(&self.secret))?;
        Ok(token)
    }

    /// Mint a token valid from now.
    pub fn token(&self) -> Result<String> {
        self.token_at(chrono::Utc::now().timestamp())
    }
}

impl FromStr for AdminApiKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (id, secret) = s.trim().split_once(':').ok_or_else(|| Error::InvalidKey {
            reason: "expected `{id}:{secret}`".to_string(),
        })?;

        if id.is_empty() || secret.is_empty() {
            return Err(Error::InvalidKey {
                reason: "id and secret must both be non-empty".to_string(),
            });
        }

        let secret = hex::decode(secret).map_err(|e| Error::InvalidKey {
            reason: format!("secret is not valid hex: {}", e),
        })?;

        Ok(Self {
            id: id.to_string(),
            secret,
        })
    }
}

// Never print the secret.
impl fmt::Debug for AdminApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminApiKey")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}
