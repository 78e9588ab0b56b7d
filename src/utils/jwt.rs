use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::entities::session::Session;
use crate::middleware::error::AppResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

/// Verifies session tokens minted by the identity provider.
pub struct JWT {
    key_enc: EncodingKey,
    key_dec: DecodingKey,
    duration: TimeDelta,
}

impl JWT {
    pub fn new(secret: String, duration: TimeDelta) -> Self {
        Self {
            duration,
            key_enc: EncodingKey::from_secret(secret.as_ref()),
            key_dec: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    /// Issues a token the way the provider does. Used by local tooling and tests.
    pub fn create_session(&self, user_id: &str, name: Option<&str>) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            name: name.map(str::to_string),
            exp: (now + self.duration).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(&Header::default(), &claims, &self.key_enc)?)
    }

    pub fn decode_session(&self, token: &str) -> AppResult<Session> {
        let data = decode::<Claims>(token, &self.key_dec, &Validation::new(Algorithm::HS256))?;
        Ok(Session {
            user_id: data.claims.sub,
            name: data.claims.name.filter(|name| !name.is_empty()),
        })
    }
}
