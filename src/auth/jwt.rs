use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Claims carried by the bearer tokens issued at `POST /login`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The account id, as a string.
    pub sub: String,
    /// Username at the time the token was issued.
    pub username: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
}

impl Claims {
    /// Extract the account id from the `sub` claim.
    pub fn user_id(&self) -> Result<i32, String> {
        self.sub
            .parse()
            .map_err(|e| format!("Invalid account id in sub claim: {e}"))
    }
}

/// Sign a token for an account, valid for `ttl_hours`.
pub fn mint_token(
    user_id: i32,
    username: &str,
    secret: &str,
    ttl_hours: i64,
) -> Result<String, String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        exp: (now + Duration::hours(ttl_hours)).timestamp() as usize,
        iat: Some(now.timestamp() as usize),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("Failed to sign token: {e}"))
}

/// Validate an HS256 token and return the decoded claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Token validation failed: {e:?}"))
}
