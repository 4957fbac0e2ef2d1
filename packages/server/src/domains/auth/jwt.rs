use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default token lifetime
pub const TOKEN_TTL_HOURS: i64 = 24;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,     // Subject (member_id as string)
    pub member_id: Uuid, // Member UUID
    pub email: String,   // Member email (for logging)
    pub is_admin: bool,  // Admin role
    pub exp: i64,        // Expiration timestamp
    pub iat: i64,        // Issued at timestamp
    pub iss: String,     // Issuer
    pub jti: String,     // JWT ID (unique token identifier)
}

/// JWT Service - creates and verifies JWT tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    /// Create new JWT service with secret and issuer
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Create a token that expires after `TOKEN_TTL_HOURS`
    pub fn create_token(&self, member_id: Uuid, email: String, is_admin: bool) -> Result<String> {
        self.create_token_with_ttl(
            member_id,
            email,
            is_admin,
            chrono::Duration::hours(TOKEN_TTL_HOURS),
        )
    }

    pub fn create_token_with_ttl(
        &self,
        member_id: Uuid,
        email: String,
        is_admin: bool,
        ttl: chrono::Duration,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + ttl;

        let claims = Claims {
            sub: member_id.to_string(),
            member_id,
            email,
            is_admin,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a JWT token
    ///
    /// Returns claims if token is valid and not expired
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}
