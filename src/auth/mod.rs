pub mod password;

pub use password::PasswordEncoder;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::UserRole;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, stringified
    pub sub: String,
    pub email: String,
    #[serde(rename = "userRole")]
    pub user_role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Authorization header must use Bearer token format")]
    NotBearer,

    #[error("Invalid JWT token: {0}")]
    Invalid(String),

    #[error("Malformed subject claim: {0}")]
    MalformedSubject(String),
}

/// Issues and checks the HS256 bearer tokens carried by every request
#[derive(Clone)]
pub struct JwtUtil {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
}

impl std::fmt::Debug for JwtUtil {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtUtil").field("expiry", &self.expiry).finish_non_exhaustive()
    }
}

impl JwtUtil {
    pub fn new(secret: &str, expiry_minutes: i64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::minutes(expiry_minutes),
        })
    }

    /// Sign a token for the user and return it with the `Bearer ` prefix
    pub fn create_token(&self, user_id: i64, email: &str, role: UserRole) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            user_role: role,
            exp: (now + self.expiry).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))?;

        Ok(format!("{}{}", BEARER_PREFIX, token))
    }

    /// Strip the `Bearer ` prefix from an Authorization header value
    pub fn substring_token(header_value: &str) -> Result<&str, JwtError> {
        match header_value.strip_prefix(BEARER_PREFIX) {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(JwtError::NotBearer),
        }
    }

    pub fn extract_claims(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::Invalid(e.to_string()))
    }

    /// Signature and expiry check
    pub fn validate_token(&self, token: &str) -> bool {
        self.extract_claims(token).is_ok()
    }

    pub fn get_user_id(&self, token: &str) -> Result<i64, JwtError> {
        let claims = self.extract_claims(token)?;
        claims.user_id()
    }

    pub fn get_user_role(&self, token: &str) -> Result<UserRole, JwtError> {
        Ok(self.extract_claims(token)?.user_role)
    }
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, JwtError> {
        self.sub
            .parse()
            .map_err(|_| JwtError::MalformedSubject(self.sub.clone()))
    }
}
