use serde_json::{json, Map};

use crate::auth::{JwtUtil, PasswordEncoder};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::config;
use crate::types::UserRole;

/// Mint a token for an existing user, e.g. to bootstrap the first admin call
pub fn handle(user_id: i64, email: &str, role: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let role: UserRole = role.parse()?;
    let security = &config().security;
    let jwt = JwtUtil::new(&security.jwt_secret, security.jwt_expiry_minutes)?;
    let token = jwt.create_token(user_id, email, role)?;

    let mut data = Map::new();
    data.insert("bearerToken".into(), json!(token));
    data.insert("expiresInMinutes".into(), json!(security.jwt_expiry_minutes));
    output_success(output_format, "Token issued", data)
}

pub fn hash_password(password: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let encoded = PasswordEncoder::new(config().security.bcrypt_cost).encode(password)?;

    let mut data = Map::new();
    data.insert("hash".into(), json!(encoded));
    output_success(output_format, "Password hashed", data)
}
