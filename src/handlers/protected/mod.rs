// handlers/protected/mod.rs - every route here sits behind jwt_auth_middleware
// and receives the caller as Extension<AuthUser>

pub mod comment;
pub mod manager;
pub mod todo;
pub mod user;
