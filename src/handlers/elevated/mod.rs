// handlers/elevated/mod.rs - admin-only routes, behind admin_gate_middleware

pub mod comment;
pub mod user;
