//! Demo API - a greeting endpoint and a health check behind a permissive CORS policy.

pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod server;
