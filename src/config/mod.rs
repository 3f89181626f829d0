//! Environment-sourced configuration.
//!
//! Each submodule owns one concern and exposes a `from_env` constructor.
//! Configuration is loaded once at startup and never mutated afterwards.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `ACCESS_TOKEN_SECRET` / `REFRESH_TOKEN_SECRET`: token signing keys
//! - `ACCESS_TOKEN_EXPIRE_MINUTES` / `REFRESH_TOKEN_EXPIRE_DAYS`: token TTLs
//! - `JWT_ALGORITHM`: signing algorithm identifier (default `HS256`)
//! - `REFRESH_COOKIE_SECURE`: `Secure` flag on the refresh cookie
//! - `CORS_ALLOWED_ORIGINS`: comma-separated origin list

pub mod cors;
pub mod database;
pub mod jwt;
