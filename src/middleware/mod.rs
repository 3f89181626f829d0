//! Request authentication and authorization.
//!
//! Protected requests pass through two composable extractors:
//!
//! 1. [`auth::CurrentUser`] validates the `Authorization: Bearer` access
//!    token and resolves the acting user from the database.
//! 2. [`role::RequireAdmin`] additionally enforces the admin role for
//!    catalog writes and user listing.

pub mod auth;
pub mod role;
