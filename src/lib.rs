//! # Shelfmark API
//!
//! A library-catalog REST API built with Rust, Axum, and PostgreSQL:
//! user registration and JWT-based authentication, role-based access
//! control, and CRUD over books, authors and genres with per-user
//! favorites.
//!
//! ## Architecture
//!
//! The codebase follows a modular layout, one feature module per concern:
//!
//! ```text
//! src/
//! ├── cli/              # Operator commands (set-role)
//! ├── config/           # Environment-sourced configuration
//! ├── middleware/       # Auth extractor and role gate
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Register, login, refresh, logout
//! │   ├── users/       # User directory and profile
//! │   ├── books/       # Book catalog and favorites
//! │   ├── authors/     # Author catalog
//! │   └── genres/      # Genre catalog
//! └── utils/           # Errors, JWT, password hashing, pagination
//! ```
//!
//! Each feature module keeps the same structure: `controller.rs` (HTTP
//! handlers), `service.rs` (business logic), `model.rs` (entities and
//! DTOs), `router.rs` (route wiring).
//!
//! ## Authentication
//!
//! - **Access token**: short-lived bearer JWT (default 15 minutes),
//!   returned in login/refresh response bodies.
//! - **Refresh token**: long-lived JWT (default 7 days), carried only in
//!   an HttpOnly `refresh_token` cookie and rotated on every refresh.
//!
//! The two token kinds are signed with independent secrets, so neither can
//! stand in for the other. Logout clears the cookie; already-issued access
//! tokens remain valid until expiry since tokens are stateless.
//!
//! ## Roles
//!
//! Two roles: `user` (default at registration) and `admin`. Catalog writes
//! and the user listing require `admin`. Roles are changed only via the
//! CLI:
//!
//! ```bash
//! cargo run -- set-role reader@example.com admin
//! ```
//!
//! ## API Documentation
//!
//! With the server running, interactive documentation is served at
//! `/swagger-ui` and `/scalar`.

pub mod cli;
pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
