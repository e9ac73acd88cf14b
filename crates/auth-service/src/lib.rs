//! Gym CRM authentication service library.
//!
//! Stateless-storage authentication for the gym CRM: bcrypt credential
//! verification, HS256 access tokens, per-username brute-force lockout, and
//! logout via token revocation.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `credentials` - Credential store boundary and in-memory implementation
//! - `crypto` - Password hashing and verification
//! - `errors` - Error taxonomy and HTTP mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - Bearer-token authentication middleware
//! - `models` - Request and response types
//! - `observability` - Logging helpers and metrics
//! - `routes` - Router assembly
//! - `services` - Attempt tracking, revocation, tokens, orchestration

pub mod config;
pub mod credentials;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
