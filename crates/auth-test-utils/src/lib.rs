//! # Auth Test Utilities
//!
//! Shared test utilities for the gym authentication service.
//!
//! This crate provides:
//! - Server test harness (`TestAuthServer` for E2E tests)
//! - Seeded test accounts with fixed credentials
//! - Custom assertions (`TokenAssertions` trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> anyhow::Result<()> {
//!     let server = TestAuthServer::spawn().await?;
//!
//!     let token = server.login(TRAINEE_USERNAME, TRAINEE_PASSWORD).await?;
//!     token.assert_valid_jwt().assert_for_subject(TRAINEE_USERNAME);
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod server_harness;

pub use assertions::*;
pub use server_harness::*;
