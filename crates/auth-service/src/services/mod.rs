pub mod attempt_tracker;
pub mod revocation;
pub mod security_service;
pub mod token_service;
