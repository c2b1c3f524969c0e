//! # Ensaluti (Accounts Authentication Client)
//!
//! `ensaluti` is a typed client for the accounts service authentication API.
//! It covers the five account flows: login, registration, password recovery,
//! password reset, and email confirmation, all as JSON `POST` exchanges over
//! a shared HTTP transport.
//!
//! ## Outcome Classification
//!
//! The service reports failures as an HTTP error status plus a JSON body
//! carrying a machine `code` and a human `detail`. Each operation owns a
//! closed outcome enum and a static table mapping known codes onto it:
//!
//! - **Exact matching:** codes are compared case-sensitively, first match wins.
//! - **Closed sets:** callers match exhaustively; a new server code can never
//!   surface as a new variant, only as the operation's fallback outcome.
//! - **Fallback:** any failure without a recognized code (unknown code, missing
//!   or unparseable error body, transport breakdown) collapses into the
//!   fallback variant carrying the stringified failure.
//!
//! ## Security Posture
//!
//! Password recovery reports a single opaque failure outcome regardless of the
//! server's reason, so callers cannot distinguish a registered address from an
//! unregistered one. Detail strings on every outcome are diagnostics for logs
//! and operators, never material for program logic.

pub mod cli;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::AuthClient;
pub use error::{ConfirmationError, LoginError, RecoverError, RegisterError};
pub use transport::{ErrorResponse, Transport, TransportError};
pub use types::{AuthenticationResult, User};

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        // Should be a hex string (full SHA-1 is 40 chars, but could be short)
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
