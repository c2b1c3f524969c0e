//! Outcome taxonomies for the authentication operations.
//!
//! Every operation owns a closed enum describing how it can fail, plus a
//! static table mapping the service's machine codes onto that enum. The
//! tables are the contract: codes are matched exactly and case-sensitively,
//! first match wins, and the same code may mean different things to
//! different operations. Anything a table does not recognize, including
//! failures that never produced a structured error body, collapses into the
//! operation's fallback variant carrying the stringified failure.
//!
//! Classified variants carry the server's human-readable `detail` verbatim;
//! fallback variants carry the transport failure's display form (URL, status,
//! and detail when present). Either way the payload is diagnostic text for
//! logs and operators, not material for program logic.

use crate::transport::TransportError;
use thiserror::Error;

/// Code table mapping the service's machine codes onto an outcome set.
type Table<E> = &'static [(&'static str, fn(String) -> E)];

/// Classify a transport failure against an operation's code table.
fn classify<E>(table: Table<E>, fallback: fn(String) -> E, failure: TransportError) -> E {
    if let Some(body) = failure.response() {
        if let Some(code) = body.code.as_deref() {
            for (known, outcome) in table {
                if *known == code {
                    return outcome(body.detail.clone());
                }
            }
        }
    }

    fallback(failure.to_string())
}

/// Ways a login attempt can fail.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoginError {
    /// The service rejected the email/password pair.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
    /// The account exists but its email address was never confirmed.
    #[error("email not confirmed: {0}")]
    EmailNotConfirmed(String),
    /// Any failure the login code table does not recognize.
    #[error("login failed: {0}")]
    Other(String),
}

impl LoginError {
    // The service reports rejected credentials under both codes.
    const CODES: Table<Self> = &[
        ("login_failed", Self::InvalidCredentials),
        ("unknown_error", Self::InvalidCredentials),
        ("account_email_not_confirmed", Self::EmailNotConfirmed),
    ];

    pub(crate) fn classify(failure: TransportError) -> Self {
        classify(Self::CODES, Self::Other, failure)
    }

    /// Diagnostic detail carried by every outcome.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidCredentials(detail) | Self::EmailNotConfirmed(detail) | Self::Other(detail) => {
                detail
            }
        }
    }
}

/// Ways a registration attempt can fail.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    /// The email address already belongs to an account.
    #[error("email already registered: {0}")]
    EmailTaken(String),
    /// Any failure the registration code table does not recognize.
    #[error("registration failed: {0}")]
    Other(String),
}

impl RegisterError {
    // The service reports an already-registered email as `unknown_error`.
    const CODES: Table<Self> = &[("unknown_error", Self::EmailTaken)];

    pub(crate) fn classify(failure: TransportError) -> Self {
        classify(Self::CODES, Self::Other, failure)
    }

    /// Diagnostic detail carried by every outcome.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::EmailTaken(detail) | Self::Other(detail) => detail,
        }
    }
}

/// The single way a password recovery request can fail.
///
/// Recovery never inspects the service's error codes, so callers cannot tell
/// a rejected address apart from a transport breakdown. Keeping the outcome
/// opaque means the client cannot be used to probe which addresses have
/// accounts.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RecoverError {
    #[error("password recovery failed: {0}")]
    Failed(String),
}

impl RecoverError {
    pub(crate) fn classify(failure: TransportError) -> Self {
        Self::Failed(failure.to_string())
    }

    /// Diagnostic detail carried by every outcome.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::Failed(detail) => detail,
        }
    }
}

/// Ways a token confirmation can fail.
///
/// Shared by password reset and email confirmation; both flows redeem an
/// emailed token and the service rejects a bad one the same way.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfirmationError {
    /// The token is unknown, expired, or already used.
    #[error("invalid token: {0}")]
    InvalidToken(String),
    /// Any failure the confirmation code table does not recognize.
    #[error("confirmation failed: {0}")]
    Other(String),
}

impl ConfirmationError {
    const CODES: Table<Self> = &[("invalid_token", Self::InvalidToken)];

    pub(crate) fn classify(failure: TransportError) -> Self {
        classify(Self::CODES, Self::Other, failure)
    }

    /// Diagnostic detail carried by every outcome.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidToken(detail) | Self::Other(detail) => detail,
        }
    }
}
