//! Typed operations for the accounts authentication API. These wrappers
//! centralize paths, payload construction, and outcome classification,
//! keeping auth flows consistent and the error taxonomy in one place.

use crate::{
    error::{ConfirmationError, LoginError, RecoverError, RegisterError},
    transport::{Transport, TransportError},
    types::{
        AuthenticationResult, ConfirmEmailRequest, LoginRequest, LoginResponse, RecoverRequest,
        RegisterRequest, ResetPasswordRequest,
    },
};
use tracing::{info_span, Instrument};

// Exact paths, trailing slashes included, are part of the wire contract.
const LOGIN_PATH: &str = "/api/auth/login/";
const REGISTER_PATH: &str = "/api/auth/register/";
const RECOVER_PATH: &str = "/api/auth/password-reset/";
const RESET_PASSWORD_PATH: &str = "/api/auth/confirm-password-reset/";
const CONFIRM_REGISTRATION_PATH: &str = "/api/auth/confirm-registration/";

/// Client for the accounts authentication API.
///
/// All five operations go through one shared [`Transport`], so they agree on
/// base URL, timeouts, and user agent. The client is cheap to clone.
#[derive(Clone, Debug)]
pub struct AuthClient {
    transport: Transport,
}

impl AuthClient {
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Build a client for the service at `base_url` using the crate's own
    /// user agent.
    /// # Errors
    /// Returns an error if the base URL is unusable or the HTTP client cannot
    /// be constructed.
    pub fn from_base_url(base_url: &str) -> Result<Self, TransportError> {
        Ok(Self::new(Transport::new(crate::APP_USER_AGENT, base_url)?))
    }

    #[must_use]
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Exchange an email/password pair for a bearer token.
    ///
    /// The service's `exp` claim arrives in seconds and is converted to the
    /// millisecond `expires_at` on the result.
    ///
    /// # Errors
    /// Returns [`LoginError::InvalidCredentials`] when the service rejects the
    /// pair, [`LoginError::EmailNotConfirmed`] when the account still awaits
    /// email confirmation, and [`LoginError::Other`] for everything else.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthenticationResult, LoginError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let span = info_span!("auth.login", http.method = "POST", path = LOGIN_PATH);

        let response: LoginResponse = self
            .transport
            .post_json(LOGIN_PATH, &body)
            .instrument(span)
            .await
            .map_err(LoginError::classify)?;

        Ok(AuthenticationResult {
            bearer_token: response.token,
            expires_at: response.exp.saturating_mul(1000),
            user: response.user,
        })
    }

    /// Create an account. The service sends a confirmation email; the new
    /// account cannot log in until the address is confirmed.
    /// # Errors
    /// Returns [`RegisterError::EmailTaken`] when the address already belongs
    /// to an account, and [`RegisterError::Other`] for everything else.
    pub async fn register(
        &self,
        email: &str,
        full_name: &str,
        password: &str,
    ) -> Result<(), RegisterError> {
        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
        };

        let span = info_span!("auth.register", http.method = "POST", path = REGISTER_PATH);

        self.transport
            .post_empty(REGISTER_PATH, &body)
            .instrument(span)
            .await
            .map_err(RegisterError::classify)
    }

    /// Request a password recovery email without leaking account existence.
    /// # Errors
    /// Returns the opaque [`RecoverError::Failed`] for every failure; the
    /// outcome never reveals whether the address has an account.
    pub async fn recover(&self, email: &str) -> Result<(), RecoverError> {
        let body = RecoverRequest {
            email: email.to_string(),
        };

        let span = info_span!("auth.recover", http.method = "POST", path = RECOVER_PATH);

        self.transport
            .post_empty(RECOVER_PATH, &body)
            .instrument(span)
            .await
            .map_err(RecoverError::classify)
    }

    /// Redeem a recovery token and set a new password.
    /// # Errors
    /// Returns [`ConfirmationError::InvalidToken`] when the token is unknown,
    /// expired, or already used, and [`ConfirmationError::Other`] for
    /// everything else.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), ConfirmationError> {
        let body = ResetPasswordRequest {
            token: token.to_string(),
            new_password: new_password.to_string(),
        };

        let span = info_span!(
            "auth.reset_password",
            http.method = "POST",
            path = RESET_PASSWORD_PATH
        );

        self.transport
            .post_empty(RESET_PASSWORD_PATH, &body)
            .instrument(span)
            .await
            .map_err(ConfirmationError::classify)
    }

    /// Redeem an emailed token to confirm the account's email address.
    /// # Errors
    /// Returns [`ConfirmationError::InvalidToken`] when the token is unknown,
    /// expired, or already used, and [`ConfirmationError::Other`] for
    /// everything else.
    pub async fn confirm_email_address(&self, token: &str) -> Result<(), ConfirmationError> {
        let body = ConfirmEmailRequest {
            token: token.to_string(),
        };

        let span = info_span!(
            "auth.confirm_email",
            http.method = "POST",
            path = CONFIRM_REGISTRATION_PATH
        );

        self.transport
            .post_empty(CONFIRM_REGISTRATION_PATH, &body)
            .instrument(span)
            .await
            .map_err(ConfirmationError::classify)
    }
}
