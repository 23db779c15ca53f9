//! Authentication State
//!
//! Holds the session token (through the shared [`TokenStore`]) and the
//! status of the auth forms. Every operation catches its own errors and
//! reports them as a single message in [`AuthStatus`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::dto::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, ResetConfirmRequest, ResetRequest,
    StatusResponse, TokenResponse,
};
use crate::api::{ApiClient, ApiError, LOGIN_PATH};
use crate::session::validation::{self, FieldError};

pub const MSG_INVALID_CREDENTIALS: &str = "Nieprawidłowy email lub hasło";
pub const MSG_LOGIN_FAILED: &str = "Nie udało się zalogować. Spróbuj ponownie.";
pub const MSG_REGISTER_FAILED: &str = "Wystąpił błąd podczas rejestracji. Spróbuj ponownie.";
pub const MSG_EMAIL_TAKEN: &str = "E-mail jest już używany";
pub const MSG_RESET_REQUEST_FAILED: &str =
    "Nie udało się wysłać linku resetującego. Spróbuj ponownie.";
pub const MSG_RESET_SENT: &str = "Link do zresetowania hasła został wysłany na podany adres.";
pub const MSG_PASSWORD_CHANGE_FAILED: &str = "Nie udało się zmienić hasła. Spróbuj ponownie.";
pub const MSG_PASSWORD_CHANGED: &str = "Hasło zostało zmienione.";
pub const MSG_SESSION_SAVE_FAILED: &str = "Nie udało się zapisać sesji.";

/// Status of the most recent auth operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthStatus {
    pub loading: bool,
    pub error: Option<String>,
    /// Form field the error belongs to, when known
    pub field: Option<String>,
    /// Success message for flows that do not navigate away
    pub notice: Option<String>,
}

/// Session holder backing the login, register and password forms
pub struct AuthState {
    api: Rc<ApiClient>,
    status: RefCell<AuthStatus>,
}

impl AuthState {
    pub fn new(api: Rc<ApiClient>) -> Self {
        Self {
            api,
            status: RefCell::new(AuthStatus::default()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.tokens().is_present()
    }

    pub fn status(&self) -> AuthStatus {
        self.status.borrow().clone()
    }

    pub fn loading(&self) -> bool {
        self.status.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.status.borrow().error.clone()
    }

    /// Log in and persist the returned token
    pub async fn login(&self, email: &str, password: &str) -> bool {
        if let Err(e) = validation::validate_login(email, password) {
            self.reject(e);
            return false;
        }

        self.begin();
        let request = LoginRequest {
            email: email.trim(),
            password,
        };
        let result = self
            .api
            .post::<_, TokenResponse>("/auth/login", &request)
            .await;

        match result {
            Ok(response) => self.store_token(&response.token),
            Err(e) => {
                tracing::error!(error = %e, "Login error");
                let message = match &e {
                    ApiError::Unauthorized => MSG_INVALID_CREDENTIALS.to_string(),
                    other => other
                        .server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| MSG_LOGIN_FAILED.to_string()),
                };
                self.fail(e.field(), message);
                false
            }
        }
    }

    /// Register a new account and start its session
    pub async fn register(&self, email: &str, password: &str, password_confirm: &str) -> bool {
        if let Err(e) = validation::validate_register(email, password, password_confirm) {
            self.reject(e);
            return false;
        }

        self.begin();
        let request = RegisterRequest {
            email: email.trim(),
            password,
            password_confirm,
        };
        let result = self
            .api
            .post::<_, TokenResponse>("/auth/register", &request)
            .await;

        match result {
            Ok(response) => self.store_token(&response.token),
            Err(e) => {
                tracing::error!(error = %e, "Registration error");
                let message = if e.is_conflict() {
                    MSG_EMAIL_TAKEN.to_string()
                } else {
                    field_message(&e).unwrap_or_else(|| MSG_REGISTER_FAILED.to_string())
                };
                let field = if e.is_conflict() { Some("email") } else { e.field() };
                self.fail(field, message);
                false
            }
        }
    }

    /// End the session locally; the backend is told best-effort
    pub async fn logout(&self) {
        if self.is_authenticated() {
            if let Err(e) = self
                .api
                .post::<_, Option<StatusResponse>>("/auth/logout", &serde_json::json!({}))
                .await
            {
                tracing::warn!(error = %e, "Backend logout failed, clearing local session anyway");
            }
        }
        self.api.tokens().clear();
        *self.status.borrow_mut() = AuthStatus::default();
        tracing::info!("Logged out");
        self.api.navigator().navigate(LOGIN_PATH);
    }

    /// Ask the backend to e-mail a reset link
    pub async fn request_password_reset(&self, email: &str) -> bool {
        if let Err(e) = validation::validate_email(email) {
            self.reject(e);
            return false;
        }

        self.begin();
        let result = self
            .api
            .post::<_, Option<StatusResponse>>(
                "/auth/password/reset-request",
                &ResetRequest {
                    email: email.trim(),
                },
            )
            .await;

        self.finish_with_notice(result.map(|_| ()), MSG_RESET_SENT, MSG_RESET_REQUEST_FAILED)
    }

    /// Set a new password using the token from the reset link
    pub async fn confirm_password_reset(
        &self,
        token: &str,
        password: &str,
        password_confirm: &str,
    ) -> bool {
        if let Err(e) = validation::validate_reset_confirm(token, password, password_confirm) {
            self.reject(e);
            return false;
        }

        self.begin();
        let result = self
            .api
            .post::<_, Option<StatusResponse>>(
                "/auth/password/reset-confirm",
                &ResetConfirmRequest {
                    token: token.trim(),
                    password,
                    password_confirm,
                },
            )
            .await;

        self.finish_with_notice(
            result.map(|_| ()),
            MSG_PASSWORD_CHANGED,
            MSG_PASSWORD_CHANGE_FAILED,
        )
    }

    /// Change the password of the logged-in account
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
        password_confirm: &str,
    ) -> bool {
        if let Err(e) =
            validation::validate_password_change(current_password, new_password, password_confirm)
        {
            self.reject(e);
            return false;
        }

        self.begin();
        let result = self
            .api
            .post::<_, Option<StatusResponse>>(
                "/auth/password/change",
                &ChangePasswordRequest {
                    current_password,
                    new_password,
                    password_confirm,
                },
            )
            .await;

        self.finish_with_notice(
            result.map(|_| ()),
            MSG_PASSWORD_CHANGED,
            MSG_PASSWORD_CHANGE_FAILED,
        )
    }

    /// Redirect to the login page unless a session exists
    pub fn require_auth(&self) -> bool {
        if self.is_authenticated() {
            true
        } else {
            self.api.navigator().navigate(LOGIN_PATH);
            false
        }
    }

    fn begin(&self) {
        *self.status.borrow_mut() = AuthStatus {
            loading: true,
            ..AuthStatus::default()
        };
    }

    fn reject(&self, error: FieldError) {
        tracing::debug!(field = error.field, "Auth form rejected");
        *self.status.borrow_mut() = AuthStatus {
            loading: false,
            error: Some(error.message.to_string()),
            field: Some(error.field.to_string()),
            notice: None,
        };
    }

    fn fail(&self, field: Option<&str>, message: String) {
        let mut status = self.status.borrow_mut();
        status.loading = false;
        status.error = Some(message);
        status.field = field.map(str::to_string);
    }

    fn store_token(&self, token: &str) -> bool {
        match self.api.tokens().set(token) {
            Ok(()) => {
                self.status.borrow_mut().loading = false;
                tracing::info!("Session started");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to persist auth token");
                self.fail(None, MSG_SESSION_SAVE_FAILED.to_string());
                false
            }
        }
    }

    fn finish_with_notice(
        &self,
        result: Result<(), ApiError>,
        success: &str,
        fallback: &str,
    ) -> bool {
        match result {
            Ok(()) => {
                let mut status = self.status.borrow_mut();
                status.loading = false;
                status.notice = Some(success.to_string());
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Password flow failed");
                let message = field_message(&e).unwrap_or_else(|| fallback.to_string());
                self.fail(e.field(), message);
                false
            }
        }
    }
}

/// Backend messages are shown verbatim only for 4xx validation responses
fn field_message(error: &ApiError) -> Option<String> {
    match error.status() {
        Some(status) if (400..500).contains(&status) => {
            error.server_message().map(str::to_string)
        }
        _ => None,
    }
}
