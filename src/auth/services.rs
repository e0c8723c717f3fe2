use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use tracing::info;

use crate::api::{ApiClient, ApiError};
use crate::auth::dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::session::{AuthUser, SessionStore};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Checks run before the registration request goes out.
#[derive(Debug, Error, PartialEq)]
pub enum CredentialError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("enter a valid email address")]
    InvalidEmail,
}

pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), CredentialError> {
    if name.trim().is_empty() {
        return Err(CredentialError::Missing("name"));
    }
    if email.trim().is_empty() {
        return Err(CredentialError::Missing("email"));
    }
    if !is_valid_email(email) {
        return Err(CredentialError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(CredentialError::Missing("password"));
    }
    Ok(())
}

pub async fn register(
    api: &ApiClient,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    api.post(
        "/register",
        &RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        },
    )
    .await?;
    info!(email, "account registered");
    Ok(())
}

/// Exchanges credentials for a bearer token and identity, then installs
/// both in the session store.
pub async fn login(
    api: &ApiClient,
    session: &SessionStore,
    email: &str,
    password: &str,
) -> Result<AuthUser, ApiError> {
    let res: LoginResponse = api
        .post_json(
            "/login",
            &LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await?;
    info!(user_id = res.user.id, "signed in");
    session.login(res.token, res.user.clone());
    Ok(res.user)
}
