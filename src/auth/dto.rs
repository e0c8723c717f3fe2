use serde::{Deserialize, Serialize};

use crate::session::AuthUser;

/// Request body for user registration.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after login: the opaque bearer credential plus the
/// identity record, both handed to the session store.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUser,
}
