//! Cookie-session payloads for the `/_session` endpoint.

use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;

/// Login body for `POST /_session`.
#[derive(Clone, Serialize)]
pub struct SessionRequest {
    pub name: String,
    pub password: String,
}

impl std::fmt::Debug for SessionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRequest")
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl From<&Credentials> for SessionRequest {
    fn from(creds: &Credentials) -> Self {
        Self {
            name: creds.username().to_string(),
            password: creds.password().to_string(),
        }
    }
}

/// Response to a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    pub ok: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Response of `GET /_session`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionInfo {
    pub ok: bool,
    #[serde(rename = "userCtx")]
    pub user_ctx: UserContext,
    #[serde(default)]
    pub info: AuthInfo,
}

impl SessionInfo {
    /// Returns true if the request was made on behalf of a named user.
    pub fn is_authenticated(&self) -> bool {
        self.user_ctx.name.is_some()
    }
}

/// The user a session belongs to. `name` is null for anonymous sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct UserContext {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Which handler authenticated the session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthInfo {
    #[serde(default)]
    pub authentication_handlers: Vec<String>,
    #[serde(default)]
    pub authenticated: Option<String>,
    #[serde(default)]
    pub authentication_db: Option<String>,
}
