//! Connection and open-database options.

use couchrest_auth::Credentials;

/// Construction-time options for a [`Connection`](crate::Connection).
///
/// Empty strings count as absent, so `Some("")` behaves like `None`.
#[derive(Clone, Default)]
pub struct ConnectionOptions {
    pub user: Option<String>,
    pub passwd: Option<String>,
    /// Log in through `/_session` and replay the session cookie instead of
    /// sending basic auth on every request.
    pub use_cookie: bool,
}

impl std::fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionOptions")
            .field("user", &self.user)
            .field("passwd", &self.passwd.as_ref().map(|_| "[REDACTED]"))
            .field("use_cookie", &self.use_cookie)
            .finish()
    }
}

impl ConnectionOptions {
    /// Create options with no credentials and cookie auth disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the username.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the password.
    pub fn with_password(mut self, passwd: impl Into<String>) -> Self {
        self.passwd = Some(passwd.into());
        self
    }

    /// Enable or disable cookie-session authentication.
    pub fn with_cookie_auth(mut self, enabled: bool) -> Self {
        self.use_cookie = enabled;
        self
    }

    /// Set username and password from existing credentials.
    pub fn with_credentials(self, creds: &Credentials) -> Self {
        self.with_user(creds.username())
            .with_password(creds.password())
    }

    /// Load options from environment variables.
    ///
    /// - `COUCHDB_USER`, `COUCHDB_PASSWORD`
    /// - `COUCHDB_COOKIE_AUTH` (`1`, `true` or `yes` enables cookie auth)
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load options through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let use_cookie = lookup("COUCHDB_COOKIE_AUTH")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let mut options = Self::new().with_cookie_auth(use_cookie);
        if let Ok(creds) = Credentials::from_vars(&lookup) {
            options = options.with_credentials(&creds);
        }
        options
    }

    /// The credentials these options resolve to: a non-empty user, with the
    /// password defaulting to empty.
    pub fn credentials(&self) -> Option<Credentials> {
        let user = self.user.as_deref().filter(|u| !u.is_empty())?;
        let passwd = self.passwd.as_deref().unwrap_or_default();
        Some(Credentials::new(user, passwd))
    }
}

/// Options for [`Connection::open_db`](crate::Connection::open_db).
#[derive(Debug, Clone, Copy)]
pub struct OpenOptions {
    /// Create the database when it does not exist.
    pub create: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self { create: true }
    }
}

impl OpenOptions {
    /// Open only if the database already exists.
    pub fn existing() -> Self {
        Self { create: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| vars.get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_default_options() {
        let options = ConnectionOptions::default();
        assert!(!options.use_cookie);
        assert!(options.credentials().is_none());
        assert!(OpenOptions::default().create);
        assert!(!OpenOptions::existing().create);
    }

    #[test]
    fn test_credentials_require_non_empty_user() {
        let options = ConnectionOptions::new().with_user("").with_password("secret");
        assert!(options.credentials().is_none());

        let options = ConnectionOptions::new().with_user("admin");
        let creds = options.credentials().unwrap();
        assert_eq!(creds.username(), "admin");
        assert_eq!(creds.password(), "");
    }

    #[test]
    fn test_from_vars() {
        let options = ConnectionOptions::from_vars(lookup(&[
            ("COUCHDB_USER", "admin"),
            ("COUCHDB_PASSWORD", "secret"),
            ("COUCHDB_COOKIE_AUTH", "TRUE"),
        ]));
        assert!(options.use_cookie);
        assert_eq!(
            options.credentials(),
            Some(Credentials::new("admin", "secret"))
        );

        let options = ConnectionOptions::from_vars(lookup(&[("COUCHDB_COOKIE_AUTH", "0")]));
        assert!(!options.use_cookie);
        assert!(options.credentials().is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let options = ConnectionOptions::new()
            .with_user("admin")
            .with_password("very_secret_pw");
        let debug_output = format!("{:?}", options);
        assert!(debug_output.contains("admin"));
        assert!(!debug_output.contains("very_secret_pw"));
    }
}
