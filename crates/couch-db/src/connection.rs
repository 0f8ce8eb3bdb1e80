//! Server-level connection.
//!
//! [`Connection`] holds the base URL, the transport and the auth settings.
//! Every call builds a fresh [`RequestSpec`]; nothing per-request is kept on
//! the connection, so a clone can be shared freely between tasks.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use couchrest_auth::{
    strip_userinfo, Credentials, SessionInfo, SessionRequest, SessionResponse,
    COOKIE_AUTH_HEADER, COOKIE_AUTH_VALUE, SESSION_PATH,
};
use couchrest_client::{
    join, BasicAuth, ClientConfig, CouchResult, Error, ErrorKind, QueryParams, RequestMethod,
    RequestOptions, RequestSpec, ResponseExt, Result, ReqwestTransport, Transport,
    JSON_MEDIA_TYPE,
};

use crate::database::Database;
use crate::options::{ConnectionOptions, OpenOptions};

/// Server URL used by [`Connection::from_env`] when `COUCHDB_URL` is unset.
pub const DEFAULT_URL: &str = "http://localhost:5984/";

/// A connection to a CouchDB server.
///
/// With cookie auth enabled, a 401 from any call made through
/// [`make_request`](Connection::make_request) triggers one login to
/// `/_session` followed by one retry of the original call. Without it,
/// credentials (if any) go out as basic auth on every request.
///
/// # Example
///
/// ```rust,ignore
/// use couchrest_db::{Connection, ConnectionOptions};
///
/// let conn = Connection::connect(
///     "http://localhost:5984",
///     ConnectionOptions::new()
///         .with_user("admin")
///         .with_password("secret")
///         .with_cookie_auth(true),
/// )?;
///
/// let db = conn.open_db("albums", Default::default()).await?;
/// db.put("doc1", Some(serde_json::json!({"title": "Blue Train"})), None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Connection {
    base_url: String,
    transport: Arc<dyn Transport>,
    default_headers: HashMap<String, String>,
    credentials: Credentials,
    basic_auth: Option<BasicAuth>,
    use_cookie_auth: bool,
}

impl Connection {
    /// Create a connection over an arbitrary transport.
    ///
    /// Fails with `InvalidUrl` when `base_url` does not parse. No request is
    /// made.
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        options: ConnectionOptions,
    ) -> Result<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url)?;

        let credentials = options.credentials();
        let basic_auth = if options.use_cookie {
            None
        } else {
            credentials.as_ref().map(Credentials::to_basic_auth)
        };

        let mut default_headers = HashMap::new();
        default_headers.insert("accept".to_string(), JSON_MEDIA_TYPE.to_string());

        Ok(Self {
            base_url,
            transport,
            default_headers,
            credentials: credentials.unwrap_or_else(|| Credentials::new("", "")),
            basic_auth,
            use_cookie_auth: options.use_cookie,
        })
    }

    /// Create a connection backed by a default [`ReqwestTransport`].
    pub fn connect(base_url: impl Into<String>, options: ConnectionOptions) -> Result<Self> {
        Self::with_config(base_url, options, ClientConfig::default())
    }

    /// Create a connection backed by a [`ReqwestTransport`] with custom HTTP
    /// configuration.
    pub fn with_config(
        base_url: impl Into<String>,
        options: ConnectionOptions,
        config: ClientConfig,
    ) -> Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Self::new(base_url, Arc::new(transport), options)
    }

    /// Create a connection from environment variables.
    ///
    /// - `COUCHDB_URL` (default: `http://localhost:5984/`)
    /// - `COUCHDB_USER`, `COUCHDB_PASSWORD`
    /// - `COUCHDB_COOKIE_AUTH`
    ///
    /// When `COUCHDB_USER` is unset, credentials embedded in `COUCHDB_URL`
    /// are used instead. Userinfo is always stripped from the base URL.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Create a connection through an arbitrary variable lookup.
    ///
    /// Same variables as [`Connection::from_env`]; empty values count as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("COUCHDB_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_URL.to_string());

        let mut options = ConnectionOptions::from_vars(&lookup);
        if options.credentials().is_none() {
            if let Some(creds) = Credentials::from_url(&url)? {
                options = options.with_credentials(&creds);
            }
        }

        Self::connect(strip_userinfo(&url)?, options)
    }

    /// The server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns true if this connection authenticates with a session cookie.
    pub fn uses_cookie_auth(&self) -> bool {
        self.use_cookie_auth
    }

    /// Perform exactly one HTTP exchange against `base_url` joined with `path`.
    ///
    /// Status codes of 400 and above come back as [`CouchError`] variants
    /// (`Auth` for 401). Transport failures are returned untouched.
    ///
    /// [`CouchError`]: couchrest_client::CouchError
    #[instrument(skip(self, opts))]
    pub async fn http_request(
        &self,
        method: RequestMethod,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<CouchResult> {
        let request = self.build_request(method, path, opts)?;
        debug!(url = %request.url, "Sending request");

        let response = self.transport.send(request).await?;
        let status = response.status;
        let result = response.check_couch_error();

        match &result {
            Ok(_) => debug!(status, "Request succeeded"),
            Err(e) => debug!(status, error = %e, "Request failed"),
        }
        result
    }

    /// Log in through `/_session`, then issue the request once more.
    ///
    /// A failed login is returned as is and the request is not retried.
    #[instrument(skip(self, opts))]
    pub async fn login_and_retry(
        &self,
        method: RequestMethod,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<CouchResult> {
        self.create_session().await?;
        self.http_request(method, path, opts).await
    }

    /// Issue a request, relogging once on a 401 when cookie auth is enabled.
    ///
    /// Only authentication failures are retried, and only once. A second
    /// 401 propagates to the caller.
    #[instrument(skip(self, opts))]
    pub async fn make_request(
        &self,
        method: RequestMethod,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<CouchResult> {
        match self.http_request(method, path, opts).await {
            Err(e) if self.use_cookie_auth && e.is_auth_failure() => {
                warn!("Session rejected, logging in and retrying");
                self.login_and_retry(method, path, opts).await
            }
            other => other,
        }
    }

    /// `GET` through [`make_request`](Connection::make_request).
    pub async fn get(&self, path: &str, params: Option<QueryParams>) -> Result<CouchResult> {
        let opts = RequestOptions::new().params(params);
        self.make_request(RequestMethod::Get, path, &opts).await
    }

    /// `HEAD` through [`make_request`](Connection::make_request).
    pub async fn head(&self, path: &str, params: Option<QueryParams>) -> Result<CouchResult> {
        let opts = RequestOptions::new().params(params);
        self.make_request(RequestMethod::Head, path, &opts).await
    }

    /// `POST` through [`make_request`](Connection::make_request).
    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        params: Option<QueryParams>,
    ) -> Result<CouchResult> {
        let opts = RequestOptions::new().body(body).params(params);
        self.make_request(RequestMethod::Post, path, &opts).await
    }

    /// `PUT` through [`make_request`](Connection::make_request).
    pub async fn put(
        &self,
        path: &str,
        body: Option<Value>,
        params: Option<QueryParams>,
    ) -> Result<CouchResult> {
        let opts = RequestOptions::new().body(body).params(params);
        self.make_request(RequestMethod::Put, path, &opts).await
    }

    /// `DELETE` through [`make_request`](Connection::make_request).
    pub async fn delete(&self, path: &str, params: Option<QueryParams>) -> Result<CouchResult> {
        let opts = RequestOptions::new().params(params);
        self.make_request(RequestMethod::Delete, path, &opts).await
    }

    /// Open a database, creating it first when it does not exist and
    /// `opts.create` is set.
    ///
    /// Any existence-check failure other than 404 is returned without
    /// attempting a create.
    #[instrument(skip(self))]
    pub async fn open_db(&self, name: &str, opts: OpenOptions) -> Result<Database> {
        match self.head(name, None).await {
            Ok(_) => {}
            Err(e) if e.is_not_found() && opts.create => {
                debug!("Database missing, creating it");
                self.put(name, None, None).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(self.database(name))
    }

    /// A handle to `name` without checking that it exists.
    pub fn database(&self, name: impl Into<String>) -> Database {
        Database::new(name, self.clone())
    }

    /// Delete a database.
    #[instrument(skip(self))]
    pub async fn delete_db(&self, name: &str) -> Result<CouchResult> {
        self.delete(name, None).await
    }

    /// Names of all databases on the server.
    #[instrument(skip(self))]
    pub async fn all_dbs(&self) -> Result<Vec<String>> {
        self.get("_all_dbs", None).await?.json()
    }

    /// Create a cookie session with the configured credentials.
    ///
    /// Goes straight to [`http_request`](Connection::http_request); a failed
    /// login is never itself retried.
    #[instrument(skip(self))]
    pub async fn login(&self) -> Result<SessionResponse> {
        self.create_session().await?.json()
    }

    /// The session the server associates with this connection.
    #[instrument(skip(self))]
    pub async fn session(&self) -> Result<SessionInfo> {
        self.get(SESSION_PATH, None).await?.json()
    }

    /// End the cookie session.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<CouchResult> {
        self.delete(SESSION_PATH, None).await
    }

    async fn create_session(&self) -> Result<CouchResult> {
        debug!(user = %self.credentials.username(), "Logging in");
        let opts = RequestOptions::new().json(&SessionRequest::from(&self.credentials))?;
        self.http_request(RequestMethod::Post, SESSION_PATH, &opts)
            .await
    }

    fn build_request(
        &self,
        method: RequestMethod,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<RequestSpec> {
        let mut request = RequestSpec::new(method, join(&self.base_url, path));
        request.headers = self.default_headers.clone();

        if self.use_cookie_auth {
            request.use_cookie_jar = true;
            request.headers.insert(
                COOKIE_AUTH_HEADER.to_ascii_lowercase(),
                COOKIE_AUTH_VALUE.to_string(),
            );
        }

        if let Some(body) = &opts.body {
            let encoded = serde_json::to_string(body)
                .map_err(|e| Error::with_source(ErrorKind::Serialization(e.to_string()), e))?;
            request
                .headers
                .insert("content-type".to_string(), JSON_MEDIA_TYPE.to_string());
            request.body = Some(encoded);
        }

        request.headers.extend(
            opts.headers
                .iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value.clone())),
        );

        if let Some(params) = &opts.params {
            request.query_params = params
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
        }

        request.basic_auth = self.basic_auth.clone();
        Ok(request)
    }
}
