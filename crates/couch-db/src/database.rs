//! Database-scoped handle.

use serde_json::Value;
use tracing::instrument;

use couchrest_client::{join, CouchResult, QueryParams, RequestMethod, RequestOptions, Result};

use crate::connection::Connection;

/// A database on a CouchDB server.
///
/// Every path is resolved relative to the database, so `db.get("doc1", None)`
/// requests `<base>/<name>/doc1`. Calls go through the connection's
/// [`make_request`](Connection::make_request) and share its relogin behavior.
#[derive(Debug, Clone)]
pub struct Database {
    name: String,
    conn: Connection,
}

impl Database {
    /// Create a handle without contacting the server.
    pub fn new(name: impl Into<String>, conn: Connection) -> Self {
        Self {
            name: name.into(),
            conn,
        }
    }

    /// The database name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The connection this handle issues requests through.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Issue a request against `name` joined with `path`.
    pub async fn make_request(
        &self,
        method: RequestMethod,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<CouchResult> {
        self.conn
            .make_request(method, &join(&self.name, path), opts)
            .await
    }

    /// `GET` on a path inside the database.
    pub async fn get(&self, path: &str, params: Option<QueryParams>) -> Result<CouchResult> {
        let opts = RequestOptions::new().params(params);
        self.make_request(RequestMethod::Get, path, &opts).await
    }

    /// `HEAD` on a path inside the database.
    pub async fn head(&self, path: &str, params: Option<QueryParams>) -> Result<CouchResult> {
        let opts = RequestOptions::new().params(params);
        self.make_request(RequestMethod::Head, path, &opts).await
    }

    /// `POST` on a path inside the database.
    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        params: Option<QueryParams>,
    ) -> Result<CouchResult> {
        let opts = RequestOptions::new().body(body).params(params);
        self.make_request(RequestMethod::Post, path, &opts).await
    }

    /// `PUT` on a path inside the database.
    pub async fn put(
        &self,
        path: &str,
        body: Option<Value>,
        params: Option<QueryParams>,
    ) -> Result<CouchResult> {
        let opts = RequestOptions::new().body(body).params(params);
        self.make_request(RequestMethod::Put, path, &opts).await
    }

    /// `DELETE` on a path inside the database.
    pub async fn delete(&self, path: &str, params: Option<QueryParams>) -> Result<CouchResult> {
        let opts = RequestOptions::new().params(params);
        self.make_request(RequestMethod::Delete, path, &opts).await
    }

    /// Database metadata (`GET /<name>`).
    #[instrument(skip(self), fields(db = %self.name))]
    pub async fn info(&self) -> Result<CouchResult> {
        self.get("", None).await
    }

    /// Returns true if the database exists. Only a 404 counts as missing.
    #[instrument(skip(self), fields(db = %self.name))]
    pub async fn exists(&self) -> Result<bool> {
        match self.head("", None).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
