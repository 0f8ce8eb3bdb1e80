//! # couchrest
//!
//! A CouchDB HTTP API client library for Rust.
//!
//! Requests are plain JSON over HTTP. Responses of 400 and above come back as
//! typed errors that keep the full response, and every body is decoded lazily
//! on first access.
//!
//! ## Security
//!
//! - Passwords are redacted in Debug output
//! - Tracing spans skip request options and login payloads
//! - Userinfo embedded in `COUCHDB_URL` is stripped before the URL is used
//!
//! ## Crates
//!
//! - **couchrest-client** - Transport capability, reqwest transport, request/response envelopes
//! - **couchrest-auth** - Credentials and `/_session` payloads
//! - **couchrest-db** - `Connection` and `Database` with cookie login-and-retry
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use couchrest::{Connection, OpenOptions};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // COUCHDB_URL, COUCHDB_USER, COUCHDB_PASSWORD, COUCHDB_COOKIE_AUTH
//!     let conn = Connection::from_env()?;
//!
//!     let welcome = conn.get("/", None).await?;
//!     println!("CouchDB {}", welcome.data()?["version"]);
//!
//!     let db = conn.open_db("albums", OpenOptions::default()).await?;
//!     db.put("doc1", Some(json!({"title": "Blue Train"})), None).await?;
//!
//!     Ok(())
//! }
//! ```

pub use couchrest_auth as auth;
pub use couchrest_client as client;
pub use couchrest_db as db;

pub use couchrest_auth::Credentials;
pub use couchrest_client::{
    ClientConfig, CouchError, CouchResult, Error, ErrorKind, QueryParams, RequestMethod,
    RequestOptions, ReqwestTransport, Result, Transport,
};
pub use couchrest_db::{Connection, ConnectionOptions, Database, OpenOptions};
