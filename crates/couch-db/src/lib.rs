//! # couch-db
//!
//! Server and database handles for CouchDB.
//!
//! - [`Connection`]: base URL, transport and auth settings, the five verbs,
//!   and `open_db`
//! - [`Database`]: the same verbs scoped to one database
//!
//! ## Authentication
//!
//! With `use_cookie` set, requests are routed through the transport's cookie
//! jar. When the server answers 401, the connection posts the credentials to
//! `/_session` and repeats the request exactly once. Otherwise credentials are
//! sent as basic auth on every request.
//!
//! ## Example
//!
//! ```rust,ignore
//! use couchrest_db::{Connection, ConnectionOptions, OpenOptions};
//! use serde_json::json;
//!
//! let conn = Connection::connect(
//!     "http://localhost:5984",
//!     ConnectionOptions::new()
//!         .with_user("admin")
//!         .with_password("secret")
//!         .with_cookie_auth(true),
//! )?;
//!
//! let db = conn.open_db("albums", OpenOptions::default()).await?;
//! let created = db.put("doc1", Some(json!({"title": "Blue Train"})), None).await?;
//! println!("rev {}", created.data()?["rev"]);
//!
//! match db.get("missing", None).await {
//!     Err(e) if e.is_not_found() => println!("no such document"),
//!     other => println!("{:?}", other),
//! }
//! ```

mod connection;
mod database;
mod options;

#[cfg(test)]
mod testing;

pub use connection::{Connection, DEFAULT_URL};
pub use database::Database;
pub use options::{ConnectionOptions, OpenOptions};

pub use couchrest_client::{
    CouchError, CouchResult, Error, ErrorKind, QueryParams, RequestMethod, RequestOptions, Result,
};
