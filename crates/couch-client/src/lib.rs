//! # couch-client
//!
//! Core HTTP plumbing for the CouchDB REST API.
//!
//! This crate provides the pieces every higher-level CouchDB type is built on:
//! - An injectable [`Transport`] capability (one HTTP exchange per call)
//! - A reqwest-backed [`ReqwestTransport`] with an optional shared cookie jar
//! - Typed request options and the per-call [`RequestSpec`]
//! - Result/error envelopes with lazily decoded JSON bodies
//! - The single-separator [`join`] rule used to build every URL
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Connection / Database                       │
//! │  (couch-db: verbs, cookie login-and-retry, openDB)          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 RequestSpec → Transport                     │
//! │  - One exchange per call, no retry                          │
//! │  - ReqwestTransport in production, fakes in tests           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │          TransportResponse → CouchResult / CouchError       │
//! │  - < 400 success, 401 Auth, other >= 400 Generic            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use couchrest_client::{ClientConfig, RequestMethod, RequestSpec, ReqwestTransport, ResponseExt, Transport};
//!
//! let transport = ReqwestTransport::new(ClientConfig::default())?;
//! let response = transport
//!     .send(RequestSpec::new(RequestMethod::Get, "http://localhost:5984/"))
//!     .await?;
//!
//! let result = response.check_couch_error()?;
//! assert_eq!(result.data()?["couchdb"], "Welcome");
//! ```

mod client;
mod config;
mod error;
mod path;
mod request;
mod response;
mod transport;

pub use client::ReqwestTransport;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use path::join;
pub use request::{BasicAuth, QueryParams, RequestMethod, RequestOptions, RequestSpec};
pub use response::{CouchError, CouchResult, Envelope, ResponseExt};
pub use transport::{Transport, TransportResponse};

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("couchrest/", env!("CARGO_PKG_VERSION"));

/// Media type sent in the `Accept` header of every request.
pub const JSON_MEDIA_TYPE: &str = "application/json";
