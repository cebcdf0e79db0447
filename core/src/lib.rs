//! Synchronous client for the Confluent Cloud control plane and the
//! per-cluster Kafka REST data plane.
//!
//! # Overview
//! Every resource method builds a path and a typed body or filter struct and
//! hands them to one shared request executor, which owns URL composition,
//! JSON encoding, query encoding, credential injection, and retry with
//! backoff. Callers get back typed results decoded from JSON.
//!
//! # Design
//! - `ConfluentClient` is an immutable configuration value; clones are cheap
//!   and safe to use concurrently.
//! - Credentials go through the `Authenticator` trait, the network through
//!   the `Transport` trait, so both can be substituted in tests.
//! - Filter structs map themselves to query pairs explicitly via
//!   `QueryParams` — omit-if-empty is spelled out per field.
//! - List responses share one envelope (`ResourceList`) whose `next` link
//!   carries the opaque cursor for the following page.
//! - `cluster::ClusterClient` speaks the hypermedia-driven Kafka REST API,
//!   navigating the `related` links of the cluster document.

pub mod api_keys;
pub mod auth;
pub mod client;
pub mod cluster;
pub mod clusters;
pub mod connectors;
pub mod environments;
pub mod error;
pub mod http;
pub mod query;
pub mod quotas;
pub mod retry;
pub mod role_bindings;
pub mod schema_registry;
pub mod service_accounts;
pub mod transport;
pub mod types;
pub mod users;

pub use auth::{Authenticator, BasicAuth, NoAuth};
pub use client::{ConfluentClient, DEFAULT_BASE_URL};
pub use cluster::ClusterClient;
pub use error::{AuthError, Error, ErrorResponse};
pub use http::{HttpRequest, HttpResponse, Method};
pub use query::{PaginationOptions, QueryParams};
pub use retry::RetryPolicy;
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{BaseModel, CloudProvider, Metadata, ResourceList};
