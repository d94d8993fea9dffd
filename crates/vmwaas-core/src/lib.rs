//! # vmwaas-core
//!
//! Request/response pipeline shared by the VMware as a Service API clients.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy and the decoded service error
//! - [`auth`] - Authenticator contract and the simple credential schemes
//! - [`request`] - URL templating and request assembly
//! - [`codec`] - Canonical JSON, typed decoding with JSON pointers, gzip
//! - [`patch`] - JSON Patch operations
//! - [`response`] - Detailed response metadata
//! - [`headers`] - SDK identity headers
//! - [`config`] - Serializable service configuration
//! - [`client`] - Retry policy, HTTP configuration and the dispatcher

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod headers;
pub mod patch;
pub mod request;
pub mod response;

// Re-export commonly used types
pub use auth::{Authenticator, BasicAuthenticator, BearerTokenAuthenticator, NoAuthAuthenticator};
pub use client::{ClientConfig, RetryPolicy, ServiceClient, ServiceClientBuilder};
pub use config::ServiceConfig;
pub use error::{Error, Result, ServiceError};
pub use patch::{JsonPatchOperation, PatchOp};
pub use request::{Request, RequestBuilder};
pub use response::{DetailedResponse, ServiceResponse};
