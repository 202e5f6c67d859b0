//! Provider-facing data: Discord endpoint locations and the status classification table.
//!
//! `endpoints` exposes [`ProviderEndpoints`], the fixed set of URLs this client talks to
//! (overridable so tests can point at a stub server). `status` defines
//! [`ProviderErrorKind`], the closed mapping from HTTP status codes to the reason strings
//! surfaced through [`ProviderError`](crate::error::ProviderError).

pub mod endpoints;
pub mod status;

pub use endpoints::*;
pub use status::*;
