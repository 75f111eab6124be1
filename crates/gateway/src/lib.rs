//! HTTP gateway authenticating requests with capability tokens.
//!
//! Everything under `/api` passes through the capability middleware,
//! which runs the full verification pipeline and either injects the
//! verified identity into the request or short-circuits with the mapped
//! rejection. Outside `/api` the gateway answers with a fixed banner.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use routes::router;
pub use state::{AppState, VerifiedIdentity};
