//! Observability for the Orbit intent router.
//!
//! Currently this is the tracing subscriber setup shared by the service
//! binary: an `EnvFilter` (where `RUST_LOG` takes precedence over the
//! configured level) feeding either a pretty or a JSON formatter.

pub mod tracing;

pub use crate::tracing::{init_tracing, TracingConfig, TracingError};
