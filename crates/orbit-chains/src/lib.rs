//! Chain and token lookup tables for the Orbit router.
//!
//! The [`TokenRegistry`] maps chain names to chain ids and `(chain, symbol)`
//! pairs to token contracts. It is built once at startup and shared
//! read-only, so it needs no locking.

pub mod registry;

pub use registry::{ChainEntry, RegistryError, TokenInfo, TokenRegistry};
