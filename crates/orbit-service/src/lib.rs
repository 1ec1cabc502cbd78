//! HTTP service for the Orbit intent router.
//!
//! Accepts a free-text trading instruction and a wallet address, and answers
//! with a ready-to-sign cross-chain swap payload.
//!
//! # Components
//!
//! - `api`: axum routes (`POST /solve_intent`, `GET /`, `GET /health`)
//! - `cli`: command-line interface
//! - `service`: the parse-then-route pipeline and its error mapping

pub mod api;
pub mod cli;
pub mod service;

pub use service::{OrbitService, ServiceError};
