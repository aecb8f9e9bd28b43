//! Priority scoring and recommendation engine for pending government
//! service obligations.
//!
//! The engine is pure and synchronous: callers hand it a citizen profile,
//! a list of service records, and the evaluation date, and receive a fully
//! ranked recommendation payload in return. The HTTP transport in
//! `services/api` is a thin wrapper around [`engine::Recommender`].

pub mod config;
pub mod engine;
pub mod error;
pub mod intake;
pub mod telemetry;
