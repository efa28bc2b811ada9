// src/lib.rs
//! Acquisition and normalization for two unfriendly sources:
//! an ASP.NET admissions cutoff form and an index option chain API.
//!
//! ```text
//! specs::orcr ─► core::html ─► schema ─► rank ─► admissions
//! specs::option_chain ─────────────────────────► analytics
//! query (independent)
//! ```
//! `collect` wires the pipelines together.

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod admissions;
pub mod analytics;
pub mod collect;
pub mod progress;
pub mod query;
pub mod rank;
pub mod schema;

pub use error::{ErrorKind, Result, SourceError};
