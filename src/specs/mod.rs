// src/specs/mod.rs
//! # Source "specs"
//!
//! One module per remote source. Each knows *how its source talks*: which
//! pages to hit in which order, which fields to replay, and where the payload
//! lives in the response. Nothing here decides what to do with the data.
//!
//! ## What lives here
//! - **Protocol steps** over a [`Transport`](crate::core::net::Transport)
//!   session (bootstrap request, then the data-bearing request).
//! - **Payload extraction** into small owned structs (`RawFormResult`,
//!   `OptionChain`).
//!
//! ## What does **not** live here
//! - Schema recovery and value parsing (`schema`, `rank`).
//! - Derived metrics (`analytics`).
//! - Batching, pauses, progress reporting (`collect`).
//!
//! ## Conventions
//! - One session per fetch call. Sessions are never reused across fetches.
//! - No retries. Callers own retry policy.
//! - Opaque session tokens are never logged in full.
pub mod option_chain;
pub mod orcr;
