//! # Engine Module
//!
//! Run-level plumbing shared by the conversion workflows: how a run is
//! configured, how it reports its progress, and how its failures are
//! surfaced to callers.
//!
//! - **Configuration** ([`config`]) - Inputs, output location and topology generation knobs
//! - **Progress Monitoring** ([`progress`]) - Typed stage events delivered through an optional callback
//! - **Error Handling** ([`error`]) - [`EngineError`](error::EngineError) aggregating every layer's failures

pub mod config;
pub mod error;
pub mod progress;
