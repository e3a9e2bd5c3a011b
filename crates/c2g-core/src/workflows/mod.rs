//! # Workflows Module
//!
//! High-level entry points that tie the [`core`](crate::core) parsers, generators and
//! writers to an [`engine`](crate::engine) configuration.
//!
//! - [`convert::prepare`] parses one residue and renders every output file in memory.
//! - [`convert::run`] does the same and then writes the files to the output directory.

pub mod convert;
