//! # charmm2gmx Core Library
//!
//! Translates a CHARMM/CGenFF residue topology and its parameter stream into
//! GROMACS molecule, parameter and system topology files.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that parsing, derivation and
//! orchestration can be tested in isolation.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MoleculeGraph`,
//!   `ResidueTopology`), the CHARMM record parsers, the unit translation of
//!   bonded parameters, the derivation of angles, dihedrals and 1-4 pairs, and
//!   the readers and writers of every file format involved.
//!
//! - **[`engine`]: Run Plumbing.** Configuration with its builder, the
//!   aggregated `EngineError`, and the optional progress callback used by
//!   front ends.
//!
//! - **[`workflows`]: The Public API.** `convert::prepare` and `convert::run`
//!   execute a complete conversion for one residue. Every output is rendered
//!   in memory before anything is written, so a failed run leaves no partial files.

pub mod core;
pub mod engine;
pub mod workflows;
