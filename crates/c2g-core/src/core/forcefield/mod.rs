//! # Force Field Module
//!
//! Converts parsed CHARMM parameters into GROMACS conventions and holds the
//! lookup tables the topology derivation consults.
//!
//! ## Key Components
//!
//! - [`units`] - Energy, length and force-constant conversion factors
//! - [`translate`] - Per-kind translation of bonded and nonbonded records ([`translate::GromacsParameters`])
//! - [`angle_types`] - Wildcard-aware angle-type table used by the linearity filter
//! - [`masses`] - Atom type → mass table with first-source-wins precedence

pub mod angle_types;
pub mod masses;
pub mod translate;
pub mod units;
