//! Residue-level data model.
//!
//! - [`atom`] - Atoms declared by a residue, with type, charge and resolved mass
//! - [`residue`] - Name-level residue topology (bonds, impropers, CMAP, donors/acceptors)
//! - [`graph`] - Index-level connectivity graph built from the residue topology

pub mod atom;
pub mod graph;
pub mod residue;
