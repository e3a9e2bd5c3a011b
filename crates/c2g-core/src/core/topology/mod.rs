//! # Topology Derivation Module
//!
//! Derives the bonded terms CHARMM leaves implicit from a residue's
//! connectivity graph.
//!
//! ## Overview
//!
//! - **Angles**: every unordered neighbor pair of every atom.
//! - **Proper dihedrals**: every outer-neighbor pair of every bond, with
//!   three-membered ring closures removed, then filtered so no dihedral spans
//!   a bond angle whose equilibrium value is effectively 180°.
//! - **1-4 pairs**: dihedral end atoms whose shortest path is exactly three
//!   bonds.
//! - **Impropers**: carried through from the residue declaration unchanged.
//!
//! ## Key Components
//!
//! - [`terms`] - Index-level term types and [`terms::DerivedTerm`]
//! - [`generator`] - [`generator::TopologyGenerator`] and the individual derivation steps
//! - [`molecule`] - [`molecule::MoleculeTopology`], the graph plus its derived terms

pub mod generator;
pub mod molecule;
pub mod terms;
