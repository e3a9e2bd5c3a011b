//! # Core Module
//!
//! Stateless building blocks of the CHARMM → GROMACS conversion.
//!
//! ## Architecture
//!
//! - **CHARMM Input** ([`charmm`]) - Stream file access and RTF/PRM record parsing
//! - **Molecular Representation** ([`models`]) - Atoms, residue topology and the connectivity graph
//! - **Topology Derivation** ([`topology`]) - Angles, dihedrals, 1-4 pairs and the linearity filter
//! - **Parameter Translation** ([`forcefield`]) - Unit conversion, angle-type and mass tables
//! - **File I/O** ([`io`]) - GROMACS writers, force-field directory, mol2 and PDB adapters

pub mod charmm;
pub mod forcefield;
pub mod io;
pub mod models;
pub mod topology;
