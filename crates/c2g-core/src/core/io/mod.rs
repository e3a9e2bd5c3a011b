//! Provides input/output functionality for the file formats around a conversion.
//!
//! Readers cover the structure file (Tripos mol2) and the target GROMACS
//! force-field directory; writers cover the GROMACS molecule, parameter and
//! system topology files plus an initial-structure PDB. All formats share the
//! trait-based interface in [`traits`].

pub mod gromacs;
pub mod mol2;
pub mod pdb;
pub mod traits;
