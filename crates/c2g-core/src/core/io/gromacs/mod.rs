//! GROMACS text formats: the molecule include (`.itp`), its parameter
//! tables (`.prm`), the system topology (`.top`) and the readers for an
//! existing force-field directory.

pub mod forcefield;
pub mod itp;
pub mod prm;
pub mod top;
