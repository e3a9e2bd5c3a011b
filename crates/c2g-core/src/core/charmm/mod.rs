//! # CHARMM Input Module
//!
//! Reads CHARMM stream (`.str`) files and parses their residue topology (RTF)
//! and parameter (PRM) blocks into typed records.
//!
//! ## Key Components
//!
//! - [`stream`] - Line-range extraction of residue and parameter blocks
//! - [`record`] - Source lines, comment stripping and directive/section keyword tables
//! - [`rtf`] - `RESI` block and `MASS` header parser
//! - [`prm`] - Parameter section parser (`BONDS`, `ANGLES`, `DIHEDRALS`, `IMPROPERS`, `CMAP`, `NONBONDED`)
//! - [`error`] - Parse errors carrying the offending line and the expected structure

pub mod error;
pub mod prm;
pub mod record;
pub mod rtf;
pub mod stream;
