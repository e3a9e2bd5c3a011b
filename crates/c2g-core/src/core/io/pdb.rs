use crate::core::io::traits::OutputFile;
use crate::core::models::atom::AtomRecord;
use nalgebra::Point3;
use std::io::{self, Write};
use thiserror::Error;

/// Widest atom name the `ATOM` record's name field can hold.
pub const MAX_ATOM_NAME_LEN: usize = 4;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Atom name '{name}' is longer than the {max}-character PDB name field")]
    NameLengthViolation { name: String, max: usize },
    #[error("Atom {index} has no coordinates ({available} positions available)")]
    MissingPosition { index: usize, available: usize },
}

/// One atom of a [`PdbResidue`].
#[derive(Debug, Clone, PartialEq)]
pub struct PdbAtom {
    pub name: String,
    pub position: Point3<f64>,
}

/// A residue's atoms paired with their positions, written as one PDB residue.
#[derive(Debug, Clone, PartialEq)]
pub struct PdbResidue {
    pub residue_name: String,
    pub atoms: Vec<PdbAtom>,
}

impl PdbResidue {
    /// Pairs each atom with the position at its index.
    ///
    /// # Errors
    ///
    /// Returns [`PdbError::MissingPosition`] if `positions` is shorter than the atom list.
    pub fn new(
        residue_name: &str,
        atoms: &[AtomRecord],
        positions: &[Point3<f64>],
    ) -> Result<Self, PdbError> {
        let atoms = atoms
            .iter()
            .map(|atom| {
                let position = positions.get(atom.index).ok_or(PdbError::MissingPosition {
                    index: atom.index,
                    available: positions.len(),
                })?;
                Ok(PdbAtom {
                    name: atom.name.clone(),
                    position: *position,
                })
            })
            .collect::<Result<_, PdbError>>()?;
        Ok(Self {
            residue_name: residue_name.to_string(),
            atoms,
        })
    }
}

/// Initial-structure PDB: `ATOM` records with residue id 1, then `END`.
pub struct PdbFile;

impl OutputFile for PdbFile {
    type Input = PdbResidue;
    type Error = PdbError;

    fn write_to(residue: &PdbResidue, writer: &mut impl Write) -> Result<(), PdbError> {
        for (idx, atom) in residue.atoms.iter().enumerate() {
            if atom.name.len() > MAX_ATOM_NAME_LEN {
                return Err(PdbError::NameLengthViolation {
                    name: atom.name.clone(),
                    max: MAX_ATOM_NAME_LEN,
                });
            }
            // Four-character names start one column earlier.
            let name_field = if atom.name.len() == MAX_ATOM_NAME_LEN {
                format!(" {:<4.4} ", atom.name)
            } else {
                format!("  {:<4.4}", atom.name)
            };
            writeln!(
                writer,
                "ATOM  {:5}{}{:<4.4} {:>4}    {:8.3}{:8.3}{:8.3}{:6.2}{:6.2}",
                idx + 1,
                name_field,
                residue.residue_name,
                "1",
                atom.position.x,
                atom.position.y,
                atom.position.z,
                1.0,
                0.0
            )?;
        }
        writeln!(writer, "END")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms(names: &[&str]) -> Vec<AtomRecord> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| AtomRecord::new(i, name, "CG331", 0.0, "LIG"))
            .collect()
    }

    #[test]
    fn name_columns_depend_on_name_length() {
        let atoms = atoms(&["C1", "H11A"]);
        let positions = [Point3::new(1.0, -2.5, 0.125), Point3::new(10.0, 20.0, 30.0)];
        let residue = PdbResidue::new("LIG", &atoms, &positions).unwrap();
        let text = String::from_utf8(PdbFile::render(&residue).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "ATOM      1  C1  LIG     1       1.000  -2.500   0.125  1.00  0.00"
        );
        assert_eq!(
            lines[1],
            "ATOM      2 H11A LIG     1      10.000  20.000  30.000  1.00  0.00"
        );
        assert_eq!(lines[2], "END");
    }

    #[test]
    fn long_atom_name_is_rejected() {
        let atoms = atoms(&["C12345"]);
        let positions = [Point3::origin()];
        let residue = PdbResidue::new("LIG", &atoms, &positions).unwrap();
        let err = PdbFile::render(&residue).unwrap_err();
        assert!(matches!(
            err,
            PdbError::NameLengthViolation { ref name, max: 4 } if name == "C12345"
        ));
    }

    #[test]
    fn missing_position_is_rejected() {
        let atoms = atoms(&["C1", "C2"]);
        let positions = [Point3::origin()];
        assert!(matches!(
            PdbResidue::new("LIG", &atoms, &positions),
            Err(PdbError::MissingPosition {
                index: 1,
                available: 1
            })
        ));
    }
}
