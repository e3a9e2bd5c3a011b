use crate::core::io::traits::InputFile;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Mol2Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse mol2 data on line {line}: {details}")]
    Parse { line: usize, details: String },
    #[error("Missing required mol2 section: {0}")]
    MissingSection(&'static str),
}

impl Mol2Error {
    fn parse(line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            line,
            details: details.into(),
        }
    }
}

/// Coordinates of a Tripos mol2 file; atom types and bond records are not read.
#[derive(Debug, Clone, PartialEq)]
pub struct Mol2Structure {
    pub name: String,
    /// Atom count declared on the `MOLECULE` counts line.
    pub atom_count: usize,
    /// Bond count declared on the `MOLECULE` counts line.
    pub bond_count: usize,
    /// Positions in Å, indexed by atom id - 1.
    pub positions: Vec<Point3<f64>>,
}

#[derive(Clone, Copy, PartialEq)]
enum Mol2Section {
    None,
    MoleculeName,
    Counts,
    Atom,
}

pub struct Mol2File;

impl InputFile for Mol2File {
    type Output = Mol2Structure;
    type Error = Mol2Error;

    fn read_from(reader: &mut impl BufRead) -> Result<Mol2Structure, Mol2Error> {
        let mut section = Mol2Section::None;
        let mut name = None;
        let mut counts = None;
        let mut positions: Vec<Option<Point3<f64>>> = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let trimmed = line.trim();

            if let Some(tag) = trimmed.strip_prefix("@<TRIPOS>") {
                section = match tag {
                    "MOLECULE" => Mol2Section::MoleculeName,
                    "ATOM" => Mol2Section::Atom,
                    _ => Mol2Section::None,
                };
                continue;
            }
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            match section {
                Mol2Section::None => {}
                Mol2Section::MoleculeName => {
                    name = Some(trimmed.to_string());
                    section = Mol2Section::Counts;
                }
                Mol2Section::Counts => {
                    let (atoms, bonds) = parse_counts(trimmed, line_no)?;
                    counts = Some((atoms, bonds));
                    positions = vec![None; atoms];
                    section = Mol2Section::None;
                }
                Mol2Section::Atom => {
                    let (id, position) = parse_atom(trimmed, line_no)?;
                    let position_count = positions.len();
                    let slot = id
                        .checked_sub(1)
                        .and_then(|i| positions.get_mut(i))
                        .ok_or_else(|| {
                            Mol2Error::parse(
                                line_no,
                                format!("atom id {id} is outside 1..={}", position_count),
                            )
                        })?;
                    *slot = Some(position);
                }
            }
        }

        let name = name.ok_or(Mol2Error::MissingSection("@<TRIPOS>MOLECULE"))?;
        let (atom_count, bond_count) = counts.ok_or(Mol2Error::MissingSection("MOLECULE counts line"))?;
        let positions = positions
            .into_iter()
            .enumerate()
            .map(|(i, p)| p.ok_or(i + 1))
            .collect::<Result<Vec<_>, usize>>()
            .map_err(|id| Mol2Error::parse(0, format!("no ATOM record for atom id {id}")))?;

        Ok(Mol2Structure {
            name,
            atom_count,
            bond_count,
            positions,
        })
    }
}

fn parse_counts(line: &str, line_no: usize) -> Result<(usize, usize), Mol2Error> {
    let parts: Vec<_> = line.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(Mol2Error::parse(
            line_no,
            "counts line must have at least atom and bond counts",
        ));
    }
    let atoms = parts[0]
        .parse()
        .map_err(|_| Mol2Error::parse(line_no, "invalid atom count in counts line"))?;
    let bonds = parts[1]
        .parse()
        .map_err(|_| Mol2Error::parse(line_no, "invalid bond count in counts line"))?;
    Ok((atoms, bonds))
}

fn parse_atom(line: &str, line_no: usize) -> Result<(usize, Point3<f64>), Mol2Error> {
    let parts: Vec<_> = line.split_whitespace().collect();
    if parts.len() < 5 {
        return Err(Mol2Error::parse(line_no, "invalid ATOM line"));
    }
    let id = parts[0]
        .parse()
        .map_err(|_| Mol2Error::parse(line_no, "invalid atom id in ATOM line"))?;
    let coord = |i: usize, axis: &str| {
        parts[i]
            .parse::<f64>()
            .map_err(|_| Mol2Error::parse(line_no, format!("invalid {axis} coordinate in ATOM line")))
    };
    Ok((id, Point3::new(coord(2, "x")?, coord(3, "y")?, coord(4, "z")?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ETHANOL: &str = "\
@<TRIPOS>MOLECULE
ETOH
 3 2 0 0 0
SMALL
USER_CHARGES

@<TRIPOS>ATOM
      1 C1          0.0000    0.0000    0.0000 C.3       1 ETOH       -0.2700
      2 C2          1.5200    0.0000    0.0000 C.3       1 ETOH        0.0500
      3 O1          2.0500    1.3400   -0.1000 O.3       1 ETOH       -0.6500
@<TRIPOS>BOND
     1     1     2    1
     2     2     3    1
";

    #[test]
    fn reads_counts_and_positions() {
        let mol = Mol2File::read_from(&mut Cursor::new(ETHANOL)).unwrap();
        assert_eq!(mol.name, "ETOH");
        assert_eq!(mol.atom_count, 3);
        assert_eq!(mol.bond_count, 2);
        assert_eq!(mol.positions.len(), 3);
        assert_eq!(mol.positions[2], Point3::new(2.05, 1.34, -0.1));
    }

    #[test]
    fn out_of_range_atom_id_is_rejected() {
        let text = ETHANOL.replace("      3 O1", "      4 O1");
        let err = Mol2File::read_from(&mut Cursor::new(text)).unwrap_err();
        assert!(matches!(err, Mol2Error::Parse { line: 10, .. }));
    }

    #[test]
    fn missing_atom_record_is_reported() {
        let text = ETHANOL.replace(" 3 2 0 0 0", " 4 2 0 0 0");
        let err = Mol2File::read_from(&mut Cursor::new(text)).unwrap_err();
        assert!(err.to_string().contains("atom id 4"));
    }

    #[test]
    fn invalid_coordinate_is_rejected() {
        let text = ETHANOL.replace("1.5200", "1.5x00");
        let err = Mol2File::read_from(&mut Cursor::new(text)).unwrap_err();
        assert!(err.to_string().contains("invalid x coordinate"));
    }

    #[test]
    fn missing_molecule_section_is_reported() {
        let err = Mol2File::read_from(&mut Cursor::new("@<TRIPOS>ATOM\n")).unwrap_err();
        assert!(matches!(err, Mol2Error::MissingSection("@<TRIPOS>MOLECULE")));
    }
}
