use super::error::{ParseError, RecordErrorKind};
use super::record::{Directive, SourceLine};
use crate::core::models::atom::AtomRecord;
use crate::core::models::residue::{
    BondOrder, BondRecord, CmapRecord, ImproperRecord, ResidueTopology,
};
use tracing::{trace, warn};

/// A `MASS` declaration: `MASS <index> <type> <mass> [element]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MassRecord {
    pub index: i64,
    pub atom_type: String,
    pub mass: f64,
    pub element: Option<String>,
}

/// Declarations that precede the residues of a topology block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopologyHeader {
    pub masses: Vec<MassRecord>,
    pub declarations: Vec<String>,
    pub defaults: Option<String>,
    pub autogenerate: Option<String>,
}

/// Parses the global records (`MASS`, `DECL`, `DEFA`, `AUTO`) of a topology block.
///
/// Scanning stops at the first `RESI` or `PRES` record.
pub fn parse_header(lines: &[SourceLine]) -> Result<TopologyHeader, ParseError> {
    let mut header = TopologyHeader::default();

    for line in lines.iter().filter(|l| !l.is_ignorable()) {
        let fields = line.fields();
        let Some(directive) = fields.first().and_then(|f| Directive::from_token(f)) else {
            continue;
        };
        match directive {
            Directive::Resi | Directive::Pres => break,
            Directive::Mass => header.masses.push(parse_mass(line, &fields)?),
            Directive::Decl => {
                if let Some(decl) = fields.get(1) {
                    header.declarations.push(decl.to_string());
                }
            }
            Directive::Defa => header.defaults = Some(keyword_tail(&fields)),
            Directive::Auto => header.autogenerate = Some(keyword_tail(&fields)),
            _ => {}
        }
    }

    Ok(header)
}

/// Parses `MASS <index> <type> <mass> [element]`.
pub fn parse_mass(line: &SourceLine, fields: &[&str]) -> Result<MassRecord, ParseError> {
    line.require_fields(fields, "MASS", 4, "index, type and mass")?;
    Ok(MassRecord {
        index: line.parse_number(fields[1], "mass index")?,
        atom_type: fields[2].to_string(),
        mass: line.parse_number(fields[3], "mass")?,
        element: fields.get(4).map(|e| e.to_string()),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Residue,
    Patch,
}

/// Parses a residue block as returned by
/// [`StreamFile::residue_lines`](super::stream::StreamFile::residue_lines).
///
/// The block must start with its `RESI` record. Parsing stops at a second
/// `RESI`; records after a `PRES` belong to the patch and are skipped.
/// Directives outside the known keyword set are skipped with a warning.
///
/// # Errors
///
/// Returns [`RecordErrorKind::OutsideResidue`] for a record before the `RESI`
/// line, [`ParseError::MissingResidueRecord`] for a block without one, and
/// [`ParseError::Record`] for wrong field counts, unparsable numbers, or names
/// that do not pack into pairs (`BOND`/`DOUB`) or quadruples (`IMPR`).
pub fn parse_residue(lines: &[SourceLine]) -> Result<ResidueTopology, ParseError> {
    let mut residue: Option<ResidueTopology> = None;
    let mut state = State::Residue;
    let mut group: Option<usize> = None;

    for line in lines.iter().filter(|l| !l.is_ignorable()) {
        let fields = line.fields();
        let Some(&first) = fields.first() else {
            continue;
        };
        let Some(directive) = Directive::from_token(first) else {
            warn!(
                line = line.number,
                record = first,
                "Skipping unsupported residue directive."
            );
            continue;
        };

        match (directive, residue.as_mut()) {
            (Directive::Resi, Some(_)) => break,
            (Directive::Resi, None) => residue = Some(open_residue(line, &fields)?),
            (directive, None) => {
                return Err(line.error(RecordErrorKind::OutsideResidue {
                    directive: directive.keyword(),
                }));
            }
            (Directive::Pres, Some(_)) => state = State::Patch,
            (_, Some(_)) if state == State::Patch => {}
            (Directive::Group, Some(current)) => {
                let next = group.map_or(0, |g| g + 1);
                group = Some(next);
                current.group_count = next + 1;
            }
            (Directive::Atom, Some(current)) => {
                line.require_fields(&fields, "ATOM", 4, "name, type and charge")?;
                let mut atom = AtomRecord::new(
                    current.atoms.len(),
                    fields[1],
                    fields[2],
                    line.parse_number(fields[3], "atom charge")?,
                    &current.name,
                );
                atom.group = group.unwrap_or(0);
                current.atoms.push(atom);
            }
            (Directive::Bond | Directive::Double, Some(current)) => {
                let order = if directive == Directive::Double {
                    BondOrder::Double
                } else {
                    BondOrder::Single
                };
                for pair in packed(line, &fields[1..], directive, 2)? {
                    current.bonds.push(BondRecord::new(pair[0], pair[1], order));
                }
            }
            (Directive::Improper, Some(current)) => {
                for quad in packed(line, &fields[1..], directive, 4)? {
                    current.impropers.push(ImproperRecord {
                        atoms: [quad[0], quad[1], quad[2], quad[3]].map(str::to_string),
                    });
                }
            }
            (Directive::Cmap, Some(current)) => {
                line.require_fields(&fields, "CMAP", 9, "eight atom names")?;
                let mut atoms: [String; 8] = Default::default();
                for (slot, name) in atoms.iter_mut().zip(&fields[1..9]) {
                    *slot = name.to_string();
                }
                current.cmaps.push(CmapRecord { atoms });
            }
            (Directive::Donor, Some(current)) => current
                .donors
                .push(fields[1..].iter().map(|s| s.to_string()).collect()),
            (Directive::Acceptor, Some(current)) => current
                .acceptors
                .push(fields[1..].iter().map(|s| s.to_string()).collect()),
            (
                Directive::Ic | Directive::Mass | Directive::Decl | Directive::Defa | Directive::Auto,
                Some(_),
            ) => {
                trace!(line = line.number, "Ignoring {} record.", directive.keyword());
            }
        }
    }

    residue.ok_or(ParseError::MissingResidueRecord)
}

fn open_residue(line: &SourceLine, fields: &[&str]) -> Result<ResidueTopology, ParseError> {
    line.require_fields(fields, "RESI", 2, "a residue name")?;
    let charge = match fields.get(2) {
        Some(value) => line.parse_number(value, "residue charge")?,
        None => 0.0,
    };
    Ok(ResidueTopology::new(fields[1], charge))
}

fn packed<'a>(
    line: &SourceLine,
    names: &'a [&'a str],
    directive: Directive,
    group: usize,
) -> Result<std::slice::Chunks<'a, &'a str>, ParseError> {
    if names.len() % group != 0 {
        return Err(line.error(RecordErrorKind::UnpackedFields {
            directive: directive.keyword(),
            group,
            found: names.len(),
        }));
    }
    Ok(names.chunks(group))
}

fn keyword_tail(fields: &[&str]) -> String {
    fields[1..].join(" ")
}
