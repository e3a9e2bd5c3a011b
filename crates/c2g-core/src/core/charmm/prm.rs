use super::error::{ParseError, RecordErrorKind};
use super::record::{Section, SourceLine};
use super::rtf::{MassRecord, parse_mass};
use tracing::{debug, trace};

/// `BONDS`: `i j Kb b0` with `Kb` in kcal/mol/Å² and `b0` in Å.
#[derive(Debug, Clone, PartialEq)]
pub struct BondParam {
    pub types: [String; 2],
    pub kb: f64,
    pub b0: f64,
}

/// Urey-Bradley 1-3 term attached to an angle record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UreyBradley {
    pub kub: f64,
    pub s0: f64,
}

/// `ANGLES`: `i j k Ktheta theta0 [Kub S0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleParam {
    pub types: [String; 3],
    pub ktheta: f64,
    pub theta0: f64,
    pub urey_bradley: Option<UreyBradley>,
}

/// `DIHEDRALS`: `i j k l Kchi n delta`.
#[derive(Debug, Clone, PartialEq)]
pub struct DihedralParam {
    pub types: [String; 4],
    pub kchi: f64,
    pub multiplicity: i32,
    pub delta: f64,
}

/// `IMPROPERS`: `i j k l Kpsi n psi0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImproperParam {
    pub types: [String; 4],
    pub kpsi: f64,
    pub multiplicity: i32,
    pub psi0: f64,
}

/// `CMAP`: eight type labels, the grid dimension and `size * size` values.
#[derive(Debug, Clone, PartialEq)]
pub struct CmapParam {
    pub types: [String; 8],
    pub size: usize,
    pub grid: Vec<f64>,
}

/// `NONBONDED`: `type ignored epsilon Rmin/2 [ignored epsilon14 Rmin14/2]`, values as written.
#[derive(Debug, Clone, PartialEq)]
pub struct NonbondedParam {
    pub atom_type: String,
    pub epsilon: f64,
    pub rmin_half: f64,
}

/// The records of a CHARMM parameter block, grouped by section in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharmmParameters {
    pub masses: Vec<MassRecord>,
    pub bonds: Vec<BondParam>,
    pub angles: Vec<AngleParam>,
    pub dihedrals: Vec<DihedralParam>,
    pub impropers: Vec<ImproperParam>,
    pub cmaps: Vec<CmapParam>,
    pub nonbonded: Vec<NonbondedParam>,
    /// 1-4 overrides taken from the optional trailing `NONBONDED` columns.
    pub nonbonded14: Vec<NonbondedParam>,
}

impl CharmmParameters {
    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
            && self.angles.is_empty()
            && self.dihedrals.is_empty()
            && self.impropers.is_empty()
            && self.cmaps.is_empty()
            && self.nonbonded.is_empty()
    }
}

struct PendingCmap {
    types: [String; 8],
    size: usize,
    grid: Vec<f64>,
}

impl PendingCmap {
    fn expected(&self) -> usize {
        self.size * self.size
    }

    fn key(&self) -> String {
        self.types.join(" ")
    }
}

/// Parses a CHARMM parameter block.
///
/// A line whose first token starts with one of the section keys (`BOND`,
/// `ANGL`, `DIHE`, `IMPR`, `CMAP`, `NONB`, `HBON`, `NBFI`, `ATOM`) switches the
/// active section; every following data line is parsed by that section's
/// grammar. `HBOND` and `NBFIX` data are recognized but not retained.
///
/// # Errors
///
/// - [`RecordErrorKind::UnknownSection`] for data before any section key.
/// - [`RecordErrorKind::FieldCount`] when a record is shorter than its format.
/// - [`RecordErrorKind::CmapOverflow`] / [`ParseError::IncompleteCmap`] when a
///   CMAP grid does not hold exactly `N²` values.
pub fn parse_parameters(lines: &[SourceLine]) -> Result<CharmmParameters, ParseError> {
    let mut params = CharmmParameters::default();
    let mut section: Option<Section> = None;
    let mut pending_cmap: Option<PendingCmap> = None;

    for line in lines.iter().filter(|l| !l.is_ignorable()) {
        let fields = line.fields();
        let Some(&first) = fields.first() else {
            continue;
        };

        if let Some(next) = Section::from_token(first) {
            close_cmap(&mut pending_cmap)?;
            debug!(line = line.number, section = ?next, "Entering parameter section.");
            section = Some(next);
            continue;
        }

        match section {
            None => return Err(line.error(RecordErrorKind::UnknownSection)),
            Some(Section::Atoms) => {
                if first == "MASS" {
                    params.masses.push(parse_mass(line, &fields)?);
                }
            }
            Some(Section::Bonds) => params.bonds.push(parse_bond(line, &fields)?),
            Some(Section::Angles) => params.angles.push(parse_angle(line, &fields)?),
            Some(Section::Dihedrals) => params.dihedrals.push(parse_dihedral(line, &fields)?),
            Some(Section::Impropers) => params.impropers.push(parse_improper(line, &fields)?),
            Some(Section::Cmap) => {
                if let Some(done) = feed_cmap(line, &fields, &mut pending_cmap)? {
                    params.cmaps.push(done);
                }
            }
            Some(Section::Nonbonded) => {
                let lowered = line.text.to_ascii_lowercase();
                if lowered.contains("cutnb") || lowered.contains("wmin") {
                    continue;
                }
                let (regular, one_four) = parse_nonbonded(line, &fields)?;
                params.nonbonded.push(regular);
                if let Some(one_four) = one_four {
                    params.nonbonded14.push(one_four);
                }
            }
            Some(Section::HBond) | Some(Section::NbFix) => {
                trace!(line = line.number, "Skipping HBOND/NBFIX record.");
            }
        }
    }

    close_cmap(&mut pending_cmap)?;
    Ok(params)
}

fn types<const N: usize>(fields: &[&str]) -> [String; N] {
    std::array::from_fn(|i| fields[i].to_string())
}

fn parse_bond(line: &SourceLine, fields: &[&str]) -> Result<BondParam, ParseError> {
    line.require_fields(fields, "BOND", 4, "2 types, Kb and b0")?;
    Ok(BondParam {
        types: types(fields),
        kb: line.parse_number(fields[2], "Kb")?,
        b0: line.parse_number(fields[3], "b0")?,
    })
}

fn parse_angle(line: &SourceLine, fields: &[&str]) -> Result<AngleParam, ParseError> {
    line.require_fields(fields, "ANGLE", 5, "3 types, Ktheta and theta0 [Kub S0]")?;
    let urey_bradley = match fields.len() {
        5 => None,
        6 => {
            return Err(line.error(RecordErrorKind::FieldCount {
                record: "ANGLE",
                expected: "5 or 7",
                found: 6,
            }));
        }
        _ => Some(UreyBradley {
            kub: line.parse_number(fields[5], "Kub")?,
            s0: line.parse_number(fields[6], "S0")?,
        }),
    };
    Ok(AngleParam {
        types: types(fields),
        ktheta: line.parse_number(fields[3], "Ktheta")?,
        theta0: line.parse_number(fields[4], "theta0")?,
        urey_bradley,
    })
}

fn parse_dihedral(line: &SourceLine, fields: &[&str]) -> Result<DihedralParam, ParseError> {
    line.require_fields(fields, "DIHEDRAL", 7, "4 types, Kchi, n and delta")?;
    Ok(DihedralParam {
        types: types(fields),
        kchi: line.parse_number(fields[4], "Kchi")?,
        multiplicity: line.parse_number(fields[5], "multiplicity")?,
        delta: line.parse_number(fields[6], "delta")?,
    })
}

fn parse_improper(line: &SourceLine, fields: &[&str]) -> Result<ImproperParam, ParseError> {
    line.require_fields(fields, "IMPROPER", 7, "4 types, Kpsi, n and psi0")?;
    Ok(ImproperParam {
        types: types(fields),
        kpsi: line.parse_number(fields[4], "Kpsi")?,
        multiplicity: line.parse_number(fields[5], "multiplicity")?,
        psi0: line.parse_number(fields[6], "psi0")?,
    })
}

fn parse_nonbonded(
    line: &SourceLine,
    fields: &[&str],
) -> Result<(NonbondedParam, Option<NonbondedParam>), ParseError> {
    line.require_fields(fields, "NONBONDED", 4, "type, ignored, epsilon and Rmin/2")?;
    let regular = NonbondedParam {
        atom_type: fields[0].to_string(),
        epsilon: line.parse_number(fields[2], "epsilon")?,
        rmin_half: line.parse_number(fields[3], "Rmin/2")?,
    };
    if fields.len() == 4 {
        return Ok((regular, None));
    }
    line.require_fields(fields, "NONBONDED", 7, "4 or 7 (with 1-4 epsilon and Rmin/2)")?;
    let one_four = NonbondedParam {
        atom_type: fields[0].to_string(),
        epsilon: line.parse_number(fields[5], "1-4 epsilon")?,
        rmin_half: line.parse_number(fields[6], "1-4 Rmin/2")?,
    };
    Ok((regular, Some(one_four)))
}

fn feed_cmap(
    line: &SourceLine,
    fields: &[&str],
    pending: &mut Option<PendingCmap>,
) -> Result<Option<CmapParam>, ParseError> {
    let Some(current) = pending.as_mut() else {
        line.require_fields(fields, "CMAP", 9, "8 types and the grid size")?;
        let size: usize = line.parse_number(fields[8], "CMAP grid size")?;
        let cmap = PendingCmap {
            types: types(fields),
            size,
            grid: Vec::with_capacity(size * size),
        };
        if cmap.expected() == 0 {
            return Ok(Some(finish_cmap(cmap)));
        }
        *pending = Some(cmap);
        return Ok(None);
    };

    for value in fields {
        current.grid.push(line.parse_number(value, "CMAP grid value")?);
    }
    let expected = current.expected();
    if current.grid.len() > expected {
        return Err(line.error(RecordErrorKind::CmapOverflow {
            expected,
            found: current.grid.len(),
        }));
    }
    if current.grid.len() == expected {
        return Ok(pending.take().map(finish_cmap));
    }
    Ok(None)
}

fn finish_cmap(cmap: PendingCmap) -> CmapParam {
    CmapParam {
        types: cmap.types,
        size: cmap.size,
        grid: cmap.grid,
    }
}

fn close_cmap(pending: &mut Option<PendingCmap>) -> Result<(), ParseError> {
    match pending.take() {
        Some(cmap) => Err(ParseError::IncompleteCmap {
            key: cmap.key(),
            expected: cmap.expected(),
            found: cmap.grid.len(),
        }),
        None => Ok(()),
    }
}
