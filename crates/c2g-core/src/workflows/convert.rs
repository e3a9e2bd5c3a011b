use crate::core::charmm::prm::{CharmmParameters, parse_parameters};
use crate::core::charmm::rtf::{parse_header, parse_residue};
use crate::core::charmm::stream::StreamFile;
use crate::core::forcefield::angle_types::{AngleTypeParameter, AngleTypeTable};
use crate::core::forcefield::masses::MassTable;
use crate::core::forcefield::translate::GromacsParameters;
use crate::core::io::gromacs::forcefield::ForcefieldDir;
use crate::core::io::gromacs::itp::ItpFile;
use crate::core::io::gromacs::prm::PrmFile;
use crate::core::io::gromacs::top::{SystemTopology, TopFile};
use crate::core::io::mol2::Mol2File;
use crate::core::io::pdb::{PdbFile, PdbResidue};
use crate::core::io::traits::{InputFile, OutputFile};
use crate::core::models::residue::ResidueTopology;
use crate::core::topology::generator::TopologyGenerator;
use crate::core::topology::molecule::MoleculeTopology;
use crate::engine::config::ConversionConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter, Stage};
use nalgebra::Point3;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

const CHARGE_TOLERANCE: f64 = 1e-3;

/// Counts describing what a conversion produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionSummary {
    pub residue_name: String,
    pub atoms: usize,
    /// Distinct bonded atom pairs.
    pub bonds: usize,
    /// `BOND`/`DOUB` pairs as declared, duplicates included.
    pub declared_bonds: usize,
    pub pairs: usize,
    pub angles: usize,
    pub dihedrals_generated: usize,
    pub dihedrals_retained: usize,
    pub impropers: usize,
    pub parameter_records: usize,
    pub nonbonded_records: usize,
    pub cmap_records: usize,
    /// Atom types with no mass in any table; written with mass 0.0.
    pub unresolved_mass_types: Vec<String>,
    pub stream_cgenff_version: Option<String>,
    pub forcefield_cgenff_version: Option<String>,
}

/// An output file rendered in memory, not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub molecule: MoleculeTopology,
    pub parameters: GromacsParameters,
    pub files: Vec<RenderedFile>,
    pub summary: ConversionSummary,
}

impl ConversionResult {
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|file| file.path.as_path())
    }
}

/// Parses, derives and renders every output of a conversion without touching the output directory.
#[instrument(skip_all, name = "conversion_workflow", fields(residue = %config.residue_name))]
pub fn prepare(
    config: &ConversionConfig,
    reporter: &ProgressReporter,
) -> Result<ConversionResult, EngineError> {
    // === Phase 1: Read the stream ===
    let (stream, mut residue, charmm_params) =
        reporter.stage(Stage::ReadStream, || read_stream(config))?;

    // === Phase 2: Force field tables ===
    reporter.report(Progress::StageStarted(Stage::LoadForceField));
    let forcefield = ForcefieldDir::new(&config.forcefield_dir);
    let mut masses = forcefield.load_masses()?;
    let header = parse_header(&stream.topology_lines())?;
    let from_stream = masses.fill_from(
        header
            .masses
            .iter()
            .chain(&charmm_params.masses)
            .map(|m| (m.atom_type.as_str(), m.mass)),
    );
    debug!(
        atp_types = masses.len() - from_stream,
        stream_types = from_stream,
        "Resolved mass table."
    );
    let forcefield_angle_types = forcefield.load_angle_types()?;
    let forcefield_version = forcefield.cgenff_version()?;
    let stream_version = stream.cgenff_version().map(str::to_string);
    check_versions(stream_version.as_deref(), forcefield_version.as_deref());
    reporter.report(Progress::StageFinished(Stage::LoadForceField));

    // === Phase 3: Topology and parameters ===
    reporter.report(Progress::StageStarted(Stage::DeriveTopology));
    let unresolved = assign_masses(&masses, &mut residue);
    check_charge(&residue);

    let parameters = GromacsParameters::from_charmm(&charmm_params);
    let mut angle_types = AngleTypeTable::new(config.topology.angle_wildcard.clone());
    angle_types.extend(forcefield_angle_types);
    angle_types.extend(parameters.angletypes.iter().map(AngleTypeParameter::from));

    let generator = TopologyGenerator::new(&angle_types)
        .with_linear_cutoff(config.topology.linear_angle_cutoff);
    let molecule = MoleculeTopology::from_residue(&residue, &generator)?
        .with_nrexcl(config.topology.nrexcl);
    let dropped = molecule.derived.dropped_dihedral_count();
    if dropped > 0 {
        info!(
            dropped,
            cutoff = config.topology.linear_angle_cutoff,
            "Removed dihedrals spanning linear angles."
        );
    }
    reporter.report(Progress::StageFinished(Stage::DeriveTopology));

    // === Phase 4: Coordinates ===
    let positions = match &config.structure_path {
        Some(path) => Some(reporter.stage(Stage::ReadStructure, || {
            read_positions(path, &molecule)
        })?),
        None => None,
    };

    // === Phase 5: Render ===
    let files = reporter.stage(Stage::Render, || {
        render_outputs(config, &molecule, &parameters, positions.as_deref())
    })?;

    let summary = ConversionSummary {
        residue_name: molecule.name.clone(),
        atoms: molecule.graph.atom_count(),
        bonds: molecule.graph.edge_count(),
        declared_bonds: molecule.graph.declared_bond_count(),
        pairs: molecule.derived.pairs.len(),
        angles: molecule.derived.angles.len(),
        dihedrals_generated: molecule.derived.dihedrals.len(),
        dihedrals_retained: molecule.derived.proper_dihedrals.len(),
        impropers: molecule.derived.impropers.len(),
        parameter_records: parameters.record_count(),
        nonbonded_records: parameters.nonbonded.len() + parameters.nonbonded14.len(),
        cmap_records: parameters.cmaps.len(),
        unresolved_mass_types: unresolved,
        stream_cgenff_version: stream_version,
        forcefield_cgenff_version: forcefield_version,
    };
    info!(
        atoms = summary.atoms,
        bonds = summary.bonds,
        angles = summary.angles,
        dihedrals = summary.dihedrals_retained,
        "Conversion prepared."
    );

    Ok(ConversionResult {
        molecule,
        parameters,
        files,
        summary,
    })
}

/// Runs [`prepare`] and writes every rendered file into the output directory.
pub fn run(
    config: &ConversionConfig,
    reporter: &ProgressReporter,
) -> Result<ConversionResult, EngineError> {
    let result = prepare(config, reporter)?;

    reporter.stage(Stage::WriteOutputs, || {
        let dir = &config.output.directory;
        fs::create_dir_all(dir).map_err(|e| EngineError::io(dir, e))?;
        for file in &result.files {
            fs::write(&file.path, &file.contents).map_err(|e| EngineError::io(&file.path, e))?;
            reporter.report(Progress::FileWritten(file.path.clone()));
            info!(path = %file.path.display(), bytes = file.contents.len(), "Wrote output file.");
        }
        Ok::<_, EngineError>(())
    })?;

    Ok(result)
}

fn read_stream(
    config: &ConversionConfig,
) -> Result<(StreamFile, ResidueTopology, CharmmParameters), EngineError> {
    let stream = StreamFile::read_from_path(&config.stream_path)
        .map_err(|e| EngineError::io(&config.stream_path, e))?;
    let residue = parse_residue(stream.residue_lines(&config.residue_name)?)?;
    let params = parse_parameters(&stream.parameter_lines())?;
    debug!(
        atoms = residue.atoms.len(),
        bonds = residue.bonds.len(),
        parameter_sections_empty = params.is_empty(),
        "Parsed stream file."
    );
    Ok((stream, residue, params))
}

fn assign_masses(masses: &MassTable, residue: &mut ResidueTopology) -> Vec<String> {
    let unresolved = masses.assign(&mut residue.atoms);
    for atom_type in &unresolved {
        warn!(atom_type = %atom_type, "No mass found for atom type; writing 0.0.");
    }
    unresolved
}

fn check_charge(residue: &ResidueTopology) {
    let total = residue.total_atom_charge();
    if (total - residue.charge).abs() > CHARGE_TOLERANCE {
        warn!(
            declared = residue.charge,
            atom_sum = total,
            "Atomic charges do not sum to the residue charge."
        );
    }
}

fn check_versions(stream: Option<&str>, forcefield: Option<&str>) {
    match (stream, forcefield) {
        (Some(s), Some(f)) if s != f => {
            warn!(
                stream = s,
                forcefield = f,
                "CGenFF version of the stream differs from the force field."
            );
        }
        (Some(s), Some(_)) => info!(version = s, "CGenFF versions match."),
        _ => debug!("CGenFF version check skipped."),
    }
}

fn read_positions(
    path: &Path,
    molecule: &MoleculeTopology,
) -> Result<Vec<Point3<f64>>, EngineError> {
    let structure = Mol2File::read_from_path(path).map_err(|source| EngineError::Structure {
        path: path.to_path_buf(),
        source,
    })?;
    if structure.atom_count != molecule.graph.atom_count() {
        return Err(EngineError::CoordinateMismatch {
            what: "atoms",
            expected: molecule.graph.atom_count(),
            found: structure.atom_count,
        });
    }
    if structure.bond_count != molecule.graph.declared_bond_count() {
        return Err(EngineError::CoordinateMismatch {
            what: "bonds",
            expected: molecule.graph.declared_bond_count(),
            found: structure.bond_count,
        });
    }
    if structure.name != molecule.name {
        debug!(mol2 = %structure.name, residue = %molecule.name, "Structure name differs from residue name.");
    }
    Ok(structure.positions)
}

fn render_outputs(
    config: &ConversionConfig,
    molecule: &MoleculeTopology,
    parameters: &GromacsParameters,
    positions: Option<&[Point3<f64>]>,
) -> Result<Vec<RenderedFile>, EngineError> {
    let stem = config.file_stem();
    let dir = &config.output.directory;
    let itp_name = format!("{stem}.itp");
    let prm_name = format!("{stem}.prm");
    let top_name = format!("{stem}.top");

    let mut files = Vec::with_capacity(4);

    let itp_path = dir.join(&itp_name);
    let contents = ItpFile::render(molecule).map_err(|e| EngineError::io(&itp_path, e))?;
    files.push(RenderedFile {
        path: itp_path,
        contents,
    });

    let prm_path = dir.join(&prm_name);
    let contents = PrmFile::render(parameters).map_err(|e| EngineError::io(&prm_path, e))?;
    files.push(RenderedFile {
        path: prm_path,
        contents,
    });

    let system = SystemTopology {
        forcefield_dir: forcefield_include_dir(&config.forcefield_dir),
        prm_file: prm_name,
        itp_file: itp_name,
        molecule_name: molecule.name.clone(),
        water_model: config.output.water_model.clone(),
        include_ions: config.output.include_ions,
    };
    let top_path = dir.join(top_name);
    let contents = TopFile::render(&system).map_err(|e| EngineError::io(&top_path, e))?;
    files.push(RenderedFile {
        path: top_path,
        contents,
    });

    if let Some(positions) = positions {
        let residue = PdbResidue::new(&molecule.name, molecule.graph.atoms(), positions)?;
        files.push(RenderedFile {
            path: dir.join(format!("{stem}_ini.pdb")),
            contents: PdbFile::render(&residue)?,
        });
    }

    Ok(files)
}

fn forcefield_include_dir(path: &Path) -> String {
    let text = path.display().to_string();
    match text.trim_end_matches('/') {
        "" => text,
        trimmed => trimmed.to_string(),
    }
}
