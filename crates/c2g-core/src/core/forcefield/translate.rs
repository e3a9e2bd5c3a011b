use super::units::{ANGSTROM_TO_NM, DIHEDRAL_FORCE, HARMONIC_ANGLE_FORCE, HARMONIC_LENGTH_FORCE};
use crate::core::charmm::prm::{
    AngleParam, BondParam, CharmmParameters, CmapParam, DihedralParam, ImproperParam,
    NonbondedParam,
};

/// `[ bondtypes ]` row, function type 1.
#[derive(Debug, Clone, PartialEq)]
pub struct BondType {
    pub types: [String; 2],
    /// nm
    pub b0: f64,
    /// kJ/mol/nm²
    pub kb: f64,
}

/// `[ angletypes ]` row, function type 5 (harmonic + Urey-Bradley).
#[derive(Debug, Clone, PartialEq)]
pub struct AngleType {
    pub types: [String; 3],
    /// degrees
    pub theta0: f64,
    /// kJ/mol/rad²
    pub ktheta: f64,
    /// nm
    pub ub0: f64,
    /// kJ/mol/nm²
    pub kub: f64,
}

/// `[ dihedraltypes ]` row, function type 9 (multiple periodic).
#[derive(Debug, Clone, PartialEq)]
pub struct DihedralType {
    pub types: [String; 4],
    pub phi0: f64,
    pub kphi: f64,
    pub multiplicity: i32,
}

/// Improper `[ dihedraltypes ]` row, function type 2 (harmonic).
#[derive(Debug, Clone, PartialEq)]
pub struct ImproperType {
    pub types: [String; 4],
    pub phi0: f64,
    pub kphi: f64,
}

/// Lennard-Jones parameters kept in CHARMM units with the well depth made positive.
#[derive(Debug, Clone, PartialEq)]
pub struct NonbondedType {
    pub atom_type: String,
    /// kcal/mol, positive
    pub epsilon: f64,
    /// Å
    pub rmin_half: f64,
}

/// CHARMM parameters converted to GROMACS units, one table per record kind.
///
/// Every table preserves the declaration order of the source block. CMAP
/// grids and nonbonded rows are carried through without unit changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GromacsParameters {
    pub bondtypes: Vec<BondType>,
    pub angletypes: Vec<AngleType>,
    pub dihedraltypes: Vec<DihedralType>,
    pub impropertypes: Vec<ImproperType>,
    pub nonbonded: Vec<NonbondedType>,
    pub nonbonded14: Vec<NonbondedType>,
    pub cmaps: Vec<CmapParam>,
}

impl GromacsParameters {
    pub fn from_charmm(params: &CharmmParameters) -> Self {
        Self {
            bondtypes: params.bonds.iter().map(translate_bond).collect(),
            angletypes: params.angles.iter().map(translate_angle).collect(),
            dihedraltypes: params.dihedrals.iter().map(translate_dihedral).collect(),
            impropertypes: params.impropers.iter().map(translate_improper).collect(),
            nonbonded: params.nonbonded.iter().map(translate_nonbonded).collect(),
            nonbonded14: params.nonbonded14.iter().map(translate_nonbonded).collect(),
            cmaps: params.cmaps.clone(),
        }
    }

    /// Number of translated records across all tables.
    pub fn record_count(&self) -> usize {
        self.bondtypes.len()
            + self.angletypes.len()
            + self.dihedraltypes.len()
            + self.impropertypes.len()
            + self.nonbonded.len()
            + self.nonbonded14.len()
            + self.cmaps.len()
    }
}

fn translate_bond(p: &BondParam) -> BondType {
    BondType {
        types: p.types.clone(),
        b0: p.b0 * ANGSTROM_TO_NM,
        kb: p.kb * HARMONIC_LENGTH_FORCE,
    }
}

fn translate_angle(p: &AngleParam) -> AngleType {
    let (kub, s0) = p.urey_bradley.map_or((0.0, 0.0), |ub| (ub.kub, ub.s0));
    AngleType {
        types: p.types.clone(),
        theta0: p.theta0,
        ktheta: p.ktheta * HARMONIC_ANGLE_FORCE,
        ub0: s0 * ANGSTROM_TO_NM,
        kub: kub * HARMONIC_LENGTH_FORCE,
    }
}

fn translate_dihedral(p: &DihedralParam) -> DihedralType {
    DihedralType {
        types: p.types.clone(),
        phi0: p.delta,
        kphi: p.kchi * DIHEDRAL_FORCE,
        multiplicity: p.multiplicity,
    }
}

fn translate_improper(p: &ImproperParam) -> ImproperType {
    ImproperType {
        types: p.types.clone(),
        phi0: p.psi0,
        kphi: p.kpsi * HARMONIC_ANGLE_FORCE,
    }
}

fn translate_nonbonded(p: &NonbondedParam) -> NonbondedType {
    NonbondedType {
        atom_type: p.atom_type.clone(),
        epsilon: -p.epsilon,
        rmin_half: p.rmin_half,
    }
}
