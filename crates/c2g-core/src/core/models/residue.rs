use super::atom::AtomRecord;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single = 1,
    Double = 2,
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Single => "Single",
                Self::Double => "Double",
            }
        )
    }
}

/// A bond between two atoms, still referenced by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BondRecord {
    /// Name of the first atom.
    pub atom1: String,
    /// Name of the second atom.
    pub atom2: String,
    /// `BOND` gives [`BondOrder::Single`], `DOUB` gives [`BondOrder::Double`].
    pub order: BondOrder,
}

impl BondRecord {
    pub fn new(atom1: &str, atom2: &str, order: BondOrder) -> Self {
        Self {
            atom1: atom1.to_string(),
            atom2: atom2.to_string(),
            order,
        }
    }
}

/// An improper dihedral as declared by an `IMPR` record; the order is kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImproperRecord {
    pub atoms: [String; 4],
}

/// A residue-level `CMAP` declaration naming the eight atoms of two consecutive dihedrals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CmapRecord {
    pub atoms: [String; 8],
}

/// Everything a `RESI` block declares about one residue.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResidueTopology {
    pub name: String,
    /// Net charge from the `RESI` line.
    pub charge: f64,
    pub atoms: Vec<AtomRecord>,
    pub bonds: Vec<BondRecord>,
    pub impropers: Vec<ImproperRecord>,
    pub cmaps: Vec<CmapRecord>,
    pub donors: Vec<Vec<String>>,
    pub acceptors: Vec<Vec<String>>,
    /// Number of `GROUP` records seen.
    pub group_count: usize,
}

impl ResidueTopology {
    pub fn new(name: &str, charge: f64) -> Self {
        Self {
            name: name.to_string(),
            charge,
            ..Default::default()
        }
    }

    /// Sum of the declared atomic partial charges.
    pub fn total_atom_charge(&self) -> f64 {
        self.atoms.iter().map(|a| a.charge).sum()
    }
}
