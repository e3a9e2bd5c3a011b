/// A single atom declared by an `ATOM` record of a CHARMM residue.
///
/// Atoms are numbered in declaration order starting at zero; the index is
/// the node id used by [`MoleculeGraph`](super::graph::MoleculeGraph) and
/// every derived term. Output files shift it to 1-based numbering.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Zero-based position in the residue's atom list.
    pub index: usize,
    /// The atom name, unique within the residue (e.g., "C1", "H11").
    pub name: String,
    /// The CHARMM/CGenFF force field type label (e.g., "CG331").
    pub atom_type: String,
    /// The partial charge in elementary charge units.
    pub charge: f64,
    /// The atomic mass in amu, `None` until resolved from a mass table.
    pub mass: Option<f64>,
    /// Name of the residue this atom belongs to.
    pub residue_name: String,
    /// Zero-based index of the `GROUP` block the atom was declared in.
    pub group: usize,
}

impl AtomRecord {
    pub fn new(index: usize, name: &str, atom_type: &str, charge: f64, residue_name: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
            atom_type: atom_type.to_string(),
            charge,
            mass: None,
            residue_name: residue_name.to_string(),
            group: 0,
        }
    }

    /// Returns the resolved mass, or `0.0` when no table provided one.
    pub fn mass_or_zero(&self) -> f64 {
        self.mass.unwrap_or(0.0)
    }
}
