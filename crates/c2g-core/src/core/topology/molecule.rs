use super::generator::{DerivedTopology, TopologyGenerator};
use super::terms::DerivedTerm;
use crate::core::models::graph::{GraphError, MoleculeGraph};
use crate::core::models::residue::ResidueTopology;

/// Default number of bonds across which nonbonded interactions are excluded.
pub const DEFAULT_NREXCL: u32 = 3;

/// A residue's connectivity together with every bonded term derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeTopology {
    pub name: String,
    pub graph: MoleculeGraph,
    pub derived: DerivedTopology,
    pub nrexcl: u32,
}

impl MoleculeTopology {
    /// Builds the graph of `residue` and derives its bonded terms.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphError`] from graph construction and improper resolution.
    pub fn from_residue(
        residue: &ResidueTopology,
        generator: &TopologyGenerator<'_>,
    ) -> Result<Self, GraphError> {
        let graph = MoleculeGraph::build(residue.atoms.clone(), &residue.bonds)?;
        let derived = generator.generate(&graph, &residue.impropers)?;
        Ok(Self {
            name: residue.name.clone(),
            graph,
            derived,
            nrexcl: DEFAULT_NREXCL,
        })
    }

    pub fn with_nrexcl(mut self, nrexcl: u32) -> Self {
        self.nrexcl = nrexcl;
        self
    }

    pub fn pairs(&self) -> impl Iterator<Item = DerivedTerm> + '_ {
        self.derived.pairs.iter().copied().map(DerivedTerm::from)
    }

    pub fn angles(&self) -> impl Iterator<Item = DerivedTerm> + '_ {
        self.derived.angles.iter().copied().map(DerivedTerm::from)
    }

    /// Proper dihedrals retained by the linearity filter.
    pub fn proper_dihedrals(&self) -> impl Iterator<Item = DerivedTerm> + '_ {
        self.derived
            .proper_dihedrals
            .iter()
            .copied()
            .map(DerivedTerm::from)
    }

    pub fn impropers(&self) -> impl Iterator<Item = DerivedTerm> + '_ {
        self.derived.impropers.iter().copied().map(DerivedTerm::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::angle_types::AngleTypeTable;
    use crate::core::models::atom::AtomRecord;
    use crate::core::models::residue::{BondOrder, BondRecord, ImproperRecord};

    fn formamide() -> ResidueTopology {
        let mut residue = ResidueTopology::new("FORM", 0.0);
        for (name, ty) in [("C", "CG2O1"), ("O", "OG2D1"), ("N", "NG2S2"), ("H", "HGR52")] {
            let idx = residue.atoms.len();
            residue
                .atoms
                .push(AtomRecord::new(idx, name, ty, 0.0, "FORM"));
        }
        residue.bonds = vec![
            BondRecord::new("C", "O", BondOrder::Double),
            BondRecord::new("C", "N", BondOrder::Single),
            BondRecord::new("C", "H", BondOrder::Single),
        ];
        residue.impropers = vec![ImproperRecord {
            atoms: ["C", "N", "H", "O"].map(String::from),
        }];
        residue
    }

    #[test]
    fn from_residue_derives_all_terms() {
        let table = AngleTypeTable::default();
        let generator = TopologyGenerator::new(&table);
        let molecule = MoleculeTopology::from_residue(&formamide(), &generator).unwrap();

        assert_eq!(molecule.name, "FORM");
        assert_eq!(molecule.nrexcl, DEFAULT_NREXCL);
        assert_eq!(molecule.graph.edge_count(), 3);
        assert_eq!(molecule.angles().count(), 3);
        assert_eq!(molecule.proper_dihedrals().count(), 0);
        assert_eq!(molecule.pairs().count(), 0);

        let impropers: Vec<_> = molecule.impropers().collect();
        assert_eq!(impropers.len(), 1);
        assert_eq!(impropers[0].atoms(), vec![0, 2, 3, 1]);
    }

    #[test]
    fn dangling_bond_is_reported() {
        let mut residue = formamide();
        residue.bonds.push(BondRecord::new("N", "HN1", BondOrder::Single));
        let table = AngleTypeTable::default();
        let err = MoleculeTopology::from_residue(&residue, &TopologyGenerator::new(&table))
            .unwrap_err();
        assert!(matches!(err, GraphError::DanglingBondReference { name, .. } if name == "HN1"));
    }

    #[test]
    fn nrexcl_can_be_overridden() {
        let table = AngleTypeTable::default();
        let molecule = MoleculeTopology::from_residue(&formamide(), &TopologyGenerator::new(&table))
            .unwrap()
            .with_nrexcl(2);
        assert_eq!(molecule.nrexcl, 2);
    }
}
