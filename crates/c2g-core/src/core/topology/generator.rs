use super::terms::{Angle, Dihedral, Improper, Pair14};
use crate::core::forcefield::angle_types::AngleTypeTable;
use crate::core::models::graph::{GraphError, MoleculeGraph};
use crate::core::models::residue::ImproperRecord;
use std::collections::HashSet;
use tracing::debug;

/// Equilibrium angle (degrees) above which a bond angle is treated as linear.
pub const DEFAULT_LINEAR_CUTOFF: f64 = 179.9;

/// Bonded terms derived for one residue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedTopology {
    pub angles: Vec<Angle>,
    /// Every dihedral enumerated from the graph, before the linearity filter.
    pub dihedrals: Vec<Dihedral>,
    /// Dihedrals that survived the linearity filter, in enumeration order.
    pub proper_dihedrals: Vec<Dihedral>,
    pub pairs: Vec<Pair14>,
    pub impropers: Vec<Improper>,
}

impl DerivedTopology {
    pub fn dropped_dihedral_count(&self) -> usize {
        self.dihedrals.len() - self.proper_dihedrals.len()
    }
}

/// Derives angles, dihedrals and 1-4 pairs from a [`MoleculeGraph`].
///
/// All enumeration orders are a function of atom index and neighbor
/// declaration order only, so identical input always yields identical term
/// lists.
#[derive(Debug, Clone)]
pub struct TopologyGenerator<'a> {
    angle_types: &'a AngleTypeTable,
    linear_cutoff: f64,
}

impl<'a> TopologyGenerator<'a> {
    pub fn new(angle_types: &'a AngleTypeTable) -> Self {
        Self {
            angle_types,
            linear_cutoff: DEFAULT_LINEAR_CUTOFF,
        }
    }

    pub fn with_linear_cutoff(mut self, cutoff: f64) -> Self {
        self.linear_cutoff = cutoff;
        self
    }

    /// Runs every derivation step and resolves the declared impropers.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DanglingBondReference`] if an improper names an
    /// atom that is not part of the graph.
    pub fn generate(
        &self,
        graph: &MoleculeGraph,
        impropers: &[ImproperRecord],
    ) -> Result<DerivedTopology, GraphError> {
        let angles = generate_angles(graph);
        let dihedrals = generate_dihedrals(graph);
        let pairs = generate_pairs(graph, &dihedrals);
        let proper_dihedrals = self.filter_linear(graph, &dihedrals);
        let impropers = resolve_impropers(graph, impropers)?;

        debug!(
            angles = angles.len(),
            dihedrals = dihedrals.len(),
            retained = proper_dihedrals.len(),
            pairs = pairs.len(),
            impropers = impropers.len(),
            "Derived bonded terms."
        );

        Ok(DerivedTopology {
            angles,
            dihedrals,
            proper_dihedrals,
            pairs,
            impropers,
        })
    }

    /// Keeps the dihedrals whose flanking angles are both non-linear.
    pub fn filter_linear(&self, graph: &MoleculeGraph, dihedrals: &[Dihedral]) -> Vec<Dihedral> {
        dihedrals
            .iter()
            .filter(|dihedral| {
                let linear = dihedral
                    .center_angles()
                    .iter()
                    .any(|angle| {
                        self.angle_types
                            .is_linear(center_types(graph, angle), self.linear_cutoff)
                    });
                if linear {
                    debug!(
                        atoms = ?[dihedral.i, dihedral.j, dihedral.k, dihedral.l],
                        "Dropping dihedral across a linear angle."
                    );
                }
                !linear
            })
            .copied()
            .collect()
    }
}

fn center_types<'g>(graph: &'g MoleculeGraph, angle: &Angle) -> [&'g str; 3] {
    let ty = |idx: usize| graph.atoms()[idx].atom_type.as_str();
    [ty(angle.i), ty(angle.j), ty(angle.k)]
}

/// One angle per unordered neighbor pair of every atom.
pub fn generate_angles(graph: &MoleculeGraph) -> Vec<Angle> {
    let mut angles = Vec::new();
    for center in 0..graph.atom_count() {
        let neighbors = graph.neighbors(center);
        for (pos, &i) in neighbors.iter().enumerate() {
            for &k in &neighbors[pos + 1..] {
                angles.push(Angle { i, j: center, k });
            }
        }
    }
    angles
}

/// One dihedral per pair of outer neighbors of every bond, skipping
/// three-membered rings where both outer atoms coincide.
pub fn generate_dihedrals(graph: &MoleculeGraph) -> Vec<Dihedral> {
    let mut dihedrals = Vec::new();
    for edge in graph.edges() {
        let (j, k) = (edge.i, edge.j);
        for &i in graph.neighbors(j).iter().filter(|&&n| n != k) {
            for &l in graph.neighbors(k).iter().filter(|&&n| n != j) {
                if i != l {
                    dihedrals.push(Dihedral { i, j, k, l });
                }
            }
        }
    }
    dihedrals
}

/// 1-4 pairs from dihedral end atoms whose shortest path is exactly three
/// bonds. Each pair appears once, listed by ascending first atom and then in
/// the order its partners were first seen.
pub fn generate_pairs(graph: &MoleculeGraph, dihedrals: &[Dihedral]) -> Vec<Pair14> {
    let mut partners: Vec<Vec<usize>> = vec![Vec::new(); graph.atom_count()];
    let mut seen = HashSet::new();

    for dihedral in dihedrals {
        let (a, b) = (dihedral.i, dihedral.l);
        if graph.shortest_path_len(a, b) != Some(3) {
            continue;
        }
        if seen.insert((a.min(b), a.max(b))) {
            partners[a].push(b);
            partners[b].push(a);
        }
    }

    partners
        .iter()
        .enumerate()
        .flat_map(|(i, list)| {
            list.iter()
                .filter(move |&&j| j > i)
                .map(move |&j| Pair14 { i, j })
        })
        .collect()
}

/// Resolves declared impropers to atom indices, preserving atom order.
pub fn resolve_impropers(
    graph: &MoleculeGraph,
    impropers: &[ImproperRecord],
) -> Result<Vec<Improper>, GraphError> {
    impropers
        .iter()
        .map(|record| {
            let [i, j, k, l] = &record.atoms;
            Ok(Improper {
                i: graph.resolve(i, "Improper")?,
                j: graph.resolve(j, "Improper")?,
                k: graph.resolve(k, "Improper")?,
                l: graph.resolve(l, "Improper")?,
            })
        })
        .collect()
}
