use super::atom::AtomRecord;
use super::residue::{BondOrder, BondRecord};
use std::collections::{HashMap, VecDeque};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("{context} references atom '{name}', which is not declared in the residue")]
    DanglingBondReference { name: String, context: String },
    #[error("Atom name '{name}' is declared more than once in the residue")]
    DuplicateAtomName { name: String },
    #[error("Bond connects atom '{name}' to itself")]
    SelfBond { name: String },
}

/// A resolved bond between two atom indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub i: usize,
    pub j: usize,
    pub order: BondOrder,
}

/// Connectivity of a single residue.
///
/// Nodes are atom indices and edges are the resolved `BOND`/`DOUB` records.
/// Neighbor lists keep the order in which bonds were declared, so every
/// traversal (and therefore every derived term list) is a deterministic
/// function of the input. The graph is undirected, carries no self-loops and
/// holds at most one edge per atom pair: redeclaring a bond only overwrites
/// its recorded order.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeGraph {
    atoms: Vec<AtomRecord>,
    adjacency: Vec<Vec<usize>>,
    orders: HashMap<(usize, usize), BondOrder>,
    name_to_index: HashMap<String, usize>,
    declared_bonds: usize,
}

impl MoleculeGraph {
    /// Builds the graph from a residue's atoms and bond records.
    ///
    /// Atom indices are reassigned to match their position in `atoms`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateAtomName`] when two atoms share a name,
    /// [`GraphError::DanglingBondReference`] when a bond names an undeclared
    /// atom, and [`GraphError::SelfBond`] when both ends of a bond are the same atom.
    pub fn build(atoms: Vec<AtomRecord>, bonds: &[BondRecord]) -> Result<Self, GraphError> {
        let mut atoms = atoms;
        let mut name_to_index = HashMap::with_capacity(atoms.len());
        for (idx, atom) in atoms.iter_mut().enumerate() {
            atom.index = idx;
            if name_to_index.insert(atom.name.clone(), idx).is_some() {
                return Err(GraphError::DuplicateAtomName {
                    name: atom.name.clone(),
                });
            }
        }

        let mut graph = Self {
            adjacency: vec![Vec::new(); atoms.len()],
            atoms,
            orders: HashMap::new(),
            name_to_index,
            declared_bonds: 0,
        };

        for bond in bonds {
            let i = graph.resolve(&bond.atom1, "Bond")?;
            let j = graph.resolve(&bond.atom2, "Bond")?;
            if i == j {
                return Err(GraphError::SelfBond {
                    name: bond.atom1.clone(),
                });
            }
            graph.add_edge(i, j, bond.order);
        }

        Ok(graph)
    }

    fn add_edge(&mut self, i: usize, j: usize, order: BondOrder) {
        self.declared_bonds += 1;
        let key = (i.min(j), i.max(j));
        if self.orders.insert(key, order).is_some() {
            debug!(
                atom1 = %self.atoms[i].name,
                atom2 = %self.atoms[j].name,
                "Duplicate bond declaration; keeping a single edge."
            );
            return;
        }
        self.adjacency[i].push(j);
        self.adjacency[j].push(i);
    }

    /// Looks up the index of a declared atom name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Resolves an atom name, naming `context` in the error when it is absent.
    pub fn resolve(&self, name: &str, context: &str) -> Result<usize, GraphError> {
        self.index_of(name)
            .ok_or_else(|| GraphError::DanglingBondReference {
                name: name.to_string(),
                context: context.to_string(),
            })
    }

    pub fn atoms(&self) -> &[AtomRecord] {
        &self.atoms
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Neighbors of `index` in bond declaration order.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.adjacency.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of bonded neighbors of `index` (test-only helper).
    #[cfg(test)]
    pub(crate) fn degree(&self, index: usize) -> usize {
        self.neighbors(index).len()
    }

    pub fn bond_order(&self, i: usize, j: usize) -> Option<BondOrder> {
        self.orders.get(&(i.min(j), i.max(j))).copied()
    }

    pub fn edge_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of bond records consumed, duplicates included.
    pub fn declared_bond_count(&self) -> usize {
        self.declared_bonds
    }

    /// Returns every edge once, ordered by ascending first atom and then by
    /// the first atom's neighbor order.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (i, neighbors) in self.adjacency.iter().enumerate() {
            for &j in neighbors.iter().filter(|&&j| j > i) {
                edges.push(Edge {
                    i,
                    j,
                    order: self.bond_order(i, j).unwrap_or_default(),
                });
            }
        }
        edges
    }

    /// Number of bonds on the shortest path between two atoms, found by
    /// breadth-first search. `None` if they are not connected.
    pub fn shortest_path_len(&self, from: usize, to: usize) -> Option<usize> {
        if from >= self.atoms.len() || to >= self.atoms.len() {
            return None;
        }
        if from == to {
            return Some(0);
        }

        let mut distance = vec![usize::MAX; self.atoms.len()];
        let mut queue = VecDeque::new();
        distance[from] = 0;
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            for &next in &self.adjacency[current] {
                if distance[next] != usize::MAX {
                    continue;
                }
                distance[next] = distance[current] + 1;
                if next == to {
                    return Some(distance[next]);
                }
                queue.push_back(next);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms(names: &[&str]) -> Vec<AtomRecord> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| AtomRecord::new(i, n, "CG321", 0.0, "LIG"))
            .collect()
    }

    fn bond(a: &str, b: &str) -> BondRecord {
        BondRecord::new(a, b, BondOrder::Single)
    }

    #[test]
    fn build_creates_undirected_adjacency() {
        let graph = MoleculeGraph::build(
            atoms(&["A", "B", "C"]),
            &[bond("A", "B"), bond("B", "C")],
        )
        .unwrap();

        assert_eq!(graph.atom_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0, 2]);
        assert_eq!(graph.neighbors(2), &[1]);
    }

    #[test]
    fn build_reassigns_indices_in_declaration_order() {
        let mut list = atoms(&["A", "B"]);
        list[0].index = 7;
        list[1].index = 9;
        let graph = MoleculeGraph::build(list, &[]).unwrap();
        assert_eq!(graph.atoms()[0].index, 0);
        assert_eq!(graph.atoms()[1].index, 1);
        assert_eq!(graph.index_of("B"), Some(1));
    }

    #[test]
    fn duplicate_bond_overwrites_order_instead_of_duplicating() {
        let graph = MoleculeGraph::build(
            atoms(&["A", "B"]),
            &[bond("A", "B"), BondRecord::new("B", "A", BondOrder::Double)],
        )
        .unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.declared_bond_count(), 2);
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.bond_order(0, 1), Some(BondOrder::Double));
    }

    #[test]
    fn dangling_bond_reference_is_rejected() {
        let result = MoleculeGraph::build(atoms(&["A", "B"]), &[bond("A", "Z")]);
        assert_eq!(
            result,
            Err(GraphError::DanglingBondReference {
                name: "Z".to_string(),
                context: "Bond".to_string(),
            })
        );
    }

    #[test]
    fn duplicate_atom_name_is_rejected() {
        let result = MoleculeGraph::build(atoms(&["A", "A"]), &[]);
        assert!(matches!(result, Err(GraphError::DuplicateAtomName { name }) if name == "A"));
    }

    #[test]
    fn self_bond_is_rejected() {
        let result = MoleculeGraph::build(atoms(&["A", "B"]), &[bond("B", "B")]);
        assert!(matches!(result, Err(GraphError::SelfBond { .. })));
    }

    #[test]
    fn edges_are_ordered_by_first_atom_then_neighbor_order() {
        let graph = MoleculeGraph::build(
            atoms(&["A", "B", "C", "D"]),
            &[bond("C", "D"), bond("A", "C"), bond("A", "B")],
        )
        .unwrap();

        let pairs: Vec<_> = graph.edges().iter().map(|e| (e.i, e.j)).collect();
        assert_eq!(pairs, vec![(0, 2), (0, 1), (2, 3)]);
    }

    #[test]
    fn shortest_path_uses_ring_shortcuts() {
        let graph = MoleculeGraph::build(
            atoms(&["A", "B", "C", "D"]),
            &[bond("A", "B"), bond("B", "C"), bond("C", "D"), bond("D", "A")],
        )
        .unwrap();

        assert_eq!(graph.shortest_path_len(0, 0), Some(0));
        assert_eq!(graph.shortest_path_len(0, 1), Some(1));
        assert_eq!(graph.shortest_path_len(0, 2), Some(2));
        assert_eq!(graph.shortest_path_len(0, 3), Some(1));
    }

    #[test]
    fn shortest_path_is_none_for_disconnected_atoms() {
        let graph = MoleculeGraph::build(atoms(&["A", "B", "C"]), &[bond("A", "B")]).unwrap();
        assert_eq!(graph.shortest_path_len(0, 2), None);
        assert_eq!(graph.shortest_path_len(0, 10), None);
    }
}
