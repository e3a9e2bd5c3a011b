use crate::core::models::atom::AtomRecord;
use std::collections::HashMap;

/// Atom type → mass (amu) lookup.
///
/// The first source to define a type wins; later sources only fill gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MassTable {
    masses: HashMap<String, f64>,
}

impl MassTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `atom_type` unless it is already present. Returns whether it was added.
    pub fn insert_missing(&mut self, atom_type: &str, mass: f64) -> bool {
        if self.masses.contains_key(atom_type) {
            return false;
        }
        self.masses.insert(atom_type.to_string(), mass);
        true
    }

    /// Fills gaps from `entries`, returning how many new types were added.
    pub fn fill_from<'a, I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        entries
            .into_iter()
            .filter(|&(atom_type, mass)| self.insert_missing(atom_type, mass))
            .count()
    }

    pub fn get(&self, atom_type: &str) -> Option<f64> {
        self.masses.get(atom_type).copied()
    }

    /// Sets the mass of every atom whose type is known.
    ///
    /// Returns the distinct types left unresolved, in first-seen order.
    pub fn assign(&self, atoms: &mut [AtomRecord]) -> Vec<String> {
        let mut unresolved: Vec<String> = Vec::new();
        for atom in atoms.iter_mut() {
            atom.mass = self.get(&atom.atom_type);
            if atom.mass.is_none() && !unresolved.contains(&atom.atom_type) {
                unresolved.push(atom.atom_type.clone());
            }
        }
        unresolved
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, f64)> for MassTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.fill_from(iter);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_definition_wins() {
        let mut table: MassTable = [("CG331", 12.011), ("HGA3", 1.008)].into_iter().collect();
        let added = table.fill_from([("CG331", 99.0), ("OG311", 15.9994)]);

        assert_eq!(added, 1);
        assert_eq!(table.get("CG331"), Some(12.011));
        assert_eq!(table.get("OG311"), Some(15.9994));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn assign_reports_unresolved_types_once() {
        let table: MassTable = [("CG331", 12.011)].into_iter().collect();
        let mut atoms = vec![
            AtomRecord::new(0, "C1", "CG331", -0.27, "LIG"),
            AtomRecord::new(1, "X1", "XX1", 0.0, "LIG"),
            AtomRecord::new(2, "X2", "XX1", 0.0, "LIG"),
        ];
        let unresolved = table.assign(&mut atoms);

        assert_eq!(unresolved, vec!["XX1".to_string()]);
        assert_eq!(atoms[0].mass, Some(12.011));
        assert_eq!(atoms[2].mass, None);
    }

    #[test]
    fn unknown_type_is_none() {
        assert_eq!(MassTable::new().get("CG331"), None);
        assert!(MassTable::new().is_empty());
    }
}
