use super::translate::AngleType;

/// Wildcard token used by CHARMM-derived parameter tables.
pub const DEFAULT_WILDCARD: &str = "X";

/// An angle-type entry reduced to what the linearity test needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleTypeParameter {
    pub types: [String; 3],
    /// Equilibrium angle in degrees.
    pub theta0: f64,
}

impl AngleTypeParameter {
    pub fn new(types: [String; 3], theta0: f64) -> Self {
        Self { types, theta0 }
    }
}

impl From<&AngleType> for AngleTypeParameter {
    fn from(angle: &AngleType) -> Self {
        Self::new(angle.types.clone(), angle.theta0)
    }
}

/// Ordered collection of angle-type entries with wildcard-aware matching.
///
/// A triple `(p1, p2, p3)` matches a center `(a, b, c)` when `p2` matches `b`
/// and `{p1, p3}` matches `{a, c}` in either orientation. A token equal to
/// the wildcard matches any type at its position.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleTypeTable {
    entries: Vec<AngleTypeParameter>,
    wildcard: Option<String>,
}

impl Default for AngleTypeTable {
    fn default() -> Self {
        Self::new(Some(DEFAULT_WILDCARD.to_string()))
    }
}

impl AngleTypeTable {
    pub fn new(wildcard: Option<String>) -> Self {
        Self {
            entries: Vec::new(),
            wildcard,
        }
    }

    pub fn push(&mut self, entry: AngleTypeParameter) {
        self.entries.push(entry);
    }

    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = AngleTypeParameter>,
    {
        self.entries.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn matches(&self, entry: &AngleTypeParameter, center: [&str; 3]) -> bool {
        let [p1, p2, p3] = &entry.types;
        let [a, b, c] = center;
        self.token_matches(p2, b)
            && ((self.token_matches(p1, a) && self.token_matches(p3, c))
                || (self.token_matches(p1, c) && self.token_matches(p3, a)))
    }

    /// True if any matching entry has an equilibrium angle above `cutoff` degrees.
    pub fn is_linear(&self, center: [&str; 3], cutoff: f64) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.theta0 > cutoff && self.matches(entry, center))
    }

    fn token_matches(&self, token: &str, atom_type: &str) -> bool {
        token == atom_type || self.wildcard.as_deref() == Some(token)
    }
}
