/// Bond angle `i-j-k` centered on `j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Angle {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

/// Proper dihedral `i-j-k-l` around the central bond `j-k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dihedral {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub l: usize,
}

impl Dihedral {
    /// The two bond angles flanking the central bond: `i-j-k` and `j-k-l`.
    pub fn center_angles(&self) -> [Angle; 2] {
        [
            Angle {
                i: self.i,
                j: self.j,
                k: self.k,
            },
            Angle {
                i: self.j,
                j: self.k,
                k: self.l,
            },
        ]
    }
}

/// Atom pair separated by exactly three bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair14 {
    pub i: usize,
    pub j: usize,
}

/// Improper dihedral as declared by the residue, atom order preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Improper {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub l: usize,
}

/// Any term produced for the molecule block, with its GROMACS function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedTerm {
    Angle(Angle),
    Dihedral(Dihedral),
    Pair14(Pair14),
    Improper(Improper),
}

impl DerivedTerm {
    /// Zero-based atom indices in emission order.
    pub fn atoms(&self) -> Vec<usize> {
        match *self {
            Self::Angle(Angle { i, j, k }) => vec![i, j, k],
            Self::Dihedral(Dihedral { i, j, k, l }) => vec![i, j, k, l],
            Self::Pair14(Pair14 { i, j }) => vec![i, j],
            Self::Improper(Improper { i, j, k, l }) => vec![i, j, k, l],
        }
    }

    /// GROMACS `funct` column: Urey-Bradley angles (5), multiple proper
    /// dihedrals (9), LJ/Coulomb pairs (1) and harmonic impropers (2).
    pub fn function(&self) -> u8 {
        match self {
            Self::Angle(_) => 5,
            Self::Dihedral(_) => 9,
            Self::Pair14(_) => 1,
            Self::Improper(_) => 2,
        }
    }
}

impl From<Angle> for DerivedTerm {
    fn from(term: Angle) -> Self {
        Self::Angle(term)
    }
}

impl From<Dihedral> for DerivedTerm {
    fn from(term: Dihedral) -> Self {
        Self::Dihedral(term)
    }
}

impl From<Pair14> for DerivedTerm {
    fn from(term: Pair14) -> Self {
        Self::Pair14(term)
    }
}

impl From<Improper> for DerivedTerm {
    fn from(term: Improper) -> Self {
        Self::Improper(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_angles_share_the_central_bond() {
        let dihedral = Dihedral {
            i: 0,
            j: 1,
            k: 2,
            l: 3,
        };
        let [left, right] = dihedral.center_angles();
        assert_eq!((left.i, left.j, left.k), (0, 1, 2));
        assert_eq!((right.i, right.j, right.k), (1, 2, 3));
    }

    #[test]
    fn terms_report_atoms_and_function_type() {
        let pair = DerivedTerm::from(Pair14 { i: 4, j: 7 });
        assert_eq!(pair.atoms(), vec![4, 7]);
        assert_eq!(pair.function(), 1);

        let improper = DerivedTerm::from(Improper {
            i: 3,
            j: 0,
            k: 1,
            l: 2,
        });
        assert_eq!(improper.atoms(), vec![3, 0, 1, 2]);
        assert_eq!(improper.function(), 2);
    }
}
