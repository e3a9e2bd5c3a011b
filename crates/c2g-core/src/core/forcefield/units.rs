//! CHARMM → GROMACS unit conversion factors.
//!
//! CHARMM harmonic terms are written as `K (x - x0)²` while GROMACS uses
//! `½ k (x - x0)²`, so harmonic force constants pick up a factor of two.

/// kcal/mol → kJ/mol.
pub const KCAL_TO_KJ: f64 = 4.184;

/// Å → nm.
pub const ANGSTROM_TO_NM: f64 = 0.1;

/// kcal/mol/Å² (CHARMM `K`) → kJ/mol/nm² (GROMACS `k`).
pub const HARMONIC_LENGTH_FORCE: f64 = 2.0 * KCAL_TO_KJ / (ANGSTROM_TO_NM * ANGSTROM_TO_NM);

/// kcal/mol/rad² (CHARMM `K`) → kJ/mol/rad² (GROMACS `k`).
pub const HARMONIC_ANGLE_FORCE: f64 = 2.0 * KCAL_TO_KJ;

/// Cosine dihedral amplitudes carry no ½ in either convention.
pub const DIHEDRAL_FORCE: f64 = KCAL_TO_KJ;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harmonic_length_factor_matches_reference_value() {
        assert!((HARMONIC_LENGTH_FORCE - 836.8).abs() < 1e-9);
    }
}
