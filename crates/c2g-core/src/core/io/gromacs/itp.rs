use crate::core::io::traits::OutputFile;
use crate::core::topology::molecule::MoleculeTopology;
use crate::core::topology::terms::DerivedTerm;
use std::io::{self, Write};

const BOND_HEADER: &str =
    ";  ai    aj funct            c0            c1            c2            c3";
const ANGLE_HEADER: &str =
    ";  ai    aj    ak funct            c0            c1            c2            c3";
const DIHEDRAL_HEADER: &str = ";  ai    aj    ak    al funct            c0            c1            c2            c3            c4            c5";
const IMPROPER_HEADER: &str =
    ";  ai    aj    ak    al funct            c0            c1            c2            c3";

/// GROMACS molecule include file (`.itp`) for a single residue.
pub struct ItpFile;

impl OutputFile for ItpFile {
    type Input = MoleculeTopology;
    type Error = io::Error;

    fn write_to(molecule: &MoleculeTopology, writer: &mut impl Write) -> io::Result<()> {
        let name = &molecule.name;

        writeln!(writer, "; Created by charmm2gmx")?;
        writeln!(writer)?;
        writeln!(writer, "[ moleculetype ]")?;
        writeln!(writer, "; Name            nrexcl")?;
        writeln!(writer, "{}              {}", name, molecule.nrexcl)?;
        writeln!(writer)?;

        writeln!(writer, "[ atoms ]")?;
        writeln!(
            writer,
            ";   nr       type  resnr residue  atom   cgnr     charge       mass  typeB    chargeB      massB"
        )?;
        writeln!(writer, "; residue   1 {name} rtp {name} q  qsum")?;
        for atom in molecule.graph.atoms() {
            let nr = atom.index + 1;
            writeln!(
                writer,
                "{:6} {:>10} {:>6} {:>6} {:>6} {:6} {:10.3} {:10.3}   ;",
                nr,
                atom.atom_type,
                "1",
                name,
                atom.name,
                nr,
                atom.charge,
                atom.mass_or_zero()
            )?;
        }
        writeln!(writer)?;

        writeln!(writer, "[ bonds ]")?;
        writeln!(writer, "{BOND_HEADER}")?;
        for edge in molecule.graph.edges() {
            writeln!(writer, "{:5} {:5}     1", edge.i + 1, edge.j + 1)?;
        }
        writeln!(writer)?;

        write_terms(writer, "[ pairs ]", BOND_HEADER, molecule.pairs())?;
        write_terms(writer, "[ angles ]", ANGLE_HEADER, molecule.angles())?;
        write_terms(
            writer,
            "[ dihedrals ]",
            DIHEDRAL_HEADER,
            molecule.proper_dihedrals(),
        )?;
        if !molecule.derived.impropers.is_empty() {
            write_terms(
                writer,
                "[ dihedrals ]",
                IMPROPER_HEADER,
                molecule.impropers(),
            )?;
        }
        Ok(())
    }
}

fn write_terms(
    writer: &mut impl Write,
    section: &str,
    header: &str,
    terms: impl Iterator<Item = DerivedTerm>,
) -> io::Result<()> {
    writeln!(writer, "{section}")?;
    writeln!(writer, "{header}")?;
    for term in terms {
        for atom in term.atoms() {
            write!(writer, "{:5} ", atom + 1)?;
        }
        // Angle rows use a narrower gap before the function type.
        let width = if matches!(term, DerivedTerm::Angle(_)) { 4 } else { 5 };
        writeln!(writer, "{:>width$}", term.function())?;
    }
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::angle_types::AngleTypeTable;
    use crate::core::models::atom::AtomRecord;
    use crate::core::models::residue::{BondOrder, BondRecord, ImproperRecord, ResidueTopology};
    use crate::core::topology::generator::TopologyGenerator;

    fn residue() -> ResidueTopology {
        let mut residue = ResidueTopology::new("ETOH", 0.0);
        for (name, ty, charge, mass) in [
            ("C1", "CG321", 0.05, Some(12.011)),
            ("C2", "CG331", -0.27, Some(12.011)),
            ("O1", "OG311", -0.65, Some(15.9994)),
            ("HO1", "HGP1", 0.42, None),
            ("H21", "HGA3", 0.09, Some(1.008)),
        ] {
            let idx = residue.atoms.len();
            let mut atom = AtomRecord::new(idx, name, ty, charge, "ETOH");
            atom.mass = mass;
            residue.atoms.push(atom);
        }
        residue.bonds = vec![
            BondRecord::new("C1", "C2", BondOrder::Single),
            BondRecord::new("C1", "O1", BondOrder::Single),
            BondRecord::new("O1", "HO1", BondOrder::Single),
            BondRecord::new("C2", "H21", BondOrder::Single),
        ];
        residue
    }

    fn render(residue: &ResidueTopology) -> String {
        let table = AngleTypeTable::default();
        let molecule =
            MoleculeTopology::from_residue(residue, &TopologyGenerator::new(&table)).unwrap();
        String::from_utf8(ItpFile::render(&molecule).unwrap()).unwrap()
    }

    #[test]
    fn writes_moleculetype_and_atoms() {
        let text = render(&residue());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "; Created by charmm2gmx");
        assert_eq!(lines[2], "[ moleculetype ]");
        assert_eq!(lines[4], "ETOH              3");
        assert_eq!(lines[6], "[ atoms ]");
        assert_eq!(lines[8], "; residue   1 ETOH rtp ETOH q  qsum");
        assert_eq!(
            lines[9],
            "     1      CG321      1   ETOH     C1      1      0.050     12.011   ;"
        );
        assert_eq!(
            lines[12],
            "     4       HGP1      1   ETOH    HO1      4      0.420      0.000   ;"
        );
    }

    #[test]
    fn writes_bonded_sections_with_one_based_indices() {
        let text = render(&residue());

        assert!(text.contains("[ bonds ]\n;  ai    aj funct            c0            c1            c2            c3\n    1     2     1\n    1     3     1\n    2     5     1\n    3     4     1\n\n"));
        assert!(text.contains("[ pairs ]\n;  ai    aj funct            c0            c1            c2            c3\n    2     4     1\n    3     5     1\n\n"));
        assert!(text.contains("    2     1     3    5\n"));
        assert!(text.contains("    1     2     5    5\n"));
        assert!(text.contains("    2     1     3     4     9\n"));
        assert!(text.contains("    3     1     2     5     9\n"));
    }

    #[test]
    fn improper_block_only_when_declared() {
        let plain = render(&residue());
        assert_eq!(plain.matches("[ dihedrals ]").count(), 1);

        let mut with_improper = residue();
        with_improper.impropers = vec![ImproperRecord {
            atoms: ["C1", "C2", "O1", "HO1"].map(String::from),
        }];
        let text = render(&with_improper);
        assert_eq!(text.matches("[ dihedrals ]").count(), 2);
        assert!(text.ends_with(
            ";  ai    aj    ak    al funct            c0            c1            c2            c3\n    1     2     3     4     2\n\n"
        ));
    }
}
