use crate::core::forcefield::translate::GromacsParameters;
use crate::core::io::traits::OutputFile;
use std::io::{self, Write};

/// Bonded parameter tables for the molecule (`.prm`), included from the `.top`.
///
/// Nonbonded and CMAP records are not written: the target force field
/// already carries the atom types they refer to.
pub struct PrmFile;

impl OutputFile for PrmFile {
    type Input = GromacsParameters;
    type Error = io::Error;

    fn write_to(params: &GromacsParameters, writer: &mut impl Write) -> io::Result<()> {
        writeln!(writer)?;

        writeln!(writer, "[ bondtypes ]")?;
        writeln!(writer, ";{:>7} {:>8} {:>5} {:>12} {:>12}", "i", "j", "func", "b0", "kb")?;
        for bond in &params.bondtypes {
            let [i, j] = &bond.types;
            writeln!(writer, "{i:>8} {j:>8} {:5} {:12.8} {:12.2}", 1, bond.b0, bond.kb)?;
        }

        write!(writer, "\n\n[ angletypes ]\n")?;
        writeln!(
            writer,
            ";{:>7} {:>8} {:>8} {:>5} {:>12} {:>12} {:>12} {:>12}",
            "i", "j", "k", "func", "theta0", "ktheta", "ub0", "kub"
        )?;
        for angle in &params.angletypes {
            let [i, j, k] = &angle.types;
            writeln!(
                writer,
                "{i:>8} {j:>8} {k:>8} {:5} {:12.6} {:12.6} {:12.8} {:12.2}",
                5, angle.theta0, angle.ktheta, angle.ub0, angle.kub
            )?;
        }

        write!(writer, "\n\n[ dihedraltypes ]\n")?;
        writeln!(
            writer,
            ";{:>7} {:>8} {:>8} {:>8} {:>5} {:>12} {:>12} {:>5}",
            "i", "j", "k", "l", "func", "phi0", "kphi", "mult"
        )?;
        for dihedral in &params.dihedraltypes {
            let [i, j, k, l] = &dihedral.types;
            writeln!(
                writer,
                "{i:>8} {j:>8} {k:>8} {l:>8} {:5} {:12.6} {:12.6} {:5}",
                9, dihedral.phi0, dihedral.kphi, dihedral.multiplicity
            )?;
        }

        write!(writer, "\n\n[ dihedraltypes ]\n")?;
        writeln!(writer, "; 'improper' dihedrals ")?;
        writeln!(
            writer,
            ";{:>7} {:>8} {:>8} {:>8} {:>5} {:>12} {:>12}",
            "i", "j", "k", "l", "func", "phi0", "kphi"
        )?;
        for improper in &params.impropertypes {
            let [i, j, k, l] = &improper.types;
            writeln!(
                writer,
                "{i:>8} {j:>8} {k:>8} {l:>8} {:5} {:12.6} {:12.6}",
                2, improper.phi0, improper.kphi
            )?;
        }
        Ok(())
    }
}
