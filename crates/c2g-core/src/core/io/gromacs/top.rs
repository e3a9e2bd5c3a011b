use crate::core::io::traits::OutputFile;
use std::io::{self, Write};

/// Everything the system topology refers to by name.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemTopology {
    /// Force-field directory as it should appear in `#include` lines.
    pub forcefield_dir: String,
    pub prm_file: String,
    pub itp_file: String,
    pub molecule_name: String,
    /// Water model include (`<ffdir>/<model>.itp`), if any.
    pub water_model: Option<String>,
    pub include_ions: bool,
}

/// GROMACS system topology (`.top`) holding one copy of the molecule.
pub struct TopFile;

impl OutputFile for TopFile {
    type Input = SystemTopology;
    type Error = io::Error;

    fn write_to(top: &SystemTopology, writer: &mut impl Write) -> io::Result<()> {
        let ffdir = &top.forcefield_dir;

        writeln!(writer, "#include \"{ffdir}/forcefield.itp\"")?;
        writeln!(writer)?;
        writeln!(writer, "; additional params for the molecule")?;
        writeln!(writer, "#include \"{}\"", top.prm_file)?;
        writeln!(writer)?;
        writeln!(writer, "#include \"{}\"", top.itp_file)?;
        writeln!(writer)?;

        if let Some(model) = &top.water_model {
            writeln!(writer, "#include \"{ffdir}/{model}.itp\"")?;
            writeln!(writer, "#ifdef POSRES_WATER")?;
            writeln!(writer, "; Position restraint for each water oxygen")?;
            writeln!(writer, "[ position_restraints ]")?;
            writeln!(writer, ";  i funct       fcx        fcy        fcz")?;
            writeln!(writer, "   1    1       1000       1000       1000")?;
            writeln!(writer, "#endif")?;
            writeln!(writer)?;
        }

        if top.include_ions {
            writeln!(writer, "; Include topology for ions")?;
            writeln!(writer, "#include \"{ffdir}/ions.itp\"")?;
            writeln!(writer)?;
        }

        writeln!(writer, "[ system ]")?;
        writeln!(writer, "; Name")?;
        writeln!(writer, "mol")?;
        writeln!(writer)?;
        writeln!(writer, "[ molecules ]")?;
        writeln!(writer, "; Compound        #mols")?;
        writeln!(writer, "{}          1", top.molecule_name)?;
        writeln!(writer)
    }
}
