use crate::core::forcefield::angle_types::AngleTypeParameter;
use crate::core::forcefield::masses::MassTable;
use crate::core::io::traits::InputFile;
use std::io::{self, BufRead};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

const DOC_VERSION_BANNER: &str = "Parameters taken from CHARMM36 and CGenFF";

#[derive(Debug, Error)]
pub enum ForcefieldFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}\n  --> {content}")]
    Parse {
        line: usize,
        content: String,
        kind: ForcefieldParseErrorKind,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ForcefieldParseErrorKind {
    #[error("Expected at least {expected} columns, found {found}")]
    MissingColumns { expected: usize, found: usize },
    #[error("Invalid float in column {column} (value: '{value}')")]
    InvalidFloat { column: usize, value: String },
}

/// Error while loading a file of the force-field directory, naming the file.
#[derive(Debug, Error)]
#[error("Force field file '{}': {source}", .path.display())]
pub struct ForcefieldDirError {
    pub path: PathBuf,
    #[source]
    pub source: ForcefieldFileError,
}

fn parse_error(line: usize, content: &str, kind: ForcefieldParseErrorKind) -> ForcefieldFileError {
    ForcefieldFileError::Parse {
        line,
        content: content.trim_end().to_string(),
        kind,
    }
}

fn parse_column(
    fields: &[&str],
    column: usize,
    line: usize,
    content: &str,
) -> Result<f64, ForcefieldFileError> {
    let Some(value) = fields.get(column) else {
        return Err(parse_error(
            line,
            content,
            ForcefieldParseErrorKind::MissingColumns {
                expected: column + 1,
                found: fields.len(),
            },
        ));
    };
    value.parse().map_err(|_| {
        parse_error(
            line,
            content,
            ForcefieldParseErrorKind::InvalidFloat {
                column: column + 1,
                value: value.to_string(),
            },
        )
    })
}

fn data_fields(line: &str) -> Vec<&str> {
    let data = line.find(';').map_or(line, |pos| &line[..pos]);
    data.split_whitespace().collect()
}

/// `atomtypes.atp`: `type mass` rows.
pub struct AtpFile;

impl InputFile for AtpFile {
    type Output = Vec<(String, f64)>;
    type Error = ForcefieldFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut entries = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let fields = data_fields(&line);
            if fields.is_empty() {
                continue;
            }
            let mass = parse_column(&fields, 1, idx + 1, &line)?;
            entries.push((fields[0].to_string(), mass));
        }
        Ok(entries)
    }
}

/// `[ angletypes ]` rows of a GROMACS parameter file (`ai aj ak funct theta0 ...`).
pub struct AngleTypesFile;

impl InputFile for AngleTypesFile {
    type Output = Vec<AngleTypeParameter>;
    type Error = ForcefieldFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut entries = Vec::new();
        let mut in_section = false;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim_start();
            if trimmed.starts_with('[') {
                in_section = trimmed.starts_with("[ angletypes ]");
                continue;
            }
            if !in_section || trimmed.starts_with('#') {
                continue;
            }
            let fields = data_fields(&line);
            if fields.is_empty() {
                continue;
            }
            let theta0 = parse_column(&fields, 4, idx + 1, &line)?;
            let types = [fields[0], fields[1], fields[2]].map(str::to_string);
            entries.push(AngleTypeParameter::new(types, theta0));
        }
        Ok(entries)
    }
}

/// `#include "file"` targets of `forcefield.itp`, in order.
pub struct IncludeListFile;

impl InputFile for IncludeListFile {
    type Output = Vec<String>;
    type Error = ForcefieldFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut includes = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let Some(rest) = line.strip_prefix("#include") else {
                continue;
            };
            if let Some(target) = rest.split_whitespace().next() {
                includes.push(target.trim_matches('"').to_string());
            }
        }
        Ok(includes)
    }
}

/// CGenFF version token from the `forcefield.doc` banner.
pub struct DocFile;

impl InputFile for DocFile {
    type Output = Option<String>;
    type Error = ForcefieldFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        for line in reader.lines() {
            let line = line?;
            if line.starts_with(DOC_VERSION_BANNER) {
                return Ok(line.split_whitespace().nth(6).map(str::to_string));
            }
        }
        Ok(None)
    }
}

/// A GROMACS force-field directory (`*.ff`).
#[derive(Debug, Clone, PartialEq)]
pub struct ForcefieldDir {
    root: PathBuf,
}

impl ForcefieldDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn read<F: InputFile<Error = ForcefieldFileError>>(
        &self,
        path: PathBuf,
    ) -> Result<F::Output, ForcefieldDirError> {
        F::read_from_path(&path).map_err(|source| ForcefieldDirError { path, source })
    }

    /// Type → mass entries of `atomtypes.atp`.
    pub fn load_masses(&self) -> Result<MassTable, ForcefieldDirError> {
        let entries = self.read::<AtpFile>(self.file("atomtypes.atp"))?;
        let table: MassTable = entries.iter().map(|(ty, mass)| (ty.as_str(), *mass)).collect();
        debug!(types = table.len(), "Loaded atom type masses.");
        Ok(table)
    }

    /// Angle types of every file included by `forcefield.itp`, in include order.
    pub fn load_angle_types(&self) -> Result<Vec<AngleTypeParameter>, ForcefieldDirError> {
        let includes = self.read::<IncludeListFile>(self.file("forcefield.itp"))?;
        let mut entries = Vec::new();
        for include in includes {
            let path = self.file(&include);
            let found = self.read::<AngleTypesFile>(path)?;
            debug!(file = %include, angle_types = found.len(), "Scanned force field include.");
            entries.extend(found);
        }
        Ok(entries)
    }

    /// CGenFF version recorded in `forcefield.doc`; `None` if the file or banner is absent.
    pub fn cgenff_version(&self) -> Result<Option<String>, ForcefieldDirError> {
        let path = self.file("forcefield.doc");
        if !path.is_file() {
            info!(path = %path.display(), "No forcefield.doc; skipping CGenFF version check.");
            return Ok(None);
        }
        self.read::<DocFile>(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn atp_skips_comments_and_blank_lines() {
        let text = "; type mass\n\nCG331   12.01100 ; methyl C\nHGA3     1.00800\n";
        let entries = AtpFile::read_from(&mut Cursor::new(text)).unwrap();
        assert_eq!(
            entries,
            vec![("CG331".to_string(), 12.011), ("HGA3".to_string(), 1.008)]
        );
    }

    #[test]
    fn atp_with_bad_mass_reports_line() {
        let err = AtpFile::read_from(&mut Cursor::new("CG331 heavy\n")).unwrap_err();
        match err {
            ForcefieldFileError::Parse { line, kind, .. } => {
                assert_eq!(line, 1);
                assert_eq!(
                    kind,
                    ForcefieldParseErrorKind::InvalidFloat {
                        column: 2,
                        value: "heavy".to_string()
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn angle_types_are_read_from_their_section_only() {
        let text = "\
[ bondtypes ]
CG1T1 CG1T2 1 0.122 100000.0

[ angletypes ]
;      i        j        k  func       theta0
   CG1T1    CG1T2   HGPAM1     5   180.000000   87.864000
#ifdef HEAVY_H
      X     CG1N1       X      5   180.000000   0.0
#endif

[ dihedraltypes ]
CG1T1 CG1T2 X X 9 0.0 0.0 1
";
        let entries = AngleTypesFile::read_from(&mut Cursor::new(text)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].types, ["CG1T1", "CG1T2", "HGPAM1"].map(String::from));
        assert_eq!(entries[0].theta0, 180.0);
        assert_eq!(entries[1].types[1], "CG1N1");
    }

    #[test]
    fn short_angle_type_row_is_an_error() {
        let text = "[ angletypes ]\nA B C 5\n";
        let err = AngleTypesFile::read_from(&mut Cursor::new(text)).unwrap_err();
        assert!(matches!(
            err,
            ForcefieldFileError::Parse {
                line: 2,
                kind: ForcefieldParseErrorKind::MissingColumns {
                    expected: 5,
                    found: 4
                },
                ..
            }
        ));
    }

    #[test]
    fn include_list_strips_quotes() {
        let text = "#define _FF_CHARMM\n#include \"ffnonbonded.itp\"\n#include \"ffbonded.itp\"\n";
        let includes = IncludeListFile::read_from(&mut Cursor::new(text)).unwrap();
        assert_eq!(includes, vec!["ffnonbonded.itp", "ffbonded.itp"]);
    }

    #[test]
    fn doc_version_is_seventh_token() {
        let text = "CHARMM36 all-atom force field (July 2017)\nParameters taken from CHARMM36 and CGenFF 4.6\n";
        let version = DocFile::read_from(&mut Cursor::new(text)).unwrap();
        assert_eq!(version.as_deref(), Some("4.6"));
    }

    #[test]
    fn forcefield_dir_loads_tables() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("atomtypes.atp"), "CG331 12.011\nHGA3 1.008\n").unwrap();
        fs::write(
            dir.path().join("forcefield.itp"),
            "#include \"ffnonbonded.itp\"\n#include \"ffbonded.itp\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("ffnonbonded.itp"), "[ atomtypes ]\nCG331 6 12.011 0.0 A 0.36 0.32\n").unwrap();
        fs::write(
            dir.path().join("ffbonded.itp"),
            "[ angletypes ]\nCG331 CG321 CG331 5 114.0 488.27 0.2561 9338.69\n",
        )
        .unwrap();

        let ff = ForcefieldDir::new(dir.path());
        let masses = ff.load_masses().unwrap();
        assert_eq!(masses.get("HGA3"), Some(1.008));

        let angles = ff.load_angle_types().unwrap();
        assert_eq!(angles.len(), 1);
        assert_eq!(angles[0].theta0, 114.0);

        assert_eq!(ff.cgenff_version().unwrap(), None);
    }

    #[test]
    fn missing_include_names_the_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("forcefield.itp"), "#include \"missing.itp\"\n").unwrap();
        let err = ForcefieldDir::new(dir.path()).load_angle_types().unwrap_err();
        assert_eq!(err.path, dir.path().join("missing.itp"));
        assert!(matches!(err.source, ForcefieldFileError::Io(_)));
    }
}
