use super::error::ParseError;
use super::record::SourceLine;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const CGENFF_VERSION_BANNER: &str = "* For use with CGenFF version";

/// The raw lines of a CHARMM stream (`.str`) file.
///
/// A stream typically bundles a `read rtf card` topology block and a
/// `read param card` parameter block, each terminated by `END`. The
/// accessors below carve those ranges out by line scanning; the record
/// grammar itself is handled by [`rtf`](super::rtf) and [`prm`](super::prm).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamFile {
    lines: Vec<SourceLine>,
}

impl StreamFile {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines
                .into_iter()
                .enumerate()
                .map(|(i, text)| SourceLine::new(i + 1, text))
                .collect(),
        }
    }

    pub fn read_from(reader: &mut impl BufRead) -> io::Result<Self> {
        let lines = reader.lines().collect::<io::Result<Vec<_>>>()?;
        Ok(Self::from_lines(lines))
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Lines from `RESI <name>` (inclusive) up to the next `RESI` or `END` (exclusive).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ResidueNotFound`] if no `RESI` record carries `name`.
    pub fn residue_lines(&self, name: &str) -> Result<&[SourceLine], ParseError> {
        let start = self
            .lines
            .iter()
            .position(|line| {
                starts_with_keyword(line, "RESI")
                    && line.fields().get(1).is_some_and(|&resname| resname == name)
            })
            .ok_or_else(|| ParseError::ResidueNotFound {
                name: name.to_string(),
            })?;

        let end = self.lines[start + 1..]
            .iter()
            .position(|line| starts_with_keyword(line, "RESI") || starts_with_keyword(line, "END"))
            .map_or(self.lines.len(), |offset| start + 1 + offset);

        Ok(&self.lines[start..end])
    }

    /// Lines of every `read para...` block, excluding the directive and its `END`.
    pub fn parameter_lines(&self) -> Vec<SourceLine> {
        self.block_lines("read para")
    }

    /// Lines of every `read rtf` block, excluding the directive and its `END`.
    ///
    /// A plain topology file without `read` directives is returned whole.
    pub fn topology_lines(&self) -> Vec<SourceLine> {
        let block = self.block_lines("read rtf");
        if block.is_empty() && !self.has_read_directive() {
            return self.lines.clone();
        }
        block
    }

    /// Version token of the `* For use with CGenFF version X` banner.
    pub fn cgenff_version(&self) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.text.starts_with(CGENFF_VERSION_BANNER))
            .and_then(|line| line.text.split_whitespace().nth(6))
    }

    fn has_read_directive(&self) -> bool {
        self.lines
            .iter()
            .any(|line| line.text.trim_start().to_ascii_lowercase().starts_with("read "))
    }

    fn block_lines(&self, opener: &str) -> Vec<SourceLine> {
        let mut block = Vec::new();
        let mut inside = false;
        for line in &self.lines {
            if starts_with_keyword(line, "END") {
                inside = false;
                continue;
            }
            if inside {
                block.push(line.clone());
            } else if line
                .text
                .trim_start()
                .to_ascii_lowercase()
                .starts_with(opener)
            {
                inside = true;
            }
        }
        block
    }
}

fn starts_with_keyword(line: &SourceLine, keyword: &str) -> bool {
    line.text.trim_start().starts_with(keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STREAM: &str = "\
* Toppar stream file generated by
* CHARMM General Force Field (CGenFF) program version 2.5
* For use with CGenFF version 4.6
*
read rtf card append
* Topologies generated by
36 1

RESI ETOH          0.000 ! param penalty=   0.000
GROUP
ATOM C1     CG331  -0.27
ATOM O1     OG311  -0.65
BOND C1   O1
RESI OTHR          0.000
ATOM X1     CG331   0.00
END

read param card flex append
BONDS
CG331  OG311   428.00     1.4200
END
RETURN
";

    fn stream() -> StreamFile {
        StreamFile::from_lines(STREAM.lines())
    }

    #[test]
    fn residue_lines_stop_at_next_resi() {
        let stream = stream();
        let lines = stream.residue_lines("ETOH").unwrap();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].text.starts_with("RESI ETOH"));
        assert_eq!(lines[0].number, 9);
        assert_eq!(lines[4].text, "BOND C1   O1");
    }

    #[test]
    fn residue_lines_stop_at_end() {
        let stream = stream();
        let lines = stream.residue_lines("OTHR").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "ATOM X1     CG331   0.00");
    }

    #[test]
    fn residue_lines_match_full_name_only() {
        let stream = stream();
        assert_eq!(
            stream.residue_lines("ETO"),
            Err(ParseError::ResidueNotFound {
                name: "ETO".to_string()
            })
        );
    }

    #[test]
    fn parameter_lines_cover_read_param_block() {
        let lines = stream().parameter_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "BONDS");
        assert_eq!(lines[0].number, 19);
    }

    #[test]
    fn topology_lines_cover_read_rtf_block() {
        let lines = stream().topology_lines();
        assert_eq!(lines.first().map(|l| l.number), Some(6));
        assert_eq!(lines.last().map(|l| l.text.as_str()), Some("ATOM X1     CG331   0.00"));
    }

    #[test]
    fn plain_topology_file_is_returned_whole() {
        let stream = StreamFile::from_lines(["MASS -1 CG331 12.011 C", "RESI X 0.0"]);
        assert_eq!(stream.topology_lines().len(), 2);
        assert!(stream.parameter_lines().is_empty());
    }

    #[test]
    fn cgenff_version_is_read_from_banner() {
        assert_eq!(stream().cgenff_version(), Some("4.6"));
        assert_eq!(StreamFile::default().cgenff_version(), None);
    }

    #[test]
    fn read_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lig.str");
        std::fs::write(&path, STREAM).unwrap();
        let stream = StreamFile::read_from_path(&path).unwrap();
        assert_eq!(stream, StreamFile::from_lines(STREAM.lines()));
    }
}
