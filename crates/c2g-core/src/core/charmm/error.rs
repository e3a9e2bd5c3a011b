use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Residue '{name}' not found: no matching RESI record before end of stream")]
    ResidueNotFound { name: String },
    #[error("Parse error on line {line}: {kind}\n  --> {content}")]
    Record {
        line: usize,
        content: String,
        kind: RecordErrorKind,
    },
    #[error("CMAP grid for '{key}' is incomplete: expected {expected} values, found {found}")]
    IncompleteCmap {
        key: String,
        expected: usize,
        found: usize,
    },
    #[error("Residue block does not start with a RESI record")]
    MissingResidueRecord,
}

#[derive(Debug, Error, PartialEq)]
pub enum RecordErrorKind {
    #[error("{directive} packs atom names in groups of {group}, but {found} name(s) were given")]
    UnpackedFields {
        directive: &'static str,
        group: usize,
        found: usize,
    },
    #[error("{record} record requires {expected} fields, found {found}")]
    FieldCount {
        record: &'static str,
        expected: &'static str,
        found: usize,
    },
    #[error("Invalid number for {field} (value: '{value}')")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{directive} record appears before any RESI record")]
    OutsideResidue { directive: &'static str },
    #[error("Data line appears before any parameter section keyword")]
    UnknownSection,
    #[error("CMAP grid overflow: expected {expected} values, found {found}")]
    CmapOverflow { expected: usize, found: usize },
}

impl ParseError {
    pub(crate) fn record(line: usize, content: &str, kind: RecordErrorKind) -> Self {
        Self::Record {
            line,
            content: content.trim_end().to_string(),
            kind,
        }
    }

    /// True for the missing/extra field class of errors.
    pub fn is_field_count_mismatch(&self) -> bool {
        matches!(
            self,
            Self::IncompleteCmap { .. }
                | Self::Record {
                    kind: RecordErrorKind::FieldCount { .. } | RecordErrorKind::CmapOverflow { .. },
                    ..
                }
        )
    }
}
