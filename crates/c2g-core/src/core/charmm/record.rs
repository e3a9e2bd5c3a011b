use super::error::{ParseError, RecordErrorKind};
use phf::phf_map;
use std::str::FromStr;

/// One physical line of a stream file and its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// Whitespace-separated fields with any `!` comment removed.
    pub fn fields(&self) -> Vec<&str> {
        strip_comment(&self.text).split_whitespace().collect()
    }

    /// Blank lines and `*` title lines carry no records.
    pub fn is_ignorable(&self) -> bool {
        let trimmed = self.text.trim_start();
        trimmed.is_empty() || trimmed.starts_with('*') || trimmed.starts_with('!')
    }

    pub(crate) fn error(&self, kind: RecordErrorKind) -> ParseError {
        ParseError::record(self.number, &self.text, kind)
    }

    pub(crate) fn parse_number<T: FromStr>(
        &self,
        value: &str,
        field: &'static str,
    ) -> Result<T, ParseError> {
        value.parse().map_err(|_| {
            self.error(RecordErrorKind::InvalidNumber {
                field,
                value: value.to_string(),
            })
        })
    }

    pub(crate) fn require_fields(
        &self,
        fields: &[&str],
        record: &'static str,
        min: usize,
        expected: &'static str,
    ) -> Result<(), ParseError> {
        if fields.len() < min {
            return Err(self.error(RecordErrorKind::FieldCount {
                record,
                expected,
                found: fields.len(),
            }));
        }
        Ok(())
    }
}

pub fn strip_comment(text: &str) -> &str {
    text.find('!').map_or(text, |pos| &text[..pos])
}

/// Residue topology directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Mass,
    Decl,
    Defa,
    Auto,
    Resi,
    Pres,
    Group,
    Atom,
    Bond,
    Double,
    Improper,
    Cmap,
    Donor,
    Acceptor,
    Ic,
}

static DIRECTIVES: phf::Map<&'static str, Directive> = phf_map! {
    "MASS" => Directive::Mass,
    "DECL" => Directive::Decl,
    "DEFA" => Directive::Defa,
    "AUTO" => Directive::Auto,
    "RESI" => Directive::Resi,
    "PRES" => Directive::Pres,
    "GROU" => Directive::Group,
    "ATOM" => Directive::Atom,
    "BOND" => Directive::Bond,
    "DOUB" => Directive::Double,
    "IMPR" => Directive::Improper,
    "CMAP" => Directive::Cmap,
    "DONO" => Directive::Donor,
    "ACCE" => Directive::Acceptor,
    "IC" => Directive::Ic,
};

impl Directive {
    /// Matches the first four characters of a record's first token (case-sensitive).
    pub fn from_token(token: &str) -> Option<Self> {
        DIRECTIVES.get(prefix4(token)).copied()
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Mass => "MASS",
            Self::Decl => "DECL",
            Self::Defa => "DEFA",
            Self::Auto => "AUTO",
            Self::Resi => "RESI",
            Self::Pres => "PRES",
            Self::Group => "GROUP",
            Self::Atom => "ATOM",
            Self::Bond => "BOND",
            Self::Double => "DOUBLE",
            Self::Improper => "IMPR",
            Self::Cmap => "CMAP",
            Self::Donor => "DONOR",
            Self::Acceptor => "ACCEPTOR",
            Self::Ic => "IC",
        }
    }
}

/// Parameter file sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Atoms,
    Bonds,
    Angles,
    Dihedrals,
    Impropers,
    Cmap,
    Nonbonded,
    HBond,
    NbFix,
}

static SECTIONS: phf::Map<&'static str, Section> = phf_map! {
    "ATOM" => Section::Atoms,
    "BOND" => Section::Bonds,
    "ANGL" => Section::Angles,
    "DIHE" => Section::Dihedrals,
    "IMPR" => Section::Impropers,
    "CMAP" => Section::Cmap,
    "NONB" => Section::Nonbonded,
    "HBON" => Section::HBond,
    "NBFI" => Section::NbFix,
};

impl Section {
    pub fn from_token(token: &str) -> Option<Self> {
        SECTIONS.get(prefix4(token)).copied()
    }
}

fn prefix4(token: &str) -> &str {
    token.get(..4).unwrap_or(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_comment_truncates_at_bang() {
        assert_eq!(strip_comment("ATOM C1 CG331 -0.27 ! methyl"), "ATOM C1 CG331 -0.27 ");
        assert_eq!(strip_comment("BOND C1 C2"), "BOND C1 C2");
        assert_eq!(strip_comment("! only comment"), "");
    }

    #[test]
    fn fields_ignore_comment_tokens() {
        let line = SourceLine::new(1, "BOND C1 C2  C2 O1 ! C3 C4");
        assert_eq!(line.fields(), vec!["BOND", "C1", "C2", "C2", "O1"]);
    }

    #[test]
    fn ignorable_lines_are_blank_title_or_comment() {
        assert!(SourceLine::new(1, "   ").is_ignorable());
        assert!(SourceLine::new(1, "* title").is_ignorable());
        assert!(SourceLine::new(1, "  ! note").is_ignorable());
        assert!(!SourceLine::new(1, "GROUP").is_ignorable());
    }

    #[test]
    fn directive_matches_on_first_four_characters() {
        assert_eq!(Directive::from_token("GROUP"), Some(Directive::Group));
        assert_eq!(Directive::from_token("DOUBLE"), Some(Directive::Double));
        assert_eq!(Directive::from_token("DONOR"), Some(Directive::Donor));
        assert_eq!(Directive::from_token("ACCEPTOR"), Some(Directive::Acceptor));
        assert_eq!(Directive::from_token("IMPH"), None);
        assert_eq!(Directive::from_token("IMPROPER"), Some(Directive::Improper));
        assert_eq!(Directive::from_token("IC"), Some(Directive::Ic));
    }

    #[test]
    fn directive_matching_is_case_sensitive() {
        assert_eq!(Directive::from_token("atom"), None);
        assert_eq!(Directive::from_token("Resi"), None);
    }

    #[test]
    fn section_keys_cover_parameter_sections() {
        assert_eq!(Section::from_token("BONDS"), Some(Section::Bonds));
        assert_eq!(Section::from_token("ANGLES"), Some(Section::Angles));
        assert_eq!(Section::from_token("DIHEDRALS"), Some(Section::Dihedrals));
        assert_eq!(Section::from_token("IMPROPERS"), Some(Section::Impropers));
        assert_eq!(Section::from_token("CMAP"), Some(Section::Cmap));
        assert_eq!(Section::from_token("NONBONDED"), Some(Section::Nonbonded));
        assert_eq!(Section::from_token("HBOND"), Some(Section::HBond));
        assert_eq!(Section::from_token("NBFIX"), Some(Section::NbFix));
        assert_eq!(Section::from_token("CG331"), None);
    }

    #[test]
    fn parse_number_reports_field_and_value() {
        let line = SourceLine::new(12, "ATOM C1 CG331 abc");
        let err = line.parse_number::<f64>("abc", "charge").unwrap_err();
        assert_eq!(
            err,
            ParseError::Record {
                line: 12,
                content: "ATOM C1 CG331 abc".to_string(),
                kind: RecordErrorKind::InvalidNumber {
                    field: "charge",
                    value: "abc".to_string()
                }
            }
        );
    }
}
