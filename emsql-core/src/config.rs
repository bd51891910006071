//! Per-session parser configuration.

use crate::{
    keyword::KeywordSet,
    mode::{CompatMode, ModeFlags},
};

/// How unquoted identifiers are canonicalized.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaseFolding {
    /// Fold to upper case (the default for regular databases).
    #[default]
    Upper,
    /// Fold to lower case.
    Lower,
    /// Keep identifiers as written.
    Preserve,
}

impl CaseFolding {
    /// Applies the folding policy to an identifier spelling.
    pub fn fold(self, value: &str) -> String {
        match self {
            Self::Upper => value.to_uppercase(),
            Self::Lower => value.to_lowercase(),
            Self::Preserve => value.to_owned(),
        }
    }
}

/// Which literals a statement may contain (SQL-injection hardening).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AllowLiterals {
    /// No literals allowed; everything must be a parameter.
    None,
    /// Numeric literals only.
    Numbers,
    /// All literals allowed.
    #[default]
    All,
}

/// The immutable configuration a parse runs under.
///
/// Built once per session from the compatibility mode plus the session
/// settings; handed to the lexer and parser by reference.
#[derive(Clone, Debug)]
pub struct ParserConfig {
    /// Identifier canonicalization policy.
    pub case_folding: CaseFolding,
    /// Selected compatibility mode.
    pub mode: CompatMode,
    /// Dialect switches expanded from `mode` (and session overrides).
    pub flags: ModeFlags,
    /// Accept historical malformed input (excess precision, obsolete syntax).
    pub quirks: bool,
    /// Literal policy.
    pub allow_literals: AllowLiterals,
    /// Whether a user function may shadow a compatibility builtin.
    pub allow_builtin_override: bool,
    /// Skip catalog-prefix validation on four-part names.
    pub ignore_catalogs: bool,
    /// `BINARY` behaves as `VARBINARY`.
    pub variable_binary: bool,
    /// Preserve the written join order instead of building a left-deep tree.
    pub force_join_order: bool,
    /// Reserved words downgraded to ordinary identifiers for this session.
    pub non_keywords: KeywordSet,
    /// Longest accepted identifier, in characters.
    pub max_identifier_length: usize,
    /// Largest accepted explicit parameter index.
    pub max_parameter_index: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::for_mode(CompatMode::Regular)
    }
}

impl ParserConfig {
    /// Configuration for a compatibility mode with all other settings at
    /// their defaults.
    pub fn for_mode(mode: CompatMode) -> Self {
        let flags = ModeFlags::for_mode(mode);
        Self {
            case_folding: if flags.backtick_quoted_names {
                CaseFolding::Lower
            } else {
                CaseFolding::Upper
            },
            mode,
            flags,
            quirks: false,
            allow_literals: AllowLiterals::All,
            allow_builtin_override: false,
            ignore_catalogs: false,
            variable_binary: false,
            force_join_order: false,
            non_keywords: KeywordSet::empty(),
            max_identifier_length: 256,
            max_parameter_index: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folding() {
        assert_eq!(CaseFolding::Upper.fold("tbl"), "TBL");
        assert_eq!(CaseFolding::Lower.fold("TBL"), "tbl");
        assert_eq!(CaseFolding::Preserve.fold("TbL"), "TbL");
    }

    #[test]
    fn mysql_defaults_to_lower_folding() {
        let config = ParserConfig::for_mode(CompatMode::MySql);
        assert_eq!(config.case_folding, CaseFolding::Lower);
        assert_eq!(
            ParserConfig::default().case_folding,
            CaseFolding::Upper
        );
    }
}
