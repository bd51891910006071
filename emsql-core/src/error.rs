//! The front-end error type.
//!
//! One error type with a numeric kind drawn from a closed set. The SQL text
//! is attached to every error before it escapes the front-end, so the
//! rendered message carries the statement and the byte offset of the last
//! parse position.

use core::fmt::Write as _;

use thiserror::Error;

/// The closed set of error kinds, each with a stable numeric code.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Syntax error without an expected-token list.
    SyntaxError,
    /// Syntax error with an expected-token list.
    SyntaxErrorExpected,
    /// Function or user aggregate not found.
    FunctionNotFound,
    /// Function alias already exists.
    FunctionAliasAlreadyExists,
    /// Schema not found.
    SchemaNotFound,
    /// Schema qualifier does not match the required schema.
    SchemaNameMustMatch,
    /// Table or view not found.
    TableOrViewNotFound,
    /// Table or view not found; candidate names are suggested.
    TableOrViewNotFoundWithCandidates,
    /// Table or view not found and the database has no tables at all.
    TableOrViewNotFoundDatabaseEmpty,
    /// Table or view already exists.
    TableOrViewAlreadyExists,
    /// Column not found.
    ColumnNotFound,
    /// Duplicate column name in a definition or list.
    DuplicateColumnName,
    /// Column must not be nullable (e.g. primary key member).
    ColumnMustNotBeNullable,
    /// Constant already exists.
    ConstantAlreadyExists,
    /// Database not found.
    DatabaseNotFound,
    /// Sequence not found.
    SequenceNotFound,
    /// View not found.
    ViewNotFound,
    /// Domain not found.
    DomainNotFound,
    /// Precision out of range for the type.
    InvalidValuePrecision,
    /// Scale out of range for the type.
    InvalidValueScale,
    /// Malformed hexadecimal string literal.
    HexStringWrong,
    /// Value cannot be converted to the target type.
    DataConversionError,
    /// Identifier exceeds the maximum length.
    NameTooLong,
    /// GROUP BY expression is not in the result list.
    GroupByNotInTheResult,
    /// `?` and `?N` parameters mixed in one statement.
    CannotMixIndexedAndUnindexedParams,
    /// Explicit parameter index is out of range.
    InvalidParameterIndex,
    /// Column count does not match.
    ColumnCountDoesNotMatch,
    /// Roles and rights cannot be mixed in one GRANT/REVOKE.
    RolesAndRightCannotBeMixed,
    /// Literals are disabled for this session.
    LiteralsAreNotAllowed,
    /// The same expression must be used on both sides.
    IdenticalExpressionsShouldBeUsed,
    /// Unknown data type name.
    UnknownDataType,
    /// Unknown compatibility mode.
    UnknownMode,
    /// Recognized but unsupported construct.
    UnsupportedFeature,
    /// `WITH TIES` requires `ORDER BY`.
    WithTiesWithoutOrderBy,
    /// Malformed date/time constant.
    InvalidDatetimeConstant,
}

impl ErrorKind {
    /// Stable numeric code for the kind.
    pub fn code(self) -> u32 {
        match self {
            Self::SyntaxError => 42000,
            Self::SyntaxErrorExpected => 42001,
            Self::SchemaNotFound => 90079,
            Self::SchemaNameMustMatch => 90080,
            Self::TableOrViewNotFound => 42102,
            Self::TableOrViewNotFoundWithCandidates => 42103,
            Self::TableOrViewNotFoundDatabaseEmpty => 42104,
            Self::TableOrViewAlreadyExists => 42101,
            Self::ColumnNotFound => 42122,
            Self::DuplicateColumnName => 42121,
            Self::ColumnMustNotBeNullable => 90023,
            Self::ConstantAlreadyExists => 90114,
            Self::DatabaseNotFound => 90013,
            Self::SequenceNotFound => 90036,
            Self::ViewNotFound => 90037,
            Self::DomainNotFound => 90120,
            Self::FunctionNotFound => 90022,
            Self::FunctionAliasAlreadyExists => 90076,
            Self::InvalidValuePrecision => 90150,
            Self::InvalidValueScale => 90151,
            Self::HexStringWrong => 90004,
            Self::DataConversionError => 22018,
            Self::NameTooLong => 90129,
            Self::GroupByNotInTheResult => 90016,
            Self::CannotMixIndexedAndUnindexedParams => 90123,
            Self::InvalidParameterIndex => 90124,
            Self::ColumnCountDoesNotMatch => 21002,
            Self::RolesAndRightCannotBeMixed => 90072,
            Self::LiteralsAreNotAllowed => 90116,
            Self::IdenticalExpressionsShouldBeUsed => 90145,
            Self::UnknownDataType => 50004,
            Self::UnknownMode => 90088,
            Self::UnsupportedFeature => 50100,
            Self::WithTiesWithoutOrderBy => 90146,
            Self::InvalidDatetimeConstant => 22007,
        }
    }
}

/// The error produced by any front-end operation.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("{message}")]
pub struct FrontendError {
    /// The error kind.
    pub kind: ErrorKind,
    /// Fully rendered message, including the attached SQL text if any.
    pub message: String,
    /// The SQL text the error occurred in, once attached.
    pub sql: Option<String>,
    /// Byte offset of the last parse position, for lexical and grammar errors.
    pub offset: Option<usize>,
    /// Expected-token list, for [`ErrorKind::SyntaxErrorExpected`].
    pub expected: Vec<String>,
}

impl FrontendError {
    /// A new error without positional context.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            sql: None,
            offset: None,
            expected: Vec::new(),
        }
    }

    /// A syntax error at the given byte offset.
    pub fn syntax(offset: usize, message: impl Into<String>) -> Self {
        let mut error = Self::new(ErrorKind::SyntaxError, message);
        error.offset = Some(offset);
        error
    }

    /// A syntax error with the accumulated expected-token list.
    pub fn syntax_expected(offset: usize, expected: Vec<String>) -> Self {
        let mut message = String::from("Syntax error");
        if !expected.is_empty() {
            message.push_str("; expected ");
            message.push_str(&expected.join(", "));
        }
        Self {
            kind: ErrorKind::SyntaxErrorExpected,
            message,
            sql: None,
            offset: Some(offset),
            expected,
        }
    }

    /// Attaches the SQL text, re-rendering the message. Idempotent.
    pub fn with_sql(mut self, sql: &str) -> Self {
        if self.sql.is_none() {
            self.sql = Some(sql.to_owned());
            let _ = write!(self.message, " in SQL statement \"{}\"", sql);
            if let Some(offset) = self.offset {
                let _ = write!(self.message, " at position {}", offset);
            }
        }
        self
    }

    /// The stable numeric code of the error kind.
    pub fn code(&self) -> u32 {
        self.kind.code()
    }
}

/// Shorthand result type used throughout the front-end.
pub type Result<T, E = FrontendError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_sql_is_idempotent() {
        let error = FrontendError::syntax(7, "Syntax error")
            .with_sql("SELECT *")
            .with_sql("SELECT 1");
        assert_eq!(error.sql.as_deref(), Some("SELECT *"));
        assert!(error.to_string().contains("SELECT *"));
        assert!(error.to_string().contains("position 7"));
    }

    #[test]
    fn expected_list_renders() {
        let error = FrontendError::syntax_expected(11, vec!["<identifier>".into(), "(".into()]);
        assert_eq!(error.kind, ErrorKind::SyntaxErrorExpected);
        assert!(error.to_string().contains("<identifier>, ("));
    }

    #[test]
    fn codes_are_distinct() {
        let kinds = [
            ErrorKind::SyntaxError,
            ErrorKind::SyntaxErrorExpected,
            ErrorKind::TableOrViewNotFound,
            ErrorKind::DuplicateColumnName,
            ErrorKind::CannotMixIndexedAndUnindexedParams,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.code(), b.code());
            }
        }
    }
}
