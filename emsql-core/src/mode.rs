//! Compatibility modes and their dialect flag sets.
//!
//! A session selects one [`CompatMode`]; the mode expands to an immutable
//! [`ModeFlags`] value that the lexer and parser consult. The recognized
//! flags form a closed set; adding a dialect means adding a constructor
//! here, not sprinkling new booleans through the grammar.

use core::fmt;
use core::str::FromStr;

/// The SQL dialect a session parses under.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompatMode {
    /// The default, strict dialect.
    #[default]
    Regular,
    /// IBM DB2.
    Db2,
    /// Apache Derby.
    Derby,
    /// HSQLDB.
    Hsqldb,
    /// Microsoft SQL Server.
    MsSqlServer,
    /// MySQL / MariaDB.
    MySql,
    /// Oracle.
    Oracle,
    /// PostgreSQL.
    PostgreSql,
}

impl CompatMode {
    /// Canonical mode name as used by `SET MODE`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "REGULAR",
            Self::Db2 => "DB2",
            Self::Derby => "DERBY",
            Self::Hsqldb => "HSQLDB",
            Self::MsSqlServer => "MSSQLSERVER",
            Self::MySql => "MYSQL",
            Self::Oracle => "ORACLE",
            Self::PostgreSql => "POSTGRESQL",
        }
    }
}

impl fmt::Display for CompatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompatMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "REGULAR" => Ok(Self::Regular),
            "DB2" => Ok(Self::Db2),
            "DERBY" => Ok(Self::Derby),
            "HSQLDB" => Ok(Self::Hsqldb),
            "MSSQLSERVER" | "SQLSERVER" => Ok(Self::MsSqlServer),
            "MYSQL" | "MARIADB" => Ok(Self::MySql),
            "ORACLE" => Ok(Self::Oracle),
            "POSTGRESQL" | "POSTGRES" => Ok(Self::PostgreSql),
            _ => Err(()),
        }
    }
}

/// The closed set of dialect switches derived from a [`CompatMode`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ModeFlags {
    // -- tokenizer level --
    /// `[name]` lexes as a quoted identifier (MS SQL Server).
    pub square_bracket_quoted_names: bool,
    /// `#` is a valid identifier part (MS SQL Server temp tables).
    pub pound_in_identifiers: bool,
    /// `0x...` literals lex as binary strings instead of numbers.
    pub zero_ex_literals_are_binary_strings: bool,
    /// `MINUS` is accepted as a synonym of `EXCEPT`.
    pub minus_is_except: bool,
    /// `LIMIT` is treated as a keyword.
    pub limit: bool,
    /// Backticks quote identifiers and the quoted value is case-folded (MySQL).
    pub backtick_quoted_names: bool,
    /// Plain `'...'` string literals process backslash escapes
    /// (PostgreSQL). The legacy `E'...'` form is recognized in every mode
    /// and decoded by the parser.
    pub backslash_escapes: bool,

    // -- parser level --
    /// `IDENTITY` is accepted as a column type / clause (Oracle, MS SQL).
    pub identity_keyword: bool,
    /// `AUTO_INCREMENT` column clause (MySQL).
    pub auto_increment: bool,
    /// `INSERT ... ON DUPLICATE KEY UPDATE` (MySQL).
    pub on_duplicate_key_update: bool,
    /// `REPLACE INTO` (MySQL).
    pub replace_into: bool,
    /// Trailing `WITH {RR|RS|CS|UR}` isolation clause on queries (DB2).
    pub isolation_clause: bool,
    /// `EXEC` / `EXECUTE` starts a stored-procedure call (MS SQL Server).
    pub exec_is_procedure_call: bool,
    /// `PREPARE name AS ...` is disabled (MS SQL Server).
    pub prepare_disabled: bool,
    /// `expr::type` postfix cast (PostgreSQL).
    pub double_colon_cast: bool,
    /// `CHARACTER SET` / `COLLATE` clauses on columns parse and are ignored.
    pub charset_clause_noop: bool,
    /// `UNSIGNED` after integer types parses and is ignored (MySQL).
    pub unsigned_keyword_noop: bool,
    /// `(n)` display width on integer types parses and is ignored (MySQL).
    pub integer_precision_noop: bool,
    /// Inline `KEY` / `INDEX` definitions inside CREATE TABLE (MySQL).
    pub key_and_index_constraints: bool,
    /// `LIMIT m, n` comma form (MySQL).
    pub limit_comma_form: bool,
    /// `CONVERT(value, type)` parameter order instead of `CONVERT(type, value)` (Oracle).
    pub swapped_convert_arguments: bool,
    /// `ORDER` / `NOORDER` on sequences parses and is ignored (Oracle).
    pub sequence_order_noop: bool,
    /// `CREATE=TRUE` connection-style setting is a no-op (Derby).
    pub create_true_noop: bool,
    /// `SET LOGSIZE` is an alias of `SET MAX_LOG_SIZE` (HSQLDB).
    pub logsize_alias: bool,
    /// `SHOW TABLES` / `SHOW COLUMNS` / `SHOW DATABASES` rewrites (MySQL / PostgreSQL).
    pub show_compat: bool,
    /// `seq.NEXTVAL` / `seq.CURRVAL` pseudo-columns (Oracle, PostgreSQL).
    pub next_curr_val_pseudo_columns: bool,
    /// Unparenthesized `NUMBER` maps to DECFLOAT(40) (Oracle).
    pub number_is_decfloat: bool,
    /// `CHANGE` / `MODIFY` column in ALTER TABLE (MySQL / Oracle).
    pub alter_change_column: bool,
    /// Not-null `ENABLE|DISABLE|VALIDATE|NOVALIDATE` modifiers (Oracle).
    pub constraint_state_modifiers: bool,
    /// `ON CONFLICT DO NOTHING` (PostgreSQL).
    pub on_conflict_do_nothing: bool,
}

impl ModeFlags {
    /// Flags for the given mode.
    pub fn for_mode(mode: CompatMode) -> Self {
        let mut flags = Self {
            limit: true,
            double_colon_cast: true,
            ..Self::default()
        };
        match mode {
            CompatMode::Regular => {}
            CompatMode::Db2 => {
                flags.isolation_clause = true;
            }
            CompatMode::Derby => {
                flags.create_true_noop = true;
            }
            CompatMode::Hsqldb => {
                flags.logsize_alias = true;
            }
            CompatMode::MsSqlServer => {
                flags.square_bracket_quoted_names = true;
                flags.pound_in_identifiers = true;
                flags.identity_keyword = true;
                flags.exec_is_procedure_call = true;
                flags.prepare_disabled = true;
                flags.swapped_convert_arguments = true;
            }
            CompatMode::MySql => {
                flags.backtick_quoted_names = true;
                flags.zero_ex_literals_are_binary_strings = true;
                flags.auto_increment = true;
                flags.on_duplicate_key_update = true;
                flags.replace_into = true;
                flags.charset_clause_noop = true;
                flags.unsigned_keyword_noop = true;
                flags.integer_precision_noop = true;
                flags.key_and_index_constraints = true;
                flags.limit_comma_form = true;
                flags.show_compat = true;
                flags.alter_change_column = true;
                flags.on_conflict_do_nothing = true;
            }
            CompatMode::Oracle => {
                flags.identity_keyword = true;
                flags.swapped_convert_arguments = true;
                flags.sequence_order_noop = true;
                flags.next_curr_val_pseudo_columns = true;
                flags.number_is_decfloat = true;
                flags.alter_change_column = true;
                flags.constraint_state_modifiers = true;
                flags.minus_is_except = true;
            }
            CompatMode::PostgreSql => {
                flags.minus_is_except = true;
                flags.backslash_escapes = true;
                flags.show_compat = true;
                flags.next_curr_val_pseudo_columns = true;
                flags.on_conflict_do_nothing = true;
            }
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_name_round_trip() {
        for mode in [
            CompatMode::Regular,
            CompatMode::Db2,
            CompatMode::Derby,
            CompatMode::Hsqldb,
            CompatMode::MsSqlServer,
            CompatMode::MySql,
            CompatMode::Oracle,
            CompatMode::PostgreSql,
        ] {
            assert_eq!(mode.as_str().parse::<CompatMode>(), Ok(mode));
        }
        assert!("NO_SUCH_MODE".parse::<CompatMode>().is_err());
    }

    #[test]
    fn mode_flags() {
        let regular = ModeFlags::for_mode(CompatMode::Regular);
        assert!(regular.limit);
        assert!(!regular.square_bracket_quoted_names);

        let mssql = ModeFlags::for_mode(CompatMode::MsSqlServer);
        assert!(mssql.square_bracket_quoted_names);
        assert!(mssql.prepare_disabled);

        let mysql = ModeFlags::for_mode(CompatMode::MySql);
        assert!(mysql.backtick_quoted_names);
        assert!(mysql.limit_comma_form);

        let pg = ModeFlags::for_mode(CompatMode::PostgreSql);
        assert!(pg.minus_is_except);
        assert!(pg.backslash_escapes);
    }
}
