//! Session, transaction and administration statements.

use core::fmt;

use crate::{
    expr::Expr,
    ident::{Ident, ObjectName},
    stmt::Statement,
    utils::{display_comma_separated, escape_single_quote_string},
};

/// `SET name value` (session or database setting).
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetStmt {
    /// The canonical setting name.
    pub name: Ident,
    /// The values; settings like SCHEMA_SEARCH_PATH take several.
    pub values: Vec<Expr>,
}

impl fmt::Display for SetStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SET {}", self.name)?;
        if !self.values.is_empty() {
            write!(f, " {}", display_comma_separated(&self.values))?;
        }
        Ok(())
    }
}

/// `USE schema`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseStmt {
    pub schema: Ident,
}

impl fmt::Display for UseStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "USE {}", self.schema)
    }
}

/// `SHOW ...` compatibility statements; each rewrites to a canonical
/// catalog query during prepare.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShowStmt {
    /// `SHOW TABLES [FROM schema]`.
    Tables {
        /// Schema filter.
        from: Option<Ident>,
    },
    /// `SHOW COLUMNS FROM table`.
    Columns {
        /// The table.
        table: ObjectName,
    },
    /// `SHOW DATABASES` / `SHOW SCHEMAS`.
    Schemas,
    /// `SHOW setting`.
    Setting(Ident),
}

impl fmt::Display for ShowStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tables { from } => {
                f.write_str("SHOW TABLES")?;
                if let Some(schema) = from {
                    write!(f, " FROM {}", schema)?;
                }
                Ok(())
            }
            Self::Columns { table } => write!(f, "SHOW COLUMNS FROM {}", table),
            Self::Schemas => f.write_str("SHOW SCHEMAS"),
            Self::Setting(name) => write!(f, "SHOW {}", name),
        }
    }
}

/// `HELP [topic]`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HelpStmt {
    pub topic: Vec<String>,
}

impl fmt::Display for HelpStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HELP")?;
        for word in &self.topic {
            write!(f, " {}", word)?;
        }
        Ok(())
    }
}

/// `CALL expr`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallStmt {
    pub expr: Expr,
}

impl fmt::Display for CallStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CALL {}", self.expr)
    }
}

/// `EXPLAIN [ANALYZE | PLAN FOR] statement`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplainStmt {
    pub analyze: bool,
    pub statement: Box<Statement>,
}

impl fmt::Display for ExplainStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EXPLAIN {}{}",
            if self.analyze { "ANALYZE " } else { "" },
            self.statement
        )
    }
}

/// `PREPARE name AS statement`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrepareStmt {
    pub name: Ident,
    pub statement: Box<Statement>,
}

impl fmt::Display for PrepareStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PREPARE {} AS {}", self.name, self.statement)
    }
}

/// `EXECUTE name [(args)]`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecuteStmt {
    pub name: Ident,
    pub args: Vec<Expr>,
}

impl fmt::Display for ExecuteStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EXECUTE {}", self.name)?;
        if !self.args.is_empty() {
            write!(f, "({})", display_comma_separated(&self.args))?;
        }
        Ok(())
    }
}

/// `DEALLOCATE [PREPARE] name`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeallocateStmt {
    pub name: Ident,
}

impl fmt::Display for DeallocateStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DEALLOCATE {}", self.name)
    }
}

/// Transaction-control statements.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransactionStmt {
    /// `BEGIN [TRANSACTION]` / `START TRANSACTION`.
    Begin,
    /// `COMMIT [WORK]`.
    Commit,
    /// `ROLLBACK [WORK]`.
    Rollback,
    /// `SAVEPOINT name`.
    Savepoint(Ident),
    /// `RELEASE SAVEPOINT name`.
    ReleaseSavepoint(Ident),
    /// `ROLLBACK TO SAVEPOINT name`.
    RollbackToSavepoint(Ident),
}

impl fmt::Display for TransactionStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin => f.write_str("BEGIN"),
            Self::Commit => f.write_str("COMMIT"),
            Self::Rollback => f.write_str("ROLLBACK"),
            Self::Savepoint(name) => write!(f, "SAVEPOINT {}", name),
            Self::ReleaseSavepoint(name) => write!(f, "RELEASE SAVEPOINT {}", name),
            Self::RollbackToSavepoint(name) => write!(f, "ROLLBACK TO SAVEPOINT {}", name),
        }
    }
}

/// `SHUTDOWN [IMMEDIATELY | COMPACT | DEFRAG]`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShutdownMode {
    /// Plain shutdown.
    Normal,
    /// SHUTDOWN IMMEDIATELY
    Immediately,
    /// SHUTDOWN COMPACT
    Compact,
    /// SHUTDOWN DEFRAG
    Defrag,
}

impl fmt::Display for ShutdownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("SHUTDOWN"),
            Self::Immediately => f.write_str("SHUTDOWN IMMEDIATELY"),
            Self::Compact => f.write_str("SHUTDOWN COMPACT"),
            Self::Defrag => f.write_str("SHUTDOWN DEFRAG"),
        }
    }
}

/// `CHECKPOINT [SYNC]`.
#[doc(hidden)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckpointStmt {
    pub sync: bool,
}

impl fmt::Display for CheckpointStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sync {
            f.write_str("CHECKPOINT SYNC")
        } else {
            f.write_str("CHECKPOINT")
        }
    }
}

/// `RUNSCRIPT FROM 'file'`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunScriptStmt {
    pub from: String,
}

impl fmt::Display for RunScriptStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RUNSCRIPT FROM '{}'", escape_single_quote_string(&self.from))
    }
}

/// `SCRIPT [TO 'file']`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptStmt {
    pub to: Option<String>,
}

impl fmt::Display for ScriptStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SCRIPT")?;
        if let Some(to) = &self.to {
            write!(f, " TO '{}'", escape_single_quote_string(to))?;
        }
        Ok(())
    }
}

/// `ANALYZE [TABLE name] [SAMPLE_SIZE n]`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalyzeStmt {
    pub table: Option<ObjectName>,
    pub sample_size: Option<i64>,
}

impl fmt::Display for AnalyzeStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ANALYZE")?;
        if let Some(table) = &self.table {
            write!(f, " TABLE {}", table)?;
        }
        if let Some(sample) = self.sample_size {
            write!(f, " SAMPLE_SIZE {}", sample)?;
        }
        Ok(())
    }
}

/// The rights a GRANT/REVOKE can carry; roles and rights must not be mixed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Right {
    /// SELECT
    Select,
    /// INSERT
    Insert,
    /// UPDATE
    Update,
    /// DELETE
    Delete,
    /// ALL [PRIVILEGES]
    All,
}

impl fmt::Display for Right {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::All => "ALL",
        })
    }
}

/// `GRANT / REVOKE {rights ON object | role} {TO | FROM} grantee`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrantRevokeStmt {
    pub grant: bool,
    pub rights: Vec<Right>,
    pub roles: Vec<Ident>,
    pub on: Option<ObjectName>,
    pub grantee: Ident,
}

impl fmt::Display for GrantRevokeStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.grant { "GRANT " } else { "REVOKE " })?;
        if !self.rights.is_empty() {
            write!(f, "{}", display_comma_separated(&self.rights))?;
        } else {
            write!(f, "{}", display_comma_separated(&self.roles))?;
        }
        if let Some(on) = &self.on {
            write!(f, " ON {}", on)?;
        }
        write!(
            f,
            " {} {}",
            if self.grant { "TO" } else { "FROM" },
            self.grantee
        )
    }
}

/// `ALTER USER name ...`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlterUserStmt {
    pub name: Ident,
    pub action: AlterUserAction,
}

impl fmt::Display for AlterUserStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER USER {} {}", self.name, self.action)
    }
}

/// One ALTER USER action.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlterUserAction {
    /// `SET PASSWORD 'password'`.
    SetPassword(String),
    /// `RENAME TO name`.
    RenameTo(Ident),
    /// `ADMIN TRUE/FALSE`.
    Admin(bool),
}

impl fmt::Display for AlterUserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetPassword(password) => {
                write!(f, "SET PASSWORD '{}'", escape_single_quote_string(password))
            }
            Self::RenameTo(name) => write!(f, "RENAME TO {}", name),
            Self::Admin(admin) => write!(f, "ADMIN {}", if *admin { "TRUE" } else { "FALSE" }),
        }
    }
}
