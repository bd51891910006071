//! Data-definition statements.

use core::fmt;

use crate::{
    data_type::DataType,
    expr::Expr,
    ident::{Ident, ObjectName},
    query::{Query, SortSpec},
    utils::{display_comma_separated, escape_single_quote_string},
};

/// `CREATE [TEMPORARY] TABLE ...`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateTableStmt {
    /// Temporary table.
    pub temporary: bool,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// The table name.
    pub name: ObjectName,
    /// Column definitions.
    pub columns: Vec<ColumnDef>,
    /// Table-level constraints.
    pub constraints: Vec<TableConstraintDef>,
    /// `AS query`.
    pub as_query: Option<Box<Query>>,
    /// `ENGINE name` clause, carried verbatim.
    pub engine: Option<Ident>,
    /// `ON COMMIT` action for temporaries.
    pub on_commit: Option<OnCommit>,
}

impl fmt::Display for CreateTableStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE {}TABLE {}{}",
            if self.temporary { "TEMPORARY " } else { "" },
            if self.if_not_exists {
                "IF NOT EXISTS "
            } else {
                ""
            },
            self.name
        )?;
        if !self.columns.is_empty() || !self.constraints.is_empty() {
            f.write_str("(")?;
            let mut first = true;
            for column in &self.columns {
                if !first {
                    f.write_str(", ")?;
                }
                first = false;
                write!(f, "{}", column)?;
            }
            for constraint in &self.constraints {
                if !first {
                    f.write_str(", ")?;
                }
                first = false;
                write!(f, "{}", constraint)?;
            }
            f.write_str(")")?;
        }
        if let Some(engine) = &self.engine {
            write!(f, " ENGINE {}", engine)?;
        }
        if let Some(on_commit) = &self.on_commit {
            write!(f, " {}", on_commit)?;
        }
        if let Some(query) = &self.as_query {
            write!(f, " AS {}", query)?;
        }
        Ok(())
    }
}

/// `ON COMMIT` behavior of a temporary table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OnCommit {
    /// Drop the table.
    Drop,
    /// Delete all rows.
    DeleteRows,
}

impl fmt::Display for OnCommit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Drop => "ON COMMIT DROP",
            Self::DeleteRows => "ON COMMIT DELETE ROWS",
        })
    }
}

/// One column definition.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnDef {
    /// The column name.
    pub name: Ident,
    /// The type; absent in `CREATE TABLE ... AS` columns.
    pub data_type: Option<DataType>,
    /// `DEFAULT expr`.
    pub default: Option<Box<Expr>>,
    /// `ON UPDATE expr`.
    pub on_update: Option<Box<Expr>>,
    /// Identity options, when the column is an identity column.
    pub identity: Option<IdentityOptions>,
    /// `GENERATED ALWAYS AS (expr)` computed column.
    pub generated_as: Option<Box<Expr>>,
    /// Per-column constraints in written order.
    pub constraints: Vec<ColumnConstraintDef>,
}

impl ColumnDef {
    /// A plain column of the given type.
    pub fn new(name: Ident, data_type: DataType) -> Self {
        Self {
            name,
            data_type: Some(data_type),
            default: None,
            on_update: None,
            identity: None,
            generated_as: None,
            constraints: Vec::new(),
        }
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(data_type) = &self.data_type {
            write!(f, " {}", data_type)?;
        }
        if let Some(generated) = &self.generated_as {
            write!(f, " GENERATED ALWAYS AS ({})", generated)?;
        }
        if let Some(identity) = &self.identity {
            write!(f, " {}", identity)?;
        }
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {}", default)?;
        }
        if let Some(on_update) = &self.on_update {
            write!(f, " ON UPDATE {}", on_update)?;
        }
        for constraint in &self.constraints {
            write!(f, " {}", constraint)?;
        }
        Ok(())
    }
}

/// Identity column options, shared with sequences.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdentityOptions {
    /// `GENERATED ALWAYS` (true) or `GENERATED BY DEFAULT` (false).
    pub always: bool,
    /// Sequence options.
    pub sequence: SequenceOptions,
}

impl fmt::Display for IdentityOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GENERATED {} AS IDENTITY",
            if self.always { "ALWAYS" } else { "BY DEFAULT" }
        )?;
        let options = self.sequence.to_string();
        if !options.is_empty() {
            write!(f, " ({})", options.trim())?;
        }
        Ok(())
    }
}

/// Sequence options for CREATE/ALTER SEQUENCE and identity columns.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceOptions {
    /// `START WITH n`.
    pub start_with: Option<i64>,
    /// `INCREMENT BY n`.
    pub increment_by: Option<i64>,
    /// `MINVALUE n` / `NO MINVALUE` (Some(None)).
    pub min_value: Option<Option<i64>>,
    /// `MAXVALUE n` / `NO MAXVALUE` (Some(None)).
    pub max_value: Option<Option<i64>>,
    /// `CYCLE` / `NO CYCLE`.
    pub cycle: Option<bool>,
    /// `CACHE n` / `NO CACHE` (Some(None)).
    pub cache: Option<Option<i64>>,
    /// `DATA TYPE type`.
    pub data_type: Option<DataType>,
}

impl fmt::Display for SequenceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut sep = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            Ok(())
        };
        if let Some(data_type) = &self.data_type {
            sep(f)?;
            write!(f, "DATA TYPE {}", data_type)?;
        }
        if let Some(start) = self.start_with {
            sep(f)?;
            write!(f, "START WITH {}", start)?;
        }
        if let Some(increment) = self.increment_by {
            sep(f)?;
            write!(f, "INCREMENT BY {}", increment)?;
        }
        match self.min_value {
            Some(Some(min)) => {
                sep(f)?;
                write!(f, "MINVALUE {}", min)?;
            }
            Some(None) => {
                sep(f)?;
                f.write_str("NO MINVALUE")?;
            }
            None => {}
        }
        match self.max_value {
            Some(Some(max)) => {
                sep(f)?;
                write!(f, "MAXVALUE {}", max)?;
            }
            Some(None) => {
                sep(f)?;
                f.write_str("NO MAXVALUE")?;
            }
            None => {}
        }
        match self.cycle {
            Some(true) => {
                sep(f)?;
                f.write_str("CYCLE")?;
            }
            Some(false) => {
                sep(f)?;
                f.write_str("NO CYCLE")?;
            }
            None => {}
        }
        match self.cache {
            Some(Some(cache)) => {
                sep(f)?;
                write!(f, "CACHE {}", cache)?;
            }
            Some(None) => {
                sep(f)?;
                f.write_str("NO CACHE")?;
            }
            None => {}
        }
        Ok(())
    }
}

/// An optionally named per-column constraint.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnConstraintDef {
    pub name: Option<Ident>,
    pub constraint: ColumnConstraint,
}

impl ColumnConstraintDef {
    /// An unnamed constraint.
    pub fn unnamed(constraint: ColumnConstraint) -> Self {
        Self {
            name: None,
            constraint,
        }
    }
}

impl fmt::Display for ColumnConstraintDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {} ", name)?;
        }
        write!(f, "{}", self.constraint)
    }
}

/// A per-column constraint.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnConstraint {
    /// `PRIMARY KEY [HASH]`.
    #[doc(hidden)]
    PrimaryKey { hash: bool },
    /// `UNIQUE`.
    Unique,
    /// `NOT NULL`.
    NotNull,
    /// `NULL`.
    Null,
    /// `CHECK (expr)`.
    Check(Box<Expr>),
    /// `REFERENCES table [(cols)] [ON DELETE ...] [ON UPDATE ...]`.
    References(ForeignKeyRef),
    /// `AUTO_INCREMENT` (MySQL).
    AutoIncrement,
}

impl fmt::Display for ColumnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryKey { hash } => {
                f.write_str("PRIMARY KEY")?;
                if *hash {
                    f.write_str(" HASH")?;
                }
                Ok(())
            }
            Self::Unique => f.write_str("UNIQUE"),
            Self::NotNull => f.write_str("NOT NULL"),
            Self::Null => f.write_str("NULL"),
            Self::Check(expr) => write!(f, "CHECK ({})", expr),
            Self::References(fk) => write!(f, "REFERENCES {}", fk),
            Self::AutoIncrement => f.write_str("AUTO_INCREMENT"),
        }
    }
}

/// A named table-level constraint.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableConstraintDef {
    pub name: Option<Ident>,
    pub constraint: TableConstraint,
}

impl fmt::Display for TableConstraintDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {} ", name)?;
        }
        write!(f, "{}", self.constraint)
    }
}

/// A table-level constraint.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableConstraint {
    /// `PRIMARY KEY (cols)`.
    PrimaryKey(Vec<Ident>),
    /// `UNIQUE (cols)`.
    Unique(Vec<Ident>),
    /// `FOREIGN KEY (cols) REFERENCES ...`.
    #[doc(hidden)]
    ForeignKey {
        columns: Vec<Ident>,
        references: ForeignKeyRef,
    },
    /// `CHECK (expr)`.
    Check(Box<Expr>),
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryKey(columns) => {
                write!(f, "PRIMARY KEY ({})", display_comma_separated(columns))
            }
            Self::Unique(columns) => write!(f, "UNIQUE ({})", display_comma_separated(columns)),
            Self::ForeignKey {
                columns,
                references,
            } => write!(
                f,
                "FOREIGN KEY ({}) REFERENCES {}",
                display_comma_separated(columns),
                references
            ),
            Self::Check(expr) => write!(f, "CHECK ({})", expr),
        }
    }
}

/// The referenced side of a foreign key.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForeignKeyRef {
    pub table: ObjectName,
    pub columns: Vec<Ident>,
    pub on_delete: Option<ReferentialAction>,
    pub on_update: Option<ReferentialAction>,
}

impl fmt::Display for ForeignKeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table)?;
        if !self.columns.is_empty() {
            write!(f, "({})", display_comma_separated(&self.columns))?;
        }
        if let Some(action) = &self.on_delete {
            write!(f, " ON DELETE {}", action)?;
        }
        if let Some(action) = &self.on_update {
            write!(f, " ON UPDATE {}", action)?;
        }
        Ok(())
    }
}

/// Referential actions.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferentialAction {
    /// CASCADE
    Cascade,
    /// RESTRICT
    Restrict,
    /// NO ACTION
    NoAction,
    /// SET NULL
    SetNull,
    /// SET DEFAULT
    SetDefault,
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        })
    }
}

/// `ALTER TABLE ...`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlterTableStmt {
    pub if_exists: bool,
    pub name: ObjectName,
    pub action: AlterTableAction,
}

impl fmt::Display for AlterTableStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ALTER TABLE {}{} {}",
            if self.if_exists { "IF EXISTS " } else { "" },
            self.name,
            self.action
        )
    }
}

/// One ALTER TABLE action.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlterTableAction {
    /// `ADD [COLUMN] def`.
    AddColumn(ColumnDef),
    /// `DROP COLUMN name`, or the parenthesized multi-column form.
    DropColumn(Vec<Ident>),
    /// `ADD constraint`.
    AddConstraint(TableConstraintDef),
    /// `DROP CONSTRAINT name`.
    DropConstraint(Ident),
    /// `RENAME TO name`.
    RenameTo(Ident),
    /// `RENAME COLUMN from TO to`.
    #[doc(hidden)]
    RenameColumn { from: Ident, to: Ident },
    /// `ALTER COLUMN name SET DEFAULT expr`.
    #[doc(hidden)]
    SetColumnDefault { column: Ident, default: Box<Expr> },
    /// `ALTER COLUMN name DROP DEFAULT`.
    DropColumnDefault(Ident),
    /// `ALTER COLUMN name SET [NOT] NULL`.
    #[doc(hidden)]
    SetColumnNullable { column: Ident, nullable: bool },
    /// `ALTER COLUMN name data_type` / MySQL `MODIFY` / `CHANGE`.
    #[doc(hidden)]
    ChangeColumn { column: Ident, def: ColumnDef },
}

impl fmt::Display for AlterTableAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddColumn(def) => write!(f, "ADD COLUMN {}", def),
            Self::DropColumn(names) => {
                write!(f, "DROP COLUMN {}", display_comma_separated(names))
            }
            Self::AddConstraint(def) => write!(f, "ADD {}", def),
            Self::DropConstraint(name) => write!(f, "DROP CONSTRAINT {}", name),
            Self::RenameTo(name) => write!(f, "RENAME TO {}", name),
            Self::RenameColumn { from, to } => write!(f, "RENAME COLUMN {} TO {}", from, to),
            Self::SetColumnDefault { column, default } => {
                write!(f, "ALTER COLUMN {} SET DEFAULT {}", column, default)
            }
            Self::DropColumnDefault(column) => {
                write!(f, "ALTER COLUMN {} DROP DEFAULT", column)
            }
            Self::SetColumnNullable { column, nullable } => write!(
                f,
                "ALTER COLUMN {} SET {}NULL",
                column,
                if *nullable { "" } else { "NOT " }
            ),
            Self::ChangeColumn { column, def } => {
                write!(f, "ALTER COLUMN {} {}", column, def)
            }
        }
    }
}

/// `CREATE [OR REPLACE] VIEW ...`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateViewStmt {
    pub or_replace: bool,
    pub force: bool,
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub columns: Vec<Ident>,
    pub query: Box<Query>,
}

impl fmt::Display for CreateViewStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE {}{}VIEW {}{}",
            if self.or_replace { "OR REPLACE " } else { "" },
            if self.force { "FORCE " } else { "" },
            if self.if_not_exists {
                "IF NOT EXISTS "
            } else {
                ""
            },
            self.name
        )?;
        if !self.columns.is_empty() {
            write!(f, "({})", display_comma_separated(&self.columns))?;
        }
        write!(f, " AS {}", self.query)
    }
}

/// `CREATE [UNIQUE | SPATIAL] [HASH] INDEX ...`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateIndexStmt {
    pub unique: bool,
    pub spatial: bool,
    pub hash: bool,
    pub if_not_exists: bool,
    pub name: Option<ObjectName>,
    pub table: ObjectName,
    pub columns: Vec<SortSpec>,
    pub include: Vec<Ident>,
}

impl fmt::Display for CreateIndexStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.unique {
            f.write_str("UNIQUE ")?;
        }
        if self.spatial {
            f.write_str("SPATIAL ")?;
        }
        if self.hash {
            f.write_str("HASH ")?;
        }
        f.write_str("INDEX ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        if let Some(name) = &self.name {
            write!(f, "{} ", name)?;
        }
        write!(
            f,
            "ON {}({})",
            self.table,
            display_comma_separated(&self.columns)
        )?;
        if !self.include.is_empty() {
            write!(f, " INCLUDE({})", display_comma_separated(&self.include))?;
        }
        Ok(())
    }
}

/// `CREATE SEQUENCE ...`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateSequenceStmt {
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub options: SequenceOptions,
}

impl fmt::Display for CreateSequenceStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE SEQUENCE {}{}",
            if self.if_not_exists {
                "IF NOT EXISTS "
            } else {
                ""
            },
            self.name
        )?;
        let options = self.options.to_string();
        if !options.is_empty() {
            write!(f, " {}", options)?;
        }
        Ok(())
    }
}

/// `ALTER SEQUENCE ...`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlterSequenceStmt {
    pub if_exists: bool,
    pub name: ObjectName,
    /// `RESTART [WITH n]`.
    pub restart: Option<Option<i64>>,
    pub options: SequenceOptions,
}

impl fmt::Display for AlterSequenceStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ALTER SEQUENCE {}{}",
            if self.if_exists { "IF EXISTS " } else { "" },
            self.name
        )?;
        match &self.restart {
            Some(Some(n)) => write!(f, " RESTART WITH {}", n)?,
            Some(None) => f.write_str(" RESTART")?,
            None => {}
        }
        let options = self.options.to_string();
        if !options.is_empty() {
            write!(f, " {}", options)?;
        }
        Ok(())
    }
}

/// `CREATE DOMAIN ...`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateDomainStmt {
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub data_type: DataType,
    pub default: Option<Box<Expr>>,
    pub on_update: Option<Box<Expr>>,
    pub constraints: Vec<DomainConstraintDef>,
}

impl fmt::Display for CreateDomainStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE DOMAIN {}{} AS {}",
            if self.if_not_exists {
                "IF NOT EXISTS "
            } else {
                ""
            },
            self.name,
            self.data_type
        )?;
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {}", default)?;
        }
        if let Some(on_update) = &self.on_update {
            write!(f, " ON UPDATE {}", on_update)?;
        }
        for constraint in &self.constraints {
            write!(f, " {}", constraint)?;
        }
        Ok(())
    }
}

/// A named CHECK constraint on a domain; the domain value is referenced as
/// `VALUE` inside the expression.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DomainConstraintDef {
    pub name: Option<Ident>,
    pub check: Box<Expr>,
}

impl fmt::Display for DomainConstraintDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {} ", name)?;
        }
        write!(f, "CHECK ({})", self.check)
    }
}

/// `ALTER DOMAIN ...`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlterDomainStmt {
    pub if_exists: bool,
    pub name: ObjectName,
    pub action: AlterDomainAction,
}

impl fmt::Display for AlterDomainStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ALTER DOMAIN {}{} {}",
            if self.if_exists { "IF EXISTS " } else { "" },
            self.name,
            self.action
        )
    }
}

/// One ALTER DOMAIN action.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlterDomainAction {
    /// `SET DEFAULT expr`.
    SetDefault(Box<Expr>),
    /// `DROP DEFAULT`.
    DropDefault,
    /// `SET ON UPDATE expr`.
    SetOnUpdate(Box<Expr>),
    /// `DROP ON UPDATE`.
    DropOnUpdate,
    /// `ADD constraint`.
    AddConstraint(DomainConstraintDef),
    /// `DROP CONSTRAINT name`.
    DropConstraint(Ident),
    /// `RENAME TO name`.
    RenameTo(Ident),
    /// `RENAME CONSTRAINT from TO to`.
    #[doc(hidden)]
    RenameConstraint { from: Ident, to: Ident },
}

impl fmt::Display for AlterDomainAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetDefault(expr) => write!(f, "SET DEFAULT {}", expr),
            Self::DropDefault => f.write_str("DROP DEFAULT"),
            Self::SetOnUpdate(expr) => write!(f, "SET ON UPDATE {}", expr),
            Self::DropOnUpdate => f.write_str("DROP ON UPDATE"),
            Self::AddConstraint(def) => write!(f, "ADD {}", def),
            Self::DropConstraint(name) => write!(f, "DROP CONSTRAINT {}", name),
            Self::RenameTo(name) => write!(f, "RENAME TO {}", name),
            Self::RenameConstraint { from, to } => {
                write!(f, "RENAME CONSTRAINT {} TO {}", from, to)
            }
        }
    }
}

/// `CREATE SCHEMA ...`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateSchemaStmt {
    pub if_not_exists: bool,
    pub name: Ident,
    pub authorization: Option<Ident>,
}

impl fmt::Display for CreateSchemaStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE SCHEMA {}{}",
            if self.if_not_exists {
                "IF NOT EXISTS "
            } else {
                ""
            },
            self.name
        )?;
        if let Some(authorization) = &self.authorization {
            write!(f, " AUTHORIZATION {}", authorization)?;
        }
        Ok(())
    }
}

/// `CREATE CONSTANT ...`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateConstantStmt {
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub value: Box<Expr>,
}

impl fmt::Display for CreateConstantStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE CONSTANT {}{} VALUE {}",
            if self.if_not_exists {
                "IF NOT EXISTS "
            } else {
                ""
            },
            self.name,
            self.value
        )
    }
}

/// `CREATE ALIAS name FOR 'external'`; the binding string is opaque to the
/// front-end.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateAliasStmt {
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub external: String,
    pub deterministic: bool,
}

impl fmt::Display for CreateAliasStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE ALIAS {}{}{} FOR '{}'",
            if self.if_not_exists {
                "IF NOT EXISTS "
            } else {
                ""
            },
            self.name,
            if self.deterministic {
                " DETERMINISTIC"
            } else {
                ""
            },
            escape_single_quote_string(&self.external)
        )
    }
}

/// `CREATE AGGREGATE name FOR 'external'`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateAggregateStmt {
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub external: String,
}

impl fmt::Display for CreateAggregateStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE AGGREGATE {}{} FOR '{}'",
            if self.if_not_exists {
                "IF NOT EXISTS "
            } else {
                ""
            },
            self.name,
            escape_single_quote_string(&self.external)
        )
    }
}

/// Trigger timing.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerTiming {
    /// BEFORE
    Before,
    /// AFTER
    After,
    /// INSTEAD OF
    InsteadOf,
}

impl fmt::Display for TriggerTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::InsteadOf => "INSTEAD OF",
        })
    }
}

/// Trigger events.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerEvent {
    /// INSERT
    Insert,
    /// UPDATE
    Update,
    /// DELETE
    Delete,
    /// SELECT
    Select,
    /// ROLLBACK
    Rollback,
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Select => "SELECT",
            Self::Rollback => "ROLLBACK",
        })
    }
}

/// `CREATE TRIGGER ...`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateTriggerStmt {
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub timing: TriggerTiming,
    pub events: Vec<TriggerEvent>,
    pub table: ObjectName,
    pub for_each_row: bool,
    /// The external trigger class; opaque.
    pub external: String,
}

impl fmt::Display for CreateTriggerStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE TRIGGER {}{} {} {} ON {}",
            if self.if_not_exists {
                "IF NOT EXISTS "
            } else {
                ""
            },
            self.name,
            self.timing,
            display_comma_separated(&self.events),
            self.table
        )?;
        if self.for_each_row {
            f.write_str(" FOR EACH ROW")?;
        }
        write!(f, " CALL '{}'", escape_single_quote_string(&self.external))
    }
}

/// `CREATE ROLE ...`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateRoleStmt {
    pub if_not_exists: bool,
    pub name: Ident,
}

impl fmt::Display for CreateRoleStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE ROLE {}{}",
            if self.if_not_exists {
                "IF NOT EXISTS "
            } else {
                ""
            },
            self.name
        )
    }
}

/// `CREATE USER ...`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateUserStmt {
    pub if_not_exists: bool,
    pub name: Ident,
    pub password: Option<String>,
    pub admin: bool,
}

impl fmt::Display for CreateUserStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE USER {}{}",
            if self.if_not_exists {
                "IF NOT EXISTS "
            } else {
                ""
            },
            self.name
        )?;
        if let Some(password) = &self.password {
            write!(f, " PASSWORD '{}'", escape_single_quote_string(password))?;
        }
        if self.admin {
            f.write_str(" ADMIN")?;
        }
        Ok(())
    }
}

/// `CREATE SYNONYM name FOR target`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateSynonymStmt {
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub target: ObjectName,
}

impl fmt::Display for CreateSynonymStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE SYNONYM {}{} FOR {}",
            if self.if_not_exists {
                "IF NOT EXISTS "
            } else {
                ""
            },
            self.name,
            self.target
        )
    }
}

/// `CREATE LINKED TABLE name('driver', 'url', 'user', 'password', 'source')`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateLinkedTableStmt {
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub driver: String,
    pub url: String,
    pub user: String,
    pub password: String,
    pub source_table: String,
}

impl fmt::Display for CreateLinkedTableStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CREATE LINKED TABLE {}{}('{}', '{}', '{}', '{}', '{}')",
            if self.if_not_exists {
                "IF NOT EXISTS "
            } else {
                ""
            },
            self.name,
            escape_single_quote_string(&self.driver),
            escape_single_quote_string(&self.url),
            escape_single_quote_string(&self.user),
            escape_single_quote_string(&self.password),
            escape_single_quote_string(&self.source_table)
        )
    }
}

/// The object kinds a DROP statement can target.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectType {
    /// TABLE
    Table,
    /// COLUMN (comments only)
    Column,
    /// VIEW
    View,
    /// INDEX
    Index,
    /// SCHEMA
    Schema,
    /// SEQUENCE
    Sequence,
    /// DOMAIN
    Domain,
    /// CONSTANT
    Constant,
    /// ALIAS
    Alias,
    /// TRIGGER
    Trigger,
    /// ROLE
    Role,
    /// USER
    User,
    /// SYNONYM
    Synonym,
    /// AGGREGATE
    Aggregate,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "TABLE",
            Self::Column => "COLUMN",
            Self::View => "VIEW",
            Self::Index => "INDEX",
            Self::Schema => "SCHEMA",
            Self::Sequence => "SEQUENCE",
            Self::Domain => "DOMAIN",
            Self::Constant => "CONSTANT",
            Self::Alias => "ALIAS",
            Self::Trigger => "TRIGGER",
            Self::Role => "ROLE",
            Self::User => "USER",
            Self::Synonym => "SYNONYM",
            Self::Aggregate => "AGGREGATE",
        })
    }
}

/// `DROP <object> ...`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropStmt {
    pub object_type: ObjectType,
    pub if_exists: bool,
    pub names: Vec<ObjectName>,
    pub behavior: Option<DropBehavior>,
}

impl fmt::Display for DropStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DROP {} {}{}",
            self.object_type,
            if self.if_exists { "IF EXISTS " } else { "" },
            display_comma_separated(&self.names)
        )?;
        if let Some(behavior) = &self.behavior {
            write!(f, " {}", behavior)?;
        }
        Ok(())
    }
}

/// Drop behavior.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DropBehavior {
    /// CASCADE
    Cascade,
    /// RESTRICT
    Restrict,
}

impl fmt::Display for DropBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
        })
    }
}

/// `TRUNCATE TABLE name`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TruncateStmt {
    pub table: ObjectName,
}

impl fmt::Display for TruncateStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TRUNCATE TABLE {}", self.table)
    }
}

/// `COMMENT ON <object> name IS 'text'`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommentStmt {
    pub object_type: ObjectType,
    pub name: ObjectName,
    /// None means `IS NULL` (comment removal).
    pub comment: Option<String>,
}

impl fmt::Display for CommentStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "COMMENT ON {} {} IS ", self.object_type, self.name)?;
        match &self.comment {
            Some(text) => write!(f, "'{}'", escape_single_quote_string(text)),
            None => f.write_str("NULL"),
        }
    }
}
