//! Data-manipulation statements.

use core::fmt;

use crate::{
    expr::Expr,
    ident::{Ident, ObjectName},
    query::{FetchClause, LimitClause, Query, SortSpec, Values},
    table::TableWithJoins,
    utils::display_comma_separated,
};

/// `INSERT INTO ...`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InsertStmt {
    /// The target table.
    pub table: ObjectName,
    /// Explicit column list.
    pub columns: Vec<Ident>,
    /// `OVERRIDING {SYSTEM | USER} VALUE`.
    pub overriding: Option<InsertOverriding>,
    /// The row source.
    pub source: InsertSource,
    /// `ON DUPLICATE KEY UPDATE` assignments (MySQL).
    pub on_duplicate_update: Option<Vec<Assignment>>,
    /// `ON CONFLICT DO NOTHING` (PostgreSQL).
    pub on_conflict_do_nothing: bool,
}

impl fmt::Display for InsertStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {}", self.table)?;
        if !self.columns.is_empty() {
            write!(f, "({})", display_comma_separated(&self.columns))?;
        }
        if let Some(overriding) = &self.overriding {
            write!(f, " {}", overriding)?;
        }
        write!(f, " {}", self.source)?;
        if let Some(assignments) = &self.on_duplicate_update {
            write!(
                f,
                " ON DUPLICATE KEY UPDATE {}",
                display_comma_separated(assignments)
            )?;
        }
        if self.on_conflict_do_nothing {
            f.write_str(" ON CONFLICT DO NOTHING")?;
        }
        Ok(())
    }
}

/// `OVERRIDING {SYSTEM | USER} VALUE`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsertOverriding {
    /// OVERRIDING SYSTEM VALUE
    System,
    /// OVERRIDING USER VALUE
    User,
}

impl fmt::Display for InsertOverriding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::System => "OVERRIDING SYSTEM VALUE",
            Self::User => "OVERRIDING USER VALUE",
        })
    }
}

/// Row source of an INSERT.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsertSource {
    /// `VALUES (..), (..)`.
    Values(Values),
    /// A query.
    Query(Box<Query>),
    /// MySQL `SET col = expr, ...` form.
    Set(Vec<Assignment>),
    /// `DEFAULT VALUES`.
    DefaultValues,
}

impl fmt::Display for InsertSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Values(values) => write!(f, "{}", values),
            Self::Query(query) => write!(f, "{}", query),
            Self::Set(assignments) => write!(f, "SET {}", display_comma_separated(assignments)),
            Self::DefaultValues => f.write_str("DEFAULT VALUES"),
        }
    }
}

/// One SET clause. The target may be a parenthesized column tuple with a
/// single row-valued right-hand side.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub target: AssignmentTarget,
    pub value: Box<Expr>,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

/// The left-hand side of a SET clause.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignmentTarget {
    /// `col = expr`.
    Column(ObjectName),
    /// `(col1, col2) = row-expr`.
    Tuple(Vec<ObjectName>),
}

impl fmt::Display for AssignmentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(name) => write!(f, "{}", name),
            Self::Tuple(names) => write!(f, "({})", display_comma_separated(names)),
        }
    }
}

/// `UPDATE ...`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateStmt {
    /// The target table.
    pub table: ObjectName,
    /// Table alias.
    pub alias: Option<Ident>,
    /// SET clauses.
    pub assignments: Vec<Assignment>,
    /// Additional `FROM` sources.
    pub from: Vec<TableWithJoins>,
    /// WHERE.
    pub selection: Option<Expr>,
    /// ORDER BY.
    pub order_by: Vec<SortSpec>,
    /// LIMIT.
    pub limit: Option<LimitClause>,
    /// FETCH.
    pub fetch: Option<FetchClause>,
}

impl fmt::Display for UpdateStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UPDATE {}", self.table)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }
        write!(f, " SET {}", display_comma_separated(&self.assignments))?;
        if !self.from.is_empty() {
            write!(f, " FROM {}", display_comma_separated(&self.from))?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {}", selection)?;
        }
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", display_comma_separated(&self.order_by))?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " {}", limit)?;
        }
        if let Some(fetch) = &self.fetch {
            write!(f, " {}", fetch)?;
        }
        Ok(())
    }
}

/// `DELETE FROM ...`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeleteStmt {
    /// The target table.
    pub table: ObjectName,
    /// Table alias.
    pub alias: Option<Ident>,
    /// WHERE.
    pub selection: Option<Expr>,
    /// LIMIT.
    pub limit: Option<LimitClause>,
    /// FETCH.
    pub fetch: Option<FetchClause>,
}

impl fmt::Display for DeleteStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {}", selection)?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " {}", limit)?;
        }
        if let Some(fetch) = &self.fetch {
            write!(f, " {}", fetch)?;
        }
        Ok(())
    }
}

/// `MERGE INTO ...`, both the standard `USING` form and the legacy
/// key-based form.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeStmt {
    /// The target table.
    pub into: ObjectName,
    /// Target alias.
    pub alias: Option<Ident>,
    /// Which form was written.
    pub kind: MergeKind,
}

impl fmt::Display for MergeStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MERGE INTO {}", self.into)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }
        write!(f, " {}", self.kind)
    }
}

/// The two MERGE forms.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MergeKind {
    /// `USING source ON cond WHEN ...`.
    #[doc(hidden)]
    Using {
        source: Box<TableWithJoins>,
        on: Box<Expr>,
        clauses: Vec<MergeWhen>,
    },
    /// Legacy `[(cols)] [KEY(cols)] {VALUES ... | query}`.
    #[doc(hidden)]
    Legacy {
        columns: Vec<Ident>,
        keys: Vec<Ident>,
        source: Box<Query>,
    },
}

impl fmt::Display for MergeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Using {
                source,
                on,
                clauses,
            } => {
                write!(f, "USING {} ON {}", source, on)?;
                for clause in clauses {
                    write!(f, " {}", clause)?;
                }
                Ok(())
            }
            Self::Legacy {
                columns,
                keys,
                source,
            } => {
                if !columns.is_empty() {
                    write!(f, "({}) ", display_comma_separated(columns))?;
                }
                if !keys.is_empty() {
                    write!(f, "KEY({}) ", display_comma_separated(keys))?;
                }
                write!(f, "{}", source)
            }
        }
    }
}

/// One `WHEN [NOT] MATCHED [AND cond] THEN action` branch, in declared order.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeWhen {
    pub matched: bool,
    pub and_condition: Option<Expr>,
    pub action: MergeAction,
}

impl fmt::Display for MergeWhen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WHEN {}MATCHED",
            if self.matched { "" } else { "NOT " }
        )?;
        if let Some(condition) = &self.and_condition {
            write!(f, " AND {}", condition)?;
        }
        write!(f, " THEN {}", self.action)
    }
}

/// A MERGE branch action.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MergeAction {
    /// `UPDATE SET ...`.
    Update(Vec<Assignment>),
    /// `DELETE`.
    Delete,
    /// `INSERT [(cols)] VALUES (...)`.
    #[doc(hidden)]
    Insert {
        columns: Vec<Ident>,
        values: Vec<Expr>,
    },
}

impl fmt::Display for MergeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update(assignments) => {
                write!(f, "UPDATE SET {}", display_comma_separated(assignments))
            }
            Self::Delete => f.write_str("DELETE"),
            Self::Insert { columns, values } => {
                f.write_str("INSERT")?;
                if !columns.is_empty() {
                    write!(f, " ({})", display_comma_separated(columns))?;
                }
                write!(f, " VALUES ({})", display_comma_separated(values))
            }
        }
    }
}

/// MySQL `REPLACE INTO ...`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplaceStmt {
    /// The target table.
    pub table: ObjectName,
    /// Explicit column list.
    pub columns: Vec<Ident>,
    /// The row source.
    pub source: InsertSource,
}

impl fmt::Display for ReplaceStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REPLACE INTO {}", self.table)?;
        if !self.columns.is_empty() {
            write!(f, "({})", display_comma_separated(&self.columns))?;
        }
        write!(f, " {}", self.source)
    }
}
