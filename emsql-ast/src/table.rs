//! Table filters: the items of a FROM list and their joins.

use core::fmt;

use crate::{
    expr::{Expr, FunctionCall},
    ident::{Ident, ObjectName},
    query::{Query, Values},
    stmt::Statement,
    utils::display_comma_separated,
};

/// One FROM-list item: a table factor plus its chained joins.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableWithJoins {
    pub relation: TableFactor,
    pub joins: Vec<Join>,
}

impl fmt::Display for TableWithJoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relation)?;
        for join in &self.joins {
            write!(f, "{}", join)?;
        }
        Ok(())
    }
}

/// A table factor.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableFactor {
    /// A base table or view.
    #[doc(hidden)]
    Table {
        name: ObjectName,
        alias: Option<TableAlias>,
        /// `USE INDEX (...)` / MS-SQL `WITH (...)`; only the first hint list
        /// parsed is carried forward.
        index_hints: Option<IndexHints>,
    },
    /// A parenthesized subquery.
    #[doc(hidden)]
    Derived {
        subquery: Box<Query>,
        alias: Option<TableAlias>,
    },
    /// `TABLE(function(args))`.
    #[doc(hidden)]
    TableFunction {
        call: FunctionCall,
        alias: Option<TableAlias>,
    },
    /// `SYSTEM_RANGE(min, max [, step])`.
    #[doc(hidden)]
    SystemRange {
        min: Expr,
        max: Expr,
        step: Option<Expr>,
        alias: Option<TableAlias>,
    },
    /// Inline `VALUES (..), (..)`.
    #[doc(hidden)]
    Values {
        values: Values,
        alias: Option<TableAlias>,
    },
    /// A parenthesized join.
    NestedJoin(Box<TableWithJoins>),
    /// `{OLD | NEW | FINAL} TABLE (dml-statement)`.
    #[doc(hidden)]
    DataChangeDelta {
        kind: DeltaKind,
        statement: Box<Statement>,
        alias: Option<TableAlias>,
    },
}

fn write_alias(f: &mut fmt::Formatter<'_>, alias: &Option<TableAlias>) -> fmt::Result {
    if let Some(alias) = alias {
        write!(f, " AS {}", alias)?;
    }
    Ok(())
}

impl fmt::Display for TableFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table {
                name,
                alias,
                index_hints,
            } => {
                write!(f, "{}", name)?;
                write_alias(f, alias)?;
                if let Some(hints) = index_hints {
                    write!(f, " {}", hints)?;
                }
                Ok(())
            }
            Self::Derived { subquery, alias } => {
                write!(f, "({})", subquery)?;
                write_alias(f, alias)
            }
            Self::TableFunction { call, alias } => {
                write!(f, "TABLE({})", call)?;
                write_alias(f, alias)
            }
            Self::SystemRange {
                min,
                max,
                step,
                alias,
            } => {
                write!(f, "SYSTEM_RANGE({}, {}", min, max)?;
                if let Some(step) = step {
                    write!(f, ", {}", step)?;
                }
                f.write_str(")")?;
                write_alias(f, alias)
            }
            Self::Values { values, alias } => {
                write!(f, "({})", values)?;
                write_alias(f, alias)
            }
            Self::NestedJoin(join) => write!(f, "({})", join),
            Self::DataChangeDelta {
                kind,
                statement,
                alias,
            } => {
                write!(f, "{} TABLE ({})", kind, statement)?;
                write_alias(f, alias)
            }
        }
    }
}

/// The delta-table kind of a data-change delta table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeltaKind {
    /// Rows before the change.
    Old,
    /// Rows as inserted or updated.
    New,
    /// Rows after all triggers ran.
    Final,
}

impl fmt::Display for DeltaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Old => "OLD",
            Self::New => "NEW",
            Self::Final => "FINAL",
        })
    }
}

/// A table alias with optional column aliases.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableAlias {
    pub name: Ident,
    pub columns: Vec<Ident>,
}

impl fmt::Display for TableAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            write!(f, "({})", display_comma_separated(&self.columns))?;
        }
        Ok(())
    }
}

/// Index hints; only `USE INDEX` survives parsing.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexHints {
    pub indexes: Vec<Ident>,
}

impl fmt::Display for IndexHints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "USE INDEX ({})", display_comma_separated(&self.indexes))
    }
}

/// One join step.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Join {
    pub relation: TableFactor,
    pub operator: JoinOperator,
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operator {
            JoinOperator::Inner(constraint) => write!(
                f,
                " {}JOIN {}{}",
                constraint.prefix(),
                self.relation,
                constraint.suffix()
            ),
            JoinOperator::LeftOuter(constraint) => write!(
                f,
                " {}LEFT JOIN {}{}",
                constraint.prefix(),
                self.relation,
                constraint.suffix()
            ),
            JoinOperator::RightOuter(constraint) => write!(
                f,
                " {}RIGHT JOIN {}{}",
                constraint.prefix(),
                self.relation,
                constraint.suffix()
            ),
            JoinOperator::Cross => write!(f, " CROSS JOIN {}", self.relation),
        }
    }
}

/// Join operators; FULL JOIN is rejected by the parser.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinOperator {
    Inner(JoinConstraint),
    LeftOuter(JoinConstraint),
    RightOuter(JoinConstraint),
    Cross,
}

/// Join constraints.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinConstraint {
    On(Expr),
    Using(Vec<Ident>),
    Natural,
    None,
}

impl JoinConstraint {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Natural => "NATURAL ",
            _ => "",
        }
    }

    fn suffix(&self) -> impl fmt::Display + '_ {
        struct Suffix<'a>(&'a JoinConstraint);
        impl fmt::Display for Suffix<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.0 {
                    JoinConstraint::On(expr) => write!(f, " ON {}", expr),
                    JoinConstraint::Using(columns) => {
                        write!(f, " USING({})", display_comma_separated(columns))
                    }
                    _ => Ok(()),
                }
            }
        }
        Suffix(self)
    }
}
