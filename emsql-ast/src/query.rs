//! Query expressions: SELECT cores, set operations, CTEs and fetch clauses.

use core::fmt;

use crate::{
    expr::{Expr, WindowSpec},
    ident::{Ident, ObjectName},
    table::TableWithJoins,
    utils::display_comma_separated,
};

/// A complete query expression, optionally with a CTE preamble, set
/// operations, ordering and row limiting clauses.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    /// `WITH [RECURSIVE] ...`.
    pub with: Option<With>,
    /// The query body.
    pub body: QueryBody,
    /// `ORDER BY`; on a set operation it binds to the whole tree.
    pub order_by: Vec<SortSpec>,
    /// `OFFSET n {ROW | ROWS}`.
    pub offset: Option<OffsetClause>,
    /// `FETCH {FIRST | NEXT} ...`.
    pub fetch: Option<FetchClause>,
    /// MySQL-style `LIMIT`.
    pub limit: Option<LimitClause>,
    /// `FOR UPDATE`.
    pub for_update: bool,
    /// DB2 isolation clause.
    pub isolation: Option<IsolationClause>,
}

impl Query {
    /// A query that is just the given body.
    pub fn plain(body: QueryBody) -> Self {
        Self {
            with: None,
            body,
            order_by: Vec::new(),
            offset: None,
            fetch: None,
            limit: None,
            for_update: false,
            isolation: None,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{} ", with)?;
        }
        write!(f, "{}", self.body)?;
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", display_comma_separated(&self.order_by))?;
        }
        if let Some(offset) = &self.offset {
            write!(f, " {}", offset)?;
        }
        if let Some(fetch) = &self.fetch {
            write!(f, " {}", fetch)?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " {}", limit)?;
        }
        if self.for_update {
            f.write_str(" FOR UPDATE")?;
        }
        if let Some(isolation) = &self.isolation {
            write!(f, " {}", isolation)?;
        }
        Ok(())
    }
}

/// The body of a query: a select core, a VALUES constructor, `TABLE name`,
/// or a set operation over two bodies.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueryBody {
    /// A SELECT core.
    Select(Box<Select>),
    /// `VALUES (..), (..)`.
    Values(Values),
    /// `TABLE name`.
    Table(ObjectName),
    /// A set operation; trees are built left-associative.
    SetOp(Box<SetOpQuery>),
}

impl fmt::Display for QueryBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(select) => write!(f, "{}", select),
            Self::Values(values) => write!(f, "{}", values),
            Self::Table(name) => write!(f, "TABLE {}", name),
            Self::SetOp(op) => write!(f, "{}", op),
        }
    }
}

/// A set operation node.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetOpQuery {
    pub op: SetOperator,
    /// `ALL` keeps duplicates; DISTINCT (default) removes them.
    pub all: bool,
    pub left: QueryBody,
    pub right: QueryBody,
}

impl fmt::Display for SetOpQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{} {}",
            self.left,
            self.op,
            if self.all { " ALL" } else { "" },
            self.right
        )
    }
}

/// Set operators.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetOperator {
    /// UNION
    Union,
    /// EXCEPT (also written MINUS in some dialects)
    Except,
    /// INTERSECT
    Intersect,
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Union => "UNION",
            Self::Except => "EXCEPT",
            Self::Intersect => "INTERSECT",
        })
    }
}

/// A SELECT core.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Select {
    /// `DISTINCT [ON (...)]` / `ALL`.
    pub distinct: Option<Distinct>,
    /// `TOP n [PERCENT] [WITH TIES]`.
    pub top: Option<TopClause>,
    /// The select list.
    pub projection: Vec<SelectItem>,
    /// The FROM list.
    pub from: Vec<TableWithJoins>,
    /// WHERE.
    pub selection: Option<Expr>,
    /// GROUP BY.
    pub group_by: Vec<GroupingElement>,
    /// HAVING.
    pub having: Option<Expr>,
    /// Named windows declared with WINDOW.
    pub windows: Vec<NamedWindow>,
    /// QUALIFY.
    pub qualify: Option<Expr>,
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT")?;
        if let Some(distinct) = &self.distinct {
            write!(f, " {}", distinct)?;
        }
        if let Some(top) = &self.top {
            write!(f, " {}", top)?;
        }
        write!(f, " {}", display_comma_separated(&self.projection))?;
        if !self.from.is_empty() {
            write!(f, " FROM {}", display_comma_separated(&self.from))?;
        }
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {}", selection)?;
        }
        if !self.group_by.is_empty() {
            write!(f, " GROUP BY {}", display_comma_separated(&self.group_by))?;
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {}", having)?;
        }
        if !self.windows.is_empty() {
            write!(f, " WINDOW {}", display_comma_separated(&self.windows))?;
        }
        if let Some(qualify) = &self.qualify {
            write!(f, " QUALIFY {}", qualify)?;
        }
        Ok(())
    }
}

/// Select quantifier.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Distinct {
    /// Explicit `ALL`.
    All,
    /// `DISTINCT`.
    Distinct,
    /// `DISTINCT ON (exprs)`.
    On(Vec<Expr>),
}

impl fmt::Display for Distinct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Distinct => f.write_str("DISTINCT"),
            Self::On(exprs) => write!(f, "DISTINCT ON ({})", display_comma_separated(exprs)),
        }
    }
}

/// `TOP n [PERCENT] [WITH TIES]`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopClause {
    pub quantity: Expr,
    pub percent: bool,
    pub with_ties: bool,
}

impl fmt::Display for TopClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TOP {}", self.quantity)?;
        if self.percent {
            f.write_str(" PERCENT")?;
        }
        if self.with_ties {
            f.write_str(" WITH TIES")?;
        }
        Ok(())
    }
}

/// One select-list item.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectItem {
    /// `*`
    Wildcard,
    /// `alias.*`
    QualifiedWildcard(ObjectName),
    /// Expression without alias.
    UnnamedExpr(Expr),
    /// Expression with alias.
    #[doc(hidden)]
    ExprWithAlias { expr: Expr, alias: Ident },
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("*"),
            Self::QualifiedWildcard(prefix) => write!(f, "{}.*", prefix),
            Self::UnnamedExpr(expr) => write!(f, "{}", expr),
            Self::ExprWithAlias { expr, alias } => write!(f, "{} AS {}", expr, alias),
        }
    }
}

/// One GROUP BY element: an expression, a parenthesized grouping set, or
/// the empty grouping set `()`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupingElement {
    /// A plain expression.
    Expr(Expr),
    /// `(a, b)` grouping set.
    Set(Vec<Expr>),
    /// `()`.
    Empty,
}

impl fmt::Display for GroupingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(expr) => write!(f, "{}", expr),
            Self::Set(exprs) => write!(f, "({})", display_comma_separated(exprs)),
            Self::Empty => f.write_str("()"),
        }
    }
}

/// A window declared in the WINDOW clause.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedWindow {
    pub name: Ident,
    pub spec: WindowSpec,
}

impl fmt::Display for NamedWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} AS ({})", self.name, self.spec)
    }
}

/// `VALUES (..), (..)`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Values {
    /// The rows.
    pub rows: Vec<Vec<Expr>>,
}

impl fmt::Display for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VALUES ")?;
        let mut first = true;
        for row in &self.rows {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "({})", display_comma_separated(row))?;
        }
        Ok(())
    }
}

/// `WITH [RECURSIVE] cte, ...`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct With {
    pub recursive: bool,
    pub ctes: Vec<Cte>,
}

impl fmt::Display for With {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WITH {}{}",
            if self.recursive { "RECURSIVE " } else { "" },
            display_comma_separated(&self.ctes)
        )
    }
}

/// One common table expression: `name [(cols)] AS (query)`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cte {
    pub name: Ident,
    pub columns: Vec<Ident>,
    pub query: Box<Query>,
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            write!(f, "({})", display_comma_separated(&self.columns))?;
        }
        write!(f, " AS ({})", self.query)
    }
}

/// `expr [ASC | DESC] [NULLS FIRST | NULLS LAST]`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortSpec {
    /// The sort expression.
    pub expr: Box<Expr>,
    /// `Some(true)` = ASC, `Some(false)` = DESC.
    pub asc: Option<bool>,
    /// NULLS FIRST / LAST.
    pub nulls_first: Option<bool>,
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        match self.asc {
            Some(true) => f.write_str(" ASC")?,
            Some(false) => f.write_str(" DESC")?,
            None => {}
        }
        match self.nulls_first {
            Some(true) => f.write_str(" NULLS FIRST")?,
            Some(false) => f.write_str(" NULLS LAST")?,
            None => {}
        }
        Ok(())
    }
}

/// `OFFSET n {ROW | ROWS}`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetClause {
    pub count: Expr,
    pub rows: OffsetRows,
}

impl fmt::Display for OffsetClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OFFSET {}{}", self.count, self.rows)
    }
}

/// The keyword written after `OFFSET n`.
#[doc(hidden)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OffsetRows {
    None,
    Row,
    Rows,
}

impl fmt::Display for OffsetRows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Row => f.write_str(" ROW"),
            Self::Rows => f.write_str(" ROWS"),
        }
    }
}

/// `FETCH {FIRST | NEXT} [n] [PERCENT] {ROW | ROWS} {ONLY | WITH TIES}`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchClause {
    pub quantity: Option<Expr>,
    pub percent: bool,
    pub with_ties: bool,
}

impl fmt::Display for FetchClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FETCH FIRST")?;
        if let Some(quantity) = &self.quantity {
            write!(f, " {}", quantity)?;
        }
        if self.percent {
            f.write_str(" PERCENT")?;
        }
        f.write_str(" ROWS")?;
        if self.with_ties {
            f.write_str(" WITH TIES")
        } else {
            f.write_str(" ONLY")
        }
    }
}

/// MySQL-style `LIMIT n [OFFSET m]` / `LIMIT m, n`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LimitClause {
    pub count: Expr,
    pub offset: Option<Expr>,
}

impl fmt::Display for LimitClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LIMIT {}", self.count)?;
        if let Some(offset) = &self.offset {
            write!(f, " OFFSET {}", offset)?;
        }
        Ok(())
    }
}

/// DB2 isolation clause.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IsolationClause {
    /// Repeatable read.
    Rr,
    /// Read stability.
    Rs,
    /// Cursor stability.
    Cs,
    /// Uncommitted read.
    Ur,
}

impl fmt::Display for IsolationClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rr => "WITH RR",
            Self::Rs => "WITH RS",
            Self::Cs => "WITH CS",
            Self::Ur => "WITH UR",
        })
    }
}
