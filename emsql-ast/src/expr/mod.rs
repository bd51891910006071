//! Expressions.

mod function;

use core::fmt;

pub use self::function::*;
use crate::{
    data_type::{DataType, IntervalQualifier},
    ident::{Ident, ObjectName},
    query::Query,
    utils::display_comma_separated,
    value::Value,
};

/// SQL expression.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Value),
    /// A parameter reference; the ordinal is 1-based.
    Parameter(ParameterRef),
    /// A column reference, possibly schema- and table-qualified.
    Column(ColumnRef),
    /// Unqualified `*` (valid only in limited contexts such as `COUNT(*)`).
    Wildcard,
    /// `alias.*` or `schema.table.*`.
    QualifiedWildcard(ObjectName),
    /// Parenthesized expression.
    Nested(Box<Expr>),
    /// Unary operation.
    UnaryOp(UnaryOpExpr),
    /// Binary arithmetic operation.
    BinaryOp(BinaryOpExpr),
    /// N-ary operation: `AND`, `OR` and `||` chains are folded flat so later
    /// tree walks do not recurse once per operand.
    NaryOp(NaryOpExpr),
    /// Comparison.
    Comparison(ComparisonExpr),
    /// `cmp ANY / ALL / SOME (subquery)`.
    Quantified(QuantifiedExpr),
    /// `[NOT] BETWEEN [SYMMETRIC | ASYMMETRIC] low AND high`.
    Between(BetweenExpr),
    /// `[NOT] IN (list)`.
    InList(InListExpr),
    /// `[NOT] IN (subquery)`.
    InSubquery(InSubqueryExpr),
    /// `[NOT] LIKE / ILIKE pattern [ESCAPE esc]`.
    Like(LikeExpr),
    /// `[NOT] REGEXP pattern`, also `~` and `!~`.
    Regexp(RegexpExpr),
    /// `IS [NOT] NULL`.
    IsNull(IsNullExpr),
    /// `IS [NOT] TRUE / FALSE / UNKNOWN`.
    IsTruth(IsTruthExpr),
    /// `IS [NOT] DISTINCT FROM`.
    IsDistinctFrom(IsDistinctFromExpr),
    /// `IS [NOT] JSON [...]`.
    IsJson(IsJsonExpr),
    /// `IS [NOT] OF (type, ...)`.
    IsOfType(IsOfTypeExpr),
    /// `UNIQUE (subquery)`.
    Unique(Box<Query>),
    /// `EXISTS (subquery)`.
    Exists(Box<Query>),
    /// `INTERSECTS (left, right)`.
    Intersects(IntersectsExpr),
    /// Simple or searched CASE.
    Case(CaseExpr),
    /// `CAST(expr AS type)` or `expr::type`.
    Cast(CastExpr),
    /// Field dereference on a row value: `expr.field`.
    FieldAccess(FieldAccessExpr),
    /// Array element reference: `expr[index]`.
    ArrayElement(ArrayElementExpr),
    /// `ARRAY[...]` or `ARRAY(subquery)`.
    ArrayConstructor(ArrayConstructorExpr),
    /// `ROW(...)` or a parenthesized expression list.
    RowConstructor(RowConstructorExpr),
    /// A scalar subquery.
    Subquery(Box<Query>),
    /// Function call of any kind (builtin, compatibility, user-defined,
    /// aggregate, window, table-valued).
    Function(Box<FunctionCall>),
    /// `CURRENT_DATE`, `CURRENT_USER`, `ROWNUM`, ...
    CurrentValue(CurrentValue),
    /// `NEXT VALUE FOR seq` / `CURRENT VALUE FOR seq`.
    SequenceValue(SequenceValueExpr),
    /// Session variable reference `@name`.
    Variable(Ident),
    /// Session variable assignment `@name := expr`.
    VariableAssignment(VariableAssignmentExpr),
    /// `expr AT TIME ZONE zone` / `expr AT LOCAL`.
    AtTimeZone(AtTimeZoneExpr),
    /// `expr FORMAT JSON`.
    FormatJson(Box<Expr>),
    /// Interval qualifier applied as a postfix: `(a - b) DAY TO SECOND`.
    IntervalQualified(IntervalQualifiedExpr),
    /// The `VALUE` placeholder inside a domain constraint.
    DomainValue,
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{}", value),
            Self::Parameter(p) => write!(f, "{}", p),
            Self::Column(c) => write!(f, "{}", c),
            Self::Wildcard => f.write_str("*"),
            Self::QualifiedWildcard(name) => write!(f, "{}.*", name),
            Self::Nested(expr) => write!(f, "({})", expr),
            Self::UnaryOp(e) => write!(f, "{}", e),
            Self::BinaryOp(e) => write!(f, "{}", e),
            Self::NaryOp(e) => write!(f, "{}", e),
            Self::Comparison(e) => write!(f, "{}", e),
            Self::Quantified(e) => write!(f, "{}", e),
            Self::Between(e) => write!(f, "{}", e),
            Self::InList(e) => write!(f, "{}", e),
            Self::InSubquery(e) => write!(f, "{}", e),
            Self::Like(e) => write!(f, "{}", e),
            Self::Regexp(e) => write!(f, "{}", e),
            Self::IsNull(e) => write!(f, "{}", e),
            Self::IsTruth(e) => write!(f, "{}", e),
            Self::IsDistinctFrom(e) => write!(f, "{}", e),
            Self::IsJson(e) => write!(f, "{}", e),
            Self::IsOfType(e) => write!(f, "{}", e),
            Self::Unique(query) => write!(f, "UNIQUE ({})", query),
            Self::Exists(query) => write!(f, "EXISTS ({})", query),
            Self::Intersects(e) => write!(f, "{}", e),
            Self::Case(e) => write!(f, "{}", e),
            Self::Cast(e) => write!(f, "{}", e),
            Self::FieldAccess(e) => write!(f, "{}", e),
            Self::ArrayElement(e) => write!(f, "{}", e),
            Self::ArrayConstructor(e) => write!(f, "{}", e),
            Self::RowConstructor(e) => write!(f, "{}", e),
            Self::Subquery(query) => write!(f, "({})", query),
            Self::Function(call) => write!(f, "{}", call),
            Self::CurrentValue(v) => write!(f, "{}", v),
            Self::SequenceValue(e) => write!(f, "{}", e),
            Self::Variable(name) => write!(f, "@{}", name),
            Self::VariableAssignment(e) => write!(f, "{}", e),
            Self::AtTimeZone(e) => write!(f, "{}", e),
            Self::FormatJson(expr) => write!(f, "{} FORMAT JSON", expr),
            Self::IntervalQualified(e) => write!(f, "{}", e),
            Self::DomainValue => f.write_str("VALUE"),
        }
    }
}

/// A parameter reference with its 1-based ordinal and whether the source
/// used an explicit index.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterRef {
    /// The 1-based ordinal.
    pub ordinal: u32,
    /// Whether the parameter was written `?N` / `$N`.
    pub explicit: bool,
}

impl fmt::Display for ParameterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.explicit {
            write!(f, "?{}", self.ordinal)
        } else {
            f.write_str("?")
        }
    }
}

/// A column reference.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnRef {
    /// Schema qualifier, when written.
    pub schema: Option<Ident>,
    /// Table or alias qualifier, when written.
    pub table: Option<Ident>,
    /// The column name.
    pub name: Ident,
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{}.", schema)?;
        }
        if let Some(table) = &self.table {
            write!(f, "{}.", table)?;
        }
        write!(f, "{}", self.name)
    }
}

/// Unary operators.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOperator {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `NOT`
    Not,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "NOT",
        })
    }
}

/// Binary arithmetic operators.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOperator {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`, canonicalized to MOD semantics
    Modulo,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        })
    }
}

/// Operators that fold into N-ary nodes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NaryOperator {
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `||`
    Concat,
}

impl NaryOperator {
    fn separator(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
            Self::Concat => " || ",
        }
    }
}

/// Comparison operators.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComparisonOperator {
    /// `=`
    Eq,
    /// `<>`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `&&` spatial intersects
    SpatialIntersects,
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::SpatialIntersects => "&&",
        })
    }
}

/// Unary operation.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnaryOpExpr {
    pub op: UnaryOperator,
    pub expr: Box<Expr>,
}

impl fmt::Display for UnaryOpExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            UnaryOperator::Not => write!(f, "NOT {}", self.expr),
            op => write!(f, "{}{}", op, self.expr),
        }
    }
}

/// Binary operation.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryOpExpr {
    pub op: BinaryOperator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

impl fmt::Display for BinaryOpExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

/// N-ary operation with three or more operands (two-operand chains stay
/// N-ary as well once folded by the parser).
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NaryOpExpr {
    pub op: NaryOperator,
    pub operands: Vec<Expr>,
}

impl fmt::Display for NaryOpExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            crate::utils::display_separated(&self.operands, self.op.separator())
        )
    }
}

/// Comparison.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonExpr {
    pub op: ComparisonOperator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

impl fmt::Display for ComparisonExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

/// Quantifier of a quantified comparison.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quantifier {
    /// ALL
    All,
    /// ANY
    Any,
    /// SOME
    Some,
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "ALL",
            Self::Any => "ANY",
            Self::Some => "SOME",
        })
    }
}

/// `left cmp ANY/ALL/SOME (subquery)`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuantifiedExpr {
    pub op: ComparisonOperator,
    pub quantifier: Quantifier,
    pub left: Box<Expr>,
    pub subquery: Box<Query>,
}

impl fmt::Display for QuantifiedExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.left, self.op, self.quantifier, self.subquery
        )
    }
}

/// `[NOT] BETWEEN [SYMMETRIC] low AND high`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetweenExpr {
    pub expr: Box<Expr>,
    pub negated: bool,
    pub symmetric: bool,
    pub low: Box<Expr>,
    pub high: Box<Expr>,
}

impl fmt::Display for BetweenExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}BETWEEN {}{} AND {}",
            self.expr,
            if self.negated { "NOT " } else { "" },
            if self.symmetric { "SYMMETRIC " } else { "" },
            self.low,
            self.high
        )
    }
}

/// `[NOT] IN (value, ...)`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InListExpr {
    pub expr: Box<Expr>,
    pub negated: bool,
    pub list: Vec<Expr>,
}

impl fmt::Display for InListExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}IN ({})",
            self.expr,
            if self.negated { "NOT " } else { "" },
            display_comma_separated(&self.list)
        )
    }
}

/// `[NOT] IN (subquery)`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InSubqueryExpr {
    pub expr: Box<Expr>,
    pub negated: bool,
    pub subquery: Box<Query>,
}

impl fmt::Display for InSubqueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}IN ({})",
            self.expr,
            if self.negated { "NOT " } else { "" },
            self.subquery
        )
    }
}

/// `[NOT] LIKE / ILIKE pattern [ESCAPE esc]`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LikeExpr {
    pub expr: Box<Expr>,
    pub negated: bool,
    pub case_insensitive: bool,
    pub pattern: Box<Expr>,
    pub escape: Option<Box<Expr>>,
}

impl fmt::Display for LikeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{} {}",
            self.expr,
            if self.negated { "NOT " } else { "" },
            if self.case_insensitive { "ILIKE" } else { "LIKE" },
            self.pattern
        )?;
        if let Some(escape) = &self.escape {
            write!(f, " ESCAPE {}", escape)?;
        }
        Ok(())
    }
}

/// `[NOT] REGEXP pattern`; also covers `~` and `!~`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegexpExpr {
    pub expr: Box<Expr>,
    pub negated: bool,
    pub pattern: Box<Expr>,
}

impl fmt::Display for RegexpExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}REGEXP {}",
            self.expr,
            if self.negated { "NOT " } else { "" },
            self.pattern
        )
    }
}

/// `IS [NOT] NULL`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsNullExpr {
    pub expr: Box<Expr>,
    pub negated: bool,
}

impl fmt::Display for IsNullExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} IS {}NULL",
            self.expr,
            if self.negated { "NOT " } else { "" }
        )
    }
}

/// The three-valued truth constants.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TruthValue {
    /// TRUE
    True,
    /// FALSE
    False,
    /// UNKNOWN
    Unknown,
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Unknown => "UNKNOWN",
        })
    }
}

/// `IS [NOT] TRUE / FALSE / UNKNOWN`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsTruthExpr {
    pub expr: Box<Expr>,
    pub negated: bool,
    pub value: TruthValue,
}

impl fmt::Display for IsTruthExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} IS {}{}",
            self.expr,
            if self.negated { "NOT " } else { "" },
            self.value
        )
    }
}

/// `IS [NOT] DISTINCT FROM`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsDistinctFromExpr {
    pub negated: bool,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

impl fmt::Display for IsDistinctFromExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} IS {}DISTINCT FROM {}",
            self.left,
            if self.negated { "NOT " } else { "" },
            self.right
        )
    }
}

/// `IS [NOT] JSON [item-type]`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsJsonExpr {
    pub expr: Box<Expr>,
    pub negated: bool,
    pub item_type: Option<JsonItemType>,
}

impl fmt::Display for IsJsonExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} IS {}JSON",
            self.expr,
            if self.negated { "NOT " } else { "" }
        )?;
        if let Some(item_type) = &self.item_type {
            write!(f, " {}", item_type)?;
        }
        Ok(())
    }
}

/// Item type of an `IS JSON` predicate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JsonItemType {
    /// VALUE
    Value,
    /// ARRAY
    Array,
    /// OBJECT
    Object,
    /// SCALAR
    Scalar,
}

impl fmt::Display for JsonItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Value => "VALUE",
            Self::Array => "ARRAY",
            Self::Object => "OBJECT",
            Self::Scalar => "SCALAR",
        })
    }
}

/// `IS [NOT] OF (type, ...)`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsOfTypeExpr {
    pub expr: Box<Expr>,
    pub negated: bool,
    pub types: Vec<DataType>,
}

impl fmt::Display for IsOfTypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} IS {}OF ({})",
            self.expr,
            if self.negated { "NOT " } else { "" },
            display_comma_separated(&self.types)
        )
    }
}

/// `INTERSECTS (left, right)` spatial predicate.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectsExpr {
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

impl fmt::Display for IntersectsExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INTERSECTS({}, {})", self.left, self.right)
    }
}

/// Simple or searched CASE.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaseExpr {
    pub operand: Option<Box<Expr>>,
    pub when_clauses: Vec<CaseWhen>,
    pub else_result: Option<Box<Expr>>,
}

/// One WHEN/THEN pair.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaseWhen {
    pub condition: Expr,
    pub result: Expr,
}

impl fmt::Display for CaseExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CASE")?;
        if let Some(operand) = &self.operand {
            write!(f, " {}", operand)?;
        }
        for clause in &self.when_clauses {
            write!(f, " WHEN {} THEN {}", clause.condition, clause.result)?;
        }
        if let Some(else_result) = &self.else_result {
            write!(f, " ELSE {}", else_result)?;
        }
        f.write_str(" END")
    }
}

/// `CAST(expr AS type)`; `postfix` records the `::` spelling.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastExpr {
    pub expr: Box<Expr>,
    pub data_type: DataType,
    pub postfix: bool,
}

impl fmt::Display for CastExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.postfix {
            write!(f, "{}::{}", self.expr, self.data_type)
        } else {
            write!(f, "CAST({} AS {})", self.expr, self.data_type)
        }
    }
}

/// Field dereference on a row value.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldAccessExpr {
    pub expr: Box<Expr>,
    pub field: Ident,
}

impl fmt::Display for FieldAccessExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.expr, self.field)
    }
}

/// Array element reference.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayElementExpr {
    pub array: Box<Expr>,
    pub index: Box<Expr>,
}

impl fmt::Display for ArrayElementExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.array, self.index)
    }
}

/// `ARRAY[...]` or `ARRAY(subquery)`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrayConstructorExpr {
    List(Vec<Expr>),
    Subquery(Box<Query>),
}

impl fmt::Display for ArrayConstructorExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(items) => write!(f, "ARRAY[{}]", display_comma_separated(items)),
            Self::Subquery(query) => write!(f, "ARRAY({})", query),
        }
    }
}

/// `ROW(...)`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowConstructorExpr {
    pub values: Vec<Expr>,
}

impl fmt::Display for RowConstructorExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ROW({})", display_comma_separated(&self.values))
    }
}

/// Current-value specials.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurrentValue {
    /// CURRENT_DATE
    CurrentDate,
    /// CURRENT_TIME
    CurrentTime,
    /// CURRENT_TIMESTAMP
    CurrentTimestamp,
    /// LOCALTIME
    LocalTime,
    /// LOCALTIMESTAMP
    LocalTimestamp,
    /// CURRENT_USER
    CurrentUser,
    /// SESSION_USER
    SessionUser,
    /// SYSTEM_USER
    SystemUser,
    /// CURRENT_CATALOG
    CurrentCatalog,
    /// CURRENT_SCHEMA
    CurrentSchema,
    /// ROWNUM
    RowNumber,
}

impl fmt::Display for CurrentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CurrentDate => "CURRENT_DATE",
            Self::CurrentTime => "CURRENT_TIME",
            Self::CurrentTimestamp => "CURRENT_TIMESTAMP",
            Self::LocalTime => "LOCALTIME",
            Self::LocalTimestamp => "LOCALTIMESTAMP",
            Self::CurrentUser => "CURRENT_USER",
            Self::SessionUser => "SESSION_USER",
            Self::SystemUser => "SYSTEM_USER",
            Self::CurrentCatalog => "CURRENT_CATALOG",
            Self::CurrentSchema => "CURRENT_SCHEMA",
            Self::RowNumber => "ROWNUM",
        })
    }
}

/// `NEXT VALUE FOR seq` / `CURRENT VALUE FOR seq`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceValueExpr {
    pub current: bool,
    pub sequence: ObjectName,
}

impl fmt::Display for SequenceValueExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} VALUE FOR {}",
            if self.current { "CURRENT" } else { "NEXT" },
            self.sequence
        )
    }
}

/// Session variable assignment.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableAssignmentExpr {
    pub name: Ident,
    pub value: Box<Expr>,
}

impl fmt::Display for VariableAssignmentExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{} := {}", self.name, self.value)
    }
}

/// `expr AT TIME ZONE zone` / `expr AT LOCAL`.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtTimeZoneExpr {
    pub expr: Box<Expr>,
    /// None means `AT LOCAL`.
    pub zone: Option<Box<Expr>>,
}

impl fmt::Display for AtTimeZoneExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.zone {
            Some(zone) => write!(f, "{} AT TIME ZONE {}", self.expr, zone),
            None => write!(f, "{} AT LOCAL", self.expr),
        }
    }
}

/// Interval qualifier applied as a postfix to a datetime subtraction.
#[doc(hidden)]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalQualifiedExpr {
    pub expr: Box<Expr>,
    pub qualifier: IntervalQualifier,
}

impl fmt::Display for IntervalQualifiedExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.expr, self.qualifier)
    }
}
