//! Function calls: builtins, compatibility functions, user-defined
//! functions, aggregates and window functions.

use core::fmt;

use crate::{
    expr::Expr,
    ident::{Ident, ObjectName},
    query::SortSpec,
    utils::display_comma_separated,
};

/// A function invocation of any kind.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionCall {
    /// The name as written (canonicalized).
    pub name: ObjectName,
    /// How the name resolved.
    pub kind: FunctionKind,
    /// The arguments.
    pub args: Vec<Expr>,
    /// `DISTINCT` argument quantifier (aggregates).
    pub distinct: bool,
    /// Trailing `ORDER BY` inside the argument list (e.g. `LISTAGG`).
    pub order_by: Vec<SortSpec>,
    /// `WITHIN GROUP (ORDER BY ...)`.
    pub within_group: Vec<SortSpec>,
    /// `FILTER (WHERE ...)`.
    pub filter: Option<Box<Expr>>,
    /// `OVER (...)` or `OVER name`.
    pub over: Option<WindowRef>,
}

impl FunctionCall {
    /// A plain call without aggregate or window decorations.
    pub fn simple(name: ObjectName, kind: FunctionKind, args: Vec<Expr>) -> Self {
        Self {
            name,
            kind,
            args,
            distinct: false,
            order_by: Vec::new(),
            within_group: Vec::new(),
            filter: None,
            over: None,
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        write!(f, "{}", display_comma_separated(&self.args))?;
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", display_comma_separated(&self.order_by))?;
        }
        f.write_str(")")?;
        if !self.within_group.is_empty() {
            write!(
                f,
                " WITHIN GROUP (ORDER BY {})",
                display_comma_separated(&self.within_group)
            )?;
        }
        if let Some(filter) = &self.filter {
            write!(f, " FILTER (WHERE {})", filter)?;
        }
        if let Some(over) = &self.over {
            write!(f, " OVER {}", over)?;
        }
        Ok(())
    }
}

/// How a function name resolved.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionKind {
    /// One of the enumerated builtin functions.
    Builtin(BuiltinFunction),
    /// One of the compatibility functions.
    Compatibility(CompatFunction),
    /// An aggregate function.
    Aggregate(AggregateKind),
    /// A pure window function.
    Window(WindowKind),
    /// A user-defined function alias.
    UserDefined,
    /// A user-defined aggregate.
    UserAggregate,
    /// A table-valued function used in FROM.
    Table,
}

macro_rules! named_function_enum {
    (
        $(#[$doc:meta])*
        $name:ident { $( $variant:ident => $text:expr ),* $(,)? }
    ) => {
        $(#[$doc])*
        #[allow(missing_docs)]
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            /// Resolves an upper-cased name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// The canonical name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

named_function_enum! {
    /// The closed set of aggregate functions.
    AggregateKind {
        Count => "COUNT",
        Sum => "SUM",
        Avg => "AVG",
        Min => "MIN",
        Max => "MAX",
        StddevPop => "STDDEV_POP",
        StddevSamp => "STDDEV_SAMP",
        VarPop => "VAR_POP",
        VarSamp => "VAR_SAMP",
        CovarPop => "COVAR_POP",
        CovarSamp => "COVAR_SAMP",
        Corr => "CORR",
        RegrSlope => "REGR_SLOPE",
        RegrIntercept => "REGR_INTERCEPT",
        RegrCount => "REGR_COUNT",
        RegrR2 => "REGR_R2",
        RegrAvgX => "REGR_AVGX",
        RegrAvgY => "REGR_AVGY",
        RegrSxx => "REGR_SXX",
        RegrSxy => "REGR_SXY",
        RegrSyy => "REGR_SYY",
        Histogram => "HISTOGRAM",
        ListAgg => "LISTAGG",
        ArrayAgg => "ARRAY_AGG",
        RankAgg => "RANK",
        DenseRankAgg => "DENSE_RANK",
        PercentRankAgg => "PERCENT_RANK",
        CumeDistAgg => "CUME_DIST",
        PercentileCont => "PERCENTILE_CONT",
        PercentileDisc => "PERCENTILE_DISC",
        Mode => "MODE",
        JsonObjectAgg => "JSON_OBJECTAGG",
        JsonArrayAgg => "JSON_ARRAYAGG",
        AnyAgg => "ANY",
        SomeAgg => "SOME",
        EveryAgg => "EVERY",
        BoolAnd => "BOOL_AND",
        BoolOr => "BOOL_OR",
        BitAndAgg => "BIT_AND_AGG",
        BitOrAgg => "BIT_OR_AGG",
        BitXorAgg => "BIT_XOR_AGG",
    }
}

impl AggregateKind {
    /// Resolves aggregate synonyms before the canonical lookup.
    pub fn from_name_with_synonyms(name: &str) -> Option<Self> {
        match name {
            "STDDEV" => Some(Self::StddevSamp),
            "VARIANCE" => Some(Self::VarSamp),
            "STRING_AGG" | "GROUP_CONCAT" => Some(Self::ListAgg),
            other => Self::from_name(other),
        }
    }

    /// Whether the aggregate is a hypothetical-set or inverse-distribution
    /// function that takes `WITHIN GROUP`.
    pub fn takes_within_group(self) -> bool {
        matches!(
            self,
            Self::RankAgg
                | Self::DenseRankAgg
                | Self::PercentRankAgg
                | Self::CumeDistAgg
                | Self::PercentileCont
                | Self::PercentileDisc
        )
    }
}

named_function_enum! {
    /// The closed set of pure window functions.
    WindowKind {
        RowNumber => "ROW_NUMBER",
        Rank => "RANK",
        DenseRank => "DENSE_RANK",
        PercentRank => "PERCENT_RANK",
        CumeDist => "CUME_DIST",
        Ntile => "NTILE",
        Lead => "LEAD",
        Lag => "LAG",
        FirstValue => "FIRST_VALUE",
        LastValue => "LAST_VALUE",
        NthValue => "NTH_VALUE",
    }
}

named_function_enum! {
    /// The closed set of builtin scalar functions.
    BuiltinFunction {
        Abs => "ABS",
        Acos => "ACOS",
        Asin => "ASIN",
        Atan => "ATAN",
        Atan2 => "ATAN2",
        Ceil => "CEIL",
        Ceiling => "CEILING",
        Cos => "COS",
        Cot => "COT",
        Degrees => "DEGREES",
        Exp => "EXP",
        Floor => "FLOOR",
        Ln => "LN",
        Log => "LOG",
        Log10 => "LOG10",
        Mod => "MOD",
        Pi => "PI",
        Power => "POWER",
        Radians => "RADIANS",
        Rand => "RAND",
        Random => "RANDOM",
        Round => "ROUND",
        Sign => "SIGN",
        Sin => "SIN",
        Sqrt => "SQRT",
        Tan => "TAN",
        Truncate => "TRUNC",
        BitAnd => "BITAND",
        BitOr => "BITOR",
        BitXor => "BITXOR",
        BitNot => "BITNOT",
        LShift => "LSHIFT",
        RShift => "RSHIFT",
        Length => "LENGTH",
        CharLength => "CHAR_LENGTH",
        OctetLength => "OCTET_LENGTH",
        Lower => "LOWER",
        Upper => "UPPER",
        Left => "LEFT",
        Right => "RIGHT",
        Lpad => "LPAD",
        Rpad => "RPAD",
        Ltrim => "LTRIM",
        Rtrim => "RTRIM",
        Trim => "TRIM",
        Substring => "SUBSTRING",
        Position => "POSITION",
        Replace => "REPLACE",
        Repeat => "REPEAT",
        ConcatFn => "CONCAT",
        Ascii => "ASCII",
        Chr => "CHR",
        Soundex => "SOUNDEX",
        Space => "SPACE",
        Translate => "TRANSLATE",
        RegexpReplace => "REGEXP_REPLACE",
        RegexpLike => "REGEXP_LIKE",
        RegexpSubstr => "REGEXP_SUBSTR",
        Now => "NOW",
        DateAdd => "DATEADD",
        DateDiff => "DATEDIFF",
        DateTrunc => "DATE_TRUNC",
        Extract => "EXTRACT",
        FormatDateTime => "FORMATDATETIME",
        ParseDateTime => "PARSEDATETIME",
        DayName => "DAYNAME",
        MonthName => "MONTHNAME",
        Year => "YEAR",
        Month => "MONTH",
        Day => "DAY_OF_MONTH",
        Hour => "HOUR",
        Minute => "MINUTE",
        Second => "SECOND",
        Week => "WEEK",
        Quarter => "QUARTER",
        DayOfWeek => "DAY_OF_WEEK",
        DayOfYear => "DAY_OF_YEAR",
        Coalesce => "COALESCE",
        Greatest => "GREATEST",
        Least => "LEAST",
        NullIf => "NULLIF",
        Hash => "HASH",
        RandomUuid => "RANDOM_UUID",
        Compress => "COMPRESS",
        Expand => "EXPAND",
        Encrypt => "ENCRYPT",
        Decrypt => "DECRYPT",
        Zero => "ZERO",
        ArrayLength => "ARRAY_LENGTH",
        ArrayContains => "ARRAY_CONTAINS",
        ArrayCat => "ARRAY_CAT",
        ArraySlice => "ARRAY_SLICE",
        JsonObject => "JSON_OBJECT",
        JsonArray => "JSON_ARRAY",
        CsvRead => "CSVREAD",
        CsvWrite => "CSVWRITE",
        DatabaseName => "DATABASE",
        DatabasePath => "DATABASE_PATH",
        Memory => "MEMORY_USED",
        FileRead => "FILE_READ",
        FileWrite => "FILE_WRITE",
        TruncateValue => "TRUNCATE_VALUE",
        Cardinality => "CARDINALITY",
    }
}

named_function_enum! {
    /// The compatibility function family; recognized only when the name is
    /// not shadowed by a user-defined function and the session allows it.
    CompatFunction {
        Decode => "DECODE",
        Nvl => "NVL",
        Nvl2 => "NVL2",
        IfNull => "IFNULL",
        CurDate => "CURDATE",
        CurTime => "CURTIME",
        DayNameCompat => "DAY_NAME",
        Instr => "INSTR",
        Lcase => "LCASE",
        Ucase => "UCASE",
        Substr => "SUBSTR",
        CurrVal => "CURRVAL",
        NextVal => "NEXTVAL",
        ToDate => "TO_DATE",
        ToChar => "TO_CHAR",
        ToNumber => "TO_NUMBER",
        SysDate => "SYSDATE",
        SysTimestamp => "SYSTIMESTAMP",
        Convert => "CONVERT",
    }
}

/// Reference to a window: inline spec or a name declared in WINDOW.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowRef {
    /// `OVER name`.
    Name(Ident),
    /// `OVER (spec)`.
    Spec(WindowSpec),
}

impl fmt::Display for WindowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{}", name),
            Self::Spec(spec) => write!(f, "({})", spec),
        }
    }
}

/// An inline window specification.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowSpec {
    /// Base window name.
    pub base: Option<Ident>,
    /// `PARTITION BY`.
    pub partition_by: Vec<Expr>,
    /// `ORDER BY`.
    pub order_by: Vec<SortSpec>,
    /// Frame clause.
    pub frame: Option<WindowFrame>,
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut sep = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            Ok(())
        };
        if let Some(base) = &self.base {
            sep(f)?;
            write!(f, "{}", base)?;
        }
        if !self.partition_by.is_empty() {
            sep(f)?;
            write!(f, "PARTITION BY {}", display_comma_separated(&self.partition_by))?;
        }
        if !self.order_by.is_empty() {
            sep(f)?;
            write!(f, "ORDER BY {}", display_comma_separated(&self.order_by))?;
        }
        if let Some(frame) = &self.frame {
            sep(f)?;
            write!(f, "{}", frame)?;
        }
        Ok(())
    }
}

/// A window frame.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowFrame {
    /// ROWS / RANGE / GROUPS.
    pub units: FrameUnits,
    /// Frame start.
    pub start: FrameBound,
    /// Frame end; absent means `CURRENT ROW`.
    pub end: Option<FrameBound>,
    /// `EXCLUDE` clause.
    pub exclude: Option<FrameExclude>,
}

impl WindowFrame {
    /// Well-formedness: the start bound must not follow the end bound.
    pub fn is_well_formed(&self) -> bool {
        fn rank(bound: &FrameBound) -> u8 {
            match bound {
                FrameBound::UnboundedPreceding => 0,
                FrameBound::Preceding(_) => 1,
                FrameBound::CurrentRow => 2,
                FrameBound::Following(_) => 3,
                FrameBound::UnboundedFollowing => 4,
            }
        }
        let implicit_end = FrameBound::CurrentRow;
        let end = self.end.as_ref().unwrap_or(&implicit_end);
        if matches!(self.start, FrameBound::UnboundedFollowing) {
            return false;
        }
        if matches!(end, FrameBound::UnboundedPreceding) {
            return false;
        }
        rank(&self.start) <= rank(end)
    }
}

impl fmt::Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.units)?;
        match &self.end {
            Some(end) => write!(f, "BETWEEN {} AND {}", self.start, end)?,
            None => write!(f, "{}", self.start)?,
        }
        if let Some(exclude) = &self.exclude {
            write!(f, " EXCLUDE {}", exclude)?;
        }
        Ok(())
    }
}

/// Frame units.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameUnits {
    /// ROWS
    Rows,
    /// RANGE
    Range,
    /// GROUPS
    Groups,
}

impl fmt::Display for FrameUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rows => "ROWS",
            Self::Range => "RANGE",
            Self::Groups => "GROUPS",
        })
    }
}

/// A frame bound.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameBound {
    /// UNBOUNDED PRECEDING
    UnboundedPreceding,
    /// `expr PRECEDING`
    Preceding(Box<Expr>),
    /// CURRENT ROW
    CurrentRow,
    /// `expr FOLLOWING`
    Following(Box<Expr>),
    /// UNBOUNDED FOLLOWING
    UnboundedFollowing,
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundedPreceding => f.write_str("UNBOUNDED PRECEDING"),
            Self::Preceding(expr) => write!(f, "{} PRECEDING", expr),
            Self::CurrentRow => f.write_str("CURRENT ROW"),
            Self::Following(expr) => write!(f, "{} FOLLOWING", expr),
            Self::UnboundedFollowing => f.write_str("UNBOUNDED FOLLOWING"),
        }
    }
}

/// Frame exclusion.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameExclude {
    /// EXCLUDE CURRENT ROW
    CurrentRow,
    /// EXCLUDE GROUP
    Group,
    /// EXCLUDE TIES
    Ties,
    /// EXCLUDE NO OTHERS
    NoOthers,
}

impl fmt::Display for FrameExclude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CurrentRow => "CURRENT ROW",
            Self::Group => "GROUP",
            Self::Ties => "TIES",
            Self::NoOthers => "NO OTHERS",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_lookup() {
        assert_eq!(AggregateKind::from_name("COUNT"), Some(AggregateKind::Count));
        assert_eq!(
            AggregateKind::from_name_with_synonyms("STRING_AGG"),
            Some(AggregateKind::ListAgg)
        );
        assert_eq!(
            AggregateKind::from_name_with_synonyms("GROUP_CONCAT"),
            Some(AggregateKind::ListAgg)
        );
        assert_eq!(AggregateKind::from_name("NO_SUCH"), None);
        assert!(AggregateKind::PercentileCont.takes_within_group());
        assert!(!AggregateKind::Sum.takes_within_group());
    }

    #[test]
    fn frame_well_formedness() {
        let ok = WindowFrame {
            units: FrameUnits::Rows,
            start: FrameBound::UnboundedPreceding,
            end: Some(FrameBound::CurrentRow),
            exclude: None,
        };
        assert!(ok.is_well_formed());

        let backwards = WindowFrame {
            units: FrameUnits::Rows,
            start: FrameBound::CurrentRow,
            end: Some(FrameBound::UnboundedPreceding),
            exclude: None,
        };
        assert!(!backwards.is_well_formed());

        let start_only = WindowFrame {
            units: FrameUnits::Range,
            start: FrameBound::UnboundedFollowing,
            end: None,
            exclude: None,
        };
        assert!(!start_only.is_well_formed());
    }
}
