//! Literal values.

use core::fmt;

use crate::{data_type::IntervalQualifier, utils::escape_single_quote_string};

/// A literal value as recognized by the front-end.
///
/// Numbers beyond 64 bits and all date/time values are carried as their
/// source spelling; the front-end folds constants but does not evaluate.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// NULL
    Null,
    /// TRUE / FALSE
    Boolean(bool),
    /// 32-bit integer
    Int(i32),
    /// 64-bit integer
    Bigint(i64),
    /// Exact numeric of arbitrary precision
    Numeric(String),
    /// Approximate numeric (DECFLOAT)
    Decfloat(String),
    /// Character string
    CharString(String),
    /// Binary string
    BinaryString(Vec<u8>),
    /// DATE 'value'
    Date(String),
    /// TIME 'value' with or without time zone
    Time {
        /// The time text.
        value: String,
        /// Whether the type carries a time zone.
        with_time_zone: bool,
    },
    /// TIMESTAMP 'value' with or without time zone
    Timestamp {
        /// The timestamp text.
        value: String,
        /// Whether the type carries a time zone.
        with_time_zone: bool,
    },
    /// UUID 'value'
    Uuid(String),
    /// JSON 'value'
    Json(String),
    /// GEOMETRY 'WKT' or GEOMETRY X'EWKB'
    Geometry(GeometrySource),
    /// INTERVAL 'value' qualifier
    Interval {
        /// The interval text.
        value: String,
        /// The qualifier.
        qualifier: IntervalQualifier,
        /// Leading precision, when given.
        leading_precision: Option<u32>,
        /// Fractional seconds precision, when given.
        fractional_precision: Option<u32>,
    },
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Int(v) => write!(f, "{}", v),
            Self::Bigint(v) => write!(f, "{}", v),
            Self::Numeric(v) | Self::Decfloat(v) => f.write_str(v),
            Self::CharString(v) => write!(f, "'{}'", escape_single_quote_string(v)),
            Self::BinaryString(v) => {
                f.write_str("X'")?;
                for byte in v {
                    write!(f, "{:02x}", byte)?;
                }
                f.write_str("'")
            }
            Self::Date(v) => write!(f, "DATE '{}'", v),
            Self::Time {
                value,
                with_time_zone,
            } => {
                if *with_time_zone {
                    write!(f, "TIME WITH TIME ZONE '{}'", value)
                } else {
                    write!(f, "TIME '{}'", value)
                }
            }
            Self::Timestamp {
                value,
                with_time_zone,
            } => {
                if *with_time_zone {
                    write!(f, "TIMESTAMP WITH TIME ZONE '{}'", value)
                } else {
                    write!(f, "TIMESTAMP '{}'", value)
                }
            }
            Self::Uuid(v) => write!(f, "UUID '{}'", v),
            Self::Json(v) => write!(f, "JSON '{}'", escape_single_quote_string(v)),
            Self::Geometry(source) => write!(f, "GEOMETRY {}", source),
            Self::Interval {
                value,
                qualifier,
                leading_precision,
                fractional_precision,
            } => {
                write!(f, "INTERVAL '{}' ", escape_single_quote_string(value))?;
                if let (IntervalQualifier::Second, Some(p), Some(s)) =
                    (qualifier, leading_precision, fractional_precision)
                {
                    return write!(f, "SECOND({}, {})", p, s);
                }
                let text = qualifier.to_string();
                let (first, rest) = match text.split_once(' ') {
                    Some((first, rest)) => (first, Some(rest)),
                    None => (text.as_str(), None),
                };
                f.write_str(first)?;
                if let Some(p) = leading_precision {
                    write!(f, "({})", p)?;
                }
                if let Some(rest) = rest {
                    write!(f, " {}", rest)?;
                }
                if let Some(s) = fractional_precision {
                    if text.ends_with("SECOND") && !matches!(qualifier, IntervalQualifier::Second) {
                        write!(f, "({})", s)?;
                    } else if matches!(qualifier, IntervalQualifier::Second)
                        && leading_precision.is_none()
                    {
                        write!(f, "({})", s)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// The source form of a geometry literal.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeometrySource {
    /// Well-known text.
    Wkt(String),
    /// Extended well-known binary.
    Ewkb(Vec<u8>),
}

impl fmt::Display for GeometrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wkt(text) => write!(f, "'{}'", escape_single_quote_string(text)),
            Self::Ewkb(bytes) => {
                f.write_str("X'")?;
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                f.write_str("'")
            }
        }
    }
}
