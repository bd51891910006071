//! Type descriptors.

use core::fmt;

use crate::ident::{Ident, ObjectName};

/// A fully parsed type descriptor: primary type, precision, scale and
/// extended info for composite types.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataType {
    /// The primary type.
    pub primary: PrimaryType,
    /// Precision or length, when given.
    pub precision: Option<i64>,
    /// Scale, when given.
    pub scale: Option<i32>,
    /// Extended information for ARRAY / ROW / ENUM / GEOMETRY and domain
    /// references.
    pub ext: Option<Box<ExtTypeInfo>>,
}

impl DataType {
    /// A plain type without precision or extended info.
    pub fn simple(primary: PrimaryType) -> Self {
        Self {
            primary,
            precision: None,
            scale: None,
            ext: None,
        }
    }

    /// A type with a precision.
    pub fn with_precision(primary: PrimaryType, precision: i64) -> Self {
        Self {
            precision: Some(precision),
            ..Self::simple(primary)
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.primary, self.ext.as_deref()) {
            (PrimaryType::Array, Some(ExtTypeInfo::Array { component })) => {
                write!(f, "{} ARRAY", component)?;
                if let Some(n) = self.precision {
                    write!(f, "[{}]", n)?;
                }
                return Ok(());
            }
            (PrimaryType::Row, Some(ExtTypeInfo::Row { fields })) => {
                f.write_str("ROW(")?;
                let mut first = true;
                for field in fields {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "{} {}", field.name, field.data_type)?;
                }
                return f.write_str(")");
            }
            (PrimaryType::Enum, Some(ExtTypeInfo::Enum { labels })) => {
                f.write_str("ENUM(")?;
                let mut first = true;
                for label in labels {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "'{}'", label.replace('\'', "''"))?;
                }
                return f.write_str(")");
            }
            (PrimaryType::Geometry, Some(ExtTypeInfo::Geometry { subtype, srid })) => {
                f.write_str("GEOMETRY")?;
                if let Some(subtype) = subtype {
                    write!(f, "({}", subtype)?;
                    if let Some(srid) = srid {
                        write!(f, ", {}", srid)?;
                    }
                    f.write_str(")")?;
                }
                return Ok(());
            }
            (_, Some(ExtTypeInfo::Domain { name })) => {
                return write!(f, "{}", name);
            }
            _ => {}
        }
        write!(f, "{}", self.primary)?;
        if let PrimaryType::Interval(_) = self.primary {
            // precision is rendered inside the qualifier
            return Ok(());
        }
        if let Some(precision) = self.precision {
            write!(f, "({}", precision)?;
            if let Some(scale) = self.scale {
                write!(f, ", {}", scale)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// The primary SQL types.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimaryType {
    /// BOOLEAN
    Boolean,
    /// TINYINT
    TinyInt,
    /// SMALLINT
    SmallInt,
    /// INTEGER
    Integer,
    /// BIGINT
    BigInt,
    /// NUMERIC / DECIMAL
    Numeric,
    /// REAL
    Real,
    /// DOUBLE PRECISION
    Double,
    /// DECFLOAT
    Decfloat,
    /// CHAR
    Char,
    /// VARCHAR
    Varchar,
    /// VARCHAR_IGNORECASE
    VarcharIgnoreCase,
    /// CLOB
    Clob,
    /// BINARY
    Binary,
    /// VARBINARY
    Varbinary,
    /// BLOB
    Blob,
    /// DATE
    Date,
    /// TIME
    Time,
    /// TIME WITH TIME ZONE
    TimeTz,
    /// TIMESTAMP
    Timestamp,
    /// TIMESTAMP WITH TIME ZONE
    TimestampTz,
    /// INTERVAL with one of the 13 qualifiers
    Interval(IntervalQualifier),
    /// ARRAY
    Array,
    /// ROW
    Row,
    /// ENUM
    Enum,
    /// JSON
    Json,
    /// GEOMETRY
    Geometry,
    /// UUID
    Uuid,
}

impl fmt::Display for PrimaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::TinyInt => f.write_str("TINYINT"),
            Self::SmallInt => f.write_str("SMALLINT"),
            Self::Integer => f.write_str("INTEGER"),
            Self::BigInt => f.write_str("BIGINT"),
            Self::Numeric => f.write_str("NUMERIC"),
            Self::Real => f.write_str("REAL"),
            Self::Double => f.write_str("DOUBLE PRECISION"),
            Self::Decfloat => f.write_str("DECFLOAT"),
            Self::Char => f.write_str("CHAR"),
            Self::Varchar => f.write_str("VARCHAR"),
            Self::VarcharIgnoreCase => f.write_str("VARCHAR_IGNORECASE"),
            Self::Clob => f.write_str("CLOB"),
            Self::Binary => f.write_str("BINARY"),
            Self::Varbinary => f.write_str("VARBINARY"),
            Self::Blob => f.write_str("BLOB"),
            Self::Date => f.write_str("DATE"),
            Self::Time => f.write_str("TIME"),
            Self::TimeTz => f.write_str("TIME WITH TIME ZONE"),
            Self::Timestamp => f.write_str("TIMESTAMP"),
            Self::TimestampTz => f.write_str("TIMESTAMP WITH TIME ZONE"),
            Self::Interval(qualifier) => write!(f, "INTERVAL {}", qualifier),
            Self::Array => f.write_str("ARRAY"),
            Self::Row => f.write_str("ROW"),
            Self::Enum => f.write_str("ENUM"),
            Self::Json => f.write_str("JSON"),
            Self::Geometry => f.write_str("GEOMETRY"),
            Self::Uuid => f.write_str("UUID"),
        }
    }
}

/// The 13 interval qualifiers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntervalQualifier {
    /// YEAR
    Year,
    /// MONTH
    Month,
    /// DAY
    Day,
    /// HOUR
    Hour,
    /// MINUTE
    Minute,
    /// SECOND
    Second,
    /// YEAR TO MONTH
    YearToMonth,
    /// DAY TO HOUR
    DayToHour,
    /// DAY TO MINUTE
    DayToMinute,
    /// DAY TO SECOND
    DayToSecond,
    /// HOUR TO MINUTE
    HourToMinute,
    /// HOUR TO SECOND
    HourToSecond,
    /// MINUTE TO SECOND
    MinuteToSecond,
}

impl fmt::Display for IntervalQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
            Self::YearToMonth => "YEAR TO MONTH",
            Self::DayToHour => "DAY TO HOUR",
            Self::DayToMinute => "DAY TO MINUTE",
            Self::DayToSecond => "DAY TO SECOND",
            Self::HourToMinute => "HOUR TO MINUTE",
            Self::HourToSecond => "HOUR TO SECOND",
            Self::MinuteToSecond => "MINUTE TO SECOND",
        })
    }
}

/// A named field of a ROW type.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowField {
    /// The field name.
    pub name: Ident,
    /// The field type.
    pub data_type: DataType,
}

/// Extended type information.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtTypeInfo {
    /// Component type of an ARRAY.
    Array {
        /// The component type.
        component: DataType,
    },
    /// Ordered fields of a ROW, duplicate-free.
    Row {
        /// The fields in declaration order.
        fields: Vec<RowField>,
    },
    /// Labels of an ENUM, in declaration order.
    Enum {
        /// The labels.
        labels: Vec<String>,
    },
    /// GEOMETRY subtype and SRID.
    Geometry {
        /// The geometry subtype, e.g. `POINT`.
        subtype: Option<String>,
        /// The spatial reference id.
        srid: Option<i32>,
    },
    /// A reference to the domain the type was inherited from.
    Domain {
        /// The domain name as written.
        name: ObjectName,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_simple_types() {
        assert_eq!(DataType::simple(PrimaryType::Boolean).to_string(), "BOOLEAN");
        assert_eq!(
            DataType::with_precision(PrimaryType::Varchar, 10).to_string(),
            "VARCHAR(10)"
        );
        let numeric = DataType {
            primary: PrimaryType::Numeric,
            precision: Some(10),
            scale: Some(2),
            ext: None,
        };
        assert_eq!(numeric.to_string(), "NUMERIC(10, 2)");
    }

    #[test]
    fn display_composite_types() {
        let array = DataType {
            primary: PrimaryType::Array,
            precision: Some(8),
            scale: None,
            ext: Some(Box::new(ExtTypeInfo::Array {
                component: DataType::simple(PrimaryType::Integer),
            })),
        };
        assert_eq!(array.to_string(), "INTEGER ARRAY[8]");

        let row = DataType {
            primary: PrimaryType::Row,
            precision: None,
            scale: None,
            ext: Some(Box::new(ExtTypeInfo::Row {
                fields: vec![
                    RowField {
                        name: Ident::new("A"),
                        data_type: DataType::simple(PrimaryType::Integer),
                    },
                    RowField {
                        name: Ident::new("B"),
                        data_type: DataType::with_precision(PrimaryType::Varchar, 5),
                    },
                ],
            })),
        };
        assert_eq!(row.to_string(), "ROW(A INTEGER, B VARCHAR(5))");

        let geometry = DataType {
            primary: PrimaryType::Geometry,
            precision: None,
            scale: None,
            ext: Some(Box::new(ExtTypeInfo::Geometry {
                subtype: Some("POINT".into()),
                srid: Some(4326),
            })),
        };
        assert_eq!(geometry.to_string(), "GEOMETRY(POINT, 4326)");
    }

    #[test]
    fn display_interval_types() {
        assert_eq!(
            DataType::simple(PrimaryType::Interval(IntervalQualifier::DayToSecond)).to_string(),
            "INTERVAL DAY TO SECOND"
        );
    }
}
