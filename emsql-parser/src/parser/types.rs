//! The type layer: parses type descriptors with multi-word names,
//! precision and scale, length units, interval qualifiers, composite
//! types and domain references.

use emsql_ast::{DataType, ExtTypeInfo, IntervalQualifier, PrimaryType, RowField};
use emsql_core::{ErrorKind, FrontendError, Keyword, Result};
use emsql_lexer::Token;

use crate::parser::Parser;

const MAX_NUMERIC_PRECISION: i64 = 100_000;

impl<'a> Parser<'a> {
    /// Parses a type descriptor.
    pub fn parse_data_type(&mut self) -> Result<DataType> {
        let mut data_type = self.parse_simple_data_type()?;
        // `INTEGER ARRAY`, `INTEGER ARRAY[10]`, recursively
        while self.parse_keyword(Keyword::ARRAY) {
            let precision = if self.next_token_if_is(&Token::LeftBracket) {
                let n = self.parse_uint()?;
                self.expect_token(&Token::RightBracket)?;
                Some(n)
            } else {
                None
            };
            data_type = DataType {
                primary: PrimaryType::Array,
                precision,
                scale: None,
                ext: Some(Box::new(ExtTypeInfo::Array {
                    component: data_type,
                })),
            };
        }
        Ok(data_type)
    }

    fn parse_simple_data_type(&mut self) -> Result<DataType> {
        if let Some(keyword) = self.peek_token().which_keyword(&[
            Keyword::BOOLEAN,
            Keyword::TINYINT,
            Keyword::SMALLINT,
            Keyword::INT,
            Keyword::INTEGER,
            Keyword::BIGINT,
            Keyword::NUMERIC,
            Keyword::DECIMAL,
            Keyword::DEC,
            Keyword::NUMBER,
            Keyword::REAL,
            Keyword::DOUBLE,
            Keyword::DECFLOAT,
            Keyword::CHAR,
            Keyword::CHARACTER,
            Keyword::NATIONAL,
            Keyword::VARCHAR,
            Keyword::VARCHAR_IGNORECASE,
            Keyword::CLOB,
            Keyword::BINARY,
            Keyword::VARBINARY,
            Keyword::BLOB,
            Keyword::LONG,
            Keyword::RAW,
            Keyword::DATE,
            Keyword::TIME,
            Keyword::TIMESTAMP,
            Keyword::INTERVAL,
            Keyword::JSON,
            Keyword::GEOMETRY,
            Keyword::UUID,
            Keyword::ENUM,
            Keyword::ROW,
        ]) {
            self.next_token();
            return self.parse_keyword_data_type(keyword);
        }
        // FLOAT and TEXT are not keywords; then domain references
        if self.parse_contextual("FLOAT") {
            let precision = self.parse_optional_precision()?;
            return Ok(match precision {
                Some(p) if p <= 24 => DataType::simple(PrimaryType::Real),
                _ => DataType::simple(PrimaryType::Double),
            });
        }
        if self.parse_contextual("TEXT") {
            return Ok(DataType::simple(PrimaryType::Clob));
        }
        // PostgreSQL `::regclass` casts resolve to the object id type
        if self.parse_contextual("REGCLASS") {
            return Ok(DataType::simple(PrimaryType::Integer));
        }
        self.parse_domain_reference()
    }

    fn parse_keyword_data_type(&mut self, keyword: Keyword) -> Result<DataType> {
        let flags = self.session().config().flags;
        match keyword {
            Keyword::BOOLEAN => Ok(DataType::simple(PrimaryType::Boolean)),
            Keyword::TINYINT | Keyword::SMALLINT | Keyword::INT | Keyword::INTEGER
            | Keyword::BIGINT => {
                let primary = match keyword {
                    Keyword::TINYINT => PrimaryType::TinyInt,
                    Keyword::SMALLINT => PrimaryType::SmallInt,
                    Keyword::BIGINT => PrimaryType::BigInt,
                    _ => PrimaryType::Integer,
                };
                // `(n)` display width parses and is discarded in MySQL mode
                if flags.integer_precision_noop {
                    let _ = self.parse_optional_precision()?;
                }
                if flags.unsigned_keyword_noop {
                    self.parse_keyword(Keyword::UNSIGNED);
                }
                Ok(DataType::simple(primary))
            }
            Keyword::NUMERIC | Keyword::DECIMAL | Keyword::DEC => {
                let (precision, scale) = self.parse_precision_scale()?;
                Ok(DataType {
                    primary: PrimaryType::Numeric,
                    precision,
                    scale,
                    ext: None,
                })
            }
            Keyword::NUMBER => {
                let (precision, scale) = self.parse_precision_scale()?;
                if precision.is_none() && flags.number_is_decfloat {
                    return Ok(DataType::with_precision(PrimaryType::Decfloat, 40));
                }
                Ok(DataType {
                    primary: PrimaryType::Numeric,
                    precision,
                    scale,
                    ext: None,
                })
            }
            Keyword::REAL => Ok(DataType::simple(PrimaryType::Real)),
            Keyword::DOUBLE => {
                self.parse_keyword(Keyword::PRECISION);
                Ok(DataType::simple(PrimaryType::Double))
            }
            Keyword::DECFLOAT => {
                let precision = self.parse_optional_precision()?;
                Ok(DataType {
                    primary: PrimaryType::Decfloat,
                    precision,
                    scale: None,
                    ext: None,
                })
            }
            Keyword::CHAR | Keyword::CHARACTER => self.parse_character_type(),
            Keyword::NATIONAL => {
                if !self.parse_keyword(Keyword::CHARACTER) && !self.parse_keyword(Keyword::CHAR) {
                    return self.expected("CHARACTER");
                }
                self.parse_character_type()
            }
            Keyword::VARCHAR => {
                let precision = self.parse_length()?;
                Ok(DataType {
                    primary: PrimaryType::Varchar,
                    precision,
                    scale: None,
                    ext: None,
                })
            }
            Keyword::VARCHAR_IGNORECASE => {
                let precision = self.parse_length()?;
                Ok(DataType {
                    primary: PrimaryType::VarcharIgnoreCase,
                    precision,
                    scale: None,
                    ext: None,
                })
            }
            Keyword::CLOB => {
                let precision = self.parse_length()?;
                Ok(DataType {
                    primary: PrimaryType::Clob,
                    precision,
                    scale: None,
                    ext: None,
                })
            }
            Keyword::BINARY => {
                if self.parse_keyword(Keyword::VARYING) {
                    let precision = self.parse_length()?;
                    return Ok(DataType {
                        primary: PrimaryType::Varbinary,
                        precision,
                        scale: None,
                        ext: None,
                    });
                }
                if self.parse_keywords(&[Keyword::LARGE, Keyword::OBJECT]) {
                    let precision = self.parse_length()?;
                    return Ok(DataType {
                        primary: PrimaryType::Blob,
                        precision,
                        scale: None,
                        ext: None,
                    });
                }
                let precision = self.parse_length()?;
                let primary = if self.session().config().variable_binary {
                    PrimaryType::Varbinary
                } else {
                    PrimaryType::Binary
                };
                Ok(DataType {
                    primary,
                    precision,
                    scale: None,
                    ext: None,
                })
            }
            Keyword::VARBINARY => {
                let precision = self.parse_length()?;
                Ok(DataType {
                    primary: PrimaryType::Varbinary,
                    precision,
                    scale: None,
                    ext: None,
                })
            }
            Keyword::BLOB => {
                let precision = self.parse_length()?;
                Ok(DataType {
                    primary: PrimaryType::Blob,
                    precision,
                    scale: None,
                    ext: None,
                })
            }
            Keyword::LONG => {
                if self.parse_keyword(Keyword::RAW) {
                    Ok(DataType::simple(PrimaryType::Varbinary))
                } else {
                    Ok(DataType::simple(PrimaryType::Clob))
                }
            }
            Keyword::RAW => {
                let precision = self.parse_length()?;
                Ok(DataType {
                    primary: PrimaryType::Varbinary,
                    precision,
                    scale: None,
                    ext: None,
                })
            }
            Keyword::DATE => Ok(DataType::simple(PrimaryType::Date)),
            Keyword::TIME => {
                let precision = self.parse_optional_precision()?;
                let with_time_zone = self.parse_time_zone_clause()?;
                Ok(DataType {
                    primary: if with_time_zone {
                        PrimaryType::TimeTz
                    } else {
                        PrimaryType::Time
                    },
                    precision,
                    scale: None,
                    ext: None,
                })
            }
            Keyword::TIMESTAMP => {
                let precision = self.parse_optional_precision()?;
                let with_time_zone = self.parse_time_zone_clause()?;
                Ok(DataType {
                    primary: if with_time_zone {
                        PrimaryType::TimestampTz
                    } else {
                        PrimaryType::Timestamp
                    },
                    precision,
                    scale: None,
                    ext: None,
                })
            }
            Keyword::INTERVAL => {
                let (qualifier, leading, fractional) = self.parse_interval_qualifier_full()?;
                Ok(DataType {
                    primary: PrimaryType::Interval(qualifier),
                    precision: leading.map(i64::from),
                    scale: fractional.map(|s| s as i32),
                    ext: None,
                })
            }
            Keyword::JSON => Ok(DataType::simple(PrimaryType::Json)),
            Keyword::UUID => Ok(DataType::simple(PrimaryType::Uuid)),
            Keyword::GEOMETRY => self.parse_geometry_type(),
            Keyword::ENUM => self.parse_enum_type(),
            Keyword::ROW => self.parse_row_type(),
            _ => unreachable!("caller restricts the keyword set"),
        }
    }

    fn parse_character_type(&mut self) -> Result<DataType> {
        if self.parse_keyword(Keyword::VARYING) {
            let precision = self.parse_length()?;
            return Ok(DataType {
                primary: PrimaryType::Varchar,
                precision,
                scale: None,
                ext: None,
            });
        }
        if self.parse_keywords(&[Keyword::LARGE, Keyword::OBJECT]) {
            let precision = self.parse_length()?;
            return Ok(DataType {
                primary: PrimaryType::Clob,
                precision,
                scale: None,
                ext: None,
            });
        }
        let precision = self.parse_length()?;
        if let Some(p) = precision {
            if p < 1 && !self.session().config().quirks {
                return Err(FrontendError::new(
                    ErrorKind::InvalidValuePrecision,
                    format!("Invalid precision {}", p),
                ));
            }
        }
        Ok(DataType {
            primary: PrimaryType::Char,
            precision,
            scale: None,
            ext: None,
        })
    }

    fn parse_time_zone_clause(&mut self) -> Result<bool> {
        if self.parse_keyword(Keyword::WITH) {
            self.expect_keywords(&[Keyword::TIME, Keyword::ZONE])?;
            return Ok(true);
        }
        if self.parse_keyword(Keyword::WITHOUT) {
            self.expect_keywords(&[Keyword::TIME, Keyword::ZONE])?;
        }
        Ok(false)
    }

    fn parse_geometry_type(&mut self) -> Result<DataType> {
        if !self.next_token_if_is(&Token::LeftParen) {
            return Ok(DataType::simple(PrimaryType::Geometry));
        }
        let subtype = self.parse_identifier()?.value;
        let srid = if self.next_token_if_is(&Token::Comma) {
            let srid = self.parse_uint()?;
            Some(srid as i32)
        } else {
            None
        };
        self.expect_token(&Token::RightParen)?;
        Ok(DataType {
            primary: PrimaryType::Geometry,
            precision: None,
            scale: None,
            ext: Some(Box::new(ExtTypeInfo::Geometry {
                subtype: Some(subtype),
                srid,
            })),
        })
    }

    fn parse_enum_type(&mut self) -> Result<DataType> {
        let labels = self.parse_parenthesized(|parser| match parser.next_token() {
            Token::CharString(label) => Ok(label),
            _ => parser.expected("an enum label"),
        })?;
        Ok(DataType {
            primary: PrimaryType::Enum,
            precision: None,
            scale: None,
            ext: Some(Box::new(ExtTypeInfo::Enum { labels })),
        })
    }

    fn parse_row_type(&mut self) -> Result<DataType> {
        let fields = self.parse_parenthesized(|parser| {
            let name = parser.parse_identifier()?;
            let data_type = parser.parse_data_type()?;
            Ok(RowField { name, data_type })
        })?;
        for (n, field) in fields.iter().enumerate() {
            if fields[..n].iter().any(|other| other.name == field.name) {
                return Err(FrontendError::new(
                    ErrorKind::DuplicateColumnName,
                    format!("Duplicate column name \"{}\"", field.name.value),
                ));
            }
        }
        Ok(DataType {
            primary: PrimaryType::Row,
            precision: None,
            scale: None,
            ext: Some(Box::new(ExtTypeInfo::Row { fields })),
        })
    }

    fn parse_domain_reference(&mut self) -> Result<DataType> {
        let start = self.token_start();
        let name = match self.peek_token() {
            Token::Word(_) => self.parse_object_name()?,
            _ => return self.expected("a data type"),
        };
        let (schema, unqualified) = self.schema_and_name(&name)?;
        match self.resolver().find_domain(schema.as_deref(), &unqualified) {
            Some(domain) => {
                // inherit the domain's base type and keep a back-reference
                let mut data_type = domain.data_type.clone();
                if data_type.ext.is_none() {
                    data_type.ext = Some(Box::new(ExtTypeInfo::Domain { name }));
                }
                Ok(data_type)
            }
            None => Err(FrontendError {
                kind: ErrorKind::UnknownDataType,
                message: format!("Unknown data type \"{}\"", name),
                sql: None,
                offset: Some(start),
                expected: Vec::new(),
            }),
        }
    }

    // ---- interval qualifiers ----

    /// Parses an interval qualifier without precisions.
    pub(crate) fn parse_interval_qualifier(&mut self) -> Result<IntervalQualifier> {
        Ok(self.parse_interval_qualifier_full()?.0)
    }

    /// Parses the full interval qualifier grammar:
    /// `field [(p)] [TO field [(s)]]` and `SECOND [(p[, s])]`.
    pub(crate) fn parse_interval_qualifier_full(
        &mut self,
    ) -> Result<(IntervalQualifier, Option<u32>, Option<u32>)> {
        let fields = [
            Keyword::YEAR,
            Keyword::MONTH,
            Keyword::DAY,
            Keyword::HOUR,
            Keyword::MINUTE,
            Keyword::SECOND,
        ];
        let Some(leading) = self.parse_one_of_keywords(&fields) else {
            return self.expected("an interval qualifier");
        };
        if leading == Keyword::SECOND {
            // SECOND [(p [, s])]
            let (leading_precision, fractional) = if self.next_token_if_is(&Token::LeftParen) {
                let p = self.parse_uint()? as u32;
                let s = if self.next_token_if_is(&Token::Comma) {
                    Some(self.parse_uint()? as u32)
                } else {
                    None
                };
                self.expect_token(&Token::RightParen)?;
                (Some(p), s)
            } else {
                (None, None)
            };
            return Ok((IntervalQualifier::Second, leading_precision, fractional));
        }
        let leading_precision = if self.next_token_if_is(&Token::LeftParen) {
            let p = self.parse_uint()? as u32;
            self.expect_token(&Token::RightParen)?;
            Some(p)
        } else {
            None
        };
        if !self.parse_keyword(Keyword::TO) {
            let qualifier = match leading {
                Keyword::YEAR => IntervalQualifier::Year,
                Keyword::MONTH => IntervalQualifier::Month,
                Keyword::DAY => IntervalQualifier::Day,
                Keyword::HOUR => IntervalQualifier::Hour,
                Keyword::MINUTE => IntervalQualifier::Minute,
                _ => unreachable!("SECOND handled above"),
            };
            return Ok((qualifier, leading_precision, None));
        }
        let Some(tail) = self.parse_one_of_keywords(&fields) else {
            return self.expected("an interval field");
        };
        let qualifier = match (leading, tail) {
            (Keyword::YEAR, Keyword::MONTH) => IntervalQualifier::YearToMonth,
            (Keyword::DAY, Keyword::HOUR) => IntervalQualifier::DayToHour,
            (Keyword::DAY, Keyword::MINUTE) => IntervalQualifier::DayToMinute,
            (Keyword::DAY, Keyword::SECOND) => IntervalQualifier::DayToSecond,
            (Keyword::HOUR, Keyword::MINUTE) => IntervalQualifier::HourToMinute,
            (Keyword::HOUR, Keyword::SECOND) => IntervalQualifier::HourToSecond,
            (Keyword::MINUTE, Keyword::SECOND) => IntervalQualifier::MinuteToSecond,
            _ => return self.syntax_error("Invalid interval qualifier"),
        };
        let fractional = if tail == Keyword::SECOND && self.next_token_if_is(&Token::LeftParen) {
            let s = self.parse_uint()? as u32;
            self.expect_token(&Token::RightParen)?;
            Some(s)
        } else {
            None
        };
        Ok((qualifier, leading_precision, fractional))
    }

    // ---- precision helpers ----

    pub(crate) fn parse_uint(&mut self) -> Result<i64> {
        match self.next_token() {
            Token::Integer(n) if n >= 0 => Ok(n as i64),
            Token::Bigint(n) if n >= 0 => Ok(n),
            _ => self.expected("an unsigned integer"),
        }
    }

    fn parse_optional_precision(&mut self) -> Result<Option<i64>> {
        if self.next_token_if_is(&Token::LeftParen) {
            let n = self.parse_uint()?;
            self.expect_token(&Token::RightParen)?;
            Ok(Some(n))
        } else {
            Ok(None)
        }
    }

    /// `(p [, s])` with numeric bounds checked.
    fn parse_precision_scale(&mut self) -> Result<(Option<i64>, Option<i32>)> {
        if !self.next_token_if_is(&Token::LeftParen) {
            return Ok((None, None));
        }
        let precision = self.parse_uint()?;
        if !(1..=MAX_NUMERIC_PRECISION).contains(&precision) && !self.session().config().quirks {
            return Err(FrontendError::new(
                ErrorKind::InvalidValuePrecision,
                format!("Invalid precision {}", precision),
            ));
        }
        let scale = if self.next_token_if_is(&Token::Comma) {
            let scale = self.parse_uint()?;
            if scale > precision && !self.session().config().quirks {
                return Err(FrontendError::new(
                    ErrorKind::InvalidValueScale,
                    format!("Invalid scale {}", scale),
                ));
            }
            Some(scale as i32)
        } else {
            None
        };
        self.expect_token(&Token::RightParen)?;
        Ok((precision.into(), scale))
    }

    /// A character or binary length: `(n [K|M|G|T|P] [CHARACTERS|OCTETS|CHAR|BYTE])`.
    fn parse_length(&mut self) -> Result<Option<i64>> {
        if !self.next_token_if_is(&Token::LeftParen) {
            return Ok(None);
        }
        let mut n = self.parse_uint()?;
        if let Token::Word(word) = self.peek_token() {
            let shift = match word.value.to_uppercase().as_str() {
                "K" => Some(10),
                "M" => Some(20),
                "G" => Some(30),
                "T" => Some(40),
                "P" => Some(50),
                _ => None,
            };
            if let Some(shift) = shift {
                self.next_token();
                n = n
                    .checked_shl(shift)
                    .filter(|&v| v > 0)
                    .ok_or_else(|| {
                        FrontendError::new(
                            ErrorKind::InvalidValuePrecision,
                            "Length out of range",
                        )
                    })?;
            }
        }
        // the unit is accepted and ignored
        self.parse_one_of_keywords(&[
            Keyword::CHARACTERS,
            Keyword::OCTETS,
            Keyword::CHAR,
            Keyword::BYTE,
        ]);
        self.expect_token(&Token::RightParen)?;
        Ok(Some(n))
    }
}
