//! # emsql
//!
//! The SQL front-end of an embeddable relational database: a tokenizer and
//! a hand-written recursive-descent parser that transform a raw SQL string
//! into a fully typed, resolved command tree ready for planning and
//! execution.
//!
//! ```
//! use emsql::{prepare, Column, Database, Session, Table, MAIN_SCHEMA};
//! use emsql::ast::{DataType, PrimaryType};
//!
//! let database = Database::new("DEMO");
//! database
//!     .add_table(
//!         MAIN_SCHEMA,
//!         Table::new(
//!             "T",
//!             vec![Column::new("A", DataType::simple(PrimaryType::Integer))],
//!         ),
//!     )
//!     .unwrap();
//! let session = Session::new(database);
//! let prepared = prepare(&session, "SELECT A FROM T WHERE A > ?").unwrap();
//! assert_eq!(prepared.parameters.len(), 1);
//! ```

#![deny(unused_imports)]

mod command;

/// The abstract command tree.
pub mod ast {
    pub use emsql_ast::*;
}

pub use command::Command;
pub use emsql_catalog::{
    Column, Database, Domain, FunctionAlias, Sequence, Session, Table, TableKind, UserAggregate,
    MAIN_SCHEMA,
};
pub use emsql_core::{
    AllowLiterals, CaseFolding, CompatMode, ErrorKind, FrontendError, Keyword, KeywordSet,
    ModeFlags, ParserConfig, Result,
};
pub use emsql_lexer::{Token, TokenSpan, Tokenizer, Word};
pub use emsql_parser::{
    parse_column_list, parse_domain_constraint_expression, parse_expression, parse_table_name,
    prepare, prepare_command, ColumnList, CommandList, NameResolver, ParameterDef, Parser,
    Prepared, ResolvedTable,
};
