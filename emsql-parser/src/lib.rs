//! # emsql-parser
//!
//! The recursive-descent parser of the emsql SQL front-end: transforms a
//! SQL string into a fully typed, name-resolved [`Prepared`] command.
//!
//! Entry points: [`prepare`], [`prepare_command`], [`parse_expression`],
//! [`parse_domain_constraint_expression`], [`parse_table_name`] and
//! [`parse_column_list`].

#![deny(unused_imports)]

mod param;
mod parser;
mod prepared;
mod resolver;

pub use self::{
    param::ParameterDef,
    parser::{
        parse_column_list, parse_domain_constraint_expression, parse_expression, parse_table_name,
        prepare, prepare_command, ColumnList, Parser,
    },
    prepared::{CommandList, Prepared},
    resolver::{NameResolver, ResolvedTable},
};
