//! # emsql-catalog
//!
//! The in-memory catalog (database, schemas, tables, sequences, domains,
//! function aliases) and the session object surface the parser consumes.

#![deny(unused_imports)]

mod database;
mod objects;
mod session;

pub use self::{
    database::{Database, MAIN_SCHEMA},
    objects::{Column, Domain, FunctionAlias, Sequence, Table, TableKind, UserAggregate},
    session::Session,
};
