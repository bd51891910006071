//! # emsql-ast
//!
//! The abstract command tree of the emsql SQL front-end: typed expressions,
//! query models, statements and type descriptors. Every node re-emits
//! canonical SQL through `Display`, so a parsed command round-trips.

#![deny(unused_imports)]

mod data_type;
mod expr;
mod ident;
mod query;
mod stmt;
mod table;
mod utils;
mod value;

pub use self::{data_type::*, expr::*, ident::*, query::*, stmt::*, table::*, value::*};
