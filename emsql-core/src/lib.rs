//! # emsql-core
//!
//! Core types shared by the emsql SQL front-end: the keyword table, the
//! compatibility modes with their dialect flags, the per-session parser
//! configuration, and the front-end error type.

#![deny(unused_imports)]

mod config;
mod error;
mod keyword;
mod mode;

pub use self::{
    config::{AllowLiterals, CaseFolding, ParserConfig},
    error::{ErrorKind, FrontendError, Result},
    keyword::{Keyword, KeywordSet, ALL_KEYWORDS, ALL_KEYWORD_STRINGS, FIRST_KEYWORD, LAST_KEYWORD},
    mode::{CompatMode, ModeFlags},
};
