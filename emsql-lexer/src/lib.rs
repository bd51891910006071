//! # emsql-lexer
//!
//! The tokenizer of the emsql SQL front-end: converts a SQL string into a
//! sequence of tokens annotated with byte offsets.

#![deny(unused_imports)]

mod lexer;
mod token;

pub use self::{
    lexer::Tokenizer,
    token::{Token, TokenSpan, Word},
};
