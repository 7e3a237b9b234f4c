//! SQL text handling: script splitting, value-list lexing, and INSERT
//! parsing/rendering.

pub mod lexer;
pub mod splitter;
pub mod statement;

pub use lexer::{lex_values, tokenize_values, LexError};
pub use splitter::split_statements;
pub use statement::{parse_insert, render_insert};
