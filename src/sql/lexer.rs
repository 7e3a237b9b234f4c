//! Value-list tokenizer.
//!
//! Splits the text between the parentheses of a `VALUES (...)` clause into one
//! literal per column. Values may be quoted JSON documents, so commas only
//! separate tokens outside quotes and at zero paren/brace/bracket depth.

use std::fmt;

use crate::value::{coerce_literal, Coercion, SqlValue};

/// Unbalanced input in a value list
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    UnterminatedQuote,
    DanglingEscape,
    UnbalancedDelimiter { delimiter: char, depth: i32 },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedQuote => write!(f, "unterminated quoted value"),
            LexError::DanglingEscape => write!(f, "escape character at end of input"),
            LexError::UnbalancedDelimiter { delimiter, depth } => {
                write!(f, "unbalanced '{}' (depth {})", delimiter, depth)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Scanner state for a single value list.
#[derive(Default)]
struct ValueScanner {
    tokens: Vec<String>,
    current: String,
    in_quote: bool,
    escape_next: bool,
    paren_depth: i32,
    brace_depth: i32,
    bracket_depth: i32,
    /// Opener of the first delimiter closed without one
    underflow: Option<char>,
}

impl ValueScanner {
    fn at_top_level(&self) -> bool {
        !self.in_quote && self.paren_depth == 0 && self.brace_depth == 0 && self.bracket_depth == 0
    }

    fn push(&mut self, c: char) {
        if self.escape_next {
            self.current.push(c);
            self.escape_next = false;
            return;
        }

        match c {
            '\\' => {
                self.escape_next = true;
                self.current.push(c);
            }
            '\'' => {
                self.in_quote = !self.in_quote;
                self.current.push(c);
            }
            _ if self.in_quote => self.current.push(c),
            ',' if self.at_top_level() => self.flush(),
            _ => {
                match c {
                    '(' => self.paren_depth += 1,
                    ')' => self.paren_depth -= 1,
                    '{' => self.brace_depth += 1,
                    '}' => self.brace_depth -= 1,
                    '[' => self.bracket_depth += 1,
                    ']' => self.bracket_depth -= 1,
                    _ => {}
                }
                if self.underflow.is_none() {
                    self.underflow = [
                        ('(', self.paren_depth),
                        ('{', self.brace_depth),
                        ('[', self.bracket_depth),
                    ]
                    .into_iter()
                    .find(|(_, depth)| *depth < 0)
                    .map(|(delimiter, _)| delimiter);
                }
                self.current.push(c);
            }
        }
    }

    fn flush(&mut self) {
        let token = self.current.trim();
        if !token.is_empty() {
            self.tokens.push(token.to_string());
        }
        self.current.clear();
    }

    fn finish(mut self) -> Result<Vec<String>, LexError> {
        if self.in_quote {
            return Err(LexError::UnterminatedQuote);
        }
        if self.escape_next {
            return Err(LexError::DanglingEscape);
        }
        // A closer without an opener is malformed even if a later opener rebalances it
        if let Some(delimiter) = self.underflow {
            return Err(LexError::UnbalancedDelimiter { delimiter, depth: -1 });
        }
        for (delimiter, depth) in [
            ('(', self.paren_depth),
            ('{', self.brace_depth),
            ('[', self.bracket_depth),
        ] {
            if depth != 0 {
                return Err(LexError::UnbalancedDelimiter { delimiter, depth });
            }
        }
        self.flush();
        Ok(self.tokens)
    }
}

/// Split a value list into raw, trimmed literal substrings.
///
/// # Example
///
/// ```ignore
/// let tokens = tokenize_values("'a,b', 3, NULL")?;
/// assert_eq!(tokens, vec!["'a,b'", "3", "NULL"]);
/// ```
pub fn tokenize_values(values: &str) -> Result<Vec<String>, LexError> {
    let mut scanner = ValueScanner::default();
    for c in values.chars() {
        scanner.push(c);
    }
    scanner.finish()
}

/// Split a value list and coerce each literal.
pub fn lex_values(values: &str) -> Result<Vec<SqlValue>, LexError> {
    let tokens = tokenize_values(values)?;
    Ok(tokens
        .iter()
        .map(|token| {
            let coerced = coerce_literal(token);
            if let Coercion::Opaque { cause, .. } = &coerced {
                tracing::debug!("Keeping literal as text ({:?}): {}", cause, token);
            }
            coerced.into_value()
        })
        .collect())
}
