//! Typed SQL values and two-way coercion between values and SQL literals.
//!
//! Every literal coerces to some [`SqlValue`]; the steps that can fail (JSON
//! decoding, numeric parsing) are surfaced through [`Coercion`] so callers that
//! care can see when a literal fell back to plain text.

use serde_json::{Number, Value as JsonValue};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// A single column value, as read from or written to an INSERT statement
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Nested JSON document (object or array) stored in a text/JSON column
    Json(JsonValue),
}

impl SqlValue {
    /// Render this value as a SQL literal.
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Bool(true) => "true".to_string(),
            SqlValue::Bool(false) => "false".to_string(),
            SqlValue::Number(n) => n.to_string(),
            SqlValue::String(s) => quote(s),
            SqlValue::Json(doc) => {
                // Pretty printing a Value cannot fail; compact output is the fallback anyway.
                let text = serde_json::to_string_pretty(doc).unwrap_or_else(|_| doc.to_string());
                quote(&text)
            }
        }
    }

    /// Parse a SQL literal. Never fails; unrecognized input becomes a string.
    pub fn from_literal(literal: &str) -> SqlValue {
        coerce_literal(literal).into_value()
    }

    /// Lift a document value into a SQL value. Containers become [`SqlValue::Json`].
    pub fn from_json(value: JsonValue) -> SqlValue {
        match value {
            JsonValue::Null => SqlValue::Null,
            JsonValue::Bool(b) => SqlValue::Bool(b),
            JsonValue::Number(n) => SqlValue::Number(n),
            JsonValue::String(s) => SqlValue::String(s),
            doc @ (JsonValue::Array(_) | JsonValue::Object(_)) => SqlValue::Json(doc),
        }
    }

    pub fn into_json(self) -> JsonValue {
        match self {
            SqlValue::Null => JsonValue::Null,
            SqlValue::Bool(b) => JsonValue::Bool(b),
            SqlValue::Number(n) => JsonValue::Number(n),
            SqlValue::String(s) => JsonValue::String(s),
            SqlValue::Json(doc) => doc,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

/// Why a literal could not be given a more specific type than plain text
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackCause {
    /// Quoted text looked like JSON but did not decode
    InvalidJson(String),
    /// Unquoted token that is neither a keyword nor a number
    Unrecognized,
}

/// Outcome of coercing one literal
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion {
    Typed(SqlValue),
    Opaque { text: String, cause: FallbackCause },
}

impl Coercion {
    /// Collapse to a value, keeping opaque text as a string.
    pub fn into_value(self) -> SqlValue {
        match self {
            Coercion::Typed(value) => value,
            Coercion::Opaque { text, .. } => SqlValue::String(text),
        }
    }
}

/// Coerce one trimmed literal, reporting fallbacks explicitly.
pub fn coerce_literal(literal: &str) -> Coercion {
    let literal = literal.trim();

    if literal.eq_ignore_ascii_case("NULL") {
        return Coercion::Typed(SqlValue::Null);
    }
    if literal.eq_ignore_ascii_case("true") {
        return Coercion::Typed(SqlValue::Bool(true));
    }
    if literal.eq_ignore_ascii_case("false") {
        return Coercion::Typed(SqlValue::Bool(false));
    }

    // NOW(), CURRENT_TIMESTAMP() and friends are evaluated by the database
    if function_call_pattern().is_match(literal) {
        return Coercion::Typed(SqlValue::Null);
    }

    if literal.len() >= 2 && literal.starts_with('\'') && literal.ends_with('\'') {
        let text = literal[1..literal.len() - 1].replace("''", "'");
        if text.starts_with('{') || text.starts_with('[') {
            return match serde_json::from_str::<JsonValue>(&text) {
                Ok(doc) => Coercion::Typed(SqlValue::Json(doc)),
                Err(e) => Coercion::Opaque {
                    text,
                    cause: FallbackCause::InvalidJson(e.to_string()),
                },
            };
        }
        return Coercion::Typed(SqlValue::String(text));
    }

    if let Ok(i) = literal.parse::<i64>() {
        return Coercion::Typed(SqlValue::Number(Number::from(i)));
    }
    if let Ok(u) = literal.parse::<u64>() {
        return Coercion::Typed(SqlValue::Number(Number::from(u)));
    }
    if let Some(n) = literal.parse::<f64>().ok().and_then(Number::from_f64) {
        return Coercion::Typed(SqlValue::Number(n));
    }

    Coercion::Opaque {
        text: literal.to_string(),
        cause: FallbackCause::Unrecognized,
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn function_call_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*\(\)$").expect("function call pattern is valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(SqlValue::from_literal("NULL"), SqlValue::Null);
        assert_eq!(SqlValue::from_literal("null"), SqlValue::Null);
        assert_eq!(SqlValue::from_literal("TRUE"), SqlValue::Bool(true));
        assert_eq!(SqlValue::from_literal("False"), SqlValue::Bool(false));
    }

    #[test]
    fn test_function_call_becomes_null() {
        assert_eq!(SqlValue::from_literal("NOW()"), SqlValue::Null);
        assert_eq!(SqlValue::from_literal("current_timestamp()"), SqlValue::Null);
        // Arguments are not a bare call
        assert_eq!(
            SqlValue::from_literal("coalesce(a)"),
            SqlValue::String("coalesce(a)".to_string())
        );
    }

    #[test]
    fn test_large_unsigned_integer_stays_integral() {
        let value = SqlValue::Number(Number::from(u64::MAX));
        assert_eq!(value.to_literal(), "18446744073709551615");
        assert_eq!(SqlValue::from_literal(&value.to_literal()), value);
        assert_eq!(
            SqlValue::from_literal("-9223372036854775808"),
            SqlValue::Number(Number::from(i64::MIN))
        );
    }

    #[test]
    fn test_quoted_string_unescapes_doubled_quotes() {
        let literal = SqlValue::String("O'Brien".to_string()).to_literal();
        assert_eq!(literal, "'O''Brien'");
        assert_eq!(SqlValue::from_literal(&literal), SqlValue::String("O'Brien".to_string()));
    }

    #[test]
    fn test_quoted_json_is_decoded() {
        let value = SqlValue::from_literal(r#"'{"x": [1,2,3], "name": "it''s"}'"#);
        assert_eq!(value, SqlValue::Json(json!({"x": [1, 2, 3], "name": "it's"})));
    }

    #[test]
    fn test_invalid_json_falls_back_to_text() {
        let coerced = coerce_literal("'{not json'");
        match &coerced {
            Coercion::Opaque { text, cause: FallbackCause::InvalidJson(_) } => {
                assert_eq!(text, "{not json");
            }
            other => panic!("expected opaque json fallback, got {:?}", other),
        }
        assert_eq!(coerced.into_value(), SqlValue::String("{not json".to_string()));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(SqlValue::from_literal("42"), SqlValue::Number(42.into()));
        assert_eq!(SqlValue::from_literal("-7"), SqlValue::Number((-7).into()));
        assert_eq!(
            SqlValue::from_literal("2.5"),
            SqlValue::Number(Number::from_f64(2.5).unwrap())
        );
    }

    #[test]
    fn test_unrecognized_token_is_opaque() {
        assert_eq!(
            coerce_literal("EN_US"),
            Coercion::Opaque { text: "EN_US".to_string(), cause: FallbackCause::Unrecognized }
        );
        // Non-finite floats have no JSON representation
        assert_eq!(SqlValue::from_literal("inf"), SqlValue::String("inf".to_string()));
    }

    #[test]
    fn test_literal_round_trip() {
        let values = vec![
            SqlValue::Null,
            SqlValue::Bool(true),
            SqlValue::Number(3.into()),
            SqlValue::Number(Number::from_f64(1.0).unwrap()),
            SqlValue::String("plain".to_string()),
            SqlValue::String(String::new()),
            SqlValue::Json(json!({"rules": [{"op": "in", "values": ["a", "b'c"]}]})),
            SqlValue::Json(json!([])),
        ];

        for value in values {
            assert_eq!(SqlValue::from_literal(&value.to_literal()), value);
        }
    }

    #[test]
    fn test_json_literal_is_pretty_printed() {
        let literal = SqlValue::Json(json!({"a": 1})).to_literal();
        assert_eq!(literal, "'{\n  \"a\": 1\n}'");
    }
}
