//! Error types shared by both conversion directions.

use std::fmt;

/// Error type for conversion operations
#[derive(Debug)]
pub enum ConvertError {
    /// Column list and value list of one statement differ in length.
    FieldCountMismatch {
        statement: String,
        columns: Vec<String>,
        values: Vec<String>,
    },
    /// Unbalanced quoting or delimiter depth in a value list.
    MalformedLiteral {
        statement: String,
        reason: String,
    },
    DuplicateColumn {
        table: String,
        column: String,
    },
    NotAnInsert {
        statement: String,
    },
    MissingRequiredField {
        kind: &'static str,
        entity: String,
        field: String,
    },
    Config(String),
    IoError(std::io::Error),
    YamlError(serde_yaml::Error),
    JsonError(serde_json::Error),
}

impl ConvertError {
    /// True for errors that only invalidate a single statement.
    pub fn is_statement_local(&self) -> bool {
        matches!(
            self,
            ConvertError::FieldCountMismatch { .. }
                | ConvertError::MalformedLiteral { .. }
                | ConvertError::DuplicateColumn { .. }
                | ConvertError::NotAnInsert { .. }
        )
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::FieldCountMismatch { statement, columns, values } => write!(
                f,
                "Column count ({}) != value count ({}) in statement: {}\n  columns: {:?}\n  values: {:?}",
                columns.len(),
                values.len(),
                abbreviate(statement),
                columns,
                values
            ),
            ConvertError::MalformedLiteral { statement, reason } => {
                write!(f, "Malformed value list ({}) in statement: {}", reason, abbreviate(statement))
            }
            ConvertError::DuplicateColumn { table, column } => {
                write!(f, "Column '{}' appears more than once in INSERT INTO {}", column, table)
            }
            ConvertError::NotAnInsert { statement } => {
                write!(f, "Not a parseable INSERT statement: {}", abbreviate(statement))
            }
            ConvertError::MissingRequiredField { kind, entity, field } => {
                write!(f, "{} '{}' is missing required field '{}'", kind, entity, field)
            }
            ConvertError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ConvertError::IoError(e) => write!(f, "IO error: {}", e),
            ConvertError::YamlError(e) => write!(f, "YAML error: {}", e),
            ConvertError::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::IoError(e) => Some(e),
            ConvertError::YamlError(e) => Some(e),
            ConvertError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::IoError(err)
    }
}

impl From<serde_yaml::Error> for ConvertError {
    fn from(err: serde_yaml::Error) -> Self {
        ConvertError::YamlError(err)
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::JsonError(err)
    }
}

/// Keep diagnostics readable when a statement carries large JSON blobs.
fn abbreviate(statement: &str) -> String {
    const LIMIT: usize = 160;
    match statement.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &statement[..idx]),
        None => statement.to_string(),
    }
}
