//! Parsing a single INSERT statement into a [`Record`] and rendering one back.

use crate::error::ConvertError;
use crate::record::Record;
use crate::sql::lexer::lex_values;

const INSERT_INTO: &str = "INSERT INTO";
const VALUES: &str = "VALUES";

/// Parse one `INSERT INTO table (cols) VALUES (vals);` statement.
pub fn parse_insert(statement: &str) -> Result<Record, ConvertError> {
    let not_an_insert = || ConvertError::NotAnInsert {
        statement: statement.to_string(),
    };

    // ASCII uppercasing keeps byte offsets aligned with the original text
    let upper = statement.to_ascii_uppercase();
    let insert_idx = upper.find(INSERT_INTO).ok_or_else(not_an_insert)?;
    let rest = statement[insert_idx + INSERT_INTO.len()..].trim_start();

    let table_len = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
        .unwrap_or(rest.len());
    if table_len == 0 {
        return Err(not_an_insert());
    }
    let table = &rest[..table_len];

    let rest = rest[table_len..].trim_start();
    let column_list = rest.strip_prefix('(').ok_or_else(not_an_insert)?;
    let close = column_list.find(')').ok_or_else(not_an_insert)?;
    let columns: Vec<String> = column_list[..close]
        .split(',')
        .map(|c| c.trim().trim_matches(&['`', '"'][..]).to_string())
        .filter(|c| !c.is_empty())
        .collect();

    let rest = column_list[close + 1..].trim_start();
    if !rest.to_ascii_uppercase().starts_with(VALUES) {
        return Err(not_an_insert());
    }
    let values_part = rest[VALUES.len()..].trim();
    let values_part = values_part.strip_prefix('(').ok_or_else(not_an_insert)?;
    let values_part = values_part.trim_end();
    let values_part = values_part.strip_suffix(';').unwrap_or(values_part).trim_end();
    let inner = values_part
        .strip_suffix(')')
        .ok_or_else(|| ConvertError::MalformedLiteral {
            statement: statement.to_string(),
            reason: "value list is not closed".to_string(),
        })?;

    let values = lex_values(inner).map_err(|e| ConvertError::MalformedLiteral {
        statement: statement.to_string(),
        reason: e.to_string(),
    })?;

    tracing::debug!("Parsed INSERT INTO {} with {} values", table, values.len());

    Record::from_columns_and_values(table, columns, values).map_err(|e| match e {
        ConvertError::FieldCountMismatch { columns, values, .. } => {
            ConvertError::FieldCountMismatch {
                statement: statement.to_string(),
                columns,
                values,
            }
        }
        other => other,
    })
}

/// Render a record as a multi-line INSERT statement.
pub fn render_insert(record: &Record) -> String {
    let (columns, values) = record.to_columns_and_values();
    let separator = ",\n    ";

    format!(
        "INSERT INTO {} (\n    {}\n) VALUES (\n    {}\n);",
        record.table,
        columns.join(separator),
        values.join(separator)
    )
}
