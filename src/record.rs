//! Flat table records shared by both conversion directions.

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

use crate::error::ConvertError;
use crate::value::SqlValue;

/// Contents of one column slot
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Value(SqlValue),
    /// SQL evaluated by the database, written verbatim (e.g. `NOW()`)
    Expression(String),
    Absent,
}

/// One row: a table name plus ordered column values.
///
/// A column may be marked absent while a record is being built for output;
/// absent columns are left out of the rendered statement entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub table: String,
    columns: IndexMap<String, Cell>,
}

impl Record {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: IndexMap::new(),
        }
    }

    /// Pair parsed column names with parsed values.
    pub fn from_columns_and_values(
        table: impl Into<String>,
        columns: Vec<String>,
        values: Vec<SqlValue>,
    ) -> Result<Self, ConvertError> {
        let table = table.into();

        if columns.len() != values.len() {
            return Err(ConvertError::FieldCountMismatch {
                statement: format!("INSERT INTO {}", table),
                columns,
                values: values.iter().map(SqlValue::to_literal).collect(),
            });
        }

        let mut record = Record::new(table);
        for (column, value) in columns.into_iter().zip(values) {
            if record.columns.contains_key(&column) {
                return Err(ConvertError::DuplicateColumn {
                    table: record.table,
                    column,
                });
            }
            record.columns.insert(column, Cell::Value(value));
        }

        Ok(record)
    }

    pub fn set(&mut self, column: impl Into<String>, value: SqlValue) {
        self.columns.insert(column.into(), Cell::Value(value));
    }

    pub fn set_expression(&mut self, column: impl Into<String>, expression: impl Into<String>) {
        self.columns.insert(column.into(), Cell::Expression(expression.into()));
    }

    pub fn set_absent(&mut self, column: impl Into<String>) {
        self.columns.insert(column.into(), Cell::Absent);
    }

    /// Value of a column holding a literal value.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        match self.columns.get(column) {
            Some(Cell::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Columns holding literal values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.columns.iter().filter_map(|(column, cell)| match cell {
            Cell::Value(value) => Some((column.as_str(), value)),
            _ => None,
        })
    }

    /// Number of columns that will be written.
    pub fn len(&self) -> usize {
        self.columns
            .values()
            .filter(|cell| !matches!(cell, Cell::Absent))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column names and rendered literals, skipping absent columns.
    pub fn to_columns_and_values(&self) -> (Vec<String>, Vec<String>) {
        self.columns
            .iter()
            .filter_map(|(column, cell)| {
                let literal = match cell {
                    Cell::Value(value) => value.to_literal(),
                    Cell::Expression(expression) => expression.clone(),
                    Cell::Absent => return None,
                };
                Some((column.clone(), literal))
            })
            .unzip()
    }

    /// JSON view used for NDJSON inspection output.
    pub fn to_json(&self) -> JsonValue {
        let columns: Map<String, JsonValue> = self
            .iter()
            .map(|(column, value)| (column.to_string(), value.clone().into_json()))
            .collect();

        let mut object = Map::new();
        object.insert("table".to_string(), JsonValue::String(self.table.clone()));
        object.insert("columns".to_string(), JsonValue::Object(columns));
        JsonValue::Object(object)
    }
}
