//! Field mappings between entity documents and table records.
//!
//! Each entity kind is described by one ordered table of [`FieldSpec`]s. The
//! same table drives both directions: document → record for generation and
//! record → document for parsing.

pub mod document;
pub mod template;

use serde_json::{Map, Value as JsonValue};

use crate::entity::{is_blank, EntityDocument, EntityKind};
use crate::error::ConvertError;
use crate::record::Record;
use crate::value::SqlValue;

/// What to write when a document leaves a field out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Generation fails when the field is missing
    Required,
    /// The column is omitted from the INSERT
    Optional,
    /// The column is written with a fixed fallback the schema expects
    Fallback(Fallback),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    EmptyObject,
    /// Database-side current timestamp
    Now,
}

/// One column ⇄ field correspondence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub column: &'static str,
    pub field: &'static str,
    pub presence: Presence,
    /// Column stores an embedded JSON document
    pub json: bool,
}

impl FieldSpec {
    pub const fn required(column: &'static str, field: &'static str) -> Self {
        Self { column, field, presence: Presence::Required, json: false }
    }

    pub const fn optional(column: &'static str, field: &'static str) -> Self {
        Self { column, field, presence: Presence::Optional, json: false }
    }

    pub const fn json(column: &'static str, field: &'static str) -> Self {
        Self { column, field, presence: Presence::Optional, json: true }
    }

    pub const fn with_fallback(self, fallback: Fallback) -> Self {
        Self { presence: Presence::Fallback(fallback), ..self }
    }
}

/// Ordered field table for one entity kind, bound to a concrete table name
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMapping {
    pub kind: EntityKind,
    pub table: String,
    pub fields: &'static [FieldSpec],
}

impl FieldMapping {
    pub fn new(kind: EntityKind, table: impl Into<String>) -> Self {
        let fields = match kind {
            EntityKind::Template => template::FIELDS,
            EntityKind::Document => document::FIELDS,
        };
        Self { kind, table: table.into(), fields }
    }

    /// True when a parsed table name refers to this mapping's table, with or
    /// without a schema qualifier.
    pub fn matches_table(&self, table: &str) -> bool {
        table.eq_ignore_ascii_case(&self.table)
            || base_name(table).eq_ignore_ascii_case(base_name(&self.table))
    }

    /// Flatten a (defaults-merged) document into a record in declared column order.
    pub fn to_record(&self, document: &EntityDocument) -> Result<Record, ConvertError> {
        let mut record = Record::new(self.table.clone());

        for spec in self.fields {
            match document.get(spec.field).filter(|value| !is_blank(value)) {
                Some(value) => record.set(spec.column, SqlValue::from_json(value.clone())),
                None => match spec.presence {
                    Presence::Required => {
                        return Err(ConvertError::MissingRequiredField {
                            kind: self.kind.label(),
                            entity: document.caption(self.kind),
                            field: spec.field.to_string(),
                        });
                    }
                    Presence::Optional => record.set_absent(spec.column),
                    Presence::Fallback(Fallback::EmptyObject) => {
                        record.set(spec.column, SqlValue::Json(JsonValue::Object(Map::new())))
                    }
                    Presence::Fallback(Fallback::Now) => record.set_expression(spec.column, "NOW()"),
                },
            }
        }

        Ok(record)
    }

    /// Project a parsed record back into a sparse document.
    pub fn to_document(&self, record: &Record) -> EntityDocument {
        let mut document = EntityDocument::new();

        for spec in self.fields {
            if let Some(value) = record.get(spec.column) {
                if spec.json && matches!(value, SqlValue::String(_)) {
                    tracing::warn!(
                        "{}.{} holds text that is not a JSON document; keeping it as a string",
                        record.table,
                        spec.column
                    );
                }
                let value = value.clone().into_json();
                if !is_blank(&value) {
                    document.insert(spec.field, value);
                }
            }
        }

        document
    }

    /// Document fields that no column maps to; these are not written.
    pub fn unmapped_fields<'a>(&self, document: &'a EntityDocument) -> Vec<&'a str> {
        document
            .field_names()
            .filter(|name| !self.fields.iter().any(|spec| spec.field == *name))
            .collect()
    }
}

/// Mappings for every entity kind handled in one run
#[derive(Debug, Clone, PartialEq)]
pub struct Mappings {
    pub template: FieldMapping,
    pub document: FieldMapping,
}

impl Mappings {
    pub fn new(template_table: impl Into<String>, document_table: impl Into<String>) -> Self {
        Self {
            template: FieldMapping::new(EntityKind::Template, template_table),
            document: FieldMapping::new(EntityKind::Document, document_table),
        }
    }

    pub fn get(&self, kind: EntityKind) -> &FieldMapping {
        match kind {
            EntityKind::Template => &self.template,
            EntityKind::Document => &self.document,
        }
    }

    /// Find the mapping for a parsed table name.
    pub fn for_table(&self, table: &str) -> Option<&FieldMapping> {
        EntityKind::ALL
            .iter()
            .map(|kind| self.get(*kind))
            .find(|mapping| mapping.matches_table(table))
    }
}

impl Default for Mappings {
    fn default() -> Self {
        Self::new(template::DEFAULT_TABLE, document::DEFAULT_TABLE)
    }
}

fn base_name(table: &str) -> &str {
    table.rsplit('.').next().unwrap_or(table)
}
