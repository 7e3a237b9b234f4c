//! Entity documents: the nested, human-editable shape of seed data.
//!
//! A document is an insertion-ordered map of field name to JSON value. Two kinds
//! exist (templates and stored documents); both are merged over a shared,
//! read-only [`Defaults`] map before they are flattened into table records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// The two kinds of seed entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Template,
    Document,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Template, EntityKind::Document];

    /// Top-level YAML key holding the entity list
    pub fn collection_key(&self) -> &'static str {
        match self {
            EntityKind::Template => "templates",
            EntityKind::Document => "documents",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Template => "Template",
            EntityKind::Document => "Document",
        }
    }

    /// Banner used for this kind's section in generated files
    pub fn section_title(&self) -> &'static str {
        match self {
            EntityKind::Template => "MASTER TEMPLATE DEFINITIONS",
            EntityKind::Document => "STORAGE INDEX (DOCUMENTS)",
        }
    }

    /// Fields tried in order when naming an entity in comments and errors
    fn caption_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Template => &["template_name", "template_type", "id"],
            EntityKind::Document => &["file_name", "id"],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One template or stored document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityDocument {
    fields: Map<String, JsonValue>,
}

impl EntityDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: JsonValue) {
        self.fields.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.fields.get(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_map(self) -> Map<String, JsonValue> {
        self.fields
    }

    /// Human-readable name for comments and diagnostics.
    pub fn caption(&self, kind: EntityKind) -> String {
        kind.caption_fields()
            .iter()
            .filter_map(|field| self.fields.get(*field))
            .find(|value| !is_blank(value))
            .map(|value| match value {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| "<unnamed>".to_string())
    }
}

/// Shared default field values, applied beneath every entity of one kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Defaults {
    values: Map<String, JsonValue>,
}

impl Defaults {
    pub fn new(values: Map<String, JsonValue>) -> Self {
        Self { values }
    }

    /// Layer `overrides` on top of these defaults.
    pub fn overlay(&self, overrides: &Defaults) -> Defaults {
        let mut values = self.values.clone();
        for (key, value) in &overrides.values {
            values.insert(key.clone(), value.clone());
        }
        Defaults { values }
    }

    /// Merge an entity over the defaults. Explicit fields win, even when null.
    pub fn apply(&self, entity: &EntityDocument) -> EntityDocument {
        let mut fields = self.values.clone();
        for (key, value) in &entity.fields {
            fields.insert(key.clone(), value.clone());
        }
        EntityDocument { fields }
    }

    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.values.get(field)
    }

    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Null, empty strings and empty containers carry no information and are
/// never written to either format.
pub fn is_blank(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(map) => map.is_empty(),
        JsonValue::Bool(_) | JsonValue::Number(_) => false,
    }
}
