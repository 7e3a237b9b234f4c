//! Seed-file loading and writing.
//!
//! A seed file is a YAML mapping with an optional `defaults:` block and a list
//! of entities under the kind's collection key:
//!
//! ```yaml
//! defaults:
//!   template_version: 1
//!   active_flag: true
//! templates:
//!   - id: 7c3e...
//!     template_type: MonthlyStatement
//!     template_name: Monthly Statement
//!     eligibility_criteria:
//!       operator: AND
//!       rules:
//!         - field: state
//!           values: [CA, NY]
//! ```

use serde_json::{Map, Value as JsonValue};
use std::fs;
use std::path::{Path, PathBuf};

use crate::entity::{Defaults, EntityDocument, EntityKind};
use crate::error::ConvertError;

/// Entities of one kind read from one seed file
#[derive(Debug, Clone, PartialEq)]
pub struct SeedCollection {
    pub kind: EntityKind,
    pub source: PathBuf,
    /// The file's own `defaults:` block
    pub defaults: Defaults,
    pub entities: Vec<EntityDocument>,
}

impl SeedCollection {
    pub fn new(kind: EntityKind, source: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            source: source.into(),
            defaults: Defaults::default(),
            entities: Vec::new(),
        }
    }

    pub fn with_entities(mut self, entities: Vec<EntityDocument>) -> Self {
        self.entities = entities;
        self
    }
}

/// Load a seed file.
///
/// # Errors
///
/// Fails when the file cannot be read, is not valid YAML, or holds entities
/// that are not mappings.
pub fn load_collection<P: AsRef<Path>>(path: P, kind: EntityKind) -> Result<SeedCollection, ConvertError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    parse_collection(&contents, kind, path)
}

/// Load a seed file when it exists.
pub fn load_collection_if_exists<P: AsRef<Path>>(
    path: P,
    kind: EntityKind,
) -> Result<Option<SeedCollection>, ConvertError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("{} not found, skipping {} entities", path.display(), kind);
        return Ok(None);
    }
    load_collection(path, kind).map(Some)
}

/// Parse seed-file text. `source` is only used for diagnostics.
pub fn parse_collection(contents: &str, kind: EntityKind, source: &Path) -> Result<SeedCollection, ConvertError> {
    let mut collection = SeedCollection::new(kind, source);

    let yaml: serde_yaml::Value = serde_yaml::from_str(contents)?;
    let root = match yaml {
        serde_yaml::Value::Null => return Ok(collection),
        serde_yaml::Value::Mapping(root) => root,
        _ => {
            return Err(ConvertError::Config(format!(
                "{}: top level must be a mapping",
                source.display()
            )))
        }
    };

    if let Some(defaults) = root.get("defaults") {
        if !defaults.is_null() {
            collection.defaults = serde_yaml::from_value(defaults.clone())?;
        }
    }

    match root.get(kind.collection_key()) {
        Some(entities) if !entities.is_null() => {
            collection.entities = serde_yaml::from_value(entities.clone()).map_err(|e| {
                ConvertError::Config(format!(
                    "{}: '{}' must be a list of mappings: {}",
                    source.display(),
                    kind.collection_key(),
                    e
                ))
            })?;
        }
        _ => tracing::warn!(
            "{} has no '{}' list",
            source.display(),
            kind.collection_key()
        ),
    }

    tracing::debug!(
        "Loaded {} {} entities from {}",
        collection.entities.len(),
        kind,
        source.display()
    );

    Ok(collection)
}

/// Render a seed file with a comment header.
pub fn render_collection(
    kind: EntityKind,
    defaults: Option<&Defaults>,
    entities: &[EntityDocument],
    origin: &str,
) -> Result<String, ConvertError> {
    let mut root = Map::new();
    if let Some(defaults) = defaults {
        root.insert("defaults".to_string(), JsonValue::Object(defaults.as_map().clone()));
    }
    root.insert(
        kind.collection_key().to_string(),
        JsonValue::Array(
            entities
                .iter()
                .map(|entity| JsonValue::Object(entity.clone().into_map()))
                .collect(),
        ),
    );

    let rule = format!("# {}", "=".repeat(77));
    let mut output = String::new();
    output.push_str(&rule);
    output.push('\n');
    output.push_str(&format!("# {}\n", kind.section_title()));
    output.push_str(&rule);
    output.push('\n');
    output.push_str(&format!("# Auto-generated from {} - Review and clean up as needed\n", origin));
    output.push_str(&rule);
    output.push_str("\n\n");
    output.push_str(&serde_yaml::to_string(&JsonValue::Object(root))?);

    Ok(output)
}

/// Write a rendered seed file.
pub fn write_collection<P: AsRef<Path>>(
    path: P,
    kind: EntityKind,
    defaults: Option<&Defaults>,
    entities: &[EntityDocument],
    origin: &str,
) -> Result<(), ConvertError> {
    let rendered = render_collection(kind, defaults, entities, origin)?;
    fs::write(path.as_ref(), rendered)?;
    Ok(())
}
