//! Run configuration loaded from `docseed.yaml`.
//!
//! Every section is optional; a missing file yields the built-in defaults.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};
use std::path::{Path, PathBuf};

use crate::entity::{Defaults, EntityKind};
use crate::error::ConvertError;
use crate::mapping::{document, template, Mappings};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "DOCSEED_CONFIG";

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "docseed.yaml";

/// Top-level configuration from docseed.yaml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub tables: TableNames,
    #[serde(default)]
    pub defaults: DefaultValues,
    #[serde(default)]
    pub files: FileNames,
}

/// Target table names, schema-qualified
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TableNames {
    #[serde(default = "default_template_table")]
    pub templates: String,
    #[serde(default = "default_document_table")]
    pub documents: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            templates: default_template_table(),
            documents: default_document_table(),
        }
    }
}

/// Built-in defaults per entity kind, beneath any `defaults:` block in the seed files
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefaultValues {
    #[serde(default = "default_template_values")]
    pub templates: Map<String, JsonValue>,
    #[serde(default = "default_document_values")]
    pub documents: Map<String, JsonValue>,
}

impl Default for DefaultValues {
    fn default() -> Self {
        Self {
            templates: default_template_values(),
            documents: default_document_values(),
        }
    }
}

/// File names used inside the seed-data directory
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileNames {
    #[serde(default = "default_templates_file")]
    pub templates: String,
    #[serde(default = "default_documents_file")]
    pub documents: String,
    #[serde(default = "default_sql_file")]
    pub sql: String,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            templates: default_templates_file(),
            documents: default_documents_file(),
            sql: default_sql_file(),
        }
    }
}

fn default_template_table() -> String {
    template::DEFAULT_TABLE.to_string()
}

fn default_document_table() -> String {
    document::DEFAULT_TABLE.to_string()
}

fn default_template_values() -> Map<String, JsonValue> {
    into_map(json!({
        "template_version": 1,
        "active_flag": true,
        "shared_document_flag": false,
        "single_document_flag": true,
        "message_center_doc_flag": true,
        "language_code": "EN_US",
        "created_by": "system",
        "communication_type": "LETTER",
    }))
}

fn default_document_values() -> Map<String, JsonValue> {
    into_map(json!({
        "template_version": 1,
        "shared_flag": false,
        "accessible_flag": true,
        "storage_vendor": "ecms",
        "created_by": "system",
    }))
}

fn default_templates_file() -> String {
    "templates.yaml".to_string()
}

fn default_documents_file() -> String {
    "documents.yaml".to_string()
}

fn default_sql_file() -> String {
    "data.sql".to_string()
}

fn into_map(value: JsonValue) -> Map<String, JsonValue> {
    match value {
        JsonValue::Object(map) => map,
        _ => Map::new(),
    }
}

impl SeedConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_yaml(&contents)
            .map_err(|e| ConvertError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConvertError> {
        // An empty file deserializes as null
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SeedConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file: explicit path, then `DOCSEED_CONFIG`, then
    /// `docseed.yaml` in the working directory, then built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConvertError> {
        let candidate = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        if let Some(path) = candidate {
            tracing::debug!("Loading configuration from {}", path.display());
            return Self::from_file(path);
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            tracing::debug!("Loading configuration from {}", local.display());
            return Self::from_file(local);
        }

        tracing::debug!("No configuration file found, using built-in defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        for (label, table) in [("templates", &self.tables.templates), ("documents", &self.tables.documents)] {
            if !is_table_name(table) {
                return Err(ConvertError::Config(format!(
                    "tables.{} must be a (schema-qualified) identifier, got '{}'",
                    label, table
                )));
            }
        }

        if self.tables.templates.eq_ignore_ascii_case(&self.tables.documents) {
            return Err(ConvertError::Config(
                "tables.templates and tables.documents must differ".to_string(),
            ));
        }

        for (label, name) in [
            ("templates", &self.files.templates),
            ("documents", &self.files.documents),
            ("sql", &self.files.sql),
        ] {
            if name.trim().is_empty() {
                return Err(ConvertError::Config(format!("files.{} cannot be empty", label)));
            }
        }

        Ok(())
    }

    pub fn mappings(&self) -> Mappings {
        Mappings::new(self.tables.templates.clone(), self.tables.documents.clone())
    }

    /// Built-in defaults for one entity kind
    pub fn defaults_for(&self, kind: EntityKind) -> Defaults {
        match kind {
            EntityKind::Template => Defaults::new(self.defaults.templates.clone()),
            EntityKind::Document => Defaults::new(self.defaults.documents.clone()),
        }
    }

    /// Seed file name for one entity kind
    pub fn file_for(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Template => &self.files.templates,
            EntityKind::Document => &self.files.documents,
        }
    }
}

fn is_table_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_alphanumeric() || c == '_')
        })
}
