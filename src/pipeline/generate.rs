//! Seed files → SQL script.

use chrono::NaiveDateTime;
use std::path::Path;

use crate::config::SeedConfig;
use crate::entity::EntityKind;
use crate::error::ConvertError;
use crate::mapping::Mappings;
use crate::record::Record;
use crate::sql::render_insert;
use crate::yaml_loader::{load_collection_if_exists, SeedCollection};

/// One INSERT ready to be written, with the entity's display name
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedInsert {
    pub kind: EntityKind,
    pub caption: String,
    pub record: Record,
}

/// Turns seed collections into INSERT statements
pub struct Generator<'a> {
    config: &'a SeedConfig,
    mappings: Mappings,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a SeedConfig) -> Self {
        Self {
            config,
            mappings: config.mappings(),
        }
    }

    /// Build one record per entity, in input order.
    ///
    /// Stops at the first entity missing a required field: the seed files
    /// themselves are invalid and nothing should be written.
    pub fn records(&self, collection: &SeedCollection) -> Result<Vec<GeneratedInsert>, ConvertError> {
        let mapping = self.mappings.get(collection.kind);
        let defaults = self
            .config
            .defaults_for(collection.kind)
            .overlay(&collection.defaults);

        collection
            .entities
            .iter()
            .map(|entity| -> Result<GeneratedInsert, ConvertError> {
                let merged = defaults.apply(entity);
                let unmapped = mapping.unmapped_fields(&merged);
                if !unmapped.is_empty() {
                    tracing::debug!(
                        "{} '{}': fields without a column are not written: {}",
                        collection.kind,
                        merged.caption(collection.kind),
                        unmapped.join(", ")
                    );
                }

                Ok(GeneratedInsert {
                    kind: collection.kind,
                    caption: merged.caption(collection.kind),
                    record: mapping.to_record(&merged)?,
                })
            })
            .collect()
    }

    /// Render the complete script: file header, then one section per collection.
    pub fn render(
        &self,
        collections: &[SeedCollection],
        generated_at: NaiveDateTime,
    ) -> Result<String, ConvertError> {
        let mut sql = file_header(collections, generated_at);

        for collection in collections {
            let inserts = self.records(collection)?;
            tracing::info!(
                "Generated {} {} INSERT statements from {}",
                inserts.len(),
                collection.kind,
                collection.source.display()
            );

            sql.push_str(&section_banner(collection.kind));
            for insert in &inserts {
                // A caption spanning lines would end the comment early
                let caption = insert.caption.lines().collect::<Vec<_>>().join(" ");
                sql.push_str(&format!("-- {}: {}\n", insert.kind, caption));
                sql.push_str(&render_insert(&insert.record));
                sql.push_str("\n\n");
            }
        }

        Ok(sql)
    }
}

/// Load every seed file present in `dir`.
pub fn load_seed_dir<P: AsRef<Path>>(dir: P, config: &SeedConfig) -> Result<Vec<SeedCollection>, ConvertError> {
    let dir = dir.as_ref();
    let mut collections = Vec::new();

    for kind in EntityKind::ALL {
        let path = dir.join(config.file_for(kind));
        if let Some(collection) = load_collection_if_exists(&path, kind)? {
            collections.push(collection);
        }
    }

    if collections.is_empty() {
        return Err(ConvertError::Config(format!(
            "No seed files found in {} (looked for {} and {})",
            dir.display(),
            config.files.templates,
            config.files.documents
        )));
    }

    Ok(collections)
}

const RULE: &str = "-- =============================================================================";
const SECTION_RULE: &str = "-- ====================================================================";

fn file_header(collections: &[SeedCollection], generated_at: NaiveDateTime) -> String {
    let mut header = String::new();
    header.push_str(RULE);
    header.push_str("\n-- DOCUMENT HUB SEED DATA\n");
    header.push_str(RULE);
    header.push_str("\n-- Auto-generated from YAML files\n");
    header.push_str(&format!("-- Generated: {}\n", generated_at.format("%Y-%m-%dT%H:%M:%S")));
    header.push_str("--\n-- Source files:\n");
    for collection in collections {
        let name = collection
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| collection.source.display().to_string());
        header.push_str(&format!("--   - {}\n", name));
    }
    header.push_str("--\n-- To regenerate: docseed generate\n");
    header.push_str(RULE);
    header.push_str("\n\n");
    header
}

fn section_banner(kind: EntityKind) -> String {
    format!("{}\n-- {}\n{}\n\n", SECTION_RULE, kind.section_title(), SECTION_RULE)
}
