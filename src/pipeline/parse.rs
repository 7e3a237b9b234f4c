//! SQL script → seed files.
//!
//! Statements are processed independently: a statement that fails to parse is
//! recorded in the report and skipped, and the rest of the script still goes
//! through.

use indexmap::IndexSet;
use std::path::Path;

use crate::config::SeedConfig;
use crate::entity::{EntityDocument, EntityKind};
use crate::error::ConvertError;
use crate::mapping::Mappings;
use crate::record::Record;
use crate::sql::{parse_insert, split_statements};
use crate::yaml_loader::write_collection;

/// Outcome of parsing one script
#[derive(Debug, Default)]
pub struct ParseReport {
    /// INSERT statements found by the splitter
    pub statements: usize,
    pub templates: Vec<EntityDocument>,
    pub documents: Vec<EntityDocument>,
    /// Statements that could not be turned into records
    pub skipped: Vec<ConvertError>,
    /// Tables seen that map to neither entity kind, in first-seen order
    pub unknown_tables: IndexSet<String>,
}

impl ParseReport {
    pub fn entities(&self, kind: EntityKind) -> &[EntityDocument] {
        match kind {
            EntityKind::Template => &self.templates,
            EntityKind::Document => &self.documents,
        }
    }

    fn entities_mut(&mut self, kind: EntityKind) -> &mut Vec<EntityDocument> {
        match kind {
            EntityKind::Template => &mut self.templates,
            EntityKind::Document => &mut self.documents,
        }
    }
}

/// Split a script and parse every INSERT into a record.
///
/// Returns the records in script order together with the per-statement
/// failures.
pub fn parse_records(sql: &str) -> (Vec<Record>, Vec<ConvertError>) {
    let mut records = Vec::new();
    let mut failures = Vec::new();

    for statement in split_statements(sql) {
        match parse_insert(&statement) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Skipping statement: {}", e);
                failures.push(e);
            }
        }
    }

    (records, failures)
}

/// Parse a script into template and document collections.
pub fn parse_script(sql: &str, mappings: &Mappings) -> ParseReport {
    let statements = split_statements(sql);
    tracing::info!("Found {} INSERT statements", statements.len());

    let mut report = ParseReport {
        statements: statements.len(),
        ..Default::default()
    };

    for statement in &statements {
        let record = match parse_insert(statement) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Skipping statement: {}", e);
                report.skipped.push(e);
                continue;
            }
        };

        match mappings.for_table(&record.table) {
            Some(mapping) => {
                let document = mapping.to_document(&record);
                report.entities_mut(mapping.kind).push(document);
            }
            None => {
                tracing::debug!("Ignoring INSERT into unrecognized table {}", record.table);
                report.unknown_tables.insert(record.table);
            }
        }
    }

    tracing::info!(
        "Parsed {} templates, {} documents ({} skipped)",
        report.templates.len(),
        report.documents.len(),
        report.skipped.len()
    );

    report
}

/// Write `templates.yaml` and `documents.yaml` into `dir`.
///
/// The templates file carries the configured template defaults so that it can
/// be fed straight back into generation.
pub fn write_seed_files<P: AsRef<Path>>(
    report: &ParseReport,
    dir: P,
    config: &SeedConfig,
    origin: &str,
) -> Result<(), ConvertError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    for kind in EntityKind::ALL {
        let defaults = config.defaults_for(kind);
        let defaults = match kind {
            EntityKind::Template => Some(&defaults),
            EntityKind::Document => None,
        };
        let path = dir.join(config.file_for(kind));
        write_collection(&path, kind, defaults, report.entities(kind), origin)?;
        tracing::info!("Wrote {} ({} {} entities)", path.display(), report.entities(kind).len(), kind);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCRIPT: &str = r#"
-- Seed data
INSERT INTO document_hub.master_template_definition (
    master_template_id, template_version, template_type, template_name,
    template_config, eligibility_criteria, created_timestamp
) VALUES (
    'tpl-1', 1, 'Statement', 'Monthly Statement',
    '{}', '{"rules": [{"field": "state", "values": ["CA", "NY"]}]}', NOW()
);

INSERT INTO document_hub.storage_index (storage_index_id, master_template_id, file_name, account_key)
VALUES ('doc-1', 'tpl-1', 'jan.pdf', NULL);

INSERT INTO other_schema.unrelated_table (a, b) VALUES (1, 2);
INSERT INTO document_hub.storage_index (storage_index_id, file_name) VALUES ('doc-2');
UPDATE document_hub.storage_index SET accessible_flag = false WHERE storage_index_id IN ('doc-1');
"#;

    #[test]
    fn test_parse_script_partitions_by_table() {
        let report = parse_script(SCRIPT, &Mappings::default());

        assert_eq!(report.statements, 4);
        assert_eq!(
            report.templates,
            vec![EntityDocument::new()
                .with_field("id", "tpl-1")
                .with_field("template_version", 1)
                .with_field("template_type", "Statement")
                .with_field("template_name", "Monthly Statement")
                .with_field("eligibility_criteria", json!({"rules": [{"field": "state", "values": ["CA", "NY"]}]}))]
        );
        assert_eq!(
            report.documents,
            vec![EntityDocument::new()
                .with_field("id", "doc-1")
                .with_field("template_id", "tpl-1")
                .with_field("file_name", "jan.pdf")]
        );
        assert!(report.unknown_tables.contains("other_schema.unrelated_table"));
    }

    #[test]
    fn test_bad_statement_does_not_stop_the_run() {
        let report = parse_script(SCRIPT, &Mappings::default());
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(report.skipped[0], ConvertError::FieldCountMismatch { .. }));
    }

    #[test]
    fn test_parse_records_keeps_unknown_tables() {
        let (records, failures) = parse_records(SCRIPT);
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].table, "other_schema.unrelated_table");
        assert_eq!(failures.len(), 1);
    }
}
