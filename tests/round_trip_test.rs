//! Integration tests for YAML → SQL → YAML conversion through the filesystem

use docseed::pipeline::{load_seed_dir, parse_script, write_seed_files, Generator};
use docseed::{EntityDocument, EntityKind, SeedConfig};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const TEMPLATES_YAML: &str = r#"
defaults:
  template_version: 1
  active_flag: true
templates:
  - id: 7c3e1b2a-0000-4000-8000-000000000001
    template_type: MonthlyStatement
    template_name: O'Brien Monthly Statement
    line_of_business: CREDIT_CARD
    start_date: 2024-01-01
    eligibility_criteria:
      operator: AND
      rules:
        - field: state
          values: [CA, NY]
        - field: balance
          min: 10.5
    access_control:
      - role: customer
        actions: [VIEW, DOWNLOAD]
  - id: 7c3e1b2a-0000-4000-8000-000000000002
    template_type: PrivacyNotice
    template_name: Privacy Notice
    active_flag: false
    shared_document_flag: true
    sharing_scope: ALL
"#;

const DOCUMENTS_YAML: &str = r#"
documents:
  - id: 11111111-0000-4000-8000-000000000001
    template_id: 7c3e1b2a-0000-4000-8000-000000000001
    template_type: MonthlyStatement
    storage_document_key: ecms/2024/01/stmt.pdf
    file_name: statement_jan.pdf
    account_key: ACCT-001
    doc_metadata:
      pages: 3
      note: "it's fine"
"#;

fn seed_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("templates.yaml"), TEMPLATES_YAML).unwrap();
    fs::write(dir.path().join("documents.yaml"), DOCUMENTS_YAML).unwrap();
    dir
}

fn generated_at() -> chrono::NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap().and_hms_opt(12, 0, 0).unwrap()
}

#[test]
fn test_generate_then_parse_reproduces_entities() {
    let config = SeedConfig::default();
    let input = seed_dir();

    let collections = load_seed_dir(input.path(), &config).unwrap();
    assert_eq!(collections.len(), 2);
    let sql = Generator::new(&config).render(&collections, generated_at()).unwrap();

    let sql_path = input.path().join("data.sql");
    fs::write(&sql_path, &sql).unwrap();

    let report = parse_script(&fs::read_to_string(&sql_path).unwrap(), &config.mappings());
    assert!(report.skipped.is_empty());
    assert!(report.unknown_tables.is_empty());
    assert_eq!(report.statements, 3);

    // Parsed entities carry the merged defaults
    for collection in &collections {
        let defaults = config.defaults_for(collection.kind).overlay(&collection.defaults);
        let expected: Vec<EntityDocument> = collection.entities.iter().map(|e| defaults.apply(e)).collect();
        assert_eq!(report.entities(collection.kind), expected.as_slice());
    }

    let output = TempDir::new().unwrap();
    write_seed_files(&report, output.path(), &config, "data.sql").unwrap();
    let reloaded = load_seed_dir(output.path(), &config).unwrap();

    assert_eq!(reloaded[0].kind, EntityKind::Template);
    assert_eq!(reloaded[0].entities, report.templates);
    assert_eq!(reloaded[0].defaults, config.defaults_for(EntityKind::Template));
    assert_eq!(reloaded[1].entities, report.documents);
    assert!(reloaded[1].defaults.is_empty());
}

#[test]
fn test_multiline_string_survives_round_trip() {
    let config = SeedConfig::default();
    let description = "Line one\n  -- indented note\n\nLine two);";
    let collection = docseed::SeedCollection::new(EntityKind::Template, "templates.yaml").with_entities(vec![
        EntityDocument::new()
            .with_field("id", "tpl-ml")
            .with_field("template_type", "Notice")
            .with_field("template_name", "Multi-line")
            .with_field("template_description", description),
    ]);

    let sql = Generator::new(&config).render(&[collection], generated_at()).unwrap();
    let report = parse_script(&sql, &config.mappings());
    assert!(report.skipped.is_empty());
    assert_eq!(report.templates.len(), 1);
    assert_eq!(report.templates[0].get("template_description"), Some(&json!(description)));

    // And through the YAML files
    let output = TempDir::new().unwrap();
    write_seed_files(&report, output.path(), &config, "data.sql").unwrap();
    let reloaded = load_seed_dir(output.path(), &config).unwrap();
    assert_eq!(reloaded[0].entities[0].get("template_description"), Some(&json!(description)));
}

#[test]
fn test_regenerating_parsed_files_is_stable() {
    let config = SeedConfig::default();
    let input = seed_dir();
    let generator = Generator::new(&config);

    let first = generator
        .render(&load_seed_dir(input.path(), &config).unwrap(), generated_at())
        .unwrap();

    let output = TempDir::new().unwrap();
    let report = parse_script(&first, &config.mappings());
    write_seed_files(&report, output.path(), &config, "data.sql").unwrap();

    let second = generator
        .render(&load_seed_dir(output.path(), &config).unwrap(), generated_at())
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_generated_sql_layout() {
    let config = SeedConfig::default();
    let input = seed_dir();
    let sql = Generator::new(&config)
        .render(&load_seed_dir(input.path(), &config).unwrap(), generated_at())
        .unwrap();

    assert!(sql.contains("-- Template: O'Brien Monthly Statement\n"));
    assert!(sql.contains("'O''Brien Monthly Statement'"));
    assert!(sql.contains("-- Document: statement_jan.pdf\n"));
    assert!(sql.contains("'2024-01-01'"));
    // Unset template_config falls back to an empty object
    assert!(sql.contains("    '{}',\n"));
    assert!(sql.contains("\"note\": \"it''s fine\""));

    let templates_at = sql.find("-- MASTER TEMPLATE DEFINITIONS").unwrap();
    let documents_at = sql.find("-- STORAGE INDEX (DOCUMENTS)").unwrap();
    assert!(templates_at < documents_at);
}

#[test]
fn test_documents_file_is_optional() {
    let config = SeedConfig::default();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("templates.yaml"), TEMPLATES_YAML).unwrap();

    let collections = load_seed_dir(dir.path(), &config).unwrap();
    assert_eq!(collections.len(), 1);

    let sql = Generator::new(&config).render(&collections, generated_at()).unwrap();
    assert!(!sql.contains("STORAGE INDEX"));
}

#[test]
fn test_empty_seed_dir_is_an_error() {
    let config = SeedConfig::default();
    let dir = TempDir::new().unwrap();
    assert!(load_seed_dir(dir.path(), &config).is_err());
}

#[test]
fn test_custom_table_names() {
    let config = SeedConfig::from_yaml(
        "tables:\n  templates: archive.templates\n  documents: archive.documents\n",
    )
    .unwrap();
    let input = seed_dir();

    let sql = Generator::new(&config)
        .render(&load_seed_dir(input.path(), &config).unwrap(), generated_at())
        .unwrap();
    assert!(sql.contains("INSERT INTO archive.templates ("));

    let report = parse_script(&sql, &config.mappings());
    assert_eq!(report.templates.len(), 2);
    assert_eq!(report.documents.len(), 1);
    assert_eq!(
        report.documents[0].get("doc_metadata"),
        Some(&json!({"pages": 3, "note": "it's fine"}))
    );
}
