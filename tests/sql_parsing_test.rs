//! Integration tests for reading hand-written SQL scripts

use docseed::error::ConvertError;
use docseed::pipeline::{parse_records, parse_script};
use docseed::sql::{lex_values, split_statements};
use docseed::{Mappings, SqlValue};
use serde_json::json;

const SCRIPT: &str = r#"
-- =====================================================
-- Legacy seed script
-- =====================================================

INSERT INTO document_hub.master_template_definition
    (master_template_id, template_version, template_type, template_name, template_config)
VALUES
    ('tpl-1', 2, 'Notice', 'Rate Change', '{"channels": ["EMAIL", "PRINT"]}');

insert into master_template_definition (master_template_id, template_version, template_type, template_name) values ('tpl-2', 1, 'Notice', 'Bare table name');

INSERT INTO other_schema.unrelated_table (a, b) VALUES (1, 2);

INSERT INTO document_hub.storage_index (storage_index_id, file_name) VALUES ('doc-1', 'a.pdf', 'extra');
INSERT INTO document_hub.storage_index (storage_index_id, file_name) VALUES ('doc-2', COALESCE('a.pdf', 'b.pdf');
INSERT INTO document_hub.storage_index (storage_index_id, master_template_id, file_name, doc_creation_date, accessible_flag)
VALUES ('doc-3', 'tpl-1', 'rate.pdf', '2024-02-01', TRUE);
"#;

#[test]
fn test_script_with_bad_statements() {
    let report = parse_script(SCRIPT, &Mappings::default());

    assert_eq!(report.statements, 6);
    assert_eq!(report.templates.len(), 2);
    assert_eq!(report.templates[1].get("template_name"), Some(&json!("Bare table name")));
    assert_eq!(
        report.templates[0].get("template_config"),
        Some(&json!({"channels": ["EMAIL", "PRINT"]}))
    );

    assert_eq!(report.documents.len(), 1);
    assert_eq!(report.documents[0].get("id"), Some(&json!("doc-3")));
    assert_eq!(report.documents[0].get("accessible_flag"), Some(&json!(true)));
    assert_eq!(report.documents[0].get("doc_creation_date"), Some(&json!("2024-02-01")));

    assert_eq!(report.skipped.len(), 2);
    assert!(matches!(report.skipped[0], ConvertError::FieldCountMismatch { .. }));
    assert!(matches!(report.skipped[1], ConvertError::MalformedLiteral { .. }));

    assert_eq!(report.unknown_tables.len(), 1);
    assert!(report.unknown_tables.contains("other_schema.unrelated_table"));
}

#[test]
fn test_unterminated_literal_swallows_rest_of_script() {
    let sql = "INSERT INTO t (a) VALUES ('open);\nINSERT INTO t (a) VALUES ('x');\n";
    let report = parse_script(sql, &Mappings::default());
    assert_eq!(report.statements, 0);
}

#[test]
fn test_parse_records_preserves_script_order() {
    let (records, failures) = parse_records(SCRIPT);
    let tables: Vec<&str> = records.iter().map(|r| r.table.as_str()).collect();
    assert_eq!(
        tables,
        vec![
            "document_hub.master_template_definition",
            "master_template_definition",
            "other_schema.unrelated_table",
            "document_hub.storage_index",
        ]
    );
    assert_eq!(failures.len(), 2);
}

#[test]
fn test_wrapped_statement_becomes_one_line() {
    let statements = split_statements("INSERT INTO t (a,b)\nVALUES (1,2);");
    assert_eq!(statements, vec!["INSERT INTO t (a,b) VALUES (1,2);".to_string()]);
}

#[test]
fn test_mixed_value_list() {
    let values = lex_values(r#"'a,b', 3, '{"x": [1,2,3]}', NULL"#).unwrap();
    assert_eq!(
        values,
        vec![
            SqlValue::String("a,b".to_string()),
            SqlValue::Number(3.into()),
            SqlValue::Json(json!({"x": [1, 2, 3]})),
            SqlValue::Null,
        ]
    );
}

#[test]
fn test_script_without_inserts() {
    let report = parse_script("-- nothing here\n\nSELECT 1;\n", &Mappings::default());
    assert_eq!(report.statements, 0);
    assert!(report.templates.is_empty());
    assert!(report.documents.is_empty());
    assert!(report.skipped.is_empty());
}
