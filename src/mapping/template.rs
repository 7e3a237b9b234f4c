//! Column table for `master_template_definition`.

use super::{Fallback, FieldSpec};

pub const DEFAULT_TABLE: &str = "document_hub.master_template_definition";

/// Template columns in INSERT order
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("master_template_id", "id"),
    FieldSpec::required("template_version", "template_version"),
    FieldSpec::required("template_type", "template_type"),
    FieldSpec::required("template_name", "template_name"),
    FieldSpec::optional("template_description", "template_description"),
    FieldSpec::optional("template_category", "template_category"),
    FieldSpec::optional("line_of_business", "line_of_business"),
    FieldSpec::optional("language_code", "language_code"),
    FieldSpec::optional("active_flag", "active_flag"),
    FieldSpec::optional("shared_document_flag", "shared_document_flag"),
    FieldSpec::optional("sharing_scope", "sharing_scope"),
    FieldSpec::optional("single_document_flag", "single_document_flag"),
    FieldSpec::optional("message_center_doc_flag", "message_center_doc_flag"),
    FieldSpec::optional("communication_type", "communication_type"),
    FieldSpec::optional("workflow", "workflow"),
    FieldSpec::json("template_config", "template_config").with_fallback(Fallback::EmptyObject),
    FieldSpec::json("eligibility_criteria", "eligibility_criteria"),
    FieldSpec::json("document_matching_config", "document_matching_config"),
    FieldSpec::json("data_extraction_config", "data_extraction_config"),
    FieldSpec::json("access_control", "access_control"),
    FieldSpec::optional("start_date", "start_date"),
    FieldSpec::optional("created_by", "created_by"),
    FieldSpec::optional("created_timestamp", "created_timestamp").with_fallback(Fallback::Now),
];
