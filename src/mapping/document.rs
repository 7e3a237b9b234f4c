//! Column table for `storage_index`.

use super::{Fallback, FieldSpec};

pub const DEFAULT_TABLE: &str = "document_hub.storage_index";

/// Stored-document columns in INSERT order
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("storage_index_id", "id"),
    FieldSpec::required("master_template_id", "template_id"),
    FieldSpec::required("template_version", "template_version"),
    FieldSpec::required("template_type", "template_type"),
    FieldSpec::optional("shared_flag", "shared_flag"),
    FieldSpec::optional("account_key", "account_key"),
    FieldSpec::optional("customer_key", "customer_key"),
    FieldSpec::optional("reference_key", "reference_key"),
    FieldSpec::optional("reference_key_type", "reference_key_type"),
    FieldSpec::optional("storage_vendor", "storage_vendor"),
    FieldSpec::required("storage_document_key", "storage_document_key"),
    FieldSpec::required("file_name", "file_name"),
    FieldSpec::optional("doc_creation_date", "doc_creation_date"),
    FieldSpec::optional("accessible_flag", "accessible_flag"),
    // Validity window for versioned documents
    FieldSpec::optional("start_date", "start_date"),
    FieldSpec::optional("end_date", "end_date"),
    FieldSpec::json("doc_metadata", "doc_metadata"),
    FieldSpec::optional("created_by", "created_by"),
    FieldSpec::optional("created_timestamp", "created_timestamp").with_fallback(Fallback::Now),
];
