//! # Docseed: Seed-Data Converter
//!
//! Docseed converts document-hub seed data between YAML entity documents and
//! SQL `INSERT` scripts, in both directions.
//!
//! ## Features
//!
//! - **Generation**: YAML seed files with a `defaults:` block become an annotated SQL script
//! - **Parsing**: an existing SQL script becomes YAML seed files again
//! - **Typed values**: NULL, booleans, numbers, strings and embedded JSON documents
//! - **Resilient parsing**: malformed statements are reported and skipped
//!
//! ## Example: templates.yaml
//!
//! ```yaml
//! defaults:
//!   template_version: 1
//!   active_flag: true
//! templates:
//!   - id: 7c3e1b2a-0000-4000-8000-000000000001
//!     template_type: MonthlyStatement
//!     template_name: Monthly Statement
//!     eligibility_criteria:
//!       operator: AND
//!       rules:
//!         - field: state
//!           values: [CA, NY]
//! ```
//!
//! ## Example: generating from Rust
//!
//! ```no_run
//! use docseed::{load_seed_dir, Generator, SeedConfig};
//!
//! let config = SeedConfig::default();
//! let collections = load_seed_dir("seed-data", &config)?;
//! let sql = Generator::new(&config).render(&collections, chrono::Local::now().naive_local())?;
//! println!("{}", sql);
//! # Ok::<(), docseed::ConvertError>(())
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod mapping;
pub mod pipeline;
pub mod record;
pub mod serialization;
pub mod sql;
pub mod value;
pub mod yaml_loader;

// Re-export key types
pub use config::SeedConfig;
pub use entity::{Defaults, EntityDocument, EntityKind};
pub use error::ConvertError;
pub use mapping::{FieldMapping, Mappings};
pub use pipeline::{load_seed_dir, parse_script, write_seed_files, Generator, ParseReport};
pub use record::Record;
pub use serialization::NdjsonWriter;
pub use value::{coerce_literal, Coercion, SqlValue};
pub use yaml_loader::{load_collection, SeedCollection};
