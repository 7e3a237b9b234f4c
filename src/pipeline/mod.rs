//! End-to-end conversions in both directions.

pub mod generate;
pub mod parse;

pub use generate::{load_seed_dir, GeneratedInsert, Generator};
pub use parse::{parse_records, parse_script, write_seed_files, ParseReport};
