//! docseed CLI - convert seed data between YAML entity files and SQL INSERT scripts
//!
//! `generate` and `parse` are inverses of each other; `validate` and `inspect`
//! help track down problems in either direction.

use clap::{Parser, Subcommand};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use docseed::pipeline::{load_seed_dir, parse_records, parse_script, write_seed_files, Generator};
use docseed::{NdjsonWriter, SeedConfig};

#[derive(Parser)]
#[command(name = "docseed")]
#[command(version, about = "Convert seed data between YAML entity files and SQL INSERT scripts", long_about = None)]
struct Cli {
    /// Path to docseed.yaml (defaults to $DOCSEED_CONFIG, then ./docseed.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log per-statement detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a SQL script from templates.yaml and documents.yaml
    Generate {
        /// Directory containing the seed files
        #[arg(short, long, default_value = ".")]
        input_dir: PathBuf,

        /// Output SQL file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a SQL script back into YAML seed files
    Parse {
        /// SQL script to read
        #[arg(short, long)]
        input: PathBuf,

        /// Directory to write templates.yaml and documents.yaml into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Validate seed files without writing anything
    Validate {
        /// Directory containing the seed files
        #[arg(short, long, default_value = ".")]
        input_dir: PathBuf,
    },

    /// Print every INSERT of a SQL script as NDJSON
    Inspect {
        /// SQL script to read
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = SeedConfig::discover(cli.config.as_deref())
        .map_err(|e| e.to_string())
        .and_then(|config| match cli.command {
            Commands::Generate { input_dir, output } => generate_sql(&config, input_dir, output),
            Commands::Parse { input, output_dir } => parse_sql(&config, input, output_dir),
            Commands::Validate { input_dir } => validate_seed_files(&config, input_dir),
            Commands::Inspect { input } => inspect_sql(input),
        });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "docseed=debug" } else { "docseed=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Generate a SQL script from the seed files in `input_dir`
fn generate_sql(config: &SeedConfig, input_dir: PathBuf, output: Option<PathBuf>) -> Result<(), String> {
    let collections = load_seed_dir(&input_dir, config).map_err(|e| format!("Failed to load seed files: {}", e))?;

    let generated_at = chrono::Local::now().naive_local();
    let sql = Generator::new(config)
        .render(&collections, generated_at)
        .map_err(|e| format!("Failed to generate SQL: {}", e))?;

    match output {
        Some(path) => {
            println!("🔧 Generating SQL from {}...", input_dir.display());
            for collection in &collections {
                println!("  ✓ {} {} entities from {}", collection.entities.len(), collection.kind, collection.source.display());
            }
            fs::write(&path, sql).map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
            println!("✨ SQL written to {}", path.display());
        }
        // stdout carries the script itself
        None => print!("{}", sql),
    }

    Ok(())
}

/// Parse a SQL script into seed files
fn parse_sql(config: &SeedConfig, input: PathBuf, output_dir: PathBuf) -> Result<(), String> {
    println!("🔍 Parsing {}...", input.display());

    let sql = fs::read_to_string(&input).map_err(|e| format!("Failed to read {}: {}", input.display(), e))?;
    let report = parse_script(&sql, &config.mappings());

    println!("  ✓ {} INSERT statements", report.statements);
    println!("  ✓ {} templates", report.templates.len());
    println!("  ✓ {} documents", report.documents.len());
    if !report.unknown_tables.is_empty() {
        let tables: Vec<&str> = report.unknown_tables.iter().map(String::as_str).collect();
        println!("  ℹ Ignored tables: {}", tables.join(", "));
    }
    if !report.skipped.is_empty() {
        println!("  ⚠ {} statements skipped (see warnings above)", report.skipped.len());
    }

    write_seed_files(&report, &output_dir, config, &origin_name(&input))
        .map_err(|e| format!("Failed to write seed files: {}", e))?;

    println!("✨ Seed files written to {}", output_dir.display());
    Ok(())
}

/// Load seed files and check that every entity maps cleanly
fn validate_seed_files(config: &SeedConfig, input_dir: PathBuf) -> Result<(), String> {
    println!("🔍 Validating seed files in {}...", input_dir.display());

    let collections = load_seed_dir(&input_dir, config).map_err(|e| format!("Failed to load seed files: {}", e))?;
    let generator = Generator::new(config);
    let mappings = config.mappings();

    for collection in &collections {
        let inserts = generator
            .records(collection)
            .map_err(|e| format!("{}: {}", collection.source.display(), e))?;
        println!("  ✓ {} {} entities validated", inserts.len(), collection.kind);

        let mapping = mappings.get(collection.kind);
        for entity in &collection.entities {
            let unmapped = mapping.unmapped_fields(entity);
            if !unmapped.is_empty() {
                println!(
                    "  ℹ {} '{}' has fields with no column: {}",
                    collection.kind,
                    entity.caption(collection.kind),
                    unmapped.join(", ")
                );
            }
        }
    }

    println!("✅ All seed files are valid!");
    Ok(())
}

/// Dump parsed records as NDJSON on stdout
fn inspect_sql(input: PathBuf) -> Result<(), String> {
    let sql = fs::read_to_string(&input).map_err(|e| format!("Failed to read {}: {}", input.display(), e))?;
    let (records, failures) = parse_records(&sql);

    let stdout = io::stdout();
    let mut writer = NdjsonWriter::new(stdout.lock());
    writer.write_all(&records).map_err(|e| e.to_string())?;
    writer.flush().map_err(|e| e.to_string())?;

    tracing::info!("{} records, {} statements skipped", writer.written(), failures.len());
    Ok(())
}

fn origin_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
