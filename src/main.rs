// src/main.rs
mod document;
mod extractors;
mod statement;
mod storage;
mod utils;

use clap::Parser;
use document::{load_statement_text, PdfToText};
use extractors::StatementExtractor;
use std::path::PathBuf;
use storage::StorageManager;
use utils::AppError;

/// Command Line Interface for the brokerage statement extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Statement to parse (.pdf, or .txt holding already-extracted text)
    #[arg(short, long, default_value = "document.pdf")]
    input: PathBuf,

    /// Output directory for the parsed statement
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// File name of the JSON output inside the output directory
    #[arg(long, default_value = "parsed_statement.json")]
    file_name: String,

    /// pdftotext binary used to convert PDF statements
    #[arg(long, default_value = document::loader::DEFAULT_PDFTOTEXT)]
    pdftotext: PathBuf,

    /// Debug mode - save the raw and rule-annotated statement text
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    if args.file_name.is_empty() || args.file_name.contains(['/', '\\']) {
        return Err(AppError::Config(format!(
            "--file-name must be a plain file name, got '{}'",
            args.file_name
        )));
    }

    // 3. Load the statement text
    let converter = PdfToText::new(&args.pdftotext);
    let text = load_statement_text(&args.input, &converter).await?;

    // 4. Extract the structured record
    let extractor = StatementExtractor::new();
    let record = extractor.extract(&text)?;

    // 5. Save the output
    let storage = StorageManager::new(&args.output_dir)?;
    let output_path = storage.save_record(&record, &args.file_name)?;

    if args.debug {
        storage.save_debug_text(&text, &extractor.rule_patterns())?;
        storage.save_extraction_summary(&record, &args.input, text.len())?;
    }

    let shown = std::fs::canonicalize(&output_path).unwrap_or(output_path);
    tracing::info!("Parsed data written to {}", shown.display());

    Ok(())
}
