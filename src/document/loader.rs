// src/document/loader.rs
use crate::utils::error::DocumentError;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Default converter binary (poppler-utils).
pub const DEFAULT_PDFTOTEXT: &str = "pdftotext";

// pdftotext ends every page with a form feed
const PAGE_BREAK: char = '\x0c';

/// External PDF-to-text collaborator.
#[derive(Debug, Clone)]
pub struct PdfToText {
    program: PathBuf,
}

impl Default for PdfToText {
    fn default() -> Self {
        Self::new(DEFAULT_PDFTOTEXT)
    }
}

impl PdfToText {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self { program: program.into() }
    }

    /// Runs `pdftotext -enc UTF-8 <pdf> -` and returns the pages joined by line breaks.
    pub async fn convert(&self, pdf_path: &Path) -> Result<String, DocumentError> {
        let program = self.program.display().to_string();
        tracing::debug!("Running {} on {}", program, pdf_path.display());

        let output = Command::new(&self.program)
            .arg("-enc")
            .arg("UTF-8")
            .arg(pdf_path)
            .arg("-")
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => DocumentError::ConverterUnavailable(program.clone()),
                _ => DocumentError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!("{} exited with {}: {}", program, output.status, stderr);
            return Err(DocumentError::ConversionFailed { status: output.status, stderr });
        }

        let raw = String::from_utf8(output.stdout)?;
        Ok(join_pages(&raw))
    }
}

/// Replaces page breaks with line breaks, keeping page order. The break after
/// the last page does not add an empty trailing page.
pub fn join_pages(raw: &str) -> String {
    let trimmed = raw.strip_suffix(PAGE_BREAK).unwrap_or(raw);
    trimmed.split(PAGE_BREAK).collect::<Vec<_>>().join("\n")
}

/// Loads the statement as one text blob.
///
/// `.txt` files are read as already-extracted text; `.pdf` files go through
/// the converter. Anything else is rejected.
pub async fn load_statement_text(path: &Path, converter: &PdfToText) -> Result<String, DocumentError> {
    if !tokio::fs::try_exists(path).await? {
        return Err(DocumentError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let text = match extension.as_str() {
        "txt" => tokio::fs::read_to_string(path).await?,
        "pdf" => converter.convert(path).await?,
        _ => {
            return Err(DocumentError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            })
        }
    };

    tracing::info!("Loaded {} bytes of statement text from {}", text.len(), path.display());
    Ok(text)
}
