use crate::domain::document::{DocumentFormat, RequirementDocument};
use crate::domain::error::{AppError, Result};
use crate::shared::logbuf::{add_log, LogBuffer};

use std::path::Path;

mod docx;
mod pdf;
mod text;

/// Turns an uploaded requirements document into plain UTF-8 text.
///
/// Extraction is strictly local: no agent call happens before it succeeds.
pub struct ExtractionUseCase;

impl ExtractionUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Read a document from disk, deriving its format from the file
    /// extension.
    pub fn load_from_path(&self, file_path: &str, logs: &LogBuffer) -> Result<RequirementDocument> {
        let path = Path::new(file_path);

        if !path.exists() {
            add_log(
                logs,
                "ERROR",
                "Extract",
                &format!("File not found: {}", file_path),
            );
            return Err(AppError::NotFound(format!("File not found: {}", file_path)));
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::ValidationError("Invalid file name".to_string()))?
            .to_string();

        let format = DocumentFormat::from_file_name(&file_name).ok_or_else(|| {
            add_log(
                logs,
                "ERROR",
                "Extract",
                &format!("Unsupported file type: {}", file_name),
            );
            AppError::ValidationError(format!(
                "Unsupported file type: {} (expected pdf, docx, txt, or md)",
                file_name
            ))
        })?;

        let bytes = std::fs::read(path)
            .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", file_path, e)))?;

        Ok(RequirementDocument::new(file_name, format, bytes))
    }

    /// Extract plain text from the document bytes.
    pub fn extract(&self, document: &RequirementDocument, logs: &LogBuffer) -> Result<String> {
        add_log(
            logs,
            "INFO",
            "Extract",
            &format!(
                "Extracting text: {} ({}, {} bytes)",
                document.file_name,
                document.format,
                document.bytes.len()
            ),
        );

        let text = match document.format {
            DocumentFormat::Pdf => self.parse_pdf(&document.bytes)?,
            DocumentFormat::Docx => self.parse_docx(&document.bytes)?,
            DocumentFormat::Txt | DocumentFormat::Markdown => self.parse_text(&document.bytes)?,
        };

        let text = text.trim().to_string();
        if text.is_empty() {
            add_log(
                logs,
                "ERROR",
                "Extract",
                &format!("No text content found in {}", document.file_name),
            );
            return Err(AppError::ExtractionError(format!(
                "No text content found in {}",
                document.file_name
            )));
        }

        add_log(
            logs,
            "INFO",
            "Extract",
            &format!("Extracted {} characters", text.len()),
        );

        Ok(text)
    }
}

impl Default for ExtractionUseCase {
    fn default() -> Self {
        Self::new()
    }
}
