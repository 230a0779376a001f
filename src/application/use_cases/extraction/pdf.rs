use super::ExtractionUseCase;
use crate::domain::error::{AppError, Result};

impl ExtractionUseCase {
    pub(in crate::application::use_cases::extraction) fn parse_pdf(
        &self,
        bytes: &[u8],
    ) -> Result<String> {
        use lopdf::Document;

        let document = Document::load_mem(bytes)
            .map_err(|e| AppError::ExtractionError(format!("Failed to load PDF: {}", e)))?;

        let mut pages_text: Vec<String> = Vec::new();

        // Extract per page to keep page boundaries as blank lines
        for (&page_num, _) in document.get_pages().iter() {
            if let Ok(page_text) = document.extract_text(&[page_num]) {
                let trimmed = page_text.trim();
                if !trimmed.is_empty() {
                    pages_text.push(trimmed.to_string());
                }
            }
        }

        Ok(pages_text.join("\n\n"))
    }
}
