use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Supported upload formats for requirement documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
    Markdown,
}

impl DocumentFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "txt" => Some(DocumentFormat::Txt),
            "md" | "markdown" => Some(DocumentFormat::Markdown),
            _ => None,
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Txt => "txt",
            DocumentFormat::Markdown => "md",
        };
        f.write_str(label)
    }
}

/// An uploaded requirements document. Raw bytes plus the declared format;
/// discarded once the request completes.
#[derive(Debug, Clone)]
pub struct RequirementDocument {
    pub file_name: String,
    pub format: DocumentFormat,
    pub bytes: Vec<u8>,
}

impl RequirementDocument {
    pub fn new(file_name: impl Into<String>, format: DocumentFormat, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            format,
            bytes,
        }
    }

    /// Build a document from a file name, deriving the format from its
    /// extension.
    pub fn from_upload(file_name: &str, bytes: Vec<u8>) -> Option<Self> {
        DocumentFormat::from_file_name(file_name)
            .map(|format| Self::new(file_name.to_string(), format, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension("PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_extension("docx"), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::from_extension("md"), Some(DocumentFormat::Markdown));
        assert_eq!(DocumentFormat::from_extension("xlsx"), None);
    }

    #[test]
    fn test_from_upload_derives_format() {
        let doc = RequirementDocument::from_upload("requirements.txt", b"REQ-001".to_vec());
        assert!(doc.is_some());
        assert_eq!(doc.unwrap().format, DocumentFormat::Txt);

        assert!(RequirementDocument::from_upload("image.png", Vec::new()).is_none());
        assert!(RequirementDocument::from_upload("no_extension", Vec::new()).is_none());
    }
}
