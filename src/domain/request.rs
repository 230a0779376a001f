use crate::domain::standard::ComplianceStandard;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Immutable input to the generation pipeline. Built once per request after
/// extraction succeeds.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerationRequest {
    #[validate(length(min = 1, message = "document text is empty"))]
    pub document_text: String,
    pub standard: ComplianceStandard,
    pub instructions: Option<String>,
}

impl GenerationRequest {
    pub fn new(
        document_text: impl Into<String>,
        standard: ComplianceStandard,
        instructions: Option<String>,
    ) -> Self {
        Self {
            document_text: document_text.into(),
            standard,
            instructions: instructions
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_fails_validation() {
        let request = GenerationRequest::new("", ComplianceStandard::Hipaa, None);
        assert!(request.validate().is_err());

        let request = GenerationRequest::new("REQ-001: ...", ComplianceStandard::Hipaa, None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_blank_instructions_are_dropped() {
        let request = GenerationRequest::new(
            "text",
            ComplianceStandard::Iso13485,
            Some("   ".to_string()),
        );
        assert!(request.instructions.is_none());
    }
}
