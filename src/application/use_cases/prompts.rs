//! Prompt assembly for the generation agent.
//!
//! Pure functions: identical inputs always produce identical prompts. The
//! output contract is an explicit JSON schema rather than free text, so the
//! formatter can validate with serde instead of scraping delimiters.

use crate::domain::request::GenerationRequest;
use crate::domain::standard::ComplianceStandard;
use crate::shared::token_counter::truncate_at_word_boundary;

/// Document text is capped before it enters the prompt to stay inside the
/// model's input budget.
pub const MAX_DOCUMENT_CHARS: usize = 8_000;

pub fn build_system_prompt(standard: ComplianceStandard) -> String {
    format!(
        r#"You are an expert healthcare software QA engineer. You turn software
requirements documents into compliant, fully traceable test cases.

The selected compliance standard is {standard}. Pay particular attention to
{focus}.

For every identified requirement generate functional, security, compliance,
integration, and acceptance test cases, covering both positive and negative
scenarios. Every test case must reference at least one requirement identifier
from the document so the result forms a complete traceability matrix.

Return ONLY a JSON object with this exact shape, no prose and no markdown:

{{
  "test_cases": [
    {{
      "test_case_id": "TC001",
      "test_type": "functional | security | compliance | integration | acceptance",
      "priority": "high | medium | low",
      "requirement_id": "REQ-001 (comma-separated when a case covers several)",
      "scenario": "what is being tested",
      "preconditions": "setup required before execution",
      "steps": ["first step", "second step"],
      "expected_result": "what happens when the test passes",
      "compliance_tags": "{standard}"
    }}
  ]
}}

Generate at least 10 test cases."#,
        standard = standard.display_name(),
        focus = standard.focus_clause(),
    )
}

pub fn build_user_prompt(request: &GenerationRequest) -> String {
    let document = truncate_at_word_boundary(&request.document_text, MAX_DOCUMENT_CHARS);

    let mut body = String::new();
    body.push_str(&format!(
        "Compliance standard: {}\n",
        request.standard.display_name()
    ));

    if let Some(instructions) = request.instructions.as_ref() {
        body.push_str(&format!("Additional instructions: {}\n", instructions));
    }

    body.push_str("\nREQUIREMENTS DOCUMENT:\n");
    body.push_str(&document);
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest::new(
            "REQ-001: The system shall encrypt PHI at rest.",
            ComplianceStandard::Hipaa,
            Some("Focus on audit trails".to_string()),
        )
    }

    #[test]
    fn test_prompts_are_deterministic() {
        let request = request();
        assert_eq!(
            build_system_prompt(request.standard),
            build_system_prompt(request.standard)
        );
        assert_eq!(build_user_prompt(&request), build_user_prompt(&request));
    }

    #[test]
    fn test_system_prompt_names_the_standard() {
        let prompt = build_system_prompt(ComplianceStandard::Fda21CfrPart11);
        assert!(prompt.contains("FDA 21 CFR Part 11"));
        assert!(prompt.contains("electronic records integrity"));
        assert!(prompt.contains("\"test_cases\""));
    }

    #[test]
    fn test_user_prompt_includes_document_and_instructions() {
        let prompt = build_user_prompt(&request());
        assert!(prompt.contains("REQUIREMENTS DOCUMENT:"));
        assert!(prompt.contains("REQ-001: The system shall encrypt PHI at rest."));
        assert!(prompt.contains("Additional instructions: Focus on audit trails"));
    }

    #[test]
    fn test_user_prompt_truncates_large_documents() {
        let request = GenerationRequest::new(
            "word ".repeat(10_000),
            ComplianceStandard::Iec62304,
            None,
        );
        let prompt = build_user_prompt(&request);
        assert!(prompt.len() < MAX_DOCUMENT_CHARS + 200);
        assert!(prompt.contains("..."));
    }
}
