use serde::{Deserialize, Serialize};

/// One row of the traceability matrix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestCaseRecord {
    pub test_case_id: String,
    pub case_type: String,
    pub priority: String,
    pub requirement_id: String,
    pub scenario: String,
    pub preconditions: String,
    pub steps: Vec<String>,
    pub expected_result: String,
    pub compliance_tags: String,
    pub traceability: String,
}

impl TestCaseRecord {
    /// Steps rendered into a single CSV cell.
    pub fn steps_cell(&self) -> String {
        self.steps.join("; ")
    }
}

/// Split a requirement reference that may carry several comma-separated ids.
/// The first id becomes the primary reference, the full list is kept for the
/// traceability column.
pub fn split_requirement_refs(raw: &str) -> (String, String) {
    let ids: Vec<String> = raw
        .split(',')
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();

    match ids.first() {
        Some(primary) => (primary.clone(), ids.join(", ")),
        None => ("REQ-001".to_string(), "REQ-001".to_string()),
    }
}
