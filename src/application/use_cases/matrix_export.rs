//! CSV serialization of the traceability matrix.

use crate::domain::error::{AppError, Result};
use crate::domain::test_case::TestCaseRecord;

use std::path::Path;

/// Fixed header row of the CSV artifact.
pub const CSV_HEADERS: [&str; 10] = [
    "Requirement ID",
    "Test Case ID",
    "Type",
    "Priority",
    "Test Scenario",
    "Preconditions",
    "Test Steps",
    "Expected Result",
    "Compliance Tags",
    "Traceability",
];

/// Serialize records to CSV. The output always contains the header row and
/// exactly one row per record.
pub fn to_csv(records: &[TestCaseRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| AppError::ParseError(format!("Failed to write CSV header: {}", e)))?;

    for record in records {
        writer
            .write_record([
                record.requirement_id.as_str(),
                record.test_case_id.as_str(),
                record.case_type.as_str(),
                record.priority.as_str(),
                record.scenario.as_str(),
                record.preconditions.as_str(),
                record.steps_cell().as_str(),
                record.expected_result.as_str(),
                record.compliance_tags.as_str(),
                record.traceability.as_str(),
            ])
            .map_err(|e| AppError::ParseError(format!("Failed to write CSV row: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV writer: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| AppError::Internal(format!("CSV output is not UTF-8: {}", e)))
}

/// Derive the download file name from the uploaded document name.
pub fn csv_file_name(source_file_name: &str) -> String {
    let stem = Path::new(source_file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("requirements");
    format!("{}_test_cases.csv", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, scenario: &str) -> TestCaseRecord {
        TestCaseRecord {
            test_case_id: id.to_string(),
            case_type: "compliance".to_string(),
            priority: "high".to_string(),
            requirement_id: "REQ-001".to_string(),
            scenario: scenario.to_string(),
            preconditions: "None".to_string(),
            steps: vec!["step one".to_string(), "step two".to_string()],
            expected_result: "Audit entry recorded".to_string(),
            compliance_tags: "FDA 21 CFR Part 11".to_string(),
            traceability: "REQ-001".to_string(),
        }
    }

    #[test]
    fn test_header_row_is_fixed() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(
            csv.lines().next().unwrap(),
            "Requirement ID,Test Case ID,Type,Priority,Test Scenario,Preconditions,\
             Test Steps,Expected Result,Compliance Tags,Traceability"
        );
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_row_count_matches_records() {
        let records = vec![record("TC001", "a"), record("TC002", "b"), record("TC003", "c")];
        let csv = to_csv(&records).unwrap();
        assert_eq!(csv.lines().count(), 1 + records.len());
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut rec = record("TC001", "Check login, logout, and session expiry");
        rec.traceability = "REQ-001, REQ-002".to_string();
        let csv = to_csv(&[rec]).unwrap();
        assert!(csv.contains("\"Check login, logout, and session expiry\""));
        assert!(csv.contains("\"REQ-001, REQ-002\""));
    }

    #[test]
    fn test_tag_column_carries_the_standard() {
        let records = vec![record("TC001", "a"), record("TC002", "b")];
        let csv = to_csv(&records).unwrap();
        for line in csv.lines().skip(1) {
            assert!(line.contains("FDA 21 CFR Part 11"));
        }
    }

    #[test]
    fn test_csv_file_name() {
        assert_eq!(csv_file_name("reqs.pdf"), "reqs_test_cases.csv");
        assert_eq!(csv_file_name("spec.final.docx"), "spec.final_test_cases.csv");
        assert_eq!(csv_file_name(""), "requirements_test_cases.csv");
    }
}
