use crate::application::use_cases::extraction::ExtractionUseCase;
use crate::application::use_cases::llm_output::extract_json_payload;
use crate::application::use_cases::prompts::{build_system_prompt, build_user_prompt};
use crate::domain::document::RequirementDocument;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::domain::request::GenerationRequest;
use crate::domain::standard::ComplianceStandard;
use crate::domain::test_case::{split_requirement_refs, TestCaseRecord};
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::response::clean_llm_response;
use crate::shared::logbuf::{add_log, LogBuffer};
use crate::shared::token_counter::TokenCounter;

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Result of one run through the pipeline. When the agent output could not be
/// parsed against the JSON contract, `structured` is false and `records` is
/// empty; `raw_output` always carries the cleaned agent response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub standard: ComplianceStandard,
    pub model: String,
    pub structured: bool,
    pub records: Vec<TestCaseRecord>,
    pub raw_output: String,
}

/// What the agent is instructed to return. All fields except the scenario are
/// optional with defaults so a sloppy response still maps to usable records.
#[derive(Debug, Deserialize, Serialize)]
struct AgentOutput {
    #[serde(default)]
    test_cases: Vec<AgentTestCase>,
}

#[derive(Debug, Deserialize, Serialize)]
struct AgentTestCase {
    #[serde(default)]
    test_case_id: Option<String>,
    #[serde(default)]
    test_type: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    requirement_id: Option<String>,
    #[serde(default, alias = "title", alias = "test_scenario")]
    scenario: String,
    #[serde(default)]
    preconditions: Option<String>,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default, alias = "expected")]
    expected_result: Option<String>,
    #[serde(default)]
    compliance_tags: Option<String>,
}

pub struct GenerationUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    extraction: ExtractionUseCase,
}

impl GenerationUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        Self {
            llm_client,
            extraction: ExtractionUseCase::new(),
        }
    }

    /// Full pipeline for an uploaded document: extract, compose, call the
    /// agent, parse the response.
    pub async fn execute_document(
        &self,
        config: &LLMConfig,
        document: &RequirementDocument,
        standard: ComplianceStandard,
        instructions: Option<String>,
        logs: &LogBuffer,
    ) -> Result<GenerationReport> {
        let text = self.extraction.extract(document, logs)?;
        let request = GenerationRequest::new(text, standard, instructions);
        self.execute(config, &request, logs).await
    }

    /// Pipeline from already-extracted text.
    pub async fn execute(
        &self,
        config: &LLMConfig,
        request: &GenerationRequest,
        logs: &LogBuffer,
    ) -> Result<GenerationReport> {
        request.validate().map_err(|e| {
            AppError::ValidationError(format!("Invalid generation request: {}", e))
        })?;

        let run_id = Uuid::new_v4().to_string();
        let system_prompt = build_system_prompt(request.standard);
        let user_prompt = build_user_prompt(request);

        add_log(
            logs,
            "INFO",
            "Generate",
            &format!(
                "run={} standard={} model={} input_tokens~{}",
                run_id,
                request.standard.display_name(),
                config.model,
                TokenCounter::estimate_tokens(&user_prompt)
            ),
        );

        let raw_output = self
            .llm_client
            .generate(config, &system_prompt, &user_prompt)
            .await
            .map_err(|e| {
                add_log(logs, "ERROR", "Generate", &format!("run={} {}", run_id, e));
                e
            })?;

        let cleaned = clean_llm_response(&raw_output);
        let payload = extract_json_payload(&cleaned);

        let report = match serde_json::from_str::<AgentOutput>(&payload) {
            Ok(output) => {
                let records = map_records(output.test_cases, request.standard);
                add_log(
                    logs,
                    "INFO",
                    "Generate",
                    &format!("run={} parsed {} test cases", run_id, records.len()),
                );
                GenerationReport {
                    run_id,
                    standard: request.standard,
                    model: config.model.clone(),
                    structured: true,
                    records,
                    raw_output: cleaned,
                }
            }
            Err(err) => {
                // Degrade to the raw text rather than failing the request
                add_log(
                    logs,
                    "WARN",
                    "Generate",
                    &format!(
                        "run={} agent output did not match the schema ({}); returning raw text",
                        run_id, err
                    ),
                );
                GenerationReport {
                    run_id,
                    standard: request.standard,
                    model: config.model.clone(),
                    structured: false,
                    records: Vec::new(),
                    raw_output: cleaned,
                }
            }
        };

        Ok(report)
    }
}

fn map_records(items: Vec<AgentTestCase>, standard: ComplianceStandard) -> Vec<TestCaseRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for (index, item) in items.into_iter().enumerate() {
        let scenario = item.scenario.trim().to_string();
        if scenario.is_empty() {
            continue;
        }

        let case_type = normalized_or(item.test_type, "functional");
        let steps_key = item.steps.join("|");
        let dedup_source = format!("{}:{}:{}", case_type, scenario, steps_key);
        if !seen.insert(hash_value(&dedup_source)) {
            continue;
        }

        let (requirement_id, traceability) =
            split_requirement_refs(item.requirement_id.as_deref().unwrap_or(""));

        records.push(TestCaseRecord {
            test_case_id: item
                .test_case_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| format!("TC{:03}", index + 1)),
            case_type,
            priority: normalized_or(item.priority, "medium"),
            requirement_id,
            scenario,
            preconditions: item
                .preconditions
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| "None".to_string()),
            steps: item
                .steps
                .into_iter()
                .map(|step| step.trim().to_string())
                .filter(|step| !step.is_empty())
                .collect(),
            expected_result: item
                .expected_result
                .map(|value| value.trim().to_string())
                .unwrap_or_default(),
            compliance_tags: item
                .compliance_tags
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| standard.display_name().to_string()),
            traceability,
        });
    }

    records
}

fn normalized_or(value: Option<String>, fallback: &str) -> String {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn hash_value(value: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
