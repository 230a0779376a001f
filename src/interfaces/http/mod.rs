use crate::application::use_cases::matrix_export;
use crate::application::GenerationUseCase;
use crate::domain::document::RequirementDocument;
use crate::domain::error::{AppError, Result};
use crate::domain::standard::ComplianceStandard;
use crate::domain::test_case::TestCaseRecord;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm_clients::LLMClient;
use crate::interfaces::ui::INDEX_HTML;
use crate::shared::logbuf::{add_log, LogBuffer};

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub struct HttpState {
    pub generation: GenerationUseCase,
    pub config: AppConfig,
    pub logs: LogBuffer,
}

impl HttpState {
    pub fn new(
        config: AppConfig,
        llm_client: Arc<dyn LLMClient + Send + Sync>,
        logs: LogBuffer,
    ) -> Self {
        Self {
            generation: GenerationUseCase::new(llm_client),
            config,
            logs,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequestBody {
    #[validate(length(min = 1, message = "file_name is required"))]
    pub file_name: String,
    #[validate(length(min = 1, message = "content_base64 is required"))]
    pub content_base64: String,
    pub standard: ComplianceStandard,
    #[serde(default)]
    pub instructions: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponseBody {
    pub run_id: String,
    pub structured: bool,
    pub row_count: usize,
    pub test_cases: Vec<TestCaseRecord>,
    pub raw_output: String,
    pub csv: Option<String>,
    pub csv_file_name: String,
}

fn decode_upload(body: &GenerateRequestBody) -> Result<RequirementDocument> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let bytes = BASE64
        .decode(body.content_base64.trim())
        .map_err(|e| AppError::ValidationError(format!("Invalid base64 upload: {}", e)))?;

    RequirementDocument::from_upload(&body.file_name, bytes).ok_or_else(|| {
        AppError::ValidationError(format!(
            "Unsupported file type: {} (expected pdf, docx, txt, or md)",
            body.file_name
        ))
    })
}

fn error_response(err: &AppError) -> HttpResponse {
    match err {
        AppError::ValidationError(_) | AppError::ExtractionError(_) | AppError::NotFound(_) => {
            HttpResponse::BadRequest().body(err.to_string())
        }
        AppError::LLMError(_) => HttpResponse::BadGateway().body(err.to_string()),
        _ => HttpResponse::InternalServerError().body(err.to_string()),
    }
}

async fn run_pipeline(
    data: &web::Data<HttpState>,
    body: &GenerateRequestBody,
) -> Result<(crate::application::GenerationReport, String)> {
    let document = decode_upload(body)?;

    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "Generating test cases: file={} standard={}",
            document.file_name, body.standard
        ),
    );

    let report = data
        .generation
        .execute_document(
            &data.config.llm,
            &document,
            body.standard,
            body.instructions.clone(),
            &data.logs,
        )
        .await?;

    Ok((report, matrix_export::csv_file_name(&document.file_name)))
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[get("/standards")]
async fn standards() -> impl Responder {
    let names: Vec<&str> = ComplianceStandard::all()
        .iter()
        .map(|standard| standard.display_name())
        .collect();
    HttpResponse::Ok().json(names)
}

#[post("/generate")]
async fn generate(
    data: web::Data<HttpState>,
    body: web::Json<GenerateRequestBody>,
) -> impl Responder {
    match run_pipeline(&data, &body).await {
        Ok((report, file_name)) => {
            let csv = if report.structured {
                matrix_export::to_csv(&report.records).ok()
            } else {
                None
            };
            HttpResponse::Ok().json(GenerateResponseBody {
                run_id: report.run_id,
                structured: report.structured,
                row_count: report.records.len(),
                test_cases: report.records,
                raw_output: report.raw_output,
                csv,
                csv_file_name: file_name,
            })
        }
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Generation failed: {}", e),
            );
            error_response(&e)
        }
    }
}

#[post("/generate/csv")]
async fn generate_csv(
    data: web::Data<HttpState>,
    body: web::Json<GenerateRequestBody>,
) -> impl Responder {
    match run_pipeline(&data, &body).await {
        Ok((report, file_name)) => {
            if !report.structured {
                // Degraded output: raw text instead of a table
                return HttpResponse::Ok()
                    .content_type("text/plain; charset=utf-8")
                    .body(report.raw_output);
            }
            match matrix_export::to_csv(&report.records) {
                Ok(csv) => HttpResponse::Ok()
                    .content_type("text/csv; charset=utf-8")
                    .insert_header((
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", file_name),
                    ))
                    .body(csv),
                Err(e) => error_response(&e),
            }
        }
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("CSV generation failed: {}", e),
            );
            error_response(&e)
        }
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap();
    HttpResponse::Ok().json(&*logs)
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

pub fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .service(health)
        .service(standards)
        .service(generate)
        .service(generate_csv)
        .service(get_logs)
}

pub fn start_server(state: Arc<HttpState>) -> std::io::Result<Server> {
    let host = state.config.server.host.clone();
    let port = state.config.server.port;
    let cors_origin = state.config.server.cors_origin.clone();
    let data = web::Data::from(state);

    let server = HttpServer::new(move || {
        let cors = match cors_origin.as_deref() {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header(),
            None => Cors::permissive(),
        };

        App::new()
            .wrap(cors)
            .app_data(data.clone())
            .service(index)
            .service(api_scope())
    })
    .bind((host, port))?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::Result;
    use crate::domain::llm_config::LLMConfig;
    use crate::shared::logbuf::new_buffer;
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct StubClient {
        response: String,
    }

    #[async_trait]
    impl LLMClient for StubClient {
        async fn generate(
            &self,
            _config: &LLMConfig,
            _system: &str,
            _user: &str,
        ) -> Result<String> {
            Ok(self.response.clone())
        }

        async fn list_models(&self, _config: &LLMConfig) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    fn state_with_response(response: &str) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            AppConfig::default(),
            Arc::new(StubClient {
                response: response.to_string(),
            }),
            new_buffer(),
        ))
    }

    fn upload_body(file_name: &str, content: &str, standard: &str) -> serde_json::Value {
        serde_json::json!({
            "file_name": file_name,
            "content_base64": BASE64.encode(content),
            "standard": standard,
        })
    }

    const AGENT_JSON: &str = r#"{"test_cases":[
        {"test_case_id":"TC001","test_type":"compliance","priority":"high",
         "requirement_id":"REQ-001","scenario":"Verify audit trail",
         "preconditions":"None","steps":["open record","edit record"],
         "expected_result":"Change is logged","compliance_tags":"FDA 21 CFR Part 11"}
    ]}"#;

    #[actix_web::test]
    async fn test_health_endpoint() {
        let app =
            test::init_service(App::new().app_data(state_with_response("{}")).service(api_scope()))
                .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request())
            .await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_standards_endpoint_lists_all() {
        let app =
            test::init_service(App::new().app_data(state_with_response("{}")).service(api_scope()))
                .await;
        let resp: Vec<String> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/standards").to_request(),
        )
        .await;
        assert_eq!(resp.len(), 4);
        assert!(resp.contains(&"FDA 21 CFR Part 11".to_string()));
    }

    #[actix_web::test]
    async fn test_generate_returns_structured_report() {
        let app = test::init_service(
            App::new()
                .app_data(state_with_response(AGENT_JSON))
                .service(api_scope()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(upload_body(
                "reqs.txt",
                "REQ-001: The system shall log edits.",
                "FDA 21 CFR Part 11",
            ))
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["structured"], true);
        assert_eq!(resp["row_count"], 1);
        assert_eq!(resp["test_cases"][0]["compliance_tags"], "FDA 21 CFR Part 11");
        assert_eq!(resp["csv_file_name"], "reqs_test_cases.csv");
        assert!(resp["csv"].as_str().unwrap().starts_with("Requirement ID,"));
    }

    #[actix_web::test]
    async fn test_generate_rejects_unsupported_file_type() {
        let app = test::init_service(
            App::new()
                .app_data(state_with_response(AGENT_JSON))
                .service(api_scope()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(upload_body("image.png", "not a document", "HIPAA"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_generate_csv_returns_attachment() {
        let app = test::init_service(
            App::new()
                .app_data(state_with_response(AGENT_JSON))
                .service(api_scope()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate/csv")
            .set_json(upload_body("reqs.txt", "REQ-001: log edits", "FDA 21 CFR Part 11"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv; charset=utf-8"
        );

        let body = test::read_body(resp).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[actix_web::test]
    async fn test_generate_csv_degrades_to_plain_text() {
        let app = test::init_service(
            App::new()
                .app_data(state_with_response("here is some free text, not JSON"))
                .service(api_scope()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate/csv")
            .set_json(upload_body("reqs.txt", "REQ-001: log edits", "HIPAA"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }
}
