use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};

use tracecase::application::use_cases::matrix_export;
use tracecase::application::{ExtractionUseCase, GenerationUseCase};
use tracecase::domain::error::{AppError, Result};
use tracecase::domain::standard::ComplianceStandard;
use tracecase::infrastructure::config::AppConfig;
use tracecase::infrastructure::llm_clients::default_client;
use tracecase::interfaces::http::{start_server, HttpState};
use tracecase::shared::logbuf::new_buffer;

/// tracecase - healthcare requirements to compliant test case matrices
#[derive(Parser)]
#[command(name = "tracecase", version)]
#[command(about = "Generate compliant, traceable test cases from healthcare requirement documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (upload UI + JSON/CSV API)
    Serve {
        /// Bind host (overrides configuration)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides configuration)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run the pipeline once against a local document
    Generate {
        /// Requirements document (pdf, docx, txt, or md)
        file: String,

        /// Compliance standard (HIPAA, FDA 21 CFR Part 11, IEC 62304, ISO 13485)
        #[arg(short, long, value_parser = ComplianceStandard::from_str, default_value = "HIPAA")]
        standard: ComplianceStandard,

        /// Extra instructions forwarded to the agent
        #[arg(short, long)]
        instructions: Option<String>,

        /// Write the artifact here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },

    /// List supported compliance standards
    Standards,

    /// List models available to the configured agent
    Models,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load()?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let logs = new_buffer();
            let state = Arc::new(HttpState::new(config.clone(), default_client(), logs));

            tracing::info!(
                host = %config.server.host,
                port = config.server.port,
                "Starting tracecase server"
            );

            let server = start_server(state)?;
            server.await?;
            Ok(())
        }

        Commands::Generate {
            file,
            standard,
            instructions,
            output,
            format,
        } => {
            let logs = new_buffer();
            let extraction = ExtractionUseCase::new();
            let document = extraction.load_from_path(&file, &logs)?;

            let generation = GenerationUseCase::new(default_client());
            let report = generation
                .execute_document(&config.llm, &document, standard, instructions, &logs)
                .await?;

            let artifact = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&report)
                    .map_err(|e| AppError::Internal(format!("Failed to encode report: {}", e)))?,
                OutputFormat::Csv => {
                    if report.structured {
                        matrix_export::to_csv(&report.records)?
                    } else {
                        tracing::warn!(
                            "Agent output did not match the schema; writing raw text instead of CSV"
                        );
                        report.raw_output.clone()
                    }
                }
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, artifact)?;
                    tracing::info!(path = %path.display(), rows = report.records.len(), "Artifact written");
                }
                None => println!("{}", artifact),
            }
            Ok(())
        }

        Commands::Standards => {
            for standard in ComplianceStandard::all() {
                println!("{}", standard.display_name());
            }
            Ok(())
        }

        Commands::Models => {
            let client = default_client();
            let models = client.list_models(&config.llm).await?;
            for model in models {
                println!("{}", model);
            }
            Ok(())
        }
    }
}
