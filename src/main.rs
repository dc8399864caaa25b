//! JD matcher: semantic job description / resume matching with GitHub
//! skill quiz generation

use clap::Parser;
use jd_matcher::cli::{self, Cli, Commands, ConfigAction};
use jd_matcher::config::{Config, OutputFormat};
use jd_matcher::error::{MatcherError, Result};
use jd_matcher::github::quiz::GeminiClient;
use jd_matcher::github::{GithubClient, QuizGenerator};
use jd_matcher::input::DocumentSource;
use jd_matcher::output;
use jd_matcher::processing::embeddings::Model2VecProvider;
use jd_matcher::processing::matcher::{MatchOptions, Matcher};
use log::{error, info};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        if e.is_validation_error() {
            error!("Invalid request: {}", e);
        } else {
            error!("Command failed: {}", e);
        }
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            job,
            top_k,
            embedding,
            output: format,
        } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| MatcherError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| MatcherError::InvalidInput(format!("Job description file: {}", e)))?;
            let output_format =
                cli::parse_output_format(&format).map_err(MatcherError::InvalidInput)?;

            if matches!(output_format, OutputFormat::Console) {
                println!("🚀 JD / resume matching");
                println!("📄 Resume: {}", resume.display());
                println!("💼 Job Description: {}", job.display());
            }

            info!("Extracting text from input documents");
            let mut source = DocumentSource::new();
            let resume_text = source.extract_text(&resume).await?;
            let job_text = source.extract_text(&job).await?;

            if resume_text.trim().is_empty() {
                return Err(MatcherError::EmptyInput(
                    "Could not extract text from resume (maybe a scanned PDF)".to_string(),
                ));
            }
            if job_text.trim().is_empty() {
                return Err(MatcherError::EmptyInput(
                    "Job description file is empty".to_string(),
                ));
            }

            // The provider holds the loaded model weights; constructed once
            // here and shared read-only for the rest of the run.
            let model_id = embedding.unwrap_or_else(|| config.models.embedding_model.clone());
            let provider = Model2VecProvider::load(&model_id, config.models_dir())?;
            info!("Using embedding model: {}", provider.model_name());

            let mut options = MatchOptions::from(&config.matching);
            if let Some(k) = top_k {
                options.top_k = k;
            }

            let matcher = Matcher::new(Arc::new(provider), options);
            let result = matcher.match_resume(&job_text, &resume_text)?;

            match output_format {
                OutputFormat::Console => output::print_match_console(&result),
                OutputFormat::Json => println!("{}", output::to_json(&result)?),
            }
        }

        Commands::Quiz {
            username,
            job,
            github_token,
            gemini_key,
            output: format,
        } => {
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| MatcherError::InvalidInput(format!("Job description file: {}", e)))?;
            let output_format =
                cli::parse_output_format(&format).map_err(MatcherError::InvalidInput)?;

            if matches!(output_format, OutputFormat::Console) {
                println!("🔍 GitHub skill validation for {}", username);
            }

            let mut source = DocumentSource::new();
            let job_text = source.extract_text(&job).await?;
            if job_text.trim().is_empty() {
                return Err(MatcherError::EmptyInput(
                    "Job description file is empty".to_string(),
                ));
            }

            let github = GithubClient::new(&config.github.api_url, &github_token)?;
            let gemini = GeminiClient::new(&config.github.quiz_model, &gemini_key);
            let generator =
                QuizGenerator::new(github, Box::new(gemini), config.github.quiz_questions);

            let bundle = generator.generate(job_text.trim(), &username).await?;

            match output_format {
                OutputFormat::Console => output::print_quiz_console(&bundle),
                OutputFormat::Json => println!("{}", output::to_json(&bundle)?),
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Current Configuration\n");
                println!("Models Directory: {}", config.models_dir().display());
                println!("Embedding Model: {}", config.models.embedding_model);
                println!("\nMatching:");
                println!("  Top K: {}", config.matching.top_k);
                println!("  Min Chunk Length: {}", config.matching.min_chunk_length);
                println!(
                    "  Fallback Min Chunks: {}",
                    config.matching.fallback_min_chunks
                );
                println!("\nGitHub:");
                println!("  API URL: {}", config.github.api_url);
                println!("  Quiz Model: {}", config.github.quiz_model);
                println!("  Quiz Questions: {}", config.github.quiz_questions);
            }

            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}
