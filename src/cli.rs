//! CLI interface for the JD matcher

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jd-matcher")]
#[command(about = "Semantic job description and resume matching")]
#[command(
    long_about = "Rank resume chunks against a job description with embeddings, and generate skill quizzes from verified GitHub usage"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a resume against a job description
    Match {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Number of top chunks kept for the filtered resume
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Embedding model repo id or local path
        #[arg(short, long)]
        embedding: Option<String>,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Generate a skill quiz from a GitHub profile and a job description
    Quiz {
        /// GitHub username to scan
        #[arg(short, long)]
        username: String,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// GitHub API token
        #[arg(long)]
        github_token: String,

        /// Gemini API key
        #[arg(long)]
        gemini_key: String,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert!(matches!(parse_output_format("console"), Ok(OutputFormat::Console)));
        assert!(matches!(parse_output_format("JSON"), Ok(OutputFormat::Json)));
        assert!(parse_output_format("yaml").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(&PathBuf::from("resume.pdf"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(&PathBuf::from("resume.PDF"), &["pdf"]).is_ok());
        assert!(validate_file_extension(&PathBuf::from("resume.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(&PathBuf::from("resume"), &["pdf"]).is_err());
    }
}
