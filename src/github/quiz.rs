//! Quiz generation from a job description and verified GitHub skills

use crate::error::{MatcherError, Result};
use crate::github::client::{GithubClient, LanguageShare};
use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Hosted text-generation model boundary; tests substitute a canned one.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Gemini REST client.
pub struct GeminiClient {
    http: reqwest::Client,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(model: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_URL, self.model, self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(MatcherError::QuizGeneration(format!(
                "Model request failed: HTTP {}",
                response.status()
            )));
        }

        let value: serde_json::Value = response.json().await?;
        value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                MatcherError::QuizGeneration("Model response carried no text".to_string())
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: String,
    pub category: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizBundle {
    pub stats: Vec<LanguageShare>,
    pub questions: Vec<QuizQuestion>,
}

/// Builds a multiple-choice quiz calibrated against a job description and
/// the candidate's verified GitHub language usage.
pub struct QuizGenerator {
    github: GithubClient,
    generator: Box<dyn TextGenerator>,
    question_count: usize,
}

impl QuizGenerator {
    pub fn new(
        github: GithubClient,
        generator: Box<dyn TextGenerator>,
        question_count: usize,
    ) -> Self {
        Self {
            github,
            generator,
            question_count,
        }
    }

    pub async fn generate(&self, job_description: &str, username: &str) -> Result<QuizBundle> {
        let stats = self.github.language_stats(username).await?;
        if stats.is_empty() {
            return Err(MatcherError::QuizGeneration(
                "No GitHub data found to generate quiz".to_string(),
            ));
        }

        let prompt = build_prompt(job_description, &stats, self.question_count)?;
        info!("Requesting {}-question quiz", self.question_count);
        let raw = self.generator.generate(&prompt).await?;
        let questions = parse_quiz(&raw)?;

        Ok(QuizBundle { stats, questions })
    }
}

fn build_prompt(
    job_description: &str,
    stats: &[LanguageShare],
    question_count: usize,
) -> Result<String> {
    let stats_json = serde_json::to_string(stats)?;

    Ok(format!(
        "### ROLE ###\n\
         You are a senior technical interviewer.\n\n\
         ### DATA ###\n\
         Job Description: \"{job_description}\"\n\
         Candidate's verified skills (GitHub): {stats_json}\n\n\
         ### TASK ###\n\
         Generate a {question_count}-question multiple-choice quiz.\n\n\
         ### RULES ###\n\
         1. If the job description requires a skill the candidate has, ask a HARD code-based question.\n\
         2. If the job description requires a skill the candidate lacks, ask a BASIC conceptual question.\n\
         3. Output ONLY valid JSON. No markdown formatting.\n\n\
         ### JSON STRUCTURE ###\n\
         [{{\"question\": \"...\", \"options\": [\"A\", \"B\", \"C\", \"D\"], \
         \"correct_option\": \"A\", \"category\": \"Coding\" or \"Theory\", \
         \"reason\": \"Why this question was chosen\"}}]"
    ))
}

/// Parse the model reply, tolerating markdown code fences around the JSON.
fn parse_quiz(raw: &str) -> Result<Vec<QuizQuestion>> {
    let cleaned = raw.trim().replace("```json", "").replace("```", "");
    serde_json::from_str(cleaned.trim()).map_err(|e| {
        MatcherError::QuizGeneration(format!("Model returned malformed quiz JSON: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIZ_JSON: &str = r#"[
        {
            "question": "Which Rust type guarantees exclusive mutable access?",
            "options": ["Rc<T>", "&mut T", "Arc<T>", "Cell<T>"],
            "correct_option": "&mut T",
            "category": "Coding",
            "reason": "Candidate has heavy Rust usage"
        }
    ]"#;

    #[test]
    fn test_parse_quiz_plain_json() {
        let questions = parse_quiz(QUIZ_JSON).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options.len(), 4);
        assert_eq!(questions[0].category, "Coding");
    }

    #[test]
    fn test_parse_quiz_strips_markdown_fences() {
        let fenced = format!("```json\n{}\n```", QUIZ_JSON);
        let questions = parse_quiz(&fenced).unwrap();
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn test_parse_quiz_rejects_malformed_json() {
        let result = parse_quiz("sure! here is your quiz:");
        assert!(matches!(result, Err(MatcherError::QuizGeneration(_))));
    }

    #[test]
    fn test_build_prompt_includes_inputs() {
        let stats = vec![LanguageShare {
            language: "Rust".to_string(),
            percent: 80.0,
        }];

        let prompt = build_prompt("backend rust engineer", &stats, 5).unwrap();

        assert!(prompt.contains("backend rust engineer"));
        assert!(prompt.contains("Rust"));
        assert!(prompt.contains("5-question"));
    }
}
