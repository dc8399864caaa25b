//! GitHub REST API client for repository language statistics

use crate::error::{MatcherError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const GITHUB_API_VERSION: &str = "2022-11-28";

/// Share of one language across a user's repositories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    /// Percentage of total bytes, rounded to 2 decimals.
    pub percent: f32,
}

pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
}

impl GithubClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("jd-matcher"));

        let auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| MatcherError::GitHub(format!("Invalid GitHub token: {}", e)))?;
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Repository names owned by `username`.
    pub async fn list_repos(&self, username: &str) -> Result<Vec<String>> {
        #[derive(Deserialize)]
        struct Repo {
            name: String,
        }

        let url = format!("{}/users/{}/repos", self.api_url, username);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(MatcherError::GitHub(format!(
                "Failed to list repositories for '{}': HTTP {}",
                username,
                response.status()
            )));
        }

        let repos: Vec<Repo> = response.json().await?;
        Ok(repos.into_iter().map(|r| r.name).collect())
    }

    /// Language byte counts for a single repository.
    async fn repo_languages(&self, username: &str, repo: &str) -> Result<HashMap<String, u64>> {
        let url = format!("{}/repos/{}/{}/languages", self.api_url, username, repo);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(MatcherError::GitHub(format!(
                "Failed to fetch languages for '{}/{}': HTTP {}",
                username,
                repo,
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    /// Aggregate language usage percentages across all of a user's
    /// repositories, sorted descending. Repositories whose language fetch
    /// fails are skipped rather than failing the whole scan.
    pub async fn language_stats(&self, username: &str) -> Result<Vec<LanguageShare>> {
        let repos = self.list_repos(username).await?;
        if repos.is_empty() {
            return Ok(Vec::new());
        }

        info!("Scanning {} repositories for {}", repos.len(), username);
        let progress = ProgressBar::new(repos.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{prefix} [{bar:30}] {pos}/{len}")
                .expect("Invalid progress template"),
        );
        progress.set_prefix("Scanning");

        let mut totals: HashMap<String, u64> = HashMap::new();
        for repo in &repos {
            match self.repo_languages(username, repo).await {
                Ok(languages) => {
                    for (language, bytes) in languages {
                        *totals.entry(language).or_insert(0) += bytes;
                    }
                }
                Err(e) => warn!("Skipping '{}': {}", repo, e),
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        Ok(shares_from_totals(&totals))
    }
}

/// Convert raw byte totals into percentage shares, sorted descending.
fn shares_from_totals(totals: &HashMap<String, u64>) -> Vec<LanguageShare> {
    let total_bytes: u64 = totals.values().sum();
    if total_bytes == 0 {
        return Vec::new();
    }

    let mut shares: Vec<LanguageShare> = totals
        .iter()
        .map(|(language, &bytes)| LanguageShare {
            language: language.clone(),
            percent: ((bytes as f64 / total_bytes as f64) * 10_000.0).round() as f32 / 100.0,
        })
        .collect();

    // Descending by share; name ascending keeps ties deterministic.
    shares.sort_by(|a, b| {
        b.percent
            .partial_cmp(&a.percent)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.language.cmp(&b.language))
    });

    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares_sum_and_order() {
        let totals = HashMap::from([
            ("Rust".to_string(), 600u64),
            ("Python".to_string(), 300u64),
            ("Shell".to_string(), 100u64),
        ]);

        let shares = shares_from_totals(&totals);

        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].language, "Rust");
        assert_eq!(shares[0].percent, 60.0);
        assert_eq!(shares[1].language, "Python");
        assert_eq!(shares[1].percent, 30.0);
        assert_eq!(shares[2].language, "Shell");
        assert_eq!(shares[2].percent, 10.0);
    }

    #[test]
    fn test_shares_rounded_to_two_decimals() {
        let totals = HashMap::from([
            ("Rust".to_string(), 1u64),
            ("Python".to_string(), 2u64),
        ]);

        let shares = shares_from_totals(&totals);

        assert_eq!(shares[0].percent, 66.67);
        assert_eq!(shares[1].percent, 33.33);
    }

    #[test]
    fn test_shares_empty_totals() {
        assert!(shares_from_totals(&HashMap::new()).is_empty());
    }

    #[test]
    fn test_shares_tie_breaks_by_name() {
        let totals = HashMap::from([
            ("Go".to_string(), 500u64),
            ("C".to_string(), 500u64),
        ]);

        let shares = shares_from_totals(&totals);

        assert_eq!(shares[0].language, "C");
        assert_eq!(shares[1].language, "Go");
    }
}
