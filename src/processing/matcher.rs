//! JD/resume matching: similarity ranking and pipeline orchestration

use crate::config::MatchingConfig;
use crate::error::{MatcherError, Result};
use crate::processing::chunker::{Chunker, DEFAULT_FALLBACK_MIN_CHUNKS, DEFAULT_MIN_CHUNK_LENGTH};
use crate::processing::embeddings::{cosine_similarity, EmbeddingProvider};
use crate::processing::normalizer::TextNormalizer;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_TOP_K: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedChunk {
    pub chunk: String,
    /// Cosine similarity to the JD, as a percentage rounded to 2 decimals.
    pub similarity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Similarity between the JD and the filtered composite, as a
    /// percentage rounded to 2 decimals.
    pub final_match_score: f32,
    /// Highest-scoring chunks first; ties keep original resume order.
    pub top_chunks: Vec<RankedChunk>,
    /// Top chunks joined by newline in ranked order.
    pub filtered_resume_text: String,
    /// Preprocessed JD text, kept for caller inspection.
    pub jd_clean_text: String,
}

#[derive(Debug, Clone)]
pub struct MatchOptions {
    pub top_k: usize,
    pub min_chunk_length: usize,
    pub fallback_min_chunks: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            min_chunk_length: DEFAULT_MIN_CHUNK_LENGTH,
            fallback_min_chunks: DEFAULT_FALLBACK_MIN_CHUNKS,
        }
    }
}

impl From<&MatchingConfig> for MatchOptions {
    fn from(config: &MatchingConfig) -> Self {
        Self {
            top_k: config.top_k,
            min_chunk_length: config.min_chunk_length,
            fallback_min_chunks: config.fallback_min_chunks,
        }
    }
}

/// Orchestrates preprocessing, chunking, embedding and ranking into a
/// single request -> response pipeline. Holds the embedding provider for
/// the life of the process; safe to share across concurrent requests.
pub struct Matcher {
    provider: Arc<dyn EmbeddingProvider>,
    normalizer: TextNormalizer,
    chunker: Chunker,
    top_k: usize,
}

impl Matcher {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, options: MatchOptions) -> Self {
        Self {
            provider,
            normalizer: TextNormalizer::new(),
            chunker: Chunker::new(options.min_chunk_length, options.fallback_min_chunks),
            top_k: options.top_k,
        }
    }

    /// Full pipeline: preprocess both texts, chunk the resume, rank the
    /// chunks against the JD. Degenerate inputs fail with validation
    /// errors instead of crashing.
    pub fn match_resume(&self, jd_text: &str, resume_text: &str) -> Result<MatchResult> {
        let jd_clean = self.normalizer.preprocess(jd_text);
        let resume_clean = self.normalizer.preprocess(resume_text);

        if jd_clean.is_empty() {
            return Err(MatcherError::EmptyInput(
                "Job description is empty after preprocessing".to_string(),
            ));
        }
        if resume_clean.is_empty() {
            return Err(MatcherError::EmptyInput(
                "Resume text is empty after preprocessing".to_string(),
            ));
        }

        let chunks = self.chunker.chunk(&resume_clean);
        debug!("Resume split into {} chunks", chunks.len());

        self.rank_and_score(&jd_clean, &chunks, self.top_k)
    }

    /// Rank `chunks` against `query_text` and score the filtered composite.
    ///
    /// The final score is deliberately computed in a second pass against
    /// the re-embedded composite of the top chunks, not as an average of
    /// the per-chunk scores: broad recall first, then a tighter re-score
    /// against just the relevant excerpt.
    pub fn rank_and_score(
        &self,
        query_text: &str,
        chunks: &[String],
        top_k: usize,
    ) -> Result<MatchResult> {
        if query_text.trim().is_empty() {
            return Err(MatcherError::EmptyInput(
                "Job description is empty after preprocessing".to_string(),
            ));
        }
        if chunks.is_empty() {
            return Err(MatcherError::Chunking(
                "Resume text is empty or could not be chunked properly".to_string(),
            ));
        }

        let query_embedding = self.provider.embed_single(query_text)?;
        let chunk_embeddings = self.provider.embed_batch(chunks)?;

        let mut scored: Vec<(usize, f32)> = chunk_embeddings
            .iter()
            .enumerate()
            .map(|(idx, embedding)| {
                cosine_similarity(&query_embedding, embedding).map(|score| (idx, score))
            })
            .collect::<Result<_>>()?;

        // Stable sort: ties keep ascending original chunk order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let effective_k = top_k.min(chunks.len());
        let top_chunks: Vec<RankedChunk> = scored[..effective_k]
            .iter()
            .map(|&(idx, score)| RankedChunk {
                chunk: chunks[idx].clone(),
                similarity: to_percentage(score),
            })
            .collect();

        let filtered_resume_text = top_chunks
            .iter()
            .map(|c| c.chunk.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let filtered_embedding = self.provider.embed_single(&filtered_resume_text)?;
        let final_score = cosine_similarity(&query_embedding, &filtered_embedding)?;

        Ok(MatchResult {
            final_match_score: to_percentage(final_score),
            top_chunks,
            filtered_resume_text,
            jd_clean_text: query_text.to_string(),
        })
    }
}

/// Scale a cosine similarity to a percentage rounded to 2 decimal places.
fn to_percentage(score: f32) -> f32 {
    (score * 10_000.0).round() / 100.0
}
