//! Embedding provider boundary and the Model2Vec-backed implementation

use crate::error::{MatcherError, Result};
use log::info;
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::time::Instant;

/// Maps text to fixed-dimension, L2-normalized vectors.
///
/// Implementations are loaded once at startup and shared read-only across
/// requests; tests substitute a deterministic fake.
pub trait EmbeddingProvider: Send + Sync {
    /// Encode a batch of texts into one vector per input, in input order.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Encode a single text.
    fn embed_single(&self, text: &str) -> Result<Vec<f32>> {
        let owned = [text.to_string()];
        let mut vectors = self.embed_batch(&owned)?;
        vectors
            .pop()
            .ok_or_else(|| MatcherError::Embedding("provider returned no vector".to_string()))
    }
}

/// Production provider wrapping a Model2Vec static embedding model.
pub struct Model2VecProvider {
    model: StaticModel,
    model_name: String,
}

impl Model2VecProvider {
    /// Load a model from `models_dir` when a local copy exists, otherwise
    /// treat `repo_or_path` as a HuggingFace repo id.
    pub fn load(repo_or_path: &str, models_dir: &Path) -> Result<Self> {
        let local_path = models_dir.join(repo_or_path);
        let source = if local_path.exists() {
            local_path.to_string_lossy().into_owned()
        } else {
            repo_or_path.to_string()
        };

        let start = Instant::now();
        info!("Loading embedding model from: {}", source);

        let model = StaticModel::from_pretrained(
            &source,
            None,       // token
            Some(true), // normalize
            None,       // subfolder
        )
        .map_err(|e| {
            MatcherError::ModelLoading(format!(
                "Failed to load embedding model '{}': {}",
                repo_or_path, e
            ))
        })?;

        info!("Embedding model loaded in {:.2?}", start.elapsed());

        Ok(Self {
            model,
            model_name: repo_or_path.to_string(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl EmbeddingProvider for Model2VecProvider {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(self.model.encode(texts))
    }

    fn embed_single(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.model.encode_single(text))
    }
}

/// Cosine similarity between two embeddings.
///
/// Provider vectors are already normalized, but the norms are recomputed
/// here in case that guarantee does not hold.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(MatcherError::Embedding(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    if a.is_empty() {
        return Ok(0.0);
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}
