//! Core matching pipeline: normalization, chunking, embeddings, ranking

pub mod chunker;
pub mod embeddings;
pub mod matcher;
pub mod normalizer;
