//! GitHub skill validation and quiz generation

pub mod client;
pub mod quiz;

pub use client::{GithubClient, LanguageShare};
pub use quiz::{QuizBundle, QuizGenerator, QuizQuestion};
