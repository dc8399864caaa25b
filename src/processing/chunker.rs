//! Resume chunking
//!
//! Splits preprocessed resume text into independently scorable units.
//! Line splitting works best for resumes; when too few lines survive the
//! length filter the resume is likely one dense paragraph, so the chunker
//! re-splits on bullet markers and sentence boundaries instead.

use regex::Regex;

pub const DEFAULT_MIN_CHUNK_LENGTH: usize = 25;
pub const DEFAULT_FALLBACK_MIN_CHUNKS: usize = 3;

pub struct Chunker {
    min_length: usize,
    fallback_min_chunks: usize,
    sentence_split_regex: Regex,
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CHUNK_LENGTH, DEFAULT_FALLBACK_MIN_CHUNKS)
    }
}

impl Chunker {
    pub fn new(min_length: usize, fallback_min_chunks: usize) -> Self {
        let sentence_split_regex =
            Regex::new(r"[•\-]\s+|\.\s+").expect("Invalid sentence split regex");

        Self {
            min_length,
            fallback_min_chunks,
            sentence_split_regex,
        }
    }

    /// Split text into ordered chunks of at least `min_length` characters.
    /// Returns an empty list for empty input. No deduplication.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let chunks: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| line.chars().count() >= self.min_length)
            .map(str::to_string)
            .collect();

        // The fallback re-splits the whole text, not the surviving lines:
        // a two-line resume paragraph still gets sentence-level chunks.
        if chunks.len() < self.fallback_min_chunks {
            return self
                .sentence_split_regex
                .split(text)
                .map(str::trim)
                .filter(|part| part.chars().count() >= self.min_length)
                .map(str::to_string)
                .collect();
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_by_lines() {
        let chunker = Chunker::default();
        let text = "built react dashboards for internal tooling team\n\
                    maintained ci/cd pipelines using docker and jenkins\n\
                    led migration of billing services to kubernetes\n\
                    go";

        let chunks = chunker.chunk(text);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "built react dashboards for internal tooling team");
        // Short lines are dropped
        assert!(!chunks.iter().any(|c| c == "go"));
    }

    #[test]
    fn test_chunk_preserves_order() {
        let chunker = Chunker::default();
        let text = "zeta implemented payment reconciliation jobs\n\
                    alpha designed event driven order workflows\n\
                    mike automated infrastructure provisioning tasks";

        let chunks = chunker.chunk(text);

        assert_eq!(chunks.len(), 3);
        assert!(chunks[0].starts_with("zeta"));
        assert!(chunks[1].starts_with("alpha"));
        assert!(chunks[2].starts_with("mike"));
    }

    #[test]
    fn test_chunk_falls_back_to_sentence_splitting() {
        let chunker = Chunker::default();
        // One dense paragraph: line splitting yields a single chunk, so the
        // chunker re-splits on sentence boundaries.
        let text = "developed microservices handling millions of requests. \
                    optimized database queries reducing latency by half. \
                    mentored junior engineers across two product teams.";

        let chunks = chunker.chunk(text);

        assert_eq!(chunks.len(), 3);
        assert!(chunks[0].starts_with("developed microservices"));
        assert!(chunks[2].starts_with("mentored junior engineers"));
    }

    #[test]
    fn test_chunk_empty_input() {
        let chunker = Chunker::default();
        assert!(chunker.chunk("").is_empty());
    }

    #[test]
    fn test_chunk_respects_min_length() {
        let chunker = Chunker::new(10, 3);
        let text = "short\nthis line is long enough\nalso long enough here\nthird qualifying line";

        let chunks = chunker.chunk(text);

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() >= 10));
    }
}
