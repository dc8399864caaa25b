//! Text normalization and noise-line filtering
//!
//! Cleans resume/JD text of PII and junk symbols while keeping technical
//! tokens like `c++`, `node.js`, `ci/cd` and `scikit-learn` intact.

use regex::{Regex, RegexSet};

pub struct TextNormalizer {
    email_regex: Regex,
    phone_regex: Regex,
    url_regex: Regex,
    junk_regex: Regex,
    horizontal_ws_regex: Regex,
    blank_lines_regex: Regex,
    noise_patterns: RegexSet,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let email_regex =
            Regex::new(r"\b[\w.\-]+@[\w.\-]+\.\w+\b").expect("Invalid email regex");

        let phone_regex =
            Regex::new(r"\+?\d[\d\s().\-]{7,}\d").expect("Invalid phone regex");

        let url_regex =
            Regex::new(r"https?://\S+|www\.\S+").expect("Invalid URL regex");

        // Everything outside this set is dropped; + . / - stay so that
        // technical tokens survive normalization.
        let junk_regex =
            Regex::new(r"[^a-z0-9\s+./\-]").expect("Invalid junk regex");

        let horizontal_ws_regex = Regex::new(r"[ \t]+").expect("Invalid whitespace regex");
        let blank_lines_regex = Regex::new(r"\n{2,}").expect("Invalid blank-line regex");

        let noise_patterns = RegexSet::new([
            r"(?i)\bdate of birth\b",
            r"(?i)\bdob\b",
            r"(?i)\bgender\b",
            r"(?i)\bnationality\b",
            r"(?i)\bmarital status\b",
            r"(?i)\baddress\b",
            r"(?i)\bhobbies\b",
            r"(?i)\binterests\b",
            r"(?i)\bdeclaration\b",
            r"(?i)\bi hereby declare\b",
            r"(?i)\breferences?\b",
        ])
        .expect("Invalid noise patterns");

        Self {
            email_regex,
            phone_regex,
            url_regex,
            junk_regex,
            horizontal_ws_regex,
            blank_lines_regex,
            noise_patterns,
        }
    }

    /// Lowercase and strip emails, phone numbers, URLs and non-technical
    /// punctuation, then collapse whitespace. Empty input yields empty
    /// output. Pure and deterministic.
    pub fn normalize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let mut cleaned = text.to_lowercase();

        cleaned = self.email_regex.replace_all(&cleaned, " ").into_owned();
        cleaned = self.phone_regex.replace_all(&cleaned, " ").into_owned();
        cleaned = self.url_regex.replace_all(&cleaned, " ").into_owned();
        cleaned = self.junk_regex.replace_all(&cleaned, " ").into_owned();

        cleaned = self.horizontal_ws_regex.replace_all(&cleaned, " ").into_owned();
        cleaned = self.blank_lines_regex.replace_all(&cleaned, "\n").into_owned();

        cleaned.trim().to_string()
    }

    /// Drop lines carrying personal boilerplate (date of birth, address,
    /// declaration, ...). Blank lines are dropped unconditionally;
    /// surviving lines keep their original order.
    pub fn filter_noise(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !self.noise_patterns.is_match(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Full preprocessing pipeline, applied identically to JD and resume
    /// text before any divergence in handling.
    pub fn preprocess(&self, text: &str) -> String {
        self.filter_noise(&self.normalize(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_pii() {
        let normalizer = TextNormalizer::new();
        let text = "Contact John Doe at john.doe@example.com or +91 98765-43210.\n\
                    Portfolio: https://johndoe.dev and www.johndoe.dev";

        let cleaned = normalizer.normalize(text);

        assert!(!cleaned.contains("john.doe@example.com"));
        assert!(!cleaned.contains("98765"));
        assert!(!cleaned.contains("https"));
        assert!(!cleaned.contains("www.johndoe.dev"));
    }

    #[test]
    fn test_normalize_preserves_technical_tokens() {
        let normalizer = TextNormalizer::new();
        let text = "Expert in C++, Node.js, CI/CD pipelines and scikit-learn!";

        let cleaned = normalizer.normalize(text);

        assert!(cleaned.contains("c++"));
        assert!(cleaned.contains("node.js"));
        assert!(cleaned.contains("ci/cd"));
        assert!(cleaned.contains("scikit-learn"));
        // Non-technical punctuation goes away
        assert!(!cleaned.contains(','));
        assert!(!cleaned.contains('!'));
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        let normalizer = TextNormalizer::new();
        let text = "java \t  spring\n\n\n\nkafka";

        assert_eq!(normalizer.normalize(text), "java spring\nkafka");
    }

    #[test]
    fn test_normalize_empty_input() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("   \n  "), "");
    }

    #[test]
    fn test_filter_noise_drops_boilerplate_lines() {
        let normalizer = TextNormalizer::new();
        let text = "built rest apis in go\n\
                    date of birth 12/08/1996\n\
                    hobbies chess and hiking\n\
                    maintained postgres clusters\n\
                    references available on request";

        let filtered = normalizer.filter_noise(text);

        assert_eq!(
            filtered,
            "built rest apis in go\nmaintained postgres clusters"
        );
    }

    #[test]
    fn test_filter_noise_preserves_order() {
        let normalizer = TextNormalizer::new();
        let text = "alpha line one\n\ngamma line two\n\nbeta line three";

        let filtered = normalizer.filter_noise(text);

        assert_eq!(filtered, "alpha line one\ngamma line two\nbeta line three");
    }

    #[test]
    fn test_preprocess_is_idempotent() {
        let normalizer = TextNormalizer::new();
        let resume = "JOHN DOE\n\
                      Email: john.doe@example.com\n\
                      Experienced C++ and Node.js developer\n\
                      Hobbies: chess and hiking\n\
                      Maintained CI/CD pipelines using Docker and Jenkins";

        let once = normalizer.preprocess(resume);
        let twice = normalizer.preprocess(&once);

        assert_eq!(once, twice);
        assert!(!once.contains("hobbies"));
    }
}
