//! Text extraction from the supported document formats

use crate::error::{MatcherError, Result};
use pulldown_cmark::{html, Parser};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(MatcherError::Io)?;

        // Pages come back concatenated with newlines. An image-only PDF
        // extracts to an empty string; callers treat that as bad input
        // rather than a crash.
        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            MatcherError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(text.trim().to_string())
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).await.map_err(MatcherError::Io)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path).await.map_err(MatcherError::Io)?;

        let parser = Parser::new(&markdown);
        let mut rendered = String::new();
        html::push_html(&mut rendered, parser);

        Ok(strip_html(&rendered))
    }
}

/// Render pulldown-cmark HTML output down to plain text lines.
fn strip_html(html: &str) -> String {
    let text = html
        .replace("<br>", "\n")
        .replace("</p>", "\n\n")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let tag_regex = regex::Regex::new(r"<[^>]*>").expect("Invalid tag regex");
    let clean = tag_regex.replace_all(&text, "");

    clean
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
