//! Console and JSON rendering of match and quiz results

use crate::error::Result;
use crate::github::QuizBundle;
use crate::processing::matcher::MatchResult;
use colored::Colorize;
use serde::Serialize;

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn print_match_console(result: &MatchResult) {
    println!("\n================ MATCH RESULT ================");
    println!(
        "Final Match Score: {}",
        format_score(result.final_match_score)
    );

    println!("\nTop Relevant Resume Chunks:");
    for chunk in &result.top_chunks {
        println!("  {} | {}", format_score(chunk.similarity), chunk.chunk);
    }

    println!("\nFiltered Resume Text (Most Relevant):\n");
    println!("{}", result.filtered_resume_text);
}

pub fn print_quiz_console(bundle: &QuizBundle) {
    println!("\nVerified GitHub Usage:");
    for share in &bundle.stats {
        println!("  {:>6.2}% {}", share.percent, share.language);
    }

    println!("\n---------------- GENERATED QUIZ ----------------");
    for (i, question) in bundle.questions.iter().enumerate() {
        println!("\nQ{}: {}", i + 1, question.question.bold());
        for (option, label) in question.options.iter().zip(["A", "B", "C", "D"]) {
            println!("   {}) {}", label, option);
        }
        println!("   [Category: {}]", question.category.dimmed());
    }
}

fn format_score(score: f32) -> String {
    let text = format!("{:.2}%", score);
    if score >= 70.0 {
        text.green().bold().to_string()
    } else if score >= 40.0 {
        text.yellow().bold().to_string()
    } else {
        text.red().bold().to_string()
    }
}
