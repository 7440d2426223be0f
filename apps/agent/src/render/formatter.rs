//! Output Formatter: pure transforms from question records to render-ready
//! documents, previews and object keys. No I/O happens here.

use chrono::{DateTime, NaiveDate, Utc};

use crate::workflow::models::InterviewQuestion;

pub const DOCUMENT_TITLE: &str = "Daily GenAI Interview Questions";

/// Preview length in characters (before the ellipsis).
pub const PREVIEW_CHARS: usize = 100;

const MAX_TOPIC_SLUG_CHARS: usize = 50;

/// A document ready for the renderer: one title and one section per question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDocument {
    pub title: String,
    pub sections: Vec<QuestionSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSection {
    pub heading: String,
    pub blocks: Vec<TextBlock>,
    pub citation: String,
}

/// A labelled group of paragraphs.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub label: String,
    pub paragraphs: Vec<String>,
}

/// Lays out `questions` in order, numbering them from 1.
pub fn format_document(questions: &[InterviewQuestion]) -> QuestionDocument {
    let sections = questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let topic = if q.topic.trim().is_empty() {
                format!("Question {}", i + 1)
            } else {
                q.topic.trim().to_string()
            };
            QuestionSection {
                heading: format!("{}. {}", i + 1, topic),
                blocks: vec![
                    block("The Question", &q.question),
                    block("Common Wrong Answer", &q.wrong_answer),
                    block("How It Actually Works", &q.explanation),
                ],
                citation: format!("Key Paper: {}", strip_markdown(&q.citation)),
            }
        })
        .collect();

    QuestionDocument {
        title: DOCUMENT_TITLE.to_string(),
        sections,
    }
}

fn block(label: &str, body: &str) -> TextBlock {
    TextBlock {
        label: label.to_string(),
        paragraphs: body
            .lines()
            .map(strip_markdown)
            .filter(|p| !p.is_empty())
            .collect(),
    }
}

/// Removes the light markdown the model tends to emit (`**`, `__`, backticks, leading `#`).
pub fn strip_markdown(line: &str) -> String {
    line.trim()
        .trim_start_matches('#')
        .replace("**", "")
        .replace("__", "")
        .replace('`', "")
        .trim()
        .to_string()
}

/// First `PREVIEW_CHARS` characters of the question text, with `...` when truncated.
pub fn question_preview(question: &str) -> String {
    if question.chars().count() > PREVIEW_CHARS {
        let head: String = question.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        question.to_string()
    }
}

/// Filesystem/URL-safe form of a topic: word characters, `-` and spaces kept,
/// spaces turned into `_`, at most 50 characters.
pub fn topic_slug(topic: &str) -> String {
    topic
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect::<String>()
        .trim()
        .replace(' ', "_")
        .chars()
        .take(MAX_TOPIC_SLUG_CHARS)
        .collect()
}

/// Object key for a single-question PDF.
pub fn question_pdf_key(topic: &str, at: DateTime<Utc>) -> String {
    format!(
        "interview_{}_{}.pdf",
        topic_slug(topic),
        at.format("%Y%m%d_%H%M%S")
    )
}

/// Object key for the daily batch PDF.
pub fn batch_pdf_key(date: NaiveDate) -> String {
    format!("Daily_Interview_Questions_{}.pdf", date.format("%Y-%m-%d"))
}

/// Object key for a batch LinkedIn post.
pub fn linkedin_post_key(topic: &str) -> String {
    format!(
        "linkedin_post_{}.txt",
        topic.replace(' ', "_").replace('/', "-")
    )
}
