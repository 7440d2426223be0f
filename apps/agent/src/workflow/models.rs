use serde::Deserialize;

/// A search result that survived filtering and de-duplication.
#[derive(Debug, Clone, PartialEq)]
pub struct Paper {
    pub title: String,
    pub url: String,
    pub summary: String,
}

/// The paper the selector picked as the basis for the question.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectedPaper {
    pub title: String,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub summary: String,
    pub url: String,
    #[serde(default)]
    pub reason: String,
}

impl SelectedPaper {
    pub fn authors(&self) -> &str {
        self.authors
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or("Unknown")
    }

    /// Citation used when the model's own citation does not point at the paper.
    pub fn fallback_citation(&self) -> String {
        format!("{} - {} ({})", self.title, self.authors(), self.url)
    }
}

/// A generated interview question, ready for review or rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewQuestion {
    pub topic: String,
    pub question: String,
    pub wrong_answer: String,
    pub explanation: String,
    pub citation: String,
}

impl InterviewQuestion {
    /// The question/answer/explanation triple as shown to the reviewer and post writer.
    pub fn digest(&self) -> String {
        format!(
            "Question: {}\nWrong Answer: {}\nExplanation: {}",
            self.question, self.wrong_answer, self.explanation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_paper_missing_authors_defaults_to_unknown() {
        let json = r#"{"title": "Orca", "url": "https://example.org/orca", "summary": "Iteration-level scheduling"}"#;
        let paper: SelectedPaper = serde_json::from_str(json).unwrap();
        assert_eq!(paper.authors(), "Unknown");
        assert_eq!(
            paper.fallback_citation(),
            "Orca - Unknown (https://example.org/orca)"
        );
    }

    #[test]
    fn test_selected_paper_requires_url() {
        let json = r#"{"title": "Orca", "summary": "no url"}"#;
        assert!(serde_json::from_str::<SelectedPaper>(json).is_err());
    }

    #[test]
    fn test_blank_authors_fall_back_to_unknown() {
        let paper = SelectedPaper {
            title: "t".to_string(),
            authors: Some("  ".to_string()),
            summary: String::new(),
            url: "u".to_string(),
            reason: String::new(),
        };
        assert_eq!(paper.authors(), "Unknown");
    }
}
