//! Generator/Reviewer loop state.
//!
//! The loop is modelled as a value: each review consumes the current state and
//! yields either a state that needs a new draft or a finished draft. Nothing is
//! mutated in place.

use crate::workflow::models::InterviewQuestion;
use crate::workflow::reviewer::is_approved;

/// Maximum number of generation attempts, first draft included.
pub const MAX_ATTEMPTS: u32 = 3;

/// How the loop ended. Both verdicts yield a usable question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewVerdict {
    Approved,
    /// The ceiling was hit without approval; the last draft is used as-is.
    Exhausted,
}

impl ReviewVerdict {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewVerdict::Approved => "approved",
            ReviewVerdict::Exhausted => "exhausted",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RefinementState {
    attempt: u32,
    question: InterviewQuestion,
    feedback: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FinalDraft {
    pub question: InterviewQuestion,
    pub attempts: u32,
    pub verdict: ReviewVerdict,
    pub feedback: String,
}

#[derive(Debug, Clone)]
pub enum Transition {
    /// Not approved and attempts remain: regenerate using `feedback()`.
    Revise(RefinementState),
    Finished(FinalDraft),
}

impl RefinementState {
    /// State after the first draft (attempt 1, no feedback yet).
    pub fn new(first_draft: InterviewQuestion) -> Self {
        Self {
            attempt: 1,
            question: first_draft,
            feedback: None,
        }
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn question(&self) -> &InterviewQuestion {
        &self.question
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Applies the reviewer's feedback for the current draft.
    pub fn reviewed(self, feedback: String) -> Transition {
        if is_approved(&feedback) {
            return Transition::Finished(FinalDraft {
                question: self.question,
                attempts: self.attempt,
                verdict: ReviewVerdict::Approved,
                feedback,
            });
        }

        if self.attempt >= MAX_ATTEMPTS {
            return Transition::Finished(FinalDraft {
                question: self.question,
                attempts: self.attempt,
                verdict: ReviewVerdict::Exhausted,
                feedback,
            });
        }

        Transition::Revise(Self {
            feedback: Some(feedback),
            ..self
        })
    }

    /// Replaces the draft with the regenerated one and counts the attempt.
    pub fn revised(self, question: InterviewQuestion) -> Self {
        Self {
            attempt: self.attempt + 1,
            question,
            feedback: self.feedback,
        }
    }
}
