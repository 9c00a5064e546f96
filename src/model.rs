use std::fmt;

use serde::Serialize;

/// Maximum length of a per-strategy error fragment kept for diagnostics.
pub const ERROR_SNIPPET_LEN: usize = 50;

/// A candidate recipe produced by one extraction attempt.
///
/// The draft is a plain value: created fresh per attempt, normalized once and
/// never mutated afterwards. Its fields map 1:1 onto the persisted recipe
/// record. An empty `title` marks the draft as unusable; all other fields may
/// legitimately be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeDraft {
    pub title: String,
    pub source_url: String,
    /// Newline-delimited, one ingredient per line with the amount first.
    pub ingredients: String,
    /// Newline-delimited, one step per line.
    pub instructions: String,
    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub servings: String,
    pub image_url: String,
}

impl RecipeDraft {
    /// An empty, unusable draft that still remembers where it came from.
    pub fn empty(source_url: &str) -> Self {
        RecipeDraft {
            source_url: source_url.to_string(),
            ..Default::default()
        }
    }

    /// A draft is usable iff it carries a title. This is the sole success
    /// signal the fallback chain looks at.
    pub fn is_usable(&self) -> bool {
        !self.title.is_empty()
    }
}

/// Which strategy ultimately produced the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportMethod {
    /// Structured markup on the page itself.
    Standard,
    /// A generative-text backend, tagged with the provider name.
    Llm(String),
    /// Every strategy was exhausted.
    Failed,
}

impl fmt::Display for ImportMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMethod::Standard => write!(f, "standard"),
            ImportMethod::Llm(provider) => write!(f, "llm:{provider}"),
            ImportMethod::Failed => write!(f, "failed"),
        }
    }
}

/// One strategy's failure, recorded as the cascade moves past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyFailure {
    pub strategy: String,
    /// Error text truncated to [`ERROR_SNIPPET_LEN`] characters.
    pub message: String,
}

impl StrategyFailure {
    pub fn new(strategy: &str, message: &str) -> Self {
        StrategyFailure {
            strategy: strategy.to_string(),
            message: message.chars().take(ERROR_SNIPPET_LEN).collect(),
        }
    }
}

/// Outcome of one import attempt: the draft plus how it was obtained.
///
/// Always produced, never an error. When `method` is [`ImportMethod::Failed`]
/// the draft has an empty title and `diagnostic()` explains what went wrong.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub draft: RecipeDraft,
    pub method: ImportMethod,
    /// Failures of the strategies tried before (or instead of) the winner.
    pub failures: Vec<StrategyFailure>,
}

impl ImportReport {
    pub fn succeeded(&self) -> bool {
        self.method != ImportMethod::Failed
    }

    /// Composite failure message, present only when every strategy failed.
    pub fn diagnostic(&self) -> Option<String> {
        if self.succeeded() {
            return None;
        }
        let parts: Vec<String> = self
            .failures
            .iter()
            .map(|failure| format!("{}: {}", failure.strategy, failure.message))
            .collect();
        Some(format!("All strategies failed. {}", parts.join("; ")))
    }

    /// One-line outcome description for callers that surface it verbatim.
    pub fn summary(&self) -> String {
        match &self.method {
            ImportMethod::Standard => "Recipe imported using the standard extractor.".to_string(),
            ImportMethod::Llm(provider) => format!(
                "Recipe imported using the {provider} model. \
                 (Standard extraction failed, used {provider} as fallback.)"
            ),
            ImportMethod::Failed => self
                .diagnostic()
                .unwrap_or_else(|| "All strategies failed.".to_string()),
        }
    }
}
