//! Prompt profile types.
//!
//! A [`PromptProfile`] is the validated output of the upstream semantic
//! classifier. The router never inspects raw prompt text; it only consumes
//! the profile.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Task category assigned by the upstream classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// The prompt needs live web results.
    WebSearch,
    /// The prompt asks for code to be written or modified.
    Coding,
    /// Open-ended text generation.
    TextGeneration,
    /// Condensing an existing document.
    Summarization,
    /// Pulling structured fields out of unstructured input.
    Extraction,
}

impl TaskType {
    /// Returns the string representation used in reasons and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebSearch => "web_search",
            Self::Coding => "coding",
            Self::TextGeneration => "text_generation",
            Self::Summarization => "summarization",
            Self::Extraction => "extraction",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Desired shape of the backend output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Free-form text.
    Text,
    /// Structured JSON that must parse.
    Json,
}

/// How quickly the caller needs an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Latency-sensitive request.
    Fast,
    /// No special latency requirement.
    Normal,
}

/// Validated semantic classification of a request.
///
/// Produced upstream by an external classification service; immutable once
/// created. The routing pipeline derives all hard constraints from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PromptProfile {
    /// Task category of the request.
    pub task_type: TaskType,

    /// Whether the request needs live web access.
    pub needs_web: bool,

    /// Whether the request needs a code-capable backend.
    pub needs_code: bool,

    /// Desired output shape.
    pub output_format: OutputFormat,

    /// Latency requirement hint.
    pub urgency: Urgency,

    /// Classifier confidence in this profile, in `[0, 1]`.
    #[validate(range(min = 0.0, max = 1.0))]
    pub confidence: f64,
}

impl PromptProfile {
    /// Creates a profile with the given task type and neutral defaults.
    #[must_use]
    pub fn new(task_type: TaskType) -> Self {
        Self {
            task_type,
            needs_web: false,
            needs_code: false,
            output_format: OutputFormat::Text,
            urgency: Urgency::Normal,
            confidence: 1.0,
        }
    }

    /// Marks the profile as requiring web access.
    #[must_use]
    pub fn with_web(mut self) -> Self {
        self.needs_web = true;
        self
    }

    /// Marks the profile as requiring a code-capable backend.
    #[must_use]
    pub fn with_code(mut self) -> Self {
        self.needs_code = true;
        self
    }

    /// Sets the desired output format.
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Sets the urgency hint.
    #[must_use]
    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// Sets the classifier confidence.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }
}
