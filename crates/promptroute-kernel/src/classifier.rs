//! Keyword-based task classifier.
//!
//! The classifier lower-cases the prompt once and walks an ordered table of
//! `(category, keywords)` rules.  The first rule with any keyword contained
//! in the prompt wins.  Matching is plain substring containment, so
//! `"programmer"` matches `"program"` and `"time"` matches `"m"`.
//!
//! Classification is total: a prompt that matches no rule is
//! [`TaskCategory::Conversational`].

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The task category assigned to a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    /// Code generation, debugging, language questions.
    Coding,
    /// Casual chat and emotional support.
    Conversational,
    /// Image creation requests.
    ImageGeneration,
    /// Quantitative and logic puzzles.
    LogicalReasoning,
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coding => write!(f, "coding"),
            Self::Conversational => write!(f, "conversational"),
            Self::ImageGeneration => write!(f, "image_generation"),
            Self::LogicalReasoning => write!(f, "logical_reasoning"),
        }
    }
}

impl TaskCategory {
    /// All categories in classification priority order.
    pub const ALL: [TaskCategory; 4] = [
        Self::Coding,
        Self::Conversational,
        Self::ImageGeneration,
        Self::LogicalReasoning,
    ];

    /// Parse the snake_case name produced by `Display`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.to_string() == name)
    }
}

/// One row of the classification table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    /// Category assigned when any keyword matches.
    pub category: TaskCategory,
    /// Lower-case keywords tested with substring containment.
    pub keywords: Vec<String>,
}

impl KeywordRule {
    /// Build a rule, lower-casing every keyword.
    pub fn new<I, S>(category: TaskCategory, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            category,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Return the first keyword contained in `lowered`, if any.
    fn first_match(&self, lowered: &str) -> Option<&str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .find(|kw| lowered.contains(kw))
    }
}

// ---------------------------------------------------------------------------
// Built-in table
// ---------------------------------------------------------------------------

/// Coding keywords.  Highest priority.
pub const CODING_KEYWORDS: &[&str] = &[
    "code", "snippet", "script", "function", "class", "method", "example", "sample", "program",
    "algorithm", "solve", "loop", "recursion", "html", "css", "javascript", "python", "java",
    "run",
];

/// Affect / emotion keywords.
pub const CONVERSATIONAL_KEYWORDS: &[&str] = &["feeling", "sad", "mad"];

/// Image keywords.
pub const IMAGE_KEYWORDS: &[&str] = &["image", "generate"];

/// Quantitative / logic keywords.  Lowest priority.
pub const REASONING_KEYWORDS: &[&str] = &["m", "km", "crosses"];

/// The built-in rules in priority order.
pub fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(TaskCategory::Coding, CODING_KEYWORDS),
        KeywordRule::new(TaskCategory::Conversational, CONVERSATIONAL_KEYWORDS),
        KeywordRule::new(TaskCategory::ImageGeneration, IMAGE_KEYWORDS),
        KeywordRule::new(TaskCategory::LogicalReasoning, REASONING_KEYWORDS),
    ]
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Ordered keyword-table classifier.
#[derive(Debug, Clone)]
pub struct TaskClassifier {
    rules: Vec<KeywordRule>,
    fallback: TaskCategory,
}

impl TaskClassifier {
    /// Create a classifier from an ordered rule list.
    pub fn with_rules(rules: Vec<KeywordRule>) -> Self {
        Self {
            rules,
            fallback: TaskCategory::Conversational,
        }
    }

    /// The rule table in evaluation order.
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Classify a prompt.  Never fails.
    pub fn classify(&self, prompt: &str) -> TaskCategory {
        let lowered = prompt.to_lowercase();

        for rule in &self.rules {
            if let Some(keyword) = rule.first_match(&lowered) {
                tracing::debug!(category = %rule.category, keyword, "prompt classified");
                return rule.category;
            }
        }

        tracing::debug!(category = %self.fallback, "no keyword matched, using fallback");
        self.fallback
    }
}

impl Default for TaskClassifier {
    fn default() -> Self {
        Self::with_rules(default_rules())
    }
}

/// Classify a prompt with the built-in rule table.
pub fn classify(prompt: &str) -> TaskCategory {
    TaskClassifier::default().classify(prompt)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
