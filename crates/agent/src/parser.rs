//! Model-output parser — extracts a Thought/Action step from free text.
//!
//! Language models vary in how strictly they follow the requested
//! format across languages and case conventions, so the parser tries an
//! ordered list of label-pattern pairs and takes the first pair that
//! yields both spans. The list is open for extension: new label
//! conventions can be registered without touching the loop.
//!
//! Matching is case-insensitive and line-oriented — a span ends at its
//! line boundary and never bleeds into the next labeled field.

use regex::Regex;
use std::sync::LazyLock;

/// One parsed step of model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The model's reasoning span. Carried into the transcript for
    /// continuity, never interpreted.
    pub thought: String,
    /// The instruction span handed to the action dispatcher.
    pub action: String,
}

/// A thought-label / action-label regex pair.
#[derive(Debug, Clone)]
pub struct LabelPattern {
    thought: Regex,
    action: Regex,
}

impl LabelPattern {
    /// Compile a new pattern pair. Each regex must have exactly one
    /// capture group for the extracted span.
    pub fn new(thought: &str, action: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            thought: Regex::new(thought)?,
            action: Regex::new(action)?,
        })
    }

    /// Apply this pattern; returns trimmed (thought, action) spans when
    /// both labels match.
    fn apply(&self, raw: &str) -> Option<(String, String)> {
        let thought = self.thought.captures(raw)?.get(1)?.as_str().trim();
        let action = self.action.captures(raw)?.get(1)?.as_str().trim();
        Some((thought.to_string(), action.to_string()))
    }
}

/// The built-in label conventions, in priority order:
/// English, Chinese, all-caps English.
static DEFAULT_PATTERNS: LazyLock<Vec<LabelPattern>> = LazyLock::new(|| {
    [
        (r"(?i)thought:[ \t]*(.*)", r"(?i)action:[ \t]*(.*)"),
        (
            r"(?i)思考[:：][ \t]*(.*)",
            r"(?i)(?:行动|action)[:：][ \t]*(.*)",
        ),
        (r"(?i)THOUGHT:[ \t]*(.*)", r"(?i)ACTION:[ \t]*(.*)"),
    ]
    .iter()
    .map(|(t, a)| LabelPattern::new(t, a).expect("built-in pattern must compile"))
    .collect()
});

/// Ordered multi-pattern Thought/Action extractor.
pub struct OutputParser {
    patterns: Vec<LabelPattern>,
}

impl OutputParser {
    /// Create a parser with the built-in label conventions.
    pub fn new() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS.clone(),
        }
    }

    /// Append an additional label convention. Built-ins keep priority.
    pub fn with_pattern(mut self, pattern: LabelPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Extract a step from raw model output.
    ///
    /// The first pattern pair producing two non-empty spans wins.
    /// `None` means the output is unusable for this iteration; the
    /// caller must abort the run rather than retry the same response.
    pub fn parse(&self, raw: &str) -> Option<Step> {
        for pattern in &self.patterns {
            if let Some((thought, action)) = pattern.apply(raw)
                && !thought.is_empty()
                && !action.is_empty()
            {
                return Some(Step { thought, action });
            }
        }
        None
    }
}

impl Default for OutputParser {
    fn default() -> Self {
        Self::new()
    }
}
