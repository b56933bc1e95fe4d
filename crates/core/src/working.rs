//! Working-memory item and configuration types.

use serde::{Deserialize, Serialize};

/// An active short-term memory slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingMemoryItem {
    /// Short label for what this item is about
    pub topic: String,

    /// Free-form content
    #[serde(default)]
    pub content: String,

    /// Words that refresh this item when they appear in a message
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Decaying salience, 0.0 - 1.0
    pub activation: f64,

    /// Turn this item entered working memory
    #[serde(default)]
    pub turn_created: u64,

    /// Last turn decay was applied up to
    #[serde(default)]
    pub turn_accessed: u64,

    /// Set once an intense emotional turn touched this item; never cleared
    #[serde(default)]
    pub emotional: bool,
}

impl WorkingMemoryItem {
    /// A fully-active item entering working memory at `turn`.
    pub fn new(topic: impl Into<String>, turn: u64) -> Self {
        Self {
            topic: topic.into(),
            content: String::new(),
            keywords: Vec::new(),
            activation: 1.0,
            turn_created: turn,
            turn_accessed: turn,
            emotional: false,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_activation(mut self, activation: f64) -> Self {
        self.activation = activation.clamp(0.0, 1.0);
        self
    }

    /// Whether any keyword occurs in an already-lowercased message.
    ///
    /// An empty keyword occurs in every message, so such an item is refreshed
    /// each turn. An item with no keywords at all is never refreshed.
    pub fn matches(&self, lowered_message: &str) -> bool {
        self.keywords
            .iter()
            .any(|kw| lowered_message.contains(&kw.to_lowercase()))
    }
}

/// Tuning for the working-memory decay cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingMemoryConfig {
    /// Maximum number of items held at once
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Items below this activation are evicted
    #[serde(default = "default_activation_threshold")]
    pub activation_threshold: f64,

    /// Activation lost per elapsed turn
    #[serde(default = "default_normal_decay_rate")]
    pub normal_decay_rate: f64,

    /// Activation lost per elapsed turn by emotional items
    #[serde(default = "default_emotional_decay_rate")]
    pub emotional_decay_rate: f64,

    /// Activation gained on a keyword match
    #[serde(default = "default_refresh_boost")]
    pub refresh_boost: f64,

    /// Turn intensity that must be exceeded to mark items emotional
    #[serde(default = "default_emotional_marking_threshold")]
    pub emotional_marking_threshold: f64,
}

fn default_max_items() -> usize {
    7
}
fn default_activation_threshold() -> f64 {
    0.1
}
fn default_normal_decay_rate() -> f64 {
    0.15
}
fn default_emotional_decay_rate() -> f64 {
    0.07
}
fn default_refresh_boost() -> f64 {
    0.3
}
fn default_emotional_marking_threshold() -> f64 {
    0.3
}

impl Default for WorkingMemoryConfig {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
            activation_threshold: default_activation_threshold(),
            normal_decay_rate: default_normal_decay_rate(),
            emotional_decay_rate: default_emotional_decay_rate(),
            refresh_boost: default_refresh_boost(),
            emotional_marking_threshold: default_emotional_marking_threshold(),
        }
    }
}
