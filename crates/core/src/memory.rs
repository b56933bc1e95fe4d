//! Long-term memory types and the collaborator traits behind them.
//!
//! A [`MemoryStore`] owns the records; an [`EmbeddingFunction`] turns query
//! text into vectors. The long-term engine reads a full snapshot per search,
//! scores it, and only ever writes back boost deltas.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MemoryError;

/// Store-assigned, opaque memory identifier.
pub type MemoryId = String;

/// A single long-term memory record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    /// Unique ID for this memory (assigned by the store when empty)
    #[serde(default)]
    pub id: MemoryId,

    /// Who this memory belongs to
    #[serde(default)]
    pub subject: String,

    /// The content of the memory
    pub content: String,

    /// Embedding vector; empty until computed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedding: Vec<f32>,

    /// Conversation or group this memory came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_key: Option<String>,

    /// ISO date (`YYYY-MM-DD`) of the event the memory describes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,

    /// Feedback-accumulated relevance adjustment
    #[serde(default)]
    pub boost: f64,

    /// Emotional intensity at ingestion time, 0.0 - 1.0
    #[serde(default)]
    pub emotional_intensity: f64,

    /// When this memory was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Memory {
    /// Create an unsaved memory for a subject.
    pub fn new(subject: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: MemoryId::new(),
            subject: subject.into(),
            content: content.into(),
            embedding: Vec::new(),
            thread_key: None,
            event_date: None,
            boost: 0.0,
            emotional_intensity: 0.0,
            created_at: Utc::now(),
        }
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = embedding;
        self
    }

    pub fn with_thread(mut self, thread_key: impl Into<String>) -> Self {
        self.thread_key = Some(thread_key.into());
        self
    }

    pub fn with_event_date(mut self, date: impl Into<String>) -> Self {
        self.event_date = Some(date.into());
        self
    }

    pub fn with_emotional_intensity(mut self, intensity: f64) -> Self {
        self.emotional_intensity = intensity.clamp(0.0, 1.0);
        self
    }

    /// Whether this memory can take part in vector search.
    pub fn has_embedding(&self) -> bool {
        !self.embedding.is_empty()
    }
}

/// Date constraint attached to a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFilter {
    /// ISO date to compare against memory event dates
    pub date: String,

    /// Prefer memories NOT on this date
    #[serde(default)]
    pub negated: bool,

    /// Compare year-month only
    #[serde(default)]
    pub month_only: bool,
}

/// A long-term memory search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Whose memories to search
    pub subject: String,

    /// Query text (embedded on demand when no vector is supplied)
    #[serde(default)]
    pub text: String,

    /// Precomputed query vector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,

    /// Current conversation thread
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_key: Option<String>,

    /// Optional date constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateFilter>,

    /// Emotional intensity of the current turn (drives priming)
    #[serde(default)]
    pub emotional_intensity: f64,
}

impl SearchQuery {
    /// A query whose vector is computed from `text`.
    pub fn text(subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// A query with a precomputed vector.
    pub fn vector(subject: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            subject: subject.into(),
            embedding: Some(embedding),
            ..Self::default()
        }
    }

    pub fn with_thread(mut self, thread_key: impl Into<String>) -> Self {
        self.thread_key = Some(thread_key.into());
        self
    }

    /// Prefer memories on `date`.
    pub fn on_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(DateFilter {
            date: date.into(),
            negated: false,
            month_only: false,
        });
        self
    }

    /// Prefer memories NOT on `date`.
    pub fn not_on_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(DateFilter {
            date: date.into(),
            negated: true,
            month_only: false,
        });
        self
    }

    /// Compare the date filter by year-month only.
    pub fn month_only(mut self) -> Self {
        if let Some(filter) = &mut self.date {
            filter.month_only = true;
        }
        self
    }

    pub fn with_emotional_intensity(mut self, intensity: f64) -> Self {
        self.emotional_intensity = intensity;
        self
    }
}

/// A memory paired with its computed relevance score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub memory: Memory,
    pub score: f64,
}

/// Tuning for long-term memory search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTermConfig {
    /// Minimum score to include a memory
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Maximum results returned
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Added when the memory shares the query's thread
    #[serde(default = "default_thread_boost")]
    pub thread_boost: f64,

    /// Added when the date filter is satisfied
    #[serde(default = "default_date_boost")]
    pub date_boost: f64,

    /// Added (negative) when the date filter is violated
    #[serde(default = "default_date_penalty")]
    pub date_penalty: f64,

    /// Multiplier on a memory's stored emotional intensity
    #[serde(default = "default_emotional_boost")]
    pub emotional_boost: f64,

    /// Threshold reduction while the user is emotional
    #[serde(default = "default_emotional_prime_delta")]
    pub emotional_prime_delta: f64,

    /// Query intensity that must be exceeded to prime recall
    #[serde(default = "default_emotional_priming_threshold")]
    pub emotional_priming_threshold: f64,
}

fn default_similarity_threshold() -> f64 {
    0.3
}
fn default_top_k() -> usize {
    10
}
fn default_thread_boost() -> f64 {
    0.1
}
fn default_date_boost() -> f64 {
    0.15
}
fn default_date_penalty() -> f64 {
    -0.2
}
fn default_emotional_boost() -> f64 {
    0.12
}
fn default_emotional_prime_delta() -> f64 {
    0.05
}
fn default_emotional_priming_threshold() -> f64 {
    0.5
}

impl Default for LongTermConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            top_k: default_top_k(),
            thread_boost: default_thread_boost(),
            date_boost: default_date_boost(),
            date_penalty: default_date_penalty(),
            emotional_boost: default_emotional_boost(),
            emotional_prime_delta: default_emotional_prime_delta(),
            emotional_priming_threshold: default_emotional_priming_threshold(),
        }
    }
}

/// The persistence collaborator.
///
/// Implementations: anything the host provides; `kioku-memory` ships an
/// in-memory store for tests and ephemeral sessions.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// The store name (e.g., "in_memory").
    fn name(&self) -> &str;

    /// All memories belonging to `subject`.
    async fn fetch_all(&self, subject: &str) -> Result<Vec<Memory>, MemoryError>;

    /// Persist a memory, returning its (possibly newly assigned) ID.
    async fn save(&self, memory: Memory) -> Result<MemoryId, MemoryError>;

    /// Remove a memory by ID.
    async fn delete(&self, id: &str) -> Result<(), MemoryError>;

    /// Add `delta` to a memory's feedback boost.
    async fn adjust_boost(&self, id: &str, delta: f64) -> Result<(), MemoryError>;
}

/// Maps text to an embedding vector.
#[async_trait]
pub trait EmbeddingFunction: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, MemoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_term_config_defaults() {
        let config = LongTermConfig::default();
        assert_eq!(config.similarity_threshold, 0.3);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.date_penalty, -0.2);
        assert_eq!(config.emotional_prime_delta, 0.05);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: LongTermConfig = serde_json::from_str(r#"{"top_k": 3}"#).unwrap();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.thread_boost, 0.1);
    }

    #[test]
    fn query_builders_compose() {
        let query = SearchQuery::text("u1", "hot springs trip")
            .with_thread("travel")
            .not_on_date("2024-05-03")
            .month_only()
            .with_emotional_intensity(0.6);

        assert_eq!(query.subject, "u1");
        assert!(query.embedding.is_none());
        assert_eq!(query.thread_key.as_deref(), Some("travel"));
        let filter = query.date.unwrap();
        assert!(filter.negated);
        assert!(filter.month_only);
    }

    #[test]
    fn month_only_without_date_is_noop() {
        let query = SearchQuery::vector("u1", vec![1.0]).month_only();
        assert!(query.date.is_none());
    }

    #[test]
    fn memory_deserializes_with_minimal_fields() {
        let memory: Memory = serde_json::from_str(r#"{"content": "likes green tea"}"#).unwrap();
        assert!(memory.id.is_empty());
        assert!(!memory.has_embedding());
        assert_eq!(memory.boost, 0.0);
    }

    #[test]
    fn emotional_intensity_is_clamped() {
        let memory = Memory::new("u1", "x").with_emotional_intensity(1.7);
        assert_eq!(memory.emotional_intensity, 1.0);
    }
}
