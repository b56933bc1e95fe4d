//! Long-term memory — vector recall with contextual re-ranking.
//!
//! Every search scores the subject's whole store snapshot:
//!
//! ```text
//! score = cosine(query, memory)
//!       + memory.boost                                 (accumulated feedback)
//!       + emotional_boost × memory.emotional_intensity
//!       + thread_boost                                 (same thread only)
//!       ± date_boost / date_penalty                    (when both carry a date)
//! ```
//!
//! Memories scoring below the threshold are dropped. While the user is
//! emotionally aroused the threshold is lowered ("emotional priming"), so
//! recall widens.

use std::sync::Arc;

use kioku_core::error::MemoryError;
use kioku_core::memory::{
    DateFilter, EmbeddingFunction, LongTermConfig, Memory, MemoryId, MemoryStore, SearchQuery,
    SearchResult,
};
use tracing::{debug, warn};

use crate::vector::cosine_similarity;

/// Long-term memory search and feedback over a pluggable store.
pub struct LongTermMemory {
    config: LongTermConfig,
    store: Arc<dyn MemoryStore>,
    embedder: Option<Arc<dyn EmbeddingFunction>>,
}

impl LongTermMemory {
    /// Create an engine. Without an embedder, every query must carry a vector.
    pub fn new(
        store: Arc<dyn MemoryStore>,
        embedder: Option<Arc<dyn EmbeddingFunction>>,
        config: LongTermConfig,
    ) -> Self {
        Self {
            config,
            store,
            embedder,
        }
    }

    pub fn config(&self) -> &LongTermConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn MemoryStore> {
        &self.store
    }

    /// Find the memories most relevant to `query`, best first.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, MemoryError> {
        let query_vector = self.resolve_vector(query).await?;
        let memories = self.store.fetch_all(&query.subject).await?;
        let threshold = self.effective_threshold(query.emotional_intensity);

        let scanned = memories.len();
        let mut results: Vec<SearchResult> = memories
            .into_iter()
            .filter(|memory| memory.has_embedding())
            .filter_map(|memory| {
                let score = self.score(&query_vector, &memory, query);
                (score >= threshold).then_some(SearchResult { memory, score })
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(self.config.top_k);

        debug!(
            subject = %query.subject,
            scanned,
            returned = results.len(),
            threshold,
            "Long-term memory search"
        );
        Ok(results)
    }

    /// Add `delta` to the boost of each memory, in order.
    ///
    /// Stops at the first store error; earlier adjustments stay applied.
    pub async fn apply_feedback(&self, ids: &[MemoryId], delta: f64) -> Result<(), MemoryError> {
        for id in ids {
            self.store.adjust_boost(id, delta).await?;
        }
        if !ids.is_empty() {
            debug!(count = ids.len(), delta, "Applied recall feedback");
        }
        Ok(())
    }

    /// Persist a memory, embedding its content first when it has no vector.
    pub async fn remember(&self, mut memory: Memory) -> Result<MemoryId, MemoryError> {
        if !memory.has_embedding() {
            match &self.embedder {
                Some(embedder) => memory.embedding = embedder.embed(&memory.content).await?,
                None => warn!(
                    subject = %memory.subject,
                    "Saving memory without an embedding; it cannot be recalled by search"
                ),
            }
        }
        self.store.save(memory).await
    }

    /// Delete a memory from the store.
    pub async fn forget(&self, id: &str) -> Result<(), MemoryError> {
        self.store.delete(id).await
    }

    async fn resolve_vector(&self, query: &SearchQuery) -> Result<Vec<f32>, MemoryError> {
        if let Some(vector) = query.embedding.as_ref().filter(|v| !v.is_empty()) {
            return Ok(vector.clone());
        }
        let embedder = self.embedder.as_ref().ok_or(MemoryError::NoEmbeddingSource)?;
        embedder.embed(&query.text).await
    }

    /// Base threshold, lowered while the user is emotional. Not re-clamped:
    /// a slightly negative threshold is allowed.
    fn effective_threshold(&self, emotional_intensity: f64) -> f64 {
        if emotional_intensity > self.config.emotional_priming_threshold {
            self.config.similarity_threshold - self.config.emotional_prime_delta
        } else {
            self.config.similarity_threshold
        }
    }

    fn score(&self, query_vector: &[f32], memory: &Memory, query: &SearchQuery) -> f64 {
        let mut score = cosine_similarity(query_vector, &memory.embedding);
        score += memory.boost;
        score += self.config.emotional_boost * memory.emotional_intensity;

        if let (Some(wanted), Some(actual)) = (non_empty(&query.thread_key), non_empty(&memory.thread_key)) {
            if wanted == actual {
                score += self.config.thread_boost;
            }
        }

        if let (Some(filter), Some(event_date)) = (&query.date, non_empty(&memory.event_date)) {
            if !filter.date.is_empty() {
                score += self.date_adjustment(filter, event_date);
            }
        }

        score
    }

    /// Boost when the filter is satisfied, penalty when it is violated.
    /// A negated filter is satisfied by memories on any other date.
    fn date_adjustment(&self, filter: &DateFilter, event_date: &str) -> f64 {
        let matched = dates_match(&filter.date, event_date, filter.month_only);
        if matched != filter.negated {
            self.config.date_boost
        } else {
            self.config.date_penalty
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Compare two ISO dates by day, or by month when `month_only` is set.
///
/// Month comparison needs `YYYY-MM` on both sides. Day comparison uses the
/// `YYYY-MM-DD` prefix when both are long enough, otherwise exact equality.
/// Prefixes are taken in bytes, so they never split on a char boundary.
fn dates_match(query_date: &str, memory_date: &str, month_only: bool) -> bool {
    let width = if month_only { 7 } else { 10 };
    match (query_date.as_bytes().get(..width), memory_date.as_bytes().get(..width)) {
        (Some(a), Some(b)) => a == b,
        _ if month_only => false,
        _ => query_date == memory_date,
    }
}

/// Render results as one `- content` line each, preserving order.
pub fn format_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| format!("- {}", r.memory.content))
        .collect::<Vec<_>>()
        .join("\n")
}
