//! In-memory store — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use kioku_core::error::MemoryError;
use kioku_core::memory::{Memory, MemoryId, MemoryStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A store that keeps memories in a Vec.
/// Nothing is persisted; dropping the store drops the memories.
pub struct InMemoryStore {
    entries: Arc<RwLock<Vec<Memory>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_memories(Vec::new())
    }

    /// Preload a store, assigning IDs to memories that have none.
    pub fn with_memories(memories: Vec<Memory>) -> Self {
        let memories = memories.into_iter().map(with_id).collect();
        Self {
            entries: Arc::new(RwLock::new(memories)),
        }
    }

    /// Preload a store from a JSON array of memories.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let memories: Vec<Memory> = serde_json::from_str(json)?;
        Ok(Self::with_memories(memories))
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn with_id(mut memory: Memory) -> Memory {
    if memory.id.is_empty() {
        memory.id = Uuid::new_v4().to_string();
    }
    memory
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn fetch_all(&self, subject: &str) -> Result<Vec<Memory>, MemoryError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().filter(|m| m.subject == subject).cloned().collect())
    }

    async fn save(&self, memory: Memory) -> Result<MemoryId, MemoryError> {
        let memory = with_id(memory);
        let id = memory.id.clone();
        let mut entries = self.entries.write().await;
        match entries.iter_mut().find(|m| m.id == id) {
            Some(existing) => *existing = memory,
            None => entries.push(memory),
        }
        Ok(id)
    }

    async fn delete(&self, id: &str) -> Result<(), MemoryError> {
        let mut entries = self.entries.write().await;
        let len_before = entries.len();
        entries.retain(|m| m.id != id);
        if entries.len() == len_before {
            return Err(MemoryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn adjust_boost(&self, id: &str, delta: f64) -> Result<(), MemoryError> {
        let mut entries = self.entries.write().await;
        let memory = entries
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| MemoryError::NotFound(id.to_string()))?;
        memory.boost += delta;
        Ok(())
    }
}
