//! # Kioku Core
//!
//! Domain types, collaborator traits, and error definitions for the Kioku
//! two-tier conversational memory. This crate has **no engine logic** — it
//! defines the model that the affect, memory and CLI crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (persistence, embeddings, emotion analysis,
//! feedback detection) is a trait here. Implementations live elsewhere:
//! - Hosts plug in their own store and embedding provider
//! - Tests use in-memory doubles
//! - All crates depend inward on core

pub mod error;
pub mod emotion;
pub mod memory;
pub mod working;

// Re-export key types at crate root for ergonomics
pub use error::MemoryError;
pub use emotion::{Emotion, EmotionAnalyzer, EmotionalState, FeedbackDetector, Language};
pub use memory::{
    DateFilter, EmbeddingFunction, LongTermConfig, Memory, MemoryId, MemoryStore, SearchQuery,
    SearchResult,
};
pub use working::{WorkingMemoryConfig, WorkingMemoryItem};
