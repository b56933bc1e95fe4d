//! Error types for the Kioku domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Each bounded context owns
//! its error enum; configuration errors live in `kioku-config`.

use thiserror::Error;

use crate::memory::MemoryId;

/// Failures surfaced by the long-term memory engine and its collaborators.
///
/// The engines never wrap or retry these; whatever a store or embedding
/// function returns reaches the caller as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MemoryError {
    #[error("No embedding source: no embedding function configured and no query vector supplied")]
    NoEmbeddingSource,

    #[error("Embedding generation failed: {0}")]
    EmbeddingFailed(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Memory not found: {0}")]
    NotFound(MemoryId),
}
