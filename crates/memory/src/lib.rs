//! Memory engines for Kioku.
//!
//! - [`WorkingMemory`]: capacity-bounded, decaying short-term memory
//! - [`LongTermMemory`]: vector search with multi-factor re-ranking and
//!   emotional priming over any [`MemoryStore`](kioku_core::MemoryStore)
//! - [`ConversationMemory`]: per-subject session wiring both engines to the
//!   emotion and feedback signals of each turn

pub mod vector;
pub mod working;
pub mod long_term;
pub mod in_memory;
pub mod session;

pub use vector::cosine_similarity;
pub use working::WorkingMemory;
pub use long_term::{LongTermMemory, format_results};
pub use in_memory::InMemoryStore;
pub use session::{ConversationMemory, TurnOutcome};
