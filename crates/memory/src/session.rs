//! Conversation session — one subject's memory, turn by turn.
//!
//! Wires the data flow between the engines: each observed message is
//! classified for emotion and feedback, feedback is credited to whatever was
//! recalled on the previous turn, the working memory runs its cycle, and the
//! long-term memory is searched with the turn's emotional intensity as the
//! priming signal.

use std::sync::Arc;

use kioku_core::emotion::{EmotionAnalyzer, EmotionalState, FeedbackDetector};
use kioku_core::error::MemoryError;
use kioku_core::memory::{Memory, MemoryId, SearchQuery, SearchResult};
use kioku_core::working::WorkingMemoryItem;
use serde::Serialize;
use tracing::debug;

use crate::long_term::{LongTermMemory, format_results};
use crate::working::WorkingMemory;

/// What one observed turn produced.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub turn: u64,
    pub emotion: EmotionalState,
    /// Boost delta credited to the previous turn's recalls (0.0 if none)
    pub feedback: f64,
    pub recalled: Vec<SearchResult>,
}

/// Per-subject memory session.
pub struct ConversationMemory {
    subject: String,
    turn: u64,
    working: WorkingMemory,
    long_term: LongTermMemory,
    analyzer: Arc<dyn EmotionAnalyzer>,
    feedback: Arc<dyn FeedbackDetector>,
    last_recalled: Vec<MemoryId>,
}

impl ConversationMemory {
    pub fn new(
        subject: impl Into<String>,
        working: WorkingMemory,
        long_term: LongTermMemory,
        analyzer: Arc<dyn EmotionAnalyzer>,
        feedback: Arc<dyn FeedbackDetector>,
    ) -> Self {
        Self {
            subject: subject.into(),
            turn: 0,
            working,
            long_term,
            analyzer,
            feedback,
            last_recalled: Vec::new(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The current turn number (0 before the first message).
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn working(&self) -> &WorkingMemory {
        &self.working
    }

    pub fn long_term(&self) -> &LongTermMemory {
        &self.long_term
    }

    /// IDs recalled on the most recent turn; the next turn's feedback lands here.
    pub fn last_recalled(&self) -> &[MemoryId] {
        &self.last_recalled
    }

    /// Process one incoming message.
    ///
    /// On error the turn counter has still advanced, but the previous recall
    /// set is kept so feedback on a retry is not lost.
    pub async fn observe(
        &mut self,
        message: &str,
        thread_key: Option<&str>,
    ) -> Result<TurnOutcome, MemoryError> {
        self.turn += 1;
        let emotion = self.analyzer.analyze(message);

        let feedback = self.feedback.detect(message);
        let credited = if feedback != 0.0 && !self.last_recalled.is_empty() {
            self.long_term.apply_feedback(&self.last_recalled, feedback).await?;
            feedback
        } else {
            0.0
        };

        self.working.update(self.turn, message, Some(&emotion));

        let mut query = SearchQuery::text(self.subject.clone(), message)
            .with_emotional_intensity(emotion.intensity);
        if let Some(thread) = thread_key {
            query = query.with_thread(thread);
        }
        let recalled = self.long_term.search(&query).await?;
        self.last_recalled = recalled.iter().map(|r| r.memory.id.clone()).collect();

        debug!(
            subject = %self.subject,
            turn = self.turn,
            emotion = %emotion.primary,
            feedback = credited,
            recalled = recalled.len(),
            working = self.working.len(),
            "Observed turn"
        );

        Ok(TurnOutcome {
            turn: self.turn,
            emotion,
            feedback: credited,
            recalled,
        })
    }

    /// Bring a topic into working memory, fully active as of the current turn.
    pub fn attend<I, S>(&mut self, topic: &str, content: &str, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let item = WorkingMemoryItem::new(topic, self.turn)
            .with_content(content)
            .with_keywords(keywords);
        self.working.add(item);
    }

    /// Store a long-term memory for this subject, tagged with the emotional
    /// intensity of its content.
    pub async fn memorize(
        &self,
        content: &str,
        thread_key: Option<&str>,
        event_date: Option<&str>,
    ) -> Result<MemoryId, MemoryError> {
        let intensity = self.analyzer.analyze(content).intensity;
        let mut memory = Memory::new(self.subject.clone(), content).with_emotional_intensity(intensity);
        memory.thread_key = thread_key.map(str::to_string);
        memory.event_date = event_date.map(str::to_string);
        self.long_term.remember(memory).await
    }

    /// Render the working set and a turn's recalls as prompt context.
    /// Sections with nothing in them are left out.
    pub fn render_context(&self, outcome: &TurnOutcome) -> String {
        let mut sections = Vec::new();

        let working = self.working.format();
        if !working.is_empty() {
            sections.push(format!("## Working Memory\n{working}"));
        }

        let recalled = format_results(&outcome.recalled);
        if !recalled.is_empty() {
            sections.push(format!("## Recalled Memories\n{recalled}"));
        }

        sections.join("\n\n")
    }
}
