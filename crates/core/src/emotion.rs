//! Emotion and feedback traits — the affective signals both engines consume.
//!
//! An [`EmotionAnalyzer`] turns a message into an [`EmotionalState`]; the
//! working memory uses its intensity to mark items emotional and the
//! long-term memory uses it to prime recall. A [`FeedbackDetector`] turns a
//! message into a boost delta applied to previously recalled memories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A classified primary emotion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    #[default]
    Neutral,
}

impl Emotion {
    /// The emotions a classifier can detect, in tie-breaking order.
    pub const DETECTABLE: [Emotion; 5] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
    ];

    /// Signed pleasantness of this emotion at full intensity.
    pub fn base_valence(self) -> f64 {
        match self {
            Self::Joy => 0.8,
            Self::Sadness => -0.6,
            Self::Anger => -0.8,
            Self::Fear => -0.5,
            Self::Surprise => 0.3,
            Self::Neutral => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The detected affect of a single message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionalState {
    /// Dominant emotion
    pub primary: Emotion,

    /// Strength of the emotion, 0.0 - 1.0
    pub intensity: f64,

    /// Signed pleasantness, -1.0 - 1.0
    pub valence: f64,
}

impl EmotionalState {
    /// A message with no detectable affect.
    pub const fn neutral() -> Self {
        Self {
            primary: Emotion::Neutral,
            intensity: 0.0,
            valence: 0.0,
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.primary == Emotion::Neutral
    }
}

impl Default for EmotionalState {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Language of a keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Japanese,
    English,
}

/// Classifies a message into an emotional state.
///
/// Implementations must be deterministic: the same text always yields the
/// same state.
pub trait EmotionAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> EmotionalState;
}

/// Detects accuracy feedback about recalled memories.
///
/// Returns the boost delta to apply, or `0.0` when the message carries no
/// feedback.
pub trait FeedbackDetector: Send + Sync {
    fn detect(&self, text: &str) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_state_has_no_affect() {
        let state = EmotionalState::default();
        assert!(state.is_neutral());
        assert_eq!(state.intensity, 0.0);
        assert_eq!(state.valence, 0.0);
    }

    #[test]
    fn detectable_order_excludes_neutral() {
        assert_eq!(Emotion::DETECTABLE[0], Emotion::Joy);
        assert!(!Emotion::DETECTABLE.contains(&Emotion::Neutral));
    }

    #[test]
    fn valence_signs() {
        assert!(Emotion::Joy.base_valence() > 0.0);
        assert!(Emotion::Anger.base_valence() < 0.0);
        assert_eq!(Emotion::Neutral.base_valence(), 0.0);
    }

    #[test]
    fn emotion_serializes_snake_case() {
        let json = serde_json::to_string(&Emotion::Surprise).unwrap();
        assert_eq!(json, "\"surprise\"");
        assert_eq!(Emotion::Fear.to_string(), "fear");
    }
}
