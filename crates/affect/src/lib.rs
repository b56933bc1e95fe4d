//! Affective signal extraction for Kioku.
//!
//! Reference implementations of the core's [`EmotionAnalyzer`] and
//! [`FeedbackDetector`] traits, driven by static per-language phrase tables.
//! Both are pure functions of the message text.
//!
//! [`EmotionAnalyzer`]: kioku_core::EmotionAnalyzer
//! [`FeedbackDetector`]: kioku_core::FeedbackDetector

pub mod emotion;
pub mod feedback;
mod matching;

pub use emotion::{KeywordEmotionAnalyzer, analyze_emotion};
pub use feedback::{
    FEEDBACK_BOOST_NEGATIVE, FEEDBACK_BOOST_POSITIVE, PhraseFeedbackDetector, detect_feedback,
};
