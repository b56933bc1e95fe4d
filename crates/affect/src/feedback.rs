//! Accuracy-feedback detection.
//!
//! Users confirm or correct what the agent recalled ("そうそう", "that's
//! wrong"). The detected delta is added to the boost of the memories recalled
//! on the previous turn, so good recalls surface more readily next time.

use kioku_core::emotion::{FeedbackDetector, Language};

use crate::matching::occurs;

/// Boost applied when the user confirms a recall.
pub const FEEDBACK_BOOST_POSITIVE: f64 = 0.05;

/// Boost applied when the user corrects a recall.
pub const FEEDBACK_BOOST_NEGATIVE: f64 = -0.05;

const JA_POSITIVE: &[&str] = &[
    "ありがとう", "そうそう", "正解", "それそれ", "そうだよ", "そうだね", "合ってる", "当たり",
    "さすが", "よく覚えてる", "覚えてくれ",
];

const JA_NEGATIVE: &[&str] = &[
    "違うよ", "違う!", "違う！", "それじゃない", "間違い", "間違えてる", "ハズレ", "覚えてない",
    "忘れてる", "そうじゃなく",
];

const EN_POSITIVE: &[&str] = &[
    "thank you", "thanks", "that's right", "that's correct", "exactly", "you remembered",
    "good memory",
];

const EN_NEGATIVE: &[&str] = &[
    "that's wrong", "that's not it", "that's not right", "not what i said", "you forgot",
    "you're mistaken", "incorrect",
];

fn patterns(language: Language, positive: bool) -> &'static [&'static str] {
    match (language, positive) {
        (Language::Japanese, true) => JA_POSITIVE,
        (Language::Japanese, false) => JA_NEGATIVE,
        (Language::English, true) => EN_POSITIVE,
        (Language::English, false) => EN_NEGATIVE,
    }
}

/// Detects feedback by phrase matching; positive phrases take precedence.
#[derive(Debug, Clone)]
pub struct PhraseFeedbackDetector {
    languages: Vec<Language>,
}

impl PhraseFeedbackDetector {
    pub fn new(languages: &[Language]) -> Self {
        Self {
            languages: languages.to_vec(),
        }
    }

    fn any_match(&self, lowered: &str, positive: bool) -> bool {
        self.languages
            .iter()
            .any(|lang| patterns(*lang, positive).iter().any(|p| occurs(*lang, lowered, p)))
    }
}

impl Default for PhraseFeedbackDetector {
    fn default() -> Self {
        Self::new(&[Language::Japanese, Language::English])
    }
}

impl FeedbackDetector for PhraseFeedbackDetector {
    fn detect(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        if self.any_match(&lowered, true) {
            FEEDBACK_BOOST_POSITIVE
        } else if self.any_match(&lowered, false) {
            FEEDBACK_BOOST_NEGATIVE
        } else {
            0.0
        }
    }
}

/// Detect feedback with every shipped language table enabled.
pub fn detect_feedback(text: &str) -> f64 {
    PhraseFeedbackDetector::default().detect(text)
}
