//! Keyword-based emotion classification.
//!
//! Counts keyword hits per emotion across the enabled language tables and
//! picks the emotion with the most hits. Intensity is a step function of the
//! hit count, nudged up by exclamation marks.

use kioku_core::emotion::{Emotion, EmotionAnalyzer, EmotionalState, Language};
use tracing::trace;

use crate::matching::occurs;

// ── Lexicons ──────────────────────────────────────────────────────────────

const JA_JOY: &[&str] = &[
    "嬉しい", "うれしい", "楽しい", "たのしい", "ありがとう", "最高", "やった", "良かった",
    "よかった", "素晴らしい", "素敵", "すてき", "幸せ", "しあわせ", "わくわく", "好き", "大好き",
    "笑",
];

const JA_SADNESS: &[&str] = &[
    "悲しい", "かなしい", "辛い", "つらい", "寂しい", "さみしい", "残念", "泣", "落ち込",
    "しんどい", "切ない", "せつない", "がっかり", "凹", "へこ",
];

const JA_ANGER: &[&str] = &[
    "むかつく", "ふざけ", "ありえない", "最悪", "怒", "イライラ", "いらいら", "うざ", "腹立",
    "ムカ", "ひどい", "酷い", "許せない", "ゆるせない",
];

const JA_FEAR: &[&str] = &[
    "心配", "不安", "怖い", "こわい", "大丈夫", "やばい", "ヤバい", "焦", "あせ", "緊張",
    "ドキドキ", "どきどき", "恐",
];

const JA_SURPRISE: &[&str] = &[
    "まじ", "マジ", "え？", "えっ", "信じられない", "びっくり", "驚", "すごい", "スゴい", "すげ",
    "意外", "まさか", "うそ", "ウソ",
];

// English entries are lowercase whole words; messages are lowercased before matching.
const EN_JOY: &[&str] = &[
    "happy", "glad", "thanks", "thank you", "great", "awesome", "love", "loved", "wonderful",
    "excited", "yay", "fantastic",
];

const EN_SADNESS: &[&str] = &[
    "sad", "lonely", "depressed", "heartbroken", "unhappy", "disappointed", "crying", "miserable",
];

const EN_ANGER: &[&str] = &[
    "angry", "furious", "annoyed", "hate", "ridiculous", "unacceptable", "irritated", "pissed",
];

const EN_FEAR: &[&str] = &[
    "worried", "anxious", "scared", "afraid", "nervous", "terrified", "panic",
];

const EN_SURPRISE: &[&str] = &[
    "wow", "no way", "unbelievable", "surprised", "shocked", "can't believe", "omg",
];

fn keywords(language: Language, emotion: Emotion) -> &'static [&'static str] {
    match (language, emotion) {
        (Language::Japanese, Emotion::Joy) => JA_JOY,
        (Language::Japanese, Emotion::Sadness) => JA_SADNESS,
        (Language::Japanese, Emotion::Anger) => JA_ANGER,
        (Language::Japanese, Emotion::Fear) => JA_FEAR,
        (Language::Japanese, Emotion::Surprise) => JA_SURPRISE,
        (Language::English, Emotion::Joy) => EN_JOY,
        (Language::English, Emotion::Sadness) => EN_SADNESS,
        (Language::English, Emotion::Anger) => EN_ANGER,
        (Language::English, Emotion::Fear) => EN_FEAR,
        (Language::English, Emotion::Surprise) => EN_SURPRISE,
        (_, Emotion::Neutral) => &[],
    }
}

// ── Analyzer ──────────────────────────────────────────────────────────────

/// Classifies messages by counting emotion keywords.
#[derive(Debug, Clone)]
pub struct KeywordEmotionAnalyzer {
    languages: Vec<Language>,
}

impl KeywordEmotionAnalyzer {
    /// Create an analyzer matching against the given language tables.
    pub fn new(languages: &[Language]) -> Self {
        let mut enabled = Vec::with_capacity(languages.len());
        for language in languages {
            if !enabled.contains(language) {
                enabled.push(*language);
            }
        }
        Self { languages: enabled }
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    fn hits(&self, lowered: &str, emotion: Emotion) -> usize {
        self.languages
            .iter()
            .map(|lang| {
                keywords(*lang, emotion)
                    .iter()
                    .filter(|kw| occurs(*lang, lowered, kw))
                    .count()
            })
            .sum()
    }
}

impl Default for KeywordEmotionAnalyzer {
    fn default() -> Self {
        Self::new(&[Language::Japanese, Language::English])
    }
}

impl EmotionAnalyzer for KeywordEmotionAnalyzer {
    fn analyze(&self, text: &str) -> EmotionalState {
        let lowered = text.to_lowercase();

        let mut best = Emotion::Neutral;
        let mut best_hits = 0;
        for emotion in Emotion::DETECTABLE {
            let hits = self.hits(&lowered, emotion);
            // Strictly greater: earlier emotions win ties.
            if hits > best_hits {
                best = emotion;
                best_hits = hits;
            }
        }

        if best_hits == 0 {
            return EmotionalState::neutral();
        }

        let mut intensity: f64 = match best_hits {
            1 => 0.4,
            2 => 0.6,
            _ => 0.8,
        };
        if text.contains('!') || text.contains('！') {
            intensity += 0.1;
        }
        let intensity = intensity.min(1.0);

        trace!(emotion = %best, hits = best_hits, intensity, "Classified message");

        EmotionalState {
            primary: best,
            intensity,
            valence: best.base_valence() * intensity,
        }
    }
}

/// Classify `text` with every shipped language table enabled.
pub fn analyze_emotion(text: &str) -> EmotionalState {
    KeywordEmotionAnalyzer::default().analyze(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn no_keywords_is_neutral() {
        let state = analyze_emotion("今日は晴れ");
        assert_eq!(state, EmotionalState::neutral());
    }

    #[test]
    fn single_hit_with_exclamation() {
        let state = analyze_emotion("嬉しい！");
        assert_eq!(state.primary, Emotion::Joy);
        assert!(approx(state.intensity, 0.5));
        assert!(approx(state.valence, 0.4));
    }

    #[test]
    fn two_hits_step_up_intensity() {
        let state = analyze_emotion("悲しいし寂しい");
        assert_eq!(state.primary, Emotion::Sadness);
        assert!(approx(state.intensity, 0.6));
        assert!(approx(state.valence, -0.36));
    }

    #[test]
    fn three_or_more_hits_cap_the_step() {
        let state = analyze_emotion("最高！やった！楽しい");
        assert_eq!(state.primary, Emotion::Joy);
        assert!(approx(state.intensity, 0.9));
        assert!(approx(state.valence, 0.72));
    }

    #[test]
    fn ties_break_by_enumeration_order() {
        // one joy keyword, one fear keyword
        let state = analyze_emotion("嬉しいけど心配");
        assert_eq!(state.primary, Emotion::Joy);
    }

    #[test]
    fn english_matching_is_case_insensitive() {
        let state = analyze_emotion("I am SO Happy and glad");
        assert_eq!(state.primary, Emotion::Joy);
        assert!(approx(state.intensity, 0.6));
    }

    #[test]
    fn ascii_exclamation_counts() {
        let state = analyze_emotion("I'm worried!");
        assert_eq!(state.primary, Emotion::Fear);
        assert!(approx(state.intensity, 0.5));
        assert!(approx(state.valence, -0.25));
    }

    #[test]
    fn disabled_language_is_ignored() {
        let analyzer = KeywordEmotionAnalyzer::new(&[Language::Japanese]);
        assert!(analyzer.analyze("so happy").is_neutral());
        assert_eq!(analyzer.analyze("幸せ").primary, Emotion::Joy);
    }

    #[test]
    fn duplicate_languages_are_collapsed() {
        let analyzer = KeywordEmotionAnalyzer::new(&[Language::English, Language::English]);
        assert_eq!(analyzer.languages(), &[Language::English]);
        assert!(approx(analyzer.analyze("sad").intensity, 0.4));
    }

    #[test]
    fn english_keywords_inside_other_words_are_ignored() {
        assert!(analyze_emotion("whatever, let's talk about the weather").is_neutral());
        assert!(analyze_emotion("I bought new gloves").is_neutral());
        assert!(analyze_emotion("see you at thanksgiving").is_neutral());
    }

    #[test]
    fn fragment_hits_do_not_mark_working_memory() {
        let threshold = kioku_core::working::WorkingMemoryConfig::default()
            .emotional_marking_threshold;
        assert!(analyze_emotion("whatever works").intensity <= threshold);
        assert_eq!(analyze_emotion("I hate waiting").primary, Emotion::Anger);
    }
}
