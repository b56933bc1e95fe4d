//! `kioku analyze` / `kioku feedback` — Affective signal inspection.

use kioku_affect::{KeywordEmotionAnalyzer, PhraseFeedbackDetector};
use kioku_config::AppConfig;
use kioku_core::emotion::{EmotionAnalyzer, FeedbackDetector};

pub async fn analyze(text: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let analyzer = KeywordEmotionAnalyzer::new(&config.affect.languages);
    let state = analyzer.analyze(text);

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("  Emotion:   {}", state.primary);
        println!("  Intensity: {:.2}", state.intensity);
        println!("  Valence:   {:+.2}", state.valence);
    }
    Ok(())
}

pub async fn feedback(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let detector = PhraseFeedbackDetector::new(&config.affect.languages);
    let delta = detector.detect(text);

    let verdict = if delta > 0.0 {
        "positive"
    } else if delta < 0.0 {
        "negative"
    } else {
        "none"
    };
    println!("  Feedback: {verdict} ({delta:+.2})");
    Ok(())
}
