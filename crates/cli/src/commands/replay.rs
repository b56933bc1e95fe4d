//! `kioku replay` — Drive working memory through a scripted conversation.

use std::path::Path;

use kioku_affect::KeywordEmotionAnalyzer;
use kioku_config::AppConfig;
use kioku_core::emotion::EmotionAnalyzer;
use kioku_core::working::WorkingMemoryItem;
use kioku_memory::WorkingMemory;
use serde::Deserialize;

/// A replay script: starting working set plus the turns to feed it.
#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    items: Vec<WorkingMemoryItem>,
    turns: Vec<ScriptTurn>,
}

#[derive(Debug, Deserialize)]
struct ScriptTurn {
    turn: u64,
    message: String,
}

pub async fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let script: Script = serde_json::from_str(&raw)?;

    let analyzer = KeywordEmotionAnalyzer::new(&config.affect.languages);
    let mut working = WorkingMemory::new(config.working_memory.clone());
    working.set_items(script.items);

    for step in &script.turns {
        let emotion = analyzer.analyze(&step.message);
        working.update(step.turn, &step.message, Some(&emotion));

        println!(
            "Turn {} [{} {:.2}] {}",
            step.turn, emotion.primary, emotion.intensity, step.message
        );
        if working.is_empty() {
            println!("  (working memory empty)");
        } else {
            for line in working.format().lines() {
                println!("  {line}");
            }
        }
    }
    Ok(())
}
