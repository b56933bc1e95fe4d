//! `kioku search` — Long-term memory search over a JSON snapshot.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use kioku_affect::KeywordEmotionAnalyzer;
use kioku_config::AppConfig;
use kioku_core::emotion::EmotionAnalyzer;
use kioku_core::memory::{SearchQuery, SearchResult};
use kioku_memory::{InMemoryStore, LongTermMemory, format_results};

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// JSON array of memories to search
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Query vector as comma-separated floats
    #[arg(long, allow_hyphen_values = true)]
    pub vector: String,

    /// Whose memories to search (defaults to the configured subject)
    #[arg(long)]
    pub subject: Option<String>,

    /// Current conversation thread
    #[arg(long)]
    pub thread: Option<String>,

    /// ISO date to compare against memory event dates
    #[arg(long)]
    pub date: Option<String>,

    /// Prefer memories NOT on --date
    #[arg(long, requires = "date")]
    pub negate: bool,

    /// Compare --date by year-month only
    #[arg(long, requires = "date")]
    pub month_only: bool,

    /// Emotional intensity of the current turn
    #[arg(long, conflicts_with = "message")]
    pub intensity: Option<f64>,

    /// Derive the emotional intensity from a message instead
    #[arg(long)]
    pub message: Option<String>,

    /// Print results as JSON (full records, including `created_at`)
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: SearchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let snapshot = std::fs::read_to_string(&args.snapshot)
        .map_err(|e| format!("Failed to read {}: {e}", args.snapshot.display()))?;
    let store = InMemoryStore::from_json(&snapshot)?;
    let memory = LongTermMemory::new(Arc::new(store), None, config.long_term.clone());

    let intensity = match (&args.intensity, &args.message) {
        (Some(intensity), _) => *intensity,
        (None, Some(message)) => KeywordEmotionAnalyzer::new(&config.affect.languages)
            .analyze(message)
            .intensity,
        (None, None) => 0.0,
    };

    let subject = args.subject.unwrap_or(config.default_subject);
    let mut query =
        SearchQuery::vector(subject, parse_vector(&args.vector)?).with_emotional_intensity(intensity);
    if let Some(thread) = args.thread {
        query = query.with_thread(thread);
    }
    if let Some(date) = args.date {
        query = if args.negate {
            query.not_on_date(date)
        } else {
            query.on_date(date)
        };
        if args.month_only {
            query = query.month_only();
        }
    }

    let results = memory.search(&query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if results.is_empty() {
        println!("  No memories above the threshold.");
    } else {
        for result in &results {
            println!("{}", score_line(result));
        }
        println!();
        println!("{}", format_results(&results));
    }
    Ok(())
}

/// One summary line per hit: score, id, and the day the memory was created.
fn score_line(result: &SearchResult) -> String {
    format!(
        "  [{:.3}] {} (saved {})",
        result.score,
        result.memory.id,
        result.memory.created_at.format("%Y-%m-%d")
    )
}

/// Parse a comma-separated list of floats.
fn parse_vector(raw: &str) -> Result<Vec<f32>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f32>()
                .map_err(|_| format!("Invalid vector component: {part:?}"))
        })
        .collect()
}
