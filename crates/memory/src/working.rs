//! Working memory — the small set of topics currently salient in a conversation.
//!
//! Each turn runs one cycle, always in this order:
//!
//! 1. **Decay**: activation drops by `rate × elapsed turns`; emotional items
//!    use the slower emotional rate
//! 2. **Emotional marking**: an intense turn flags *every* held item emotional
//! 3. **Refresh**: items whose keywords appear in the message regain activation
//! 4. **Eviction**: items below the activation threshold are dropped, then the
//!    lowest-activation items go until the set fits `max_items`
//!
//! The engine never fails; it only silently forgets.

use kioku_core::emotion::EmotionalState;
use kioku_core::working::{WorkingMemoryConfig, WorkingMemoryItem};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Capacity-bounded, decaying short-term memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkingMemory {
    config: WorkingMemoryConfig,
    items: Vec<WorkingMemoryItem>,
}

impl WorkingMemory {
    /// Create an empty working memory.
    pub fn new(config: WorkingMemoryConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
        }
    }

    pub fn config(&self) -> &WorkingMemoryConfig {
        &self.config
    }

    /// The items currently held, in insertion order until the next capacity
    /// eviction reorders them by activation.
    pub fn items(&self) -> &[WorkingMemoryItem] {
        &self.items
    }

    /// Replace the working set wholesale (e.g. restoring a saved session).
    ///
    /// Activations are clamped, but no eviction runs until the next
    /// [`update`](Self::update) or [`add`](Self::add).
    pub fn set_items(&mut self, items: Vec<WorkingMemoryItem>) {
        self.items = items;
        for item in &mut self.items {
            item.activation = item.activation.clamp(0.0, 1.0);
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Run one full turn: decay, emotional marking, refresh, eviction.
    pub fn update(&mut self, turn: u64, message: &str, emotion: Option<&EmotionalState>) {
        self.decay(turn);
        self.mark_emotional(emotion);
        self.refresh(message);
        self.evict();
    }

    /// Insert an item, then evict.
    ///
    /// An item added below the activation threshold is discarded at once.
    pub fn add(&mut self, mut item: WorkingMemoryItem) {
        item.activation = item.activation.clamp(0.0, 1.0);
        self.items.push(item);
        self.evict();
    }

    /// Render as one `- [level] topic` line per item; empty when empty.
    pub fn format(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("- [{}] {}", activation_level(item.activation), item.topic))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ── Cycle steps ──

    fn decay(&mut self, turn: u64) {
        for item in &mut self.items {
            let elapsed = turn.saturating_sub(item.turn_accessed);
            if elapsed == 0 {
                continue;
            }

            let rate = if item.emotional {
                self.config.emotional_decay_rate
            } else {
                self.config.normal_decay_rate
            };

            item.activation = (item.activation - rate * elapsed as f64).max(0.0);
            item.turn_accessed = turn;
        }
    }

    fn mark_emotional(&mut self, emotion: Option<&EmotionalState>) {
        let Some(emotion) = emotion else {
            return;
        };
        if emotion.intensity <= self.config.emotional_marking_threshold {
            return;
        }
        // One intense turn colours the whole working set.
        for item in &mut self.items {
            item.emotional = true;
        }
    }

    fn refresh(&mut self, message: &str) {
        let lowered = message.to_lowercase();
        for item in &mut self.items {
            if item.matches(&lowered) {
                item.activation = (item.activation + self.config.refresh_boost).min(1.0);
            }
        }
    }

    fn evict(&mut self) {
        let threshold = self.config.activation_threshold;
        let before = self.items.len();
        self.items.retain(|item| item.activation >= threshold);
        let faded = before - self.items.len();

        let mut displaced = 0;
        if self.items.len() > self.config.max_items {
            self.items.sort_by(|a, b| {
                b.activation
                    .partial_cmp(&a.activation)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            displaced = self.items.len() - self.config.max_items;
            self.items.truncate(self.config.max_items);
        }

        if faded > 0 || displaced > 0 {
            debug!(faded, displaced, remaining = self.items.len(), "Working memory evicted items");
        }
    }
}

/// Coarse label for an activation value.
fn activation_level(activation: f64) -> &'static str {
    if activation >= 0.7 {
        "high"
    } else if activation >= 0.4 {
        "mid"
    } else {
        "low"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kioku_core::emotion::Emotion;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn item(topic: &str, activation: f64) -> WorkingMemoryItem {
        WorkingMemoryItem::new(topic, 0).with_activation(activation)
    }

    fn intense(intensity: f64) -> EmotionalState {
        EmotionalState {
            primary: Emotion::Sadness,
            intensity,
            valence: -0.6 * intensity,
        }
    }

    #[test]
    fn new_working_memory_is_empty() {
        let wm = WorkingMemory::default();
        assert!(wm.is_empty());
        assert_eq!(wm.format(), "");
        assert_eq!(wm.config().max_items, 7);
    }

    #[test]
    fn decay_scales_with_elapsed_turns() {
        let mut wm = WorkingMemory::default();
        wm.add(item("travel", 0.8));

        wm.update(2, "", None);
        assert!(approx(wm.items()[0].activation, 0.5));
        assert_eq!(wm.items()[0].turn_accessed, 2);
    }

    #[test]
    fn emotional_items_decay_slower() {
        let mut normal = WorkingMemory::default();
        normal.add(item("plain", 0.8));
        let mut emotional = WorkingMemory::default();
        let mut flagged = item("felt", 0.8);
        flagged.emotional = true;
        emotional.add(flagged);

        normal.update(2, "", None);
        emotional.update(2, "", None);

        assert!(approx(normal.items()[0].activation, 0.5));
        assert!(approx(emotional.items()[0].activation, 0.66));
        assert!(emotional.items()[0].activation > normal.items()[0].activation);
    }

    #[test]
    fn no_decay_without_elapsed_turns() {
        let mut wm = WorkingMemory::default();
        wm.add(WorkingMemoryItem::new("now", 5).with_activation(0.6));

        wm.update(5, "", None);
        assert!(approx(wm.items()[0].activation, 0.6));

        // A turn earlier than the last access is treated as no time passing.
        wm.update(3, "", None);
        assert!(approx(wm.items()[0].activation, 0.6));
        assert_eq!(wm.items()[0].turn_accessed, 5);
    }

    #[test]
    fn activation_never_goes_negative() {
        let mut wm = WorkingMemory::new(WorkingMemoryConfig {
            activation_threshold: 0.0,
            ..WorkingMemoryConfig::default()
        });
        wm.add(item("old", 0.2));

        wm.update(50, "", None);
        assert_eq!(wm.len(), 1);
        assert_eq!(wm.items()[0].activation, 0.0);
    }

    #[test]
    fn intense_turn_marks_every_item() {
        let mut wm = WorkingMemory::default();
        wm.add(item("a", 1.0));
        wm.add(item("b", 1.0));

        wm.update(0, "nothing related", Some(&intense(0.6)));
        assert!(wm.items().iter().all(|i| i.emotional));
    }

    #[test]
    fn mild_turn_marks_nothing() {
        let mut wm = WorkingMemory::default();
        wm.add(item("a", 1.0));

        // intensity must strictly exceed 0.3
        wm.update(0, "", Some(&intense(0.3)));
        assert!(!wm.items()[0].emotional);
        wm.update(0, "", None);
        assert!(!wm.items()[0].emotional);
    }

    #[test]
    fn emotional_flag_is_never_cleared() {
        let mut wm = WorkingMemory::default();
        wm.add(item("a", 1.0));
        wm.update(1, "", Some(&intense(0.8)));
        wm.update(2, "", Some(&EmotionalState::neutral()));
        assert!(wm.items()[0].emotional);
    }

    #[test]
    fn keyword_refresh_boosts_and_caps() {
        let mut wm = WorkingMemory::default();
        wm.add(item("onsen", 0.5).with_keywords(["Onsen", "hot spring"]));
        wm.add(item("work", 0.9).with_keywords(["deadline"]));

        wm.update(0, "Shall we visit an ONSEN this weekend? The deadline can wait", None);

        let onsen = wm.items().iter().find(|i| i.topic == "onsen").unwrap();
        let work = wm.items().iter().find(|i| i.topic == "work").unwrap();
        assert!(approx(onsen.activation, 0.8));
        assert_eq!(work.activation, 1.0);
    }

    #[test]
    fn empty_keyword_refreshes_every_turn() {
        let mut wm = WorkingMemory::default();
        wm.add(item("blank", 0.5).with_keywords([""]));
        wm.add(item("bare", 0.5));

        wm.update(0, "anything", None);

        let blank = wm.items().iter().find(|i| i.topic == "blank").unwrap();
        let bare = wm.items().iter().find(|i| i.topic == "bare").unwrap();
        assert!(approx(blank.activation, 0.8));
        assert_eq!(bare.activation, 0.5);
    }

    #[test]
    fn decay_runs_before_refresh() {
        let mut wm = WorkingMemory::default();
        wm.add(item("tea", 0.2).with_keywords(["tea"]));

        // 0.2 - 0.15 = 0.05, then +0.3 → 0.35: survives because refresh
        // happens before eviction.
        wm.update(1, "green tea please", None);
        assert_eq!(wm.len(), 1);
        assert!(approx(wm.items()[0].activation, 0.35));
    }

    #[test]
    fn sub_threshold_items_are_evicted_on_update() {
        let mut wm = WorkingMemory::default();
        wm.add(item("fading", 0.2));
        wm.add(item("fresh", 1.0));

        wm.update(1, "", None);
        assert_eq!(wm.len(), 1);
        assert_eq!(wm.items()[0].topic, "fresh");
    }

    #[test]
    fn add_discards_sub_threshold_item() {
        let mut wm = WorkingMemory::default();
        wm.add(item("faint", 0.05));
        assert!(wm.is_empty());
    }

    #[test]
    fn capacity_keeps_highest_activation() {
        let mut wm = WorkingMemory::new(WorkingMemoryConfig {
            max_items: 3,
            ..WorkingMemoryConfig::default()
        });
        for (i, activation) in [0.5, 0.9, 0.3, 0.7, 0.6].into_iter().enumerate() {
            wm.add(item(&format!("t{i}"), activation));
            assert!(wm.len() <= 3);
        }

        let topics: Vec<_> = wm.items().iter().map(|i| i.topic.as_str()).collect();
        assert_eq!(topics, vec!["t1", "t3", "t4"]);
    }

    #[test]
    fn capacity_holds_after_update() {
        let mut wm = WorkingMemory::default();
        let items = (0..12)
            .map(|i| item(&format!("t{i}"), 0.2 + i as f64 * 0.05))
            .collect();
        wm.set_items(items);
        assert_eq!(wm.len(), 12);

        wm.update(0, "", None);
        assert_eq!(wm.len(), 7);
        assert!(wm.items().iter().all(|i| i.activation >= 0.1 && i.activation <= 1.0));
    }

    #[test]
    fn set_items_clamps_activation() {
        let mut wm = WorkingMemory::default();
        let mut hot = item("hot", 1.0);
        hot.activation = 4.2;
        wm.set_items(vec![hot]);
        assert_eq!(wm.items()[0].activation, 1.0);
    }

    #[test]
    fn format_labels_levels() {
        let mut wm = WorkingMemory::default();
        wm.add(item("trip", 0.9));
        wm.add(item("dinner", 0.5));
        wm.add(item("weather", 0.2));

        assert_eq!(wm.format(), "- [high] trip\n- [mid] dinner\n- [low] weather");
    }

    #[test]
    fn serialization_roundtrip() {
        let mut wm = WorkingMemory::default();
        wm.add(item("topic", 0.7).with_keywords(["kw"]));

        let json = serde_json::to_string(&wm).unwrap();
        let restored: WorkingMemory = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.items(), wm.items());
    }
}
