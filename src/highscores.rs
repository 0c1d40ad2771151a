//! Best score tracking
//!
//! A single personal best, persisted to LocalStorage under the same key
//! across sessions. The value only ever goes up.

/// Best score achieved on this browser/profile
#[derive(Debug, Clone, Default)]
pub struct BestScore {
    pub value: u64,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "highscore";

    pub fn new() -> Self {
        Self { value: 0 }
    }

    /// Check if a finished run's score beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.value
    }

    /// Record a finished run. Raises and persists the best only on a
    /// strict improvement; ties and lower scores leave it untouched.
    /// Returns whether a new best was set.
    pub fn finalize(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.value = score;
        self.save();
        true
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(value) = raw.parse::<u64>() {
                    log::info!("Loaded best score: {}", value);
                    return Self { value };
                }
            }
        }

        log::info!("No best score found, starting fresh");
        Self::new()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.value.to_string());
            log::info!("Best score saved: {}", self.value);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_keeps_best_on_lower_score() {
        let mut best = BestScore { value: 10 };
        assert!(!best.finalize(7));
        assert_eq!(best.value, 10);
    }

    #[test]
    fn test_finalize_ignores_tie() {
        let mut best = BestScore { value: 10 };
        assert!(!best.finalize(10));
        assert_eq!(best.value, 10);
    }

    #[test]
    fn test_finalize_raises_on_improvement() {
        let mut best = BestScore { value: 10 };
        assert!(best.finalize(15));
        assert_eq!(best.value, 15);
    }

    #[test]
    fn test_fresh_best_accepts_any_positive_score() {
        let mut best = BestScore::new();
        assert!(best.finalize(1));
        assert_eq!(best.value, 1);
    }
}
