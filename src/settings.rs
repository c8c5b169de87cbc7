use serde::{Deserialize, Serialize};

use crate::expand::{Algorithm, Granularity};
use crate::playback::{Duration, DEFAULT_DELAY_MS, MAX_DELAY_MS, MIN_DELAY_MS};

/// User preferences kept between sessions. Boards and traces are never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub algorithm: Algorithm,
    pub granularity: Granularity,
    /// Auto-play delay between steps.
    pub delay_ms: u64,
    /// Name of the colour preset.
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            granularity: Granularity::default(),
            delay_ms: DEFAULT_DELAY_MS,
            theme: "Sleek Dark".to_owned(),
        }
    }
}

impl Settings {
    /// Bring values restored from storage back into range.
    pub fn clamp(mut self) -> Self {
        self.delay_ms = self.delay_ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS);
        self
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// `true` when the "Show detailed steps" box is ticked.
    pub fn detailed(&self) -> bool {
        self.granularity == Granularity::Fine
    }

    pub fn set_detailed(&mut self, detailed: bool) {
        self.granularity = if detailed {
            Granularity::Fine
        } else {
            Granularity::Coarse
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_first_run() {
        let s = Settings::default();
        assert_eq!(s.algorithm, Algorithm::AStar);
        assert!(!s.detailed());
        assert_eq!(s.delay(), Duration::from_millis(150));
    }

    #[test]
    fn clamp_bounds_the_delay() {
        let s = Settings {
            delay_ms: 5,
            ..Settings::default()
        };
        assert_eq!(s.clamp().delay_ms, MIN_DELAY_MS);
    }

    #[test]
    fn detailed_toggles_granularity() {
        let mut s = Settings::default();
        s.set_detailed(true);
        assert_eq!(s.granularity, Granularity::Fine);
        s.set_detailed(false);
        assert_eq!(s.granularity, Granularity::Coarse);
    }
}
