use serde::{Deserialize, Serialize};

/// Tunable thresholds for one tracking session.
///
/// Every field has a default, so a config file only needs the values it
/// changes:
///
/// ```
/// use ocrtris_ocr::TrackerConfig;
///
/// let config: TrackerConfig = serde_json::from_str(r#"{ "limbo_tolerance": 10 }"#).unwrap();
/// assert_eq!(config.limbo_tolerance, 10);
/// assert_eq!(config, TrackerConfig { limbo_tolerance: 10, ..TrackerConfig::default() });
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Highest board noise score at which the board is trusted.
    pub max_board_noise: f64,
    /// Consecutive untrusted frames tolerated before the game is considered over.
    pub limbo_tolerance: usize,
    /// Block-shine brightness above which a board cell is occupied.
    pub shine_threshold: f64,
    /// Brightness above which a next-box sample is bright.
    pub next_brightness_threshold: f64,
    /// Largest template mismatch accepted by the next-piece classifier.
    pub max_next_distance: usize,
    /// Brightness above which a digit sample is bright.
    pub digit_brightness_threshold: f64,
    /// Largest glyph mismatch accepted by the digit reader.
    pub max_digit_distance: usize,
    /// Number of characters in the level display.
    pub level_digits: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_board_noise: 40.0,
            limbo_tolerance: 30,
            shine_threshold: 130.0,
            next_brightness_threshold: 30.0,
            max_next_distance: 4,
            digit_brightness_threshold: 100.0,
            max_digit_distance: 2,
            level_digits: 2,
        }
    }
}
