use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Timestamp layout used in stats file names, e.g. `2024.01.15-18.42.07`.
pub const TIMESTAMP_FORMAT: &str = "%Y.%m.%d-%H.%M.%S";

/// Best run recorded for one scenario.
///
/// Only `high_score` is used for ranking; the rest is carried for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub scenario: String,
    pub high_score: f64,
    pub kills: i32,
    pub hits: i32,
    pub misses: i32,
    pub fov_scale: String,
    pub fov: f64,
    pub resolution: String,
    pub avg_fps: f64,
    pub sensitivity: Option<(f64, f64)>, // (horiz, vert) cm/360
    pub timestamp: String,
}

/// Scenario name -> best record.
pub type ScoreSnapshot = HashMap<String, ScoreRecord>;

impl ScoreRecord {
    /// A record carrying only a scenario name and score
    pub fn new(scenario: impl Into<String>, high_score: f64) -> Self {
        Self {
            scenario: scenario.into(),
            high_score,
            kills: 0,
            hits: 0,
            misses: 0,
            fov_scale: String::new(),
            fov: 0.0,
            resolution: String::new(),
            avg_fps: 0.0,
            sensitivity: None,
            timestamp: String::new(),
        }
    }

    /// Parse the run timestamp, if it is in the stats file name layout
    pub fn played_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }

    /// Hit ratio in `[0, 1]`, or None when no shots were recorded
    pub fn accuracy(&self) -> Option<f64> {
        let shots = self.hits + self.misses;
        if shots > 0 {
            Some(self.hits as f64 / shots as f64)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_played_at() {
        let mut record = ScoreRecord::new("pasu", 800.0);
        record.timestamp = "2024.01.15-18.42.07".to_string();

        let played = record.played_at().unwrap();
        assert_eq!(played.year(), 2024);
        assert_eq!(played.month(), 1);
        assert_eq!(played.hour(), 18);
        assert_eq!(played.second(), 7);
    }

    #[test]
    fn test_played_at_invalid() {
        let mut record = ScoreRecord::new("pasu", 800.0);
        assert!(record.played_at().is_none());
        record.timestamp = "yesterday".to_string();
        assert!(record.played_at().is_none());
    }

    #[test]
    fn test_accuracy() {
        let mut record = ScoreRecord::new("pasu", 800.0);
        assert_eq!(record.accuracy(), None);
        record.hits = 75;
        record.misses = 25;
        assert_eq!(record.accuracy(), Some(0.75));
    }
}
