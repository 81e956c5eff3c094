//! Deadline board - one headline countdown plus a row of secondary ones

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::countdown::{parse_timezone, Countdown, CountdownError, RemainingTime, TargetInstant};

/// Name of the board config file (`deadline_board.toml`)
pub const DEADLINE_CONFIG_NAME: &str = "deadline_board";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    pub name: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM:SS
    pub time: String,
}

impl Deadline {
    fn new(name: &str, date: &str, time: &str) -> Self {
        Self {
            name: name.to_string(),
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    /// Resolve in `zone`, or the host's local zone when `None`
    pub fn target(&self, zone: Option<Tz>) -> Result<TargetInstant, CountdownError> {
        match zone {
            Some(tz) => TargetInstant::in_zone(&self.date, &self.time, tz),
            None => TargetInstant::in_local_zone(&self.date, &self.time),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineBoardConfig {
    pub main: Deadline,
    #[serde(default)]
    pub secondary: Vec<Deadline>,
    /// IANA zone the dates are written in; host local time when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for DeadlineBoardConfig {
    fn default() -> Self {
        Self {
            main: Deadline::new("ACL ARR", "2026-01-06", "21:00:00"),
            secondary: vec![
                Deadline::new("Interspeech", "2026-02-26", "21:00:00"),
                Deadline::new("ISMIR", "2026-04-28", "21:00:00"),
                Deadline::new("ASSETS", "2026-04-15", "23:59:59"),
                Deadline::new("MM", "2026-05-01", "23:59:59"),
            ],
            timezone: None,
        }
    }
}

/// A named countdown on the board
#[derive(Debug, Clone)]
pub struct BoardEntry {
    pub name: String,
    pub countdown: Countdown,
}

impl BoardEntry {
    pub fn remaining(&self) -> RemainingTime {
        self.countdown.remaining()
    }
}

#[derive(Debug, Clone)]
pub struct DeadlineBoard {
    pub main: BoardEntry,
    pub secondary: Vec<BoardEntry>,
}

impl DeadlineBoard {
    /// Build every countdown. An unknown zone falls back to local time;
    /// a bad individual deadline reads zero. Both are logged.
    pub fn from_config(config: &DeadlineBoardConfig) -> Self {
        let zone = config.timezone.as_deref().and_then(|name| match parse_timezone(name) {
            Ok(tz) => Some(tz),
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to local time for deadlines");
                None
            }
        });

        let entry = |deadline: &Deadline| {
            let target = deadline.target(zone);
            if let Err(e) = &target {
                tracing::warn!(deadline = %deadline.name, error = %e, "Invalid deadline");
            }
            BoardEntry {
                name: deadline.name.clone(),
                countdown: Countdown::new(target),
            }
        };

        Self {
            main: entry(&config.main),
            secondary: config.secondary.iter().map(entry).collect(),
        }
    }

    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.main.countdown.refresh(now);
        for entry in &mut self.secondary {
            entry.countdown.refresh(now);
        }
    }

    /// Secondary deadlines soonest first; finished ones keep config order at the end
    pub fn secondary_by_urgency(&self) -> Vec<&BoardEntry> {
        let mut entries: Vec<&BoardEntry> = self.secondary.iter().collect();
        entries.sort_by_key(|entry| {
            let remaining = entry.remaining();
            (remaining.is_zero(), remaining.total_seconds())
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc_board() -> DeadlineBoard {
        let config = DeadlineBoardConfig {
            timezone: Some("UTC".to_string()),
            ..DeadlineBoardConfig::default()
        };
        DeadlineBoard::from_config(&config)
    }

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_main_countdown() {
        let mut board = utc_board();
        board.refresh(at("2026-01-05T21:00:00Z"));
        assert_eq!(board.main.remaining().days, 1);
        assert_eq!(board.main.remaining().total_seconds(), 86_400);
    }

    #[test]
    fn test_secondary_by_urgency() {
        let mut board = utc_board();
        board.refresh(at("2026-04-20T00:00:00Z"));
        let names: Vec<&str> = board
            .secondary_by_urgency()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, ["ISMIR", "MM", "Interspeech", "ASSETS"]);
    }

    #[test]
    fn test_named_zone() {
        let config = DeadlineBoardConfig {
            timezone: Some("Asia/Seoul".to_string()),
            ..DeadlineBoardConfig::default()
        };
        let mut board = DeadlineBoard::from_config(&config);
        board.refresh(at("2026-01-06T11:00:00Z"));
        assert_eq!(board.main.remaining().hours, 1);
    }

    #[test]
    fn test_bad_deadline_reads_zero() {
        let config = DeadlineBoardConfig {
            main: Deadline::new("Broken", "2026-02-30", "21:00:00"),
            secondary: Vec::new(),
            timezone: Some("UTC".to_string()),
        };
        let mut board = DeadlineBoard::from_config(&config);
        board.refresh(at("2020-01-01T00:00:00Z"));
        assert!(!board.main.countdown.has_target());
        assert!(board.main.remaining().is_zero());
    }

    #[test]
    fn test_unknown_zone_falls_back_to_local() {
        let config = DeadlineBoardConfig {
            timezone: Some("Mars/Olympus".to_string()),
            ..DeadlineBoardConfig::default()
        };
        let board = DeadlineBoard::from_config(&config);
        assert!(board.main.countdown.has_target());
    }
}
