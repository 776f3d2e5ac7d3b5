use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::MAX_HIGH_SCORES;
use crate::error::ScoreStoreError;

/// One finished game on the leaderboard.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
    pub date: DateTime<Utc>,
}

impl HighScoreEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, score: u32, date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            score,
            date,
        }
    }
}

/// Leaderboard sorted by descending score, at most [`MAX_HIGH_SCORES`] long.
///
/// Serialized as a bare JSON array.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    /// Builds a table from arbitrary entries, sorting and truncating them.
    #[must_use]
    pub fn from_entries(entries: Vec<HighScoreEntry>) -> Self {
        let mut table = Self { entries };
        table.normalize();
        table
    }

    /// Inserts `entry` and keeps the best [`MAX_HIGH_SCORES`].
    ///
    /// Equal scores keep their insertion order.
    #[must_use]
    pub fn append(mut self, entry: HighScoreEntry) -> Self {
        self.entries.push(entry);
        self.normalize();
        self
    }

    /// Returns true if `score` would earn a place in the table.
    #[must_use]
    pub fn would_rank(&self, score: u32) -> bool {
        self.entries.len() < MAX_HIGH_SCORES
            || self.entries.iter().any(|entry| score > entry.score)
    }

    #[must_use]
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn normalize(&mut self) {
        // Stable sort, so ties keep their insertion order.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

impl fmt::Display for HighScoreTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "No high scores yet.");
        }

        writeln!(f, "High scores")?;
        for (rank, entry) in self.entries.iter().enumerate() {
            writeln!(
                f,
                "{:>2}. {:<24} {:>4}  {}",
                rank + 1,
                entry.name,
                entry.score,
                entry.date.format("%Y-%m-%d %H:%M")
            )?;
        }
        Ok(())
    }
}

/// Leaderboard persisted as JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the leaderboard.
    ///
    /// A missing, unreadable, or malformed file yields an empty table.
    #[must_use]
    pub fn load(&self) -> HighScoreTable {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!("no score file at {}", self.path.display());
                return HighScoreTable::default();
            }
            Err(error) => {
                warn!("cannot read {}: {error}", self.path.display());
                return HighScoreTable::default();
            }
        };

        match serde_json::from_str::<Vec<HighScoreEntry>>(&raw) {
            Ok(entries) => HighScoreTable::from_entries(entries),
            Err(error) => {
                warn!("ignoring malformed {}: {error}", self.path.display());
                HighScoreTable::default()
            }
        }
    }

    /// Replaces the stored leaderboard with `table`.
    ///
    /// Writes a sibling temp file and renames it over the target, creating
    /// parent directories when needed.
    pub fn save(&self, table: &HighScoreTable) -> Result<(), ScoreStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ScoreStoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(table)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, json).map_err(|source| ScoreStoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            ScoreStoreError::Replace {
                path: self.path.clone(),
                source,
            }
        })?;

        debug!("saved {} high scores to {}", table.len(), self.path.display());
        Ok(())
    }

    /// Clears the stored leaderboard.
    pub fn reset(&self) -> Result<HighScoreTable, ScoreStoreError> {
        let table = HighScoreTable::default();
        self.save(&table)?;
        info!("high scores reset at {}", self.path.display());
        Ok(table)
    }

    /// Adds `entry` to the stored leaderboard and returns the new table.
    pub fn record(&self, entry: HighScoreEntry) -> Result<HighScoreTable, ScoreStoreError> {
        info!("recording score {} for {:?}", entry.score, entry.name);
        let table = self.load().append(entry);
        self.save(&table)?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use chrono::{TimeZone, Utc};

    use super::{HighScoreEntry, HighScoreStore, HighScoreTable};

    fn entry(name: &str, score: u32) -> HighScoreEntry {
        let date = Utc
            .with_ymd_and_hms(2024, 3, 14, 15, 9, 26)
            .single()
            .expect("valid timestamp");
        HighScoreEntry::new(name, score, date)
    }

    fn scores(table: &HighScoreTable) -> Vec<u32> {
        table.entries().iter().map(|entry| entry.score).collect()
    }

    #[test]
    fn append_keeps_top_five_descending() {
        let mut table = HighScoreTable::default();
        for score in [3, 1, 4, 1, 5, 9, 2, 6] {
            table = table.append(entry("p", score));
        }

        assert_eq!(scores(&table), vec![9, 6, 5, 4, 3]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let table = HighScoreTable::default()
            .append(entry("first", 4))
            .append(entry("second", 4));

        let names: Vec<_> = table.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn would_rank_checks_free_slots_and_lowest_score() {
        let mut table = HighScoreTable::default();
        assert!(table.would_rank(0));

        for score in [10, 8, 6, 4, 2] {
            table = table.append(entry("p", score));
        }

        assert!(table.would_rank(3));
        assert!(!table.would_rank(2));
        assert!(!table.would_rank(0));
    }

    #[test]
    fn save_then_load_round_trip() {
        let path = unique_test_path("round_trip");
        let store = HighScoreStore::new(&path);
        let table = HighScoreTable::default()
            .append(entry("ada", 7))
            .append(entry("bob", 3));

        store.save(&table).expect("save should succeed");
        let loaded = store.load();
        store.save(&loaded).expect("second save should succeed");

        assert_eq!(loaded, table);
        assert_eq!(store.load(), table);
        cleanup_test_path(&path);
    }

    #[test]
    fn file_is_a_plain_json_array() {
        let path = unique_test_path("format");
        let store = HighScoreStore::new(&path);

        store
            .save(&HighScoreTable::default().append(entry("ada", 7)))
            .expect("save should succeed");
        let raw = fs::read_to_string(&path).expect("file should exist");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");

        let first = &value.as_array().expect("top level array")[0];
        assert_eq!(first["name"], "ada");
        assert_eq!(first["score"], 7);
        assert_eq!(first["date"], "2024-03-14T15:09:26Z");
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_file_loads_empty() {
        let path = unique_test_path("missing");
        // Deliberately do not create the file.
        assert!(HighScoreStore::new(&path).load().is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(HighScoreStore::new(&path).load().is_empty());
        cleanup_test_path(&path);
    }

    #[test]
    fn oversized_file_is_normalized_on_load() {
        let path = unique_test_path("oversized");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        let unsorted: Vec<_> = [1, 8, 3, 9, 2, 7, 5].into_iter().map(|s| entry("p", s)).collect();
        fs::write(&path, serde_json::to_string(&unsorted).expect("encode"))
            .expect("test file write should succeed");

        let table = HighScoreStore::new(&path).load();

        assert_eq!(scores(&table), vec![9, 8, 7, 5, 3]);
        cleanup_test_path(&path);
    }

    #[test]
    fn record_and_reset() {
        let path = unique_test_path("record");
        let store = HighScoreStore::new(&path);

        store.record(entry("ada", 2)).expect("record should succeed");
        let table = store.record(entry("bob", 5)).expect("record should succeed");
        assert_eq!(scores(&table), vec![5, 2]);
        assert_eq!(store.load(), table);

        let cleared = store.reset().expect("reset should succeed");
        assert!(cleared.is_empty());
        assert!(store.load().is_empty());
        cleanup_test_path(&path);
    }

    #[test]
    fn display_lists_ranked_entries() {
        let table = HighScoreTable::default()
            .append(entry("ada", 7))
            .append(entry("bob", 3));
        let rendered = table.to_string();

        assert!(rendered.starts_with("High scores\n"));
        assert!(rendered.contains(" 1. ada"));
        assert!(rendered.contains(" 2. bob"));
        assert!(rendered.contains("2024-03-14 15:09"));
        assert_eq!(HighScoreTable::default().to_string(), "No high scores yet.\n");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-score-tests")
            .join(format!("{label}-{nanos}"))
            .join("highscores.json")
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
