use crate::{GameRecord, PlayerRecord, ResourceBackend, ScoreEntry, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const PLAYERS_FILE: &str = "players.json";
pub const GAMES_FILE: &str = "games.json";

pub fn default_store_dir() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("BATAILLE_DIR") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".bataille"))
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let body = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&body)?)
}

fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(records)?;
    fs::write(path, body)?;
    Ok(())
}

/// Roster file. Reference data, so a missing file is an error rather than an
/// empty roster.
#[derive(Debug, Clone)]
pub struct PlayersFile {
    path: PathBuf,
}

impl PlayersFile {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(PLAYERS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResourceBackend<PlayerRecord> for PlayersFile {
    fn fetch_all(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        read_records(&self.path)
    }
}

/// Game history file. Starts out absent; reads as empty until the first save.
#[derive(Debug, Clone)]
pub struct GamesFile {
    path: PathBuf,
}

impl GamesFile {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(GAMES_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one finished game, assigning the next free id. Read-modify-
    /// write of the whole file; fine for a history this size.
    pub fn append(&self, scores: Vec<ScoreEntry>) -> Result<GameRecord, StoreError> {
        let mut records: Vec<GameRecord> = if self.path.exists() {
            read_records(&self.path)?
        } else {
            Vec::new()
        };
        let id = records.iter().map(|record| record.id).max().unwrap_or(0) + 1;
        let record = GameRecord { id, scores };
        records.push(record.clone());
        write_records(&self.path, &records)?;
        Ok(record)
    }
}

impl ResourceBackend<GameRecord> for GamesFile {
    fn fetch_all(&self) -> Result<Vec<GameRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        read_records(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "bataille_store_test_{}_{}",
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn games_file_roundtrip_assigns_increasing_ids() {
        let dir = unique_temp_dir();
        let file = GamesFile::new(&dir);
        let first = file
            .append(vec![
                ScoreEntry {
                    player_id: 1,
                    score: 2,
                },
                ScoreEntry {
                    player_id: 2,
                    score: 0,
                },
            ])
            .expect("append");
        let second = file
            .append(vec![
                ScoreEntry {
                    player_id: 1,
                    score: 1,
                },
                ScoreEntry {
                    player_id: 2,
                    score: 1,
                },
            ])
            .expect("append");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let loaded = file.fetch_all().expect("fetch");
        assert_eq!(loaded, vec![first, second]);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_games_file_reads_as_empty() {
        let dir = unique_temp_dir();
        let file = GamesFile::new(&dir);
        assert!(file.fetch_all().expect("fetch").is_empty());
    }

    #[test]
    fn missing_players_file_is_an_error() {
        let dir = unique_temp_dir();
        let file = PlayersFile::new(&dir);
        assert!(file.fetch_all().is_err());
    }

    #[test]
    fn players_file_parses_roster_records() {
        let dir = unique_temp_dir();
        fs::create_dir_all(&dir).expect("mkdir");
        let body = r#"[{"id":1,"name":"Alice"},{"id":2,"name":"Bob"}]"#;
        fs::write(dir.join(PLAYERS_FILE), body).expect("write");
        let file = PlayersFile::new(&dir);
        let players = file.fetch_all().expect("fetch");
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Alice");
        let _ = fs::remove_dir_all(dir);
    }
}
