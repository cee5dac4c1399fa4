use crate::{
    GameRecord, GameSummary, GamesFile, LoadState, Loader, PlayerRecord, PlayerStore,
    ResourceBackend, RetryPolicy, ScoreEntry, ScoreLine, StoreError,
};

/// Write side of the history. Appending assigns the record id.
pub trait GameSink {
    fn append(&self, scores: Vec<ScoreEntry>) -> Result<GameRecord, StoreError>;
}

impl GameSink for GamesFile {
    fn append(&self, scores: Vec<ScoreEntry>) -> Result<GameRecord, StoreError> {
        GamesFile::append(self, scores)
    }
}

/// History of persisted games plus the save path for finishing one.
#[derive(Debug)]
pub struct GameStore<B> {
    backend: B,
    loader: Loader<GameRecord>,
}

impl<B: ResourceBackend<GameRecord>> GameStore<B> {
    pub fn new(backend: B, policy: RetryPolicy) -> Self {
        Self {
            backend,
            loader: Loader::new(policy),
        }
    }

    pub fn load(&mut self) {
        self.loader.load(&self.backend);
    }

    pub fn state(&self) -> LoadState {
        self.loader.state()
    }

    pub fn error(&self) -> Option<&str> {
        self.loader.error()
    }

    pub fn games(&self) -> &[GameRecord] {
        self.loader.data()
    }

    /// History rows are joined with roster names, so the history does not
    /// count as loaded until the roster is.
    pub fn combined_state(&self, roster: LoadState) -> LoadState {
        if roster != LoadState::Loaded && self.loader.state() == LoadState::Loaded {
            LoadState::Loading
        } else {
            self.loader.state()
        }
    }

    /// Records joined with player names and a winner mark per line, most
    /// recent game first. A shared top score marks every holder as winner.
    pub fn summaries<R: ResourceBackend<PlayerRecord>>(
        &self,
        roster: &PlayerStore<R>,
    ) -> Vec<GameSummary> {
        if self.combined_state(roster.state()) != LoadState::Loaded {
            return Vec::new();
        }
        let names = roster.by_id();
        let mut summaries: Vec<GameSummary> = self
            .games()
            .iter()
            .map(|record| {
                let top = record.scores.iter().map(|entry| entry.score).max();
                GameSummary {
                    id: record.id,
                    scores: record
                        .scores
                        .iter()
                        .map(|entry| ScoreLine {
                            player_id: entry.player_id,
                            player_name: names
                                .get(&entry.player_id)
                                .map(|player| player.name.clone())
                                .unwrap_or_default(),
                            score: entry.score,
                            winner: Some(entry.score) == top,
                        })
                        .collect(),
                }
            })
            .collect();
        summaries.reverse();
        summaries
    }
}

impl<B: ResourceBackend<GameRecord> + GameSink> GameStore<B> {
    /// Single attempt, no retry. A failure goes straight back to the caller
    /// for display; nothing is mirrored locally in that case.
    pub fn save(&mut self, scores: Vec<ScoreEntry>) -> Result<GameRecord, StoreError> {
        let record = self.backend.append(scores)?;
        self.loader.push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct MemoryGames {
        records: RefCell<Vec<GameRecord>>,
        fail_saves: bool,
    }

    impl MemoryGames {
        fn new() -> Self {
            Self {
                records: RefCell::new(Vec::new()),
                fail_saves: false,
            }
        }
    }

    impl ResourceBackend<GameRecord> for MemoryGames {
        fn fetch_all(&self) -> Result<Vec<GameRecord>, StoreError> {
            Ok(self.records.borrow().clone())
        }
    }

    impl GameSink for MemoryGames {
        fn append(&self, scores: Vec<ScoreEntry>) -> Result<GameRecord, StoreError> {
            if self.fail_saves {
                return Err(StoreError::Io("disk full".to_string()));
            }
            let mut records = self.records.borrow_mut();
            let id = records.iter().map(|record| record.id).max().unwrap_or(0) + 1;
            let record = GameRecord { id, scores };
            records.push(record.clone());
            Ok(record)
        }
    }

    struct FixedRoster;

    impl ResourceBackend<PlayerRecord> for FixedRoster {
        fn fetch_all(&self) -> Result<Vec<PlayerRecord>, StoreError> {
            Ok(vec![
                PlayerRecord {
                    id: 1,
                    name: "Alice".to_string(),
                },
                PlayerRecord {
                    id: 2,
                    name: "Bob".to_string(),
                },
            ])
        }
    }

    fn entry(player_id: u32, score: u32) -> ScoreEntry {
        ScoreEntry { player_id, score }
    }

    #[test]
    fn save_appends_and_mirrors_into_loaded_data() {
        let mut store = GameStore::new(MemoryGames::new(), RetryPolicy::immediate(0));
        store.load();
        let record = store.save(vec![entry(1, 2), entry(2, 0)]).expect("save");
        assert_eq!(record.id, 1);
        assert_eq!(store.games(), &[record]);
    }

    #[test]
    fn failed_save_changes_nothing_locally() {
        let mut backend = MemoryGames::new();
        backend.fail_saves = true;
        let mut store = GameStore::new(backend, RetryPolicy::immediate(0));
        store.load();
        assert!(store.save(vec![entry(1, 2), entry(2, 0)]).is_err());
        assert!(store.games().is_empty());
    }

    #[test]
    fn summaries_join_names_and_mark_winners() {
        let mut roster = PlayerStore::new(FixedRoster, RetryPolicy::immediate(0));
        roster.load();
        let mut store = GameStore::new(MemoryGames::new(), RetryPolicy::immediate(0));
        store.load();
        store.save(vec![entry(1, 2), entry(2, 0)]).expect("save");
        store.save(vec![entry(1, 1), entry(2, 1)]).expect("save");

        let summaries = store.summaries(&roster);
        assert_eq!(summaries.len(), 2);
        // Most recent first; a shared top score marks both lines.
        assert_eq!(summaries[0].id, 2);
        assert!(summaries[0].scores.iter().all(|line| line.winner));
        assert_eq!(summaries[1].scores[0].player_name, "Alice");
        assert!(summaries[1].scores[0].winner);
        assert!(!summaries[1].scores[1].winner);
    }

    #[test]
    fn summaries_are_empty_until_the_roster_is_loaded() {
        let roster = PlayerStore::new(FixedRoster, RetryPolicy::immediate(0));
        let mut store = GameStore::new(MemoryGames::new(), RetryPolicy::immediate(0));
        store.load();
        store.save(vec![entry(1, 2), entry(2, 0)]).expect("save");

        assert_eq!(store.combined_state(roster.state()), LoadState::Loading);
        assert!(store.summaries(&roster).is_empty());
    }

    #[test]
    fn unknown_player_ids_get_blank_names() {
        let mut roster = PlayerStore::new(FixedRoster, RetryPolicy::immediate(0));
        roster.load();
        let mut store = GameStore::new(MemoryGames::new(), RetryPolicy::immediate(0));
        store.load();
        store.save(vec![entry(1, 2), entry(9, 0)]).expect("save");

        let summaries = store.summaries(&roster);
        assert_eq!(summaries[0].scores[1].player_name, "");
    }
}
