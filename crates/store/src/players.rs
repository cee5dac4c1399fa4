use crate::{LoadState, Loader, PlayerRecord, ResourceBackend, RetryPolicy};
use bataille_core::PlayerId;
use std::collections::HashMap;

/// Read-only roster of known players, loaded once per session.
#[derive(Debug)]
pub struct PlayerStore<B> {
    backend: B,
    loader: Loader<PlayerRecord>,
}

impl<B: ResourceBackend<PlayerRecord>> PlayerStore<B> {
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

    pub fn players(&self) -> &[PlayerRecord] {
        self.loader.data()
    }

    pub fn by_id(&self) -> HashMap<PlayerId, &PlayerRecord> {
        self.players()
            .iter()
            .map(|player| (player.id, player))
            .collect()
    }

    pub fn name_of(&self, id: PlayerId) -> Option<&str> {
        self.players()
            .iter()
            .find(|player| player.id == id)
            .map(|player| player.name.as_str())
    }

    /// Roster entries one seat may still pick: everyone but the opponent.
    pub fn available(&self, taken: Option<PlayerId>) -> Vec<&PlayerRecord> {
        self.players()
            .iter()
            .filter(|player| Some(player.id) != taken)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;

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

    fn loaded_store() -> PlayerStore<FixedRoster> {
        let mut store = PlayerStore::new(FixedRoster, RetryPolicy::immediate(0));
        store.load();
        store
    }

    #[test]
    fn lookup_by_id_and_name() {
        let store = loaded_store();
        assert_eq!(store.name_of(1), Some("Alice"));
        assert_eq!(store.name_of(3), None);
        assert_eq!(store.by_id().get(&2).map(|p| p.name.as_str()), Some("Bob"));
    }

    #[test]
    fn available_excludes_the_opponent_pick() {
        let store = loaded_store();
        let left: Vec<PlayerId> = store
            .available(Some(1))
            .into_iter()
            .map(|player| player.id)
            .collect();
        assert_eq!(left, vec![2]);
        assert_eq!(store.available(None).len(), 2);
    }
}
