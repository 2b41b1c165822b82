//! Roster storage interface and implementations
//!
//! Players and their rating history live behind [`RosterStore`] so the
//! service never touches shared global state.

use crate::error::{Result, RosterError};
use crate::types::{Player, PlayerId, RatingRecord};
use crate::utils::same_email;
use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

/// Trait for roster storage operations
pub trait RosterStore: Send + Sync {
    /// Get a player by id
    fn get_player(&self, player_id: &PlayerId) -> Result<Option<Player>>;

    /// Find a player by email, ignoring case
    fn find_by_email(&self, email: &str) -> Result<Option<Player>>;

    /// Insert a new player; fails with `DuplicatePlayer` if another player
    /// already uses the same email. The check and insert are atomic.
    fn insert_player(&self, player: Player) -> Result<()>;

    /// Apply `update` to a stored player while holding the write lock.
    /// Fails with `DuplicatePlayer` if the update takes another player's email.
    fn update_player(
        &self,
        player_id: &PlayerId,
        update: &mut dyn FnMut(&mut Player) -> Result<()>,
    ) -> Result<Player>;

    /// Remove a player; returns whether one was removed
    fn remove_player(&self, player_id: &PlayerId) -> Result<bool>;

    /// All players, in no particular order
    fn list_players(&self) -> Result<Vec<Player>>;

    /// Append a submitted rating to the history
    fn append_record(&self, record: RatingRecord) -> Result<()>;

    /// Rating history, oldest first
    fn records(&self) -> Result<Vec<RatingRecord>>;

    /// Get total number of players
    fn player_count(&self) -> Result<usize>;
}

/// In-memory roster storage implementation
#[derive(Debug)]
pub struct InMemoryRosterStore {
    players: RwLock<HashMap<PlayerId, Player>>,
    history: RwLock<VecDeque<RatingRecord>>,
    max_history_entries: usize,
}

impl InMemoryRosterStore {
    /// Create a new in-memory roster store
    pub fn new(max_history_entries: usize) -> Self {
        Self {
            players: RwLock::new(HashMap::new()),
            history: RwLock::new(VecDeque::new()),
            max_history_entries,
        }
    }
}

impl Default for InMemoryRosterStore {
    fn default() -> Self {
        Self::new(10000) // Default to 10,000 history records
    }
}

fn lock_error(what: &str) -> anyhow::Error {
    RosterError::InternalError {
        message: format!("Failed to acquire {} lock", what),
    }
    .into()
}

/// Fails if a player other than `owner` already uses `email`
fn ensure_email_free(
    players: &HashMap<PlayerId, Player>,
    email: &str,
    owner: &PlayerId,
) -> Result<()> {
    let taken = players
        .values()
        .any(|other| &other.id != owner && same_email(&other.email, email));
    if taken {
        return Err(RosterError::DuplicatePlayer {
            email: email.trim().to_string(),
        }
        .into());
    }
    Ok(())
}

impl RosterStore for InMemoryRosterStore {
    fn get_player(&self, player_id: &PlayerId) -> Result<Option<Player>> {
        let players = self.players.read().map_err(|_| lock_error("players read"))?;

        Ok(players.get(player_id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Player>> {
        let players = self.players.read().map_err(|_| lock_error("players read"))?;

        Ok(players
            .values()
            .find(|player| same_email(&player.email, email))
            .cloned())
    }

    fn insert_player(&self, player: Player) -> Result<()> {
        let mut players = self
            .players
            .write()
            .map_err(|_| lock_error("players write"))?;

        ensure_email_free(&players, &player.email, &player.id)?;
        players.insert(player.id.clone(), player);
        Ok(())
    }

    fn update_player(
        &self,
        player_id: &PlayerId,
        update: &mut dyn FnMut(&mut Player) -> Result<()>,
    ) -> Result<Player> {
        let mut players = self
            .players
            .write()
            .map_err(|_| lock_error("players write"))?;

        // Work on a copy so a failed update leaves the stored player untouched
        let mut updated = players
            .get(player_id)
            .cloned()
            .ok_or_else(|| RosterError::PlayerNotFound {
                player_id: player_id.clone(),
            })?;
        update(&mut updated)?;
        ensure_email_free(&players, &updated.email, player_id)?;

        players.insert(player_id.clone(), updated.clone());
        Ok(updated)
    }

    fn remove_player(&self, player_id: &PlayerId) -> Result<bool> {
        let mut players = self
            .players
            .write()
            .map_err(|_| lock_error("players write"))?;

        Ok(players.remove(player_id).is_some())
    }

    fn list_players(&self) -> Result<Vec<Player>> {
        let players = self.players.read().map_err(|_| lock_error("players read"))?;

        Ok(players.values().cloned().collect())
    }

    fn append_record(&self, record: RatingRecord) -> Result<()> {
        let mut history = self
            .history
            .write()
            .map_err(|_| lock_error("history write"))?;

        history.push_back(record);
        while history.len() > self.max_history_entries {
            history.pop_front();
        }

        Ok(())
    }

    fn records(&self) -> Result<Vec<RatingRecord>> {
        let history = self.history.read().map_err(|_| lock_error("history read"))?;

        Ok(history.iter().cloned().collect())
    }

    fn player_count(&self) -> Result<usize> {
        let players = self.players.read().map_err(|_| lock_error("players read"))?;

        Ok(players.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlayerRatingInput, Position};
    use crate::utils::{current_timestamp, generate_rating_id};

    fn create_test_player(id: &str, email: &str) -> Player {
        Player {
            id: id.to_string(),
            name: format!("Player {}", id),
            email: email.to_string(),
            position: Position::CentralMidfielder,
            bio: None,
            ratings: HashMap::new(),
            overall_rating: None,
            created_at: current_timestamp(),
        }
    }

    fn create_test_record(player_id: &str, overall: i32) -> RatingRecord {
        RatingRecord {
            id: generate_rating_id(),
            rater_email: "rater@example.com".to_string(),
            player_id: player_id.to_string(),
            player_name: "Someone".to_string(),
            position: Position::Striker,
            overall_rating: overall,
            ratings: PlayerRatingInput::default(),
            timestamp: current_timestamp(),
        }
    }

    #[test]
    fn test_in_memory_store_basic_operations() {
        let store = InMemoryRosterStore::new(100);
        let player = create_test_player("p1", "john@example.com");

        assert!(store.get_player(&"p1".to_string()).unwrap().is_none());

        store.insert_player(player).unwrap();

        let retrieved = store.get_player(&"p1".to_string()).unwrap().unwrap();
        assert_eq!(retrieved.email, "john@example.com");
        assert_eq!(store.player_count().unwrap(), 1);
    }

    #[test]
    fn test_find_by_email_ignores_case() {
        let store = InMemoryRosterStore::new(100);
        store
            .insert_player(create_test_player("p1", "John@Example.com"))
            .unwrap();

        let found = store.find_by_email("john@example.COM").unwrap().unwrap();
        assert_eq!(found.id, "p1");
        assert!(store.find_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn test_update_player() {
        let store = InMemoryRosterStore::new(100);
        store
            .insert_player(create_test_player("p1", "john@example.com"))
            .unwrap();

        let updated = store
            .update_player(&"p1".to_string(), &mut |player| {
                player.position = Position::Striker;
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.position, Position::Striker);
        assert_eq!(
            store
                .get_player(&"p1".to_string())
                .unwrap()
                .unwrap()
                .position,
            Position::Striker
        );
    }

    #[test]
    fn test_failed_update_leaves_player_untouched() {
        let store = InMemoryRosterStore::new(100);
        store
            .insert_player(create_test_player("p1", "john@example.com"))
            .unwrap();

        let result = store.update_player(&"p1".to_string(), &mut |player| {
            player.name = "Changed".to_string();
            Err(anyhow::anyhow!("rejected"))
        });
        assert!(result.is_err());
        assert_eq!(
            store.get_player(&"p1".to_string()).unwrap().unwrap().name,
            "Player p1"
        );
    }

    #[test]
    fn test_insert_rejects_duplicate_email() {
        let store = InMemoryRosterStore::new(100);
        store
            .insert_player(create_test_player("p1", "élodie@example.com"))
            .unwrap();

        let err = store
            .insert_player(create_test_player("p2", " ÉLODIE@example.com"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RosterError>(),
            Some(RosterError::DuplicatePlayer { .. })
        ));
        assert_eq!(store.player_count().unwrap(), 1);
    }

    #[test]
    fn test_update_cannot_take_another_players_email() {
        let store = InMemoryRosterStore::new(100);
        store
            .insert_player(create_test_player("p1", "john@example.com"))
            .unwrap();
        store
            .insert_player(create_test_player("p2", "david@example.com"))
            .unwrap();

        let err = store
            .update_player(&"p2".to_string(), &mut |player| {
                player.email = "JOHN@example.com".to_string();
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RosterError>(),
            Some(RosterError::DuplicatePlayer { .. })
        ));
        assert_eq!(
            store.get_player(&"p2".to_string()).unwrap().unwrap().email,
            "david@example.com"
        );

        // Keeping your own email is fine
        store
            .update_player(&"p1".to_string(), &mut |player| {
                player.email = "John@Example.com".to_string();
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_update_missing_player() {
        let store = InMemoryRosterStore::new(100);
        let err = store
            .update_player(&"ghost".to_string(), &mut |_| Ok(()))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RosterError>(),
            Some(RosterError::PlayerNotFound { .. })
        ));
    }

    #[test]
    fn test_player_removal() {
        let store = InMemoryRosterStore::new(100);
        store
            .insert_player(create_test_player("p1", "john@example.com"))
            .unwrap();

        assert!(store.remove_player(&"p1".to_string()).unwrap());
        assert!(store.get_player(&"p1".to_string()).unwrap().is_none());

        // Removing non-existent player should return false
        assert!(!store.remove_player(&"nonexistent".to_string()).unwrap());
    }

    #[test]
    fn test_history_is_bounded() {
        let store = InMemoryRosterStore::new(2);
        for overall in [70, 80, 90] {
            store.append_record(create_test_record("p1", overall)).unwrap();
        }

        let records = store.records().unwrap();
        assert_eq!(records.len(), 2);
        // Oldest record is dropped first
        assert_eq!(records[0].overall_rating, 80);
        assert_eq!(records[1].overall_rating, 90);
    }
}
