//! Channel Synchronization
//!
//! Binds a scoreboard to one store channel. Inbound snapshots are
//! rehydrated only when their digest changes, so repeated or replayed
//! reads are harmless. Each local mutation is applied to the scoreboard
//! and written as a single batch.

use tracing::{debug, info};

use crate::core::hash::{short_hex, snapshot_digest, StateHash};
use crate::core::player::Team;
use crate::game::events::EditOutcome;
use crate::game::rotation::ServeConfiguration;
use crate::game::scoreboard::Scoreboard;
use crate::sync::batch::WriteBatch;
use crate::sync::error::{StoreError, SyncError};
use crate::sync::snapshot::rehydrate;
use crate::sync::store::MatchStore;

/// A scoreboard's link to a store channel.
pub struct ChannelSync<S: MatchStore> {
    store: S,
    channel: String,
    last_digest: Option<StateHash>,
}

impl<S: MatchStore> ChannelSync<S> {
    /// Create a sync handle for `channel`.
    pub fn new(store: S, channel: impl Into<String>) -> Self {
        Self {
            store,
            channel: channel.into(),
            last_digest: None,
        }
    }

    /// Channel name.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read and rehydrate the channel unconditionally.
    pub fn load(&mut self) -> Result<Scoreboard, StoreError> {
        let snapshot = self.store.read(&self.channel)?;
        let digest = snapshot_digest(&snapshot);
        self.last_digest = Some(digest);
        info!(channel = %self.channel, digest = %short_hex(&digest), "channel loaded");
        Ok(rehydrate(&snapshot))
    }

    /// Read the channel, returning a scoreboard only if it changed since
    /// the last load or refresh.
    pub fn refresh(&mut self) -> Result<Option<Scoreboard>, StoreError> {
        let snapshot = self.store.read(&self.channel)?;
        let digest = snapshot_digest(&snapshot);
        if self.last_digest == Some(digest) {
            return Ok(None);
        }
        debug!(channel = %self.channel, digest = %short_hex(&digest), "snapshot changed");
        self.last_digest = Some(digest);
        Ok(Some(rehydrate(&snapshot)))
    }

    /// Write a batch to this channel.
    pub fn commit(&self, batch: &WriteBatch) -> Result<(), StoreError> {
        debug!(channel = %self.channel, paths = batch.len(), "committing batch");
        self.store.write(batch)
    }

    /// Write the complete scoreboard.
    pub fn publish(&self, board: &Scoreboard) -> Result<(), StoreError> {
        self.commit(&WriteBatch::full(self.channel.clone(), board))
    }

    /// Edit a set score and persist the score with the event history.
    pub fn edit_score(
        &self,
        board: &mut Scoreboard,
        team: Team,
        set: u8,
        new_score: u32,
    ) -> Result<EditOutcome, SyncError> {
        let outcome = board.edit_score(team, set, new_score)?;
        self.commit(&WriteBatch::for_score_edit(self.channel.clone(), board, team, set))?;
        Ok(outcome)
    }

    /// Edit a squad score and persist it with the event history.
    pub fn edit_squad_score(
        &self,
        board: &mut Scoreboard,
        team: Team,
        new_score: u32,
    ) -> Result<EditOutcome, SyncError> {
        let outcome = board.edit_squad_score(team, new_score);
        self.commit(&WriteBatch::for_squad_edit(self.channel.clone(), board, team))?;
        Ok(outcome)
    }

    /// Move the active set and persist it with the event history.
    pub fn change_set(&self, board: &mut Scoreboard, delta: i32) -> Result<u8, SyncError> {
        let set = board.change_set(delta);
        self.commit(&WriteBatch::for_set_change(self.channel.clone(), board))?;
        Ok(set)
    }

    /// Choose a set's starting server and receiver and persist them.
    pub fn set_serve_configuration(
        &self,
        board: &mut Scoreboard,
        set: u8,
        config: ServeConfiguration,
    ) -> Result<(), SyncError> {
        board.set_serve_configuration(set, config)?;
        self.commit(&WriteBatch::for_serve_configuration(self.channel.clone(), board, set))?;
        Ok(())
    }

    /// Reset the match and persist every path.
    pub fn reset(&self, board: &mut Scoreboard) -> Result<(), SyncError> {
        board.reset();
        self.publish(board)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::Player;
    use crate::game::settings::GameSettings;
    use crate::sync::store::MemoryStore;

    fn setup() -> (ChannelSync<MemoryStore>, Scoreboard) {
        let sync = ChannelSync::new(MemoryStore::new(), "court-1");
        let board = Scoreboard::new(GameSettings::default()).unwrap();
        sync.publish(&board).unwrap();
        (sync, board)
    }

    #[test]
    fn test_edits_round_trip_through_store() {
        let (mut sync, mut board) = setup();
        sync.set_serve_configuration(&mut board, 1, ServeConfiguration::new(Player::A1, Player::B2))
            .unwrap();
        sync.edit_score(&mut board, Team::A, 1, 1).unwrap();
        sync.edit_score(&mut board, Team::B, 1, 1).unwrap();
        sync.edit_squad_score(&mut board, Team::B, 2).unwrap();
        sync.change_set(&mut board, 1).unwrap();

        let loaded = sync.load().unwrap();
        assert_eq!(loaded, board);
    }

    #[test]
    fn test_refresh_skips_unchanged_snapshot() {
        let (mut sync, mut board) = setup();
        assert!(sync.refresh().unwrap().is_some());
        assert!(sync.refresh().unwrap().is_none());

        sync.edit_score(&mut board, Team::A, 1, 1).unwrap();
        let refreshed = sync.refresh().unwrap().unwrap();
        assert_eq!(refreshed.state().scores(1), (1, 0));
        assert!(sync.refresh().unwrap().is_none());
    }

    #[test]
    fn test_rejected_edit_writes_nothing() {
        let (mut sync, mut board) = setup();
        sync.load().unwrap();
        let result = sync.edit_score(&mut board, Team::A, 9, 1);
        assert!(matches!(result, Err(SyncError::Scoreboard(_))));
        assert!(sync.refresh().unwrap().is_none());
    }

    #[test]
    fn test_reset_publishes_cleared_board() {
        let (mut sync, mut board) = setup();
        sync.edit_score(&mut board, Team::A, 1, 5).unwrap();
        sync.reset(&mut board).unwrap();
        let loaded = sync.load().unwrap();
        assert_eq!(loaded.state().scores(1), (0, 0));
        assert_eq!(loaded.score_history(1).count(), 0);
        assert_eq!(loaded.log().len(), 2);
    }
}
