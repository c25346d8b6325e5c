use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use playerrest_interface::errors::{AppError, Result};
use playerrest_interface::players::model::{Player, PlayerDraft};
use playerrest_interface::players::store::PlayerStore;

/// Process-local store. A single lock serializes all access, which is the
/// consistency guarantee the catalog service relies on.
#[derive(Default, Clone)]
pub struct InMemoryPlayerStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    players: BTreeMap<u64, Player>,
    last_id: u64,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreInner>> {
        self.inner
            .read()
            .map_err(|e| AppError::StoreError { msg: e.to_string() })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreInner>> {
        self.inner
            .write()
            .map_err(|e| AppError::StoreError { msg: e.to_string() })
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    async fn insert(&self, draft: PlayerDraft) -> Result<Player> {
        let mut inner = self.write()?;

        inner.last_id += 1;
        let player = draft.into_player(inner.last_id);
        inner.players.insert(player.id, player.clone());

        Ok(player)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Player>> {
        Ok(self.read()?.players.get(&id).cloned())
    }

    async fn exists(&self, id: u64) -> Result<bool> {
        Ok(self.read()?.players.contains_key(&id))
    }

    async fn find_all(&self) -> Result<Vec<Player>> {
        Ok(self.read()?.players.values().cloned().collect())
    }

    async fn save(&self, player: &Player) -> Result<Player> {
        let mut inner = self.write()?;

        if !inner.players.contains_key(&player.id) {
            return Err(AppError::StoreError {
                msg: format!("cannot save player {}: not inserted", player.id),
            });
        }
        inner.players.insert(player.id, player.clone());

        Ok(player.clone())
    }

    async fn delete_by_id(&self, id: u64) -> Result<()> {
        self.write()?.players.remove(&id);
        Ok(())
    }
}
