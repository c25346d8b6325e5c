use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::players::model::{Player, PlayerDraft};

/// Storage collaborator contract. The store owns id assignment and whatever
/// consistency exists between concurrent callers; the catalog service adds
/// no locking of its own.
#[async_trait]
pub trait PlayerStore {
    /// Persists a new record and assigns its id (ids start at 1).
    async fn insert(&self, draft: PlayerDraft) -> Result<Player>;

    async fn find_by_id(&self, id: u64) -> Result<Option<Player>>;

    async fn exists(&self, id: u64) -> Result<bool>;

    /// Full, unordered enumeration.
    async fn find_all(&self) -> Result<Vec<Player>>;

    /// Write-back for an already stored record, keyed by `player.id`.
    async fn save(&self, player: &Player) -> Result<Player>;

    async fn delete_by_id(&self, id: u64) -> Result<()>;
}

pub type PlayerStoreHandle = Arc<dyn PlayerStore + Send + Sync>;
