use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::players::model::{PageQuery, Player, PlayerFilter, PlayerParams};

#[async_trait]
pub trait PlayersService {
    /// Filtered, sorted, paginated listing.
    async fn list_players(&self, filter: PlayerFilter, page: PageQuery) -> Result<Vec<Player>>;

    /// Size of the result set for the same filter conjunction as `list_players`.
    async fn count_players(&self, filter: PlayerFilter) -> Result<u64>;

    async fn get_player(&self, id: u64) -> Result<Player>;

    /// Validates all fields, computes the derived level fields and persists.
    async fn create_player(&self, params: PlayerParams) -> Result<Player>;

    /// Partial update: only supplied fields change. All supplied fields are
    /// validated before any mutation is persisted.
    async fn update_player(&self, id: u64, params: PlayerParams) -> Result<Player>;

    async fn delete_player(&self, id: u64) -> Result<()>;
}

pub type PlayersServiceHandle = Arc<dyn PlayersService + Send + Sync>;
