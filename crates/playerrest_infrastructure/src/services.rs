use std::sync::Arc;

use axum::extract::FromRef;

use playerrest_interface::players::service::PlayersServiceHandle;
use playerrest_interface::players::store::PlayerStoreHandle;

pub mod players_service;

use players_service::CatalogPlayersService;

#[derive(FromRef, Clone)]
pub struct ServiceRegistry {
    pub players_service: PlayersServiceHandle,
}

impl ServiceRegistry {
    pub fn new(store: PlayerStoreHandle) -> Self {
        let players_service = Arc::new(CatalogPlayersService::new(store));

        Self { players_service }
    }
}
