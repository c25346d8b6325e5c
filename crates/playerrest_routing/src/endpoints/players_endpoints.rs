use axum::extract::{Json, Path, Query, State};
use axum::routing::get;
use axum::Router;

use playerrest_infrastructure::services::ServiceRegistry;

use playerrest_interface::errors::Result;
use playerrest_interface::players::model::{PageQuery, Player, PlayerFilter, PlayerParams};
use playerrest_interface::players::service::PlayersServiceHandle;

pub struct PlayersRouter;

impl PlayersRouter {
    pub fn new(service_registry: ServiceRegistry) -> Router {
        Router::new()
            .route(
                "/players",
                get(Self::list_players).post(Self::create_player),
            )
            .route("/players/count", get(Self::count_players))
            .route(
                "/players/:id",
                get(Self::get_player)
                    .post(Self::update_player)
                    .delete(Self::delete_player),
            )
            .with_state(service_registry)
    }

    async fn list_players(
        State(players_service): State<PlayersServiceHandle>,
        Query(filter): Query<PlayerFilter>,
        Query(page): Query<PageQuery>,
    ) -> Result<Json<Vec<Player>>> {
        players_service.list_players(filter, page).await.map(Json)
    }

    async fn count_players(
        State(players_service): State<PlayersServiceHandle>,
        Query(filter): Query<PlayerFilter>,
    ) -> Result<Json<u64>> {
        players_service.count_players(filter).await.map(Json)
    }

    async fn get_player(
        State(players_service): State<PlayersServiceHandle>,
        Path(id): Path<u64>,
    ) -> Result<Json<Player>> {
        players_service.get_player(id).await.map(Json)
    }

    async fn create_player(
        State(players_service): State<PlayersServiceHandle>,
        Json(body): Json<PlayerParams>,
    ) -> Result<Json<Player>> {
        players_service.create_player(body).await.map(Json)
    }

    async fn update_player(
        State(players_service): State<PlayersServiceHandle>,
        Path(id): Path<u64>,
        Json(body): Json<PlayerParams>,
    ) -> Result<Json<Player>> {
        players_service.update_player(id, body).await.map(Json)
    }

    async fn delete_player(
        State(players_service): State<PlayersServiceHandle>,
        Path(id): Path<u64>,
    ) -> Result<()> {
        players_service.delete_player(id).await
    }
}
