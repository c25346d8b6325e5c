use std::net::SocketAddr;

use axum::Router;

use playerrest_infrastructure::services::ServiceRegistry;
use playerrest_infrastructure::settings::Settings;
use tower_http::trace::TraceLayer;

use crate::endpoints::players_endpoints::PlayersRouter;
use crate::logger;

pub struct ApplicationController;

impl ApplicationController {
    pub async fn run(settings: Settings, service_registry: ServiceRegistry) {
        logger::setup(&settings.logger.level);

        let router: Router = Router::new()
            .nest("/rest", PlayersRouter::new(service_registry))
            // logging so we can see whats going on
            .layer(TraceLayer::new_for_http());

        let listener =
            tokio::net::TcpListener::bind(&format!("127.0.0.1:{}", settings.server.port))
                .await
                .expect("Could not start the TCP listener");

        tracing::info!("listening on {}", settings.server);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Failed to start the server");
    }
}
