use std::sync::Arc;

use playerrest_infrastructure::{
    services::ServiceRegistry, settings::Settings, stores::InMemoryPlayerStore,
};

use playerrest_routing::router::ApplicationController;

#[tokio::main]
async fn main() {
    let settings = Settings::new().expect("Could not parse settings");

    let store = Arc::new(InMemoryPlayerStore::new());
    let services = ServiceRegistry::new(store);

    ApplicationController::run(settings, services).await;
}
