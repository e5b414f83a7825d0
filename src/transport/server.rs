use tokio::net::TcpListener;
use tracing::info;

use crate::broker::SharedBroker;
use crate::config::Settings;
use crate::transport::routes::create_router;
use crate::transport::state::AppState;
use crate::utils::error::ServerError;

/// Binds `settings.server` and serves pages, push endpoints and the cable.
pub async fn start_server(settings: Settings, broker: SharedBroker) -> Result<(), ServerError> {
    // reject a bad mount path before taking the port
    let addr = settings.bind_addr();
    let mount_path = settings.cable.mount_path.clone();
    let router = create_router(AppState::new(settings, broker))?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!("Listening on http://{addr} (cable at ws://{addr}{mount_path})");

    axum::serve(listener, router)
        .await
        .map_err(ServerError::Serve)
}

/// Serves on an already bound listener.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), ServerError> {
    axum::serve(listener, create_router(state)?)
        .await
        .map_err(ServerError::Serve)
}
