use screening_backend::{
    config::{get_config, init_config},
    database::pool::{create_pool, run_migrations},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool(config).await?;
    run_migrations(&pool).await?;

    tokio::fs::create_dir_all(&config.media_root).await?;
    info!(
        "Serving media from {} at {}",
        config.media_root.display(),
        config.media_url
    );
    if config.admin_save_mode == screening_backend::services::answer_codec::SaveMode::Merge {
        info!("Admin saves keep answers the form does not edit");
    }

    let app = routes::app(AppState::new(pool, config.clone()));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
