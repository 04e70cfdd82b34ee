use dotenv::dotenv;
use tracing::info;

use graphmirror_backend::config::settings::Settings;
use graphmirror_backend::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::new();

    if settings.database_url.is_some() {
        info!("graph database configured");
    } else {
        info!("no DATABASE_URL set, pages will render unconfigured");
    }

    let app = router(settings.clone());

    info!("Server running on http://localhost:{}", settings.port);

    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
