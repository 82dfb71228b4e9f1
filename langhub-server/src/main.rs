use langhub_server::utils::logger::init_logger;
use langhub_server::{AppState, Config, api};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();
    init_logger();

    let config = Config::from_env()?;
    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "starting langhub server"
    );

    let state = AppState::new(&config).await?;
    let app = api::build_app(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
