use anyhow::Context;
use clap::Parser;
use learnflow::{api, AppState, Config};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

#[derive(Parser)]
#[command(name = "learnflow-gateway", version, about)]
struct Cli {
    /// Bind address, overriding HOST from the environment
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overriding PORT from the environment
    #[arg(long)]
    port: Option<u16>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::tutor::tutor,
        api::handlers::execute::execute,
        api::handlers::agents::list_agents,
        api::handlers::agents::health,
    ),
    info(
        title = "LearnFlow Tutor Gateway",
        description = "Routes learner messages to specialized tutoring agents"
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "learnflow_gateway=info,learnflow=info,tower_http=info",
                )
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    if config.fallback.api_key.is_none() {
        tracing::warn!("no fallback model credential configured; failures will degrade to the static response");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(config);

    let app = api::routes::create_router()
        .route("/api/openapi.json", axum::routing::get(openapi))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    tracing::info!(%addr, "starting tutor gateway");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

async fn openapi() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}
