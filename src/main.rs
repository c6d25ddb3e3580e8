use clap::Parser;
use dotenvy::dotenv;
use file_registry::config::AppConfig;
use file_registry::infrastructure::{database, storage};
use file_registry::services::origins::OriginRegistry;
use file_registry::{AppState, create_app};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Interface to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port for the API server (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Register an allowed browser origin before starting; may be repeated
    #[arg(long = "add-origin", value_name = "ORIGIN")]
    add_origins: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "file_registry=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting File Registry...");

    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    info!(
        "🛡️  Upload limit={}KB, download link expiry={}s",
        config.max_file_size / 1024,
        config.presigned_url_expiry_secs
    );

    let db = database::setup_database(&config).await?;
    let storage_service = storage::setup_storage(&config.storage).await;

    let origin_registry = OriginRegistry::new(db.clone());
    for origin in &args.add_origins {
        if origin_registry.add(origin).await? {
            info!("🌐 Registered origin {}", origin);
        } else {
            info!("🌐 Origin {} already registered", origin);
        }
    }

    let origins = origin_registry.list().await?;
    if origins.is_empty() {
        warn!("🌐 No allowed origins registered");
    } else {
        info!("🌐 Allowed origins: {}", origins.join(", "));
    }

    let state = AppState::new(db, storage_service, origins, config.clone());

    let app = create_app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("✅ API Server listening on: http://{}", addr);
    info!("📖 Swagger UI documentation: http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🛑 Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("⌨️  Ctrl+C received, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("💤 SIGTERM received, starting graceful shutdown...");
        },
    }
}
