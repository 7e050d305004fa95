use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fake_oauth2::{server_router, Route, ServerConfig};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "fake-oauth2")]
#[command(about = "Fake OAuth2 authorization server for local development and tests")]
struct Cli {
    /// Port to listen on
    #[arg(long, default_value_t = 8080, env = "FAKE_OAUTH2_PORT")]
    port: u16,

    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0", env = "FAKE_OAUTH2_BIND")]
    bind: String,

    /// OAuth2 callback URL of the client under test
    #[arg(long, env = "FAKE_OAUTH2_CALLBACK_URL")]
    callback_url: Option<Url>,

    /// Access token lifetime in seconds
    #[arg(long, env = "FAKE_OAUTH2_ACCESS_TOKEN_LIFETIME")]
    access_token_lifetime: Option<u64>,

    /// Optional JSON config file (flags take precedence)
    #[arg(long, env = "FAKE_OAUTH2_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long)]
    no_color: bool,
}

const DEFAULT_CALLBACK_URL: &str = "http://localhost:8000/auth/callback";

impl Cli {
    fn server_config(&self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };

        if let Some(url) = &self.callback_url {
            config.callback_url = Some(url.clone());
        }
        if config.callback_url.is_none() {
            config.callback_url = Some(Url::parse(DEFAULT_CALLBACK_URL)?);
        }
        if let Some(secs) = self.access_token_lifetime {
            config.access_token_lifetime = secs;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fake_oauth2=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_ansi(!cli.no_color))
        .init();

    let config = cli.server_config()?;
    let callback_url = config
        .callback_url
        .as_ref()
        .map(Url::to_string)
        .unwrap_or_default();

    let app = server_router(Some(config)).context("Invalid server configuration")?;

    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port)
        .parse()
        .with_context(|| format!("Invalid bind address: {}:{}", cli.bind, cli.port))?;
    let base_url = format!("http://localhost:{}", cli.port);

    tracing::info!("My OAuth2 authorize URL is {}", Route::Authorize.url(&base_url));
    tracing::info!("My OAuth2 token URL is {}", Route::Token.url(&base_url));
    tracing::info!("Your client's callback URL is {}", callback_url);
    tracing::info!("To change settings, call me with the --help flag");
    tracing::info!("Starting fake OAuth2 server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Fake OAuth2 server shut down");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
