//! IDGM Universal API server
//!
//! `serve` runs migrations and the HTTP API, `migrate` only applies schema
//! changes, and `create-admin` provisions or promotes an administrator.

mod app;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{AppConfig, LogFormat, LoggingConfig};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "idgm-server")]
#[command(about = "IDGM Universal storefront, back-office and leasing API")]
struct Cli {
    /// YAML configuration file; `IDGM__SECTION__KEY` variables override it
    #[arg(long, global = true, default_value = "config/idgm.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply migrations and serve the HTTP API (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Create an administrator, or promote an existing account
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "Administrator")]
        name: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load(&cli.config)?;
    init_tracing(&cfg.logging)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cfg).await,
        Command::Migrate => {
            let db = app::connect(&cfg.database.url, cfg.database.max_connections).await?;
            app::migrate(&db).await?;
            tracing::info!("Migrations applied");
            Ok(())
        }
        Command::CreateAdmin {
            email,
            name,
            password,
        } => create_admin(cfg, &email, &name, &password).await,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level)
            .with_context(|| format!("invalid log level '{}'", logging.level))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init()?,
    }
    Ok(())
}

async fn serve(cfg: AppConfig) -> Result<()> {
    let db = app::connect(&cfg.database.url, cfg.database.max_connections).await?;
    app::migrate(&db).await?;

    let modules = app::Modules::init(&cfg, db)?;
    let router = app::build_router(&modules, &cfg.server)?;

    let cancel = CancellationToken::new();
    let purge = tokio::spawn(modules.identity.clone().serve(cancel.clone()));
    tokio::spawn(wait_for_shutdown_signal(cancel.clone()));

    let listener = tokio::net::TcpListener::bind(&cfg.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.bind_addr))?;
    tracing::info!(bind_addr = %cfg.server.bind_addr, "IDGM server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(cancel.clone().cancelled_owned())
        .await
        .context("HTTP server failed")?;

    cancel.cancel();
    match purge.await {
        Ok(result) => result?,
        Err(e) => tracing::warn!(error = %e, "Session purge task ended abnormally"),
    }
    tracing::info!("IDGM server stopped");
    Ok(())
}

async fn create_admin(cfg: AppConfig, email: &str, name: &str, password: &str) -> Result<()> {
    let db = app::connect(&cfg.database.url, cfg.database.max_connections).await?;
    app::migrate(&db).await?;

    let identity = identity_service::IdentityServiceModule::default();
    identity.init(cfg.identity, db)?;
    let user = identity
        .client()?
        .ensure_admin(email, name, password)
        .await
        .context("could not provision administrator")?;

    tracing::info!(user_id = %user.id, email = %user.email, "Administrator ready");
    Ok(())
}

/// Cancel `token` on SIGINT or SIGTERM
async fn wait_for_shutdown_signal(token: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                tracing::warn!("Signal handlers unavailable; falling back to Ctrl-C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received; draining requests");
    token.cancel();
}
