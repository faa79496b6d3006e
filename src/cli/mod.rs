use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::api::{self, AppState};
use crate::application::{NumberOrdering, OrderingService};
use crate::config::Settings;
use crate::domain::Number;
use crate::storage::{InMemoryNumberStore, SqliteNumberStore};
use crate::telemetry;

/// numsort - store integers, read them back sorted
#[derive(Parser)]
#[command(name = "numsort")]
#[command(about = "A small service that stores integers and returns them in ascending order")]
#[command(version)]
pub struct Cli {
    /// Configuration file (YAML or TOML)
    #[arg(short, long, env = "CONFIG_PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service until interrupted
    Serve {
        /// Keep numbers in process memory instead of the database
        #[arg(long)]
        in_memory: bool,
    },

    /// Initialize a new database
    Init,

    /// Store a single number
    Put {
        /// The number to store (e.g., 42 or -7)
        #[arg(allow_negative_numbers = true)]
        num: Number,
    },

    /// Print every stored number in ascending order
    List,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let settings =
            Settings::load(self.config.as_deref()).context("Failed to load configuration")?;
        telemetry::init(settings.env)?;
        tracing::debug!(env = settings.env.as_str(), "configuration loaded");

        match self.command {
            Commands::Serve { in_memory } => serve(&settings, in_memory).await?,

            Commands::Init => {
                let url = settings.database.require_url()?;
                let store = SqliteNumberStore::init(url, &settings.database.pool_options())
                    .await
                    .context("Failed to initialize database")?;
                store.close().await;
                println!("Database initialized: {}", url);
            }

            Commands::Put { num } => {
                let store = connect(&settings).await?;
                let service = OrderingService::with_tracing(store.clone());
                service.accept(num).await?;
                store.close().await;
                println!("Stored {}", num);
            }

            Commands::List => {
                let store = connect(&settings).await?;
                let service = OrderingService::with_tracing(store.clone());
                let numbers = service.list_sorted().await?;
                store.close().await;

                if numbers.is_empty() {
                    println!("No numbers stored yet.");
                }
                for n in numbers {
                    println!("{}", n);
                }
            }
        }

        Ok(())
    }
}

async fn connect(settings: &Settings) -> Result<SqliteNumberStore> {
    let url = settings.database.require_url()?;
    SqliteNumberStore::connect(url, &settings.database.pool_options())
        .await
        .context("Failed to connect to database")
}

/// The ordering service `serve` runs on, plus the SQLite store to close on exit.
struct Backend {
    ordering: Arc<dyn NumberOrdering>,
    sqlite: Option<SqliteNumberStore>,
}

impl Backend {
    async fn open(settings: &Settings, in_memory: bool) -> Result<Self> {
        if in_memory {
            tracing::warn!("serving from memory; stored numbers are lost on exit");
            return Ok(Self {
                ordering: Arc::new(OrderingService::with_tracing(InMemoryNumberStore::new())),
                sqlite: None,
            });
        }

        let url = settings.database.require_url()?;
        let store = SqliteNumberStore::init(url, &settings.database.pool_options())
            .await
            .context("Failed to connect to database")?;

        Ok(Self {
            ordering: Arc::new(OrderingService::with_tracing(store.clone())),
            sqlite: Some(store),
        })
    }

    async fn close(self) {
        if let Some(store) = self.sqlite {
            store.close().await;
        }
    }
}

async fn serve(settings: &Settings, in_memory: bool) -> Result<()> {
    let backend = Backend::open(settings, in_memory).await?;
    let result = run_http(settings, Arc::clone(&backend.ordering)).await;
    backend.close().await;
    result
}

async fn run_http(settings: &Settings, ordering: Arc<dyn NumberOrdering>) -> Result<()> {
    let listener = TcpListener::bind(&settings.http_server.address)
        .await
        .with_context(|| format!("Failed to bind {}", settings.http_server.address))?;

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("shutdown signal received");
                shutdown.cancel();
            }
            Err(e) => tracing::error!(error = %e, "failed to listen for shutdown signal"),
        }
    });

    let state = AppState::new(ordering, settings.http_server.timeout());
    api::serve(listener, api::router(state), cancel)
        .await
        .context("HTTP server failed")
}
