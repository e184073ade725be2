use actix_web::{middleware as actix_middleware, web, App, HttpServer};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use chck::config::ServerConfig;
use chck::db::{MemorySwitchBackend, MongoDbContext};
use chck::handlers;
use chck::store::SwitchStore;

/// Remote-controllable switch service.
#[derive(Parser)]
#[command(name = "chck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, env = "CONFIG_PATH", default_value = "server/config/chck.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Keep switches in process memory instead of MongoDB
        #[arg(long)]
        memory: bool,
    },

    /// Drop all switches and recreate the collection indexes
    InitDatabase,
}

fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
    let mut config = if path.exists() {
        ServerConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from '{}'", path.display()))?
    } else {
        log::warn!(
            "Configuration file '{}' not found, using defaults",
            path.display()
        );
        ServerConfig::default()
    };

    config.apply_env()?;
    Ok(config)
}

async fn connect(config: &ServerConfig) -> anyhow::Result<MongoDbContext> {
    log::info!("Connecting to MongoDB at {}...", config.database.uri);
    let context = MongoDbContext::connect(
        &config.database.uri,
        &config.database.name,
        &config.database.collection,
    )
    .await
    .context("Failed to connect to MongoDB")?;
    Ok(context)
}

async fn init_database(config: &ServerConfig) -> anyhow::Result<()> {
    let context = connect(config).await?;
    context
        .reset()
        .await
        .context("Failed to reset switch collection")?;
    log::info!(
        "Initialized collection '{}' in database '{}'",
        config.database.collection,
        config.database.name
    );
    context.shutdown().await;
    Ok(())
}

async fn serve(config: ServerConfig, memory: bool) -> anyhow::Result<()> {
    let (store, mongo) = if memory {
        log::warn!("Using in-memory switch store; switches are lost on exit");
        (SwitchStore::new(MemorySwitchBackend::new()), None)
    } else {
        let context = connect(&config).await?;

        log::info!("Initializing database indexes...");
        context
            .init_indexes()
            .await
            .context("Failed to initialize database indexes")?;

        (SwitchStore::new(context.switches()), Some(context))
    };

    let host = config.http.host.clone();
    let port = config.http.port;
    log::info!("Starting HTTP server at {}:{}...", host, port);

    let http_result = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(config.clone()))
            .wrap(actix_middleware::Logger::default())
            .wrap(actix_middleware::Compress::default())
            .configure(handlers::configure)
    })
    .bind((host, port))?
    .run()
    .await;

    if let Some(context) = mongo {
        context.shutdown().await;
        log::info!("MongoDB client closed");
    }

    Ok(http_result?)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (for development)
    if dotenvy::dotenv().is_err() {
        dotenvy::from_filename("server/.env").ok();
    }

    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    log::info!(
        "chck {} (ident {})",
        env!("CARGO_PKG_VERSION"),
        ident::ident_version()
    );

    match cli.command {
        Command::Serve { memory } => serve(config, memory).await,
        Command::InitDatabase => init_database(&config).await,
    }
}
