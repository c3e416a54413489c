use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{crate_version, Parser, Subcommand};
use log::info;

use guia_core::repositories::UserRepo;
use guia_db_sqlite::Connections;
use guia_entities::user::Role;
use guia_gateways::image_store::{DirImageStore, HttpImageStore};

use crate::config::{Config, ImageStoreConfig};

#[derive(Debug, Parser)]
#[command(name = "guialocal", version, about = "Geolocated local directory server")]
struct Args {
    /// Path to the configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// URL to the database.
    #[arg(long, value_name = "DATABASE_URL")]
    db_url: Option<String>,

    /// Allow requests from any origin.
    #[arg(long)]
    enable_cors: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the web server (the default).
    Serve,
    /// Change the role of a user account.
    SetRole {
        email: String,
        /// One of "guest", "user" or "admin".
        role: String,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(db_url) = args.db_url {
        config.db_url = Some(db_url);
    }

    let db_url = config.db_url();
    info!("Opening database {db_url}");
    let connections = Connections::init(db_url, config.db_connection_pool_size())
        .context("Unable to open the database")?;
    guia_db_sqlite::run_embedded_database_migrations(
        connections
            .exclusive()
            .map_err(|err| anyhow!("Unable to run database migrations: {err}"))?,
    );

    match args.command {
        Some(Command::SetRole { email, role }) => set_user_role(&connections, &email, &role),
        Some(Command::Serve) | None => {
            let image_store = image_store(config.image_store())?;
            let cfg = guia_webserver::Cfg {
                token_secret: config.token_secret.clone(),
            };
            info!("Starting guialocal v{}", crate_version!());
            guia_webserver::run(connections, args.enable_cors, cfg, image_store).await;
            Ok(())
        }
    }
}

fn image_store(
    config: ImageStoreConfig,
) -> anyhow::Result<Box<dyn guia_core::gateways::image_storage::ImageStorageGateway + Send + Sync>>
{
    Ok(match config {
        ImageStoreConfig::Http {
            api_base_url,
            api_key,
        } => Box::new(HttpImageStore::new(api_base_url, api_key)),
        ImageStoreConfig::LocalDir { path, base_url } => Box::new(
            DirImageStore::try_new(&path, base_url)
                .with_context(|| format!("Unable to use {path} as image store"))?,
        ),
    })
}

fn set_user_role(connections: &Connections, email: &str, role: &str) -> anyhow::Result<()> {
    let role = match role {
        "guest" => Role::Guest,
        "user" => Role::User,
        "admin" => Role::Admin,
        other => return Err(anyhow!("Unknown role: {other}")),
    };
    let db = connections
        .exclusive()
        .map_err(|err| anyhow!("Unable to access the database: {err}"))?;
    let mut user = db.get_user_by_email(&email.parse()?)?;
    user.role = role;
    db.update_user(&user)?;
    info!("Changed role of {email} to {role:?}");
    Ok(())
}
