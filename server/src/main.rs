use clap::{Parser, Subcommand};
use eyre::{eyre, Result, WrapErr};
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    prelude::*,
};

use base::{
    database::open_database,
    setting::{generate_default, load, Settings},
    CLI_NAME,
};
use server::{admin, web::csrf::CsrfTokens, AppState};

#[derive(Parser)]
#[command(name = CLI_NAME, author, version, about, long_about = None)]
#[command(next_line_help = true)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Overrides the listen address from the config file
    #[arg(short, long, name = "ADDRESS")]
    listen_address: Option<String>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Prints a default configuration file
    DefaultConfig,
    /// Serves the REST API and the HTML screens
    Serve,
    /// Creates a new admin user
    #[command(name = "app:create-admin", visible_alias = "create-admin")]
    CreateAdmin(CreateAdminOptions),
}

#[derive(Parser)]
struct CreateAdminOptions {
    #[arg(name = "EMAIL", help = "The email of the new admin")]
    email: String,

    #[arg(short, long, name = "PASSWORD")]
    password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    color_eyre::install()?;
    let tracing_builder = tracing_subscriber::registry().with(fmt::layer());
    if std::env::var(base::CATALOG_LOGLEVEL).is_ok() {
        tracing_builder.with(EnvFilter::from_env(base::CATALOG_LOGLEVEL))
    } else {
        tracing_builder.with(EnvFilter::default().add_directive(LevelFilter::INFO.into()))
    }
    .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::DefaultConfig => {
            let default = generate_default(Settings::default())?;
            println!("{}", toml::to_string(&default)?);
            Ok(())
        }
        Command::CreateAdmin(opts) => {
            let settings = load(cli.config)?;
            let db = open_database(&settings.db).await?;
            migration::Migrator::up(&db, None).await?;

            let password = opts.password.unwrap_or_else(|| {
                tracing::warn!("No password given, falling back to the default one");
                admin::DEFAULT_PASSWORD.to_string()
            });
            match admin::create_admin(&db, &opts.email, &password).await {
                Ok(user) => {
                    println!("Admin user {} created with id {}", user.email, user.id);
                    Ok(())
                }
                Err(e) => Err(eyre!(e).wrap_err("Failed to create the admin user")),
            }
        }
        Command::Serve => {
            let settings = load(cli.config)?;
            let db = open_database(&settings.db).await?;
            migration::Migrator::up(&db, None).await?;

            let addr: SocketAddr = cli
                .listen_address
                .unwrap_or(settings.listen_address)
                .parse()
                .wrap_err(eyre!("Invalid listen address"))?;
            tracing::info! {%addr, "Listening"};
            let router = server::router(AppState {
                db,
                csrf: CsrfTokens::new(&settings.csrf_secret),
            });
            axum::Server::bind(&addr)
                .serve(router.into_make_service())
                .await?;
            Ok(())
        }
    }
}
