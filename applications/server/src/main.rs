/// Tessera Server - user-account backend
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf};
use tessera_core::{AccountFilter, AccountStore, Pagination};
use tessera_server::{
    api,
    config::ServerConfig,
    seed,
    services::{directory::prepare_account, CreateAccount, PasswordCodec},
    state::AppState,
};
use tessera_storage::SqliteAccountStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tessera-server")]
#[command(about = "Tessera user-account server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new account
    AddUser {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Grant the administrator role
        #[arg(long)]
        admin: bool,
    },
    /// List all accounts
    ListUsers,
    /// Ensure the default administrator and standard accounts exist
    Seed {
        /// Password given to both seeded accounts
        #[arg(short, long, env = "TESSERA_SEED_PASSWORD")]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tessera_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser {
            name,
            email,
            password,
            admin,
        } => {
            let input = CreateAccount {
                name,
                email,
                password,
            };
            add_user(&config, input, admin).await?;
        }
        Commands::ListUsers => {
            list_users(&config).await?;
        }
        Commands::Seed { password } => {
            seed_database(&config, &password).await?;
        }
    }

    Ok(())
}

async fn open_store(config: &ServerConfig) -> anyhow::Result<SqliteAccountStore> {
    let pool = tessera_storage::create_pool(&config.storage.database_url).await?;
    tessera_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");
    Ok(SqliteAccountStore::new(pool))
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Tessera Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let store = open_store(&config).await?;
    let app_state = AppState::from_config(&config, store)?;
    let app = api::create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(config: &ServerConfig, input: CreateAccount, admin: bool) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let passwords = PasswordCodec::new(config.auth.bcrypt_cost)?;

    let mut new_account = prepare_account(&passwords, &input)?;
    if admin {
        new_account = new_account.admin();
    }

    let account = store.create_with_credential(new_account).await?;
    tracing::info!(account_id = %account.id, admin, "Account created");
    println!("Created account {} ({})", account.id, input.email.trim());

    Ok(())
}

async fn list_users(config: &ServerConfig) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let filter = AccountFilter::default();
    let mut page = Pagination::default();

    println!("Accounts:");
    loop {
        let accounts = store.find_many(&filter, page, false).await?;
        if accounts.is_empty() {
            break;
        }

        for account in &accounts {
            let role = if account.is_admin { "admin" } else { "user" };
            println!(
                "  {} - {} <{}> [{}]",
                account.id,
                account.name,
                account.email.as_deref().unwrap_or("-"),
                role
            );
        }

        page.offset += page.limit;
    }

    Ok(())
}

async fn seed_database(config: &ServerConfig, password: &str) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let passwords = PasswordCodec::new(config.auth.bcrypt_cost)?;

    let accounts = seed::seed_accounts(&store, &passwords, password).await?;
    println!("Seeded {} accounts", accounts.len());

    Ok(())
}
