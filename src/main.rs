use std::net::SocketAddr;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use ironpass::cli::{AdminAccount, create_admin};
use ironpass::router::init_router;
use ironpass::state::AppState;
use ironpass_config::AppConfig;
use ironpass_db::{MemoryStore, PgStore, init_db_pool, run_migrations};
use ironpass_observability::{LogSettings, init_console_logging, init_tracing};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "ironpass")]
#[command(about = "Ironpass API - gym membership backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Keep all data in process memory instead of PostgreSQL
        #[arg(long)]
        memory: bool,
    },
    /// Create an administrator account
    CreateAdmin {
        #[arg(short = 'n', long)]
        name: String,

        #[arg(short = 'e', long)]
        email: String,

        /// At least 6 characters
        #[arg(short = 'p', long)]
        password: String,

        #[arg(long)]
        city: String,

        /// 10 digit phone number
        #[arg(long)]
        contact: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let settings = LogSettings::from_env();

    match cli.command.unwrap_or(Commands::Serve { memory: false }) {
        Commands::Serve { memory } => {
            if let Err(e) = init_tracing(&settings) {
                eprintln!("Failed to initialize logging: {e}");
                return ExitCode::FAILURE;
            }
            serve(config, memory).await
        }
        Commands::CreateAdmin {
            name,
            email,
            password,
            city,
            contact,
        } => {
            init_console_logging(&settings);
            let account = AdminAccount {
                name,
                email,
                password,
                city,
                contact,
            };
            run_create_admin(&config, account).await
        }
    }
}

async fn serve(config: AppConfig, memory: bool) -> ExitCode {
    let port = config.port;

    let state = match (config.database_url.clone(), memory) {
        (_, true) => {
            warn!("Running with in-memory storage; data is lost on shutdown");
            AppState::new(config, MemoryStore::new())
        }
        (Some(url), false) => match connect(&url).await {
            Ok(store) => AppState::new(config, store),
            Err(e) => {
                error!(error = %e, "Failed to connect to database");
                return ExitCode::FAILURE;
            }
        },
        (None, false) => {
            error!("DATABASE_URL is not set; pass --memory to run without a database");
            return ExitCode::FAILURE;
        }
    };

    let app = init_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %addr, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!("Server running on http://localhost:{port}");
    info!("Scalar UI available at http://localhost:{port}/scalar");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn connect(url: &str) -> Result<PgStore, ironpass_db::StoreError> {
    let pool = init_db_pool(url).await?;
    run_migrations(&pool).await?;
    info!("Database connected and migrated");
    Ok(PgStore::new(pool))
}

async fn run_create_admin(config: &AppConfig, account: AdminAccount) -> ExitCode {
    let Some(url) = config.database_url.as_deref() else {
        eprintln!("DATABASE_URL must be set");
        return ExitCode::FAILURE;
    };

    let store = match connect(url).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            return ExitCode::FAILURE;
        }
    };

    match create_admin(&store, account).await {
        Ok(admin) => {
            println!("Admin account created");
            println!("   Email: {}", admin.email);
            println!("   Name: {}", admin.name);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error creating admin: {}", e.public_message());
            ExitCode::FAILURE
        }
    }
}
