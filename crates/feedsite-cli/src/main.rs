use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use feedsite_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "feedsite")]
#[command(author, version, about = "Terminal front-end for the Feed news site")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        username: String,
        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        /// Prompted for (twice) when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// End the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Browse and edit news
    News {
        #[command(subcommand)]
        action: NewsAction,
    },
}

#[derive(Subcommand)]
enum NewsAction {
    /// List one page of news
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Items per page (defaults to news.page_size)
        #[arg(long)]
        limit: Option<u32>,
        /// Only items written by the logged-in user
        #[arg(long)]
        mine: bool,
    },
    /// Show one news item
    Show { id: i64 },
    /// Publish a news item
    Create {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: String,
        #[arg(short, long)]
        image_url: Option<String>,
    },
    /// Change fields of a news item
    Update {
        id: i64,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        image_url: Option<String>,
    },
    /// Delete a news item
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let tui = matches!(cli.command, None | Some(Commands::Run));
    init_logging(&config, tui)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Login { username, password }) => {
            commands::session::login(&config, &username, password).await
        }
        Some(Commands::Register {
            username,
            email,
            password,
        }) => commands::session::register(&config, &username, &email, password).await,
        Some(Commands::Logout) => commands::session::logout(&config).await,
        Some(Commands::Whoami) => commands::session::whoami(&config).await,
        Some(Commands::News { action }) => match action {
            NewsAction::List { page, limit, mine } => {
                commands::news::list(&config, page, limit, mine).await
            }
            NewsAction::Show { id } => commands::news::show(&config, id).await,
            NewsAction::Create {
                title,
                description,
                image_url,
            } => commands::news::create(&config, title, description, image_url).await,
            NewsAction::Update {
                id,
                title,
                description,
                image_url,
            } => commands::news::update(&config, id, title, description, image_url).await,
            NewsAction::Delete { id, yes } => commands::news::delete(&config, id, yes).await,
        },
    }
}

/// `RUST_LOG` wins over `general.log_level`; the TUI logs to a file
fn init_logging(config: &AppConfig, tui: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if tui {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}
