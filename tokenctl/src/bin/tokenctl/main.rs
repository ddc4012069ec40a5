use std::path::PathBuf;

use chrono::Duration;
use clap::Parser;
use clap::Subcommand;
use token::MakerKind;
use tokenctl::config::Config;
use tokenctl::duration::parse_duration;
use tokenctl::service::TokenService;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "tokenctl")]
#[command(author, version, about = "Issue and verify access tokens", long_about = None)]
struct Cli {
    /// Configuration file layered over config/default.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Token format: jwt or paseto (overrides configuration)
    #[arg(long, global = true)]
    kind: Option<MakerKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a token for a user
    Create {
        username: String,
        role: String,

        /// Token lifetime such as 30s, 15m, 24h or 7d
        #[arg(long, value_parser = parse_duration, allow_hyphen_values = true)]
        duration: Option<Duration>,
    },

    /// Verify a token and print its claims
    Verify { token: String },
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tokenctl=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(kind) = cli.kind {
        config.token.kind = kind;
    }

    tracing::info!(
        kind = %config.token.kind,
        access_token_duration = %config.token.access_token_duration,
        "Configuration loaded"
    );

    let service = TokenService::from_config(&config.token)?;

    match cli.command {
        Commands::Create {
            username,
            role,
            duration,
        } => {
            let issued = service.issue(&username, &role, duration)?;
            println!("{}", serde_json::to_string_pretty(&issued)?);
        }
        Commands::Verify { token } => {
            let payload = service.verify(&token)?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}
