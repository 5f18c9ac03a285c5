mod run;

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use feedmap_core::FeedFormat;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "feedmap")]
#[command(about = "Fetch product feeds and map them into catalog updates")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch and map one or more feeds, printing one summary line per feed.
    Run {
        /// Feeds to run, in order. Defaults to all three.
        #[arg(value_enum)]
        feeds: Vec<FeedArg>,

        /// Write every mapped update to stdout as one JSON object per line.
        #[arg(long)]
        emit_updates: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FeedArg {
    Json,
    Xml,
    Raw,
    All,
}

/// Expands CLI feed arguments into formats, keeping the requested order and
/// dropping repeats. No arguments means every format.
fn resolve_formats(args: &[FeedArg]) -> Vec<FeedFormat> {
    let mut formats = Vec::new();
    let mut push = |format: FeedFormat| {
        if !formats.contains(&format) {
            formats.push(format);
        }
    };
    if args.is_empty() {
        FeedFormat::ALL.into_iter().for_each(&mut push);
    }
    for arg in args {
        match arg {
            FeedArg::Json => push(FeedFormat::Json),
            FeedArg::Xml => push(FeedFormat::GoogleShopping),
            FeedArg::Raw => push(FeedFormat::Raw),
            FeedArg::All => FeedFormat::ALL.into_iter().for_each(&mut push),
        }
    }
    formats
}

fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = feedmap_core::load_app_config()?;
    init_tracing(&config.log_level);

    let (feeds, emit_updates) = match cli.command {
        Some(Commands::Run {
            feeds,
            emit_updates,
        }) => (feeds, emit_updates),
        None => (Vec::new(), false),
    };

    let formats = resolve_formats(&feeds);
    tracing::debug!(?formats, "starting feed run");
    let all_succeeded = run::run_feeds(&config, &formats, emit_updates).await?;

    Ok(if all_succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
