use anyhow::Context;
use clap::Parser;
use reelquest_simulator::{build, repl, Config};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Fantasy Slot Quest in the terminal.", long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save file for signed-in progress
    #[arg(long)]
    store: Option<PathBuf>,

    /// Seed for reproducible spins
    #[arg(long)]
    seed: Option<u64>,

    /// Name to sign in as
    #[arg(long)]
    player: Option<String>,

    #[arg(long)]
    log_level: Option<String>,

    /// Settle spins without waiting for the reels
    #[arg(long)]
    no_animate: bool,

    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Load config
    let mut config = match &args.config {
        Some(path) => Config::load(path).context("failed to load config")?,
        None => Config::default(),
    };
    if let Some(store) = args.store {
        config.store_path = store;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(player) = args.player {
        config.player_name = player;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    config.animate &= !args.no_animate;
    config.json_logs |= args.json_logs;

    // Create logger
    let level = config.log_level().context("invalid log level")?;
    let logger = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr);
    if config.json_logs {
        logger.json().init();
    } else {
        logger.init();
    }

    // Start session
    let mut game = build(&config)
        .await
        .with_context(|| format!("failed to open {}", config.store_path.display()))?;
    info!(store = %config.store_path.display(), seed = ?config.seed, "session starting");
    game.init().await;
    game.ui_mut().print(repl::HELP);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    repl::run(&mut game, stdin)
        .await
        .context("failed to read commands")?;

    let state = game.state();
    info!(gold = state.gold, spins = state.total_spins, "session ended");
    Ok(())
}
