use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use flexi_logger::Logger;

use connect_four_arena::ai::{MinimaxAgent, RolloutAgent};
use connect_four_arena::arena::Arena;
use connect_four_arena::config::AppConfig;

/// Pit a minimax engine against a Monte Carlo rollout engine at Connect Four.
#[derive(Parser)]
#[command(name = "connect-four-arena", about = "Minimax vs Monte Carlo Connect Four evaluation")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "arena.toml")]
    config: PathBuf,

    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// Override minimax search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Override rollout simulations per move
    #[arg(long)]
    simulations: Option<usize>,

    /// Seed the rollout engine for a reproducible match
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate rollout candidates in parallel
    #[arg(long)]
    parallel: bool,

    /// Swap colors every other game
    #[arg(long)]
    alternate_colors: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::try_with_env_or_str("info")
        .context("parsing log specification")?
        .start()
        .context("starting logger")?;

    if cli.print_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(games) = cli.games {
        config.arena.num_games = games;
    }
    if let Some(depth) = cli.depth {
        config.minimax.depth = depth;
    }
    if let Some(simulations) = cli.simulations {
        config.rollout.simulations_per_move = simulations;
    }
    if cli.seed.is_some() {
        config.rollout.seed = cli.seed;
    }
    config.rollout.parallel |= cli.parallel;
    config.arena.alternate_colors |= cli.alternate_colors;
    config.validate().context("validating configuration")?;

    let mut minimax = MinimaxAgent::from_config(&config.minimax);
    let mut rollout = RolloutAgent::from_config(&config.rollout);
    let arena = Arena::new(config.arena.clone(), config.board);

    if !cli.json {
        println!(
            "Minimax (depth {}) vs Rollout ({} simulations/move), {} games",
            config.minimax.depth, config.rollout.simulations_per_move, config.arena.num_games
        );
        println!("-------------------------------------------");
    }

    let summary = arena
        .run(&mut minimax, &mut rollout)
        .context("running match")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("serializing summary")?
        );
    } else {
        println!("{summary}");
    }
    Ok(())
}
