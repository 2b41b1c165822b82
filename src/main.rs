//! Command line entry point for the roster rating service
//!
//! Scores rating submissions, prints weight tables, and builds leaderboards
//! and rating history from JSON roster files.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use roster_rating::config::AppConfig;
use roster_rating::rating::{position_group_tag, rating_tier, score_breakdown};
use roster_rating::roster::{HistoryFilter, HistoryQuery, RosterFixture};
use roster_rating::service::AppState;
use roster_rating::types::{Attribute, PlayerRatingInput, Position, PositionGroup};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Roster Rating - position-weighted overall ratings for a football squad
#[derive(Parser)]
#[command(
    name = "roster-rating",
    version,
    about = "Position-weighted overall ratings, leaderboards and rating history",
    long_about = "Roster Rating turns ten attribute ratings into a single overall rating using \
                 a weight table per position, and builds leaderboards and rating history \
                 from JSON roster files."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Print metrics after the command
    #[arg(long, help = "Print Prometheus metrics after the command completes")]
    print_metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the weight table for a position
    Weights {
        /// Position code, e.g. ST or CB
        position: String,
    },

    /// Score one rating submission
    Score {
        /// Position code, e.g. ST or CB
        #[arg(short, long)]
        position: String,

        /// Ten comma separated values in attribute order, weak foot in stars last
        #[arg(short, long, value_name = "VALUES")]
        ratings: String,

        /// Show the contribution of each attribute
        #[arg(short, long)]
        breakdown: bool,
    },

    /// Rank the players of a roster file
    Leaderboard {
        /// JSON roster file
        #[arg(short, long, value_name = "FILE")]
        roster: PathBuf,

        /// OVERALL, DEFENDERS, MIDFIELDERS, STRIKERS or GOALKEEPERS
        #[arg(short, long, default_value = "OVERALL")]
        group: String,
    },

    /// List the ratings submitted in a roster file
    History {
        /// JSON roster file
        #[arg(short, long, value_name = "FILE")]
        roster: PathBuf,

        /// Match rater email or player name
        #[arg(short, long)]
        search: Option<String>,

        /// all, high or low
        #[arg(short, long, default_value = "all")]
        filter: String,
    },

    /// Validate configuration and exit
    CheckConfig,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration: file, then environment, then CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = AppConfig::load(args.config.as_deref(), |name| std::env::var(name).ok())?;

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    roster_rating::config::validate_config(&config)?;
    Ok(config)
}

/// Parse `a,b,...` into a rating submission
fn parse_ratings(values: &str) -> Result<PlayerRatingInput> {
    let parsed = values
        .split(',')
        .map(|value| {
            value
                .trim()
                .parse::<i32>()
                .map_err(|_| anyhow!("Invalid rating value: {}", value.trim()))
        })
        .collect::<Result<Vec<i32>>>()?;

    let values: [i32; 10] = parsed.try_into().map_err(|values: Vec<i32>| {
        anyhow!(
            "Expected {} rating values, got {}",
            Attribute::ALL.len(),
            values.len()
        )
    })?;

    let ratings = PlayerRatingInput::from_values(values);
    ratings.validate()?;
    Ok(ratings)
}

fn load_roster(state: &AppState, path: &Path) -> Result<()> {
    let fixture = RosterFixture::from_file(path)?;
    let summary = fixture.load_into(state.roster())?;
    debug!(
        "Loaded {} players and {} ratings from {}",
        summary.players,
        summary.submissions,
        path.display()
    );
    Ok(())
}

fn run(args: &Args, state: &AppState) -> Result<()> {
    match &args.command {
        Command::Weights { position } => {
            let position: Position = position.parse()?;
            let weights = state.calculator().weights_for(position)?;

            println!("{} ({:?})", position, position);
            for (attribute, weight) in weights.iter() {
                println!("  {:<12} {:.2}", attribute.key(), weight);
            }
            println!("  {:<12} {:.2}", "total", weights.total());
        }

        Command::Score {
            position,
            ratings,
            breakdown,
        } => {
            let position: Position = position.parse()?;
            let ratings = parse_ratings(ratings)?;
            let overall = state.score(&ratings, position)?;

            if *breakdown {
                let weights = state.calculator().weights_for(position)?;
                for row in score_breakdown(&ratings, &weights) {
                    println!(
                        "  {:<12} {:>3} {:>3} {:>5.2} {:>6.2}",
                        row.attribute.key(),
                        row.raw,
                        row.score,
                        row.weight,
                        row.contribution
                    );
                }
            }
            println!(
                "{} overall {} ({}, {})",
                position,
                overall,
                rating_tier(overall),
                position_group_tag(position)
            );
        }

        Command::Leaderboard { roster, group } => {
            let group: PositionGroup = group.parse()?;
            load_roster(state, roster)?;

            let board = state.roster().leaderboard(group)?;
            if board.is_empty() {
                println!("No rated players in {}", group);
            }
            for entry in board {
                println!(
                    "{:>3}. {:<24} {:<4} {:>3} {} {}",
                    entry.rank,
                    entry.name,
                    entry.position.code(),
                    entry.overall_rating,
                    entry.tier,
                    entry.tag
                );
            }
        }

        Command::History {
            roster,
            search,
            filter,
        } => {
            let filter: HistoryFilter = filter.parse()?;
            load_roster(state, roster)?;

            let query = HistoryQuery {
                search: search.clone(),
                filter,
            };
            let records = state.roster().rating_history(&query)?;
            if records.is_empty() {
                println!("No ratings found");
            }
            for record in records {
                println!(
                    "{}  {} -> {} ({}): {}",
                    record.timestamp.format("%Y-%m-%d %H:%M"),
                    record.rater_email,
                    record.player_name,
                    record.position,
                    record.overall_rating
                );
            }
        }

        Command::CheckConfig => {
            let config = state.config();
            println!("Configuration is valid");
            println!("  service: {}", config.service.name);
            println!("  log level: {}", config.service.log_level);
            println!("  max history entries: {}", config.roster.max_history_entries);
            println!("  score cache capacity: {}", config.roster.score_cache_capacity);
            match &config.scoring.weights_file {
                Some(path) => println!("  weights: {}", path.display()),
                None => println!("  weights: built-in"),
            }
            println!(
                "  history thresholds: high >= {}, low < {}",
                config.scoring.high_rating_threshold, config.scoring.low_rating_threshold
            );
        }
    }

    if args.print_metrics {
        print!("{}", state.metrics().render()?);
    }

    Ok(())
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args override environment, which overrides the config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("{} v{}", config.service.name, roster_rating::VERSION);

    let result = AppState::new(config).and_then(|state| run(&args, &state));
    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
