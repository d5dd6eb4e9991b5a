use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;

use dice_duel::console::Console;
use dice_duel::dice_mechanics::RandomDice;
use dice_duel::env_config::{init_logging, DuelConfig};
use dice_duel::render::render_leaderboard;
use dice_duel::session::Session;
use dice_duel::storage::{ScoreStore, SqliteStore};
use dice_duel::DuelError;

/// Two-player dice duel with a persistent leaderboard
#[derive(Parser, Debug)]
#[command(name = "dice-duel")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SQLite database path (default: $DICE_DUEL_DB or Database.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Dice seed for a reproducible game (default: $DICE_DUEL_SEED or random)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Do not wait for Enter after each turn
    #[arg(long, global = true)]
    no_pause: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in two players and play (the default)
    Play,

    /// Print the top players without playing
    Leaderboard {
        /// Number of players to show (default: $DICE_DUEL_LEADERBOARD_SIZE or 5)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn resolve_config(args: &Args) -> Result<DuelConfig, DuelError> {
    let mut config = DuelConfig::from_env()?;
    if let Some(db) = &args.db {
        config.db_path = db.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_pause {
        config.pause = false;
    }
    Ok(config)
}

fn play(config: &DuelConfig) -> Result<(), DuelError> {
    let store = SqliteStore::open(&config.db_path)?;
    let dice = match config.seed {
        Some(seed) => RandomDice::seeded(seed),
        None => RandomDice::from_os_rng(),
    };
    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout()).with_pause(config.pause);

    let mut session =
        Session::new(store, dice, console).with_leaderboard_size(config.leaderboard_size);
    session.run()
}

fn leaderboard(config: &DuelConfig, limit: Option<usize>, json: bool) -> Result<(), DuelError> {
    let store = SqliteStore::open(&config.db_path)?;
    let entries = store.top_n(limit.unwrap_or(config.leaderboard_size))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", render_leaderboard(&entries));
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let result = resolve_config(&args).and_then(|config| match args.command {
        None | Some(Commands::Play) => play(&config),
        Some(Commands::Leaderboard { limit, json }) => leaderboard(&config, limit, json),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:?}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
