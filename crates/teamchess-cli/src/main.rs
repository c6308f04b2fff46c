//! `teamchess` - play four-player team chess from the command line.
//!
//! Games are passed between invocations as extended FEN, so every
//! subcommand except `new` takes the position to work on.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use config::Settings;
use teamchess_core::{Player, Square};
use teamchess_engine::MoveClass;

#[derive(Parser)]
#[command(name = "teamchess")]
#[command(about = "Four-player team chess on a standard board")]
struct Cli {
    /// Settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Leave promotion markers out of extended FEN output
    #[arg(long, global = true)]
    no_promoted: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a game with a random split of the pieces
    New {
        /// Seed for the allocation
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// List the moves open to the player on turn
    Moves {
        /// Extended FEN of the position
        efen: String,
        /// Player on turn (symbol or name); defaults to Spades
        #[arg(short, long)]
        player: Option<Player>,
        #[arg(short, long, value_enum, default_value = "all")]
        class: ClassArg,
        /// Only moves from this square
        #[arg(long)]
        from: Option<Square>,
    },
    /// Play moves in UCI or SAN notation, one player after another
    Play {
        /// Extended FEN of the position
        efen: String,
        #[arg(required = true)]
        moves: Vec<String>,
        /// Player on turn (symbol or name); defaults to Spades
        #[arg(short, long)]
        player: Option<Player>,
    },
    /// Show every piece with its owner
    Pieces {
        /// Extended FEN of the position
        efen: String,
        /// Player on turn (symbol or name); defaults to Spades
        #[arg(short, long)]
        player: Option<Player>,
        /// Only pieces owned by this player
        #[arg(short, long)]
        owner: Option<Player>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ClassArg {
    All,
    Captures,
    EnPassant,
    Castling,
}

impl From<ClassArg> for MoveClass {
    fn from(class: ClassArg) -> Self {
        match class {
            ClassArg::All => MoveClass::All,
            ClassArg::Captures => MoveClass::Captures,
            ClassArg::EnPassant => MoveClass::EnPassant,
            ClassArg::Castling => MoveClass::Castling,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let mut settings =
        Settings::load(&path).with_context(|| format!("loading {}", path.display()))?;
    if cli.pretty {
        settings.pretty_json = true;
    }
    if cli.no_promoted {
        settings.include_promoted = false;
    }
    tracing::debug!(?settings, "settings loaded");

    let output = match cli.command {
        Commands::New { seed } => {
            if seed.is_some() {
                settings.seed = seed;
            }
            commands::render(&commands::new_game(&settings), &settings)?
        }
        Commands::Moves {
            efen,
            player,
            class,
            from,
        } => {
            let moves = commands::list_moves(&efen, player, class.into(), from)?;
            commands::render(&moves, &settings)?
        }
        Commands::Play {
            efen,
            moves,
            player,
        } => {
            let report = commands::play(&efen, player, &moves, &settings)?;
            commands::render(&report, &settings)?
        }
        Commands::Pieces { efen, player, owner } => {
            let pieces = commands::pieces(&efen, player, owner)?;
            commands::render(&pieces, &settings)?
        }
    };

    println!("{}", output);
    Ok(())
}
