use checkers_arena::agent::BotKind;
use checkers_arena::config::{Mode, StartLayout, TournamentConfig};
use checkers_arena::game_repr::pdn;
use checkers_arena::tournament::Tournament;
use checkers_arena::{ArenaError, Result};
use clap::{Parser, ValueEnum};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// One bot against every listed bot
    One,
    /// Every listed bot against every other
    All,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum BoardStart {
    #[default]
    Default,
    #[value(alias = "last_row")]
    LastRow,
}

/// Checkers bot tournament runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 'one' for one bot against the others, 'all' for everyone against everyone
    #[arg(long, value_enum, required_unless_present = "list_bots")]
    mode: Option<ModeArg>,

    /// The bot that plays everyone (required in 'one' mode)
    #[arg(long)]
    bot: Option<BotKind>,

    /// Bots taking part
    bot_list: Vec<BotKind>,

    /// Initial board layout (can be combined with --pdn)
    #[arg(long, value_enum, default_value_t = BoardStart::Default)]
    board_start: BoardStart,

    /// Start every game from the position reached by this record
    #[arg(long)]
    pdn: Option<PathBuf>,

    /// Board edge length
    #[arg(long, default_value_t = 8)]
    size: usize,

    /// Number of rounds to play
    #[arg(long, default_value_t = 1)]
    rounds: usize,

    /// Base seed for the random bots
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(long)]
    threads: Option<usize>,

    /// Debug logging and per-move game logs
    #[arg(long)]
    verbose: bool,

    /// Write a record file for every game
    #[arg(long)]
    export_pdn: bool,

    /// Directory to save the results folder in
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Print the available bots and exit
    #[arg(long)]
    list_bots: bool,
}

impl Args {
    fn into_config(self) -> Result<TournamentConfig> {
        let mode = match (self.mode, self.bot) {
            (Some(ModeArg::One), Some(hero)) => Mode::One { hero },
            (Some(ModeArg::One), None) => {
                return Err(ArenaError::InvalidConfig { detail: "--bot is required in 'one' mode".into() })
            }
            (Some(ModeArg::All), None) => Mode::All,
            (Some(ModeArg::All), Some(_)) => {
                return Err(ArenaError::InvalidConfig { detail: "--bot must not be set in 'all' mode".into() })
            }
            (None, _) => return Err(ArenaError::InvalidConfig { detail: "--mode is required".into() }),
        };

        let start_record = self.pdn.as_deref().map(pdn::read_record).transpose()?;

        let mut config = TournamentConfig::new(mode, self.bot_list);
        config.board_size = self.size;
        config.start = match self.board_start {
            BoardStart::Default => StartLayout::Standard,
            BoardStart::LastRow => StartLayout::LastRow,
        };
        config.rounds = self.rounds;
        config.seed = self.seed;
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        config.export_pdn = self.export_pdn;
        config.record_moves = self.verbose;
        config.output_dir = self.output_dir;
        config.start_record = start_record;
        Ok(config)
    }
}

fn run(args: Args) -> Result<()> {
    let config = args.into_config()?;
    let report = Tournament::new(config)?.run()?;

    println!("Results written to {}", report.folder.display());
    for (place, bot) in report.standings().iter().enumerate() {
        println!("{:>2}. {:<24} {:>6.0}", place + 1, bot.unique_name(), bot.rating);
    }
    if !report.voided.is_empty() {
        println!("{} game(s) voided", report.voided.len());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if args.list_bots {
        for kind in BotKind::all() {
            println!("{:<16} {}", kind.name(), kind.description());
        }
        return ExitCode::SUCCESS;
    }

    info!("checkers arena starting");
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
