//! Hot-seat terminal front end.
//!
//! Prints the board, reads one action per line from stdin, and waits out
//! deferred transitions before resolving them. Set `RUST_LOG=debug` to see
//! rejected input and state changes.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::thread;

use clap::{Parser, ValueEnum};
use log::{error, info};
use thiserror::Error;

use parlor_games::games::animal_quiz::AnimalQuizBuilder;
use parlor_games::games::battle2048::Battle2048Builder;
use parlor_games::games::bingo::BingoBuilder;
use parlor_games::games::block_puzzle::BlockPuzzleBuilder;
use parlor_games::games::pipe_puzzle::PipePuzzleBuilder;
use parlor_games::games::snakes_ladders::SnakesLaddersBuilder;
use parlor_games::games::tictactoe::TicTacToe;
use parlor_games::games::treasure_hunt::TreasureHuntBuilder;
use parlor_games::{
    CollaboratorError, ConfigError, Cue, GameResult, GameSession, Minigame, Player, SoundBoard, TimingConfig,
    VictoryPresenter,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum GameKind {
    TicTacToe,
    Bingo,
    TreasureHunt,
    AnimalQuiz,
    #[value(alias = "2048")]
    Battle2048,
    BlockPuzzle,
    PipePuzzle,
    SnakesLadders,
}

/// Play a two-player minigame in the terminal.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// Game to play
    #[arg(value_enum)]
    game: GameKind,

    /// Seed for boards, cards and dice (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file overriding the pause lengths
    #[arg(short, long, conflicts_with = "instant")]
    timing: Option<PathBuf>,

    /// Skip every pause
    #[arg(long, default_value_t = false)]
    instant: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Prints a banner for the winner.
struct Banner;

impl VictoryPresenter for Banner {
    fn present_victory(&mut self, winner: Player) -> Result<(), CollaboratorError> {
        let mut out = io::stdout().lock();
        writeln!(out, "*************************")?;
        writeln!(out, "   {winner} wins! ({})", winner.victory_id())?;
        writeln!(out, "*************************")?;
        Ok(())
    }
}

/// Rings the terminal bell on a win.
struct Bell;

impl SoundBoard for Bell {
    fn play(&mut self, cue: Cue) -> Result<(), CollaboratorError> {
        if cue == Cue::Win {
            let mut out = io::stdout().lock();
            out.write_all(b"\x07")?;
            out.flush()?;
        }
        Ok(())
    }
}

fn play<G>(game: G, timing: TimingConfig) -> Result<(), CliError>
where
    G: Minigame + fmt::Display,
    G::Action: FromStr<Err = String>,
{
    let mut session = GameSession::new(game)
        .with_timing(timing)
        .with_presenter(Banner)
        .with_sound(Bell);
    let mut lines = io::stdin().lock().lines();

    while !session.is_over() {
        println!("{}", session.game());
        print!("{} > ", session.game().current_player());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if matches!(line.trim(), "q" | "quit") {
            break;
        }

        let action = match line.parse::<G::Action>() {
            Ok(action) => action,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        let mut step = match session.handle(&action) {
            Ok(step) => step,
            Err(rejection) => {
                println!("{rejection}");
                continue;
            }
        };
        while let Some(delay) = session.delay_for(step) {
            println!("{}", session.game());
            thread::sleep(delay);
            match session.resolve() {
                Ok(next) => step = next,
                Err(_) => break,
            }
        }
    }

    let game = session.into_game();
    println!("{game}");
    match game.result() {
        Some(GameResult::Draw) => println!("It's a draw!"),
        Some(GameResult::Winner(_)) => {}
        None => println!("Game abandoned."),
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let timing = match (&args.timing, args.instant) {
        (_, true) => TimingConfig::instant(),
        (Some(path), false) => TimingConfig::load(path)?,
        (None, false) => TimingConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("seed {seed}");

    match args.game {
        GameKind::TicTacToe => play(TicTacToe::new(), timing),
        GameKind::Bingo => play(BingoBuilder::new().build(seed), timing),
        GameKind::TreasureHunt => play(TreasureHuntBuilder::new().build(seed), timing),
        GameKind::AnimalQuiz => play(AnimalQuizBuilder::new().build(seed), timing),
        GameKind::Battle2048 => play(Battle2048Builder::new().build(seed), timing),
        GameKind::BlockPuzzle => play(BlockPuzzleBuilder::new().build(seed), timing),
        GameKind::PipePuzzle => play(PipePuzzleBuilder::new().build(seed), timing),
        GameKind::SnakesLadders => play(SnakesLaddersBuilder::new().build(seed), timing),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("parlor: {err}");
            ExitCode::FAILURE
        }
    }
}
