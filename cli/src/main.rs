use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sweeper_core::Preset;

use crate::command::Command;
use crate::session::GameSession;

mod command;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Play a round of mines in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset to start with
    #[arg(short, long, value_enum, default_value_t = Level::Beginner)]
    difficulty: Level,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Level> for Preset {
    fn from(level: Level) -> Self {
        match level {
            Level::Beginner => Preset::Beginner,
            Level::Intermediate => Preset::Intermediate,
            Level::Expert => Preset::Expert,
        }
    }
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    use tracing_subscriber::filter::LevelFilter;

    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);
    log::debug!("args: {:?}", args);

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut session = GameSession::new(args.difficulty.into(), seed);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "{}", command::HELP)?;
    session.draw(&mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line.context("Could not read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err}, type `h` for help")?;
                continue;
            }
        };
        log::debug!("command: {:?}", command);

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(stdout, "{}", command::HELP)?;
                continue;
            }
            Command::New => {
                session = GameSession::new(session.preset(), rand::random());
            }
            Command::Difficulty(level) => {
                session = GameSession::new(level.into(), rand::random());
            }
            Command::Reveal(coords) => match session.reveal(coords) {
                Ok(report) if report.ended() => {
                    session.draw(&mut stdout)?;
                    writeln!(stdout, "{}", session.result_message())?;
                    continue;
                }
                Ok(_) => {}
                Err(err) => {
                    writeln!(stdout, "{err}")?;
                    continue;
                }
            },
            Command::Flag(coords) => {
                if let Err(err) = session.toggle_flag(coords) {
                    writeln!(stdout, "{err}")?;
                    continue;
                }
            }
        }

        session.draw(&mut stdout)?;
    }

    Ok(())
}
