use std::num::ParseIntError;
use std::str::FromStr;

use clap::ValueEnum;
use sweeper_core::Coord2;
use thiserror::Error;

use crate::Level;

pub(crate) const HELP: &str = "\
Commands:
  r ROW COL   reveal a cell
  f ROW COL   toggle a flag
  n           new game
  d LEVEL     new game at beginner, intermediate or expert
  h           show this help
  q           quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    New,
    Difficulty(Level),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`")]
    Unknown(String),
    #[error("Expected a row and a column")]
    MissingCoordinates,
    #[error("Invalid number: {0}")]
    InvalidNumber(#[from] ParseIntError),
    #[error("Unknown difficulty `{0}`")]
    UnknownLevel(String),
    #[error("Too many arguments")]
    TooManyArguments,
}

fn parse_coords<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<Coord2, CommandError> {
    let (Some(row), Some(col)) = (args.next(), args.next()) else {
        return Err(CommandError::MissingCoordinates);
    };
    if args.next().is_some() {
        return Err(CommandError::TooManyArguments);
    }
    Ok((row.parse()?, col.parse()?))
}

fn expect_end<'a>(
    mut args: impl Iterator<Item = &'a str>,
    command: Command,
) -> Result<Command, CommandError> {
    match args.next() {
        Some(_) => Err(CommandError::TooManyArguments),
        None => Ok(command),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;

        match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => parse_coords(words).map(Command::Reveal),
            "f" | "flag" => parse_coords(words).map(Command::Flag),
            "n" | "new" => expect_end(words, Command::New),
            "h" | "help" | "?" => expect_end(words, Command::Help),
            "q" | "quit" => expect_end(words, Command::Quit),
            "d" | "difficulty" => {
                let level = words.next().ok_or(CommandError::UnknownLevel(String::new()))?;
                let level = <Level as ValueEnum>::from_str(level, true)
                    .map_err(|_| CommandError::UnknownLevel(level.to_string()))?;
                expect_end(words, Command::Difficulty(level))
            }
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}
