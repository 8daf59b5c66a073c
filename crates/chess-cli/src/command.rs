//! Interactive command parsing.

use std::ops::RangeInclusive;
use thiserror::Error;

/// Accepted range for `depth <n>`.
pub const DEPTH_RANGE: RangeInclusive<u32> = 1..=10;
/// Accepted range for `time <ms>`.
pub const TIME_RANGE: RangeInclusive<u64> = 1..=60_000;
/// Accepted range for `perft <n>`.
pub const PERFT_RANGE: RangeInclusive<u32> = 1..=6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for available commands.")]
    Unknown(String),
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("Invalid {what} value '{value}'")]
    InvalidNumber { what: &'static str, value: String },
    #[error("Depth must be between 1 and 10")]
    DepthOutOfRange(u32),
    #[error("Time must be between 1 and 60000ms")]
    TimeOutOfRange(u64),
    #[error("Perft depth must be between 1 and 6")]
    PerftOutOfRange(u32),
}

/// A line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play a move in coordinate notation, then let the engine reply.
    Move(String),
    /// Let the engine move.
    Go,
    Depth(u32),
    TimeMs(u64),
    /// Replace the position with FEN text.
    Fen(String),
    Reset,
    Eval,
    Legal,
    Undo,
    Perft(u32),
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(input: &str) -> Result<Option<Self>, CommandError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();
        let Some(cmd) = parts.next() else {
            return Ok(None);
        };

        let command = match cmd {
            "move" => {
                let text = parts.next().ok_or(CommandError::MissingArgument("move"))?;
                Command::Move(text.to_string())
            }
            "go" => Command::Go,
            "depth" => {
                let depth = parse_number(parts.next(), "depth")?;
                if !DEPTH_RANGE.contains(&depth) {
                    return Err(CommandError::DepthOutOfRange(depth));
                }
                Command::Depth(depth)
            }
            "time" => {
                let ms = parse_number(parts.next(), "time")?;
                if !TIME_RANGE.contains(&ms) {
                    return Err(CommandError::TimeOutOfRange(ms));
                }
                Command::TimeMs(ms)
            }
            "fen" => {
                let fen = parts.collect::<Vec<_>>().join(" ");
                if fen.is_empty() {
                    return Err(CommandError::MissingArgument("fen"));
                }
                Command::Fen(fen)
            }
            "reset" => Command::Reset,
            "eval" => Command::Eval,
            "legal" => Command::Legal,
            "undo" => Command::Undo,
            "perft" => {
                let depth = parse_number(parts.next(), "perft")?;
                if !PERFT_RANGE.contains(&depth) {
                    return Err(CommandError::PerftOutOfRange(depth));
                }
                Command::Perft(depth)
            }
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(cmd.to_string())),
        };
        Ok(Some(command))
    }
}

fn parse_number<T: std::str::FromStr>(
    arg: Option<&str>,
    what: &'static str,
) -> Result<T, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(what))?;
    arg.parse().map_err(|_| CommandError::InvalidNumber {
        what,
        value: arg.to_string(),
    })
}

pub const HELP: &str = "\
Commands:
  move <from><to>[promo]  Make a move, e.g. 'move e2e4' or 'move e7e8q'
  go                      Let the engine make a move
  depth <n>               Set search depth (1-10, default 4)
  time <ms>               Set search time in milliseconds (1-60000, default 5000)
  fen <string>            Set position from FEN
  reset                   Reset to the starting position
  eval                    Show the static evaluation
  legal                   List all legal moves
  undo                    Take back one move
  perft <n>               Count leaf nodes to depth n (1-6)
  help                    Show this help
  quit                    Exit";

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Command {
        Command::parse(input).unwrap().unwrap()
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse("go"), Command::Go);
        assert_eq!(parse("  reset  "), Command::Reset);
        assert_eq!(parse("eval"), Command::Eval);
        assert_eq!(parse("legal"), Command::Legal);
        assert_eq!(parse("undo"), Command::Undo);
        assert_eq!(parse("help"), Command::Help);
        assert_eq!(parse("quit"), Command::Quit);
        assert_eq!(parse("exit"), Command::Quit);
    }

    #[test]
    fn blank_line_is_none() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \n").unwrap(), None);
    }

    #[test]
    fn parse_move() {
        assert_eq!(parse("move e2e4"), Command::Move("e2e4".into()));
        assert_eq!(parse("move e7e8q\n"), Command::Move("e7e8q".into()));
        assert_eq!(
            Command::parse("move"),
            Err(CommandError::MissingArgument("move"))
        );
    }

    #[test]
    fn parse_depth_bounds() {
        assert_eq!(parse("depth 1"), Command::Depth(1));
        assert_eq!(parse("depth 10"), Command::Depth(10));
        assert_eq!(Command::parse("depth 0"), Err(CommandError::DepthOutOfRange(0)));
        assert_eq!(Command::parse("depth 11"), Err(CommandError::DepthOutOfRange(11)));
        assert!(matches!(
            Command::parse("depth deep"),
            Err(CommandError::InvalidNumber { what: "depth", .. })
        ));
    }

    #[test]
    fn parse_time_bounds() {
        assert_eq!(parse("time 250"), Command::TimeMs(250));
        assert_eq!(parse("time 60000"), Command::TimeMs(60_000));
        assert_eq!(Command::parse("time 0"), Err(CommandError::TimeOutOfRange(0)));
        assert_eq!(
            Command::parse("time 60001"),
            Err(CommandError::TimeOutOfRange(60_001))
        );
        assert_eq!(Command::parse("time"), Err(CommandError::MissingArgument("time")));
    }

    #[test]
    fn parse_fen_keeps_all_fields() {
        assert_eq!(
            parse("fen 8/8/8/8/8/8/8/K6k w - - 0 1"),
            Command::Fen("8/8/8/8/8/8/8/K6k w - - 0 1".into())
        );
        assert_eq!(Command::parse("fen"), Err(CommandError::MissingArgument("fen")));
    }

    #[test]
    fn parse_perft() {
        assert_eq!(parse("perft 3"), Command::Perft(3));
        assert_eq!(parse("perft 6"), Command::Perft(6));
        assert!(Command::parse("perft x").is_err());
        assert_eq!(Command::parse("perft 0"), Err(CommandError::PerftOutOfRange(0)));
        assert_eq!(Command::parse("perft 12"), Err(CommandError::PerftOutOfRange(12)));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            Command::parse("castle"),
            Err(CommandError::Unknown("castle".into()))
        );
    }
}
