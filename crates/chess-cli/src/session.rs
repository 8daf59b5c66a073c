//! Read-eval-print loop over a board and a searcher.

use crate::command::{Command, CommandError, HELP};
use chess_engine::{perft, Board};
use chess_search::{Evaluator, PieceSquareEvaluator, SearchLimits, Searcher};
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};
use tracing::warn;

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// An interactive game against the engine.
pub struct Session<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    board: Board,
    searcher: Searcher<PieceSquareEvaluator>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W, board: Board, limits: SearchLimits) -> Self {
        Self {
            reader,
            writer,
            board,
            searcher: Searcher::new(PieceSquareEvaluator::new(), limits),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn limits(&self) -> &SearchLimits {
        self.searcher.limits()
    }

    /// Consumes the session, returning the output sink.
    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.writer, "=== Chess Engine ===")?;
        writeln!(self.writer, "Starting position:")?;
        self.print_status()?;
        writeln!(self.writer, "\n{}", HELP)?;

        let mut line = String::new();
        loop {
            write!(self.writer, "\n> ")?;
            self.writer.flush()?;

            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                break;
            }
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    self.report(&err)?;
                    continue;
                }
            };
            if self.execute(command)? == Flow::Quit {
                break;
            }
        }

        writeln!(self.writer, "Goodbye!")?;
        self.writer.flush()
    }

    fn execute(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => writeln!(self.writer, "{}", HELP)?,
            Command::Move(text) => self.user_move(&text)?,
            Command::Go => {
                if self.board.is_game_over() {
                    writeln!(self.writer, "Game is over. Use 'reset' to start a new game.")?;
                } else {
                    self.engine_move()?;
                }
            }
            Command::Depth(depth) => {
                let limits = SearchLimits {
                    max_depth: depth,
                    ..*self.searcher.limits()
                };
                self.searcher.set_limits(limits);
                writeln!(self.writer, "Search depth set to {}", depth)?;
            }
            Command::TimeMs(ms) => {
                let limits = SearchLimits {
                    max_time: Duration::from_millis(ms),
                    ..*self.searcher.limits()
                };
                self.searcher.set_limits(limits);
                writeln!(self.writer, "Max search time set to {}ms", ms)?;
            }
            Command::Fen(fen) => match self.board.load(&fen) {
                Ok(()) => {
                    writeln!(self.writer, "Position set from FEN")?;
                    self.print_status()?;
                }
                Err(err) => {
                    warn!("rejected FEN '{}': {}", fen, err);
                    writeln!(self.writer, "Invalid FEN string: {}", err)?;
                }
            },
            Command::Reset => {
                self.board = Board::startpos();
                writeln!(self.writer, "Board reset to starting position")?;
                self.print_status()?;
            }
            Command::Eval => {
                let score = self.searcher.evaluator().evaluate(&self.board);
                writeln!(self.writer, "Position evaluation: {} centipawns", score)?;
                let verdict = match score {
                    s if s > 0 => "White is better",
                    s if s < 0 => "Black is better",
                    _ => "Position is equal",
                };
                writeln!(self.writer, "{}", verdict)?;
            }
            Command::Legal => {
                let moves = self.board.legal_moves();
                let list: Vec<String> = moves.iter().map(|m| m.to_text()).collect();
                writeln!(self.writer, "Legal moves ({}): {}", moves.len(), list.join(", "))?;
            }
            Command::Undo => match self.board.undo_move() {
                Some(m) => {
                    writeln!(self.writer, "Took back {}", m)?;
                    self.print_status()?;
                }
                None => writeln!(self.writer, "Nothing to undo")?,
            },
            Command::Perft(depth) => {
                let start = Instant::now();
                let nodes = perft(&self.board, depth);
                writeln!(
                    self.writer,
                    "Perft {}: {} nodes ({}ms)",
                    depth,
                    nodes,
                    start.elapsed().as_millis()
                )?;
            }
        }
        Ok(Flow::Continue)
    }

    fn user_move(&mut self, text: &str) -> io::Result<()> {
        let m = match self.board.parse_move(text) {
            Ok(m) => m,
            Err(err) => {
                warn!("rejected move '{}': {}", text, err);
                return writeln!(self.writer, "Invalid move: {}", text);
            }
        };
        self.board.apply_move(m);
        writeln!(self.writer, "Move played: {}", m)?;
        self.print_status()?;

        if self.board.is_game_over() {
            return Ok(());
        }
        self.engine_move()
    }

    fn engine_move(&mut self) -> io::Result<()> {
        writeln!(self.writer, "\nEngine is thinking...")?;
        let result = self.searcher.search(&self.board);
        let Some(m) = result.best_move else {
            return writeln!(self.writer, "Engine found no legal moves.");
        };
        self.board.apply_move(m);
        writeln!(
            self.writer,
            "Engine plays: {} (depth: {}, score: {}, nodes: {}, time: {}ms)",
            m,
            result.depth,
            result.score,
            result.nodes,
            result.elapsed.as_millis()
        )?;
        self.print_status()
    }

    fn print_status(&mut self) -> io::Result<()> {
        let board = &self.board;
        writeln!(self.writer, "\n{}", board)?;
        writeln!(self.writer, "\nFEN: {}", board.serialize())?;
        writeln!(self.writer, "Side to move: {}", board.side_to_move())?;
        if let Some(m) = board.last_move() {
            writeln!(self.writer, "Last move: {}", m)?;
        }

        if board.is_check() {
            writeln!(self.writer, "CHECK!")?;
        }
        if board.is_checkmate() {
            if let Some(winner) = board.winner() {
                writeln!(self.writer, "CHECKMATE! {} wins!", winner)?;
            }
        } else if board.is_stalemate() {
            writeln!(self.writer, "STALEMATE! Draw.")?;
        } else if board.is_draw() {
            writeln!(self.writer, "DRAW!")?;
        }
        Ok(())
    }

    fn report(&mut self, err: &CommandError) -> io::Result<()> {
        warn!("{}", err);
        writeln!(self.writer, "{}", err)
    }
}
