//! Position/Move collaborator
//!
//! The search and the evaluator only ever talk to a position through
//! [`GameState`]. [`ChessGame`] is the production binding over `shakmaty`:
//! it adds the apply/undo history, the move log and repetition detection the
//! search relies on.

use std::fmt::Debug;

use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Piece, Position, Square};
use tracing::warn;

use crate::error::{GameError, GameResult};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// 8x8 board snapshot. Row 0 is the eighth rank, column 0 is the a-file.
pub type Grid = [[Option<Piece>; 8]; 8];

/// Occurrences of the same position that make a repetition draw
const REPETITION_COUNT: usize = 3;

/// Contract the search engine consumes.
///
/// `apply` followed by `undo` must restore the position exactly: board,
/// side to move, history length and terminal flags.
pub trait GameState {
    type Move: Clone + PartialEq + Debug;

    /// Legal moves for the side to move, in generation order
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Play `mv`, pushing it onto the history
    fn apply(&mut self, mv: &Self::Move);

    /// Take back the most recent `apply`
    fn undo(&mut self);

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    fn is_draw_by_repetition(&self) -> bool;

    fn side_to_move(&self) -> Color;

    fn board(&self) -> Grid;

    /// True when the side to move has no future: mated, stalemated or drawn
    fn is_terminal(&self) -> bool {
        self.is_checkmate() || self.is_stalemate() || self.is_draw_by_repetition()
    }
}

/// A chess game backed by `shakmaty`, with undo history
#[derive(Debug, Clone)]
pub struct ChessGame {
    position: Chess,
    /// Positions before each applied move, most recent last
    undo_stack: Vec<Chess>,
    move_log: Vec<Move>,
    /// Zobrist keys of every position reached, current one last
    keys: Vec<Zobrist64>,
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessGame {
    /// Standard starting position
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    /// Set up a game from a FEN string
    pub fn from_fen(fen: &str) -> GameResult<Self> {
        let fen: Fen = fen
            .trim()
            .parse()
            .map_err(|e| GameError::InvalidFen(format!("{fen}: {e}")))?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| GameError::IllegalPosition(e.to_string()))?;
        Ok(Self::from_position(position))
    }

    pub fn from_position(position: Chess) -> Self {
        let key = zobrist_key(&position);
        Self {
            position,
            undo_stack: Vec::new(),
            move_log: Vec::new(),
            keys: vec![key],
        }
    }

    /// Moves applied so far, oldest first
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// Number of applied moves still on the undo stack
    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// UCI notation of `mv`, e.g. `e2e4` or `e7e8q`
    pub fn uci(&self, mv: &Move) -> String {
        mv.to_uci(CastlingMode::Standard).to_string()
    }

    /// Parse and play a caller-supplied UCI move, rejecting illegal ones
    pub fn try_apply_uci(&mut self, uci: &str) -> GameResult<Move> {
        let illegal = || GameError::IllegalMove {
            uci: uci.to_string(),
            ply: self.move_log.len(),
        };
        let parsed: UciMove = uci.parse().map_err(|_| illegal())?;
        let mv = parsed.to_move(&self.position).map_err(|_| illegal())?;
        self.apply(&mv);
        Ok(mv)
    }

    /// Undo the most recent move, reporting an empty history
    pub fn try_undo(&mut self) -> GameResult<()> {
        let previous = self.undo_stack.pop().ok_or(GameError::NothingToUndo)?;
        self.position = previous;
        self.move_log.pop();
        self.keys.pop();
        Ok(())
    }

    /// How many times the current position has occurred in this game
    pub fn repetitions(&self) -> usize {
        match self.keys.last() {
            Some(current) => self.keys.iter().filter(|k| *k == current).count(),
            None => 0,
        }
    }

    /// Leaf count at `depth`, walked with apply/undo
    pub fn perft(&mut self, depth: u8) -> u64 {
        if depth == 0 {
            return 1;
        }
        let mut nodes = 0;
        for mv in self.legal_moves() {
            self.apply(&mv);
            nodes += self.perft(depth - 1);
            self.undo();
        }
        nodes
    }
}

impl GameState for ChessGame {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves().into_iter().collect()
    }

    fn apply(&mut self, mv: &Move) {
        self.undo_stack.push(self.position.clone());
        self.position.play_unchecked(mv);
        self.move_log.push(mv.clone());
        self.keys.push(zobrist_key(&self.position));
    }

    fn undo(&mut self) {
        if let Err(e) = self.try_undo() {
            warn!("undo ignored: {}", e);
        }
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_draw_by_repetition(&self) -> bool {
        self.repetitions() >= REPETITION_COUNT
    }

    fn side_to_move(&self) -> Color {
        self.position.turn()
    }

    fn board(&self) -> Grid {
        let board = self.position.board();
        let mut grid: Grid = [[None; 8]; 8];
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                let index = (7 - row) * 8 + col;
                *cell = board.piece_at(Square::new(index as u32));
            }
        }
        grid
    }
}

fn zobrist_key(position: &Chess) -> Zobrist64 {
    position.zobrist_hash(EnPassantMode::Legal)
}
