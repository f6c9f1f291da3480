//! Static evaluation - material plus piece-square tables
//!
//! Scores are from White's point of view: positive favours White, negative
//! favours Black. Units are tenths of a pawn so the positional term stays
//! exact integer arithmetic.

use shakmaty::{Color, Role};

use crate::game::{GameState, Grid};

/// Position score in tenths of a pawn, White-positive
pub type Score = i32;

/// Sentinel for a mated side to move (1000 pawns)
pub const CHECKMATE: Score = 10_000;
/// Sentinel for stalemate and repetition draws
pub const STALEMATE: Score = 0;

/// Tenths per pawn of material
const MATERIAL_SCALE: Score = 10;

// ============================================================================
// MATERIAL VALUES (in pawns)
// ============================================================================
const PAWN_VALUE: Score = 1;
const KNIGHT_VALUE: Score = 3;
const BISHOP_VALUE: Score = 3;
const ROOK_VALUE: Score = 5;
const QUEEN_VALUE: Score = 9;
const KING_VALUE: Score = 0;

// ============================================================================
// PIECE-SQUARE TABLES
// ============================================================================
// Row 0 is the eighth rank, as in `Grid`. Each point is worth a tenth of a
// pawn. Only pawns are colour dependent.

const KNIGHT_PST: [[Score; 8]; 8] = [
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 2, 2, 2, 2, 2, 2, 1],
    [1, 2, 3, 3, 3, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 3, 3, 3, 2, 1],
    [1, 2, 2, 2, 2, 2, 2, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
];

/// Long diagonals
const BISHOP_PST: [[Score; 8]; 8] = [
    [4, 3, 2, 1, 1, 2, 3, 4],
    [3, 4, 3, 2, 2, 3, 4, 3],
    [2, 3, 4, 3, 3, 4, 3, 2],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [2, 3, 4, 3, 3, 4, 3, 2],
    [3, 4, 3, 2, 2, 3, 4, 3],
    [4, 3, 2, 1, 1, 2, 3, 4],
];

/// Back ranks and seventh ranks, then the centre
const ROOK_PST: [[Score; 8]; 8] = [
    [4, 3, 4, 4, 4, 4, 3, 4],
    [4, 4, 4, 4, 4, 4, 4, 4],
    [1, 1, 2, 3, 3, 2, 1, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 1, 2, 3, 3, 2, 1, 1],
    [4, 4, 4, 4, 4, 4, 4, 4],
    [4, 3, 4, 4, 4, 4, 3, 4],
];

/// Not vertically symmetric: rows 1 and 6 differ
const QUEEN_PST: [[Score; 8]; 8] = [
    [1, 1, 1, 3, 1, 1, 1, 1],
    [1, 2, 3, 3, 3, 1, 1, 1],
    [1, 4, 3, 3, 3, 4, 2, 1],
    [1, 2, 3, 3, 3, 2, 2, 1],
    [1, 2, 3, 3, 3, 2, 2, 1],
    [1, 4, 3, 3, 3, 4, 2, 1],
    [1, 1, 2, 3, 3, 1, 1, 1],
    [1, 1, 1, 3, 1, 1, 1, 1],
];

/// White pawns: advance, and keep the centre pawns off their home squares
const WHITE_PAWN_PST: [[Score; 8]; 8] = [
    [9, 9, 9, 9, 9, 9, 9, 9],
    [8, 8, 8, 8, 8, 8, 8, 8],
    [3, 4, 5, 6, 6, 5, 4, 3],
    [2, 3, 4, 5, 5, 4, 3, 2],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [1, 1, 2, 3, 3, 2, 1, 1],
    [1, 1, 1, 0, 0, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
];

/// Black pawns: the white table reflected vertically
const BLACK_PAWN_PST: [[Score; 8]; 8] = [
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 0, 0, 1, 1, 1],
    [1, 1, 2, 3, 3, 2, 1, 1],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [2, 3, 4, 5, 5, 4, 3, 2],
    [3, 4, 5, 6, 6, 5, 4, 3],
    [8, 8, 8, 8, 8, 8, 8, 8],
    [9, 9, 9, 9, 9, 9, 9, 9],
];

/// Terminal flags reported by the position collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Terminal {
    pub checkmate: bool,
    pub stalemate: bool,
    pub repetition: bool,
}

impl Terminal {
    pub fn of<G: GameState>(game: &G) -> Self {
        Self {
            checkmate: game.is_checkmate(),
            stalemate: game.is_stalemate(),
            repetition: game.is_draw_by_repetition(),
        }
    }
}

/// Material value of a role, in pawns
pub fn material_value(role: Role) -> Score {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => KING_VALUE,
    }
}

/// Piece-square bonus in tenths of a pawn. Kings have no table.
pub fn positional_bonus(role: Role, color: Color, row: usize, col: usize) -> Score {
    match role {
        Role::Pawn => match color {
            Color::White => WHITE_PAWN_PST[row][col],
            Color::Black => BLACK_PAWN_PST[row][col],
        },
        Role::Knight => KNIGHT_PST[row][col],
        Role::Bishop => BISHOP_PST[row][col],
        Role::Rook => ROOK_PST[row][col],
        Role::Queen => QUEEN_PST[row][col],
        Role::King => 0,
    }
}

/// Sentinel score for a terminal position, if it is one
fn terminal_score(terminal: Terminal, side_to_move: Color) -> Option<Score> {
    if terminal.checkmate {
        // the side to move is the one mated
        Some(match side_to_move {
            Color::White => -CHECKMATE,
            Color::Black => CHECKMATE,
        })
    } else if terminal.stalemate || terminal.repetition {
        Some(STALEMATE)
    } else {
        None
    }
}

/// Full evaluation: terminal sentinels, then material plus piece-square bonus
pub fn evaluate_board(board: &Grid, terminal: Terminal, side_to_move: Color) -> Score {
    if let Some(score) = terminal_score(terminal, side_to_move) {
        return score;
    }

    let mut score = 0;
    for (row, cells) in board.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if let Some(piece) = cell {
                let value = material_value(piece.role) * MATERIAL_SCALE
                    + positional_bonus(piece.role, piece.color, row, col);
                match piece.color {
                    Color::White => score += value,
                    Color::Black => score -= value,
                }
            }
        }
    }
    score
}

/// Material balance only, ignoring squares
pub fn score_material(board: &Grid) -> Score {
    board
        .iter()
        .flatten()
        .flatten()
        .map(|piece| {
            let value = material_value(piece.role) * MATERIAL_SCALE;
            match piece.color {
                Color::White => value,
                Color::Black => -value,
            }
        })
        .sum()
}

/// Score in pawns, for display
pub fn score_in_pawns(score: Score) -> f32 {
    score as f32 / MATERIAL_SCALE as f32
}

/// Static scorer used at the search horizon
pub trait Evaluator<G: GameState> {
    /// White-positive score of the current position
    fn evaluate(&self, game: &G) -> Score;
}

/// Material plus piece-square tables
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareEvaluator;

impl<G: GameState> Evaluator<G> for PieceSquareEvaluator {
    fn evaluate(&self, game: &G) -> Score {
        evaluate_board(&game.board(), Terminal::of(game), game.side_to_move())
    }
}

/// Material only, still honouring the terminal sentinels
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl<G: GameState> Evaluator<G> for MaterialEvaluator {
    fn evaluate(&self, game: &G) -> Score {
        let terminal = Terminal::of(game);
        terminal_score(terminal, game.side_to_move()).unwrap_or_else(|| score_material(&game.board()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Piece;

    fn empty() -> Grid {
        [[None; 8]; 8]
    }

    fn put(grid: &mut Grid, row: usize, col: usize, color: Color, role: Role) {
        grid[row][col] = Some(Piece { color, role });
    }

    #[test]
    fn black_pawn_table_is_white_reflected() {
        for row in 0..8 {
            assert_eq!(BLACK_PAWN_PST[row], WHITE_PAWN_PST[7 - row]);
        }
    }

    #[test]
    fn lone_kings_score_zero() {
        let mut grid = empty();
        put(&mut grid, 7, 4, Color::White, Role::King);
        put(&mut grid, 0, 4, Color::Black, Role::King);
        assert_eq!(evaluate_board(&grid, Terminal::default(), Color::White), 0);
    }

    #[test]
    fn knight_value_includes_square_bonus() {
        let mut grid = empty();
        // d5: row 3, col 3 -> bonus 4
        put(&mut grid, 3, 3, Color::White, Role::Knight);
        assert_eq!(evaluate_board(&grid, Terminal::default(), Color::Black), 34);

        // a8 corner -> bonus 1, black piece counts negative
        let mut grid = empty();
        put(&mut grid, 0, 0, Color::Black, Role::Knight);
        assert_eq!(evaluate_board(&grid, Terminal::default(), Color::White), -31);
    }

    #[test]
    fn pawn_bonus_depends_on_colour() {
        let mut grid = empty();
        // white pawn on the seventh rank, black pawn on its own seventh rank
        put(&mut grid, 1, 0, Color::White, Role::Pawn);
        put(&mut grid, 1, 7, Color::Black, Role::Pawn);
        // white: 10 + 8, black: 10 + 1
        assert_eq!(evaluate_board(&grid, Terminal::default(), Color::White), 7);
    }

    #[test]
    fn terminal_flags_override_material() {
        let mut grid = empty();
        put(&mut grid, 7, 3, Color::White, Role::Queen);

        let mate = Terminal { checkmate: true, ..Terminal::default() };
        assert_eq!(evaluate_board(&grid, mate, Color::White), -CHECKMATE);
        assert_eq!(evaluate_board(&grid, mate, Color::Black), CHECKMATE);

        let stale = Terminal { stalemate: true, ..Terminal::default() };
        let repeated = Terminal { repetition: true, ..Terminal::default() };
        assert_eq!(evaluate_board(&grid, stale, Color::White), STALEMATE);
        assert_eq!(evaluate_board(&grid, repeated, Color::Black), STALEMATE);
    }

    #[test]
    fn material_only_ignores_squares() {
        let mut grid = empty();
        put(&mut grid, 3, 3, Color::White, Role::Knight);
        put(&mut grid, 0, 0, Color::Black, Role::Rook);
        assert_eq!(score_material(&grid), 30 - 50);
        assert_eq!(score_in_pawns(score_material(&grid)), -2.0);
    }
}
