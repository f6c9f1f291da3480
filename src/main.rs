//! Torre self-play driver.
//!
//! Plays the engine against itself from a position. Each move is searched on
//! a worker thread while the main loop keeps ticking at a fixed frame rate,
//! the way an interactive front end would poll it.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Parser;
use shakmaty::Color;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use torre::eval::score_in_pawns;
use torre::game::START_FEN;
use torre::search::{MoveOrder, MoveSelector, SearchOutcome, SearchParams};
use torre::{ChessGame, Evaluator, GameState, MaterialEvaluator, PieceSquareEvaluator};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Starting position
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    /// Search depth in plies
    #[arg(short, long, default_value_t = 3)]
    depth: u8,

    /// Seed for root move shuffling (entropy when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many plies
    #[arg(short, long, default_value_t = 40)]
    plies: u32,

    /// Frame rate of the polling loop
    #[arg(long, default_value_t = 15)]
    fps: u32,

    /// Search on the main thread instead of polling a worker
    #[arg(long)]
    sync: bool,

    /// Score material only, without piece-square tables
    #[arg(long)]
    material_only: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if args.fps == 0 {
        bail!("--fps must be at least 1");
    }

    let order = match args.seed {
        Some(seed) => MoveOrder::Seeded(seed),
        None => MoveOrder::Shuffled,
    };
    let params = SearchParams::new().depth(args.depth).move_order(order);
    let game = ChessGame::from_fen(&args.fen)?;

    if args.material_only {
        play(game, MoveSelector::with_evaluator(params, MaterialEvaluator), &args)
    } else {
        play(game, MoveSelector::with_evaluator(params, PieceSquareEvaluator), &args)
    }
}

fn play<E>(mut game: ChessGame, mut selector: MoveSelector<E>, args: &Args) -> Result<()>
where
    E: Evaluator<ChessGame> + Clone + Send + 'static,
{
    let frame = Duration::from_secs(1) / args.fps;

    for ply in 0..args.plies {
        if let Some(result) = game_over(&game) {
            info!(ply, "{}", result);
            return Ok(());
        }
        let legal_moves = game.legal_moves();

        let started = Instant::now();
        let (report, frames) = if args.sync {
            (Some(selector.search(&mut game, &legal_moves)), 0)
        } else {
            poll_search(&mut selector, game.clone(), &legal_moves, frame)
        };
        let score = report.as_ref().map_or(0, |r| r.score);

        let Some(mv) = move_or_random(&mut selector, report, &legal_moves) else {
            bail!("no legal moves in a position that is not over");
        };

        info!(
            ply,
            side = ?game.side_to_move(),
            mv = %game.uci(&mv),
            score = score_in_pawns(score),
            frames,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "move"
        );
        game.apply(&mv);
    }

    let line: Vec<String> = game.move_log().iter().map(|mv| game.uci(mv)).collect();
    match game_over(&game) {
        Some(result) => info!(ply = args.plies, moves = %line.join(" "), "{}", result),
        None => info!(plies = args.plies, moves = %line.join(" "), "ply limit reached"),
    }
    Ok(())
}

/// Launch the search in the background and tick frames until it reports.
/// A worker that dies without reporting yields `None`.
fn poll_search<G, E>(
    selector: &mut MoveSelector<E>,
    game: G,
    legal_moves: &[G::Move],
    frame: Duration,
) -> (Option<SearchOutcome<G::Move>>, u32)
where
    G: GameState + Send + 'static,
    G::Move: Send + 'static,
    E: Evaluator<G> + Clone + Send + 'static,
{
    let mut task = selector.select_best_move_async(game, legal_moves);
    let mut frames = 0;
    loop {
        match task.try_result() {
            Ok(Some(report)) => return (Some(report), frames),
            Ok(None) => {}
            Err(e) => {
                warn!(frames, "{}", e);
                return (None, frames);
            }
        }
        frames += 1;
        thread::sleep(frame);
    }
}

/// The searched move, or a random legal one when the search has none
fn move_or_random<M: Clone, E>(
    selector: &mut MoveSelector<E>,
    report: Option<SearchOutcome<M>>,
    legal_moves: &[M],
) -> Option<M> {
    match report.and_then(|r| r.best_move) {
        Some(mv) => Some(mv),
        None => {
            warn!("engine returned no move, playing a random one");
            selector.select_random_move(legal_moves)
        }
    }
}

fn game_over(game: &ChessGame) -> Option<&'static str> {
    if game.is_checkmate() {
        Some(match game.side_to_move() {
            Color::White => "Black wins by checkmate",
            Color::Black => "White wins by checkmate",
        })
    } else if game.is_stalemate() {
        Some("Stalemate")
    } else if game.is_draw_by_repetition() {
        Some("Draw by repetition")
    } else {
        None
    }
}
