//! Synthetic game trees for exercising the search without chess rules.
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shakmaty::Color;
use torre::{Evaluator, GameState, Grid, Score, CHECKMATE};

#[derive(Debug, Clone)]
pub struct Node {
    pub children: Vec<usize>,
    /// White-positive static value
    pub value: Score,
    /// The side to move here is checkmated
    pub mated: bool,
}

/// A game whose positions are nodes of an explicit tree; a move is the
/// index of the child node it leads to.
#[derive(Debug, Clone)]
pub struct TreeGame {
    pub nodes: Vec<Node>,
    path: Vec<usize>,
    root_side: Color,
    pub applies: usize,
    pub undos: usize,
}

impl TreeGame {
    pub fn new(root_side: Color) -> Self {
        Self {
            nodes: vec![Node { children: Vec::new(), value: 0, mated: false }],
            path: vec![0],
            root_side,
            applies: 0,
            undos: 0,
        }
    }

    /// Add a child of `parent` with a White-positive value
    pub fn add(&mut self, parent: usize, value: Score) -> usize {
        self.push(parent, Node { children: Vec::new(), value, mated: false })
    }

    /// Add a child of `parent` in which the side to move is mated
    pub fn add_mate(&mut self, parent: usize) -> usize {
        self.push(parent, Node { children: Vec::new(), value: 0, mated: true })
    }

    fn push(&mut self, parent: usize, node: Node) -> usize {
        let id = self.nodes.len();
        self.nodes.push(node);
        self.nodes[parent].children.push(id);
        id
    }

    /// Random tree: every node above `depth` has 1..=`branching` children;
    /// about one interior child in ten is a mate.
    pub fn random(seed: u64, depth: u8, branching: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let side = if rng.gen_bool(0.5) { Color::White } else { Color::Black };
        let mut tree = Self::new(side);
        let mut frontier = vec![0usize];
        for level in 0..depth {
            let mut next = Vec::new();
            for parent in frontier {
                let count = rng.gen_range(1..=branching);
                for _ in 0..count {
                    let is_last_level = level + 1 == depth;
                    if !is_last_level && rng.gen_ratio(1, 10) {
                        tree.add_mate(parent);
                    } else {
                        let id = tree.add(parent, rng.gen_range(-60..=60));
                        next.push(id);
                    }
                }
            }
            frontier = next;
        }
        tree
    }

    pub fn current(&self) -> usize {
        *self.path.last().expect("path never empty")
    }

    pub fn ply(&self) -> usize {
        self.path.len() - 1
    }

    pub fn root_moves(&self) -> Vec<usize> {
        self.nodes[0].children.clone()
    }

    fn side_at(&self, ply: usize) -> Color {
        if ply % 2 == 0 {
            self.root_side
        } else {
            self.root_side.other()
        }
    }

    /// Independent minimax oracle: White-positive value of `node` searched
    /// `depth` plies with `side` to move
    pub fn minimax(&self, node: usize, depth: u8, side: Color) -> Score {
        let n = &self.nodes[node];
        if n.mated {
            return match side {
                Color::White => -CHECKMATE,
                Color::Black => CHECKMATE,
            };
        }
        if depth == 0 || n.children.is_empty() {
            return n.value;
        }
        let values = n
            .children
            .iter()
            .map(|&c| self.minimax(c, depth - 1, side.other()));
        match side {
            Color::White => values.max().unwrap(),
            Color::Black => values.min().unwrap(),
        }
    }

    pub fn root_side(&self) -> Color {
        self.root_side
    }
}

impl GameState for TreeGame {
    type Move = usize;

    fn legal_moves(&self) -> Vec<usize> {
        self.nodes[self.current()].children.clone()
    }

    fn apply(&mut self, mv: &usize) {
        assert!(
            self.nodes[self.current()].children.contains(mv),
            "move {mv} is not a child of node {}",
            self.current()
        );
        self.path.push(*mv);
        self.applies += 1;
    }

    fn undo(&mut self) {
        assert!(self.path.len() > 1, "undo past the root");
        self.path.pop();
        self.undos += 1;
    }

    fn is_checkmate(&self) -> bool {
        self.nodes[self.current()].mated
    }

    fn is_stalemate(&self) -> bool {
        false
    }

    fn is_draw_by_repetition(&self) -> bool {
        false
    }

    fn side_to_move(&self) -> Color {
        self.side_at(self.ply())
    }

    fn board(&self) -> Grid {
        [[None; 8]; 8]
    }
}

/// Reads node values straight from the tree
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeScores;

impl Evaluator<TreeGame> for TreeScores {
    fn evaluate(&self, game: &TreeGame) -> Score {
        let node = &game.nodes[game.current()];
        if node.mated {
            match game.side_to_move() {
                Color::White => -CHECKMATE,
                Color::Black => CHECKMATE,
            }
        } else {
            node.value
        }
    }
}
