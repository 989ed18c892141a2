//! 7-bag piece generation.
//!
//! Pieces are drawn front-to-back from a shuffled bag of all seven kinds;
//! the bag refills with a fresh shuffle only when empty. Every bag is a
//! permutation, which bounds the gap between two same-kind pieces to 12.

use tracing::trace;

use tetrion_types::{PieceKind, RotationState, ALL_KINDS, SPAWN_Y};

use crate::piece::{spawn_x, Piece};
use crate::rng::SeededRng;

/// Bag-based piece source with an injectable seeded random source.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    bag: [PieceKind; 7],
    /// Next draw position; 7 means exhausted.
    cursor: usize,
    rng: SeededRng,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SeededRng::new(seed))
    }

    pub fn with_rng(rng: SeededRng) -> Self {
        let mut generator = Self {
            bag: ALL_KINDS,
            cursor: 7,
            rng,
        };
        generator.refill();
        generator
    }

    fn refill(&mut self) {
        self.bag = ALL_KINDS;
        self.rng.shuffle(&mut self.bag);
        self.cursor = 0;
        trace!(bag = ?self.bag, "bag refilled");
    }

    /// Draw the next piece in spawn orientation.
    pub fn next_piece(&mut self) -> Piece {
        if self.cursor >= self.bag.len() {
            self.refill();
        }
        let kind = self.bag[self.cursor];
        self.cursor += 1;
        self.piece_of(kind)
    }

    /// Canonical spawn-state piece for a specific kind, bypassing the bag.
    pub fn piece_of(&self, kind: PieceKind) -> Piece {
        Piece::spawn(kind)
    }

    /// Rebuild spawn position/rotation on an existing piece without
    /// touching its kind - used when a held piece re-enters play.
    pub fn reset_spawn(&self, piece: &mut Piece) {
        piece.x = spawn_x(piece.kind);
        piece.y = SPAWN_Y;
        piece.rotation = RotationState::Spawn;
    }

    /// Kind of the next draw, without consuming it.
    pub fn peek(&self) -> Option<PieceKind> {
        self.bag.get(self.cursor).copied()
    }

    /// Current RNG state, usable to replay or reseed.
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetrion_types::RotationState;

    #[test]
    fn each_bag_is_a_full_permutation() {
        let mut generator = PieceGenerator::new(99);
        for _ in 0..20 {
            let mut drawn: Vec<PieceKind> = (0..7).map(|_| generator.next_piece().kind).collect();
            drawn.sort_by_key(|k| k.cell_id());
            assert_eq!(drawn, ALL_KINDS.to_vec());
        }
    }

    #[test]
    fn peek_matches_next_draw() {
        let mut generator = PieceGenerator::new(5);
        for _ in 0..14 {
            let peeked = generator.peek();
            let drawn = generator.next_piece().kind;
            if let Some(kind) = peeked {
                assert_eq!(kind, drawn);
            }
        }
    }

    #[test]
    fn same_seed_replays_the_sequence() {
        let mut a = PieceGenerator::new(123);
        let mut b = PieceGenerator::new(123);
        for _ in 0..30 {
            assert_eq!(a.next_piece().kind, b.next_piece().kind);
        }
    }

    #[test]
    fn reset_spawn_restores_spawn_state_keeping_kind() {
        let generator = PieceGenerator::new(1);
        let mut piece = Piece::spawn(PieceKind::L);
        piece.x = 7;
        piece.y = 12;
        piece.rotation = RotationState::Flipped;

        generator.reset_spawn(&mut piece);
        assert_eq!(piece.kind, PieceKind::L);
        assert_eq!((piece.x, piece.y), (3, SPAWN_Y));
        assert_eq!(piece.rotation, RotationState::Spawn);
    }
}
