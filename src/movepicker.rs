/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Move, MoveList, PieceKind, Position, MAX_NUM_MOVES};

/// Yields moves in a goodness-first order, so alpha-beta cuts off early.
///
/// Ordering is MVV-LVA: captures of valuable victims by cheap attackers come
/// first, promotions are boosted by the promoted piece, quiet moves come
/// last. Sorting is lazy; each call to `next` selects the best remaining
/// move, so a beta cutoff after a few moves never pays for a full sort.
pub struct MovePicker {
    moves: MoveList,
    scores: [i32; MAX_NUM_MOVES],
    index: usize,
}

impl MovePicker {
    /// Creates a new [`MovePicker`] over the provided moves.
    pub fn new(position: &Position, moves: MoveList) -> Self {
        let mut scores = [0; MAX_NUM_MOVES];
        for (i, mv) in moves.iter().enumerate() {
            scores[i] = score_move(position, *mv);
        }

        Self {
            moves,
            scores,
            index: 0,
        }
    }
}

impl Iterator for MovePicker {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.moves.len() {
            return None;
        }

        // Selection: swap the best remaining move to the front.
        let mut best = self.index;
        for i in self.index + 1..self.moves.len() {
            if self.scores[i] > self.scores[best] {
                best = i;
            }
        }
        self.moves.swap(self.index, best);
        self.scores.swap(self.index, best);

        let mv = self.moves[self.index];
        self.index += 1;
        Some(mv)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.moves.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MovePicker {}

/// Scores `mv` for ordering purposes. Higher is searched sooner.
fn score_move(position: &Position, mv: Move) -> i32 {
    let mut score = 0;

    if mv.is_capture() {
        // En passant's victim is not on the destination square.
        let victim = if mv.is_en_passant() {
            PieceKind::Pawn
        } else {
            match position.piece_at(mv.to()) {
                Some(piece) => piece.kind(),
                None => PieceKind::Pawn,
            }
        };

        let attacker = match position.piece_at(mv.from()) {
            Some(piece) => piece.kind(),
            None => PieceKind::Pawn,
        };

        // Weighting the victim 10x keeps every capture of a more valuable
        // victim above every capture of a lesser one.
        score += 10 * victim.value() - attacker.value();
    }

    if let Some(promotion) = mv.promotion() {
        score += promotion.value();
    }

    score
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_captures_before_quiets() {
        // White can capture the Queen, capture a Pawn, or play quiet moves.
        let position =
            Position::from_fen("4k3/8/3q1p2/8/4N3/8/8/4K3 w - - 0 1").unwrap();
        let picker = MovePicker::new(&position, position.legal_moves());
        let ordered: Vec<_> = picker.map(|mv| mv.to_string()).collect();

        assert_eq!(ordered[0], "e4d6", "Queen capture must come first");
        assert_eq!(ordered[1], "e4f6", "Pawn capture must come second");
    }

    #[test]
    fn test_cheapest_attacker_first() {
        // Pawn takes Rook should order above Knight takes Rook.
        let position =
            Position::from_fen("4k3/8/8/8/2r5/1P2N3/8/4K3 w - - 0 1").unwrap();
        let picker = MovePicker::new(&position, position.legal_moves());
        let ordered: Vec<_> = picker.map(|mv| mv.to_string()).collect();

        assert_eq!(ordered[0], "b3c4");
        assert_eq!(ordered[1], "e3c4");
    }

    #[test]
    fn test_yields_every_move_once() {
        let position = Position::from_fen(crate::FEN_KIWIPETE).unwrap();
        let moves = position.legal_moves();
        let picked: Vec<_> = MovePicker::new(&position, moves.clone()).collect();

        assert_eq!(picked.len(), moves.len());
        for mv in moves {
            assert!(picked.contains(&mv));
        }
    }
}
