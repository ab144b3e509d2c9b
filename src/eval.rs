/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Color, Piece, PieceKind, Position, Score};

/// Bonus for the opponent being in check, in centipawns.
const CHECK_BONUS: i32 = 50;

/// A static evaluator over a [`Position`].
///
/// The evaluation is material counting plus a small term for giving check,
/// always from the perspective of the side to move, as negamax requires.
pub struct Evaluator<'a> {
    position: &'a Position,
}

impl<'a> Evaluator<'a> {
    /// Creates a new [`Evaluator`] over the provided [`Position`].
    #[inline(always)]
    pub const fn new(position: &'a Position) -> Self {
        Self { position }
    }

    /// Evaluates the position, relative to the side to move.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Evaluator, Position, Score};
    /// let position = Position::new();
    /// assert_eq!(Evaluator::new(&position).eval(), Score::DRAW);
    /// ```
    pub fn eval(&self) -> Score {
        let color = self.position.side_to_move();
        let material = self.material(color) - self.material(color.opponent());

        // The side to move being in check is a liability, not an asset.
        let check = if self.position.is_in_check() {
            -CHECK_BONUS
        } else {
            0
        };

        Score(material + check)
    }

    /// Sums the value of all of `color`'s pieces.
    fn material(&self, color: Color) -> i32 {
        PieceKind::all()
            .into_iter()
            .map(|kind| {
                let piece = Piece::new(color, kind);
                self.position.piece(piece).population() as i32 * kind.value()
            })
            .sum()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_startpos_is_balanced() {
        let position = Position::new();
        assert_eq!(Evaluator::new(&position).eval(), Score::DRAW);
    }

    #[test]
    fn test_material_advantage() {
        // White is up a Rook; the eval flips sign with the side to move.
        let white_to_move = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert_eq!(Evaluator::new(&white_to_move).eval(), Score(500));

        let black_to_move = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 0 1").unwrap();
        assert_eq!(Evaluator::new(&black_to_move).eval(), Score(-500));
    }

    #[test]
    fn test_check_penalty() {
        // Equal material, but the Black King is in check from the Rook.
        let position = Position::from_fen("4k3/8/8/8/4R3/8/r7/4K3 b - - 0 1").unwrap();
        assert_eq!(Evaluator::new(&position).eval(), Score(-50));
    }
}
