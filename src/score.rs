/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Neg};

/// A numerical evaluation of a position, in centipawns, relative to the side
/// to move.
///
/// Mate scores are encoded near the edges of the range: `MATE - ply` when
/// delivering mate, `-MATE + ply` when being mated, so that faster mates
/// compare as better.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Score(pub i32);

impl Score {
    /// Largest possible score, used as the unreachable bound in alpha-beta.
    pub const INF: Self = Self(i16::MAX as i32);

    /// The score of mating on this very ply.
    pub const MATE: Self = Self(Self::INF.0 - 1);

    /// The score of a drawn position.
    pub const DRAW: Self = Self(0);

    /// The lowest score still considered a mate.
    ///
    /// Anything between here and [`Score::MATE`] is "mate in `MATE - score` plies".
    pub const LOWEST_MATE: Self = Self(Self::MATE.0 - crate::search::MAX_DEPTH as i32);

    /// Returns `true` if this score represents a forced mate, by either side.
    ///
    /// # Example
    /// ```
    /// # use gambit::Score;
    /// assert!((-Score::MATE).is_mate());
    /// assert!(!Score::DRAW.is_mate());
    /// ```
    #[inline(always)]
    pub const fn is_mate(&self) -> bool {
        self.0.abs() >= Self::LOWEST_MATE.0
    }

    /// Converts a mate score to the number of full moves until mate.
    ///
    /// Positive if we deliver the mate, negative if we receive it.
    #[inline(always)]
    pub const fn moves_to_mate(&self) -> i32 {
        let plies = Self::MATE.0 - self.0.abs();
        let moves = (plies + 1) / 2;

        if self.0 > 0 {
            moves
        } else {
            -moves
        }
    }
}

macro_rules! impl_score_binary_op {
    ($trait:tt, $fn:ident, $assign_trait:tt, $assign_fn:ident) => {
        impl std::ops::$trait for Score {
            type Output = Self;
            #[inline(always)]
            fn $fn(self, rhs: Self) -> Self::Output {
                Self(self.0.$fn(rhs.0))
            }
        }

        impl std::ops::$trait<i32> for Score {
            type Output = Self;
            #[inline(always)]
            fn $fn(self, rhs: i32) -> Self::Output {
                Self(self.0.$fn(rhs))
            }
        }

        impl std::ops::$assign_trait for Score {
            #[inline(always)]
            fn $assign_fn(&mut self, rhs: Self) {
                *self = std::ops::$trait::$fn(*self, rhs);
            }
        }

        impl std::ops::$assign_trait<i32> for Score {
            #[inline(always)]
            fn $assign_fn(&mut self, rhs: i32) {
                *self = std::ops::$trait::$fn(*self, rhs);
            }
        }
    };
}

impl_score_binary_op!(Add, add, AddAssign, add_assign);
impl_score_binary_op!(Sub, sub, SubAssign, sub_assign);

impl Neg for Score {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl fmt::Display for Score {
    /// Mate scores display as `mate <n>`, others as plain centipawns.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mate() {
            write!(f, "mate {}", self.moves_to_mate())
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mate_scores() {
        // Mate on this ply.
        assert!(Score::MATE.is_mate());
        assert_eq!(Score::MATE.moves_to_mate(), 0);

        // Mate in one move (we mate after 1 ply).
        let mate_in_1 = Score::MATE - 1;
        assert!(mate_in_1.is_mate());
        assert_eq!(mate_in_1.moves_to_mate(), 1);

        // Mated in one move (opponent mates after 2 plies).
        let mated_in_1 = -(Score::MATE - 2);
        assert!(mated_in_1.is_mate());
        assert_eq!(mated_in_1.moves_to_mate(), -1);

        assert!(!Score::DRAW.is_mate());
        assert!(!Score(500).is_mate());
    }

    #[test]
    fn test_mate_ordering() {
        // A faster mate must score higher.
        assert!(Score::MATE - 1 > Score::MATE - 3);
        assert!(-(Score::MATE - 1) < -(Score::MATE - 3));
        assert!(Score::MATE - 3 > Score(900));
        assert!(Score::INF > Score::MATE);
    }

    #[test]
    fn test_arithmetic() {
        let score = Score(100);
        assert_eq!(score + 50, Score(150));
        assert_eq!(score - Score(25), Score(75));
        assert_eq!(-score, Score(-100));

        let mut score = Score::DRAW;
        score += 10;
        score -= Score(4);
        assert_eq!(score, Score(6));
    }
}
