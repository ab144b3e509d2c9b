/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use super::{Bitboard, Color};

/// Represents a single square on an 8x8 chess board.
///
/// Internally, this is a single `u8` in the range `[0, 63]`, using
/// [Little-Endian Rank-File Mapping](https://www.chessprogramming.org/Square_Mapping_Considerations#Little-Endian_Rank-File_Mapping):
/// `A1` is index `0`, `B1` is `1`, and `H8` is `63`.
///
/// The lower 3 bits are the [`File`] and the next 3 bits are the [`Rank`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    pub const A1: Self = Self::new(File::A, Rank::ONE);
    pub const B1: Self = Self::new(File::B, Rank::ONE);
    pub const C1: Self = Self::new(File::C, Rank::ONE);
    pub const D1: Self = Self::new(File::D, Rank::ONE);
    pub const E1: Self = Self::new(File::E, Rank::ONE);
    pub const F1: Self = Self::new(File::F, Rank::ONE);
    pub const G1: Self = Self::new(File::G, Rank::ONE);
    pub const H1: Self = Self::new(File::H, Rank::ONE);

    pub const A2: Self = Self::new(File::A, Rank::TWO);
    pub const B2: Self = Self::new(File::B, Rank::TWO);
    pub const C2: Self = Self::new(File::C, Rank::TWO);
    pub const D2: Self = Self::new(File::D, Rank::TWO);
    pub const E2: Self = Self::new(File::E, Rank::TWO);
    pub const F2: Self = Self::new(File::F, Rank::TWO);
    pub const G2: Self = Self::new(File::G, Rank::TWO);
    pub const H2: Self = Self::new(File::H, Rank::TWO);

    pub const A3: Self = Self::new(File::A, Rank::THREE);
    pub const B3: Self = Self::new(File::B, Rank::THREE);
    pub const C3: Self = Self::new(File::C, Rank::THREE);
    pub const D3: Self = Self::new(File::D, Rank::THREE);
    pub const E3: Self = Self::new(File::E, Rank::THREE);
    pub const F3: Self = Self::new(File::F, Rank::THREE);
    pub const G3: Self = Self::new(File::G, Rank::THREE);
    pub const H3: Self = Self::new(File::H, Rank::THREE);

    pub const A4: Self = Self::new(File::A, Rank::FOUR);
    pub const B4: Self = Self::new(File::B, Rank::FOUR);
    pub const C4: Self = Self::new(File::C, Rank::FOUR);
    pub const D4: Self = Self::new(File::D, Rank::FOUR);
    pub const E4: Self = Self::new(File::E, Rank::FOUR);
    pub const F4: Self = Self::new(File::F, Rank::FOUR);
    pub const G4: Self = Self::new(File::G, Rank::FOUR);
    pub const H4: Self = Self::new(File::H, Rank::FOUR);

    pub const A5: Self = Self::new(File::A, Rank::FIVE);
    pub const B5: Self = Self::new(File::B, Rank::FIVE);
    pub const C5: Self = Self::new(File::C, Rank::FIVE);
    pub const D5: Self = Self::new(File::D, Rank::FIVE);
    pub const E5: Self = Self::new(File::E, Rank::FIVE);
    pub const F5: Self = Self::new(File::F, Rank::FIVE);
    pub const G5: Self = Self::new(File::G, Rank::FIVE);
    pub const H5: Self = Self::new(File::H, Rank::FIVE);

    pub const A6: Self = Self::new(File::A, Rank::SIX);
    pub const B6: Self = Self::new(File::B, Rank::SIX);
    pub const C6: Self = Self::new(File::C, Rank::SIX);
    pub const D6: Self = Self::new(File::D, Rank::SIX);
    pub const E6: Self = Self::new(File::E, Rank::SIX);
    pub const F6: Self = Self::new(File::F, Rank::SIX);
    pub const G6: Self = Self::new(File::G, Rank::SIX);
    pub const H6: Self = Self::new(File::H, Rank::SIX);

    pub const A7: Self = Self::new(File::A, Rank::SEVEN);
    pub const B7: Self = Self::new(File::B, Rank::SEVEN);
    pub const C7: Self = Self::new(File::C, Rank::SEVEN);
    pub const D7: Self = Self::new(File::D, Rank::SEVEN);
    pub const E7: Self = Self::new(File::E, Rank::SEVEN);
    pub const F7: Self = Self::new(File::F, Rank::SEVEN);
    pub const G7: Self = Self::new(File::G, Rank::SEVEN);
    pub const H7: Self = Self::new(File::H, Rank::SEVEN);

    pub const A8: Self = Self::new(File::A, Rank::EIGHT);
    pub const B8: Self = Self::new(File::B, Rank::EIGHT);
    pub const C8: Self = Self::new(File::C, Rank::EIGHT);
    pub const D8: Self = Self::new(File::D, Rank::EIGHT);
    pub const E8: Self = Self::new(File::E, Rank::EIGHT);
    pub const F8: Self = Self::new(File::F, Rank::EIGHT);
    pub const G8: Self = Self::new(File::G, Rank::EIGHT);
    pub const H8: Self = Self::new(File::H, Rank::EIGHT);

    /// Total number of squares on the board.
    pub const COUNT: usize = 64;

    const FILE_MASK: u8 = 0b0000_0111;
    const RANK_MASK: u8 = 0b0011_1000;

    /// Returns an iterator over all squares, from `A1` through `H8`.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Creates a new [`Square`] from the provided [`File`] and [`Rank`].
    ///
    /// # Example
    /// ```
    /// # use gambit::{Square, File, Rank};
    /// assert_eq!(Square::new(File::E, Rank::FOUR), Square::E4);
    /// ```
    #[inline(always)]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(rank.0 << 3 | file.0)
    }

    /// Creates a new [`Square`] from an index in `[0, 63]`.
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index < Self::COUNT {
            Ok(Self(index as u8))
        } else {
            bail!("Invalid Square index: must be in [0, 63]. Got {index}")
        }
    }

    /// Creates a new [`Square`] from an index, without bounds checking.
    ///
    /// The caller guarantees `index < 64`.
    #[inline(always)]
    pub const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < Self::COUNT, "Square index must be in [0, 63]");
        Self(index as u8)
    }

    /// Returns the inner `u8` of this [`Square`].
    #[inline(always)]
    pub const fn inner(&self) -> u8 {
        self.0
    }

    /// Returns this [`Square`]'s index, for indexing into 64-element tables.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the [`File`] of this [`Square`].
    #[inline(always)]
    pub const fn file(&self) -> File {
        File(self.0 & Self::FILE_MASK)
    }

    /// Returns the [`Rank`] of this [`Square`].
    #[inline(always)]
    pub const fn rank(&self) -> Rank {
        Rank((self.0 & Self::RANK_MASK) >> 3)
    }

    /// Returns a [`Bitboard`] with only this [`Square`]'s bit set.
    #[inline(always)]
    pub const fn bitboard(&self) -> Bitboard {
        Bitboard::from_square(*self)
    }

    /// Offsets this [`Square`] by the provided file and rank deltas,
    /// returning `None` if the result would fall off the board.
    ///
    /// # Example
    /// ```
    /// # use gambit::Square;
    /// assert_eq!(Square::E4.offset(1, 1), Some(Square::F5));
    /// assert_eq!(Square::A1.offset(-1, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file().0 as i8 + file_delta;
        let rank = self.rank().0 as i8 + rank_delta;

        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            None
        } else {
            Some(Self::new(File(file as u8), Rank(rank as u8)))
        }
    }

    /// Offsets this [`Square`] forward by `n` ranks, relative to `color`.
    ///
    /// "Forward" is towards rank 8 for White and towards rank 1 for Black.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Color, Square};
    /// assert_eq!(Square::E2.forward_by(Color::White, 2), Some(Square::E4));
    /// assert_eq!(Square::E7.forward_by(Color::Black, 2), Some(Square::E5));
    /// ```
    #[inline(always)]
    pub const fn forward_by(&self, color: Color, n: u8) -> Option<Self> {
        self.offset(0, n as i8 * color.negation_multiplier())
    }

    /// Offsets this [`Square`] backward by `n` ranks, relative to `color`.
    #[inline(always)]
    pub const fn backward_by(&self, color: Color, n: u8) -> Option<Self> {
        self.offset(0, -(n as i8) * color.negation_multiplier())
    }

    /// Number of ranks between `self` and `other`.
    #[inline(always)]
    pub const fn distance_ranks(&self, other: Self) -> u8 {
        self.rank().0.abs_diff(other.rank().0)
    }

    /// Number of files between `self` and `other`.
    #[inline(always)]
    pub const fn distance_files(&self, other: Self) -> u8 {
        self.file().0.abs_diff(other.file().0)
    }

    /// The kingside Rook's home square for `color` in a standard setup.
    #[inline(always)]
    pub const fn rook_short_home(color: Color) -> Self {
        [Self::H1, Self::H8][color.index()]
    }

    /// The queenside Rook's home square for `color` in a standard setup.
    #[inline(always)]
    pub const fn rook_long_home(color: Color) -> Self {
        [Self::A1, Self::A8][color.index()]
    }

    /// Where the King ends up after castling kingside.
    #[inline(always)]
    pub const fn king_short_castle(color: Color) -> Self {
        [Self::G1, Self::G8][color.index()]
    }

    /// Where the King ends up after castling queenside.
    #[inline(always)]
    pub const fn king_long_castle(color: Color) -> Self {
        [Self::C1, Self::C8][color.index()]
    }

    /// Where the Rook ends up after castling kingside.
    #[inline(always)]
    pub const fn rook_short_castle(color: Color) -> Self {
        [Self::F1, Self::F8][color.index()]
    }

    /// Where the Rook ends up after castling queenside.
    #[inline(always)]
    pub const fn rook_long_castle(color: Color) -> Self {
        [Self::D1, Self::D8][color.index()]
    }

    /// Parses a [`Square`] from algebraic notation, like `e4`.
    #[inline(always)]
    pub fn from_uci(square: &str) -> Result<Self> {
        let mut chars = square.chars();
        let file = chars
            .next()
            .ok_or_else(|| anyhow!("Square string cannot be empty"))?;
        let rank = chars
            .next()
            .ok_or_else(|| anyhow!("Square {square:?} is missing a rank"))?;

        if chars.next().is_some() {
            bail!("Square {square:?} has trailing characters");
        }

        Ok(Self::new(File::from_uci(file)?, Rank::from_uci(rank)?))
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self> {
        Self::from_uci(s)
    }
}

impl<T> std::ops::Index<Square> for [T; Square::COUNT] {
    type Output = T;
    #[inline(always)]
    fn index(&self, square: Square) -> &Self::Output {
        &self[square.index()]
    }
}

impl<T> std::ops::IndexMut<Square> for [T; Square::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self[square.index()]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A file (column) on a chess board, in `[0, 7]` where `0` is the a-file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct File(pub(crate) u8);

impl File {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);

    /// Total number of files.
    pub const COUNT: usize = 8;

    /// Returns an iterator over all files, from the a-file through the h-file.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Returns the inner `u8` of this [`File`].
    #[inline(always)]
    pub const fn inner(&self) -> u8 {
        self.0
    }

    /// Parses a [`File`] from a character in `[a, h]` (case-insensitive).
    #[inline(always)]
    pub fn from_uci(file: char) -> Result<Self> {
        let file = file.to_ascii_lowercase();
        if file.is_ascii_lowercase() && file <= 'h' {
            Ok(Self(file as u8 - b'a'))
        } else {
            bail!("Invalid file character: must be in [a, h]. Got {file:?}")
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", (self.0 + b'a') as char)
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A rank (row) on a chess board, in `[0, 7]` where `0` is rank 1.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Rank(pub(crate) u8);

impl Rank {
    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);
    pub const THREE: Self = Self(2);
    pub const FOUR: Self = Self(3);
    pub const FIVE: Self = Self(4);
    pub const SIX: Self = Self(5);
    pub const SEVEN: Self = Self(6);
    pub const EIGHT: Self = Self(7);

    /// Total number of ranks.
    pub const COUNT: usize = 8;

    /// Returns an iterator over all ranks, from rank 1 through rank 8.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Returns the inner `u8` of this [`Rank`].
    #[inline(always)]
    pub const fn inner(&self) -> u8 {
        self.0
    }

    /// The rank that `color`'s pawns start on.
    #[inline(always)]
    pub const fn second(color: Color) -> Self {
        [Self::TWO, Self::SEVEN][color.index()]
    }

    /// The rank that `color`'s pawns promote on.
    #[inline(always)]
    pub const fn eighth(color: Color) -> Self {
        [Self::EIGHT, Self::ONE][color.index()]
    }

    /// Absolute difference between two ranks.
    #[inline(always)]
    pub const fn abs_diff(&self, other: Self) -> u8 {
        self.0.abs_diff(other.0)
    }

    /// Parses a [`Rank`] from a character in `[1, 8]`.
    #[inline(always)]
    pub fn from_uci(rank: char) -> Result<Self> {
        if matches!(rank, '1'..='8') {
            Ok(Self(rank as u8 - b'1'))
        } else {
            bail!("Invalid rank character: must be in [1, 8]. Got {rank:?}")
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

impl fmt::Debug for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_square_file_rank() {
        assert_eq!(Square::A1.index(), 0);
        assert_eq!(Square::H8.index(), 63);
        assert_eq!(Square::E4.file(), File::E);
        assert_eq!(Square::E4.rank(), Rank::FOUR);
        assert_eq!(Square::new(File::H, Rank::EIGHT), Square::H8);
    }

    #[test]
    fn test_square_offsets() {
        assert_eq!(Square::E2.forward_by(Color::White, 2), Some(Square::E4));
        assert_eq!(Square::E7.forward_by(Color::Black, 2), Some(Square::E5));
        assert_eq!(Square::H8.offset(1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::A1.backward_by(Color::White, 1), None);
    }

    #[test]
    fn test_square_parsing() {
        assert_eq!(Square::from_uci("e4").unwrap(), Square::E4);
        assert_eq!(Square::from_uci("a1").unwrap(), Square::A1);
        assert_eq!(Square::E4.to_string(), "e4");
        assert!(Square::from_uci("i9").is_err());
        assert!(Square::from_uci("e").is_err());
        assert!(Square::from_uci("e44").is_err());
    }
}
