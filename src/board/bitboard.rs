/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Not};

use super::{Color, File, Rank, Square};

/// A [`Bitboard`] represents the game board as a set of bits, one per square.
///
/// The internal encoding uses [Little-Endian Rank-File Mapping (LERF)](https://www.chessprogramming.org/Square_Mapping_Considerations#Little-Endian_Rank-File_Mapping):
/// bit 0 (the LSB) is `a1` and bit 63 (the MSB) is `h8`. A bitboard of the
/// first rank looks like this in binary:
/// ```text
/// 00000000
/// 00000000
/// 00000000
/// 00000000
/// 00000000
/// 00000000
/// 00000000
/// 11111111
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Bitboard(pub(crate) u64);

impl Bitboard {
    pub const FILE_A: Self = Self(0x0101010101010101);
    pub const FILE_B: Self = Self(0x0202020202020202);
    pub const FILE_C: Self = Self(0x0404040404040404);
    pub const FILE_D: Self = Self(0x0808080808080808);
    pub const FILE_E: Self = Self(0x1010101010101010);
    pub const FILE_F: Self = Self(0x2020202020202020);
    pub const FILE_G: Self = Self(0x4040404040404040);
    pub const FILE_H: Self = Self(0x8080808080808080);
    pub const NOT_FILE_A: Self = Self(0xfefefefefefefefe);
    pub const NOT_FILE_H: Self = Self(0x7f7f7f7f7f7f7f7f);
    pub const RANK_1: Self = Self(0x00000000000000FF);
    pub const RANK_2: Self = Self(0x000000000000FF00);
    pub const RANK_3: Self = Self(0x0000000000FF0000);
    pub const RANK_4: Self = Self(0x00000000FF000000);
    pub const RANK_5: Self = Self(0x000000FF00000000);
    pub const RANK_6: Self = Self(0x0000FF0000000000);
    pub const RANK_7: Self = Self(0x00FF000000000000);
    pub const RANK_8: Self = Self(0xFF00000000000000);
    pub const EMPTY_BOARD: Self = Self(0x0000000000000000);
    pub const FULL_BOARD: Self = Self(0xFFFFFFFFFFFFFFFF);
    pub const EDGES: Self = Self(0xFF818181818181FF);
    pub const CORNERS: Self = Self(0x8100000000000081);

    /// Constructs a new [`Bitboard`] from the provided bit pattern.
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// Constructs a new [`Bitboard`] with only the bit for `square` set.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Bitboard, Square};
    /// let board = Bitboard::from_square(Square::H8);
    /// assert_eq!(board, Bitboard::new(0x8000000000000000));
    /// ```
    #[inline(always)]
    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.index())
    }

    /// Constructs a new [`Bitboard`] with an entire column of bits set.
    #[inline(always)]
    pub const fn from_file(file: File) -> Self {
        Self(Self::FILE_A.0 << file.0)
    }

    /// Constructs a new [`Bitboard`] with an entire row of bits set.
    #[inline(always)]
    pub const fn from_rank(rank: Rank) -> Self {
        Self(Self::RANK_1.0 << (rank.0 * 8))
    }

    /// Returns [`Bitboard::FULL_BOARD`] if `true`, else [`Bitboard::EMPTY_BOARD`].
    ///
    /// # Example
    /// ```
    /// # use gambit::Bitboard;
    /// assert_eq!(Bitboard::from_bool(true), Bitboard::FULL_BOARD);
    /// assert_eq!(Bitboard::from_bool(false), Bitboard::EMPTY_BOARD);
    /// ```
    #[inline(always)]
    pub const fn from_bool(value: bool) -> Self {
        Self((value as u64).wrapping_neg())
    }

    /// If `value` is `Some`, converts the inner `T` with the appropriate
    /// `From` implementation; otherwise yields an empty board.
    #[inline(always)]
    pub fn from_option<T>(value: Option<T>) -> Self
    where
        Self: From<T>,
    {
        value.map(Self::from).unwrap_or_default()
    }

    /// Returns a [`Bitboard`] of `color`'s back rank.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Bitboard, Color};
    /// assert_eq!(Bitboard::first_rank(Color::White), Bitboard::RANK_1);
    /// assert_eq!(Bitboard::first_rank(Color::Black), Bitboard::RANK_8);
    /// ```
    #[inline(always)]
    pub const fn first_rank(color: Color) -> Self {
        [Self::RANK_1, Self::RANK_8][color.index()]
    }

    /// Returns the inner `u64` of this [`Bitboard`].
    #[inline(always)]
    pub const fn inner(&self) -> u64 {
        self.0
    }

    /// Creates a [`Square`] from the lowest set bit of this [`Bitboard`].
    ///
    /// Undefined when `self` is empty.
    #[inline(always)]
    pub const fn to_square_unchecked(&self) -> Square {
        Square::from_index_unchecked(self.0.trailing_zeros() as usize)
    }

    /// Creates a [`Square`] from this [`Bitboard`], if exactly one bit is set.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Bitboard, Square};
    /// assert_eq!(Bitboard::from_square(Square::G2).to_square(), Some(Square::G2));
    /// assert_eq!(Bitboard::RANK_1.to_square(), None);
    /// ```
    #[inline(always)]
    pub const fn to_square(&self) -> Option<Square> {
        if self.population() == 1 {
            Some(self.to_square_unchecked())
        } else {
            None
        }
    }

    /// Checks if this [`Bitboard`] has all bits set to `0`.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Checks if this [`Bitboard`] has at least one bit set.
    #[inline(always)]
    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Returns `true` if `self` contains *every* bit set in `other`.
    #[inline(always)]
    pub fn is_superset(&self, other: impl Into<Self>) -> bool {
        let other = other.into();
        (*self & other) == other
    }

    /// Returns `true` if `self` contains none of the bits set in `other`.
    #[inline(always)]
    pub fn is_disjoint(&self, other: impl Into<Self>) -> bool {
        (*self & other.into()).is_empty()
    }

    /// Returns `true` if `self` contains *any* of the bits set in `other`.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Bitboard, Square};
    /// assert!(Bitboard::FILE_A.intersects(Square::A3));
    /// assert!(!Bitboard::RANK_1.intersects(Bitboard::RANK_5));
    /// ```
    #[inline(always)]
    pub fn intersects(&self, other: impl Into<Self>) -> bool {
        (*self & other.into()).is_nonempty()
    }

    /// Sets the bit(s) at the location(s) specified by `other` to `1` (on).
    #[inline(always)]
    pub fn set(&mut self, other: impl Into<Self>) {
        *self |= other.into()
    }

    /// Toggles (inverts) the bit(s) at the location(s) specified by `other`.
    #[inline(always)]
    pub fn toggle(&mut self, other: impl Into<Self>) {
        *self ^= other.into()
    }

    /// Clears the bit(s) at the location(s) specified by `other` to `0` (off).
    #[inline(always)]
    pub fn clear(&mut self, other: impl Into<Self>) {
        *self &= !other.into()
    }

    /// Returns the lowest set bit of this [`Bitboard`] as a [`Square`], or
    /// `None` if `self` is empty.
    #[inline(always)]
    pub fn lsb(&self) -> Option<Square> {
        self.is_nonempty()
            .then(|| Square(self.0.trailing_zeros() as u8))
    }

    /// Returns the lowest set bit of this [`Bitboard`] as a [`Square`].
    ///
    /// Undefined when `self` is empty.
    #[inline(always)]
    pub fn lsb_unchecked(&self) -> Square {
        Square(self.0.trailing_zeros() as u8)
    }

    /// Pops and returns the lowest set bit of this [`Bitboard`] as a [`Square`].
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let lsb = self.lsb();
        self.clear_lsb();
        lsb
    }

    /// Clears the lowest set bit from `self`, if there is one.
    #[inline(always)]
    pub fn clear_lsb(&mut self) {
        self.0 &= self.0.wrapping_sub(1);
    }

    /// Returns a [`BitboardIter`] to iterate over all set bits as [`Square`]s.
    #[inline(always)]
    pub const fn iter(&self) -> BitboardIter {
        BitboardIter { bitboard: *self }
    }

    /// Returns a [`BitboardSubsetIter`] over every subset of this bitboard.
    #[inline(always)]
    pub const fn subsets(&self) -> BitboardSubsetIter {
        BitboardSubsetIter {
            bitboard: *self,
            subset: Self::EMPTY_BOARD,
            remaining: 2usize.pow(self.population() as u32),
        }
    }

    /// Yields the total number of `1`s in this [`Bitboard`].
    ///
    /// # Example
    /// ```
    /// # use gambit::Bitboard;
    /// assert_eq!(Bitboard::RANK_1.population(), 8);
    /// ```
    #[inline(always)]
    pub const fn population(&self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Shifts this [`Bitboard`] forward by `n` ranks, according to `color`.
    ///
    /// Note: this can "wrap" by advancing beyond the end of the board, so
    /// only use it where a rank-8 (or rank-1) source is impossible.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Bitboard, Color};
    /// assert_eq!(Bitboard::RANK_4.forward_by(Color::White, 1), Bitboard::RANK_5);
    /// assert_eq!(Bitboard::RANK_4.forward_by(Color::Black, 1), Bitboard::RANK_3);
    /// ```
    #[inline(always)]
    pub const fn forward_by(self, color: Color, n: u32) -> Self {
        // For White this rotates left by 8n ("n ranks up"); for Black it
        // rotates left by 496n, which is the same as rotating right by 8n.
        Self(self.0.rotate_left(n * 8 * (1 + color as u32 * 62)))
    }

    /// Shifts this [`Bitboard`] backward by `n` ranks, according to `color`.
    ///
    /// The wrapping caveat of [`Bitboard::forward_by`] applies here too.
    #[inline(always)]
    pub const fn backward_by(self, color: Color, n: u32) -> Self {
        Self(self.0.rotate_right(n * 8 * (1 + color as u32 * 62)))
    }

    /// Shifts this [`Bitboard`] one rank up, discarding rank 8.
    #[inline(always)]
    pub const fn north(self) -> Self {
        Self(self.0 << 8)
    }

    /// Shifts this [`Bitboard`] one rank down, discarding rank 1.
    #[inline(always)]
    pub const fn south(self) -> Self {
        Self(self.0 >> 8)
    }

    /// Shifts this [`Bitboard`] one file towards `h`, discarding the h-file.
    ///
    /// # Example
    /// ```
    /// # use gambit::Bitboard;
    /// assert_eq!(Bitboard::FILE_A.east(), Bitboard::FILE_B);
    /// assert_eq!(Bitboard::FILE_H.east(), Bitboard::EMPTY_BOARD);
    /// ```
    #[inline(always)]
    pub const fn east(self) -> Self {
        // Post-shift mask
        Self((self.0 << 1) & Self::NOT_FILE_A.0)
    }

    /// Shifts this [`Bitboard`] one file towards `a`, discarding the a-file.
    #[inline(always)]
    pub const fn west(self) -> Self {
        // Post-shift mask
        Self((self.0 >> 1) & Self::NOT_FILE_H.0)
    }

    /// Combination of [`Bitboard::north`] and [`Bitboard::east`] in one shift.
    #[inline(always)]
    pub const fn northeast(self) -> Self {
        Self((self.0 << 9) & Self::NOT_FILE_A.0)
    }

    /// Combination of [`Bitboard::south`] and [`Bitboard::east`] in one shift.
    #[inline(always)]
    pub const fn southeast(self) -> Self {
        Self((self.0 >> 7) & Self::NOT_FILE_A.0)
    }

    /// Combination of [`Bitboard::north`] and [`Bitboard::west`] in one shift.
    #[inline(always)]
    pub const fn northwest(self) -> Self {
        Self((self.0 << 7) & Self::NOT_FILE_H.0)
    }

    /// Combination of [`Bitboard::south`] and [`Bitboard::west`] in one shift.
    #[inline(always)]
    pub const fn southwest(self) -> Self {
        Self((self.0 >> 9) & Self::NOT_FILE_H.0)
    }

    /// `const` analog of [`std::ops::BitAnd::bitand`].
    #[inline(always)]
    pub const fn and(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// `const` analog of [`std::ops::BitOr::bitor`].
    #[inline(always)]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// `const` analog of [`std::ops::BitXor::bitxor`].
    #[inline(always)]
    pub const fn xor(self, other: Self) -> Self {
        Self(self.0 ^ other.0)
    }

    /// `const` analog of [`Not::not`].
    #[inline(always)]
    pub const fn not(self) -> Self {
        Self(!self.0)
    }
}

impl FromIterator<Square> for Bitboard {
    /// A [`Bitboard`] can be collected from an iterator over [`Square`]s.
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), |bb, sq| bb | sq)
    }
}

macro_rules! impl_bitwise_op {
    // Impl op and op_assign for Self
    ($op:tt, $op_assign:tt, $func:ident, $func_assign:ident) => {
        impl<T> std::ops::$op<T> for Bitboard
        where
            Self: From<T>,
        {
            type Output = Self;
            #[inline(always)]
            fn $func(self, rhs: T) -> Self::Output {
                Self(std::ops::$op::$func(self.0, Self::from(rhs).0))
            }
        }

        impl<T> std::ops::$op_assign<T> for Bitboard
        where
            Self: From<T>,
        {
            #[inline(always)]
            fn $func_assign(&mut self, rhs: T) {
                std::ops::$op_assign::$func_assign(&mut self.0, Self::from(rhs).0);
            }
        }
    };
}

impl_bitwise_op!(BitAnd, BitAndAssign, bitand, bitand_assign);
impl_bitwise_op!(BitOr, BitOrAssign, bitor, bitor_assign);
impl_bitwise_op!(BitXor, BitXorAssign, bitxor, bitxor_assign);

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl<T> From<Option<T>> for Bitboard
where
    Self: From<T>,
{
    /// Wrapper for [`Bitboard::from_option`].
    #[inline(always)]
    fn from(value: Option<T>) -> Self {
        Self::from_option(value)
    }
}

impl From<Square> for Bitboard {
    /// Wrapper for [`Bitboard::from_square`].
    #[inline(always)]
    fn from(value: Square) -> Self {
        Self::from_square(value)
    }
}

impl From<File> for Bitboard {
    /// Wrapper for [`Bitboard::from_file`].
    #[inline(always)]
    fn from(value: File) -> Self {
        Self::from_file(value)
    }
}

impl From<Rank> for Bitboard {
    /// Wrapper for [`Bitboard::from_rank`].
    #[inline(always)]
    fn from(value: Rank) -> Self {
        Self::from_rank(value)
    }
}

impl From<u64> for Bitboard {
    /// Wrapper for [`Bitboard::new`].
    #[inline(always)]
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<bool> for Bitboard {
    /// Wrapper for [`Bitboard::from_bool`].
    #[inline(always)]
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl fmt::LowerHex for Bitboard {
    /// Formats this [`Bitboard`] as a 16-character lowercase hexadecimal string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:0>16x}", self.0)
    }
}

impl Default for Bitboard {
    #[inline(always)]
    fn default() -> Self {
        Self::EMPTY_BOARD
    }
}

impl fmt::Display for Bitboard {
    /// Displays this [`Bitboard`] as an 8x8 grid with rank 8 on top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board = String::with_capacity(136);

        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let square = Square::new(file, rank);
                let occupant = if self.intersects(square) { 'X' } else { '.' };

                board += &format!("{occupant} ");
            }
            board += "\n";
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Bitboard {
    /// Same grid as `Display`, with rank and file labels on the margins.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board = String::with_capacity(198);

        for rank in Rank::iter().rev() {
            board += &format!("{rank}| ");

            for file in File::iter() {
                let square = Square::new(file, rank);
                let occupant = if self.intersects(square) { 'X' } else { '.' };

                board += &format!("{occupant} ");
            }
            board += "\n";
        }
        board += " +----------------\n   ";
        for file in File::iter() {
            board += &format!("{file} ");
        }

        write!(f, "{board}")
    }
}

/// An iterator over all set bits in a [`Bitboard`].
///
/// See [`Bitboard::iter`].
pub struct BitboardIter {
    bitboard: Bitboard,
}

impl Iterator for BitboardIter {
    type Item = Square;
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.bitboard.pop_lsb()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bitboard.population() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BitboardIter {
    #[inline(always)]
    fn len(&self) -> usize {
        self.bitboard.population() as usize
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter { bitboard: self }
    }
}

impl IntoIterator for &Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter { bitboard: *self }
    }
}

/// An iterator over all possible subsets of a [`Bitboard`].
///
/// See [`Bitboard::subsets`]. This drives magic table construction, where
/// every blocker arrangement within a mask must be enumerated.
pub struct BitboardSubsetIter {
    /// The original bitboard whose subsets to iterate over.
    bitboard: Bitboard,

    /// The current subset, which will be the result of `.next()`.
    subset: Bitboard,

    /// How many subsets we have left to iterate.
    remaining: usize,
}

impl Iterator for BitboardSubsetIter {
    type Item = Bitboard;
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            None
        } else {
            // By saving and returning the original subset, the iterator yields
            // the empty set first and the full set last.
            let subset = self.subset;

            // Carry-Rippler: https://www.chessprogramming.org/Traversing_Subsets_of_a_Set#All_Subsets_of_any_Set
            self.subset.0 = self.subset.0.wrapping_sub(self.bitboard.0) & self.bitboard.0;
            self.remaining -= 1;

            Some(subset)
        }
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for BitboardSubsetIter {
    #[inline(always)]
    fn len(&self) -> usize {
        self.remaining
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_shifts_respect_files() {
        assert_eq!(Bitboard::FILE_H.east(), Bitboard::EMPTY_BOARD);
        assert_eq!(Bitboard::FILE_A.west(), Bitboard::EMPTY_BOARD);
        assert_eq!(Bitboard::RANK_8.north(), Bitboard::EMPTY_BOARD);
        assert_eq!(
            Bitboard::from_square(Square::H4).northeast(),
            Bitboard::EMPTY_BOARD
        );
        assert_eq!(
            Bitboard::from_square(Square::A4).southwest(),
            Bitboard::EMPTY_BOARD
        );
        assert_eq!(
            Bitboard::from_square(Square::E4).northeast(),
            Bitboard::from_square(Square::F5)
        );
    }

    #[test]
    fn test_set_toggle_clear() {
        let mut board = Bitboard::EMPTY_BOARD;

        board.set(Square::E4);
        assert!(board.intersects(Square::E4));

        board.toggle(Square::E4);
        assert!(board.is_empty());

        board.toggle(Square::E4);
        assert_eq!(board, Bitboard::from_square(Square::E4));

        board.clear(Square::E4);
        assert!(board.is_empty());
    }

    #[test]
    fn test_lsb_iteration() {
        let board = Bitboard::CORNERS;
        let squares: Vec<_> = board.iter().collect();
        assert_eq!(squares, [Square::A1, Square::H1, Square::A8, Square::H8]);
        assert_eq!(board.population(), 4);
    }

    #[test]
    fn test_subset_iteration() {
        let board = Bitboard::from_square(Square::A1) | Square::C3 | Square::F7;
        let subsets: Vec<_> = board.subsets().collect();

        // 2^3 subsets, starting empty and ending with the full set.
        assert_eq!(subsets.len(), 8);
        assert_eq!(subsets[0], Bitboard::EMPTY_BOARD);
        assert_eq!(*subsets.last().unwrap(), board);
        for subset in subsets {
            assert!(subset.is_superset(subset & board));
            assert!((subset & !board).is_empty());
        }
    }

    #[test]
    fn test_to_string() {
        let expected = ". . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        X X X X X X X X \n\
                        . . . . . . . . \n";
        assert_eq!(Bitboard::RANK_2.to_string(), expected);
    }
}
