/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Neg},
    str::FromStr,
};

use anyhow::{bail, Result};

/// The color of a player, piece, square, etc. within a chess board.
///
/// White moves first, so [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Creates a new [`Color`] from a set of bits.
    ///
    /// `bits` must be `[0,1]`.
    ///
    /// # Example
    /// ```
    /// # use gambit::Color;
    /// assert_eq!(Color::from_bits(1).unwrap(), Color::Black);
    /// assert!(Color::from_bits(42).is_err());
    /// ```
    #[inline(always)]
    pub fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            0 => Ok(Self::White),
            1 => Ok(Self::Black),
            _ => bail!("Invalid bits for Color: Bits must be between [0,1]. Got {bits}."),
        }
    }

    /// Creates a new [`Color`] from a set of bits, ignoring safety checks.
    ///
    /// `bits` must be `[0,1]`.
    #[inline(always)]
    pub const fn from_bits_unchecked(bits: u8) -> Self {
        debug_assert!(
            bits <= 1,
            "Invalid bits for Color: Bits must be between [0,1]"
        );

        // Safety: Since `Color` is a `repr(u8)` enum, we can cast safely here.
        unsafe { std::mem::transmute(bits) }
    }

    /// Creates a new [`Color`] from a `bool`, where `false = White`.
    #[inline(always)]
    pub const fn from_bool(color: bool) -> Self {
        Self::from_bits_unchecked(color as u8)
    }

    /// Returns `true` if this [`Color`] is White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        *self as u8 & 1 == 0
    }

    /// Returns `true` if this [`Color`] is Black.
    #[inline(always)]
    pub const fn is_black(&self) -> bool {
        *self as u8 & 1 != 0
    }

    /// Returns a multiplier for negating numbers relative to this color.
    ///
    /// # Example
    /// ```
    /// # use gambit::Color;
    /// assert_eq!(Color::White.negation_multiplier(), 1);
    /// assert_eq!(Color::Black.negation_multiplier(), -1);
    /// ```
    #[inline(always)]
    pub const fn negation_multiplier(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Returns this [`Color`]'s opposite / inverse / enemy.
    ///
    /// # Example
    /// ```
    /// # use gambit::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        Self::from_bits_unchecked(self.bits() ^ 1)
    }

    /// Returns this [`Color`] as a `usize`, for indexing into lists.
    ///
    /// Will be `0` for White, `1` for Black.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns this [`Color`] as a `u8`.
    #[inline(always)]
    pub const fn bits(&self) -> u8 {
        *self as u8
    }

    /// Creates a [`Color`] from a `char`, as used in FEN notation.
    #[inline(always)]
    pub fn from_uci(color: char) -> Result<Self> {
        match color {
            'w' | 'W' => Ok(Self::White),
            'b' | 'B' => Ok(Self::Black),
            _ => bail!("Color must be either 'w' or 'b' (case-insensitive). Found {color}"),
        }
    }

    /// Creates a [`Color`] from the ASCII case of `c`, with uppercase being
    /// White and lowercase being Black.
    ///
    /// # Example
    /// ```
    /// # use gambit::Color;
    /// assert_eq!(Color::from_case('k'), Color::Black);
    /// ```
    #[inline(always)]
    pub const fn from_case(c: char) -> Self {
        Self::from_bool(c.is_ascii_lowercase())
    }

    /// Converts this [`Color`] to a char, as used in FEN notation.
    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

/// The kind (or "role") that a chess piece can be.
///
/// These have no [`Color`] associated with them. See [`Piece`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// An array of all 6 [`PieceKind`]s, in the order `Pawn` through `King`.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// The four [`PieceKind`]s a Pawn can promote to.
    #[inline(always)]
    pub const fn promotions() -> [Self; 4] {
        use PieceKind::*;
        [Knight, Bishop, Rook, Queen]
    }

    /// Creates a new [`PieceKind`] from a set of bits.
    ///
    /// `bits` must be `[0,5]`.
    ///
    /// # Example
    /// ```
    /// # use gambit::PieceKind;
    /// assert_eq!(PieceKind::from_bits(4).unwrap(), PieceKind::Queen);
    /// assert!(PieceKind::from_bits(42).is_err());
    /// ```
    #[inline(always)]
    pub fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            0 => Ok(Self::Pawn),
            1 => Ok(Self::Knight),
            2 => Ok(Self::Bishop),
            3 => Ok(Self::Rook),
            4 => Ok(Self::Queen),
            5 => Ok(Self::King),
            _ => bail!("Invalid bits for PieceKind: Bits must be between [0,5]. Got {bits}."),
        }
    }

    /// Creates a new [`PieceKind`] from a set of bits, ignoring safety checks.
    ///
    /// `bits` must be `[0,5]`.
    #[inline(always)]
    pub const fn from_bits_unchecked(bits: u8) -> Self {
        debug_assert!(
            bits <= 5,
            "Invalid bits for PieceKind: Bits must be between [0,5]"
        );

        // Safety: Since `PieceKind` is a `repr(u8)` enum, we can cast safely here.
        unsafe { std::mem::transmute(bits) }
    }

    /// Fetches the internal bit value of this [`PieceKind`]. Always `[0,5]`.
    #[inline(always)]
    pub const fn bits(&self) -> u8 {
        *self as u8
    }

    /// Returns this [`PieceKind`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the material value of this [`PieceKind`], in centipawns.
    ///
    /// The King has no meaningful exchange value, so it is scored as `0`.
    ///
    /// # Example
    /// ```
    /// # use gambit::PieceKind;
    /// assert_eq!(PieceKind::Queen.value(), 900);
    /// ```
    #[inline(always)]
    pub const fn value(&self) -> i32 {
        match self {
            Self::Pawn => 100,
            Self::Knight => 300,
            Self::Bishop => 300,
            Self::Rook => 500,
            Self::Queen => 900,
            Self::King => 0,
        }
    }

    /// Creates a new [`PieceKind`] from a character (case-insensitive), as
    /// used in FEN and move notation.
    ///
    /// # Example
    /// ```
    /// # use gambit::PieceKind;
    /// assert_eq!(PieceKind::from_uci('Q').unwrap(), PieceKind::Queen);
    /// ```
    #[inline(always)]
    pub fn from_uci(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind}."),
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    /// Converts this [`PieceKind`] to a lowercase character.
    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Alias for [`PieceKind::to_uci`].
    #[inline(always)]
    pub const fn char(&self) -> char {
        self.to_uci()
    }
}

/// A chess piece on the game board.
///
/// Internally, this is represented as a `u8` with the following bit pattern:
///
/// ```text
///     0000 0 000
///      |   |  |
///      |   |  +- Represents the PieceKind.
///      |   +- Represents the Color. `0` for White, `1` for Black.
///      +- Unused.
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece(u8);

impl Piece {
    pub const WHITE_PAWN: Self = Self::new(Color::White, PieceKind::Pawn);
    pub const WHITE_ROOK: Self = Self::new(Color::White, PieceKind::Rook);
    pub const WHITE_KING: Self = Self::new(Color::White, PieceKind::King);
    pub const WHITE_QUEEN: Self = Self::new(Color::White, PieceKind::Queen);
    pub const WHITE_KNIGHT: Self = Self::new(Color::White, PieceKind::Knight);
    pub const WHITE_BISHOP: Self = Self::new(Color::White, PieceKind::Bishop);

    pub const BLACK_PAWN: Self = Self::new(Color::Black, PieceKind::Pawn);
    pub const BLACK_ROOK: Self = Self::new(Color::Black, PieceKind::Rook);
    pub const BLACK_KING: Self = Self::new(Color::Black, PieceKind::King);
    pub const BLACK_QUEEN: Self = Self::new(Color::Black, PieceKind::Queen);
    pub const BLACK_KNIGHT: Self = Self::new(Color::Black, PieceKind::Knight);
    pub const BLACK_BISHOP: Self = Self::new(Color::Black, PieceKind::Bishop);

    /// Number of unique piece variants.
    pub const COUNT: usize = Color::COUNT * PieceKind::COUNT;

    /// Mask for the color bit.
    const COLOR_MASK: u8 = 0b0000_1000;
    /// Start index of the color bit.
    const COLOR_BITS: u8 = 3;

    /// An array of all 12 [`Piece`]s, starting with White Pawn.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::WHITE_PAWN,
            Self::WHITE_KNIGHT,
            Self::WHITE_BISHOP,
            Self::WHITE_ROOK,
            Self::WHITE_QUEEN,
            Self::WHITE_KING,
            Self::BLACK_PAWN,
            Self::BLACK_KNIGHT,
            Self::BLACK_BISHOP,
            Self::BLACK_ROOK,
            Self::BLACK_QUEEN,
            Self::BLACK_KING,
        ]
    }

    /// Creates a new [`Piece`] from the given [`Color`] and [`PieceKind`].
    ///
    /// # Example
    /// ```
    /// # use gambit::{Piece, Color, PieceKind};
    /// let white_knight = Piece::new(Color::White, PieceKind::Knight);
    /// assert_eq!(white_knight.to_string(), "N");
    /// ```
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self(color.bits() << Self::COLOR_BITS | kind.bits())
    }

    /// Fetches the [`Color`] of this [`Piece`].
    #[inline(always)]
    pub const fn color(&self) -> Color {
        Color::from_bits_unchecked(self.0 >> Self::COLOR_BITS)
    }

    /// Returns `true` if this [`Piece`]'s [`Color`] is White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        self.0 >> Self::COLOR_BITS == 0
    }

    /// Returns `true` if this [`Piece`]'s [`Color`] is Black.
    #[inline(always)]
    pub const fn is_black(&self) -> bool {
        self.0 >> Self::COLOR_BITS != 0
    }

    /// Fetches the [`PieceKind`] of this [`Piece`].
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        PieceKind::from_bits_unchecked(self.0 & !Self::COLOR_MASK)
    }

    /// Returns `true` if this [`Piece`] is a Pawn.
    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind(), PieceKind::Pawn)
    }

    /// Returns `true` if this [`Piece`] is a King.
    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind(), PieceKind::King)
    }

    /// Returns `true` if this [`Piece`] is an orthogonal slider (Rook, Queen).
    #[inline(always)]
    pub const fn is_orthogonal_slider(&self) -> bool {
        matches!(self.kind(), PieceKind::Queen | PieceKind::Rook)
    }

    /// Returns `true` if this [`Piece`] is a diagonal slider (Bishop, Queen).
    #[inline(always)]
    pub const fn is_diagonal_slider(&self) -> bool {
        matches!(self.kind(), PieceKind::Queen | PieceKind::Bishop)
    }

    /// Fetches the [`Color`] and [`PieceKind`] of this [`Piece`].
    #[inline(always)]
    pub const fn parts(&self) -> (Color, PieceKind) {
        (self.color(), self.kind())
    }

    /// Returns the index value of this [`Piece`], as a `usize`.
    ///
    /// White pieces occupy `[0,5]` and Black pieces `[6,11]`, for indexing
    /// into lists of size 12.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        let offset = if self.is_white() {
            0
        } else {
            PieceKind::COUNT
        };

        self.kind().bits() as usize + offset
    }

    /// Creates a new [`Piece`] from a character, with uppercase being White
    /// and lowercase being Black, as in FEN notation.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Piece, Color, PieceKind};
    /// let white_knight = Piece::from_uci('N').unwrap();
    /// assert_eq!(white_knight.color(), Color::White);
    /// assert_eq!(white_knight.kind(), PieceKind::Knight);
    /// ```
    #[inline(always)]
    pub fn from_uci(piece: char) -> Result<Self> {
        let kind = PieceKind::from_uci(piece)?;
        let color = Color::from_case(piece);
        Ok(Self::new(color, kind))
    }

    /// Converts this [`Piece`] into a character, as in FEN notation.
    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        if self.is_white() {
            self.kind().char().to_ascii_uppercase()
        } else {
            self.kind().char()
        }
    }

    /// Alias for [`Piece::to_uci`].
    #[inline(always)]
    pub const fn char(&self) -> char {
        self.to_uci()
    }

    /// Promotes this [`Piece`] to a new [`PieceKind`], consuming `self` and
    /// returning the promoted [`Piece`].
    ///
    /// # Example
    /// ```
    /// # use gambit::{Color, Piece, PieceKind};
    /// let pawn = Piece::from_uci('p').unwrap();
    /// let queen = pawn.promoted(PieceKind::Queen);
    /// assert_eq!(queen.kind(), PieceKind::Queen);
    /// assert_eq!(queen.color(), Color::Black);
    /// ```
    #[inline(always)]
    pub const fn promoted(self, promotion: PieceKind) -> Self {
        Self::new(self.color(), promotion)
    }

    /// Fetches a human-readable name for this [`Piece`].
    #[inline(always)]
    pub fn name(&self) -> String {
        format!("{} {}", self.color().name(), self.kind().name())
    }
}

impl Neg for Color {
    type Output = Self;
    /// Negating [`Color::White`] yields [`Color::Black`] and vice versa.
    #[inline(always)]
    fn neg(self) -> Self::Output {
        self.opponent()
    }
}

macro_rules! impl_common_traits {
    ($type:ty) => {
        impl<T> Index<$type> for [T; <$type>::COUNT] {
            type Output = T;
            /// [`$type`] can be used to index into a list of [`<$type>::COUNT`] elements.
            #[inline(always)]
            fn index(&self, index: $type) -> &Self::Output {
                &self[index.index()]
            }
        }

        impl<T> IndexMut<$type> for [T; <$type>::COUNT] {
            /// [`$type`] can be used to mutably index into a list of [`<$type>::COUNT`] elements.
            #[inline(always)]
            fn index_mut(&mut self, index: $type) -> &mut Self::Output {
                &mut self[index.index()]
            }
        }

        impl FromStr for $type {
            type Err = anyhow::Error;
            /// Does the same as [`Self::from_uci`], but only if `s` is one character in length.
            #[inline(always)]
            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                if s.len() != 1 {
                    bail!("Invalid str for <$type>: Must be a str of len 1. Got {s:?}");
                }

                Self::from_uci(s.as_bytes()[0] as char)
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_uci())
            }
        }

        impl fmt::Debug for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self, f)
            }
        }
    };
}

impl_common_traits!(Piece);
impl_common_traits!(PieceKind);
impl_common_traits!(Color);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_piece_packing() {
        for piece in Piece::all() {
            let (color, kind) = piece.parts();
            assert_eq!(Piece::new(color, kind), piece);
            assert_eq!(Piece::from_uci(piece.char()).unwrap(), piece);
        }

        assert_eq!(Piece::WHITE_PAWN.index(), 0);
        assert_eq!(Piece::WHITE_KING.index(), 5);
        assert_eq!(Piece::BLACK_PAWN.index(), 6);
        assert_eq!(Piece::BLACK_KING.index(), 11);
    }

    #[test]
    fn test_color_ops() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(-Color::Black, Color::White);
        assert_eq!(Color::from_case('Q'), Color::White);
        assert_eq!(Color::from_case('q'), Color::Black);
    }
}
