/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, Result};

use super::{Piece, PieceKind, Position, Square};

/// Maximum possible number of moves in a given chess position.
///
/// Found [here](<https://www.chessprogramming.org/Chess_Position#cite_note-4>)
pub const MAX_NUM_MOVES: usize = 218;

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// Represents the different kinds of moves that can be made during a chess game.
///
/// Internally, these are represented by bit flags, which allows a compact
/// representation of the [`Move`] struct. The flag values are fetched from the
/// [chess programming wiki](https://www.chessprogramming.org/Encoding_Moves#From-To_Based).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum MoveKind {
    /// A single piece moving from one location to another without capturing.
    Quiet = 0 << Move::FLG_BITS,

    /// A special case on a Pawn's first move, wherein it can advance two squares forward.
    PawnDoublePush = 1 << Move::FLG_BITS,

    /// The King moving two files towards the h-side Rook, which hops over it.
    ShortCastle = 2 << Move::FLG_BITS,

    /// The King moving two files towards the a-side Rook, which hops over it.
    LongCastle = 3 << Move::FLG_BITS,

    /// A piece moving onto a square occupied by an opponent's piece, removing it from the board.
    Capture = 4 << Move::FLG_BITS,

    /// A special variant of capturing that occurs when a Pawn executes En Passant.
    EnPassantCapture = 5 << Move::FLG_BITS,

    /// A Pawn reaching its final rank and becoming a [`PieceKind::Knight`].
    PromoteKnight = 8 << Move::FLG_BITS,

    /// A Pawn reaching its final rank and becoming a [`PieceKind::Bishop`].
    PromoteBishop = 9 << Move::FLG_BITS,

    /// A Pawn reaching its final rank and becoming a [`PieceKind::Rook`].
    PromoteRook = 10 << Move::FLG_BITS,

    /// A Pawn reaching its final rank and becoming a [`PieceKind::Queen`].
    PromoteQueen = 11 << Move::FLG_BITS,

    /// A Pawn capturing onto its final rank and becoming a [`PieceKind::Knight`].
    CaptureAndPromoteKnight = 12 << Move::FLG_BITS,

    /// A Pawn capturing onto its final rank and becoming a [`PieceKind::Bishop`].
    CaptureAndPromoteBishop = 13 << Move::FLG_BITS,

    /// A Pawn capturing onto its final rank and becoming a [`PieceKind::Rook`].
    CaptureAndPromoteRook = 14 << Move::FLG_BITS,

    /// A Pawn capturing onto its final rank and becoming a [`PieceKind::Queen`].
    CaptureAndPromoteQueen = 15 << Move::FLG_BITS,
}

impl MoveKind {
    /// Creates a new [`MoveKind`] that is a promotion to the provided [`PieceKind`].
    ///
    /// # Panics
    /// If `promotion` is not a Knight, Bishop, Rook, or Queen.
    #[inline(always)]
    pub fn promotion(promotion: PieceKind) -> Self {
        match promotion {
            PieceKind::Knight => Self::PromoteKnight,
            PieceKind::Bishop => Self::PromoteBishop,
            PieceKind::Rook => Self::PromoteRook,
            PieceKind::Queen => Self::PromoteQueen,
            _ => unreachable!(),
        }
    }

    /// Creates a new [`MoveKind`] that is a capture and promotion to the provided [`PieceKind`].
    ///
    /// # Panics
    /// If `promotion` is not a Knight, Bishop, Rook, or Queen.
    #[inline(always)]
    pub fn promotion_capture(promotion: PieceKind) -> Self {
        match promotion {
            PieceKind::Knight => Self::CaptureAndPromoteKnight,
            PieceKind::Bishop => Self::CaptureAndPromoteBishop,
            PieceKind::Rook => Self::CaptureAndPromoteRook,
            PieceKind::Queen => Self::CaptureAndPromoteQueen,
            _ => unreachable!(),
        }
    }

    /// Determines the appropriate [`MoveKind`] for moving the `piece` at `from`
    /// onto `to`, within the provided `position`.
    ///
    /// If `promotion` was provided and the other parameters specify that this
    /// is a pawn moving to its final rank, this will yield a promotion variant
    /// for the [`PieceKind`] specified by `promotion`.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Position, MoveKind, Piece, Square};
    /// let pos = Position::new();
    /// let kind = MoveKind::new(Piece::WHITE_PAWN, Square::E2, Square::E4, &pos, None);
    /// assert_eq!(kind, MoveKind::PawnDoublePush);
    /// ```
    pub fn new(
        piece: Piece,
        from: Square,
        to: Square,
        position: &Position,
        promotion: Option<PieceKind>,
    ) -> Self {
        // By default, it's either a quiet or a capture.
        let is_capture = position.piece_at(to).is_some();
        let mut kind = if is_capture { Self::Capture } else { Self::Quiet };

        match piece.kind() {
            // Pawns are... complicated
            PieceKind::Pawn => {
                if let Some(promotion) = promotion {
                    kind = if is_capture {
                        Self::promotion_capture(promotion)
                    } else {
                        Self::promotion(promotion)
                    };
                } else if Some(to) == position.ep_square() {
                    kind = Self::EnPassantCapture;
                } else if from.rank().abs_diff(to.rank()) == 2 {
                    kind = Self::PawnDoublePush;
                }
            }

            // A King travelling two files can only be castling.
            PieceKind::King if from.distance_files(to) == 2 => {
                if to.file() > from.file() {
                    kind = Self::ShortCastle;
                } else {
                    kind = Self::LongCastle;
                }
            }

            // All other pieces have no special moves
            _ => {}
        }

        kind
    }
}

impl fmt::Display for MoveKind {
    /// Displays a human-readable description for this [`MoveKind`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Quiet => "Quiet",
            Self::PawnDoublePush => "Pawn Double Push",
            Self::EnPassantCapture => "En Passant Capture",
            Self::ShortCastle => "Short Castle",
            Self::LongCastle => "Long Castle",
            Self::Capture => "Capture",
            Self::PromoteQueen => "Promotion (Queen)",
            Self::PromoteKnight => "Promotion (Knight)",
            Self::PromoteRook => "Promotion (Rook)",
            Self::PromoteBishop => "Promotion (Bishop)",
            Self::CaptureAndPromoteQueen => "Capture and Promotion (Queen)",
            Self::CaptureAndPromoteKnight => "Capture and Promotion (Knight)",
            Self::CaptureAndPromoteRook => "Capture and Promotion (Rook)",
            Self::CaptureAndPromoteBishop => "Capture and Promotion (Bishop)",
        };

        write!(f, "{s}")
    }
}

/// Represents a move made on a chess board, including whether a piece is to be promoted.
///
/// Internally encoded using the following bit pattern:
/// ```text
///     0000 000000 000000
///      |     |      |
///      |     |      +- Source square of the move.
///      |     +- Target square of the move.
///      +- Special flags for promotion, castling, etc.
/// ```
///
/// Castling moves store the King's destination square (`g1`/`c1`), so the
/// encoded squares always print directly as standard notation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Move(u16);

impl Move {
    /// Mask for the source ("from") bits.
    const SRC_MASK: u16 = 0b0000_0000_0011_1111;
    /// Mask for the destination ("to") bits.
    const DST_MASK: u16 = 0b0000_1111_1100_0000;
    /// Mask for the flag (promotions, captures, etc.) bits.
    const FLG_MASK: u16 = 0b1111_0000_0000_0000;
    /// Start index of destination bits.
    const DST_BITS: u16 = 6;
    /// Start index of flag bits.
    const FLG_BITS: u16 = 12;

    const FLAG_PAWN_DOUBLE: u16 = 1 << Self::FLG_BITS;
    const FLAG_CASTLE_SHORT: u16 = 2 << Self::FLG_BITS;
    const FLAG_CASTLE_LONG: u16 = 3 << Self::FLG_BITS;
    const FLAG_CAPTURE: u16 = 4 << Self::FLG_BITS;
    const FLAG_EP_CAPTURE: u16 = 5 << Self::FLG_BITS;
    const FLAG_PROMO_KNIGHT: u16 = 8 << Self::FLG_BITS;
    const FLAG_PROMO_BISHOP: u16 = 9 << Self::FLG_BITS;
    const FLAG_PROMO_ROOK: u16 = 10 << Self::FLG_BITS;
    const FLAG_PROMO_QUEEN: u16 = 11 << Self::FLG_BITS;
    const FLAG_CAPTURE_PROMO_KNIGHT: u16 = 12 << Self::FLG_BITS;
    const FLAG_CAPTURE_PROMO_BISHOP: u16 = 13 << Self::FLG_BITS;
    const FLAG_CAPTURE_PROMO_ROOK: u16 = 14 << Self::FLG_BITS;
    const FLAG_CAPTURE_PROMO_QUEEN: u16 = 15 << Self::FLG_BITS;

    /// Creates a new [`Move`] from the given [`Square`]s and a [`MoveKind`].
    ///
    /// # Example
    /// ```
    /// # use gambit::{Move, Square, MoveKind, PieceKind};
    /// let e2e4 = Move::new(Square::E2, Square::E4, MoveKind::PawnDoublePush);
    /// assert_eq!(e2e4.to_string(), "e2e4");
    ///
    /// let e7e8n = Move::new(Square::E7, Square::E8, MoveKind::promotion(PieceKind::Knight));
    /// assert_eq!(e7e8n.to_string(), "e7e8n");
    /// ```
    #[inline(always)]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Self(kind as u16 | (to.inner() as u16) << Self::DST_BITS | from.inner() as u16)
    }

    /// Creates an "illegal" [`Move`], representing moving a piece to and from the same [`Square`].
    ///
    /// # Example
    /// ```
    /// # use gambit::Move;
    /// assert_eq!(Move::illegal().to_string(), "a1a1");
    /// ```
    #[inline(always)]
    pub const fn illegal() -> Self {
        Self(0)
    }

    /// Fetches the source (or "from") part of this [`Move`], as a [`Square`].
    #[inline(always)]
    pub const fn from(&self) -> Square {
        Square::from_index_unchecked((self.0 & Self::SRC_MASK) as usize)
    }

    /// Fetches the destination (or "to") part of this [`Move`], as a [`Square`].
    #[inline(always)]
    pub const fn to(&self) -> Square {
        Square::from_index_unchecked(((self.0 & Self::DST_MASK) >> Self::DST_BITS) as usize)
    }

    /// Fetches the [`MoveKind`] part of this [`Move`].
    #[inline(always)]
    pub fn kind(&self) -> MoveKind {
        // Safety: Since a `Move` can ONLY be constructed through the public API,
        // any instance is guaranteed to have a valid bit pattern for its `MoveKind`.
        unsafe { std::mem::transmute(self.0 & Self::FLG_MASK) }
    }

    /// Returns `true` if this [`Move`] is a capture of any kind
    /// (capture, promotion-capture, en passant).
    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.0 & Self::FLAG_CAPTURE != 0
    }

    /// Returns `true` if this [`Move`] is en passant.
    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        (self.0 & Self::FLG_MASK) ^ Self::FLAG_EP_CAPTURE == 0
    }

    /// Returns `true` if this [`Move`] is a short (kingside) castle.
    #[inline(always)]
    pub const fn is_short_castle(&self) -> bool {
        (self.0 & Self::FLG_MASK) ^ Self::FLAG_CASTLE_SHORT == 0
    }

    /// Returns `true` if this [`Move`] is a long (queenside) castle.
    #[inline(always)]
    pub const fn is_long_castle(&self) -> bool {
        (self.0 & Self::FLG_MASK) ^ Self::FLAG_CASTLE_LONG == 0
    }

    /// Returns `true` if this [`Move`] is a castle of either kind.
    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        self.is_short_castle() || self.is_long_castle()
    }

    /// Returns `true` if this [`Move`] is a pawn double push.
    #[inline(always)]
    pub const fn is_pawn_double_push(&self) -> bool {
        (self.0 & Self::FLG_MASK) ^ Self::FLAG_PAWN_DOUBLE == 0
    }

    /// Returns `true` if this [`Move`] is a promotion of any kind.
    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        // The most-significant flag bit is only ever set on promotions.
        self.0 & Self::FLAG_PROMO_KNIGHT != 0
    }

    /// If this [`Move`] is a promotion, returns the promoted-to [`PieceKind`].
    ///
    /// # Example
    /// ```
    /// # use gambit::{Move, MoveKind, PieceKind, Square};
    /// let e7e8q = Move::new(Square::E7, Square::E8, MoveKind::promotion(PieceKind::Queen));
    /// assert_eq!(e7e8q.promotion(), Some(PieceKind::Queen));
    /// ```
    #[inline(always)]
    pub fn promotion(&self) -> Option<PieceKind> {
        match self.0 & Self::FLG_MASK {
            Self::FLAG_PROMO_QUEEN | Self::FLAG_CAPTURE_PROMO_QUEEN => Some(PieceKind::Queen),
            Self::FLAG_PROMO_KNIGHT | Self::FLAG_CAPTURE_PROMO_KNIGHT => Some(PieceKind::Knight),
            Self::FLAG_PROMO_ROOK | Self::FLAG_CAPTURE_PROMO_ROOK => Some(PieceKind::Rook),
            Self::FLAG_PROMO_BISHOP | Self::FLAG_CAPTURE_PROMO_BISHOP => Some(PieceKind::Bishop),
            _ => None,
        }
    }

    /// Creates a [`Move`] from a string like `e2e4` or `e7e8q`, extracting
    /// extra info (captures, castling, en passant) from the provided
    /// [`Position`].
    ///
    /// Will return a [`anyhow::Error`] if the string is invalid in any way.
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let position = Position::from_fen("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N w - - 0 1").unwrap();
    /// let b7c8q = Move::from_uci(&position, "b7c8q").unwrap();
    /// assert_eq!(b7c8q, Move::new(Square::B7, Square::C8, MoveKind::promotion_capture(PieceKind::Queen)));
    /// ```
    pub fn from_uci(position: &Position, uci: &str) -> Result<Self> {
        let from = uci.get(0..2).ok_or(anyhow!(
            "Move str must contain a `from` square. Got {uci:?}"
        ))?;
        let to = uci
            .get(2..4)
            .ok_or(anyhow!("Move str must contain a `to` square. Got {uci:?}"))?;

        let from = Square::from_uci(from)?;
        let to = Square::from_uci(to)?;

        let piece = position
            .piece_at(from)
            .ok_or(anyhow!("No piece found at {from} when parsing {uci:?}"))?;

        // If there is a promotion char, attempt to convert it to a PieceKind
        let promotion = uci.get(4..5).map(PieceKind::from_str).transpose()?;

        let kind = MoveKind::new(piece, from, to, position, promotion);

        Ok(Self::new(from, to, kind))
    }
}

impl fmt::Display for Move {
    /// A [`Move`] is displayed as `from`, `to`, and the promotion character, if any.
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(promote) = self.promotion() {
            write!(f, "{}{}{}", self.from(), self.to(), promote)
        } else {
            write!(f, "{}{}", self.from(), self.to())
        }
    }
}

impl fmt::Debug for Move {
    /// Debug formatting also displays this [`Move`]'s [`MoveKind`].
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.kind())
    }
}

impl Default for Move {
    /// A "default" move is an illegal move. See [`Move::illegal`].
    #[inline(always)]
    fn default() -> Self {
        Self::illegal()
    }
}

impl<T: AsRef<str>> PartialEq<T> for Move {
    #[inline(always)]
    fn eq(&self, other: &T) -> bool {
        self.to_string().eq(other.as_ref())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Position;

    #[test]
    fn test_move_flags() {
        let (from, to) = (Square::A1, Square::H8);

        assert!(Move::new(from, to, MoveKind::Capture).is_capture());
        assert!(Move::new(from, to, MoveKind::EnPassantCapture).is_capture());
        assert!(Move::new(from, to, MoveKind::promotion_capture(PieceKind::Queen)).is_capture());
        assert!(!Move::new(from, to, MoveKind::Quiet).is_capture());
        assert!(!Move::new(from, to, MoveKind::promotion(PieceKind::Queen)).is_capture());

        assert!(Move::new(from, to, MoveKind::EnPassantCapture).is_en_passant());
        assert!(!Move::new(from, to, MoveKind::Capture).is_en_passant());

        assert!(Move::new(from, to, MoveKind::ShortCastle).is_castle());
        assert!(Move::new(from, to, MoveKind::LongCastle).is_castle());
        assert!(!Move::new(from, to, MoveKind::ShortCastle).is_long_castle());
        assert!(!Move::new(from, to, MoveKind::Quiet).is_castle());

        assert!(Move::new(from, to, MoveKind::PawnDoublePush).is_pawn_double_push());
        assert!(!Move::new(from, to, MoveKind::Quiet).is_pawn_double_push());

        assert!(Move::new(from, to, MoveKind::promotion(PieceKind::Knight)).is_promotion());
        assert!(Move::new(from, to, MoveKind::promotion_capture(PieceKind::Rook)).is_promotion());
        assert!(!Move::new(from, to, MoveKind::Capture).is_promotion());
    }

    #[test]
    fn test_move_roundtrip() {
        for kind in [
            MoveKind::Quiet,
            MoveKind::Capture,
            MoveKind::EnPassantCapture,
            MoveKind::promotion(PieceKind::Bishop),
            MoveKind::promotion_capture(PieceKind::Queen),
        ] {
            let mv = Move::new(Square::B7, Square::C8, kind);
            assert_eq!(mv.from(), Square::B7);
            assert_eq!(mv.to(), Square::C8);
            assert_eq!(mv.kind(), kind);
        }
    }

    /// Asserts that `uci` parses as `expected` on the position created from `fen`.
    fn test_move_parse(fen: &str, uci: &str, expected: Move) {
        let pos = Position::from_fen(fen).unwrap();

        let mv = Move::from_uci(&pos, uci);
        assert!(mv.is_ok(), "{}", mv.unwrap_err());
        let mv = mv.unwrap();
        assert_eq!(mv, expected, "{mv:?} is incorrect for {fen}");
    }

    #[test]
    fn test_move_parsing() {
        // All moves except castling can be tested with Pawns
        let pawn_fen = "2n1k3/1P6/8/5pP1/5n2/2P1P3/P7/4K3 w - f6 0 1";

        test_move_parse(
            pawn_fen,
            "a2a3",
            Move::new(Square::A2, Square::A3, MoveKind::Quiet),
        );
        test_move_parse(
            pawn_fen,
            "a2a4",
            Move::new(Square::A2, Square::A4, MoveKind::PawnDoublePush),
        );
        test_move_parse(
            pawn_fen,
            "e3f4",
            Move::new(Square::E3, Square::F4, MoveKind::Capture),
        );
        test_move_parse(
            pawn_fen,
            "g5f6",
            Move::new(Square::G5, Square::F6, MoveKind::EnPassantCapture),
        );
        test_move_parse(
            pawn_fen,
            "b7b8Q",
            Move::new(Square::B7, Square::B8, MoveKind::promotion(PieceKind::Queen)),
        );
        test_move_parse(
            pawn_fen,
            "b7c8n",
            Move::new(
                Square::B7,
                Square::C8,
                MoveKind::promotion_capture(PieceKind::Knight),
            ),
        );

        // Now test castling
        let king_fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        test_move_parse(
            king_fen,
            "e1g1",
            Move::new(Square::E1, Square::G1, MoveKind::ShortCastle),
        );
        test_move_parse(
            king_fen,
            "e1c1",
            Move::new(Square::E1, Square::C1, MoveKind::LongCastle),
        );

        let king_fen = "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1";
        test_move_parse(
            king_fen,
            "e8g8",
            Move::new(Square::E8, Square::G8, MoveKind::ShortCastle),
        );
        test_move_parse(
            king_fen,
            "e8c8",
            Move::new(Square::E8, Square::C8, MoveKind::LongCastle),
        );
    }
}
