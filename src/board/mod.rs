/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Board representation, move generation, and perft.

/// [`Bitboard`] and its iterators.
pub mod bitboard;
/// Magic tables for sliding piece attacks, built at startup.
mod magics;
/// Attack and ray lookups for all piece kinds.
pub mod movegen;
/// [`Move`], [`MoveKind`], and [`MoveList`].
pub mod moves;
/// Perft and splitperft.
pub mod perft;
/// [`Piece`], [`PieceKind`], and [`Color`].
pub mod piece;
/// [`Position`], FEN handling, and legal move generation.
pub mod position;
/// Deterministic PRNG for the magic search.
mod prng;
/// [`Square`], [`File`], and [`Rank`].
pub mod square;

pub use bitboard::Bitboard;
pub use movegen::{
    bishop_attacks, bishop_rays, king_attacks, knight_attacks, pawn_attacks, pawn_pushes,
    queen_attacks, ray_between, ray_containing, rook_attacks, rook_rays,
};
pub use moves::{Move, MoveKind, MoveList, MAX_NUM_MOVES};
pub use perft::{perft, splitperft};
pub use piece::{Color, Piece, PieceKind};
pub use position::{
    CastlingRights, MoveGuard, Position, UndoRecord, FEN_KIWIPETE, FEN_STARTPOS,
};
pub use square::{File, Rank, Square};
