/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use super::{
    bishop_attacks, bishop_rays, king_attacks, knight_attacks, pawn_attacks, pawn_pushes,
    ray_between, ray_containing, rook_attacks, rook_rays, Bitboard, Color, File, Move, MoveKind,
    MoveList, Piece, PieceKind, Rank, Square,
};

/// FEN string for the starting position of chess.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// FEN string for the "kiwipete" position, a move generator stress test
/// featuring castling, en passant, promotions, pins, and checks.
pub const FEN_KIWIPETE: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/// The castling permissions of both players.
///
/// A right being held does not mean castling is currently playable; it only
/// records that the relevant King and Rook have not yet moved.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights {
    short: [bool; Color::COUNT],
    long: [bool; Color::COUNT],
}

impl CastlingRights {
    /// Creates a new [`CastlingRights`] with no rights held.
    #[inline(always)]
    pub const fn none() -> Self {
        Self {
            short: [false; Color::COUNT],
            long: [false; Color::COUNT],
        }
    }

    /// Creates a new [`CastlingRights`] from a FEN substring like `KQkq` or `-`.
    ///
    /// # Example
    /// ```
    /// # use gambit::{CastlingRights, Color};
    /// let rights = CastlingRights::from_uci("Kq").unwrap();
    /// assert!(rights.short(Color::White));
    /// assert!(!rights.long(Color::White));
    /// assert!(rights.long(Color::Black));
    /// ```
    pub fn from_uci(uci: &str) -> Result<Self> {
        let mut rights = Self::none();

        if uci == "-" {
            return Ok(rights);
        }

        for c in uci.chars() {
            match c {
                'K' => rights.short[Color::White.index()] = true,
                'Q' => rights.long[Color::White.index()] = true,
                'k' => rights.short[Color::Black.index()] = true,
                'q' => rights.long[Color::Black.index()] = true,
                _ => bail!("Invalid castling rights character: {c:?}"),
            }
        }

        Ok(rights)
    }

    /// Returns `true` if `color` may still castle kingside.
    #[inline(always)]
    pub const fn short(&self, color: Color) -> bool {
        self.short[color.index()]
    }

    /// Returns `true` if `color` may still castle queenside.
    #[inline(always)]
    pub const fn long(&self, color: Color) -> bool {
        self.long[color.index()]
    }

    /// Revokes `color`'s kingside castling right.
    #[inline(always)]
    pub fn clear_short(&mut self, color: Color) {
        self.short[color.index()] = false;
    }

    /// Revokes `color`'s queenside castling right.
    #[inline(always)]
    pub fn clear_long(&mut self, color: Color) {
        self.long[color.index()] = false;
    }

    /// Revokes both of `color`'s castling rights.
    #[inline(always)]
    pub fn clear_all(&mut self, color: Color) {
        self.short[color.index()] = false;
        self.long[color.index()] = false;
    }
}

impl fmt::Display for CastlingRights {
    /// Displays in FEN notation: `KQkq`, a subset thereof, or `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut any = false;
        for (flag, c) in [
            (self.short[Color::White.index()], 'K'),
            (self.long[Color::White.index()], 'Q'),
            (self.short[Color::Black.index()], 'k'),
            (self.long[Color::Black.index()], 'q'),
        ] {
            if flag {
                write!(f, "{c}")?;
                any = true;
            }
        }

        if !any {
            write!(f, "-")?;
        }

        Ok(())
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Everything needed to reverse a move: the snapshot of the irreversible
/// state, plus what was captured and which Rook (if any) was transferred.
///
/// Produced by [`Position::apply_move`] and consumed by
/// [`Position::undo_move`]. Records must be consumed in reverse order of
/// their creation; undoing out of order corrupts the board.
#[derive(Clone, Copy, Debug)]
pub struct UndoRecord {
    /// The move that was applied.
    mv: Move,
    /// The piece that moved, *before* any promotion.
    moved: Piece,
    /// The captured piece and the square it stood on, which differs from the
    /// move's destination for en passant.
    captured: Option<(Piece, Square)>,
    /// The castling Rook's transfer, as `(home, destination)`.
    rook: Option<(Square, Square)>,
    /// Castling rights before the move.
    castling: CastlingRights,
    /// En passant target before the move.
    ep_square: Option<Square>,
    /// Halfmove clock before the move.
    halfmove: u8,
    /// Fullmove counter before the move.
    fullmove: u16,
}

/// A scope guard that applies a [`Move`] on construction and undoes it when
/// dropped, so the undo runs even on early return.
///
/// # Example
/// ```
/// # use gambit::{MoveGuard, Move, Position};
/// let mut position = Position::new();
/// let mv = Move::from_uci(&position, "e2e4").unwrap();
/// {
///     let guard = MoveGuard::apply(&mut position, mv);
///     assert_eq!(guard.position().to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
/// }
/// assert_eq!(position, Position::new());
/// ```
pub struct MoveGuard<'a> {
    position: &'a mut Position,
    record: Option<UndoRecord>,
    captured: Option<PieceKind>,
}

impl<'a> MoveGuard<'a> {
    /// Applies `mv` to `position`, undoing it when the guard is dropped.
    #[inline(always)]
    pub fn apply(position: &'a mut Position, mv: Move) -> Self {
        let (captured, record) = position.apply_move(mv);
        Self {
            position,
            record: Some(record),
            captured,
        }
    }

    /// Access the [`Position`] with the move applied.
    #[inline(always)]
    pub fn position(&self) -> &Position {
        self.position
    }

    /// Mutable access to the [`Position`] with the move applied, for nested searches.
    #[inline(always)]
    pub fn position_mut(&mut self) -> &mut Position {
        self.position
    }

    /// The kind of piece this move captured, if any.
    #[inline(always)]
    pub fn captured(&self) -> Option<PieceKind> {
        self.captured
    }
}

impl Drop for MoveGuard<'_> {
    #[inline(always)]
    fn drop(&mut self) {
        if let Some(record) = self.record.take() {
            self.position.undo_move(record);
        }
    }
}

/// Per-generation metadata: the attack map, checkers, checkmask and pinmask
/// for the side to move, computed fresh for each call to
/// [`Position::legal_moves`].
struct MovegenState {
    /// Where the side-to-move's King stands.
    king_square: Square,
    /// All squares attacked by the opponent, with the friendly King removed
    /// from the slider blockers so he cannot retreat along a checking ray.
    attacked: Bitboard,
    /// All enemy pieces currently giving check.
    checkers: Bitboard,
    /// Squares a non-King piece may move to: any non-friendly square
    /// normally, or capture-the-checker / block-the-ray while in check.
    checkmask: Bitboard,
    /// Friendly pieces that are absolutely pinned to the King.
    pinned: Bitboard,
}

/// A complete chess position: piece placement, side to move, castling rights,
/// en passant target, and the move clocks.
///
/// The placement is stored redundantly as twelve per-piece [`Bitboard`]s,
/// per-color and whole-board aggregates, and a square-indexed mailbox. The
/// mutators keep all views in sync.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    /// One board per (color, kind) pair, indexed by [`Piece::index`].
    boards: [Bitboard; Piece::COUNT],
    /// All pieces belonging to each color.
    colors: [Bitboard; Color::COUNT],
    /// All occupied squares.
    occupied: Bitboard,
    /// What stands on each square, for O(1) point queries.
    mailbox: [Option<Piece>; Square::COUNT],

    /// Whose turn it is.
    side_to_move: Color,
    /// Castling permissions of both players.
    castling: CastlingRights,
    /// The square a pawn skipped on its double push last move, if any.
    ep_square: Option<Square>,
    /// Plies since the last capture or pawn move.
    halfmove: u8,
    /// Full moves played, starting at 1 and incremented after Black's move.
    fullmove: u16,
}

impl Position {
    /// Creates a new [`Position`] in the standard starting setup.
    #[inline(always)]
    pub fn new() -> Self {
        // The startpos FEN is a known-good constant.
        Self::from_fen(FEN_STARTPOS).unwrap()
    }

    /// Creates an empty [`Position`] with no pieces and no rights.
    fn empty() -> Self {
        Self {
            boards: [Bitboard::EMPTY_BOARD; Piece::COUNT],
            colors: [Bitboard::EMPTY_BOARD; Color::COUNT],
            occupied: Bitboard::EMPTY_BOARD,
            mailbox: [None; Square::COUNT],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            ep_square: None,
            halfmove: 0,
            fullmove: 1,
        }
    }

    /// Creates a new [`Position`] from a [FEN](https://www.chessprogramming.org/Forsyth-Edwards_Notation) string.
    ///
    /// Missing clock fields default to `0` and `1`.
    ///
    /// # Example
    /// ```
    /// # use gambit::*;
    /// let pos = Position::from_fen(FEN_KIWIPETE).unwrap();
    /// assert_eq!(pos.to_fen(), FEN_KIWIPETE);
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut position = Self::empty();
        let mut split = fen.split_whitespace();

        let placements = split
            .next()
            .ok_or(anyhow!("FEN string cannot be empty"))?;

        // Place pieces rank by rank, from rank 8 down to rank 1.
        let mut ranks = placements.split('/');
        for rank in Rank::iter().rev() {
            let placement = ranks.next().ok_or(anyhow!(
                "FEN placements must have 8 ranks. Got {placements:?}"
            ))?;

            let mut file = 0u8;
            for c in placement.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                } else {
                    if file >= 8 {
                        bail!("Rank {rank} of FEN {placements:?} is too long");
                    }
                    let square = Square::new(File(file), rank);
                    let piece = Piece::from_uci(c)?;
                    position.boards[piece.index()].set(square);
                    file += 1;
                }
            }

            if file != 8 {
                bail!("Rank {rank} of FEN {placements:?} does not cover 8 files");
            }
        }
        position.rebuild_aggregates();

        // Every later king lookup relies on both Kings existing.
        for color in Color::all() {
            if position.king(color).population() != 1 {
                bail!(
                    "FEN {placements:?} must have exactly one {} King",
                    color.name()
                );
            }
        }

        let side = split.next().unwrap_or("w");
        position.side_to_move = Color::from_uci(side.chars().next().unwrap_or('w'))?;

        let castling = split.next().unwrap_or("-");
        position.castling = CastlingRights::from_uci(castling)?;

        position.ep_square = match split.next().unwrap_or("-") {
            "-" => None,
            square => Some(Square::from_uci(square)?),
        };

        let halfmove = split.next().unwrap_or("0");
        position.halfmove = halfmove.parse().or(Err(anyhow!(
            "FEN string must have valid halfmove counter. Got {halfmove:?}"
        )))?;

        let fullmove = split.next().unwrap_or("1");
        position.fullmove = fullmove.parse().or(Err(anyhow!(
            "FEN string must have valid fullmove counter. Got {fullmove:?}"
        )))?;

        Ok(position)
    }

    /// Generates a FEN string from this [`Position`].
    pub fn to_fen(&self) -> String {
        let mut placements = String::with_capacity(64);

        for rank in Rank::iter().rev() {
            let mut empty = 0;
            for file in File::iter() {
                match self.mailbox[Square::new(file, rank)] {
                    Some(piece) => {
                        if empty > 0 {
                            placements += &empty.to_string();
                            empty = 0;
                        }
                        placements.push(piece.char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placements += &empty.to_string();
            }
            if rank != Rank::ONE {
                placements.push('/');
            }
        }

        let en_passant = self
            .ep_square
            .map(|ep| ep.to_string())
            .unwrap_or(String::from("-"));

        format!(
            "{placements} {} {} {en_passant} {} {}",
            self.side_to_move.to_uci(),
            self.castling,
            self.halfmove,
            self.fullmove
        )
    }

    /// Recomputes the color boards, occupancy, and mailbox from the twelve
    /// piece boards.
    ///
    /// Only needed after bulk placement (FEN parsing); the mutators keep all
    /// views in sync incrementally.
    fn rebuild_aggregates(&mut self) {
        self.colors = [Bitboard::EMPTY_BOARD; Color::COUNT];
        self.mailbox = [None; Square::COUNT];

        for piece in Piece::all() {
            self.colors[piece.color().index()] |= self.boards[piece.index()];
            for square in self.boards[piece.index()] {
                self.mailbox[square] = Some(piece);
            }
        }

        self.occupied = self.colors[Color::White.index()] | self.colors[Color::Black.index()];
    }

    /// Places `piece` onto `square`, updating all placement views.
    #[inline(always)]
    pub(crate) fn place(&mut self, piece: Piece, square: Square) {
        debug_assert!(
            self.mailbox[square].is_none(),
            "cannot place {piece:?} onto occupied square {square}"
        );

        self.boards[piece.index()].set(square);
        self.colors[piece.color().index()].set(square);
        self.occupied.set(square);
        self.mailbox[square] = Some(piece);
    }

    /// Removes and returns the piece on `square`, updating all placement views.
    #[inline(always)]
    pub(crate) fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.mailbox[square].take()?;

        self.boards[piece.index()].clear(square);
        self.colors[piece.color().index()].clear(square);
        self.occupied.clear(square);

        Some(piece)
    }

    /// Fetches the piece standing on `square`, if any.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()]
    }

    /// Returns `true` if there is a piece on `square`.
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.mailbox[square.index()].is_some()
    }

    /// Fetches the [`Bitboard`] of all locations of `piece`.
    #[inline(always)]
    pub const fn piece(&self, piece: Piece) -> Bitboard {
        self.boards[piece.index()]
    }

    /// Fetches the [`Bitboard`] of all squares occupied by `color`.
    #[inline(always)]
    pub const fn color(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    /// Fetches the [`Bitboard`] of all occupied squares.
    #[inline(always)]
    pub const fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// Fetches the [`Bitboard`] of all squares that are either empty or
    /// occupied by `color`'s opponent.
    #[inline(always)]
    pub fn enemy_or_empty(&self, color: Color) -> Bitboard {
        !self.color(color)
    }

    /// Fetches the [`Bitboard`] of `color`'s Pawns.
    #[inline(always)]
    pub const fn pawns(&self, color: Color) -> Bitboard {
        self.piece(Piece::new(color, PieceKind::Pawn))
    }

    /// Fetches the [`Bitboard`] of `color`'s Knights.
    #[inline(always)]
    pub const fn knights(&self, color: Color) -> Bitboard {
        self.piece(Piece::new(color, PieceKind::Knight))
    }

    /// Fetches the [`Bitboard`] of `color`'s King. Always a single bit.
    #[inline(always)]
    pub const fn king(&self, color: Color) -> Bitboard {
        self.piece(Piece::new(color, PieceKind::King))
    }

    /// Fetches the [`Square`] of `color`'s King.
    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Square {
        self.king(color).to_square_unchecked()
    }

    /// Fetches the [`Bitboard`] of `color`'s Rooks and Queens.
    #[inline(always)]
    pub fn orthogonal_sliders(&self, color: Color) -> Bitboard {
        self.piece(Piece::new(color, PieceKind::Rook))
            | self.piece(Piece::new(color, PieceKind::Queen))
    }

    /// Fetches the [`Bitboard`] of `color`'s Bishops and Queens.
    #[inline(always)]
    pub fn diagonal_sliders(&self, color: Color) -> Bitboard {
        self.piece(Piece::new(color, PieceKind::Bishop))
            | self.piece(Piece::new(color, PieceKind::Queen))
    }

    /// Whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The current en passant target square, if the last move was a double push.
    #[inline(always)]
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// The current castling permissions of both players.
    #[inline(always)]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Plies since the last capture or pawn move.
    #[inline(always)]
    pub const fn halfmove(&self) -> u8 {
        self.halfmove
    }

    /// Full moves played, starting at 1 and incremented after Black's move.
    #[inline(always)]
    pub const fn fullmove(&self) -> u16 {
        self.fullmove
    }

    /// Computes a [`Bitboard`] of all of `color`'s pieces that attack `square`.
    pub fn attackers_to(&self, square: Square, color: Color) -> Bitboard {
        let blockers = self.occupied;

        // A pawn of ours standing where an enemy pawn could capture us is,
        // symmetrically, a pawn attacking `square`. Likewise for the others.
        pawn_attacks(square, color.opponent()) & self.pawns(color)
            | knight_attacks(square) & self.knights(color)
            | king_attacks(square) & self.king(color)
            | rook_attacks(square, blockers) & self.orthogonal_sliders(color)
            | bishop_attacks(square, blockers) & self.diagonal_sliders(color)
    }

    /// Returns `true` if the side to move is currently in check.
    #[inline(always)]
    pub fn is_in_check(&self) -> bool {
        self.is_color_in_check(self.side_to_move)
    }

    /// Returns `true` if `color`'s King is currently attacked.
    #[inline(always)]
    pub fn is_color_in_check(&self, color: Color) -> bool {
        self.attackers_to(self.king_square(color), color.opponent())
            .is_nonempty()
    }

    /// Returns `true` if the side to move has no legal moves and is in check.
    #[inline(always)]
    pub fn is_checkmate(&self) -> bool {
        self.legal_moves().is_empty() && self.is_in_check()
    }

    /// Returns `true` if the side to move has no legal moves and is *not* in check.
    #[inline(always)]
    pub fn is_stalemate(&self) -> bool {
        self.legal_moves().is_empty() && !self.is_in_check()
    }

    /// Applies the provided [`Move`], returning the kind of piece captured
    /// (if any) and an [`UndoRecord`] that reverses the move exactly.
    ///
    /// No enforcement of legality; `mv` must come from [`Position::legal_moves`]
    /// or equivalent.
    ///
    /// # Panics
    /// If `mv` is malformed for this position (no piece on its source square,
    /// a capture with no victim, or a castle with no Rook at home).
    pub fn apply_move(&mut self, mv: Move) -> (Option<PieceKind>, UndoRecord) {
        let from = mv.from();
        let to = mv.to();

        let Some(mut piece) = self.take(from) else {
            panic!("no piece to move at {from} in move {mv} on {:?}", self.to_fen());
        };
        let color = piece.color();

        let mut record = UndoRecord {
            mv,
            moved: piece,
            captured: None,
            rook: None,
            castling: self.castling,
            ep_square: self.ep_square,
            halfmove: self.halfmove,
            fullmove: self.fullmove,
        };

        // The EP target only ever survives for one ply.
        self.ep_square = None;

        // Incremented now; reset below if a capture occurs or a pawn moves.
        self.halfmove += 1;

        let mut captured = None;
        if mv.is_capture() {
            // If this move was en passant, the victim isn't at `to`, it's one square behind.
            let victim_square = if mv.is_en_passant() {
                // Safety: En passant cannot occur on the first or eighth rank,
                // so there is guaranteed to be a square behind `to`.
                unsafe { to.backward_by(color, 1).unwrap_unchecked() }
            } else {
                to
            };

            let Some(victim) = self.take(victim_square) else {
                panic!(
                    "no piece to capture at {victim_square} in move {mv} on {:?}",
                    self.to_fen()
                );
            };
            captured = Some(victim.kind());
            record.captured = Some((victim, victim_square));

            // A capture on a Rook's home square revokes that side's right.
            let victim_color = victim.color();
            if victim_square == Square::rook_short_home(victim_color) {
                self.castling.clear_short(victim_color);
            } else if victim_square == Square::rook_long_home(victim_color) {
                self.castling.clear_long(victim_color);
            }

            self.halfmove = 0;
        } else if mv.is_pawn_double_push() {
            self.ep_square = from.forward_by(color, 1);
        } else if mv.is_short_castle() {
            let rook_from = Square::rook_short_home(color);
            let rook_to = Square::rook_short_castle(color);
            let Some(rook) = self.take(rook_from) else {
                panic!("no Rook at {rook_from} to castle in move {mv} on {:?}", self.to_fen());
            };
            self.place(rook, rook_to);
            record.rook = Some((rook_from, rook_to));
        } else if mv.is_long_castle() {
            let rook_from = Square::rook_long_home(color);
            let rook_to = Square::rook_long_castle(color);
            let Some(rook) = self.take(rook_from) else {
                panic!("no Rook at {rook_from} to castle in move {mv} on {:?}", self.to_fen());
            };
            self.place(rook, rook_to);
            record.rook = Some((rook_from, rook_to));
        }

        // Handle the mover's side effects: halfmove reset and rights updates.
        match piece.kind() {
            PieceKind::Pawn => self.halfmove = 0,

            PieceKind::Rook => {
                if from == Square::rook_short_home(color) {
                    self.castling.clear_short(color);
                } else if from == Square::rook_long_home(color) {
                    self.castling.clear_long(color);
                }
            }

            PieceKind::King => self.castling.clear_all(color),

            _ => {}
        }

        // Promotions only matter after all Pawn and Rook cases are settled.
        if let Some(promotion) = mv.promotion() {
            piece = piece.promoted(promotion);
        }

        self.place(piece, to);

        // Black's bit is 1, so this increments only after Black's move.
        self.fullmove += self.side_to_move.bits() as u16;
        self.side_to_move = self.side_to_move.opponent();

        (captured, record)
    }

    /// Reverses the move recorded in `record`, restoring every field of the
    /// position exactly as it was before the corresponding
    /// [`Position::apply_move`].
    ///
    /// Records must be consumed in reverse order of creation.
    pub fn undo_move(&mut self, record: UndoRecord) {
        let mv = record.mv;
        let to = mv.to();

        // Lift the mover (shedding any promotion) and put the snapshot back.
        let lifted = self.take(to);
        debug_assert!(
            lifted.is_some(),
            "nothing to undo at {to} for {mv} on {:?}",
            self.to_fen()
        );
        self.place(record.moved, mv.from());

        if let Some((rook_from, rook_to)) = record.rook {
            if let Some(rook) = self.take(rook_to) {
                self.place(rook, rook_from);
            }
        }

        if let Some((victim, square)) = record.captured {
            self.place(victim, square);
        }

        self.castling = record.castling;
        self.ep_square = record.ep_square;
        self.halfmove = record.halfmove;
        self.fullmove = record.fullmove;
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Generate all legal moves for the side to move.
    ///
    /// An empty list means the game is over: checkmate if the side to move is
    /// in check, stalemate otherwise.
    pub fn legal_moves(&self) -> MoveList {
        let state = self.movegen_state();
        let mut moves = MoveList::default();

        match state.checkers.population() {
            0 => self.generate_all_moves::<false>(&state, &mut moves),
            1 => self.generate_all_moves::<true>(&state, &mut moves),
            // In double check, only the King can move.
            _ => self.generate_king_moves::<true>(&state, &mut moves),
        }

        moves
    }

    /// Computes the legal-movegen metadata for the side to move.
    fn movegen_state(&self) -> MovegenState {
        let color = self.side_to_move;
        let opponent = color.opponent();
        let occupied = self.occupied;
        let king_square = self.king_square(color);

        let attacked = self.attack_map(opponent);

        let mut pinned = Bitboard::EMPTY_BOARD;

        // The easiest checkers to find are Knights and Pawns: just the
        // overlap of their attacks from the King and themselves.
        let mut checkers = self.knights(opponent) & knight_attacks(king_square)
            | self.pawns(opponent) & pawn_attacks(king_square, color);

        // By pretending there is a Rook/Bishop at our King that can attack
        // without blockers, we find all sliders aligned with the King, which
        // are either checkers or pinners.
        let enemy_sliding_attackers = rook_rays(king_square) & self.orthogonal_sliders(opponent)
            | bishop_rays(king_square) & self.diagonal_sliders(opponent);

        for attacker in enemy_sliding_attackers {
            let ray = ray_between(king_square, attacker);

            match (ray & occupied).population() {
                // Nothing between the attacker and the King: a checker.
                0 => checkers |= attacker,

                // Exactly one piece between: pinned, if it is ours.
                1 => pinned |= ray & self.color(color),

                // Two or more blockers can never both leave the ray in one move.
                _ => {}
            }
        }

        // Normally any non-friendly square is available; in check, only
        // capturing a checker or blocking its ray addresses the check.
        let mut checkmask = self.enemy_or_empty(color);
        if checkers.is_nonempty() {
            checkmask = checkers;
            // There is rarely more than one checker, so this rarely loops.
            for checker in checkers {
                checkmask |= ray_between(king_square, checker);
            }
        }

        MovegenState {
            king_square,
            attacked,
            checkers,
            checkmask,
            pinned,
        }
    }

    /// Computes a [`Bitboard`] of every square attacked by `color`.
    ///
    /// The defending King is removed from the slider blockers, so checking
    /// rays extend "through" him. This is what prevents a checked King from
    /// retreating along the ray he is checked on.
    fn attack_map(&self, color: Color) -> Bitboard {
        let blockers = self.occupied ^ self.king(color.opponent());

        // Pawn attacks in bulk: shift the whole pawn set diagonally forward.
        let pawns = self.pawns(color).forward_by(color, 1);
        let mut attacks = pawns.east() | pawns.west();

        for knight in self.knights(color) {
            attacks |= knight_attacks(knight);
        }
        attacks |= king_attacks(self.king_square(color));

        for slider in self.orthogonal_sliders(color) {
            attacks |= rook_attacks(slider, blockers);
        }
        for slider in self.diagonal_sliders(color) {
            attacks |= bishop_attacks(slider, blockers);
        }

        attacks
    }

    /// Wrapper for all of the `generate_x_moves` methods.
    #[inline(always)]
    fn generate_all_moves<const IN_CHECK: bool>(&self, state: &MovegenState, moves: &mut MoveList) {
        self.generate_pawn_moves::<IN_CHECK>(state, moves);
        self.generate_knight_moves::<IN_CHECK>(state, moves);
        self.generate_bishop_moves::<IN_CHECK>(state, moves);
        self.generate_rook_moves::<IN_CHECK>(state, moves);
        self.generate_king_moves::<IN_CHECK>(state, moves);
    }

    /// Creates and appends a [`Move`] that is either a quiet or capture.
    #[inline(always)]
    fn serialize_normal_move(&self, from: Square, to: Square, moves: &mut MoveList) {
        let kind = if self.has(to) {
            MoveKind::Capture
        } else {
            MoveKind::Quiet
        };

        moves.push(Move::new(from, to, kind));
    }

    /// Generates and serializes all legal Pawn moves.
    fn generate_pawn_moves<const IN_CHECK: bool>(&self, state: &MovegenState, moves: &mut MoveList) {
        let color = self.side_to_move;
        for from in self.pawns(color) {
            let mobility = self.legal_pawn_mobility(state, color, from);

            for to in mobility {
                let is_capture = self.has(to);

                // Promotions fan out into all four pieces.
                if to.rank() == Rank::eighth(color) {
                    for promotion in PieceKind::promotions() {
                        let kind = if is_capture {
                            MoveKind::promotion_capture(promotion)
                        } else {
                            MoveKind::promotion(promotion)
                        };
                        moves.push(Move::new(from, to, kind));
                    }
                    continue;
                }

                let kind = if Some(to) == self.ep_square {
                    MoveKind::EnPassantCapture
                } else if from.rank().abs_diff(to.rank()) == 2 {
                    MoveKind::PawnDoublePush
                } else if is_capture {
                    MoveKind::Capture
                } else {
                    MoveKind::Quiet
                };

                moves.push(Move::new(from, to, kind));
            }
        }
    }

    /// Generates and serializes all legal Knight moves.
    fn generate_knight_moves<const IN_CHECK: bool>(
        &self,
        state: &MovegenState,
        moves: &mut MoveList,
    ) {
        let color = self.side_to_move;
        for from in self.knights(color) {
            let attacks = knight_attacks(from);
            for to in self.legal_normal_piece_mobility(state, from, attacks) {
                self.serialize_normal_move(from, to, moves);
            }
        }
    }

    /// Generates and serializes all legal Bishop (and diagonal Queen) moves.
    fn generate_bishop_moves<const IN_CHECK: bool>(
        &self,
        state: &MovegenState,
        moves: &mut MoveList,
    ) {
        let color = self.side_to_move;
        let blockers = self.occupied;
        for from in self.diagonal_sliders(color) {
            let attacks = bishop_attacks(from, blockers);
            for to in self.legal_normal_piece_mobility(state, from, attacks) {
                self.serialize_normal_move(from, to, moves);
            }
        }
    }

    /// Generates and serializes all legal Rook (and orthogonal Queen) moves.
    fn generate_rook_moves<const IN_CHECK: bool>(
        &self,
        state: &MovegenState,
        moves: &mut MoveList,
    ) {
        let color = self.side_to_move;
        let blockers = self.occupied;
        for from in self.orthogonal_sliders(color) {
            let attacks = rook_attacks(from, blockers);
            for to in self.legal_normal_piece_mobility(state, from, attacks) {
                self.serialize_normal_move(from, to, moves);
            }
        }
    }

    /// Generates and serializes all legal King moves, castling included.
    fn generate_king_moves<const IN_CHECK: bool>(
        &self,
        state: &MovegenState,
        moves: &mut MoveList,
    ) {
        let color = self.side_to_move;
        let from = state.king_square;

        for to in self.legal_king_mobility::<IN_CHECK>(state, color) {
            let kind = if from.distance_files(to) == 2 {
                if to.file() > from.file() {
                    MoveKind::ShortCastle
                } else {
                    MoveKind::LongCastle
                }
            } else if self.has(to) {
                MoveKind::Capture
            } else {
                MoveKind::Quiet
            };

            moves.push(Move::new(from, to, kind));
        }
    }

    /// Generates a [`Bitboard`] of all legal destinations for a Pawn at `square`.
    fn legal_pawn_mobility(&self, state: &MovegenState, color: Color, square: Square) -> Bitboard {
        let blockers = self.occupied;

        // Pinned pawns are complicated:
        // - A pawn pinned horizontally cannot move. At all.
        // - A pawn pinned vertically can only push forward, not capture.
        // - A pawn pinned diagonally can only capture its pinner.
        let is_pinned = state.pinned.intersects(square);
        let pinmask =
            Bitboard::from_bool(!is_pinned) | ray_containing(square, state.king_square);

        // If en passant is available, check its legality; otherwise empty.
        let ep_bb = self
            .ep_square
            .map(|ep_square| self.generate_ep_bitboard(state, color, square, ep_square))
            .unwrap_or_default();

        // A double push requires both squares in front to be empty. Masking
        // the blockers' forward shadow over the push set handles this.
        let all_but_this_pawn = blockers ^ square;
        let double_push_mask = all_but_this_pawn | all_but_this_pawn.forward_by(color, 1);
        let pushes = pawn_pushes(square, color) & !double_push_mask & !blockers;

        // Attacks are only possible on enemy-occupied squares, or en passant.
        let enemies = self.color(color.opponent());
        let attacks = pawn_attacks(square, color) & (enemies | ep_bb);

        // Pseudo-legal      -------------Legal------------
        (pushes | attacks) & (state.checkmask | ep_bb) & pinmask
    }

    /// Generates a [`Bitboard`] for the legality of performing an en passant
    /// capture with the Pawn at `square`.
    ///
    /// If legal, the returned bitboard has the single EP square bit set;
    /// otherwise it is empty.
    #[inline(always)]
    fn generate_ep_bitboard(
        &self,
        state: &MovegenState,
        color: Color,
        square: Square,
        ep_square: Square,
    ) -> Bitboard {
        // The Pawn must stand diagonally adjacent to the EP square.
        if square.distance_ranks(ep_square) != 1 || square.distance_files(ep_square) != 1 {
            return Bitboard::EMPTY_BOARD;
        }

        let ep_bb = ep_square.bitboard();
        let ep_target_bb = ep_bb.backward_by(color, 1);

        // While in check, en passant only helps if it captures the checker
        // or drops the Pawn onto the blocking ray.
        if state.checkers.is_nonempty()
            && state.checkers.is_disjoint(ep_target_bb)
            && state.checkmask.is_disjoint(ep_bb)
        {
            return Bitboard::EMPTY_BOARD;
        }

        // Compute a blockers bitboard as if EP was performed. Both pawns
        // leave their rank at once, which a pinmask alone cannot see.
        let blockers_after_ep = (self.occupied ^ ep_target_bb ^ square) | ep_bb;

        // If, after performing EP, any sliders can attack our King, EP is not legal.
        let enemy_ortho_sliders = self.orthogonal_sliders(color.opponent());
        if rook_attacks(state.king_square, blockers_after_ep).intersects(enemy_ortho_sliders) {
            return Bitboard::EMPTY_BOARD;
        }

        let enemy_diag_sliders = self.diagonal_sliders(color.opponent());
        if bishop_attacks(state.king_square, blockers_after_ep).intersects(enemy_diag_sliders) {
            return Bitboard::EMPTY_BOARD;
        }

        ep_bb
    }

    /// Generates a [`Bitboard`] of all legal destinations for the King.
    fn legal_king_mobility<const IN_CHECK: bool>(
        &self,
        state: &MovegenState,
        color: Color,
    ) -> Bitboard {
        let attacks = king_attacks(state.king_square);

        // A checked King cannot castle out of check.
        let castling = if IN_CHECK {
            Bitboard::EMPTY_BOARD
        } else {
            self.castling_bitboard(state, color)
        };

        // The attack map already extends checking rays through the King, so
        // masking it out covers both unsafe squares and checked retreats.
        (attacks & self.enemy_or_empty(color) & !state.attacked) | castling
    }

    /// Generates a [`Bitboard`] of the King's castling destinations for `color`.
    fn castling_bitboard(&self, state: &MovegenState, color: Color) -> Bitboard {
        let mut destinations = Bitboard::EMPTY_BOARD;
        let king = state.king_square;
        let rook = Piece::new(color, PieceKind::Rook);

        if self.castling.short(color) {
            let rook_home = Square::rook_short_home(color);
            let king_dst = Square::king_short_castle(color);

            // The squares between King and Rook must be empty, the Rook must
            // still be home, and the King's path must not be attacked.
            if self.piece_at(rook_home) == Some(rook)
                && ray_between(king, rook_home).is_disjoint(self.occupied)
                && (ray_between(king, king_dst) | king_dst).is_disjoint(state.attacked)
            {
                destinations.set(king_dst);
            }
        }

        if self.castling.long(color) {
            let rook_home = Square::rook_long_home(color);
            let king_dst = Square::king_long_castle(color);

            // Same as above; the b-file square must be empty but may be
            // attacked, since the King never crosses it.
            if self.piece_at(rook_home) == Some(rook)
                && ray_between(king, rook_home).is_disjoint(self.occupied)
                && (ray_between(king, king_dst) | king_dst).is_disjoint(state.attacked)
            {
                destinations.set(king_dst);
            }
        }

        destinations
    }

    /// Generates a [`Bitboard`] of all legal destinations for a non-Pawn,
    /// non-King piece at `square`.
    #[inline(always)]
    fn legal_normal_piece_mobility(
        &self,
        state: &MovegenState,
        square: Square,
        default_attacks: Bitboard,
    ) -> Bitboard {
        // A pinned piece must not leave the ray on which it is pinned.
        let legal_squares = if state.pinned.intersects(square) {
            state.checkmask & ray_containing(square, state.king_square)
        } else {
            state.checkmask
        };

        default_attacks & legal_squares
    }
}

impl Default for Position {
    /// The default [`Position`] is the standard starting position.
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    /// Wrapper for [`Position::from_fen`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Position {
    /// Displays this [`Position`] as an 8x8 grid of piece characters, with
    /// rank and file labels and the non-placement FEN fields underneath.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}| ")?;
            for file in File::iter() {
                match self.mailbox[Square::new(file, rank)] {
                    Some(piece) => write!(f, "{piece} ")?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, " +----------------")?;
        write!(f, "   ")?;
        for file in File::iter() {
            write!(f, "{file} ")?;
        }
        writeln!(f)?;

        let en_passant = self
            .ep_square
            .map(|ep| ep.to_string())
            .unwrap_or(String::from("-"));
        write!(
            f,
            "\n{} to move   castling {}   ep {en_passant}   halfmove {}   fullmove {}",
            self.side_to_move.name(),
            self.castling,
            self.halfmove,
            self.fullmove
        )
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}\nfen: {}", self.to_fen())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Collects the legal moves as UCI strings, sorted for stable comparisons.
    fn legal_ucis(position: &Position) -> Vec<String> {
        let mut ucis: Vec<_> = position
            .legal_moves()
            .iter()
            .map(|mv| mv.to_string())
            .collect();
        ucis.sort();
        ucis
    }

    fn contains(position: &Position, uci: &str) -> bool {
        legal_ucis(position).iter().any(|m| m == uci)
    }

    #[test]
    fn test_fen_roundtrip() {
        for fen in [
            FEN_STARTPOS,
            FEN_KIWIPETE,
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 12 34",
        ] {
            let position = Position::from_fen(fen).unwrap();
            assert_eq!(position.to_fen(), fen);
        }
    }

    #[test]
    fn test_fen_rejects_garbage() {
        assert!(Position::from_fen("").is_err());
        assert!(Position::from_fen("rnbqkbnr/pppppppp/8/8").is_err());
        assert!(Position::from_fen("xxxxxxxx/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(Position::from_fen("9/8/8/8/8/8/8/8 w - - 0 1").is_err());
    }

    #[test]
    fn test_fen_requires_both_kings() {
        // No black King.
        assert!(Position::from_fen("4r3/8/8/8/8/5n2/8/4K3 w - - 0 1").is_err());
        // No white King.
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/8 w - - 0 1").is_err());
        // Two white Kings.
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/K3K3 w - - 0 1").is_err());
    }

    #[test]
    fn test_startpos_counts() {
        let position = Position::new();
        assert_eq!(position.occupied().population(), 32);
        assert_eq!(position.pawns(Color::White).population(), 8);
        assert_eq!(position.king_square(Color::White), Square::E1);
        assert_eq!(position.king_square(Color::Black), Square::E8);
        assert_eq!(position.legal_moves().len(), 20);
    }

    #[test]
    fn test_apply_undo_roundtrip() {
        let mut position = Position::new();
        let original = position.clone();

        // Play out a short opening and unwind it completely.
        let mut records = Vec::new();
        for uci in ["e2e4", "c7c5", "g1f3", "d7d6", "f1b5", "c8d7", "e1g1"] {
            let mv = Move::from_uci(&position, uci).unwrap();
            assert!(contains(&position, uci), "{uci} should be legal");
            let (_, record) = position.apply_move(mv);
            records.push(record);
        }

        for record in records.into_iter().rev() {
            position.undo_move(record);
        }

        assert_eq!(position, original);
        assert_eq!(position.to_fen(), FEN_STARTPOS);
    }

    #[test]
    fn test_capture_undo_restores_victim() {
        let mut position = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let original = position.clone();

        let mv = Move::from_uci(&position, "e4d5").unwrap();
        let (captured, record) = position.apply_move(mv);
        assert_eq!(captured, Some(PieceKind::Pawn));
        assert_eq!(position.pawns(Color::Black).population(), 0);

        position.undo_move(record);
        assert_eq!(position, original);
    }

    #[test]
    fn test_en_passant_capture() {
        let mut position =
            Position::from_fen("4k3/8/8/8/4p3/8/3P4/4K3 w - - 0 1").unwrap();

        // A double push must offer en passant.
        let mv = Move::from_uci(&position, "d2d4").unwrap();
        let (_, record) = position.apply_move(mv);
        assert_eq!(position.ep_square(), Some(Square::D3));
        assert!(contains(&position, "e4d3"));

        // Performing it removes the pushed pawn, not the one at `to`.
        let ep = Move::from_uci(&position, "e4d3").unwrap();
        let (captured, ep_record) = position.apply_move(ep);
        assert_eq!(captured, Some(PieceKind::Pawn));
        assert!(position.piece_at(Square::D4).is_none());
        assert_eq!(position.piece_at(Square::D3), Some(Piece::BLACK_PAWN));

        position.undo_move(ep_record);
        position.undo_move(record);
        assert_eq!(
            position.to_fen(),
            "4k3/8/8/8/4p3/8/3P4/4K3 w - - 0 1"
        );
    }

    #[test]
    fn test_en_passant_discovered_check_is_illegal() {
        // Capturing en passant would remove both pawns from the fourth rank,
        // exposing the Black King on a4 to the Queen on h4.
        let position = Position::from_fen("8/8/8/8/k2Pp2Q/8/8/4K3 b - d3 0 1").unwrap();
        assert!(!contains(&position, "e4d3"));
    }

    #[test]
    fn test_pinned_piece_cannot_leave_ray() {
        // The Bishop on e2 is pinned vertically by the Rook on e7 and has no
        // moves along the file.
        let position = Position::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        let bishop_moves: Vec<_> = legal_ucis(&position)
            .into_iter()
            .filter(|m| m.starts_with("e2"))
            .collect();
        assert!(bishop_moves.is_empty(), "pinned Bishop moved: {bishop_moves:?}");

        // A pinned Rook can still slide along the pin ray.
        let position = Position::from_fen("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1").unwrap();
        assert!(contains(&position, "e2e7"));
        assert!(contains(&position, "e2e3"));
        assert!(!contains(&position, "e2d2"));
    }

    #[test]
    fn test_check_evasions() {
        // A Rook gives check along the e-file. Legal replies: block, capture
        // the checker, or step the King off the file (but not along it).
        let position = Position::from_fen("4k3/8/8/8/4r3/8/3B4/4K3 w - - 0 1").unwrap();
        let ucis = legal_ucis(&position);

        assert!(ucis.contains(&"d2e3".to_string()), "block: {ucis:?}");
        assert!(ucis.contains(&"e1d1".to_string()));
        assert!(ucis.contains(&"e1f1".to_string()));
        // Retreating along the checking ray stays in check.
        assert!(!ucis.contains(&"e1e2".to_string()));
    }

    #[test]
    fn test_double_check_only_king_moves() {
        // Knight on f3 and Rook on e8 both give check; only the King may move.
        let position = Position::from_fen("4r2k/8/8/8/8/5n2/8/4K3 w - - 0 1").unwrap();
        for mv in position.legal_moves() {
            assert_eq!(mv.from(), Square::E1, "non-King move in double check: {mv:?}");
        }
        assert!(!position.legal_moves().is_empty());
    }

    #[test]
    fn test_castling_legality() {
        // Both castles available.
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(contains(&position, "e1g1"));
        assert!(contains(&position, "e1c1"));

        // A Rook on f2 covers f1: kingside is out, queenside is fine.
        let position = Position::from_fen("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1").unwrap();
        assert!(!contains(&position, "e1g1"));
        assert!(contains(&position, "e1c1"));

        // Castling rights revoked: no castling even with clear paths.
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert!(!contains(&position, "e1g1"));
        assert!(!contains(&position, "e1c1"));

        // Pieces in the way.
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1").unwrap();
        assert!(!contains(&position, "e1g1"));
        assert!(!contains(&position, "e1c1"));

        // A King in check cannot castle out of it.
        let position = Position::from_fen("r3k2r/8/8/8/8/4r3/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(!contains(&position, "e1g1"));
        assert!(!contains(&position, "e1c1"));
    }

    #[test]
    fn test_castling_moves_both_pieces() {
        let mut position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = Move::from_uci(&position, "e1g1").unwrap();
        let (_, record) = position.apply_move(mv);

        assert_eq!(position.piece_at(Square::G1), Some(Piece::WHITE_KING));
        assert_eq!(position.piece_at(Square::F1), Some(Piece::WHITE_ROOK));
        assert!(position.piece_at(Square::E1).is_none());
        assert!(position.piece_at(Square::H1).is_none());
        assert!(!position.castling_rights().short(Color::White));
        assert!(!position.castling_rights().long(Color::White));

        position.undo_move(record);
        assert_eq!(position.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    }

    #[test]
    fn test_rook_capture_revokes_rights() {
        let mut position =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = Move::from_uci(&position, "a1a8").unwrap();
        position.apply_move(mv);

        // Both queenside rights die: White's Rook left home, Black's was captured.
        assert!(!position.castling_rights().long(Color::White));
        assert!(!position.castling_rights().long(Color::Black));
        assert!(position.castling_rights().short(Color::Black));
    }

    #[test]
    fn test_checkmate_and_stalemate() {
        // Fool's mate.
        let position = Position::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        assert!(position.is_checkmate());
        assert!(!position.is_stalemate());

        // A classic Queen stalemate.
        let position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(position.is_stalemate());
        assert!(!position.is_checkmate());

        let position = Position::new();
        assert!(!position.is_checkmate());
        assert!(!position.is_stalemate());
    }

    #[test]
    fn test_move_guard_undoes_on_drop() {
        let mut position = Position::from_fen(FEN_KIWIPETE).unwrap();
        let original = position.clone();

        for mv in original.legal_moves() {
            let guard = MoveGuard::apply(&mut position, mv);
            assert_ne!(guard.position().side_to_move(), original.side_to_move());
            drop(guard);
            assert_eq!(position, original, "guard failed to undo {mv:?}");
        }
    }

    #[test]
    fn test_promotion_fans_out() {
        let position = Position::from_fen("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N w - - 0 1").unwrap();
        let ucis = legal_ucis(&position);

        // A quiet push and a capture each offer all four promotions.
        for promo in ["q", "r", "b", "n"] {
            assert!(ucis.contains(&format!("b7b8{promo}")), "{ucis:?}");
            assert!(ucis.contains(&format!("b7a8{promo}")), "{ucis:?}");
            assert!(ucis.contains(&format!("b7c8{promo}")), "{ucis:?}");
        }
    }
}
