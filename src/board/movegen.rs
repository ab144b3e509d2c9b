/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{
    magics::{BISHOP_TABLE, ROOK_TABLE},
    Bitboard, Color, Rank, Square,
};

/// A table indexed by two squares that returns a Bitboard of a ray of squares between (exclusive) the indices.
const RAY_BETWEEN: [[Bitboard; Square::COUNT]; Square::COUNT] = {
    let mut rays = [[Bitboard::EMPTY_BOARD; Square::COUNT]; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let from = Square::from_index_unchecked(i);
        let mut j = 0;
        while j < QUEEN_DELTAS.len() {
            let (df, dr) = QUEEN_DELTAS[j];
            let mut ray = Bitboard::EMPTY_BOARD; // Do not include `from`
            let mut to = from;

            while let Some(shifted) = to.offset(df, dr) {
                ray = ray.or(shifted.bitboard());
                to = shifted;
                // Do not include `to`
                rays[from.index()][to.index()] = ray.xor(to.bitboard());
            }

            j += 1;
        }

        i += 1;
    }

    rays
};

/// A table indexed by two squares that returns a Bitboard of the full line
/// shared by the indices, or an empty board when they are unaligned.
const RAY_CONTAINING: [[Bitboard; Square::COUNT]; Square::COUNT] = {
    let mut rays = [[Bitboard::EMPTY_BOARD; Square::COUNT]; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let from = Square::from_index_unchecked(i);
        let mut j = 0;
        while j < QUEEN_DELTAS.len() {
            let (df, dr) = QUEEN_DELTAS[j];

            // The full line through `from` in this direction: walk to one end,
            // then collect every square walking back across the board.
            let mut start = from;
            while let Some(shifted) = start.offset(-df, -dr) {
                start = shifted;
            }

            let mut line = Bitboard::from_square(start);
            let mut walk = start;
            while let Some(shifted) = walk.offset(df, dr) {
                line = line.or(shifted.bitboard());
                walk = shifted;
            }

            // Every square on that line shares it with `from`.
            let mut to = from;
            while let Some(shifted) = to.offset(df, dr) {
                to = shifted;
                rays[from.index()][to.index()] = line;
            }

            j += 1;
        }

        rays[from.index()][from.index()] = Bitboard::from_square(from);
        i += 1;
    }

    rays
};

const KNIGHT_ATTACKS: [Bitboard; 64] = generate_leaper_mobility(&KNIGHT_DELTAS);
const KING_ATTACKS: [Bitboard; 64] = generate_leaper_mobility(&QUEEN_DELTAS);
const ROOK_RAYS: [Bitboard; 64] = generate_rider_mobility(&ROOK_DELTAS);
const BISHOP_RAYS: [Bitboard; 64] = generate_rider_mobility(&BISHOP_DELTAS);
const WHITE_PAWN_PUSHES: [Bitboard; 64] = generate_pawn_pushes(Color::White);
const BLACK_PAWN_PUSHES: [Bitboard; 64] = generate_pawn_pushes(Color::Black);
const WHITE_PAWN_ATTACKS: [Bitboard; 64] = generate_pawn_attacks(Color::White);
const BLACK_PAWN_ATTACKS: [Bitboard; 64] = generate_pawn_attacks(Color::Black);

/// Deltas for the movement of the Queen.
const QUEEN_DELTAS: [(i8, i8); 8] = [
    /* Rook */
    (1, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
    /* Bishop */
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Deltas for the movement of the Rook.
pub(crate) const ROOK_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[0],
    QUEEN_DELTAS[1],
    QUEEN_DELTAS[2],
    QUEEN_DELTAS[3],
];

/// Deltas for the movement of the Bishop.
pub(crate) const BISHOP_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[4],
    QUEEN_DELTAS[5],
    QUEEN_DELTAS[6],
    QUEEN_DELTAS[7],
];

/// Deltas for the movement of the Knight.
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

/// Fetches a [`Bitboard`] with all of the bits along the ray between `from` and `to` (exclusive) set to `1`.
///
/// # Example
/// ```
/// # use gambit::*;
/// assert_eq!(ray_between(Square::A1, Square::A8), Bitboard::FILE_A ^ Square::A1 ^ Square::A8);
/// ```
#[inline(always)]
pub const fn ray_between(from: Square, to: Square) -> Bitboard {
    RAY_BETWEEN[from.index()][to.index()]
}

/// Fetches a [`Bitboard`] with all of the bits along the ray containing `from` and `to` set to `1`.
///
/// # Example
/// ```
/// # use gambit::*;
/// assert_eq!(ray_containing(Square::A3, Square::A5), Bitboard::FILE_A);
/// ```
#[inline(always)]
pub const fn ray_containing(from: Square, to: Square) -> Bitboard {
    RAY_CONTAINING[from.index()][to.index()]
}

/// Computes the possible moves for a Rook at a given [`Square`] with the provided blockers.
///
/// This will yield a [`Bitboard`] that allows the Rook to capture the first blocker.
#[inline(always)]
pub fn rook_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    ROOK_TABLE.attacks(square, blockers)
}

/// Computes the (unblocked) moves for a Rook at a given [`Square`].
#[inline(always)]
pub const fn rook_rays(square: Square) -> Bitboard {
    ROOK_RAYS[square.index()]
}

/// Computes the possible moves for a Bishop at a given [`Square`] with the provided blockers.
///
/// This will yield a [`Bitboard`] that allows the Bishop to capture the first blocker.
#[inline(always)]
pub fn bishop_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    BISHOP_TABLE.attacks(square, blockers)
}

/// Computes the (unblocked) moves for a Bishop at a given [`Square`].
#[inline(always)]
pub const fn bishop_rays(square: Square) -> Bitboard {
    BISHOP_RAYS[square.index()]
}

/// Computes the possible moves for a Queen at a given [`Square`] with the provided blockers.
///
/// This will yield a [`Bitboard`] that allows the Queen to capture the first blocker.
#[inline(always)]
pub fn queen_attacks(square: Square, blockers: Bitboard) -> Bitboard {
    rook_attacks(square, blockers) | bishop_attacks(square, blockers)
}

/// Fetch the raw, unblocked attacks for a knight on the provided square.
#[inline(always)]
pub const fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square.index()]
}

/// Fetch the raw, unblocked attacks for a king on the provided square.
#[inline(always)]
pub const fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square.index()]
}

/// Fetch the raw, unblocked pushes for a pawn of the provided color on the provided square.
#[inline(always)]
pub const fn pawn_pushes(square: Square, color: Color) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_PUSHES[square.index()],
        Color::Black => BLACK_PAWN_PUSHES[square.index()],
    }
}

/// Fetch the raw, unblocked attacks for a pawn of the provided color on the provided square.
#[inline(always)]
pub const fn pawn_attacks(square: Square, color: Color) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square.index()],
        Color::Black => BLACK_PAWN_ATTACKS[square.index()],
    }
}

/// Generates the default push mobility for Pawns.
///
/// Pawns, by default, may push forward by one, except when pushing from their
/// starting rank, in which case they may also push forward by two.
const fn generate_pawn_pushes(color: Color) -> [Bitboard; 64] {
    let mut boards = [Bitboard::EMPTY_BOARD; Square::COUNT];
    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let bb = Bitboard::from_square(square);

        if square.rank().inner() == Rank::second(color).inner() {
            boards[i] = bb.forward_by(color, 1).or(bb.forward_by(color, 2));
        } else {
            boards[i] = bb.forward_by(color, 1);
        }

        i += 1;
    }
    boards
}

/// Generates the default attack mobility for Pawns.
///
/// Pawns, by default, may capture diagonally forward by one.
const fn generate_pawn_attacks(color: Color) -> [Bitboard; 64] {
    let mut boards = [Bitboard::EMPTY_BOARD; Square::COUNT];
    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let bb = Bitboard::from_square(square);

        boards[i] = bb
            .forward_by(color, 1)
            .east()
            .or(bb.forward_by(color, 1).west());
        i += 1;
    }
    boards
}

/// Generates the moves from every location for the "Leaper" pieces.
/// Leapers may "leap" or "jump" to a square a specified distance away.
///
/// In standard chess, the Leapers are the King and Knight.
const fn generate_leaper_mobility(deltas: &[(i8, i8)]) -> [Bitboard; Square::COUNT] {
    // Represents all locations this piece can reach from that square/index.
    let mut mobility = [Bitboard::EMPTY_BOARD; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let mut movement = Bitboard::EMPTY_BOARD;

        let mut j = 0;
        while j < deltas.len() {
            let (df, dr) = deltas[j];
            // Offsets that shift off the board are simply discarded.
            if let Some(shifted) = square.offset(df, dr) {
                movement = movement.or(shifted.bitboard());
            }

            j += 1;
        }

        mobility[i] = movement;
        i += 1;
    }

    mobility
}

/// Generates the moves from every location for the "Rider" pieces.
/// Riders may "ride" or "slide" an unlimited number of squares in a direction.
///
/// In standard chess, the Riders are the Rook, Bishop, and Queen.
const fn generate_rider_mobility(deltas: &[(i8, i8)]) -> [Bitboard; Square::COUNT] {
    // Represents all locations this piece can reach from that square/index.
    let mut mobility = [Bitboard::EMPTY_BOARD; Square::COUNT];

    let mut i = 0;
    while i < Square::COUNT {
        let square = Square::from_index_unchecked(i);
        let mut movement = Bitboard::EMPTY_BOARD;

        let mut j = 0;
        while j < deltas.len() {
            let (df, dr) = deltas[j];
            // Cast a ray in this direction until the edge of the board.
            let mut ray = square;
            while let Some(shifted) = ray.offset(df, dr) {
                movement = movement.or(shifted.bitboard());
                ray = shifted;
            }

            j += 1;
        }

        mobility[i] = movement;
        i += 1;
    }

    mobility
}

#[cfg(test)]
mod test {
    use super::*;

    /// Checks if `moves` and `expected` contain all the same squares, ignoring order
    fn lists_match(moves: Bitboard, expected: &[Square]) {
        assert_eq!(
            moves.population() as usize,
            expected.len(),
            "\nMoves: {:?}\nExpected: {:?}",
            moves.iter().collect::<Vec<_>>(),
            expected
        );

        for mv in moves {
            assert!(expected.contains(&mv), "{mv} not found in {expected:?}");
        }
    }

    #[test]
    fn rook_blockers() {
        let legal_moves = [
            Square::D2,
            Square::D3,
            Square::D5,
            Square::D6,
            Square::A4,
            Square::B4,
            Square::C4,
            Square::E4,
            Square::F4,
            Square::G4,
            Square::H4,
        ];

        // . . . X . . . X
        // . . . . . . . .
        // . . . X . . . .
        // . . . . . . . .
        // . . . . . . . X
        // . . X . . . . .
        // . . . X . X . .
        // . . . . . . . .
        let blockers =
            Bitboard::new(0b1000100000000000000010000000000010000000000001000010100000000000);

        let moves = rook_attacks(Square::D4, blockers);

        lists_match(moves, &legal_moves);
    }

    #[test]
    fn bishop_blockers() {
        // Blockers on c3 and f6; the bishop on d4 stops at (and can capture) each.
        let blockers = Bitboard::from_square(Square::C3) | Square::F6;
        let moves = bishop_attacks(Square::D4, blockers);

        let legal_moves = [
            Square::C3,
            Square::E5,
            Square::F6,
            Square::C5,
            Square::B6,
            Square::A7,
            Square::E3,
            Square::F2,
            Square::G1,
        ];

        lists_match(moves, &legal_moves);
    }

    #[test]
    fn ray_tables() {
        assert_eq!(
            ray_between(Square::A1, Square::A4),
            Bitboard::from_square(Square::A2) | Square::A3
        );
        assert_eq!(ray_between(Square::A1, Square::B3), Bitboard::EMPTY_BOARD);
        assert_eq!(ray_containing(Square::C1, Square::C7), Bitboard::FILE_C);
        assert_eq!(
            ray_containing(Square::B4, Square::D6),
            Bitboard::from_square(Square::A3)
                | Square::B4
                | Square::C5
                | Square::D6
                | Square::E7
                | Square::F8
        );
        assert_eq!(
            ray_containing(Square::A1, Square::B3),
            Bitboard::EMPTY_BOARD
        );
    }

    #[test]
    fn pawn_tables() {
        lists_match(
            pawn_pushes(Square::E2, Color::White),
            &[Square::E3, Square::E4],
        );
        lists_match(pawn_pushes(Square::E3, Color::White), &[Square::E4]);
        lists_match(
            pawn_pushes(Square::D7, Color::Black),
            &[Square::D6, Square::D5],
        );
        lists_match(
            pawn_attacks(Square::E4, Color::White),
            &[Square::D5, Square::F5],
        );
        lists_match(pawn_attacks(Square::A4, Color::Black), &[Square::B3]);
    }

    #[test]
    fn leaper_tables() {
        lists_match(
            knight_attacks(Square::A1),
            &[Square::B3, Square::C2],
        );
        assert_eq!(knight_attacks(Square::D4).population(), 8);
        lists_match(
            king_attacks(Square::A1),
            &[Square::A2, Square::B1, Square::B2],
        );
        assert_eq!(king_attacks(Square::E4).population(), 8);
    }
}
