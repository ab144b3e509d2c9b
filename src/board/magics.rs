/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Magic bitboard tables for the sliding pieces.
//!
//! Rather than ship hard-coded multipliers, the tables are constructed once
//! at startup: for every square we enumerate all blocker subsets of the
//! relevant occupancy mask, compute the true attack set for each by
//! ray-casting, and search for a multiplier that perfectly hashes every
//! subset into the table. A candidate is rejected if two subsets with
//! *different* attack sets map to the same slot; collisions between subsets
//! with identical attack sets are harmless and allowed. The search is seeded
//! deterministically, so every run builds the same tables.

use std::sync::LazyLock;

use super::{
    movegen::{BISHOP_DELTAS, ROOK_DELTAS},
    prng::XoShiRo,
    Bitboard, Square,
};

/// Magic attack table for Rooks, built on first access.
pub(crate) static ROOK_TABLE: LazyLock<MagicTable> =
    LazyLock::new(|| MagicTable::build(&ROOK_DELTAS));

/// Magic attack table for Bishops, built on first access.
pub(crate) static BISHOP_TABLE: LazyLock<MagicTable> =
    LazyLock::new(|| MagicTable::build(&BISHOP_DELTAS));

/// Maximum number of multiplier candidates to try per square before giving up.
const MAX_CANDIDATES: usize = 100_000_000;

/// The per-square data needed to hash a blocker arrangement into a table slot.
struct MagicEntry {
    /// Relevant occupancy mask: the slider's rays, excluding board edges.
    mask: Bitboard,
    /// The magic multiplier found for this square.
    magic: u64,
    /// `64 - popcount(mask)`; shifts the hash down to the index width.
    shift: u8,
    /// Where this square's slots begin in the shared attack array.
    offset: u32,
}

impl MagicEntry {
    /// Hashes `blockers` into an index into the shared attack array.
    #[inline(always)]
    const fn index(&self, blockers: Bitboard) -> usize {
        let blockers = blockers.0 & self.mask.0;
        let hash = blockers.wrapping_mul(self.magic);
        self.offset as usize + (hash >> self.shift) as usize
    }
}

/// A perfect-hash attack table for one slider kind, covering all 64 squares.
pub(crate) struct MagicTable {
    entries: [MagicEntry; Square::COUNT],
    attacks: Vec<Bitboard>,
}

impl MagicTable {
    /// Looks up the attack set for a slider on `square` with the given blockers.
    #[inline(always)]
    pub(crate) fn attacks(&self, square: Square, blockers: Bitboard) -> Bitboard {
        let entry = &self.entries[square.index()];
        self.attacks[entry.index(blockers)]
    }

    /// Constructs the table for a slider moving along `deltas`.
    ///
    /// # Panics
    /// If no magic can be found for some square within [`MAX_CANDIDATES`]
    /// attempts. This fires at initialization, never at query time.
    fn build(deltas: &[(i8, i8); 4]) -> Self {
        let mut prng = XoShiRo::new();
        let mut attacks = Vec::new();

        let entries = std::array::from_fn(|i| {
            let square = Square::from_index_unchecked(i);
            let mask = relevant_blockers(square, deltas);
            let shift = 64 - mask.population();
            let offset = attacks.len() as u32;

            // True attack set for every blocker arrangement within the mask.
            let subsets: Vec<(Bitboard, Bitboard)> = mask
                .subsets()
                .map(|blockers| (blockers, sliding_attacks(square, blockers, deltas)))
                .collect();

            let magic = find_magic(&subsets, mask, shift, &mut prng).unwrap_or_else(|| {
                panic!("failed to find a magic for {square} after {MAX_CANDIDATES} candidates")
            });

            // Fill this square's slots, now that the multiplier is known.
            let entry = MagicEntry {
                mask,
                magic,
                shift,
                offset,
            };
            attacks.resize(attacks.len() + (1 << mask.population()), Bitboard::EMPTY_BOARD);
            for &(blockers, attack) in &subsets {
                attacks[entry.index(blockers)] = attack;
            }

            entry
        });

        Self { entries, attacks }
    }
}

/// Searches for a multiplier that maps every blocker subset to a slot holding
/// its own attack set.
fn find_magic(
    subsets: &[(Bitboard, Bitboard)],
    mask: Bitboard,
    shift: u8,
    prng: &mut XoShiRo,
) -> Option<u64> {
    let table_size = 1usize << mask.population();
    let mut table = vec![Bitboard::EMPTY_BOARD; table_size];

    'candidates: for _ in 0..MAX_CANDIDATES {
        let magic = prng.get_next_sparse();

        // Candidates that hash the mask itself into too few high bits never
        // produce a valid mapping, so skip them without filling the table.
        if (mask.0.wrapping_mul(magic) >> 56).count_ones() < 6 {
            continue;
        }

        table.fill(Bitboard::EMPTY_BOARD);
        for &(blockers, attack) in subsets {
            let hash = blockers.0.wrapping_mul(magic);
            let slot = &mut table[(hash >> shift) as usize];

            if slot.is_empty() {
                *slot = attack;
            } else if *slot != attack {
                // Destructive collision: two subsets demand different
                // attack sets from the same slot.
                continue 'candidates;
            }
        }

        return Some(magic);
    }

    None
}

/// Computes the relevant occupancy mask for a slider on `square`.
///
/// This is the set of squares whose occupancy can change the slider's attack
/// set: its rays, excluding the final square in each direction. A piece on an
/// edge square is always "reachable" whether or not it blocks, so edges never
/// need to participate in the hash.
fn relevant_blockers(square: Square, deltas: &[(i8, i8); 4]) -> Bitboard {
    let mut mask = Bitboard::EMPTY_BOARD;

    for &(df, dr) in deltas {
        let mut ray = square;
        while let Some(shifted) = ray.offset(df, dr) {
            // Only include squares that have a further square behind them.
            if shifted.offset(df, dr).is_some() {
                mask.set(shifted);
            }
            ray = shifted;
        }
    }

    mask
}

/// Computes a slider's attack set by casting rays that stop at (and include)
/// the first blocker in each direction.
pub(crate) fn sliding_attacks(square: Square, blockers: Bitboard, deltas: &[(i8, i8); 4]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY_BOARD;

    for &(df, dr) in deltas {
        let mut ray = square;
        while let Some(shifted) = ray.offset(df, dr) {
            attacks.set(shifted);
            if blockers.intersects(shifted) {
                break;
            }
            ray = shifted;
        }
    }

    attacks
}

#[cfg(test)]
mod test {
    use super::*;

    /// Exhaustively compares magic lookups against ray-casting on one square.
    fn verify_square(square: Square, deltas: &[(i8, i8); 4], table: &MagicTable) {
        let mask = relevant_blockers(square, deltas);
        for blockers in mask.subsets() {
            assert_eq!(
                table.attacks(square, blockers),
                sliding_attacks(square, blockers, deltas),
                "lookup mismatch for slider on {square} with blockers:\n{blockers:?}"
            );
        }
    }

    #[test]
    fn rook_lookups_match_raycast() {
        // A corner, an edge, and a center square cover the mask size extremes.
        for square in [Square::A1, Square::E1, Square::D4] {
            verify_square(square, &ROOK_DELTAS, &ROOK_TABLE);
        }
    }

    #[test]
    fn bishop_lookups_match_raycast() {
        for square in [Square::A1, Square::E1, Square::D4] {
            verify_square(square, &BISHOP_DELTAS, &BISHOP_TABLE);
        }
    }

    #[test]
    fn randomized_occupancies_all_squares() {
        let mut prng = XoShiRo::from_seeds([0xDEAD, 0xBEEF, 0xCAFE, 0xF00D]);

        for square in Square::iter() {
            for _ in 0..128 {
                let blockers = Bitboard::new(prng.get_next() & prng.get_next());
                assert_eq!(
                    ROOK_TABLE.attacks(square, blockers),
                    sliding_attacks(square, blockers, &ROOK_DELTAS)
                );
                assert_eq!(
                    BISHOP_TABLE.attacks(square, blockers),
                    sliding_attacks(square, blockers, &BISHOP_DELTAS)
                );
            }
        }
    }

    #[test]
    fn relevant_masks_exclude_edges() {
        // A rook in the corner has 12 relevant squares, in the center 10.
        assert_eq!(relevant_blockers(Square::A1, &ROOK_DELTAS).population(), 12);
        assert_eq!(relevant_blockers(Square::D4, &ROOK_DELTAS).population(), 10);
        // A bishop in the center has 9, in the corner 6.
        assert_eq!(relevant_blockers(Square::D4, &BISHOP_DELTAS).population(), 9);
        assert_eq!(relevant_blockers(Square::A1, &BISHOP_DELTAS).population(), 6);
    }
}
