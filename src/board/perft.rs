/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{MoveGuard, Position};

/// Counts the leaf nodes of the legal move tree rooted at `position`, `depth`
/// plies deep.
///
/// Uses bulk counting: at depth 1 the length of the move list *is* the
/// answer, so the moves at the deepest level are never applied.
///
/// # Example
/// ```
/// # use gambit::{perft, Position};
/// let mut position = Position::new();
/// assert_eq!(perft(&mut position, 2), 400);
/// ```
pub fn perft(position: &mut Position, depth: usize) -> u64 {
    // Bulk counting; the lowest depth that can be reached in this recursion.
    if depth == 1 {
        return position.legal_moves().len() as u64;
    }

    // Recursively accumulate the nodes from the remaining depths.
    if depth == 0 {
        return 1;
    }

    position.legal_moves().iter().fold(0, |nodes, &mv| {
        let mut guard = MoveGuard::apply(position, mv);
        nodes + perft(guard.position_mut(), depth - 1)
    })
}

/// Like [`perft`], but prints a line `<move>\t<nodes>` for every legal root
/// move before returning the total, for diffing against another engine.
pub fn splitperft(position: &mut Position, depth: usize) -> u64 {
    let mut total = 0;

    for mv in position.legal_moves() {
        let nodes = if depth > 1 {
            let mut guard = MoveGuard::apply(position, mv);
            perft(guard.position_mut(), depth - 1)
        } else {
            1
        };

        println!("{mv}\t{nodes}");
        total += nodes;
    }

    println!("\n{total}");
    total
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::position::FEN_KIWIPETE;

    #[test]
    fn perft_startpos_shallow() {
        let mut position = Position::new();
        assert_eq!(perft(&mut position, 0), 1);
        assert_eq!(perft(&mut position, 1), 20);
        assert_eq!(perft(&mut position, 2), 400);
        assert_eq!(perft(&mut position, 3), 8_902);
    }

    #[test]
    fn perft_kiwipete_shallow() {
        let mut position = Position::from_fen(FEN_KIWIPETE).unwrap();
        assert_eq!(perft(&mut position, 1), 48);
        assert_eq!(perft(&mut position, 2), 2_039);
    }

    #[test]
    fn perft_leaves_position_untouched() {
        let mut position = Position::from_fen(FEN_KIWIPETE).unwrap();
        let original = position.clone();
        perft(&mut position, 3);
        assert_eq!(position, original);
    }
}
