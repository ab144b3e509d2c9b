/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Perft over well-known positions, checked against published node counts
//! from <https://www.chessprogramming.org/Perft_Results>.

use gambit::{perft, Position, FEN_KIWIPETE, FEN_STARTPOS};

/// Asserts that `fen` produces the `expected` node counts, depth by depth,
/// starting at depth 1.
fn assert_perft(fen: &str, expected: &[u64]) {
    let mut position = Position::from_fen(fen).unwrap();

    for (i, &nodes) in expected.iter().enumerate() {
        let depth = i + 1;
        assert_eq!(
            perft(&mut position, depth),
            nodes,
            "perft({depth}) mismatch on {fen:?}"
        );
    }
}

#[test]
fn perft_startpos() {
    assert_perft(FEN_STARTPOS, &[20, 400, 8_902, 197_281, 4_865_609]);
}

#[test]
fn perft_kiwipete() {
    assert_perft(FEN_KIWIPETE, &[48, 2_039, 97_862]);
}

#[test]
fn perft_position_3() {
    // Heavy on en passant and pins.
    assert_perft(
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        &[14, 191, 2_812, 43_238, 674_624],
    );
}

#[test]
fn perft_position_4() {
    // Promotions, underpromotions, and castling through attacked squares.
    assert_perft(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        &[6, 264, 9_467, 422_333],
    );
}

#[test]
fn perft_position_5() {
    assert_perft(
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[44, 1_486, 62_379, 2_103_487],
    );
}

#[test]
fn perft_position_6() {
    assert_perft(
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        &[46, 2_079, 89_890, 3_894_594],
    );
}
