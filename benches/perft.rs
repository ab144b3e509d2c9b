/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gambit::{perft, Position, FEN_KIWIPETE, FEN_STARTPOS};

fn bench_legal_movegen(c: &mut Criterion) {
    let positions = [
        ("startpos", FEN_STARTPOS),
        ("kiwipete", FEN_KIWIPETE),
        ("endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
    ];

    for (name, fen) in positions {
        let position = Position::from_fen(fen).unwrap();
        c.bench_function(&format!("legal_moves_{name}"), |b| {
            b.iter(|| black_box(&position).legal_moves().len());
        });
    }
}

fn bench_perft(c: &mut Criterion) {
    c.bench_function("perft_startpos_4", |b| {
        let mut position = Position::new();
        b.iter(|| perft(black_box(&mut position), 4));
    });

    c.bench_function("perft_kiwipete_3", |b| {
        let mut position = Position::from_fen(FEN_KIWIPETE).unwrap();
        b.iter(|| perft(black_box(&mut position), 3));
    });
}

criterion_group!(benches, bench_legal_movegen, bench_perft);
criterion_main!(benches);
