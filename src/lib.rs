/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! A chess move generator and alpha-beta searcher.
//!
//! The board lives in [`Position`], which generates strictly legal moves,
//! applies them reversibly through [`MoveGuard`], and round-trips FEN.
//! Sliding piece attacks are answered by magic bitboard tables built
//! deterministically at startup. On top of that sit a material evaluator,
//! an alpha-beta searcher, and perft for validating the move generator.

/// Board representation, move generation, and perft.
mod board;

/// Command-line interface of the engine.
mod cli;

/// Static evaluation of chess positions.
mod eval;

/// Move ordering for the search.
mod movepicker;

/// Alpha-beta search and the background searcher.
mod search;

/// Scores, including mate encoding.
mod score;

pub use board::*;
pub use cli::*;
pub use eval::*;
pub use movepicker::*;
pub use score::*;
pub use search::*;
