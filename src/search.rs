/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{sync::mpsc, thread};

use crate::{Evaluator, Move, MoveGuard, MovePicker, Position, Score};

/// Maximum depth, in plies, that any search can reach.
pub const MAX_DEPTH: usize = 255;

/// The result of a search: the best move found and what the searcher thinks
/// of it.
#[derive(Clone, Copy, Debug)]
pub struct SearchResult {
    /// Number of nodes visited during the search.
    pub nodes: u64,
    /// The best move found. `None` only if the root has no legal moves.
    pub bestmove: Option<Move>,
    /// The score of `bestmove`, relative to the side to move.
    pub score: Score,
}

impl Default for SearchResult {
    /// A default [`SearchResult`] has no best move and the lowest possible score.
    #[inline(always)]
    fn default() -> Self {
        Self {
            nodes: 0,
            bestmove: None,
            score: -Score::INF,
        }
    }
}

/// Searches `position` to `depth` plies and returns the result.
///
/// # Example
/// ```
/// # use gambit::{search, Position};
/// // White mates in one with Ra8.
/// let mut position = Position::from_fen("k7/8/1K6/8/8/8/8/7R w - - 0 1").unwrap();
/// let result = search(&mut position, 3);
/// assert_eq!(result.bestmove.unwrap(), "h1h8");
/// ```
pub fn search(position: &mut Position, depth: usize) -> SearchResult {
    let depth = depth.min(MAX_DEPTH);
    let mut result = SearchResult::default();

    let moves = position.legal_moves();
    if moves.is_empty() {
        // The root is already decided; score it as mated or drawn.
        result.score = if position.is_in_check() {
            -Score::MATE
        } else {
            Score::DRAW
        };
        return result;
    }

    for mv in MovePicker::new(position, moves) {
        let mut guard = MoveGuard::apply(position, mv);
        let score = -negamax(
            guard.position_mut(),
            depth.saturating_sub(1),
            1,
            -Score::INF,
            -result.score,
            &mut result.nodes,
        );
        drop(guard);

        if score > result.score || result.bestmove.is_none() {
            result.score = score;
            result.bestmove = Some(mv);
        }
    }

    result
}

/// Searches `position` to `depth` plies and returns only the best move.
///
/// Returns `None` iff there are no legal moves; the caller can tell mate
/// from stalemate with [`Position::is_in_check`].
#[inline(always)]
pub fn request_move(position: &mut Position, depth: usize) -> Option<Move> {
    search(position, depth).bestmove
}

/// Recursive negamax with alpha-beta pruning.
///
/// Returns the score of `position` relative to its side to move. `ply` is the
/// distance from the root, used to prefer faster mates.
fn negamax(
    position: &mut Position,
    depth: usize,
    ply: i32,
    mut alpha: Score,
    beta: Score,
    nodes: &mut u64,
) -> Score {
    *nodes += 1;

    let moves = position.legal_moves();
    if moves.is_empty() {
        // No legal moves: mate (worse the closer to the root) or stalemate.
        return if position.is_in_check() {
            -Score::MATE + ply
        } else {
            Score::DRAW
        };
    }

    if depth == 0 {
        return Evaluator::new(position).eval();
    }

    let mut best = -Score::INF;
    for mv in MovePicker::new(position, moves) {
        let mut guard = MoveGuard::apply(position, mv);
        let score = -negamax(guard.position_mut(), depth - 1, ply + 1, -beta, -alpha, nodes);
        drop(guard);

        if score > best {
            best = score;

            if score > alpha {
                alpha = score;
            }

            // Fail high: the opponent will never allow this line.
            if score >= beta {
                break;
            }
        }
    }

    best
}

/// A background searcher.
///
/// Spawns a thread that runs a fixed-depth search and delivers the result
/// over a channel, leaving the caller free in the meantime.
pub struct Thinker {
    handle: thread::JoinHandle<()>,
    receiver: mpsc::Receiver<SearchResult>,
}

impl Thinker {
    /// Spawns a search of `position` to `depth` plies on a new thread.
    pub fn spawn(position: Position, depth: usize) -> Self {
        let (sender, receiver) = mpsc::channel();

        let handle = thread::spawn(move || {
            let mut position = position;
            let result = search(&mut position, depth);
            // The receiver may have been dropped; nothing to do if so.
            let _ = sender.send(result);
        });

        Self { handle, receiver }
    }

    /// Blocks until the search completes and returns its result.
    pub fn join(self) -> SearchResult {
        let result = self.receiver.recv().unwrap_or_default();
        let _ = self.handle.join();
        result
    }

    /// Fetches the result if the search has already finished.
    pub fn try_result(&self) -> Option<SearchResult> {
        self.receiver.try_recv().ok()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_finds_mate_in_one() {
        // Back-rank mate with the Rook.
        let mut position = Position::from_fen("k7/8/1K6/8/8/8/8/7R w - - 0 1").unwrap();
        let result = search(&mut position, 3);

        assert_eq!(result.bestmove.unwrap(), "h1h8");
        assert!(result.score.is_mate());
        assert_eq!(result.score.moves_to_mate(), 1);
    }

    #[test]
    fn test_prefers_faster_mate() {
        // Queen and King vs King; mate in two at most. Any mating line is
        // fine, but the score must say mate, not a material count.
        let mut position = Position::from_fen("8/8/8/8/8/1K6/3Q4/k7 w - - 0 1").unwrap();
        let result = search(&mut position, 5);

        assert!(result.score.is_mate());
        assert!(result.score.moves_to_mate() >= 1);
    }

    #[test]
    fn test_mated_root_scores_mate() {
        let mut position = Position::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        let result = search(&mut position, 3);

        assert!(result.bestmove.is_none());
        assert_eq!(result.score, -Score::MATE);
    }

    #[test]
    fn test_stalemate_scores_draw() {
        let mut position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let result = search(&mut position, 3);

        assert!(result.bestmove.is_none());
        assert_eq!(result.score, Score::DRAW);
    }

    #[test]
    fn test_grabs_hanging_queen() {
        // White to move can simply take the undefended Queen.
        let mut position =
            Position::from_fen("4k3/8/3q4/8/4N3/8/8/4K3 w - - 0 1").unwrap();
        let result = search(&mut position, 2);
        assert_eq!(result.bestmove.unwrap(), "e4d6");
    }

    #[test]
    fn test_pruned_search_matches_full_minimax() {
        // Alpha-beta must return the same value as an unpruned search.
        fn minimax(position: &mut Position, depth: usize, ply: i32) -> Score {
            let moves = position.legal_moves();
            if moves.is_empty() {
                return if position.is_in_check() {
                    -Score::MATE + ply
                } else {
                    Score::DRAW
                };
            }
            if depth == 0 {
                return Evaluator::new(position).eval();
            }

            let mut best = -Score::INF;
            for mv in moves {
                let mut guard = MoveGuard::apply(position, mv);
                let score = -minimax(guard.position_mut(), depth - 1, ply + 1);
                drop(guard);
                best = best.max(score);
            }
            best
        }

        for fen in [
            crate::FEN_KIWIPETE,
            "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
        ] {
            let mut position = Position::from_fen(fen).unwrap();
            let expected = minimax(&mut position, 3, 0);
            let result = search(&mut position, 3);
            assert_eq!(result.score, expected, "pruning changed the value of {fen}");
        }
    }

    #[test]
    fn test_thinker_delivers_result() {
        let position = Position::new();
        let thinker = Thinker::spawn(position, 3);
        let result = thinker.join();

        assert!(result.bestmove.is_some());
        assert!(result.nodes > 0);
    }
}
