/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::{perft, splitperft, Evaluator, Position, Thinker};

/// Command-line interface of the engine.
#[derive(Debug, Clone, Parser)]
#[command(about, version, rename_all = "lower")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// A command to execute against a single position.
///
/// Every command takes an optional FEN string; when omitted, the standard
/// starting position is used.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print a visual representation of the position.
    #[command(alias = "d")]
    Display {
        /// The position to display, in FEN notation.
        fen: Option<String>,
    },

    /// Print a static evaluation of the position.
    Eval {
        /// The position to evaluate, in FEN notation.
        fen: Option<String>,
    },

    /// Show all legal moves in the position.
    Moves {
        /// The position to generate moves for, in FEN notation.
        fen: Option<String>,

        /// If set, moves will be sorted in alphabetical order.
        #[arg(short, long, default_value = "false")]
        sort: bool,
    },

    /// Count the leaf nodes of the legal move tree at the supplied depth.
    Perft {
        /// How many plies deep to count.
        depth: usize,

        /// The position to count from, in FEN notation.
        fen: Option<String>,
    },

    /// Like perft, but with a per-root-move breakdown for debugging.
    #[command(alias = "sperft")]
    Splitperft {
        /// How many plies deep to count.
        depth: usize,

        /// The position to count from, in FEN notation.
        fen: Option<String>,
    },

    /// Search the position for the best move.
    Search {
        /// How many plies deep to search.
        #[arg(short, long, default_value = "4")]
        depth: usize,

        /// The position to search, in FEN notation.
        fen: Option<String>,
    },
}

impl Command {
    /// Executes this [`Command`], printing its output to stdout.
    pub fn execute(self) -> Result<()> {
        match self {
            Self::Display { fen } => {
                println!("{}", position_from(fen)?);
            }

            Self::Eval { fen } => {
                let position = position_from(fen)?;
                println!("{}", Evaluator::new(&position).eval());
            }

            Self::Moves { fen, sort } => {
                let position = position_from(fen)?;
                let mut moves: Vec<String> = position
                    .legal_moves()
                    .iter()
                    .map(|mv| mv.to_string())
                    .collect();
                if sort {
                    moves.sort();
                }
                println!("{}", moves.join(" "));
            }

            Self::Perft { depth, fen } => {
                let mut position = position_from(fen)?;
                println!("{}", perft(&mut position, depth));
            }

            Self::Splitperft { depth, fen } => {
                let mut position = position_from(fen)?;
                splitperft(&mut position, depth);
            }

            Self::Search { depth, fen } => {
                let position = position_from(fen)?;
                let result = Thinker::spawn(position, depth).join();

                match result.bestmove {
                    Some(mv) => println!("bestmove {mv} ({}, {} nodes)", result.score, result.nodes),
                    None => println!("no legal moves ({})", result.score),
                }
            }
        }

        Ok(())
    }
}

/// Parses the provided FEN, defaulting to the starting position.
fn position_from(fen: Option<String>) -> Result<Position> {
    match fen {
        Some(fen) => Position::from_fen(&fen).with_context(|| format!("invalid FEN {fen:?}")),
        None => Ok(Position::new()),
    }
}
