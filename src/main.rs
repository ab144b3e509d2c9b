/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::Parser;

fn main() {
    let cli = gambit::Cli::parse();

    if let Err(e) = cli.command.execute() {
        eprintln!("{} encountered an error: {e}", env!("CARGO_PKG_NAME"));
        std::process::exit(1);
    }
}
