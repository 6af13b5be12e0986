// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


use clap::Parser;
use policy_ledger::{Ledger, Shell};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

/// Policy Ledger - Interactive savings/checking account ledger
///
/// Prompts for one account to open, then serves a numbered menu of deposits,
/// withdrawals, transfers and balance queries on stdin/stdout. All state is
/// kept in memory and lost on exit.
///
/// Diagnostics go to stderr; set RUST_LOG (e.g. RUST_LOG=debug) to see them.
#[derive(Parser, Debug)]
#[command(name = "policy-ledger", version)]
#[command(about = "An interactive in-memory account ledger", long_about = None)]
struct Args {}

fn main() {
    let _args = Args::parse();
    init_tracing();

    let ledger = Ledger::new();
    let stdin = io::stdin();
    let stdout = io::stdout();

    if let Err(e) = Shell::new(&ledger, stdin.lock(), stdout.lock()).run() {
        eprintln!("Error running shell: {}", e);
        process::exit(1);
    }
}

/// Logs to stderr so they never interleave with the prompt protocol on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
