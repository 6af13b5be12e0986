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


//! # Policy Ledger
//!
//! This library provides an in-memory account ledger where every account
//! carries a withdrawal policy: savings accounts keep a minimum balance,
//! checking accounts may run an overdraft.
//!
//! ## Core Components
//!
//! - [`Ledger`]: Owns accounts by number; create, deposit, withdraw, transfer
//! - [`Account`]: Holder identity, balance and bound policy
//! - [`WithdrawalPolicy`]: Minimum-balance floor or overdraft limit
//! - [`LedgerError`]: Closed set of declines for rejected operations
//! - [`Shell`]: Line-based prompt loop driving a ledger
//!
//! ## Example
//!
//! ```
//! use policy_ledger::{Ledger, LedgerError};
//! use rust_decimal_macros::dec;
//!
//! let ledger = Ledger::new();
//! ledger.create_account("savings", "001", "Alice", dec!(1000)).unwrap();
//! ledger.create_account("checking", "002", "Bob", dec!(0)).unwrap();
//!
//! // Savings keeps 500 in reserve.
//! assert!(matches!(
//!     ledger.withdraw("001", dec!(600)),
//!     Err(LedgerError::WithdrawalDeclined { .. })
//! ));
//! assert_eq!(ledger.withdraw("001", dec!(400)), Ok(dec!(600)));
//!
//! // Checking may go 1000 below zero.
//! assert_eq!(ledger.withdraw("002", dec!(800)), Ok(dec!(-800)));
//!
//! ledger.transfer_money("001", "002", dec!(100)).unwrap();
//! assert_eq!(ledger.show_balance("001"), Ok(dec!(500)));
//! assert_eq!(ledger.show_balance("002"), Ok(dec!(-700)));
//! ```
//!
//! ## Thread Safety
//!
//! The ledger can be shared across threads. Each account's policy check and
//! balance update happen under one lock, and transfers hold both accounts'
//! locks for their whole duration.

pub mod account;
mod base;
pub mod error;
mod ledger;
pub mod policy;
pub mod shell;

pub use account::{Account, Transfer};
pub use base::AccountNumber;
pub use error::LedgerError;
pub use ledger::Ledger;
pub use policy::{AccountKind, WithdrawalPolicy};
pub use shell::Shell;
