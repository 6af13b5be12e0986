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


//! Interactive prompt loop.
//!
//! The [`Shell`] reads line-oriented answers from any [`BufRead`] and writes
//! prompts and outcome messages to any [`Write`]. It borrows the [`Ledger`]
//! it drives; all decisions stay in the ledger, the shell only renders them.
//!
//! # Protocol
//!
//! ```text
//! Enter account type (savings/checking):
//! Enter account number:
//! Enter account holder name:
//! Enter initial balance:
//!
//! Choose an action:
//! 1. Deposit
//! 2. Withdraw
//! 3. Transfer Money
//! 4. Show Balance
//! 5. Exit
//! ```
//!
//! End of input at any prompt ends the session as if `5` had been chosen,
//! without printing the farewell line.

use crate::LedgerError;
use crate::ledger::Ledger;
use crate::policy::WithdrawalPolicy;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;

const MENU: &str = "\nChoose an action:\n\
                    1. Deposit\n\
                    2. Withdraw\n\
                    3. Transfer Money\n\
                    4. Show Balance\n\
                    5. Exit";

/// A single answer to a prompt.
enum Reply<T> {
    Value(T),
    Invalid,
    Closed,
}

type Flow = ControlFlow<()>;

/// Line-based front end over a [`Ledger`].
pub struct Shell<'a, R, W> {
    ledger: &'a Ledger,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(ledger: &'a Ledger, input: R, output: W) -> Self {
        Self {
            ledger,
            input,
            output,
        }
    }

    /// Opens the first account, then serves the action menu until the user
    /// exits or input ends.
    ///
    /// # Errors
    ///
    /// Only I/O failures on the underlying reader or writer.
    pub fn run(&mut self) -> io::Result<()> {
        if self.open_first_account()?.is_continue() {
            loop {
                writeln!(self.output, "{MENU}")?;
                let Some(line) = self.read_line()? else {
                    break;
                };
                let flow = match line.trim().parse::<u32>() {
                    Ok(1) => self.deposit()?,
                    Ok(2) => self.withdraw()?,
                    Ok(3) => self.transfer()?,
                    Ok(4) => self.show_balance()?,
                    Ok(5) => {
                        writeln!(self.output, "Exiting the banking system.")?;
                        ControlFlow::Break(())
                    }
                    _ => {
                        writeln!(self.output, "Invalid option. Please try again.")?;
                        ControlFlow::Continue(())
                    }
                };
                if flow.is_break() {
                    break;
                }
            }
        }
        self.output.flush()
    }

    fn open_first_account(&mut self) -> io::Result<Flow> {
        let Some(account_type) = self.prompt("Enter account type (savings/checking):")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(number) = self.prompt("Enter account number:")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(holder) = self.prompt("Enter account holder name:")? else {
            return Ok(ControlFlow::Break(()));
        };
        let initial_balance = loop {
            match self.prompt_amount("Enter initial balance:")? {
                Reply::Value(amount) => break amount,
                Reply::Invalid => writeln!(self.output, "Invalid amount.")?,
                Reply::Closed => return Ok(ControlFlow::Break(())),
            }
        };

        match self
            .ledger
            .create_account(account_type.trim(), number, holder, initial_balance)
        {
            Ok(account) => writeln!(self.output, "Account created successfully: {account}")?,
            Err(e) => writeln!(self.output, "{}", decline_message(&e))?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn deposit(&mut self) -> io::Result<Flow> {
        let Some(number) = self.prompt_existing_account()? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(number) = number else {
            return Ok(ControlFlow::Continue(()));
        };
        let amount = match self.prompt_amount("Enter deposit amount:")? {
            Reply::Value(amount) => amount,
            Reply::Invalid => return self.invalid_amount(),
            Reply::Closed => return Ok(ControlFlow::Break(())),
        };

        match self.ledger.deposit(&number, amount) {
            Ok(balance) => writeln!(
                self.output,
                "Deposited ${amount}. New balance: ${balance}"
            )?,
            Err(e) => writeln!(self.output, "{}", decline_message(&e))?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn withdraw(&mut self) -> io::Result<Flow> {
        let Some(number) = self.prompt_existing_account()? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(number) = number else {
            return Ok(ControlFlow::Continue(()));
        };
        let amount = match self.prompt_amount("Enter withdrawal amount:")? {
            Reply::Value(amount) => amount,
            Reply::Invalid => return self.invalid_amount(),
            Reply::Closed => return Ok(ControlFlow::Break(())),
        };

        match self.ledger.withdraw(&number, amount) {
            Ok(balance) => writeln!(
                self.output,
                "Withdrawn ${amount}. New balance: ${balance}"
            )?,
            Err(e) => writeln!(self.output, "{}", decline_message(&e))?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn transfer(&mut self) -> io::Result<Flow> {
        let Some(from) = self.prompt("Enter from account number:")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(to) = self.prompt("Enter to account number:")? else {
            return Ok(ControlFlow::Break(()));
        };
        let amount = match self.prompt_amount("Enter transfer amount:")? {
            Reply::Value(amount) => amount,
            Reply::Invalid => return self.invalid_amount(),
            Reply::Closed => return Ok(ControlFlow::Break(())),
        };

        match self.ledger.transfer_money(&from, &to, amount) {
            Ok(_) => writeln!(self.output, "Transferred ${amount} from {from} to {to}")?,
            Err(LedgerError::AccountNotFound(_)) => {
                writeln!(self.output, "Invalid account numbers.")?
            }
            Err(e) => writeln!(self.output, "{}", decline_message(&e))?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn show_balance(&mut self) -> io::Result<Flow> {
        let Some(number) = self.prompt("Enter account number:")? else {
            return Ok(ControlFlow::Break(()));
        };

        match self.ledger.show_balance(&number) {
            Ok(balance) => writeln!(self.output, "Account balance for {number}: ${balance}")?,
            Err(e) => writeln!(self.output, "{}", decline_message(&e))?,
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Asks for an account number and checks it exists before any amount is
    /// requested. `Ok(None)` means input ended; `Ok(Some(None))` means the
    /// account was missing and has already been reported.
    fn prompt_existing_account(&mut self) -> io::Result<Option<Option<String>>> {
        let Some(number) = self.prompt("Enter account number:")? else {
            return Ok(None);
        };
        if let Err(e) = self.ledger.get_account(&number) {
            writeln!(self.output, "{}", decline_message(&e))?;
            return Ok(Some(None));
        }
        Ok(Some(Some(number)))
    }

    fn prompt_amount(&mut self, message: &str) -> io::Result<Reply<Decimal>> {
        let Some(line) = self.prompt(message)? else {
            return Ok(Reply::Closed);
        };
        Ok(match parse_amount(&line) {
            Some(amount) => Reply::Value(amount),
            None => Reply::Invalid,
        })
    }

    fn invalid_amount(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "Invalid amount.")?;
        Ok(ControlFlow::Continue(()))
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Reads one line without its terminator. `None` at end of input.
    ///
    /// Bytes that are not valid UTF-8 become U+FFFD instead of failing the
    /// session.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&bytes);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}

/// Parses an amount in plain (`12.50`) or scientific (`1e3`) notation.
///
/// Well-formed numbers too large for [`Decimal`] clamp to `Decimal::MAX`
/// (or `Decimal::MIN` when negative); ones too small to represent become
/// zero. Anything else is `None`.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let input = input.trim();
    if let Ok(amount) = input.parse::<Decimal>() {
        return Some(amount);
    }
    if let Ok(amount) = Decimal::from_scientific(input) {
        return Some(amount);
    }

    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };
    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (integer.is_empty() && fraction.is_empty()) || !all_digits(integer) || !all_digits(fraction)
    {
        return None;
    }
    let exponent = match exponent {
        None => 0i64,
        Some(e) => {
            let digits = e.strip_prefix(['+', '-']).unwrap_or(e);
            if digits.is_empty() || !all_digits(digits) {
                return None;
            }
            let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
            if e.starts_with('-') { -magnitude } else { magnitude }
        }
    };

    // Decimal position of the leading significant digit.
    let significant = integer.trim_start_matches('0');
    let leading = if !significant.is_empty() {
        significant.len() as i64
    } else {
        let zeros = fraction.len() - fraction.trim_start_matches('0').len();
        if zeros == fraction.len() {
            return Some(Decimal::ZERO);
        }
        -(zeros as i64)
    };

    if leading.saturating_add(exponent) > 0 {
        Some(if negative { Decimal::MIN } else { Decimal::MAX })
    } else {
        Some(Decimal::ZERO)
    }
}

/// User-facing text for a declined operation.
pub fn decline_message(error: &LedgerError) -> String {
    match error {
        LedgerError::InvalidAccountType(_) => "Invalid account type.".to_owned(),
        LedgerError::InvalidAmount => "Deposit amount must be greater than zero.".to_owned(),
        LedgerError::WithdrawalDeclined {
            policy: WithdrawalPolicy::MinimumBalanceFloor { floor },
        } => format!("Withdrawal exceeds balance or falls below minimum balance of ${floor}"),
        LedgerError::WithdrawalDeclined {
            policy: WithdrawalPolicy::OverdraftLimit { .. },
        } => "Insufficient funds or exceeds overdraft limit.".to_owned(),
        LedgerError::InsufficientFunds => "Insufficient funds in source account.".to_owned(),
        LedgerError::AccountNotFound(_) => "Account not found.".to_owned(),
    }
}
