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


//! Benchmarks for the ledger.
//!
//! Run with: cargo bench
//!
//! Benchmarks include:
//! - Single-threaded deposits, withdrawals and transfers
//! - Multi-threaded transfers on shared and disjoint accounts
//! - Account creation

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use policy_ledger::{AccountKind, Ledger};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

// =============================================================================
// Helper Functions
// =============================================================================

fn ledger_with_accounts(count: usize, kind: AccountKind, balance: i64) -> Ledger {
    let ledger = Ledger::new();
    for i in 0..count {
        ledger.open_account(kind, i.to_string(), "holder", Decimal::new(balance, 0));
    }
    ledger
}

// =============================================================================
// Single-Threaded Benchmarks
// =============================================================================

fn bench_single_deposit(c: &mut Criterion) {
    let ledger = ledger_with_accounts(1, AccountKind::Savings, 1_000);
    c.bench_function("single_deposit", |b| {
        b.iter(|| ledger.deposit(black_box("0"), black_box(Decimal::new(10000, 4))))
    });
}

fn bench_single_withdrawal(c: &mut Criterion) {
    c.bench_function("single_withdrawal", |b| {
        b.iter_batched(
            || ledger_with_accounts(1, AccountKind::Checking, 0),
            |ledger| ledger.withdraw(black_box("0"), black_box(Decimal::new(5000, 4))),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_transfer_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer_throughput");

    for count in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| {
                let ledger = ledger_with_accounts(2, AccountKind::Checking, 1_000_000);
                for i in 0..count {
                    let (from, to) = if i % 2 == 0 { ("0", "1") } else { ("1", "0") };
                    let _ = ledger.transfer_money(from, to, Decimal::ONE);
                }
                black_box(&ledger);
            })
        });
    }
    group.finish();
}

// =============================================================================
// Multi-Threaded Benchmarks
// =============================================================================

fn bench_parallel_transfers_same_pair(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_transfers_same_pair");

    for count in [1_000, 10_000, 100_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| {
                let ledger = Arc::new(ledger_with_accounts(2, AccountKind::Checking, 1_000_000));

                (0..count).into_par_iter().for_each(|i| {
                    let (from, to) = if i % 2 == 0 { ("0", "1") } else { ("1", "0") };
                    let _ = ledger.transfer_money(from, to, Decimal::ONE);
                });

                black_box(&ledger);
            })
        });
    }
    group.finish();
}

fn bench_parallel_transfers_many_accounts(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_transfers_many_accounts");

    for num_accounts in [10, 100, 1_000].iter() {
        let numbers: Vec<String> = (0..*num_accounts).map(|i: usize| i.to_string()).collect();
        let ops = 10_000usize;
        group.throughput(Throughput::Elements(ops as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_accounts),
            num_accounts,
            |b, &num_accounts| {
                b.iter(|| {
                    let ledger = ledger_with_accounts(num_accounts, AccountKind::Checking, 1_000_000);

                    (0..ops).into_par_iter().for_each(|i| {
                        let from = &numbers[i % num_accounts];
                        let to = &numbers[(i * 7 + 1) % num_accounts];
                        let _ = ledger.transfer_money(from, to, Decimal::ONE);
                    });

                    black_box(&ledger);
                })
            },
        );
    }
    group.finish();
}

// =============================================================================
// Memory / Creation Benchmarks
// =============================================================================

fn bench_account_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("account_creation");

    for count in [1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter(|| black_box(ledger_with_accounts(count, AccountKind::Savings, 1_000)))
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Groups
// =============================================================================

criterion_group!(
    single_threaded,
    bench_single_deposit,
    bench_single_withdrawal,
    bench_transfer_throughput,
);

criterion_group!(
    multi_threaded,
    bench_parallel_transfers_same_pair,
    bench_parallel_transfers_many_accounts,
);

criterion_group!(memory, bench_account_creation,);

criterion_main!(single_threaded, multi_threaded, memory);
