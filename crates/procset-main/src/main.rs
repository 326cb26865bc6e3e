// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Synthetic scheduling workload exercising the processor-set library.
//!
//! Simulates a machine whose processors are claimed by randomly sized
//! jobs, then reports the allocation picture: what is busy, what is free,
//! and how fragmented the free space is. Run with `RUST_LOG=debug` for
//! per-job tracing.

use procset_core::{ProcRange, ProcSet};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[derive(Debug, Clone, Serialize)]
struct RunStats {
    seed: u64,
    machine_size: u32,
    job_count: usize,
    allocated_processors: usize,
    free_processors: usize,
    free_intervals: usize,
    largest_free_block: usize,
    busy: String,
    free: String,
    reduce_micros: u128,
}

/// One random job allocation: a handful of closed processor ranges.
fn random_job(rng: &mut ChaCha8Rng, machine_size: u32) -> ProcSet {
    let pieces = rng.random_range(1..=4usize);
    (0..pieces)
        .map(|_| {
            let lower = rng.random_range(0..machine_size - 1);
            let width = rng.random_range(1..=16u32).min(machine_size - 1 - lower);
            ProcRange::new(lower, lower + width).expect("bounds stay inside the machine")
        })
        .collect()
}

fn main() {
    enable_tracing();

    let seed = 0x70c5e7u64;
    let machine_size = 4096u32;
    let job_count = 256usize;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let machine = ProcSet::try_from(0..machine_size).expect("machine fits the boundary domain");
    let jobs: Vec<ProcSet> = (0..job_count)
        .map(|i| {
            let job = random_job(&mut rng, machine_size);
            debug!(job = i, set = %job, "generated allocation");
            job
        })
        .collect();

    let reduce_start = Instant::now();
    let busy: ProcSet = jobs.iter().collect();
    let reduce_elapsed = reduce_start.elapsed();

    let free = machine.difference(&busy);
    assert!(busy.is_subset(&machine));
    assert!(free.is_disjoint(&busy));

    let largest_free_block = free
        .intervals()
        .map(|range| range.element_count())
        .max()
        .unwrap_or(0);

    info!(
        jobs = job_count,
        allocated = busy.len(),
        free = free.len(),
        fragments = free.interval_count(),
        elapsed = ?reduce_elapsed,
        "reduced allocation picture"
    );

    let stats = RunStats {
        seed,
        machine_size,
        job_count,
        allocated_processors: busy.len(),
        free_processors: free.len(),
        free_intervals: free.interval_count(),
        largest_free_block,
        busy: busy.to_string(),
        free: free.to_string(),
        reduce_micros: reduce_elapsed.as_micros(),
    };
    let rendered = serde_json::to_string_pretty(&stats).expect("stats serialize to JSON");
    println!("{rendered}");
}
