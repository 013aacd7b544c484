// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<T>().ok()).unwrap_or(default)
}

/// Criterion with a flamegraph profiler attached, tunable through `FATESHEET_BENCH_*`.
pub fn criterion() -> Criterion {
    let frequency = env_or("FATESHEET_BENCH_PROFILE_FREQ", 100i32).clamp(1, 1000);
    let sample_size = env_or("FATESHEET_BENCH_SAMPLE_SIZE", 50usize).clamp(10, 200);
    let warmup_secs = env_or("FATESHEET_BENCH_WARMUP_SECS", 2u64).clamp(1, 60);
    let measurement_secs = env_or("FATESHEET_BENCH_MEASUREMENT_SECS", 4u64).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
