// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Two independent periodic ticks driven by an explicit clock.
//!
//! Nothing here reads the wall clock. Callers pass `now` in, so tests step time by hand and the
//! TUI loop feeds it `Instant::now()`.

use std::time::{Duration, Instant};

pub const DEFAULT_FAST_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_SLOW_INTERVAL: Duration = Duration::from_secs(2);
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Which periodic callbacks are due after a [`Scheduler::poll`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ticks {
    /// Overlay refresh.
    pub fast: bool,
    /// Reference reconciliation.
    pub slow: bool,
}

impl Ticks {
    pub fn any(self) -> bool {
        self.fast || self.slow
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Periodic {
    interval: Duration,
    next_due: Instant,
}

impl Periodic {
    fn new(interval: Duration, now: Instant) -> Self {
        let interval = interval.max(MIN_INTERVAL);
        Self { interval, next_due: now + interval }
    }

    /// Fires at most once per poll; missed periods collapse into that one firing.
    fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        let behind = now.duration_since(self.next_due);
        let skipped = behind.as_nanos() / self.interval.as_nanos();
        let skipped = u32::try_from(skipped).unwrap_or(u32::MAX);
        self.next_due += self.interval.saturating_mul(skipped.saturating_add(1));
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduler {
    fast: Periodic,
    slow: Periodic,
}

impl Scheduler {
    pub fn new(fast_interval: Duration, slow_interval: Duration, now: Instant) -> Self {
        Self { fast: Periodic::new(fast_interval, now), slow: Periodic::new(slow_interval, now) }
    }

    pub fn with_defaults(now: Instant) -> Self {
        Self::new(DEFAULT_FAST_INTERVAL, DEFAULT_SLOW_INTERVAL, now)
    }

    pub fn fast_interval(&self) -> Duration {
        self.fast.interval
    }

    pub fn slow_interval(&self) -> Duration {
        self.slow.interval
    }

    pub fn poll(&mut self, now: Instant) -> Ticks {
        Ticks { fast: self.fast.poll(now), slow: self.slow.poll(now) }
    }

    /// The earliest instant at which [`Self::poll`] will report a tick.
    pub fn next_deadline(&self) -> Instant {
        self.fast.next_due.min(self.slow.next_due)
    }

    /// Time left until the next deadline, zero if already overdue.
    pub fn timeout_from(&self, now: Instant) -> Duration {
        self.next_deadline().saturating_duration_since(now)
    }
}
