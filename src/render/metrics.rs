//! Per-frame sync statistics and tick timing.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Frames kept for the rolling timing window.
const TIMING_WINDOW: usize = 120;

/// What one reconciliation pass did to a single pool.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindStats {
    pub created: usize,
    /// Snapshot records applied to a visual (including fresh ones)
    pub updated: usize,
    pub destroyed: usize,
}

impl KindStats {
    /// True when the pass neither created nor destroyed anything.
    pub fn is_stable(&self) -> bool {
        self.created == 0 && self.destroyed == 0
    }

    fn accumulate(&mut self, other: &KindStats) {
        self.created += other.created;
        self.updated += other.updated;
        self.destroyed += other.destroyed;
    }
}

/// Result of one creature pass (prey and predators together).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreatureSyncStats {
    pub prey: KindStats,
    pub predators: KindStats,
    /// Records with an unknown role
    pub skipped: usize,
}

/// Everything a single frame did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct FrameStats {
    /// Delta handed to the engine; `None` when no step ran
    pub step: Option<f32>,
    pub grass: KindStats,
    pub prey: KindStats,
    pub predators: KindStats,
    pub skipped: usize,
    pub prey_count: usize,
    pub predator_count: usize,
}

impl FrameStats {
    pub fn is_stable(&self) -> bool {
        self.grass.is_stable() && self.prey.is_stable() && self.predators.is_stable()
    }

    pub fn created(&self) -> usize {
        self.grass.created + self.prey.created + self.predators.created
    }

    pub fn destroyed(&self) -> usize {
        self.grass.destroyed + self.prey.destroyed + self.predators.destroyed
    }
}

/// Cumulative totals since the view was created.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct SyncTotals {
    pub frames: u64,
    pub steps: u64,
    /// Simulated seconds handed to the engine
    pub simulated_seconds: f64,
    pub grass: KindStats,
    pub prey: KindStats,
    pub predators: KindStats,
    pub skipped: usize,
}

/// Tracks sync work and tick timings over time.
pub struct SyncMetrics {
    tick_times: VecDeque<Duration>,
    tick_start: Instant,
    last: FrameStats,
    totals: SyncTotals,
}

impl Default for SyncMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncMetrics {
    pub fn new() -> Self {
        Self {
            tick_times: VecDeque::with_capacity(TIMING_WINDOW),
            tick_start: Instant::now(),
            last: FrameStats::default(),
            totals: SyncTotals::default(),
        }
    }

    /// Call at the start of each tick.
    pub fn begin_tick(&mut self) {
        self.tick_start = Instant::now();
    }

    /// Call at the end of each tick with what it did.
    pub fn end_tick(&mut self, frame: FrameStats) {
        let elapsed = self.tick_start.elapsed();
        self.tick_times.push_back(elapsed);
        if self.tick_times.len() > TIMING_WINDOW {
            self.tick_times.pop_front();
        }

        self.totals.frames += 1;
        if let Some(dt) = frame.step {
            self.totals.steps += 1;
            self.totals.simulated_seconds += f64::from(dt);
        }
        self.totals.grass.accumulate(&frame.grass);
        self.totals.prey.accumulate(&frame.prey);
        self.totals.predators.accumulate(&frame.predators);
        self.totals.skipped += frame.skipped;
        self.last = frame;
    }

    /// Stats of the most recent tick.
    pub fn last_frame(&self) -> &FrameStats {
        &self.last
    }

    pub fn totals(&self) -> &SyncTotals {
        &self.totals
    }

    /// Average tick time in milliseconds (over the timing window).
    pub fn avg_tick_ms(&self) -> f32 {
        if self.tick_times.is_empty() {
            return 0.0;
        }
        let sum: Duration = self.tick_times.iter().sum();
        sum.as_secs_f32() * 1000.0 / self.tick_times.len() as f32
    }

    /// Ticks per second the sync work alone could sustain.
    pub fn ticks_per_second(&self) -> f32 {
        let ms = self.avg_tick_ms();
        if ms > 0.0 {
            1000.0 / ms
        } else {
            0.0
        }
    }

    /// Slowest tick in the window, in milliseconds.
    pub fn max_tick_ms(&self) -> f32 {
        self.tick_times
            .iter()
            .max()
            .map(|d| d.as_secs_f32() * 1000.0)
            .unwrap_or(0.0)
    }
}
