/*!
 * Playback clocks.
 *
 * A clock is the source of position updates for a [`PlaybackState`]. The
 * real-time clock ticks on a tokio interval; the scripted clock replays a
 * fixed list of positions, including backward seeks.
 */

use async_trait::async_trait;
use log::debug;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::playback::PlaybackState;

/// Common trait for anything that reports playback positions
#[async_trait]
pub trait PlaybackClock: Send + Debug {
    /// Wait for the next position update
    ///
    /// # Returns
    /// * `Option<u64>` - The position in ms, or `None` once playback has ended
    async fn next_position(&mut self) -> Option<u64>;
}

/// Real-time clock that reports scaled elapsed time until a duration is reached
#[derive(Debug)]
pub struct TokioClock {
    tick: Duration,
    rate: f32,
    duration_ms: u64,
    interval: Option<Interval>,
    started: Option<Instant>,
    finished: bool,
}

impl TokioClock {
    pub fn new(tick: Duration, rate: f32, duration_ms: u64) -> Self {
        Self {
            tick,
            rate,
            duration_ms,
            interval: None,
            started: None,
            finished: false,
        }
    }
}

#[async_trait]
impl PlaybackClock for TokioClock {
    async fn next_position(&mut self) -> Option<u64> {
        if self.finished {
            return None;
        }

        // Built lazily so the clock can be constructed outside a runtime.
        let tick = self.tick;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });
        interval.tick().await;

        let started = *self.started.get_or_insert_with(Instant::now);
        let scaled_ms = started.elapsed().as_secs_f64() * 1000.0 * f64::from(self.rate);
        let position = (scaled_ms as u64).min(self.duration_ms);

        if position >= self.duration_ms {
            debug!("Clock reached the end at {}ms", self.duration_ms);
            self.finished = true;
        }
        Some(position)
    }
}

/// Clock that replays a fixed sequence of positions
#[derive(Debug, Clone, Default)]
pub struct ScriptedClock {
    positions: VecDeque<u64>,
}

impl ScriptedClock {
    pub fn new<I: IntoIterator<Item = u64>>(positions: I) -> Self {
        Self {
            positions: positions.into_iter().collect(),
        }
    }
}

#[async_trait]
impl PlaybackClock for ScriptedClock {
    async fn next_position(&mut self) -> Option<u64> {
        self.positions.pop_front()
    }
}

/// Feed clock positions into `state` until the clock stops
///
/// `render` is called after every update. Returns the number of updates.
pub async fn drive<C, F>(clock: &mut C, state: &mut PlaybackState, mut render: F) -> usize
where
    C: PlaybackClock + ?Sized,
    F: FnMut(&PlaybackState),
{
    let mut updates = 0;
    while let Some(position) = clock.next_position().await {
        state.update_position(position);
        render(state);
        updates += 1;
    }
    updates
}
