//! Movement and elapsed-time timers.
//!
//! Timers are deadlines polled by the driver loop rather than callbacks, so a
//! timer is just an owned value. Rearming replaces the old value, which is
//! what keeps at most one movement timer alive.

use std::fmt;
use std::time::{Duration, Instant};

use crate::config::ELAPSED_TICK_MS;
use crate::speed::base_tick_interval;

/// Event produced when a timer comes due.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ClockEvent {
    /// The movement timer fired; advance the simulation one step.
    Tick,
    /// One second of play time passed.
    Second,
}

/// Minutes and seconds of unpaused play.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Elapsed {
    pub min: u32,
    pub sec: u8,
}

impl Elapsed {
    fn increment(&mut self) {
        if self.sec == 59 {
            self.min += 1;
            self.sec = 0;
        } else {
            self.sec += 1;
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.min == 0 && self.sec == 0
    }
}

impl fmt::Display for Elapsed {
    /// `00-00` before the first second, then unpadded `min-sec`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            f.write_str("00-00")
        } else {
            write!(f, "{}-{}", self.min, self.sec)
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Timer {
    period: Duration,
    due: Instant,
}

impl Timer {
    fn arm(period: Duration, now: Instant) -> Self {
        Self {
            period,
            due: now + period,
        }
    }

    fn is_due(self, now: Instant) -> bool {
        self.due <= now
    }

    fn fire(&mut self) {
        self.due += self.period;
    }

    /// Like `fire`, but periods already missed at `now` are dropped rather
    /// than replayed.
    fn fire_skipping(&mut self, now: Instant) {
        self.fire();
        if self.due <= now {
            self.due = now + self.period;
        }
    }
}

/// Owns the tick interval, the two timers, and the elapsed counter.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameClock {
    tick_interval: Duration,
    tick_timer: Option<Timer>,
    second_timer: Option<Timer>,
    elapsed: Elapsed,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    /// Creates a stopped clock at the base interval.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_interval: base_tick_interval(),
            tick_timer: None,
            second_timer: None,
            elapsed: Elapsed::default(),
        }
    }

    /// Arms both timers. Calling it on a running clock restarts them.
    pub fn start(&mut self, now: Instant) {
        self.tick_timer = Some(Timer::arm(self.tick_interval, now));
        self.second_timer = Some(Timer::arm(Duration::from_millis(ELAPSED_TICK_MS), now));
    }

    /// Disarms both timers, freezing elapsed time.
    pub fn pause(&mut self) {
        self.tick_timer = None;
        self.second_timer = None;
    }

    /// Rearms both timers at the current interval. No-op while running.
    pub fn resume(&mut self, now: Instant) {
        if !self.is_running() {
            self.start(now);
        }
    }

    /// Switches to `interval`. A running movement timer is replaced by one at
    /// the new period; a paused clock just remembers it for `resume`.
    pub fn retune(&mut self, interval: Duration, now: Instant) {
        self.tick_interval = interval;
        if self.tick_timer.is_some() {
            self.tick_timer = Some(Timer::arm(interval, now));
        }
    }

    /// Stops, zeroes elapsed time and restores the base interval.
    pub fn reset(&mut self) {
        self.pause();
        self.elapsed = Elapsed::default();
        self.tick_interval = base_tick_interval();
    }

    /// Returns the earliest event due at `now`. Call repeatedly until `None`.
    ///
    /// A late poll yields at most one `Tick`; the seconds timer still yields
    /// one `Second` per elapsed period so play time stays exact.
    pub fn poll(&mut self, now: Instant) -> Option<ClockEvent> {
        let tick_due = self.tick_timer.filter(|t| t.is_due(now));
        let second_due = self.second_timer.filter(|t| t.is_due(now));
        match (tick_due, second_due) {
            (Some(tick), Some(second)) if second.due < tick.due => self.fire_second(),
            (Some(_), _) => {
                if let Some(timer) = self.tick_timer.as_mut() {
                    timer.fire_skipping(now);
                }
                Some(ClockEvent::Tick)
            }
            (None, Some(_)) => self.fire_second(),
            (None, None) => None,
        }
    }

    fn fire_second(&mut self) -> Option<ClockEvent> {
        let timer = self.second_timer.as_mut()?;
        timer.fire();
        self.elapsed.increment();
        Some(ClockEvent::Second)
    }

    /// Returns the next instant at which `poll` will yield an event.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.tick_timer, self.second_timer) {
            (Some(a), Some(b)) => Some(a.due.min(b.due)),
            (Some(t), None) | (None, Some(t)) => Some(t.due),
            (None, None) => None,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.tick_timer.is_some()
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn elapsed(&self) -> Elapsed {
        self.elapsed
    }
}
