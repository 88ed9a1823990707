//! Gravity timing
//!
//! The engine has no clock. The driver owns one `GravityTimer` and asks it, with the
//! current time, whether a `Tick` is due.

use crate::game::{GameData, Phase};
use crate::rules::Rules;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct GravityTimer {
    interval: Duration,
    /// None while not playing; armed again on the first poll after start/resume
    last_tick: Option<Instant>,
}

impl GravityTimer {
    pub fn new(rules: &Rules) -> Self {
        Self {
            interval: rules.drop_interval(1),
            last_tick: None,
        }
    }

    /// Whether a tick should be issued now
    pub fn poll(&mut self, now: Instant, state: &GameData, rules: &Rules) -> bool {
        if state.phase != Phase::Playing {
            self.last_tick = None;
            return false;
        }

        let interval = rules.drop_interval(state.level);
        if interval != self.interval {
            tracing::debug!(level = state.level, ?interval, "gravity interval changed");
            self.interval = interval;
        }

        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                false
            }
            Some(last) if now.duration_since(last) >= self.interval => {
                self.last_tick = Some(now);
                true
            }
            Some(_) => false,
        }
    }

    /// Current gravity interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// How long the driver may sleep before the next tick is due
    pub fn time_until_tick(&self, now: Instant) -> Duration {
        match self.last_tick {
            Some(last) => self.interval.saturating_sub(now.duration_since(last)),
            None => self.interval,
        }
    }
}
