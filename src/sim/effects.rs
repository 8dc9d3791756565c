//! Timed power-up effects
//!
//! An effect is an expiration timestamp in simulation time, checked against
//! `GameState::now_ms`. Nothing is scheduled, so nothing can fire after the
//! run has ended.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEffect {
    /// Active while `now < until_ms`
    pub until_ms: Option<u64>,
}

impl TimedEffect {
    /// Start (or restart) the effect. Expiry is always measured from the
    /// latest activation.
    pub fn activate(&mut self, now_ms: u64, duration_ms: u64) {
        self.until_ms = Some(now_ms.saturating_add(duration_ms));
    }

    pub fn is_active(&self, now_ms: u64) -> bool {
        self.until_ms.is_some_and(|until| now_ms < until)
    }

    /// Milliseconds left, zero when inactive
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.until_ms
            .map(|until| until.saturating_sub(now_ms))
            .unwrap_or(0)
    }
}

/// Space bar: boost player step size. Ignored while already boosted.
pub fn activate_speed_boost(state: &mut GameState) -> bool {
    if state.speed_boost_active() {
        return false;
    }
    let duration = state.tuning.effect_duration_ms;
    state.speed_boost.activate(state.now_ms, duration);
    state.events.push(GameEvent::SpeedBoostStarted);
    true
}

/// Slow-motion pickup: refreshes the expiry if already active
pub fn activate_slow_motion(state: &mut GameState) {
    let duration = state.tuning.effect_duration_ms;
    state.slow_motion.activate(state.now_ms, duration);
    state.events.push(GameEvent::SlowMotionStarted);
}
