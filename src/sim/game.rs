//! Timer-driven game driver
//!
//! The game has two periodic timers: the fast tick (block movement) and the
//! spawn tick (block creation). `Game` owns both plus the [`GameState`] and
//! replays every timer that came due since the last call, in due order, with
//! `state.now_ms` set to the timer's due time. Wall time is read through a
//! [`Clock`] so tests and the headless demo can drive it by hand.

use std::cell::Cell;

use super::autopilot;
use super::spawn::tick_spawn;
use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{PlayerInput, apply_input, tick_move};
use crate::error::{ConfigError, GameError};
use crate::tuning::Tuning;

/// Source of wall-clock milliseconds
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Repeating timer in simulation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTimer {
    pub period_ms: u64,
    pub next_due_ms: u64,
}

impl PeriodicTimer {
    /// First fires one full period after `now`
    pub fn new(now_ms: u64, period_ms: u64) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            period_ms,
            next_due_ms: now_ms + period_ms,
        }
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        self.next_due_ms <= now_ms
    }

    /// Consume one firing
    pub fn fire(&mut self) -> u64 {
        let due = self.next_due_ms;
        self.next_due_ms += self.period_ms;
        due
    }

    /// Restart with a new period, measured from `now`
    pub fn rearm(&mut self, now_ms: u64, period_ms: u64) {
        *self = Self::new(now_ms, period_ms);
    }
}

/// Which timer fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Move,
    Spawn,
}

/// Counts of ticks run by one `advance_to` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub move_ticks: u32,
    pub spawn_ticks: u32,
    /// Backlog dropped by the catch-up cap
    pub skipped_ms: u64,
}

/// A run plus its timers
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    move_timer: Option<PeriodicTimer>,
    spawn_timer: Option<PeriodicTimer>,
    /// Wall time minus simulation time
    time_offset_ms: u64,
    /// Demo mode: the autopilot presses keys every fast tick
    pub idle_mode: bool,
}

impl Game {
    /// Create a game; fails if the tuning cannot produce a playable field
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self {
            state: GameState::new(seed, tuning),
            move_timer: None,
            spawn_timer: None,
            time_offset_ms: 0,
            idle_mode: false,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn move_timer(&self) -> Option<&PeriodicTimer> {
        self.move_timer.as_ref()
    }

    pub fn spawn_timer(&self) -> Option<&PeriodicTimer> {
        self.spawn_timer.as_ref()
    }

    /// Arm both timers. Simulation time starts at zero at `wall_ms`.
    pub fn start(&mut self, wall_ms: u64) -> Result<(), GameError> {
        if self.state.phase != GamePhase::NotStarted {
            return Err(GameError::AlreadyStarted);
        }

        self.time_offset_ms = wall_ms;
        self.state.now_ms = 0;
        self.state.phase = GamePhase::Running;

        let tuning = &self.state.tuning;
        self.move_timer = Some(PeriodicTimer::new(0, tuning.fast_tick_ms));
        self.spawn_timer = Some(PeriodicTimer::new(
            0,
            tuning.spawn_interval_ms(self.state.level),
        ));
        self.state.events.push(GameEvent::Started);

        log::info!("Game started with seed {}", self.state.seed);
        Ok(())
    }

    /// Convenience for `start(clock.now_ms())`
    pub fn start_with(&mut self, clock: &dyn Clock) -> Result<(), GameError> {
        self.start(clock.now_ms())
    }

    /// Simulation time corresponding to a wall time
    pub fn sim_time(&self, wall_ms: u64) -> u64 {
        wall_ms.saturating_sub(self.time_offset_ms)
    }

    /// Run every timer that is due at `wall_ms`
    pub fn advance_to(&mut self, wall_ms: u64) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        if self.state.phase != GamePhase::Running {
            return report;
        }

        let mut target = self.sim_time(wall_ms);
        let cap = self.state.tuning.max_catch_up_ms;
        if target > self.state.now_ms + cap {
            let excess = target - self.state.now_ms - cap;
            self.time_offset_ms += excess;
            target -= excess;
            report.skipped_ms = excess;
            log::warn!("Dropped {} ms of simulation backlog", excess);
        }

        while let Some(kind) = self.next_due(target) {
            match kind {
                TickKind::Move => {
                    report.move_ticks += 1;
                    self.run_move_tick();
                }
                TickKind::Spawn => {
                    report.spawn_ticks += 1;
                    self.run_spawn_tick();
                }
            }
            if self.state.phase == GamePhase::GameOver {
                self.move_timer = None;
                self.spawn_timer = None;
                break;
            }
        }

        self.state.now_ms = self.state.now_ms.max(target);
        report
    }

    /// Convenience for `advance_to(clock.now_ms())`
    pub fn advance(&mut self, clock: &dyn Clock) -> AdvanceReport {
        self.advance_to(clock.now_ms())
    }

    /// Apply a key press at `wall_ms`, catching the timers up first
    pub fn handle_input(&mut self, input: PlayerInput, wall_ms: u64) -> bool {
        self.advance_to(wall_ms);
        apply_input(&mut self.state, input)
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Earliest due timer; the fast tick wins a tie
    fn next_due(&self, target: u64) -> Option<TickKind> {
        let moving = self.move_timer.filter(|t| t.is_due(target));
        let spawning = self.spawn_timer.filter(|t| t.is_due(target));
        match (moving, spawning) {
            (Some(m), Some(s)) if s.next_due_ms < m.next_due_ms => Some(TickKind::Spawn),
            (Some(_), _) => Some(TickKind::Move),
            (None, Some(_)) => Some(TickKind::Spawn),
            (None, None) => None,
        }
    }

    fn run_move_tick(&mut self) {
        let Some(timer) = self.move_timer.as_mut() else {
            return;
        };
        self.state.now_ms = timer.fire();

        if self.idle_mode {
            if let Some(input) = autopilot::suggest(&self.state) {
                apply_input(&mut self.state, input);
            }
        }

        let level_before = self.state.level;
        tick_move(&mut self.state);

        if self.state.level != level_before && self.state.is_running() {
            let period = self.state.tuning.spawn_interval_ms(self.state.level);
            let now = self.state.now_ms;
            if let Some(spawn) = self.spawn_timer.as_mut() {
                spawn.rearm(now, period);
            }
        }
    }

    fn run_spawn_tick(&mut self) {
        let Some(timer) = self.spawn_timer.as_mut() else {
            return;
        };
        self.state.now_ms = timer.fire();
        tick_spawn(&mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BlockKind;
    use crate::tuning::CollisionPolicy;
    use glam::Vec2;

    fn started(seed: u64) -> Game {
        let mut game = Game::new(seed, Tuning::default()).unwrap();
        game.start(10_000).unwrap();
        game
    }

    #[test]
    fn test_start_arms_timers() {
        let mut game = Game::new(1, Tuning::default()).unwrap();
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert!(game.move_timer().is_none());
        assert_eq!(game.advance_to(50_000), AdvanceReport::default());

        game.start(10_000).unwrap();
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.move_timer().unwrap().next_due_ms, 20);
        assert_eq!(game.spawn_timer().unwrap().next_due_ms, 1000);
        assert!(matches!(game.start(10_000), Err(GameError::AlreadyStarted)));
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            playfield_width: 0.0,
            ..Default::default()
        };
        assert!(Game::new(1, tuning).is_err());
    }

    #[test]
    fn test_tick_counts_over_one_second() {
        let mut game = started(1);
        let clock = ManualClock::new(10_000);
        let mut total = AdvanceReport::default();
        for _ in 0..50 {
            clock.advance(20);
            let report = game.advance(&clock);
            total.move_ticks += report.move_ticks;
            total.spawn_ticks += report.spawn_ticks;
        }
        assert_eq!(total.move_ticks, 50);
        assert_eq!(total.spawn_ticks, 1);
        assert_eq!(game.state.now_ms, 1000);
        assert_eq!(game.state.blocks.len(), 1);
    }

    #[test]
    fn test_fast_tick_runs_before_spawn_on_tie() {
        let mut game = started(1);
        for t in 1..=50 {
            game.advance_to(10_000 + t * 20);
        }
        // Spawned at t=1000 after the t=1000 move tick: block has not moved
        assert_eq!(game.state.blocks.len(), 1);
        assert_eq!(game.state.blocks[0].pos.y, 0.0);

        game.advance_to(10_000 + 1020);
        assert_eq!(game.state.blocks[0].pos.y, 5.0);
    }

    #[test]
    fn test_catch_up_cap_drops_backlog() {
        let mut game = started(1);
        let report = game.advance_to(10_000 + 10_000);
        assert_eq!(report.skipped_ms, 10_000 - 250);
        assert_eq!(report.move_ticks, 12);
        assert_eq!(game.state.now_ms, 250);

        // Time continues smoothly afterwards
        let report = game.advance_to(10_000 + 10_000 + 20);
        assert_eq!(report.skipped_ms, 0);
        assert_eq!(report.move_ticks, 1);
        assert_eq!(game.state.now_ms, 270);
    }

    #[test]
    fn test_level_up_rearms_spawn_timer() {
        let mut game = started(1);
        game.state.score = 90;
        game.state
            .push_block(BlockKind::Plain, Vec2::new(0.0, 601.0));

        game.advance_to(10_000 + 20);
        assert_eq!(game.state.level, 2);
        let spawn = game.spawn_timer().unwrap();
        assert_eq!(spawn.period_ms, 840);
        assert_eq!(spawn.next_due_ms, 20 + 840);
    }

    #[test]
    fn test_game_over_cancels_timers() {
        let tuning = Tuning {
            collision_policy: CollisionPolicy::Consume,
            ..Default::default()
        };
        let mut game = Game::new(1, tuning).unwrap();
        game.start(0).unwrap();
        let x = game.state.player.x;
        for _ in 0..3 {
            game.state.push_block(BlockKind::Hazard, Vec2::new(x, 560.0));
        }

        game.advance_to(20);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(game.move_timer().is_none());
        assert!(game.spawn_timer().is_none());

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::GameOver { final_score: 0 }));

        let report = game.advance_to(60_000);
        assert_eq!(report, AdvanceReport::default());
        assert!(!game.handle_input(PlayerInput::MoveLeft, 60_020));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_slow_motion_expires_in_sim_time() {
        let mut game = started(1);
        game.advance_to(10_000 + 100);
        crate::sim::effects::activate_slow_motion(&mut game.state);
        assert!(game.state.slow_motion_active());

        for step in 1..=150 {
            game.advance_to(10_000 + 100 + step * 20);
        }
        assert_eq!(game.state.now_ms, 3100);
        assert!(!game.state.slow_motion_active());
    }

    #[test]
    fn test_input_applies_after_catch_up() {
        let mut game = started(1);
        let x = game.state.player.x;
        assert!(game.handle_input(PlayerInput::SpeedBoost, 10_000 + 40));
        assert_eq!(game.state.speed_boost.until_ms, Some(40 + 3000));
        assert!(game.handle_input(PlayerInput::MoveRight, 10_000 + 60));
        assert_eq!(game.state.player.x, x + 20.0);
    }

    #[test]
    fn test_determinism() {
        let run = |seed| {
            let mut game = Game::new(seed, Tuning::default()).unwrap();
            game.idle_mode = true;
            game.start(0).unwrap();
            for t in 1..=2000u64 {
                game.advance_to(t * 20);
            }
            (
                game.state.score,
                game.state.level,
                game.state.lives,
                game.state.blocks.len(),
                game.state.player.x,
            )
        };
        assert_eq!(run(99_999), run(99_999));
    }
}
