//! Spin state machine: `Idle -> Animating -> Resolved -> Animating ...`.
//!
//! The controller owns every piece of mutable wheel state (angle, phase,
//! win history, retry credit) and is advanced by an external scheduler
//! calling [`SpinController::advance`] with the current timestamp in
//! milliseconds. Nothing here touches the DOM or a timer.

use log::{debug, error, info};
use rand::Rng;

use crate::angle_math::{ease_out_cubic, forward_delta, normalize, segment_index_under_pointer, target_rest_angle};
use crate::config::{WheelConfig, SPIN_DURATION_MS, SPIN_TURNS};
use crate::messages::{message_for, OutcomeKind, STATUS_READY, STATUS_SPINNING};
use crate::outcome::{self, Pool, WinHistory};
use crate::quota::QuotaPolicy;
use crate::wheel::Wheel;

/// Precomputed rotation from the start angle to the target rest angle.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub target_index: usize,
    pub pool: Pool,
    pub start_angle: f64,
    pub delta: f64,
    pub started_at: f64,
    pub duration_ms: f64,
}

impl Trajectory {
    pub fn plan(current_angle: f64, target_index: usize, n: usize, turns: u32, started_at: f64, duration_ms: f64) -> Self {
        let target = target_rest_angle(target_index, n);
        Self {
            target_index,
            pool: Pool::Primary,
            start_angle: current_angle,
            delta: forward_delta(current_angle, target, turns),
            started_at,
            duration_ms,
        }
    }

    pub fn progress(&self, now: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn angle_at(&self, now: f64) -> f64 {
        self.start_angle + self.delta * ease_out_cubic(self.progress(now))
    }

    pub fn final_angle(&self) -> f64 {
        self.start_angle + self.delta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpinResult {
    pub index: usize,
    pub label: String,
    pub message: String,
    pub kind: OutcomeKind,
    pub pool: Pool,
    pub quota_consumed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinPhase {
    Idle,
    Animating(Trajectory),
    /// Idle, remembering the last result.
    Resolved(SpinResult),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpinState {
    pub current_angle: f64,
    pub phase: SpinPhase,
}

impl Default for SpinState {
    fn default() -> Self {
        Self {
            current_angle: 0.0,
            phase: SpinPhase::Idle,
        }
    }
}

impl SpinState {
    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, SpinPhase::Animating(_))
    }
}

/// What one scheduler callback produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// Nothing in flight; the scheduler can stop.
    Idle,
    /// Redraw at `angle` and keep ticking.
    Frame { angle: f64, progress: f64 },
    Resolved(SpinResult),
}

/// Outcome of a click/keypress on the wheel before any spin starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Busy,
    /// A retry credit was spent; start immediately without registering.
    RetryCredit,
    NeedsRegistration,
    Ready,
}

pub struct SpinController<Q> {
    wheel: Wheel,
    state: SpinState,
    history: WinHistory,
    retry_credit: u8,
    quota: Q,
    turns: u32,
    duration_ms: f64,
    gated: bool,
    status: String,
}

impl<Q: QuotaPolicy> SpinController<Q> {
    pub fn new(wheel: Wheel, quota: Q) -> Self {
        Self {
            wheel,
            state: SpinState::default(),
            history: WinHistory::new(),
            retry_credit: 0,
            quota,
            turns: SPIN_TURNS,
            duration_ms: SPIN_DURATION_MS,
            gated: false,
            status: STATUS_READY.to_string(),
        }
    }

    pub fn from_config(wheel: Wheel, quota: Q, config: &WheelConfig) -> Self {
        Self::new(wheel, quota)
            .with_timing(config.spin_turns, config.spin_duration_ms)
            .gated(config.is_lead_gated())
    }

    pub fn with_timing(mut self, turns: u32, duration_ms: f64) -> Self {
        self.turns = turns.max(1);
        self.duration_ms = duration_ms;
        self
    }

    pub fn gated(mut self, gated: bool) -> Self {
        self.gated = gated;
        self
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn current_angle(&self) -> f64 {
        self.state.current_angle
    }

    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning()
    }

    pub fn history(&self) -> &WinHistory {
        &self.history
    }

    pub fn retry_credit(&self) -> u8 {
        self.retry_credit
    }

    pub fn quota(&self) -> &Q {
        &self.quota
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn last_result(&self) -> Option<&SpinResult> {
        match &self.state.phase {
            SpinPhase::Resolved(result) => Some(result),
            _ => None,
        }
    }

    /// Decides whether a spin request may go straight to [`start`](Self::start).
    pub fn begin_attempt(&mut self) -> Attempt {
        if self.is_spinning() {
            return Attempt::Busy;
        }
        if self.retry_credit > 0 {
            self.retry_credit -= 1;
            debug!("Spending retry credit");
            return Attempt::RetryCredit;
        }
        if self.gated {
            Attempt::NeedsRegistration
        } else {
            Attempt::Ready
        }
    }

    /// Picks a target and starts animating. Returns `None` while already spinning.
    pub fn start<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> Option<usize> {
        if self.is_spinning() {
            return None;
        }
        let pick = outcome::pick(&self.wheel, &self.history, &self.quota, rng)?;
        self.launch(now, pick.index, pick.pool)
    }

    /// Starts a spin that will land on `index`.
    pub fn start_towards(&mut self, now: f64, index: usize) -> Option<usize> {
        if self.is_spinning() || index >= self.wheel.len() {
            return None;
        }
        self.launch(now, index, Pool::Primary)
    }

    fn launch(&mut self, now: f64, index: usize, pool: Pool) -> Option<usize> {
        let mut trajectory = Trajectory::plan(
            self.state.current_angle,
            index,
            self.wheel.len(),
            self.turns,
            now,
            self.duration_ms,
        );
        trajectory.pool = pool;
        debug!("Spin towards segment {} ({:?} pool)", index, pool);
        self.state.phase = SpinPhase::Animating(trajectory);
        self.status = STATUS_SPINNING.to_string();
        Some(index)
    }

    pub fn advance(&mut self, now: f64) -> Tick {
        let trajectory = match &self.state.phase {
            SpinPhase::Animating(trajectory) => trajectory.clone(),
            _ => return Tick::Idle,
        };
        let progress = trajectory.progress(now);
        if progress < 1.0 {
            let angle = trajectory.angle_at(now);
            self.state.current_angle = angle;
            return Tick::Frame { angle, progress };
        }
        Tick::Resolved(self.resolve(&trajectory))
    }

    fn resolve(&mut self, trajectory: &Trajectory) -> SpinResult {
        let n = self.wheel.len();
        let rest = normalize(trajectory.final_angle());
        self.state.current_angle = rest;

        let index = segment_index_under_pointer(rest, n);
        if index != trajectory.target_index {
            error!(
                "Wheel stopped on segment {} but segment {} was chosen",
                index, trajectory.target_index
            );
        }
        let label = self.wheel.label(index).unwrap_or_default().to_string();
        let kind = OutcomeKind::for_label(&label);

        let remaining = self.quota.remaining(&label);
        let quota_consumed = remaining.is_limited() && remaining.is_available();
        if quota_consumed {
            self.quota.consume(&label);
        }

        self.history.push(&label);
        if kind.grants_retry() {
            self.retry_credit = 1;
        }

        info!("Wheel stopped on '{}'", label);
        let result = SpinResult {
            index,
            message: message_for(&label),
            label: label.clone(),
            kind,
            pool: trajectory.pool,
            quota_consumed,
        };
        self.status = label;
        self.state.phase = SpinPhase::Resolved(result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quota::{MemoryStore, NoQuota, QuotaStore, Remaining};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;
    use std::f64::consts::TAU;

    fn controller(labels: &[&str]) -> SpinController<NoQuota> {
        SpinController::new(Wheel::new(labels, &["#7ec4c6"]), NoQuota)
    }

    fn run_to_rest<Q: QuotaPolicy>(c: &mut SpinController<Q>, started_at: f64) -> SpinResult {
        let mut now = started_at;
        let mut last = c.current_angle();
        loop {
            match c.advance(now) {
                Tick::Frame { angle, .. } => {
                    assert!(angle >= last, "wheel spun backwards");
                    last = angle;
                }
                Tick::Resolved(result) => return result,
                Tick::Idle => panic!("spin stopped without resolving"),
            }
            now += 16.0;
        }
    }

    #[test]
    fn forced_target_resolves_to_that_label() {
        let mut c = controller(&["X", "Y"]);
        assert_eq!(c.start_towards(0.0, 1), Some(1));
        let result = run_to_rest(&mut c, 0.0);
        assert_eq!(result.index, 1);
        assert_eq!(result.label, "Y");
        assert_eq!(result.message, "Você ganhou: Y!");
        assert_eq!(c.status(), "Y");
    }

    #[test]
    fn every_target_lands_exactly_from_any_start_angle() {
        let mut rng = StdRng::seed_from_u64(3);
        for n in 1..=9 {
            let labels: Vec<String> = (0..n).map(|i| format!("P{}", i)).collect();
            let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
            let mut c = controller(&labels);
            for round in 0..25 {
                let start = round as f64 * 10_000.0;
                let target = c.start(start, &mut rng).unwrap();
                let result = run_to_rest(&mut c, start);
                assert_eq!(result.index, target);
                let rest = c.current_angle();
                assert!((0.0..TAU).contains(&rest));
                assert_eq!(segment_index_under_pointer(rest, n), target);
            }
        }
    }

    #[test]
    fn spin_requests_while_animating_are_ignored() {
        let mut c = controller(&["A", "B", "C"]);
        let mut rng = StdRng::seed_from_u64(11);
        let first = c.start(0.0, &mut rng).unwrap();
        assert_eq!(c.start(5.0, &mut rng), None);
        assert_eq!(c.start_towards(5.0, 0), None);
        assert_eq!(c.begin_attempt(), Attempt::Busy);
        assert_eq!(c.status(), STATUS_SPINNING);
        assert_eq!(run_to_rest(&mut c, 0.0).index, first);
        assert!(c.start(3000.0, &mut rng).is_some());
    }

    #[test]
    fn frames_follow_easing_and_duration() {
        let mut c = controller(&["A", "B"]).with_timing(1, 1000.0);
        c.start_towards(100.0, 0);
        match c.advance(50.0) {
            Tick::Frame { progress, angle } => {
                assert_eq!(progress, 0.0);
                assert_eq!(angle, 0.0);
            }
            other => panic!("unexpected tick {:?}", other),
        }
        match c.advance(600.0) {
            Tick::Frame { progress, .. } => assert!((progress - 0.5).abs() < 1e-9),
            other => panic!("unexpected tick {:?}", other),
        }
        assert!(matches!(c.advance(1100.0), Tick::Resolved(_)));
        assert_eq!(c.advance(1200.0), Tick::Idle);
    }

    #[test]
    fn lost_turn_does_not_grant_retry() {
        let mut c = controller(&["Perdeu a vez", "Garrafa"]).gated(true);
        c.start_towards(0.0, 0);
        let result = run_to_rest(&mut c, 0.0);
        assert_eq!(result.kind, OutcomeKind::LostTurn);
        assert_eq!(result.message, crate::messages::LOST_TURN_MESSAGE);
        assert_eq!(c.retry_credit(), 0);
        assert_eq!(c.begin_attempt(), Attempt::NeedsRegistration);
    }

    #[test]
    fn try_again_skips_registration_once() {
        let mut c = controller(&["Tente novamente", "Garrafa"]).gated(true);
        c.start_towards(0.0, 0);
        let result = run_to_rest(&mut c, 0.0);
        assert_eq!(result.kind, OutcomeKind::TryAgain);
        assert_eq!(c.retry_credit(), 1);

        assert_eq!(c.begin_attempt(), Attempt::RetryCredit);
        assert_eq!(c.retry_credit(), 0);
        assert!(c.start_towards(3000.0, 1).is_some());
        run_to_rest(&mut c, 3000.0);
        assert_eq!(c.begin_attempt(), Attempt::NeedsRegistration);
    }

    #[test]
    fn standalone_attempts_need_no_registration() {
        let mut c = controller(&["A", "B"]);
        assert_eq!(c.begin_attempt(), Attempt::Ready);
    }

    #[test]
    fn history_tracks_last_two_winners() {
        let mut c = controller(&["A", "B", "C"]);
        for (i, start) in [(0, 0.0), (1, 5000.0), (2, 10_000.0)] {
            c.start_towards(start, i);
            run_to_rest(&mut c, start);
        }
        assert_eq!(c.history().len(), 2);
        assert_eq!(c.history().last(), Some("C"));
        assert_eq!(c.history().get(1), Some("B"));
    }

    #[test]
    fn resolution_consumes_limited_prizes_only() {
        let store = MemoryStore::new();
        let limits: BTreeMap<String, u32> = [("Garrafa".to_string(), 1)].into_iter().collect();
        let quota = QuotaStore::new(limits, &store);
        let mut c = SpinController::new(Wheel::new(&["Garrafa", "Caneca"], &["#fff"]), quota);

        c.start_towards(0.0, 0);
        assert!(run_to_rest(&mut c, 0.0).quota_consumed);
        assert_eq!(c.quota().remaining("Garrafa"), Remaining::Limited(0));

        c.start_towards(3000.0, 1);
        assert!(!run_to_rest(&mut c, 3000.0).quota_consumed);

        // exhausted prize can still show up as feedback but is not consumed again
        c.start_towards(6000.0, 0);
        assert!(!run_to_rest(&mut c, 6000.0).quota_consumed);
        assert_eq!(c.quota().remaining("Garrafa"), Remaining::Limited(0));
    }

    #[test]
    fn exhausted_prize_is_never_picked_while_others_remain() {
        let store = MemoryStore::new();
        let limits: BTreeMap<String, u32> = [("Garrafa".to_string(), 2)].into_iter().collect();
        let quota = QuotaStore::new(limits, &store);
        let mut c = SpinController::new(Wheel::new(&["Garrafa", "Caneca", "Perdeu a vez"], &["#fff"]), quota);
        let mut rng = StdRng::seed_from_u64(5);
        let mut garrafas = 0;
        for round in 0..60 {
            let start = round as f64 * 3000.0;
            c.start(start, &mut rng);
            if run_to_rest(&mut c, start).label == "Garrafa" {
                garrafas += 1;
            }
        }
        assert_eq!(garrafas, 2);
    }

    #[test]
    fn angle_persists_between_spins() {
        let mut c = controller(&["A", "B", "C", "D"]);
        c.start_towards(0.0, 2);
        run_to_rest(&mut c, 0.0);
        let rest = c.current_angle();
        c.start_towards(5000.0, 2);
        match &c.state().phase {
            SpinPhase::Animating(t) => {
                assert_eq!(t.start_angle, rest);
                assert!(t.delta >= 12.0 * TAU);
                assert!(t.delta <= 13.0 * TAU + 1e-9);
                assert_eq!(segment_index_under_pointer(t.final_angle(), 4), 2);
            }
            other => panic!("unexpected phase {:?}", other),
        }
        assert!(c.last_result().is_none());
    }
}
