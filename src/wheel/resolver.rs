//! Spin state machine for the "what to eat" wheel.
//!
//! The resolver owns the wheel's rotation. Callers feed it a monotonic clock
//! (`now`, in seconds) from their event loop and sample [`WheelSpinResolver::angle_at`]
//! when drawing. A spin goes through three motions:
//!
//! 1. free spin after `start()`: constant angular velocity, no end;
//! 2. settle after `stop()`: eased rotation to a precomputed final angle;
//! 3. rest, once the settle's one-shot completion has fired and the label is reported.
//!
//! Only the first motion counts as [`WheelState::Spinning`].

use rand::Rng;

use super::angle::{forward_delta, SectorLayout, FULL_TURN};
use super::easing::SPIN_EASE;

/// Full turns added to every stop so the wheel always visibly spins forward.
pub const EXTRA_TURNS: u32 = 6;

/// Seconds per revolution while free spinning.
pub const FREE_SPIN_PERIOD_SECS: f64 = 0.9;

/// Length of the stop animation in seconds.
pub const SETTLE_DURATION_SECS: f64 = 3.0;

/// Externally visible state of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelState {
    Idle,
    Spinning,
}

/// Angles computed when a spin is stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    /// Chosen sector
    pub index: usize,
    /// Rotation at the moment of `stop()`, unnormalized
    pub start_angle: f64,
    /// Rotation that lands the chosen sector under the pointer, before extra turns
    pub target_angle: f64,
    /// Forward rotation from the normalized start to the normalized target, in `[0, 360)`
    pub delta: f64,
    /// Absolute rotation at rest: `start_angle + delta + EXTRA_TURNS * 360`
    pub final_angle: f64,
}

/// Computes the stop plan for landing on `index` from rotation `current`.
///
/// The result always satisfies `final_angle > current`.
pub fn plan_spin(layout: &SectorLayout, index: usize, current: f64) -> SpinPlan {
    let target_angle = layout.resting_angle(index);
    let delta = forward_delta(current, target_angle);
    let final_angle = current + delta + f64::from(EXTRA_TURNS) * FULL_TURN;

    SpinPlan {
        index,
        start_angle: current,
        target_angle,
        delta,
        final_angle,
    }
}

/// Identifies one stop animation's completion notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpinToken(u64);

/// A stopped spin waiting for its animation to finish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingSpin {
    pub plan: SpinPlan,
    pub token: SpinToken,
}

#[derive(Debug, Clone, Copy)]
enum Motion {
    Resting,
    FreeSpin { since: f64, from: f64 },
    Settling { pending: PendingSpin, since: f64 },
}

/// Owns the wheel's sectors, rotation, and last selection.
#[derive(Debug, Clone)]
pub struct WheelSpinResolver {
    layout: SectorLayout,
    /// Rotation at rest, updated after each completed spin
    angle: f64,
    motion: Motion,
    selected: Option<usize>,
    next_token: u64,
}

impl WheelSpinResolver {
    pub fn new(layout: SectorLayout) -> Self {
        Self {
            layout,
            angle: 0.0,
            motion: Motion::Resting,
            selected: None,
            next_token: 0,
        }
    }

    // ===== Queries =====

    pub fn layout(&self) -> &SectorLayout {
        &self.layout
    }

    pub fn state(&self) -> WheelState {
        match self.motion {
            Motion::FreeSpin { .. } => WheelState::Spinning,
            Motion::Resting | Motion::Settling { .. } => WheelState::Idle,
        }
    }

    /// Whether a stop animation is still running.
    pub fn is_settling(&self) -> bool {
        matches!(self.motion, Motion::Settling { .. })
    }

    /// Whether the wheel is moving at all (free spin or settle).
    pub fn is_animating(&self) -> bool {
        !matches!(self.motion, Motion::Resting)
    }

    /// The pending spin, if a stop animation is running.
    pub fn pending(&self) -> Option<PendingSpin> {
        match self.motion {
            Motion::Settling { pending, .. } => Some(pending),
            _ => None,
        }
    }

    /// Label chosen by the last completed spin. Cleared when a new spin starts.
    pub fn selected_label(&self) -> Option<&str> {
        self.selected.and_then(|i| self.layout.label(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Rotation at rest, i.e. where the last completed spin left the wheel.
    pub fn resting_angle(&self) -> f64 {
        self.angle
    }

    /// Rotation to draw at time `now`.
    pub fn angle_at(&self, now: f64) -> f64 {
        match self.motion {
            Motion::Resting => self.angle,
            Motion::FreeSpin { since, from } => {
                let elapsed = (now - since).max(0.0);
                from + elapsed / FREE_SPIN_PERIOD_SECS * FULL_TURN
            }
            Motion::Settling { pending, since } => {
                let t = (now - since) / SETTLE_DURATION_SECS;
                let plan = pending.plan;
                plan.start_angle + (plan.final_angle - plan.start_angle) * SPIN_EASE.sample(t)
            }
        }
    }

    // ===== Transitions =====

    /// Begins free spinning. Returns `false` (and changes nothing) if already spinning.
    ///
    /// Starting during a settle supersedes it: the settle's completion will never fire.
    pub fn start(&mut self, now: f64) -> bool {
        if self.state() == WheelState::Spinning {
            log::debug!("wheel: start ignored, already spinning");
            return false;
        }

        let from = self.angle_at(now);
        if let Motion::Settling { pending, .. } = self.motion {
            log::debug!("wheel: start supersedes pending spin {:?}", pending.token);
        }

        self.angle = from;
        self.selected = None;
        self.motion = Motion::FreeSpin { since: now, from };
        true
    }

    /// Stops free spinning and plans the eased landing on a uniformly random sector.
    ///
    /// Returns `None` if the wheel was not spinning or has no sectors.
    pub fn stop<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> Option<PendingSpin> {
        if self.state() != WheelState::Spinning {
            log::debug!("wheel: stop ignored, not spinning");
            return None;
        }

        let current = self.angle_at(now);
        if self.layout.is_empty() {
            self.angle = current;
            self.motion = Motion::Resting;
            return None;
        }

        let index = rng.gen_range(0..self.layout.len());
        let plan = plan_spin(&self.layout, index, current);
        let token = SpinToken(self.next_token);
        self.next_token += 1;

        let pending = PendingSpin { plan, token };
        self.motion = Motion::Settling { pending, since: now };
        log::debug!(
            "wheel: stopping on sector {} ({:.1}° -> {:.1}°)",
            index,
            plan.start_angle,
            plan.final_angle
        );
        Some(pending)
    }

    /// Delivers the completion notification for a stop animation.
    ///
    /// Fires at most once per spin: stale or repeated tokens return `None`.
    pub fn complete(&mut self, token: SpinToken) -> Option<&str> {
        let pending = match self.motion {
            Motion::Settling { pending, .. } if pending.token == token => pending,
            _ => return None,
        };

        self.angle = pending.plan.final_angle;
        self.selected = Some(pending.plan.index);
        self.motion = Motion::Resting;
        self.layout.label(pending.plan.index)
    }

    /// Fires the pending completion once its animation has run its course.
    pub fn poll(&mut self, now: f64) -> Option<String> {
        let token = match self.motion {
            Motion::Settling { pending, since } if now - since >= SETTLE_DURATION_SECS => pending.token,
            _ => return None,
        };
        self.complete(token).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn five_sectors() -> SectorLayout {
        SectorLayout::new(["Ramen", "Sushi", "Steak", "Udon", "Hot pot"])
    }

    #[test]
    fn test_end_to_end_plan_for_sector_two() {
        let plan = plan_spin(&five_sectors(), 2, 0.0);
        assert_eq!(plan.target_angle, -90.0);
        assert_eq!(plan.delta, 270.0);
        assert_eq!(plan.final_angle, 2430.0);
    }

    #[test]
    fn test_plan_wraps_forward_past_zero() {
        // Four sectors: sector 0 rests at 90 - 45 = 45°
        let layout = SectorLayout::new(["a", "b", "c", "d"]);
        let plan = plan_spin(&layout, 0, 350.0);
        assert_eq!(plan.delta, 55.0);
        assert_eq!(plan.final_angle, 350.0 + 55.0 + 2160.0);
    }

    #[test]
    fn test_start_stop_complete_cycle() {
        let mut wheel = WheelSpinResolver::new(five_sectors());
        let mut rng = StdRng::seed_from_u64(7);

        assert!(wheel.start(0.0));
        assert_eq!(wheel.state(), WheelState::Spinning);

        let pending = wheel.stop(1.35, &mut rng).expect("spinning wheel stops");
        assert_eq!(wheel.state(), WheelState::Idle);
        assert!(wheel.is_settling());
        assert_eq!(wheel.selected_label(), None);

        // Not finished yet
        assert_eq!(wheel.poll(1.35 + SETTLE_DURATION_SECS / 2.0), None);

        let label = wheel.poll(1.35 + SETTLE_DURATION_SECS + 0.01).expect("settle completes");
        assert_eq!(Some(label.as_str()), wheel.layout().label(pending.plan.index));
        assert_eq!(wheel.selected_index(), Some(pending.plan.index));
        assert_eq!(wheel.resting_angle(), pending.plan.final_angle);
        assert_eq!(
            wheel.layout().sector_under_pointer(wheel.resting_angle()),
            Some(pending.plan.index)
        );
    }

    #[test]
    fn test_double_start_is_noop() {
        let mut wheel = WheelSpinResolver::new(five_sectors());
        assert!(wheel.start(0.0));
        let before = wheel.angle_at(0.5);
        assert!(!wheel.start(0.3));
        assert_eq!(wheel.state(), WheelState::Spinning);
        // Same animation, same clock origin
        assert_eq!(wheel.angle_at(0.5), before);
    }

    #[test]
    fn test_stop_while_idle_is_noop() {
        let mut wheel = WheelSpinResolver::new(five_sectors());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(wheel.stop(0.0, &mut rng).is_none());
        assert_eq!(wheel.state(), WheelState::Idle);
        assert!(!wheel.is_animating());
    }

    #[test]
    fn test_completion_fires_once() {
        let mut wheel = WheelSpinResolver::new(five_sectors());
        let mut rng = StdRng::seed_from_u64(3);
        wheel.start(0.0);
        let pending = wheel.stop(0.2, &mut rng).unwrap();

        assert!(wheel.complete(pending.token).is_some());
        assert!(wheel.complete(pending.token).is_none());
        assert_eq!(wheel.poll(100.0), None);
    }

    #[test]
    fn test_restart_supersedes_pending_completion() {
        let mut wheel = WheelSpinResolver::new(five_sectors());
        let mut rng = StdRng::seed_from_u64(11);
        wheel.start(0.0);
        let first = wheel.stop(0.5, &mut rng).unwrap();

        assert!(wheel.start(1.0));
        assert!(wheel.complete(first.token).is_none());
        assert_eq!(wheel.selected_label(), None);

        let second = wheel.stop(2.0, &mut rng).unwrap();
        assert_ne!(first.token, second.token);
        assert!(second.plan.start_angle >= first.plan.start_angle);
        assert!(wheel.complete(second.token).is_some());
    }

    #[test]
    fn test_final_angle_always_moves_forward() {
        let mut wheel = WheelSpinResolver::new(SectorLayout::new((0..10).map(|i| i.to_string())));
        let mut rng = StdRng::seed_from_u64(42);
        let mut now = 0.0;

        for i in 0..500 {
            wheel.start(now);
            now += 0.05 + (i % 17) as f64 * 0.113;
            let pending = wheel.stop(now, &mut rng).unwrap();
            assert!(pending.plan.final_angle > pending.plan.start_angle);
            assert!(pending.plan.delta >= 0.0 && pending.plan.delta < FULL_TURN);

            // Half the runs finish, the rest get interrupted mid-settle
            if i % 2 == 0 {
                now += SETTLE_DURATION_SECS + 0.01;
                assert!(wheel.poll(now).is_some());
            } else {
                now += SETTLE_DURATION_SECS / 3.0;
            }
        }
    }

    #[test]
    fn test_sector_draw_is_uniform() {
        let layout = five_sectors();
        let mut wheel = WheelSpinResolver::new(layout.clone());
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = [0usize; 5];
        let spins = 20_000;
        let mut now = 0.0;

        for _ in 0..spins {
            wheel.start(now);
            now += 1.0;
            let pending = wheel.stop(now, &mut rng).unwrap();
            counts[pending.plan.index] += 1;
            now += SETTLE_DURATION_SECS + 0.01;
            assert!(wheel.poll(now).is_some());
        }

        let expected = spins as f64 / layout.len() as f64;
        let chi_square: f64 = counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        // df = 4, p = 0.001
        assert!(chi_square < 18.47, "counts {:?} chi2 {}", counts, chi_square);
    }

    #[test]
    fn test_empty_wheel_stops_without_selection() {
        let mut wheel = WheelSpinResolver::new(SectorLayout::default());
        let mut rng = StdRng::seed_from_u64(5);
        wheel.start(0.0);
        assert!(wheel.stop(0.45, &mut rng).is_none());
        assert_eq!(wheel.state(), WheelState::Idle);
        assert!(!wheel.is_animating());
        assert!((wheel.resting_angle() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_free_spin_angle_is_linear() {
        let mut wheel = WheelSpinResolver::new(five_sectors());
        wheel.start(10.0);
        assert_eq!(wheel.angle_at(10.0), 0.0);
        assert!((wheel.angle_at(10.0 + FREE_SPIN_PERIOD_SECS) - 360.0).abs() < 1e-9);
    }
}
