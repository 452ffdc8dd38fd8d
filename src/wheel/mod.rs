//! The "what to eat" spin wheel.
//!
//! - `angle` - normalization, forward deltas, sector geometry
//! - `easing` - cubic-bezier timing for the stop animation
//! - `resolver` - the Idle/Spinning state machine that picks and lands a sector

pub mod angle;
pub mod easing;
pub mod resolver;

pub use angle::{forward_delta, normalize, SectorLayout, FULL_TURN, POINTER_ANGLE};
pub use easing::{CubicBezier, SPIN_EASE};
pub use resolver::{
    plan_spin, PendingSpin, SpinPlan, SpinToken, WheelSpinResolver, WheelState, EXTRA_TURNS,
    FREE_SPIN_PERIOD_SECS, SETTLE_DURATION_SECS,
};
