//! Wheel section state.
//!
//! Wraps the spin resolver with the random source it draws from and the short
//! history of past results shown under the wheel.

use folio::{SectorLayout, WheelSpinResolver, WheelState};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Number of past results kept for display.
const HISTORY_LEN: usize = 5;

pub struct WheelPanelState {
    resolver: WheelSpinResolver,
    rng: StdRng,
    /// Most recent result first
    history: Vec<String>,
}

impl std::fmt::Debug for WheelPanelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WheelPanelState")
            .field("resolver", &self.resolver)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl WheelPanelState {
    pub fn new(items: &[String]) -> Self {
        Self::with_rng(items, StdRng::from_entropy())
    }

    /// Creates the state with a specific random source.
    ///
    /// # Arguments
    /// * `items` - Sector labels in clockwise order
    /// * `rng` - Source for the uniform sector draw
    pub fn with_rng(items: &[String], rng: StdRng) -> Self {
        Self {
            resolver: WheelSpinResolver::new(SectorLayout::new(items.iter().cloned())),
            rng,
            history: Vec::new(),
        }
    }

    // ===== Queries =====

    pub fn resolver(&self) -> &WheelSpinResolver {
        &self.resolver
    }

    pub fn is_spinning(&self) -> bool {
        self.resolver.state() == WheelState::Spinning
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Caption of the single start/stop button.
    pub fn button_label(&self) -> &'static str {
        if self.is_spinning() {
            "Stop"
        } else {
            "Start"
        }
    }

    // ===== Mutations =====

    /// Handles the start/stop button: starts when idle, stops when spinning.
    ///
    /// # Arguments
    /// * `now` - Frame time in seconds
    pub fn toggle(&mut self, now: f64) {
        if self.is_spinning() {
            self.resolver.stop(now, &mut self.rng);
        } else {
            self.resolver.start(now);
        }
    }

    /// Advances the wheel to `now`, returning the label if a spin just finished.
    pub fn tick(&mut self, now: f64) -> Option<String> {
        let label = self.resolver.poll(now)?;
        log::info!("wheel landed on {}", label);
        self.history.insert(0, label.clone());
        self.history.truncate(HISTORY_LEN);
        Some(label)
    }
}
