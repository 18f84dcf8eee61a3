//! Normalization of one-hot control vectors into discrete actions.
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// Number of control slots in a recorded control vector.
pub const NUM_ACTION_SLOTS: usize = 10;

/// Slot that resets the carried action to neutral.
pub const RESET_ACTION: i32 = 9;

/// Collapses control vectors into discrete action ids.
///
/// A row resolves to the lowest slot set to 1. A row with no slot set repeats
/// the carried action, which starts at 0. Resolving the reset slot emits the
/// reset id for that row but carries 0 to the following rows.
#[derive(Debug, Clone)]
pub struct ActionNormalizer {
    reset_action: i32,
    last_action: i32,
}

impl Default for ActionNormalizer {
    fn default() -> Self {
        Self::new(RESET_ACTION)
    }
}

impl ActionNormalizer {
    /// Creates a normalizer with the given reset slot.
    pub fn new(reset_action: i32) -> Self {
        Self {
            reset_action,
            last_action: 0,
        }
    }

    /// Resolves one control vector.
    pub fn step<'a>(&mut self, row: impl IntoIterator<Item = &'a i32>) -> i32 {
        let action = row
            .into_iter()
            .position(|&v| v == 1)
            .map(|ix| ix as i32)
            .unwrap_or(self.last_action);
        self.last_action = if action == self.reset_action { 0 } else { action };
        action
    }

    /// Resolves all rows of `actions`, returning an `(n, 1)` matrix.
    pub fn normalize(&mut self, actions: ArrayView2<i32>) -> Array2<i32> {
        let resolved: Array1<i32> = actions
            .rows()
            .into_iter()
            .map(|row| self.step(row))
            .collect();
        resolved.insert_axis(Axis(1))
    }
}
