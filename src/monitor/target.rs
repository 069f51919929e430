use std::ops::Deref;

use crate::parse::{MealKey, MealRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetState {
    Pending,
    /// Seen available this tick, order not yet confirmed.
    AvailableDetected,
    Ordered,
}

/// A meal the operator pinned at selection time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetMeal {
    meal: MealRecord,
    state: TargetState,
}

impl TargetMeal {
    pub const fn new(meal: MealRecord) -> Self {
        Self {
            meal,
            state: TargetState::Pending,
        }
    }

    #[cfg(test)]
    pub const fn state(&self) -> TargetState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn ordered(&self) -> bool {
        self.state == TargetState::Ordered
    }

    pub fn key(&self) -> MealKey<'_> {
        self.meal.key()
    }

    pub(super) fn set_state(&mut self, state: TargetState) {
        // ordered is terminal
        if self.state != TargetState::Ordered {
            self.state = state;
        }
    }
}

impl Deref for TargetMeal {
    type Target = MealRecord;

    fn deref(&self) -> &Self::Target {
        &self.meal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::fixtures::record;

    #[test]
    fn test_ordered_is_terminal() {
        let mut target = TargetMeal::new(record("Obědy", "1", "1", true));
        assert_eq!(target.state(), TargetState::Pending);
        target.set_state(TargetState::AvailableDetected);
        target.set_state(TargetState::Ordered);
        target.set_state(TargetState::Pending);
        assert!(target.ordered());
    }
}
