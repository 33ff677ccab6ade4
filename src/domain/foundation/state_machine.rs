//! Checked transitions for lifecycle enums.

use super::ValidationError;

/// A lifecycle enum whose moves are validated.
///
/// Implementors list the legal edges once; callers go through
/// [`StateMachine::transition_to`] so an illegal move surfaces as an error
/// instead of silently corrupting the state.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// True if `target` is reachable in one step.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Every state reachable in one step.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Moves to `target`, or reports the illegal edge.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if !self.can_transition_to(&target) {
            return Err(ValidationError::invalid_format(
                "state_transition",
                format!("{:?} -> {:?} is not allowed", self, target),
            ));
        }
        Ok(target)
    }

    /// A state nothing leads out of.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
