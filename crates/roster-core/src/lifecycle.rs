//! Active-flag lifecycle shared by every entity.
//!
//! Records are never soft-deleted by removing rows: they flip an `is_active`
//! flag. Deactivation additionally stamps an unregistration time; activation
//! leaves timestamps alone. Both directions are guarded transitions that only
//! fire when the record is currently in the opposite state.

/// Which slice of a table a listing should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
  #[default]
  All,
  Active,
  Inactive,
}

/// Direction of a guarded transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
  Activate,
  Deactivate,
}

impl Toggle {
  /// The `is_active` value a row must currently hold for the transition to
  /// apply.
  pub fn required_state(self) -> bool { matches!(self, Self::Deactivate) }

  /// The `is_active` value written by the transition.
  pub fn target_state(self) -> bool { matches!(self, Self::Activate) }
}

/// Outcome of a guarded transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
  /// The row matched the precondition and was updated.
  Applied,
  /// The row exists but is already in the target state.
  Unchanged,
  /// No row has the given identifier.
  NotFound,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toggles_are_mirror_images() {
    assert!(Toggle::Deactivate.required_state());
    assert!(!Toggle::Deactivate.target_state());
    assert!(!Toggle::Activate.required_state());
    assert!(Toggle::Activate.target_state());
  }
}
