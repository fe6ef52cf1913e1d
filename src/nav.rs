/// Navigation state machine for the dashboard session.
///
/// The original dashboard kept the active unit and selected tank in ambient
/// session flags; here they live in a single immutable `NavState` value
/// threaded through pure transition functions. One `NavState` per session,
/// no terminal state — the machine runs until the operator quits.
///
/// # Invariant
/// A selected tank id always belongs to the active unit's catalog. The
/// machine enforces this by clearing the selection on every real unit
/// change rather than validating ids after the fact.

use crate::units::{self, Unit};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Which screen the session is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// The tank-selection grid for the active unit.
    Overview,
    /// The data-entry form and history table for one tank.
    TankDetail { tank_id: String },
}

/// Complete navigation state: active unit plus current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    /// Prefix of the active unit; always resolvable via `units::find_unit`.
    pub unit_prefix: &'static str,
    pub screen: Screen,
}

impl NavState {
    /// Initial state: overview of the default unit, nothing selected.
    pub fn initial() -> NavState {
        NavState {
            unit_prefix: units::default_unit().prefix,
            screen: Screen::Overview,
        }
    }

    /// The active unit's registry entry.
    pub fn unit(&self) -> &'static Unit {
        units::find_unit(self.unit_prefix)
            .unwrap_or_else(|| units::default_unit())
    }

    /// The selected tank id, if the session is on a detail screen.
    pub fn selected_tank(&self) -> Option<&str> {
        match &self.screen {
            Screen::Overview => None,
            Screen::TankDetail { tank_id } => Some(tank_id),
        }
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Switches the active unit. Selecting the already-active unit is a no-op
/// and keeps any tank selection; a real change always lands on the new
/// unit's overview with the selection cleared.
pub fn select_unit(state: &NavState, unit: &'static Unit) -> NavState {
    if unit.prefix == state.unit_prefix {
        return state.clone();
    }
    NavState {
        unit_prefix: unit.prefix,
        screen: Screen::Overview,
    }
}

/// Selects a tank from the overview grid. Only valid from `Overview` and
/// only for tanks in the active unit's catalog; anything else leaves the
/// state unchanged.
pub fn select_tank(state: &NavState, tank_id: &str) -> NavState {
    match state.screen {
        Screen::Overview if units::unit_has_tank(state.unit(), tank_id) => NavState {
            unit_prefix: state.unit_prefix,
            screen: Screen::TankDetail {
                tank_id: tank_id.to_string(),
            },
        },
        _ => state.clone(),
    }
}

/// Returns from a detail screen to the active unit's overview. No-op when
/// already on the overview.
pub fn go_back(state: &NavState) -> NavState {
    NavState {
        unit_prefix: state.unit_prefix,
        screen: Screen::Overview,
    }
}

/// After a successful save the session stays on the same detail screen;
/// the refresh obligation is carried by the workflow outcome, not here.
pub fn save_succeeded(state: &NavState) -> NavState {
    state.clone()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
