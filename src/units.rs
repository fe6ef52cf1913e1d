/// Production-unit registry for the larva rearing facility.
///
/// Defines the canonical list of production units and the tank catalog
/// derived from them. This is the single source of truth for tank ids —
/// all other modules should build ids from here rather than hardcoding
/// strings.

// ---------------------------------------------------------------------------
// Unit metadata
// ---------------------------------------------------------------------------

/// Metadata for a single production unit.
pub struct Unit {
    /// Display name shown in the unit selector.
    pub name: &'static str,
    /// Short prefix used to build tank ids, e.g. "U1".
    pub prefix: &'static str,
    /// Number of rearing tanks in the unit.
    pub tank_count: usize,
}

/// The two production units at the facility. The registry is fixed; units
/// are commissioned or retired by editing this table, not at runtime.
pub static UNIT_REGISTRY: &[Unit] = &[
    Unit {
        name: "Production 1 (16 tanks)",
        prefix: "U1",
        tank_count: 16,
    },
    Unit {
        name: "Production 2 (8 tanks)",
        prefix: "U2",
        tank_count: 8,
    },
];

/// The unit shown when a session starts.
pub fn default_unit() -> &'static Unit {
    &UNIT_REGISTRY[0]
}

/// Looks up a unit by its tank-id prefix. Returns `None` if not found.
pub fn find_unit(prefix: &str) -> Option<&'static Unit> {
    UNIT_REGISTRY.iter().find(|u| u.prefix == prefix)
}

// ---------------------------------------------------------------------------
// Tank catalog
// ---------------------------------------------------------------------------

/// Returns the ordered tank ids for a unit: `"{prefix}-Tank {n}"` for n in
/// 1..=tank_count. Pure and deterministic; every id a record may reference
/// comes from this function.
pub fn tank_ids(unit: &Unit) -> Vec<String> {
    (1..=unit.tank_count)
        .map(|n| format!("{}-Tank {}", unit.prefix, n))
        .collect()
}

/// Checks whether a tank id belongs to the given unit's catalog.
pub fn unit_has_tank(unit: &Unit, tank_id: &str) -> bool {
    tank_ids(unit).iter().any(|id| id == tank_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
