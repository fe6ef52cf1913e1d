/// TankRecord, Species, Table, StoreError
/// core data structures and error handling
///
/// Core data types for the larva rearing data-entry service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic, no I/O, and no external dependencies — only types.

// ---------------------------------------------------------------------------
// Canonical columns
// ---------------------------------------------------------------------------

/// The canonical worksheet column set, in order. Both store backends write
/// this header and validate against it on fetch; the empty-table fallback
/// is defined as "no rows, these columns".
pub const CANONICAL_COLUMNS: [&str; 10] = [
    "Date",
    "Tank ID",
    "Species",
    "Temperature",
    "pH",
    "Salinity",
    "Oxygen",
    "Light",
    "Feeding",
    "Observations",
];

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

/// The two species cultured at the facility. `Seabream` is the form default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Species {
    Seabream,
    Seabass,
}

impl Species {
    /// Display name as stored in the worksheet's Species column.
    pub fn name(&self) -> &'static str {
        match self {
            Species::Seabream => "Seabream",
            Species::Seabass => "Seabass",
        }
    }

    /// Parses a worksheet Species cell. Unknown names are a malformed-row
    /// condition, handled by the store decode layer.
    pub fn parse(name: &str) -> Option<Species> {
        match name.trim() {
            "Seabream" => Some(Species::Seabream),
            "Seabass" => Some(Species::Seabass),
            _ => None,
        }
    }

    /// All species, in form-selector order.
    pub fn all() -> &'static [Species] {
        &[Species::Seabream, Species::Seabass]
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// A single water-quality observation submitted for one tank on one date.
///
/// `date` and `tank_id` are always populated at construction; the numeric
/// fields carry the form defaults when the operator leaves them untouched,
/// so a submitted record never has an absent measurement. Records are
/// immutable after creation — there is no edit or delete operation.
#[derive(Debug, Clone, PartialEq)]
pub struct TankRecord {
    /// Calendar date, formatted `DD-MM-YYYY`.
    pub date: String,
    /// Tank identifier from the unit catalog, e.g. "U1-Tank 5".
    pub tank_id: String,
    pub species: Species,
    pub temperature_c: f64,
    pub ph: f64,
    pub salinity_ppt: f64,
    pub oxygen_mg_l: f64,
    pub light_lux: i64,
    /// Free text, may be empty.
    pub feeding_note: String,
    /// Free text, may be empty.
    pub observation_note: String,
}

/// The full ordered collection of records as held by the external store.
/// Row order is insertion order; nothing in this service re-sorts it.
pub type Table = Vec<TankRecord>;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise at the store boundary.
#[derive(Debug, PartialEq)]
pub enum StoreError {
    /// Fetch failed (network/auth/store unavailable).
    ReadFailed(String),
    /// Replace-all failed; nothing was committed.
    WriteFailed(String),
    /// The worksheet header exists but does not match the canonical columns.
    SchemaMismatch { expected: usize, found: usize },
    /// A fetched row is missing required columns or has unparseable values.
    /// Recovered by skipping the row, never by failing the whole fetch.
    MalformedRow { line: usize, reason: String },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::ReadFailed(msg) => write!(f, "Store read failed: {}", msg),
            StoreError::WriteFailed(msg) => write!(f, "Store write failed: {}", msg),
            StoreError::SchemaMismatch { expected, found } => write!(
                f,
                "Worksheet schema mismatch: expected {} columns, found {}",
                expected, found
            ),
            StoreError::MalformedRow { line, reason } => {
                write!(f, "Malformed row at line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for StoreError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
