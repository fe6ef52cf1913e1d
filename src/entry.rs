/// Record entry: form defaults and record construction.
///
/// # Clock injection
/// `submit_at` takes the date as a parameter rather than reading the wall
/// clock, keeping record construction deterministic in tests. `submit` is
/// the convenience wrapper used by the session loop.

use chrono::{Local, NaiveDate};

use crate::model::{Species, TankRecord};

/// Date format used in the worksheet's Date column.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// The data-entry form as the operator sees it, pre-filled with the
/// facility's standard rearing conditions. Values are copied into the
/// record verbatim on submit; there is no range validation beyond what the
/// input widgets enforce, and no required fields beyond date and tank id
/// (both stamped by `submit_at`, not typed by the operator).
#[derive(Debug, Clone, PartialEq)]
pub struct EntryForm {
    pub species: Species,
    pub temperature_c: f64,
    pub ph: f64,
    pub salinity_ppt: f64,
    pub oxygen_mg_l: f64,
    pub light_lux: i64,
    pub feeding_note: String,
    pub observation_note: String,
}

impl Default for EntryForm {
    fn default() -> Self {
        EntryForm {
            species: Species::Seabream,
            temperature_c: 17.0,
            ph: 8.0,
            salinity_ppt: 25.0,
            oxygen_mg_l: 8.0,
            light_lux: 500,
            feeding_note: String::new(),
            observation_note: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Builds the record for a form submission: stamps the given date, binds
/// the active tank id, copies the field values verbatim.
pub fn submit_at(form: &EntryForm, tank_id: &str, today: NaiveDate) -> TankRecord {
    TankRecord {
        date: today.format(DATE_FORMAT).to_string(),
        tank_id: tank_id.to_string(),
        species: form.species,
        temperature_c: form.temperature_c,
        ph: form.ph,
        salinity_ppt: form.salinity_ppt,
        oxygen_mg_l: form.oxygen_mg_l,
        light_lux: form.light_lux,
        feeding_note: form.feeding_note.clone(),
        observation_note: form.observation_note.clone(),
    }
}

/// Convenience wrapper that stamps the local calendar date.
/// Use `submit_at` in tests to keep them deterministic.
pub fn submit(form: &EntryForm, tank_id: &str) -> TankRecord {
    submit_at(form, tank_id, Local::now().date_naive())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
