/// Text rendering for the dashboard screens.
///
/// Everything here is a pure function from state to `String`; the session
/// loop in `main` does the actual terminal I/O. Layout follows the
/// facility's wall-mounted dashboard: a tank grid four per row, a detail
/// header with the entry date, and a fixed-width history table.

use crate::model::TankRecord;
use crate::units::{tank_ids, Unit};

/// Tanks per overview grid row.
const GRID_COLUMNS: usize = 4;

/// Notice shown when a tank has no history yet.
pub const NO_RECORDS_NOTICE: &str = "No records for this tank yet.";

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

/// Renders the unit title and the numbered tank-selection grid.
pub fn render_overview(unit: &Unit) -> String {
    let mut out = String::new();
    out.push_str(&format!("== {} - Overview ==\n\n", unit.name));

    for (i, tank_id) in tank_ids(unit).iter().enumerate() {
        out.push_str(&format!("  [{:>2}] {:<12}", i + 1, tank_id));
        if (i + 1) % GRID_COLUMNS == 0 {
            out.push('\n');
        }
    }
    if unit.tank_count % GRID_COLUMNS != 0 {
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// Renders the detail-screen title and the date the entry will be stamped
/// with.
pub fn render_detail_header(tank_id: &str, date: &str) -> String {
    format!("== {} - Data Entry ==\nDate: {}\n", tank_id, date)
}

/// Renders the tank's history as a fixed-width table, newest row last
/// (store order). An empty history renders the no-records notice instead.
pub fn render_history(records: &[TankRecord]) -> String {
    if records.is_empty() {
        return format!("{}\n", NO_RECORDS_NOTICE);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<12} {:<10} {:>6} {:>5} {:>5} {:>5} {:>6}  {:<20} {}\n",
        "Date", "Species", "Temp", "pH", "Sal", "Oxy", "Light", "Feeding", "Observations"
    ));
    for r in records {
        out.push_str(&format!(
            "{:<12} {:<10} {:>6.1} {:>5.1} {:>5.1} {:>5.1} {:>6}  {:<20} {}\n",
            r.date,
            r.species.name(),
            r.temperature_c,
            r.ph,
            r.salinity_ppt,
            r.oxygen_mg_l,
            r.light_lux,
            r.feeding_note,
            r.observation_note
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Species;
    use crate::units::find_unit;

    fn record(date: &str, feeding: &str) -> TankRecord {
        TankRecord {
            date: date.to_string(),
            tank_id: "U1-Tank 5".to_string(),
            species: Species::Seabream,
            temperature_c: 18.2,
            ph: 8.1,
            salinity_ppt: 24.0,
            oxygen_mg_l: 7.9,
            light_lux: 450,
            feeding_note: feeding.to_string(),
            observation_note: String::new(),
        }
    }

    #[test]
    fn test_overview_lists_every_tank_of_the_unit() {
        for prefix in ["U1", "U2"] {
            let unit = find_unit(prefix).unwrap();
            let rendered = render_overview(unit);
            for tank_id in tank_ids(unit) {
                assert!(
                    rendered.contains(&tank_id),
                    "overview for {} should list '{}'",
                    unit.name,
                    tank_id
                );
            }
        }
    }

    #[test]
    fn test_overview_grid_is_four_per_row() {
        let unit = find_unit("U1").unwrap();
        let rendered = render_overview(unit);
        let grid_rows: Vec<&str> = rendered
            .lines()
            .filter(|l| l.contains("-Tank "))
            .collect();
        assert_eq!(grid_rows.len(), 4, "16 tanks at 4 per row is 4 grid rows");
        for row in grid_rows {
            assert_eq!(
                row.matches("-Tank ").count(),
                4,
                "each full grid row should hold 4 tanks: {:?}",
                row
            );
        }
    }

    #[test]
    fn test_overview_renders_even_with_no_data_fetched() {
        // The empty-table fallback must leave the overview fully usable:
        // rendering depends only on the catalog, never on store data.
        let u2 = find_unit("U2").unwrap();
        let rendered = render_overview(u2);
        assert_eq!(rendered.matches("-Tank ").count(), 8);
    }

    #[test]
    fn test_detail_header_carries_tank_and_date() {
        let header = render_detail_header("U1-Tank 5", "05-06-2024");
        assert!(header.contains("U1-Tank 5"));
        assert!(header.contains("05-06-2024"));
    }

    #[test]
    fn test_empty_history_shows_notice_not_empty_table() {
        assert!(render_history(&[]).contains(NO_RECORDS_NOTICE));
    }

    #[test]
    fn test_history_rows_render_in_given_order() {
        let rows = vec![record("01-06-2024", "rotifer"), record("02-06-2024", "artemia")];
        let rendered = render_history(&rows);
        let first = rendered.find("01-06-2024").expect("first row rendered");
        let second = rendered.find("02-06-2024").expect("second row rendered");
        assert!(first < second, "history must render in store order");
        assert!(rendered.contains("rotifer"));
        assert!(rendered.contains("Seabream"));
    }
}
