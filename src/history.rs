/// Per-tank history filtering.
///
/// The detail screen shows every record ever submitted for the selected
/// tank, in the order the store holds them. Filtering is the only
/// "analysis" this service does; anything heavier reads the worksheet
/// directly.

use crate::model::{TankRecord, Table};

/// Returns the order-preserving subsequence of `table` belonging to
/// `tank_id`. Zero matches yields an empty vector, not an error — the
/// dashboard renders a "no records yet" notice for that case.
pub fn history_for(table: &Table, tank_id: &str) -> Vec<TankRecord> {
    table
        .iter()
        .filter(|r| r.tank_id == tank_id)
        .cloned()
        .collect()
}
