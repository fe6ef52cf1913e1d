/// Persistence workflow: fetch-held-table → append → replace-all.
///
/// The caller holds the table fetched at the start of the current render;
/// this module appends the new record in memory and issues the single
/// replace-all call. Append semantics, not upsert: saving the same record
/// twice produces two rows, by design of the worksheet boundary.
///
/// There is no rollback because there is nothing to roll back — the only
/// mutation is the one replace-all call, which either fully succeeds or
/// fully fails from this side.
///
/// Known limitation: two sessions racing through fetch → append → replace
/// can lose the first session's row. The worksheet service exposes no
/// version token or row-append primitive to guard against it; if it ever
/// grows an ETag, a compare-before-replace belongs here.

use crate::logging;
use crate::model::{Table, TankRecord};
use crate::store::RecordStore;

/// Outcome of one save attempt.
#[derive(Debug, PartialEq)]
pub enum SaveOutcome {
    /// Committed. The caller must refetch before the next render — the
    /// held table is stale by definition now.
    Saved,
    /// Nothing committed. The form's entered values are preserved for a
    /// manual retry; no automatic retry happens.
    Failed(String),
}

impl SaveOutcome {
    /// Whether the held table must be thrown away and refetched.
    pub fn needs_refresh(&self) -> bool {
        matches!(self, SaveOutcome::Saved)
    }
}

/// Appends `record` to the held table and replaces the remote worksheet
/// with the result. Strictly sequential, one write, no retry.
pub fn save_record(
    store: &dyn RecordStore,
    worksheet: &str,
    current: &Table,
    record: TankRecord,
) -> SaveOutcome {
    let mut augmented = current.clone();
    augmented.push(record);

    match store.replace_all(worksheet, &augmented) {
        Ok(()) => {
            logging::info(
                store.source(),
                Some(worksheet),
                &format!("saved record ({} rows total)", augmented.len()),
            );
            SaveOutcome::Saved
        }
        Err(err) => {
            logging::log_store_failure(store.source(), worksheet, "replace_all", &err);
            SaveOutcome::Failed(err.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
