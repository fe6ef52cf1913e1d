/// Store boundary: the two-operation adapter over the external tabular
/// store, plus the row codec shared by both backends.
///
/// Every save rewrites the whole dataset — the store exposes no row-level
/// addressing, no partial update, and no optimistic concurrency. Two
/// sessions racing through fetch → append → replace can lose the first
/// session's row; this is a documented limitation of the worksheet
/// boundary, which carries no version token to check against.
///
/// All failures are caught here and converted to `StoreError`; nothing
/// propagates past this boundary as an unhandled fault.

pub mod csv_file;
pub mod sheet;

use crate::logging::{self, Source};
use crate::model::{StoreError, Table, TankRecord, CANONICAL_COLUMNS};

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// The narrow interface the rest of the service sees. One named worksheet,
/// two operations.
pub trait RecordStore {
    /// Retrieves the entire current table, skipping malformed rows.
    fn fetch_all(&self, worksheet: &str) -> Result<Table, StoreError>;

    /// Overwrites the entire remote table with `table`. Either fully
    /// succeeds or fully fails; no retry.
    fn replace_all(&self, worksheet: &str, table: &Table) -> Result<(), StoreError>;

    /// Log-source tag for boundary failure reporting.
    fn source(&self) -> Source;
}

/// Fail-soft fetch used at the start of every render: any read error is
/// logged and reported, and the session continues on an empty canonical
/// table. Navigation and the overview grid stay fully usable.
pub fn fetch_all_or_empty(store: &dyn RecordStore, worksheet: &str) -> Table {
    match store.fetch_all(worksheet) {
        Ok(table) => table,
        Err(err) => {
            logging::log_store_failure(store.source(), worksheet, "fetch_all", &err);
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Row codec
// ---------------------------------------------------------------------------

/// Encodes a record as one worksheet row, cells in canonical column order.
pub fn encode_row(record: &TankRecord) -> Vec<String> {
    vec![
        record.date.clone(),
        record.tank_id.clone(),
        record.species.name().to_string(),
        record.temperature_c.to_string(),
        record.ph.to_string(),
        record.salinity_ppt.to_string(),
        record.oxygen_mg_l.to_string(),
        record.light_lux.to_string(),
        record.feeding_note.clone(),
        record.observation_note.clone(),
    ]
}

/// Decodes one worksheet row. `line` is the 1-based worksheet line number,
/// used only for error reporting.
pub fn decode_row(line: usize, fields: &[String]) -> Result<TankRecord, StoreError> {
    if fields.len() < CANONICAL_COLUMNS.len() {
        return Err(StoreError::MalformedRow {
            line,
            reason: format!(
                "expected {} cells, found {}",
                CANONICAL_COLUMNS.len(),
                fields.len()
            ),
        });
    }

    let malformed = |reason: String| StoreError::MalformedRow { line, reason };

    let date = fields[0].trim().to_string();
    let tank_id = fields[1].trim().to_string();
    if date.is_empty() {
        return Err(malformed("empty Date cell".to_string()));
    }
    if tank_id.is_empty() {
        return Err(malformed("empty Tank ID cell".to_string()));
    }

    let species = crate::model::Species::parse(&fields[2])
        .ok_or_else(|| malformed(format!("unknown species '{}'", fields[2])))?;

    let parse_f64 = |idx: usize| -> Result<f64, StoreError> {
        fields[idx]
            .trim()
            .parse()
            .map_err(|_| malformed(format!(
                "unparseable {} value '{}'",
                CANONICAL_COLUMNS[idx], fields[idx]
            )))
    };
    let temperature_c = parse_f64(3)?;
    let ph = parse_f64(4)?;
    let salinity_ppt = parse_f64(5)?;
    let oxygen_mg_l = parse_f64(6)?;
    let light_lux: i64 = fields[7]
        .trim()
        .parse()
        .map_err(|_| malformed(format!("unparseable Light value '{}'", fields[7])))?;

    Ok(TankRecord {
        date,
        tank_id,
        species,
        temperature_c,
        ph,
        salinity_ppt,
        oxygen_mg_l,
        light_lux,
        feeding_note: fields[8].clone(),
        observation_note: fields[9].clone(),
    })
}

/// Decodes a batch of rows, quarantining malformed ones: each failure is
/// logged as a warning and the surviving records are returned in order.
/// `first_line` is the worksheet line number of `rows[0]` (2 when a header
/// occupies line 1).
pub fn decode_rows(
    source: Source,
    worksheet: &str,
    first_line: usize,
    rows: &[Vec<String>],
) -> Table {
    let mut table = Vec::with_capacity(rows.len());
    for (i, fields) in rows.iter().enumerate() {
        match decode_row(first_line + i, fields) {
            Ok(record) => table.push(record),
            Err(err) => {
                logging::log_store_failure(source.clone(), worksheet, "decode_row", &err);
            }
        }
    }
    table
}

/// Validates a fetched header against the canonical column set. Fails
/// closed: a worksheet with the wrong shape would yield malformed records
/// downstream, so fetch stops here with a clear error instead.
pub fn verify_header(header: &[String]) -> Result<(), StoreError> {
    let matches = header.len() == CANONICAL_COLUMNS.len()
        && header
            .iter()
            .zip(CANONICAL_COLUMNS.iter())
            .all(|(found, expected)| found.trim() == *expected);
    if matches {
        Ok(())
    } else {
        Err(StoreError::SchemaMismatch {
            expected: CANONICAL_COLUMNS.len(),
            found: header.len(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Species;

    fn sample_record() -> TankRecord {
        TankRecord {
            date: "05-06-2024".to_string(),
            tank_id: "U1-Tank 5".to_string(),
            species: Species::Seabream,
            temperature_c: 18.2,
            ph: 8.1,
            salinity_ppt: 24.0,
            oxygen_mg_l: 7.9,
            light_lux: 450,
            feeding_note: "10ppm".to_string(),
            observation_note: String::new(),
        }
    }

    #[test]
    fn test_encode_row_follows_canonical_column_order() {
        let row = encode_row(&sample_record());
        assert_eq!(row.len(), CANONICAL_COLUMNS.len());
        assert_eq!(row[0], "05-06-2024");
        assert_eq!(row[1], "U1-Tank 5");
        assert_eq!(row[2], "Seabream");
        assert_eq!(row[7], "450");
        assert_eq!(row[8], "10ppm");
        assert_eq!(row[9], "");
    }

    #[test]
    fn test_decode_row_inverts_encode_row() {
        let record = sample_record();
        let decoded = decode_row(2, &encode_row(&record)).expect("row should decode");
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_decode_row_rejects_short_rows() {
        let err = decode_row(3, &["05-06-2024".to_string()]).unwrap_err();
        match err {
            StoreError::MalformedRow { line, .. } => assert_eq!(line, 3),
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_row_rejects_empty_date_and_tank_id() {
        let mut row = encode_row(&sample_record());
        row[0] = "  ".to_string();
        assert!(decode_row(2, &row).is_err(), "empty Date must be malformed");

        let mut row = encode_row(&sample_record());
        row[1] = String::new();
        assert!(decode_row(2, &row).is_err(), "empty Tank ID must be malformed");
    }

    #[test]
    fn test_decode_row_rejects_unknown_species_and_bad_numbers() {
        let mut row = encode_row(&sample_record());
        row[2] = "Tilapia".to_string();
        assert!(decode_row(2, &row).is_err());

        let mut row = encode_row(&sample_record());
        row[4] = "not-a-ph".to_string();
        assert!(decode_row(2, &row).is_err());

        let mut row = encode_row(&sample_record());
        row[7] = "450.5".to_string(); // light is an integer column
        assert!(decode_row(2, &row).is_err());
    }

    #[test]
    fn test_decode_rows_skips_malformed_and_keeps_survivors() {
        let good = encode_row(&sample_record());
        let bad = vec!["junk".to_string()];
        let mut second = sample_record();
        second.tank_id = "U1-Tank 6".to_string();
        let rows = vec![good, bad, encode_row(&second)];

        let table = decode_rows(Source::CsvFile, "Sheet1", 2, &rows);
        assert_eq!(table.len(), 2, "one malformed row should be quarantined");
        assert_eq!(table[0].tank_id, "U1-Tank 5");
        assert_eq!(table[1].tank_id, "U1-Tank 6");
    }

    #[test]
    fn test_verify_header_accepts_canonical_and_rejects_others() {
        let canonical: Vec<String> = CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect();
        assert!(verify_header(&canonical).is_ok());

        let short: Vec<String> = canonical[..7].to_vec();
        assert!(matches!(
            verify_header(&short),
            Err(StoreError::SchemaMismatch { found: 7, .. })
        ));

        let mut renamed = canonical.clone();
        renamed[1] = "Tank".to_string();
        assert!(verify_header(&renamed).is_err(), "renamed column must fail closed");
    }

    struct FailingStore;
    impl RecordStore for FailingStore {
        fn fetch_all(&self, _worksheet: &str) -> Result<Table, StoreError> {
            Err(StoreError::ReadFailed("store unavailable".to_string()))
        }
        fn replace_all(&self, _worksheet: &str, _table: &Table) -> Result<(), StoreError> {
            Err(StoreError::WriteFailed("store unavailable".to_string()))
        }
        fn source(&self) -> Source {
            Source::Sheet
        }
    }

    #[test]
    fn test_fetch_all_or_empty_degrades_to_empty_table() {
        let table = fetch_all_or_empty(&FailingStore, "Sheet1");
        assert!(table.is_empty(), "read failure must degrade to an empty table");
    }
}
