/// Local CSV-file-backed store, the development-mode backend.
///
/// When the worksheet service is unreachable (or during bench testing at
/// the facility), the dashboard runs against a plain CSV file with the
/// canonical header. Free-text notes routinely contain commas and quotes,
/// so reading and writing go through the `csv` crate rather than manual
/// splitting.

use std::path::{Path, PathBuf};

use crate::logging::Source;
use crate::model::{StoreError, Table, CANONICAL_COLUMNS};
use crate::store::{decode_rows, encode_row, verify_header, RecordStore};

/// Store backed by one CSV file per worksheet: `{dir}/{worksheet}.csv`.
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> CsvStore {
        CsvStore { dir: dir.into() }
    }

    fn path_for(&self, worksheet: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", worksheet))
    }

    fn read_file(&self, path: &Path, worksheet: &str) -> Result<Table, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?
            .iter()
            .map(String::from)
            .collect();
        verify_header(&header)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| StoreError::ReadFailed(e.to_string()))?;
            rows.push(record.iter().map(String::from).collect::<Vec<String>>());
        }

        // Header occupies line 1, first data row is line 2.
        Ok(decode_rows(Source::CsvFile, worksheet, 2, &rows))
    }
}

impl RecordStore for CsvStore {
    fn fetch_all(&self, worksheet: &str) -> Result<Table, StoreError> {
        let path = self.path_for(worksheet);
        if !path.exists() {
            // First run: nothing has been saved yet.
            return Ok(Vec::new());
        }
        self.read_file(&path, worksheet)
    }

    fn replace_all(&self, worksheet: &str, table: &Table) -> Result<(), StoreError> {
        let path = self.path_for(worksheet);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        }

        let mut writer = csv::Writer::from_path(&path)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        writer
            .write_record(CANONICAL_COLUMNS)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        for record in table {
            writer
                .write_record(encode_row(record))
                .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        Ok(())
    }

    fn source(&self) -> Source {
        Source::CsvFile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Species, TankRecord};

    fn record_with_note(note: &str) -> TankRecord {
        TankRecord {
            date: "05-06-2024".to_string(),
            tank_id: "U1-Tank 5".to_string(),
            species: Species::Seabass,
            temperature_c: 18.2,
            ph: 8.1,
            salinity_ppt: 24.0,
            oxygen_mg_l: 7.9,
            light_lux: 450,
            feeding_note: note.to_string(),
            observation_note: "mortality low".to_string(),
        }
    }

    #[test]
    fn test_fetch_from_missing_file_is_empty_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        let table = store.fetch_all("Sheet1").expect("missing file is not an error");
        assert!(table.is_empty());
    }

    #[test]
    fn test_replace_then_fetch_round_trips_notes_with_commas_and_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        let record = record_with_note("10 ppm rotifer, then \"artemia\" at 14:00");

        store
            .replace_all("Sheet1", &vec![record.clone()])
            .expect("write should succeed");
        let table = store.fetch_all("Sheet1").expect("read should succeed");
        assert_eq!(table, vec![record], "quoted free text must survive the round trip");
    }

    #[test]
    fn test_replace_all_rewrites_the_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        let first = record_with_note("first");
        let second = record_with_note("second");

        store.replace_all("Sheet1", &vec![first]).unwrap();
        store.replace_all("Sheet1", &vec![second.clone()]).unwrap();

        let table = store.fetch_all("Sheet1").unwrap();
        assert_eq!(table, vec![second], "replace-all must not merge with prior contents");
    }

    #[test]
    fn test_wrong_header_fails_closed_with_schema_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Sheet1.csv");
        std::fs::write(&path, "Date,Tank,Notes\n05-06-2024,U1-Tank 1,ok\n").unwrap();

        let store = CsvStore::new(dir.path());
        match store.fetch_all("Sheet1") {
            Err(StoreError::SchemaMismatch { found: 3, .. }) => {}
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_data_row_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        let good = record_with_note("ok");
        store.replace_all("Sheet1", &vec![good.clone()]).unwrap();

        // Hand-append a row with an unparseable temperature, as a manual
        // worksheet edit might.
        let path = dir.path().join("Sheet1.csv");
        let mut contents = std::fs::read_to_string(&path).unwrap();
        contents.push_str("06-06-2024,U1-Tank 2,Seabream,warm,8.0,25.0,8.0,500,,\n");
        std::fs::write(&path, contents).unwrap();

        let table = store.fetch_all("Sheet1").expect("fetch should survive bad rows");
        assert_eq!(table, vec![good], "the malformed row must be quarantined");
    }

    #[test]
    fn test_worksheets_are_isolated_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        store.replace_all("Sheet1", &vec![record_with_note("a")]).unwrap();

        let other = store.fetch_all("Archive").unwrap();
        assert!(other.is_empty(), "worksheets must not share a file");
    }
}
