use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result, bail};

use super::model::{EvDataset, EvRecord};

/// Receiving end of a background load; `Ok` carries the parsed dataset.
pub type LoadHandle = mpsc::Receiver<Result<EvDataset>>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an EV registration dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the registry column names (recommended)
/// * `.json` – `[{ "VIN (1-10)": "...", "County": "...", ... }, ...]`
pub fn load_file(path: &Path) -> Result<EvDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Run [`load_file`] on a background thread so a large file never stalls a
/// frame. The caller polls the returned channel for the single result.
pub fn spawn_load(path: PathBuf) -> LoadHandle {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // A dropped receiver means the app shut down mid-load.
        let _ = tx.send(load_file(&path));
    });
    rx
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row naming the registry columns, one vehicle per row.
/// Column order does not matter, unknown columns are skipped, and known
/// columns that are absent deserialize as empty strings.
fn load_csv(path: &Path) -> Result<EvDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

fn read_csv<R: Read>(input: R) -> Result<EvDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let mut records = Vec::new();

    for (row_no, result) in reader.deserialize::<EvRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(EvDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented): a top-level array of objects
/// keyed by the same column names the CSV header uses. Keys beyond the ten
/// known ones are ignored.
fn load_json(path: &Path) -> Result<EvDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    read_json(text.as_bytes())
}

fn read_json<R: Read>(input: R) -> Result<EvDataset> {
    let records: Vec<EvRecord> =
        serde_json::from_reader(input).context("parsing JSON records")?;
    Ok(EvDataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::FilterKey;

    const HEADER: &str = "VIN (1-10),County,City,State,Postal Code,Model Year,Make,Model,Electric Vehicle Type,Clean Alternative Fuel Vehicle (CAFV) Eligibility";

    #[test]
    fn csv_rows_map_onto_records_in_order() {
        let csv = format!(
            "{HEADER}\n\
             5YJ3E1EB,King,Seattle,WA,98101,2021,TESLA,MODEL 3,Battery Electric Vehicle (BEV),Clean Alternative Fuel Vehicle Eligible\n\
             1N4AZ0CP,Pierce,Tacoma,WA,98402,2019,NISSAN,LEAF,Battery Electric Vehicle (BEV),Eligibility unknown as battery range has not been researched\n"
        );
        let dataset = read_csv(csv.as_bytes()).unwrap();

        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.records[0].vin_prefix, "5YJ3E1EB");
        assert_eq!(dataset.records[0].city, "Seattle");
        assert_eq!(dataset.records[0].model_year, "2021");
        assert_eq!(dataset.records[1].make, "NISSAN");
        assert_eq!(
            dataset.options.for_key(FilterKey::Make),
            &["NISSAN".to_string(), "TESLA".to_string()]
        );
    }

    #[test]
    fn unknown_csv_columns_are_ignored() {
        let csv = "City,Electric Range,DOL Vehicle ID,Make\n\
                   Seattle,215,123456789,TESLA\n";
        let dataset = read_csv(csv.as_bytes()).unwrap();

        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].city, "Seattle");
        assert_eq!(dataset.records[0].make, "TESLA");
    }

    #[test]
    fn missing_csv_columns_become_empty_strings() {
        let csv = "County,City\nKing,Seattle\n";
        let dataset = read_csv(csv.as_bytes()).unwrap();

        let rec = &dataset.records[0];
        assert_eq!(rec.county, "King");
        assert_eq!(rec.city, "Seattle");
        assert_eq!(rec.state, "");
        assert_eq!(rec.vin_prefix, "");
    }

    #[test]
    fn ragged_csv_rows_are_an_error() {
        let csv = "County,City\nKing,Seattle,extra\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("CSV row 0"));
    }

    #[test]
    fn json_array_of_objects_loads() {
        let json = r#"[
            {"City": "Seattle", "State": "WA", "Make": "TESLA", "Model Year": "2021"},
            {"City": "Portland", "State": "OR", "Make": "HYUNDAI"}
        ]"#;
        let dataset = read_json(json.as_bytes()).unwrap();

        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.records[0].state, "WA");
        // Keys absent from the object fall back to empty strings.
        assert_eq!(dataset.records[1].model_year, "");
    }

    #[test]
    fn json_top_level_must_be_an_array() {
        let err = read_json(br#"{"City": "Seattle"}"#.as_slice()).unwrap_err();
        assert!(err.to_string().contains("parsing JSON records"));
    }

    #[test]
    fn unsupported_extensions_are_rejected() {
        let err = load_file(Path::new("registrations.parquet")).unwrap_err();
        assert!(err.to_string().contains(".parquet"));

        let err = load_file(Path::new("registrations")).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }

    #[test]
    fn spawn_load_delivers_errors_through_the_channel() {
        let rx = spawn_load(PathBuf::from("no/such/file.csv"));
        let result = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("loader thread should answer");
        assert!(result.is_err());
    }
}
