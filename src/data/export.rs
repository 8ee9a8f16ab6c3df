use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use super::model::EvRecord;

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Write records as CSV in iteration order, under the same column headers
/// the loader reads. Serializing nothing produces empty output with no
/// header row.
pub fn write_csv<'a, W, I>(out: W, records: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a EvRecord>,
{
    let mut writer = csv::Writer::from_writer(out);
    for record in records {
        writer.serialize(record).context("writing CSV record")?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

/// Export records to a file on disk.
pub fn export_to_path<'a, I>(path: &Path, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a EvRecord>,
{
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, records)
}

/// Suggested file name for an export, e.g. `ev_analytics_2025-06-01.csv`.
pub fn default_export_name() -> String {
    format!("ev_analytics_{}.csv", Local::now().format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city: &str, make: &str) -> EvRecord {
        EvRecord {
            vin_prefix: "5YJ3E1EB".to_string(),
            county: "King".to_string(),
            city: city.to_string(),
            state: "WA".to_string(),
            postal_code: "98101".to_string(),
            model_year: "2021".to_string(),
            make: make.to_string(),
            model: "MODEL 3".to_string(),
            ev_type: "Battery Electric Vehicle (BEV)".to_string(),
            cafv_eligibility: "Clean Alternative Fuel Vehicle Eligible".to_string(),
        }
    }

    #[test]
    fn export_reuses_the_source_column_headers() {
        let records = vec![record("Seattle", "TESLA")];
        let mut buf = Vec::new();
        write_csv(&mut buf, &records).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "VIN (1-10),County,City,State,Postal Code,Model Year,Make,Model,\
                 Electric Vehicle Type,Clean Alternative Fuel Vehicle (CAFV) Eligibility"
            )
        );
        assert_eq!(
            lines.next(),
            Some(
                "5YJ3E1EB,King,Seattle,WA,98101,2021,TESLA,MODEL 3,\
                 Battery Electric Vehicle (BEV),Clean Alternative Fuel Vehicle Eligible"
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn rows_come_out_in_iteration_order() {
        let all = vec![
            record("Seattle", "TESLA"),
            record("Tacoma", "NISSAN"),
            record("Spokane", "KIA"),
        ];
        // A filtered subset keeps its own order, untouched.
        let subset = [&all[2], &all[0]];

        let mut buf = Vec::new();
        write_csv(&mut buf, subset).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let cities: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(2).unwrap())
            .collect();
        assert_eq!(cities, vec!["Spokane", "Seattle"]);
    }

    #[test]
    fn no_records_writes_nothing() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &Vec::new()).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn default_name_carries_the_date_stamp() {
        let name = default_export_name();
        assert!(name.starts_with("ev_analytics_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "ev_analytics_YYYY-MM-DD.csv".len());
    }
}
