use std::time::Duration;

use super::aggregate::ChartBundle;
use super::model::EvRecord;

/// Model years at or above this count as recent adoption.
pub const RECENT_YEAR_CUTOFF: i32 = 2020;

/// How long the banner dwells on one insight before advancing.
pub const ROTATE_INTERVAL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Neutral,
}

/// One rotating banner entry: a short headline figure and a supporting line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub headline: String,
    pub detail: String,
    pub trend: Trend,
}

// ---------------------------------------------------------------------------
// Synthesis
// ---------------------------------------------------------------------------

/// Derive the rotating insights from the filtered records and their chart
/// bundle. An empty filtered sequence produces no insights at all rather
/// than a list of zero-valued ones.
pub fn build_insights<'a, I>(filtered: I, charts: &ChartBundle) -> Vec<Insight>
where
    I: IntoIterator<Item = &'a EvRecord>,
{
    let mut total: u64 = 0;
    let mut recent: u64 = 0;
    for rec in filtered {
        total += 1;
        if parse_year(&rec.model_year).is_some_and(|y| y >= RECENT_YEAR_CUTOFF) {
            recent += 1;
        }
    }
    if total == 0 {
        return Vec::new();
    }

    let (top_make, make_share) = match charts.make_data.first() {
        Some(top) => (
            top.name.as_str(),
            format!("{:.1}", top.value as f64 / total as f64 * 100.0),
        ),
        None => ("N/A", "0".to_string()),
    };
    let recent_share = format!("{:.1}", recent as f64 / total as f64 * 100.0);
    let states = charts.state_data.len();

    vec![
        Insight {
            headline: format!("{top_make} leads with {make_share}%"),
            detail: "of the total EV market share".to_string(),
            trend: Trend::Up,
        },
        Insight {
            headline: format!("{recent_share}% are from {RECENT_YEAR_CUTOFF}+"),
            detail: "showing accelerating EV adoption".to_string(),
            trend: Trend::Up,
        },
        Insight {
            headline: format!("{states} states covered"),
            detail: "demonstrating nationwide EV presence".to_string(),
            trend: Trend::Neutral,
        },
        Insight {
            headline: format!("{} vehicles", format_count(total)),
            detail: "in current dataset analysis".to_string(),
            trend: Trend::Neutral,
        },
    ]
}

/// Index of the insight to show after `active`, wrapping around. A total of
/// zero pins the index to zero so the caller never holds a stale position.
pub fn next_insight(active: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        (active + 1) % total
    }
}

/// Highest model year that parses as an integer, if any does.
pub fn latest_model_year<'a, I>(records: I) -> Option<i32>
where
    I: IntoIterator<Item = &'a EvRecord>,
{
    records
        .into_iter()
        .filter_map(|rec| parse_year(&rec.model_year))
        .max()
}

/// Render a count with thousands separators, e.g. 150482 -> "150,482".
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse the leading digits of a model-year string. Source data is not
/// guaranteed numeric, so anything without a digit prefix yields None.
fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    let digits = match trimmed.find(|c: char| !c.is_ascii_digit()) {
        Some(0) => return None,
        Some(end) => &trimmed[..end],
        None => trimmed,
    };
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::build_charts;

    fn record(state: &str, make: &str, year: &str) -> EvRecord {
        EvRecord {
            city: "Seattle".to_string(),
            state: state.to_string(),
            make: make.to_string(),
            model_year: year.to_string(),
            ..EvRecord::default()
        }
    }

    #[test]
    fn no_records_means_no_insights() {
        let records: Vec<EvRecord> = Vec::new();
        let charts = build_charts(&records);
        assert!(build_insights(&records, &charts).is_empty());
    }

    #[test]
    fn four_insights_with_expected_wording() {
        let records = vec![
            record("WA", "TESLA", "2021"),
            record("WA", "NISSAN", "2019"),
            record("WA", "TESLA", "2022"),
        ];
        let charts = build_charts(&records);
        let insights = build_insights(&records, &charts);

        assert_eq!(insights.len(), 4);
        assert_eq!(insights[0].headline, "TESLA leads with 66.7%");
        assert_eq!(insights[0].detail, "of the total EV market share");
        assert_eq!(insights[0].trend, Trend::Up);
        assert_eq!(insights[1].headline, "66.7% are from 2020+");
        assert_eq!(insights[2].headline, "1 states covered");
        assert_eq!(insights[2].trend, Trend::Neutral);
        assert_eq!(insights[3].headline, "3 vehicles");
        assert_eq!(insights[3].detail, "in current dataset analysis");
    }

    #[test]
    fn missing_make_data_falls_back_to_na() {
        let records = vec![record("WA", "", "2021")];
        let charts = build_charts(&records);
        let insights = build_insights(&records, &charts);
        assert_eq!(insights[0].headline, "N/A leads with 0%");
    }

    #[test]
    fn recent_share_counts_the_cutoff_year_itself() {
        let records = vec![
            record("WA", "KIA", "2020"),
            record("WA", "KIA", "2019"),
        ];
        let charts = build_charts(&records);
        let insights = build_insights(&records, &charts);
        assert_eq!(insights[1].headline, "50.0% are from 2020+");
    }

    #[test]
    fn unparseable_years_count_as_not_recent() {
        let records = vec![
            record("WA", "KIA", "unknown"),
            record("WA", "KIA", ""),
            record("WA", "KIA", "2024"),
        ];
        let charts = build_charts(&records);
        let insights = build_insights(&records, &charts);
        assert_eq!(insights[1].headline, "33.3% are from 2020+");
    }

    #[test]
    fn next_insight_wraps_and_tolerates_empty() {
        assert_eq!(next_insight(0, 4), 1);
        assert_eq!(next_insight(3, 4), 0);
        assert_eq!(next_insight(7, 0), 0);
    }

    #[test]
    fn latest_model_year_skips_junk_values() {
        let records = vec![
            record("WA", "KIA", "2019"),
            record("WA", "KIA", "2023"),
            record("WA", "KIA", "n/a"),
        ];
        assert_eq!(latest_model_year(&records), Some(2023));

        let junk = vec![record("WA", "KIA", ""), record("WA", "KIA", "soon")];
        assert_eq!(latest_model_year(&junk), None);
    }

    #[test]
    fn format_count_inserts_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
