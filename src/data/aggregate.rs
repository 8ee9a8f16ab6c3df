use std::collections::HashMap;

use super::model::EvRecord;

const TOP_CITY_COUNT: usize = 10;
const TOP_MAKE_COUNT: usize = 8;

// ---------------------------------------------------------------------------
// Summary entries
// ---------------------------------------------------------------------------

/// One grouped count: the grouping key exactly as it appears in the source
/// field (no normalization), and how many filtered records carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountEntry {
    pub name: String,
    pub value: u64,
}

/// One point of the model-year series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearEntry {
    pub year: String,
    pub count: u64,
}

// ---------------------------------------------------------------------------
// ChartBundle – the six summaries driving charts and cards
// ---------------------------------------------------------------------------

/// The six grouped summaries derived from one filtered sequence. They are
/// mutually independent and always recomputed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartBundle {
    /// Per-city counts, descending by count, truncated to the top 10.
    pub top_cities: Vec<CountEntry>,
    /// Per-state counts, descending by count, untruncated.
    pub state_data: Vec<CountEntry>,
    /// Per-make counts, descending by count, truncated to the top 8.
    pub make_data: Vec<CountEntry>,
    /// Per-model-year counts, ascending by year STRING (lexicographic, to
    /// match the option-list ordering), untruncated.
    pub year_data: Vec<YearEntry>,
    /// Per-EV-type counts in first-seen order, untruncated.
    pub ev_type_data: Vec<CountEntry>,
    /// Per-CAFV-eligibility counts in first-seen order, untruncated.
    pub cafv_data: Vec<CountEntry>,
}

/// Count records per distinct non-empty value of one field.
///
/// Entries come out in first-seen order. The count-sorted summaries rely on
/// that plus a stable sort: equal counts keep first-encountered order rather
/// than gaining an alphabetical tie-break.
fn count_groups<'a, F>(rows: &[&'a EvRecord], key: F) -> Vec<CountEntry>
where
    F: Fn(&'a EvRecord) -> &'a str,
{
    let mut counts: HashMap<&str, u64> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for &rec in rows {
        let value = key(rec);
        if value.is_empty() {
            continue;
        }
        *counts.entry(value).or_insert_with(|| {
            order.push(value);
            0
        }) += 1;
    }

    order
        .into_iter()
        .map(|name| CountEntry {
            name: name.to_string(),
            value: counts[name],
        })
        .collect()
}

/// Compute the six summaries from the filtered sequence.
///
/// Each summary is an independent group-count over the same rows; an empty
/// input produces an empty bundle, never an error.
pub fn build_charts<'a, I>(filtered: I) -> ChartBundle
where
    I: IntoIterator<Item = &'a EvRecord>,
{
    let rows: Vec<&EvRecord> = filtered.into_iter().collect();

    let mut top_cities = count_groups(&rows, |r| r.city.as_str());
    top_cities.sort_by(|a, b| b.value.cmp(&a.value));
    top_cities.truncate(TOP_CITY_COUNT);

    let mut state_data = count_groups(&rows, |r| r.state.as_str());
    state_data.sort_by(|a, b| b.value.cmp(&a.value));

    let mut make_data = count_groups(&rows, |r| r.make.as_str());
    make_data.sort_by(|a, b| b.value.cmp(&a.value));
    make_data.truncate(TOP_MAKE_COUNT);

    let mut year_data: Vec<YearEntry> = count_groups(&rows, |r| r.model_year.as_str())
        .into_iter()
        .map(|entry| YearEntry {
            year: entry.name,
            count: entry.value,
        })
        .collect();
    year_data.sort_by(|a, b| a.year.cmp(&b.year));

    let ev_type_data = count_groups(&rows, |r| r.ev_type.as_str());
    let cafv_data = count_groups(&rows, |r| r.cafv_eligibility.as_str());

    ChartBundle {
        top_cities,
        state_data,
        make_data,
        year_data,
        ev_type_data,
        cafv_data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city: &str, state: &str, make: &str, year: &str) -> EvRecord {
        EvRecord {
            city: city.to_string(),
            state: state.to_string(),
            make: make.to_string(),
            model_year: year.to_string(),
            ..EvRecord::default()
        }
    }

    fn entry(name: &str, value: u64) -> CountEntry {
        CountEntry {
            name: name.to_string(),
            value,
        }
    }

    fn year(year: &str, count: u64) -> YearEntry {
        YearEntry {
            year: year.to_string(),
            count,
        }
    }

    #[test]
    fn seattle_tacoma_reference_bundle() {
        let records = vec![
            record("Seattle", "WA", "TESLA", "2021"),
            record("Seattle", "WA", "NISSAN", "2019"),
            record("Tacoma", "WA", "TESLA", "2022"),
        ];
        let bundle = build_charts(&records);

        assert_eq!(bundle.state_data, vec![entry("WA", 3)]);
        assert_eq!(bundle.make_data, vec![entry("TESLA", 2), entry("NISSAN", 1)]);
        assert_eq!(bundle.top_cities, vec![entry("Seattle", 2), entry("Tacoma", 1)]);
        assert_eq!(
            bundle.year_data,
            vec![year("2019", 1), year("2021", 1), year("2022", 1)]
        );
    }

    #[test]
    fn empty_group_keys_are_dropped() {
        let records = vec![
            record("", "WA", "", ""),
            record("Seattle", "", "TESLA", "2021"),
        ];
        let bundle = build_charts(&records);

        assert_eq!(bundle.top_cities, vec![entry("Seattle", 1)]);
        assert_eq!(bundle.state_data, vec![entry("WA", 1)]);
        assert_eq!(bundle.make_data, vec![entry("TESLA", 1)]);
        assert_eq!(bundle.year_data, vec![year("2021", 1)]);
    }

    #[test]
    fn equal_counts_keep_first_seen_order() {
        // Zulu appears before Alpha in the input; the descending sort is
        // stable, so the tie stays in encounter order.
        let records = vec![
            record("Zulu", "WA", "KIA", "2020"),
            record("Alpha", "WA", "KIA", "2020"),
        ];
        let bundle = build_charts(&records);
        assert_eq!(bundle.top_cities, vec![entry("Zulu", 1), entry("Alpha", 1)]);
    }

    #[test]
    fn top_cities_truncates_to_ten_dominant_entries() {
        let mut records = Vec::new();
        // Twelve cities; city N contributes N records.
        for n in 1..=12 {
            for _ in 0..n {
                records.push(record(&format!("City{n:02}"), "WA", "KIA", "2020"));
            }
        }
        let bundle = build_charts(&records);

        assert_eq!(bundle.top_cities.len(), 10);
        let kept_min = bundle.top_cities.iter().map(|e| e.value).min().unwrap();
        // City01 and City02 were cut; everything kept outranks them.
        assert!(bundle.top_cities.iter().all(|e| e.name != "City01" && e.name != "City02"));
        assert!(kept_min >= 2);
    }

    #[test]
    fn make_distribution_accounts_for_every_record_when_untruncated() {
        let records = vec![
            record("a", "WA", "TESLA", "2021"),
            record("b", "WA", "TESLA", "2021"),
            record("c", "WA", "NISSAN", "2019"),
            record("d", "WA", "KIA", "2020"),
        ];
        let bundle = build_charts(&records);

        let total: u64 = bundle.make_data.iter().map(|e| e.value).sum();
        assert_eq!(total, records.len() as u64);
    }

    #[test]
    fn make_data_truncates_to_eight() {
        let records: Vec<EvRecord> = (0..11)
            .map(|n| record("a", "WA", &format!("MAKE{n:02}"), "2020"))
            .collect();
        let bundle = build_charts(&records);

        assert_eq!(bundle.make_data.len(), 8);
        let kept: u64 = bundle.make_data.iter().map(|e| e.value).sum();
        assert!(kept <= records.len() as u64);
    }

    #[test]
    fn year_series_sorts_by_string_comparison() {
        // "9" lands after "2105": the ordering is lexicographic on purpose.
        let records = vec![
            record("a", "WA", "KIA", "2105"),
            record("b", "WA", "KIA", "9"),
            record("c", "WA", "KIA", "2019"),
            record("d", "WA", "KIA", "2019"),
        ];
        let bundle = build_charts(&records);
        assert_eq!(
            bundle.year_data,
            vec![year("2019", 2), year("2105", 1), year("9", 1)]
        );
    }

    #[test]
    fn unsorted_summaries_keep_first_seen_order() {
        let mut phev = record("a", "WA", "TOYOTA", "2020");
        phev.ev_type = "Plug-in Hybrid Electric Vehicle (PHEV)".to_string();
        let mut bev = record("b", "WA", "TESLA", "2021");
        bev.ev_type = "Battery Electric Vehicle (BEV)".to_string();
        let mut bev2 = record("c", "WA", "TESLA", "2021");
        bev2.ev_type = "Battery Electric Vehicle (BEV)".to_string();

        let records = vec![phev, bev, bev2];
        let bundle = build_charts(&records);

        assert_eq!(
            bundle.ev_type_data,
            vec![
                entry("Plug-in Hybrid Electric Vehicle (PHEV)", 1),
                entry("Battery Electric Vehicle (BEV)", 2),
            ]
        );
    }

    #[test]
    fn empty_input_yields_an_empty_bundle() {
        let bundle = build_charts(&Vec::new());
        assert_eq!(bundle, ChartBundle::default());
    }
}
