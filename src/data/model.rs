use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// EvRecord – one row of the registration dataset
// ---------------------------------------------------------------------------

/// A single EV registration record.
///
/// All ten fields are plain strings, exactly as they appear in the source
/// dataset. Missing cells deserialize to empty strings (`serde(default)`),
/// never to nulls. The serde renames match the source column headers so a
/// loaded record serializes back under the original headers on export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvRecord {
    #[serde(rename = "VIN (1-10)", default)]
    pub vin_prefix: String,
    #[serde(rename = "County", default)]
    pub county: String,
    #[serde(rename = "City", default)]
    pub city: String,
    #[serde(rename = "State", default)]
    pub state: String,
    #[serde(rename = "Postal Code", default)]
    pub postal_code: String,
    /// String-encoded integer, kept as text: ordering on this field is
    /// lexicographic everywhere in the pipeline.
    #[serde(rename = "Model Year", default)]
    pub model_year: String,
    #[serde(rename = "Make", default)]
    pub make: String,
    #[serde(rename = "Model", default)]
    pub model: String,
    #[serde(rename = "Electric Vehicle Type", default)]
    pub ev_type: String,
    #[serde(rename = "Clean Alternative Fuel Vehicle (CAFV) Eligibility", default)]
    pub cafv_eligibility: String,
}

impl EvRecord {
    /// The field an exact-match filter key compares against.
    pub fn field(&self, key: FilterKey) -> &str {
        match key {
            FilterKey::Search => "",
            FilterKey::State => &self.state,
            FilterKey::County => &self.county,
            FilterKey::City => &self.city,
            FilterKey::Make => &self.make,
            FilterKey::Model => &self.model,
            FilterKey::Year => &self.model_year,
            FilterKey::EvType => &self.ev_type,
            FilterKey::CafvEligibility => &self.cafv_eligibility,
        }
    }

    /// All ten field values, for the free-text search predicate.
    pub fn fields(&self) -> [&str; 10] {
        [
            &self.vin_prefix,
            &self.county,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.model_year,
            &self.make,
            &self.model,
            &self.ev_type,
            &self.cafv_eligibility,
        ]
    }
}

// ---------------------------------------------------------------------------
// FilterKey – the nine recognized filter criteria
// ---------------------------------------------------------------------------

/// A filter criteria key. `Search` is free text over every field; the other
/// eight select an exact value of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Search,
    State,
    County,
    City,
    Make,
    Model,
    Year,
    EvType,
    CafvEligibility,
}

/// Raised when a criteria update names a key outside the nine recognized ones.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized filter key `{0}`")]
pub struct UnknownFilterKey(pub String);

impl FilterKey {
    /// Every key, in criteria order.
    pub const ALL: [FilterKey; 9] = [
        FilterKey::Search,
        FilterKey::State,
        FilterKey::County,
        FilterKey::City,
        FilterKey::Make,
        FilterKey::Model,
        FilterKey::Year,
        FilterKey::EvType,
        FilterKey::CafvEligibility,
    ];

    /// The eight keys that carry a dropdown option list (search has none).
    pub const SELECTABLE: [FilterKey; 8] = [
        FilterKey::State,
        FilterKey::County,
        FilterKey::City,
        FilterKey::Make,
        FilterKey::Model,
        FilterKey::Year,
        FilterKey::EvType,
        FilterKey::CafvEligibility,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::Search => "search",
            FilterKey::State => "state",
            FilterKey::County => "county",
            FilterKey::City => "city",
            FilterKey::Make => "make",
            FilterKey::Model => "model",
            FilterKey::Year => "year",
            FilterKey::EvType => "evType",
            FilterKey::CafvEligibility => "cafvEligibility",
        }
    }

    /// Human-readable label for filter widgets.
    pub fn label(self) -> &'static str {
        match self {
            FilterKey::Search => "Search",
            FilterKey::State => "State",
            FilterKey::County => "County",
            FilterKey::City => "City",
            FilterKey::Make => "Make",
            FilterKey::Model => "Model",
            FilterKey::Year => "Year",
            FilterKey::EvType => "EV Type",
            FilterKey::CafvEligibility => "CAFV Eligibility",
        }
    }
}

impl FromStr for FilterKey {
    type Err = UnknownFilterKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownFilterKey(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria – current constraints, one string per key
// ---------------------------------------------------------------------------

/// The active filter constraints. An empty string means "no constraint on
/// this key". Plain value type: session state owns one and replaces fields
/// through [`FilterCriteria::set`]; `Default` is the cleared state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub state: String,
    pub county: String,
    pub city: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub ev_type: String,
    pub cafv_eligibility: String,
}

impl FilterCriteria {
    pub fn get(&self, key: FilterKey) -> &str {
        match key {
            FilterKey::Search => &self.search,
            FilterKey::State => &self.state,
            FilterKey::County => &self.county,
            FilterKey::City => &self.city,
            FilterKey::Make => &self.make,
            FilterKey::Model => &self.model,
            FilterKey::Year => &self.year,
            FilterKey::EvType => &self.ev_type,
            FilterKey::CafvEligibility => &self.cafv_eligibility,
        }
    }

    pub fn set(&mut self, key: FilterKey, value: String) {
        match key {
            FilterKey::Search => self.search = value,
            FilterKey::State => self.state = value,
            FilterKey::County => self.county = value,
            FilterKey::City => self.city = value,
            FilterKey::Make => self.make = value,
            FilterKey::Model => self.model = value,
            FilterKey::Year => self.year = value,
            FilterKey::EvType => self.ev_type = value,
            FilterKey::CafvEligibility => self.cafv_eligibility = value,
        }
    }

    /// True when no key carries a constraint.
    pub fn is_empty(&self) -> bool {
        FilterKey::ALL.into_iter().all(|key| self.get(key).is_empty())
    }

    /// Number of keys carrying a constraint, for the filter-panel badge.
    pub fn active_count(&self) -> usize {
        FilterKey::ALL
            .into_iter()
            .filter(|&key| !self.get(key).is_empty())
            .count()
    }
}

// ---------------------------------------------------------------------------
// FilterOptions – distinct values per selectable field
// ---------------------------------------------------------------------------

/// Dropdown option lists: for each selectable field, the distinct non-empty
/// values present in the full dataset, lexicographically sorted. Derived from
/// the record store only — the current filter criteria never shrink or
/// reorder these lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub states: Vec<String>,
    pub counties: Vec<String>,
    pub cities: Vec<String>,
    pub makes: Vec<String>,
    pub models: Vec<String>,
    /// Year strings sort lexicographically, same as every other field.
    pub years: Vec<String>,
    pub ev_types: Vec<String>,
    pub cafv_eligibilities: Vec<String>,
}

impl FilterOptions {
    /// Collect the distinct sorted values of every selectable field.
    pub fn from_records(records: &[EvRecord]) -> Self {
        let mut states = BTreeSet::new();
        let mut counties = BTreeSet::new();
        let mut cities = BTreeSet::new();
        let mut makes = BTreeSet::new();
        let mut models = BTreeSet::new();
        let mut years = BTreeSet::new();
        let mut ev_types = BTreeSet::new();
        let mut cafv_eligibilities = BTreeSet::new();

        for rec in records {
            let columns: [(&mut BTreeSet<String>, &str); 8] = [
                (&mut states, &rec.state),
                (&mut counties, &rec.county),
                (&mut cities, &rec.city),
                (&mut makes, &rec.make),
                (&mut models, &rec.model),
                (&mut years, &rec.model_year),
                (&mut ev_types, &rec.ev_type),
                (&mut cafv_eligibilities, &rec.cafv_eligibility),
            ];
            for (set, value) in columns {
                if !value.is_empty() {
                    set.insert(value.to_string());
                }
            }
        }

        FilterOptions {
            states: states.into_iter().collect(),
            counties: counties.into_iter().collect(),
            cities: cities.into_iter().collect(),
            makes: makes.into_iter().collect(),
            models: models.into_iter().collect(),
            years: years.into_iter().collect(),
            ev_types: ev_types.into_iter().collect(),
            cafv_eligibilities: cafv_eligibilities.into_iter().collect(),
        }
    }

    /// Option list for a selectable key; empty for `Search`.
    pub fn for_key(&self, key: FilterKey) -> &[String] {
        match key {
            FilterKey::Search => &[],
            FilterKey::State => &self.states,
            FilterKey::County => &self.counties,
            FilterKey::City => &self.cities,
            FilterKey::Make => &self.makes,
            FilterKey::Model => &self.models,
            FilterKey::Year => &self.years,
            FilterKey::EvType => &self.ev_types,
            FilterKey::CafvEligibility => &self.cafv_eligibilities,
        }
    }
}

// ---------------------------------------------------------------------------
// EvDataset – the complete loaded record store
// ---------------------------------------------------------------------------

/// The full loaded dataset with its pre-computed option lists.
///
/// Built once per load and treated as read-only afterwards; everything
/// downstream (filtered indices, chart bundle, insights) is rederived from it.
#[derive(Debug, Clone)]
pub struct EvDataset {
    /// All records, in load order.
    pub records: Vec<EvRecord>,
    /// Distinct sorted values per selectable field.
    pub options: FilterOptions,
}

impl EvDataset {
    /// Build the store and its option index from loaded records.
    pub fn from_records(records: Vec<EvRecord>) -> Self {
        let options = FilterOptions::from_records(&records);
        EvDataset { records, options }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
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

    #[test]
    fn filter_key_round_trips_through_strings() {
        for key in FilterKey::ALL {
            assert_eq!(key.as_str().parse::<FilterKey>(), Ok(key));
        }
    }

    #[test]
    fn unknown_filter_key_is_rejected() {
        let err = "postalCode".parse::<FilterKey>().unwrap_err();
        assert_eq!(err, UnknownFilterKey("postalCode".to_string()));
    }

    #[test]
    fn criteria_set_and_clear() {
        let mut criteria = FilterCriteria::default();
        assert!(criteria.is_empty());

        criteria.set(FilterKey::Make, "TESLA".to_string());
        criteria.set(FilterKey::Search, "seattle".to_string());
        assert_eq!(criteria.get(FilterKey::Make), "TESLA");
        assert_eq!(criteria.active_count(), 2);

        criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(criteria.active_count(), 0);
    }

    #[test]
    fn options_drop_empty_values_and_sort() {
        let records = vec![
            record("Tacoma", "WA", "NISSAN", "2019"),
            record("", "WA", "TESLA", "2021"),
            record("Seattle", "OR", "", "2020"),
        ];
        let options = FilterOptions::from_records(&records);

        assert_eq!(options.cities, vec!["Seattle", "Tacoma"]);
        assert_eq!(options.states, vec!["OR", "WA"]);
        assert_eq!(options.makes, vec!["NISSAN", "TESLA"]);
    }

    #[test]
    fn year_options_sort_lexicographically_not_numerically() {
        // Intentional: "9" sorts after "2105" under string ordering, and the
        // rest of the pipeline relies on the same ordering.
        let records = vec![
            record("a", "WA", "KIA", "9"),
            record("b", "WA", "KIA", "2105"),
            record("c", "WA", "KIA", "2020"),
            record("d", "WA", "KIA", "2019"),
        ];
        let options = FilterOptions::from_records(&records);
        assert_eq!(options.years, vec!["2019", "2020", "2105", "9"]);
    }

    #[test]
    fn options_are_idempotent_on_unchanged_records() {
        let records = vec![
            record("Seattle", "WA", "TESLA", "2021"),
            record("Tacoma", "WA", "NISSAN", "2019"),
        ];
        let first = FilterOptions::from_records(&records);
        let second = FilterOptions::from_records(&records);
        assert_eq!(first, second);
    }

    #[test]
    fn dataset_builds_option_index_once() {
        let dataset = EvDataset::from_records(vec![
            record("Seattle", "WA", "TESLA", "2021"),
            record("Tacoma", "WA", "NISSAN", "2019"),
        ]);
        assert_eq!(dataset.len(), 2);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.options.cities, vec!["Seattle", "Tacoma"]);
    }
}
