use super::model::{EvDataset, EvRecord, FilterCriteria, FilterKey};

// ---------------------------------------------------------------------------
// Filter predicate: does one record satisfy the current criteria?
// ---------------------------------------------------------------------------

/// True when `record` satisfies every active constraint in `criteria`.
///
/// * Non-empty `search` matches when ANY of the ten fields contains the
///   search text, case-insensitively. Empty fields never match.
/// * Each non-empty exact-match key requires the corresponding field to equal
///   the criteria value exactly (case-sensitive, no partial match).
///
/// Pure function of its two inputs. Adding a constraint can only shrink the
/// matched set, never grow it.
pub fn matches(record: &EvRecord, criteria: &FilterCriteria) -> bool {
    if !criteria.search.is_empty() {
        let needle = criteria.search.to_lowercase();
        let hit = record
            .fields()
            .iter()
            .any(|value| !value.is_empty() && value.to_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }

    FilterKey::SELECTABLE.into_iter().all(|key| {
        let wanted = criteria.get(key);
        wanted.is_empty() || record.field(key) == wanted
    })
}

// ---------------------------------------------------------------------------
// Filter engine: criteria applied across the whole store
// ---------------------------------------------------------------------------

/// Return indices of records passing the current criteria.
///
/// Single pass in load order, so the filtered sequence preserves the
/// original relative order of matching records. An empty result (no matches,
/// or an empty store) is a valid outcome, not an error.
pub fn filtered_indices(dataset: &EvDataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| matches(rec, criteria))
        .map(|(i, _)| i)
        .collect()
}
