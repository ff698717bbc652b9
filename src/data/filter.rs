use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{AggregateRow, SightingRecord};
use super::province::normalize_province;

// ---------------------------------------------------------------------------
// Selection: which province the dashboard is narrowed to
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Sentinel: every province.
    #[default]
    All,
    Province(String),
}

impl Selection {
    /// Select one province; the name goes through the same normalization as
    /// the data, so `"Limon"` selects `"Limón"`.
    pub fn province(name: &str) -> Self {
        Selection::Province(normalize_province(name))
    }

    pub fn matches(&self, province: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Province(p) => p == province,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "All provinces"),
            Selection::Province(p) => write!(f, "{p}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Records and aggregates narrowed to one selection. Borrowed when nothing
/// was filtered out.
#[derive(Debug, Clone)]
pub struct Filtered<'a> {
    pub records: Cow<'a, [SightingRecord]>,
    pub aggregates: Cow<'a, [AggregateRow]>,
}

/// Keep the rows of both datasets whose province equals the selection.
///
/// `Selection::All` hands the inputs back untouched. A province without rows
/// yields two empty sequences.
pub fn filter_by_province<'a>(
    records: &'a [SightingRecord],
    aggregates: &'a [AggregateRow],
    selection: &Selection,
) -> Filtered<'a> {
    match selection {
        Selection::All => Filtered {
            records: Cow::Borrowed(records),
            aggregates: Cow::Borrowed(aggregates),
        },
        Selection::Province(_) => Filtered {
            records: Cow::Owned(
                records
                    .iter()
                    .filter(|r| selection.matches(&r.province))
                    .cloned()
                    .collect(),
            ),
            aggregates: Cow::Owned(
                aggregates
                    .iter()
                    .filter(|a| selection.matches(&a.province))
                    .cloned()
                    .collect(),
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<SightingRecord> {
        vec![
            SightingRecord::new("Limón", "Puma concolor", 3),
            SightingRecord::new("Heredia", "Puma concolor", 5),
            SightingRecord::new("Heredia", "Puma concolor", 1),
        ]
    }

    fn aggregates() -> Vec<AggregateRow> {
        vec![
            AggregateRow {
                province: "Limón".into(),
                species: None,
                total_count: 3,
            },
            AggregateRow {
                province: "Heredia".into(),
                species: None,
                total_count: 6,
            },
        ]
    }

    #[test]
    fn test_all_is_identity() {
        let (r, a) = (records(), aggregates());
        let out = filter_by_province(&r, &a, &Selection::All);
        assert!(matches!(out.records, Cow::Borrowed(_)));
        assert!(matches!(out.aggregates, Cow::Borrowed(_)));
        assert_eq!(&*out.records, &r[..]);
        assert_eq!(&*out.aggregates, &a[..]);
    }

    #[test]
    fn test_single_province() {
        let (r, a) = (records(), aggregates());
        let out = filter_by_province(&r, &a, &Selection::province("Heredia"));
        assert_eq!(out.records.len(), 2);
        assert!(out.records.iter().all(|r| r.province == "Heredia"));
        assert_eq!(out.aggregates.len(), 1);
        assert_eq!(out.aggregates[0].total_count, 6);
    }

    #[test]
    fn test_unaccented_selection_is_normalized() {
        let (r, a) = (records(), aggregates());
        let out = filter_by_province(&r, &a, &Selection::province("Limon"));
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.aggregates[0].province, "Limón");
    }

    #[test]
    fn test_unknown_province_is_empty() {
        let (r, a) = (records(), aggregates());
        let out = filter_by_province(&r, &a, &Selection::province("Atlantis"));
        assert!(out.records.is_empty());
        assert!(out.aggregates.is_empty());
    }

    #[test]
    fn test_selection_display() {
        assert_eq!(Selection::All.to_string(), "All provinces");
        assert_eq!(Selection::province("San Jose").to_string(), "San José");
    }
}
