use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::loader::parse_count;
use super::model::{AggregateRow, SightingRecord};
use super::province::{compare_provinces, sort_provinces};
use crate::error::MissingFieldError;

// ---------------------------------------------------------------------------
// Grouping configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingMode {
    Province,
    #[default]
    ProvinceAndSpecies,
}

/// Which value is summed per group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountField {
    /// The loader's individual-count column.
    #[default]
    IndividualCount,
    /// Another numeric column, looked up in the record attributes.
    Attribute(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Grouping {
    pub mode: GroupingMode,
    pub count: CountField,
}

#[cfg(test)]
impl Grouping {
    pub fn by_province() -> Self {
        Self {
            mode: GroupingMode::Province,
            count: CountField::IndividualCount,
        }
    }

    pub fn by_province_and_species() -> Self {
        Self {
            mode: GroupingMode::ProvinceAndSpecies,
            count: CountField::IndividualCount,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Sum the count field over every record sharing the grouping key.
///
/// Records with a blank province (or a blank species when grouping by
/// species) belong to no group and are left out, with one warning for the
/// lot. Rows come out in the order each key first appears; use [`sort_rows`]
/// for a presentation order.
pub fn aggregate(
    records: &[SightingRecord],
    grouping: &Grouping,
) -> Result<Vec<AggregateRow>, MissingFieldError> {
    let mut index: HashMap<(&str, Option<&str>), usize> = HashMap::new();
    let mut rows: Vec<AggregateRow> = Vec::new();
    let mut skipped = 0usize;

    for (i, record) in records.iter().enumerate() {
        let species = match grouping.mode {
            GroupingMode::Province => None,
            GroupingMode::ProvinceAndSpecies => Some(record.species.as_str()),
        };
        if record.province.is_empty() || species.is_some_and(str::is_empty) {
            skipped += 1;
            continue;
        }
        let count = count_of(record, &grouping.count, i + 1)?;

        let slot = *index
            .entry((record.province.as_str(), species))
            .or_insert_with(|| {
                rows.push(AggregateRow {
                    province: record.province.clone(),
                    species: species.map(str::to_string),
                    total_count: 0,
                });
                rows.len() - 1
            });
        rows[slot].total_count += u64::from(count);
    }

    if skipped > 0 {
        log::warn!("{skipped} record(s) with a blank grouping field left out of the totals");
    }

    Ok(rows)
}

fn count_of(record: &SightingRecord, field: &CountField, row: usize) -> Result<u32, MissingFieldError> {
    match field {
        CountField::IndividualCount => Ok(record.individual_count),
        CountField::Attribute(name) => {
            let raw = record
                .attributes
                .get(name)
                .ok_or_else(|| MissingFieldError::Column {
                    field: name.clone(),
                    row,
                })?;
            if raw.is_empty() {
                return Ok(0);
            }
            parse_count(raw).ok_or_else(|| MissingFieldError::NotNumeric {
                field: name.clone(),
                row,
                value: raw.clone(),
            })
        }
    }
}

/// Distinct provinces of `rows`, accent-aware sorted, for the selector.
pub fn province_options(rows: &[AggregateRow]) -> Vec<String> {
    let mut names: Vec<String> = rows.iter().map(|r| r.province.clone()).collect();
    sort_provinces(&mut names);
    names.dedup();
    names
}

/// Order rows by province (accent-aware), then species.
pub fn sort_rows(rows: &mut [AggregateRow]) {
    rows.sort_by(|a, b| {
        compare_provinces(&a.province, &b.province).then_with(|| a.species.cmp(&b.species))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(province: &str, species: &str, count: u32) -> SightingRecord {
        SightingRecord::new(province, species, count)
    }

    fn sample() -> Vec<SightingRecord> {
        vec![
            rec("Limón", "Puma concolor", 3),
            rec("Heredia", "Puma concolor", 5),
            rec("Limón", "Puma concolor", 2),
            rec("Limón", "Puma yagouaroundi", 1),
            rec("Alajuela", "Puma concolor", 0),
        ]
    }

    #[test]
    fn test_groups_by_province() {
        let rows = aggregate(&sample(), &Grouping::by_province()).unwrap();
        let pairs: Vec<(&str, u64)> = rows
            .iter()
            .map(|r| (r.province.as_str(), r.total_count))
            .collect();
        assert_eq!(pairs, [("Limón", 6), ("Heredia", 5), ("Alajuela", 0)]);
        assert!(rows.iter().all(|r| r.species.is_none()));
    }

    #[test]
    fn test_groups_by_province_and_species() {
        let rows = aggregate(&sample(), &Grouping::by_province_and_species()).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            AggregateRow {
                province: "Limón".into(),
                species: Some("Puma concolor".into()),
                total_count: 5,
            }
        );
        assert_eq!(rows[2].species.as_deref(), Some("Puma yagouaroundi"));
        assert_eq!(rows[2].total_count, 1);
    }

    #[test]
    fn test_totals_conserve_counts() {
        let records = sample();
        let input: u64 = records.iter().map(|r| u64::from(r.individual_count)).sum();
        for grouping in [Grouping::by_province(), Grouping::by_province_and_species()] {
            let rows = aggregate(&records, &grouping).unwrap();
            let output: u64 = rows.iter().map(|r| r.total_count).sum();
            assert_eq!(input, output);

            for row in &rows {
                let expected: u64 = records
                    .iter()
                    .filter(|r| r.province == row.province)
                    .filter(|r| row.species.as_deref().map_or(true, |s| s == r.species))
                    .map(|r| u64::from(r.individual_count))
                    .sum();
                assert_eq!(row.total_count, expected);
            }
        }
    }

    #[test]
    fn test_empty_input() {
        let rows = aggregate(&[], &Grouping::default()).unwrap();
        assert!(rows.is_empty());
        assert!(province_options(&rows).is_empty());
    }

    #[test]
    fn test_blank_grouping_field_is_skipped() {
        let records = vec![
            rec("Heredia", "Puma concolor", 1),
            rec("Heredia", "", 2),
            rec("", "Puma concolor", 4),
        ];

        let rows = aggregate(&records, &Grouping::by_province()).unwrap();
        assert_eq!(
            rows,
            [AggregateRow {
                province: "Heredia".into(),
                species: None,
                total_count: 3,
            }]
        );

        let rows = aggregate(&records, &Grouping::by_province_and_species()).unwrap();
        assert_eq!(
            rows,
            [AggregateRow {
                province: "Heredia".into(),
                species: Some("Puma concolor".into()),
                total_count: 1,
            }]
        );
    }

    #[test]
    fn test_attribute_count_field() {
        let mut a = rec("Cartago", "Puma concolor", 1);
        a.attributes.insert("organismQuantity".into(), "4".into());
        let mut b = rec("Cartago", "Puma concolor", 1);
        b.attributes.insert("organismQuantity".into(), "".into());
        let grouping = Grouping {
            mode: GroupingMode::Province,
            count: CountField::Attribute("organismQuantity".into()),
        };

        let rows = aggregate(&[a.clone(), b], &grouping).unwrap();
        assert_eq!(rows[0].total_count, 4);

        let c = rec("Cartago", "Puma concolor", 1);
        assert_eq!(
            aggregate(&[a.clone(), c], &grouping),
            Err(MissingFieldError::Column {
                field: "organismQuantity".into(),
                row: 2
            })
        );

        let mut d = rec("Cartago", "Puma concolor", 1);
        d.attributes.insert("organismQuantity".into(), "few".into());
        assert!(matches!(
            aggregate(&[d], &grouping),
            Err(MissingFieldError::NotNumeric { row: 1, .. })
        ));
    }

    #[test]
    fn test_province_options_sorted_and_distinct() {
        let records = vec![
            rec("San José", "Puma concolor", 1),
            rec("Alajuela", "Puma concolor", 1),
            rec("Limón", "Puma concolor", 1),
            rec("Limón", "Puma yagouaroundi", 1),
        ];
        let rows = aggregate(&records, &Grouping::by_province_and_species()).unwrap();
        assert_eq!(province_options(&rows), ["Alajuela", "Limón", "San José"]);
    }

    #[test]
    fn test_sort_rows() {
        let mut rows = aggregate(&sample(), &Grouping::by_province_and_species()).unwrap();
        sort_rows(&mut rows);
        let keys: Vec<(&str, Option<&str>)> = rows
            .iter()
            .map(|r| (r.province.as_str(), r.species.as_deref()))
            .collect();
        assert_eq!(
            keys,
            [
                ("Alajuela", Some("Puma concolor")),
                ("Heredia", Some("Puma concolor")),
                ("Limón", Some("Puma concolor")),
                ("Limón", Some("Puma yagouaroundi")),
            ]
        );
    }
}
