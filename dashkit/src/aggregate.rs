// dashkit/src/aggregate.rs
//
// Group-and-count helpers shared by every panel
//

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Field, Record};

pub const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    pub value: String,
    pub count: usize,
}

impl Count {
    pub fn new(value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Group by `field` and count, most frequent first.
///
/// Absent values are skipped. Equal counts keep the order in which their
/// value was first encountered.
pub fn count_by<'a, I>(records: I, field: Field) -> Vec<Count>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<Count> = Vec::new();

    for value in records.into_iter().filter_map(|r| r.field(field)) {
        match slots.get(value) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                slots.insert(value, counts.len());
                counts.push(Count::new(value, 1));
            }
        }
    }

    // stable: ties stay in insertion order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn top_n(mut counts: Vec<Count>, n: usize) -> Vec<Count> {
    counts.truncate(n);
    counts
}

/// Earliest and latest date among dated records, `None` if nothing is dated.
pub fn date_bounds<'a, I>(records: I) -> Option<(NaiveDate, NaiveDate)>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter_map(|r| r.date)
        .fold(None, |bounds, date| match bounds {
            None => Some((date, date)),
            Some((lo, hi)) => Some((lo.min(date), hi.max(date))),
        })
}

/// Per-day counts of dated records, ascending by date. Days without
/// records are omitted.
pub fn bin_by_day<'a, I>(records: I) -> Vec<(NaiveDate, usize)>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut bins: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for date in records.into_iter().filter_map(|r| r.date) {
        *bins.entry(date).or_insert(0) += 1;
    }
    bins.into_iter().collect()
}

pub fn bin_by_hour<'a, I>(records: I) -> [usize; HOURS_PER_DAY]
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut bins = [0usize; HOURS_PER_DAY];
    for hour in records.into_iter().filter_map(|r| r.hour) {
        if let Some(slot) = bins.get_mut(hour as usize) {
            *slot += 1;
        }
    }
    bins
}

/// Distinct present values, sorted ascending. Feeds the dropdown options.
pub fn distinct_values<'a, I>(records: I, field: Field) -> Vec<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter_map(|r| r.field(field))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn distinct_count<'a, I>(records: I, field: Field) -> usize
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter_map(|r| r.field(field))
        .collect::<BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(value: &str) -> Record {
        Record {
            activity: Some(value.to_string()),
            ..Default::default()
        }
    }

    fn dated(y: i32, m: u32, d: u32) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(y, m, d),
            ..Default::default()
        }
    }

    #[test]
    fn test_count_by_sorts_descending() {
        let records = vec![activity("tail"), activity("tail"), activity("bribe")];

        assert_eq!(
            count_by(&records, Field::Activity),
            vec![Count::new("tail", 2), Count::new("bribe", 1)]
        );
    }

    #[test]
    fn test_count_by_skips_absent_and_keeps_tie_order() {
        let records = vec![
            activity("rope"),
            Record::default(),
            activity("shadow"),
            activity("shadow"),
            activity("rope"),
            activity("interview"),
        ];

        assert_eq!(
            count_by(&records, Field::Activity),
            vec![
                Count::new("rope", 2),
                Count::new("shadow", 2),
                Count::new("interview", 1),
            ]
        );
    }

    #[test]
    fn test_top_n_truncates() {
        let counts = vec![Count::new("a", 3), Count::new("b", 2), Count::new("c", 1)];

        assert_eq!(top_n(counts.clone(), 2).len(), 2);
        assert_eq!(top_n(counts, 10).len(), 3);
    }

    #[test]
    fn test_date_bounds() {
        let records = vec![dated(1907, 5, 2), Record::default(), dated(1907, 1, 9), dated(1907, 3, 1)];

        assert_eq!(
            date_bounds(&records),
            Some((
                NaiveDate::from_ymd_opt(1907, 1, 9).unwrap(),
                NaiveDate::from_ymd_opt(1907, 5, 2).unwrap()
            ))
        );
        assert_eq!(date_bounds(&[Record::default()]), None);
    }

    #[test]
    fn test_bin_by_day_and_hour() {
        let mut late = dated(1907, 1, 2);
        late.hour = Some(23);
        let mut early = dated(1907, 1, 1);
        early.hour = Some(6);
        let records = vec![late.clone(), early, late, Record::default()];

        let days = bin_by_day(&records);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0], (NaiveDate::from_ymd_opt(1907, 1, 1).unwrap(), 1));
        assert_eq!(days[1].1, 2);

        let hours = bin_by_hour(&records);
        assert_eq!(hours[6], 1);
        assert_eq!(hours[23], 2);
        assert_eq!(hours.iter().sum::<usize>(), 3);
    }

    #[test]
    fn test_distinct_values_sorted() {
        let records = vec![activity("tail"), activity("bribe"), activity("tail"), Record::default()];

        assert_eq!(distinct_values(&records, Field::Activity), vec!["bribe", "tail"]);
        assert_eq!(distinct_count(&records, Field::Activity), 2);
        assert_eq!(distinct_count(&records, Field::Subject), 0);
    }
}
