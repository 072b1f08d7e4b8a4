// dashkit/src/preprocess.rs
//
// Raw record normalization: date/hour parsing, location category,
// tri-state information flag.
//

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::errors::Result;
use crate::types::{InfoGathered, RawRecord, Record};

pub const UNKNOWN_LOCATION: &str = "Unknown";

lazy_static! {
    static ref HOUR_PATTERN: Regex = Regex::new(r"([0-9]{2}):[0-9]{2}").unwrap();
}

/// Read a JSON array of raw records from disk.
pub fn load_raw_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let raw: Vec<RawRecord> = serde_json::from_reader(reader)?;

    info!("Loaded {} raw records from '{}'", raw.len(), path.display());
    Ok(raw)
}

/// Normalize every raw record. Total: never fails, absent inputs stay absent.
pub fn preprocess(raw: &[RawRecord]) -> Vec<Record> {
    raw.iter()
        .enumerate()
        .map(|(idx, r)| preprocess_one(idx, r))
        .collect()
}

fn preprocess_one(idx: usize, raw: &RawRecord) -> Record {
    // blank means absent, not malformed
    let date = raw.date.as_deref().filter(|d| !d.trim().is_empty()).and_then(|d| {
        let parsed = parse_date(d);
        if parsed.is_none() {
            warn!("Record {}: unparseable date '{}', treating as undated", idx, d);
        }
        parsed
    });

    let first_location = raw.locations.as_ref().and_then(|locs| locs.first());
    let location_type = first_location.and_then(|loc| non_empty(loc.location_type.clone()));
    let location_name = first_location.map(|loc| {
        non_empty(loc.location_name.clone())
            .or_else(|| non_empty(loc.locality.clone()))
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
    });

    Record {
        date,
        hour: raw.time.as_deref().and_then(parse_hour),
        operative: non_empty(raw.operative.clone()),
        activity: non_empty(raw.activity.clone()),
        subject: non_empty(raw.subject.clone()),
        info: normalize_info(raw.information.as_deref()),
        location_type,
        location_name,
        source: non_empty(raw.source.clone()),
        mode: non_empty(raw.mode.clone()),
        notes: non_empty(raw.activity_notes.clone()),
    }
}

/// Parse the calendar-date portion of an ISO-like timestamp.
/// Anything after a `T` or a space is discarded.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let day = value
        .trim()
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or_default();

    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Hour of the first `HH:MM` occurrence. Hours past 23 count as absent.
pub fn parse_hour(value: &str) -> Option<u8> {
    let caps = HOUR_PATTERN.captures(value)?;
    let hour: u8 = caps.get(1)?.as_str().parse().ok()?;
    (hour <= 23).then_some(hour)
}

pub fn normalize_info(value: Option<&str>) -> InfoGathered {
    let v = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_lowercase(),
        _ => return InfoGathered::NotRecorded,
    };

    match v.as_str() {
        "yes" => InfoGathered::Yes,
        "no" => InfoGathered::No,
        _ => InfoGathered::NotRecorded,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawLocation;

    #[test]
    fn test_parse_date_drops_time_component() {
        let expected = NaiveDate::from_ymd_opt(1907, 3, 15);

        assert_eq!(parse_date("1907-03-15"), expected);
        assert_eq!(parse_date("1907-03-15T14:30:00Z"), expected);
        assert_eq!(parse_date("1907-03-15 14:30"), expected);
        assert_eq!(parse_date("March 15th"), None);
        assert_eq!(parse_date("1907-13-01"), None);
    }

    #[test]
    fn test_parse_hour() {
        assert_eq!(parse_hour("14:30"), Some(14));
        assert_eq!(parse_hour("about 07:15 in the morning"), Some(7));
        assert_eq!(parse_hour("09:00 to 11:45"), Some(9));
        assert_eq!(parse_hour("7:00"), None);
        assert_eq!(parse_hour("Evening"), None);
        assert_eq!(parse_hour("25:00"), None);
        // ASCII digits only
        assert_eq!(parse_hour("١٢:٣٠ then 14:30"), Some(14));
        assert_eq!(parse_hour("١٢:٣٠"), None);
    }

    #[test]
    fn test_normalize_info() {
        assert_eq!(normalize_info(None), InfoGathered::NotRecorded);
        assert_eq!(normalize_info(Some("")), InfoGathered::NotRecorded);
        assert_eq!(normalize_info(Some("   ")), InfoGathered::NotRecorded);
        assert_eq!(normalize_info(Some("YES")), InfoGathered::Yes);
        assert_eq!(normalize_info(Some(" no ")), InfoGathered::No);
        assert_eq!(normalize_info(Some("maybe")), InfoGathered::NotRecorded);
    }

    #[test]
    fn test_preprocess_derives_fields() {
        let raw = vec![
            RawRecord {
                date: Some("1907-03-15T00:00:00".to_string()),
                time: Some("21:10".to_string()),
                operative: Some("Agent A".to_string()),
                activity: Some("tail".to_string()),
                subject: Some(String::new()),
                information: Some("Yes".to_string()),
                locations: Some(vec![
                    RawLocation {
                        location_type: Some("saloon".to_string()),
                        location_name: Some("Brown Palace".to_string()),
                        locality: Some("Denver".to_string()),
                    },
                    RawLocation {
                        location_type: Some("depot".to_string()),
                        ..Default::default()
                    },
                ]),
                ..Default::default()
            },
            RawRecord {
                date: Some("not a date".to_string()),
                locations: Some(vec![]),
                ..Default::default()
            },
        ];

        let records = preprocess(&raw);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(1907, 3, 15));
        assert_eq!(records[0].hour, Some(21));
        assert_eq!(records[0].location_type.as_deref(), Some("saloon"));
        assert_eq!(records[0].location_name.as_deref(), Some("Brown Palace"));
        assert_eq!(records[0].subject, None);
        assert_eq!(records[0].info, InfoGathered::Yes);

        assert_eq!(records[1].date, None);
        assert_eq!(records[1].hour, None);
        assert_eq!(records[1].location_type, None);
        assert_eq!(records[1].location_name, None);
        assert_eq!(records[1].info, InfoGathered::NotRecorded);
    }

    #[test]
    fn test_location_name_falls_back_to_locality_then_unknown() {
        let located = |name: Option<&str>, locality: Option<&str>| RawRecord {
            locations: Some(vec![RawLocation {
                location_type: None,
                location_name: name.map(str::to_string),
                locality: locality.map(str::to_string),
            }]),
            ..Default::default()
        };
        let raw = vec![
            located(Some("Union Depot"), Some("Denver")),
            located(Some(""), Some("Boise")),
            located(None, None),
            RawRecord::default(),
        ];

        let names: Vec<Option<String>> = preprocess(&raw).into_iter().map(|r| r.location_name).collect();

        assert_eq!(
            names,
            vec![
                Some("Union Depot".to_string()),
                Some("Boise".to_string()),
                Some(UNKNOWN_LOCATION.to_string()),
                None,
            ]
        );
    }

    #[test]
    fn test_blank_date_is_absent() {
        let raw = vec![
            RawRecord {
                date: Some(String::new()),
                ..Default::default()
            },
            RawRecord {
                date: Some("   ".to_string()),
                ..Default::default()
            },
        ];

        assert!(preprocess(&raw).iter().all(|r| r.date.is_none()));
    }
}
