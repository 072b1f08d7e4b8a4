// services/tui-dash/src/mock.rs
//
// Synthetic activity records for demo mode

use chrono::{Days, NaiveDate};
use dashkit::types::{RawLocation, RawRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const OPERATIVES: [&str; 8] = [
    "Operative No. 5",
    "Operative No. 9",
    "Operative No. 14",
    "Operative No. 21",
    "Operative No. 26",
    "Operative No. 32",
    "Operative No. 38",
    "Operative No. 41",
];

const ACTIVITIES: [(&str, u32); 8] = [
    ("Shadowing", 30),
    ("Roping", 18),
    ("Surveillance", 16),
    ("Interview", 10),
    ("Meeting attended", 9),
    ("Travel", 8),
    ("Report filed", 6),
    ("Bribe", 3),
];

const SUBJECTS: [&str; 12] = [
    "W. D. Haywood",
    "C. H. Moyer",
    "G. A. Pettibone",
    "V. St. John",
    "J. Simpkins",
    "H. Orchard",
    "S. Adams",
    "E. Debs",
    "M. Jones",
    "F. Heslewood",
    "J. Kirwan",
    "Unknown miner",
];

const LOCATION_TYPES: [&str; 8] = [
    "Saloon",
    "Hotel",
    "Union hall",
    "Residence",
    "Depot",
    "Street",
    "Mine",
    "Office",
];

const LOCATION_NAMES: [&str; 8] = [
    "Union Depot",
    "Brown Palace",
    "Windsor Hotel",
    "Federation headquarters",
    "Haywood residence",
    "Pioneer saloon",
    "Larimer Street",
    "Smuggler mine",
];

const LOCALITIES: [&str; 4] = ["Denver", "Boise", "Cripple Creek", "Telluride"];

const TIMES_OF_DAY: [&str; 3] = ["Morning", "Afternoon", "Evening"];

pub struct MockDataGenerator {
    rng: StdRng,
    start: NaiveDate,
    span_days: u64,
}

impl MockDataGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            start: NaiveDate::from_ymd_opt(1906, 10, 1).unwrap_or_default(),
            span_days: 240,
        }
    }

    pub fn generate(&mut self, count: usize) -> Vec<RawRecord> {
        (0..count).map(|_| self.record()).collect()
    }

    fn record(&mut self) -> RawRecord {
        RawRecord {
            date: self.date(),
            time: self.time(),
            operative: self.maybe(0.97, |rng| pick(rng, &OPERATIVES)),
            activity: self.maybe(0.98, |rng| weighted(rng, &ACTIVITIES)),
            subject: self.maybe(0.85, |rng| pick(rng, &SUBJECTS)),
            information: self.information(),
            source: Some("Operative report".to_string()),
            mode: self.maybe(0.5, |rng| pick(rng, &["On foot", "Rail", "Buggy"])),
            activity_notes: None,
            locations: self.locations(),
        }
    }

    fn date(&mut self) -> Option<String> {
        // a few records lack a date entirely, a few carry a bad one
        match self.rng.gen_range(0..100) {
            0..=2 => None,
            3 => Some("unknown".to_string()),
            _ => {
                let offset = self.rng.gen_range(0..=self.span_days);
                let date = self.start.checked_add_days(Days::new(offset))?;
                Some(format!("{}T00:00:00", date))
            }
        }
    }

    fn time(&mut self) -> Option<String> {
        match self.rng.gen_range(0..10) {
            0 => None,
            1 => Some(pick(&mut self.rng, &TIMES_OF_DAY)),
            _ => {
                // activity clusters around evening hours
                let hour = if self.rng.gen_bool(0.6) {
                    self.rng.gen_range(17..=23)
                } else {
                    self.rng.gen_range(6..=16)
                };
                let minute = self.rng.gen_range(0..4) * 15;
                Some(format!("{:02}:{:02}", hour, minute))
            }
        }
    }

    fn information(&mut self) -> Option<String> {
        let value = match self.rng.gen_range(0..10) {
            0..=3 => "Yes",
            4..=5 => "no",
            6 => "  ",
            7 => "unclear",
            _ => return None,
        };
        Some(value.to_string())
    }

    fn locations(&mut self) -> Option<Vec<RawLocation>> {
        if self.rng.gen_bool(0.1) {
            return None;
        }
        let count = self.rng.gen_range(1..=2);
        Some(
            (0..count)
                .map(|_| RawLocation {
                    location_type: Some(pick(&mut self.rng, &LOCATION_TYPES)),
                    location_name: if self.rng.gen_bool(0.7) {
                        Some(pick(&mut self.rng, &LOCATION_NAMES))
                    } else {
                        None
                    },
                    locality: if self.rng.gen_bool(0.8) {
                        Some(pick(&mut self.rng, &LOCALITIES))
                    } else {
                        None
                    },
                })
                .collect(),
        )
    }

    fn maybe(&mut self, p: f64, f: impl FnOnce(&mut StdRng) -> String) -> Option<String> {
        if self.rng.gen_bool(p) {
            Some(f(&mut self.rng))
        } else {
            None
        }
    }
}

fn pick(rng: &mut StdRng, values: &[&str]) -> String {
    values[rng.gen_range(0..values.len())].to_string()
}

fn weighted(rng: &mut StdRng, values: &[(&str, u32)]) -> String {
    let total: u32 = values.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for (value, weight) in values {
        if roll < *weight {
            return value.to_string();
        }
        roll -= weight;
    }
    values[values.len() - 1].0.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashkit::preprocess::preprocess;

    #[test]
    fn test_same_seed_same_data() {
        let a = MockDataGenerator::new(7).generate(50);
        let b = MockDataGenerator::new(7).generate(50);

        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_generated_records_preprocess() {
        let raw = MockDataGenerator::new(1).generate(500);
        let records = preprocess(&raw);

        assert_eq!(records.len(), 500);
        assert!(records.iter().filter(|r| r.date.is_some()).count() > 400);
        assert!(records.iter().any(|r| r.hour.is_some()));
        assert!(records.iter().all(|r| r.hour.map_or(true, |h| h <= 23)));
    }
}
