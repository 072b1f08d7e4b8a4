// dashkit/src/palette.rs
//
// Fixed palette and the activity-type color map
//

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::aggregate::distinct_values;
use crate::types::{Field, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Brick, amber, sage, slate, green
pub const ACCENT: Rgb = Rgb(0xb5, 0x38, 0x1e);
pub const GOLD: Rgb = Rgb(0xc8, 0xa0, 0x4a);
pub const STEEL: Rgb = Rgb(0x5d, 0x7a, 0x6b);
pub const GRAY: Rgb = Rgb(0x6b, 0x72, 0x80);
pub const GREEN: Rgb = Rgb(0x15, 0x80, 0x3d);
pub const VIOLET: Rgb = Rgb(0x7c, 0x3a, 0xed);
pub const ORANGE: Rgb = Rgb(0xc2, 0x41, 0x0c);
pub const SKY: Rgb = Rgb(0x03, 0x69, 0xa1);

pub const PALETTE: [Rgb; 8] = [ACCENT, GOLD, STEEL, GRAY, GREEN, VIOLET, ORANGE, SKY];

/// Activity type -> color, fixed for the life of a dashboard.
///
/// Built from the full record set, never from a filtered one, so a value
/// keeps its color however the panels are filtered or re-sorted.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    colors: HashMap<String, Rgb>,
}

impl ColorMap {
    pub fn build(records: &[Record]) -> Self {
        let colors = distinct_values(records, Field::Activity)
            .into_iter()
            .enumerate()
            .map(|(i, value)| (value, PALETTE[i % PALETTE.len()]))
            .collect();
        Self { colors }
    }

    pub fn get(&self, value: &str) -> Option<Rgb> {
        self.colors.get(value).copied()
    }

    /// Unknown values fall back to the accent color.
    pub fn color_for(&self, value: &str) -> Rgb {
        self.get(value).unwrap_or(ACCENT)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
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

    #[test]
    fn test_rgb_hex() {
        assert_eq!(ACCENT.to_string(), "#b5381e");
        assert_eq!(serde_json::to_string(&SKY).unwrap(), r##""#0369a1""##);
    }

    #[test]
    fn test_assigns_by_sorted_index() {
        let records = vec![activity("tail"), activity("bribe"), activity("rope"), activity("tail")];
        let map = ColorMap::build(&records);

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("bribe"), Some(ACCENT));
        assert_eq!(map.get("rope"), Some(GOLD));
        assert_eq!(map.get("tail"), Some(STEEL));
        assert_eq!(map.color_for("unseen"), ACCENT);
    }

    #[test]
    fn test_wraps_round_robin() {
        let records: Vec<Record> = (0..10).map(|i| activity(&format!("type-{}", i))).collect();
        let map = ColorMap::build(&records);

        assert_eq!(map.get("type-0"), map.get("type-8"));
        assert_eq!(map.get("type-9"), Some(GOLD));
    }
}
