use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Activity record as it arrives from the export, before any normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub date: Option<String>,
    pub time: Option<String>,
    pub operative: Option<String>,
    pub activity: Option<String>,
    pub subject: Option<String>,
    pub information: Option<String>,
    pub source: Option<String>,
    pub mode: Option<String>,
    pub activity_notes: Option<String>,
    pub locations: Option<Vec<RawLocation>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLocation {
    pub location_type: Option<String>,
    pub location_name: Option<String>,
    pub locality: Option<String>,
}

/// Whether the operative reported gathering information
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfoGathered {
    Yes,
    No,
    #[default]
    #[serde(rename = "Not recorded")]
    NotRecorded,
}

impl InfoGathered {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoGathered::Yes => "Yes",
            InfoGathered::No => "No",
            InfoGathered::NotRecorded => "Not recorded",
        }
    }
}

impl fmt::Display for InfoGathered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preprocessed activity. Identity is the position in the full record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: Option<NaiveDate>,
    /// Wall-clock hour, 0-23
    pub hour: Option<u8>,
    pub operative: Option<String>,
    pub activity: Option<String>,
    pub subject: Option<String>,
    pub info: InfoGathered,
    pub location_type: Option<String>,
    /// First location's name, else its locality, else "Unknown"; absent
    /// only when the record lists no locations
    pub location_name: Option<String>,
    pub source: Option<String>,
    pub mode: Option<String>,
    pub notes: Option<String>,
}

/// Categorical columns the aggregator can group on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Operative,
    Activity,
    Subject,
    LocationType,
    LocationName,
}

impl Record {
    pub fn field(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Operative => &self.operative,
            Field::Activity => &self.activity,
            Field::Subject => &self.subject,
            Field::LocationType => &self.location_type,
            Field::LocationName => &self.location_name,
        };
        value.as_deref()
    }
}
