use crate::error::ChartError;
use crate::location::TimezoneInfo;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Who was born, and when on the local wall clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthData {
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl BirthData {
    pub fn local_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Convert the local birth time to UTC using the resolved timezone.
///
/// A wall-clock time that occurs twice (clocks going back) resolves to the
/// earlier instant; one skipped by a daylight-saving jump is an error.
pub fn to_utc(birth: &BirthData, timezone: &TimezoneInfo) -> Result<DateTime<Utc>, ChartError> {
    let local = birth.local_datetime();
    timezone
        .zone
        .earliest_utc(&local)
        .ok_or_else(|| ChartError::InvalidLocalTime {
            local: local.to_string(),
            timezone: timezone.name.clone(),
        })
}

/// First word of a full name with its first letter upper-cased and the rest lower-cased.
pub fn first_name(full_name: &str) -> String {
    let Some(word) = full_name.split_whitespace().next() else {
        return String::new();
    };
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
