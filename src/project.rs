use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound applied to the project floor area wherever it is consumed.
pub const MAX_REASONABLE_SQFT: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectParameters {
    #[serde(default = "today", deserialize_with = "lenient_date")]
    pub start_date: NaiveDate,
    #[serde(default = "default_area_sqft")]
    pub area_sqft: f64,
}

impl ProjectParameters {
    pub fn new(start_date: NaiveDate, area_sqft: f64) -> Self {
        Self {
            start_date,
            area_sqft,
        }
    }

    /// Floor area with the documented clamp applied. A non-finite input is
    /// treated as the default area rather than propagated.
    pub fn clamped_area_sqft(&self) -> f64 {
        if !self.area_sqft.is_finite() {
            return default_area_sqft();
        }
        self.area_sqft.clamp(0.0, MAX_REASONABLE_SQFT)
    }
}

impl Default for ProjectParameters {
    fn default() -> Self {
        Self {
            start_date: today(),
            area_sqft: default_area_sqft(),
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn default_area_sqft() -> f64 {
    1000.0
}

/// Best-effort parse of a project start date. Accepts a plain date or a
/// datetime string; anything else falls back to the current local date.
pub fn parse_start_date(raw: &str) -> NaiveDate {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date;
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return datetime.date();
        }
    }
    today()
}

fn lenient_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Date(NaiveDate),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer) {
        Ok(Raw::Date(date)) => date,
        Ok(Raw::Text(raw)) => parse_start_date(&raw),
        _ => today(),
    })
}
