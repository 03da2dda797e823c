//! Pure projections from `GamesRecord` rows to chart-ready point sets.
//!
//! Nothing here renders anything; each function reshapes the fetched table
//! into exactly the columns a chart needs and the views hand the result to
//! the plotting layer as-is.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::models::{EventType, GamesRecord};

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("invalid trend feature {0:?}, expected one of sports, events, countries, participants")]
    InvalidFeature(String),
    #[error("invalid event type {0:?}, expected winter or summer")]
    InvalidEventType(String),
}

/// The quantity plotted over time on the trends chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendFeature {
    Sports,
    Events,
    Countries,
    Participants,
}

impl TrendFeature {
    pub const ALL: [TrendFeature; 4] = [
        TrendFeature::Sports,
        TrendFeature::Events,
        TrendFeature::Countries,
        TrendFeature::Participants,
    ];

    fn value(self, row: &GamesRecord) -> Option<u32> {
        match self {
            TrendFeature::Sports => row.sports,
            TrendFeature::Events => row.events,
            TrendFeature::Countries => row.countries,
            TrendFeature::Participants => row.participants,
        }
    }
}

impl fmt::Display for TrendFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrendFeature::Sports => "sports",
            TrendFeature::Events => "events",
            TrendFeature::Countries => "countries",
            TrendFeature::Participants => "participants",
        };
        f.write_str(s)
    }
}

impl FromStr for TrendFeature {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sports" => Ok(TrendFeature::Sports),
            "events" => Ok(TrendFeature::Events),
            "countries" => Ok(TrendFeature::Countries),
            "participants" => Ok(TrendFeature::Participants),
            other => Err(ChartError::InvalidFeature(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub event_type: EventType,
    pub value: u32,
}

/// One point per source row that actually carries the feature; no
/// aggregation.
pub fn trend(rows: &[GamesRecord], feature: TrendFeature) -> Vec<TrendPoint> {
    rows.iter()
        .filter_map(|row| {
            feature.value(row).map(|value| TrendPoint {
                year: row.year,
                event_type: row.event_type,
                value,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct GenderRatioPoint {
    pub label: String,
    pub year: i32,
    pub event_type: EventType,
    pub male_ratio: f64,
    pub female_ratio: f64,
}

/// Male/female participation ratios for one event type, sorted by year.
///
/// Rows missing either gender count are dropped; a zero or missing
/// participants total counts as missing too, so there is no division by
/// zero.
pub fn gender_ratio(rows: &[GamesRecord], event_type: EventType) -> Vec<GenderRatioPoint> {
    let mut points: Vec<GenderRatioPoint> = rows
        .iter()
        .filter(|row| row.event_type == event_type)
        .filter_map(|row| {
            let male = row.participants_m?;
            let female = row.participants_f?;
            let total = row.participants.filter(|&t| t > 0)?;
            Some(GenderRatioPoint {
                label: row.label(),
                year: row.year,
                event_type: row.event_type,
                male_ratio: f64::from(male) / f64::from(total),
                female_ratio: f64::from(female) / f64::from(total),
            })
        })
        .collect();

    points.sort_by_key(|p| (p.event_type, p.year));
    points
}

#[derive(Debug, Clone, Serialize)]
pub struct GeoPoint {
    pub label: String,
    pub year: i32,
    pub place_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Host locations of every Games with usable coordinates. Rows with a
/// missing coordinate are skipped, never an error.
pub fn locations(rows: &[GamesRecord]) -> Vec<GeoPoint> {
    rows.iter()
        .filter_map(|row| {
            let latitude = row.latitude?;
            let longitude = row.longitude?;
            Some(GeoPoint {
                label: row.label(),
                year: row.year,
                place_name: row.place_name.clone(),
                latitude,
                longitude,
            })
        })
        .collect()
}
