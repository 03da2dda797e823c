use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::charts::ChartError;

/// Winter or Summer Games. The backend is not consistent about casing
/// ("winter" vs "Winter"), so deserialization is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum EventType {
    Winter,
    Summer,
}

impl EventType {
    pub const ALL: [EventType; 2] = [EventType::Winter, EventType::Summer];
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Winter => f.write_str("Winter"),
            EventType::Summer => f.write_str("Summer"),
        }
    }
}

impl FromStr for EventType {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "winter" => Ok(EventType::Winter),
            "summer" => Ok(EventType::Summer),
            other => Err(ChartError::InvalidEventType(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One Paralympic Games record from `GET /all`.
///
/// Count and coordinate columns in the source data contain gaps and the odd
/// junk value ("N/A" longitudes); those deserialize to `None` rather than
/// failing the whole payload.
#[derive(Debug, Clone, Deserialize)]
pub struct GamesRecord {
    pub event_type: EventType,
    pub year: i32,
    pub place_name: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub sports: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub events: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub countries: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub participants: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub participants_m: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub participants_f: Option<u32>,
    #[serde(default, deserialize_with = "lenient_coord")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coord")]
    pub longitude: Option<f64>,
}

impl GamesRecord {
    /// Display label used on charts, e.g. "Barcelona 1992".
    pub fn label(&self) -> String {
        format!("{} {}", self.place_name, self.year)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: i32,
    pub question_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizResponse {
    pub id: i32,
    #[serde(default)]
    pub question_id: Option<i32>,
    pub response_text: String,
    pub is_correct: bool,
}

#[derive(Debug, Serialize)]
pub struct NewQuestion {
    pub question_text: String,
}

#[derive(Debug, Serialize)]
pub struct NewResponse {
    pub response_text: String,
    pub is_correct: bool,
    pub question_id: i32,
}

/// Deserialize a numeric value that may arrive as a number, a numeric string,
/// or junk. Junk and null become `None`, never an error.
fn lenient_count<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    struct Vis;
    impl<'de> serde::de::Visitor<'de> for Vis {
        type Value = Option<u32>;
        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("count, numeric string, or null")
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(u32::try_from(v).ok())
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(u32::try_from(v).ok())
        }
        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
            if v.fract() == 0.0 && v >= 0.0 && v <= u32::MAX as f64 {
                Ok(Some(v as u32))
            } else {
                Ok(None)
            }
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.trim().parse().ok())
        }
        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }
    d.deserialize_any(Vis)
}

/// Same leniency for coordinates: "N/A" in a longitude column means missing.
fn lenient_coord<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    struct Vis;
    impl<'de> serde::de::Visitor<'de> for Vis {
        type Value = Option<f64>;
        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("coordinate, numeric string, or null")
        }
        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.trim().parse().ok())
        }
        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }
    d.deserialize_any(Vis)
}
