//! Track records: one logged event.

use crate::domain::validate::{Payload, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;
use utoipa::ToSchema;

/// Body submitted by a client to record an event.
#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct NewTrack {
    /// Track type identifier, e.g. `CONSUMED_WATER`.
    #[serde(alias = "trackType")]
    pub track_type: String,
    /// When the event took place (RFC3339). Defaults to now.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub date: Option<DateTime<Utc>>,
    /// Duration in minutes. Defaults to 0, must not be negative.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Optional payload, validated against the track type's fields.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub data: Option<JsonValue>,
}

/// A validated, normalized track record.
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Track {
    pub track_type: String,
    #[schema(value_type = String)]
    pub date: DateTime<Utc>,
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub data: Option<Payload>,
}

/// Filter over prepared tracks: optional track type and an inclusive date window.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TrackQuery {
    #[serde(default, alias = "trackType")]
    pub track_type: Option<String>,
    #[serde(default, alias = "fromDate")]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(default, alias = "toDate")]
    pub to_date: Option<DateTime<Utc>>,
}

impl TrackQuery {
    pub fn matches(&self, track: &Track) -> bool {
        self.track_type.as_deref().map_or(true, |t| t == track.track_type)
            && self.from_date.map_or(true, |from| track.date >= from)
            && self.to_date.map_or(true, |to| track.date <= to)
    }

    pub fn filter<'a, I>(&'a self, tracks: I) -> impl Iterator<Item = &'a Track> + 'a
    where
        I: IntoIterator<Item = &'a Track>,
        I::IntoIter: 'a,
    {
        tracks.into_iter().filter(move |t| self.matches(t))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    #[error(transparent)]
    Data(#[from] ValidationError),

    #[error("Duration cannot be negative")]
    NegativeDuration,
}

impl TrackError {
    pub fn code(&self) -> &'static str {
        match self {
            TrackError::Data(e) => e.code(),
            TrackError::NegativeDuration => "NEGATIVE_DURATION",
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            TrackError::Data(e) => e.field(),
            TrackError::NegativeDuration => None,
        }
    }
}
