//! Prepares track records for the record-creation workflow.
//!
//! Persistence belongs to the caller; this service only decides whether a
//! submitted track is acceptable and fills in defaults.

use crate::domain::track::{NewTrack, Track, TrackError, TrackTypeRegistry};
use crate::domain::validate::{payload_from_json, PayloadValidator, ValidationError};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct TrackService {
    validator: PayloadValidator,
}

impl TrackService {
    pub fn new(registry: Arc<TrackTypeRegistry>) -> Self {
        Self {
            validator: PayloadValidator::new(registry),
        }
    }

    pub fn validator(&self) -> &PayloadValidator {
        &self.validator
    }

    /// Validates `new_track` and returns the normalized record, dated now when
    /// no date was supplied.
    pub fn prepare(&self, new_track: NewTrack) -> Result<Track, TrackError> {
        self.prepare_at(new_track, Utc::now())
    }

    /// Like [`prepare`](Self::prepare) with an explicit "now".
    pub fn prepare_at(&self, new_track: NewTrack, now: DateTime<Utc>) -> Result<Track, TrackError> {
        tracing::debug!(track_type = %new_track.track_type, "preparing track");

        let NewTrack {
            track_type,
            date,
            duration,
            data,
        } = new_track;

        if !self.validator.registry().contains(&track_type) {
            return Err(ValidationError::UnknownTrackType(track_type).into());
        }

        let duration = duration.unwrap_or(0.0);
        if duration < 0.0 {
            return Err(TrackError::NegativeDuration);
        }

        let payload = match data.as_ref() {
            Some(value) => payload_from_json(value)?,
            None => None,
        };
        self.validator.validate(&track_type, payload)?;

        Ok(Track {
            track_type,
            date: date.unwrap_or(now),
            duration,
            data: payload.cloned(),
        })
    }
}
