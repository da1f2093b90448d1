pub mod app;
pub mod domain;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::track_service::TrackService;
pub use domain::track::{
    FieldRule, FieldSpec, NewTrack, PrimitiveKind, RegistryError, Scalar, Track, TrackError, TrackQuery,
    TrackType, TrackTypeRegistry,
};
pub use domain::validate::{
    payload_from_json, Payload, PayloadValidator, ValidationError, ValidationOutcome,
};
