//! Track types: the categories of loggable events and their field specifications.

use serde::Serialize;
use std::collections::btree_map;
use std::collections::BTreeMap;
use utoipa::ToSchema;

pub mod record;
pub mod registry;
pub mod rule;

pub use record::{NewTrack, Track, TrackError, TrackQuery};
pub use registry::{RegistryError, TrackTypeRegistry};
pub use rule::{FieldRule, PrimitiveKind, Scalar, ValueKind};

/// Field name -> rule for one track type. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldSpec {
    fields: BTreeMap<String, FieldRule>,
}

impl FieldSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for declaring specs in code.
    pub fn with(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.insert(name.into(), rule);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldRule> {
        self.fields.iter()
    }
}

impl FromIterator<(String, FieldRule)> for FieldSpec {
    fn from_iter<I: IntoIterator<Item = (String, FieldRule)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A named category of loggable event.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrackType {
    /// Identifier, e.g. `CONSUMED_WATER`.
    pub id: String,
    /// Human readable label, e.g. `Water`.
    pub title: String,
    /// Declared payload fields rendered in configuration form.
    #[schema(value_type = Object)]
    pub fields: FieldSpec,
}

impl TrackType {
    pub fn new(id: impl Into<String>, title: impl Into<String>, fields: FieldSpec) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            fields,
        }
    }
}
