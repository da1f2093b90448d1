//! TrackTypeRegistry: the immutable table of known track types.
//!
//! Built once at process start (from the built-in table or a JSON document) and
//! shared read-only afterwards. There is no registration after construction.

use crate::domain::track::{FieldRule, FieldSpec, TrackType};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Built-in track type table, embedded at compile time.
const BUILTIN_TRACK_TYPES: &str = include_str!("../../../config/track_types.json");

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read track types from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid track type document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("track type {track_type}, field '{field}': {reason}")]
    InvalidRule {
        track_type: String,
        field: String,
        reason: String,
    },

    #[error("track type {0} is declared more than once")]
    Duplicate(String),

    #[error("track type identifier must not be empty")]
    EmptyId,
}

/// One entry of the configuration document.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TrackTypeDef {
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "dataFields", default)]
    data_fields: Entries<JsonValue>,
}

/// Object members in document order. Repeated keys are kept so the loader can
/// reject them instead of letting the last one win.
struct Entries<V>(Vec<(String, V)>);

impl<V> Default for Entries<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Entries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// A registry that maps track type identifiers to their definitions.
#[derive(Debug, Clone, Default)]
pub struct TrackTypeRegistry {
    types: BTreeMap<String, TrackType>,
}

impl TrackTypeRegistry {
    /// Builds a registry from already constructed track types.
    ///
    /// Every rule is checked with [`FieldRule::check_definition`], and
    /// identifiers must be unique and non-empty.
    pub fn from_track_types<I>(track_types: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = TrackType>,
    {
        let mut types = BTreeMap::new();
        for track_type in track_types {
            if track_type.id.is_empty() {
                return Err(RegistryError::EmptyId);
            }
            for (field, rule) in track_type.fields.iter() {
                rule.check_definition()
                    .map_err(|reason| RegistryError::InvalidRule {
                        track_type: track_type.id.clone(),
                        field: field.clone(),
                        reason,
                    })?;
            }
            if types.contains_key(&track_type.id) {
                return Err(RegistryError::Duplicate(track_type.id));
            }
            types.insert(track_type.id.clone(), track_type);
        }
        Ok(Self { types })
    }

    /// Parses a configuration document:
    /// `{ "<ID>": { "title": "..", "dataFields": { "<field>": <rule> } } }`.
    pub fn from_json_str(document: &str) -> Result<Self, RegistryError> {
        let Entries(defs) = serde_json::from_str::<Entries<TrackTypeDef>>(document)?;

        let mut track_types = Vec::with_capacity(defs.len());
        for (id, def) in defs {
            let mut fields = FieldSpec::new();
            for (field, rule_def) in def.data_fields.0 {
                let invalid = |reason: String| RegistryError::InvalidRule {
                    track_type: id.clone(),
                    field: field.clone(),
                    reason,
                };
                if fields.get(&field).is_some() {
                    return Err(invalid("field declared more than once".to_string()));
                }
                let rule = FieldRule::from_json(&rule_def).map_err(invalid)?;
                fields = fields.with(field, rule);
            }
            let title = def.title.unwrap_or_else(|| id.clone());
            track_types.push(TrackType::new(id, title, fields));
        }

        Self::from_track_types(track_types)
    }

    /// Reads and parses a configuration document from disk.
    pub fn from_path(path: &Path) -> Result<Self, RegistryError> {
        let document = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&document)
    }

    /// The built-in track type table.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_json_str(BUILTIN_TRACK_TYPES)
    }

    /// Loads from `path` when given, otherwise falls back to the built-in table.
    pub fn load(path: Option<&Path>) -> Result<Self, RegistryError> {
        let registry = match path {
            Some(p) => Self::from_path(p)?,
            None => Self::builtin()?,
        };
        tracing::info!(
            track_types = registry.len(),
            source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "builtin".to_string()),
            "loaded track type registry"
        );
        Ok(registry)
    }

    /// Resolves the field specification for a track type.
    pub fn lookup(&self, id: &str) -> Option<&FieldSpec> {
        self.types.get(id).map(|t| &t.fields)
    }

    /// Retrieves the full track type definition (title included).
    pub fn get(&self, id: &str) -> Option<&TrackType> {
        self.types.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    /// Returns all registered track type identifiers, sorted.
    pub fn list_track_types(&self) -> Vec<&str> {
        self.types.keys().map(|k| k.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
