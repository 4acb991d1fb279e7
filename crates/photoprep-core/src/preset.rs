//! Named filter/transform bundles.
//!
//! Presets are persisted by the host (a remote name → settings store); this
//! crate only defines the entity, validates it and talks to the store
//! through [`PresetStore`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;
use crate::{FilterState, TransformState};

/// Failure reported by a preset store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresetStoreError {
    /// A preset with this name already exists
    #[error("A preset named '{0}' already exists")]
    Duplicate(String),

    /// The backing store could not be reached or refused the request
    #[error("{0}")]
    Backend(String),
}

/// Flat settings object as stored remotely.
///
/// Maps one-to-one onto [`FilterState`] and [`TransformState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetSettings {
    #[serde(flatten)]
    pub filters: FilterState,
    #[serde(flatten)]
    pub transform: TransformState,
}

impl PresetSettings {
    pub fn new(filters: FilterState, transform: TransformState) -> Self {
        Self { filters, transform }
    }

    /// Reject values the pipeline cannot render.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.transform.validate()
    }
}

/// A named, externally persisted bundle of settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub settings: PresetSettings,
}

impl Preset {
    /// Build a validated preset. The name is trimmed and must not be blank.
    pub fn new(name: &str, settings: PresetSettings) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyPresetName);
        }
        settings.validate()?;
        Ok(Self {
            name: name.to_owned(),
            settings,
        })
    }
}

/// Remote key/value store of presets.
pub trait PresetStore {
    /// All saved presets.
    fn list(&self) -> Result<Vec<Preset>, PresetStoreError>;

    /// Persist a new preset and return it as stored.
    fn create(&mut self, preset: Preset) -> Result<Preset, PresetStoreError>;
}

/// Store kept in memory, for hosts without a backend and for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPresetStore {
    presets: Vec<Preset>,
}

impl InMemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresetStore for InMemoryPresetStore {
    fn list(&self) -> Result<Vec<Preset>, PresetStoreError> {
        Ok(self.presets.clone())
    }

    fn create(&mut self, preset: Preset) -> Result<Preset, PresetStoreError> {
        if self.presets.iter().any(|p| p.name == preset.name) {
            return Err(PresetStoreError::Duplicate(preset.name));
        }
        self.presets.push(preset.clone());
        Ok(preset)
    }
}
