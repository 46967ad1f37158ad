//! Persistence boundary.
//!
//! The engine never talks to storage itself. A host hands it a
//! [`LayoutBackend`]; load fills the element store, save sends the full
//! element list (replace-all) and gets the persisted list back.

use crate::error::LayoutError;
use crate::model::LayoutElement;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The full serialized state of one layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    #[serde(default)]
    pub elements: Vec<LayoutElement>,
    /// Opaque background image reference, never interpreted by the engine.
    #[serde(default)]
    pub background_ref: Option<String>,
}

impl LayoutSnapshot {
    /// # Errors
    /// Returns [`LayoutError::Decode`] if the JSON does not describe a layout.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    /// Returns [`LayoutError::Decode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// External layout storage, keyed by scene (venue/event) id.
pub trait LayoutBackend {
    /// `Ok(None)` means no layout has been saved yet.
    fn load_layout(&self, scene_id: &str) -> Result<Option<LayoutSnapshot>, LayoutError>;

    /// Replace the stored layout wholesale. Returns what was persisted, which
    /// may carry reconciled ids.
    fn save_layout(
        &mut self,
        scene_id: &str,
        snapshot: &LayoutSnapshot,
    ) -> Result<LayoutSnapshot, LayoutError>;
}

/// Process-local backend for tests and offline hosts.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    scenes: HashMap<String, LayoutSnapshot>,
    /// When set, every save fails with this message.
    pub fail_saves: Option<String>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scene(mut self, scene_id: &str, snapshot: LayoutSnapshot) -> Self {
        self.scenes.insert(scene_id.to_string(), snapshot);
        self
    }

    pub fn stored(&self, scene_id: &str) -> Option<&LayoutSnapshot> {
        self.scenes.get(scene_id)
    }
}

impl LayoutBackend for InMemoryBackend {
    fn load_layout(&self, scene_id: &str) -> Result<Option<LayoutSnapshot>, LayoutError> {
        Ok(self.scenes.get(scene_id).cloned())
    }

    fn save_layout(
        &mut self,
        scene_id: &str,
        snapshot: &LayoutSnapshot,
    ) -> Result<LayoutSnapshot, LayoutError> {
        if let Some(msg) = &self.fail_saves {
            return Err(LayoutError::Backend(msg.clone()));
        }
        self.scenes.insert(scene_id.to_string(), snapshot.clone());
        Ok(snapshot.clone())
    }
}
