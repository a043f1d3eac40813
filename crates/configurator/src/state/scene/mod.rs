//! Scene state management
//!
//! This module provides the scene registry, the object factory and transform
//! operations, and snapshot-based undo/redo history.

mod display;
mod history;
mod object_ops;
mod persistence;
mod registry;
mod template_ops;
mod transform_ops;

pub use display::{category_label, line_item_description, object_display_name, short_id};
pub use history::HistoryManager;
pub(crate) use object_ops::NewObject;
pub use persistence::PersistenceError;
pub use registry::SceneRegistry;
pub use transform_ops::{coerce_position_input, coerce_rotation_input, coerce_scale_input};

use std::collections::HashMap;

use shared::{Category, HistorySnapshot, ObjectId, SceneObject, SnapshotEntry, Transform};

use crate::pricing::PriceRates;
use crate::state::settings::SceneSettings;

/// In-progress gizmo drag
#[derive(Debug, Clone)]
pub(crate) struct DragState {
    pub id: ObjectId,
    pub start: [f64; 3],
}

/// Scene registry with snapshot history
pub struct SceneState {
    pub(crate) registry: SceneRegistry,
    pub(crate) history: HistoryManager,
    pub(crate) rates: PriceRates,
    pub(crate) settings: SceneSettings,
    pub(crate) drag: Option<DragState>,
    /// Per-category counters for default display names
    pub(crate) name_counters: HashMap<Category, u32>,
    /// Monotonically increasing version counter for change notification
    pub(crate) version: u64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(SceneSettings::default(), PriceRates::default())
    }
}

impl SceneState {
    /// Empty scene whose history starts with one snapshot of the empty registry
    pub fn new(settings: SceneSettings, rates: PriceRates) -> Self {
        let mut state = Self {
            registry: SceneRegistry::default(),
            history: HistoryManager::new(settings.history_limit),
            rates,
            settings,
            drag: None,
            name_counters: HashMap::new(),
            version: 0,
        };
        state.snapshot();
        state
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Bump version without recording history
    pub fn notify_mutated(&mut self) {
        self.version += 1;
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    pub fn rates(&self) -> &PriceRates {
        &self.rates
    }

    /// Get an object by ID
    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.registry.get(id)
    }

    /// All objects in registry order
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.registry.iter()
    }

    /// Number of objects in the registry (hidden ones included)
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Number of visible objects
    pub fn visible_count(&self) -> usize {
        self.registry.iter().filter(|o| o.visible).count()
    }

    /// Capture the transform/visibility of every live object
    pub fn capture(&self) -> HistorySnapshot {
        HistorySnapshot {
            entries: self
                .registry
                .iter()
                .map(|o| SnapshotEntry {
                    id: o.id.clone(),
                    category: o.category,
                    position: o.transform.position,
                    rotation: o.transform.rotation,
                    scale: o.transform.scale,
                    visible: o.visible,
                })
                .collect(),
        }
    }

    /// Record the current state as the newest history entry
    pub fn snapshot(&mut self) {
        let snapshot = self.capture();
        self.history.push(snapshot);
        tracing::debug!(
            cursor = self.history.cursor(),
            len = self.history.len(),
            "snapshot recorded"
        );
    }

    /// Coerce a transform into the scene invariants: finite components,
    /// scale at least `min_scale`, position y not below ground.
    pub(crate) fn sanitize_transform(&self, transform: &mut Transform) {
        for v in transform.position.iter_mut().chain(transform.rotation.iter_mut()) {
            if !v.is_finite() {
                *v = 0.0;
            }
        }
        let min_scale = self.settings.effective_min_scale();
        for s in transform.scale.iter_mut() {
            if !s.is_finite() || *s < min_scale {
                *s = min_scale;
            }
        }
        if transform.position[1] < self.settings.ground_level {
            transform.position[1] = self.settings.ground_level;
        }
    }
}
