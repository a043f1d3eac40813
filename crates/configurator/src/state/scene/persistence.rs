//! Scene document save/load and autosave

use std::path::PathBuf;

use shared::{SavedObject, SceneDocument, SceneObject};

use super::SceneState;
use crate::build::build_renderable;

/// Errors reading or writing scene documents
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceError {
    /// Document JSON could not be parsed
    Parse(String),
    /// Document could not be serialized
    Serialize(String),
    /// Filesystem failure
    Io(String),
    /// No per-user data directory on this platform
    NoDataDir,
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::Parse(msg) => write!(f, "Scene parse error: {}", msg),
            PersistenceError::Serialize(msg) => write!(f, "Scene serialize error: {}", msg),
            PersistenceError::Io(msg) => write!(f, "I/O error: {}", msg),
            PersistenceError::NoDataDir => write!(f, "No data directory available"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl SceneState {
    /// Saved form of every visible object, in registry order
    pub fn to_document(&self) -> SceneDocument {
        SceneDocument {
            version: 1,
            objects: self
                .registry
                .iter()
                .filter(|o| o.visible)
                .map(|o| SavedObject {
                    id: o.id.clone(),
                    category: o.category,
                    name: o.name.clone(),
                    properties: o.properties.clone(),
                    transform: o.transform.clone(),
                    price: o.price,
                    origin: o.origin,
                    confidence: o.confidence,
                })
                .collect(),
        }
    }

    /// Pretty-printed scene document
    pub fn save_scene_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string_pretty(&self.to_document())
            .map_err(|e| PersistenceError::Serialize(e.to_string()))
    }

    /// Replace the registry with the document's objects.
    ///
    /// Renderables and prices are rebuilt from properties, transforms are
    /// validated, duplicate ids are skipped. History restarts from the loaded
    /// state. Returns the number of objects loaded.
    pub fn load_document(&mut self, document: SceneDocument) -> usize {
        self.registry.clear();
        self.name_counters.clear();
        self.drag = None;

        for saved in document.objects {
            let renderable = build_renderable(saved.category, &saved.properties);
            let price = self.rates.price(saved.category, &saved.properties);
            if price != saved.price {
                tracing::warn!(
                    id = %saved.id,
                    saved = saved.price,
                    recomputed = price,
                    "saved price differs from current rates"
                );
            }
            let mut transform = saved.transform;
            self.sanitize_transform(&mut transform);

            let name = if saved.name.is_empty() {
                super::display::category_label(saved.category).to_string()
            } else {
                saved.name
            };
            self.note_loaded_name(saved.category, &name);

            let object = SceneObject {
                id: saved.id,
                name,
                category: saved.category,
                transform,
                properties: saved.properties,
                price,
                visible: true,
                opacity: 1.0,
                origin: saved.origin,
                confidence: saved.confidence,
                renderable,
            };
            let id = object.id.clone();
            if !self.registry.insert(object) {
                tracing::warn!(id = %id, "skipping duplicate object id");
            }
        }

        let snapshot = self.capture();
        self.history.reset(snapshot);
        self.version += 1;
        tracing::info!(objects = self.registry.len(), "scene loaded");
        self.registry.len()
    }

    /// Parse and load a scene document
    pub fn load_scene_json(&mut self, json: &str) -> Result<usize, PersistenceError> {
        let document: SceneDocument =
            serde_json::from_str(json).map_err(|e| PersistenceError::Parse(e.to_string()))?;
        Ok(self.load_document(document))
    }

    /// Get autosave file path
    fn autosave_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stage", "stage-configurator")
            .map(|dirs| dirs.data_dir().join("autosave.json"))
    }

    /// Save scene to the autosave file
    pub fn autosave(&self) -> Result<PathBuf, PersistenceError> {
        let path = Self::autosave_path().ok_or(PersistenceError::NoDataDir)?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    /// Write the scene document to `path`
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), PersistenceError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PersistenceError::Io(e.to_string()))?;
        }
        let json = self.save_scene_json()?;
        std::fs::write(path, json).map_err(|e| PersistenceError::Io(e.to_string()))
    }

    /// Read a scene document from `path`
    pub fn read_document(path: &std::path::Path) -> Result<SceneDocument, PersistenceError> {
        let json = std::fs::read_to_string(path).map_err(|e| PersistenceError::Io(e.to_string()))?;
        serde_json::from_str(&json).map_err(|e| PersistenceError::Parse(e.to_string()))
    }

    /// Load scene from the autosave file
    pub fn load_autosave() -> Option<SceneDocument> {
        let path = Self::autosave_path()?;
        Self::read_document(&path).ok()
    }

    /// Check if autosave file exists
    pub fn has_autosave() -> bool {
        Self::autosave_path()
            .map(|p| p.exists())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::StageTemplate;
    use shared::{Category, Origin, Properties};

    #[test]
    fn test_save_load_preserves_ids_and_prices() {
        let mut s = SceneState::default();
        let stage = s.create_object(Category::Stage, &Properties::new(), [1.0, 0.0, 2.0]);
        let truss = s.create_object(Category::Truss, &Properties::new(), [0.0, 5.0, 0.0]);
        let json = s.save_scene_json().unwrap();

        let mut loaded = SceneState::default();
        assert_eq!(loaded.load_scene_json(&json).unwrap(), 2);
        assert_eq!(loaded.ids(), vec![stage.id.clone(), truss.id.clone()]);
        assert_eq!(loaded.get(&stage.id).unwrap().price, stage.price);
        assert_eq!(
            loaded.get(&stage.id).unwrap().transform.position,
            [1.0, 0.0, 2.0]
        );
        assert_eq!(loaded.history().len(), 1);
        assert!(!loaded.can_undo());
    }

    #[test]
    fn test_template_replaced_after_reload() {
        let mut s = SceneState::default();
        let batch = s.apply_template(StageTemplate::Proscenium).len();
        let json = s.save_scene_json().unwrap();

        let mut loaded = SceneState::default();
        assert_eq!(loaded.load_scene_json(&json).unwrap(), batch);
        assert!(loaded.objects().all(|o| o.origin == Origin::Template));
        loaded.apply_template(StageTemplate::Proscenium);
        assert_eq!(loaded.len(), batch);
    }

    #[test]
    fn test_detection_origin_survives_reload() {
        let mut s = SceneState::default();
        let mut saved = crate::fixtures::stage_and_truss_document();
        saved.objects[1].origin = Origin::Detection;
        saved.objects[1].confidence = Some(0.4);
        s.load_document(saved);
        let json = s.save_scene_json().unwrap();

        let mut loaded = SceneState::default();
        loaded.load_scene_json(&json).unwrap();
        let truss = loaded.get("truss-1").unwrap();
        assert_eq!(truss.origin, Origin::Detection);
        assert_eq!(truss.confidence, Some(0.4));
        assert_eq!(loaded.get("stage-1").unwrap().origin, Origin::Library);
    }

    #[test]
    fn test_names_continue_after_reload() {
        let mut s = SceneState::default();
        s.create_object(Category::Stage, &Properties::new(), [0.0; 3]);
        s.create_object(Category::Stage, &Properties::new(), [0.0; 3]);
        let json = s.save_scene_json().unwrap();

        let mut loaded = SceneState::default();
        loaded.load_scene_json(&json).unwrap();
        let next = loaded.create_object(Category::Stage, &Properties::new(), [0.0; 3]);
        assert_eq!(next.name, "Stage 3");
        let names: std::collections::HashSet<_> = loaded.objects().map(|o| o.name.clone()).collect();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_document_without_origin_loads_as_library() {
        let json = r#"{"version": 1, "objects": [{"id": "a", "category": "speaker",
            "transform": {"position": [0, 0, 0], "rotation": [0, 0, 0], "scale": [1, 1, 1]},
            "price": 0}]}"#;
        let mut s = SceneState::default();
        assert_eq!(s.load_scene_json(json).unwrap(), 1);
        assert_eq!(s.get("a").unwrap().origin, Origin::Library);
    }

    #[test]
    fn test_hidden_objects_not_saved() {
        let mut s = SceneState::default();
        s.create_object(Category::Stage, &Properties::new(), [0.0; 3]);
        s.undo();
        assert_eq!(s.to_document().objects.len(), 0);
    }

    #[test]
    fn test_load_reprices_and_validates() {
        let json = r#"{"objects": [
            {"id": "a", "category": "stage", "properties": {"width": 2, "depth": 2},
             "transform": {"position": [0, -4, 0], "rotation": [0, 0, 0], "scale": [0, 1, 1]},
             "price": 1},
            {"id": "a", "category": "truss", "transform": {"position": [0, 0, 0], "rotation": [0, 0, 0], "scale": [1, 1, 1]}, "price": 0}
        ]}"#;
        let mut s = SceneState::default();
        assert_eq!(s.load_scene_json(json).unwrap(), 1);
        let a = s.get("a").unwrap();
        assert_eq!(a.price, crate::pricing::BASE_PLYWOOD_RATE * 4);
        assert_eq!(a.transform.position[1], 0.0);
        assert!(a.transform.scale[0] > 0.0);
        assert_eq!(a.name, "Stage");
    }

    #[test]
    fn test_load_invalid_json() {
        let mut s = SceneState::default();
        s.create_object(Category::Stage, &Properties::new(), [0.0; 3]);
        let err = s.load_scene_json("{not json").unwrap_err();
        assert!(matches!(err, PersistenceError::Parse(_)));
        // Registry untouched on parse failure
        assert_eq!(s.len(), 1);
    }
}
