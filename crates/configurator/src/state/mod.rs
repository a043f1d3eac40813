pub mod scene;
pub mod selection;
pub mod settings;

use shared::{
    Category, Detection, ObjectId, Properties, Quotation, QuotationExport, SceneObject,
};

use crate::build::StageTemplate;
use crate::detection::{ingest_detections, DetectionOutcome};
use crate::quotation;
use crate::viewport::picking::{pick_object, Ray};
pub use scene::{category_label, line_item_description, object_display_name, short_id, SceneState};
pub use scene::PersistenceError;
use selection::{ClickOutcome, SelectionState};
pub use settings::ConfiguratorSettings;

/// Combined configurator state: the scene plus the selection attached to it.
///
/// Every operation that can hide or remove objects re-syncs the selection, so
/// it never points at something that is gone or invisible.
pub struct ConfiguratorState {
    pub scene: SceneState,
    pub selection: SelectionState,
    pub settings: ConfiguratorSettings,
}

impl Default for ConfiguratorState {
    fn default() -> Self {
        Self::new(ConfiguratorSettings::default())
    }
}

impl ConfiguratorState {
    pub fn new(settings: ConfiguratorSettings) -> Self {
        Self {
            scene: SceneState::new(settings.scene.clone(), settings.pricing.clone()),
            selection: SelectionState::new(settings.selection.clone()),
            settings,
        }
    }

    /// State configured from the user's settings file
    pub fn with_saved_settings() -> Self {
        Self::new(ConfiguratorSettings::load())
    }

    /// Add one object from the library
    pub fn add_object(
        &mut self,
        category: Category,
        params: &Properties,
        position: [f64; 3],
    ) -> SceneObject {
        self.scene.create_object(category, params, position)
    }

    /// Replace the template batch
    pub fn apply_template(&mut self, template: StageTemplate) -> Vec<ObjectId> {
        let ids = self.scene.apply_template(template);
        self.selection.sync(&mut self.scene);
        ids
    }

    /// Selected object, if any
    pub fn selected(&self) -> Option<&SceneObject> {
        self.selection.primary().and_then(|id| self.scene.get(id))
    }

    pub fn select(&mut self, id: &str) -> bool {
        self.selection.select(&mut self.scene, id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear(&mut self.scene);
    }

    /// Pointer click at `now_ms` with a pre-resolved hit
    pub fn click(&mut self, hit: Option<ObjectId>, now_ms: u64) -> ClickOutcome {
        self.selection.pointer_click(&mut self.scene, hit, now_ms)
    }

    /// Pointer click resolved by ray picking against visible objects
    pub fn click_ray(&mut self, ray: &Ray, now_ms: u64) -> ClickOutcome {
        let hit = pick_object(&self.scene, ray);
        self.click(hit, now_ms)
    }

    /// Resolve a pending click whose double-click window has passed
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.selection.tick(&mut self.scene, now_ms)
    }

    /// Remove an object. Deleting the selected object returns the selection to Idle.
    pub fn delete(&mut self, id: &str) -> bool {
        if self.selection.is_selected(id) {
            self.selection.clear(&mut self.scene);
        }
        self.scene.remove_object(id)
    }

    /// Remove the selected object
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selection.primary().map(str::to_string) else {
            return false;
        };
        self.delete(&id)
    }

    /// Duplicate an object and select the copy
    pub fn duplicate(&mut self, id: &str) -> Option<SceneObject> {
        let copy = self.scene.duplicate_object(id)?;
        self.selection.select(&mut self.scene, &copy.id);
        Some(copy)
    }

    /// Duplicate the selected object
    pub fn duplicate_selected(&mut self) -> Option<SceneObject> {
        let id = self.selection.primary()?.to_string();
        self.duplicate(&id)
    }

    pub fn undo(&mut self) -> bool {
        let moved = self.scene.undo();
        self.selection.sync(&mut self.scene);
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.scene.redo();
        self.selection.sync(&mut self.scene);
        moved
    }

    /// Clear the scene
    pub fn reset(&mut self) {
        self.selection.clear(&mut self.scene);
        self.scene.reset();
    }

    /// Feed image-analysis detections through the factory
    pub fn ingest_detections(&mut self, detections: &[Detection]) -> DetectionOutcome {
        ingest_detections(&mut self.scene, &self.settings.detection, detections)
    }

    /// Quotation for the visible scene
    pub fn quote(&self) -> Quotation {
        quotation::quote(&self.scene, self.settings.quote.tax_rate)
    }

    /// Quotation with free-text fields for the template renderer
    pub fn export_quote(&self, description: &str, terms: &str) -> QuotationExport {
        quotation::export(&self.scene, self.settings.quote.tax_rate, description, terms)
    }

    pub fn save_scene(&self) -> Result<String, PersistenceError> {
        self.scene.save_scene_json()
    }

    /// Replace the scene from a saved document; the selection is dropped
    pub fn load_scene(&mut self, json: &str) -> Result<usize, PersistenceError> {
        let document = serde_json::from_str(json)
            .map_err(|e| PersistenceError::Parse(e.to_string()))?;
        self.selection.clear(&mut self.scene);
        Ok(self.scene.load_document(document))
    }
}
