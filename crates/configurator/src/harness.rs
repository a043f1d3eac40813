//! Headless harness for programmatic scene manipulation.
//!
//! Wraps a [`ConfiguratorState`] with string-friendly helpers and
//! inspection shortcuts for tests and scripted sessions.

use shared::{Category, ObjectId, Properties, Quotation, SceneDocument, SceneObject};

use crate::build::StageTemplate;
use crate::command::{execute_json, execute_json_batch, CommandResponse};
use crate::state::settings::ConfiguratorSettings;
use crate::state::ConfiguratorState;
use crate::validation::SceneValidator;

/// Headless harness: configurator state plus a manual clock for click debouncing
pub struct TestHarness {
    pub state: ConfiguratorState,
    now_ms: u64,
}

impl TestHarness {
    /// Create a new empty harness with default settings.
    pub fn new() -> Self {
        Self::with_settings(ConfiguratorSettings::default())
    }

    pub fn with_settings(settings: ConfiguratorSettings) -> Self {
        Self {
            state: ConfiguratorState::new(settings),
            now_ms: 0,
        }
    }

    // ── Scene manipulation ────────────────────────────────────

    /// Add an element and return its ID
    pub fn add(&mut self, category: Category, params: Properties, position: [f64; 3]) -> ObjectId {
        self.state.add_object(category, &params, position).id
    }

    /// Add an element with default properties at `position`
    pub fn add_default(&mut self, category: Category, position: [f64; 3]) -> ObjectId {
        self.add(category, Properties::new(), position)
    }

    /// Add by wire name (unknown names give a placeholder)
    pub fn add_named(&mut self, category: &str) -> ObjectId {
        self.state
            .scene
            .create_object_by_name(category, &Properties::new(), [0.0; 3])
            .id
    }

    pub fn apply_template(&mut self, template: StageTemplate) -> Vec<ObjectId> {
        self.state.apply_template(template)
    }

    /// Delete an object by ID
    pub fn delete(&mut self, id: &str) -> bool {
        self.state.delete(id)
    }

    pub fn duplicate(&mut self, id: &str) -> Option<ObjectId> {
        self.state.duplicate(id).map(|o| o.id)
    }

    /// Undo the last operation
    pub fn undo(&mut self) -> bool {
        self.state.undo()
    }

    /// Redo the last undone operation
    pub fn redo(&mut self) -> bool {
        self.state.redo()
    }

    /// Clear the entire scene
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Load a document (replaces current)
    pub fn load_document(&mut self, document: SceneDocument) -> usize {
        self.state.clear_selection();
        self.state.scene.load_document(document)
    }

    /// Load a scene from JSON string
    pub fn load_scene_json(&mut self, json: &str) -> Result<usize, String> {
        self.state.load_scene(json).map_err(|e| e.to_string())
    }

    /// Export the current scene as JSON
    pub fn save_scene_json(&self) -> Result<String, String> {
        self.state.save_scene().map_err(|e| e.to_string())
    }

    // ── Selection ─────────────────────────────────────────────

    /// Select an object directly
    pub fn select(&mut self, id: &str) -> bool {
        self.state.select(id)
    }

    /// Clear selection
    pub fn clear_selection(&mut self) {
        self.state.clear_selection();
    }

    /// Single click on `hit`, then let the double-click window pass
    pub fn click(&mut self, hit: Option<&str>) {
        self.state.click(hit.map(str::to_string), self.now_ms);
        self.advance(self.state.settings.selection.double_click_ms);
    }

    /// Two clicks inside the double-click window
    pub fn double_click(&mut self, hit: Option<&str>) {
        self.state.click(hit.map(str::to_string), self.now_ms);
        self.advance(1);
        self.state.click(hit.map(str::to_string), self.now_ms);
        self.advance(self.state.settings.selection.double_click_ms);
    }

    /// Move the clock forward and resolve any pending click
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
        self.state.tick(self.now_ms);
    }

    pub fn selected(&self) -> Option<&str> {
        self.state.selection.primary()
    }

    // ── Commands ──────────────────────────────────────────────

    /// Execute one JSON command
    pub fn execute(&mut self, json: &str) -> Result<CommandResponse, String> {
        execute_json(&mut self.state, json)
    }

    /// Execute a JSON array of commands
    pub fn execute_batch(&mut self, json: &str) -> Result<Vec<CommandResponse>, String> {
        execute_json_batch(&mut self.state, json)
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn object(&self, id: &str) -> Option<&SceneObject> {
        self.state.scene.get(id)
    }

    /// Number of objects in the registry
    pub fn object_count(&self) -> usize {
        self.state.scene.len()
    }

    /// Number of visible objects
    pub fn visible_count(&self) -> usize {
        self.state.scene.visible_count()
    }

    /// Visible objects of one category
    pub fn count_of(&self, category: Category) -> usize {
        self.state
            .scene
            .objects()
            .filter(|o| o.visible && o.category == category)
            .count()
    }

    pub fn quote(&self) -> Quotation {
        self.state.quote()
    }

    /// Create a validator over the current scene
    pub fn validator(&self) -> SceneValidator<'_> {
        SceneValidator::new(&self.state.scene)
    }

    pub fn history_cursor(&self) -> usize {
        self.state.scene.history().cursor()
    }

    pub fn history_len(&self) -> usize {
        self.state.scene.history().len()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
