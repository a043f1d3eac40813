use wasm_bindgen::prelude::*;

use shared::{Category, Properties};
use stage_configurator_lib::build::{resolve_properties, StageTemplate};
use stage_configurator_lib::command::{execute_json, execute_json_batch};
use stage_configurator_lib::pricing::price;
use stage_configurator_lib::state::selection::ClickOutcome;
use stage_configurator_lib::state::ConfiguratorState;
use stage_configurator_lib::viewport::picking::Ray;

fn js_err(context: &str, e: impl std::fmt::Display) -> JsError {
    let msg = format!("{context}: {e}");
    web_sys::console::error_1(&msg.clone().into());
    JsError::new(&msg)
}

/// Scene state owned by the browser page
#[wasm_bindgen]
pub struct WasmConfigurator {
    state: ConfiguratorState,
}

#[wasm_bindgen]
impl WasmConfigurator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmConfigurator {
        WasmConfigurator {
            state: ConfiguratorState::default(),
        }
    }

    /// Run one JSON command, returns the response as JSON
    pub fn execute(&mut self, command_json: &str) -> Result<String, JsError> {
        let resp = execute_json(&mut self.state, command_json).map_err(|e| js_err("Command", e))?;
        serde_json::to_string(&resp).map_err(|e| js_err("Response encode", e))
    }

    /// Run a JSON array of commands, returns the response array as JSON
    pub fn execute_batch(&mut self, commands_json: &str) -> Result<String, JsError> {
        let resp = execute_json_batch(&mut self.state, commands_json).map_err(|e| js_err("Commands", e))?;
        serde_json::to_string(&resp).map_err(|e| js_err("Response encode", e))
    }

    /// Click along a viewport ray. Returns "pending" or "double_click".
    pub fn click_ray(&mut self, origin: &[f32], direction: &[f32], now_ms: f64) -> Result<String, JsError> {
        let (Ok(o), Ok(d)) = (<[f32; 3]>::try_from(origin), <[f32; 3]>::try_from(direction)) else {
            return Err(js_err("Ray", "origin and direction need 3 components"));
        };
        let outcome = self.state.click_ray(&Ray::new(o, d), now_ms.max(0.0) as u64);
        Ok(match outcome {
            ClickOutcome::Pending => "pending",
            ClickOutcome::DoubleClick => "double_click",
        }
        .to_string())
    }

    /// Apply a pending single click once its window has passed
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.state.tick(now_ms.max(0.0) as u64)
    }

    /// Bumped on every scene mutation, for re-render checks
    pub fn version(&self) -> f64 {
        self.state.scene.version() as f64
    }

    pub fn selected_id(&self) -> Option<String> {
        self.state.selected().map(|o| o.id.clone())
    }

    /// All objects as JSON
    pub fn objects(&self) -> Result<String, JsError> {
        let objects: Vec<_> = self.state.scene.objects().collect();
        serde_json::to_string(&objects).map_err(|e| js_err("Objects encode", e))
    }

    /// Current quotation as JSON
    pub fn quote(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.state.quote()).map_err(|e| js_err("Quote encode", e))
    }

    /// Downloadable quotation export as JSON
    pub fn export_quote(&self, description: &str, terms: &str) -> Result<String, JsError> {
        serde_json::to_string(&self.state.export_quote(description, terms))
            .map_err(|e| js_err("Quote encode", e))
    }

    pub fn save_scene(&self) -> Result<String, JsError> {
        self.state.save_scene().map_err(|e| js_err("Save", e))
    }

    /// Replace the scene from a saved document, returns the object count
    pub fn load_scene(&mut self, scene_json: &str) -> Result<usize, JsError> {
        self.state.load_scene(scene_json).map_err(|e| js_err("Load", e))
    }
}

impl Default for WasmConfigurator {
    fn default() -> Self {
        Self::new()
    }
}

/// Price a single element, for the library panel preview
#[wasm_bindgen]
pub fn price_element(category: &str, params_json: &str) -> Result<f64, JsError> {
    let params: Properties = if params_json.trim().is_empty() {
        Properties::new()
    } else {
        serde_json::from_str(params_json).map_err(|e| js_err("Invalid params JSON", e))?
    };
    let category = Category::from_name(category);
    let props = resolve_properties(category, &params);
    Ok(price(category, &props) as f64)
}

/// Template names offered by the front-end
#[wasm_bindgen]
pub fn template_names() -> js_sys::Array {
    StageTemplate::ALL
        .iter()
        .map(|t| JsValue::from_str(t.name()))
        .collect()
}
