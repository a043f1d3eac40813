//! JSON command protocol for the browser front-end and scripted sessions.
//!
//! Commands are tagged by `"command"` and executed against a
//! [`ConfiguratorState`]. Execution never panics: lookups that fail produce an
//! error response, and only unparseable JSON is an `Err`.

use serde::{Deserialize, Serialize};
use shared::{Axis, Category, Detection, Properties, PropertyValue};

use crate::build::StageTemplate;
use crate::keyboard::{handle_key, Key, KeyInput};
use crate::state::ConfiguratorState;

/// Raw numeric field input: a JSON number or the text typed into a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    Number(f64),
    Text(String),
}

impl FieldInput {
    /// Text form fed to the field coercion rules
    pub fn as_input(&self) -> String {
        match self {
            FieldInput::Number(n) => n.to_string(),
            FieldInput::Text(s) => s.clone(),
        }
    }
}

/// A command the front-end can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Add one element from the library. Unknown categories become a placeholder box.
    AddObject {
        category: String,
        #[serde(default)]
        params: Properties,
        #[serde(default)]
        position: [f64; 3],
    },
    /// Replace the template batch with a named layout
    ApplyTemplate {
        template: StageTemplate,
    },
    /// Delete an object (the selected one when `id` is omitted)
    Delete {
        #[serde(default)]
        id: Option<String>,
    },
    /// Duplicate an object (the selected one when `id` is omitted) and select the copy
    Duplicate {
        #[serde(default)]
        id: Option<String>,
    },
    Select {
        id: String,
    },
    ClearSelection,
    /// Pointer click on `id` (or empty space) at `time_ms`
    Click {
        #[serde(default)]
        id: Option<String>,
        time_ms: u64,
    },
    /// Advance the click debounce clock
    Tick {
        time_ms: u64,
    },
    /// Commit one position field
    SetPosition {
        id: String,
        axis: Axis,
        value: FieldInput,
    },
    /// Commit one rotation field, in degrees
    SetRotation {
        id: String,
        axis: Axis,
        value: FieldInput,
    },
    /// Commit one scale field, or all three when `axis` is omitted
    SetScale {
        id: String,
        #[serde(default)]
        axis: Option<Axis>,
        value: FieldInput,
    },
    UpdateProperty {
        id: String,
        key: String,
        value: PropertyValue,
    },
    /// Keyboard shortcut
    KeyPress {
        key: Key,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        text_focused: bool,
    },
    Undo,
    Redo,
    /// Clear the entire scene.
    Reset,
    /// List all objects plus history and selection state.
    Inspect,
    /// Assemble the quotation for the visible scene
    Quote {
        #[serde(default)]
        description: String,
        #[serde(default)]
        terms: String,
    },
    /// Export the scene as JSON.
    SaveScene,
    /// Replace the scene from a saved document
    LoadScene {
        scene_json: String,
    },
    /// Place image-analysis detections
    IngestDetections {
        detections: Vec<Detection>,
    },
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

fn not_found(id: &str) -> CommandResponse {
    CommandResponse::err(format!("Object not found: {id}"))
}

fn to_value<T: Serialize>(value: &T) -> CommandResponse {
    match serde_json::to_value(value) {
        Ok(v) => CommandResponse::ok_with_data(v),
        Err(e) => CommandResponse::err(format!("Serialization failed: {e}")),
    }
}

/// Execute a single command.
pub fn execute_command(state: &mut ConfiguratorState, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::AddObject {
            category,
            params,
            position,
        } => {
            let category = Category::from_name(&category);
            let object = state.add_object(category, &params, position);
            CommandResponse::ok_with_data(serde_json::json!({
                "id": object.id,
                "name": object.name,
                "category": object.category,
                "price": object.price,
            }))
        }

        AgentCommand::ApplyTemplate { template } => {
            let ids = state.apply_template(template);
            CommandResponse::ok_with_data(serde_json::json!({
                "template": template.name(),
                "count": ids.len(),
                "ids": ids,
            }))
        }

        AgentCommand::Delete { id } => {
            let Some(id) = id.or_else(|| state.selection.primary().map(str::to_string)) else {
                return CommandResponse::err("Nothing selected");
            };
            if !state.delete(&id) {
                return not_found(&id);
            }
            CommandResponse::ok_with_data(serde_json::json!({ "removed": id }))
        }

        AgentCommand::Duplicate { id } => {
            let Some(id) = id.or_else(|| state.selection.primary().map(str::to_string)) else {
                return CommandResponse::err("Nothing selected");
            };
            match state.duplicate(&id) {
                Some(copy) => CommandResponse::ok_with_data(serde_json::json!({ "id": copy.id })),
                None => not_found(&id),
            }
        }

        AgentCommand::Select { id } => {
            if state.select(&id) {
                CommandResponse::ok_with_data(serde_json::json!({ "selected": id }))
            } else {
                CommandResponse::err(format!("Object not selectable: {id}"))
            }
        }

        AgentCommand::ClearSelection => {
            state.clear_selection();
            CommandResponse::ok()
        }

        AgentCommand::Click { id, time_ms } => {
            let outcome = state.click(id, time_ms);
            CommandResponse::ok_with_data(serde_json::json!({
                "double_click": outcome == crate::state::selection::ClickOutcome::DoubleClick,
            }))
        }

        AgentCommand::Tick { time_ms } => {
            let applied = state.tick(time_ms);
            CommandResponse::ok_with_data(serde_json::json!({
                "applied": applied,
                "selected": state.selection.primary(),
            }))
        }

        AgentCommand::SetPosition { id, axis, value } => {
            if !state.scene.set_position_field(&id, axis, &value.as_input()) {
                return not_found(&id);
            }
            transform_response(state, &id)
        }

        AgentCommand::SetRotation { id, axis, value } => {
            if !state.scene.set_rotation_field(&id, axis, &value.as_input()) {
                return not_found(&id);
            }
            transform_response(state, &id)
        }

        AgentCommand::SetScale { id, axis, value } => {
            let input = value.as_input();
            let applied = match axis {
                Some(axis) => state.scene.set_scale_field(&id, axis, &input),
                None => state.scene.set_uniform_scale_field(&id, &input),
            };
            if !applied {
                return not_found(&id);
            }
            transform_response(state, &id)
        }

        AgentCommand::UpdateProperty { id, key, value } => {
            if !state.scene.update_property(&id, &key, value) {
                return not_found(&id);
            }
            let price = state.scene.get(&id).map(|o| o.price);
            CommandResponse::ok_with_data(serde_json::json!({ "id": id, "price": price }))
        }

        AgentCommand::KeyPress {
            key,
            ctrl,
            shift,
            text_focused,
        } => {
            let action = handle_key(state, KeyInput { key, ctrl, shift }, text_focused);
            CommandResponse::ok_with_data(serde_json::json!({ "action": action }))
        }

        AgentCommand::Undo => {
            let success = state.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        AgentCommand::Redo => {
            let success = state.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        AgentCommand::Reset => {
            state.reset();
            CommandResponse::ok()
        }

        AgentCommand::Inspect => {
            let objects: Vec<serde_json::Value> = state
                .scene
                .objects()
                .map(|o| {
                    serde_json::json!({
                        "id": o.id,
                        "name": o.name,
                        "category": o.category,
                        "price": o.price,
                        "visible": o.visible,
                        "opacity": o.opacity,
                        "origin": o.origin,
                        "transform": o.transform,
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "object_count": objects.len(),
                "visible_count": state.scene.visible_count(),
                "objects": objects,
                "selected": state.selection.primary(),
                "can_undo": state.scene.can_undo(),
                "can_redo": state.scene.can_redo(),
                "version": state.scene.version(),
            }))
        }

        AgentCommand::Quote { description, terms } => {
            to_value(&state.export_quote(&description, &terms))
        }

        AgentCommand::SaveScene => match state.save_scene() {
            Ok(json) => CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        AgentCommand::LoadScene { scene_json } => match state.load_scene(&scene_json) {
            Ok(count) => CommandResponse::ok_with_data(serde_json::json!({ "loaded": count })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        AgentCommand::IngestDetections { detections } => {
            let outcome = state.ingest_detections(&detections);
            CommandResponse::ok_with_data(serde_json::json!({
                "added": outcome.added,
                "notice": outcome.notice,
            }))
        }
    }
}

fn transform_response(state: &ConfiguratorState, id: &str) -> CommandResponse {
    match state.scene.get(id) {
        Some(object) => to_value(&object.transform),
        None => not_found(id),
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(state: &mut ConfiguratorState, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(state, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    state: &mut ConfiguratorState,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(state, cmd))
        .collect())
}
