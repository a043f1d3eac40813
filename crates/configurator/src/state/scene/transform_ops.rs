//! Transform edits: numeric field commits and gizmo drags
//!
//! Every commit is validated before it lands: scale components stay at or
//! above the minimum scale and position y stays on or above ground level.

use shared::{parse_numeric_input, Axis, Transform};

use super::{DragState, SceneState};
use crate::state::settings::positive_min_scale;

/// Position field value; unreadable input becomes 0
pub fn coerce_position_input(input: &str) -> f64 {
    parse_numeric_input(input).unwrap_or(0.0)
}

/// Scale field value; unreadable, zero, negative or too-small input becomes
/// `min_scale`. A non-positive `min_scale` is replaced by the scale floor.
pub fn coerce_scale_input(input: &str, min_scale: f64) -> f64 {
    let min_scale = positive_min_scale(min_scale);
    match parse_numeric_input(input) {
        Ok(v) if v.is_finite() && v >= min_scale => v,
        _ => min_scale,
    }
}

/// Rotation field value in degrees, returned in radians; unreadable input becomes 0
pub fn coerce_rotation_input(input: &str) -> f64 {
    parse_numeric_input(input)
        .map(f64::to_radians)
        .unwrap_or(0.0)
}

impl SceneState {
    /// Apply `edit` to an object's transform, validate, and record a snapshot
    fn commit_transform(&mut self, id: &str, edit: impl FnOnce(&mut Transform)) -> bool {
        let Some(mut transform) = self.registry.get(id).map(|o| o.transform.clone()) else {
            return false;
        };
        edit(&mut transform);
        self.sanitize_transform(&mut transform);

        let Some(object) = self.registry.get_mut(id) else {
            return false;
        };
        object.transform = transform;
        self.version += 1;
        self.snapshot();
        true
    }

    /// Replace the whole transform
    pub fn set_transform(&mut self, id: &str, transform: Transform) -> bool {
        self.commit_transform(id, |t| *t = transform)
    }

    /// Move an object to `position`
    pub fn set_position(&mut self, id: &str, position: [f64; 3]) -> bool {
        self.commit_transform(id, |t| t.position = position)
    }

    /// Commit one position field from raw text input
    pub fn set_position_field(&mut self, id: &str, axis: Axis, input: &str) -> bool {
        let value = coerce_position_input(input);
        self.commit_transform(id, |t| t.position[axis.index()] = value)
    }

    /// Commit one scale field from raw text input
    pub fn set_scale_field(&mut self, id: &str, axis: Axis, input: &str) -> bool {
        let value = coerce_scale_input(input, self.settings.min_scale);
        self.commit_transform(id, |t| t.scale[axis.index()] = value)
    }

    /// Commit the same scale to all three axes
    pub fn set_uniform_scale_field(&mut self, id: &str, input: &str) -> bool {
        let value = coerce_scale_input(input, self.settings.min_scale);
        self.commit_transform(id, |t| t.scale = [value; 3])
    }

    /// Commit one rotation field (degrees) from raw text input
    pub fn set_rotation_field(&mut self, id: &str, axis: Axis, input: &str) -> bool {
        let value = coerce_rotation_input(input);
        self.commit_transform(id, |t| t.rotation[axis.index()] = value)
    }

    /// Start a gizmo drag on an object
    pub fn begin_drag(&mut self, id: &str) -> bool {
        let Some(object) = self.registry.get(id) else {
            return false;
        };
        self.drag = Some(DragState {
            id: id.to_string(),
            start: object.transform.position,
        });
        true
    }

    /// Move the dragged object by `delta`; no history until the drag ends
    pub fn drag_by(&mut self, delta: [f64; 3]) -> bool {
        let Some(drag) = self.drag.clone() else {
            return false;
        };
        let Some(mut transform) = self.registry.get(&drag.id).map(|o| o.transform.clone()) else {
            self.drag = None;
            return false;
        };
        for (p, d) in transform.position.iter_mut().zip(delta) {
            *p += d;
        }
        self.sanitize_transform(&mut transform);
        if let Some(object) = self.registry.get_mut(&drag.id) {
            object.transform = transform;
            self.version += 1;
        }
        true
    }

    /// Finish the drag. A snapshot is recorded only if the object moved.
    pub fn end_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let moved = self
            .registry
            .get(&drag.id)
            .is_some_and(|o| o.transform.position != drag.start);
        if moved {
            self.snapshot();
        }
        moved
    }

    /// Id of the object being dragged
    pub fn dragging(&self) -> Option<&str> {
        self.drag.as_ref().map(|d| d.id.as_str())
    }
}
