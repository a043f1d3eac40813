//! Single-object selection with click debouncing
//!
//! States are Idle and Selected. A pointer click is held pending for the
//! double-click window and only applied once the window passes (`tick`). A
//! second click inside the window makes a double-click, which does nothing.

use shared::ObjectId;

use super::scene::SceneState;
use super::settings::SelectionSettings;

/// Current selection
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected {
        id: ObjectId,
        /// Opacity to put back when the object is deselected
        restore_opacity: f32,
    },
}

/// What a pointer click turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Waiting out the double-click window
    Pending,
    /// Second click inside the window; ignored
    DoubleClick,
}

#[derive(Debug, Clone)]
struct PendingClick {
    hit: Option<ObjectId>,
    at_ms: u64,
}

/// Selection controller state
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    current: Selection,
    pending: Option<PendingClick>,
    settings: SelectionSettings,
}

impl SelectionState {
    pub fn new(settings: SelectionSettings) -> Self {
        Self {
            current: Selection::Idle,
            pending: None,
            settings,
        }
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    /// Selected object id
    pub fn primary(&self) -> Option<&str> {
        match &self.current {
            Selection::Selected { id, .. } => Some(id.as_str()),
            Selection::Idle => None,
        }
    }

    /// Check if an object is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.primary() == Some(id)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.current, Selection::Idle)
    }

    /// Whether a click is waiting for the double-click window to pass
    pub fn has_pending_click(&self) -> bool {
        self.pending.is_some()
    }

    /// Select a visible object, dimming it. Any previous selection is released first.
    pub fn select(&mut self, scene: &mut SceneState, id: &str) -> bool {
        if self.is_selected(id) {
            return true;
        }
        if !scene.get(id).is_some_and(|o| o.visible) {
            return false;
        }
        self.clear(scene);

        let factor = self.settings.selected_opacity.clamp(0.0, 1.0);
        let Some(object) = scene.registry.get_mut(id) else {
            return false;
        };
        let restore_opacity = object.opacity;
        object.opacity = restore_opacity * factor;
        scene.notify_mutated();

        tracing::debug!(id, "selected");
        self.current = Selection::Selected {
            id: id.to_string(),
            restore_opacity,
        };
        true
    }

    /// Return to Idle, restoring the object's opacity if it still exists
    pub fn clear(&mut self, scene: &mut SceneState) {
        let Selection::Selected {
            id,
            restore_opacity,
        } = std::mem::take(&mut self.current)
        else {
            return;
        };
        if let Some(object) = scene.registry.get_mut(&id) {
            object.opacity = restore_opacity;
            scene.notify_mutated();
        }
        tracing::debug!(id = %id, "deselected");
    }

    /// Register a pointer click at `now_ms`. `hit` is the picked object, or
    /// `None` for empty space.
    pub fn pointer_click(
        &mut self,
        scene: &mut SceneState,
        hit: Option<ObjectId>,
        now_ms: u64,
    ) -> ClickOutcome {
        if let Some(pending) = &self.pending {
            if now_ms.saturating_sub(pending.at_ms) < self.settings.double_click_ms {
                self.pending = None;
                return ClickOutcome::DoubleClick;
            }
            // Stale click that nobody ticked
            self.tick(scene, now_ms);
        }
        self.pending = Some(PendingClick { hit, at_ms: now_ms });
        ClickOutcome::Pending
    }

    /// Apply the pending click once its window has passed. Returns true if a
    /// click was applied.
    pub fn tick(&mut self, scene: &mut SceneState, now_ms: u64) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };
        if now_ms.saturating_sub(pending.at_ms) < self.settings.double_click_ms {
            return false;
        }
        let hit = pending.hit.clone();
        self.pending = None;
        match hit {
            Some(id) => {
                if !self.select(scene, &id) {
                    self.clear(scene);
                }
            }
            None => self.clear(scene),
        }
        true
    }

    /// Drop the selection if its object is gone or hidden
    pub fn sync(&mut self, scene: &mut SceneState) {
        let Some(id) = self.primary() else {
            return;
        };
        if !scene.get(id).is_some_and(|o| o.visible) {
            self.clear(scene);
        }
    }
}
