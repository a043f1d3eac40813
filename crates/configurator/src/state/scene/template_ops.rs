//! Stage template batches

use shared::{ObjectId, Origin};

use super::object_ops::NewObject;
use super::SceneState;
use crate::build::StageTemplate;

impl SceneState {
    /// Replace all template-originated objects with the layout of `template`.
    ///
    /// Templates are mutually exclusive: the previous batch is removed from the
    /// registry before the new one is inserted. One snapshot covers the batch.
    pub fn apply_template(&mut self, template: StageTemplate) -> Vec<ObjectId> {
        let removed = self.registry.retain(|o| o.origin != Origin::Template);
        if self
            .drag
            .as_ref()
            .is_some_and(|d| removed.contains(&d.id))
        {
            self.drag = None;
        }

        let mut added = Vec::new();
        for placement in template.placements() {
            let object = self.insert_object(NewObject {
                category: placement.category,
                params: placement.params,
                position: placement.position,
                rotation: placement.rotation,
                origin: Origin::Template,
                confidence: None,
                opacity: 1.0,
            });
            added.push(object.id);
        }

        self.snapshot();
        tracing::info!(
            template = template.name(),
            added = added.len(),
            replaced = removed.len(),
            "template applied"
        );
        added
    }

    /// Ids of objects inserted by a template batch
    pub fn template_object_ids(&self) -> Vec<ObjectId> {
        self.registry
            .iter()
            .filter(|o| o.origin == Origin::Template)
            .map(|o| o.id.clone())
            .collect()
    }
}
