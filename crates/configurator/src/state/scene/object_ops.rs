//! Object factory: create, duplicate, re-parameterize and delete objects

use shared::{Category, ObjectId, Origin, Properties, PropertyValue, SceneObject, Transform};

use super::display::category_label;
use super::SceneState;
use crate::build::{build_renderable, resolve_properties};

/// Everything needed to place one object
#[derive(Debug, Clone)]
pub(crate) struct NewObject {
    pub category: Category,
    pub params: Properties,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub origin: Origin,
    pub confidence: Option<f32>,
    pub opacity: f32,
}

impl NewObject {
    pub fn library(category: Category, params: &Properties, position: [f64; 3]) -> Self {
        Self {
            category,
            params: params.clone(),
            position,
            rotation: [0.0; 3],
            origin: Origin::Library,
            confidence: None,
            opacity: 1.0,
        }
    }
}

impl SceneState {
    /// Create an object from a library pick, insert it and record a snapshot
    pub fn create_object(
        &mut self,
        category: Category,
        params: &Properties,
        position: [f64; 3],
    ) -> SceneObject {
        let object = self.insert_object(NewObject::library(category, params, position));
        self.snapshot();
        object
    }

    /// Same as `create_object`, resolving the category from its wire name.
    /// Unrecognized names produce a placeholder box.
    pub fn create_object_by_name(
        &mut self,
        category: &str,
        params: &Properties,
        position: [f64; 3],
    ) -> SceneObject {
        self.create_object(Category::from_name(category), params, position)
    }

    /// Build and insert an object without touching history
    pub(crate) fn insert_object(&mut self, new: NewObject) -> SceneObject {
        let properties = resolve_properties(new.category, &new.params);
        let renderable = build_renderable(new.category, &properties);
        let price = self.rates.price(new.category, &properties);

        let mut transform = Transform {
            position: new.position,
            rotation: new.rotation,
            scale: [1.0; 3],
        };
        self.sanitize_transform(&mut transform);

        let name = match properties.get("name").and_then(PropertyValue::as_str) {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => self.next_name(new.category),
        };

        let object = SceneObject {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            category: new.category,
            transform,
            properties,
            price,
            visible: true,
            opacity: new.opacity.clamp(0.0, 1.0),
            origin: new.origin,
            confidence: new.confidence,
            renderable,
        };

        tracing::debug!(
            id = %object.id,
            category = %object.category,
            price = object.price,
            "object created"
        );

        self.registry.insert(object.clone());
        self.version += 1;
        object
    }

    fn next_name(&mut self, category: Category) -> String {
        let n = self.name_counters.entry(category).or_insert(0);
        *n += 1;
        format!("{} {}", category_label(category), n)
    }

    /// Advance the name counter past a loaded "<label> <n>" name
    pub(crate) fn note_loaded_name(&mut self, category: Category, name: &str) {
        let n = name
            .strip_prefix(category_label(category))
            .and_then(|rest| rest.strip_prefix(' '))
            .and_then(|digits| digits.parse::<u32>().ok());
        if let Some(n) = n {
            let counter = self.name_counters.entry(category).or_insert(0);
            *counter = (*counter).max(n);
        }
    }

    /// Remove an object from the registry and record a snapshot.
    ///
    /// Removal is physical: earlier snapshots still mention the id, but undo
    /// cannot bring the object back.
    pub fn remove_object(&mut self, id: &str) -> bool {
        if self.registry.remove(id).is_none() {
            return false;
        }
        if self.drag.as_ref().is_some_and(|d| d.id == id) {
            self.drag = None;
        }
        tracing::debug!(id, "object removed");
        self.version += 1;
        self.snapshot();
        true
    }

    /// Copy an object with a fresh id, offset by the configured duplicate offset
    pub fn duplicate_object(&mut self, id: &str) -> Option<SceneObject> {
        let source = self.registry.get(id)?.clone();
        let offset = self.settings.duplicate_offset;

        let mut copy = source.clone();
        copy.id = uuid::Uuid::new_v4().to_string();
        copy.name = format!("{} copy", source.name);
        copy.origin = Origin::Library;
        copy.visible = true;
        copy.opacity = 1.0;
        for (p, o) in copy.transform.position.iter_mut().zip(offset) {
            *p += o;
        }
        self.sanitize_transform(&mut copy.transform);

        self.registry.insert(copy.clone());
        self.version += 1;
        self.snapshot();
        Some(copy)
    }

    /// Rewrite one property, then rebuild the renderable and recompute the price.
    ///
    /// Not recorded in history: snapshots only hold transform and visibility.
    pub fn update_property(&mut self, id: &str, key: &str, value: PropertyValue) -> bool {
        let rates = self.rates.clone();
        let Some(object) = self.registry.get_mut(id) else {
            return false;
        };
        object.properties.insert(key.to_string(), value);
        object.renderable = build_renderable(object.category, &object.properties);
        let price = rates.price(object.category, &object.properties);
        if price != object.price {
            tracing::debug!(id, old = object.price, new = price, "price recomputed");
        }
        object.price = price;
        self.version += 1;
        true
    }

    /// Remove every object and record a snapshot of the empty scene
    pub fn reset(&mut self) {
        self.registry.clear();
        self.name_counters.clear();
        self.drag = None;
        self.version += 1;
        self.snapshot();
    }

    /// Ids of all objects in registry order
    pub fn ids(&self) -> Vec<ObjectId> {
        self.registry.iter().map(|o| o.id.clone()).collect()
    }
}
