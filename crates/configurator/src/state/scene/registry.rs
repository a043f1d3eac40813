//! Live collection of placed objects

use shared::{ObjectId, SceneObject};

/// Scene registry: objects keyed by id, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct SceneRegistry {
    objects: Vec<SceneObject>,
}

impl SceneRegistry {
    pub fn get(&self, id: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    /// Insert an object. Returns false (and leaves the registry unchanged)
    /// when the id is already taken.
    pub fn insert(&mut self, object: SceneObject) -> bool {
        if self.contains(&object.id) {
            return false;
        }
        self.objects.push(object);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<SceneObject> {
        let pos = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(pos))
    }

    /// Keep only objects matching the predicate; returns the removed ids
    pub fn retain(&mut self, mut keep: impl FnMut(&SceneObject) -> bool) -> Vec<ObjectId> {
        let mut removed = Vec::new();
        self.objects.retain(|o| {
            let k = keep(o);
            if !k {
                removed.push(o.id.clone());
            }
            k
        });
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.iter_mut()
    }

    pub fn last(&self) -> Option<&SceneObject> {
        self.objects.last()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }
}
