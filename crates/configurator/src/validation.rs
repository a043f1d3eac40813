//! Scene validation utilities.
//!
//! `SceneValidator` checks the invariants every scene operation is expected to
//! keep: positive scale, no object below ground, stored prices matching the
//! price calculator, unique ids, and a history cursor in range.

use std::collections::HashSet;

use shared::{ObjectId, SceneObject};

use crate::state::scene::SceneState;
use crate::viewport::picking::Aabb;

/// One broken invariant
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    NonPositiveScale { id: ObjectId, scale: [f64; 3] },
    BelowGround { id: ObjectId, y: f64 },
    NonFiniteTransform { id: ObjectId },
    PriceMismatch { id: ObjectId, stored: i64, expected: i64 },
    NegativePrice { id: ObjectId, price: i64 },
    DuplicateId { id: ObjectId },
    CursorOutOfRange { cursor: usize, len: usize },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::NonPositiveScale { id, scale } => {
                write!(f, "{id}: non-positive scale {scale:?}")
            }
            Violation::BelowGround { id, y } => write!(f, "{id}: y = {y} is below ground"),
            Violation::NonFiniteTransform { id } => write!(f, "{id}: non-finite transform"),
            Violation::PriceMismatch {
                id,
                stored,
                expected,
            } => write!(f, "{id}: stored price {stored}, expected {expected}"),
            Violation::NegativePrice { id, price } => write!(f, "{id}: negative price {price}"),
            Violation::DuplicateId { id } => write!(f, "duplicate id {id}"),
            Violation::CursorOutOfRange { cursor, len } => {
                write!(f, "history cursor {cursor} outside 0..{len}")
            }
        }
    }
}

/// Validator for scene invariants.
pub struct SceneValidator<'a> {
    scene: &'a SceneState,
}

impl<'a> SceneValidator<'a> {
    /// Create a new validator for the given scene.
    pub fn new(scene: &'a SceneState) -> Self {
        Self { scene }
    }

    /// Every scale component is positive.
    pub fn are_scales_positive(&self) -> bool {
        self.scene
            .objects()
            .all(|o| o.transform.scale.iter().all(|s| *s > 0.0))
    }

    /// No object sits below the configured ground level.
    pub fn are_objects_above_ground(&self) -> bool {
        let ground = self.scene.settings().ground_level;
        self.scene
            .objects()
            .all(|o| o.transform.position[1] >= ground)
    }

    /// Stored prices equal a fresh computation from properties.
    pub fn are_prices_consistent(&self) -> bool {
        self.scene.objects().all(|o| self.expected_price(o) == o.price)
    }

    /// Ids are unique across the registry.
    pub fn are_ids_unique(&self) -> bool {
        let mut seen = HashSet::new();
        self.scene.objects().all(|o| seen.insert(o.id.as_str()))
    }

    /// World-space bounds of one object
    pub fn bounds_of(&self, id: &str) -> Option<Aabb> {
        self.scene.get(id).and_then(Aabb::of_object)
    }

    /// World-space dimensions of one object's bounds
    pub fn dimensions(&self, id: &str) -> Option<[f32; 3]> {
        let aabb = self.bounds_of(id)?;
        Some([
            aabb.max.x - aabb.min.x,
            aabb.max.y - aabb.min.y,
            aabb.max.z - aabb.min.z,
        ])
    }

    /// Check that an object's bounds are approximately `expected`.
    pub fn assert_dimensions_approx(&self, id: &str, expected: [f32; 3], tolerance: f32) -> bool {
        self.dimensions(id).is_some_and(|dims| {
            (dims[0] - expected[0]).abs() < tolerance
                && (dims[1] - expected[1]).abs() < tolerance
                && (dims[2] - expected[2]).abs() < tolerance
        })
    }

    fn expected_price(&self, object: &SceneObject) -> i64 {
        self.scene.rates().price(object.category, &object.properties)
    }

    /// All violations, in registry order
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        let ground = self.scene.settings().ground_level;
        let mut seen = HashSet::new();

        for o in self.scene.objects() {
            let t = &o.transform;
            if t.position
                .iter()
                .chain(&t.rotation)
                .chain(&t.scale)
                .any(|v| !v.is_finite())
            {
                out.push(Violation::NonFiniteTransform { id: o.id.clone() });
            }
            if t.scale.iter().any(|s| *s <= 0.0) {
                out.push(Violation::NonPositiveScale {
                    id: o.id.clone(),
                    scale: t.scale,
                });
            }
            if t.position[1] < ground {
                out.push(Violation::BelowGround {
                    id: o.id.clone(),
                    y: t.position[1],
                });
            }
            if o.price < 0 {
                out.push(Violation::NegativePrice {
                    id: o.id.clone(),
                    price: o.price,
                });
            }
            let expected = self.expected_price(o);
            if expected != o.price {
                out.push(Violation::PriceMismatch {
                    id: o.id.clone(),
                    stored: o.price,
                    expected,
                });
            }
            if !seen.insert(o.id.as_str()) {
                out.push(Violation::DuplicateId { id: o.id.clone() });
            }
        }

        let history = self.scene.history();
        if !history.is_empty() && history.cursor() >= history.len() {
            out.push(Violation::CursorOutOfRange {
                cursor: history.cursor(),
                len: history.len(),
            });
        }
        out
    }

    /// True when no invariant is broken.
    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }
}
