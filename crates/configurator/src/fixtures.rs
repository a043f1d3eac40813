//! Factory functions for creating test data.
//!
//! Provides helpers to construct property bags, detections and scene
//! documents used in tests and by scripted sessions.

use shared::*;

// ── Property bags ───────────────────────────────────────────────

/// Build a property bag from `(key, value)` pairs.
pub fn props(pairs: &[(&str, PropertyValue)]) -> Properties {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Stage platform dimensions.
pub fn stage_props(width: f64, depth: f64) -> Properties {
    props(&[("width", width.into()), ("depth", depth.into())])
}

/// Truss bar length.
pub fn truss_props(length: f64) -> Properties {
    props(&[("width", length.into())])
}

/// Seating block.
pub fn seating_props(rows: u32, columns: u32) -> Properties {
    props(&[
        ("rows", f64::from(rows).into()),
        ("columns", f64::from(columns).into()),
    ])
}

// ── Detections ──────────────────────────────────────────────────

/// A detection at `position` with no extra properties.
pub fn detection(category: Category, confidence: f32, position: [f64; 3]) -> Detection {
    Detection {
        category,
        confidence,
        position,
        properties: Properties::new(),
    }
}

/// A plausible analysis result for a small concert setup.
pub fn concert_detections() -> Vec<Detection> {
    vec![
        Detection {
            category: Category::Stage,
            confidence: 0.92,
            position: [0.0, 0.0, 0.0],
            properties: stage_props(8.0, 5.0),
        },
        detection(Category::Speaker, 0.81, [-5.0, 0.0, 1.0]),
        detection(Category::Speaker, 0.78, [5.0, 0.0, 1.0]),
        detection(Category::Lighting, 0.45, [0.0, 5.0, -1.0]),
    ]
}

// ── Scene documents ─────────────────────────────────────────────

/// Saved object with the price the default rates give it.
pub fn saved_object(
    id: &str,
    category: Category,
    properties: Properties,
    position: [f64; 3],
) -> SavedObject {
    let price = crate::pricing::price(category, &properties);
    SavedObject {
        id: id.to_string(),
        category,
        name: String::new(),
        properties,
        transform: Transform::at(position),
        price,
        origin: Origin::Library,
        confidence: None,
    }
}

/// Document with a stage and a truss bar above it.
pub fn stage_and_truss_document() -> SceneDocument {
    SceneDocument {
        version: 1,
        objects: vec![
            saved_object("stage-1", Category::Stage, stage_props(6.0, 4.0), [0.0; 3]),
            saved_object("truss-1", Category::Truss, truss_props(8.0), [0.0, 5.0, -1.5]),
        ],
    }
}

/// Empty document.
pub fn empty_document() -> SceneDocument {
    SceneDocument::default()
}
