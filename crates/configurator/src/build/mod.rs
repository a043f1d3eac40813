//! Element building: property defaults, renderables and stage templates.
//!
//! Everything here is pure. Registry insertion and history live in
//! `state::scene`.

mod elements;
pub mod templates;

pub use elements::build_renderable;
pub use templates::{Placement, StageTemplate};

use shared::{Category, Properties, PropertyValue};

/// Default property bag for a category
pub fn default_properties(category: Category) -> Properties {
    let mut props = Properties::new();
    let mut num = |key: &str, v: f64| {
        props.insert(key.to_string(), PropertyValue::Number(v));
    };
    match category {
        Category::Stage => {
            num("width", 6.0);
            num("depth", 4.0);
            num("height", 1.0);
        }
        Category::Truss => {
            num("width", 6.0);
            num("size", 0.3);
        }
        Category::Layher => {
            num("width", 2.0);
            num("depth", 2.0);
            num("height", 2.0);
        }
        Category::Lighting => {}
        Category::LedScreen => {
            num("width", 4.0);
            num("height", 3.0);
            num("depth", 0.1);
            num("elevation", 1.0);
        }
        Category::Speaker => {
            num("width", 0.6);
            num("height", 1.0);
            num("depth", 0.5);
        }
        Category::Chair => {
            num("rows", 1.0);
            num("columns", 1.0);
            num("spacing", 0.6);
        }
        Category::Decoration => {
            num("width", 2.0);
            num("depth", 0.3);
            num("height", 2.0);
        }
        Category::SpecialEffect | Category::Camera | Category::Unknown => {}
    }

    let text = match category {
        Category::Stage => Some(("material", "plywood")),
        Category::Lighting => Some(("type", "moving_head")),
        Category::Speaker => Some(("type", "line_array")),
        Category::SpecialEffect => Some(("type", "smoke")),
        Category::Camera => Some(("type", "tripod")),
        Category::Decoration => Some(("type", "backdrop")),
        _ => None,
    };
    if let Some((key, value)) = text {
        props.insert(key.to_string(), PropertyValue::Text(value.to_string()));
    }

    props
}

/// Category defaults overlaid with caller-supplied params.
///
/// Params the category does not use are kept in the bag but have no effect.
pub fn resolve_properties(category: Category, params: &Properties) -> Properties {
    let mut props = default_properties(category);
    for (key, value) in params {
        props.insert(key.clone(), value.clone());
    }
    props
}
