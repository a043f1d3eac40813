//! Display helper functions for scene objects

use shared::{number_prop, text_prop, Category, SceneObject};

use crate::pricing::{pricing_rule, PricingRule};

/// Human-readable label for a category
pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::Stage => "Stage",
        Category::Truss => "Truss",
        Category::Layher => "Layher scaffold",
        Category::Lighting => "Lighting",
        Category::LedScreen => "LED screen",
        Category::Speaker => "Speaker",
        Category::Chair => "Seating",
        Category::Decoration => "Decoration",
        Category::SpecialEffect => "Special effect",
        Category::Camera => "Camera",
        Category::Unknown => "Custom element",
    }
}

/// Get display name for an object
pub fn object_display_name(object: &SceneObject) -> String {
    format!("{} ({})", object.name, short_id(&object.id))
}

/// Short form of an id for display
pub fn short_id(id: &str) -> String {
    if id.len() > 8 {
        id.chars().take(8).collect()
    } else {
        id.to_string()
    }
}

fn metres(v: f64) -> String {
    format!("{:.1}m", v)
}

/// Quotation label: category plus the dimensions its price depends on
pub fn line_item_description(object: &SceneObject) -> String {
    let label = category_label(object.category);
    let props = &object.properties;
    let dim = |key: &str| number_prop(props, key).unwrap_or(1.0);

    let mut text = match text_prop(props, "type").or_else(|| text_prop(props, "material")) {
        Some(kind) => format!("{} ({})", label, kind.replace('_', " ")),
        None => label.to_string(),
    };

    match pricing_rule(object.category) {
        PricingRule::Area => {
            let second = if object.category == Category::LedScreen {
                dim("height")
            } else {
                dim("depth")
            };
            text.push_str(&format!(" {} × {}", metres(dim("width")), metres(second)));
        }
        PricingRule::Length => text.push_str(&format!(" {}", metres(dim("width")))),
        PricingRule::Count => {
            let rows = dim("rows");
            let columns = dim("columns");
            if rows * columns > 1.0 {
                text.push_str(&format!(" {} × {} seats", rows, columns));
            }
        }
        PricingRule::Flat => {}
    }

    text
}
