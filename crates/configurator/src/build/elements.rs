//! Per-category renderable construction.
//!
//! All parts are laid out in object space with y = 0 on the floor, so the
//! object's position is where it stands.

use shared::{number_prop, text_prop, Category, Properties, RenderPart, Renderable, Shape};

const PLYWOOD: [u8; 3] = [176, 132, 84];
const BLACK_STAGE: [u8; 3] = [40, 40, 40];
const STEEL: [u8; 3] = [180, 180, 190];
const FIXTURE: [u8; 3] = [30, 30, 30];
const SCREEN: [u8; 3] = [20, 24, 60];
const SPEAKER: [u8; 3] = [25, 25, 25];
const SEAT: [u8; 3] = [150, 30, 40];
const FABRIC: [u8; 3] = [90, 60, 120];
const EFFECT: [u8; 3] = [210, 210, 210];
const PLACEHOLDER: [u8; 3] = [128, 128, 128];

/// Positive dimension from the bag, or `fallback`
fn dim(props: &Properties, key: &str, fallback: f64) -> f64 {
    match number_prop(props, key) {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => fallback,
    }
}

fn boxed(width: f64, height: f64, depth: f64, offset: [f64; 3], color: [u8; 3]) -> RenderPart {
    RenderPart {
        shape: Shape::Box {
            width,
            height,
            depth,
        },
        offset,
        color,
    }
}

fn cylinder(radius: f64, height: f64, offset: [f64; 3], color: [u8; 3]) -> RenderPart {
    RenderPart {
        shape: Shape::Cylinder { radius, height },
        offset,
        color,
    }
}

/// Build the renderable for an element
pub fn build_renderable(category: Category, props: &Properties) -> Renderable {
    let parts = match category {
        Category::Stage => stage(props),
        Category::Truss => truss(props),
        Category::Layher => layher(props),
        Category::Lighting => lighting(props),
        Category::LedScreen => led_screen(props),
        Category::Speaker => speaker(props),
        Category::Chair => seating(props),
        Category::Decoration => decoration(props),
        Category::SpecialEffect => special_effect(props),
        Category::Camera => camera(props),
        Category::Unknown => vec![boxed(1.0, 1.0, 1.0, [0.0, 0.5, 0.0], PLACEHOLDER)],
    };
    Renderable { parts }
}

fn stage(props: &Properties) -> Vec<RenderPart> {
    let w = dim(props, "width", 6.0);
    let d = dim(props, "depth", 4.0);
    let h = dim(props, "height", 1.0);
    let color = match text_prop(props, "material") {
        Some("black") | Some("black_paint") => BLACK_STAGE,
        _ => PLYWOOD,
    };
    vec![boxed(w, h, d, [0.0, h / 2.0, 0.0], color)]
}

fn truss(props: &Properties) -> Vec<RenderPart> {
    let length = dim(props, "width", 6.0);
    let size = dim(props, "size", 0.3);
    vec![boxed(length, size, size, [0.0, size / 2.0, 0.0], STEEL)]
}

fn layher(props: &Properties) -> Vec<RenderPart> {
    let w = dim(props, "width", 2.0);
    let d = dim(props, "depth", 2.0);
    let h = dim(props, "height", 2.0);
    let deck = 0.1;
    let leg_h = (h - deck).max(deck);
    let mut parts = vec![boxed(w, deck, d, [0.0, leg_h + deck / 2.0, 0.0], STEEL)];
    for (sx, sz) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        parts.push(cylinder(
            0.025,
            leg_h,
            [sx * (w / 2.0 - 0.05), leg_h / 2.0, sz * (d / 2.0 - 0.05)],
            STEEL,
        ));
    }
    parts
}

fn lighting(props: &Properties) -> Vec<RenderPart> {
    match text_prop(props, "type") {
        Some("par") => vec![cylinder(0.12, 0.3, [0.0, 0.15, 0.0], FIXTURE)],
        _ => vec![
            boxed(0.35, 0.1, 0.35, [0.0, 0.05, 0.0], FIXTURE),
            cylinder(0.15, 0.35, [0.0, 0.275, 0.0], FIXTURE),
        ],
    }
}

fn led_screen(props: &Properties) -> Vec<RenderPart> {
    let w = dim(props, "width", 4.0);
    let h = dim(props, "height", 3.0);
    let d = dim(props, "depth", 0.1);
    let elevation = number_prop(props, "elevation")
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(1.0);
    let mut parts = vec![boxed(w, h, d, [0.0, elevation + h / 2.0, 0.0], SCREEN)];
    if elevation > 0.0 {
        for side in [-1.0, 1.0] {
            parts.push(boxed(
                0.1,
                elevation,
                0.1,
                [side * (w / 2.0 - 0.05), elevation / 2.0, 0.0],
                STEEL,
            ));
        }
    }
    parts
}

fn speaker(props: &Properties) -> Vec<RenderPart> {
    let w = dim(props, "width", 0.6);
    let h = dim(props, "height", 1.0);
    let d = dim(props, "depth", 0.5);
    match text_prop(props, "type") {
        Some("subwoofer") => vec![boxed(w, h * 0.6, d * 1.4, [0.0, h * 0.3, 0.0], SPEAKER)],
        _ => vec![boxed(w, h, d, [0.0, h / 2.0, 0.0], SPEAKER)],
    }
}

fn seating(props: &Properties) -> Vec<RenderPart> {
    let rows = dim(props, "rows", 1.0).floor().max(1.0) as usize;
    let columns = dim(props, "columns", 1.0).floor().max(1.0) as usize;
    let spacing = dim(props, "spacing", 0.6);
    let x0 = -(columns as f64 - 1.0) * spacing / 2.0;
    let z0 = -(rows as f64 - 1.0) * spacing / 2.0;
    let mut parts = Vec::with_capacity(rows * columns);
    for r in 0..rows {
        for c in 0..columns {
            parts.push(boxed(
                0.45,
                0.45,
                0.45,
                [x0 + c as f64 * spacing, 0.225, z0 + r as f64 * spacing],
                SEAT,
            ));
        }
    }
    parts
}

fn decoration(props: &Properties) -> Vec<RenderPart> {
    let w = dim(props, "width", 2.0);
    let d = dim(props, "depth", 0.3);
    let h = dim(props, "height", 2.0);
    vec![boxed(w, h, d, [0.0, h / 2.0, 0.0], FABRIC)]
}

fn special_effect(props: &Properties) -> Vec<RenderPart> {
    match text_prop(props, "type") {
        Some("confetti") => vec![cylinder(0.1, 0.8, [0.0, 0.4, 0.0], EFFECT)],
        _ => vec![boxed(0.5, 0.35, 0.3, [0.0, 0.175, 0.0], EFFECT)],
    }
}

fn camera(props: &Properties) -> Vec<RenderPart> {
    let mast = match text_prop(props, "type") {
        Some("crane") => 3.0,
        _ => 1.4,
    };
    vec![
        cylinder(0.04, mast, [0.0, mast / 2.0, 0.0], STEEL),
        boxed(0.3, 0.25, 0.5, [0.0, mast + 0.125, 0.0], FIXTURE),
    ]
}
