//! Fixed stage layouts.
//!
//! A template is a deterministic list of placements; applying one replaces
//! every previously template-originated object.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};
use shared::{Category, Properties, PropertyValue};

/// Named stage layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageTemplate {
    /// End stage with backdrop, front truss and a seating grid
    Proscenium,
    /// End stage with a runway into the audience
    Thrust,
    /// Centre stage with seating on four sides
    Arena,
}

/// One element of a template
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub category: Category,
    pub params: Properties,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
}

impl Placement {
    fn new(category: Category, position: [f64; 3]) -> Self {
        Self {
            category,
            params: Properties::new(),
            position,
            rotation: [0.0; 3],
        }
    }

    fn with(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    fn rotated_y(mut self, angle: f64) -> Self {
        self.rotation[1] = angle;
        self
    }
}

/// Lighting fixtures on the proscenium truss
pub const PROSCENIUM_LIGHTS: usize = 4;
/// Seat rows in the proscenium grid
pub const PROSCENIUM_SEAT_ROWS: usize = 3;
/// Seats per row in the proscenium grid
pub const PROSCENIUM_SEAT_COLUMNS: usize = 6;

impl StageTemplate {
    pub const ALL: [StageTemplate; 3] = [
        StageTemplate::Proscenium,
        StageTemplate::Thrust,
        StageTemplate::Arena,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StageTemplate::Proscenium => "proscenium",
            StageTemplate::Thrust => "thrust",
            StageTemplate::Arena => "arena",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Elements of the layout, in insertion order
    pub fn placements(&self) -> Vec<Placement> {
        match self {
            StageTemplate::Proscenium => proscenium(),
            StageTemplate::Thrust => thrust(),
            StageTemplate::Arena => arena(),
        }
    }
}

fn proscenium() -> Vec<Placement> {
    let mut out = vec![
        Placement::new(Category::Stage, [0.0, 0.0, 0.0])
            .with("width", 8.0)
            .with("depth", 5.0)
            .with("height", 1.0),
        Placement::new(Category::Decoration, [0.0, 1.0, -2.35])
            .with("type", "backdrop")
            .with("width", 8.0)
            .with("depth", 0.3)
            .with("height", 4.0),
        Placement::new(Category::Truss, [0.0, 5.0, -1.5]).with("width", 8.0),
    ];

    for i in 0..PROSCENIUM_LIGHTS {
        let x = -3.0 + 2.0 * i as f64;
        out.push(Placement::new(Category::Lighting, [x, 4.6, -1.5]).with("type", "moving_head"));
    }

    for x in [-5.0, 5.0] {
        out.push(Placement::new(Category::Speaker, [x, 0.0, 2.0]).with("type", "line_array"));
    }

    for r in 0..PROSCENIUM_SEAT_ROWS {
        for c in 0..PROSCENIUM_SEAT_COLUMNS {
            let x = -2.5 + c as f64;
            let z = 5.0 + 1.2 * r as f64;
            out.push(Placement::new(Category::Chair, [x, 0.0, z]));
        }
    }

    out
}

fn thrust() -> Vec<Placement> {
    let mut out = vec![
        Placement::new(Category::Stage, [0.0, 0.0, 0.0])
            .with("width", 6.0)
            .with("depth", 4.0)
            .with("height", 1.0),
        Placement::new(Category::Stage, [0.0, 0.0, 4.0])
            .with("width", 2.0)
            .with("depth", 4.0)
            .with("height", 1.0),
        Placement::new(Category::LedScreen, [0.0, 1.0, -1.9])
            .with("width", 5.0)
            .with("height", 3.0)
            .with("elevation", 0.5),
        Placement::new(Category::Truss, [0.0, 5.0, 0.0]).with("width", 6.0),
    ];

    for x in [-2.0, 2.0] {
        out.push(Placement::new(Category::Lighting, [x, 4.6, 0.0]).with("type", "moving_head"));
    }
    for x in [-4.0, 4.0] {
        out.push(Placement::new(Category::Speaker, [x, 0.0, 1.5]).with("type", "line_array"));
    }

    out.push(
        Placement::new(Category::Chair, [-4.5, 0.0, 5.0])
            .with("rows", 4.0)
            .with("columns", 5.0)
            .rotated_y(FRAC_PI_2),
    );
    out.push(
        Placement::new(Category::Chair, [4.5, 0.0, 5.0])
            .with("rows", 4.0)
            .with("columns", 5.0)
            .rotated_y(-FRAC_PI_2),
    );
    out.push(
        Placement::new(Category::Chair, [0.0, 0.0, 9.0])
            .with("rows", 3.0)
            .with("columns", 6.0),
    );

    out
}

fn arena() -> Vec<Placement> {
    let mut out = vec![Placement::new(Category::Stage, [0.0, 0.0, 0.0])
        .with("width", 6.0)
        .with("depth", 6.0)
        .with("height", 1.0)];

    // Square truss rig: two bars along x, two rotated along z
    for z in [-3.0, 3.0] {
        out.push(Placement::new(Category::Truss, [0.0, 6.0, z]).with("width", 6.0));
    }
    for x in [-3.0, 3.0] {
        out.push(
            Placement::new(Category::Truss, [x, 6.0, 0.0])
                .with("width", 6.0)
                .rotated_y(FRAC_PI_2),
        );
    }

    for (x, z) in [(-3.0, -3.0), (3.0, -3.0), (-3.0, 3.0), (3.0, 3.0)] {
        out.push(Placement::new(Category::Lighting, [x, 5.6, z]).with("type", "moving_head"));
        out.push(
            Placement::new(Category::Speaker, [x * 1.5, 0.0, z * 1.5]).with("type", "line_array"),
        );
    }

    for (i, (x, z)) in [(0.0, 7.0), (7.0, 0.0), (0.0, -7.0), (-7.0, 0.0)]
        .into_iter()
        .enumerate()
    {
        out.push(
            Placement::new(Category::Chair, [x, 0.0, z])
                .with("rows", 5.0)
                .with("columns", 8.0)
                .rotated_y(FRAC_PI_2 * i as f64),
        );
    }

    out
}
