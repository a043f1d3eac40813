//! Local image heuristic used when the AI call fails.
//!
//! Works on a downsampled luminance grid sent by the browser. Checks, in order:
//! 1. bright spots in the top quarter → lighting fixtures
//! 2. a bright central block in the middle band → LED screen
//! 3. a wide bright band in the bottom third → stage platform
//! 4. dark columns at the outer edges → speakers
//!
//! Confidences stay below the translucency threshold so the user sees these
//! are guesses.

use shared::{Category, Detection, LuminanceGrid, Properties, PropertyValue};

/// Horizontal extent of the scene the image width maps onto, in metres
const SCENE_WIDTH_M: f64 = 12.0;
const SPOT_LEVEL: u8 = 220;
const SCREEN_LEVEL: f64 = 170.0;
const FLOOR_LEVEL: u8 = 110;
const DARK_LEVEL: f64 = 50.0;
/// Fraction of the width a stage band must cover
const MIN_STAGE_SPAN: f64 = 0.4;

struct Grid<'a> {
    width: usize,
    height: usize,
    values: &'a [u8],
}

impl Grid<'_> {
    fn at(&self, x: usize, y: usize) -> u8 {
        self.values[y * self.width + x]
    }

    /// Mean over columns `x0..x1` and rows `y0..y1`
    fn mean(&self, x0: usize, x1: usize, y0: usize, y1: usize) -> f64 {
        let mut sum = 0u64;
        let mut n = 0u64;
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                sum += u64::from(self.at(x, y));
                n += 1;
            }
        }
        if n == 0 {
            0.0
        } else {
            sum as f64 / n as f64
        }
    }

    /// World x of a column centre
    fn world_x(&self, column: f64) -> f64 {
        ((column + 0.5) / self.width as f64 - 0.5) * SCENE_WIDTH_M
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn detection(category: Category, confidence: f32, position: [f64; 3]) -> Detection {
    Detection {
        category,
        confidence,
        position,
        properties: Properties::new(),
    }
}

/// Guess stage elements from a luminance grid. Malformed grids give nothing.
pub fn detect(grid: &LuminanceGrid) -> Vec<Detection> {
    let expected = grid.width.checked_mul(grid.height);
    if grid.width < 4 || grid.height < 4 || expected != Some(grid.values.len()) {
        tracing::debug!(
            width = grid.width,
            height = grid.height,
            len = grid.values.len(),
            "luminance grid unusable"
        );
        return Vec::new();
    }
    let g = Grid {
        width: grid.width,
        height: grid.height,
        values: &grid.values,
    };

    let mut out = Vec::new();
    detect_lights(&g, &mut out);
    detect_screen(&g, &mut out);
    detect_stage(&g, &mut out);
    detect_speakers(&g, &mut out);
    out
}

fn detect_lights(g: &Grid, out: &mut Vec<Detection>) {
    let top = (g.height / 4).max(1);
    let lit: Vec<bool> = (0..g.width)
        .map(|x| (0..top).any(|y| g.at(x, y) >= SPOT_LEVEL))
        .collect();

    // One fixture per run of lit columns
    let mut x = 0;
    while x < g.width {
        if !lit[x] {
            x += 1;
            continue;
        }
        let start = x;
        while x < g.width && lit[x] {
            x += 1;
        }
        let centre = (start + x - 1) as f64 / 2.0;
        let mut d = detection(Category::Lighting, 0.4, [round1(g.world_x(centre)), 5.0, -1.0]);
        d.properties
            .insert("type".into(), PropertyValue::Text("moving_head".into()));
        out.push(d);
    }
}

fn detect_screen(g: &Grid, out: &mut Vec<Detection>) {
    let (x0, x1) = (g.width / 4, g.width * 3 / 4);
    let (y0, y1) = (g.height / 4, g.height * 3 / 5);
    if g.mean(x0, x1, y0, y1) < SCREEN_LEVEL {
        return;
    }
    let width = round1((x1 - x0) as f64 / g.width as f64 * SCENE_WIDTH_M);
    let mut d = detection(Category::LedScreen, 0.45, [0.0, 0.0, -2.0]);
    d.properties.insert("width".into(), PropertyValue::Number(width));
    d.properties.insert("height".into(), PropertyValue::Number(round1(width * 0.56)));
    out.push(d);
}

fn detect_stage(g: &Grid, out: &mut Vec<Detection>) {
    let from = g.height * 2 / 3;
    let best_row = (from..g.height)
        .max_by(|a, b| g.mean(0, g.width, *a, *a + 1).total_cmp(&g.mean(0, g.width, *b, *b + 1)));
    let Some(row) = best_row else {
        return;
    };

    // Longest run of floor-bright cells on that row
    let mut best = (0usize, 0usize);
    let mut start = None;
    for x in 0..=g.width {
        let bright = x < g.width && g.at(x, row) >= FLOOR_LEVEL;
        match (bright, start) {
            (true, None) => start = Some(x),
            (false, Some(s)) => {
                if x - s > best.1 - best.0 {
                    best = (s, x);
                }
                start = None;
            }
            _ => {}
        }
    }
    let span = (best.1 - best.0) as f64 / g.width as f64;
    if span < MIN_STAGE_SPAN {
        return;
    }

    let centre = (best.0 + best.1 - 1) as f64 / 2.0;
    let mut d = detection(Category::Stage, 0.5, [round1(g.world_x(centre)), 0.0, 0.0]);
    d.properties
        .insert("width".into(), PropertyValue::Number(round1(span * SCENE_WIDTH_M)));
    d.properties.insert("depth".into(), PropertyValue::Number(4.0));
    out.push(d);
}

fn detect_speakers(g: &Grid, out: &mut Vec<Detection>) {
    let edge = (g.width * 3 / 20).max(1);
    let (y0, y1) = (g.height / 3, g.height);
    let half = SCENE_WIDTH_M / 2.0 - 0.5;
    if g.mean(0, edge, y0, y1) <= DARK_LEVEL {
        out.push(detection(Category::Speaker, 0.35, [-half, 0.0, 1.0]));
    }
    if g.mean(g.width - edge, g.width, y0, y1) <= DARK_LEVEL {
        out.push(detection(Category::Speaker, 0.35, [half, 0.0, 1.0]));
    }
}
