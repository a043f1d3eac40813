use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod numeric;

pub use numeric::{parse_numeric_input, InputError};

/// Unique identifier of a placed scene object
pub type ObjectId = String;

/// Semantic element type of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Stage,
    Truss,
    Layher,
    Lighting,
    LedScreen,
    Speaker,
    Chair,
    Decoration,
    SpecialEffect,
    Camera,
    /// Anything the configurator does not recognize (placeholder box)
    #[serde(other)]
    Unknown,
}

impl Category {
    /// All recognized categories, in library order
    pub const ALL: [Category; 10] = [
        Category::Stage,
        Category::Truss,
        Category::Layher,
        Category::Lighting,
        Category::LedScreen,
        Category::Speaker,
        Category::Chair,
        Category::Decoration,
        Category::SpecialEffect,
        Category::Camera,
    ];

    /// Wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Stage => "stage",
            Category::Truss => "truss",
            Category::Layher => "layher",
            Category::Lighting => "lighting",
            Category::LedScreen => "led_screen",
            Category::Speaker => "speaker",
            Category::Chair => "chair",
            Category::Decoration => "decoration",
            Category::SpecialEffect => "special_effect",
            Category::Camera => "camera",
            Category::Unknown => "unknown",
        }
    }

    /// Parse a wire name; unrecognized names map to `Unknown`
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == name)
            .unwrap_or(Category::Unknown)
    }

    /// Whether this is one of the recognized categories
    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Unknown)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transform axis addressed by numeric field edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index into `[f64; 3]`
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Object transform (rotation in radians)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    /// Identity transform placed at `position`
    pub fn at(position: [f64; 3]) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }
}

/// A single primitive value in an object's property bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl PropertyValue {
    /// Numeric view of the value. Text is accepted when it holds a plain number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            PropertyValue::Text(s) => s.trim().parse::<f64>().ok(),
            PropertyValue::Bool(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

/// Flat, category-specific attribute bag
pub type Properties = BTreeMap<String, PropertyValue>;

/// Numeric property lookup; `None` when absent or not numeric
pub fn number_prop(props: &Properties, key: &str) -> Option<f64> {
    props.get(key).and_then(PropertyValue::as_f64)
}

/// Text property lookup
pub fn text_prop<'a>(props: &'a Properties, key: &str) -> Option<&'a str> {
    props.get(key).and_then(PropertyValue::as_str)
}

/// How an object entered the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Single add from the element library
    #[default]
    Library,
    /// Part of a stage template batch
    Template,
    /// Created from an image-analysis detection
    Detection,
}

/// Shape of one renderable part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Box { width: f64, height: f64, depth: f64 },
    Cylinder { radius: f64, height: f64 },
}

impl Shape {
    /// Half extents of the shape's local bounding box
    pub fn half_extents(&self) -> [f64; 3] {
        match self {
            Shape::Box {
                width,
                height,
                depth,
            } => [width / 2.0, height / 2.0, depth / 2.0],
            Shape::Cylinder { radius, height } => [*radius, height / 2.0, *radius],
        }
    }
}

/// One primitive part of an object, centered at `offset` in object space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPart {
    pub shape: Shape,
    pub offset: [f64; 3],
    pub color: [u8; 3],
}

/// Renderer hand-off: what the external scene graph should draw for an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Renderable {
    pub parts: Vec<RenderPart>,
}

impl Renderable {
    /// Object-space bounds `(min, max)` over all parts
    pub fn local_bounds(&self) -> Option<([f64; 3], [f64; 3])> {
        let mut iter = self.parts.iter();
        let first = iter.next()?;
        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        let he = first.shape.half_extents();
        for i in 0..3 {
            min[i] = first.offset[i] - he[i];
            max[i] = first.offset[i] + he[i];
        }
        for part in iter {
            let he = part.shape.half_extents();
            for i in 0..3 {
                min[i] = min[i].min(part.offset[i] - he[i]);
                max[i] = max[i].max(part.offset[i] + he[i]);
            }
        }
        Some((min, max))
    }
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f32 {
    1.0
}

fn default_document_version() -> u32 {
    1
}

/// A placed object in the scene registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    /// Display label
    #[serde(default)]
    pub name: String,
    pub category: Category,
    pub transform: Transform,
    #[serde(default)]
    pub properties: Properties,
    /// Derived price in the smallest currency unit
    pub price: i64,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub origin: Origin,
    /// Detection confidence (detection-originated objects only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub renderable: Renderable,
}

/// Transform/visibility of one object at snapshot time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub id: ObjectId,
    pub category: Category,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
    pub visible: bool,
}

/// Point-in-time capture of every live object's transform and visibility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HistorySnapshot {
    pub entries: Vec<SnapshotEntry>,
}

impl HistorySnapshot {
    pub fn get(&self, id: &str) -> Option<&SnapshotEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One priced quotation row derived from a single scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationLineItem {
    pub id: ObjectId,
    pub description: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub amount: i64,
}

/// Line items plus totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Quotation {
    pub items: Vec<QuotationLineItem>,
    /// Sum of line item amounts
    pub subtotal: i64,
    pub tax: f64,
    /// `subtotal × (1 + tax rate)`, unrounded
    pub total: f64,
}

/// Payload handed to the quotation template renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationExport {
    #[serde(flatten)]
    pub quotation: Quotation,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub terms: String,
}

/// Element reported by image analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub category: Category,
    pub confidence: f32,
    pub position: [f64; 3],
    #[serde(default)]
    pub properties: Properties,
}

/// Saved form of a scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedObject {
    pub id: ObjectId,
    pub category: Category,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: Properties,
    pub transform: Transform,
    pub price: i64,
    #[serde(default)]
    pub origin: Origin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Downloadable scene document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default = "default_document_version")]
    pub version: u32,
    pub objects: Vec<SavedObject>,
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self {
            version: 1,
            objects: Vec::new(),
        }
    }
}

/// Quote request from the front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub scene: SceneDocument,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub terms: String,
}

/// Downsampled luminance of the analysed image, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuminanceGrid {
    pub width: usize,
    pub height: usize,
    pub values: Vec<u8>,
}

/// Image-analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectRequest {
    /// Base64 image data for the AI call
    pub image_base64: String,
    #[serde(default = "default_media_type")]
    pub media_type: String,
    /// Input for the local fallback heuristic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub luminance: Option<LuminanceGrid>,
}

fn default_media_type() -> String {
    "image/png".to_string()
}

/// Which analyser produced a detection list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    Ai,
    Heuristic,
    None,
}

/// Image-analysis response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectResponse {
    pub detections: Vec<Detection>,
    pub source: DetectionSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&Category::LedScreen).unwrap();
        assert_eq!(json, r#""led_screen""#);
        let back: Category = serde_json::from_str(r#""special_effect""#).unwrap();
        assert_eq!(back, Category::SpecialEffect);
    }

    #[test]
    fn test_category_unknown_falls_through() {
        let c: Category = serde_json::from_str(r#""fog_machine""#).unwrap();
        assert_eq!(c, Category::Unknown);
        assert!(!c.is_known());
        assert_eq!(Category::from_name("hologram"), Category::Unknown);
    }

    #[test]
    fn test_category_from_name_matches_wire_names() {
        for c in Category::ALL {
            assert_eq!(Category::from_name(c.as_str()), c);
        }
        assert_eq!(Category::from_name(" Truss "), Category::Truss);
    }

    #[test]
    fn test_transform_new() {
        let t = Transform::new();
        assert_eq!(t.position, [0.0; 3]);
        assert_eq!(t.scale, [1.0; 3]);
        assert_eq!(Transform::at([1.0, 2.0, 3.0]).position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_property_value_untagged() {
        let props: Properties =
            serde_json::from_str(r#"{"width": 6, "material": "plywood", "skirt": true, "depth": "4.5"}"#)
                .unwrap();
        assert_eq!(number_prop(&props, "width"), Some(6.0));
        assert_eq!(number_prop(&props, "depth"), Some(4.5));
        assert_eq!(number_prop(&props, "skirt"), None);
        assert_eq!(text_prop(&props, "material"), Some("plywood"));
        assert_eq!(number_prop(&props, "missing"), None);
    }

    #[test]
    fn test_scene_object_defaults_on_deserialize() {
        let json = r#"{"id": "a", "category": "stage", "transform": {"position": [0,0,0], "rotation": [0,0,0], "scale": [1,1,1]}, "price": 100}"#;
        let obj: SceneObject = serde_json::from_str(json).unwrap();
        assert!(obj.visible);
        assert_eq!(obj.opacity, 1.0);
        assert_eq!(obj.origin, Origin::Library);
        assert!(obj.confidence.is_none());
    }

    #[test]
    fn test_renderable_local_bounds() {
        let r = Renderable {
            parts: vec![
                RenderPart {
                    shape: Shape::Box {
                        width: 2.0,
                        height: 1.0,
                        depth: 2.0,
                    },
                    offset: [0.0, 0.5, 0.0],
                    color: [0, 0, 0],
                },
                RenderPart {
                    shape: Shape::Cylinder {
                        radius: 0.5,
                        height: 2.0,
                    },
                    offset: [0.0, 2.0, 0.0],
                    color: [0, 0, 0],
                },
            ],
        };
        let (min, max) = r.local_bounds().unwrap();
        assert_eq!(min, [-1.0, 0.0, -1.0]);
        assert_eq!(max, [1.0, 3.0, 1.0]);
        assert!(Renderable::default().local_bounds().is_none());
    }

    #[test]
    fn test_quotation_export_flattens() {
        let export = QuotationExport {
            quotation: Quotation {
                items: vec![],
                subtotal: 1000,
                tax: 100.0,
                total: 1100.0,
            },
            description: "Summer festival".to_string(),
            terms: String::new(),
        };
        let value = serde_json::to_value(&export).unwrap();
        assert_eq!(value["subtotal"], 1000);
        assert_eq!(value["description"], "Summer festival");
    }

    #[test]
    fn test_scene_document_version_default() {
        let doc: SceneDocument = serde_json::from_str(r#"{"objects": []}"#).unwrap();
        assert_eq!(doc.version, 1);
        assert!(doc.objects.is_empty());
    }

    #[test]
    fn test_detect_request_defaults() {
        let req: DetectRequest = serde_json::from_str(r#"{"image_base64": "AAAA"}"#).unwrap();
        assert_eq!(req.media_type, "image/png");
        assert!(req.luminance.is_none());
    }
}
