//! Price calculator.
//!
//! Maps an element category and its dimensional properties to an amount in
//! the smallest currency unit. Pure: no registry access, no side effects.

use serde::{Deserialize, Serialize};
use shared::{number_prop, Category, Properties};

/// Plywood stage deck, per square metre
pub const BASE_PLYWOOD_RATE: i64 = 5_000;
/// Decoration panels, per square metre
pub const DECORATION_RATE: i64 = 3_000;
/// LED screen face, per square metre
pub const LED_SCREEN_RATE: i64 = 40_000;
/// Truss, per metre
pub const TRUSS_RATE: i64 = 4_000;
/// Seating, per seat
pub const CHAIR_RATE: i64 = 500;
/// Lighting fixture, flat
pub const LIGHTING_RATE: i64 = 15_000;
/// Speaker, flat
pub const SPEAKER_RATE: i64 = 30_000;
/// Everything else, flat
pub const DEFAULT_RATE: i64 = 10_000;

/// Per-unit rates used by the calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceRates {
    pub stage_per_m2: i64,
    pub decoration_per_m2: i64,
    pub led_screen_per_m2: i64,
    pub truss_per_m: i64,
    pub chair_per_seat: i64,
    pub lighting_flat: i64,
    pub speaker_flat: i64,
    pub default_flat: i64,
}

impl Default for PriceRates {
    fn default() -> Self {
        Self {
            stage_per_m2: BASE_PLYWOOD_RATE,
            decoration_per_m2: DECORATION_RATE,
            led_screen_per_m2: LED_SCREEN_RATE,
            truss_per_m: TRUSS_RATE,
            chair_per_seat: CHAIR_RATE,
            lighting_flat: LIGHTING_RATE,
            speaker_flat: SPEAKER_RATE,
            default_flat: DEFAULT_RATE,
        }
    }
}

/// How a category is priced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingRule {
    /// rate × width × depth (height for the vertical LED face)
    Area,
    /// rate × width
    Length,
    /// rate × rows × columns
    Count,
    Flat,
}

/// Pricing rule for a category
pub fn pricing_rule(category: Category) -> PricingRule {
    match category {
        Category::Stage | Category::Decoration | Category::LedScreen => PricingRule::Area,
        Category::Truss => PricingRule::Length,
        Category::Chair => PricingRule::Count,
        Category::Lighting
        | Category::Speaker
        | Category::Layher
        | Category::SpecialEffect
        | Category::Camera
        | Category::Unknown => PricingRule::Flat,
    }
}

/// Dimensional factor: absent or non-numeric defaults to 1, negatives count as 0
fn factor(props: &Properties, key: &str) -> f64 {
    match number_prop(props, key) {
        Some(v) if v.is_finite() => v.max(0.0),
        _ => 1.0,
    }
}

fn scaled(rate: i64, a: f64, b: f64) -> i64 {
    let amount = (rate as f64 * a * b).trunc();
    if amount.is_finite() && amount > 0.0 {
        amount as i64
    } else {
        0
    }
}

impl PriceRates {
    /// Price of one element
    pub fn price(&self, category: Category, props: &Properties) -> i64 {
        match category {
            Category::Stage => scaled(
                self.stage_per_m2,
                factor(props, "width"),
                factor(props, "depth"),
            ),
            Category::Decoration => scaled(
                self.decoration_per_m2,
                factor(props, "width"),
                factor(props, "depth"),
            ),
            Category::LedScreen => scaled(
                self.led_screen_per_m2,
                factor(props, "width"),
                factor(props, "height"),
            ),
            Category::Truss => scaled(self.truss_per_m, factor(props, "width"), 1.0),
            Category::Chair => scaled(
                self.chair_per_seat,
                factor(props, "rows"),
                factor(props, "columns"),
            ),
            Category::Lighting => self.lighting_flat.max(0),
            Category::Speaker => self.speaker_flat.max(0),
            Category::Layher | Category::SpecialEffect | Category::Camera | Category::Unknown => {
                self.default_flat.max(0)
            }
        }
    }
}

/// Price with the standard rate card
pub fn price(category: Category, props: &Properties) -> i64 {
    PriceRates::default().price(category, props)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, f64)]) -> Properties {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), (*v).into()))
            .collect()
    }

    #[test]
    fn test_stage_is_area_based() {
        let p = props(&[("width", 6.0), ("depth", 4.0)]);
        assert_eq!(price(Category::Stage, &p), BASE_PLYWOOD_RATE * 24);
    }

    #[test]
    fn test_missing_dimensions_default_to_one() {
        assert_eq!(price(Category::Stage, &Properties::new()), BASE_PLYWOOD_RATE);
        let p = props(&[("width", 3.0)]);
        assert_eq!(price(Category::Decoration, &p), DECORATION_RATE * 3);
    }

    #[test]
    fn test_explicit_zero_gives_zero() {
        let p = props(&[("width", 0.0), ("depth", 4.0)]);
        assert_eq!(price(Category::Stage, &p), 0);
    }

    #[test]
    fn test_truss_is_length_based() {
        let p = props(&[("width", 6.0), ("depth", 100.0)]);
        assert_eq!(price(Category::Truss, &p), TRUSS_RATE * 6);
    }

    #[test]
    fn test_chair_is_count_based() {
        let p = props(&[("rows", 3.0), ("columns", 6.0)]);
        assert_eq!(price(Category::Chair, &p), CHAIR_RATE * 18);
    }

    #[test]
    fn test_led_screen_uses_face_area() {
        let p = props(&[("width", 4.0), ("height", 3.0), ("depth", 0.1)]);
        assert_eq!(price(Category::LedScreen, &p), LED_SCREEN_RATE * 12);
    }

    #[test]
    fn test_flat_rates_ignore_dimensions() {
        let p = props(&[("width", 50.0), ("depth", 50.0)]);
        assert_eq!(price(Category::Lighting, &p), LIGHTING_RATE);
        assert_eq!(price(Category::Speaker, &p), SPEAKER_RATE);
        assert_eq!(price(Category::Camera, &p), DEFAULT_RATE);
        assert_eq!(price(Category::Unknown, &p), DEFAULT_RATE);
    }

    #[test]
    fn test_truncates_fractional_amounts() {
        let p = props(&[("width", 1.5), ("depth", 1.3333)]);
        let expected = (BASE_PLYWOOD_RATE as f64 * 1.5 * 1.3333).trunc() as i64;
        assert_eq!(price(Category::Stage, &p), expected);
    }

    #[test]
    fn test_never_negative() {
        let p = props(&[("width", -6.0), ("depth", 4.0), ("rows", -2.0)]);
        for c in Category::ALL {
            assert!(price(c, &p) >= 0, "{c} priced negative");
        }
    }

    #[test]
    fn test_deterministic() {
        let p = props(&[("width", 2.5), ("depth", 2.5)]);
        assert_eq!(price(Category::Stage, &p), price(Category::Stage, &p));
    }

    #[test]
    fn test_text_dimensions_are_read() {
        let mut p = Properties::new();
        p.insert("width".into(), "2".into());
        p.insert("depth".into(), "2".into());
        assert_eq!(price(Category::Stage, &p), BASE_PLYWOOD_RATE * 4);
    }

    #[test]
    fn test_custom_rates() {
        let rates = PriceRates {
            truss_per_m: 1_000,
            ..Default::default()
        };
        let p = props(&[("width", 3.0)]);
        assert_eq!(rates.price(Category::Truss, &p), 3_000);
    }

    #[test]
    fn test_rules() {
        assert_eq!(pricing_rule(Category::Stage), PricingRule::Area);
        assert_eq!(pricing_rule(Category::Truss), PricingRule::Length);
        assert_eq!(pricing_rule(Category::Chair), PricingRule::Count);
        assert_eq!(pricing_rule(Category::Layher), PricingRule::Flat);
    }
}
