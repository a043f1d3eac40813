//! Integration tests for quotation assembly and the price calculator.

use shared::{Category, Properties};
use stage_configurator_lib::build::StageTemplate;
use stage_configurator_lib::fixtures;
use stage_configurator_lib::harness::TestHarness;
use stage_configurator_lib::pricing::{
    price, BASE_PLYWOOD_RATE, CHAIR_RATE, LED_SCREEN_RATE, LIGHTING_RATE, SPEAKER_RATE,
};
use stage_configurator_lib::quotation::{assemble, collect};

#[test]
fn test_default_stage_single_line_item() {
    let mut h = TestHarness::new();
    h.add_default(Category::Stage, [0.0; 3]);
    let q = h.quote();
    assert_eq!(q.items.len(), 1);
    assert_eq!(q.items[0].amount, BASE_PLYWOOD_RATE * 6 * 4);
}

#[test]
fn test_total_is_sum_times_one_point_one() {
    let mut h = TestHarness::new();
    h.apply_template(StageTemplate::Proscenium);
    h.add_default(Category::LedScreen, [0.0, 0.0, -3.0]);
    let q = h.quote();
    let sum: i64 = q.items.iter().map(|i| i.amount).sum();
    assert_eq!(q.subtotal, sum);
    assert_eq!(q.total, sum as f64 * 1.1);
}

#[test]
fn test_line_items_follow_registry_order() {
    let mut h = TestHarness::new();
    let ids = vec![
        h.add_default(Category::Speaker, [0.0; 3]),
        h.add_default(Category::Stage, [0.0; 3]),
        h.add_default(Category::Speaker, [1.0, 0.0, 0.0]),
    ];
    let items = collect(&h.state.scene);
    let got: Vec<_> = items.iter().map(|i| i.id.clone()).collect();
    assert_eq!(got, ids);
    assert_eq!(items[0].amount, SPEAKER_RATE);
    assert_eq!(items[2].amount, SPEAKER_RATE);
}

#[test]
fn test_quote_tracks_undo() {
    let mut h = TestHarness::new();
    h.add_default(Category::Lighting, [0.0; 3]);
    h.add_default(Category::Lighting, [1.0, 0.0, 0.0]);
    assert_eq!(h.quote().subtotal, LIGHTING_RATE * 2);
    h.undo();
    assert_eq!(h.quote().subtotal, LIGHTING_RATE);
}

#[test]
fn test_price_is_deterministic_and_non_negative() {
    let samples = [
        fixtures::stage_props(0.0, 4.0),
        fixtures::stage_props(-2.0, 4.0),
        fixtures::stage_props(2.5, 3.3),
        fixtures::truss_props(7.9),
        fixtures::seating_props(3, 6),
        Properties::new(),
    ];
    for category in Category::ALL {
        for props in &samples {
            let a = price(category, props);
            let b = price(category, props);
            assert_eq!(a, b);
            assert!(a >= 0, "{category:?} {props:?} gave {a}");
        }
    }
}

#[test]
fn test_missing_dimensions_default_to_one() {
    let only_width = fixtures::props(&[("width", 3.0.into())]);
    assert_eq!(price(Category::Stage, &only_width), BASE_PLYWOOD_RATE * 3);
    assert_eq!(price(Category::Chair, &Properties::new()), CHAIR_RATE);
    assert_eq!(
        price(Category::LedScreen, &fixtures::props(&[("height", 2.0.into())])),
        LED_SCREEN_RATE * 2
    );
    assert_eq!(price(Category::Stage, &fixtures::stage_props(0.0, 4.0)), 0);
}

#[test]
fn test_assemble_custom_tax_rate() {
    let mut h = TestHarness::new();
    h.add_default(Category::Chair, [0.0; 3]);
    let q = assemble(collect(&h.state.scene), 0.2);
    assert_eq!(q.subtotal, CHAIR_RATE);
    assert_eq!(q.total, CHAIR_RATE as f64 * 1.2);
}
