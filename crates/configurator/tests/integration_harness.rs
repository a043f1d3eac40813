//! Integration tests for TestHarness.
//!
//! Exercises the headless harness end to end: placement, templates, selection,
//! undo/redo and persistence.

use shared::{Axis, Category, Origin};
use stage_configurator_lib::build::templates::{
    PROSCENIUM_LIGHTS, PROSCENIUM_SEAT_COLUMNS, PROSCENIUM_SEAT_ROWS,
};
use stage_configurator_lib::build::StageTemplate;
use stage_configurator_lib::fixtures;
use stage_configurator_lib::harness::TestHarness;

#[test]
fn test_harness_undo_redo_cycle() {
    let mut h = TestHarness::new();
    h.add_default(Category::Stage, [0.0; 3]);
    h.add_default(Category::Truss, [0.0, 5.0, 0.0]);
    assert_eq!(h.visible_count(), 2);

    assert!(h.undo());
    assert_eq!(h.visible_count(), 1);

    assert!(h.undo());
    assert_eq!(h.visible_count(), 0);

    assert!(!h.undo()); // nothing to undo
    assert_eq!(h.history_cursor(), 0);

    assert!(h.redo());
    assert_eq!(h.visible_count(), 1);

    assert!(h.redo());
    assert_eq!(h.visible_count(), 2);

    assert!(!h.redo()); // nothing to redo
    // Undo only hides; both objects stayed in the registry throughout
    assert_eq!(h.object_count(), 2);
}

#[test]
fn test_harness_new_mutation_drops_redo() {
    let mut h = TestHarness::new();
    let a = h.add_default(Category::Speaker, [0.0; 3]);
    h.add_default(Category::Speaker, [2.0, 0.0, 0.0]);
    h.undo();
    h.state.scene.set_position_field(&a, Axis::X, "4");
    assert!(!h.state.scene.can_redo());
    assert!(!h.redo());
    assert_eq!(h.visible_count(), 1);
}

#[test]
fn test_proscenium_twice_replaces_batch() {
    let mut h = TestHarness::new();
    let manual = h.add_default(Category::Camera, [10.0, 0.0, 10.0]);

    let first = h.apply_template(StageTemplate::Proscenium);
    let second = h.apply_template(StageTemplate::Proscenium);

    let expected = 3 + PROSCENIUM_LIGHTS + 2 + PROSCENIUM_SEAT_ROWS * PROSCENIUM_SEAT_COLUMNS;
    assert_eq!(first.len(), expected);
    assert_eq!(second.len(), expected);
    assert!(first.iter().all(|id| h.object(id).is_none()));

    let template_ids = h.state.scene.template_object_ids();
    assert_eq!(template_ids, second);
    assert_eq!(h.object_count(), expected + 1);
    assert_eq!(h.object(&manual).unwrap().origin, Origin::Library);
    assert_eq!(h.count_of(Category::Lighting), PROSCENIUM_LIGHTS);
    assert_eq!(h.count_of(Category::Speaker), 2);
}

#[test]
fn test_switching_templates_is_exclusive() {
    let mut h = TestHarness::new();
    h.apply_template(StageTemplate::Arena);
    let thrust = h.apply_template(StageTemplate::Thrust);
    assert_eq!(h.state.scene.template_object_ids(), thrust);
}

#[test]
fn test_template_batch_is_one_undo_step() {
    let mut h = TestHarness::new();
    let ids = h.apply_template(StageTemplate::Proscenium);
    assert_eq!(h.history_len(), 2);
    h.undo();
    assert_eq!(h.visible_count(), 0);
    h.redo();
    assert_eq!(h.visible_count(), ids.len());
}

#[test]
fn test_select_delete_undo_is_documented_noop() {
    let mut h = TestHarness::new();
    let id = h.add_default(Category::Stage, [0.0; 3]);
    h.click(Some(&id));
    assert_eq!(h.selected(), Some(id.as_str()));

    assert!(h.state.delete_selected());
    assert!(h.selected().is_none());
    assert!(h.state.selection.is_idle());

    // Deletion is physical: undo moves the cursor but cannot bring it back
    assert!(h.undo());
    assert!(h.object(&id).is_none());
    assert_eq!(h.visible_count(), 0);
    assert!(h.validator().is_valid());
}

#[test]
fn test_scale_inputs_never_nonpositive() {
    let mut h = TestHarness::new();
    let id = h.add_default(Category::LedScreen, [0.0; 3]);
    for input in ["0", "", "-1", "-0.5*4", "nonsense", "0.000001"] {
        h.state.scene.set_scale_field(&id, Axis::X, input);
        h.state.scene.set_uniform_scale_field(&id, input);
        let scale = h.object(&id).unwrap().transform.scale;
        assert!(scale.iter().all(|s| *s > 0.0), "input {input:?} gave {scale:?}");
    }
}

#[test]
fn test_position_never_below_ground() {
    let mut h = TestHarness::new();
    let id = h.add_default(Category::Truss, [0.0, 5.0, 0.0]);
    for input in ["-1", "-100", "2-3", "-0.0001"] {
        h.state.scene.set_position_field(&id, Axis::Y, input);
        assert!(h.object(&id).unwrap().transform.position[1] >= 0.0);
    }
    h.state.scene.begin_drag(&id);
    h.state.scene.drag_by([0.0, -50.0, 0.0]);
    h.state.scene.end_drag();
    assert_eq!(h.object(&id).unwrap().transform.position[1], 0.0);
}

#[test]
fn test_duplicate_then_undo_hides_copy() {
    let mut h = TestHarness::new();
    let id = h.add_default(Category::Lighting, [0.0, 4.0, 0.0]);
    h.select(&id);
    let copy = h.duplicate(&id).unwrap();
    assert_eq!(h.selected(), Some(copy.as_str()));
    h.undo();
    assert!(!h.object(&copy).unwrap().visible);
    assert!(h.selected().is_none());
}

#[test]
fn test_load_document_resets_history() {
    let mut h = TestHarness::new();
    h.add_default(Category::Camera, [0.0; 3]);
    let count = h.load_document(fixtures::stage_and_truss_document());
    assert_eq!(count, 2);
    assert_eq!(h.history_len(), 1);
    assert!(!h.undo());
    assert!(h.object("stage-1").is_some());
    assert!(h.validator().is_valid());
}

#[test]
fn test_detections_through_harness() {
    let mut h = TestHarness::new();
    let out = h.state.ingest_detections(&fixtures::concert_detections());
    assert_eq!(out.added.len(), 4);
    let translucent = out
        .added
        .iter()
        .filter(|id| h.object(id).unwrap().opacity < 1.0)
        .count();
    assert_eq!(translucent, 1);
    assert_eq!(h.quote().items.len(), 4);
}

#[test]
fn test_harness_template_reapplied_after_reload() {
    let mut h = TestHarness::new();
    let batch = h.apply_template(StageTemplate::Proscenium).len();
    let json = h.save_scene_json().unwrap();

    let mut reloaded = TestHarness::new();
    assert_eq!(reloaded.load_scene_json(&json).unwrap(), batch);
    reloaded.apply_template(StageTemplate::Proscenium);
    assert_eq!(reloaded.object_count(), batch);
    assert_eq!(reloaded.visible_count(), batch);
}

#[test]
fn test_harness_zero_min_scale_setting_keeps_scale_positive() {
    let mut settings = stage_configurator_lib::state::ConfiguratorSettings::default();
    settings.scene.min_scale = 0.0;
    let mut h = TestHarness::with_settings(settings);
    let id = h.add_default(Category::Speaker, [0.0; 3]);
    assert!(h.state.scene.set_scale_field(&id, Axis::X, "0"));
    assert!(h.state.scene.set_scale_field(&id, Axis::Z, "-1"));
    assert!(h.validator().are_scales_positive());
}

#[test]
fn test_harness_huge_stages_quote_without_overflow() {
    let mut h = TestHarness::new();
    h.add(Category::Stage, fixtures::stage_props(1e300, 4.0), [0.0; 3]);
    h.add(Category::Stage, fixtures::stage_props(1e300, 4.0), [0.0; 3]);
    let q = h.quote();
    assert_eq!(q.subtotal, i64::MAX);
}
