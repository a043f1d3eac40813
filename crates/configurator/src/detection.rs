//! Ingest of image-analysis detections into the scene
//!
//! Detections take the same factory path as a library pick. They are tagged
//! with their confidence and drawn translucent below the threshold.

use shared::{Detection, ObjectId, Origin};

use crate::state::scene::{category_label, NewObject, SceneState};
use crate::state::settings::DetectionSettings;

/// Shown when analysis found nothing to place
pub const NO_DETECTIONS_NOTICE: &str =
    "No stage elements were detected in the image. Add elements manually from the library.";

/// Result of feeding detections into the scene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionOutcome {
    pub added: Vec<ObjectId>,
    /// Informational message for the user, if any
    pub notice: Option<String>,
}

/// Add one object per detection. Each add records its own snapshot.
pub fn ingest_detections(
    scene: &mut SceneState,
    settings: &DetectionSettings,
    detections: &[Detection],
) -> DetectionOutcome {
    if detections.is_empty() {
        tracing::info!("image analysis returned no detections");
        return DetectionOutcome {
            added: Vec::new(),
            notice: Some(NO_DETECTIONS_NOTICE.to_string()),
        };
    }

    let mut added = Vec::with_capacity(detections.len());
    for detection in detections {
        let confidence = if detection.confidence.is_finite() {
            detection.confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let opacity = if confidence < settings.confidence_threshold {
            settings.low_confidence_opacity
        } else {
            1.0
        };

        let mut new = NewObject::library(
            detection.category,
            &detection.properties,
            detection.position,
        );
        new.origin = Origin::Detection;
        new.confidence = Some(confidence);
        new.opacity = opacity;

        let object = scene.insert_object(new);
        scene.snapshot();
        tracing::debug!(
            id = %object.id,
            label = category_label(object.category),
            confidence,
            "detection placed"
        );
        added.push(object.id);
    }

    tracing::info!(count = added.len(), "detections ingested");
    DetectionOutcome {
        added,
        notice: None,
    }
}
