use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use shared::{DetectRequest, DetectResponse, DetectionSource, QuotationExport, QuoteRequest};
use stage_configurator_lib::build::StageTemplate;
use stage_configurator_lib::detection::NO_DETECTIONS_NOTICE;
use stage_configurator_lib::state::ConfiguratorState;

use crate::ai;
use crate::heuristic;
use crate::AppState;

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Template catalogue with element counts and base subtotals
pub async fn templates(State(state): State<AppState>) -> Json<Value> {
    let templates: Vec<Value> = StageTemplate::ALL
        .iter()
        .map(|template| {
            let mut configurator = ConfiguratorState::new((*state.settings).clone());
            let ids = configurator.apply_template(*template);
            let quote = configurator.quote();
            json!({
                "name": template.name(),
                "objects": ids.len(),
                "subtotal": quote.subtotal,
                "total": quote.total,
            })
        })
        .collect();
    Json(json!({ "templates": templates }))
}

/// Quotation for a posted scene document
pub async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuotationExport>, StatusCode> {
    let objects = request.scene.objects.len();
    let mut configurator = ConfiguratorState::new((*state.settings).clone());
    let loaded = configurator.scene.load_document(request.scene);
    if loaded != objects {
        tracing::warn!(objects, loaded, "quote request contained duplicate ids");
    }
    if loaded == 0 && objects > 0 {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let export = configurator.export_quote(&request.description, &request.terms);
    tracing::info!(
        items = export.quotation.items.len(),
        subtotal = export.quotation.subtotal,
        "quote assembled"
    );
    Ok(Json(export))
}

/// Image analysis: AI first, local heuristic on failure
pub async fn detect(
    State(state): State<AppState>,
    Json(request): Json<DetectRequest>,
) -> Result<Json<DetectResponse>, StatusCode> {
    let request_id = uuid::Uuid::new_v4();

    let (detections, source) = match ai::detect(&state, &request).await {
        Ok(detections) if !detections.is_empty() => (detections, DetectionSource::Ai),
        Ok(_) => {
            tracing::info!(%request_id, "AI found no elements, trying heuristic");
            fallback(&request)
        }
        Err(e) => {
            tracing::warn!(%request_id, "AI analysis failed: {e}, using heuristic");
            fallback(&request)
        }
    };

    let notice = detections.is_empty().then(|| NO_DETECTIONS_NOTICE.to_string());
    tracing::info!(%request_id, count = detections.len(), ?source, "detect finished");
    Ok(Json(DetectResponse {
        detections,
        source,
        notice,
    }))
}

fn fallback(request: &DetectRequest) -> (Vec<shared::Detection>, DetectionSource) {
    let detections = request
        .luminance
        .as_ref()
        .map(heuristic::detect)
        .unwrap_or_default();
    if detections.is_empty() {
        (detections, DetectionSource::None)
    } else {
        (detections, DetectionSource::Heuristic)
    }
}
