use shared::{Category, DetectRequest, Detection};

use crate::AppState;

const SYSTEM_PROMPT: &str = r#"
You analyse photos and sketches of event stages for a stage rental company.

List every stage element you can see. Allowed categories:
stage, truss, layher, lighting, led_screen, speaker, chair, decoration, special_effect, camera

Positions are metres in a right-handed frame: x to the audience's right, y up, z towards
the audience, origin at the front-centre of the stage floor. Estimate dimensions in metres
where they matter (width, depth, height for stage/decoration/led_screen, width for truss,
rows/columns for seating blocks).

Respond with JSON only:
{
    "detections": [
        {
            "category": "stage",
            "confidence": 0.9,
            "position": [0, 0, 0],
            "properties": { "width": 8, "depth": 5, "height": 1 }
        }
    ]
}
"#;

pub type AiError = Box<dyn std::error::Error + Send + Sync>;

/// Ask the AI model for detections in the request image
pub async fn detect(state: &AppState, request: &DetectRequest) -> Result<Vec<Detection>, AiError> {
    let api_key = state
        .ai_api_key
        .as_ref()
        .ok_or("ANTHROPIC_API_KEY not set")?;

    let response = state
        .http
        .post("https://api.anthropic.com/v1/messages")
        .header("x-api-key", api_key)
        .header("anthropic-version", "2023-06-01")
        .header("content-type", "application/json")
        .json(&serde_json::json!({
            "model": "claude-sonnet-4-20250514",
            "max_tokens": 2048,
            "system": SYSTEM_PROMPT,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "image",
                            "source": {
                                "type": "base64",
                                "media_type": request.media_type,
                                "data": request.image_base64,
                            }
                        },
                        { "type": "text", "text": "List the stage elements in this image." }
                    ]
                }
            ]
        }))
        .send()
        .await?
        .error_for_status()?;

    let body: serde_json::Value = response.json().await?;

    let content_text = body["content"]
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|block| block["text"].as_str())
        .ok_or("AI response has no text block")?;

    parse_detections(content_text)
}

/// Parse the model's reply. Tolerates prose around the JSON object and drops
/// entries with unknown categories.
pub fn parse_detections(text: &str) -> Result<Vec<Detection>, AiError> {
    let start = text.find('{').ok_or("no JSON object in AI reply")?;
    let end = text.rfind('}').ok_or("no JSON object in AI reply")?;
    if end < start {
        return Err("no JSON object in AI reply".into());
    }
    let parsed: serde_json::Value = serde_json::from_str(&text[start..=end])?;

    let detections = parsed
        .get("detections")
        .and_then(|d| d.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value::<Detection>(item.clone()).ok())
                .filter(|d| d.category != Category::Unknown)
                .collect()
        })
        .unwrap_or_default();

    Ok(detections)
}
