//! Configurator settings

use serde::{Deserialize, Serialize};

use crate::pricing::PriceRates;

/// Scale used when the configured minimum is zero, negative or not finite
pub const MIN_SCALE_FLOOR: f64 = 0.001;

/// Scene invariants and history sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Lowest allowed world-space y of an object's position
    pub ground_level: f64,
    /// Smallest scale component ever stored
    pub min_scale: f64,
    /// Maximum number of history snapshots kept
    pub history_limit: usize,
    /// Offset applied to a duplicated object
    pub duplicate_offset: [f64; 3],
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            ground_level: 0.0,
            min_scale: 0.01,
            history_limit: 100,
            duplicate_offset: [1.0, 0.0, 0.0],
        }
    }
}

impl SceneSettings {
    /// Configured `min_scale`, or [`MIN_SCALE_FLOOR`] when it is not positive
    pub fn effective_min_scale(&self) -> f64 {
        positive_min_scale(self.min_scale)
    }
}

/// `min_scale` if it is a usable positive value, otherwise the floor
pub fn positive_min_scale(min_scale: f64) -> f64 {
    if min_scale.is_finite() && min_scale > 0.0 {
        min_scale
    } else {
        MIN_SCALE_FLOOR
    }
}

/// Selection feedback and click handling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Opacity multiplier applied to the selected object
    pub selected_opacity: f32,
    /// Clicks closer together than this are a double-click
    pub double_click_ms: u64,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            selected_opacity: 0.6,
            double_click_ms: 250,
        }
    }
}

/// Image-detection ingest
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSettings {
    /// Detections below this confidence are drawn translucent
    pub confidence_threshold: f32,
    /// Opacity of low-confidence detections
    pub low_confidence_opacity: f32,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.6,
            low_confidence_opacity: 0.5,
        }
    }
}

/// Quotation totals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSettings {
    pub tax_rate: f64,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self { tax_rate: 0.1 }
    }
}

/// All configurator settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfiguratorSettings {
    #[serde(default)]
    pub pricing: PriceRates,
    #[serde(default)]
    pub scene: SceneSettings,
    #[serde(default)]
    pub selection: SelectionSettings,
    #[serde(default)]
    pub detection: DetectionSettings,
    #[serde(default)]
    pub quote: QuoteSettings,
}

impl ConfiguratorSettings {
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "stage", "stage-configurator")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if let Ok(json) = std::fs::read_to_string(&path) {
                match serde_json::from_str::<Self>(&json) {
                    Ok(settings) => return settings.sanitized(),
                    Err(e) => {
                        tracing::warn!("Ignoring unreadable settings {}: {e}", path.display())
                    }
                }
            }
        }
        Self::default()
    }

    /// Replace values that would break scene invariants
    pub fn sanitized(mut self) -> Self {
        let min_scale = self.scene.effective_min_scale();
        if min_scale != self.scene.min_scale {
            tracing::warn!(
                configured = self.scene.min_scale,
                used = min_scale,
                "min_scale must be positive"
            );
            self.scene.min_scale = min_scale;
        }
        self
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(dir) = path.parent() {
                if std::fs::create_dir_all(dir).is_err() {
                    return;
                }
            }
            if let Ok(json) = serde_json::to_string_pretty(self) {
                let _ = std::fs::write(path, json);
            }
        }
    }
}
