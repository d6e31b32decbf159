use chrono::Weekday;
use serde::Deserialize;
use tracing::{error, info};

/// Geometry knobs for the month board, parsed from an embedded TOML asset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub week_start: String,
    pub base_offset_px: f32,
    pub lane_height_px: f32,
    pub edge_margin_px: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            week_start: "sunday".to_string(),
            base_offset_px: 28.0,
            lane_height_px: 22.0,
            edge_margin_px: 8.0,
        }
    }
}

impl LayoutConfig {
    pub fn from_toml_str(raw: &str) -> Self {
        match toml::from_str::<LayoutConfig>(raw) {
            Ok(mut config) => {
                config.sanitize();
                info!(
                    week_start = %config.week_start,
                    edge_margin_px = config.edge_margin_px,
                    "loaded layout config"
                );
                config
            }
            Err(error) => {
                error!(%error, "failed parsing layout config; using defaults");
                LayoutConfig::default()
            }
        }
    }

    fn sanitize(&mut self) {
        let week_start = self.week_start.trim().to_ascii_lowercase();
        self.week_start = if week_start == "monday" || week_start == "sunday" {
            week_start
        } else {
            "sunday".to_string()
        };

        if !(4.0..=16.0).contains(&self.edge_margin_px) {
            self.edge_margin_px = 8.0;
        }
        if self.lane_height_px < 12.0 {
            self.lane_height_px = 22.0;
        }
        if self.base_offset_px < 0.0 {
            self.base_offset_px = 28.0;
        }
    }

    pub fn week_start_day(&self) -> Weekday {
        if self.week_start.eq_ignore_ascii_case("monday") {
            Weekday::Mon
        } else {
            Weekday::Sun
        }
    }
}
