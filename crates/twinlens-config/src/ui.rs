use std::env;

use serde::{Deserialize, Serialize};

fn default_hit_tolerance() -> f64 {
    10.0
}

fn default_copy_label_ms() -> u64 {
    2000
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Grab radius around the move handle and the frame border, in pixels
    #[serde(default = "default_hit_tolerance")]
    pub hit_tolerance: f64,
    /// How long the copy button shows its confirmation label
    #[serde(default = "default_copy_label_ms")]
    pub copy_label_ms: u64,
}

impl UiConfig {
    pub fn new() -> Self {
        let hit_tolerance = env::var("HIT_TOLERANCE_PX")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_hit_tolerance);

        let copy_label_ms = env::var("COPY_LABEL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_copy_label_ms);

        Self {
            hit_tolerance,
            copy_label_ms,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: default_hit_tolerance(),
            copy_label_ms: default_copy_label_ms(),
        }
    }
}
