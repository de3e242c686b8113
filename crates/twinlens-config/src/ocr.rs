use std::env;

use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "en".to_string()
}

fn default_report_text_angle() -> bool {
    false
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OcrConfig {
    /// Recognition language tag (e.g. "en")
    #[serde(default = "default_language")]
    pub language: String,
    /// Log the text angle the engine detected for every recognition
    #[serde(default = "default_report_text_angle")]
    pub report_text_angle: bool,
}

impl OcrConfig {
    pub fn new() -> Self {
        let language = env::var("OCR_LANGUAGE").unwrap_or_else(|_| default_language());

        Self {
            language,
            report_text_angle: default_report_text_angle(),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            report_text_angle: default_report_text_angle(),
        }
    }
}
