use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "http://127.0.0.1:5000/translate".to_string()
}

fn default_from_lang() -> String {
    "en".to_string()
}

fn default_to_lang() -> String {
    "ru".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_alternatives() -> u32 {
    3
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TranslatorConfig {
    /// LibreTranslate-compatible `/translate` endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Sent as `api_key` when the server requires one
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    #[serde(default = "default_format")]
    pub format: String,
    /// Number of alternatives requested from the backend
    #[serde(default = "default_alternatives")]
    pub alternatives: u32,
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let api_url = env::var("TRANSLATE_URL").unwrap_or_else(|_| default_api_url());
        let api_key = env::var("TRANSLATE_API_KEY").ok().filter(|k| !k.is_empty());
        let from_lang = env::var("TRANSLATE_SOURCE").unwrap_or_else(|_| default_from_lang());
        let to_lang = env::var("TRANSLATE_TARGET").unwrap_or_else(|_| default_to_lang());
        let alternatives = env::var("TRANSLATE_ALTERNATIVES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_alternatives);

        Self {
            api_url,
            api_key,
            from_lang,
            to_lang,
            format: default_format(),
            alternatives,
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            format: default_format(),
            alternatives: default_alternatives(),
        }
    }
}
