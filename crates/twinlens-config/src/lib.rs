use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::ocr::OcrConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;

pub mod ocr;
pub mod translator;
pub mod ui;

fn default_settings_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub ocr: OcrConfig,
    pub ui: UiConfig,

    /// Directory holding `settings_{id}.json` per window
    #[serde(default = "default_settings_dir")]
    pub settings_dir: PathBuf,
}

impl Config {
    pub fn new() -> Self {
        let settings_dir = env::var("SETTINGS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_settings_dir());

        Config {
            translator: TranslatorConfig::new(),
            ocr: OcrConfig::new(),
            ui: UiConfig::new(),

            settings_dir,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            ocr: OcrConfig::default(),
            ui: UiConfig::default(),
            settings_dir: default_settings_dir(),
        }
    }
}
