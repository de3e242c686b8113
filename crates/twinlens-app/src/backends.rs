use std::sync::Arc;

use twinlens_config::ocr::OcrConfig;
use twinlens_core::{ScreenCapture, TextRecognizer};

/// Platform capture and OCR shared by both windows
pub struct Backends {
    pub capture: Arc<dyn ScreenCapture>,
    pub recognizer: Arc<dyn TextRecognizer>,
}

#[cfg(windows)]
pub fn platform_backends(config: &OcrConfig) -> anyhow::Result<Backends> {
    let recognizer = twinlens_ocr::WindowsRecognizer::new(&config.language, config.report_text_angle)?;
    tracing::info!(
        "OCR ready, language {}",
        recognizer.recognizer_language()?
    );

    Ok(Backends {
        capture: Arc::new(twinlens_ocr::XcapCapture),
        recognizer: Arc::new(recognizer),
    })
}

#[cfg(not(windows))]
pub fn platform_backends(config: &OcrConfig) -> anyhow::Result<Backends> {
    anyhow::bail!(
        "No screen capture / OCR backend for this platform (wanted language {})",
        config.language
    )
}
