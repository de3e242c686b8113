use std::path::PathBuf;

use twinlens_translator::TranslateError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Region has no area to capture")]
    EmptyRegion,

    #[error("Screen capture failed: {0}")]
    Capture(String),

    #[error("Text recognition failed: {0}")]
    Recognition(String),

    #[error("No text found in the image.")]
    RecognitionEmpty,

    #[error("Translation unavailable: {0}")]
    TranslationUnavailable(#[from] TranslateError),

    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl PipelineError {
    /// Message for the status line, `None` for failures that stay in the log
    pub fn user_message(&self) -> Option<String> {
        match self {
            PipelineError::TranslationUnavailable(_) => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}
