mod libre;

pub use libre::LibreTranslateClient;

pub type LanguageCode = String;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text and return the backend's ranked alternatives
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    /// "text" or "html"
    pub format: String,
    /// How many alternatives to ask for
    pub alternatives: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// Ranked candidates, primary first
    pub alternatives: Vec<String>,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("No alternatives in response")]
    EmptyResponse,
}
