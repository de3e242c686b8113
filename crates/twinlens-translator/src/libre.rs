use async_trait::async_trait;
use serde::Deserialize;

use crate::{ProviderMetadata, TranslateError, Translation, TranslationRequest, Translator};

/// Client for a LibreTranslate-compatible `/translate` endpoint
#[derive(Clone)]
pub struct LibreTranslateClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: Option<String>,
    #[serde(default)]
    alternatives: Vec<String>,
}

impl LibreTranslateClient {
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// `alternatives` in the backend's order; `translatedText` only stands in
/// when the server sent no alternatives
fn rank_alternatives(response: TranslateResponse) -> Vec<String> {
    if !response.alternatives.is_empty() {
        return response.alternatives;
    }

    match response.translated_text {
        Some(primary) if !primary.is_empty() => vec![primary],
        _ => Vec::new(),
    }
}

#[async_trait]
impl Translator for LibreTranslateClient {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError> {
        let alternatives = request.alternatives.to_string();
        let mut params = vec![
            ("q", request.text.as_str()),
            ("source", request.from.as_str()),
            ("target", request.to.as_str()),
            ("format", request.format.as_str()),
            ("alternatives", alternatives.as_str()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.as_str()));
        }

        tracing::debug!(
            "POST {} ({} chars, {} -> {})",
            self.api_url,
            request.text.len(),
            request.from,
            request.to
        );

        let response = self.client.post(&self.api_url).form(&params).send().await?;

        if !response.status().is_success() {
            return Err(TranslateError::HttpStatus(response.status().as_u16()));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::ApiError(format!("Failed to parse response: {}", e)))?;

        let alternatives = rank_alternatives(body);
        if alternatives.is_empty() {
            return Err(TranslateError::EmptyResponse);
        }

        Ok(Translation {
            alternatives,
            from: request.from.clone(),
            to: request.to.clone(),
            provider: "libretranslate".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "LibreTranslate".to_string(),
            requires_api_key: self.api_key.is_some(),
        }
    }
}
