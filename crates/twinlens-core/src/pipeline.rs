use std::sync::Arc;

use image::RgbaImage;
use twinlens_translator::{TranslateError, TranslationRequest, Translator};
use twinlens_types::{CaptureBounds, Region, TranslationResult};

use crate::error::PipelineError;

/// Grabs screen pixels inside a box
pub trait ScreenCapture: Send + Sync {
    fn capture(&self, bounds: CaptureBounds) -> anyhow::Result<RgbaImage>;
}

/// Reads text lines out of a raster image
pub trait TextRecognizer: Send + Sync {
    /// Lines in reading order
    fn recognize(&self, image: &RgbaImage) -> anyhow::Result<Vec<RecognizedLine>>;
}

/// Hides the overlay chrome so it does not end up in the capture
pub trait OverlayVisibility: Send + Sync {
    fn suppress(&self);
    fn restore(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedLine {
    pub bounds: LineBounds,
    pub text: String,
    pub confidence: f32,
}

/// Pixels grabbed for one capture, consumed by recognition
pub struct CaptureSession {
    pub image: RgbaImage,
}

/// Keeps the overlay suppressed while alive
struct SuppressGuard<'a>(&'a dyn OverlayVisibility);

impl<'a> SuppressGuard<'a> {
    fn new(overlay: &'a dyn OverlayVisibility) -> Self {
        overlay.suppress();
        Self(overlay)
    }
}

impl Drop for SuppressGuard<'_> {
    fn drop(&mut self) {
        self.0.restore();
    }
}

/// Language pair and request shape sent with every translation
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationSettings {
    pub from: String,
    pub to: String,
    pub format: String,
    pub alternatives: u32,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            from: "en".to_string(),
            to: "ru".to_string(),
            format: "text".to_string(),
            alternatives: 3,
        }
    }
}

/// Capture → recognize → translate for one window
#[derive(Clone)]
pub struct CapturePipeline {
    capture: Arc<dyn ScreenCapture>,
    recognizer: Arc<dyn TextRecognizer>,
    translator: Arc<dyn Translator>,
    overlay: Arc<dyn OverlayVisibility>,
    translation: TranslationSettings,
}

/// Recognized lines joined the way they are sent for translation
pub fn join_lines(lines: &[RecognizedLine]) -> String {
    lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

impl CapturePipeline {
    pub fn new(
        capture: Arc<dyn ScreenCapture>,
        recognizer: Arc<dyn TextRecognizer>,
        translator: Arc<dyn Translator>,
        overlay: Arc<dyn OverlayVisibility>,
        translation: TranslationSettings,
    ) -> Self {
        Self {
            capture,
            recognizer,
            translator,
            overlay,
            translation,
        }
    }

    pub async fn capture_and_translate(
        &self,
        region: &Region,
    ) -> Result<TranslationResult, PipelineError> {
        let bounds = region.capture_bounds().ok_or(PipelineError::EmptyRegion)?;

        let session = self.capture(bounds).await?;
        let source_text = self.recognize(session).await?;

        if source_text.trim().is_empty() {
            return Err(PipelineError::RecognitionEmpty);
        }

        let request = TranslationRequest {
            text: source_text.clone(),
            from: self.translation.from.clone(),
            to: self.translation.to.clone(),
            format: self.translation.format.clone(),
            alternatives: self.translation.alternatives,
        };

        let translation = self.translator.translate(&request).await?;
        tracing::debug!(
            "{} alternatives from {}",
            translation.alternatives.len(),
            translation.provider
        );

        TranslationResult::new(translation.alternatives, source_text)
            .ok_or_else(|| PipelineError::TranslationUnavailable(TranslateError::EmptyResponse))
    }

    async fn capture(&self, bounds: CaptureBounds) -> Result<CaptureSession, PipelineError> {
        let _hidden = SuppressGuard::new(self.overlay.as_ref());

        let capture = self.capture.clone();
        let image = tokio::task::spawn_blocking(move || capture.capture(bounds))
            .await?
            .map_err(|e| PipelineError::Capture(format!("{:#}", e)))?;

        tracing::debug!(
            "Captured {}x{} at ({}, {})",
            image.width(),
            image.height(),
            bounds.x,
            bounds.y
        );
        Ok(CaptureSession { image })
    }

    async fn recognize(&self, session: CaptureSession) -> Result<String, PipelineError> {
        let recognizer = self.recognizer.clone();
        let lines = tokio::task::spawn_blocking(move || recognizer.recognize(&session.image))
            .await?
            .map_err(|e| PipelineError::Recognition(format!("{:#}", e)))?;

        tracing::debug!("Recognized {} lines", lines.len());
        Ok(join_lines(&lines))
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use twinlens_translator::{ProviderMetadata, Translation};

    use super::*;

    /// Records every call so tests can assert ordering
    #[derive(Default)]
    pub struct Journal(pub Mutex<Vec<String>>);

    impl Journal {
        pub fn push(&self, entry: impl Into<String>) {
            self.0.lock().unwrap().push(entry.into());
        }

        pub fn entries(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    pub struct FakeCapture {
        pub journal: Arc<Journal>,
        pub fail: bool,
    }

    impl ScreenCapture for FakeCapture {
        fn capture(&self, bounds: CaptureBounds) -> anyhow::Result<RgbaImage> {
            self.journal.push(format!(
                "capture {} {} {} {}",
                bounds.x, bounds.y, bounds.width, bounds.height
            ));
            if self.fail {
                anyhow::bail!("no monitor");
            }
            Ok(RgbaImage::new(bounds.width, bounds.height))
        }
    }

    pub struct FakeRecognizer {
        pub journal: Arc<Journal>,
        pub lines: Vec<&'static str>,
    }

    impl TextRecognizer for FakeRecognizer {
        fn recognize(&self, _image: &RgbaImage) -> anyhow::Result<Vec<RecognizedLine>> {
            self.journal.push("recognize");
            Ok(self
                .lines
                .iter()
                .map(|text| RecognizedLine {
                    bounds: LineBounds::default(),
                    text: text.to_string(),
                    confidence: 0.9,
                })
                .collect())
        }
    }

    pub struct FakeTranslator {
        pub journal: Arc<Journal>,
        pub reply: Result<Vec<&'static str>, u16>,
        pub calls: AtomicUsize,
        pub requests: Mutex<Vec<TranslationRequest>>,
    }

    #[async_trait]
    impl Translator for FakeTranslator {
        async fn translate(
            &self,
            request: &TranslationRequest,
        ) -> Result<Translation, TranslateError> {
            self.journal.push("translate");
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(items) => Ok(Translation {
                    alternatives: items.iter().map(|s| s.to_string()).collect(),
                    from: request.from.clone(),
                    to: request.to.clone(),
                    provider: "fake".to_string(),
                }),
                Err(status) => Err(TranslateError::HttpStatus(*status)),
            }
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "fake".to_string(),
                requires_api_key: false,
            }
        }
    }

    pub struct FakeOverlay {
        pub journal: Arc<Journal>,
    }

    impl OverlayVisibility for FakeOverlay {
        fn suppress(&self) {
            self.journal.push("suppress");
        }

        fn restore(&self) {
            self.journal.push("restore");
        }
    }

    pub struct Fakes {
        pub journal: Arc<Journal>,
        pub translator: Arc<FakeTranslator>,
        pub pipeline: CapturePipeline,
    }

    pub fn pipeline(
        lines: Vec<&'static str>,
        reply: Result<Vec<&'static str>, u16>,
        capture_fails: bool,
    ) -> Fakes {
        let journal = Arc::new(Journal::default());
        let translator = Arc::new(FakeTranslator {
            journal: journal.clone(),
            reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        });
        let pipeline = CapturePipeline::new(
            Arc::new(FakeCapture {
                journal: journal.clone(),
                fail: capture_fails,
            }),
            Arc::new(FakeRecognizer {
                journal: journal.clone(),
                lines,
            }),
            translator.clone(),
            Arc::new(FakeOverlay {
                journal: journal.clone(),
            }),
            TranslationSettings::default(),
        );

        Fakes {
            journal,
            translator,
            pipeline,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::fakes::pipeline;
    use super::*;

    #[tokio::test]
    async fn test_full_cycle_joins_lines_and_requests_alternatives() {
        let fakes = pipeline(vec!["Hello", "brave new", "world"], Ok(vec!["x", "y", "z"]), false);

        let result = fakes
            .pipeline
            .capture_and_translate(&Region::new(10.0, 20.0, 110.0, 70.0))
            .await
            .unwrap();

        assert_eq!(result.alternatives(), ["x", "y", "z"]);
        assert_eq!(result.source_text(), "Hello brave new world");

        let requests = fakes.translator.requests.lock().unwrap();
        assert_eq!(
            requests[0],
            TranslationRequest {
                text: "Hello brave new world".to_string(),
                from: "en".to_string(),
                to: "ru".to_string(),
                format: "text".to_string(),
                alternatives: 3,
            }
        );
    }

    #[tokio::test]
    async fn test_overlay_hidden_only_around_capture() {
        let fakes = pipeline(vec!["Hi"], Ok(vec!["Привет"]), false);

        fakes
            .pipeline
            .capture_and_translate(&Region::new(10.0, 20.0, 110.0, 70.0))
            .await
            .unwrap();

        assert_eq!(
            fakes.journal.entries(),
            vec![
                "suppress",
                "capture 10 20 100 50",
                "restore",
                "recognize",
                "translate"
            ]
        );
    }

    #[tokio::test]
    async fn test_overlay_restored_when_capture_fails() {
        let fakes = pipeline(vec!["Hi"], Ok(vec!["x"]), true);

        let err = fakes
            .pipeline
            .capture_and_translate(&Region::DEFAULT)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Capture(_)));
        assert_eq!(
            fakes.journal.entries(),
            vec!["suppress", "capture 100 150 545 176", "restore"]
        );
    }

    #[tokio::test]
    async fn test_empty_text_skips_translation() {
        let fakes = pipeline(vec![], Ok(vec!["x"]), false);

        let err = fakes
            .pipeline
            .capture_and_translate(&Region::DEFAULT)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::RecognitionEmpty));
        assert_eq!(fakes.translator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_whitespace_text_skips_translation() {
        let fakes = pipeline(vec!["  ", "\t"], Ok(vec!["x"]), false);

        let err = fakes
            .pipeline
            .capture_and_translate(&Region::DEFAULT)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::RecognitionEmpty));
        assert!(err.user_message().is_some());
        assert_eq!(fakes.translator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_backend_failure_is_silent_unavailable() {
        let fakes = pipeline(vec!["Hi"], Err(503), false);

        let err = fakes
            .pipeline
            .capture_and_translate(&Region::DEFAULT)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::TranslationUnavailable(_)));
        assert!(err.user_message().is_none());
    }

    #[tokio::test]
    async fn test_flat_region_never_touches_overlay() {
        let fakes = pipeline(vec!["Hi"], Ok(vec!["x"]), false);

        let err = fakes
            .pipeline
            .capture_and_translate(&Region::new(50.0, 50.0, 50.0, 90.0))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::EmptyRegion));
        assert!(fakes.journal.entries().is_empty());
    }

    #[tokio::test]
    async fn test_inverted_region_captures_normalized_box() {
        let fakes = pipeline(vec!["Hi"], Ok(vec!["x"]), false);

        fakes
            .pipeline
            .capture_and_translate(&Region::new(110.0, 70.0, 10.0, 20.0))
            .await
            .unwrap();

        assert_eq!(fakes.journal.entries()[1], "capture 10 20 100 50");
    }

    #[test]
    fn test_join_lines_uses_single_spaces() {
        let line = |t: &str| RecognizedLine {
            bounds: LineBounds::default(),
            text: t.to_string(),
            confidence: 1.0,
        };
        assert_eq!(join_lines(&[line("a"), line("b c")]), "a b c");
        assert_eq!(join_lines(&[]), "");
    }
}
