//! Fake collaborators shared by the app tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

use async_trait::async_trait;
use image::RgbaImage;
use tokio::time::{sleep, timeout};
use twinlens_core::pipeline::LineBounds;
use twinlens_core::view::OverlayView;
use twinlens_core::{
    CapturePipeline, Clipboard, OverlayVisibility, RecognizedLine, ScreenCapture, SettingsStore,
    TextRecognizer, TranslationSettings, WindowController,
};
use twinlens_translator::{
    ProviderMetadata, TranslateError, Translation, TranslationRequest, Translator,
};
use twinlens_types::{CaptureBounds, WindowId};

use crate::controller::{PairHandle, PairMember, WindowPair};
use crate::surface::Surface;

pub struct BlankCapture;

impl ScreenCapture for BlankCapture {
    fn capture(&self, bounds: CaptureBounds) -> anyhow::Result<RgbaImage> {
        Ok(RgbaImage::new(bounds.width, bounds.height))
    }
}

/// Returns fixed lines, optionally waiting for the test to open a gate first
pub struct ScriptedRecognizer {
    lines: Vec<&'static str>,
    gate: Option<Mutex<mpsc::Receiver<()>>>,
}

impl ScriptedRecognizer {
    pub fn new(lines: Vec<&'static str>) -> Self {
        Self { lines, gate: None }
    }

    pub fn gated(lines: Vec<&'static str>) -> (Self, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                lines,
                gate: Some(Mutex::new(rx)),
            },
            tx,
        )
    }
}

impl TextRecognizer for ScriptedRecognizer {
    fn recognize(&self, _image: &RgbaImage) -> anyhow::Result<Vec<RecognizedLine>> {
        if let Some(gate) = &self.gate {
            gate.lock().unwrap().recv()?;
        }
        Ok(self
            .lines
            .iter()
            .map(|text| RecognizedLine {
                bounds: LineBounds::default(),
                text: text.to_string(),
                confidence: 1.0,
            })
            .collect())
    }
}

pub struct EchoTranslator;

#[async_trait]
impl Translator for EchoTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, TranslateError> {
        Ok(Translation {
            alternatives: vec![
                format!("[{}] {}", request.to, request.text),
                format!("[{}] {} (alt)", request.to, request.text),
            ],
            from: request.from.clone(),
            to: request.to.clone(),
            provider: "echo".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "echo".to_string(),
            requires_api_key: false,
        }
    }
}

pub struct NoChrome;

impl OverlayVisibility for NoChrome {
    fn suppress(&self) {}
    fn restore(&self) {}
}

#[derive(Default)]
pub struct MemoryClipboard(pub Mutex<Vec<String>>);

impl Clipboard for MemoryClipboard {
    fn write(&self, text: &str) -> anyhow::Result<()> {
        self.0.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// What a recording surface saw, readable from the test
#[derive(Default)]
pub struct Frames {
    pub views: Mutex<Vec<OverlayView>>,
    pub closed: AtomicBool,
}

impl Frames {
    pub fn last(&self) -> Option<OverlayView> {
        self.views.lock().unwrap().last().cloned()
    }

    pub fn any(&self, f: impl Fn(&OverlayView) -> bool) -> bool {
        self.views.lock().unwrap().iter().any(f)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

pub struct RecordingSurface(pub Arc<Frames>);

impl Surface for RecordingSurface {
    fn present(&mut self, view: &OverlayView) {
        self.0.views.lock().unwrap().push(view.clone());
    }

    fn close(&mut self) {
        self.0.closed.store(true, Ordering::SeqCst);
    }
}

pub fn member(
    id: WindowId,
    store: &SettingsStore,
    recognizer: Arc<dyn TextRecognizer>,
) -> (PairMember, Arc<Frames>) {
    let pipeline = CapturePipeline::new(
        Arc::new(BlankCapture),
        recognizer,
        Arc::new(EchoTranslator),
        Arc::new(NoChrome),
        TranslationSettings::default(),
    );
    let frames = Arc::new(Frames::default());
    let member = PairMember {
        controller: WindowController::new(id, store.load(id), pipeline, 10.0),
        surface: Box::new(RecordingSurface(frames.clone())),
    };
    (member, frames)
}

pub struct Running {
    pub handle: PairHandle,
    pub first: Arc<Frames>,
    pub second: Arc<Frames>,
    pub clipboard: Arc<MemoryClipboard>,
}

pub fn spawn_pair(
    store: SettingsStore,
    first_recognizer: Arc<dyn TextRecognizer>,
    copy_label_delay: Duration,
) -> Running {
    let (first, first_frames) = member(WindowId::FIRST, &store, first_recognizer);
    let (second, second_frames) = member(
        WindowId::SECOND,
        &store,
        Arc::new(ScriptedRecognizer::new(vec!["Second", "window"])),
    );
    let clipboard = Arc::new(MemoryClipboard::default());

    let handle = WindowPair::new(first, second, store, clipboard.clone(), copy_label_delay)
        .spawn(tokio_util::sync::CancellationToken::new());

    Running {
        handle,
        first: first_frames,
        second: second_frames,
        clipboard,
    }
}

/// Polls until `f` holds or two seconds pass
pub async fn eventually(frames: &Frames, f: impl Fn(&OverlayView) -> bool) {
    let result = timeout(Duration::from_secs(2), async {
        while !frames.last().is_some_and(|view| f(&view)) {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(result.is_ok(), "condition not reached; last view: {:?}", frames.last());
}
