use twinlens_types::{Point, Region, Visibility, WindowId, WindowPosition, WindowSettings};

use crate::error::PipelineError;
use crate::layout::{OverlayLayout, Slot};
use crate::pager::{Page, TranslationPager};
use crate::pipeline::CapturePipeline;
use crate::selector::{DragState, RegionSelector};
use crate::view::{COPIED_LABEL, COPY_LABEL, OverlayView};

/// One-shot clipboard write
pub trait Clipboard: Send + Sync {
    fn write(&self, text: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyLabel {
    Ready,
    Copied,
}

/// State of one overlay window: frame, last translation, chrome visibility
pub struct WindowController {
    id: WindowId,
    selector: RegionSelector,
    pipeline: CapturePipeline,
    pager: Option<TranslationPager>,
    visibility: Visibility,
    position: WindowPosition,
    copy_label: CopyLabel,
    status: Option<String>,
}

impl WindowController {
    pub fn new(
        id: WindowId,
        settings: WindowSettings,
        pipeline: CapturePipeline,
        hit_tolerance: f64,
    ) -> Self {
        Self {
            id,
            selector: RegionSelector::new(settings.region, hit_tolerance),
            pipeline,
            pager: None,
            visibility: Visibility::Visible,
            position: settings.window_position,
            copy_label: CopyLabel::Ready,
            status: None,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn region(&self) -> &Region {
        self.selector.region()
    }

    pub fn drag_state(&self) -> DragState {
        self.selector.state()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn pager(&self) -> Option<&TranslationPager> {
        self.pager.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn copy_label(&self) -> CopyLabel {
        self.copy_label
    }

    pub fn pointer_down(&mut self, p: Point) -> DragState {
        let frame_interactive = self.chrome_interactive();
        self.selector.pointer_down(p, frame_interactive)
    }

    pub fn pointer_move(&mut self, p: Point) -> bool {
        self.selector.pointer_move(p)
    }

    pub fn pointer_up(&mut self) {
        self.selector.pointer_up();
    }

    fn chrome_interactive(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Runs a full capture cycle. The previous translation survives any failure.
    /// A hidden window has no screenshot button, so nothing happens.
    pub async fn take_screenshot(&mut self) -> Result<(), PipelineError> {
        if !self.chrome_interactive() {
            tracing::debug!("[WINDOW {}] Hidden, screenshot ignored", self.id);
            return Ok(());
        }

        let region = self.selector.region().normalized();
        tracing::info!("[WINDOW {}] Capturing {:?}", self.id, region);

        match self.pipeline.capture_and_translate(&region).await {
            Ok(result) => {
                tracing::info!(
                    "[WINDOW {}] {} alternatives for {} chars",
                    self.id,
                    result.len(),
                    result.source_text().len()
                );
                self.pager = Some(TranslationPager::new(result));
                self.status = None;
                Ok(())
            }
            Err(e) => {
                match &e {
                    PipelineError::TranslationUnavailable(inner) => {
                        tracing::warn!("[WINDOW {}] Translation request failed: {}", self.id, inner);
                    }
                    PipelineError::RecognitionEmpty => {
                        tracing::info!("[WINDOW {}] {}", self.id, e);
                    }
                    other => {
                        tracing::error!("[WINDOW {}] {}", self.id, other);
                    }
                }
                if let Some(message) = e.user_message() {
                    self.status = Some(message);
                }
                Err(e)
            }
        }
    }

    pub fn next_translation(&mut self) -> bool {
        self.chrome_interactive() && self.pager.as_mut().is_some_and(|p| p.next())
    }

    pub fn previous_translation(&mut self) -> bool {
        self.chrome_interactive() && self.pager.as_mut().is_some_and(|p| p.previous())
    }

    pub fn current_page(&self) -> Option<Page<'_>> {
        self.pager.as_ref().map(|p| p.current())
    }

    /// Copies the recognized source text; false when hidden or there is nothing to copy yet
    pub fn copy_source_text(&mut self, clipboard: &dyn Clipboard) -> anyhow::Result<bool> {
        if !self.chrome_interactive() {
            return Ok(false);
        }
        let Some(pager) = &self.pager else {
            return Ok(false);
        };

        clipboard.write(pager.source_text())?;
        self.copy_label = CopyLabel::Copied;
        Ok(true)
    }

    pub fn reset_copy_label(&mut self) {
        self.copy_label = CopyLabel::Ready;
    }

    pub fn toggle_visibility(&mut self) -> Visibility {
        self.visibility = self.visibility.toggled();
        tracing::debug!("[WINDOW {}] {:?}", self.id, self.visibility);
        self.visibility
    }

    pub fn set_position(&mut self, position: WindowPosition) {
        self.position = position;
    }

    pub fn position(&self) -> WindowPosition {
        self.position
    }

    /// Snapshot to persist; a resize still in progress is saved upright
    pub fn settings(&self) -> WindowSettings {
        WindowSettings {
            region: self.selector.region().normalized(),
            window_position: self.position,
        }
    }

    pub fn view(&self) -> OverlayView {
        let translation = match self.current_page() {
            Some(page) => Slot::Created(page.to_string()),
            None => Slot::NotCreated,
        };

        OverlayView {
            window: self.id,
            visibility: self.visibility,
            layout: OverlayLayout::compute(self.selector.region(), self.pager.is_some()),
            translation,
            copy_enabled: self.pager.is_some(),
            copy_label: match self.copy_label {
                CopyLabel::Ready => COPY_LABEL,
                CopyLabel::Copied => COPIED_LABEL,
            },
            status: self.status.clone(),
        }
    }
}
