use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use twinlens_core::OverlayVisibility;
use twinlens_core::view::{DrawItem, OverlayView};
use twinlens_types::WindowId;

/// Toolkit-side renderer for one overlay window
pub trait Surface: Send {
    fn present(&mut self, view: &OverlayView);
    fn close(&mut self);
}

/// Shared flag the capture pipeline flips while grabbing pixels
#[derive(Debug)]
pub struct ChromeToggle {
    window: WindowId,
    suppressed: AtomicBool,
}

impl ChromeToggle {
    pub fn new(window: WindowId) -> Arc<Self> {
        Arc::new(Self {
            window,
            suppressed: AtomicBool::new(false),
        })
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed.load(Ordering::SeqCst)
    }
}

impl OverlayVisibility for ChromeToggle {
    fn suppress(&self) {
        self.suppressed.store(true, Ordering::SeqCst);
        tracing::trace!("[WINDOW {}] Chrome suppressed", self.window);
    }

    fn restore(&self) {
        self.suppressed.store(false, Ordering::SeqCst);
        tracing::trace!("[WINDOW {}] Chrome restored", self.window);
    }
}

/// Stand-in surface that writes each frame to the log
pub struct TracingSurface {
    window: WindowId,
    chrome: Arc<ChromeToggle>,
    last: Option<Vec<DrawItem>>,
    closed: bool,
}

impl TracingSurface {
    pub fn new(window: WindowId, chrome: Arc<ChromeToggle>) -> Self {
        Self {
            window,
            chrome,
            last: None,
            closed: false,
        }
    }
}

impl Surface for TracingSurface {
    fn present(&mut self, view: &OverlayView) {
        if self.closed || self.chrome.is_suppressed() {
            return;
        }

        let items = view.draw_list();
        if self.last.as_ref() == Some(&items) {
            return;
        }

        let frame = view.layout.frame;
        tracing::info!(
            "[WINDOW {}] {:?} frame=({}, {})-({}, {}) copy=\"{}\"",
            self.window,
            view.visibility,
            frame.x1,
            frame.y1,
            frame.x2,
            frame.y2,
            view.copy_label
        );
        for item in &items {
            match item {
                DrawItem::Text { text, .. } => {
                    tracing::info!("[WINDOW {}] > {}", self.window, text);
                }
                other => tracing::debug!("[WINDOW {}] {:?}", self.window, other),
            }
        }

        self.last = Some(items);
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            tracing::info!("[WINDOW {}] Surface closed", self.window);
        }
    }
}
