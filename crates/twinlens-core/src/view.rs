use twinlens_types::{Point, Region, Visibility, WindowId};

use crate::layout::{CHROME_OFFSET_Y, OverlayLayout, Slot};

pub const SCREENSHOT_LABEL: &str = "Screenshot";
pub const COPY_LABEL: &str = "Copy Text";
pub const COPIED_LABEL: &str = "✔ Copied";
pub const EXIT_LABEL: &str = "Exit";
pub const HIDE_LABEL: &str = "Hide";
pub const SHOW_LABEL: &str = "Show";
pub const PREVIOUS_LABEL: &str = "↑";
pub const NEXT_LABEL: &str = "↓";
pub const MOVE_HANDLE_GLYPH: &str = "•";

/// Which button a draw item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Screenshot,
    Copy,
    Exit,
    Hide,
    Previous,
    Next,
}

/// One primitive for the toolkit to draw
#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    Frame(Region),
    Handle {
        at: Point,
        glyph: &'static str,
    },
    Button {
        kind: ButtonKind,
        at: Point,
        label: &'static str,
        enabled: bool,
    },
    Text {
        at: Point,
        width: Option<f64>,
        text: String,
    },
}

/// Everything a surface needs to draw one window
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub window: WindowId,
    pub visibility: Visibility,
    pub layout: OverlayLayout,
    /// "{n}/{total}: {text}" once a translation exists
    pub translation: Slot<String>,
    pub copy_enabled: bool,
    pub copy_label: &'static str,
    pub status: Option<String>,
}

impl OverlayView {
    pub fn hide_label(&self) -> &'static str {
        match self.visibility {
            Visibility::Visible => HIDE_LABEL,
            Visibility::Hidden => SHOW_LABEL,
        }
    }

    /// Flattened draw list; hidden windows keep only the handle and the show button
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let layout = &self.layout;
        let mut items = vec![DrawItem::Handle {
            at: layout.move_handle,
            glyph: MOVE_HANDLE_GLYPH,
        }];

        if self.visibility == Visibility::Hidden {
            items.push(DrawItem::Button {
                kind: ButtonKind::Hide,
                at: layout.buttons.hide,
                label: self.hide_label(),
                enabled: true,
            });
            return items;
        }

        items.push(DrawItem::Frame(layout.frame));

        let buttons = [
            (ButtonKind::Screenshot, layout.buttons.screenshot, SCREENSHOT_LABEL, true),
            (ButtonKind::Copy, layout.buttons.copy, self.copy_label, self.copy_enabled),
            (ButtonKind::Exit, layout.buttons.exit, EXIT_LABEL, true),
            (ButtonKind::Hide, layout.buttons.hide, self.hide_label(), true),
        ];
        for (kind, at, label, enabled) in buttons {
            items.push(DrawItem::Button {
                kind,
                at,
                label,
                enabled,
            });
        }

        if let Slot::Created(pager) = layout.pager {
            items.push(DrawItem::Button {
                kind: ButtonKind::Previous,
                at: pager.previous,
                label: PREVIOUS_LABEL,
                enabled: true,
            });
            items.push(DrawItem::Button {
                kind: ButtonKind::Next,
                at: pager.next,
                label: NEXT_LABEL,
                enabled: true,
            });
        }

        if let (Slot::Created(text_box), Slot::Created(text)) = (layout.text_box, &self.translation) {
            items.push(DrawItem::Text {
                at: text_box.origin,
                width: Some(text_box.width),
                text: text.clone(),
            });
        }

        if let Some(status) = &self.status {
            items.push(DrawItem::Text {
                at: Point::new(layout.frame.x1, layout.frame.y1 - 2.0 * CHROME_OFFSET_Y),
                width: None,
                text: status.clone(),
            });
        }

        items
    }
}
