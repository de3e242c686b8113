use std::fmt;

use serde::{Deserialize, Serialize};

/// Pointer position in overlay coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Capture frame in screen coordinates
///
/// `x1 <= x2` and `y1 <= y2` hold at rest. A resize drag may invert the
/// rectangle until the pointer is released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Region {
    pub const DEFAULT: Region = Region {
        x1: 100.0,
        y1: 150.0,
        x2: 645.0,
        y2: 326.0,
    };

    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x1 += dx;
        self.y1 += dy;
        self.x2 += dx;
        self.y2 += dy;
    }

    pub fn is_inverted(&self) -> bool {
        self.x1 > self.x2 || self.y1 > self.y2
    }

    /// Same rectangle with sides swapped where a drag crossed them
    pub fn normalized(&self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    /// Pixel box to grab, `None` when the frame has no area
    pub fn capture_bounds(&self) -> Option<CaptureBounds> {
        let r = self.normalized();
        let x = r.x1.round();
        let y = r.y1.round();
        let width = (r.x2.round() - x) as i64;
        let height = (r.y2.round() - y) as i64;

        if width <= 0 || height <= 0 {
            return None;
        }

        Some(CaptureBounds {
            x: x as i32,
            y: y as i32,
            width: width as u32,
            height: height as u32,
        })
    }

    pub fn to_coords(self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    pub fn from_coords([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Hit-test zone on the frame border, listed in hit-test priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeZone {
    Nw,
    Ne,
    Sw,
    Se,
    W,
    E,
    N,
    S,
}

impl ResizeZone {
    pub const PRIORITY: [ResizeZone; 8] = [
        ResizeZone::Nw,
        ResizeZone::Ne,
        ResizeZone::Sw,
        ResizeZone::Se,
        ResizeZone::W,
        ResizeZone::E,
        ResizeZone::N,
        ResizeZone::S,
    ];

    /// Move the sides this zone owns to `p`, leaving the others alone
    pub fn apply(self, region: &mut Region, p: Point) {
        match self {
            ResizeZone::Nw => {
                region.x1 = p.x;
                region.y1 = p.y;
            }
            ResizeZone::Ne => {
                region.x2 = p.x;
                region.y1 = p.y;
            }
            ResizeZone::Sw => {
                region.x1 = p.x;
                region.y2 = p.y;
            }
            ResizeZone::Se => {
                region.x2 = p.x;
                region.y2 = p.y;
            }
            ResizeZone::W => region.x1 = p.x,
            ResizeZone::E => region.x2 = p.x,
            ResizeZone::N => region.y1 = p.y,
            ResizeZone::S => region.y2 = p.y,
        }
    }
}

/// Window identity, 1 or 2 for the paired windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(pub u32);

impl WindowId {
    pub const FIRST: WindowId = WindowId(1);
    pub const SECOND: WindowId = WindowId(2);
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

impl WindowPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Staggered so the two windows do not open on top of each other
    pub fn default_for(id: WindowId) -> Self {
        let step = id.0.saturating_sub(1) as i32;
        Self {
            x: 100 + 50 * step,
            y: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSettings {
    pub region: Region,
    pub window_position: WindowPosition,
}

impl WindowSettings {
    pub fn default_for(id: WindowId) -> Self {
        Self {
            region: Region::DEFAULT,
            window_position: WindowPosition::default_for(id),
        }
    }
}

/// Ranked translations of one recognized text
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    alternatives: Vec<String>,
    source_text: String,
}

impl TranslationResult {
    /// `None` when the backend produced nothing to show
    pub fn new(alternatives: Vec<String>, source_text: String) -> Option<Self> {
        if alternatives.is_empty() {
            return None;
        }
        Some(Self {
            alternatives,
            source_text,
        })
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    pub fn toggled(self) -> Self {
        match self {
            Visibility::Visible => Visibility::Hidden,
            Visibility::Hidden => Visibility::Visible,
        }
    }
}

/// Input delivered to one window's event loop
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    TakeScreenshot,
    NextTranslation,
    PreviousTranslation,
    CopySourceText,
    CopyLabelExpired,
    ToggleVisibility,
    WindowMoved(WindowPosition),
    Exit,
}
