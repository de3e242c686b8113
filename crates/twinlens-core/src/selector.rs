use twinlens_types::{Point, Region, ResizeZone};

use crate::layout::move_handle;

pub const DEFAULT_TOLERANCE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// Dragging the whole frame; `origin` is the last pointer position seen
    Moving { origin: Point },
    Resizing(ResizeZone),
}

/// What a press landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grab {
    MoveHandle,
    Zone(ResizeZone),
}

/// Turns pointer events into moves and resizes of one frame
#[derive(Debug, Clone)]
pub struct RegionSelector {
    region: Region,
    state: DragState,
    tolerance: f64,
}

impl RegionSelector {
    pub fn new(region: Region, tolerance: f64) -> Self {
        Self {
            region,
            state: DragState::Idle,
            tolerance,
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Move handle first, then the border zones in priority order.
    /// With `frame_interactive` off only the handle can be grabbed.
    pub fn hit_test(&self, p: Point, frame_interactive: bool) -> Option<Grab> {
        let handle = move_handle(&self.region);
        if (p.x - handle.x).abs() <= self.tolerance && (p.y - handle.y).abs() <= self.tolerance {
            return Some(Grab::MoveHandle);
        }

        if !frame_interactive {
            return None;
        }

        ResizeZone::PRIORITY
            .into_iter()
            .find(|zone| self.zone_contains(*zone, p))
            .map(Grab::Zone)
    }

    fn zone_contains(&self, zone: ResizeZone, p: Point) -> bool {
        let Region { x1, y1, x2, y2 } = self.region;
        let tol = self.tolerance;
        let near = |a: f64, b: f64| (a - b).abs() < tol;
        let within_x = p.x > x1.min(x2) - tol && p.x < x1.max(x2) + tol;
        let within_y = p.y > y1.min(y2) - tol && p.y < y1.max(y2) + tol;

        match zone {
            ResizeZone::Nw => near(p.x, x1) && near(p.y, y1),
            ResizeZone::Ne => near(p.x, x2) && near(p.y, y1),
            ResizeZone::Sw => near(p.x, x1) && near(p.y, y2),
            ResizeZone::Se => near(p.x, x2) && near(p.y, y2),
            ResizeZone::W => near(p.x, x1) && within_y,
            ResizeZone::E => near(p.x, x2) && within_y,
            ResizeZone::N => near(p.y, y1) && within_x,
            ResizeZone::S => near(p.y, y2) && within_x,
        }
    }

    pub fn pointer_down(&mut self, p: Point, frame_interactive: bool) -> DragState {
        self.state = match self.hit_test(p, frame_interactive) {
            Some(Grab::MoveHandle) => DragState::Moving { origin: p },
            Some(Grab::Zone(zone)) => DragState::Resizing(zone),
            None => DragState::Idle,
        };
        self.state
    }

    /// Returns true when the frame changed
    pub fn pointer_move(&mut self, p: Point) -> bool {
        match self.state {
            DragState::Idle => false,
            DragState::Moving { origin } => {
                self.region.translate(p.x - origin.x, p.y - origin.y);
                self.state = DragState::Moving { origin: p };
                true
            }
            DragState::Resizing(zone) => {
                zone.apply(&mut self.region, p);
                true
            }
        }
    }

    /// Ends any drag. A resize that crossed the opposite side is normalized here.
    pub fn pointer_up(&mut self) {
        if let DragState::Resizing(zone) = self.state {
            if self.region.is_inverted() {
                tracing::debug!("normalizing frame inverted by {:?} resize", zone);
                self.region = self.region.normalized();
            }
        }
        self.state = DragState::Idle;
    }
}
