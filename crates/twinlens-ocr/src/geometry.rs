use twinlens_types::CaptureBounds;

/// Screen-space rectangle of one monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl MonitorRect {
    fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn contains(&self, b: &CaptureBounds) -> bool {
        b.x >= self.x
            && b.y >= self.y
            && b.x as i64 + b.width as i64 <= self.right()
            && b.y as i64 + b.height as i64 <= self.bottom()
    }
}

/// Crop box relative to a monitor's own image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Monitor fully containing the box, else the first one
pub fn pick_monitor(monitors: &[MonitorRect], bounds: &CaptureBounds) -> Option<usize> {
    if monitors.is_empty() {
        return None;
    }
    Some(
        monitors
            .iter()
            .position(|m| m.contains(bounds))
            .unwrap_or(0),
    )
}

/// Part of `bounds` visible on `monitor`, in monitor-local pixels
pub fn crop_box(monitor: &MonitorRect, bounds: &CaptureBounds) -> Option<CropBox> {
    let left = (bounds.x as i64).max(monitor.x as i64);
    let top = (bounds.y as i64).max(monitor.y as i64);
    let right = (bounds.x as i64 + bounds.width as i64).min(monitor.right());
    let bottom = (bounds.y as i64 + bounds.height as i64).min(monitor.bottom());

    if right <= left || bottom <= top {
        return None;
    }

    Some(CropBox {
        x: (left - monitor.x as i64) as u32,
        y: (top - monitor.y as i64) as u32,
        width: (right - left) as u32,
        height: (bottom - top) as u32,
    })
}
