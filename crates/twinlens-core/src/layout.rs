use twinlens_types::{Point, Region};

/// Height of the button row and move handle above the frame
pub const CHROME_OFFSET_Y: f64 = 30.0;
pub const COPY_BUTTON_DX: f64 = 80.0;
pub const EXIT_BUTTON_DX: f64 = 197.0;
pub const HIDE_BUTTON_DX: f64 = 280.0;
pub const PAGER_DX: f64 = -20.0;
pub const PAGER_PREVIOUS_DY: f64 = 10.0;
pub const PAGER_NEXT_DY: f64 = 40.0;
pub const TEXT_BOX_DY: f64 = 10.0;

/// Optional widget that only exists after something created it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot<T> {
    NotCreated,
    Created(T),
}

impl<T> Slot<T> {
    pub fn as_created(&self) -> Option<&T> {
        match self {
            Slot::Created(v) => Some(v),
            Slot::NotCreated => None,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Slot::Created(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Slot<U> {
        match self {
            Slot::Created(v) => Slot::Created(f(v)),
            Slot::NotCreated => Slot::NotCreated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionButtons {
    pub screenshot: Point,
    pub copy: Point,
    pub exit: Point,
    pub hide: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagerButtons {
    pub previous: Point,
    pub next: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub origin: Point,
    pub width: f64,
}

/// Where every piece of overlay chrome sits for a given frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayout {
    pub frame: Region,
    pub move_handle: Point,
    pub buttons: ActionButtons,
    pub pager: Slot<PagerButtons>,
    pub text_box: Slot<TextBox>,
}

/// Grab point for dragging the whole frame, above its top-right corner
pub fn move_handle(region: &Region) -> Point {
    Point::new(region.x2, region.y1 - CHROME_OFFSET_Y)
}

impl OverlayLayout {
    pub fn compute(region: &Region, has_translation: bool) -> Self {
        let Region { x1, y1, x2, y2 } = *region;
        let row = y1 - CHROME_OFFSET_Y;

        let (pager, text_box) = if has_translation {
            (
                Slot::Created(PagerButtons {
                    previous: Point::new(x1 + PAGER_DX, y2 + PAGER_PREVIOUS_DY),
                    next: Point::new(x1 + PAGER_DX, y2 + PAGER_NEXT_DY),
                }),
                Slot::Created(TextBox {
                    origin: Point::new(x1, y2 + TEXT_BOX_DY),
                    width: x2 - x1,
                }),
            )
        } else {
            (Slot::NotCreated, Slot::NotCreated)
        };

        Self {
            frame: *region,
            move_handle: move_handle(region),
            buttons: ActionButtons {
                screenshot: Point::new(x1, row),
                copy: Point::new(x1 + COPY_BUTTON_DX, row),
                exit: Point::new(x1 + EXIT_BUTTON_DX, row),
                hide: Point::new(x1 + HIDE_BUTTON_DX, row),
            },
            pager,
            text_box,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchors_for_default_region() {
        let layout = OverlayLayout::compute(&Region::DEFAULT, true);

        assert_eq!(layout.move_handle, Point::new(645.0, 120.0));
        assert_eq!(layout.buttons.screenshot, Point::new(100.0, 120.0));
        assert_eq!(layout.buttons.copy, Point::new(180.0, 120.0));
        assert_eq!(layout.buttons.exit, Point::new(297.0, 120.0));
        assert_eq!(layout.buttons.hide, Point::new(380.0, 120.0));

        let pager = layout.pager.as_created().unwrap();
        assert_eq!(pager.previous, Point::new(80.0, 336.0));
        assert_eq!(pager.next, Point::new(80.0, 366.0));

        let text = layout.text_box.as_created().unwrap();
        assert_eq!(text.origin, Point::new(100.0, 336.0));
        assert_eq!(text.width, 545.0);
    }

    #[test]
    fn test_pager_absent_before_translation() {
        let layout = OverlayLayout::compute(&Region::DEFAULT, false);
        assert_eq!(layout.pager, Slot::NotCreated);
        assert_eq!(layout.text_box, Slot::NotCreated);
    }
}
