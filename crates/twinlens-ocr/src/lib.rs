mod geometry;

#[cfg(windows)]
mod capture;
#[cfg(windows)]
mod ocr;

pub use geometry::{CropBox, MonitorRect, crop_box, pick_monitor};

#[cfg(windows)]
pub use capture::XcapCapture;
#[cfg(windows)]
pub use ocr::WindowsRecognizer;
