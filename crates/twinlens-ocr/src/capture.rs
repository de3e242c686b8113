use anyhow::{Context, Result};
use image::RgbaImage;
use twinlens_core::ScreenCapture;
use twinlens_types::CaptureBounds;
use xcap::Monitor;

use crate::geometry::{MonitorRect, crop_box, pick_monitor};

/// Screen grabs through xcap
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapCapture;

impl ScreenCapture for XcapCapture {
    fn capture(&self, bounds: CaptureBounds) -> Result<RgbaImage> {
        let monitors = Monitor::all().context("Failed to get monitors")?;
        let rects: Vec<MonitorRect> = monitors
            .iter()
            .map(|m| MonitorRect {
                x: m.x(),
                y: m.y(),
                width: m.width(),
                height: m.height(),
            })
            .collect();

        let index = pick_monitor(&rects, &bounds).context("No monitor found")?;
        let crop = crop_box(&rects[index], &bounds).context("Region is off screen")?;

        let image = monitors[index]
            .capture_image()
            .context("Failed to capture screen")?;

        let cropped =
            xcap::image::imageops::crop_imm(&image, crop.x, crop.y, crop.width, crop.height)
                .to_image();

        let (width, height) = cropped.dimensions();
        RgbaImage::from_raw(width, height, cropped.into_raw())
            .context("Captured buffer does not match its dimensions")
    }
}
