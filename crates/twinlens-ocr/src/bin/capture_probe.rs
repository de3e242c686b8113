//! Capture one region and print what OCR reads from it:
//! cargo run -p twinlens-ocr --bin capture_probe -- X1 Y1 X2 Y2 [LANG]

use anyhow::{Context, Result};
use twinlens_types::Region;

fn parse_region(args: &[String]) -> Result<Region> {
    let coords: Vec<f64> = args
        .iter()
        .take(4)
        .map(|a| a.parse::<f64>().with_context(|| format!("Bad coordinate '{}'", a)))
        .collect::<Result<_>>()?;

    match coords[..] {
        [x1, y1, x2, y2] => Ok(Region::new(x1, y1, x2, y2)),
        _ => Ok(Region::DEFAULT),
    }
}

#[cfg(windows)]
fn run(region: Region, language: &str) -> Result<()> {
    use twinlens_core::pipeline::join_lines;
    use twinlens_core::{ScreenCapture, TextRecognizer};

    let bounds = region.capture_bounds().context("Region has no area")?;

    tracing::info!("Capturing {:?}", bounds);
    let start = std::time::Instant::now();
    let image = twinlens_ocr::XcapCapture.capture(bounds)?;
    tracing::info!("{}x{} in {:?}", image.width(), image.height(), start.elapsed());

    let recognizer = twinlens_ocr::WindowsRecognizer::new(language, true)?;
    tracing::info!("Recognizer language: {}", recognizer.recognizer_language()?);

    let start = std::time::Instant::now();
    let lines = recognizer.recognize(&image)?;
    tracing::info!("{} lines in {:?}", lines.len(), start.elapsed());

    for line in &lines {
        tracing::info!("> {} ({:?})", line.text, line.bounds);
    }
    tracing::info!("Joined: {}", join_lines(&lines));
    Ok(())
}

#[cfg(not(windows))]
fn run(_region: Region, _language: &str) -> Result<()> {
    anyhow::bail!("Screen capture and OCR backends are only built on Windows")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let region = parse_region(&args)?;
    let language = args.get(4).map(String::as_str).unwrap_or("en");

    run(region, language)
}
