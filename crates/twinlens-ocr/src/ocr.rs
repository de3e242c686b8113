use anyhow::{Context, Result};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use image::codecs::png::PngEncoder;
use twinlens_core::pipeline::LineBounds;
use twinlens_core::{RecognizedLine, TextRecognizer};
use windows::{
    Foundation::Collections::IVectorView,
    Globalization::Language,
    Graphics::Imaging::{BitmapDecoder, SoftwareBitmap},
    Media::Ocr::{OcrEngine as WinOcrEngine, OcrWord},
    Storage::Streams::{DataWriter, InMemoryRandomAccessStream},
    Win32::Foundation::RPC_E_CHANGED_MODE,
    Win32::System::Com::{COINIT_MULTITHREADED, CoInitializeEx, CoUninitialize},
    core::HSTRING,
};

/// The engine reports no per-line score
const LINE_CONFIDENCE: f32 = 1.0;

/// Text recognition through the Windows.Media.Ocr engine
pub struct WindowsRecognizer {
    engine: WinOcrEngine,
    report_text_angle: bool,
}

/// Keeps the calling worker thread in a COM apartment for one recognition.
/// Threads already in a single-threaded apartment are used as they are and
/// left untouched on drop.
struct Apartment {
    joined: bool,
}

impl Apartment {
    fn enter() -> Result<Self> {
        let hr = unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) };
        if hr == RPC_E_CHANGED_MODE {
            tracing::trace!("Worker thread already has a single-threaded apartment");
            return Ok(Self { joined: false });
        }
        hr.ok().context("Failed to initialize COM")?;
        Ok(Self { joined: true })
    }
}

impl Drop for Apartment {
    fn drop(&mut self) {
        if self.joined {
            unsafe { CoUninitialize() };
        }
    }
}

impl WindowsRecognizer {
    /// Create an engine for the given language tag (e.g. "en")
    pub fn new(language_code: &str, report_text_angle: bool) -> Result<Self> {
        let language = Language::CreateLanguage(&HSTRING::from(language_code))
            .context("Failed to create language")?;

        let engine = WinOcrEngine::TryCreateFromLanguage(&language)
            .context("Failed to create OCR engine for language")?;

        Ok(Self {
            engine,
            report_text_angle,
        })
    }

    /// Get the recognizer language for this engine
    pub fn recognizer_language(&self) -> Result<String> {
        self.engine
            .RecognizerLanguage()
            .context("Failed to get recognizer language")?
            .LanguageTag()
            .map(|tag| tag.to_string())
            .context("Failed to get language tag")
    }
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .context("Failed to encode PNG")?;
    Ok(buffer)
}

fn decode_bitmap(png: &[u8]) -> Result<SoftwareBitmap> {
    let stream = InMemoryRandomAccessStream::new().context("Failed to create stream")?;
    let writer = DataWriter::CreateDataWriter(&stream).context("Failed to create writer")?;

    writer
        .WriteBytes(png)
        .context("Failed to write image bytes")?;
    writer
        .StoreAsync()
        .context("Failed to store async")?
        .get()
        .context("Failed to store data")?;
    writer.FlushAsync().context("Failed to flush")?.get()?;

    stream.Seek(0).context("Failed to seek")?;

    let decoder = BitmapDecoder::CreateAsync(&stream)
        .context("Failed to create decoder async")?
        .get()
        .context("Failed to get decoder")?;

    decoder
        .GetSoftwareBitmapAsync()
        .context("Failed to get bitmap async")?
        .get()
        .context("Failed to get software bitmap")
}

/// Union of the word boxes of one line
fn line_bounds(words: &IVectorView<OcrWord>) -> Result<LineBounds> {
    let mut left = f32::MAX;
    let mut top = f32::MAX;
    let mut right = f32::MIN;
    let mut bottom = f32::MIN;

    for word in words {
        let rect = word.BoundingRect()?;
        left = left.min(rect.X);
        top = top.min(rect.Y);
        right = right.max(rect.X + rect.Width);
        bottom = bottom.max(rect.Y + rect.Height);
    }

    if left > right {
        return Ok(LineBounds::default());
    }

    Ok(LineBounds {
        x: left,
        y: top,
        width: right - left,
        height: bottom - top,
    })
}

impl TextRecognizer for WindowsRecognizer {
    fn recognize(&self, image: &RgbaImage) -> Result<Vec<RecognizedLine>> {
        // runs on a blocking worker thread
        let _apartment = Apartment::enter()?;

        let png = encode_png(image)?;
        let bitmap = decode_bitmap(&png)?;

        let result = self
            .engine
            .RecognizeAsync(&bitmap)
            .context("Failed to recognize async")?
            .get()
            .context("Failed to get OCR result")?;

        if self.report_text_angle
            && let Ok(angle) = result.TextAngle().and_then(|a| a.Value())
        {
            tracing::debug!("Text angle {:.1} degrees", angle);
        }

        let mut lines = Vec::new();
        for line in result.Lines().context("Failed to get lines")? {
            let text = line.Text().context("Failed to get line text")?.to_string();
            let bounds = line_bounds(&line.Words().context("Failed to get words")?)?;
            lines.push(RecognizedLine {
                bounds,
                text,
                confidence: LINE_CONFIDENCE,
            });
        }

        Ok(lines)
    }
}
