pub mod error;
pub mod layout;
pub mod pager;
pub mod pipeline;
pub mod selector;
pub mod settings;
pub mod view;
pub mod window;

pub use error::{PipelineError, SettingsError};
pub use pipeline::{
    CapturePipeline, OverlayVisibility, RecognizedLine, ScreenCapture, TextRecognizer,
    TranslationSettings,
};
pub use settings::SettingsStore;
pub use window::{Clipboard, WindowController};
