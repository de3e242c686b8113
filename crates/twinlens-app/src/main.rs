use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use twinlens_config::Config;
use twinlens_core::{CapturePipeline, SettingsStore, TranslationSettings, WindowController};
use twinlens_io::SystemClipboard;
use twinlens_translator::{LibreTranslateClient, Translator};
use twinlens_types::WindowId;

use crate::backends::{Backends, platform_backends};
use crate::console::{console_loop, spawn_stdin_reader};
use crate::controller::{PairMember, WindowPair};
use crate::events::ExitRequest;
use crate::surface::{ChromeToggle, TracingSurface};

mod backends;
mod console;
mod controller;
mod events;
mod profile;
mod surface;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(version, about = "Two linked screen-region translation overlays")]
struct Cli {
    /// JSON config file; environment variables are used when absent
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Directory for the per-window settings files
    #[arg(long)]
    settings_dir: Option<PathBuf>,

    /// Translation endpoint URL
    #[arg(short = 'e', long)]
    endpoint: Option<String>,

    /// Emit JSON log lines
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn translation_settings(config: &Config) -> TranslationSettings {
    TranslationSettings {
        from: config.translator.from_lang.clone(),
        to: config.translator.to_lang.clone(),
        format: config.translator.format.clone(),
        alternatives: config.translator.alternatives,
    }
}

fn build_member(
    id: WindowId,
    config: &Config,
    backends: &Backends,
    translator: Arc<dyn Translator>,
    store: &SettingsStore,
) -> PairMember {
    let chrome = ChromeToggle::new(id);
    let pipeline = CapturePipeline::new(
        backends.capture.clone(),
        backends.recognizer.clone(),
        translator,
        chrome.clone(),
        translation_settings(config),
    );
    let controller = WindowController::new(id, store.load(id), pipeline, config.ui.hit_tolerance);

    PairMember {
        controller,
        surface: Box::new(TracingSurface::new(id, chrome)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let json_logs =
        cli.log_json || std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    init_tracing(json_logs);

    let mut config = profile::load_config(cli.config.as_deref())?;
    profile::apply_overrides(
        &mut config,
        cli.settings_dir.as_deref(),
        cli.endpoint.as_deref(),
    );

    let backends = platform_backends(&config.ocr)?;
    let translator: Arc<dyn Translator> = Arc::new(LibreTranslateClient::new(
        config.translator.api_url.clone(),
        config.translator.api_key.clone(),
    ));
    tracing::info!(
        "Translating {} -> {} via {} ({})",
        config.translator.from_lang,
        config.translator.to_lang,
        translator.metadata().name,
        config.translator.api_url
    );

    let store = SettingsStore::new(config.settings_dir.clone());
    let first = build_member(WindowId::FIRST, &config, &backends, translator.clone(), &store);
    let second = build_member(WindowId::SECOND, &config, &backends, translator, &store);

    let pair = WindowPair::new(
        first,
        second,
        store,
        Arc::new(SystemClipboard),
        Duration::from_millis(config.ui.copy_label_ms),
    );
    let cancel = CancellationToken::new();
    let handle = pair.spawn(cancel.clone());

    let mut tasks = JoinSet::new();
    tasks.spawn(console_loop(spawn_stdin_reader(), handle.input(), cancel.child_token()));

    let input = handle.input();
    let signal_cancel = cancel.child_token();
    tasks.spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                tracing::info!("Ctrl+C received");
                input.request_exit(ExitRequest::Signal).await;
            }
            _ = signal_cancel.cancelled() => {}
        }
        Ok::<_, anyhow::Error>(())
    });

    let persisted = handle.join().await?;
    tracing::info!("Persisted {} windows", persisted.len());

    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Err(e)) => tracing::error!("Task failed: {:#}", e),
            Err(e) => tracing::error!("Task panicked: {}", e),
            Ok(Ok(())) => {}
        }
    }

    Ok(())
}
