use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use twinlens_config::Config;

/// Config from a JSON profile, or from the environment when none is given
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No config file given, reading environment");
        return Ok(Config::new());
    };

    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid config in {}", path.display()))?;
    Ok(config)
}

/// Command line overrides applied on top of the loaded config
pub fn apply_overrides(
    config: &mut Config,
    settings_dir: Option<&Path>,
    endpoint: Option<&str>,
) {
    if let Some(dir) = settings_dir {
        config.settings_dir = dir.to_path_buf();
    }
    if let Some(url) = endpoint {
        config.translator.api_url = url.to_string();
    }
}
