use std::path::PathBuf;

use crate::fetch::Source;
use crate::theme::ThemeMode;

/// Environment variable that overrides the configured source.
pub const SOURCE_ENV: &str = "FOLIO_SOURCE";

/// Resolved startup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub source: Source,
    pub theme: ThemeMode,
}

/// Return the path to the config file.
pub fn config_file_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".config/folio/folio.md")
}

/// Parse `~/.config/folio/folio.md`.
///
/// Format:
/// ```markdown
/// # folio
/// - source: https://example.com
/// - theme: dark
/// ```
///
/// Every key is optional. `source` is a directory or an http(s) URL and
/// defaults to the working directory; `theme` defaults to light. Unknown keys
/// and headings are ignored.
pub fn parse_config(content: &str) -> Config {
    let mut config = Config::default();

    for line in content.lines() {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("- source:") {
            let source = rest.trim();
            if !source.is_empty() {
                config.source = Source::parse(source);
            }
        } else if let Some(rest) = trimmed.strip_prefix("- theme:") {
            match rest.trim().to_lowercase().as_str() {
                "light" => config.theme = ThemeMode::Light,
                "dark" => config.theme = ThemeMode::Dark,
                other => log::warn!("unknown theme {other:?}, keeping {:?}", config.theme),
            }
        }
    }

    config
}

/// Read the config file (if any) and apply the environment override.
pub fn load() -> Config {
    let path = config_file_path();
    let mut config = match std::fs::read_to_string(&path) {
        Ok(content) => {
            log::info!("config: {}", path.display());
            parse_config(&content)
        }
        Err(_) => Config::default(),
    };

    if let Some(raw) = std::env::var(SOURCE_ENV).ok().filter(|s| !s.trim().is_empty()) {
        config.source = Source::parse(&raw);
        log::info!("source: {} (from {SOURCE_ENV})", config.source);
    }

    config
}
