use std::env;
use std::path::{Path, PathBuf};

use panelquote_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();

    let mut lines =
        vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "database.url",
        &config.database.url,
        source_of("PANELQUOTE_DATABASE_URL", config_file_path.as_deref()),
    ));
    lines.push(render_line(
        "database.max_connections",
        &config.database.max_connections.to_string(),
        source_of("PANELQUOTE_DATABASE_MAX_CONNECTIONS", config_file_path.as_deref()),
    ));
    lines.push(render_line(
        "database.timeout_secs",
        &config.database.timeout_secs.to_string(),
        source_of("PANELQUOTE_DATABASE_TIMEOUT_SECS", config_file_path.as_deref()),
    ));
    lines.push(render_line(
        "server.bind_address",
        &config.server.bind_address,
        source_of("PANELQUOTE_SERVER_BIND_ADDRESS", config_file_path.as_deref()),
    ));
    lines.push(render_line(
        "server.port",
        &config.server.port.to_string(),
        source_of("PANELQUOTE_SERVER_PORT", config_file_path.as_deref()),
    ));
    lines.push(render_line(
        "costing.profit_margin",
        &config.costing.profit_margin.to_string(),
        source_of("PANELQUOTE_COSTING_PROFIT_MARGIN", config_file_path.as_deref()),
    ));
    lines.push(render_line(
        "costing.tax_percentage",
        &config.costing.tax_percentage.to_string(),
        source_of("PANELQUOTE_COSTING_TAX_PERCENTAGE", config_file_path.as_deref()),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source_of("PANELQUOTE_LOGGING_LEVEL", config_file_path.as_deref()),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format).to_lowercase(),
        source_of("PANELQUOTE_LOGGING_FORMAT", config_file_path.as_deref()),
    ));

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("panelquote.toml"), PathBuf::from("config/panelquote.toml")]
        .into_iter()
        .find(|path| path.exists())
}

/// Coarse source attribution: an exported env var wins, otherwise the
/// config file (when one exists), otherwise the built-in default.
fn source_of(env_var: &str, config_file: Option<&Path>) -> String {
    if env::var(env_var).map(|value| !value.trim().is_empty()).unwrap_or(false) {
        return format!("env:{env_var}");
    }
    if let Some(path) = config_file {
        return format!("file:{}", path.display());
    }
    "default".to_string()
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("  {key} = {value}  ({source})")
}

#[cfg(test)]
mod tests {
    use super::{render_line, source_of};

    #[test]
    fn source_defaults_without_env_or_file() {
        assert_eq!(source_of("PANELQUOTE_TEST_UNSET_VAR", None), "default");
    }

    #[test]
    fn render_line_is_stable() {
        assert_eq!(
            render_line("server.port", "8080", "default".to_string()),
            "  server.port = 8080  (default)"
        );
    }
}
