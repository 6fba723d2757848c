pub mod session;
mod settings;

pub use session::Session;
pub use settings::{ApiSettings, Config, ReportSettings};

use crate::error::{ConsoleError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables that override the configured service URLs
pub const ENV_CLIENTS_URL: &str = "OSREPORT_API_URL";
pub const ENV_PRODUCTS_URL: &str = "OSREPORT_PRODUCTS_API_URL";
pub const ENV_ORDERS_URL: &str = "OSREPORT_OS_API_URL";
pub const ENV_BILLING_URL: &str = "OSREPORT_BILLING_API_URL";

/// Get the config directory path (~/.osreport/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "osreport") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.osreport/
    let home = dirs_home().ok_or_else(|| {
        ConsoleError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".osreport"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the report output directory; relative paths live under the config dir
pub fn resolve_output_dir(output_dir: &str, cfg_dir: &Path) -> PathBuf {
    let expanded = expand_path(output_dir);
    if expanded.is_absolute() {
        expanded
    } else {
        cfg_dir.join(expanded)
    }
}

/// Load config.toml and apply environment overrides
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(ConsoleError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    let mut config: Config =
        toml::from_str(&content).map_err(|e| ConsoleError::ConfigParse { path, source: e })?;
    apply_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Replace service URLs with values from `lookup`, skipping blank ones
pub fn apply_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let targets = [
        (ENV_CLIENTS_URL, &mut config.api.clients_url),
        (ENV_PRODUCTS_URL, &mut config.api.products_url),
        (ENV_ORDERS_URL, &mut config.api.orders_url),
        (ENV_BILLING_URL, &mut config.api.billing_url),
    ];
    for (key, slot) in targets {
        if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(key, url = %value, "service url overridden from environment");
            *slot = value;
        }
    }
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"# Backend service base URLs. Each can be overridden with an environment
# variable: OSREPORT_API_URL, OSREPORT_PRODUCTS_API_URL,
# OSREPORT_OS_API_URL, OSREPORT_BILLING_API_URL.
[api]
clients_url = "http://localhost:5001"   # clients and technicians
products_url = "http://localhost:5002"  # products and services
orders_url = "http://localhost:5003"    # service orders
billing_url = "http://localhost:5004"   # invoices
timeout_secs = 10

[report]
output_dir = "output"   # relative to this directory, or absolute / ~/...
footer = "Sistema de Ordem de Serviço"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_defaults() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        let defaults = ApiSettings::default();
        assert_eq!(config.api.clients_url, defaults.clients_url);
        assert_eq!(config.api.orders_url, "http://localhost:5003");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.report.output_dir, "output");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[api]\norders_url = \"http://os:80\"\n").unwrap();
        assert_eq!(config.api.orders_url, "http://os:80");
        assert_eq!(config.api.billing_url, "http://localhost:5004");
        assert_eq!(config.report.footer, "Sistema de Ordem de Serviço");
    }

    #[test]
    fn overrides_replace_only_present_values() {
        let mut config = Config::default();
        apply_overrides(&mut config, |key| match key {
            ENV_ORDERS_URL => Some("http://orders.internal".to_string()),
            ENV_BILLING_URL => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.api.orders_url, "http://orders.internal");
        assert_eq!(config.api.billing_url, "http://localhost:5004");
        assert_eq!(config.api.clients_url, "http://localhost:5001");
    }

    #[test]
    fn relative_output_dir_resolves_under_config_dir() {
        let cfg = Path::new("/tmp/osreport-cfg");
        assert_eq!(
            resolve_output_dir("output", cfg),
            PathBuf::from("/tmp/osreport-cfg/output")
        );
        assert_eq!(
            resolve_output_dir("/var/reports", cfg),
            PathBuf::from("/var/reports")
        );
    }
}
