mod settings;
mod style;

pub use settings::{Config, OutputSettings};
pub use style::{Rgb, Style};

use crate::error::{InvoiceError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the config directory path (XDG config dir, or ~/.invoice-pdf/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "invoice-pdf") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        InvoiceError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".invoice-pdf"))
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

/// Relative output dirs are taken relative to the config directory.
pub fn resolve_output_dir(dir: &str, config_dir: &Path) -> PathBuf {
    let path = expand_path(dir);
    if path.is_absolute() || dir == "." {
        path
    } else {
        config_dir.join(path)
    }
}

/// Load config.toml; a missing file yields the built-in defaults.
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| InvoiceError::ConfigParse { path, source: e })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[output]
dir = "output"                 # relative to this directory, or absolute / ~/...

# Every key below is optional; omitted keys keep their defaults.
[style]
currency_symbol = "£"
date_format = "%d/%m/%Y"       # chrono strftime pattern
# page_width = 210.0           # millimetres
# page_height = 297.0
# margin = 15.0
# row_height = 8.0
# column_offsets = [0.0, 85.0, 105.0, 135.0, 152.0]
# stripe_fill = [248, 249, 250]
# total_fill = [222, 235, 255]
"#;
