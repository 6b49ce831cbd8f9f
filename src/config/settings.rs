use serde::{Deserialize, Serialize};

use super::style::Style;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub style: Style,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_dir")]
    pub dir: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> String {
    ".".to_string()
}
