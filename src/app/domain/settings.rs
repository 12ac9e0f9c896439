use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::AppError;

/// Fixed print medium used by the print stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Value for the CSS `@page { size: .. }` rule
    pub fn css_size(&self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::Letter => "letter",
        }
    }

    /// Page margin in millimetres
    pub fn margin_mm(&self) -> u32 {
        match self {
            Self::A4 => 20,
            Self::Letter => 19,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::A4 => "A4 (210 × 297 mm)",
            Self::Letter => "US Letter (8.5 × 11 in)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Directory of the last opened or saved document
    #[serde(default)]
    pub last_open_directory: Option<String>,

    /// Hand exported print documents to the system viewer
    #[serde(default = "default_open_after_export")]
    pub open_after_export: bool,

    #[serde(default)]
    pub page_size: PageSize,
}

fn default_open_after_export() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            last_open_directory: None,
            open_after_export: default_open_after_export(),
            page_size: PageSize::default(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                // Try to save defaults for next time
                let _ = default.save_to(config_path);
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), AppError> {
        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(config_path, json)?;

        Ok(())
    }

    /// Remember the directory containing `path` for the next dialog
    pub fn remember_directory(&mut self, path: &str) {
        if let Some(parent) = Path::new(path).parent() {
            let dir = parent.to_string_lossy().to_string();
            if !dir.is_empty() {
                self.last_open_directory = Some(dir);
            }
        }
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("hangeul-md");
        path.push("settings.json");
        path
    }
}
