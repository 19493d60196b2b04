use std::io::ErrorKind;
use std::str::FromStr;

use log::LevelFilter;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

pub trait ConfigContentProvider {
    fn get_config_content(&self) -> Result<Option<String>, String>;
}

pub struct FileContentConfigProvider {
    file_path: String,
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("Failed to read config file {}: {}", self.file_path, err)),
        }
    }
}

/// Loads a YAML config through a content provider.
pub struct ConfigManager<TProvider: ConfigContentProvider> {
    provider: TProvider,
}

impl ConfigManager<FileContentConfigProvider> {
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self { provider: FileContentConfigProvider { file_path: file_path.to_string() } }
    }
}

impl<TProvider: ConfigContentProvider> ConfigManager<TProvider> {
    /// `Ok(None)` when there is nothing to load.
    pub fn get_config<TConfig>(&self) -> Result<Option<TConfig>, String>
    where
        TConfig: DeserializeOwned + Validate,
    {
        let Some(content) = self.provider.get_config_content()? else {
            return Ok(None);
        };

        let config: TConfig = serde_yaml_ng::from_str(&content)
            .map_err(|e| format!("Failed to deserialize config: {}", e))?;
        config.validate().map_err(|e| format!("Config validation error: {}", e))?;

        Ok(Some(config))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in cells
    pub columns: u16,
    /// Board height in cells
    pub rows: u16,
    /// Side of one cell in board units
    pub cell_size: u16,
    pub sound: bool,
    pub log_file: String,
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 23,
            rows: 14,
            cell_size: 60,
            sound: true,
            log_file: "snake.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl GameConfig {
    pub fn grid(&self) -> Grid {
        Grid::new(self.columns, self.rows, self.cell_size)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, String> {
        LevelFilter::from_str(&self.log_level).map_err(|_| format!("Unknown log level: {}", self.log_level))
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if !(10..=100).contains(&self.columns) {
            return Err("Columns must be between 10 and 100".to_string());
        }
        if !(10..=100).contains(&self.rows) {
            return Err("Rows must be between 10 and 100".to_string());
        }
        if self.cell_size == 0 {
            return Err("Cell size must be at least 1".to_string());
        }
        if self.log_file.is_empty() {
            return Err("Log file must not be empty".to_string());
        }
        self.level_filter().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct InMemoryProvider(Option<&'static str>);

    impl ConfigContentProvider for InMemoryProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            Ok(self.0.map(str::to_string))
        }
    }

    fn load(content: Option<&'static str>) -> Result<Option<GameConfig>, String> {
        ConfigManager { provider: InMemoryProvider(content) }.get_config()
    }

    #[test]
    fn missing_file_yields_nothing() {
        assert_eq!(load(None), Ok(None));
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config = load(Some("columns: 30\nsound: false\n")).unwrap().unwrap();

        assert_eq!(config.columns, 30);
        assert!(!config.sound);
        assert_eq!(config.rows, GameConfig::default().rows);
        assert_eq!(config.grid().width(), 30 * 60);
    }

    #[test]
    fn rejects_out_of_range_board() {
        let err = load(Some("rows: 5\n")).unwrap_err();
        assert!(err.contains("Rows must be between 10 and 100"), "{}", err);
    }

    #[test]
    fn rejects_unknown_log_level() {
        let err = load(Some("log_level: chatty\n")).unwrap_err();
        assert!(err.contains("Unknown log level"), "{}", err);
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = load(Some("columns: [1, 2\n")).unwrap_err();
        assert!(err.starts_with("Failed to deserialize config"), "{}", err);
    }

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.level_filter(), Ok(LevelFilter::Info));
    }

    #[test]
    fn missing_file_on_disk_is_not_an_error() {
        let manager = ConfigManager::from_yaml_file("definitely/not/here/snake.yaml");
        assert_eq!(manager.get_config::<GameConfig>(), Ok(None));
    }
}
