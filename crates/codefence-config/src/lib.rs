use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// How code lines are joined when a block reverts to a paragraph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineJoinStyle {
    #[default]
    SoftBreak,
    Space,
}

/// Editor configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language for bare fences and for toggled code blocks
    pub default_language: String,
    /// Plain-text mode when false: fences are typed verbatim
    pub rich_text: bool,
    pub line_join: LineJoinStyle,
    /// Columns a tab occupies on screen
    pub tab_width: u16,
    /// File opened when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: "javascript".to_string(),
            rich_text: true,
            line_join: LineJoinStyle::default(),
            tab_width: 4,
            start_file: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the start file
        config.start_file = config
            .start_file
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/codefence");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/codefence/config.toml"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_language, "javascript");
        assert!(config.rich_text);
        assert_eq!(config.line_join, LineJoinStyle::SoftBreak);
        assert_eq!(config.tab_width, 4);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str("default_language = \"sql\"\n").unwrap();

        assert_eq!(config.default_language, "sql");
        assert!(config.rich_text);
        assert_eq!(config.tab_width, 4);
    }

    #[test]
    fn test_line_join_is_kebab_case() {
        let config: Config = toml::from_str("line_join = \"space\"\nrich_text = false\n").unwrap();
        assert_eq!(config.line_join, LineJoinStyle::Space);
        assert!(!config.rich_text);

        let toml_str = toml::to_string(&Config::default()).unwrap();
        assert!(toml_str.contains("line_join = \"soft-break\""));
    }

    #[test]
    fn test_unknown_line_join_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "line_join = \"newline\"\n").unwrap();

        let result = Config::load_from_path(&config_file);
        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_start_file_env_var_is_expanded_on_load() {
        unsafe {
            env::set_var("CODEFENCE_TEST_ROOT", "/custom/root");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "start_file = \"$CODEFENCE_TEST_ROOT/draft.txt\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.start_file, Some(PathBuf::from("/custom/root/draft.txt")));

        unsafe {
            env::remove_var("CODEFENCE_TEST_ROOT");
        }
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            default_language: "rust".to_string(),
            line_join: LineJoinStyle::Space,
            tab_width: 2,
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
