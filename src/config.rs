use std::path::Path;

use crate::ai::{MinimaxConfig, RolloutConfig};
use crate::arena::ArenaConfig;
use crate::error::ConfigError;
use crate::game::BoardDims;

/// Deepest minimax search accepted from configuration.
pub const MAX_DEPTH: usize = 10;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardDims,
    pub minimax: MinimaxConfig,
    pub rollout: RolloutConfig,
    pub arena: ArenaConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows == 0 || self.board.cols == 0 {
            return Err(ConfigError::Validation(
                "board.rows and board.cols must be > 0".into(),
            ));
        }
        if self.minimax.depth == 0 {
            return Err(ConfigError::Validation(
                "minimax.depth must be >= 1".into(),
            ));
        }
        if self.minimax.depth > MAX_DEPTH {
            return Err(ConfigError::Validation(format!(
                "minimax.depth must be <= {MAX_DEPTH}"
            )));
        }
        if self.rollout.simulations_per_move == 0 {
            return Err(ConfigError::Validation(
                "rollout.simulations_per_move must be >= 1".into(),
            ));
        }
        if self.arena.num_games == 0 {
            return Err(ConfigError::Validation(
                "arena.num_games must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.board, BoardDims::STANDARD);
        assert_eq!(config.minimax.depth, 3);
        assert_eq!(config.rollout.simulations_per_move, 100);
        assert_eq!(config.arena.num_games, 10);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[minimax]
depth = 5
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.minimax.depth, 5);
        // Other fields should be defaults
        assert_eq!(config.rollout.simulations_per_move, 100);
        assert_eq!(config.rollout.seed, None);
        assert!(!config.arena.alternate_colors);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.minimax.depth, default.minimax.depth);
        assert_eq!(config.arena.num_games, default.arena.num_games);
        assert_eq!(config.board, default.board);
    }

    #[test]
    fn test_rollout_section() {
        let toml_str = r#"
[rollout]
simulations_per_move = 250
parallel = true
seed = 42
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.rollout.simulations_per_move, 250);
        assert!(config.rollout.parallel);
        assert_eq!(config.rollout.seed, Some(42));
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = AppConfig::default();
        config.minimax.depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_excessive_depth() {
        let mut config = AppConfig::default();
        config.minimax.depth = MAX_DEPTH + 1;
        assert!(config.validate().is_err());
        config.minimax.depth = MAX_DEPTH;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_simulations() {
        let mut config = AppConfig::default();
        config.rollout.simulations_per_move = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_games() {
        let mut config = AppConfig::default();
        config.arena.num_games = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_board() {
        let mut config = AppConfig::default();
        config.board.cols = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_arena.toml")).unwrap();
        assert_eq!(config.arena.num_games, 10);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arena.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[arena]
num_games = 25
alternate_colors = true
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.arena.num_games, 25);
        assert!(config.arena.alternate_colors);
        // Others are defaults
        assert_eq!(config.minimax.depth, 3);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arena.toml");
        std::fs::write(&path, "[arena]\nnum_games = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "[arena\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
