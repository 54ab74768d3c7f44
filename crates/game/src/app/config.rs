use std::fs;
use std::path::{Path, PathBuf};

use engine::{Bounds, BoundsError, Vec2};
use serde::Deserialize;
use thiserror::Error;

pub(crate) const CONFIG_PATH_ENV_VAR: &str = "ACTOR_HUNT_CONFIG";
pub(crate) const SEED_ENV_VAR: &str = "ACTOR_HUNT_SEED";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    pub(crate) world_width: u32,
    pub(crate) world_height: u32,
    pub(crate) damaging_count: u32,
    pub(crate) healing_count: u32,
    pub(crate) max_hp: i32,
    pub(crate) win_points: i32,
    pub(crate) seed: Option<u64>,
    pub(crate) player_spawn: Option<Vec2>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 40,
            world_height: 20,
            damaging_count: 13,
            healing_count: 11,
            max_hp: 100,
            win_points: 100,
            seed: None,
            player_spawn: None,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path} at {field}: {source}")]
    Parse {
        path: PathBuf,
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("ACTOR_HUNT_SEED must be an unsigned integer, got '{value}'")]
    InvalidSeed { value: String },
    #[error("invalid world size: {0}")]
    WorldSize(#[from] BoundsError),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: i32 },
    #[error("player_spawn must sit on a whole cell, got ({x}, {y})")]
    FractionalSpawn { x: f32, y: f32 },
}

impl GameConfig {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV_VAR).map(PathBuf::from);
        let seed = std::env::var(SEED_ENV_VAR).ok();
        Self::load(path.as_deref(), seed.as_deref())
    }

    pub(crate) fn load(
        path: Option<&Path>,
        seed_override: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::read_file(path)?,
            None => Self::default(),
        };
        if let Some(raw) = seed_override.map(str::trim).filter(|raw| !raw.is_empty()) {
            let seed = raw.parse::<u64>().map_err(|_| ConfigError::InvalidSeed {
                value: raw.to_string(),
            })?;
            config.seed = Some(seed);
        }
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut deserializer = serde_json::Deserializer::from_str(&raw);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
            let field = error.path().to_string();
            ConfigError::Parse {
                path: path.to_path_buf(),
                field,
                source: error.into_inner(),
            }
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.bounds()?;
        if self.max_hp <= 0 {
            return Err(ConfigError::NotPositive {
                field: "max_hp",
                value: self.max_hp,
            });
        }
        if self.win_points <= 0 {
            return Err(ConfigError::NotPositive {
                field: "win_points",
                value: self.win_points,
            });
        }
        if let Some(spawn) = self.player_spawn {
            if spawn.x.fract() != 0.0 || spawn.y.fract() != 0.0 {
                return Err(ConfigError::FractionalSpawn {
                    x: spawn.x,
                    y: spawn.y,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn bounds(&self) -> Result<Bounds, BoundsError> {
        Bounds::new(self.world_width, self.world_height)
    }

    pub(crate) fn player_spawn(&self) -> Vec2 {
        self.player_spawn.unwrap_or(Vec2::new(
            (self.world_width / 2) as f32,
            (self.world_height / 2) as f32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn defaults_match_classic_board() {
        let config = GameConfig::load(None, None).expect("default config");
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.player_spawn(), Vec2::new(20.0, 10.0));
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("hunt.json");
        fs::write(&path, r#"{"world_width": 12, "seed": 7}"#).expect("write config");

        let config = GameConfig::load(Some(path.as_path()), None).expect("config");
        assert_eq!(config.world_width, 12);
        assert_eq!(config.world_height, 20);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn parse_error_reports_field_path() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("hunt.json");
        fs::write(&path, r#"{"player_spawn": {"x": 1.0, "y": "up"}}"#).expect("write config");

        let error = GameConfig::load(Some(path.as_path()), None).expect_err("bad config");
        match error {
            ConfigError::Parse { field, .. } => assert_eq!(field, "player_spawn.y"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = TempDir::new().expect("tempdir");
        let error = GameConfig::load(Some(temp.path().join("absent.json").as_path()), None)
            .expect_err("missing file");
        assert!(matches!(error, ConfigError::Read { .. }));
    }

    #[test]
    fn seed_override_wins_over_file() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("hunt.json");
        fs::write(&path, r#"{"seed": 1}"#).expect("write config");

        let config = GameConfig::load(Some(path.as_path()), Some(" 99 ")).expect("config");
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn invalid_seed_and_sizes_are_rejected() {
        assert!(matches!(
            GameConfig::load(None, Some("abc")),
            Err(ConfigError::InvalidSeed { .. })
        ));

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("hunt.json");
        fs::write(&path, r#"{"world_height": 0}"#).expect("write config");
        assert!(matches!(
            GameConfig::load(Some(path.as_path()), None),
            Err(ConfigError::WorldSize(_))
        ));

        fs::write(&path, r#"{"max_hp": 0}"#).expect("write config");
        assert!(matches!(
            GameConfig::load(Some(path.as_path()), None),
            Err(ConfigError::NotPositive { field: "max_hp", .. })
        ));
    }

    #[test]
    fn player_spawn_must_be_a_whole_cell() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("hunt.json");
        fs::write(&path, r#"{"player_spawn": {"x": 2.5, "y": 1.0}}"#).expect("write config");
        assert!(matches!(
            GameConfig::load(Some(path.as_path()), None),
            Err(ConfigError::FractionalSpawn { .. })
        ));

        fs::write(&path, r#"{"player_spawn": {"x": 2.0, "y": 1.0}}"#).expect("write config");
        let config = GameConfig::load(Some(path.as_path()), None).expect("config");
        assert_eq!(config.player_spawn(), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn default_spawn_centers_on_a_whole_cell_for_odd_sizes() {
        let config = GameConfig {
            world_width: 5,
            world_height: 3,
            ..GameConfig::default()
        };
        assert_eq!(config.player_spawn(), Vec2::new(2.0, 1.0));
    }
}
