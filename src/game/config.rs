use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the game
///
/// Every field has a default, so a config file only needs the keys it wants
/// to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per side of the square grid
    pub grid_size: usize,
    /// Pixel size of one cell; positions are interpolated in pixel space
    pub cell_size: f64,
    /// Target render frame rate
    pub fps: u32,
    /// Time between simulation ticks, in milliseconds
    pub tick_ms: u64,
    /// Apples a player must eat to gain one level
    pub xp_per_level: u32,
    /// Bounds tolerance as a fraction of one cell
    pub wall_margin: f64,
    /// Upper limit for the apple count chosen in the menu
    pub max_apples: usize,
    /// Apple count preselected in the menu
    pub default_apples: usize,
    /// How far the XP bar display moves toward the real counter per frame
    pub xp_fill_speed: f64,
    /// Initial length of each snake
    pub initial_snake_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 25,
            cell_size: 26.0,
            fps: 60,
            tick_ms: 180,
            xp_per_level: 10,
            wall_margin: 0.35,
            max_apples: 50,
            default_apples: 5,
            xp_fill_speed: 0.05,
            initial_snake_length: 3,
        }
    }
}

impl GameConfig {
    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            grid_size: 10,
            max_apples: 10,
            default_apples: 1,
            ..Default::default()
        }
    }

    /// Load a (possibly partial) configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.grid_size >= 5, "grid_size must be at least 5");
        // Apple radius is half a cell minus 4 pixels
        ensure!(self.cell_size >= 8.0, "cell_size must be at least 8");
        ensure!(self.fps > 0, "fps must be positive");
        ensure!(self.tick_ms > 0, "tick_ms must be positive");
        ensure!(self.xp_per_level >= 1, "xp_per_level must be at least 1");
        ensure!(
            (0.0..1.0).contains(&self.wall_margin),
            "wall_margin must be in [0, 1)"
        );
        ensure!(
            self.initial_snake_length >= 1 && self.initial_snake_length <= self.grid_size / 2,
            "initial_snake_length must be between 1 and half the grid size"
        );
        ensure!(
            self.max_apples >= 1 && self.max_apples < self.grid_size * self.grid_size,
            "max_apples must be at least 1 and smaller than the number of cells"
        );
        ensure!(
            (1..=self.max_apples).contains(&self.default_apples),
            "default_apples must be between 1 and max_apples"
        );
        Ok(())
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }

    /// Interpolation progress gained per rendered frame
    pub fn progress_per_frame(&self) -> f64 {
        1.0 / (self.fps as f64 * self.tick_duration().as_secs_f64())
    }

    /// Pixel extent of the board along one axis
    pub fn board_pixels(&self) -> f64 {
        self.grid_size as f64 * self.cell_size
    }

    /// Clamp a requested apple count into the range the menu allows
    pub fn clamp_apples(&self, count: usize) -> usize {
        count.clamp(1, self.max_apples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 25);
        assert_eq!(config.tick_ms, 180);
        assert_eq!(config.xp_per_level, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig {
            grid_size: 15,
            ..Default::default()
        };
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.fps, 60);
    }

    #[test]
    fn test_progress_per_frame() {
        let config = GameConfig {
            fps: 50,
            tick_ms: 200,
            ..Default::default()
        };
        assert!((config.progress_per_frame() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_apples() {
        let config = GameConfig::default();
        assert_eq!(config.clamp_apples(0), 1);
        assert_eq!(config.clamp_apples(7), 7);
        assert_eq!(config.clamp_apples(500), 50);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let tiny = GameConfig {
            grid_size: 3,
            ..Default::default()
        };
        assert!(tiny.validate().is_err());

        let no_apples = GameConfig {
            default_apples: 0,
            ..Default::default()
        };
        assert!(no_apples.validate().is_err());

        let wide_margin = GameConfig {
            wall_margin: 1.5,
            ..Default::default()
        };
        assert!(wide_margin.validate().is_err());
    }

    #[test]
    fn test_validate_cell_size_keeps_radii_positive() {
        let cramped = GameConfig {
            cell_size: 5.0,
            ..Default::default()
        };
        assert!(cramped.validate().is_err());

        let smallest = GameConfig {
            cell_size: 8.0,
            ..Default::default()
        };
        assert!(smallest.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_size": 30, "tick_ms": 100 }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_size, 30);
        assert_eq!(config.tick_ms, 100);
        assert_eq!(config.xp_per_level, 10);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(GameConfig::load(file.path()).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "fps": 0 }}"#).unwrap();
        assert!(GameConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(GameConfig::load(&dir.path().join("absent.json")).is_err());
    }
}
