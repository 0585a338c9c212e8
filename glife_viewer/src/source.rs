// source.rs - Configuration sources for the viewer

use std::fs;
use std::path::{Path, PathBuf};

use glife::{ConfigSource, LifeConfig, LifeError, MatrixLocation};

/// A `LifeConfig` stored as JSON on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for JsonFileSource {
    fn life_config(&self) -> Result<LifeConfig, LifeError> {
        let text = fs::read_to_string(&self.path).map_err(|err| {
            LifeError::InvalidConfiguration(format!("cannot read {}: {err}", self.path.display()))
        })?;
        serde_json::from_str(&text).map_err(|err| {
            LifeError::InvalidConfiguration(format!("{}: {err}", self.path.display()))
        })
    }
}

/// Built-in run used when no configuration file is available.
pub fn demo_config() -> LifeConfig {
    LifeConfig {
        rows: 40,
        cols: 40,
        pattern: Some("Gosper Glider Gun".to_string()),
        pattern_at: MatrixLocation::new(2, 2),
        max_gen: 500,
        generate_image: true,
        fps: 10,
        alive_color: "dark green".to_string(),
        dead_color: "light grey".to_string(),
        ..LifeConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_config_is_valid() {
        let setup = demo_config().validate().unwrap();
        assert_eq!(setup.initial.population(), 36);
        assert!(setup.render.generate_image);
    }

    #[test]
    fn missing_file_is_invalid_configuration() {
        let source = JsonFileSource::new("/nonexistent/glife.json");
        assert!(matches!(source.life_config(), Err(LifeError::InvalidConfiguration(_))));
    }

    #[test]
    fn reads_json_file() {
        let path = std::env::temp_dir().join(format!("glife-viewer-{}.json", std::process::id()));
        fs::write(&path, r#"{ "rows": 5, "cols": 5, "alive": [{ "row": 2, "col": 2 }], "max_gen": 3 }"#).unwrap();
        let config = JsonFileSource::new(&path).life_config().unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.alive, vec![MatrixLocation::new(2, 2)]);
        assert_eq!(config.max_gen, 3);
    }
}
