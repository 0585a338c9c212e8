// config.rs - Run parameters supplied from outside and their validation
//
// Reading files is someone else's job: anything that can produce a `LifeConfig`
// (serde, a key/value reader, hand-built values) is a `ConfigSource`. Nothing
// reaches a `Simulation` without passing `LifeConfig::validate`.

use std::num::{NonZeroU32, NonZeroUsize};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::{Color, Palette};
use crate::coords::MatrixLocation;
use crate::engine::RuleEngine;
use crate::error::{LifeError, Result};
use crate::grid::{Boundary, Grid};
use crate::patterns::Pattern;
use crate::rule::Rule;
use crate::simulation::{DEFAULT_MAX_GEN, SimulationSettings};

/// Raw, unvalidated run description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    pub rows: usize,
    pub cols: usize,
    /// Initially alive cells.
    pub alive: Vec<MatrixLocation>,
    /// Optional named pattern from [`crate::patterns::PATTERNS`], added to `alive`.
    pub pattern: Option<String>,
    /// Top-left corner for `pattern`.
    pub pattern_at: MatrixLocation,
    pub max_gen: i64,
    /// Rule override in `B3/S23` notation.
    pub rule: Option<String>,
    pub boundary: Boundary,
    pub max_tracked_generations: Option<usize>,
    pub generate_image: bool,
    pub fps: u32,
    pub alive_color: String,
    pub dead_color: String,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            alive: Vec::new(),
            pattern: None,
            pattern_at: MatrixLocation::default(),
            max_gen: DEFAULT_MAX_GEN as i64,
            rule: None,
            boundary: Boundary::Bounded,
            max_tracked_generations: None,
            generate_image: false,
            fps: 5,
            alive_color: "black".to_string(),
            dead_color: "white".to_string(),
        }
    }
}

/// Settings only the renderer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub generate_image: bool,
    pub fps: NonZeroU32,
    pub alive_color: Color,
    pub dead_color: Color,
}

impl RenderSettings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.get()
    }
}

/// A validated configuration, ready to start a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSetup {
    pub initial: Grid,
    pub settings: SimulationSettings,
    pub render: RenderSettings,
}

/// Anything able to supply a [`LifeConfig`].
pub trait ConfigSource {
    fn life_config(&self) -> Result<LifeConfig>;

    fn run_setup(&self) -> Result<RunSetup> {
        self.life_config()?.validate()
    }
}

impl ConfigSource for LifeConfig {
    fn life_config(&self) -> Result<LifeConfig> {
        Ok(self.clone())
    }
}

fn invalid(msg: impl Into<String>) -> LifeError {
    LifeError::InvalidConfiguration(msg.into())
}

impl LifeConfig {
    pub fn validate(&self) -> Result<RunSetup> {
        let (rows, cols) = (self.rows, self.cols);
        if rows == 0 || cols == 0 {
            return Err(invalid(format!("grid dimensions {rows}x{cols} must both be non-zero")));
        }
        let max_gen = u64::try_from(self.max_gen)
            .map_err(|_| invalid(format!("max_gen must not be negative, got {}", self.max_gen)))?;

        let mut live = self
            .alive
            .iter()
            .map(|loc| loc.to_cell(rows, cols))
            .collect::<Result<Vec<_>>>()?;
        if let Some(name) = &self.pattern {
            let pattern = Pattern::find(name).ok_or_else(|| invalid(format!("unknown pattern {name:?}")))?;
            let origin = self.pattern_at.to_cell(rows, cols)?;
            live.extend(pattern.cells_at(origin));
        }
        let initial = Grid::new(rows, cols, live).map_err(|err| invalid(err.to_string()))?;

        let rule = match &self.rule {
            Some(text) => text.parse::<Rule>().map_err(|err| invalid(err.to_string()))?,
            None => Rule::default(),
        };
        let history_cap = match self.max_tracked_generations {
            Some(0) => return Err(invalid("max_tracked_generations must be at least 1")),
            Some(cap) => NonZeroUsize::new(cap),
            None => None,
        };

        let fps = NonZeroU32::new(self.fps).ok_or_else(|| invalid("fps must be at least 1"))?;
        let palette = Palette::standard();
        let color = |name: &str| palette.get(name).ok_or_else(|| invalid(format!("unknown color {name:?}")));

        Ok(RunSetup {
            initial,
            settings: SimulationSettings {
                max_gen,
                engine: RuleEngine::new(rule, self.boundary),
                history_cap,
            },
            render: RenderSettings {
                generate_image: self.generate_image,
                fps,
                alive_color: color(&self.alive_color)?,
                dead_color: color(&self.dead_color)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinker_config() -> LifeConfig {
        LifeConfig {
            rows: 5,
            cols: 5,
            alive: vec![MatrixLocation::new(1, 0), MatrixLocation::new(1, 1), MatrixLocation::new(1, 2)],
            max_gen: 10,
            ..LifeConfig::default()
        }
    }

    #[test]
    fn valid_config_builds_setup() {
        let setup = blinker_config().run_setup().unwrap();
        assert_eq!(setup.initial, Grid::new(5, 5, [(1, 0), (1, 1), (1, 2)]).unwrap());
        assert_eq!(setup.settings.max_gen, 10);
        assert_eq!(setup.settings.engine, RuleEngine::default());
        assert_eq!(setup.settings.history_cap, None);
        assert_eq!(setup.render.alive_color, Color::BLACK);
        assert_eq!(setup.render.dead_color, Color::WHITE);
        assert_eq!(setup.render.frame_interval(), Duration::from_millis(200));
    }

    #[test]
    fn pattern_adds_cells() {
        let config = LifeConfig {
            rows: 10,
            cols: 10,
            pattern: Some("block".to_string()),
            pattern_at: MatrixLocation::new(4, 4),
            ..LifeConfig::default()
        };
        let setup = config.validate().unwrap();
        assert_eq!(setup.initial.live_cells().collect::<Vec<_>>(), vec![(4, 4), (4, 5), (5, 4), (5, 5)]);
    }

    #[test]
    fn rejects_inconsistent_values() {
        let cases = [
            LifeConfig { max_gen: -1, ..blinker_config() },
            LifeConfig { rows: 0, ..blinker_config() },
            LifeConfig { rows: usize::MAX / 2, cols: 3, ..blinker_config() },
            LifeConfig { rows: usize::MAX, cols: usize::MAX, alive: Vec::new(), ..blinker_config() },
            LifeConfig { alive: vec![MatrixLocation::new(5, 0)], ..blinker_config() },
            LifeConfig { alive: vec![MatrixLocation::new(0, -2)], ..blinker_config() },
            LifeConfig { rule: Some("B3".to_string()), ..blinker_config() },
            LifeConfig { fps: 0, ..blinker_config() },
            LifeConfig { max_tracked_generations: Some(0), ..blinker_config() },
            LifeConfig { alive_color: "chartreuse".to_string(), ..blinker_config() },
            LifeConfig { pattern: Some("Glider".to_string()), pattern_at: MatrixLocation::new(3, 3), ..blinker_config() },
            LifeConfig { pattern: Some("Unicorn".to_string()), ..blinker_config() },
        ];
        for config in cases {
            match config.validate() {
                Err(LifeError::InvalidConfiguration(_)) => {}
                other => panic!("expected InvalidConfiguration for {config:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn overrides_flow_into_settings() {
        let config = LifeConfig {
            rule: Some("B36/S23".to_string()),
            boundary: Boundary::Toroidal,
            max_tracked_generations: Some(64),
            generate_image: true,
            fps: 20,
            alive_color: "dodger blue".to_string(),
            ..blinker_config()
        };
        let setup = config.validate().unwrap();
        assert_eq!(setup.settings.engine, RuleEngine::new(Rule::HIGHLIFE, Boundary::Toroidal));
        assert_eq!(setup.settings.history_cap, NonZeroUsize::new(64));
        assert!(setup.render.generate_image);
        assert_eq!(setup.render.alive_color, Color::DODGER_BLUE);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: LifeConfig = serde_json::from_str(
            r#"{ "rows": 8, "cols": 6, "alive": [{ "row": 1, "col": 2 }], "boundary": "toroidal" }"#,
        )
        .unwrap();
        assert_eq!(config.rows, 8);
        assert_eq!(config.alive, vec![MatrixLocation::new(1, 2)]);
        assert_eq!(config.boundary, Boundary::Toroidal);
        assert_eq!(config.max_gen, DEFAULT_MAX_GEN as i64);
        assert_eq!(config.fps, 5);
    }
}
