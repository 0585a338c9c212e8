// main.rs - Loads a run configuration, then either paints it live or runs it headless

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use eframe::egui;
use glife::{ConfigSource, LifeConfig, Simulation};
use tracing::{info, warn};

mod app;
mod source;

use app::LifeApp;
use source::{JsonFileSource, demo_config};

const DEFAULT_CONFIG: &str = ".config/glife.json";

fn main() -> Result<()> {
    init_tracing();

    let config = load_config()?;
    info!(
        rows = config.rows,
        cols = config.cols,
        alive = config.alive.len(),
        pattern = config.pattern.as_deref().unwrap_or("-"),
        max_gen = config.max_gen,
        rule = config.rule.as_deref().unwrap_or("B3/S23"),
        generate_image = config.generate_image,
        fps = config.fps,
        "configuration loaded"
    );
    let setup = config.validate().context("configuration rejected")?;

    if !setup.render.generate_image {
        let result = Simulation::new(setup.initial, setup.settings).run();
        info!(
            generation = result.final_generation,
            termination = %result.termination,
            population = result.grid.population(),
            "run finished"
        );
        for advisory in &result.advisories {
            warn!("{advisory}");
        }
        print!("{}", result.grid);
        return Ok(());
    }

    let app = LifeApp::new(setup)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([820.0, 1000.0]),
        ..Default::default()
    };
    eframe::run_native("glife", options, Box::new(|_cc| Box::new(app)))
        .map_err(|err| anyhow!("viewer failed: {err}"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// An explicit path must load; the default path falls back to the demo when absent.
fn load_config() -> Result<LifeConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let source = JsonFileSource::new(path);
            source
                .life_config()
                .with_context(|| format!("loading {}", source.path().display()))
        }
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG);
            if path.exists() {
                Ok(JsonFileSource::new(path).life_config()?)
            } else {
                info!("no {DEFAULT_CONFIG} found, running the built-in demo");
                Ok(demo_config())
            }
        }
    }
}
