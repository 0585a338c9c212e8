// app.rs - egui front end that paints each generation as it is produced

use std::time::{Duration, Instant};

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use glife::{GenerationEvent, Grid, LifeError, PATTERNS, RunSetup, Simulation, SimulationResult};
use tracing::{info, warn};

const BOARD_PIXELS: f32 = 760.0;

fn to_color32(color: glife::Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), color.a())
}

pub struct LifeApp {
    setup: RunSetup,
    simulation: Simulation,
    latest: GenerationEvent,
    result: Option<SimulationResult>,

    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    random_seed: u64,

    runtime: tokio::runtime::Runtime,
}

impl LifeApp {
    pub fn new(setup: RunSetup) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let mut simulation = Simulation::new(setup.initial.clone(), setup.settings);
        let latest = simulation
            .next()
            .ok_or_else(|| anyhow::anyhow!("simulation produced no initial generation"))?;

        Ok(Self {
            update_interval: setup.render.frame_interval(),
            live_color: to_color32(setup.render.alive_color),
            dead_color: to_color32(setup.render.dead_color),
            setup,
            simulation,
            latest,
            result: None,
            is_running: false,
            last_update: Instant::now(),
            selected_pattern: 0,
            random_seed: 0,
            runtime,
        })
    }

    /// Compute one generation, with every row on its own tokio task.
    fn advance(&mut self) {
        if let Some(event) = self.runtime.block_on(self.simulation.next_concurrent()) {
            self.latest = event;
        }
        if let Some(result) = self.simulation.result() {
            if self.result.is_none() {
                info!(
                    generation = result.final_generation,
                    termination = %result.termination,
                    "run finished"
                );
                for advisory in &result.advisories {
                    warn!("{advisory}");
                }
            }
            self.result = Some(result.clone());
            self.is_running = false;
        }
    }

    /// Start over from the current seed grid.
    fn restart(&mut self) {
        self.is_running = false;
        self.result = None;
        let mut simulation = Simulation::new(self.setup.initial.clone(), self.setup.settings);
        if let Some(event) = simulation.next() {
            self.latest = event;
        }
        self.simulation = simulation;
    }

    fn reseed(&mut self, seed: Result<Grid, LifeError>) {
        match seed {
            Ok(grid) => {
                self.setup.initial = grid;
                self.restart();
            }
            Err(err) => warn!(%err, "cannot place seed"),
        }
    }

    fn apply_selected_pattern(&mut self) {
        let (rows, cols) = (self.setup.initial.rows(), self.setup.initial.cols());
        if let Some(pattern) = PATTERNS.get(self.selected_pattern) {
            let height = pattern.cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0);
            let width = pattern.cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0);
            let origin = (rows.saturating_sub(height) / 2, cols.saturating_sub(width) / 2);
            self.reseed(pattern.place(rows, cols, origin));
        }
    }

    fn apply_random_pattern(&mut self) {
        let (rows, cols) = (self.setup.initial.rows(), self.setup.initial.cols());
        self.random_seed = self.random_seed.wrapping_add(1);
        self.reseed(glife::patterns::random_grid(rows, cols, self.random_seed));
    }

    /// Flip one cell of the seed grid. Only allowed before the run has advanced.
    fn toggle_cell(&mut self, row: usize, col: usize) {
        let seed = &self.setup.initial;
        let Ok(was_alive) = seed.is_alive(row, col) else {
            return;
        };
        let mut live: Vec<_> = seed.live_cells().filter(|&cell| cell != (row, col)).collect();
        if !was_alive {
            live.push((row, col));
        }
        let toggled = Grid::new(seed.rows(), seed.cols(), live);
        self.reseed(toggled);
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-advance if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.advance();
            self.last_update = Instant::now();
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let finished = self.result.is_some();
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.add_enabled(!finished, egui::Button::new(button_text)).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.last_update = Instant::now();
                    }
                }

                if ui.add_enabled(!finished && !self.is_running, egui::Button::new("⏭ Step")).clicked() {
                    self.advance();
                }

                if ui.button("⟲ Restart").clicked() {
                    self.restart();
                }

                if ui.button("🎲 Random").clicked() {
                    self.apply_random_pattern();
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.apply_selected_pattern();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.latest.index));
            });

            ui.separator();

            // Speed control
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1.0 / self.update_interval.as_secs_f32();
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_secs_f32(1.0 / speed);
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            match &self.result {
                Some(result) => {
                    ui.label(format!(
                        "Finished at generation {}: {}",
                        result.final_generation, result.termination
                    ));
                    for advisory in &result.advisories {
                        ui.colored_label(Color32::YELLOW, advisory.to_string());
                    }
                }
                None if self.latest.index == 0 => {
                    ui.label("Click cells to edit the starting board, then press Start.");
                }
                None => {
                    ui.label("Restart to edit the starting board.");
                }
            }

            ui.separator();

            // Draw the board
            let grid = &self.latest.grid;
            let (rows, cols) = (grid.rows(), grid.cols());
            let spacing = 0.5;
            let box_size = (BOARD_PIXELS / rows.max(cols) as f32 - spacing).clamp(1.0, 15.0);

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(
                (box_size + spacing) * cols as f32 - spacing,
                (box_size + spacing) * rows as f32 - spacing,
            );

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

            painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

            let mut clicked_cell = None;
            for row in 0..rows {
                for col in 0..cols {
                    let x = start_pos.x + col as f32 * (box_size + spacing);
                    let y = start_pos.y + row as f32 * (box_size + spacing);
                    let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                    let alive = grid.is_alive(row, col).unwrap_or(false);
                    let cell_color = if alive { self.live_color } else { self.dead_color };
                    painter.rect_filled(rect, 1.0, cell_color);
                    if box_size >= 4.0 {
                        painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                    }

                    if response.clicked() {
                        if let Some(pos) = response.interact_pointer_pos() {
                            if rect.contains(pos) {
                                clicked_cell = Some((row, col));
                            }
                        }
                    }
                }
            }

            ui.separator();

            let live_cells = grid.population();
            let total = rows * cols;
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / total as f32) * 100.0));
            });

            // Seed editing only before the first step
            if let Some((row, col)) = clicked_cell {
                if !self.is_running && self.latest.index == 0 {
                    self.toggle_cell(row, col);
                }
            }
        });

        // Keep animating while running
        if self.is_running {
            ctx.request_repaint();
        }
    }
}
