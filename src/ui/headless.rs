//! Headless runs: drive a view against a [`SceneCanvas`] at a fixed rate
//! and summarise what happened.

use std::fs::{self, File};
use std::path::Path;

use serde::Serialize;

use crate::core::error::Result;
use crate::engine::SimulationEngine;
use crate::render::metrics::{FrameStats, SyncTotals};
use crate::render::population::PopulationCounts;
use crate::render::scene::SceneCanvas;
use crate::render::view::SyncView;

/// Timestamp rate used for headless runs.
pub const HEADLESS_HZ: f64 = 60.0;

#[derive(Debug, Clone, Serialize)]
pub struct HeadlessReport {
    pub ticks: u64,
    pub initial: PopulationCounts,
    pub final_population: PopulationCounts,
    pub peak_prey: usize,
    pub peak_predators: usize,
    pub totals: SyncTotals,
    /// Nodes still attached when the run ended
    pub live_nodes: usize,
    pub nodes_attached: u64,
    pub nodes_detached: u64,
    pub avg_tick_ms: f32,
    pub max_tick_ms: f32,
}

impl HeadlessReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Tick `view` `ticks` times with timestamps spaced at `hz`.
///
/// The canvas keeps whatever the view attached; call
/// [`SyncView::teardown`] afterwards to release it.
pub fn run_headless<E: SimulationEngine>(
    view: &mut SyncView<E>,
    canvas: &mut SceneCanvas,
    ticks: u64,
    hz: f64,
) -> HeadlessReport {
    let mut initial = None;
    let mut peak_prey = 0;
    let mut peak_predators = 0;

    for tick in 0..ticks {
        let frame: FrameStats = view.tick(canvas, tick as f64 / hz);
        initial.get_or_insert(view.population());
        peak_prey = peak_prey.max(frame.prey_count);
        peak_predators = peak_predators.max(frame.predator_count);
    }

    let metrics = view.metrics();
    let report = HeadlessReport {
        ticks,
        initial: initial.unwrap_or_default(),
        final_population: view.population(),
        peak_prey,
        peak_predators,
        totals: *metrics.totals(),
        live_nodes: canvas.len(),
        nodes_attached: canvas.attached_total(),
        nodes_detached: canvas.detached_total(),
        avg_tick_ms: metrics.avg_tick_ms(),
        max_tick_ms: metrics.max_tick_ms(),
    };

    tracing::info!(
        ticks,
        prey = report.final_population.prey,
        predators = report.final_population.predators,
        simulated_seconds = report.totals.simulated_seconds,
        "headless run completed"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ViewConfig;
    use crate::simulation::{Field, Settings};

    fn seeded_view() -> SyncView<Field> {
        let settings = Settings {
            seed: Some(42),
            ..Settings::default()
        };
        SyncView::new(Field::new(settings), ViewConfig::default())
    }

    #[test]
    fn test_headless_run_summarises() {
        let mut view = seeded_view();
        let mut canvas = SceneCanvas::default();
        let report = run_headless(&mut view, &mut canvas, 30, HEADLESS_HZ);

        assert_eq!(report.ticks, 30);
        assert_eq!(report.totals.frames, 30);
        assert_eq!(report.totals.steps, 29);
        assert_eq!(report.initial.prey, 40);
        assert_eq!(report.initial.predators, 8);
        assert!(report.peak_prey >= report.final_population.prey);
        assert_eq!(
            report.live_nodes as u64,
            report.nodes_attached - report.nodes_detached
        );

        let json = report.to_json().unwrap();
        assert!(json.contains("\"final_population\""));
    }

    #[test]
    fn test_zero_ticks() {
        let mut view = seeded_view();
        let mut canvas = SceneCanvas::default();
        let report = run_headless(&mut view, &mut canvas, 0, HEADLESS_HZ);
        assert_eq!(report.totals.frames, 0);
        assert_eq!(report.initial, PopulationCounts::default());
        assert!(canvas.is_empty());
    }
}
