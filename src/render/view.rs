//! Frame orchestrator.
//!
//! [`SyncView`] owns every piece of per-view mutable state: the engine,
//! the entity pools, the frame clock and the status label. The host calls
//! [`SyncView::tick`] once per display refresh.
//!
//! A view is driven from a single thread. Pools and the mapper built each
//! tick are not safe for access from any other thread (input, network)
//! without external synchronization.

use glam::Vec2;

use super::clock::FrameClock;
use super::colors::LABEL_COLOR;
use super::host::{LabelAlign, NodeId, NodeKind, RenderHost};
use super::mapper::CoordinateMapper;
use super::metrics::{FrameStats, SyncMetrics};
use super::population::{count_population, PopulationCounts};
use super::reconcile::{Reconciler, VisualPools};
use crate::core::config::ViewConfig;
use crate::engine::SimulationEngine;

/// Lifecycle of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing attached yet; the next tick resets the engine
    Uninitialized,
    Running,
}

/// Keeps a render host in sync with a simulation engine.
pub struct SyncView<E> {
    engine: E,
    config: ViewConfig,
    state: ViewState,
    clock: FrameClock,
    pools: VisualPools,
    reconciler: Reconciler,
    metrics: SyncMetrics,
    status_label: Option<NodeId>,
    status_text: String,
    population: PopulationCounts,
}

impl<E: SimulationEngine> SyncView<E> {
    pub fn new(engine: E, config: ViewConfig) -> Self {
        Self {
            engine,
            clock: FrameClock::new(config.max_frame_delta),
            config,
            state: ViewState::Uninitialized,
            pools: VisualPools::new(),
            reconciler: Reconciler::new(),
            metrics: SyncMetrics::new(),
            status_label: None,
            status_text: String::new(),
            population: PopulationCounts::default(),
        }
    }

    /// Run one frame at host timestamp `now` (seconds, monotonic).
    ///
    /// The first tick resets the engine and attaches the status label, then
    /// reconciles without stepping. Later ticks step by the clamped delta.
    pub fn tick<H: RenderHost + ?Sized>(&mut self, host: &mut H, now: f64) -> FrameStats {
        self.metrics.begin_tick();

        if self.state == ViewState::Uninitialized {
            self.initialize(host);
        }

        let step = self.clock.advance(now);
        if let Some(dt) = step {
            self.engine.step(dt);
        }

        let grass = self.engine.grass_snapshot();
        let creatures = self.engine.creature_snapshot();
        let mapper = CoordinateMapper::new(self.engine.world_bounds(), host.surface_size());

        // Grass first so patches sit under creatures.
        let grass_stats =
            self.reconciler
                .sync_grass(&mut self.pools.grass, &grass, &mapper, &self.config, host);
        let creature_stats = self.reconciler.sync_creatures(
            &mut self.pools.prey,
            &mut self.pools.predators,
            &creatures,
            &mapper,
            &self.config,
            host,
        );

        self.population = count_population(&creatures);
        self.status_text = self.population.status_text();
        if let Some(label) = self.status_label {
            host.set_text(label, &self.status_text);
            host.set_position(label, Vec2::splat(self.config.status_margin));
        }

        let frame = FrameStats {
            step,
            grass: grass_stats,
            prey: creature_stats.prey,
            predators: creature_stats.predators,
            skipped: creature_stats.skipped,
            prey_count: self.population.prey,
            predator_count: self.population.predators,
        };

        if !frame.is_stable() {
            tracing::debug!(
                grass_created = frame.grass.created,
                grass_destroyed = frame.grass.destroyed,
                prey_created = frame.prey.created,
                prey_destroyed = frame.prey.destroyed,
                predators_created = frame.predators.created,
                predators_destroyed = frame.predators.destroyed,
                "reconciled frame"
            );
        }

        self.metrics.end_tick(frame);
        frame
    }

    /// Release every node this view attached and return to
    /// [`ViewState::Uninitialized`]. A later tick starts over.
    pub fn teardown<H: RenderHost + ?Sized>(&mut self, host: &mut H) {
        if self.state == ViewState::Uninitialized {
            return;
        }

        let released = self.pools.clear(host);
        if let Some(label) = self.status_label.take() {
            host.detach(label);
        }
        self.clock.reset();
        self.status_text.clear();
        self.population = PopulationCounts::default();
        self.state = ViewState::Uninitialized;

        tracing::info!(released, "view torn down");
    }

    fn initialize<H: RenderHost + ?Sized>(&mut self, host: &mut H) {
        self.engine.reset_simulation();

        let label = host.attach(NodeKind::Label {
            font_size: self.config.status_font_size,
            align: LabelAlign::TopLeft,
        });
        host.set_fill(label, LABEL_COLOR);
        host.set_position(label, Vec2::splat(self.config.status_margin));
        self.status_label = Some(label);

        self.clock = FrameClock::new(self.config.max_frame_delta);
        self.state = ViewState::Running;

        let surface = host.surface_size();
        tracing::info!(
            width = surface.x,
            height = surface.y,
            "view initialised, simulation reset"
        );
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn pools(&self) -> &VisualPools {
        &self.pools
    }

    pub fn metrics(&self) -> &SyncMetrics {
        &self.metrics
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Text last pushed to the status label.
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn population(&self) -> PopulationCounts {
        self.population
    }

    /// The status label node while running.
    pub fn status_label(&self) -> Option<NodeId> {
        self.status_label
    }

    pub fn into_engine(self) -> E {
        self.engine
    }
}
