//! Snapshot-to-scene synchronisation.
//!
//! Mirrors the simulation into a retained render host every frame.
//! This module never modifies simulation state beyond stepping it.

pub mod clock;
pub mod colors;
pub mod host;
pub mod mapper;
pub mod metrics;
pub mod pool;
pub mod population;
pub mod reconcile;
pub mod scene;
pub mod view;

pub use clock::FrameClock;
pub use colors::{grass_color, grass_label, Color};
pub use host::{LabelAlign, NodeId, NodeKind, RenderHost};
pub use mapper::CoordinateMapper;
pub use metrics::{FrameStats, KindStats, SyncMetrics};
pub use pool::{CreatureVisual, EntityPool, GrassVisual};
pub use population::{count_population, PopulationCounts};
pub use reconcile::{Reconciler, VisualPools};
pub use scene::SceneCanvas;
pub use view::{SyncView, ViewState};
