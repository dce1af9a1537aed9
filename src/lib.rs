//! Volterria - live predator/prey population viewer

pub mod core;
pub mod engine;
pub mod render;
pub mod simulation;
pub mod ui;
