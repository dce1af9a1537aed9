//! Colors and per-kind appearance, including the grass health ramp.

use crate::core::config::ViewConfig;
use crate::core::types::{Role, Sex};

/// RGBA color (0.0 to 1.0 per channel)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// RGB8 after compositing over the black background.
    pub fn over_black(&self) -> [u8; 3] {
        let a = self.a.clamp(0.0, 1.0);
        let channel = |c: f32| (c.clamp(0.0, 1.0) * a * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
}

/// Background color for the render surface
pub const BACKGROUND: Color = Color::BLACK;

/// Text color of the status and patch labels
pub const LABEL_COLOR: Color = Color::WHITE;

/// Fixed look of a creature, decided once when its node is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatureAppearance {
    pub fill: Color,
    pub stroke: Color,
    pub radius: f32,
}

/// Appearance for a role/sex pair, or `None` for a role the view cannot draw.
pub fn creature_appearance(role: Role, sex: Sex, config: &ViewConfig) -> Option<CreatureAppearance> {
    match role {
        Role::Prey => Some(CreatureAppearance {
            fill: Color::GREEN,
            stroke: sex_stroke(sex, Color::CLEAR),
            radius: config.prey_radius,
        }),
        Role::Predator => Some(CreatureAppearance {
            fill: Color::RED,
            stroke: sex_stroke(sex, Color::WHITE),
            radius: config.predator_radius,
        }),
        Role::Unknown(_) => None,
    }
}

/// Outline color by sex; `fallback` for tags the view does not know.
pub fn sex_stroke(sex: Sex, fallback: Color) -> Color {
    match sex {
        Sex::Male => Color::BLUE,
        Sex::Female => Color::MAGENTA,
        Sex::Unknown(_) => fallback,
    }
}

/// Teal fill for a grass patch.
///
/// Health is clamped to [0, 1]. Green and alpha rise linearly with it:
/// a dead patch is a faint teal wash, a full one is saturated.
pub fn grass_color(normalized_health: f32) -> Color {
    let h = if normalized_health.is_nan() {
        0.0
    } else {
        normalized_health.clamp(0.0, 1.0)
    };
    Color::rgba(0.0, 0.7 * h, 0.7, 0.2 + 0.6 * h)
}

/// Patch label text: the raw health with exactly two decimals.
///
/// Not clamped, unlike the color. Rounding follows the exact binary value
/// of the f32 with ties to even, same as C `printf("%.2f")`.
pub fn grass_label(health: f32) -> String {
    format!("{:.2}", health)
}
