//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Identifier of a creature or grass patch as issued by the simulation engine.
///
/// Unique among the live entities of a kind at any instant; may be reused
/// after the owner disappears.
pub type SimId = i32;

/// Species role of a creature.
///
/// Engines may grow new roles; anything the view does not know about is
/// carried as `Unknown` with its raw tag instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Prey,
    Predator,
    Unknown(i32),
}

impl Role {
    /// Map a raw engine tag (`0` prey, `1` predator) onto a role.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Role::Prey,
            1 => Role::Predator,
            other => Role::Unknown(other),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Unknown(_))
    }
}

impl From<i32> for Role {
    fn from(raw: i32) -> Self {
        Self::from_raw(raw)
    }
}

/// Sex of a creature, with the same open-ended fallback as [`Role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    Unknown(i32),
}

impl Sex {
    /// Map a raw engine tag (`0` male, `1` female) onto a sex.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Sex::Male,
            1 => Sex::Female,
            other => Sex::Unknown(other),
        }
    }
}

impl From<i32> for Sex {
    fn from(raw: i32) -> Self {
        Self::from_raw(raw)
    }
}

/// 2D position in simulation space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Midpoint between two positions.
    pub fn midpoint(&self, other: &Self) -> Self {
        Self {
            x: 0.5 * (self.x + other.x),
            y: 0.5 * (self.y + other.y),
        }
    }

    /// Scale down to `max_len` if longer, otherwise unchanged.
    pub fn clamp_length(&self, max_len: f32) -> Self {
        let len2 = self.length_squared();
        if len2 <= max_len * max_len || len2 <= 0.0 {
            return *self;
        }
        *self * (max_len / len2.sqrt())
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}
